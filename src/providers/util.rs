use anyhow::Error;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Runs `operation` once, then up to `retries` more times while it fails,
/// sleeping `delay` between attempts. Returns the last error when every
/// attempt fails.
pub async fn with_retry<F, Fut, T, E>(
    mut operation: F,
    retries: usize,
    delay: Duration,
) -> Result<T, Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Into<Error>,
{
    let mut attempt = 0;
    loop {
        match operation().await.map_err(Into::into) {
            Ok(val) => return Ok(val),
            Err(err) if attempt >= retries => return Err(err),
            Err(err) => {
                attempt += 1;
                debug!(attempt, retries, error = %err, "Request failed, retrying");
                tokio::time::sleep(delay).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_retry_succeeds_after_failures() {
        let calls = AtomicUsize::new(0);
        let result = with_retry(
            || async {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                if n < 2 {
                    Err(anyhow!("boom {n}"))
                } else {
                    Ok(n)
                }
            },
            2,
            Duration::from_millis(1),
        )
        .await;
        assert_eq!(result.unwrap(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_retry_returns_last_error() {
        let calls = AtomicUsize::new(0);
        let result: Result<(), _> = with_retry(
            || async {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                Err(anyhow!("boom {n}"))
            },
            1,
            Duration::from_millis(1),
        )
        .await;
        assert_eq!(result.unwrap_err().to_string(), "boom 1");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
