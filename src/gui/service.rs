//! Background task that performs rate lookups for the window.

use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::events::{ServiceEvent, UiEvent};
use crate::core::Converter;

/// Handles UI commands until the UI side of the channel is dropped.
pub async fn run(
    converter: Converter,
    mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
    svc_tx: mpsc::UnboundedSender<ServiceEvent>,
    repaint: impl Fn() + Send + 'static,
) {
    while let Some(event) = ui_rx.recv().await {
        let reply = match event {
            UiEvent::Convert(request) => match converter.convert(request).await {
                Ok(conversion) => ServiceEvent::Converted(conversion),
                Err(e) => {
                    warn!(error = %e, ?request, "Conversion failed");
                    ServiceEvent::ConversionFailed {
                        request,
                        message: e.to_string(),
                    }
                }
            },
        };

        if svc_tx.send(reply).is_err() {
            break;
        }
        repaint();
    }
    debug!("Conversion service stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::conversion::tests::{FailingProvider, FixedRateProvider};
    use crate::core::{ConversionRequest, Currency};
    use std::sync::Arc;

    fn request() -> ConversionRequest {
        ConversionRequest {
            amount: 10.0,
            from: Currency::Usd,
            to: Currency::Npr,
        }
    }

    #[tokio::test]
    async fn test_service_replies_with_conversion() {
        let (ui_tx, ui_rx) = mpsc::unbounded_channel();
        let (svc_tx, mut svc_rx) = mpsc::unbounded_channel();
        let converter = Converter::new(Arc::new(FixedRateProvider::new(&[("NPR", 140.0)])));
        let handle = tokio::spawn(run(converter, ui_rx, svc_tx, || {}));

        ui_tx.send(UiEvent::Convert(request())).unwrap();
        match svc_rx.recv().await.unwrap() {
            ServiceEvent::Converted(conversion) => assert_eq!(conversion.converted, 1400.0),
            other => panic!("unexpected event: {other:?}"),
        }

        drop(ui_tx);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_service_reports_failure() {
        let (ui_tx, ui_rx) = mpsc::unbounded_channel();
        let (svc_tx, mut svc_rx) = mpsc::unbounded_channel();
        let converter = Converter::new(Arc::new(FailingProvider));
        let handle = tokio::spawn(run(converter, ui_rx, svc_tx, || {}));

        ui_tx.send(UiEvent::Convert(request())).unwrap();
        match svc_rx.recv().await.unwrap() {
            ServiceEvent::ConversionFailed { request: r, message } => {
                assert_eq!(r, request());
                assert!(message.contains("connection refused"));
            }
            other => panic!("unexpected event: {other:?}"),
        }

        drop(ui_tx);
        handle.await.unwrap();
    }
}
