//! Messages between the egui render loop and the conversion service task.

use crate::core::{Conversion, ConversionRequest};

/// Commands sent from the UI thread to the service task.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Convert(ConversionRequest),
}

/// Results sent from the service task back to the UI thread.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceEvent {
    Converted(Conversion),
    ConversionFailed {
        request: ConversionRequest,
        message: String,
    },
}
