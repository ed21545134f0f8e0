use thiserror::Error;

/// Error depicting errors that occur while generating the widget document
///
#[derive(Debug, Error)]
#[error("error while generating widget: {0}")]
pub struct WidgetError(pub String);
