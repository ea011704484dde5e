/// Failure modes of the storefront widgets. None of them is ever surfaced to
/// the shopper: every variant degrades to "widget inactive" or "default value".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetError {
    /// A required DOM node is absent; the widget is not mounted.
    MissingElement(String),
    /// Persisted storage threw on read/write or does not exist.
    StorageUnavailable(String),
    /// A persisted value could not be decoded.
    MalformedPersistedValue(String),
    /// Widget configuration (selector overrides) could not be read.
    InvalidConfiguration(String),
    /// Any other browser API call failed.
    BrowserApi(String),
}

impl std::fmt::Display for WidgetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WidgetError::MissingElement(what) => write!(f, "Missing element: {}", what),
            WidgetError::StorageUnavailable(msg) => write!(f, "Storage unavailable: {}", msg),
            WidgetError::MalformedPersistedValue(msg) => write!(f, "Malformed persisted value: {}", msg),
            WidgetError::InvalidConfiguration(msg) => write!(f, "Invalid configuration: {}", msg),
            WidgetError::BrowserApi(msg) => write!(f, "Browser API error: {}", msg),
        }
    }
}

impl std::error::Error for WidgetError {}

impl From<serde_json::Error> for WidgetError {
    fn from(error: serde_json::Error) -> Self {
        WidgetError::MalformedPersistedValue(error.to_string())
    }
}

pub type WidgetResult<T> = Result<T, WidgetError>;

/// Render a `JsValue` error the way the console would show it.
pub fn js_error_message(value: &wasm_bindgen::JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
