use thiserror::Error;

#[cfg(test)]
#[path = "errors_test.rs"]
mod errors_test;

/// Client-side error. Every variant carries a human-readable message for
/// logging; none of them is ever shown verbatim to the user.
#[derive(Debug, Error)]
pub enum ClientError {
    // ── Transport ────────────────────────────────────────────────────────────
    #[error("Network error calling {url}: {message}")]
    Network { url: String, message: String },

    #[error("Could not decode response from {url}: {message}")]
    Decode { url: String, message: String },

    // ── Configuration ────────────────────────────────────────────────────────
    #[error("Invalid client configuration: {0}")]
    Config(String),

    // ── Page ─────────────────────────────────────────────────────────────────
    #[error("Required element '{selector}' is missing from the page")]
    MissingElement { selector: String },

    #[error("Unrecognized value '{value}' in attribute '{attribute}'")]
    InvalidMarkup { attribute: String, value: String },
}

impl ClientError {
    pub fn network(url: impl Into<String>, message: impl ToString) -> Self {
        ClientError::Network { url: url.into(), message: message.to_string() }
    }

    pub fn decode(url: impl Into<String>, message: impl ToString) -> Self {
        ClientError::Decode { url: url.into(), message: message.to_string() }
    }

    pub fn missing(selector: impl Into<String>) -> Self {
        ClientError::MissingElement { selector: selector.into() }
    }

    pub fn invalid_markup(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        ClientError::InvalidMarkup { attribute: attribute.into(), value: value.into() }
    }

    /// Request never produced a usable response body.
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Network { .. } | ClientError::Decode { .. })
    }

    pub fn is_missing_element(&self) -> bool {
        matches!(self, ClientError::MissingElement { .. })
    }

    /// The page carries an attribute value the client does not understand.
    pub fn is_invalid_markup(&self) -> bool {
        matches!(self, ClientError::InvalidMarkup { .. })
    }
}
