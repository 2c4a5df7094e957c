//! Error types for the SOAP wire layer.

use thiserror::Error;

use crate::fault::SoapFault;

/// Errors that can occur while talking to the admin SOAP endpoint.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP transport failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response XML could not be parsed.
    #[error("XML error: {0}")]
    Xml(String),

    /// The response envelope was missing a required part.
    #[error("Envelope error: {0}")]
    Envelope(String),

    /// The service answered with a SOAP fault.
    #[error("SOAP fault: {0}")]
    Fault(SoapFault),

    /// An attribute value did not match the generalized-time form.
    #[error("Invalid timestamp: {value:?}")]
    InvalidTimestamp {
        /// The raw attribute value.
        value: String,
    },
}

impl Error {
    /// Returns true when this is a fault saying the addressed entry does not
    /// exist.
    ///
    /// Read-style callers use this to turn the fault into an absent result
    /// instead of a failure.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Fault(fault) if fault.is_not_found())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Self::Xml(err.to_string())
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::redundant_clone,
    clippy::manual_string_new,
    clippy::needless_collect,
    clippy::unreadable_literal,
    clippy::used_underscore_items,
    clippy::similar_names
)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_predicate_on_fault() {
        let err = Error::Fault(SoapFault {
            code: "soap:Sender".to_string(),
            reason: "no such account: bob@example.com".to_string(),
            detail_code: Some("account.NO_SUCH_ACCOUNT".to_string()),
        });
        assert!(err.is_not_found());
    }

    #[test]
    fn test_not_found_predicate_on_other_variants() {
        let err = Error::Envelope("missing Body".to_string());
        assert!(!err.is_not_found());

        let err = Error::Fault(SoapFault {
            code: "soap:Sender".to_string(),
            reason: "permission denied".to_string(),
            detail_code: Some("service.PERM_DENIED".to_string()),
        });
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_display_includes_fault() {
        let err = Error::Fault(SoapFault {
            code: "soap:Receiver".to_string(),
            reason: "system failure".to_string(),
            detail_code: None,
        });
        assert!(err.to_string().contains("system failure"));
    }
}
