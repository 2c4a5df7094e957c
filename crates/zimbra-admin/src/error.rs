//! Error types for the admin domain layer.

use thiserror::Error;

/// Errors that can occur during admin provisioning operations.
#[derive(Debug, Error)]
pub enum Error {
    /// SOAP transport or protocol failure.
    #[error("SOAP error: {0}")]
    Soap(#[from] zimbra_soap::Error),

    /// A response entry was missing an attribute the service always stamps.
    #[error("response missing required attribute: {name}")]
    MissingAttribute {
        /// XML or directory attribute name.
        name: String,
    },

    /// The response tree did not have the expected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl Error {
    /// Returns true when the underlying failure is a fault saying the
    /// addressed entry does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Soap(err) if err.is_not_found())
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
    use zimbra_soap::SoapFault;

    #[test]
    fn test_not_found_passes_through_soap_layer() {
        let err = Error::from(zimbra_soap::Error::Fault(SoapFault {
            code: "soap:Sender".to_string(),
            reason: "no such account: bob@example.com".to_string(),
            detail_code: Some("account.NO_SUCH_ACCOUNT".to_string()),
        }));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_domain_errors_are_never_not_found() {
        let err = Error::MissingAttribute {
            name: "zimbraCreateTimestamp".to_string(),
        };
        assert!(!err.is_not_found());
        let err = Error::MalformedResponse("no account element".to_string());
        assert!(!err.is_not_found());
    }
}
