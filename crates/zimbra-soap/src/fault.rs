//! SOAP fault model.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::element::Element;

/// A SOAP fault returned by the admin service.
///
/// Faults carry a SOAP-level code (`soap:Sender`, `soap:Receiver`), a human
/// readable reason, and, for service errors, a Zimbra detail code such as
/// `account.NO_SUCH_ACCOUNT`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoapFault {
    /// SOAP fault code value.
    pub code: String,
    /// Human-readable fault reason.
    pub reason: String,
    /// Service error code from the fault detail, when present.
    pub detail_code: Option<String>,
}

impl SoapFault {
    /// Builds a fault from a parsed `Fault` element.
    ///
    /// Missing parts read as empty rather than failing.
    #[must_use]
    pub fn from_element(fault: &Element) -> Self {
        let code = fault
            .child("Code")
            .and_then(|code| code.child("Value"))
            .map(|value| value.text().to_string())
            .unwrap_or_default();
        let reason = fault
            .child("Reason")
            .and_then(|reason| reason.child("Text"))
            .map(|text| text.text().to_string())
            .unwrap_or_default();
        let detail_code = fault
            .child("Detail")
            .and_then(|detail| detail.child("Error"))
            .and_then(|error| error.child("Code"))
            .map(|code| code.text().to_string());
        Self {
            code,
            reason,
            detail_code,
        }
    }

    /// True when the fault signals that the addressed entry does not exist.
    ///
    /// The service uses the `NO_SUCH_*` detail code family
    /// (`account.NO_SUCH_ACCOUNT`, `account.NO_SUCH_ALIAS`, ...); older
    /// releases only carry a "no such ..." reason text.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        if let Some(code) = &self.detail_code
            && code.contains("NO_SUCH_")
        {
            return true;
        }
        self.reason.to_ascii_lowercase().contains("no such")
    }
}

impl fmt::Display for SoapFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail_code {
            Some(code) => write!(f, "{} ({}): {}", self.code, code, self.reason),
            None => write!(f, "{}: {}", self.code, self.reason),
        }
    }
}

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

    fn fault_element(reason: &str, detail_code: Option<&str>) -> Element {
        let detail = detail_code.map_or_else(String::new, |code| {
            format!("<Detail><Error><Code>{code}</Code></Error></Detail>")
        });
        Element::parse(&format!(
            "<Fault><Code><Value>soap:Sender</Value></Code>\
             <Reason><Text>{reason}</Text></Reason>{detail}</Fault>"
        ))
        .unwrap()
    }

    #[test]
    fn test_from_element_reads_all_parts() {
        let fault = SoapFault::from_element(&fault_element(
            "no such account: bob@example.com",
            Some("account.NO_SUCH_ACCOUNT"),
        ));
        assert_eq!(fault.code, "soap:Sender");
        assert_eq!(fault.reason, "no such account: bob@example.com");
        assert_eq!(
            fault.detail_code.as_deref(),
            Some("account.NO_SUCH_ACCOUNT")
        );
    }

    #[test]
    fn test_from_element_tolerates_missing_parts() {
        let fault = SoapFault::from_element(&Element::parse("<Fault/>").unwrap());
        assert_eq!(fault.code, "");
        assert_eq!(fault.reason, "");
        assert_eq!(fault.detail_code, None);
    }

    #[test]
    fn test_not_found_by_detail_code_family() {
        for code in [
            "account.NO_SUCH_ACCOUNT",
            "account.NO_SUCH_ALIAS",
            "account.NO_SUCH_DOMAIN",
        ] {
            let fault = SoapFault::from_element(&fault_element("lookup failed", Some(code)));
            assert!(fault.is_not_found(), "{code}");
        }
    }

    #[test]
    fn test_not_found_by_reason_text_without_detail() {
        let fault = SoapFault::from_element(&fault_element("No such account: bob", None));
        assert!(fault.is_not_found());
    }

    #[test]
    fn test_other_faults_are_not_not_found() {
        let fault = SoapFault::from_element(&fault_element(
            "permission denied: need adminLoginAs right",
            Some("service.PERM_DENIED"),
        ));
        assert!(!fault.is_not_found());
    }

    #[test]
    fn test_display_mentions_detail_code() {
        let fault = SoapFault {
            code: "soap:Sender".to_string(),
            reason: "no such account".to_string(),
            detail_code: Some("account.NO_SUCH_ACCOUNT".to_string()),
        };
        assert_eq!(
            fault.to_string(),
            "soap:Sender (account.NO_SUCH_ACCOUNT): no such account"
        );
    }
}
