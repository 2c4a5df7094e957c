//! SOAP 1.2 envelope codec for the admin service.
//!
//! A request wraps one admin operation element in an envelope whose header
//! carries the `urn:zimbra` context block with the session auth token. A
//! response unwraps back to the operation response element; a `Fault` body
//! becomes [`Error::Fault`].

use crate::element::{self, Element};
use crate::error::{Error, Result};
use crate::fault::SoapFault;

/// SOAP 1.2 envelope namespace.
pub const SOAP_NS: &str = "http://www.w3.org/2003/05/soap-envelope";
/// Namespace of the context header block.
pub const ZIMBRA_NS: &str = "urn:zimbra";
/// Namespace of admin operations.
pub const ADMIN_NS: &str = "urn:zimbraAdmin";

/// Builds the envelope document for one admin request.
///
/// The request element's name is the operation name; the admin namespace is
/// stamped onto it here so builders stay namespace-free.
#[must_use]
pub fn build(auth_token: Option<&str>, request: &Element) -> String {
    let mut operation = request.clone();
    operation.set_attr("xmlns", ADMIN_NS);

    let mut xml = String::with_capacity(512);
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>");
    xml.push_str("<soap:Envelope xmlns:soap=\"");
    xml.push_str(SOAP_NS);
    xml.push_str("\"><soap:Header><context xmlns=\"");
    xml.push_str(ZIMBRA_NS);
    xml.push_str("\">");
    if let Some(token) = auth_token {
        xml.push_str("<authToken>");
        xml.push_str(&element::escape(token));
        xml.push_str("</authToken>");
    }
    xml.push_str("</context></soap:Header><soap:Body>");
    operation.write_xml(&mut xml);
    xml.push_str("</soap:Body></soap:Envelope>");
    xml
}

/// Unwraps a response envelope, returning the operation response element.
///
/// # Errors
///
/// Returns an error if the document is not a SOAP envelope, the body is
/// missing or empty, or the body carries a fault.
pub fn parse(xml: &str) -> Result<Element> {
    let envelope = Element::parse(xml)?;
    if envelope.name() != "Envelope" {
        return Err(Error::Envelope(format!(
            "expected Envelope, got {}",
            envelope.name()
        )));
    }
    let body = envelope
        .child("Body")
        .ok_or_else(|| Error::Envelope("missing Body".to_string()))?;
    if let Some(fault) = body.child("Fault") {
        return Err(Error::Fault(SoapFault::from_element(fault)));
    }
    body.children()
        .first()
        .cloned()
        .ok_or_else(|| Error::Envelope("empty Body".to_string()))
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

    mod building_tests {
        use super::*;

        #[test]
        fn test_build_wraps_operation_in_admin_namespace() {
            let mut request = Element::new("GetAccountRequest");
            request.add("account", "bob@example.com").set_attr("by", "name");
            let xml = build(Some("0_token"), &request);
            assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
            assert!(xml.contains("<soap:Envelope xmlns:soap=\"http://www.w3.org/2003/05/soap-envelope\">"));
            assert!(xml.contains("<context xmlns=\"urn:zimbra\"><authToken>0_token</authToken></context>"));
            assert!(xml.contains(
                "<soap:Body><GetAccountRequest xmlns=\"urn:zimbraAdmin\">\
                 <account by=\"name\">bob@example.com</account></GetAccountRequest></soap:Body>"
            ));
        }

        #[test]
        fn test_build_without_token_leaves_context_empty() {
            let request = Element::new("GetAllAccountsRequest");
            let xml = build(None, &request);
            assert!(xml.contains("<context xmlns=\"urn:zimbra\"></context>"));
            assert!(!xml.contains("authToken"));
        }

        #[test]
        fn test_build_escapes_token() {
            let request = Element::new("GetAllAccountsRequest");
            let xml = build(Some("a<b&c"), &request);
            assert!(xml.contains("<authToken>a&lt;b&amp;c</authToken>"));
        }
    }

    mod unwrapping_tests {
        use super::*;

        #[test]
        fn test_parse_returns_operation_response() {
            let response = parse(
                "<soap:Envelope xmlns:soap=\"http://www.w3.org/2003/05/soap-envelope\">\
                 <soap:Header><context xmlns=\"urn:zimbra\"/></soap:Header>\
                 <soap:Body><GetAccountResponse xmlns=\"urn:zimbraAdmin\">\
                 <account id=\"42\" name=\"bob@example.com\"/>\
                 </GetAccountResponse></soap:Body></soap:Envelope>",
            )
            .unwrap();
            assert_eq!(response.name(), "GetAccountResponse");
            assert!(response.child("account").is_some());
        }

        #[test]
        fn test_parse_fault_becomes_error() {
            let err = parse(
                "<soap:Envelope xmlns:soap=\"http://www.w3.org/2003/05/soap-envelope\">\
                 <soap:Body><soap:Fault>\
                 <soap:Code><soap:Value>soap:Sender</soap:Value></soap:Code>\
                 <soap:Reason><soap:Text>no such account: bob</soap:Text></soap:Reason>\
                 <soap:Detail><Error xmlns=\"urn:zimbra\">\
                 <Code>account.NO_SUCH_ACCOUNT</Code></Error></soap:Detail>\
                 </soap:Fault></soap:Body></soap:Envelope>",
            )
            .unwrap_err();
            match err {
                Error::Fault(fault) => {
                    assert!(fault.is_not_found());
                    assert_eq!(fault.code, "soap:Sender");
                }
                other => panic!("expected fault, got {other:?}"),
            }
        }

        #[test]
        fn test_parse_rejects_non_envelope_root() {
            let err = parse("<html/>").unwrap_err();
            assert!(matches!(err, Error::Envelope(_)));
        }

        #[test]
        fn test_parse_rejects_missing_or_empty_body() {
            let missing = parse(
                "<soap:Envelope xmlns:soap=\"http://www.w3.org/2003/05/soap-envelope\">\
                 <soap:Header/></soap:Envelope>",
            )
            .unwrap_err();
            assert!(matches!(missing, Error::Envelope(_)));

            let empty = parse(
                "<soap:Envelope xmlns:soap=\"http://www.w3.org/2003/05/soap-envelope\">\
                 <soap:Body/></soap:Envelope>",
            )
            .unwrap_err();
            assert!(matches!(empty, Error::Envelope(_)));
        }
    }
}
