//! Access-control adapter.
//!
//! Grants ride on the multi-valued `zimbraACE` directory attribute as
//! `grantee-id grantee-type right` triples. The account layer treats entries
//! as opaque: anything that can serialize itself into a request body
//! qualifies as a grant, and reads produce the standard [`Ace`] form.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use zimbra_soap::attr;
use zimbra_soap::element::Element;

/// Directory attribute carrying access-control entries.
const ACE_ATTR: &str = "zimbraACE";

/// An access-control grant attached to a directory entry.
pub trait AclEntry: fmt::Debug + Send + Sync {
    /// Serializes this grant into a request body.
    fn apply(&self, body: &mut Element);
}

/// The standard grant form: grantee id, grantee type and right name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ace {
    /// Zimbra id of the grantee.
    pub grantee_id: String,
    /// Grantee type token (`usr`, `grp`, `dom`, ...).
    pub grantee_type: String,
    /// Name of the granted right.
    pub right: String,
}

impl Ace {
    /// Creates a grant.
    #[must_use]
    pub fn new(
        grantee_id: impl Into<String>,
        grantee_type: impl Into<String>,
        right: impl Into<String>,
    ) -> Self {
        Self {
            grantee_id: grantee_id.into(),
            grantee_type: grantee_type.into(),
            right: right.into(),
        }
    }

    /// The `zimbraACE` wire form.
    #[must_use]
    pub fn to_wire(&self) -> String {
        format!("{} {} {}", self.grantee_id, self.grantee_type, self.right)
    }

    fn from_wire(raw: &str) -> Option<Self> {
        let mut parts = raw.split_whitespace();
        let grantee_id = parts.next()?;
        let grantee_type = parts.next()?;
        let right = parts.next()?;
        Some(Self::new(grantee_id, grantee_type, right))
    }
}

impl AclEntry for Ace {
    fn apply(&self, body: &mut Element) {
        attr::inject(body, ACE_ATTR, Some(self.to_wire()));
    }
}

/// Reads every grant from a response entry. Values that do not parse as
/// triples are skipped.
#[must_use]
pub fn read(node: &Element) -> Vec<Arc<dyn AclEntry>> {
    let Some(value) = attr::read(node, ACE_ATTR) else {
        return Vec::new();
    };
    value
        .into_vec()
        .iter()
        .filter_map(|raw| Ace::from_wire(raw))
        .map(|ace| Arc::new(ace) as Arc<dyn AclEntry>)
        .collect()
}

/// Emits the directive clearing every grant: the attribute written with an
/// empty value.
pub fn delete_all(body: &mut Element) {
    attr::clear(body, ACE_ATTR);
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

    #[test]
    fn test_apply_emits_ace_attribute() {
        let ace = Ace::new("3e2da734", "usr", "sendAs");
        let mut body = Element::new("ModifyAccountRequest");
        ace.apply(&mut body);
        assert_eq!(
            body.to_xml(),
            "<ModifyAccountRequest><a n=\"zimbraACE\">3e2da734 usr sendAs</a></ModifyAccountRequest>"
        );
    }

    #[test]
    fn test_delete_all_emits_empty_value() {
        let mut body = Element::new("ModifyAccountRequest");
        delete_all(&mut body);
        assert_eq!(
            body.to_xml(),
            "<ModifyAccountRequest><a n=\"zimbraACE\"/></ModifyAccountRequest>"
        );
    }

    #[test]
    fn test_read_single_grant() {
        let node = Element::parse(
            "<account><a n=\"zimbraACE\">3e2da734 usr sendAs</a></account>",
        )
        .unwrap();
        let grants = read(&node);
        assert_eq!(grants.len(), 1);
    }

    #[test]
    fn test_read_multiple_grants() {
        let node = Element::parse(
            "<account>\
             <a n=\"zimbraACE\">3e2da734 usr sendAs</a>\
             <a n=\"zimbraACE\">77s0s9fs grp viewFreeBusy</a>\
             </account>",
        )
        .unwrap();
        let grants = read(&node);
        assert_eq!(grants.len(), 2);

        let mut body = Element::new("ModifyAccountRequest");
        for grant in &grants {
            grant.apply(&mut body);
        }
        assert_eq!(
            body.to_xml(),
            "<ModifyAccountRequest>\
             <a n=\"zimbraACE\">3e2da734 usr sendAs</a>\
             <a n=\"zimbraACE\">77s0s9fs grp viewFreeBusy</a>\
             </ModifyAccountRequest>"
        );
    }

    #[test]
    fn test_read_skips_malformed_values() {
        let node = Element::parse(
            "<account>\
             <a n=\"zimbraACE\">only-two tokens</a>\
             <a n=\"zimbraACE\">3e2da734 usr sendAs</a>\
             </account>",
        )
        .unwrap();
        assert_eq!(read(&node).len(), 1);
    }

    #[test]
    fn test_read_absent_attribute() {
        let node = Element::parse("<account/>").unwrap();
        assert!(read(&node).is_empty());
    }

    #[test]
    fn test_wire_round_trip() {
        let ace = Ace::new("3e2da734", "usr", "sendAs");
        assert_eq!(Ace::from_wire(&ace.to_wire()), Some(ace));
    }
}
