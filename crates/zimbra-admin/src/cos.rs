//! Class-of-service reference.

use serde::{Deserialize, Serialize};

/// Reference to a class of service, the policy bundle accounts are assigned
/// to.
///
/// Only the server-assigned id participates in account writes; the name is
/// carried for display when a lookup supplied it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cos {
    /// Server-assigned COS id.
    pub id: String,
    /// COS name, when known.
    pub name: Option<String>,
}

impl Cos {
    /// Creates a reference from a COS id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
        }
    }

    /// Creates a reference carrying both id and name.
    #[must_use]
    pub fn named(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
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

    #[test]
    fn test_constructors() {
        let by_id = Cos::new("5b6c38f4");
        assert_eq!(by_id.id, "5b6c38f4");
        assert_eq!(by_id.name, None);

        let named = Cos::named("5b6c38f4", "premium");
        assert_eq!(named.name.as_deref(), Some("premium"));
    }
}
