//! Directory boolean representation.

use serde::{Deserialize, Serialize};

/// A boolean as the directory service represents it.
///
/// The admin API writes booleans as the literal strings `TRUE` and `FALSE`,
/// while older tooling and LDAP exports also feed it `1`/`0` and bare
/// `true`/`false`. `ZmBool` converges every accepted representation onto a
/// strict boolean: `true`, the string `TRUE` in any case, and the number `1`
/// are truthy; everything else, including unset and unrecognized strings,
/// reads as `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZmBool(bool);

impl ZmBool {
    /// Reads a wire string.
    #[must_use]
    pub fn from_wire(raw: &str) -> Self {
        let raw = raw.trim();
        Self(raw.eq_ignore_ascii_case("true") || raw == "1")
    }

    /// The strict boolean value.
    #[must_use]
    pub const fn as_bool(self) -> bool {
        self.0
    }

    /// The wire form: `TRUE` or `FALSE`.
    #[must_use]
    pub const fn to_wire(self) -> &'static str {
        if self.0 { "TRUE" } else { "FALSE" }
    }
}

impl From<bool> for ZmBool {
    fn from(value: bool) -> Self {
        Self(value)
    }
}

impl From<&str> for ZmBool {
    fn from(value: &str) -> Self {
        Self::from_wire(value)
    }
}

impl From<String> for ZmBool {
    fn from(value: String) -> Self {
        Self::from_wire(&value)
    }
}

impl From<i64> for ZmBool {
    fn from(value: i64) -> Self {
        Self(value == 1)
    }
}

impl From<ZmBool> for bool {
    fn from(value: ZmBool) -> Self {
        value.as_bool()
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
    fn test_truthy_forms() {
        assert!(ZmBool::from(true).as_bool());
        assert!(ZmBool::from("TRUE").as_bool());
        assert!(ZmBool::from("true").as_bool());
        assert!(ZmBool::from("True").as_bool());
        assert!(ZmBool::from(1_i64).as_bool());
        assert!(ZmBool::from_wire(" TRUE ").as_bool());
    }

    #[test]
    fn test_falsy_forms() {
        assert!(!ZmBool::from(false).as_bool());
        assert!(!ZmBool::from("FALSE").as_bool());
        assert!(!ZmBool::from("false").as_bool());
        assert!(!ZmBool::from(0_i64).as_bool());
        assert!(!ZmBool::from("").as_bool());
        assert!(!ZmBool::from("yes").as_bool());
        assert!(!ZmBool::from("garbage").as_bool());
        assert!(!ZmBool::default().as_bool());
    }

    #[test]
    fn test_wire_form() {
        assert_eq!(ZmBool::from(true).to_wire(), "TRUE");
        assert_eq!(ZmBool::from(false).to_wire(), "FALSE");
    }

    #[test]
    fn test_wire_round_trip() {
        for value in [true, false] {
            let wire = ZmBool::from(value).to_wire();
            assert_eq!(ZmBool::from_wire(wire).as_bool(), value);
        }
    }
}
