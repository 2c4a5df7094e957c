//! Generic directory-attribute codec.
//!
//! The admin service carries open-ended directory attributes as repeated
//! `<a n="attribute-name">value</a>` children of an entry element. Writes
//! omit unset values; reads must cope with the cardinality ambiguity, where
//! one occurrence is a scalar and several are a list.

use std::fmt::Display;

use crate::element::Element;

/// Element name of a generic directory attribute.
const ATTR_ELEMENT: &str = "a";
/// XML attribute holding the directory attribute's name.
const ATTR_NAME: &str = "n";

/// Value of a directory attribute as it occurred in a response entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// The attribute occurred exactly once.
    Single(String),
    /// The attribute occurred several times.
    Multi(Vec<String>),
}

impl AttrValue {
    /// Normalizes to a list regardless of cardinality.
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::Single(value) => vec![value],
            Self::Multi(values) => values,
        }
    }
}

/// Writes `value` as a directory attribute on `node`.
///
/// A `None` or empty value is a no-op: leaving an attribute out of a write
/// preserves whatever the server already holds for it.
pub fn inject<V: Display>(node: &mut Element, name: &str, value: Option<V>) {
    let Some(value) = value else { return };
    let text = value.to_string();
    if text.is_empty() {
        return;
    }
    node.add(ATTR_ELEMENT, text).set_attr(ATTR_NAME, name);
}

/// Writes the attribute with an empty value, the server's "clear this
/// attribute" directive.
pub fn clear(node: &mut Element, name: &str) {
    node.add(ATTR_ELEMENT, "").set_attr(ATTR_NAME, name);
}

/// Reads the first value of a possibly multi-valued attribute.
#[must_use]
pub fn single_read<'a>(node: &'a Element, name: &str) -> Option<&'a str> {
    node.descendants(ATTR_ELEMENT)
        .into_iter()
        .find(|a| a.attr(ATTR_NAME) == Some(name))
        .map(Element::text)
}

/// Reads an attribute preserving its cardinality.
#[must_use]
pub fn read(node: &Element, name: &str) -> Option<AttrValue> {
    let values: Vec<String> = node
        .descendants(ATTR_ELEMENT)
        .into_iter()
        .filter(|a| a.attr(ATTR_NAME) == Some(name))
        .map(|a| a.text().to_string())
        .collect();
    match values.len() {
        0 => None,
        1 => values.into_iter().next().map(AttrValue::Single),
        _ => Some(AttrValue::Multi(values)),
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

    fn entry(xml: &str) -> Element {
        Element::parse(xml).unwrap()
    }

    mod writing_tests {
        use super::*;

        #[test]
        fn test_inject_emits_named_attribute() {
            let mut body = Element::new("CreateAccountRequest");
            inject(&mut body, "zimbraCOSId", Some("cos-1"));
            assert_eq!(
                body.to_xml(),
                "<CreateAccountRequest><a n=\"zimbraCOSId\">cos-1</a></CreateAccountRequest>"
            );
        }

        #[test]
        fn test_inject_skips_none_and_empty() {
            let mut body = Element::new("CreateAccountRequest");
            inject::<&str>(&mut body, "zimbraCOSId", None);
            inject(&mut body, "zimbraCOSId", Some(""));
            assert_eq!(body.to_xml(), "<CreateAccountRequest/>");
        }

        #[test]
        fn test_inject_accepts_display_values() {
            let mut body = Element::new("ModifyAccountRequest");
            inject(&mut body, "zimbraMailQuota", Some(10_737_418_240_i64));
            assert_eq!(
                body.to_xml(),
                "<ModifyAccountRequest><a n=\"zimbraMailQuota\">10737418240</a></ModifyAccountRequest>"
            );
        }

        #[test]
        fn test_clear_emits_empty_value() {
            let mut body = Element::new("ModifyAccountRequest");
            clear(&mut body, "zimbraACE");
            assert_eq!(
                body.to_xml(),
                "<ModifyAccountRequest><a n=\"zimbraACE\"/></ModifyAccountRequest>"
            );
        }
    }

    mod reading_tests {
        use super::*;

        #[test]
        fn test_single_read_returns_first_occurrence() {
            let node = entry(
                "<account><a n=\"zimbraMailAlias\">one@x</a>\
                 <a n=\"zimbraMailAlias\">two@x</a></account>",
            );
            assert_eq!(single_read(&node, "zimbraMailAlias"), Some("one@x"));
        }

        #[test]
        fn test_single_read_missing_attribute() {
            let node = entry("<account><a n=\"sn\">Smith</a></account>");
            assert_eq!(single_read(&node, "givenName"), None);
        }

        #[test]
        fn test_read_scalar_cardinality() {
            let node = entry("<account><a n=\"sn\">Smith</a></account>");
            assert_eq!(
                read(&node, "sn"),
                Some(AttrValue::Single("Smith".to_string()))
            );
        }

        #[test]
        fn test_read_list_cardinality() {
            let node = entry(
                "<account><a n=\"zimbraMailAlias\">one@x</a>\
                 <a n=\"zimbraMailAlias\">two@x</a></account>",
            );
            assert_eq!(
                read(&node, "zimbraMailAlias"),
                Some(AttrValue::Multi(vec![
                    "one@x".to_string(),
                    "two@x".to_string()
                ]))
            );
        }

        #[test]
        fn test_read_missing_attribute() {
            let node = entry("<account/>");
            assert_eq!(read(&node, "zimbraMailAlias"), None);
        }

        #[test]
        fn test_read_finds_nested_attributes() {
            // Reads also work one level up, on the response element itself.
            let node = entry(
                "<GetAccountResponse><account>\
                 <a n=\"zimbraCOSId\">cos-1</a></account></GetAccountResponse>",
            );
            assert_eq!(single_read(&node, "zimbraCOSId"), Some("cos-1"));
        }

        #[test]
        fn test_into_vec_normalizes_cardinality() {
            assert_eq!(
                AttrValue::Single("a".to_string()).into_vec(),
                vec!["a".to_string()]
            );
            assert_eq!(
                AttrValue::Multi(vec!["a".to_string(), "b".to_string()]).into_vec(),
                vec!["a".to_string(), "b".to_string()]
            );
        }
    }
}
