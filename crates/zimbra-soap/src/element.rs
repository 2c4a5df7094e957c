//! Owned XML element tree.
//!
//! A thin DOM used on both sides of the wire: request builders grow a tree
//! and serialize it into the envelope body, response handling parses server
//! XML back into one. Namespace prefixes are stripped while parsing, so
//! lookups go by local name regardless of how the server prefixed its
//! response.

use std::fmt;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::{Error, Result};

/// A single XML element: local name, attributes, text and child elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<Element>,
}

impl Element {
    /// Creates an empty element with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// The element's local name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The element's own text content.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the text content.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Appends a child element with the given name and text, returning a
    /// mutable reference to it so attributes can be chained on.
    pub fn add(&mut self, name: impl Into<String>, text: impl Into<String>) -> &mut Self {
        let mut child = Self::new(name);
        child.text = text.into();
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// Appends an already-built child element.
    pub fn push(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Sets an attribute, replacing any previous value, and returns `self`
    /// for chaining.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let name = name.into();
        if let Some(slot) = self.attributes.iter_mut().find(|(key, _)| *key == name) {
            slot.1 = value.into();
        } else {
            self.attributes.push((name, value.into()));
        }
        self
    }

    /// Looks up an attribute value by name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// The attributes in document order.
    #[must_use]
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// The direct children in document order.
    #[must_use]
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// The first direct child with the given local name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Every descendant with the given local name, in document order.
    #[must_use]
    pub fn descendants(&self, name: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect_descendants(name, &mut found);
        found
    }

    fn collect_descendants<'a>(&'a self, name: &str, found: &mut Vec<&'a Element>) {
        for child in &self.children {
            if child.name == name {
                found.push(child);
            }
            child.collect_descendants(name, found);
        }
    }

    /// Serializes the element and its subtree as XML.
    #[must_use]
    pub fn to_xml(&self) -> String {
        let mut out = String::new();
        self.write_xml(&mut out);
        out
    }

    /// Writes the element and its subtree as XML into `out`.
    pub fn write_xml(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (key, value) in &self.attributes {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(&escape(value));
            out.push('"');
        }
        if self.text.is_empty() && self.children.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        out.push_str(&escape(&self.text));
        for child in &self.children {
            child.write_xml(out);
        }
        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
    }

    /// Parses an XML document into an element tree.
    ///
    /// The document must have exactly one root element. Leading and trailing
    /// whitespace inside text nodes is trimmed.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not well-formed XML.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            match reader.read_event()? {
                Event::Start(start) => {
                    stack.push(element_from_start(&start)?);
                }
                Event::Empty(start) => {
                    let element = element_from_start(&start)?;
                    place(element, &mut stack, &mut root)?;
                }
                Event::Text(text) => {
                    if let Some(open) = stack.last_mut() {
                        let unescaped = text.unescape().map_err(|e| Error::Xml(e.to_string()))?;
                        open.text.push_str(&unescaped);
                    }
                }
                Event::CData(data) => {
                    if let Some(open) = stack.last_mut() {
                        let raw = String::from_utf8(data.into_inner().into_owned())
                            .map_err(|e| Error::Xml(e.to_string()))?;
                        open.text.push_str(&raw);
                    }
                }
                Event::End(_) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| Error::Xml("unbalanced end tag".to_string()))?;
                    place(element, &mut stack, &mut root)?;
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !stack.is_empty() {
            return Err(Error::Xml("unclosed element".to_string()));
        }
        root.ok_or_else(|| Error::Xml("no root element".to_string()))
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_xml())
    }
}

/// Escapes XML-significant characters in text and attribute values.
#[must_use]
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn element_from_start(start: &BytesStart<'_>) -> Result<Element> {
    let name = std::str::from_utf8(start.local_name().as_ref())
        .map_err(|e| Error::Xml(e.to_string()))?
        .to_string();
    let mut element = Element::new(name);
    for attr in start.attributes() {
        let attr = attr.map_err(|e| Error::Xml(e.to_string()))?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|e| Error::Xml(e.to_string()))?
            .to_string();
        let value = attr
            .unescape_value()
            .map_err(|e| Error::Xml(e.to_string()))?;
        element.attributes.push((key, value.into_owned()));
    }
    Ok(element)
}

fn place(element: Element, stack: &mut Vec<Element>, root: &mut Option<Element>) -> Result<()> {
    if let Some(open) = stack.last_mut() {
        open.children.push(element);
    } else if root.is_some() {
        return Err(Error::Xml("multiple root elements".to_string()));
    } else {
        *root = Some(element);
    }
    Ok(())
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
        fn test_empty_element_self_closes() {
            let element = Element::new("GetAllAccountsRequest");
            assert_eq!(element.to_xml(), "<GetAllAccountsRequest/>");
        }

        #[test]
        fn test_add_chains_attributes() {
            let mut request = Element::new("GetAccountRequest");
            request.add("account", "bob@example.com").set_attr("by", "name");
            assert_eq!(
                request.to_xml(),
                "<GetAccountRequest><account by=\"name\">bob@example.com</account></GetAccountRequest>"
            );
        }

        #[test]
        fn test_set_attr_replaces_existing() {
            let mut element = Element::new("account");
            element.set_attr("by", "id");
            element.set_attr("by", "name");
            assert_eq!(element.attr("by"), Some("name"));
            assert_eq!(element.attributes().len(), 1);
        }

        #[test]
        fn test_text_and_attribute_values_are_escaped() {
            let mut element = Element::new("a");
            element.set_attr("n", "displayName");
            element.set_text("Bob & \"Co\" <admin>");
            assert_eq!(
                element.to_xml(),
                "<a n=\"displayName\">Bob &amp; &quot;Co&quot; &lt;admin&gt;</a>"
            );
        }

        #[test]
        fn test_push_appends_prebuilt_child() {
            let mut body = Element::new("ModifyAccountRequest");
            let mut child = Element::new("id");
            child.set_text("dd288b87");
            body.push(child);
            assert_eq!(body.to_xml(), "<ModifyAccountRequest><id>dd288b87</id></ModifyAccountRequest>");
        }
    }

    mod parsing_tests {
        use super::*;

        #[test]
        fn test_parse_nested_document() {
            let root = Element::parse(
                "<GetAccountResponse><account id=\"42\" name=\"bob@example.com\">\
                 <a n=\"sn\">Smith</a></account></GetAccountResponse>",
            )
            .unwrap();
            assert_eq!(root.name(), "GetAccountResponse");
            let account = root.child("account").unwrap();
            assert_eq!(account.attr("id"), Some("42"));
            assert_eq!(account.attr("name"), Some("bob@example.com"));
            assert_eq!(account.child("a").unwrap().text(), "Smith");
        }

        #[test]
        fn test_parse_strips_namespace_prefixes() {
            let root = Element::parse(
                "<soap:Envelope xmlns:soap=\"http://www.w3.org/2003/05/soap-envelope\">\
                 <soap:Body><ns2:GetAccountResponse xmlns:ns2=\"urn:zimbraAdmin\"/>\
                 </soap:Body></soap:Envelope>",
            )
            .unwrap();
            assert_eq!(root.name(), "Envelope");
            let body = root.child("Body").unwrap();
            assert!(body.child("GetAccountResponse").is_some());
        }

        #[test]
        fn test_parse_unescapes_entities() {
            let root = Element::parse("<name by=\"&quot;q&quot;\">a &amp; b</name>").unwrap();
            assert_eq!(root.text(), "a & b");
            assert_eq!(root.attr("by"), Some("\"q\""));
        }

        #[test]
        fn test_parse_self_closing_child() {
            let root = Element::parse("<account><a n=\"zimbraACE\"/></account>").unwrap();
            let a = root.child("a").unwrap();
            assert_eq!(a.attr("n"), Some("zimbraACE"));
            assert_eq!(a.text(), "");
        }

        #[test]
        fn test_parse_rejects_empty_document() {
            assert!(Element::parse("").is_err());
            assert!(Element::parse("   ").is_err());
        }

        #[test]
        fn test_parse_rejects_unclosed_element() {
            assert!(Element::parse("<account><a>").is_err());
        }

        #[test]
        fn test_parse_rejects_mismatched_end_tag() {
            let err = Element::parse("<account></wrong>").unwrap_err();
            assert!(matches!(err, Error::Xml(_)));
        }

        #[test]
        fn test_descendants_in_document_order() {
            let root = Element::parse(
                "<GetAllAccountsResponse>\
                 <account id=\"1\" name=\"a@x\"/>\
                 <wrapper><account id=\"2\" name=\"b@x\"/></wrapper>\
                 <account id=\"3\" name=\"c@x\"/>\
                 </GetAllAccountsResponse>",
            )
            .unwrap();
            let ids: Vec<_> = root
                .descendants("account")
                .into_iter()
                .map(|account| account.attr("id").unwrap())
                .collect();
            assert_eq!(ids, vec!["1", "2", "3"]);
        }
    }

    mod escaping_tests {
        use super::*;
        use proptest::prelude::*;

        #[test]
        fn test_escape_covers_all_significant_characters() {
            assert_eq!(escape("&<>\"'"), "&amp;&lt;&gt;&quot;&apos;");
            assert_eq!(escape("plain"), "plain");
        }

        proptest! {
            #[test]
            fn test_escaped_text_survives_a_parse(text in "[ -~]*") {
                let mut element = Element::new("v");
                element.set_text(text.clone());
                let parsed = Element::parse(&element.to_xml()).unwrap();
                // The reader trims whitespace at text-node edges.
                prop_assert_eq!(parsed.text(), text.trim());
            }
        }
    }
}
