//! Format-neutral access to a parsed weather feed.
//!
//! Both wire formats are exposed through [`WeatherFeed`], which hands out
//! owned [`Element`]s: a name, an optional namespace, a bag of string
//! attributes, a text value and child elements.

use std::collections::BTreeMap;

use crate::{config::ResponseFormat, error::FeedError};

pub mod json;
pub mod xml;

pub use json::JsonFeed;
pub use xml::XmlFeed;

/// Where a lookup starts: the channel (document root) or the first
/// forecast item within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Channel,
    Item,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub namespace: Option<String>,
    /// Prefix the tag was written with, if any.
    pub prefix: Option<String>,
    pub attributes: BTreeMap<String, String>,
    pub value: String,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::new(name)
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// No attributes, no children and no text.
    pub fn is_blank(&self) -> bool {
        self.attributes.is_empty() && self.children.is_empty() && self.value.is_empty()
    }

    /// All elements below this one in document order, excluding itself.
    pub fn descendants(&self) -> impl Iterator<Item = &Element> {
        let mut stack: Vec<&Element> = self.children.iter().rev().collect();
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            stack.extend(next.children.iter().rev());
            Some(next)
        })
    }
}

/// Uniform read access over a parsed feed.
pub trait WeatherFeed {
    /// Every element called `name` under `scope`. With `namespaced`, only
    /// the provider's weather-namespace elements qualify.
    fn elements(&self, name: &str, scope: Scope, namespaced: bool) -> Vec<Element>;

    /// First element called `name` under `scope`.
    fn element(&self, name: &str, scope: Scope, namespaced: bool) -> Option<Element> {
        self.elements(name, scope, namespaced).into_iter().next()
    }

    /// Single named child of `parent`.
    fn sub_element(&self, parent: &Element, name: &str) -> Option<Element>;

    fn attribute<'e>(&self, element: &'e Element, name: &str) -> Option<&'e str> {
        element.attribute(name)
    }

    fn value<'e>(&self, element: &'e Element) -> &'e str {
        &element.value
    }

    fn name<'e>(&self, element: &'e Element) -> &'e str {
        &element.name
    }

    /// True for no elements at all, or only blank ones.
    fn is_empty(&self, elements: &[Element]) -> bool {
        elements.iter().all(Element::is_blank)
    }
}

/// Parse raw response bytes with the parser for `format`.
///
/// Parsing is all-or-nothing: malformed input fails here, before any
/// field is extracted.
pub fn parse(format: ResponseFormat, bytes: &[u8]) -> Result<Box<dyn WeatherFeed>, FeedError> {
    let feed: Box<dyn WeatherFeed> = match format {
        ResponseFormat::Compact => Box::new(JsonFeed::parse(bytes)?),
        ResponseFormat::Verbose => Box::new(XmlFeed::parse(bytes)?),
    };
    Ok(feed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Element {
        let mut root = Element::new("rss");
        let mut channel = Element::new("channel");
        channel.children.push(Element::with_value("title", "a"));
        let mut item = Element::new("item");
        item.children.push(Element::with_value("title", "b"));
        channel.children.push(item);
        root.children.push(channel);
        root.children.push(Element::new("tail"));
        root
    }

    #[test]
    fn descendants_are_in_document_order() {
        let root = tree();
        let names: Vec<_> = root.descendants().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["channel", "title", "item", "title", "tail"]);
    }

    #[test]
    fn blank_elements() {
        assert!(Element::new("wind").is_blank());
        assert!(!Element::with_value("title", "x").is_blank());
    }
}
