use encoding_rs::{Encoding, UTF_8};
use regex::bytes::Regex;
use roxmltree::{Document, Node, ParsingOptions};
use std::{borrow::Cow, sync::LazyLock};

use super::{Element, Scope, WeatherFeed};
use crate::error::FeedError;

/// Namespace of the provider's proprietary weather elements.
pub const WEATHER_NS: &str = "http://xml.weather.yahoo.com/ns/rss/1.0";

/// `encoding="..."` inside the `<?xml ... ?>` declaration.
static DECLARED_ENCODING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\A(?-u:\xEF\xBB\xBF)?<\?xml[^>]*?\sencoding\s*=\s*["']([A-Za-z0-9._:-]+)["']"#)
        .unwrap()
});

/// Verbose feed: an RSS document, copied into an owned element tree.
#[derive(Debug, Clone)]
pub struct XmlFeed {
    root: Element,
}

impl XmlFeed {
    pub fn parse(bytes: &[u8]) -> Result<Self, FeedError> {
        let text = decode(bytes)?;
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        let doc = Document::parse_with_options(&text, options).map_err(|e| {
            tracing::debug!(error = %e, "invalid XML feed");
            FeedError::CorruptFeed
        })?;
        Ok(Self {
            root: convert(doc.root_element(), &text),
        })
    }

    /// First `item` in document order, the root included.
    fn item(&self) -> Option<&Element> {
        std::iter::once(&self.root)
            .chain(self.root.descendants())
            .find(|e| e.name == "item" && e.prefix.is_none())
    }
}

impl WeatherFeed for XmlFeed {
    fn elements(&self, name: &str, scope: Scope, namespaced: bool) -> Vec<Element> {
        let base = match scope {
            Scope::Channel => Some(&self.root),
            Scope::Item => self.item(),
        };
        let Some(base) = base else {
            return Vec::new();
        };
        base.descendants()
            .filter(|e| e.name == name && matches_namespace(e, namespaced))
            .cloned()
            .collect()
    }

    fn sub_element(&self, parent: &Element, name: &str) -> Option<Element> {
        parent
            .descendants()
            .find(|e| e.name == name && e.prefix.is_none())
            .cloned()
    }
}

/// Namespaced lookups go by namespace URI; plain ones by unprefixed tag
/// name, so elements under a default `xmlns` still match.
fn matches_namespace(element: &Element, namespaced: bool) -> bool {
    if namespaced {
        element.namespace.as_deref() == Some(WEATHER_NS)
    } else {
        element.prefix.is_none()
    }
}

/// Text of the document in the encoding its declaration names, UTF-8 when
/// it names none.
fn decode(bytes: &[u8]) -> Result<Cow<'_, str>, FeedError> {
    let encoding = DECLARED_ENCODING
        .captures(bytes)
        .and_then(|caps| Encoding::for_label(&caps[1]))
        .unwrap_or(UTF_8);
    if encoding == UTF_8 {
        let text = std::str::from_utf8(bytes).map_err(|e| {
            tracing::debug!(error = %e, "XML feed is not UTF-8");
            FeedError::CorruptFeed
        })?;
        return Ok(Cow::Borrowed(text.strip_prefix('\u{feff}').unwrap_or(text)));
    }
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        tracing::debug!(encoding = encoding.name(), "XML feed has undecodable bytes");
        return Err(FeedError::CorruptFeed);
    }
    Ok(text)
}

/// Prefix of the element's qualified name as written in the source.
fn prefix_of<'t>(node: Node<'_, '_>, text: &'t str) -> Option<&'t str> {
    let tag = text.get(node.range())?.strip_prefix('<')?;
    let end = tag
        .find(|c: char| c.is_whitespace() || c == '/' || c == '>')
        .unwrap_or(tag.len());
    tag[..end].split_once(':').map(|(prefix, _)| prefix)
}

fn convert(node: Node<'_, '_>, text: &str) -> Element {
    let mut element = Element::new(node.tag_name().name());
    element.namespace = node.tag_name().namespace().map(str::to_string);
    element.prefix = prefix_of(node, text).map(str::to_string);
    for attr in node.attributes() {
        element
            .attributes
            .insert(attr.name().to_string(), attr.value().to_string());
    }
    element.value = node
        .descendants()
        .filter(Node::is_text)
        .filter_map(|n| n.text())
        .collect();
    element.children = node
        .children()
        .filter(Node::is_element)
        .map(|child| convert(child, text))
        .collect();
    element
}
