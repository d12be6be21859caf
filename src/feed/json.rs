use serde_json::{Map, Value};

use super::{Element, Scope, WeatherFeed};
use crate::error::FeedError;

/// Compact feed: the `query.results.channel` object of a YQL JSON response.
///
/// JSON nodes carry no names of their own, so every element handed out is
/// named after the key it was fetched under.
#[derive(Debug, Clone)]
pub struct JsonFeed {
    channel: Map<String, Value>,
}

impl JsonFeed {
    pub fn parse(bytes: &[u8]) -> Result<Self, FeedError> {
        let doc: Value = serde_json::from_slice(bytes).map_err(|e| {
            tracing::debug!(error = %e, "invalid JSON feed");
            FeedError::CorruptFeed
        })?;
        match doc.pointer("/query/results/channel") {
            Some(Value::Object(channel)) => Ok(Self {
                channel: channel.clone(),
            }),
            _ => {
                tracing::debug!("JSON feed has no query.results.channel object");
                Err(FeedError::CorruptFeed)
            }
        }
    }

    fn scope(&self, scope: Scope) -> Option<&Map<String, Value>> {
        match scope {
            Scope::Channel => Some(&self.channel),
            Scope::Item => match self.channel.get("item")? {
                Value::Object(item) => Some(item),
                Value::Array(items) => items.iter().find_map(Value::as_object),
                _ => None,
            },
        }
    }
}

impl WeatherFeed for JsonFeed {
    fn elements(&self, name: &str, scope: Scope, _namespaced: bool) -> Vec<Element> {
        let mut out = Vec::new();
        if let Some(value) = self.scope(scope).and_then(|obj| obj.get(name)) {
            collect(name, value, &mut out);
        }
        out
    }

    fn sub_element(&self, parent: &Element, name: &str) -> Option<Element> {
        if let Some(child) = parent.children.iter().find(|c| c.name == name) {
            return Some(child.clone());
        }
        parent
            .attribute(name)
            .map(|value| Element::with_value(name, value))
    }
}

/// Flatten `value` into elements named `name`; arrays yield one element per
/// entry, nested arrays included.
fn collect(name: &str, value: &Value, out: &mut Vec<Element>) {
    match value {
        Value::Null => {}
        Value::Array(entries) => {
            for entry in entries {
                collect(name, entry, out);
            }
        }
        Value::Object(members) => out.push(object_element(name, members)),
        scalar => out.push(Element::with_value(name, scalar_text(scalar))),
    }
}

fn object_element(name: &str, members: &Map<String, Value>) -> Element {
    let mut element = Element::new(name);
    for (key, value) in members {
        match value {
            Value::Null => {}
            Value::Object(_) | Value::Array(_) => collect(key, value, &mut element.children),
            scalar => {
                element.attributes.insert(key.clone(), scalar_text(scalar));
            }
        }
    }
    element
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) => "0".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(channel: Value) -> JsonFeed {
        let doc = serde_json::json!({ "query": { "results": { "channel": channel } } });
        JsonFeed::parse(doc.to_string().as_bytes()).unwrap()
    }

    #[test]
    fn missing_channel_is_corrupt() {
        let doc = br#"{"query":{"count":0,"results":null}}"#;
        assert!(matches!(JsonFeed::parse(doc), Err(FeedError::CorruptFeed)));
        assert!(matches!(JsonFeed::parse(b"not json"), Err(FeedError::CorruptFeed)));
    }

    #[test]
    fn elements_are_named_by_key() {
        let f = feed(serde_json::json!({
            "wind": { "chill": "68", "speed": 7 },
            "item": { "forecast": [ { "day": "Mon" }, { "day": "Tue" } ] }
        }));

        let wind = f.element("wind", Scope::Channel, true).unwrap();
        assert_eq!(f.name(&wind), "wind");
        assert_eq!(f.attribute(&wind, "chill"), Some("68"));
        assert_eq!(f.attribute(&wind, "speed"), Some("7"));

        let forecasts = f.elements("forecast", Scope::Item, true);
        assert_eq!(forecasts.len(), 2);
        assert!(forecasts.iter().all(|e| f.name(e) == "forecast"));
        assert_eq!(f.attribute(&forecasts[0], "day"), Some("Mon"));
        assert_eq!(f.attribute(&forecasts[1], "day"), Some("Tue"));
    }

    #[test]
    fn scalar_members_are_values() {
        let f = feed(serde_json::json!({ "item": { "title": "Conditions" } }));
        let title = f.element("title", Scope::Item, false).unwrap();
        assert_eq!(f.value(&title), "Conditions");
        assert!(f.element("title", Scope::Channel, false).is_none());
    }

    #[test]
    fn sub_element_reads_scalar_members() {
        let f = feed(serde_json::json!({
            "item": { "title": "Mon - Sunny", "description": "High 80" }
        }));
        let item = f.element("item", Scope::Channel, false).unwrap();
        let title = f.sub_element(&item, "title").unwrap();
        assert_eq!(f.value(&title), "Mon - Sunny");
        assert!(f.sub_element(&item, "guid").is_none());
    }

    #[test]
    fn empty_arrays_are_empty() {
        let f = feed(serde_json::json!({ "item": { "forecast": [] } }));
        let forecasts = f.elements("forecast", Scope::Item, true);
        assert!(f.is_empty(&forecasts));
    }
}
