//! Extraction of the fields the menu shows.

use std::collections::BTreeMap;

use crate::feed::{Element, Scope, WeatherFeed};

/// Named string attributes of one feed element.
pub type Attributes = BTreeMap<String, String>;

/// One day of forecast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForecastEntry {
    /// The provider's own forecast element.
    Daily {
        day: Option<String>,
        text: Option<String>,
        low: Option<String>,
        high: Option<String>,
    },
    /// A plain RSS item, used when the feed has no forecast elements.
    Item {
        title: Option<String>,
        description: Option<String>,
    },
}

/// Everything the renderer needs, independent of the wire format.
/// Sections the feed did not provide are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeatherSnapshot {
    pub title: Option<String>,
    pub pub_date: Option<String>,
    pub condition: Option<Attributes>,
    pub location: Option<Attributes>,
    pub wind: Option<Attributes>,
    pub atmosphere: Option<Attributes>,
    pub astronomy: Option<Attributes>,
    pub units: Option<Attributes>,
    pub forecasts: Vec<ForecastEntry>,
}

#[derive(Debug, Clone, Copy)]
enum Slot {
    Condition,
    Title,
    PubDate,
    Location,
    Wind,
    Atmosphere,
    Astronomy,
    Units,
}

/// (slot, element name, scope, in the weather namespace)
const FIELDS: [(Slot, &str, Scope, bool); 8] = [
    (Slot::Condition, "condition", Scope::Item, true),
    (Slot::Title, "title", Scope::Item, false),
    (Slot::PubDate, "pubDate", Scope::Item, false),
    (Slot::Location, "location", Scope::Channel, true),
    (Slot::Wind, "wind", Scope::Channel, true),
    (Slot::Atmosphere, "atmosphere", Scope::Channel, true),
    (Slot::Astronomy, "astronomy", Scope::Channel, true),
    (Slot::Units, "units", Scope::Channel, true),
];

impl WeatherSnapshot {
    pub fn extract(feed: &dyn WeatherFeed) -> Self {
        let mut snapshot = Self::default();

        for (slot, name, scope, namespaced) in FIELDS {
            let Some(element) = feed.element(name, scope, namespaced) else {
                continue;
            };
            if feed.is_empty(std::slice::from_ref(&element)) {
                continue;
            }
            match slot {
                Slot::Title => snapshot.title = Some(feed.value(&element).to_string()),
                Slot::PubDate => snapshot.pub_date = Some(feed.value(&element).to_string()),
                Slot::Condition => snapshot.condition = Some(element.attributes),
                Slot::Location => snapshot.location = Some(element.attributes),
                Slot::Wind => snapshot.wind = Some(element.attributes),
                Slot::Atmosphere => snapshot.atmosphere = Some(element.attributes),
                Slot::Astronomy => snapshot.astronomy = Some(element.attributes),
                Slot::Units => snapshot.units = Some(element.attributes),
            }
        }

        let mut forecasts = feed.elements("forecast", Scope::Item, true);
        if feed.is_empty(&forecasts) {
            forecasts = feed.elements("item", Scope::Channel, false);
        }
        snapshot.forecasts = forecasts
            .iter()
            .map(|entry| forecast_entry(feed, entry))
            .collect();

        snapshot
    }
}

/// Shape is decided per entry, since the fallback list is itself a list
/// of generic items.
fn forecast_entry(feed: &dyn WeatherFeed, entry: &Element) -> ForecastEntry {
    let attr = |name: &str| feed.attribute(entry, name).map(str::to_string);
    if feed.name(entry) == "forecast" {
        ForecastEntry::Daily {
            day: attr("day"),
            text: attr("text"),
            low: attr("low"),
            high: attr("high"),
        }
    } else {
        let sub = |name: &str| {
            feed.sub_element(entry, name)
                .map(|e| feed.value(&e).to_string())
        };
        ForecastEntry::Item {
            title: sub("title"),
            description: sub("description"),
        }
    }
}
