//! Openbox pipe menu output.

use regex::{Captures, NoExpand, Regex};
use std::sync::LazyLock;

use crate::{
    config::UnitSystem,
    snapshot::{Attributes, ForecastEntry, WeatherSnapshot},
};

/// First number followed by an imperial unit token.
static IMPERIAL_QUANTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([.\d]+)(\s*)(F|in|mi|mph)").unwrap());

/// Convert the first imperial quantity in `label` to metric.
///
/// Labels without a match, and all labels under [`UnitSystem::Imperial`],
/// come back unchanged. Speeds are labelled `kpm` for compatibility with
/// existing menus.
pub fn convert(label: &str, units: UnitSystem) -> String {
    if units == UnitSystem::Imperial {
        return label.to_string();
    }
    let Some(caps) = IMPERIAL_QUANTITY.captures(label) else {
        return label.to_string();
    };
    let Some(replacement) = metric_quantity(&caps) else {
        return label.to_string();
    };
    IMPERIAL_QUANTITY
        .replacen(label, 1, NoExpand(&replacement))
        .into_owned()
}

fn metric_quantity(caps: &Captures<'_>) -> Option<String> {
    let n: f64 = caps[1].parse().ok()?;
    let (value, unit) = match &caps[3] {
        "F" => (((n - 32.0) * 5.0 / 9.0).floor(), "C"),
        "in" => (round1(n * 2.54 / 100.0), "m"),
        "mi" => (round1(n * 1.61), "km"),
        "mph" => (round1(n * 1.61), "kpm"),
        _ => return None,
    };
    // `+ 0.0` turns a negative zero into plain "0".
    Some(format!("{}{}{}", value + 0.0, &caps[2], unit))
}

fn round1(n: f64) -> f64 {
    (n * 10.0).round() / 10.0
}

/// Escape text for use inside a double-quoted attribute.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}

/// Accumulates menu lines.
struct MenuWriter {
    units: UnitSystem,
    out: String,
}

impl MenuWriter {
    fn element(&mut self, tag: &str, fragments: &[&str]) {
        let label: String = fragments.iter().map(|f| escape(f)).collect();
        let label = convert(&label, self.units);
        self.out.push_str(&format!("<{tag} label=\"{label}\" />\n"));
    }

    fn separator(&mut self, fragments: &[&str]) {
        self.element("separator", fragments);
    }

    fn item(&mut self, fragments: &[&str]) {
        self.element("item", fragments);
    }
}

fn get<'a>(attrs: Option<&'a Attributes>, name: &str) -> &'a str {
    attrs
        .and_then(|a| a.get(name))
        .map(String::as_str)
        .unwrap_or("")
}

/// "rising" for any set, non-zero `rising` attribute.
fn pressure_state(atmosphere: &Attributes) -> &'static str {
    match atmosphere.get("rising").map(String::as_str) {
        None | Some("") | Some("0") | Some("false") => "steady",
        Some(_) => "rising",
    }
}

/// Render the whole pipe menu for `snapshot`.
///
/// Sections missing from the snapshot are left out entirely. With `header`
/// the location and publication date precede the title.
pub fn render(snapshot: &WeatherSnapshot, units: UnitSystem, header: bool) -> String {
    let mut menu = MenuWriter {
        units,
        out: String::from("<openbox_pipe_menu>\n"),
    };
    let unit = |name: &str| get(snapshot.units.as_ref(), name);

    if header && (snapshot.location.is_some() || snapshot.pub_date.is_some()) {
        menu.separator(&[
            get(snapshot.location.as_ref(), "city"),
            " ",
            snapshot.pub_date.as_deref().unwrap_or(""),
        ]);
        menu.separator(&["Current conditions"]);
    }

    if let Some(title) = &snapshot.title {
        menu.separator(&[title.as_str()]);
    }

    if let Some(condition) = &snapshot.condition {
        let c = |name: &str| get(Some(condition), name);
        menu.item(&["Weather: ", c("text")]);
        menu.item(&["Temperature: ", c("temp"), " ", unit("temperature")]);
    }

    if let Some(atmosphere) = &snapshot.atmosphere {
        let a = |name: &str| get(Some(atmosphere), name);
        menu.item(&["Humidity: ", a("humidity"), "%"]);
        menu.item(&["Visibility: ", a("visibility"), " ", unit("distance")]);
        menu.item(&[
            "Pressure: ",
            a("pressure"),
            " ",
            unit("pressure"),
            " ",
            pressure_state(atmosphere),
        ]);
    }

    if let Some(wind) = &snapshot.wind {
        let w = |name: &str| get(Some(wind), name);
        menu.item(&["Wind chill: ", w("chill"), " ", unit("temperature")]);
        menu.item(&["Wind direction: ", w("direction"), " degrees"]);
        menu.item(&["Wind speed: ", w("speed"), " ", unit("speed")]);
    }

    if let Some(astronomy) = &snapshot.astronomy {
        menu.item(&["Sunrise: ", get(Some(astronomy), "sunrise")]);
        menu.item(&["Sunset: ", get(Some(astronomy), "sunset")]);
    }

    for forecast in &snapshot.forecasts {
        match forecast {
            ForecastEntry::Daily {
                day,
                text,
                low,
                high,
            } => {
                let temp = unit("temperature");
                menu.separator(&["Forecast: ", day.as_deref().unwrap_or("")]);
                menu.item(&["Weather: ", text.as_deref().unwrap_or("")]);
                menu.item(&["Min temperature: ", low.as_deref().unwrap_or(""), " ", temp]);
                menu.item(&["Max temperature: ", high.as_deref().unwrap_or(""), " ", temp]);
            }
            ForecastEntry::Item { title, description } => {
                menu.separator(&[title.as_deref().unwrap_or("")]);
                menu.item(&[description.as_deref().unwrap_or("")]);
            }
        }
    }

    menu.out.push_str("</openbox_pipe_menu>\n");
    menu.out
}
