//! Menu rendering tests (no network)
//! - full imperial menu for the JSON fixture
//! - metric conversion of every convertible line
//! - sections omitted when the feed lacks them

use yweather::{UnitSystem, WeatherSnapshot, feed, menu, ResponseFormat};

const FORECAST_JSON: &str = include_str!("fixtures/forecast.json");
const FORECAST_XML: &str = include_str!("fixtures/forecast.xml");

fn render(bytes: &[u8], format: ResponseFormat, units: UnitSystem) -> String {
    let feed = feed::parse(format, bytes).expect("fixture parses");
    let snapshot = WeatherSnapshot::extract(feed.as_ref());
    menu::render(&snapshot, units, false)
}

#[test]
fn imperial_menu_from_json_fixture() {
    let menu = render(FORECAST_JSON.as_bytes(), ResponseFormat::Compact, UnitSystem::Imperial);
    let expected = "\
<openbox_pipe_menu>
<separator label=\"Conditions for New York, NY, US at 02:00 PM EST\" />
<item label=\"Weather: Mostly Cloudy\" />
<item label=\"Temperature: 45 F\" />
<item label=\"Humidity: 60%\" />
<item label=\"Visibility: 10 mi\" />
<item label=\"Pressure: 30.12 in steady\" />
<item label=\"Wind chill: 39 F\" />
<item label=\"Wind direction: 230 degrees\" />
<item label=\"Wind speed: 7 mph\" />
<item label=\"Sunrise: 6:42 am\" />
<item label=\"Sunset: 5:49 pm\" />
<separator label=\"Forecast: Mon\" />
<item label=\"Weather: Mostly Cloudy\" />
<item label=\"Min temperature: 40 F\" />
<item label=\"Max temperature: 52 F\" />
<separator label=\"Forecast: Tue\" />
<item label=\"Weather: Rain\" />
<item label=\"Min temperature: 45 F\" />
<item label=\"Max temperature: 57 F\" />
<separator label=\"Forecast: Wed\" />
<item label=\"Weather: Sunny\" />
<item label=\"Min temperature: 36 F\" />
<item label=\"Max temperature: 72 F\" />
</openbox_pipe_menu>
";
    assert_eq!(menu, expected);
}

#[test]
fn metric_menu_converts_each_label() {
    let menu = render(FORECAST_JSON.as_bytes(), ResponseFormat::Compact, UnitSystem::Metric);

    assert!(menu.contains("<item label=\"Temperature: 7 C\" />"));
    assert!(menu.contains("<item label=\"Visibility: 16.1 km\" />"));
    assert!(menu.contains("<item label=\"Pressure: 0.8 m steady\" />"));
    assert!(menu.contains("<item label=\"Wind chill: 3 C\" />"));
    assert!(menu.contains("<item label=\"Wind direction: 230 degrees\" />"));
    assert!(menu.contains("<item label=\"Wind speed: 11.3 kpm\" />"));
    assert!(menu.contains("<item label=\"Sunrise: 6:42 am\" />"));
    assert!(menu.contains("<item label=\"Min temperature: 2 C\" />"));
    assert!(menu.contains("<item label=\"Max temperature: 22 C\" />"));
    assert!(!menu.contains(" F\""));
}

#[test]
fn missing_atmosphere_drops_its_lines() {
    let mut doc: serde_json::Value = serde_json::from_str(FORECAST_JSON).unwrap();
    doc["query"]["results"]["channel"]
        .as_object_mut()
        .unwrap()
        .remove("atmosphere");
    let menu = render(doc.to_string().as_bytes(), ResponseFormat::Compact, UnitSystem::Imperial);

    assert!(!menu.contains("Humidity"));
    assert!(!menu.contains("Visibility"));
    assert!(!menu.contains("Pressure"));
    assert!(menu.contains("Wind speed: 7 mph"));
}

#[test]
fn xml_without_atmosphere_drops_its_lines() {
    let doc: String = FORECAST_XML
        .lines()
        .filter(|line| !line.contains("yweather:atmosphere"))
        .map(|line| format!("{line}\n"))
        .collect();
    assert!(FORECAST_XML.contains("yweather:atmosphere"));
    let menu = render(doc.as_bytes(), ResponseFormat::Verbose, UnitSystem::Imperial);

    assert!(!menu.contains("Humidity"));
    assert!(!menu.contains("Visibility"));
    assert!(!menu.contains("Pressure"));
    assert!(menu.contains("<item label=\"Wind speed: 7 mph\" />"));
}

#[test]
fn rising_pressure_is_reported() {
    let mut doc: serde_json::Value = serde_json::from_str(FORECAST_JSON).unwrap();
    doc["query"]["results"]["channel"]["atmosphere"]["rising"] = "1".into();
    let menu = render(doc.to_string().as_bytes(), ResponseFormat::Compact, UnitSystem::Imperial);
    assert!(menu.contains("<item label=\"Pressure: 30.12 in rising\" />"));
}

#[test]
fn generic_items_render_title_and_description() {
    let menu = render(
        include_bytes!("fixtures/items_only.xml"),
        ResponseFormat::Verbose,
        UnitSystem::Metric,
    );
    let expected = "\
<openbox_pipe_menu>
<separator label=\"Current Conditions : 4C, Cloudy - 2:51 PM EST Feb. 29\" />
<separator label=\"Current Conditions : 4C, Cloudy - 2:51 PM EST Feb. 29\" />
<item label=\"Temperature: 4C | Humidity: 60% | Wind Direction: West\" />
<separator label=\"Monday Night\" />
<item label=\"Rain &amp; wind. Low 1C.\" />
</openbox_pipe_menu>
";
    assert_eq!(menu, expected);
}
