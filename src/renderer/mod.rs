pub mod models;

use thiserror::Error;
use crate::config::{UnitSystem, WidgetParameters};
use crate::convert::{to_celsius, to_fahrenheit, to_kmph, to_mph};
use crate::models::{FieldValue, ForecastEntry, ForecastPayload, Measurement, Scalar, format_number};
use crate::renderer::models::Element;

/// Layouts the widget can bind to, decided by the container element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    Table,
    Panel,
    Card,
    Plain,
}

/// Struct for rendering forecast payloads into a markup document
///
/// The widget owns its document and mutates it in place; serializing the
/// document reflects whatever state the widget is in, including the
/// loading state before any forecast has been rendered.
pub struct Widget {
    document: Element,
    container_id: String,
    layout: Layout,
    units: UnitSystem,
    wait_cls: String,
}

impl Widget {
    /// Returns a widget bound to the container inside the given document
    ///
    /// The container is hidden until a forecast has been rendered into it.
    ///
    /// # Arguments
    ///
    /// * 'document' - the document holding the container and spinner elements
    /// * 'config' - widget configuration parameters
    pub fn new(mut document: Element, config: &WidgetParameters) -> Result<Widget, RenderError> {
        let container = document.find_by_id_mut(&config.container_id)
            .ok_or_else(|| RenderError::MissingContainerError(config.container_id.clone()))?;

        container.set_style("display", "none");

        // Table beats panel beats card, matching the order the layouts are
        // checked in when rendering
        let layout = if container.tag.contains("table") {
            Layout::Table
        } else if container.has_class("panel") {
            Layout::Panel
        } else if container.has_class("card") {
            Layout::Card
        } else {
            Layout::Plain
        };

        container.add_class("bw-container");

        Ok(Widget {
            document,
            container_id: config.container_id.clone(),
            layout,
            units: config.units,
            wait_cls: config.wait_cls.clone(),
        })
    }

    /// Renders the given forecast payload into the container
    ///
    /// Table and panel layouts are recognized but not populated; for those
    /// the widget stays in its loading state. Card layouts get their header
    /// and body structure created on first render.
    ///
    /// # Arguments
    ///
    /// * 'payload' - the forecast payload to render
    pub fn show(&mut self, payload: ForecastPayload) -> Result<(), RenderError> {
        if self.layout == Layout::Table || self.layout == Layout::Panel {
            return Ok(());
        }

        let units = self.units;
        let is_card = self.layout == Layout::Card;
        let station = payload.station.clone();
        let entries = payload.into_entries();

        let container = self.container_mut()?;

        if is_card {
            prepare_card(container);
            if let Some(station) = &station {
                let header = container.child_with_class_or_append("bw-header-c", "div");
                header.set_text(&format!("Current weather (Station {}, {})", station.id, station.name));
            }
        }

        for (i, entry) in entries.iter().enumerate() {
            for (prop, value) in entry.iter() {
                let node_id = format!("bw-{}-{}", prop, i);
                if let Some(node) = container.find_by_id_mut(&node_id) {
                    node.add_class(&format!("bw-{}", prop));
                    node.set_text(&format_value(units, value));

                    if prop == "wwp" {
                        append_precipitation_icon(node, entry);
                    }
                    if prop == "ff" {
                        append_wind_direction_icon(node, entry);
                    }
                }
            }
        }

        container.set_style("display", "block");

        let wait_cls = self.wait_cls.clone();
        self.document.visit_class_mut(&wait_cls, &mut |element| {
            element.set_style("display", "none");
        });

        Ok(())
    }

    /// Serializes the widget document to markup
    pub fn to_html(&self) -> String {
        self.document.to_html()
    }

    fn container_mut(&mut self) -> Result<&mut Element, RenderError> {
        let container_id = self.container_id.clone();

        self.document.find_by_id_mut(&container_id)
            .ok_or(RenderError::MissingContainerError(container_id))
    }
}

/// Builds the default page skeleton hosting the widget
///
/// The page holds a spinner element and the initially hidden forecast
/// container, mirroring the markup a hosting page provides.
///
/// # Arguments
///
/// * 'config' - widget configuration parameters
pub fn default_document(config: &WidgetParameters) -> Element {
    let mut document = Element::new("div").with_class("bw-page");
    document.append_child(Element::new("div").with_class(&config.wait_cls));
    document.append_child(Element::new("div").with_id(&config.container_id).with_class("card"));

    document
}

/// Lazily creates the card structure inside the container
///
/// An existing header or body is reused; an empty body is seeded with the
/// field nodes of a single forecast entry.
///
/// # Arguments
///
/// * 'container' - the container element to prepare
fn prepare_card(container: &mut Element) {
    let header = container.child_with_class_or_append("card-header", "div");
    header.add_class("card-header");
    header.add_class("bw-header-c");

    let body = container.child_with_class_or_append("card-body", "div");
    body.add_class("card-body");
    body.add_class("bw-body-c");

    if body.children.is_empty() {
        for field in ["ttt", "wwp", "ff", "present_weather"] {
            body.append_child(
                Element::new("div")
                    .with_class(&format!("bw-{}", field))
                    .with_id(&format!("bw-{}-0", field)),
            );
        }
    }
}

/// Appends the precipitation type icon to the precipitation node
///
/// Rain and snow are told apart by comparing the two precipitation form
/// indicators; without both indicators no icon is appended.
///
/// # Arguments
///
/// * 'node' - the precipitation probability node
/// * 'entry' - the forecast entry the node belongs to
fn append_precipitation_icon(node: &mut Element, entry: &ForecastEntry) {
    if let (Some(wwf), Some(wws)) = (numeric_field(entry, "wwf"), numeric_field(entry, "wws")) {
        let icon = if wwf >= wws { "wi-raindrops" } else { "wi-snow" };
        node.append_child(
            Element::new("i")
                .with_id("precipation_type")
                .with_class("wi")
                .with_class(icon),
        );
    }
}

/// Appends the wind direction icon to the wind speed node
///
/// The icon is rotated through a direction specific class; without a wind
/// direction field no icon is appended.
///
/// # Arguments
///
/// * 'node' - the wind speed node
/// * 'entry' - the forecast entry the node belongs to
fn append_wind_direction_icon(node: &mut Element, entry: &ForecastEntry) {
    if let Some(dd) = numeric_field(entry, "dd") {
        node.append_child(
            Element::new("i")
                .with_id("wind_direction")
                .with_class("wi")
                .with_class("wi-wind")
                .with_class(&format!("from-{}-deg", format_number(dd))),
        );
    }
}

/// Returns the numeric value of a field, whether measured or scalar
fn numeric_field(entry: &ForecastEntry, field: &str) -> Option<f64> {
    match entry.get(field)? {
        FieldValue::Measurement(m) => Some(m.value),
        FieldValue::Scalar(Scalar::Number(n)) => Some(*n),
        FieldValue::Scalar(Scalar::Text(_)) => None,
    }
}

/// Formats a field value according to the configured unit system
///
/// # Arguments
///
/// * 'units' - the unit system to convert into
/// * 'value' - the field value to format
fn format_value(units: UnitSystem, value: &FieldValue) -> String {
    match value {
        FieldValue::Measurement(m) => format_measurement(units, m),
        FieldValue::Scalar(s) => s.to_string(),
    }
}

/// Formats a measurement according to the configured unit system
///
/// Percentages pass through unchanged, temperatures and wind speeds are
/// converted, any other unit renders as the raw value.
///
/// # Arguments
///
/// * 'units' - the unit system to convert into
/// * 'measurement' - the measurement to format
fn format_measurement(units: UnitSystem, measurement: &Measurement) -> String {
    if measurement.unit == "%" {
        return format!("{}%", format_number(measurement.value));
    }

    match units {
        UnitSystem::Metric => match measurement.unit.as_str() {
            "K" => format!("{}°C", to_celsius(measurement.value)),
            "m/s" => format!("{}km/h", to_kmph(measurement.value)),
            _ => format_number(measurement.value),
        },
        UnitSystem::Imperial => match measurement.unit.as_str() {
            "K" => format!("{}°F", to_fahrenheit(measurement.value)),
            "m/s" => format!("{}mi/h", to_mph(measurement.value)),
            _ => format_number(measurement.value),
        },
    }
}

/// Error depicting errors that occur while rendering the widget
///
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("MissingContainerError: no element with id {0}")]
    MissingContainerError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WidgetParameters;

    fn widget_config(units: UnitSystem) -> WidgetParameters {
        WidgetParameters {
            units,
            wait_cls: "triple-spinner".to_string(),
            container_id: "weather".to_string(),
        }
    }

    fn widget(units: UnitSystem) -> Widget {
        let config = widget_config(units);
        Widget::new(default_document(&config), &config).unwrap()
    }

    fn payload(json: &str) -> ForecastPayload {
        serde_json::from_str(json).unwrap()
    }

    fn node_text(widget: &mut Widget, id: &str) -> String {
        widget.document.find_by_id_mut(id).unwrap().text.clone()
    }

    #[test]
    fn test_new_widget_is_in_loading_state() {
        let mut widget = widget(UnitSystem::Metric);

        let container = widget.document.find_by_id_mut("weather").unwrap();
        assert_eq!(container.style("display"), Some("none"));
        assert!(container.has_class("bw-container"));

        let html = widget.to_html();
        assert!(html.contains("class=\"triple-spinner\""));
        assert!(!html.contains("triple-spinner\" style=\"display: none\""));
    }

    #[test]
    fn test_metric_card_render() {
        let mut widget = widget(UnitSystem::Metric);
        let payload = payload(
            r#"{"station": {"id": 1, "name": "X"},
                "forecasts": [{"ttt": {"unit": "K", "value": 280}}]}"#,
        );

        widget.show(payload).unwrap();

        assert_eq!(node_text(&mut widget, "bw-ttt-0"), "7°C");

        let header = widget.document.find_by_id_mut("weather").unwrap()
            .child_with_class_or_append("bw-header-c", "div").text.clone();
        assert_eq!(header, "Current weather (Station 1, X)");

        let container = widget.document.find_by_id_mut("weather").unwrap();
        assert_eq!(container.style("display"), Some("block"));
    }

    #[test]
    fn test_render_hides_spinner() {
        let mut widget = widget(UnitSystem::Metric);
        let payload = payload(r#"{"forecasts": [{"ttt": {"unit": "K", "value": 280}}]}"#);

        widget.show(payload).unwrap();

        let mut hidden = 0;
        widget.document.visit_class_mut("triple-spinner", &mut |element| {
            assert_eq!(element.style("display"), Some("none"));
            hidden += 1;
        });
        assert_eq!(hidden, 1);
    }

    #[test]
    fn test_imperial_card_render() {
        let mut widget = widget(UnitSystem::Imperial);
        let payload = payload(
            r#"{"forecasts": [{"ttt": {"unit": "K", "value": 280},
                               "ff": {"unit": "m/s", "value": 10}}]}"#,
        );

        widget.show(payload).unwrap();

        assert_eq!(node_text(&mut widget, "bw-ttt-0"), "44°F");
        assert_eq!(node_text(&mut widget, "bw-ff-0"), "22mi/h");
    }

    #[test]
    fn test_metric_wind_speed_render() {
        let mut widget = widget(UnitSystem::Metric);
        let payload = payload(r#"{"forecasts": [{"ff": {"unit": "m/s", "value": 10}}]}"#);

        widget.show(payload).unwrap();

        assert_eq!(node_text(&mut widget, "bw-ff-0"), "36km/h");
    }

    #[test]
    fn test_percentage_passes_through() {
        let mut widget = widget(UnitSystem::Imperial);
        let payload = payload(r#"{"forecasts": [{"wwp": {"unit": "%", "value": 80}}]}"#);

        widget.show(payload).unwrap();

        assert_eq!(node_text(&mut widget, "bw-wwp-0"), "80%");
    }

    #[test]
    fn test_precipitation_icon_rain() {
        let mut widget = widget(UnitSystem::Metric);
        let payload = payload(
            r#"{"forecasts": [{"wwp": {"unit": "%", "value": 80},
                               "wwf": {"unit": "%", "value": 10},
                               "wws": {"unit": "%", "value": 5}}]}"#,
        );

        widget.show(payload).unwrap();

        let node = widget.document.find_by_id_mut("bw-wwp-0").unwrap();
        assert_eq!(node.children.len(), 1);
        assert_eq!(node.children[0].id.as_deref(), Some("precipation_type"));
        assert!(node.children[0].has_class("wi-raindrops"));
    }

    #[test]
    fn test_precipitation_icon_snow() {
        let mut widget = widget(UnitSystem::Metric);
        let payload = payload(
            r#"{"forecasts": [{"wwp": {"unit": "%", "value": 80},
                               "wwf": {"unit": "%", "value": 2},
                               "wws": {"unit": "%", "value": 5}}]}"#,
        );

        widget.show(payload).unwrap();

        let node = widget.document.find_by_id_mut("bw-wwp-0").unwrap();
        assert!(node.children[0].has_class("wi-snow"));
    }

    #[test]
    fn test_precipitation_icon_skipped_without_indicators() {
        let mut widget = widget(UnitSystem::Metric);
        let payload = payload(r#"{"forecasts": [{"wwp": {"unit": "%", "value": 80}}]}"#);

        widget.show(payload).unwrap();

        let node = widget.document.find_by_id_mut("bw-wwp-0").unwrap();
        assert_eq!(node.text, "80%");
        assert!(node.children.is_empty());
    }

    #[test]
    fn test_wind_direction_icon() {
        let mut widget = widget(UnitSystem::Metric);
        let payload = payload(
            r#"{"forecasts": [{"ff": {"unit": "m/s", "value": 10},
                               "dd": {"unit": "°", "value": 270}}]}"#,
        );

        widget.show(payload).unwrap();

        let node = widget.document.find_by_id_mut("bw-ff-0").unwrap();
        assert_eq!(node.children.len(), 1);
        assert_eq!(node.children[0].id.as_deref(), Some("wind_direction"));
        assert!(node.children[0].has_class("wi-wind"));
        assert!(node.children[0].has_class("from-270-deg"));
    }

    #[test]
    fn test_single_entry_payload_renders_like_a_list() {
        let mut widget = widget(UnitSystem::Metric);
        let payload = payload(r#"{"ttt": {"unit": "K", "value": 280}}"#);

        widget.show(payload).unwrap();

        assert_eq!(node_text(&mut widget, "bw-ttt-0"), "7°C");
    }

    #[test]
    fn test_fields_without_a_node_are_ignored() {
        let mut widget = widget(UnitSystem::Metric);
        let payload = payload(r#"{"forecasts": [{"pppp": {"unit": "hPa", "value": 1013.2}}]}"#);

        widget.show(payload).unwrap();

        let container = widget.document.find_by_id_mut("weather").unwrap();
        assert_eq!(container.style("display"), Some("block"));
    }

    #[test]
    fn test_table_layout_is_a_stub() {
        let config = widget_config(UnitSystem::Metric);
        let mut document = Element::new("div");
        document.append_child(Element::new("div").with_class("triple-spinner"));
        document.append_child(Element::new("table").with_id("weather"));

        let mut widget = Widget::new(document, &config).unwrap();
        widget.show(payload(r#"{"ttt": {"unit": "K", "value": 280}}"#)).unwrap();

        // Still in loading state: container hidden, spinner untouched
        let container = widget.document.find_by_id_mut("weather").unwrap();
        assert_eq!(container.style("display"), Some("none"));

        let mut spinner_hidden = false;
        widget.document.visit_class_mut("triple-spinner", &mut |element| {
            spinner_hidden = element.style("display") == Some("none");
        });
        assert!(!spinner_hidden);
    }

    #[test]
    fn test_panel_layout_is_a_stub() {
        let config = widget_config(UnitSystem::Metric);
        let mut document = Element::new("div");
        document.append_child(Element::new("div").with_id("weather").with_class("panel"));

        let mut widget = Widget::new(document, &config).unwrap();
        widget.show(payload(r#"{"ttt": {"unit": "K", "value": 280}}"#)).unwrap();

        let container = widget.document.find_by_id_mut("weather").unwrap();
        assert_eq!(container.style("display"), Some("none"));
    }

    #[test]
    fn test_plain_container_renders_existing_nodes_without_header() {
        let config = widget_config(UnitSystem::Metric);
        let mut container = Element::new("div").with_id("weather");
        container.append_child(Element::new("span").with_id("bw-ttt-0"));
        let mut document = Element::new("div");
        document.append_child(container);

        let mut widget = Widget::new(document, &config).unwrap();
        widget.show(payload(r#"{"ttt": {"unit": "K", "value": 280}}"#)).unwrap();

        assert_eq!(node_text(&mut widget, "bw-ttt-0"), "7°C");

        let container = widget.document.find_by_id_mut("weather").unwrap();
        assert_eq!(container.style("display"), Some("block"));
        assert!(!container.children.iter().any(|c| c.has_class("card-header")));
    }

    #[test]
    fn test_prepare_card_reuses_existing_structure() {
        let mut widget = widget(UnitSystem::Metric);

        widget.show(payload(r#"{"ttt": {"unit": "K", "value": 280}}"#)).unwrap();
        widget.show(payload(r#"{"ttt": {"unit": "K", "value": 290}}"#)).unwrap();

        let container = widget.document.find_by_id_mut("weather").unwrap();
        assert_eq!(container.children.len(), 2);
        assert_eq!(node_text(&mut widget, "bw-ttt-0"), "17°C");
    }

    #[test]
    fn test_missing_container_is_rejected() {
        let config = widget_config(UnitSystem::Metric);
        let document = Element::new("div");

        assert!(Widget::new(document, &config).is_err());
    }

    #[test]
    fn test_format_value_unknown_unit_renders_raw() {
        let value = FieldValue::Measurement(Measurement {
            unit: "hPa".to_string(),
            value: 1013.0,
        });

        assert_eq!(format_value(UnitSystem::Metric, &value), "1013");
        assert_eq!(format_value(UnitSystem::Imperial, &value), "1013");
    }

    #[test]
    fn test_format_value_scalar_text() {
        let value = FieldValue::Scalar(Scalar::Text("cloudy".to_string()));

        assert_eq!(format_value(UnitSystem::Metric, &value), "cloudy");
    }
}
