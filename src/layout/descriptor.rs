//! Serialized form of the UI layout
//!
//! Descriptors come from TOML or JSON. Table order is preserved so that the
//! first-match rule for overlapping hit windows follows declaration order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Built-in layout: 1000x700 canvas at (90, 70), tools and swatches along the top bar
pub const DEFAULT_LAYOUT: &str = r##"
[canvas]
width = 1000
height = 700
offset_x = 90
offset_y = 70

[screen]
width = 1500
height = 900

[tolerance]
tool = 40
color_x = 12
color_y = 8

[tools]
pen = { x = 245, y = 25 }
eraser = { x = 325, y = 25 }
rectangle = { x = 830, y = 25 }
circle = { x = 910, y = 25 }
line = { x = 990, y = 25 }

# Swatch row: 15 colors, 24px apart starting at x = 405
[colors]
black = { x = 405, y = 25, hex = "#000000" }
white = { x = 429, y = 25, hex = "#FFFFFF" }
red = { x = 453, y = 25, hex = "#FF0000" }
green = { x = 477, y = 25, hex = "#00FF00" }
blue = { x = 501, y = 25, hex = "#0000FF" }
yellow = { x = 525, y = 25, hex = "#FFFF00" }
orange = { x = 549, y = 25, hex = "#FFA500" }
purple = { x = 573, y = 25, hex = "#800080" }
pink = { x = 597, y = 25, hex = "#FFC0CB" }
brown = { x = 621, y = 25, hex = "#8B4513" }
gray = { x = 645, y = 25, hex = "#808080" }
cyan = { x = 669, y = 25, hex = "#00FFFF" }
magenta = { x = 693, y = 25, hex = "#FF00FF" }
lime = { x = 717, y = 25, hex = "#32CD32" }
navy = { x = 741, y = 25, hex = "#000080" }
"##;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LayoutDescriptor {
    pub canvas: CanvasSpec,
    #[serde(default)]
    pub screen: Option<ScreenSpec>,
    #[serde(default)]
    pub tolerance: Option<ToleranceSpec>,
    #[serde(default)]
    pub tools: IndexMap<String, ButtonSpec>,
    #[serde(default)]
    pub colors: IndexMap<String, SwatchSpec>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CanvasSpec {
    pub width: f64,
    pub height: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScreenSpec {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ButtonSpec {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SwatchSpec {
    pub x: f64,
    pub y: f64,
    pub hex: String,
}

/// Either a single tool tolerance or a per-purpose table
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ToleranceSpec {
    Uniform(f64),
    Detailed {
        #[serde(default)]
        tool: Option<f64>,
        #[serde(default)]
        color_x: Option<f64>,
        #[serde(default)]
        color_y: Option<f64>,
    },
}

impl LayoutDescriptor {
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn from_json_str(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_parses() {
        let desc = LayoutDescriptor::from_toml_str(DEFAULT_LAYOUT).expect("Should parse");
        assert_eq!(desc.canvas.width, 1000.0);
        assert_eq!(desc.tools.len(), 5);
        assert_eq!(desc.colors.len(), 15);
    }

    #[test]
    fn test_declaration_order_is_kept() {
        let desc = LayoutDescriptor::from_toml_str(DEFAULT_LAYOUT).expect("Should parse");
        let tools: Vec<&str> = desc.tools.keys().map(String::as_str).collect();
        assert_eq!(tools, ["pen", "eraser", "rectangle", "circle", "line"]);
        assert_eq!(desc.colors.get_index(2).map(|(k, _)| k.as_str()), Some("red"));
    }

    #[test]
    fn test_uniform_tolerance_from_json() {
        let json = r##"{
            "canvas": {"width": 800, "height": 600, "offset_x": 0, "offset_y": 50},
            "colors": {"c1": {"x": 10, "y": 10, "hex": "#123456"}},
            "tools": {"pen": {"x": 100, "y": 10}},
            "tolerance": 30
        }"##;
        let desc = LayoutDescriptor::from_json_str(json).expect("Should parse");
        assert!(matches!(desc.tolerance, Some(ToleranceSpec::Uniform(t)) if t == 30.0));
        assert!(desc.screen.is_none());
    }

    #[test]
    fn test_missing_canvas_is_an_error() {
        assert!(LayoutDescriptor::from_toml_str("[tools]\npen = { x = 1, y = 1 }").is_err());
    }
}
