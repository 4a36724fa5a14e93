//! Layout resolver: canvas geometry and UI hit tables
//!
//! A `Layout` is built once from a descriptor and then shared read-only by
//! every evaluation. Tool and color lookups are linear scans in declaration
//! order; the first window containing the point wins.

pub mod descriptor;
pub mod types;

pub use descriptor::{LayoutDescriptor, ToleranceSpec, DEFAULT_LAYOUT};
pub use types::*;

use std::path::Path;

use tracing::info;

use crate::error::ConfigError;

/// Resolved, immutable UI layout
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub canvas: Canvas,
    pub screen: Screen,
    pub tools: Vec<ToolButton>,
    pub colors: Vec<ColorSwatch>,
    pub tolerance: Tolerance,
    color_strip: Option<ColorStrip>,
}

impl Layout {
    /// Load a descriptor file. `.toml` files are read as TOML, anything else as JSON.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        let layout = if is_toml {
            Self::from_toml_str(&content)?
        } else {
            Self::from_json_str(&content)?
        };
        info!(
            path = %path.display(),
            tools = layout.tools.len(),
            colors = layout.colors.len(),
            "loaded layout"
        );
        Ok(layout)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Self::from_descriptor(LayoutDescriptor::from_toml_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        Self::from_descriptor(LayoutDescriptor::from_json_str(content)?)
    }

    /// Validate a descriptor and build the lookup tables
    pub fn from_descriptor(desc: LayoutDescriptor) -> Result<Self, ConfigError> {
        let canvas = Canvas {
            width: desc.canvas.width,
            height: desc.canvas.height,
            offset_x: desc.canvas.offset_x,
            offset_y: desc.canvas.offset_y,
        };
        if !(canvas.width > 0.0 && canvas.height > 0.0) {
            return Err(ConfigError::invalid(format!(
                "canvas dimensions must be positive, got {}x{}",
                canvas.width, canvas.height
            )));
        }

        let screen = match desc.screen {
            Some(s) => Screen {
                width: s.width,
                height: s.height,
            },
            None => Screen::default(),
        };
        if !(screen.width > 0.0 && screen.height > 0.0) {
            return Err(ConfigError::invalid(format!(
                "screen dimensions must be positive, got {}x{}",
                screen.width, screen.height
            )));
        }

        let mut tolerance = Tolerance::default();
        match desc.tolerance {
            Some(ToleranceSpec::Uniform(t)) => tolerance.tool = t,
            Some(ToleranceSpec::Detailed {
                tool,
                color_x,
                color_y,
            }) => {
                tolerance.tool = tool.unwrap_or(tolerance.tool);
                tolerance.color_x = color_x.unwrap_or(tolerance.color_x);
                tolerance.color_y = color_y.unwrap_or(tolerance.color_y);
            }
            None => {}
        }
        validate_tolerance(&tolerance)?;

        let tools = desc
            .tools
            .into_iter()
            .map(|(name, spec)| ToolButton {
                name,
                center: Point::new(spec.x, spec.y),
            })
            .collect();

        let mut colors = Vec::with_capacity(desc.colors.len());
        for (id, spec) in desc.colors {
            if spec.hex.trim().is_empty() {
                return Err(ConfigError::invalid(format!("color '{id}' has an empty hex code")));
            }
            colors.push(ColorSwatch {
                id,
                center: Point::new(spec.x, spec.y),
                hex: spec.hex,
            });
        }

        Ok(Self {
            color_strip: color_strip_for(&colors),
            canvas,
            screen,
            tools,
            colors,
            tolerance,
        })
    }

    /// Set the tool hit tolerance
    pub fn with_tool_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance.tool = tolerance;
        self
    }

    /// Set the color hit tolerances
    pub fn with_color_tolerance(mut self, x: f64, y: f64) -> Self {
        self.tolerance.color_x = x;
        self.tolerance.color_y = y;
        self
    }

    /// Look up a tool by name
    pub fn tool(&self, name: &str) -> Option<&ToolButton> {
        self.tools.iter().find(|t| t.name == name)
    }

    /// Whether `p` falls inside the given tool's hit window
    pub fn hits_tool(&self, tool: &ToolButton, p: Point) -> bool {
        (p.x - tool.center.x).abs() < self.tolerance.tool
            && (p.y - tool.center.y).abs() < self.tolerance.tool
    }

    /// First tool, in declaration order, whose window contains `p`
    pub fn tool_at(&self, p: Point) -> Option<&ToolButton> {
        self.tools.iter().find(|t| self.hits_tool(t, p))
    }

    /// First swatch, in declaration order, whose window contains `p`
    pub fn color_at(&self, p: Point) -> Option<&ColorSwatch> {
        self.colors.iter().find(|c| {
            (p.x - c.center.x).abs() <= self.tolerance.color_x
                && (p.y - c.center.y).abs() <= self.tolerance.color_y
        })
    }

    /// Whether `p` lands anywhere on the swatch row
    pub fn in_color_strip(&self, p: Point) -> bool {
        self.color_strip.is_some_and(|strip| strip.contains(p))
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::from_toml_str(DEFAULT_LAYOUT).expect("Default layout should be valid TOML")
    }
}

fn validate_tolerance(tolerance: &Tolerance) -> Result<(), ConfigError> {
    for (name, value) in [
        ("tool", tolerance.tool),
        ("color_x", tolerance.color_x),
        ("color_y", tolerance.color_y),
    ] {
        if !(value >= 0.0) {
            return Err(ConfigError::invalid(format!(
                "tolerance '{name}' must be non-negative, got {value}"
            )));
        }
    }
    Ok(())
}

/// The strip spans the swatches horizontally and sits on the first swatch's row
fn color_strip_for(colors: &[ColorSwatch]) -> Option<ColorStrip> {
    let first = colors.first()?;
    let (min_x, max_x) = colors.iter().fold((f64::MAX, f64::MIN), |(lo, hi), c| {
        (lo.min(c.center.x), hi.max(c.center.x))
    });
    Some(ColorStrip {
        min_x,
        max_x,
        y: first.center.y,
        tolerance_y: ColorStrip::DEFAULT_TOLERANCE_Y,
    })
}
