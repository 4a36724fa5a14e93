//! Geometric types for the UI layout

use serde::Serialize;

/// A 2D point in screen or canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// The drawing surface, placed at an offset inside screen space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Canvas {
    /// Convert a screen point to canvas-relative coordinates
    pub fn to_canvas(&self, screen: Point) -> Point {
        Point::new(screen.x - self.offset_x, screen.y - self.offset_y)
    }

    /// Check a canvas-relative point against `[0, width] x [0, height]`
    pub fn contains(&self, rel: Point) -> bool {
        rel.x >= 0.0 && rel.x <= self.width && rel.y >= 0.0 && rel.y <= self.height
    }

    /// Right edge in screen coordinates
    pub fn right(&self) -> f64 {
        self.offset_x + self.width
    }

    /// Bottom edge in screen coordinates
    pub fn bottom(&self) -> f64 {
        self.offset_y + self.height
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn diagonal(&self) -> f64 {
        (self.width.powi(2) + self.height.powi(2)).sqrt()
    }
}

/// The full screen rectangle anchored at the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Screen {
    pub width: f64,
    pub height: f64,
}

impl Screen {
    /// Inclusive bounds check: `x = width` and `y = height` are on screen
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self {
            width: 1500.0,
            height: 900.0,
        }
    }
}

/// A tool button identified by the center of its hit area
#[derive(Debug, Clone, PartialEq)]
pub struct ToolButton {
    pub name: String,
    pub center: Point,
}

/// A color swatch with its hit center and the color it selects
#[derive(Debug, Clone, PartialEq)]
pub struct ColorSwatch {
    pub id: String,
    pub center: Point,
    pub hex: String,
}

/// Per-axis hit tolerances in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    /// Tool windows are open intervals: `|dx| < tool && |dy| < tool`
    pub tool: f64,
    /// Color windows are closed intervals on both axes
    pub color_x: f64,
    pub color_y: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            tool: 40.0,
            color_x: 12.0,
            color_y: 8.0,
        }
    }
}

/// Horizontal band spanned by the swatches, used by the coarse color counter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStrip {
    pub min_x: f64,
    pub max_x: f64,
    pub y: f64,
    pub tolerance_y: f64,
}

impl ColorStrip {
    /// Default vertical slack around the swatch row
    pub const DEFAULT_TOLERANCE_Y: f64 = 20.0;

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && (p.y - self.y).abs() < self.tolerance_y
    }
}
