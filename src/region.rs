//! Canvas regions named in prompts, and placement accuracy against them

use std::fmt;

use serde::Serialize;

use crate::layout::{Canvas, Point};

/// One cell of the 3x3 canvas partition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Region {
    TopLeft,
    Top,
    TopRight,
    Left,
    Center,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
}

/// Phrases checked in order; compound regions come before the single-word ones
const KEYWORDS: &[(Region, &[&str])] = &[
    (Region::TopLeft, &["top-left", "upper-left", "top left"]),
    (Region::TopRight, &["top-right", "upper-right", "top right"]),
    (Region::BottomLeft, &["bottom-left", "lower-left", "bottom left"]),
    (Region::BottomRight, &["bottom-right", "lower-right", "bottom right"]),
    (Region::Center, &["center", "middle", "centre"]),
    (Region::Top, &["top", "upper"]),
    (Region::Bottom, &["bottom", "lower"]),
    (Region::Left, &["left"]),
    (Region::Right, &["right"]),
];

impl Region {
    /// Detect the region a prompt asks for, if any
    pub fn from_prompt(prompt: &str) -> Option<Self> {
        let prompt = prompt.to_lowercase();
        KEYWORDS
            .iter()
            .find(|(_, phrases)| phrases.iter().any(|p| prompt.contains(p)))
            .map(|(region, _)| *region)
    }

    /// Center of the region in canvas coordinates
    pub fn center(self, canvas: &Canvas) -> Point {
        let third_w = canvas.width / 3.0;
        let third_h = canvas.height / 3.0;
        let near_x = third_w / 2.0;
        let mid_x = canvas.width / 2.0;
        let far_x = canvas.width - third_w / 2.0;
        let near_y = third_h / 2.0;
        let mid_y = canvas.height / 2.0;
        let far_y = canvas.height - third_h / 2.0;
        match self {
            Region::TopLeft => Point::new(near_x, near_y),
            Region::Top => Point::new(mid_x, near_y),
            Region::TopRight => Point::new(far_x, near_y),
            Region::Left => Point::new(near_x, mid_y),
            Region::Center => Point::new(mid_x, mid_y),
            Region::Right => Point::new(far_x, mid_y),
            Region::BottomLeft => Point::new(near_x, far_y),
            Region::Bottom => Point::new(mid_x, far_y),
            Region::BottomRight => Point::new(far_x, far_y),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Region::TopLeft => "top-left",
            Region::Top => "top",
            Region::TopRight => "top-right",
            Region::Left => "left",
            Region::Center => "center",
            Region::Right => "right",
            Region::BottomLeft => "bottom-left",
            Region::Bottom => "bottom",
            Region::BottomRight => "bottom-right",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `1 - distance(centroid, region center) / canvas diagonal`, floored at 0
pub fn spatial_accuracy(centroid: Point, region: Region, canvas: &Canvas) -> f64 {
    let distance = centroid.distance_to(region.center(canvas));
    (1.0 - distance / canvas.diagonal()).max(0.0)
}
