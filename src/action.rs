//! Pointer actions decoded from a raw JSON action log
//!
//! Decoding never fails. Entries that are not objects, lack a discriminator,
//! or carry unusable coordinates still become an [`Action`] so the validator
//! can report them and the analyzer can skip them.

use std::fmt;

use serde_json::Value;

use crate::layout::Point;

/// The action discriminator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionKind {
    MoveTo,
    Click,
    MouseDown,
    MouseUp,
    /// A discriminator outside the four known names
    Unknown(String),
    /// No `action` field at all (or the entry is not an object)
    Missing,
}

impl ActionKind {
    fn from_value(value: Option<&Value>) -> Self {
        match value {
            None => ActionKind::Missing,
            Some(Value::String(s)) => match s.as_str() {
                "moveTo" => ActionKind::MoveTo,
                "click" => ActionKind::Click,
                "mouseDown" => ActionKind::MouseDown,
                "mouseUp" => ActionKind::MouseUp,
                other => ActionKind::Unknown(other.to_string()),
            },
            Some(other) => ActionKind::Unknown(other.to_string()),
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::MoveTo => write!(f, "moveTo"),
            ActionKind::Click => write!(f, "click"),
            ActionKind::MouseDown => write!(f, "mouseDown"),
            ActionKind::MouseUp => write!(f, "mouseUp"),
            ActionKind::Unknown(name) => write!(f, "{name}"),
            ActionKind::Missing => write!(f, "<missing>"),
        }
    }
}

/// One coordinate field of an action
#[derive(Debug, Clone, PartialEq)]
pub enum Coord {
    Absent,
    Number(f64),
    /// Present but not numeric; the raw value is kept for diagnostics
    Invalid(Value),
}

impl Coord {
    fn from_value(value: Option<&Value>) -> Self {
        match value {
            None => Coord::Absent,
            Some(Value::Number(n)) => match n.as_f64() {
                Some(v) => Coord::Number(v),
                None => Coord::Invalid(Value::Number(n.clone())),
            },
            Some(Value::String(s)) => match s.trim().parse::<f64>() {
                Ok(v) if v.is_finite() => Coord::Number(v),
                _ => Coord::Invalid(Value::String(s.clone())),
            },
            Some(other) => Coord::Invalid(other.clone()),
        }
    }

    pub fn is_present(&self) -> bool {
        !matches!(self, Coord::Absent)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Coord::Number(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coord::Absent => write!(f, "None"),
            Coord::Number(v) => write!(f, "{v}"),
            Coord::Invalid(raw) => write!(f, "{raw}"),
        }
    }
}

/// A single simulated pointer event
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    pub kind: ActionKind,
    pub x: Coord,
    pub y: Coord,
}

impl Action {
    pub fn new(kind: ActionKind, x: Coord, y: Coord) -> Self {
        Self { kind, x, y }
    }

    pub fn move_to(x: f64, y: f64) -> Self {
        Self::new(ActionKind::MoveTo, Coord::Number(x), Coord::Number(y))
    }

    /// A click at the current pointer position
    pub fn click() -> Self {
        Self::new(ActionKind::Click, Coord::Absent, Coord::Absent)
    }

    pub fn click_at(x: f64, y: f64) -> Self {
        Self::new(ActionKind::Click, Coord::Number(x), Coord::Number(y))
    }

    pub fn mouse_down() -> Self {
        Self::new(ActionKind::MouseDown, Coord::Absent, Coord::Absent)
    }

    pub fn mouse_down_at(x: f64, y: f64) -> Self {
        Self::new(ActionKind::MouseDown, Coord::Number(x), Coord::Number(y))
    }

    pub fn mouse_up() -> Self {
        Self::new(ActionKind::MouseUp, Coord::Absent, Coord::Absent)
    }

    pub fn mouse_up_at(x: f64, y: f64) -> Self {
        Self::new(ActionKind::MouseUp, Coord::Number(x), Coord::Number(y))
    }

    /// Decode one log entry. Non-object entries decode as a missing discriminator.
    pub fn from_value(value: &Value) -> Self {
        match value.as_object() {
            Some(obj) => Self::new(
                ActionKind::from_value(obj.get("action")),
                Coord::from_value(obj.get("x")),
                Coord::from_value(obj.get("y")),
            ),
            None => Self::new(ActionKind::Missing, Coord::Absent, Coord::Absent),
        }
    }

    /// Both coordinate fields are present, whatever their type
    pub fn has_coordinates(&self) -> bool {
        self.x.is_present() && self.y.is_present()
    }

    /// The position, if both coordinates are numeric
    pub fn point(&self) -> Option<Point> {
        Some(Point::new(self.x.as_f64()?, self.y.as_f64()?))
    }

    /// Short form used in diagnostics, e.g. `moveTo(x=10, y=20)`
    pub fn describe(&self) -> String {
        if self.has_coordinates() {
            format!("{}(x={}, y={})", self.kind, self.x, self.y)
        } else {
            self.kind.to_string()
        }
    }
}

/// Decode a whole log, or `None` when the top-level value is not an array
pub fn parse_actions(value: &Value) -> Option<Vec<Action>> {
    value
        .as_array()
        .map(|entries| entries.iter().map(Action::from_value).collect())
}
