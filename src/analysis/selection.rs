//! Tool and color selection from button clicks

use serde::Serialize;

use crate::action::{Action, ActionKind};
use crate::layout::{Layout, Point};

/// A click landing somewhere on screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    /// Index of the click action
    pub index: usize,
    pub point: Point,
}

/// Whether a tool was picked and then drawn with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ToolUsage {
    pub selected: bool,
    pub actually_used: bool,
}

/// Collect every click with a known position.
///
/// A click carrying its own point lands there. A bare click lands where the
/// immediately preceding `moveTo` left the pointer.
pub fn selections(actions: &[Action]) -> Vec<Selection> {
    let mut out = Vec::new();
    for (i, action) in actions.iter().enumerate() {
        if action.kind != ActionKind::Click {
            continue;
        }
        let point = action.point().or_else(|| {
            let prev = actions.get(i.checked_sub(1)?)?;
            if prev.kind == ActionKind::MoveTo {
                prev.point()
            } else {
                None
            }
        });
        if let Some(point) = point {
            out.push(Selection { index: i, point });
        }
    }
    out
}

/// Clicks with explicit coordinates that hit any tool window
pub fn count_tool_changes(actions: &[Action], layout: &Layout) -> usize {
    explicit_clicks(actions)
        .filter(|&p| layout.tool_at(p).is_some())
        .count()
}

/// Clicks with explicit coordinates that land on the swatch row
pub fn count_color_changes(actions: &[Action], layout: &Layout) -> usize {
    explicit_clicks(actions)
        .filter(|&p| layout.in_color_strip(p))
        .count()
}

fn explicit_clicks(actions: &[Action]) -> impl Iterator<Item = Point> + '_ {
    actions
        .iter()
        .filter(|a| a.kind == ActionKind::Click)
        .filter_map(Action::point)
}

/// Resolved hex codes in selection order, duplicates kept
pub fn exact_colors(selections: &[Selection], layout: &Layout) -> Vec<String> {
    selections
        .iter()
        .filter_map(|s| layout.color_at(s.point))
        .map(|c| c.hex.clone())
        .collect()
}

/// Resolved tool names in selection order
pub fn tool_sequence(selections: &[Selection], layout: &Layout) -> Vec<String> {
    selections
        .iter()
        .filter_map(|s| layout.tool_at(s.point))
        .map(|t| t.name.clone())
        .collect()
}

/// Find the first selection of `tool`, then look ahead for a mouseDown
/// before the pointer visits any other tool's button.
pub fn tool_usage(
    actions: &[Action],
    selections: &[Selection],
    layout: &Layout,
    tool: &str,
) -> ToolUsage {
    let Some(button) = layout.tool(tool) else {
        return ToolUsage::default();
    };
    let Some(first) = selections.iter().find(|s| layout.hits_tool(button, s.point)) else {
        return ToolUsage::default();
    };

    for action in &actions[first.index + 1..] {
        match action.kind {
            ActionKind::MouseDown => {
                return ToolUsage {
                    selected: true,
                    actually_used: true,
                }
            }
            ActionKind::MoveTo | ActionKind::Click => {
                let switched = action.point().is_some_and(|p| {
                    layout
                        .tools
                        .iter()
                        .any(|other| other.name != tool && layout.hits_tool(other, p))
                });
                if switched {
                    break;
                }
            }
            _ => {}
        }
    }

    ToolUsage {
        selected: true,
        actually_used: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_click_uses_previous_move() {
        let actions = vec![
            Action::move_to(453.0, 25.0),
            Action::click(),
            Action::click(),
            Action::click_at(245.0, 25.0),
        ];
        let sel = selections(&actions);
        assert_eq!(
            sel,
            vec![
                Selection {
                    index: 1,
                    point: Point::new(453.0, 25.0)
                },
                Selection {
                    index: 3,
                    point: Point::new(245.0, 25.0)
                },
            ]
        );
    }

    #[test]
    fn test_click_coordinates_take_precedence() {
        let actions = vec![Action::move_to(453.0, 25.0), Action::click_at(477.0, 25.0)];
        let layout = Layout::default();
        let colors = exact_colors(&selections(&actions), &layout);
        assert_eq!(colors, ["#00FF00"]);
    }

    #[test]
    fn test_exact_colors_keep_duplicates() {
        let actions = vec![
            Action::click_at(453.0, 25.0),
            Action::click_at(405.0, 25.0),
            Action::click_at(455.0, 30.0),
        ];
        let layout = Layout::default();
        let colors = exact_colors(&selections(&actions), &layout);
        assert_eq!(colors, ["#FF0000", "#000000", "#FF0000"]);
    }

    #[test]
    fn test_loose_counters_ignore_bare_clicks() {
        let actions = vec![
            Action::move_to(453.0, 25.0),
            Action::click(),
            Action::click_at(460.0, 30.0),
            Action::click_at(245.0, 25.0),
        ];
        let layout = Layout::default();
        assert_eq!(count_color_changes(&actions, &layout), 1);
        assert_eq!(count_tool_changes(&actions, &layout), 1);
    }

    #[test]
    fn test_tool_used_after_selection() {
        let actions = vec![
            Action::move_to(245.0, 25.0),
            Action::click(),
            Action::move_to(500.0, 400.0),
            Action::mouse_down(),
            Action::mouse_up(),
        ];
        let layout = Layout::default();
        let usage = tool_usage(&actions, &selections(&actions), &layout, "pen");
        assert_eq!(
            usage,
            ToolUsage {
                selected: true,
                actually_used: true
            }
        );
    }

    #[test]
    fn test_tool_abandoned_for_another() {
        let actions = vec![
            Action::click_at(830.0, 25.0),
            Action::move_to(245.0, 25.0),
            Action::click(),
            Action::mouse_down_at(500.0, 400.0),
            Action::mouse_up(),
        ];
        let layout = Layout::default();
        let sel = selections(&actions);
        let rect = tool_usage(&actions, &sel, &layout, "rectangle");
        assert!(rect.selected);
        assert!(!rect.actually_used);
        let pen = tool_usage(&actions, &sel, &layout, "pen");
        assert!(pen.actually_used);
    }

    #[test]
    fn test_tool_never_selected_or_undeclared() {
        let actions = vec![Action::mouse_down_at(500.0, 400.0), Action::mouse_up()];
        let layout = Layout::default();
        let sel = selections(&actions);
        assert_eq!(tool_usage(&actions, &sel, &layout, "pen"), ToolUsage::default());
        assert_eq!(tool_usage(&actions, &sel, &layout, "spray"), ToolUsage::default());
    }

    #[test]
    fn test_tool_sequence() {
        let actions = vec![Action::click_at(990.0, 25.0), Action::click_at(453.0, 25.0)];
        let layout = Layout::default();
        assert_eq!(tool_sequence(&selections(&actions), &layout), ["line"]);
    }
}
