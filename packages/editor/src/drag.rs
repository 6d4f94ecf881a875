//! Free-form drag repositioning
//!
//! ```text
//! Idle ──pointer_down──▶ Dragging ──pointer_move──▶ Dragging
//!                            │
//!                            └──pointer_up──▶ commit snapshot ──▶ Idle
//! ```
//!
//! Offsets are inline `left`/`top` in pixels. There is no clamping to the
//! stage; elements may be dragged outside it.

use crate::hit_test::write_style;
use poster_parser::ast::Element;
use poster_parser::{parse_css_number, StyleDeclarations};

/// An active drag
#[derive(Debug, Clone, PartialEq)]
pub struct DragState {
    /// Identity of the dragged element
    pub id: String,
    pub start_x: f64,
    pub start_y: f64,
    pub origin_left: f64,
    pub origin_top: f64,
}

impl DragState {
    /// Start dragging `element`. Elements that are not `absolute` or
    /// `relative` are switched to `absolute` so offsets take effect.
    pub fn begin(element: &mut Element, id: impl Into<String>, x: f64, y: f64) -> Self {
        let mut style = StyleDeclarations::parse(element.attr("style").unwrap_or_default());

        if !matches!(position_mode(&style).as_str(), "absolute" | "relative") {
            style.set("position", "absolute");
            write_style(element, &style);
        }

        Self {
            id: id.into(),
            start_x: x,
            start_y: y,
            origin_left: offset(&style, "left"),
            origin_top: offset(&style, "top"),
        }
    }

    /// Move `element` to the origin plus the pointer delta. Returns the new
    /// `(left, top)`.
    pub fn update(&self, element: &mut Element, x: f64, y: f64) -> (f64, f64) {
        let left = self.origin_left + (x - self.start_x);
        let top = self.origin_top + (y - self.start_y);

        let mut style = StyleDeclarations::parse(element.attr("style").unwrap_or_default());
        style.set("left", format_px(left));
        style.set("top", format_px(top));
        write_style(element, &style);

        (left, top)
    }
}

/// Position mode from the inline `position` declaration. Without one the
/// element is in normal flow (`static`).
pub fn position_mode(style: &StyleDeclarations) -> String {
    style
        .get("position")
        .and_then(|value| value.split_whitespace().next())
        .map(|mode| mode.to_ascii_lowercase())
        .unwrap_or_else(|| "static".to_string())
}

fn offset(style: &StyleDeclarations, prop: &str) -> f64 {
    style
        .get(prop)
        .and_then(parse_css_number)
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

/// `90.0` is `"90px"`, `12.5` is `"12.5px"`
pub fn format_px(value: f64) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{}px", value)
}
