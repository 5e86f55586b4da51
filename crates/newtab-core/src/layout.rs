//! Absolute placement of the positionable page elements.
//!
//! # How an anchor becomes CSS (for beginners)
//!
//! An [`Anchor`] names a vertical part and a horizontal part:
//! `"bottom-left"` is bottom + left, `"center-right"` is centre + right and the
//! plain `"center"` is centre on both axes.
//!
//! - The vertical part pins the element's `top` (or `bottom`) edge at the
//!   `y` offset.  Centre means "half-way down, then `y` more".
//! - The horizontal part does the same for `left`/`right` with `x`, and also
//!   sets the text alignment.
//! - Centred axes are pulled back by half the element's own size with a
//!   `translate(-50%, ...)` so the element is centred on the point rather than
//!   starting at it.
//!
//! Every side not set by the anchor stays `auto`.

use crate::config::schema::{Anchor, Position};

/// Vertical part of an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Vertical {
    Top,
    Center,
    Bottom,
}

/// Horizontal part of an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Horizontal {
    Left,
    Center,
    Right,
}

fn split(anchor: Anchor) -> (Vertical, Horizontal) {
    match anchor {
        Anchor::TopLeft => (Vertical::Top, Horizontal::Left),
        Anchor::TopCenter => (Vertical::Top, Horizontal::Center),
        Anchor::TopRight => (Vertical::Top, Horizontal::Right),
        Anchor::CenterLeft => (Vertical::Center, Horizontal::Left),
        Anchor::Center => (Vertical::Center, Horizontal::Center),
        Anchor::CenterRight => (Vertical::Center, Horizontal::Right),
        Anchor::BottomLeft => (Vertical::Bottom, Horizontal::Left),
        Anchor::BottomCenter => (Vertical::Bottom, Horizontal::Center),
        Anchor::BottomRight => (Vertical::Bottom, Horizontal::Right),
    }
}

/// Inline style computed for one positioned element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub top: String,
    pub bottom: String,
    pub left: String,
    pub right: String,
    pub transform: String,
    pub text_align: &'static str,
}

impl Placement {
    const AUTO: &'static str = "auto";

    /// Computes the placement of an element at `position`.
    pub fn for_position(position: &Position) -> Self {
        let (vertical, horizontal) = split(position.anchor);
        let mut placement = Self {
            top: Self::AUTO.to_string(),
            bottom: Self::AUTO.to_string(),
            left: Self::AUTO.to_string(),
            right: Self::AUTO.to_string(),
            transform: String::new(),
            text_align: "center",
        };

        match vertical {
            Vertical::Top => placement.top = position.y.clone(),
            Vertical::Bottom => placement.bottom = position.y.clone(),
            Vertical::Center => placement.top = format!("calc(50% + {})", position.y),
        }

        match horizontal {
            Horizontal::Left => {
                placement.left = position.x.clone();
                placement.text_align = "left";
            }
            Horizontal::Right => {
                placement.right = position.x.clone();
                placement.text_align = "right";
            }
            Horizontal::Center => placement.left = format!("calc(50% + {})", position.x),
        }

        let translate_x = if horizontal == Horizontal::Center { "-50%" } else { "0" };
        let translate_y = if vertical == Vertical::Center { "-50%" } else { "0" };
        placement.transform = format!("translate({translate_x}, {translate_y})");

        placement
    }

    /// The placement as `(property, value)` pairs in a stable order.
    pub fn declarations(&self) -> [(&'static str, &str); 6] {
        [
            ("top", self.top.as_str()),
            ("bottom", self.bottom.as_str()),
            ("left", self.left.as_str()),
            ("right", self.right.as_str()),
            ("transform", self.transform.as_str()),
            ("text-align", self.text_align),
        ]
    }

    /// Renders the placement as an inline `style` attribute value.
    pub fn to_css(&self) -> String {
        self.declarations()
            .iter()
            .map(|(property, value)| format!("{property}: {value};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
