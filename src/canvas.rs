//! Drawing surface abstraction.
//!
//! The scene only ever talks to a [`Canvas`]; the window backend implements
//! it on the GPU and tests implement it by recording calls. Coordinates are
//! screen units with the origin top-left and y pointing down.

use glam::DVec2;

use crate::body::Color;

/// Horizontal placement of a text run relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    /// Anchor is the top-left corner of the text.
    #[default]
    Left,
    /// Anchor is the middle of the top edge.
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Cap height in screen units.
    pub size: f32,
    pub color: Color,
    pub align: Align,
}

impl TextStyle {
    pub fn new(size: f32, color: Color) -> Self {
        Self {
            size,
            color,
            align: Align::Left,
        }
    }

    pub fn centered(mut self) -> Self {
        self.align = Align::Center;
        self
    }
}

/// A 2D surface the orrery can paint one frame onto.
pub trait Canvas {
    type Error: std::error::Error;

    /// Drawable area in screen units.
    fn size(&self) -> DVec2;

    /// Start a new frame filled with `color`.
    fn clear(&mut self, color: Color);

    fn fill_circle(&mut self, center: DVec2, radius: f32, color: Color);

    /// Circle outline `width` units thick, measured inwards from `radius`.
    fn stroke_circle(&mut self, center: DVec2, radius: f32, width: f32, color: Color);

    fn draw_text(&mut self, text: &str, position: DVec2, style: TextStyle);

    /// Show everything drawn since [`clear`](Self::clear).
    fn present(&mut self) -> Result<(), Self::Error>;
}
