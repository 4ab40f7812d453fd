#![forbid(unsafe_code)]

//! Dimmed-backdrop layer configuration.

/// Backdrop configuration (color + opacity).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackdropConfig {
    /// Backdrop color as RGB.
    pub color: (u8, u8, u8),
    /// Opacity in `[0.0, 1.0]` when the overlay is fully visible.
    pub opacity: f32,
}

impl BackdropConfig {
    /// Create a new backdrop config.
    pub fn new(color: (u8, u8, u8), opacity: f32) -> Self {
        Self { color, opacity }
    }

    /// Fully transparent backdrop.
    pub fn transparent() -> Self {
        Self {
            color: (0, 0, 0),
            opacity: 0.0,
        }
    }

    /// Set backdrop color.
    pub fn color(mut self, color: (u8, u8, u8)) -> Self {
        self.color = color;
        self
    }

    /// Set backdrop opacity.
    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }
}

impl Default for BackdropConfig {
    fn default() -> Self {
        // Gray at 0.6, the classic dimmed-alert look.
        Self {
            color: (128, 128, 128),
            opacity: 0.6,
        }
    }
}
