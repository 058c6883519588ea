//! Render configuration and per-frame view inputs

use serde::{Deserialize, Serialize};

use super::types::{Color, Size, Vec2};

/// Static rendering options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Draw the background grid layer
    pub show_grid: bool,
    /// Distance between grid lines
    pub grid_spacing: f64,
    /// Label language; `None` uses the tree's default language
    pub language: Option<String>,
    /// Output size; `None` uses the tree's canvas size
    pub viewport: Option<Size>,
    pub label_font_size: f64,
    /// Gap between the bottom of a node and its label baseline box
    pub label_offset: f64,
    pub background: Color,
    pub label_color: Color,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            show_grid: false,
            grid_spacing: 50.0,
            language: None,
            viewport: None,
            label_font_size: 14.0,
            label_offset: 8.0,
            background: Color::rgb(0xFA, 0xFA, 0xFA),
            label_color: Color::rgb(0x21, 0x21, 0x21),
        }
    }
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_grid(mut self, show_grid: bool) -> Self {
        self.show_grid = show_grid;
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_viewport(mut self, viewport: Size) -> Self {
        self.viewport = Some(viewport);
        self
    }
}

/// Animation inputs sampled by the caller for the current frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationFrame {
    /// Scale applied to the selected node
    pub pulse_scale: f64,
    /// Alpha of the selected node's glow
    pub glow_alpha: f64,
}

impl Default for AnimationFrame {
    fn default() -> Self {
        Self {
            pulse_scale: 1.0,
            glow_alpha: 0.3,
        }
    }
}

impl AnimationFrame {
    /// Period of the pulse sampled by [`AnimationFrame::pulse_at`], in seconds
    pub const PULSE_PERIOD: f64 = 1.5;

    /// Sinusoidal pulse: scale 1.0–1.1, glow 0.2–0.5
    pub fn pulse_at(seconds: f64) -> Self {
        let phase = (seconds / Self::PULSE_PERIOD * std::f64::consts::TAU).sin() * 0.5 + 0.5;
        Self {
            pulse_scale: 1.0 + 0.1 * phase,
            glow_alpha: 0.2 + 0.3 * phase,
        }
    }
}

/// Caller-owned view state handed to the renderer each frame
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
    pub pan: Vec2,
    pub selected: Option<String>,
    pub animation: AnimationFrame,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pan(mut self, pan: Vec2) -> Self {
        self.pan = pan;
        self
    }

    pub fn with_selected(mut self, id: impl Into<String>) -> Self {
        self.selected = Some(id.into());
        self
    }

    pub fn with_animation(mut self, animation: AnimationFrame) -> Self {
        self.animation = animation;
        self
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.as_deref() == Some(id)
    }
}
