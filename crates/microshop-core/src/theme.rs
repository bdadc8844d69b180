//! # Theme Module
//!
//! Colour palettes and the maths that derives a full palette from a single
//! user-picked background colour.
//!
//! ## Custom Background Derivation
//! ```text
//!   pick #RRGGBB ─┬──────────────────────────────► background
//!                 ├── adjust_brightness(+25) ────► surface ──contrast──► primary, accent
//!                 └── contrast_color ────────────► text ──adjust(-30)──► textSecondary
//! ```
//!
//! Luminance uses the Rec. 601 weights `(0.299 r + 0.587 g + 0.114 b) / 255`;
//! anything brighter than one half gets black text.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ThemeError;

/// Default for `customBackgroundColor` before the user picks one.
pub const DEFAULT_CUSTOM_BACKGROUND: &str = "#FFFFFF";

/// Brightness step from background to surface (~10% of 255).
pub const SURFACE_LIFT: i32 = 25;

/// Brightness step from text to secondary text.
pub const SECONDARY_TEXT_SHIFT: i32 = -30;

// =============================================================================
// Hex Helpers
// =============================================================================

/// Parses `#rrggbb` or `rrggbb` into its channels.
pub fn parse_hex(color: &str) -> Result<(u8, u8, u8), ThemeError> {
    let hex = color.strip_prefix('#').unwrap_or(color);
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ThemeError::InvalidHex(color.to_string()));
    }

    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| ThemeError::InvalidHex(color.to_string()))
    };
    Ok((channel(0)?, channel(2)?, channel(4)?))
}

/// Relative luminance in `[0, 1]`.
pub fn luminance(color: &str) -> Result<f64, ThemeError> {
    let (r, g, b) = parse_hex(color)?;
    Ok((0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64) / 255.0)
}

/// Black (`#000000`) on light colours, white (`#FFFFFF`) on dark ones.
///
/// ## Example
/// ```rust
/// use microshop_core::theme::contrast_color;
///
/// assert_eq!(contrast_color("#F8F9FA").unwrap(), "#000000");
/// assert_eq!(contrast_color("202124").unwrap(), "#FFFFFF");
/// ```
pub fn contrast_color(background: &str) -> Result<&'static str, ThemeError> {
    Ok(if luminance(background)? > 0.5 {
        "#000000"
    } else {
        "#FFFFFF"
    })
}

/// Adds `amount` to every channel, clamping to `0..=255`.
///
/// Output is always lowercase `#rrggbb`.
///
/// ## Example
/// ```rust
/// use microshop_core::theme::adjust_brightness;
///
/// assert_eq!(adjust_brightness("#FFFFFF", -30).unwrap(), "#e1e1e1");
/// assert_eq!(adjust_brightness("#F0F0F0", 25).unwrap(), "#ffffff");
/// ```
pub fn adjust_brightness(color: &str, amount: i32) -> Result<String, ThemeError> {
    let (r, g, b) = parse_hex(color)?;
    let shift = |c: u8| (c as i32 + amount).clamp(0, 255);
    Ok(format!("#{:02x}{:02x}{:02x}", shift(r), shift(g), shift(b)))
}

// =============================================================================
// Palettes
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
}

/// The eleven named colours every screen reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ColorPalette {
    pub primary: String,
    pub secondary: String,
    pub background: String,
    pub surface: String,
    pub text: String,
    pub text_secondary: String,
    pub border: String,
    pub error: String,
    pub success: String,
    pub warning: String,
    pub accent: String,
}

impl ColorPalette {
    pub fn light() -> Self {
        ColorPalette {
            primary: "#000000".into(),
            secondary: "#5F6368".into(),
            background: "#FFFFFF".into(),
            surface: "#F8F9FA".into(),
            text: "#202124".into(),
            text_secondary: "#5F6368".into(),
            border: "#DADCE0".into(),
            error: "#D93025".into(),
            success: "#1E8E3E".into(),
            warning: "#F9AB00".into(),
            accent: "#1A73E8".into(),
        }
    }

    pub fn dark() -> Self {
        ColorPalette {
            primary: "#FFFFFF".into(),
            secondary: "#9AA0A6".into(),
            background: "#202124".into(),
            surface: "#303134".into(),
            text: "#E8EAED".into(),
            text_secondary: "#9AA0A6".into(),
            border: "#5F6368".into(),
            error: "#F28B82".into(),
            success: "#81C995".into(),
            warning: "#FDD663".into(),
            accent: "#8AB4F8".into(),
        }
    }

    /// Merges the present fields of `update`.
    pub fn apply_update(&mut self, update: &ColorPaletteUpdate) {
        let slots: [(&mut String, &Option<String>); 11] = [
            (&mut self.primary, &update.primary),
            (&mut self.secondary, &update.secondary),
            (&mut self.background, &update.background),
            (&mut self.surface, &update.surface),
            (&mut self.text, &update.text),
            (&mut self.text_secondary, &update.text_secondary),
            (&mut self.border, &update.border),
            (&mut self.error, &update.error),
            (&mut self.success, &update.success),
            (&mut self.warning, &update.warning),
            (&mut self.accent, &update.accent),
        ];
        for (slot, value) in slots {
            if let Some(v) = value {
                *slot = v.clone();
            }
        }
    }

    /// Re-derives background, surface, text and accent colours from one
    /// base colour. Semantic colours (error, success, warning, border,
    /// secondary) are kept.
    pub fn with_custom_background(&self, color: &str) -> Result<ColorPalette, ThemeError> {
        let surface = adjust_brightness(color, SURFACE_LIFT)?;
        let text = contrast_color(color)?;
        let on_surface = contrast_color(&surface)?;

        Ok(ColorPalette {
            background: color.to_string(),
            text_secondary: adjust_brightness(text, SECONDARY_TEXT_SHIFT)?,
            text: text.to_string(),
            primary: on_surface.to_string(),
            accent: on_surface.to_string(),
            surface,
            ..self.clone()
        })
    }
}

/// Partial palette for `update_colors`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ColorPaletteUpdate {
    #[ts(optional)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
    #[ts(optional)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>,
    #[ts(optional)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[ts(optional)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface: Option<String>,
    #[ts(optional)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[ts(optional)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_secondary: Option<String>,
    #[ts(optional)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<String>,
    #[ts(optional)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[ts(optional)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<String>,
    #[ts(optional)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[ts(optional)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
}

/// Mode plus palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Theme {
    pub mode: ThemeMode,
    pub colors: ColorPalette,
}

impl Theme {
    pub fn light() -> Self {
        Theme {
            mode: ThemeMode::Light,
            colors: ColorPalette::light(),
        }
    }

    pub fn dark() -> Self {
        Theme {
            mode: ThemeMode::Dark,
            colors: ColorPalette::dark(),
        }
    }

    /// Stock theme for a dark-mode flag.
    pub fn for_dark_mode(is_dark: bool) -> Self {
        if is_dark {
            Theme::dark()
        } else {
            Theme::light()
        }
    }

    pub fn is_dark(&self) -> bool {
        self.mode == ThemeMode::Dark
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::light()
    }
}

// =============================================================================
// Liquid Glass
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct GlassParams {
    pub blur: f64,
    pub transparency: f64,
    pub border_opacity: f64,
    pub shadow_opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct GlassColors {
    pub glass_background: String,
    pub glass_border: String,
    pub glass_shadow: String,
    pub glass_highlight: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GlassAnimations {
    pub shimmer: bool,
    pub ripple: bool,
    pub morphing: bool,
    pub fluid: bool,
}

/// Frosted-glass surface settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LiquidGlassTheme {
    pub glass: GlassParams,
    pub colors: GlassColors,
    pub animations: GlassAnimations,
}

impl Default for LiquidGlassTheme {
    fn default() -> Self {
        LiquidGlassTheme {
            glass: GlassParams {
                blur: 15.0,
                transparency: 0.2,
                border_opacity: 0.3,
                shadow_opacity: 0.4,
            },
            colors: GlassColors {
                glass_background: "rgba(255, 255, 255, 0.05)".into(),
                glass_border: "rgba(255, 255, 255, 0.1)".into(),
                glass_shadow: "rgba(0, 0, 0, 0.05)".into(),
                glass_highlight: "rgba(255, 255, 255, 0.2)".into(),
            },
            animations: GlassAnimations {
                shimmer: true,
                ripple: true,
                morphing: true,
                fluid: true,
            },
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
