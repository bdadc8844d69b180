//! # Theme State
//!
//! Active palette, dark-mode flag, glass toggle and the custom background.
//! Only `isDark` and `isLiquidGlassEnabled` are persisted; on rehydrate the
//! stock palette for the saved mode is selected, so colour edits and a
//! custom background last for the session only.

use serde::{Deserialize, Serialize};

use microshop_core::theme::{
    adjust_brightness, contrast_color, ColorPaletteUpdate, LiquidGlassTheme, Theme,
    DEFAULT_CUSTOM_BACKGROUND,
};
use microshop_core::ThemeError;
use microshop_store::keys;

use super::{Persisted, PersistedStore};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeStore {
    pub theme: Theme,
    pub liquid_glass: LiquidGlassTheme,
    pub is_dark: bool,
    pub is_liquid_glass_enabled: bool,
    pub custom_background_color: String,
}

impl Default for ThemeStore {
    fn default() -> Self {
        ThemeStore {
            theme: Theme::light(),
            liquid_glass: LiquidGlassTheme::default(),
            is_dark: false,
            is_liquid_glass_enabled: false,
            custom_background_color: DEFAULT_CUSTOM_BACKGROUND.to_string(),
        }
    }
}

impl ThemeStore {
    pub fn set_theme(&mut self, theme: Theme) {
        self.is_dark = theme.is_dark();
        self.theme = theme;
    }

    /// Swaps to the stock palette of the other mode.
    pub fn toggle_dark_mode(&mut self) {
        self.is_dark = !self.is_dark;
        self.theme = Theme::for_dark_mode(self.is_dark);
    }

    pub fn set_liquid_glass(&mut self, liquid_glass: LiquidGlassTheme) {
        self.liquid_glass = liquid_glass;
    }

    pub fn toggle_liquid_glass(&mut self) {
        self.is_liquid_glass_enabled = !self.is_liquid_glass_enabled;
    }

    pub fn update_colors(&mut self, colors: &ColorPaletteUpdate) {
        self.theme.colors.apply_update(colors);
    }

    /// Derives surface, text and accent colours from `color`.
    /// An invalid colour leaves the theme untouched.
    pub fn set_custom_background_color(&mut self, color: &str) -> Result<(), ThemeError> {
        let colors = self.theme.colors.with_custom_background(color)?;
        self.theme.colors = colors;
        self.custom_background_color = color.to_string();
        Ok(())
    }

    pub fn get_contrast_color(&self, background: &str) -> Result<&'static str, ThemeError> {
        contrast_color(background)
    }

    pub fn adjust_color_brightness(&self, color: &str, amount: i32) -> Result<String, ThemeError> {
        adjust_brightness(color, amount)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeSlice {
    pub is_dark: bool,
    pub is_liquid_glass_enabled: bool,
}

impl Persisted for ThemeStore {
    type Slice = ThemeSlice;
    const KEY: &'static str = keys::THEME;

    fn to_slice(&self) -> ThemeSlice {
        ThemeSlice {
            is_dark: self.is_dark,
            is_liquid_glass_enabled: self.is_liquid_glass_enabled,
        }
    }

    fn from_slice(slice: ThemeSlice) -> Self {
        ThemeStore {
            theme: Theme::for_dark_mode(slice.is_dark),
            is_dark: slice.is_dark,
            is_liquid_glass_enabled: slice.is_liquid_glass_enabled,
            ..Default::default()
        }
    }
}

pub type ThemeState = PersistedStore<ThemeStore>;

#[cfg(test)]
mod tests {
    use super::*;
    use microshop_core::theme::ColorPalette;
    use microshop_store::MemoryStorage;

    #[test]
    fn test_toggle_dark_mode_swaps_palettes() {
        let mut store = ThemeStore::default();
        store.toggle_dark_mode();
        assert!(store.is_dark);
        assert_eq!(store.theme, Theme::dark());

        store.toggle_dark_mode();
        assert_eq!(store.theme.colors, ColorPalette::light());
    }

    #[test]
    fn test_custom_background_derives_palette() {
        let mut store = ThemeStore::default();
        store.set_custom_background_color("#202020").unwrap();

        let colors = &store.theme.colors;
        assert_eq!(colors.background, "#202020");
        assert_eq!(colors.surface, "#393939");
        assert_eq!(colors.text, "#FFFFFF");
        assert_eq!(colors.text_secondary, "#e1e1e1");
        assert_eq!(colors.primary, "#FFFFFF");
        assert_eq!(colors.accent, "#FFFFFF");
        assert_eq!(store.custom_background_color, "#202020");
    }

    #[test]
    fn test_invalid_background_is_rejected() {
        let mut store = ThemeStore::default();
        assert!(store.set_custom_background_color("#12").is_err());
        assert_eq!(store, ThemeStore::default());
    }

    #[test]
    fn test_set_theme_tracks_mode() {
        let mut store = ThemeStore::default();
        store.set_theme(Theme::dark());
        assert!(store.is_dark);
    }

    #[tokio::test]
    async fn test_rehydrate_selects_palette_for_saved_mode() {
        let storage = MemoryStorage::shared();
        let state = ThemeState::rehydrate(storage.clone()).await;
        state
            .update(|s| {
                s.toggle_dark_mode();
                s.toggle_liquid_glass();
                s.update_colors(&ColorPaletteUpdate {
                    accent: Some("#FF0000".into()),
                    ..Default::default()
                });
            })
            .await;

        let reopened = ThemeState::rehydrate(storage).await;
        reopened.with(|s| {
            assert!(s.is_dark);
            assert!(s.is_liquid_glass_enabled);
            assert_eq!(s.theme, Theme::dark());
        });
    }
}
