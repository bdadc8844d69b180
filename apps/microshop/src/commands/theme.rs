//! # Theme Commands
//!
//! Settings-screen actions. Each returns the resulting store so the screen
//! can repaint from one value.

use tracing::{debug, info};

use microshop_core::theme::ColorPaletteUpdate;

use crate::error::ApiError;
use crate::state::{ThemeState, ThemeStore};

pub fn get_theme(theme: &ThemeState) -> ThemeStore {
    theme.snapshot()
}

pub async fn toggle_dark_mode(theme: &ThemeState) -> ThemeStore {
    let store = theme
        .update(|s| {
            s.toggle_dark_mode();
            s.clone()
        })
        .await;
    info!(is_dark = store.is_dark, "Dark mode toggled");
    store
}

pub async fn toggle_liquid_glass(theme: &ThemeState) -> ThemeStore {
    theme
        .update(|s| {
            s.toggle_liquid_glass();
            s.clone()
        })
        .await
}

/// Derives a full palette from one background colour.
pub async fn set_custom_background(
    theme: &ThemeState,
    color: &str,
) -> Result<ThemeStore, ApiError> {
    debug!(color = %color, "set_custom_background command");
    let store = theme
        .update(|s| s.set_custom_background_color(color).map(|()| s.clone()))
        .await?;
    info!(color = %color, "Custom background applied");
    Ok(store)
}

pub async fn update_colors(theme: &ThemeState, colors: &ColorPaletteUpdate) -> ThemeStore {
    theme
        .update(|s| {
            s.update_colors(colors);
            s.clone()
        })
        .await
}
