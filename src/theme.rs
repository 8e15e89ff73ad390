//! Window styling built from an egui-aesthetix theme.
//!
//! egui-aesthetix is compiled against its own egui release, so its `Style`
//! cannot be handed to this eframe directly. Colours and sizes are copied
//! across as plain values instead.

use eframe::egui::{Color32, Style, Vec2, Visuals};
use egui_aesthetix::Aesthetix;

fn color(rgba: [u8; 4]) -> Color32 {
    Color32::from_rgba_premultiplied(rgba[0], rgba[1], rgba[2], rgba[3])
}

/// Builds an egui style carrying the theme's palette and spacing.
pub fn style_from(theme: &dyn Aesthetix) -> Style {
    let mut visuals = if theme.dark_mode_visuals() {
        Visuals::dark()
    } else {
        Visuals::light()
    };
    visuals.panel_fill = color(theme.bg_primary_color_visuals().to_array());
    visuals.window_fill = color(theme.bg_secondary_color_visuals().to_array());
    visuals.faint_bg_color = color(theme.bg_auxiliary_color_visuals().to_array());
    visuals.extreme_bg_color = color(theme.bg_contrast_color_visuals().to_array());
    visuals.hyperlink_color = color(theme.primary_accent_color_visuals().to_array());
    visuals.selection.bg_fill = color(theme.primary_accent_color_visuals().to_array());
    visuals.override_text_color = theme
        .fg_primary_text_color_visuals()
        .map(|c| color(c.to_array()));
    visuals.warn_fg_color = color(theme.fg_warn_text_color_visuals().to_array());
    visuals.error_fg_color = color(theme.fg_error_text_color_visuals().to_array());

    let mut style = Style {
        visuals,
        ..Default::default()
    };
    let padding = theme.button_padding();
    style.spacing.button_padding = Vec2::new(padding.x, padding.y);
    style.spacing.item_spacing = Vec2::splat(theme.item_spacing_style());
    style.spacing.scroll.bar_width = theme.scroll_bar_width_style();
    style
}

pub fn nord_dark() -> Style {
    style_from(&egui_aesthetix::themes::NordDark)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nord_dark_palette() {
        let style = nord_dark();
        assert!(style.visuals.dark_mode);
        assert_eq!(style.visuals.panel_fill, Color32::from_rgb(46, 52, 64));
        assert_eq!(
            style.visuals.override_text_color,
            Some(Color32::from_rgb(216, 222, 233))
        );
        assert_eq!(style.spacing.button_padding, Vec2::new(12.0, 10.0));
        assert_eq!(style.spacing.scroll.bar_width, 14.0);
    }

    #[test]
    fn test_light_theme_uses_light_visuals() {
        let style = style_from(&egui_aesthetix::themes::NordLight);
        assert!(!style.visuals.dark_mode);
    }
}
