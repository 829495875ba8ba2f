//! Centralized theme module for TUI color constants and styles

use ratatui::prelude::*;

use crate::config::ThemeMode;

/// Complete color palette for the TUI
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Level colors (traffic light pattern, high is good)
    pub level_high: Color,
    pub level_mid: Color,
    pub level_low: Color,
    pub unscored: Color,

    // Radar series
    pub series_min: Color,
    pub series_max: Color,
    pub series_avg: Color,
    pub radar_grid: Color,
    pub radar_label: Color,

    // Table colors
    pub row_alt_bg: Color,
    pub header_style: Style,
    pub row_selected: Style,
    pub cell_selected: Style,

    // General colors
    pub muted: Color,
    pub title_color: Color,

    // Tab colors
    pub tab_active_style: Style,
    pub tab_inactive_style: Style,

    // Status bar colors
    pub status_bar_bg: Color,
    pub status_key_color: Color,
    pub flash_success: Color,
    pub flash_warning: Color,
    pub flash_error: Color,

    // Popup overlay colors
    pub popup_border: Color,
    pub popup_title: Style,
    pub popup_bg: Color,
}

impl ThemeColors {
    /// Dark theme palette
    pub fn dark() -> Self {
        Self {
            level_high: Color::Green,
            level_mid: Color::Yellow,
            level_low: Color::Red,
            unscored: Color::DarkGray,
            series_min: Color::Red,
            series_max: Color::Green,
            series_avg: Color::Cyan,
            radar_grid: Color::Indexed(239),
            radar_label: Color::Gray,
            row_alt_bg: Color::Indexed(235),
            header_style: Style::new().bold(),
            row_selected: Style::new().bg(Color::Indexed(238)),
            cell_selected: Style::new().reversed().bold(),
            muted: Color::Gray,
            title_color: Color::Cyan,
            tab_active_style: Style::new().fg(Color::Cyan).bold(),
            tab_inactive_style: Style::new().fg(Color::DarkGray),
            status_bar_bg: Color::Indexed(236),
            status_key_color: Color::Cyan,
            flash_success: Color::Green,
            flash_warning: Color::Yellow,
            flash_error: Color::Red,
            popup_border: Color::Cyan,
            popup_title: Style::new().fg(Color::Cyan).bold(),
            popup_bg: Color::Indexed(234),
        }
    }

    /// Light theme palette
    pub fn light() -> Self {
        Self {
            level_high: Color::Rgb(0, 128, 0),
            level_mid: Color::Rgb(160, 110, 0),
            level_low: Color::Rgb(190, 0, 0),
            unscored: Color::Indexed(248),
            series_min: Color::Rgb(190, 0, 0),
            series_max: Color::Rgb(0, 128, 0),
            series_avg: Color::Blue,
            radar_grid: Color::Indexed(250),
            radar_label: Color::Indexed(240),
            row_alt_bg: Color::Indexed(254),
            header_style: Style::new().bold(),
            row_selected: Style::new().bg(Color::Indexed(253)),
            cell_selected: Style::new().reversed().bold(),
            muted: Color::Indexed(243),
            title_color: Color::Blue,
            tab_active_style: Style::new().fg(Color::Blue).bold(),
            tab_inactive_style: Style::new().fg(Color::Indexed(246)),
            status_bar_bg: Color::Indexed(254),
            status_key_color: Color::Blue,
            flash_success: Color::Rgb(0, 128, 0),
            flash_warning: Color::Rgb(160, 110, 0),
            flash_error: Color::Rgb(190, 0, 0),
            popup_border: Color::Blue,
            popup_title: Style::new().fg(Color::Blue).bold(),
            popup_bg: Color::Indexed(255),
        }
    }

    /// Color for a competency level on the 0-10 scale
    pub fn level_color(&self, level: u8) -> Color {
        if level >= 7 {
            self.level_high
        } else if level >= 4 {
            self.level_mid
        } else {
            self.level_low
        }
    }
}

/// Pick the palette for the configured mode.
///
/// `Auto` asks the terminal for its background luminance; this has to run
/// before the terminal enters raw mode. Failure to detect falls back to dark.
pub fn resolve_theme(mode: ThemeMode) -> ThemeColors {
    match mode {
        ThemeMode::Dark => ThemeColors::dark(),
        ThemeMode::Light => ThemeColors::light(),
        ThemeMode::Auto => match terminal_light::luma() {
            Ok(luma) if luma > 0.6 => ThemeColors::light(),
            Ok(_) => ThemeColors::dark(),
            Err(e) => {
                tracing::debug!("terminal background detection failed: {}", e);
                ThemeColors::dark()
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_color_thresholds() {
        let theme = ThemeColors::dark();
        assert_eq!(theme.level_color(10), theme.level_high);
        assert_eq!(theme.level_color(7), theme.level_high);
        assert_eq!(theme.level_color(4), theme.level_mid);
        assert_eq!(theme.level_color(3), theme.level_low);
        assert_eq!(theme.level_color(0), theme.level_low);
    }

    #[test]
    fn test_explicit_modes_skip_detection() {
        assert_eq!(resolve_theme(ThemeMode::Light).title_color, Color::Blue);
        assert_eq!(resolve_theme(ThemeMode::Dark).title_color, Color::Cyan);
    }
}
