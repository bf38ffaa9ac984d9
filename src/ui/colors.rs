//! Color schemes for the scan dialog.
//!
//! Dark is the default; light and colorblind-friendly palettes are available
//! through the `--color-scheme` flag or the `color_scheme` config key.

use ratatui::style::Color;

/// Color scheme for the terminal UI.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScheme {
    // Text colors
    /// Primary text color
    pub text: Color,
    /// Dimmed/secondary text color
    pub text_dim: Color,
    /// Border color for panels/frames
    pub border: Color,

    // Header colors
    /// Header foreground color
    pub header_fg: Color,
    /// Header background color
    pub header_bg: Color,
    /// Accent color for the dialog title
    pub accent: Color,
    /// Directory label color
    pub path_fg: Color,
    /// Hint text color
    pub hint_fg: Color,

    // Progress colors
    /// Overall progress bar
    pub overall_bar: Color,
    /// Current item progress bar
    pub current_bar: Color,
    /// Status line while a scan runs
    pub scanning_fg: Color,

    // Status bar colors
    /// Status bar foreground color
    pub status_fg: Color,
    /// Status bar background color
    pub status_bg: Color,
    /// Key shortcut color
    pub key_fg: Color,
    /// Success message color
    pub success_fg: Color,
    /// Error message color
    pub error_fg: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::dark()
    }
}

impl ColorScheme {
    /// Select a scheme by name; unknown names give the default.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "colorblind" => Self::colorblind(),
            _ => Self::dark(),
        }
    }

    /// Scheme without any explicit colors, for `--no-color`.
    pub fn monochrome() -> Self {
        Self {
            text: Color::Reset,
            text_dim: Color::Reset,
            border: Color::Reset,
            header_fg: Color::Reset,
            header_bg: Color::Reset,
            accent: Color::Reset,
            path_fg: Color::Reset,
            hint_fg: Color::Reset,
            overall_bar: Color::Reset,
            current_bar: Color::Reset,
            scanning_fg: Color::Reset,
            status_fg: Color::Reset,
            status_bg: Color::Reset,
            key_fg: Color::Reset,
            success_fg: Color::Reset,
            error_fg: Color::Reset,
        }
    }

    /// High-contrast dark theme.
    pub fn dark() -> Self {
        Self {
            text: Color::Rgb(248, 248, 242),     // Off-white
            text_dim: Color::Rgb(136, 136, 136), // Medium gray
            border: Color::Rgb(98, 114, 164),    // Muted purple-blue

            header_fg: Color::Rgb(248, 248, 242),
            header_bg: Color::Rgb(40, 42, 54),
            accent: Color::Rgb(189, 147, 249),  // Purple accent
            path_fg: Color::Rgb(139, 233, 253), // Cyan for paths
            hint_fg: Color::Rgb(98, 114, 164),

            overall_bar: Color::Rgb(80, 250, 123), // Green
            current_bar: Color::Rgb(139, 233, 253),
            scanning_fg: Color::Rgb(241, 250, 140), // Yellow

            status_fg: Color::Rgb(248, 248, 242),
            status_bg: Color::Rgb(68, 71, 90),
            key_fg: Color::Rgb(255, 184, 108), // Orange for keys
            success_fg: Color::Rgb(80, 250, 123),
            error_fg: Color::Rgb(255, 85, 85),
        }
    }

    /// Darker, saturated colors for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            text: Color::Rgb(30, 30, 30),
            text_dim: Color::Rgb(100, 100, 100),
            border: Color::Rgb(80, 80, 120),

            header_fg: Color::Rgb(30, 30, 30),
            header_bg: Color::Rgb(230, 230, 235),
            accent: Color::Rgb(100, 60, 180),
            path_fg: Color::Rgb(0, 100, 150),
            hint_fg: Color::Rgb(120, 120, 140),

            overall_bar: Color::Rgb(22, 130, 80),
            current_bar: Color::Rgb(0, 100, 150),
            scanning_fg: Color::Rgb(180, 140, 0),

            status_fg: Color::Rgb(30, 30, 30),
            status_bg: Color::Rgb(210, 210, 220),
            key_fg: Color::Rgb(180, 100, 50),
            success_fg: Color::Rgb(22, 130, 80),
            error_fg: Color::Rgb(180, 30, 30),
        }
    }

    /// Palette relying on luminance and blue-orange opposition, which stays
    /// distinguishable across common color vision deficiencies.
    pub fn colorblind() -> Self {
        Self {
            text: Color::Rgb(255, 255, 255),
            text_dim: Color::Rgb(170, 170, 170),
            border: Color::Rgb(136, 136, 136),

            header_fg: Color::Rgb(255, 255, 255),
            header_bg: Color::Rgb(40, 40, 50),
            accent: Color::Rgb(86, 180, 233),  // Sky blue
            path_fg: Color::Rgb(240, 228, 66), // Yellow
            hint_fg: Color::Rgb(153, 153, 153),

            overall_bar: Color::Rgb(0, 114, 178), // Blue
            current_bar: Color::Rgb(230, 159, 0), // Orange
            scanning_fg: Color::Rgb(240, 228, 66),

            status_fg: Color::Rgb(255, 255, 255),
            status_bg: Color::Rgb(60, 60, 70),
            key_fg: Color::Rgb(230, 159, 0),
            success_fg: Color::Rgb(0, 158, 115),
            error_fg: Color::Rgb(213, 94, 0), // Vermillion
        }
    }
}
