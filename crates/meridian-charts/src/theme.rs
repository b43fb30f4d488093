//! Display mode and the chart colors it selects
//!
//! The display mode is passed to every chart explicitly. It only changes
//! colors, never layout or data.

use iced::Theme;
use serde::{Deserialize, Serialize};

use crate::palette::Color;

/// Light or dark presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Light,
    Dark,
}

impl DisplayMode {
    /// The other mode
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// iced theme for this mode
    #[must_use]
    pub fn theme(self) -> Theme {
        match self {
            Self::Light => Theme::Light,
            Self::Dark => Theme::Dark,
        }
    }

    /// Chart colors for this mode
    #[must_use]
    pub const fn chart_style(self) -> ChartStyle {
        match self {
            Self::Light => ChartStyle::LIGHT,
            Self::Dark => ChartStyle::DARK,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Dark => "Dark",
        }
    }
}

/// Non-data colors used when drawing a chart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartStyle {
    /// Tooltip and legend text
    pub text: Color,
    /// Placeholder text and the empty ring track
    pub muted: Color,
    /// Tooltip box fill
    pub tooltip_background: Color,
    /// Tooltip box outline
    pub tooltip_border: Color,
    /// Sparkline stroke when none is configured
    pub default_stroke: Color,
}

impl ChartStyle {
    pub const LIGHT: Self = Self {
        text: Color::rgb(51, 51, 51),
        muted: Color::rgb(153, 153, 153),
        tooltip_background: Color::rgb(255, 255, 255),
        tooltip_border: Color::rgb(204, 204, 204),
        default_stroke: Color::rgb(0x88, 0x84, 0xD8),
    };

    pub const DARK: Self = Self {
        text: Color::rgb(230, 230, 230),
        muted: Color::rgb(120, 120, 120),
        tooltip_background: Color::rgb(40, 42, 46),
        tooltip_border: Color::rgb(80, 82, 86),
        default_stroke: Color::rgb(0x82, 0xCA, 0x9D),
    };
}
