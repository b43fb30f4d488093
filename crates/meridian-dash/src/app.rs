//! Main dashboard application
//!
//! Header on top, footer at the bottom, and one of two pages between them:
//! the chart grid or the color picker.

use std::path::PathBuf;

use iced::widget::{checkbox, column, container, row, scrollable, text, Column, Row};
use iced::{Element, Length, Task, Theme};
use meridian_charts::{ring_chart, Dimensions, DisplayMode, RingConfig, SparkConfig, SparkLine};
use tracing::{info, warn};

use crate::color_picker::{ColorMessage, ColorSelector};
use crate::config::DashConfig;
use crate::sample::{self, RingSample, SparkSample};
use crate::{footer, header};

/// Window title
pub const TITLE: &str = "Meridian";

/// Sparkline cards per grid row
const SPARKS_PER_ROW: usize = 3;

/// Top-level pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Dashboard,
    Colors,
}

impl Page {
    pub const ALL: [Self; 2] = [Self::Dashboard, Self::Colors];

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Colors => "Color picker",
        }
    }
}

/// Messages for the dashboard
#[derive(Debug, Clone)]
pub enum DashMessage {
    Navigate(Page),
    ToggleDisplayMode,
    ToggleLegend,
    Color(ColorMessage),
}

/// A sparkline card and the slot that memoizes it
struct SparkPanel {
    sample: SparkSample,
    line: SparkLine,
}

/// Main application state
pub struct Dashboard {
    config: DashConfig,
    /// Where preferences are saved; the default location when `None`
    config_path: Option<PathBuf>,
    page: Page,
    colors: ColorSelector,
    rings: Vec<RingSample>,
    sparks: Vec<SparkPanel>,
}

impl Dashboard {
    pub fn new(config: DashConfig, config_path: Option<PathBuf>, page: Page) -> Self {
        let samples = sample::load();
        let sparks = samples
            .sparks
            .into_iter()
            .map(|sample| SparkPanel {
                sample,
                line: SparkLine::new(),
            })
            .collect();

        Self {
            config,
            config_path,
            page,
            colors: ColorSelector::default(),
            rings: samples.rings,
            sparks,
        }
    }

    #[must_use]
    pub fn page(&self) -> Page {
        self.page
    }

    #[must_use]
    pub fn display_mode(&self) -> DisplayMode {
        self.config.display_mode
    }

    #[must_use]
    pub fn config(&self) -> &DashConfig {
        &self.config
    }

    pub fn title(&self) -> String {
        format!("{} - {}", self.page.title(), TITLE)
    }

    pub fn theme(&self) -> Theme {
        self.config.display_mode.theme()
    }

    /// Total display-shape rebuilds across all sparklines
    #[must_use]
    pub fn spark_recomputations(&self) -> u64 {
        self.sparks.iter().map(|panel| panel.line.recomputations()).sum()
    }

    pub fn update(&mut self, message: DashMessage) -> Task<DashMessage> {
        match message {
            DashMessage::Navigate(page) => self.page = page,
            DashMessage::ToggleDisplayMode => {
                self.config.display_mode = self.config.display_mode.toggled();
                info!(mode = self.config.display_mode.label(), "display mode changed");
                self.persist();
            }
            DashMessage::ToggleLegend => {
                self.config.charts.legend_visible = !self.config.charts.legend_visible;
                self.persist();
            }
            DashMessage::Color(message) => self.colors.update(message),
        }
        Task::none()
    }

    fn persist(&self) {
        let result = match &self.config_path {
            Some(path) => self.config.save_to(path),
            None => self.config.save(),
        };
        if let Err(error) = result {
            warn!(%error, "failed to save preferences");
        }
    }

    pub fn view(&self) -> Element<'_, DashMessage> {
        let body: Element<'_, DashMessage> = match self.page {
            Page::Dashboard => self.view_dashboard(),
            Page::Colors => self.colors.view().map(DashMessage::Color),
        };

        column![
            header::view(TITLE, self.page, self.config.display_mode),
            container(body).width(Length::Fill).height(Length::Fill),
            footer::view(),
        ]
        .into()
    }

    fn view_dashboard(&self) -> Element<'_, DashMessage> {
        let mode = self.config.display_mode;
        let prefs = &self.config.charts;

        let rings = Row::with_children(self.rings.iter().map(|sample| {
            let config = RingConfig::new(sample.id.as_str(), prefs.ring_height)
                .with_legend(prefs.legend_visible)
                .with_display_mode(mode);
            card(&sample.title, ring_chart(&sample.data, &config))
        }))
        .spacing(16);

        let spark_rows = self.sparks.chunks(SPARKS_PER_ROW).map(|chunk| -> Element<'_, DashMessage> {
            Row::with_children(chunk.iter().map(|panel| {
                let mut config = SparkConfig::new(
                    panel.sample.id.as_str(),
                    Dimensions::new(prefs.spark_width, prefs.spark_height),
                )
                .with_display_mode(mode);
                config.stroke_color = panel.sample.stroke;
                card(&panel.sample.title, panel.line.view(&panel.sample.data, &config))
            }))
            .spacing(16)
            .into()
        });

        let legend_toggle = checkbox(prefs.legend_visible)
            .label("Show legends")
            .on_toggle(|_| DashMessage::ToggleLegend);

        scrollable(
            column![
                row![text("Overview").size(18), legend_toggle].spacing(24),
                rings,
                text("Trends").size(18),
                Column::with_children(spark_rows).spacing(16),
            ]
            .spacing(16)
            .padding(20),
        )
        .into()
    }
}

/// Titled panel around a chart
fn card<'a>(title: &'a str, content: Element<'a, DashMessage>) -> Element<'a, DashMessage> {
    container(column![text(title).size(14), content].spacing(8))
        .padding(12)
        .style(|theme: &Theme| {
            let palette = theme.extended_palette();
            container::Style {
                background: Some(palette.background.weak.color.into()),
                border: iced::Border {
                    color: palette.background.strong.color,
                    width: 1.0,
                    radius: 6.0.into(),
                },
                ..Default::default()
            }
        })
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use meridian_charts::Color;

    fn dashboard(dir: &tempfile::TempDir) -> Dashboard {
        Dashboard::new(
            DashConfig::default(),
            Some(dir.path().join("dashboard.toml")),
            Page::Dashboard,
        )
    }

    #[test]
    fn test_toggle_display_mode_persists() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = dashboard(&dir);
        assert_eq!(app.theme(), Theme::Light);

        let _ = app.update(DashMessage::ToggleDisplayMode);
        assert_eq!(app.display_mode(), DisplayMode::Dark);
        assert_eq!(app.theme(), Theme::Dark);

        let saved = DashConfig::load_from(&dir.path().join("dashboard.toml")).unwrap();
        assert_eq!(saved.display_mode, DisplayMode::Dark);
    }

    #[test]
    fn test_picked_color_is_not_saved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dashboard.toml");
        let mut app = dashboard(&dir);
        assert_eq!(app.colors.color(), Color::WHITE);

        let _ = app.update(DashMessage::Navigate(Page::Colors));
        let _ = app.update(DashMessage::Color(ColorMessage::HexEdited("#336699".to_string())));
        assert_eq!(app.colors.hex(), "#336699");
        let _ = app.update(DashMessage::Navigate(Page::Dashboard));
        // Force a save of the other preferences
        let _ = app.update(DashMessage::ToggleDisplayMode);

        let saved = std::fs::read_to_string(&path).unwrap();
        assert!(!saved.contains("336699"));

        let restarted = Dashboard::new(DashConfig::load(Some(&path)), Some(path), Page::Colors);
        assert_eq!(restarted.colors.hex(), "#FFFFFF");
    }

    #[test]
    fn test_repeated_views_reuse_spark_shapes() {
        let dir = tempfile::tempdir().unwrap();
        let app = dashboard(&dir);
        let count = app.sparks.len() as u64;

        drop(app.view());
        assert_eq!(app.spark_recomputations(), count);
        drop(app.view());
        drop(app.view());
        assert_eq!(app.spark_recomputations(), count);
    }

    #[test]
    fn test_display_mode_change_rebuilds_sparks_once() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = dashboard(&dir);
        let count = app.sparks.len() as u64;

        drop(app.view());
        let _ = app.update(DashMessage::ToggleDisplayMode);
        drop(app.view());
        drop(app.view());
        assert_eq!(app.spark_recomputations(), 2 * count);
    }

    #[test]
    fn test_title_follows_page() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = dashboard(&dir);
        assert_eq!(app.title(), "Dashboard - Meridian");
        let _ = app.update(DashMessage::Navigate(Page::Colors));
        assert_eq!(app.title(), "Color picker - Meridian");
    }
}
