//! Meridian - admin dashboard
//!
//! A small iced application composed from the `meridian-charts` widgets:
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │  Meridian   Dashboard  Color picker   Dark mode │
//! ├─────────────────────────────────────────────────┤
//! │  ( ring )   ( ring )   ( ring )                 │
//! │  ~spark~    ~spark~    ~spark~                  │
//! ├─────────────────────────────────────────────────┤
//! │  Meridian Admin                          v0.1.0 │
//! └─────────────────────────────────────────────────┘
//! ```

pub mod app;
pub mod color_picker;
pub mod config;
pub mod footer;
pub mod header;
pub mod sample;

pub use app::{DashMessage, Dashboard, Page};
pub use config::{ConfigError, DashConfig};

use std::path::PathBuf;
use std::sync::OnceLock;

use iced::{Size, Task};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Startup choices resolved from the command line
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    pub config: DashConfig,
    pub config_path: Option<PathBuf>,
    pub page: Page,
}

/// Global storage for launch options to pass to the boot function
static LAUNCH_OPTIONS: OnceLock<LaunchOptions> = OnceLock::new();

/// Launch the dashboard window
pub fn launch(options: LaunchOptions) -> iced::Result {
    let (width, height) = options.config.window_size;
    let _ = LAUNCH_OPTIONS.set(options);

    iced::application(boot, update, view)
        .title(Dashboard::title)
        .theme(Dashboard::theme)
        .window_size(Size::new(width as f32, height as f32))
        .run()
}

/// Boot function - initializes application state
fn boot() -> (Dashboard, Task<DashMessage>) {
    let dashboard = match LAUNCH_OPTIONS.get() {
        Some(options) => Dashboard::new(
            options.config.clone(),
            options.config_path.clone(),
            options.page,
        ),
        None => Dashboard::new(DashConfig::load(None), None, Page::default()),
    };
    (dashboard, Task::none())
}

fn update(dashboard: &mut Dashboard, message: DashMessage) -> Task<DashMessage> {
    dashboard.update(message)
}

fn view(dashboard: &Dashboard) -> iced::Element<'_, DashMessage> {
    dashboard.view()
}
