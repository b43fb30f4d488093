//! Meridian Charts - chart adapters for the Meridian admin dashboard
//!
//! Two presentational charts sit on top of iced's canvas widget:
//!
//! - **Ring chart**: a doughnut with palette-cycled slices, an optional
//!   legend row and a hover tooltip ([`ring_chart`]).
//! - **Sparkline**: a minimal monotone trend line with hidden axes and an
//!   `X: <n>` / `Value` tooltip ([`SparkLine`]).
//!
//! Each chart is a pure mapping from a series plus a flat render config to
//! a display shape ([`RingLayout`], [`SparkShape`]), and from that shape to
//! canvas geometry. The current [`DisplayMode`] is part of the config, so
//! charts never read global state.
//!
//! ```no_run
//! use std::sync::Arc;
//! use meridian_charts::{ring_chart, Dimensions, RingConfig, RingDatum, SparkConfig, SparkDatum, SparkLine};
//!
//! let sales = vec![RingDatum::new("North", 40.0), RingDatum::new("South", 25.0)];
//! let _ring: iced::Element<'_, ()> = ring_chart(&sales, &RingConfig::new("sales", 240.0).with_legend(true));
//!
//! let cpu: Arc<[SparkDatum]> = Arc::from(vec![SparkDatum::new(3.0), SparkDatum::new(1.0)]);
//! let line = SparkLine::new();
//! let _spark: iced::Element<'_, ()> = line.view(&cpu, &SparkConfig::new("cpu", Dimensions::new(160.0, 40.0)));
//! ```

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error types for chart operations
pub mod error;

/// Single-slot shallow-equality memoization
pub mod memo;

/// Colors and the cyclic palette
pub mod palette;

/// Canvas programs and element builders
pub mod render;

/// Ring (doughnut) chart adapter
pub mod ring;

/// Series records and normalization
pub mod series;

/// Sparkline adapter
pub mod spark;

/// Display mode and chart styling
pub mod theme;

/// Tooltip content
pub mod tooltip;

pub use error::{ChartError, ChartResult};
pub use memo::{Memo, ShallowEq};
pub use palette::{Color, Palette, RING_COLORS};
pub use render::{invalid_chart, ring_chart};
pub use ring::{LegendEntry, RingChart, RingConfig, RingGeometry, RingLayout, RingSlice};
pub use series::{parse_ring_records, parse_spark_records, Label, Normalized, RingDatum, SparkDatum};
pub use spark::{Axis, CubicSegment, Dimensions, SparkConfig, SparkLine, SparkPoint, SparkShape};
pub use theme::{ChartStyle, DisplayMode};
pub use tooltip::TooltipContent;
