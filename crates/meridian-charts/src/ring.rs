//! Ring (doughnut) chart adapter
//!
//! Maps a labeled series 1:1 onto slices of a ring whose band spans 40% to
//! 70% of the available radius. Sweeps are proportional to each value's share
//! of the total and start at twelve o'clock, running clockwise with no gap
//! between neighbours.

use std::f64::consts::{FRAC_PI_2, TAU};

use iced::{Point, Size};
use tracing::debug;

use crate::error::{ChartError, ChartResult};
use crate::palette::{Color, Palette};
use crate::series::{normalize_ring, Label, RingDatum};
use crate::theme::DisplayMode;
use crate::tooltip::{format_value, TooltipContent};

/// Inner edge of the band as a fraction of the available radius
pub const INNER_RADIUS_RATIO: f32 = 0.4;
/// Outer edge of the band as a fraction of the available radius
pub const OUTER_RADIUS_RATIO: f32 = 0.7;
/// Gap between adjacent slices
pub const PADDING_ANGLE: f64 = 0.0;
/// Angle of the first slice's leading edge (twelve o'clock)
pub const START_ANGLE: f64 = -FRAC_PI_2;

/// Ring chart render configuration
#[derive(Debug, Clone, PartialEq)]
pub struct RingConfig {
    /// Identifier of the mount point
    pub id: String,
    /// Canvas height in pixels
    pub height: f32,
    /// Canvas width in pixels; fills the parent when `None`
    pub width: Option<f32>,
    /// Whether the legend row is shown under the ring
    pub legend_visible: bool,
    /// Ambient display mode
    pub display_mode: DisplayMode,
}

impl RingConfig {
    #[must_use]
    pub fn new(id: impl Into<String>, height: f32) -> Self {
        Self {
            id: id.into(),
            height,
            width: None,
            legend_visible: false,
            display_mode: DisplayMode::default(),
        }
    }

    #[must_use]
    pub fn with_width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    #[must_use]
    pub fn with_legend(mut self, visible: bool) -> Self {
        self.legend_visible = visible;
        self
    }

    #[must_use]
    pub fn with_display_mode(mut self, mode: DisplayMode) -> Self {
        self.display_mode = mode;
        self
    }

    /// Reject empty ids and non-positive sizes
    pub fn validate(&self) -> ChartResult<()> {
        if self.id.trim().is_empty() {
            return Err(ChartError::InvalidConfig("ring chart id is empty".to_string()));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(ChartError::InvalidConfig(format!(
                "ring chart height must be positive, got {}",
                self.height
            )));
        }
        if let Some(width) = self.width {
            if !(width.is_finite() && width > 0.0) {
                return Err(ChartError::InvalidConfig(format!(
                    "ring chart width must be positive, got {}",
                    width
                )));
            }
        }
        Ok(())
    }
}

/// One drawn slice
#[derive(Debug, Clone, PartialEq)]
pub struct RingSlice {
    /// Position in the display shape; also the palette index
    pub index: usize,
    pub label: Label,
    pub value: f64,
    /// Leading edge in radians
    pub start_angle: f64,
    /// Clockwise extent in radians
    pub sweep_angle: f64,
    pub color: Color,
}

impl RingSlice {
    #[must_use]
    pub fn end_angle(&self) -> f64 {
        self.start_angle + self.sweep_angle
    }

    #[must_use]
    pub fn mid_angle(&self) -> f64 {
        self.start_angle + self.sweep_angle / 2.0
    }

    #[must_use]
    pub fn sweep_degrees(&self) -> f64 {
        self.sweep_angle.to_degrees()
    }

    /// Hovered slice tooltip: the slice label and its raw value
    #[must_use]
    pub fn tooltip(&self) -> TooltipContent {
        TooltipContent {
            label: None,
            name: self.label.to_string(),
            value: format_value(self.value),
        }
    }
}

/// Display shape of a ring chart
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RingLayout {
    pub slices: Vec<RingSlice>,
    /// Sum of the non-negative values
    pub total: f64,
    /// Records dropped during normalization
    pub rejected: usize,
}

/// A legend row item
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: Color,
}

impl RingLayout {
    /// Build slices from `data`, coloring slice `i` with `palette.color_at(i)`.
    ///
    /// Negative values keep their slice (and palette position) but sweep
    /// zero radians. When nothing is positive every sweep is zero.
    #[must_use]
    pub fn compute(data: &[RingDatum], palette: &Palette) -> Self {
        let normalized = normalize_ring(data);
        let total: f64 = normalized.points.iter().map(|d| d.y.max(0.0)).sum();

        let mut start_angle = START_ANGLE;
        let slices = normalized
            .points
            .into_iter()
            .enumerate()
            .map(|(index, datum)| {
                let sweep_angle = if total > 0.0 {
                    datum.y.max(0.0) / total * TAU
                } else {
                    0.0
                };
                let slice = RingSlice {
                    index,
                    label: datum.x,
                    value: datum.y,
                    start_angle,
                    sweep_angle,
                    color: palette.color_at(index),
                };
                start_angle += sweep_angle + PADDING_ANGLE;
                slice
            })
            .collect();

        Self {
            slices,
            total,
            rejected: normalized.rejected,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// Legend items, one per slice in slice order
    #[must_use]
    pub fn legend_entries(&self) -> Vec<LegendEntry> {
        self.slices
            .iter()
            .map(|slice| LegendEntry {
                label: slice.label.to_string(),
                color: slice.color,
            })
            .collect()
    }

    /// Slice under `point`, if the point lies inside the band
    #[must_use]
    pub fn hit_test(&self, geometry: &RingGeometry, point: Point) -> Option<&RingSlice> {
        let dx = f64::from(point.x - geometry.center.x);
        let dy = f64::from(point.y - geometry.center.y);
        let distance = dx.hypot(dy);
        if distance < f64::from(geometry.inner_radius) || distance > f64::from(geometry.outer_radius) {
            return None;
        }

        let offset = (dy.atan2(dx) - START_ANGLE).rem_euclid(TAU);
        self.slices.iter().find(|slice| {
            let lead = slice.start_angle - START_ANGLE;
            slice.sweep_angle > 0.0 && offset >= lead && offset < lead + slice.sweep_angle
        })
    }
}

/// Where the band sits inside a drawing area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingGeometry {
    pub center: Point,
    pub inner_radius: f32,
    pub outer_radius: f32,
}

impl RingGeometry {
    /// Center the band in `size`; the available radius is half the shorter
    /// side
    #[must_use]
    pub fn fit(size: Size) -> Self {
        let available = size.width.min(size.height).max(0.0) / 2.0;
        Self {
            center: Point::new(size.width / 2.0, size.height / 2.0),
            inner_radius: available * INNER_RADIUS_RATIO,
            outer_radius: available * OUTER_RADIUS_RATIO,
        }
    }
}

/// A configured ring chart ready to be drawn
#[derive(Debug, Clone, PartialEq)]
pub struct RingChart {
    pub config: RingConfig,
    pub layout: RingLayout,
}

impl RingChart {
    /// Validate `config` and lay out `data` with the ring palette
    pub fn new(data: &[RingDatum], config: RingConfig) -> ChartResult<Self> {
        Self::with_palette(data, config, &Palette::ring())
    }

    pub fn with_palette(data: &[RingDatum], config: RingConfig, palette: &Palette) -> ChartResult<Self> {
        config.validate()?;
        let layout = RingLayout::compute(data, palette);
        debug!(
            id = %config.id,
            slices = layout.slices.len(),
            rejected = layout.rejected,
            "ring layout computed"
        );
        Ok(Self { config, layout })
    }

    /// Legend items when the legend is enabled
    #[must_use]
    pub fn legend(&self) -> Option<Vec<LegendEntry>> {
        self.config
            .legend_visible
            .then(|| self.layout.legend_entries())
    }
}
