//! Sparkline adapter
//!
//! A sparkline plots `{yval}` records against their position in the series.
//! Both axes are computed (they drive scaling and tooltip alignment) but are
//! never drawn. The curve uses monotone cubic interpolation, so it does not
//! overshoot between two neighbouring points.

use std::sync::Arc;

use iced::widget::canvas;
use iced::{Element, Point, Rectangle, Size};
use tracing::debug;

use crate::error::{ChartError, ChartResult};
use crate::memo::Memo;
use crate::palette::Color;
use crate::render;
use crate::series::{normalize_spark, SparkDatum};
use crate::theme::DisplayMode;
use crate::tooltip::{format_value, TooltipContent};

/// Line stroke width in pixels
pub const STROKE_WIDTH: f32 = 2.0;
/// Marker radius for every point
pub const DOT_RADIUS: f32 = 3.0;
/// Marker radius for the hovered point
pub const ACTIVE_DOT_RADIUS: f32 = 6.0;
/// Space kept free on each side of the plot
pub const MARGIN: f32 = 5.0;
/// Entry name shown in the tooltip
pub const TOOLTIP_VALUE_NAME: &str = "Value";
/// Prefix of the tooltip heading
pub const TOOLTIP_LABEL_PREFIX: &str = "X: ";

/// Canvas size in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    pub width: f32,
    pub height: f32,
}

impl Dimensions {
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Sparkline render configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SparkConfig {
    /// Identifier of the mount point
    pub id: String,
    pub dimensions: Dimensions,
    /// Line color; the display mode's default when `None`
    pub stroke_color: Option<Color>,
    pub display_mode: DisplayMode,
}

impl SparkConfig {
    #[must_use]
    pub fn new(id: impl Into<String>, dimensions: Dimensions) -> Self {
        Self {
            id: id.into(),
            dimensions,
            stroke_color: None,
            display_mode: DisplayMode::default(),
        }
    }

    #[must_use]
    pub fn with_stroke(mut self, color: Color) -> Self {
        self.stroke_color = Some(color);
        self
    }

    #[must_use]
    pub fn with_display_mode(mut self, mode: DisplayMode) -> Self {
        self.display_mode = mode;
        self
    }

    /// Stroke color after falling back to the display mode
    #[must_use]
    pub fn stroke(&self) -> Color {
        self.stroke_color
            .unwrap_or(self.display_mode.chart_style().default_stroke)
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.id.trim().is_empty() {
            return Err(ChartError::InvalidConfig("sparkline id is empty".to_string()));
        }
        let Dimensions { width, height } = self.dimensions;
        if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
            return Err(ChartError::InvalidConfig(format!(
                "sparkline dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        Ok(())
    }
}

/// A plotted point: position in the input series and its value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SparkPoint {
    pub x: usize,
    pub y: f64,
}

/// Data domain of one axis
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Axis {
    pub min: f64,
    pub max: f64,
    /// Whether the axis line is drawn; sparklines keep both hidden
    pub visible: bool,
}

impl Axis {
    fn hidden(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            visible: false,
        }
    }

    /// Map `value` into `[start, start + length]`; a flat domain maps to the
    /// middle
    #[must_use]
    pub fn scale(&self, value: f64, start: f32, length: f32) -> f32 {
        if self.max > self.min {
            start + ((value - self.min) / (self.max - self.min)) as f32 * length
        } else {
            start + length / 2.0
        }
    }

    /// Inverse of `scale`
    #[must_use]
    pub fn invert(&self, pixel: f32, start: f32, length: f32) -> f64 {
        if self.max > self.min && length > 0.0 {
            self.min + f64::from((pixel - start) / length) * (self.max - self.min)
        } else {
            self.min
        }
    }
}

/// One cubic Bézier piece of the trend line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSegment {
    pub from: Point,
    pub control_a: Point,
    pub control_b: Point,
    pub to: Point,
}

/// Display shape of a sparkline
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SparkShape {
    pub points: Vec<SparkPoint>,
    pub x_axis: Axis,
    pub y_axis: Axis,
    /// Records dropped during normalization
    pub rejected: usize,
}

impl SparkShape {
    #[must_use]
    pub fn compute(data: &[SparkDatum]) -> Self {
        let normalized = normalize_spark(data);
        let points: Vec<SparkPoint> = normalized
            .points
            .into_iter()
            .map(|(x, y)| SparkPoint { x, y })
            .collect();

        let (x_axis, y_axis) = match (points.first(), points.last()) {
            (Some(first), Some(last)) => {
                let (low, high) = points
                    .iter()
                    .fold((f64::MAX, f64::MIN), |(lo, hi), p| (lo.min(p.y), hi.max(p.y)));
                (
                    Axis::hidden(first.x as f64, last.x as f64),
                    Axis::hidden(low, high),
                )
            }
            _ => (Axis::default(), Axis::default()),
        };

        Self {
            points,
            x_axis,
            y_axis,
            rejected: normalized.rejected,
        }
    }

    /// The drawing area inside the margins
    #[must_use]
    pub fn plot_area(size: Size) -> Rectangle {
        Rectangle {
            x: MARGIN,
            y: MARGIN,
            width: (size.width - 2.0 * MARGIN).max(0.0),
            height: (size.height - 2.0 * MARGIN).max(0.0),
        }
    }

    /// Pixel position of `point` in a canvas of `size`
    #[must_use]
    pub fn project(&self, point: SparkPoint, size: Size) -> Point {
        let area = Self::plot_area(size);
        let x = self.x_axis.scale(point.x as f64, area.x, area.width);
        // Screen y grows downward
        let y = area.y + area.height - (self.y_axis.scale(point.y, area.y, area.height) - area.y);
        Point::new(x, y)
    }

    #[must_use]
    pub fn screen_points(&self, size: Size) -> Vec<Point> {
        self.points.iter().map(|p| self.project(*p, size)).collect()
    }

    /// Trend line segments for a canvas of `size`
    #[must_use]
    pub fn segments(&self, size: Size) -> Vec<CubicSegment> {
        monotone_segments(&self.screen_points(size))
    }

    /// Line segments for the axes that are visible, x along the bottom of the
    /// plot area and y along its left edge
    #[must_use]
    pub fn axis_lines(&self, size: Size) -> Vec<(Point, Point)> {
        let area = Self::plot_area(size);
        let bottom_left = Point::new(area.x, area.y + area.height);
        let mut lines = Vec::new();
        if self.x_axis.visible {
            lines.push((bottom_left, Point::new(area.x + area.width, area.y + area.height)));
        }
        if self.y_axis.visible {
            lines.push((Point::new(area.x, area.y), bottom_left));
        }
        lines
    }

    /// Index into `points` of the point closest to `cursor` along x
    #[must_use]
    pub fn nearest(&self, size: Size, cursor: Point) -> Option<usize> {
        let area = Self::plot_area(size);
        let target = self.x_axis.invert(cursor.x, area.x, area.width);
        self.points
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                let da = (a.x as f64 - target).abs();
                let db = (b.x as f64 - target).abs();
                da.total_cmp(&db)
            })
            .map(|(index, _)| index)
    }

    /// Tooltip for `points[index]`: heading `X: <x>`, entry `Value : <y>`
    #[must_use]
    pub fn tooltip(&self, index: usize) -> Option<TooltipContent> {
        self.points.get(index).map(|point| TooltipContent {
            label: Some(format!("{}{}", TOOLTIP_LABEL_PREFIX, point.x)),
            name: TOOLTIP_VALUE_NAME.to_string(),
            value: format_value(point.y),
        })
    }
}

fn sign(value: f32) -> f32 {
    if value < 0.0 {
        -1.0
    } else {
        1.0
    }
}

/// Monotone cubic interpolation (Steffen's method) through points sorted by
/// x. Fewer than two points give no segments.
#[must_use]
pub fn monotone_segments(points: &[Point]) -> Vec<CubicSegment> {
    let n = points.len();
    if n < 2 {
        return Vec::new();
    }

    let secants: Vec<f32> = points
        .windows(2)
        .map(|w| {
            let dx = w[1].x - w[0].x;
            if dx == 0.0 {
                0.0
            } else {
                (w[1].y - w[0].y) / dx
            }
        })
        .collect();

    let mut tangents = vec![0.0_f32; n];
    if n == 2 {
        tangents[0] = secants[0];
        tangents[1] = secants[0];
    } else {
        for i in 1..n - 1 {
            let h0 = points[i].x - points[i - 1].x;
            let h1 = points[i + 1].x - points[i].x;
            let (s0, s1) = (secants[i - 1], secants[i]);
            let p = if h0 + h1 == 0.0 {
                0.0
            } else {
                (s0 * h1 + s1 * h0) / (h0 + h1)
            };
            let t = (sign(s0) + sign(s1)) * s0.abs().min(s1.abs()).min(0.5 * p.abs());
            tangents[i] = if t.is_finite() { t } else { 0.0 };
        }
        tangents[0] = (3.0 * secants[0] - tangents[1]) / 2.0;
        tangents[n - 1] = (3.0 * secants[n - 2] - tangents[n - 2]) / 2.0;
    }

    points
        .windows(2)
        .enumerate()
        .map(|(i, w)| {
            let (from, to) = (w[0], w[1]);
            let third = (to.x - from.x) / 3.0;
            CubicSegment {
                from,
                control_a: Point::new(from.x + third, from.y + third * tangents[i]),
                control_b: Point::new(to.x - third, to.y - third * tangents[i + 1]),
                to,
            }
        })
        .collect()
}

/// A sparkline slot that keeps its display shape and drawn geometry between
/// `view` calls.
///
/// The shape is recomputed only when the series allocation or the config
/// changes; the geometry cache is cleared at the same moment.
pub struct SparkLine {
    memo: Memo<(Arc<[SparkDatum]>, SparkConfig), SparkShape>,
    cache: canvas::Cache,
}

impl Default for SparkLine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SparkLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SparkLine")
            .field("hits", &self.memo.hits())
            .field("misses", &self.memo.misses())
            .finish_non_exhaustive()
    }
}

impl SparkLine {
    #[must_use]
    pub fn new() -> Self {
        Self {
            memo: Memo::new(),
            cache: canvas::Cache::new(),
        }
    }

    /// Display shape for `series` under `config`, reusing the last one when
    /// both are unchanged
    pub fn shape(&self, series: &Arc<[SparkDatum]>, config: &SparkConfig) -> Arc<SparkShape> {
        let (shape, recomputed) = self
            .memo
            .get_or_compute((Arc::clone(series), config.clone()), |(data, _)| {
                SparkShape::compute(data)
            });
        if recomputed {
            self.cache.clear();
            debug!(id = %config.id, points = shape.points.len(), "sparkline shape recomputed");
        }
        shape
    }

    /// How many times the display shape has been built
    #[must_use]
    pub fn recomputations(&self) -> u64 {
        self.memo.misses()
    }

    pub fn view<'a, Message: 'a>(
        &'a self,
        series: &Arc<[SparkDatum]>,
        config: &SparkConfig,
    ) -> Element<'a, Message> {
        if let Err(error) = config.validate() {
            return render::invalid_chart(&error);
        }
        let shape = self.shape(series, config);
        render::spark_line(shape, config.clone(), &self.cache)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(values: &[f64]) -> Vec<SparkDatum> {
        values.iter().map(|v| SparkDatum::new(*v)).collect()
    }

    #[test]
    fn test_points_take_their_position() {
        let shape = SparkShape::compute(&series(&[3.0, 1.0, 4.0]));
        assert_eq!(
            shape.points,
            vec![
                SparkPoint { x: 0, y: 3.0 },
                SparkPoint { x: 1, y: 1.0 },
                SparkPoint { x: 2, y: 4.0 },
            ]
        );
        assert_eq!((shape.x_axis.min, shape.x_axis.max), (0.0, 2.0));
        assert_eq!((shape.y_axis.min, shape.y_axis.max), (1.0, 4.0));
        assert!(!shape.x_axis.visible && !shape.y_axis.visible);
    }

    #[test]
    fn test_tooltip_text() {
        let shape = SparkShape::compute(&series(&[3.0, 1.0, 4.0]));
        let tooltip = shape.tooltip(1).unwrap();
        assert_eq!(tooltip.label.as_deref(), Some("X: 1"));
        assert_eq!(tooltip.name, "Value");
        assert_eq!(tooltip.value, "1");
        assert!(shape.tooltip(3).is_none());
    }

    #[test]
    fn test_projection_corners() {
        let shape = SparkShape::compute(&series(&[0.0, 10.0]));
        let size = Size::new(110.0, 60.0);
        let points = shape.screen_points(size);
        assert_eq!(points[0], Point::new(MARGIN, 60.0 - MARGIN));
        assert_eq!(points[1], Point::new(110.0 - MARGIN, MARGIN));
    }

    #[test]
    fn test_single_point_is_centered_without_segments() {
        let shape = SparkShape::compute(&series(&[7.0]));
        let size = Size::new(100.0, 40.0);
        assert_eq!(shape.screen_points(size), vec![Point::new(50.0, 20.0)]);
        assert!(shape.segments(size).is_empty());
    }

    #[test]
    fn test_axes_are_hidden() {
        let mut shape = SparkShape::compute(&series(&[3.0, 1.0, 4.0]));
        let size = Size::new(110.0, 60.0);
        assert!(shape.axis_lines(size).is_empty());

        shape.x_axis.visible = true;
        assert_eq!(
            shape.axis_lines(size),
            vec![(Point::new(MARGIN, 55.0), Point::new(105.0, 55.0))]
        );
    }

    #[test]
    fn test_empty_series() {
        let shape = SparkShape::compute(&[]);
        assert!(shape.points.is_empty());
        assert!(shape.segments(Size::new(100.0, 40.0)).is_empty());
        assert!(shape.nearest(Size::new(100.0, 40.0), Point::new(10.0, 10.0)).is_none());
    }

    #[test]
    fn test_nearest_point() {
        let shape = SparkShape::compute(&series(&[3.0, 1.0, 4.0]));
        let size = Size::new(210.0, 50.0);
        // Plot spans x = 5..205, points at 5, 105, 205
        assert_eq!(shape.nearest(size, Point::new(0.0, 0.0)), Some(0));
        assert_eq!(shape.nearest(size, Point::new(120.0, 0.0)), Some(1));
        assert_eq!(shape.nearest(size, Point::new(180.0, 0.0)), Some(2));
    }

    #[test]
    fn test_monotone_has_no_overshoot() {
        let points = [
            Point::new(0.0, 10.0),
            Point::new(10.0, 40.0),
            Point::new(20.0, 5.0),
            Point::new(30.0, 6.0),
            Point::new(40.0, 50.0),
        ];
        for segment in monotone_segments(&points) {
            let low = segment.from.y.min(segment.to.y) - 1e-4;
            let high = segment.from.y.max(segment.to.y) + 1e-4;
            for control in [segment.control_a, segment.control_b] {
                assert!(control.y >= low && control.y <= high, "{:?}", segment);
            }
        }
    }

    #[test]
    fn test_two_points_make_straight_line() {
        let segments = monotone_segments(&[Point::new(0.0, 0.0), Point::new(30.0, 30.0)]);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].control_a, Point::new(10.0, 10.0));
        assert_eq!(segments[0].control_b, Point::new(20.0, 20.0));
    }

    #[test]
    fn test_stroke_falls_back_to_mode() {
        let config = SparkConfig::new("cpu", Dimensions::new(100.0, 30.0));
        assert_eq!(config.stroke(), DisplayMode::Light.chart_style().default_stroke);
        let dark = config.clone().with_display_mode(DisplayMode::Dark);
        assert_eq!(dark.stroke(), DisplayMode::Dark.chart_style().default_stroke);
        let custom = config.with_stroke(Color::rgb(1, 2, 3));
        assert_eq!(custom.stroke(), Color::rgb(1, 2, 3));
    }

    #[test]
    fn test_config_validation() {
        assert!(SparkConfig::new("cpu", Dimensions::new(100.0, 30.0)).validate().is_ok());
        assert!(SparkConfig::new("cpu", Dimensions::new(0.0, 30.0)).validate().is_err());
        assert!(SparkConfig::new(" ", Dimensions::new(100.0, 30.0)).validate().is_err());
    }

    #[test]
    fn test_spark_line_memoizes_unchanged_props() {
        let line = SparkLine::new();
        let data: Arc<[SparkDatum]> = Arc::from(series(&[1.0, 2.0]));
        let config = SparkConfig::new("cpu", Dimensions::new(100.0, 30.0));

        let first = line.shape(&data, &config);
        let second = line.shape(&data, &config);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(line.recomputations(), 1);

        // New allocation with equal contents is a new input
        let copy: Arc<[SparkDatum]> = Arc::from(series(&[1.0, 2.0]));
        line.shape(&copy, &config);
        assert_eq!(line.recomputations(), 2);

        line.shape(&copy, &config.clone().with_stroke(Color::BLACK));
        assert_eq!(line.recomputations(), 3);
    }
}
