//! Canvas programs and element builders for the charts
//!
//! The adapters in `ring` and `spark` produce display shapes; this module
//! turns them into iced canvas geometry. Hover state is never stored: the
//! hovered slice or point is recomputed from the cursor on each draw.

use std::f32::consts::PI;
use std::sync::Arc;

use iced::alignment::{Horizontal, Vertical};
use iced::mouse;
use iced::widget::canvas::{Cache, Frame, Path, Stroke, Text};
use iced::widget::{canvas, column, container, row, text, Row, Space};
use iced::{Alignment, Element, Length, Point, Rectangle, Renderer, Size, Theme};
use tracing::warn;

use crate::error::ChartError;
use crate::ring::{LegendEntry, RingChart, RingConfig, RingGeometry, RingLayout};
use crate::series::RingDatum;
use crate::spark::{SparkConfig, SparkShape, ACTIVE_DOT_RADIUS, DOT_RADIUS, STROKE_WIDTH};
use crate::theme::ChartStyle;
use crate::tooltip::TooltipContent;

const TOOLTIP_FONT_SIZE: f32 = 12.0;
const TOOLTIP_LINE_HEIGHT: f32 = 16.0;
const TOOLTIP_PADDING: f32 = 6.0;
const TOOLTIP_OFFSET: f32 = 12.0;

/// Placeholder shown in place of a chart whose config was rejected
pub fn invalid_chart<'a, Message: 'a>(error: &ChartError) -> Element<'a, Message> {
    warn!(%error, "chart not rendered");
    text(format!("Chart unavailable: {}", error)).size(12).into()
}

/// Ring chart with an optional legend row underneath.
///
/// The legend is a separate widget, so showing it never changes the ring's
/// canvas size or slice geometry.
pub fn ring_chart<'a, Message: 'a>(data: &[RingDatum], config: &RingConfig) -> Element<'a, Message> {
    match RingChart::new(data, config.clone()) {
        Ok(chart) => ring_element(chart),
        Err(error) => invalid_chart(&error),
    }
}

/// Everything the ring element is built from
#[derive(Debug)]
struct RingView {
    program: RingChartProgram,
    legend: Option<Vec<LegendEntry>>,
    width: Length,
    height: f32,
}

impl From<RingChart> for RingView {
    fn from(chart: RingChart) -> Self {
        let legend = chart.legend();
        let RingChart { config, layout } = chart;
        Self {
            program: RingChartProgram {
                layout,
                style: config.display_mode.chart_style(),
            },
            legend,
            width: config.width.map_or(Length::Fill, Length::Fixed),
            height: config.height,
        }
    }
}

fn ring_element<'a, Message: 'a>(chart: RingChart) -> Element<'a, Message> {
    let RingView {
        program,
        legend,
        width,
        height,
    } = RingView::from(chart);
    let style = program.style;

    let ring = canvas(program).width(width).height(Length::Fixed(height));

    match legend {
        Some(entries) => column![ring, legend_row(entries, style)]
            .spacing(8)
            .align_x(Alignment::Center)
            .into(),
        None => ring.into(),
    }
}

fn legend_row<'a, Message: 'a>(entries: Vec<LegendEntry>, style: ChartStyle) -> Element<'a, Message> {
    let items = entries.into_iter().map(|entry| -> Element<'a, Message> {
        let color = entry.color.to_iced();
        let swatch = container(Space::new().width(10).height(10)).style(move |_theme: &Theme| {
            container::Style {
                background: Some(color.into()),
                ..Default::default()
            }
        });
        row![swatch, text(entry.label).size(12).color(style.text.to_iced())]
            .spacing(4)
            .align_y(Alignment::Center)
            .into()
    });
    Row::with_children(items).spacing(12).into()
}

/// Sparkline canvas drawing `shape` with the geometry kept in `cache`
pub fn spark_line<'a, Message: 'a>(
    shape: Arc<SparkShape>,
    config: SparkConfig,
    cache: &'a Cache,
) -> Element<'a, Message> {
    let (width, height) = (config.dimensions.width, config.dimensions.height);
    canvas(SparkLineProgram { shape, config, cache })
        .width(Length::Fixed(width))
        .height(Length::Fixed(height))
        .into()
}

/// Request a redraw whenever the cursor moves so the hover overlay follows it
fn hover_action<Message>(event: &canvas::Event) -> Option<canvas::Action<Message>> {
    match event {
        canvas::Event::Mouse(mouse::Event::CursorMoved { .. } | mouse::Event::CursorLeft) => {
            Some(canvas::Action::request_redraw())
        }
        _ => None,
    }
}

/// Canvas program for the ring chart
#[derive(Debug)]
struct RingChartProgram {
    layout: RingLayout,
    style: ChartStyle,
}

impl<Message> canvas::Program<Message> for RingChartProgram {
    type State = ();

    fn update(
        &self,
        _state: &mut Self::State,
        event: &canvas::Event,
        _bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Option<canvas::Action<Message>> {
        hover_action(event)
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let geometry = RingGeometry::fit(bounds.size());

        if self.layout.total <= 0.0 {
            // Empty ring: the band outline only
            let muted = self.style.muted.to_iced();
            for radius in [geometry.inner_radius, geometry.outer_radius] {
                frame.stroke(
                    &Path::circle(geometry.center, radius),
                    Stroke::default().with_color(muted).with_width(1.0),
                );
            }
            return vec![frame.into_geometry()];
        }

        for slice in self.layout.slices.iter().filter(|s| s.sweep_angle > 0.0) {
            let start = slice.start_angle as f32;
            let sweep = slice.sweep_angle as f32;
            let path = band_path(&geometry, start, sweep);
            frame.fill(&path, slice.color.to_iced());
        }

        if let Some(position) = cursor.position_in(bounds) {
            if let Some(slice) = self.layout.hit_test(&geometry, position) {
                draw_tooltip(&mut frame, position, &slice.tooltip(), &self.style);
            }
        }

        vec![frame.into_geometry()]
    }
}

/// Closed outline of one slice of the band
fn band_path(geometry: &RingGeometry, start: f32, sweep: f32) -> Path {
    let RingGeometry {
        center,
        inner_radius,
        outer_radius,
    } = *geometry;
    let end = start + sweep;

    Path::new(|builder| {
        builder.move_to(Point::new(
            center.x + outer_radius * start.cos(),
            center.y + outer_radius * start.sin(),
        ));
        builder.draw_arc(center, outer_radius, start, sweep);
        builder.line_to(Point::new(
            center.x + inner_radius * end.cos(),
            center.y + inner_radius * end.sin(),
        ));
        builder.draw_arc(center, inner_radius, end, -sweep);
        builder.close();
    })
}

/// Canvas program for a sparkline
struct SparkLineProgram<'a> {
    shape: Arc<SparkShape>,
    config: SparkConfig,
    cache: &'a Cache,
}

impl<Message> canvas::Program<Message> for SparkLineProgram<'_> {
    type State = ();

    fn update(
        &self,
        _state: &mut Self::State,
        event: &canvas::Event,
        _bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Option<canvas::Action<Message>> {
        hover_action(event)
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let stroke = self.config.stroke().to_iced();
        let shape = &self.shape;

        let line = self.cache.draw(renderer, bounds.size(), |frame| {
            let segments = shape.segments(frame.size());
            if let Some(first) = segments.first() {
                let path = Path::new(|builder| {
                    builder.move_to(first.from);
                    for segment in &segments {
                        builder.bezier_curve_to(segment.control_a, segment.control_b, segment.to);
                    }
                });
                frame.stroke(&path, Stroke::default().with_color(stroke).with_width(STROKE_WIDTH));
            }
            if shape.x_axis.visible || shape.y_axis.visible {
                let muted = self.config.display_mode.chart_style().muted.to_iced();
                for (from, to) in shape.axis_lines(frame.size()) {
                    frame.stroke(
                        &Path::line(from, to),
                        Stroke::default().with_color(muted).with_width(1.0),
                    );
                }
            }
            for point in shape.screen_points(frame.size()) {
                frame.fill(&Path::circle(point, DOT_RADIUS), stroke);
            }
        });

        let mut layers = vec![line];

        let hovered = cursor
            .position_in(bounds)
            .and_then(|position| shape.nearest(bounds.size(), position));
        if let Some(index) = hovered {
            let mut overlay = Frame::new(renderer, bounds.size());
            let point = shape.project(shape.points[index], bounds.size());
            overlay.fill(&Path::circle(point, ACTIVE_DOT_RADIUS), stroke);
            if let Some(tooltip) = shape.tooltip(index) {
                let style = self.config.display_mode.chart_style();
                draw_tooltip(&mut overlay, point, &tooltip, &style);
            }
            layers.push(overlay.into_geometry());
        }

        layers
    }
}

/// Draw a tooltip box near `anchor`, kept inside the frame
fn draw_tooltip(frame: &mut Frame, anchor: Point, content: &TooltipContent, style: &ChartStyle) {
    let lines = content.lines();
    let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    // Rough glyph width; canvas text cannot be measured up front
    let width = longest as f32 * TOOLTIP_FONT_SIZE * 0.6 + TOOLTIP_PADDING * 2.0;
    let height = lines.len() as f32 * TOOLTIP_LINE_HEIGHT + TOOLTIP_PADDING * 2.0;

    let bounds = frame.size();
    let x = (anchor.x + TOOLTIP_OFFSET).min(bounds.width - width).max(0.0);
    let y = (anchor.y + TOOLTIP_OFFSET).min(bounds.height - height).max(0.0);

    let background = Path::rectangle(Point::new(x, y), Size::new(width, height));
    frame.fill(&background, style.tooltip_background.to_iced());
    frame.stroke(
        &background,
        Stroke::default()
            .with_color(style.tooltip_border.to_iced())
            .with_width(1.0),
    );

    for (i, line) in lines.into_iter().enumerate() {
        frame.fill_text(Text {
            content: line,
            position: Point::new(
                x + TOOLTIP_PADDING,
                y + TOOLTIP_PADDING + i as f32 * TOOLTIP_LINE_HEIGHT,
            ),
            color: style.text.to_iced(),
            size: TOOLTIP_FONT_SIZE.into(),
            align_x: Horizontal::Left.into(),
            align_y: Vertical::Top.into(),
            ..Text::default()
        });
    }
}

/// Arc drawing in the canvas path builder
trait PathBuilderExt {
    fn draw_arc(&mut self, center: Point, radius: f32, start_angle: f32, sweep_angle: f32);
}

impl PathBuilderExt for canvas::path::Builder {
    fn draw_arc(&mut self, center: Point, radius: f32, start_angle: f32, sweep_angle: f32) {
        // Cubic Bézier pieces of at most a quarter turn each
        let num_segments = ((sweep_angle.abs() / (PI / 2.0)).ceil() as usize).max(1);
        let segment_angle = sweep_angle / num_segments as f32;
        let k = 4.0 / 3.0 * (segment_angle / 4.0).tan();

        for i in 0..num_segments {
            let a1 = start_angle + segment_angle * i as f32;
            let a2 = a1 + segment_angle;

            let p1 = Point::new(center.x + radius * a1.cos(), center.y + radius * a1.sin());
            let p2 = Point::new(center.x + radius * a2.cos(), center.y + radius * a2.sin());
            let c1 = Point::new(p1.x - k * radius * a1.sin(), p1.y + k * radius * a1.cos());
            let c2 = Point::new(p2.x + k * radius * a2.sin(), p2.y - k * radius * a2.cos());

            self.bezier_curve_to(c1, c2, p2);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sales() -> Vec<RingDatum> {
        vec![
            RingDatum::new("North", 4.0),
            RingDatum::new("South", 2.0),
            RingDatum::new("East", 1.0),
        ]
    }

    #[test]
    fn test_ring_view_legend_follows_flag() {
        let hidden = RingChart::new(&sales(), RingConfig::new("sales", 200.0)).unwrap();
        assert!(RingView::from(hidden).legend.is_none());

        let shown = RingChart::new(&sales(), RingConfig::new("sales", 200.0).with_legend(true)).unwrap();
        let expected = shown.legend();
        let view = RingView::from(shown);
        assert_eq!(view.legend, expected);
        assert_eq!(view.legend.map(|entries| entries.len()), Some(3));
    }

    #[test]
    fn test_ring_view_size_and_style() {
        let config = RingConfig::new("sales", 180.0)
            .with_width(240.0)
            .with_display_mode(crate::theme::DisplayMode::Dark);
        let view = RingView::from(RingChart::new(&sales(), config).unwrap());
        assert_eq!(view.width, Length::Fixed(240.0));
        assert_eq!(view.height, 180.0);
        assert_eq!(view.program.style, ChartStyle::DARK);
        assert_eq!(view.program.layout.slices.len(), 3);
    }
}
