//! Behavioural properties of the ring and sparkline adapters

use std::f64::consts::TAU;
use std::sync::Arc;

use meridian_charts::{
    Dimensions, Palette, RingChart, RingConfig, RingDatum, RingLayout, SparkConfig, SparkDatum,
    SparkLine, SparkShape, RING_COLORS,
};
use proptest::prelude::*;

fn ring_data(values: &[f64]) -> Vec<RingDatum> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| RingDatum::new(format!("L{}", i), *v))
        .collect()
}

fn spark_data(values: &[f64]) -> Vec<SparkDatum> {
    values.iter().map(|v| SparkDatum::new(*v)).collect()
}

proptest! {
    #[test]
    fn prop_slice_colors_cycle_by_index(values in prop::collection::vec(0.0f64..1000.0, 1..40)) {
        let layout = RingLayout::compute(&ring_data(&values), &Palette::ring());
        prop_assert_eq!(layout.slices.len(), values.len());
        for (i, slice) in layout.slices.iter().enumerate() {
            prop_assert_eq!(slice.color, RING_COLORS[i % 4]);
        }
    }

    #[test]
    fn prop_equal_values_split_evenly(value in 0.001f64..1e6, count in 1usize..30) {
        let layout = RingLayout::compute(&ring_data(&vec![value; count]), &Palette::ring());
        let expected = TAU / count as f64;
        let mut total = 0.0;
        for slice in &layout.slices {
            prop_assert!((slice.sweep_angle - expected).abs() < 1e-9);
            total += slice.sweep_angle;
        }
        prop_assert!((total - TAU).abs() < 1e-9);
    }

    #[test]
    fn prop_spark_x_is_position(values in prop::collection::vec(-1e6f64..1e6, 0..50)) {
        let shape = SparkShape::compute(&spark_data(&values));
        prop_assert_eq!(shape.points.len(), values.len());
        for (i, point) in shape.points.iter().enumerate() {
            prop_assert_eq!(point.x, i);
            prop_assert_eq!(point.y, values[i]);
        }
    }

    #[test]
    fn prop_layouts_are_deterministic(values in prop::collection::vec(0.0f64..100.0, 0..20)) {
        let data = ring_data(&values);
        prop_assert_eq!(
            RingLayout::compute(&data, &Palette::ring()),
            RingLayout::compute(&data, &Palette::ring())
        );
        let sparks = spark_data(&values);
        prop_assert_eq!(SparkShape::compute(&sparks), SparkShape::compute(&sparks));
    }
}

#[test]
fn test_reordering_recolors_by_position() {
    let forward = RingLayout::compute(
        &[RingDatum::new("A", 1.0), RingDatum::new("B", 2.0)],
        &Palette::ring(),
    );
    let reversed = RingLayout::compute(
        &[RingDatum::new("B", 2.0), RingDatum::new("A", 1.0)],
        &Palette::ring(),
    );
    assert_eq!(forward.slices[0].color, reversed.slices[0].color);
    assert_ne!(forward.slices[0].label, reversed.slices[0].label);
}

#[test]
fn test_empty_inputs_render_nothing() {
    let ring = RingChart::new(&[], RingConfig::new("empty", 120.0).with_legend(true)).unwrap();
    assert!(ring.layout.slices.is_empty());
    assert_eq!(ring.legend(), Some(Vec::new()));

    let line = SparkLine::new();
    let data: Arc<[SparkDatum]> = Arc::from(Vec::new());
    let shape = line.shape(&data, &SparkConfig::new("empty", Dimensions::new(100.0, 30.0)));
    assert!(shape.points.is_empty());
}

#[test]
fn test_legend_toggle_keeps_slices() {
    let data = ring_data(&[4.0, 1.0, 3.0, 2.0, 5.0]);
    let without = RingChart::new(&data, RingConfig::new("r", 200.0)).unwrap();
    let with = RingChart::new(&data, RingConfig::new("r", 200.0).with_legend(true)).unwrap();

    assert!(without.legend().is_none());
    let legend = with.legend().unwrap();
    assert_eq!(legend.len(), 5);
    assert_eq!(without.layout.slices, with.layout.slices);
    for (entry, slice) in legend.iter().zip(&with.layout.slices) {
        assert_eq!(entry.color, slice.color);
    }
}

#[test]
fn test_five_equal_slices_scenario() {
    let data: Vec<RingDatum> = ["A", "B", "C", "D", "E"]
        .iter()
        .map(|l| RingDatum::new(*l, 1.0))
        .collect();
    let layout = RingLayout::compute(&data, &Palette::ring());

    let degrees: Vec<f64> = layout.slices.iter().map(|s| s.sweep_degrees()).collect();
    assert!(degrees.iter().all(|d| (d - 72.0).abs() < 1e-9));
    let colors: Vec<_> = layout.slices.iter().map(|s| s.color).collect();
    assert_eq!(
        colors,
        [RING_COLORS[0], RING_COLORS[1], RING_COLORS[2], RING_COLORS[3], RING_COLORS[0]]
    );
}

#[test]
fn test_three_point_sparkline_scenario() {
    let shape = SparkShape::compute(&spark_data(&[3.0, 1.0, 4.0]));
    let xs: Vec<usize> = shape.points.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = shape.points.iter().map(|p| p.y).collect();
    assert_eq!(xs, [0, 1, 2]);
    assert_eq!(ys, [3.0, 1.0, 4.0]);

    let tooltip = shape.tooltip(1).unwrap();
    assert_eq!(tooltip.value, "1");
    assert_eq!(tooltip.label.as_deref(), Some("X: 1"));
    assert_eq!(tooltip.lines(), ["X: 1", "Value : 1"]);
}

#[test]
fn test_rejected_records_are_counted() {
    let layout = RingLayout::compute(
        &[RingDatum::new("A", f64::NAN), RingDatum::new("B", 2.0)],
        &Palette::ring(),
    );
    assert_eq!(layout.rejected, 1);
    assert_eq!(layout.slices.len(), 1);
    assert_eq!(layout.slices[0].color, RING_COLORS[0]);
    assert!((layout.slices[0].sweep_angle - TAU).abs() < 1e-12);
}
