use approx::assert_relative_eq;
use chrono::DateTime;
use xychart_rs::core::{
    ChartChild, Datum, DatumValue, ScaleConfig, ScaleDomain, ScaleType, SeriesCatalog,
    SeriesDescriptor, synthesize,
};
use xychart_rs::interaction::InteractionHandlers;

fn catalog(children: Vec<ChartChild>) -> SeriesCatalog {
    SeriesCatalog::build(children, &InteractionHandlers::default())
}

fn continuous_domain(domain: ScaleDomain) -> (f64, f64) {
    match domain {
        ScaleDomain::Continuous(start, end) => (start, end),
        ScaleDomain::Categories(categories) => panic!("expected continuous domain, got {categories:?}"),
    }
}

fn points(values: &[(f64, f64)]) -> Vec<Datum> {
    values.iter().map(|&(x, y)| Datum::xy(x, y)).collect()
}

#[test]
fn synthesis_is_deterministic_for_identical_inputs() {
    let catalog = catalog(vec![
        SeriesDescriptor::standard(points(&[(1.0, 5.0), (10.0, 5.0)])).into(),
        SeriesDescriptor::bar(points(&[(2.0, 1.0), (3.0, 4.0)])).into(),
    ]);
    let x = ScaleConfig::linear().with_nice(true);
    let y = ScaleConfig::linear().with_include_zero(true);

    let first = synthesize(&catalog, &x, &y, 480.0, 280.0);
    let second = synthesize(&catalog, &x, &y, 480.0, 280.0);
    assert_eq!(first, second);
}

#[test]
fn ranged_extents_widen_the_shared_domain() {
    let catalog = catalog(vec![
        SeriesDescriptor::standard(points(&[(2.0, 1.0), (5.0, 3.0)])).into(),
        SeriesDescriptor::standard(vec![
            Datum::xy(4.0, 2.0).with_x_extent(0.0, 10.0).with_y_extent(0.0, 8.0),
        ])
        .into(),
    ]);
    let scales = synthesize(&catalog, &ScaleConfig::linear(), &ScaleConfig::linear(), 100.0, 100.0);

    assert_eq!(continuous_domain(scales.x.domain()), (0.0, 10.0));
    assert_eq!(continuous_domain(scales.y.domain()), (0.0, 8.0));
}

#[test]
fn series_without_mouse_events_still_contribute_to_domains() {
    let catalog = catalog(vec![
        SeriesDescriptor::standard(points(&[(0.0, 0.0), (1.0, 1.0)])).into(),
        SeriesDescriptor::standard(points(&[(50.0, 20.0)]))
            .with_mouse_events_disabled(true)
            .into(),
    ]);
    let scales = synthesize(&catalog, &ScaleConfig::linear(), &ScaleConfig::linear(), 100.0, 100.0);

    assert_eq!(continuous_domain(scales.x.domain()), (0.0, 50.0));
    assert_eq!(continuous_domain(scales.y.domain()), (0.0, 20.0));
}

#[test]
fn bar_series_on_linear_axis_gets_band_offset() {
    let catalog = catalog(vec![
        SeriesDescriptor::bar(points(&[(0.0, 1.0), (1.0, 2.0), (2.0, 3.0)])).into(),
    ]);
    let scales = synthesize(&catalog, &ScaleConfig::linear(), &ScaleConfig::linear(), 100.0, 100.0);

    assert_eq!(scales.x.bar_width(), Some(20.0));
    assert_eq!(scales.x.offset(), Some(10.0));
    assert_eq!(scales.x.range(), (10.0, 90.0));
    assert_eq!(scales.x.bandwidth(), None);
    assert_relative_eq!(
        scales.x.map_value(&DatumValue::Number(1.0)).expect("mapped"),
        50.0
    );
}

#[test]
fn bar_series_on_band_axis_keeps_native_bandwidth() {
    let catalog = catalog(vec![
        SeriesDescriptor::bar(vec![Datum::new("a", 1.0), Datum::new("b", 2.0)]).into(),
    ]);
    let scales = synthesize(&catalog, &ScaleConfig::band(), &ScaleConfig::linear(), 100.0, 100.0);

    assert_eq!(scales.x.scale_type(), ScaleType::Band);
    assert_eq!(scales.x.bandwidth(), Some(50.0));
    assert_eq!(scales.x.bar_width(), None);
    assert_eq!(scales.x.offset(), None);
}

#[test]
fn last_bar_series_overwrites_offset() {
    let catalog = catalog(vec![
        SeriesDescriptor::bar(points(&[(0.0, 1.0), (1.0, 2.0), (2.0, 3.0)])).into(),
        SeriesDescriptor::bar(points(&[(1.0, 4.0)])).into(),
    ]);
    let scales = synthesize(&catalog, &ScaleConfig::linear(), &ScaleConfig::linear(), 100.0, 100.0);

    assert_eq!(scales.x.bar_width(), Some(33.0));
    assert_eq!(scales.x.offset(), Some(16.5));
    assert_eq!(scales.x.range(), (16.5, 83.5));
}

#[test]
fn circle_pack_centers_y_domain_on_zero() {
    let catalog = catalog(vec![
        SeriesDescriptor::circle_pack(points(&[(0.0, 500.0), (10.0, 900.0)])).into(),
    ]);
    let scales = synthesize(&catalog, &ScaleConfig::linear(), &ScaleConfig::linear(), 300.0, 200.0);

    assert_eq!(continuous_domain(scales.y.domain()), (-100.0, 100.0));
    assert_relative_eq!(
        scales.y.map_value(&DatumValue::Number(0.0)).expect("mapped"),
        100.0
    );
}

#[test]
fn circle_pack_turns_categorical_y_axis_linear() {
    let catalog = catalog(vec![
        SeriesDescriptor::circle_pack(vec![Datum::new(1.0, "low"), Datum::new(2.0, "high")]).into(),
    ]);
    let scales = synthesize(&catalog, &ScaleConfig::linear(), &ScaleConfig::band(), 300.0, 50.0);

    assert_eq!(scales.y.scale_type(), ScaleType::Linear);
    assert!(scales.y.bandwidth().is_none());
    assert_eq!(continuous_domain(scales.y.domain()), (-25.0, 25.0));
}

#[test]
fn unknown_scale_type_is_laid_out_as_linear() {
    let config: ScaleConfig = serde_json::from_str(r#"{"type":"symlog"}"#).expect("parse");
    assert_eq!(config.scale_type, ScaleType::Other);

    let catalog = catalog(vec![
        SeriesDescriptor::standard(points(&[(0.0, 0.0), (10.0, 10.0)])).into(),
    ]);
    let scales = synthesize(&catalog, &config, &ScaleConfig::linear(), 100.0, 100.0);

    assert!(scales.x.is_invertible());
    assert_relative_eq!(
        scales.x.map_value(&DatumValue::Number(5.0)).expect("mapped"),
        50.0
    );
}

#[test]
fn include_zero_and_nice_extend_data_domain() {
    let catalog = catalog(vec![
        SeriesDescriptor::standard(points(&[(3.0, 12.0), (97.0, 87.0)])).into(),
    ]);
    let y = ScaleConfig::linear().with_include_zero(true).with_nice(true);
    let scales = synthesize(&catalog, &ScaleConfig::linear(), &y, 100.0, 100.0);

    assert_eq!(continuous_domain(scales.x.domain()), (3.0, 97.0));
    assert_eq!(continuous_domain(scales.y.domain()), (0.0, 90.0));
}

#[test]
fn explicit_domain_and_range_override_derived_values() {
    let catalog = catalog(vec![
        SeriesDescriptor::standard(points(&[(3.0, 12.0), (97.0, 87.0)])).into(),
    ]);
    let x = ScaleConfig::linear().with_domain(-10.0, 10.0).with_range(20.0, 40.0);
    let scales = synthesize(&catalog, &x, &ScaleConfig::linear(), 100.0, 100.0);

    assert_eq!(continuous_domain(scales.x.domain()), (-10.0, 10.0));
    assert_eq!(scales.x.range(), (20.0, 40.0));
    assert_eq!(scales.y.range(), (100.0, 0.0));
}

#[test]
fn band_domain_collects_categories_in_first_seen_order() {
    let catalog = catalog(vec![
        SeriesDescriptor::standard(vec![Datum::new("b", 1.0), Datum::new("a", 2.0)]).into(),
        SeriesDescriptor::standard(vec![Datum::new("c", 1.0), Datum::new("a", 3.0)]).into(),
    ]);
    let scales = synthesize(&catalog, &ScaleConfig::band(), &ScaleConfig::linear(), 300.0, 100.0);

    assert_eq!(
        scales.x.domain(),
        ScaleDomain::Categories(vec!["b".to_owned(), "a".to_owned(), "c".to_owned()])
    );
    assert_eq!(scales.x.map_value(&DatumValue::from("a")), Some(100.0));
}

#[test]
fn band_domain_includes_ranged_bounds() {
    let catalog = catalog(vec![
        SeriesDescriptor::standard(vec![
            Datum::xy(1.0, 4.0).with_x_extent(0.0, 2.0),
            Datum::xy(3.0, 6.0).with_x_extent(2.0, 4.0),
        ])
        .into(),
        SeriesDescriptor::standard(vec![Datum::xy(5.0, 1.0)]).into(),
    ]);
    let scales = synthesize(&catalog, &ScaleConfig::band(), &ScaleConfig::linear(), 600.0, 100.0);

    let expected: Vec<String> = ["0", "1", "2", "3", "4", "5"].map(String::from).to_vec();
    assert_eq!(scales.x.domain(), ScaleDomain::Categories(expected));
    assert_eq!(scales.x.map_value(&DatumValue::Number(0.0)), Some(0.0));
}

#[test]
fn ordinal_axis_places_points_without_bandwidth() {
    let catalog = catalog(vec![
        SeriesDescriptor::standard(vec![
            Datum::new("a", 1.0),
            Datum::new("b", 2.0),
            Datum::new("c", 3.0),
        ])
        .into(),
    ]);
    let scales = synthesize(&catalog, &ScaleConfig::ordinal(), &ScaleConfig::linear(), 200.0, 100.0);

    assert_eq!(scales.x.bandwidth(), None);
    assert_eq!(scales.x.map_value(&DatumValue::from("a")), Some(0.0));
    assert_eq!(scales.x.map_value(&DatumValue::from("c")), Some(200.0));
}

#[test]
fn time_axis_uses_epoch_millisecond_domain() {
    let start = DateTime::from_timestamp_millis(1_000).expect("valid time");
    let end = DateTime::from_timestamp_millis(3_000).expect("valid time");
    let catalog = catalog(vec![
        SeriesDescriptor::standard(vec![Datum::new(start, 1.0), Datum::new(end, 2.0)]).into(),
    ]);
    let scales = synthesize(&catalog, &ScaleConfig::time(), &ScaleConfig::linear(), 100.0, 100.0);

    assert_eq!(scales.x.scale_type(), ScaleType::Time);
    assert_eq!(continuous_domain(scales.x.domain()), (1_000.0, 3_000.0));
    assert_relative_eq!(
        scales
            .x
            .map_value(&DatumValue::from(DateTime::from_timestamp_millis(2_000).expect("valid time")))
            .expect("mapped"),
        50.0
    );
    assert_eq!(
        scales.x.invert_value(50.0),
        Some(DatumValue::Time(
            DateTime::from_timestamp_millis(2_000).expect("valid time")
        ))
    );
}

#[test]
fn empty_catalog_yields_unprojectable_scales() {
    let scales = synthesize(
        &catalog(Vec::new()),
        &ScaleConfig::linear(),
        &ScaleConfig::linear(),
        100.0,
        100.0,
    );
    let (start, end) = continuous_domain(scales.x.domain());
    assert!(start.is_nan() && end.is_nan());
    assert_eq!(scales.x.map_value(&DatumValue::Number(1.0)), None);
}
