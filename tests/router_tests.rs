use xychart_rs::core::{
    ChartChild, Datum, DatumValue, ScaleConfig, ScaleSet, ScreenPoint, SeriesCatalog,
    SeriesDescriptor, SeriesKey, synthesize,
};
use xychart_rs::interaction::{InteractionHandlers, find_closest_datum, find_closest_datums};

fn catalog(children: Vec<ChartChild>) -> SeriesCatalog {
    SeriesCatalog::build(children, &InteractionHandlers::default())
}

fn linear_scales(catalog: &SeriesCatalog, width: f64, height: f64) -> ScaleSet {
    synthesize(catalog, &ScaleConfig::linear(), &ScaleConfig::linear(), width, height)
}

fn two_series_catalog() -> SeriesCatalog {
    catalog(vec![
        SeriesDescriptor::standard(vec![Datum::xy(1.0, 5.0), Datum::xy(10.0, 5.0)])
            .with_label("A")
            .into(),
        SeriesDescriptor::standard(vec![Datum::xy(2.0, 1.0)])
            .with_label("B")
            .into(),
    ])
}

#[test]
fn each_series_matches_its_nearest_x_and_winner_follows_y_distance() {
    let catalog = two_series_catalog();
    let scales = linear_scales(&catalog, 900.0, 400.0);
    let pointer_x = scales.x.map_value(&DatumValue::Number(1.5)).expect("mapped");
    assert_eq!(pointer_x, 50.0);

    let near_top = find_closest_datums(&catalog, ScreenPoint::new(pointer_x, 10.0), &scales)
        .expect("matched");
    assert_eq!(near_top.per_series_matches.len(), 2);
    assert_eq!(
        near_top.per_series_matches.get(&SeriesKey::from("A")),
        Some(&Datum::xy(1.0, 5.0))
    );
    assert_eq!(
        near_top.per_series_matches.get(&SeriesKey::from("B")),
        Some(&Datum::xy(2.0, 1.0))
    );
    assert_eq!(near_top.closest_series, SeriesKey::from("A"));
    assert_eq!(near_top.closest_datum, Datum::xy(1.0, 5.0));

    let near_bottom = find_closest_datums(&catalog, ScreenPoint::new(pointer_x, 390.0), &scales)
        .expect("matched");
    assert_eq!(near_bottom.closest_series, SeriesKey::from("B"));
    assert_eq!(near_bottom.closest_datum, Datum::xy(2.0, 1.0));
}

#[test]
fn per_series_matches_keep_declaration_order() {
    let catalog = two_series_catalog();
    let scales = linear_scales(&catalog, 900.0, 400.0);
    let result = find_closest_datums(&catalog, ScreenPoint::new(50.0, 390.0), &scales)
        .expect("matched");
    let keys: Vec<_> = result.per_series_matches.keys().map(SeriesKey::as_str).collect();
    assert_eq!(keys, vec!["A", "B"]);
}

#[test]
fn equidistant_data_resolve_to_first_in_order() {
    let series = SeriesDescriptor::standard(vec![Datum::xy(0.0, 0.0), Datum::xy(2.0, 0.0)]);
    let catalog = catalog(vec![series.clone().into()]);
    let scales = linear_scales(&catalog, 200.0, 100.0);

    assert_eq!(find_closest_datum(&series, 100.0, &scales.x), Some(0));
    assert_eq!(find_closest_datum(&series, 101.0, &scales.x), Some(1));
}

#[test]
fn equal_y_distance_keeps_earlier_series() {
    let catalog = catalog(vec![
        SeriesDescriptor::standard(vec![Datum::xy(0.0, 0.0), Datum::xy(4.0, 10.0)])
            .with_label("first")
            .into(),
        SeriesDescriptor::standard(vec![Datum::xy(0.0, 10.0), Datum::xy(4.0, 0.0)])
            .with_label("second")
            .into(),
    ]);
    let scales = linear_scales(&catalog, 100.0, 100.0);
    let result = find_closest_datums(&catalog, ScreenPoint::new(0.0, 50.0), &scales)
        .expect("matched");
    assert_eq!(result.closest_series, SeriesKey::from("first"));
}

#[test]
fn band_axis_compares_pointer_shifted_by_half_band() {
    let series = SeriesDescriptor::bar(vec![
        Datum::new("a", 1.0),
        Datum::new("b", 2.0),
        Datum::new("c", 3.0),
    ]);
    let catalog = catalog(vec![series.clone().into()]);
    let scales = synthesize(&catalog, &ScaleConfig::band(), &ScaleConfig::linear(), 300.0, 100.0);
    assert_eq!(scales.x.bandwidth(), Some(100.0));

    // Inside band "b" but nearer to the start of "c".
    assert_eq!(find_closest_datum(&series, 160.0, &scales.x), Some(1));
    assert_eq!(find_closest_datum(&series, 20.0, &scales.x), Some(0));
    assert_eq!(find_closest_datum(&series, 299.0, &scales.x), Some(2));
}

#[test]
fn data_without_x_are_skipped() {
    let missing = Datum {
        y: Some(DatumValue::Number(1.0)),
        ..Datum::default()
    };
    let series = SeriesDescriptor::standard(vec![missing, Datum::xy(8.0, 1.0)]);
    let catalog = catalog(vec![
        SeriesDescriptor::standard(vec![Datum::xy(0.0, 0.0)]).into(),
        series.clone().into(),
    ]);
    let scales = linear_scales(&catalog, 100.0, 100.0);

    assert_eq!(find_closest_datum(&series, 0.0, &scales.x), Some(1));
}

#[test]
fn series_without_mouse_events_are_not_routed() {
    let catalog = catalog(vec![
        SeriesDescriptor::standard(vec![Datum::xy(0.0, 0.0)])
            .with_label("quiet")
            .with_mouse_events_disabled(true)
            .into(),
        SeriesDescriptor::standard(vec![Datum::xy(10.0, 10.0)])
            .with_label("loud")
            .into(),
    ]);
    let scales = linear_scales(&catalog, 100.0, 100.0);
    let result = find_closest_datums(&catalog, ScreenPoint::new(0.0, 100.0), &scales)
        .expect("matched");

    assert_eq!(result.per_series_matches.len(), 1);
    assert_eq!(result.closest_series, SeriesKey::from("loud"));
}

#[test]
fn no_interactive_data_yields_no_result() {
    let catalog = catalog(vec![SeriesDescriptor::standard(Vec::new()).into()]);
    let scales = linear_scales(&catalog, 100.0, 100.0);
    assert!(find_closest_datums(&catalog, ScreenPoint::new(10.0, 10.0), &scales).is_none());
}

#[test]
fn custom_accessors_drive_matching() {
    let series = SeriesDescriptor::standard(vec![
        Datum::default().with_field("t", serde_json::json!(3.0)),
        Datum::default().with_field("t", serde_json::json!(7.0)),
    ])
    .with_x_accessor(|datum| {
        datum
            .extra
            .get("t")
            .and_then(serde_json::Value::as_f64)
            .map(DatumValue::Number)
    })
    .with_y_accessor(|_| Some(DatumValue::Number(0.0)));
    let catalog = catalog(vec![series.clone().into()]);
    let scales = linear_scales(&catalog, 100.0, 100.0);

    assert_eq!(find_closest_datum(&series, 90.0, &scales.x), Some(1));
}
