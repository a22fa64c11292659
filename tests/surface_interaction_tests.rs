use std::sync::{Arc, Mutex};

use xychart_rs::api::{ChartConfig, ChartSurface};
use xychart_rs::core::{ChartChild, Datum, MarginConfig, ScreenPoint, SeriesDescriptor, SeriesKey};
use xychart_rs::interaction::{InteractionEvent, InteractionHandlers, PointerEvent};
use xychart_rs::render::NullRenderer;

type Log = Arc<Mutex<Vec<String>>>;

fn log() -> Log {
    Arc::new(Mutex::new(Vec::new()))
}

fn entries(log: &Log) -> Vec<String> {
    log.lock().expect("log lock").clone()
}

fn config() -> ChartConfig {
    ChartConfig::new(900.0, 400.0).with_margin(MarginConfig::uniform(0.0))
}

fn surface_with(children: Vec<ChartChild>) -> ChartSurface<NullRenderer> {
    let mut surface = ChartSurface::new(NullRenderer::default(), config()).expect("surface init");
    surface.set_children(children);
    surface
}

fn default_handlers(log: &Log) -> InteractionHandlers {
    let on_move = Arc::clone(log);
    let on_leave = Arc::clone(log);
    let on_click = Arc::clone(log);
    InteractionHandlers::default()
        .with_on_mouse_move(move |event: &InteractionEvent| {
            on_move
                .lock()
                .expect("log lock")
                .push(format!("default-move:{}", event.series.len()));
        })
        .with_on_mouse_leave(move || {
            on_leave
                .lock()
                .expect("log lock")
                .push("default-leave".to_owned());
        })
        .with_on_click(move |event| {
            let hit = event.interaction.is_some();
            on_click.lock().expect("log lock").push(format!("default-click:{hit}"));
        })
}

fn series_pair(log: &Log) -> Vec<ChartChild> {
    let own_move = Arc::clone(log);
    let own_leave = Arc::clone(log);
    vec![
        SeriesDescriptor::standard(vec![Datum::xy(1.0, 5.0), Datum::xy(10.0, 5.0)])
            .with_label("A")
            .with_on_mouse_move(Arc::new(move |_: &InteractionEvent| {
                own_move.lock().expect("log lock").push("a-move".to_owned());
            }))
            .with_on_mouse_leave(Arc::new(move || {
                own_leave.lock().expect("log lock").push("a-leave".to_owned());
            }))
            .into(),
        SeriesDescriptor::standard(vec![Datum::xy(2.0, 1.0)])
            .with_label("B")
            .into(),
    ]
}

#[test]
fn pointer_move_emits_combined_payload_in_outer_coordinates() {
    let margin = MarginConfig::default()
        .with_left(100.0)
        .with_top(50.0)
        .with_right(0.0)
        .with_bottom(50.0);
    let config = ChartConfig::new(1000.0, 500.0).with_margin(margin);
    let mut surface = ChartSurface::new(NullRenderer::default(), config).expect("surface init");
    surface.set_children(series_pair(&log()));

    // Local (50, 10) after removing the margin.
    let event = surface
        .pointer_move(PointerEvent::new(150.0, 60.0))
        .expect("resolved");
    assert_eq!(event.datum, Datum::xy(1.0, 5.0));
    assert_eq!(event.series.len(), 2);
    assert_eq!(event.data_coords, Some(ScreenPoint::new(100.0, 50.0)));
    assert_eq!(event.event, PointerEvent::new(150.0, 60.0));

    let tooltip = surface.tooltip().expect("tooltip candidate");
    assert_eq!(tooltip.datum, event.datum);
}

#[test]
fn surface_default_handler_receives_untargeted_events() {
    let log = log();
    let mut surface = surface_with(series_pair(&log));
    surface.set_default_handlers(default_handlers(&log));

    surface.pointer_move(PointerEvent::new(50.0, 10.0));
    assert_eq!(entries(&log), vec!["default-move:2"]);
}

#[test]
fn series_override_replaces_default_for_targeted_events() {
    let log = log();
    let mut surface = surface_with(series_pair(&log));
    surface.set_default_handlers(default_handlers(&log));

    surface.pointer_move(PointerEvent::new(50.0, 10.0).with_target(SeriesKey::from("A")));
    surface.pointer_move(PointerEvent::new(50.0, 10.0).with_target(SeriesKey::from("B")));
    assert_eq!(entries(&log), vec!["a-move", "default-move:2"]);

    let a = surface.catalog().series_by_key(&SeriesKey::from("A")).expect("series A");
    assert!(a.handlers.overrides_move());
    assert!(!a.handlers.overrides_click());
}

#[test]
fn defaults_set_after_children_reach_series_without_overrides() {
    let log = log();
    let mut surface = surface_with(series_pair(&log));
    surface.set_default_handlers(default_handlers(&log));

    let b = surface.catalog().series_by_key(&SeriesKey::from("B")).expect("series B");
    assert!(b.handlers.handlers().on_mouse_move.is_some());
    assert!(!b.handlers.overrides_move());
}

#[test]
fn pointer_leave_clears_state_and_calls_leave_handlers() {
    let log = log();
    let mut surface = surface_with(series_pair(&log));
    surface.set_default_handlers(default_handlers(&log));

    surface.pointer_move(PointerEvent::new(50.0, 10.0));
    assert!(surface.tooltip().is_some());
    surface.pointer_leave();
    assert!(surface.tooltip().is_none());
    assert!(surface.interaction_state().pointer().is_none());

    surface.pointer_move(PointerEvent::new(50.0, 10.0));
    surface.pointer_leave_series(&SeriesKey::from("A"));
    surface.pointer_leave_series(&SeriesKey::from("B"));
    assert!(surface.tooltip().is_none());
    assert_eq!(
        entries(&log),
        vec![
            "default-move:2",
            "default-leave",
            "default-move:2",
            "a-leave",
            "default-leave",
        ]
    );
}

#[test]
fn click_reports_hit_or_miss() {
    let log = log();
    let mut surface = surface_with(series_pair(&log));
    surface.set_default_handlers(default_handlers(&log));

    let hit = surface.click(PointerEvent::new(50.0, 10.0)).expect("dispatched");
    assert!(hit.interaction.is_some());

    surface.set_children(Vec::new());
    let miss = surface.click(PointerEvent::new(50.0, 10.0)).expect("dispatched");
    assert!(miss.interaction.is_none());

    assert_eq!(entries(&log), vec!["default-click:true", "default-click:false"]);
}

#[test]
fn unresolved_pointer_emits_nothing() {
    let log = log();
    let mut surface = surface_with(Vec::new());
    surface.set_default_handlers(default_handlers(&log));

    assert!(surface.pointer_move(PointerEvent::new(50.0, 10.0)).is_none());
    assert!(entries(&log).is_empty());
    assert!(surface.tooltip().is_none());
}

#[test]
fn tooltip_hook_runs_only_with_resolved_datum() {
    let mut surface = surface_with(series_pair(&log()));
    assert_eq!(surface.render_tooltip(|tooltip| tooltip.series.len()), None);

    surface.pointer_move(PointerEvent::new(50.0, 390.0));
    let label = surface.render_tooltip(|tooltip| format!("{:?}", tooltip.datum.y));
    assert_eq!(label.as_deref(), Some("Some(Number(1.0))"));

    surface.set_tooltip(None);
    assert!(surface.render_tooltip(|_| ()).is_none());
}

#[test]
fn scales_are_recomputed_only_when_inputs_change() {
    let mut surface = surface_with(series_pair(&log()));
    let after_children = surface.layout_recompute_count();

    surface
        .set_config(config().with_aria_label("sales").with_grid(true, true))
        .expect("config");
    surface.set_default_handlers(InteractionHandlers::default());
    assert_eq!(surface.layout_recompute_count(), after_children);

    surface.set_config(config().with_margin(MarginConfig::uniform(8.0))).expect("config");
    assert_eq!(surface.layout_recompute_count(), after_children + 1);
    assert_eq!(surface.dimensions().inner_width, 884.0);
}

#[test]
fn duplicate_labels_get_distinct_keys() {
    let surface = surface_with(vec![
        SeriesDescriptor::standard(vec![Datum::xy(0.0, 0.0)]).with_label("dup").into(),
        SeriesDescriptor::standard(vec![Datum::xy(1.0, 1.0)]).with_label("dup").into(),
        SeriesDescriptor::standard(vec![Datum::xy(2.0, 2.0)]).into(),
    ]);
    let keys: Vec<String> = surface
        .catalog()
        .series()
        .map(|series| series.key.to_string())
        .collect();
    assert_eq!(keys, vec!["dup", "dup#1", "series-2"]);
}

#[test]
fn generated_keys_skip_labels_already_taken() {
    let mut surface = surface_with(vec![
        SeriesDescriptor::standard(vec![Datum::xy(0.0, 0.0)]).with_label("a#2").into(),
        SeriesDescriptor::standard(vec![Datum::xy(1.0, 1.0)]).with_label("a").into(),
        SeriesDescriptor::standard(vec![Datum::xy(2.0, 2.0)]).with_label("a").into(),
        SeriesDescriptor::standard(vec![Datum::xy(3.0, 3.0)]).with_label("series-4").into(),
        SeriesDescriptor::standard(vec![Datum::xy(4.0, 4.0)]).into(),
    ]);
    let keys: Vec<String> = surface
        .catalog()
        .series()
        .map(|series| series.key.to_string())
        .collect();
    assert_eq!(keys, vec!["a#2", "a", "a#2#2", "series-4", "series-4#4"]);

    let event = surface
        .pointer_move(PointerEvent::new(450.0, 200.0))
        .expect("resolved");
    assert_eq!(event.series.len(), 5);
}
