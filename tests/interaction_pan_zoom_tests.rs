use std::rc::Rc;

use approx::assert_abs_diff_eq;
use chrono::{DateTime, Duration, TimeZone, Utc};
use futures::FutureExt;
use futures::future::{self, LocalBoxFuture};
use proptest::prelude::*;
use timeline_rs::core::{Step, StepId, StepSpan};
use timeline_rs::error::TimelineResult;
use timeline_rs::interaction::{InteractionMode, PanConfig, ZoomConfig};
use timeline_rs::render::NullRenderer;
use timeline_rs::sync::StepStore;
use timeline_rs::{TimelineEngine, TimelineEngineConfig};

struct EchoStore;

impl StepStore for EchoStore {
    fn mutate(&self, id: &StepId, span: StepSpan) -> LocalBoxFuture<'static, TimelineResult<Step>> {
        future::ready(Ok(Step::new(id.clone(), span.start, span.end))).boxed_local()
    }
}

fn center() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
}

fn engine() -> TimelineEngine<NullRenderer> {
    TimelineEngine::new(
        NullRenderer::default(),
        TimelineEngineConfig::new(1200.0, center()),
        Rc::new(EchoStore),
    )
    .expect("engine init")
}

#[test]
fn pan_moves_center_by_pixels_per_day() {
    let mut engine = engine();
    assert!(engine.start_pan(500.0).expect("start pan"));
    assert_eq!(engine.interaction_mode(), InteractionMode::Panning);

    assert!(engine.move_pan(530.0));
    assert!(engine.on_animation_frame().expect("frame"));
    assert_eq!(engine.center(), center() - Duration::days(2));
    assert_eq!(engine.viewport().start, center() - Duration::days(62));

    assert!(engine.end_pan().expect("end pan"));
    assert_eq!(engine.interaction_mode(), InteractionMode::Idle);
}

#[test]
fn pan_back_to_origin_restores_center() {
    let mut engine = engine();
    engine.start_pan(100.0).expect("start pan");
    engine.move_pan(322.5);
    engine.on_animation_frame().expect("frame");
    assert_ne!(engine.center(), center());

    engine.move_pan(100.0);
    engine.on_animation_frame().expect("frame");
    engine.end_pan().expect("end pan");
    assert_eq!(engine.center(), center());
}

#[test]
fn moves_between_frames_coalesce_to_latest() {
    let mut engine = engine();
    engine.start_pan(0.0).expect("start pan");

    assert!(engine.move_pan(15.0));
    assert!(!engine.move_pan(30.0));
    assert!(!engine.move_pan(45.0));
    assert_eq!(engine.session().coalesced_moves(), 2);
    assert_eq!(engine.session().pending_pointer_x(), Some(45.0));

    assert!(engine.on_animation_frame().expect("frame"));
    assert_eq!(engine.center(), center() - Duration::days(3));
    assert!(!engine.on_animation_frame().expect("second frame"));
}

#[test]
fn end_pan_applies_unflushed_move() {
    let mut engine = engine();
    engine.start_pan(0.0).expect("start pan");
    engine.move_pan(-150.0);

    engine.end_pan().expect("end pan");
    assert_eq!(engine.center(), center() + Duration::days(10));
    assert!(!engine.session().has_pending_frame());
}

#[test]
fn pan_config_controls_sensitivity() {
    let config = TimelineEngineConfig::new(1200.0, center()).with_pan(PanConfig {
        pixels_per_day: 30.0,
    });
    let mut engine =
        TimelineEngine::new(NullRenderer::default(), config, Rc::new(EchoStore)).expect("init");
    engine.start_pan(0.0).expect("start pan");
    engine.move_pan(60.0);
    engine.end_pan().expect("end pan");
    assert_eq!(engine.center(), center() - Duration::days(2));
}

#[test]
fn move_without_pan_is_ignored() {
    let mut engine = engine();
    assert!(!engine.move_pan(40.0));
    assert!(!engine.end_pan().expect("end pan"));
    assert_eq!(engine.center(), center());
}

#[test]
fn pan_start_is_suppressed_while_editing() {
    let mut engine = engine();
    engine
        .replace_steps(vec![Step::new("a", center(), center() + Duration::days(3))])
        .expect("replace");
    assert!(engine.start_drag(&StepId::new("a"), 610.0).expect("drag"));

    assert!(!engine.start_pan(610.0).expect("pan start"));
    assert_eq!(engine.interaction_mode(), InteractionMode::Dragging);
    assert!(!engine.move_pan(700.0));
}

#[test]
fn zoom_steps_and_clamps() {
    let mut engine = engine();
    assert_abs_diff_eq!(engine.zoom_in().expect("zoom in"), 1.25);
    assert_eq!(engine.viewport().end - engine.viewport().start, Duration::days(96));

    for _ in 0..20 {
        engine.zoom_in().expect("zoom in");
    }
    assert_abs_diff_eq!(engine.zoom_level(), 4.0);

    for _ in 0..40 {
        engine.zoom_out().expect("zoom out");
    }
    assert_abs_diff_eq!(engine.zoom_level(), 0.25);
    assert_eq!(engine.viewport().end - engine.viewport().start, Duration::days(480));

    assert_abs_diff_eq!(engine.reset_zoom().expect("reset"), 1.0);
    assert_eq!(engine.viewport().start, center() - Duration::days(60));
}

#[test]
fn wheel_zoom_is_proportional_to_delta() {
    let mut engine = engine();
    assert_abs_diff_eq!(engine.wheel_zoom(-120.0).expect("wheel"), 1.25);
    assert_abs_diff_eq!(engine.wheel_zoom(60.0).expect("wheel"), 1.125);
    assert_abs_diff_eq!(engine.wheel_zoom(f64::NAN).expect("wheel"), 1.125);
}

#[test]
fn custom_zoom_bounds_are_honoured() {
    let config = TimelineEngineConfig::new(1200.0, center()).with_zoom(ZoomConfig {
        min_level: 0.5,
        max_level: 2.0,
        step: 0.5,
        default_level: 1.0,
        wheel_step_units: 100.0,
    });
    let mut engine =
        TimelineEngine::new(NullRenderer::default(), config, Rc::new(EchoStore)).expect("init");
    assert_abs_diff_eq!(engine.wheel_zoom(-1_000.0).expect("wheel"), 2.0);
    assert_abs_diff_eq!(engine.wheel_zoom(1_000.0).expect("wheel"), 0.5);
}

#[test]
fn resize_host_width_recomputes_window() {
    let mut engine = engine();
    engine.set_pixel_width(600.0).expect("resize");
    assert_eq!(engine.viewport().end - engine.viewport().start, Duration::days(60));
    assert!(engine.set_pixel_width(0.0).is_err());
    assert_eq!(engine.pixel_width(), 600.0);
}

#[derive(Debug, Clone, Copy)]
enum ZoomOp {
    In,
    Out,
    Reset,
    Wheel(f64),
}

fn zoom_op() -> impl Strategy<Value = ZoomOp> {
    prop_oneof![
        Just(ZoomOp::In),
        Just(ZoomOp::Out),
        Just(ZoomOp::Reset),
        (-2_000.0f64..2_000.0).prop_map(ZoomOp::Wheel),
    ]
}

proptest! {
    #[test]
    fn zoom_level_stays_within_bounds(ops in prop::collection::vec(zoom_op(), 1..40)) {
        let mut engine = engine();
        for op in ops {
            let level = match op {
                ZoomOp::In => engine.zoom_in(),
                ZoomOp::Out => engine.zoom_out(),
                ZoomOp::Reset => engine.reset_zoom(),
                ZoomOp::Wheel(delta) => engine.wheel_zoom(delta),
            }
            .expect("zoom");
            prop_assert!((0.25..=4.0).contains(&level));
            prop_assert_eq!(engine.viewport().zoom_level, level);
        }
    }

    #[test]
    fn pan_out_and_back_is_identity(origin in -500.0f64..500.0, delta in -5_000.0f64..5_000.0) {
        let mut engine = engine();
        engine.start_pan(origin).expect("start pan");
        engine.move_pan(origin + delta);
        engine.on_animation_frame().expect("frame");
        engine.move_pan(origin);
        engine.on_animation_frame().expect("frame");
        engine.end_pan().expect("end pan");
        prop_assert_eq!(engine.center(), center());
    }
}
