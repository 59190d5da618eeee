//! Integration tests for the metric calculators
//!
//! Drives the closed-form formulas through the session's parameter store,
//! checking the exact scenarios the lessons teach with.

use pretty_assertions::assert_eq;

use tenphase::content::GameKind;
use tenphase::core::{LessonMetrics, LessonSession};
use tenphase::types::ParamValue;
use tenphase::CHART_SAMPLE_POINTS;

/// Stall: V=12, R=2, speed=0 → back_emf=0, current=6.0 exactly
#[test]
fn test_motor_stall_through_session() {
    let mut session = LessonSession::headless(GameKind::BackEmf);
    session.set_param("supply_voltage", ParamValue::Number(12.0));
    session.set_param("resistance", ParamValue::Number(2.0));
    session.set_param("speed", ParamValue::Number(0.0));

    let LessonMetrics::Motor(m) = session.metrics() else {
        panic!("motor lesson must yield motor metrics");
    };
    assert_eq!(m.back_emf, 0.0);
    assert_eq!(m.current, 6.0);
    assert_eq!(m.stall_current, 6.0);
}

/// Thermal: L0=500000mm, alpha=12ppm, dT=60 → 360mm exactly
#[test]
fn test_thermal_rail_through_session() {
    let mut session = LessonSession::headless(GameKind::ThermalExpansion);
    session.set_param("length", ParamValue::Number(500_000.0));
    session.set_param("alpha", ParamValue::Number(12.0));
    session.set_param("delta_t", ParamValue::Number(60.0));

    let LessonMetrics::Thermal(m) = session.metrics() else {
        panic!("thermal lesson must yield thermal metrics");
    };
    assert!((m.expansion - 360.0).abs() < 1e-9, "got {}", m.expansion);
}

/// Batching metrics satisfy Little's Law and the closed forms exactly
#[test]
fn test_batching_closed_forms() {
    let mut session = LessonSession::headless(GameKind::InferenceBatching);
    session.set_param("batch_size", ParamValue::Number(8.0));
    session.set_param("processing_time", ParamValue::Number(100.0));
    session.set_param("arrival_rate", ParamValue::Number(50.0));

    let LessonMetrics::Batching(m) = session.metrics() else {
        panic!("batching lesson must yield batching metrics");
    };
    assert!((m.throughput - 80.0).abs() < 1e-9);
    assert!((m.fill_wait - 0.16).abs() < 1e-12);
    assert!((m.avg_latency - (0.08 + 0.1)).abs() < 1e-12);
    assert!((m.queue_depth - 50.0 * m.avg_latency).abs() < 1e-12);
}

/// Grid queue depth follows L = λW
#[test]
fn test_grid_littles_law() {
    let mut session = LessonSession::headless(GameKind::InterconnectionQueue);
    session.set_param("applications_per_year", ParamValue::Number(400.0));
    session.set_param("approval_years", ParamValue::Number(4.0));

    let LessonMetrics::Grid(m) = session.metrics() else {
        panic!("grid lesson must yield grid metrics");
    };
    assert!((m.backlog - 1600.0).abs() < 1e-9);
    assert!(m.connected_per_year < 400.0);
}

/// Out-of-range slider writes are clamped before the formulas see them
#[test]
fn test_clamped_inputs_keep_metrics_finite() {
    let mut session = LessonSession::headless(GameKind::InferenceBatching);
    // Attempted zero denominators; the store clamps to the declared minima
    session.set_param("arrival_rate", ParamValue::Number(0.0));
    session.set_param("processing_time", ParamValue::Number(0.0));

    let LessonMetrics::Batching(m) = session.metrics() else {
        panic!("batching lesson must yield batching metrics");
    };
    assert!(m.throughput.is_finite());
    assert!(m.avg_latency.is_finite());
    assert!(m.queue_depth.is_finite());
}

/// Metrics recompute on every read with no hidden state
#[test]
fn test_metrics_are_deterministic() {
    let mut session = LessonSession::headless(GameKind::BackEmf);
    session.set_param("speed", ParamValue::Number(42.0));

    let a = serde_json::to_string(&session.metrics()).unwrap();
    let b = serde_json::to_string(&session.metrics()).unwrap();
    assert_eq!(a, b);
}

/// Every lesson's chart curve has exactly 40 finite points
#[test]
fn test_curves_are_fixed_size_sweeps() {
    for kind in GameKind::ALL {
        let session = LessonSession::headless(kind);
        let curve = session.curve();
        assert_eq!(curve.len(), CHART_SAMPLE_POINTS, "{}", kind);
        assert!(
            curve.iter().all(|(x, y)| x.is_finite() && y.is_finite()),
            "{} produced a non-finite sample",
            kind
        );
    }
}

/// Motor curve starts at stall current and ends at zero (no regen shown)
#[test]
fn test_motor_curve_endpoints() {
    let mut session = LessonSession::headless(GameKind::BackEmf);
    session.set_param("supply_voltage", ParamValue::Number(12.0));
    session.set_param("resistance", ParamValue::Number(2.0));

    let curve = session.curve();
    let (first_x, first_y) = curve[0];
    let (last_x, last_y) = curve[curve.len() - 1];

    assert_eq!(first_x, 0.0);
    assert!((first_y - 6.0).abs() < 1e-9, "stall end of curve, got {}", first_y);
    // Last sample sits at no-load speed where current crosses zero
    assert!((last_x - 12.0 / session.params().number("ke")).abs() < 1e-9);
    assert!(last_y.abs() < 1e-9);
}
