//! Closed-form metric calculators
//!
//! Pure functions from knob values to domain outputs. No iteration beyond
//! the fixed-size chart sweeps, no caching, no hidden state. Knob ranges
//! keep every denominator strictly positive, so the formulas divide freely.

use serde::Serialize;

use crate::types::ParamSet;
use crate::CHART_SAMPLE_POINTS;

// =============================================================================
// AD HOC CURVE CONSTANTS
// =============================================================================
// Illustrative shapes, not physical models; the arithmetic is frozen.

/// Batch size at which the utilization ramp saturates
pub const UTILIZATION_FULL_BATCH: f64 = 32.0;

/// Utilization floor for a batch of one
pub const UTILIZATION_FLOOR: f64 = 0.05;

/// Slope of the grid completion falloff per approval year
pub const GRID_COMPLETION_FALLOFF: f64 = 0.35;

// =============================================================================
// MOTOR (back-EMF lab)
// =============================================================================

/// Derived outputs of the motor lesson
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MotorMetrics {
    /// Back-EMF at the given speed (V)
    pub back_emf: f64,
    /// Armature current (A); floored at 0 unless regeneration is shown
    pub current: f64,
    /// Current with the rotor held stalled (A)
    pub stall_current: f64,
    /// Speed at which back-EMF equals the supply (rad/s)
    pub no_load_speed: f64,
}

/// Motor metrics from knobs: `supply_voltage` (V), `resistance` (Ω),
/// `ke` (V·s/rad), `speed` (rad/s), `show_regen` toggle.
pub fn motor_metrics(params: &ParamSet) -> MotorMetrics {
    let v_supply = params.number("supply_voltage");
    let r = params.number("resistance");
    let ke = params.number("ke");
    let speed = params.number("speed");

    let back_emf = ke * speed;
    let raw_current = (v_supply - back_emf) / r;
    // Above no-load speed the machine generates; negative current is only
    // meaningful when the lesson is showing regeneration
    let current = if params.toggle("show_regen") { raw_current } else { raw_current.max(0.0) };

    MotorMetrics {
        back_emf,
        current,
        stall_current: v_supply / r,
        no_load_speed: v_supply / ke,
    }
}

// =============================================================================
// THERMAL (expansion lesson)
// =============================================================================

/// Derived outputs of the thermal lesson
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ThermalMetrics {
    /// Length change (mm)
    pub expansion: f64,
    /// Constrained thermal stress (MPa)
    pub stress: f64,
}

/// Thermal metrics from knobs: `length` (mm), `alpha` (ppm/°C),
/// `delta_t` (°C), `modulus` (GPa).
pub fn thermal_metrics(params: &ParamSet) -> ThermalMetrics {
    let l0 = params.number("length");
    let alpha = params.number("alpha") * 1e-6;
    let dt = params.number("delta_t");
    let e_gpa = params.number("modulus");

    ThermalMetrics {
        expansion: alpha * l0 * dt,
        // E[GPa] * 1e3 = E[MPa]; stress = E * alpha * dT
        stress: e_gpa * 1e3 * alpha * dt,
    }
}

// =============================================================================
// BATCHING (inference throughput lesson)
// =============================================================================

/// Derived outputs of the batching lesson
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BatchingMetrics {
    /// Requests completed per second
    pub throughput: f64,
    /// Time to fill one batch at the arrival rate (s)
    pub fill_wait: f64,
    /// Average request latency: half the fill wait plus processing (s)
    pub avg_latency: f64,
    /// Average in-flight requests, L = λW
    pub queue_depth: f64,
    /// Illustrative accelerator utilization ramp
    pub gpu_utilization: f64,
}

/// Batching metrics from knobs: `batch_size` (requests),
/// `processing_time` (ms per batch), `arrival_rate` (requests/s).
pub fn batching_metrics(params: &ParamSet) -> BatchingMetrics {
    let batch = params.number("batch_size");
    let processing_s = params.number("processing_time") / 1000.0;
    let arrival = params.number("arrival_rate");

    let fill_wait = batch / arrival;
    let avg_latency = fill_wait / 2.0 + processing_s;

    BatchingMetrics {
        throughput: batch / processing_s,
        fill_wait,
        avg_latency,
        queue_depth: arrival * avg_latency,
        gpu_utilization: (batch / UTILIZATION_FULL_BATCH).clamp(UTILIZATION_FLOOR, 1.0),
    }
}

// =============================================================================
// GRID (interconnection queue lesson)
// =============================================================================

/// Derived outputs of the grid queue lesson
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GridMetrics {
    /// Projects sitting in the queue, L = λW
    pub backlog: f64,
    /// Fraction of applicants expected to survive the wait
    pub completion_fraction: f64,
    /// Projects reaching interconnection per year
    pub connected_per_year: f64,
}

/// Grid metrics from knobs: `applications_per_year` (projects/yr),
/// `approval_years` (yr).
pub fn grid_metrics(params: &ParamSet) -> GridMetrics {
    let rate = params.number("applications_per_year");
    let wait = params.number("approval_years");

    let completion_fraction = 1.0 / (1.0 + GRID_COMPLETION_FALLOFF * wait);

    GridMetrics {
        backlog: rate * wait,
        completion_fraction,
        connected_per_year: rate * completion_fraction,
    }
}

// =============================================================================
// CHART SWEEPS
// =============================================================================

/// Sample a curve at `CHART_SAMPLE_POINTS` evenly spaced x values over
/// [x_min, x_max], inclusive of both ends.
pub fn sample_curve(x_min: f64, x_max: f64, f: impl Fn(f64) -> f64) -> Vec<(f64, f64)> {
    let n = CHART_SAMPLE_POINTS;
    let step = (x_max - x_min) / (n - 1) as f64;
    (0..n)
        .map(|i| {
            let x = x_min + step * i as f64;
            (x, f(x))
        })
        .collect()
}

/// Current-vs-speed curve for the motor lesson at the current knob values
pub fn motor_current_curve(params: &ParamSet) -> Vec<(f64, f64)> {
    let v_supply = params.number("supply_voltage");
    let r = params.number("resistance");
    let ke = params.number("ke");
    let show_regen = params.toggle("show_regen");
    let top = v_supply / ke;

    sample_curve(0.0, top, move |speed| {
        let raw = (v_supply - ke * speed) / r;
        if show_regen {
            raw
        } else {
            raw.max(0.0)
        }
    })
}

/// Latency-vs-batch-size curve for the batching lesson
pub fn batching_latency_curve(params: &ParamSet) -> Vec<(f64, f64)> {
    let processing_s = params.number("processing_time") / 1000.0;
    let arrival = params.number("arrival_rate");

    sample_curve(1.0, 64.0, move |batch| batch / arrival / 2.0 + processing_s)
}

/// Expansion-vs-temperature curve for the thermal lesson
pub fn thermal_expansion_curve(params: &ParamSet) -> Vec<(f64, f64)> {
    let l0 = params.number("length");
    let alpha = params.number("alpha") * 1e-6;

    sample_curve(-40.0, 80.0, move |dt| alpha * l0 * dt)
}

/// Connected-per-year-vs-approval-time curve for the grid lesson
pub fn grid_throughput_curve(params: &ParamSet) -> Vec<(f64, f64)> {
    let rate = params.number("applications_per_year");

    sample_curve(0.5, 10.0, move |wait| {
        rate / (1.0 + GRID_COMPLETION_FALLOFF * wait)
    })
}

// =============================================================================
// DISPATCH
// =============================================================================

/// Derived metrics of whichever lesson is running
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum LessonMetrics {
    Motor(MotorMetrics),
    Thermal(ThermalMetrics),
    Batching(BatchingMetrics),
    Grid(GridMetrics),
}

/// Compute the running lesson's metrics from its knobs
pub fn metrics_for(kind: crate::content::GameKind, params: &ParamSet) -> LessonMetrics {
    use crate::content::GameKind;
    match kind {
        GameKind::BackEmf => LessonMetrics::Motor(motor_metrics(params)),
        GameKind::ThermalExpansion => LessonMetrics::Thermal(thermal_metrics(params)),
        GameKind::InferenceBatching => LessonMetrics::Batching(batching_metrics(params)),
        GameKind::InterconnectionQueue => LessonMetrics::Grid(grid_metrics(params)),
    }
}

/// The lesson's primary chart curve at the current knob values
pub fn curve_for(kind: crate::content::GameKind, params: &ParamSet) -> Vec<(f64, f64)> {
    use crate::content::GameKind;
    match kind {
        GameKind::BackEmf => motor_current_curve(params),
        GameKind::ThermalExpansion => thermal_expansion_curve(params),
        GameKind::InferenceBatching => batching_latency_curve(params),
        GameKind::InterconnectionQueue => grid_throughput_curve(params),
    }
}

// =============================================================================
// TESTS
// =============================================================================
