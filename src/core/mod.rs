//! Core modules for Tenphase

pub mod api;
pub mod audio;
pub mod calculator;
pub mod phase_machine;
pub mod quiz;
pub mod record;
pub mod session;
pub mod transfer;

pub use api::{create_router, run_server};
pub use audio::{CueSink, SilentCues, SoundCue, TerminalBell};
pub use calculator::{
    batching_metrics, curve_for, grid_metrics, metrics_for, motor_metrics, thermal_metrics,
    BatchingMetrics, GridMetrics, LessonMetrics, MotorMetrics, ThermalMetrics,
};
pub use phase_machine::{PhaseController, Transition};
pub use quiz::{QuizEngine, SubmitOutcome};
pub use record::{hash_events, verify_record, MasteryRecord, RecordGenerator, RecordReason, RecordResult};
pub use session::LessonSession;
pub use transfer::TransferBrowser;
