//! Core types for Tenphase

mod application;
mod event;
mod params;
mod phase;
mod question;
mod status;

pub use application::ApplicationEntry;
pub use event::{EventSink, EventType, LessonEvent, MemorySink, NullSink};
pub use params::{ParamSet, ParamSpec, ParamValue};
pub use phase::{Phase, PHASE_ORDER};
pub use question::{AnswerOption, Question};
pub use status::LessonStatus;
