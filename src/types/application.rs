//! Real-world application entries for the transfer phase

use serde::Serialize;

/// One real-world use case shown in the transfer browser
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationEntry {
    /// Stable entry id
    pub id: &'static str,
    /// Display title
    pub title: &'static str,
    /// One-paragraph blurb
    pub summary: &'static str,
    /// Industry sector tag
    pub sector: &'static str,
}
