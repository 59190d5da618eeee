//! Slider-driven parameter state
//!
//! Each lesson declares a fixed set of knobs; the store clamps every write
//! to the knob's declared range, the role the bounded slider control played
//! in the original widgets. Derived metrics are never stored here.

use serde::Serialize;
use std::collections::BTreeMap;

/// A parameter value: a slider number or a toggle
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Number(f64),
    Toggle(bool),
}

impl ParamValue {
    pub fn as_number(&self) -> f64 {
        match self {
            ParamValue::Number(v) => *v,
            ParamValue::Toggle(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }

    pub fn as_toggle(&self) -> bool {
        match self {
            ParamValue::Toggle(b) => *b,
            ParamValue::Number(v) => *v != 0.0,
        }
    }
}

/// Declared range and default of one knob
#[derive(Debug, Clone, Serialize)]
pub struct ParamSpec {
    /// Stable knob key, e.g. "supply_voltage"
    pub key: &'static str,
    /// Display label
    pub label: &'static str,
    /// Unit suffix shown next to the value
    pub unit: &'static str,
    /// Lower bound (ignored for toggles)
    pub min: f64,
    /// Upper bound (ignored for toggles)
    pub max: f64,
    /// Initial value
    pub default: ParamValue,
}

impl ParamSpec {
    /// A numeric slider knob
    pub const fn number(
        key: &'static str,
        label: &'static str,
        unit: &'static str,
        min: f64,
        max: f64,
        default: f64,
    ) -> Self {
        Self { key, label, unit, min, max, default: ParamValue::Number(default) }
    }

    /// A boolean toggle knob
    pub const fn toggle(key: &'static str, label: &'static str, default: bool) -> Self {
        Self { key, label, unit: "", min: 0.0, max: 1.0, default: ParamValue::Toggle(default) }
    }

    fn is_toggle(&self) -> bool {
        matches!(self.default, ParamValue::Toggle(_))
    }
}

/// The mutable knob values of one running session
#[derive(Debug, Clone)]
pub struct ParamSet {
    specs: &'static [ParamSpec],
    values: BTreeMap<&'static str, ParamValue>,
}

impl ParamSet {
    /// Initialize every knob at its declared default
    pub fn new(specs: &'static [ParamSpec]) -> Self {
        let values = specs.iter().map(|s| (s.key, s.default)).collect();
        Self { specs, values }
    }

    /// Set a knob, clamping numbers to [min, max]. Returns the stored value,
    /// or None for an unknown key.
    pub fn set(&mut self, key: &str, value: ParamValue) -> Option<ParamValue> {
        let spec = self.specs.iter().find(|s| s.key == key)?;
        let stored = if spec.is_toggle() {
            ParamValue::Toggle(value.as_toggle())
        } else {
            ParamValue::Number(value.as_number().clamp(spec.min, spec.max))
        };
        self.values.insert(spec.key, stored);
        Some(stored)
    }

    /// Set a numeric knob
    pub fn set_number(&mut self, key: &str, value: f64) -> Option<f64> {
        self.set(key, ParamValue::Number(value)).map(|v| v.as_number())
    }

    /// Read a knob as a number; unknown keys read as 0
    pub fn number(&self, key: &str) -> f64 {
        self.values.get(key).map(|v| v.as_number()).unwrap_or(0.0)
    }

    /// Read a knob as a toggle; unknown keys read as false
    pub fn toggle(&self, key: &str) -> bool {
        self.values.get(key).map(|v| v.as_toggle()).unwrap_or(false)
    }

    /// Does this set declare a knob?
    pub fn has(&self, key: &str) -> bool {
        self.specs.iter().any(|s| s.key == key)
    }

    /// Declared knob specs
    pub fn specs(&self) -> &'static [ParamSpec] {
        self.specs
    }

    /// Current values, keyed by knob
    pub fn values(&self) -> &BTreeMap<&'static str, ParamValue> {
        &self.values
    }

    /// Reset every knob to its declared default
    pub fn reset(&mut self) {
        for spec in self.specs {
            self.values.insert(spec.key, spec.default);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
