//! Thermal Rail content bank

use lazy_static::lazy_static;

use super::{GameKind, LessonContent};
use crate::types::{AnswerOption, ApplicationEntry, ParamSpec, Question};

static THERMAL_PARAMS: [ParamSpec; 4] = [
    ParamSpec::number("length", "Span length", "mm", 1000.0, 1_000_000.0, 500_000.0),
    ParamSpec::number("alpha", "Expansion coefficient", "ppm/°C", 1.0, 30.0, 12.0),
    ParamSpec::number("delta_t", "Temperature swing", "°C", -40.0, 80.0, 40.0),
    ParamSpec::number("modulus", "Young's modulus", "GPa", 10.0, 400.0, 200.0),
];

fn q(
    scenario: &'static str,
    prompt: &'static str,
    options: [(&'static str, &'static str, bool); 4],
    explanation: &'static str,
) -> Question {
    Question {
        scenario,
        prompt,
        options: options
            .into_iter()
            .map(|(id, label, is_correct)| AnswerOption { id, label, is_correct })
            .collect(),
        explanation,
    }
}

lazy_static! {
    pub static ref THERMAL_LESSON: LessonContent = LessonContent {
        kind: GameKind::ThermalExpansion,
        title: "Thermal Rail",
        tagline: "How a 500 m rail grows a third of a metre on a hot day",
        param_specs: &THERMAL_PARAMS,
        questions: vec![
            q(
                "A 500 m steel rail (α = 12 ppm/°C) warms by 60 °C from night to afternoon.",
                "How much longer does it get?",
                [
                    ("a", "3.6 mm", false),
                    ("b", "36 mm", false),
                    ("c", "360 mm", true),
                    ("d", "3.6 m", false),
                ],
                "ΔL = α·L0·ΔT = 12e-6 × 500 000 mm × 60 = 360 mm.",
            ),
            q(
                "Two rods of the same material, one twice as long as the other, see the same warming.",
                "How do their expansions compare?",
                [
                    ("a", "They expand the same amount", false),
                    ("b", "The longer rod expands twice as much", true),
                    ("c", "The longer rod expands four times as much", false),
                    ("d", "The shorter rod expands more", false),
                ],
                "Expansion is linear in the original length: double L0, double ΔL.",
            ),
            q(
                "What does a coefficient of 12 ppm/°C physically mean?",
                "Pick the right reading.",
                [
                    ("a", "The rod grows 12 mm per degree", false),
                    ("b", "Each metre grows 12 millionths of a metre per degree", true),
                    ("c", "The rod grows 12 % per degree", false),
                    ("d", "The rod can survive 12 °C of swing", false),
                ],
                "ppm is parts per million of the current length, per degree of temperature change.",
            ),
            q(
                "A bridge deck is pinned rigidly at both ends and then warms up.",
                "What develops in the deck?",
                [
                    ("a", "Nothing — it simply cannot expand", false),
                    ("b", "Compressive stress proportional to E·α·ΔT", true),
                    ("c", "Tensile stress proportional to E/α", false),
                    ("d", "A voltage", false),
                ],
                "Blocked expansion turns into strain, and stress = E·α·ΔT. For steel that is roughly 2.4 MPa per degree.",
            ),
            q(
                "Steel: E = 200 GPa, α = 12 ppm/°C, constrained, warmed 50 °C.",
                "Estimate the thermal stress.",
                [
                    ("a", "1.2 MPa", false),
                    ("b", "12 MPa", false),
                    ("c", "120 MPa", true),
                    ("d", "1200 MPa", false),
                ],
                "σ = E·α·ΔT = 200 000 MPa × 12e-6 × 50 = 120 MPa — a large fraction of mild steel's yield strength.",
            ),
            q(
                "Railways leave small gaps between rail segments, or use long welded rail held by strong fasteners.",
                "What are the gaps for?",
                [
                    ("a", "Drainage", false),
                    ("b", "Room for thermal expansion", true),
                    ("c", "Electrical isolation only", false),
                    ("d", "Easier manufacturing", false),
                ],
                "Gaps give the steel somewhere to go. Welded rail instead accepts the E·α·ΔT compression and anchors the track against buckling.",
            ),
            q(
                "On a cold snap the temperature swing ΔT is negative.",
                "What does the model predict?",
                [
                    ("a", "The rail contracts and a pinned rail goes into tension", true),
                    ("b", "The rail still expands", false),
                    ("c", "Nothing changes below 0 °C", false),
                    ("d", "The coefficient flips sign", false),
                ],
                "The same formula runs both ways: negative ΔT gives negative ΔL, and constrained contraction pulls the member into tension — that is when rails crack.",
            ),
            q(
                "Aluminium (α ≈ 23 ppm/°C) and steel (α ≈ 12 ppm/°C) are bolted into one assembly outdoors.",
                "Why can this be a problem?",
                [
                    ("a", "They expand by different amounts and work the joint", true),
                    ("b", "Aluminium does not expand", false),
                    ("c", "Steel melts first", false),
                    ("d", "It is never a problem", false),
                ],
                "A mismatch of nearly 2× in α means every temperature cycle shears the fasteners and can loosen or fatigue the joint.",
            ),
            q(
                "A surveyor measures a long steel tape on a site that is 20 °C hotter than the tape's calibration temperature.",
                "What systematic error appears?",
                [
                    ("a", "The tape reads long — distances come out short", true),
                    ("b", "The tape reads short — distances come out long", false),
                    ("c", "No error; tapes are immune", false),
                    ("d", "Random error only", false),
                ],
                "The warm tape has physically stretched, so each marked metre is slightly more than a metre and the reported distance underestimates.",
            ),
            q(
                "A designer doubles the temperature swing a pinned steel member must tolerate.",
                "What happens to the thermal stress?",
                [
                    ("a", "Unchanged", false),
                    ("b", "It doubles", true),
                    ("c", "It quadruples", false),
                    ("d", "It halves", false),
                ],
                "Stress is linear in ΔT: σ = E·α·ΔT.",
            ),
        ],
        applications: vec![
            ApplicationEntry {
                id: "expansion-joints",
                title: "Bridge expansion joints",
                summary: "The toothed steel joints in every long bridge deck exist to absorb α·L0·ΔT — hundreds of millimetres of seasonal movement on a big span.",
                sector: "Civil engineering",
            },
            ApplicationEntry {
                id: "welded-rail",
                title: "Continuous welded rail",
                summary: "Modern track welds rails into kilometre-long strings and anchors them so the steel carries the thermal stress instead of moving — with buckling as the failure mode on extreme days.",
                sector: "Railways",
            },
            ApplicationEntry {
                id: "pipeline-loops",
                title: "Pipeline expansion loops",
                summary: "Hot oil and steam pipelines zig-zag through U-shaped loops that flex to absorb the growth of hundreds of metres of warm pipe.",
                sector: "Energy",
            },
            ApplicationEntry {
                id: "precision-metrology",
                title: "Precision metrology",
                summary: "Gauge blocks and interferometer frames are specified at exactly 20 °C; a fraction of a degree of drift moves a metre-scale measurement by micrometres.",
                sector: "Manufacturing",
            },
        ],
    };
}
