//! Back-EMF Lab content bank

use lazy_static::lazy_static;

use super::{GameKind, LessonContent};
use crate::types::{AnswerOption, ApplicationEntry, ParamSpec, Question};

static MOTOR_PARAMS: [ParamSpec; 5] = [
    ParamSpec::number("supply_voltage", "Supply voltage", "V", 1.0, 24.0, 12.0),
    ParamSpec::number("resistance", "Winding resistance", "Ω", 0.5, 10.0, 2.0),
    ParamSpec::number("ke", "Back-EMF constant", "V·s/rad", 0.01, 0.5, 0.1),
    ParamSpec::number("speed", "Shaft speed", "rad/s", 0.0, 200.0, 60.0),
    ParamSpec::toggle("show_regen", "Show regeneration", false),
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
    pub static ref MOTOR_LESSON: LessonContent = LessonContent {
        kind: GameKind::BackEmf,
        title: "Back-EMF Lab",
        tagline: "Why a spinning motor draws less current than a stalled one",
        param_specs: &MOTOR_PARAMS,
        questions: vec![
            q(
                "A 12 V motor with 2 Ω winding resistance is switched on while its shaft is held still.",
                "How much current flows at the instant of switch-on?",
                [
                    ("a", "0 A — the motor is not moving", false),
                    ("b", "6 A — the full supply over the winding resistance", true),
                    ("c", "About 1 A — back-EMF limits it", false),
                    ("d", "Infinite — nothing limits it", false),
                ],
                "With the shaft still there is no back-EMF, so only the winding resistance limits current: 12 V / 2 Ω = 6 A.",
            ),
            q(
                "The same motor spins up and settles at a steady speed under light load.",
                "Why does the current fall as the motor speeds up?",
                [
                    ("a", "The winding resistance increases with speed", false),
                    ("b", "The supply voltage sags", false),
                    ("c", "Back-EMF grows with speed and opposes the supply", true),
                    ("d", "The brushes wear in and conduct better", false),
                ],
                "Back-EMF is proportional to speed. It subtracts from the supply, so the voltage left to drive current through the winding shrinks.",
            ),
            q(
                "A motor's back-EMF constant is 0.1 V·s/rad and it spins at 60 rad/s.",
                "What is its back-EMF?",
                [
                    ("a", "0.6 V", false),
                    ("b", "6 V", true),
                    ("c", "60 V", false),
                    ("d", "600 V", false),
                ],
                "Back-EMF = Ke × speed = 0.1 × 60 = 6 V.",
            ),
            q(
                "An engineer needs the theoretical top speed of an unloaded 12 V motor with Ke = 0.1 V·s/rad.",
                "Which expression gives the no-load speed?",
                [
                    ("a", "Vsupply × Ke", false),
                    ("b", "Vsupply / R", false),
                    ("c", "Ke / Vsupply", false),
                    ("d", "Vsupply / Ke", true),
                ],
                "At no-load speed the back-EMF equals the supply and current drops to zero: speed = V / Ke = 120 rad/s here.",
            ),
            q(
                "A robot arm jams and its drive motor stops turning while still powered.",
                "What happens to the motor current?",
                [
                    ("a", "It jumps to the stall value and stays there", true),
                    ("b", "It drops to zero because the shaft stopped", false),
                    ("c", "It oscillates around the running value", false),
                    ("d", "Nothing — current does not depend on speed", false),
                ],
                "Stall removes the back-EMF, so current rises to V/R, the largest the circuit allows. That is why stalled motors overheat.",
            ),
            q(
                "Two motors share a 12 V supply. Motor A has R = 1 Ω, motor B has R = 4 Ω.",
                "Which stalls at a higher current?",
                [
                    ("a", "Motor A, 12 A vs 3 A", true),
                    ("b", "Motor B, 12 A vs 3 A", false),
                    ("c", "Both stall at the same current", false),
                    ("d", "Neither draws current at stall", false),
                ],
                "Stall current is V/R: 12/1 = 12 A for A, 12/4 = 3 A for B.",
            ),
            q(
                "A motor runs just below its no-load speed.",
                "What is true of the current?",
                [
                    ("a", "It is near its stall value", false),
                    ("b", "It is small, because back-EMF nearly cancels the supply", true),
                    ("c", "It is negative", false),
                    ("d", "It equals Ke", false),
                ],
                "Near no-load speed the back-EMF almost equals the supply, leaving little net voltage to push current.",
            ),
            q(
                "An electric vehicle crests a hill and the wheels drive the motor faster than its no-load speed.",
                "What does the sign of the current indicate?",
                [
                    ("a", "A fault — current can never reverse", false),
                    ("b", "The motor is regenerating: current flows back to the supply", true),
                    ("c", "The supply voltage went negative", false),
                    ("d", "The winding resistance became negative", false),
                ],
                "Above no-load speed the back-EMF exceeds the supply and current reverses. The machine acts as a generator, which is regenerative braking.",
            ),
            q(
                "A designer wants to halve a motor's stall current without changing the supply.",
                "Which change achieves that?",
                [
                    ("a", "Double the back-EMF constant", false),
                    ("b", "Double the winding resistance", true),
                    ("c", "Halve the winding resistance", false),
                    ("d", "Double the shaft speed", false),
                ],
                "Stall current is V/R; speed and Ke play no part at stall because back-EMF is zero there.",
            ),
            q(
                "A cordless drill dims the battery indicator sharply each time the chuck binds.",
                "What is the most direct explanation?",
                [
                    ("a", "Binding stalls the motor and stall current loads the battery", true),
                    ("b", "The indicator is faulty", false),
                    ("c", "The motor's back-EMF surges at stall", false),
                    ("d", "The trigger switch resistance drops", false),
                ],
                "Binding is a stall: back-EMF collapses, current jumps to V/R, and the battery voltage sags under the load.",
            ),
        ],
        applications: vec![
            ApplicationEntry {
                id: "soft-start",
                title: "Soft-start drives",
                summary: "Industrial drives ramp voltage up during spin-up so the stall-level inrush current never hits the supply or the couplings at full force.",
                sector: "Industrial automation",
            },
            ApplicationEntry {
                id: "regen-braking",
                title: "Regenerative braking",
                summary: "EVs and trains let the wheels spin the motor above its no-load speed, reversing the current and pushing energy back into the pack or the grid.",
                sector: "Transportation",
            },
            ApplicationEntry {
                id: "stall-protection",
                title: "Stall detection",
                summary: "3D printers and robot joints watch for the current signature of a stall — back-EMF gone, current at V/R — and cut power before the winding cooks.",
                sector: "Robotics",
            },
            ApplicationEntry {
                id: "sensorless-speed",
                title: "Sensorless speed estimation",
                summary: "Cheap fan and pump controllers skip the encoder and estimate speed from back-EMF, since the two are tied by the same constant Ke.",
                sector: "Consumer hardware",
            },
        ],
    };
}
