//! Grid Queue content bank

use lazy_static::lazy_static;

use super::{GameKind, LessonContent};
use crate::types::{AnswerOption, ApplicationEntry, ParamSpec, Question};

static GRID_PARAMS: [ParamSpec; 2] = [
    ParamSpec::number("applications_per_year", "Applications", "projects/yr", 10.0, 2000.0, 400.0),
    ParamSpec::number("approval_years", "Approval time", "yr", 0.5, 10.0, 4.0),
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
    pub static ref GRID_LESSON: LessonContent = LessonContent {
        kind: GameKind::InterconnectionQueue,
        title: "Grid Queue",
        tagline: "Why power projects wait years in line to plug in",
        param_specs: &GRID_PARAMS,
        questions: vec![
            q(
                "A grid operator receives 400 interconnection applications per year and each takes about 4 years to process.",
                "Roughly how many projects sit in the queue at any time?",
                [
                    ("a", "100", false),
                    ("b", "400", false),
                    ("c", "1600", true),
                    ("d", "4", false),
                ],
                "Little's Law: L = λW = 400 × 4 = 1600 projects in the queue.",
            ),
            q(
                "What is an interconnection queue?",
                "Pick the best description.",
                [
                    ("a", "The physical line of pylons to a substation", false),
                    ("b", "The administrative pipeline of projects applying to connect to the grid", true),
                    ("c", "A battery discharge schedule", false),
                    ("d", "The order in which plants dispatch power", false),
                ],
                "Before a plant can plug in, the operator must study its grid impact. The backlog of applications under study is the interconnection queue.",
            ),
            q(
                "Applications double while approval time stays the same.",
                "What does Little's Law say about the queue?",
                [
                    ("a", "It doubles", true),
                    ("b", "It is unchanged", false),
                    ("c", "It halves", false),
                    ("d", "It quadruples", false),
                ],
                "L = λW is linear in the arrival rate: double λ, double L.",
            ),
            q(
                "The operator halves the study time per project with cluster studies.",
                "All else equal, the standing queue…",
                [
                    ("a", "doubles", false),
                    ("b", "halves", true),
                    ("c", "is unchanged", false),
                    ("d", "goes to zero instantly", false),
                ],
                "Halving W halves L = λW. The backlog drains gradually, but the steady state is half as deep.",
            ),
            q(
                "Long waits cause some applicants to drop out before completion.",
                "What does that do to the queue's usefulness as a forecast of new capacity?",
                [
                    ("a", "Nothing — every entry eventually connects", false),
                    ("b", "The queue overstates future capacity, and more so as waits grow", true),
                    ("c", "The queue understates future capacity", false),
                    ("d", "Queues never forecast anything", false),
                ],
                "The longer projects wait, the more financing and site options expire, so a growing share of the queue is phantom capacity.",
            ),
            q(
                "Why do many speculative projects enter the queue at once?",
                "Pick the dominant incentive.",
                [
                    ("a", "Queue position is cheap to claim and valuable to hold", true),
                    ("b", "Operators pay applicants to queue", false),
                    ("c", "Applications are mandatory for all landowners", false),
                    ("d", "Projects enjoy paperwork", false),
                ],
                "A low entry cost plus first-come-first-served study order makes it rational to file early and often, which itself lengthens the queue.",
            ),
            q(
                "A developer's project needs grid upgrades discovered during its study.",
                "Why can one dropout trigger restudies of others?",
                [
                    ("a", "Studies assume a specific set of neighbours sharing upgrade costs", true),
                    ("b", "Paper files are stored in one box", false),
                    ("c", "Dropouts change the weather", false),
                    ("d", "They cannot — studies are independent", false),
                ],
                "Serial studies allocate shared upgrade costs across queued neighbours. When one leaves, the allocation and sometimes the engineering must be redone.",
            ),
            q(
                "Which reform attacks the restudy cascade directly?",
                "Choose the structural fix.",
                [
                    ("a", "Studying projects in clusters with shared cost allocation", true),
                    ("b", "Raising everyone's wait by one year", false),
                    ("c", "Printing studies double-sided", false),
                    ("d", "Randomizing the queue order", false),
                ],
                "Cluster studies evaluate a cohort together, so one dropout adjusts a shared result instead of invalidating a chain of serial studies.",
            ),
            q(
                "With 400 applications/yr and a completion fraction of 25 %, how much capacity actually connects per year?",
                "Assume projects are alike.",
                [
                    ("a", "400 projects", false),
                    ("b", "100 projects", true),
                    ("c", "25 projects", false),
                    ("d", "1600 projects", false),
                ],
                "Connected per year = arrival rate × completion fraction = 400 × 0.25 = 100.",
            ),
            q(
                "An analyst argues that shortening approval time raises connected capacity twice over.",
                "What is the double effect?",
                [
                    ("a", "Faster studies and higher completion, since fewer projects die waiting", true),
                    ("b", "Cheaper paper and faster printers", false),
                    ("c", "More applications and more dropouts", false),
                    ("d", "There is no double effect", false),
                ],
                "Shorter waits drain the same arrivals sooner and keep more of them alive to completion, so throughput rises on both counts.",
            ),
        ],
        applications: vec![
            ApplicationEntry {
                id: "renewables-backlog",
                title: "Renewables backlogs",
                summary: "Solar, wind and storage dominate modern queues; in several regions the queued capacity exceeds the entire existing fleet, most of it phantom.",
                sector: "Energy policy",
            },
            ApplicationEntry {
                id: "cluster-reform",
                title: "Cluster study reform",
                summary: "Operators have moved from serial first-come studies to clustered cohorts with readiness deposits, cutting restudy cascades and thinning speculative entries.",
                sector: "Grid operations",
            },
            ApplicationEntry {
                id: "datacenter-load",
                title: "Data-center load queues",
                summary: "The same queueing arithmetic now applies on the demand side, as gigawatt-scale data-center campuses line up for grid connections.",
                sector: "Computing infrastructure",
            },
            ApplicationEntry {
                id: "permitting-analogy",
                title: "Permitting pipelines",
                summary: "Housing permits and transmission siting show identical dynamics: cheap entry, long studies, dropouts, and Little's Law governing the backlog.",
                sector: "Public policy",
            },
        ],
    };
}
