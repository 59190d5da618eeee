//! Batch Flow content bank

use lazy_static::lazy_static;

use super::{GameKind, LessonContent};
use crate::types::{AnswerOption, ApplicationEntry, ParamSpec, Question};

static BATCHING_PARAMS: [ParamSpec; 3] = [
    ParamSpec::number("batch_size", "Batch size", "req", 1.0, 64.0, 8.0),
    ParamSpec::number("processing_time", "Processing time", "ms", 10.0, 500.0, 100.0),
    ParamSpec::number("arrival_rate", "Arrival rate", "req/s", 1.0, 500.0, 50.0),
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
    pub static ref BATCHING_LESSON: LessonContent = LessonContent {
        kind: GameKind::InferenceBatching,
        title: "Batch Flow",
        tagline: "Trading latency for throughput in an inference server",
        param_specs: &BATCHING_PARAMS,
        questions: vec![
            q(
                "An inference server processes one batch of 8 requests in 100 ms.",
                "What is its throughput?",
                [
                    ("a", "8 requests per second", false),
                    ("b", "80 requests per second", true),
                    ("c", "800 requests per second", false),
                    ("d", "12.5 requests per second", false),
                ],
                "Throughput = batch size / processing time = 8 / 0.1 s = 80 requests per second.",
            ),
            q(
                "The operator doubles the batch size and processing time stays roughly flat.",
                "What happens to throughput?",
                [
                    ("a", "It roughly doubles", true),
                    ("b", "It halves", false),
                    ("c", "It is unchanged", false),
                    ("d", "It drops to zero", false),
                ],
                "More requests complete per batch for nearly the same batch time, so throughput scales up with batch size until the accelerator saturates.",
            ),
            q(
                "Requests arrive at 100 per second and the server waits to fill a batch of 16.",
                "How long does a batch take to fill?",
                [
                    ("a", "16 ms", false),
                    ("b", "100 ms", false),
                    ("c", "160 ms", true),
                    ("d", "1.6 s", false),
                ],
                "Fill time = batch size / arrival rate = 16 / 100 = 0.16 s.",
            ),
            q(
                "A request arrives at a random moment while a batch is filling.",
                "On average, how much fill-wait does it see?",
                [
                    ("a", "The full fill time", false),
                    ("b", "About half the fill time", true),
                    ("c", "None — it is processed immediately", false),
                    ("d", "Twice the fill time", false),
                ],
                "Arrivals land uniformly across the fill window, so the average request waits about half of it before the batch dispatches.",
            ),
            q(
                "Little's Law relates the number of requests in the system to rate and wait.",
                "Which statement of it is right?",
                [
                    ("a", "L = λ / W", false),
                    ("b", "L = λ × W", true),
                    ("c", "W = λ × L", false),
                    ("d", "λ = L × W", false),
                ],
                "Average occupancy equals arrival rate times average time in system: L = λW.",
            ),
            q(
                "Requests arrive at 100/s and each spends 0.16 s in the system on average.",
                "How many requests are in flight on average?",
                [
                    ("a", "16", true),
                    ("b", "100", false),
                    ("c", "0.16", false),
                    ("d", "625", false),
                ],
                "L = λW = 100 × 0.16 = 16 requests.",
            ),
            q(
                "A chat product and a nightly document pipeline share the same model server.",
                "Which batching policy fits each?",
                [
                    ("a", "Big batches for chat, small for the pipeline", false),
                    ("b", "Small batches for chat, big for the pipeline", true),
                    ("c", "Identical batches for both", false),
                    ("d", "No batching for either", false),
                ],
                "Chat is latency-sensitive, so batches stay small; the pipeline cares only about throughput, so it can fill large batches.",
            ),
            q(
                "With a batch of 1, the accelerator sits mostly idle between kernel launches.",
                "Why does batching raise utilization?",
                [
                    ("a", "It raises the clock frequency", false),
                    ("b", "It amortizes fixed per-batch overhead across more requests", true),
                    ("c", "It reduces the model's parameter count", false),
                    ("d", "It cools the chip", false),
                ],
                "Weight loads and launch overhead are paid once per batch. Spreading them over more requests keeps the compute units busy.",
            ),
            q(
                "An operator keeps raising batch size and watches p50 latency climb while throughput flattens.",
                "What is the lesson?",
                [
                    ("a", "Throughput gains are free", false),
                    ("b", "Past saturation, bigger batches only buy latency", true),
                    ("c", "Latency and throughput are independent", false),
                    ("d", "Arrival rate controls processing time", false),
                ],
                "Once the accelerator is saturated, extra batch size no longer raises throughput but requests still wait longer for the batch to fill.",
            ),
            q(
                "During a traffic lull the arrival rate drops sharply while batch size stays fixed.",
                "What happens to a single request's latency?",
                [
                    ("a", "It falls — batches fill faster", false),
                    ("b", "It rises — the batch takes longer to fill", true),
                    ("c", "It is unchanged", false),
                    ("d", "The server crashes", false),
                ],
                "Fill time is batch / arrival rate. Fewer arrivals stretch the fill window, which is why servers add a batching timeout for quiet periods.",
            ),
        ],
        applications: vec![
            ApplicationEntry {
                id: "llm-serving",
                title: "LLM serving stacks",
                summary: "Production LLM servers batch concurrent prompts continuously, rebuilding the batch every step so new requests slot in without waiting for the longest one.",
                sector: "Machine learning",
            },
            ApplicationEntry {
                id: "gpu-training",
                title: "Training throughput",
                summary: "Training jobs pick the largest batch that fits memory for raw throughput — the same amortization argument with no latency constraint at all.",
                sector: "Machine learning",
            },
            ApplicationEntry {
                id: "disk-io",
                title: "Write coalescing",
                summary: "Databases and filesystems group small writes into one flush, trading a bounded delay for far fewer expensive disk round-trips.",
                sector: "Storage",
            },
            ApplicationEntry {
                id: "ride-pooling",
                title: "Ride pooling",
                summary: "Ride-share pooling holds riders briefly to match them into one vehicle: per-rider cost drops while each rider's wait grows — batching with people.",
                sector: "Logistics",
            },
        ],
    };
}
