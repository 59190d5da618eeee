//! Tenphase CLI
//!
//! Usage:
//!   tenphase --list                         # Show the lesson catalog
//!   tenphase --game back-emf-lab            # Interactive lesson walkthrough
//!   tenphase --game batch-flow --phase test # Start at a phase hint
//!   tenphase --serve                        # HTTP API server
//!   tenphase --game grid-queue --json       # JSON event/status output

use clap::Parser;
use colored::Colorize;
use std::io::{self, BufRead, Write};

use tenphase::content::{self, GameKind};
use tenphase::core::{run_server, LessonSession, SilentCues, TerminalBell, Transition};
use tenphase::types::{EventSink, LessonEvent, ParamValue, Phase, PHASE_ORDER};
use tenphase::VERSION;

#[derive(Parser, Debug)]
#[command(
    name = "tenphase",
    version = VERSION,
    about = "Tenphase - interactive explainer lessons in the terminal",
    long_about = "Tenphase walks a learner through a fixed ten-phase lesson\n\
                  (hook → predict → play → review → twist cycle → transfer →\n\
                  test → mastery) around one physics or systems concept.\n\n\
                  Lessons:\n  \
                  back-emf-lab  Motor back-EMF and stall current\n  \
                  batch-flow    Inference batching and latency\n  \
                  thermal-rail  Thermal expansion of long structures\n  \
                  grid-queue    Grid interconnection queues"
)]
struct Args {
    /// Lesson to run, e.g. back-emf-lab
    #[arg(short, long)]
    game: Option<String>,

    /// Initial phase hint (unrecognized values start at hook)
    #[arg(short, long)]
    phase: Option<String>,

    /// List the shipped lessons
    #[arg(short, long)]
    list: bool,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address (default: 127.0.0.1:3000)
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: String,

    /// Emit events and status as JSON lines
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Disable the terminal-bell sound cues
    #[arg(long)]
    quiet: bool,
}

/// Sink that prints each emitted event to stdout
struct PrintSink {
    json: bool,
    no_color: bool,
}

impl EventSink for PrintSink {
    fn emit(&mut self, event: LessonEvent) {
        if self.json {
            println!("{}", serde_json::to_string(&event).unwrap_or_default());
        } else if !self.no_color {
            println!("{}", format!("  · {}", event.event_type).dimmed());
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if args.serve {
        run_serve(&args).await;
    } else if args.list {
        run_list(&args);
    } else if let Some(ref game) = args.game {
        match GameKind::parse(game) {
            Some(kind) => run_lesson(kind, &args),
            None => {
                eprintln!("Unknown lesson '{}'. Try --list.", game);
                std::process::exit(2);
            }
        }
    } else {
        run_list(&args);
        println!();
        println!("Pick one with: tenphase --game <id>");
    }
}

/// Print the lesson catalog
fn run_list(args: &Args) {
    if args.json {
        let rows: Vec<_> = content::catalog()
            .into_iter()
            .map(|c| {
                serde_json::json!({
                    "game_type": c.kind.id(),
                    "title": c.title,
                    "tagline": c.tagline,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows).unwrap_or_default());
        return;
    }

    print_header("Lesson Catalog", args.no_color);
    for c in content::catalog() {
        if args.no_color {
            println!("  {:14} {}", c.kind.id(), c.title);
        } else {
            println!("  {:14} {}", c.kind.id().cyan(), c.title.bold());
        }
        println!("  {:14} {}", "", c.tagline);
    }
}

/// Run one lesson interactively
fn run_lesson(kind: GameKind, args: &Args) {
    let sink = Box::new(PrintSink { json: args.json, no_color: args.no_color });
    let cues: Box<dyn tenphase::core::CueSink> =
        if args.quiet { Box::new(SilentCues) } else { Box::new(TerminalBell) };
    let mut session = LessonSession::new(kind, args.phase.as_deref(), sink, cues);

    print_header(session.content().title, args.no_color);
    println!("{}", session.content().tagline);
    println!();
    println!("Commands: next, go <phase>, set <knob> <value>, metrics,");
    println!("          predict <text>, question, answer <id>, submit,");
    println!("          apps, view <id>, status, record, sound, reset, quit");
    println!("Phases:   {}", PHASE_ORDER.map(|p| p.name()).join(" → "));
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        let prompt = format_prompt(&session, args.no_color);
        print!("{}", prompt);
        let _ = stdout.flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => break,
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            println!("\nLesson ended. Events: {}", session.event_log().len());
            break;
        }
        if line.is_empty() {
            continue;
        }

        handle_command(&mut session, line, args);
    }
}

/// Dispatch one interactive command
fn handle_command(session: &mut LessonSession, line: &str, args: &Args) {
    let mut parts = line.split_whitespace();
    let command = parts.next().unwrap_or("");
    let rest: Vec<&str> = parts.collect();

    match command {
        "next" => report_transition(session.next_phase(), session, args),
        "go" => match rest.first().and_then(|s| Phase::parse(s)) {
            Some(target) => report_transition(session.go_to_phase(target), session, args),
            None => println!("Usage: go <phase>  (e.g. go play)"),
        },
        "set" => handle_set(session, &rest),
        "metrics" => print_metrics(session, args),
        "predict" => {
            if rest.is_empty() {
                println!("Usage: predict <your prediction>");
            } else {
                session.make_prediction(&rest.join(" "));
                println!("Prediction noted.");
            }
        }
        "question" | "q" => print_question(session, args),
        "answer" => match rest.first() {
            Some(id) => {
                let index = session.quiz().current_question();
                if session.select_answer(index, id) {
                    println!("Selected '{}'. Use 'submit' to lock it in.", id);
                } else {
                    println!("That option does not belong to this question.");
                }
            }
            None => println!("Usage: answer <option id>"),
        },
        "submit" => handle_submit(session, args),
        "apps" => print_apps(session, args),
        "view" => match rest.first() {
            Some(id) => {
                if session.view_application(id) {
                    print_apps(session, args);
                } else {
                    println!("Unknown application '{}'. Use 'apps' to list them.", id);
                }
            }
            None => println!("Usage: view <application id>"),
        },
        "status" => {
            let status = session.status();
            if args.json {
                println!("{}", serde_json::to_string(&status).unwrap_or_default());
            } else if args.no_color {
                println!("{}", status.to_parseable_string());
            } else {
                println!("{}", status.to_terminal_string());
            }
        }
        "record" => handle_record(session, args),
        "sound" => {
            let enabled = session.toggle_sound();
            println!("Sound cues {}.", if enabled { "on" } else { "off" });
        }
        "reset" => {
            session.reset();
            println!("Lesson restarted from hook.");
        }
        _ => println!("Unknown command '{}'.", command),
    }
}

/// set <knob> <value>
fn handle_set(session: &mut LessonSession, rest: &[&str]) {
    let (Some(key), Some(raw)) = (rest.first(), rest.get(1)) else {
        println!("Usage: set <knob> <value>");
        for spec in session.params().specs() {
            println!(
                "  {:22} {} .. {} {}",
                spec.key, spec.min, spec.max, spec.unit
            );
        }
        return;
    };

    let value = match (raw.parse::<f64>(), raw.parse::<bool>()) {
        (Ok(n), _) => ParamValue::Number(n),
        (_, Ok(b)) => ParamValue::Toggle(b),
        _ => {
            println!("'{}' is not a number or true/false.", raw);
            return;
        }
    };

    match session.set_param(key, value) {
        Some(ParamValue::Number(v)) => println!("{} = {}", key, v),
        Some(ParamValue::Toggle(b)) => println!("{} = {}", key, b),
        None => println!("No knob named '{}'. Use 'set' to list them.", key),
    }
}

/// Print the current derived metrics
fn print_metrics(session: &LessonSession, args: &Args) {
    if args.json {
        println!(
            "{}",
            serde_json::to_string(&session.metrics()).unwrap_or_default()
        );
        return;
    }
    let json = serde_json::to_value(session.metrics()).unwrap_or_default();
    if let Some(map) = json.as_object() {
        for (key, value) in map {
            println!("  {:22} {}", key, value);
        }
    }
}

/// Print the current question with its options
fn print_question(session: &LessonSession, args: &Args) {
    let index = session.quiz().current_question();
    let question = &session.quiz().questions()[index];

    if args.no_color {
        println!("Question {}/10", index + 1);
    } else {
        println!("{}", format!("Question {}/10", index + 1).bold());
    }
    println!("{}", question.scenario);
    println!("{}", question.prompt);
    for option in &question.options {
        println!("  [{}] {}", option.id, option.label);
    }
}

/// Submit the current question's answer and report the outcome
fn handle_submit(session: &mut LessonSession, args: &Args) {
    let index = session.quiz().current_question();
    let Some(outcome) = session.submit_answer(index) else {
        println!("Nothing selected yet, or this question is already locked.");
        return;
    };

    if outcome.correct {
        let message = "✓ Correct.";
        println!("{}", if args.no_color { message.to_string() } else { message.green().to_string() });
    } else {
        let message = format!("✗ Not quite - the answer was [{}].", outcome.correct_id);
        println!("{}", if args.no_color { message.clone() } else { message.red().to_string() });
    }
    println!("{}", outcome.explanation);

    if let Some((score, total)) = outcome.final_score {
        let passed = score >= tenphase::PASS_THRESHOLD;
        println!();
        println!("Quiz complete: {}/{} - {}", score, total, if passed { "PASS" } else { "below the pass mark" });
        if passed {
            println!("Advance to mastery with 'next' to earn the record.");
        }
    } else {
        session.next_question();
        print_question(session, args);
    }
}

/// Print the transfer-phase applications with completion marks
fn print_apps(session: &LessonSession, args: &Args) {
    for entry in session.transfer().entries() {
        let mark = if session.transfer().is_completed(entry.id) { "x" } else { " " };
        if args.no_color {
            println!("  [{}] {:20} {} ({})", mark, entry.id, entry.title, entry.sector);
        } else {
            println!("  [{}] {:20} {} ({})", mark, entry.id.cyan(), entry.title.bold(), entry.sector);
        }
        println!("      {}", entry.summary);
    }
    println!(
        "  {}/4 completed{}",
        session.transfer().completed_count(),
        if session.transfer().all_completed() { " - test phase unlocked" } else { "" }
    );
}

/// Fetch and print the mastery record
fn handle_record(session: &LessonSession, args: &Args) {
    let result = session.mastery_record();
    match result.record {
        Some(record) => {
            if args.json {
                println!(
                    "{}",
                    serde_json::json!({
                        "record_hex": record.to_hex(),
                        "score": record.score,
                        "total": record.total,
                    })
                );
            } else {
                println!("Mastery record ({} bytes):", record.to_bytes().len());
                println!("  {}", &record.to_hex()[0..64]);
                println!("  ...");
                println!("  score {}/{}", record.score, record.total);
            }
        }
        None => println!("No record yet: {}", result.reason),
    }
}

/// Report a navigation outcome
fn report_transition(outcome: Transition, session: &LessonSession, args: &Args) {
    match outcome {
        Transition::Moved(phase) => {
            if !args.no_color {
                println!("{}", format!("→ {}", phase).bold());
            }
            print_phase_intro(session, args);
        }
        Transition::AlreadyThere => println!("Already there."),
        Transition::Debounced => println!("Too fast - give it a moment."),
        Transition::Terminal => println!("This is the end of the lesson."),
        Transition::Blocked => {
            println!("Finish all four applications first ('apps', then 'view <id>').")
        }
    }
}

/// A line of guidance when entering a phase
fn print_phase_intro(session: &LessonSession, args: &Args) {
    match session.phase() {
        Phase::Hook => println!("{}", session.content().tagline),
        Phase::Predict | Phase::TwistPredict => {
            println!("Commit a prediction before playing: predict <text>")
        }
        Phase::Play | Phase::TwistPlay => {
            println!("Move the knobs ('set') and watch 'metrics'.")
        }
        Phase::Review | Phase::TwistReview => {
            println!("Compare 'metrics' against your prediction.")
        }
        Phase::Transfer => print_apps(session, args),
        Phase::Test => print_question(session, args),
        Phase::Mastery => handle_record(session, args),
    }
}

/// Print header
fn print_header(title: &str, no_color: bool) {
    if no_color {
        println!("========================================");
        println!("  Tenphase v{} - {}", VERSION, title);
        println!("========================================");
    } else {
        println!("{}", "═".repeat(44).bold());
        println!("{}", format!("  Tenphase v{} - {}", VERSION, title).bold());
        println!("{}", "═".repeat(44).bold());
    }
    println!();
}

/// Format the interactive prompt
fn format_prompt(session: &LessonSession, no_color: bool) -> String {
    let phase = session.phase();
    if no_color {
        format!("[{}] > ", phase)
    } else {
        format!(
            "{}{} [{}]{} > ",
            phase.color_code(),
            phase.emoji(),
            phase,
            Phase::color_reset()
        )
    }
}

/// Run HTTP API server
async fn run_serve(args: &Args) {
    println!();
    print_header("API Server", args.no_color);

    if let Err(e) = run_server(&args.addr).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
