//! Persona console - line-oriented driver for the persona engine
//!
//! Plain lines are sent as chat messages. Commands:
//! `/extract`, `/compare <text>`, `/persona <key>`, `/personalities`,
//! `/memory on|off`, `/close`, `/quit`.

use persona_engine::{
    ClientConfig, ComparisonSet, FlowRejected, FlowResult, HttpBackend, LoggingBackend,
    MemorySnapshot, Message, Session,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type ConsoleSession = Session<LoggingBackend<HttpBackend>>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so the transcript on stdout stays readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "persona_engine=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let config = ClientConfig::from_env();
    let http = HttpBackend::from_config(&config)?;
    tracing::info!(base_url = http.base_url(), "Using backend");

    let backend = LoggingBackend::new(http);
    let session = Session::new(backend, config);
    session.start().await;

    let mut shown = render_transcript(&session, 0);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        match Command::parse(line) {
            Command::Quit => break,
            Command::Send(text) => {
                session.set_input(text);
                report(session.send().await);
            }
            Command::Extract => {
                // A failed extraction keeps the previous snapshot; don't reprint it
                if report(session.extract_memory().await) {
                    if let Some(memory) = session.memory() {
                        render_memory(&memory);
                    }
                }
            }
            Command::Compare(text) => {
                session.set_input(text);
                if report(session.compare().await) {
                    if let Some(set) = session.comparisons() {
                        render_comparisons(&set);
                    }
                }
            }
            Command::Persona(key) => {
                session.select_personality(key);
                println!("[personality: {key}]");
            }
            Command::Personalities => {
                let current = session.selection().personality;
                for p in session.personalities() {
                    let marker = if p.key == current { "*" } else { " " };
                    println!("{marker} {} ({})", p.name, p.key);
                }
            }
            Command::Memory(on) => {
                session.set_use_memory(on);
                println!("[use memory: {on}]");
            }
            Command::Close => {
                session.close_comparison();
                println!("[comparison closed]");
            }
            Command::Unknown(cmd) => println!("[unknown command: {cmd}]"),
        }
        shown = render_transcript(&session, shown);
    }

    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Send(&'a str),
    Extract,
    Compare(&'a str),
    Persona(&'a str),
    Personalities,
    Memory(bool),
    Close,
    Quit,
    Unknown(&'a str),
}

impl<'a> Command<'a> {
    fn parse(line: &'a str) -> Self {
        let Some(rest) = line.strip_prefix('/') else {
            return Command::Send(line);
        };
        let (name, arg) = rest.split_once(' ').unwrap_or((rest, ""));
        let arg = arg.trim();
        match name {
            "extract" => Command::Extract,
            "compare" => Command::Compare(arg),
            "persona" if !arg.is_empty() => Command::Persona(arg),
            "personalities" => Command::Personalities,
            "memory" if arg == "on" => Command::Memory(true),
            "memory" if arg == "off" => Command::Memory(false),
            "close" => Command::Close,
            "quit" | "exit" => Command::Quit,
            _ => Command::Unknown(line),
        }
    }
}

/// Returns whether the flow completed. Recovered failures are already in
/// the transcript as notices.
fn report(result: FlowResult) -> bool {
    if let Err(FlowRejected::Busy) = result {
        println!("[busy: wait for the current request]");
    }
    result.is_ok_and(|outcome| outcome.is_completed())
}

fn render_transcript(session: &ConsoleSession, shown: usize) -> usize {
    let new = session.transcript_since(shown);
    for msg in &new {
        println!("{}", format_message(msg));
    }
    shown + new.len()
}

fn format_message(msg: &Message) -> String {
    let label = if msg.is_system {
        "System"
    } else {
        match msg.role {
            persona_engine::Role::User => "You",
            persona_engine::Role::Assistant => "Assistant",
        }
    };
    format!("{label}: {}", msg.content)
}

fn render_memory(memory: &MemorySnapshot) {
    println!("--- Extracted memory ---");
    for p in memory.preferences() {
        println!(
            "[preference] {}: {} ({}% | \"{}\")",
            p.category,
            p.preference,
            p.confidence_percent(),
            p.evidence
        );
    }
    for e in memory.emotional_patterns() {
        println!(
            "[emotion] {} ({}) triggers: {} | \"{}\"",
            e.emotion,
            e.frequency,
            e.triggers.join(", "),
            e.evidence
        );
    }
    for f in memory.facts() {
        println!(
            "[fact] [{}] {} ({} | \"{}\")",
            f.importance.to_uppercase(),
            f.fact,
            f.category,
            f.evidence
        );
    }
    if let Some(summary) = memory.summary.as_deref().filter(|s| !s.is_empty()) {
        println!("[summary] {summary}");
    }
}

fn render_comparisons(set: &ComparisonSet) {
    println!("--- Personality comparison ---");
    for (_, entry) in set.iter() {
        println!("{}: {}", entry.name, entry.response);
    }
}
