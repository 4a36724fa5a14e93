//! Sketch Eval CLI
//!
//! Usage:
//!   sketch-eval [OPTIONS] [FILE]
//!
//! Options:
//!   -c, --criteria <FILE>  Success criteria (JSON)
//!   -l, --layout <FILE>    UI layout descriptor (TOML or JSON)
//!   --json                 Print the full result as JSON
//!   --print-layout         Print the built-in layout descriptor
//!   -h, --help             Print help

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use sketch_eval::layout::DEFAULT_LAYOUT;
use sketch_eval::{Criteria, Evaluator, Layout};

#[derive(Parser)]
#[command(name = "sketch-eval")]
#[command(about = "Score pointer-action logs from drawing agents")]
struct Cli {
    /// Action log (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Success criteria file (JSON)
    #[arg(short, long)]
    criteria: Option<PathBuf>,

    /// Layout descriptor (TOML if the extension is .toml, JSON otherwise)
    #[arg(short, long)]
    layout: Option<PathBuf>,

    /// Print the full evaluation result as JSON instead of the report
    #[arg(long)]
    json: bool,

    /// Print the built-in layout descriptor and exit
    #[arg(long)]
    print_layout: bool,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if cli.print_layout {
        println!("{}", DEFAULT_LAYOUT.trim());
        return;
    }

    let layout = match &cli.layout {
        Some(path) => match Layout::from_file(path) {
            Ok(l) => l,
            Err(e) => fail(format!("Error loading layout '{}': {}", path.display(), e)),
        },
        None => Layout::default(),
    };

    let criteria = cli.criteria.as_deref().map(|path| {
        let text = read_file(path);
        match serde_json::from_str::<Criteria>(&text) {
            Ok(c) => c,
            Err(e) => fail(format!("Error parsing criteria '{}': {}", path.display(), e)),
        }
    });

    let source = match &cli.input {
        Some(path) => read_file(path),
        None => {
            let mut buffer = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buffer) {
                fail(format!("Error reading from stdin: {}", e));
            }
            buffer
        }
    };

    let actions: serde_json::Value = match serde_json::from_str(&source) {
        Ok(v) => v,
        Err(e) => fail(format!("Error parsing action log: {}", e)),
    };

    let evaluator = Evaluator::new(layout);
    let result = evaluator.evaluate(&actions, None, criteria.as_ref());

    if cli.json {
        match serde_json::to_string_pretty(&result) {
            Ok(text) => println!("{}", text),
            Err(e) => fail(format!("Error serializing result: {}", e)),
        }
    } else {
        println!("{}", evaluator.generate_feedback(&result));
    }
}

/// Log to stderr; `RUST_LOG` overrides the default `warn` level
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .try_init()
        .ok();
}

fn read_file(path: &Path) -> String {
    match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => fail(format!("Error reading file '{}': {}", path.display(), e)),
    }
}

fn fail(message: String) -> ! {
    eprintln!("{}", message);
    std::process::exit(1);
}
