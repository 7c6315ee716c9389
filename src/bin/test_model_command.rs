//! # Model Command Test Utility
//!
//! Sends a prompt to the configured model executable and reports what came
//! back: stdout, stderr, exit status and timing.
//!
//! ## Usage
//!
//! ```
//! # Default model (ollama run mistral)
//! cargo run --bin test_model_command
//!
//! # Another model and a custom prompt
//! cargo run --bin test_model_command -- --model llama3 --prompt "List three heart health themes."
//! ```

use clap::Parser;
use std::time::Instant;
use theme_explorer::environment::Settings;
use theme_explorer::ModelRunner;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[clap(about = "Check that the local model command answers prompts")]
struct Args {
    /// Model executable (defaults to $MODEL_PROGRAM or ollama)
    #[clap(long)]
    program: Option<String>,

    /// Model name passed as `run <MODEL>` (defaults to $MODEL_NAME or mistral)
    #[clap(long)]
    model: Option<String>,

    /// Prompt to send
    #[clap(
        long,
        default_value = "Name three common health concerns for adults over 50.\n\nKey Themes:\n-"
    )]
    prompt: String,
}

fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let mut settings = Settings::from_env();
    if let Some(program) = args.program {
        settings.model_program = program;
    }
    if let Some(model) = args.model {
        settings.model_name = model;
        settings.model_args.clear();
    }
    let command = settings.model_command();

    info!("Running: {} {}", command.program(), command.args().join(" "));
    let start = Instant::now();

    match command.run(&args.prompt) {
        Ok(output) => {
            info!("Model finished in {:?} with {}", start.elapsed(), output.status);
            println!("\n---STDOUT---\n{}\n---END STDOUT---", output.stdout.trim_end());
            if !output.stderr.trim().is_empty() {
                println!("\n---STDERR---\n{}\n---END STDERR---", output.stderr.trim_end());
            }
            if !output.status.success() {
                warn!("Model exited unsuccessfully; its stdout would still be shown to users");
            }
            info!(
                "Response length: {} characters, {} lines",
                output.stdout.chars().count(),
                output.stdout.lines().count()
            );
        }
        Err(e) => {
            eprintln!("Model invocation failed: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
