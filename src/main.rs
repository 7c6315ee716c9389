use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use theme_explorer::environment::Settings;
use theme_explorer::preview::Preview;
use theme_explorer::prompt::theme_prompt;
use theme_explorer::web::{self, AppState};
use theme_explorer::{
    extract_themes, find_by_label, logging, shared_dataset, Dataset, EntryId, Error, Selected,
};

#[derive(Parser)]
#[clap(
    name = "theme-explorer",
    about = "Browse scraped health pages and extract their key themes with a local model"
)]
struct Cli {
    /// Dataset of scraped entries (defaults to $DATASET_PATH or scraped_articles.json)
    #[clap(long)]
    dataset: Option<PathBuf>,

    /// Model executable (defaults to $MODEL_PROGRAM or ollama)
    #[clap(long)]
    model_program: Option<String>,

    /// Model name passed as `run <MODEL>` (defaults to $MODEL_NAME or mistral)
    #[clap(long)]
    model: Option<String>,

    /// Treat a non-zero model exit code as a failure
    #[clap(long)]
    strict_exit: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the selectable entries
    List,

    /// Show the content preview of an entry
    Show(EntryArg),

    /// Print the prompt that would be sent to the model
    Prompt(EntryArg),

    /// Extract key themes of an entry with the model
    Themes(EntryArg),

    /// Serve the viewer over HTTP
    Serve {
        /// Port to listen on (defaults to $PORT or 8080)
        #[clap(short, long)]
        port: Option<u16>,
    },
}

/// Picks an entry by id, or by its `Title (type)` label.
#[derive(Args)]
struct EntryArg {
    /// Entry id, as printed by `list`
    #[clap(required_unless_present = "label", conflicts_with = "label")]
    id: Option<EntryId>,

    /// Entry label, e.g. "Hearing Basics (article)"; the first match wins
    #[clap(long)]
    label: Option<String>,
}

impl EntryArg {
    fn resolve(self, dataset: &Dataset) -> Result<Selected<'_>, Error> {
        let selection = dataset.selectable();
        if selection.is_empty() {
            return Err(Error::NoSelectableEntries);
        }

        match (self.id, self.label) {
            (Some(id), _) => dataset
                .get_selectable(id)
                .map(|entry| Selected { id, entry })
                .ok_or_else(|| Error::EntryNotFound(format!("id {}", id))),
            (None, Some(label)) => find_by_label(&selection, &label)
                .ok_or_else(|| Error::EntryNotFound(format!("label {:?}", label))),
            (None, None) => Err(Error::EntryNotFound("an empty selection".to_string())),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::configure_logging("theme-explorer");

    let cli = Cli::parse();

    let mut settings = Settings::from_env();
    if let Some(dataset) = cli.dataset {
        settings.dataset_path = dataset;
    }
    if let Some(program) = cli.model_program {
        settings.model_program = program;
    }
    if let Some(model) = cli.model {
        settings.model_name = model;
        settings.model_args.clear();
    }
    settings.strict_exit |= cli.strict_exit;

    let dataset = shared_dataset(&settings.dataset_path).map_err(Error::from)?;
    let runner = settings.model_command();

    match cli.command {
        Commands::List => {
            let selection = dataset.selectable();
            if selection.is_empty() {
                return Err(Error::NoSelectableEntries.into());
            }
            for selected in selection {
                println!("{:>4}  {}", selected.id, selected.label());
            }
        }
        Commands::Show(arg) => {
            let selected = arg.resolve(dataset)?;
            println!("{}", Preview::new(selected.entry).to_markdown());
        }
        Commands::Prompt(arg) => {
            let selected = arg.resolve(dataset)?;
            println!("{}", theme_prompt(selected.entry));
        }
        Commands::Themes(arg) => {
            let selected = arg.resolve(dataset)?;
            info!(
                "🧠 Extracting key themes for {} with {} {}",
                selected.label(),
                runner.program(),
                runner.args().join(" ")
            );
            let entry = selected.entry;
            let themes =
                tokio::task::spawn_blocking(move || extract_themes(entry, &runner)).await??;

            println!("### Extracted Themes\n{}", themes.trim());
        }
        Commands::Serve { port } => {
            let state = AppState {
                dataset,
                runner: Arc::new(runner),
            };
            web::serve(state, port.unwrap_or(settings.port)).await?;
        }
    }

    Ok(())
}
