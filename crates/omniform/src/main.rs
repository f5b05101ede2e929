use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use omniform::commands::{self, ScanOverrides};
use omniform::config::ConfigLoader;
use omniform_mapping::ScorerKind;
use omniform_scanner::RegistryView;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "omniform", version, about = "Form field discovery and column mapping")]
struct Args {
    /// Configuration file (defaults to ./omniform.yaml, then ~/.omniform/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scan an HTML file and print the best selector for every form field
    Scan {
        html: PathBuf,

        /// Descend into srcdoc iframes
        #[arg(long)]
        iframes: bool,

        /// Do not descend into declarative shadow roots
        #[arg(long)]
        no_shadow: bool,

        #[arg(long)]
        max_depth: Option<usize>,

        /// Selector to suppress (repeatable)
        #[arg(long = "blacklist")]
        blacklist: Vec<String>,

        /// Write the JSON result here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Pair selectors with column headers by name similarity
    AutoMap {
        /// Scan result produced by `omniform scan`
        #[arg(long, conflicts_with = "selectors", required_unless_present = "selectors")]
        scan: Option<PathBuf>,

        /// Comma-separated selectors
        #[arg(long, value_delimiter = ',')]
        selectors: Vec<String>,

        /// Comma-separated column headers
        #[arg(long, value_delimiter = ',', required_unless_present = "headers_file")]
        headers: Vec<String>,

        /// CSV file whose first line holds the headers
        #[arg(long, conflicts_with = "headers")]
        headers_file: Option<PathBuf>,

        #[arg(long)]
        threshold: Option<f64>,

        #[arg(long)]
        scorer: Option<ScorerKind>,
    },
    /// Pair selectors with columns by position
    Generate {
        #[arg(long, value_delimiter = ',', required = true)]
        selectors: Vec<String>,

        #[arg(long, value_delimiter = ',', required = true)]
        columns: Vec<String>,
    },
    /// Manage saved mappings
    Mapping {
        #[command(subcommand)]
        action: MappingAction,
    },
}

#[derive(Subcommand, Debug)]
enum MappingAction {
    /// Validate a JSON mapping file and save it under an id
    Save { id: String, file: PathBuf },
    /// Print a saved mapping
    Load { id: String },
    /// Resolve a saved mapping against a JSON row object
    Apply {
        id: String,
        #[arg(long)]
        row: PathBuf,
    },
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Logs go to stderr; stdout carries JSON results.
    let level = if args.quiet {
        "error"
    } else if args.verbose {
        "debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = ConfigLoader::load(args.config.as_deref()).await?;

    match args.command {
        Command::Scan {
            html,
            iframes,
            no_shadow,
            max_depth,
            blacklist,
            out,
        } => {
            let options = ScanOverrides {
                include_embedded_documents: iframes,
                exclude_shadow_boundaries: no_shadow,
                max_depth,
                blacklist_selectors: blacklist,
            }
            .apply(config.scan);

            let markup = commands::read_text(&html).await?;
            let view = commands::scan_markup(&markup, &options);

            match out {
                Some(path) => {
                    let json = serde_json::to_string_pretty(&view)?;
                    tokio::fs::write(&path, json)
                        .await
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    info!(path = %path.display(), entries = view.len(), "Wrote scan result");
                }
                None => print_json(&view)?,
            }
        }
        Command::AutoMap {
            scan,
            selectors,
            headers,
            headers_file,
            threshold,
            scorer,
        } => {
            let selectors = match scan {
                Some(path) => {
                    let view: RegistryView = commands::read_json(&path).await?;
                    commands::ranked_selectors(&view)
                }
                None => selectors,
            };
            let headers = match headers_file {
                Some(path) => commands::read_headers_file(&path).await?,
                None => headers,
            };

            let mut auto_map = config.auto_map;
            if let Some(threshold) = threshold {
                if !(0.0..=1.0).contains(&threshold) {
                    bail!("Threshold must be between 0 and 1, got {}", threshold);
                }
                auto_map.threshold = threshold;
            }
            if let Some(scorer) = scorer {
                auto_map.scorer = scorer;
            }

            let mapping = commands::auto_map_selectors(&selectors, &headers, &auto_map.options());
            print_json(&mapping)?;
        }
        Command::Generate { selectors, columns } => {
            let mapping = commands::generate(&selectors, &columns)?;
            print_json(&mapping)?;
        }
        Command::Mapping { action } => {
            let repo = commands::repository(&config.storage.dir);
            match action {
                MappingAction::Save { id, file } => {
                    let mapping = commands::save_mapping_file(&repo, &id, &file).await?;
                    println!("Saved mapping `{}` ({} entries)", id, mapping.len());
                }
                MappingAction::Load { id } => {
                    let mapping = commands::load_mapping(&repo, &id).await?;
                    print_json(&mapping)?;
                }
                MappingAction::Apply { id, row } => {
                    let values = commands::apply_mapping_to_row(&repo, &id, &row).await?;
                    print_json(&values)?;
                }
            }
        }
    }

    Ok(())
}
