use clap::{Parser, Subcommand};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use raw_image_urls::{config, export, inventory, logging, output, repo};
use std::path::{Path, PathBuf};

fn version_string() -> &'static str {
    if env!("RAW_IMAGE_URLS_ON_TAG") == "true" {
        return env!("CARGO_PKG_VERSION");
    }
    let hash = env!("RAW_IMAGE_URLS_GIT_HASH");
    if hash.is_empty() {
        "dev@unknown"
    } else {
        // Leaked once at startup
        Box::leak(format!("dev@{hash}").into_boxed_str())
    }
}

#[derive(Parser)]
#[command(name = "raw-image-urls")]
#[command(about = "List a GitHub checkout's JPEG images as raw.githubusercontent.com URLs")]
#[command(long_about = "\
List a GitHub checkout's JPEG images as raw.githubusercontent.com URLs

The repository is identified from the `origin` remote (must be
https://github.com/<owner>/<repo>) and the checked-out branch. Every
.jpg/.jpeg file under --root (any directory inside the checkout),
outside .git, gets a URL with its path from the repository top level:

  https://raw.githubusercontent.com/<owner>/<repo>/<branch>/<path>

Commands:
  list     print every URL
  export   print a summary and write image_urls_only.txt,
           image_data.json and image_data.csv to --output

Run 'raw-image-urls gen-config' for a documented .raw-image-urls.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Repository working tree to scan
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Directory `export` writes its files into
    #[arg(long, default_value = ".", global = true)]
    output: PathBuf,

    #[command(flatten)]
    verbosity: Verbosity<WarnLevel>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the raw URL of every image
    List,
    /// Print a summary and write URL, JSON and CSV files
    Export,
    /// Print a stock .raw-image-urls.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::setup_logger(cli.verbosity.tracing_level_filter());

    match cli.command {
        Command::List => {
            let Some((_, inventory)) = prepare(&cli.root)? else {
                return Ok(());
            };
            output::print_list_output(&inventory);
        }
        Command::Export => {
            let Some((config, inventory)) = prepare(&cli.root)? else {
                return Ok(());
            };
            let bundle = match export::build_bundle(&inventory) {
                Ok(bundle) => bundle,
                Err(e) => {
                    println!("{}", output::format_error(&e));
                    return Ok(());
                }
            };
            output::print_export_summary(&bundle, config.console.sample_urls);
            let written = export::write_outputs(&bundle, &cli.output, &config.outputs)?;
            output::print_written_files(&bundle, &written);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load config and build the inventory for the checkout at `root`.
///
/// Returns `Ok(None)` after printing the error when the repository can't be
/// identified; filesystem failures are returned as errors.
fn prepare(
    root: &Path,
) -> Result<Option<(config::Config, inventory::Inventory)>, Box<dyn std::error::Error>> {
    let config = config::load_config(root)?;
    let git = repo::GitCli::new(root);

    match inventory::build(&git, root, &config) {
        Ok(inventory) => Ok(Some((config, inventory))),
        Err(e) if e.is_fatal() => Err(e.into()),
        Err(e) => {
            println!("{}", output::format_error(&e));
            Ok(None)
        }
    }
}
