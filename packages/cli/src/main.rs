//! `ddv`: Digitale Delta metadata validator command-line interface.
//!
//! Provides three subcommands:
//!
//! - **`validate`**: check a service's metadata against a rule set and
//!   write the diagnostics to a file.
//! - **`extract`**: derive a rule set from a service's metadata.
//! - **`inspect`**: print the type catalog of a service's metadata.
//!
//! Every location argument is either a local file or an http(s) URL. For
//! the metadata being examined, a URL is the service root; `/$metadata` is
//! appended automatically.
//!
//! Exit codes: 0 success, 1 diagnostics were found, 2 the command failed.

mod fetch;

use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

use clap::{Parser, Subcommand};
use ddvalidator::{
    compile_rules, inspect, read_rules, render, validate_with, write_rules, TypeCatalog,
    ValidationOptions,
};

use fetch::{Fetcher, Kind};

/// ddv: Digitale Delta metadata validator
///
/// Validate OData metadata against rule sets, or extract rule sets from it.
#[derive(Parser)]
#[command(name = "ddv", version, about, long_about = None)]
struct Cli {
    /// Simple name of the type inspection starts from.
    #[arg(long, global = true, env = "DDV_ROOT_TYPE", default_value = ddvalidator::DEFAULT_ROOT_TYPE)]
    root_type: String,

    /// Timeout in seconds for fetching remote locations.
    #[arg(long, global = true, env = "DDV_FETCH_TIMEOUT_SECS", default_value_t = 30)]
    timeout: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate metadata against a rule set.
    ///
    /// Writes one diagnostic per line to RESULT; an empty file means the
    /// metadata satisfies the rule set. Exits 1 when diagnostics were written.
    Validate {
        /// Rule set CSV: the definition that holds the truth. File or URL.
        source: String,

        /// Metadata to examine: service root URL (without `/$metadata`) or
        /// CSDL file.
        examine: String,

        /// File that receives the diagnostics.
        result: PathBuf,

        /// Also report properties that no rule of their entity mentions.
        #[arg(long)]
        strict: bool,
    },

    /// Extract a rule set from metadata.
    ///
    /// Every property of every type reachable from the root type becomes one
    /// rule row; non-nullable properties are required.
    Extract {
        /// Metadata to examine: service root URL (without `/$metadata`) or
        /// CSDL file.
        examine: String,

        /// File that receives the rule set CSV.
        result: PathBuf,
    },

    /// Print the type catalog of metadata.
    Inspect {
        /// Metadata to examine: service root URL (without `/$metadata`) or
        /// CSDL file.
        examine: String,

        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();
    let fetcher = Fetcher::new(Duration::from_secs(cli.timeout)).unwrap_or_else(|e| fatal(&e));

    match cli.command {
        Command::Validate {
            source,
            examine,
            result,
            strict,
        } => {
            let rules_text = fetcher
                .load(&source, Kind::RuleSet)
                .unwrap_or_else(|e| fatal(&e));
            let rules = read_rules(&rules_text)
                .unwrap_or_else(|e| fatal(&format!("{source}: {e}")));
            let catalog = load_catalog(&fetcher, &examine, &cli.root_type);

            let options = ValidationOptions {
                report_unlisted_properties: strict,
            };
            let report = validate_with(&rules, &catalog, options);

            write_output(&result, &report.to_string());
            println!("Inspection result written to file '{}'", result.display());
            if !report.is_valid() {
                eprint!("{}", render::render_report(&report));
                process::exit(1);
            }
        }

        Command::Extract { examine, result } => {
            let catalog = load_catalog(&fetcher, &examine, &cli.root_type);
            let csv = write_rules(&compile_rules(&catalog)).unwrap_or_else(|e| fatal(&e));
            write_output(&result, &csv);
            println!("Properties written to file '{}'", result.display());
        }

        Command::Inspect { examine, json } => {
            let catalog = load_catalog(&fetcher, &examine, &cli.root_type);
            if json {
                let out = serde_json::to_string_pretty(&catalog).unwrap_or_else(|e| fatal(&e));
                println!("{out}");
            } else {
                print!("{}", render::render_catalog(&catalog));
            }
        }
    }
}

/// Fetch and inspect the metadata at `examine`, or exit.
fn load_catalog(fetcher: &Fetcher, examine: &str, root_type: &str) -> TypeCatalog {
    let text = fetcher
        .load(examine, Kind::Metadata)
        .unwrap_or_else(|e| fatal(&e));
    inspect(&text, root_type).unwrap_or_else(|e| fatal(&format!("{examine}: {e}")))
}

fn write_output(path: &Path, content: &str) {
    fs::write(path, content)
        .unwrap_or_else(|e| fatal(&format!("failed to write {}: {}", path.display(), e)));
}

/// Print an error message to stderr and exit with code 2.
fn fatal(msg: &dyn std::fmt::Display) -> ! {
    eprintln!("ddv: {}", msg);
    process::exit(2);
}
