use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use birdref::app::{App, parse_payload};
use birdref::dispatch::{PrintUrlOpener, SystemUrlOpener, UrlOpener};
use birdref::error::BirdError;
use birdref::output::JsonOutput;
use birdref::store::Store;
use birdref::taxonomy::{DEFAULT_TAXONOMY_URL, TaxonomyHttpClient};

#[derive(Parser)]
#[command(name = "birdref")]
#[command(about = "Bird species lookup for quick-launchers: search, then open reference sites")]
#[command(version, author)]
struct Cli {
    /// Plugin directory holding data/, cache/ and preferences.json
    #[arg(long, global = true, env = "BIRDREF_ROOT")]
    root: Option<Utf8PathBuf>,

    #[arg(long, global = true, env = "BIRDREF_TAXONOMY_URL", default_value = DEFAULT_TAXONOMY_URL)]
    taxonomy_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "Search species and print the launcher results as JSON")]
    Results(ResultsArgs),
    #[command(about = "Open reference sites for a selected result")]
    Run(RunArgs),
}

#[derive(Args)]
struct ResultsArgs {
    query: Vec<String>,
}

#[derive(Args)]
struct RunArgs {
    /// One `run_args` entry, or the whole array, as JSON
    payload: String,

    /// Print the URLs instead of opening them
    #[arg(long)]
    dry_run: bool,
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(error) = report.downcast_ref::<BirdError>() {
            return ExitCode::from(map_exit_code(error));
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn map_exit_code(error: &BirdError) -> u8 {
    match error {
        BirdError::ConfigRead(_)
        | BirdError::ConfigParse(_)
        | BirdError::MissingPreference(_)
        | BirdError::InvalidPayload(_) => 2,
        BirdError::TaxonomyHttp(_) | BirdError::TaxonomyStatus { .. } => 3,
        _ => 1,
    }
}

fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let store = match cli.root {
        Some(root) => Store::new_with_root(root),
        None => Store::new()?,
    };
    let taxonomy = TaxonomyHttpClient::with_url(cli.taxonomy_url)?;

    match cli.command {
        Command::Results(args) => {
            let app = App::new(store, taxonomy, SystemUrlOpener);
            let results = app.results(&args.query.join(" "))?;
            JsonOutput::print_results(&results).into_diagnostic()
        }
        Command::Run(args) => {
            if args.dry_run {
                run_selection(App::new(store, taxonomy, PrintUrlOpener), &args.payload)
            } else {
                run_selection(App::new(store, taxonomy, SystemUrlOpener), &args.payload)
            }
        }
    }
}

fn run_selection<O: UrlOpener>(
    app: App<TaxonomyHttpClient, O>,
    payload: &str,
) -> miette::Result<()> {
    let selection = parse_payload(payload)?;
    app.run(&selection)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_by_error_kind() {
        assert_eq!(map_exit_code(&BirdError::MissingPreference("audubon.org".to_string())), 2);
        assert_eq!(map_exit_code(&BirdError::InvalidPayload("eof".to_string())), 2);
        assert_eq!(
            map_exit_code(&BirdError::ConfigRead(Utf8PathBuf::from("preferences.json"))),
            2
        );
        assert_eq!(map_exit_code(&BirdError::ConfigParse("bad".to_string())), 2);
        assert_eq!(map_exit_code(&BirdError::TaxonomyHttp("refused".to_string())), 3);
        assert_eq!(
            map_exit_code(&BirdError::TaxonomyStatus {
                status: 503,
                message: "busy".to_string(),
            }),
            3
        );
        assert_eq!(map_exit_code(&BirdError::TaxonomyParse("row 2".to_string())), 1);
        assert_eq!(map_exit_code(&BirdError::Filesystem("denied".to_string())), 1);
    }

    #[test]
    fn cli_parses_dry_run() {
        let cli = Cli::try_parse_from(["birdref", "--root", "/tmp/birds", "run", "{}", "--dry-run"])
            .unwrap();
        assert_eq!(cli.root, Some(Utf8PathBuf::from("/tmp/birds")));
        match cli.command {
            Command::Run(args) => {
                assert!(args.dry_run);
                assert_eq!(args.payload, "{}");
            }
            Command::Results(_) => panic!("expected run"),
        }
    }
}
