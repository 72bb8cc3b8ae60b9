use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use minerva_meta::app::{App, PatchOptions, preview};
use minerva_meta::config::{ConfigLoader, DEFAULT_CITATION, Overrides};
use minerva_meta::error::MetaError;
use minerva_meta::exhibit::ExhibitHttpClient;
use minerva_meta::output::{JsonOutput, OutputMode};
use minerva_meta::store::OutputStore;

#[derive(Parser)]
#[command(name = "minerva-meta")]
#[command(about = "Inject donor sample metadata into Minerva exhibit documents")]
#[command(version, author)]
struct Cli {
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Fetch, back up, and patch matched exhibit documents")]
    Patch(PatchArgs),
    #[command(about = "Render metadata markdown for every row in the sample table")]
    Preview(PreviewArgs),
}

#[derive(Args)]
struct PatchArgs {
    #[arg(long)]
    config: Option<String>,

    #[arg(long)]
    links: Option<String>,

    #[arg(long)]
    table: Option<String>,

    #[arg(long)]
    out_dir: Option<String>,

    #[arg(long)]
    backup_dir: Option<String>,

    #[arg(long)]
    bucket_prefix: Option<String>,

    #[arg(long)]
    citation: Option<String>,

    #[arg(long)]
    dry_run: bool,
}

#[derive(Args)]
struct PreviewArgs {
    #[arg(long)]
    table: String,

    #[arg(long)]
    citation: Option<String>,
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(meta) = report.downcast_ref::<MetaError>() {
            return ExitCode::from(map_exit_code(meta));
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn map_exit_code(error: &MetaError) -> u8 {
    match error {
        MetaError::KeyMissing(_)
        | MetaError::MissingSetting(_)
        | MetaError::ConfigRead(_)
        | MetaError::ConfigParse(_)
        | MetaError::TableRead(_)
        | MetaError::TableParse(_)
        | MetaError::LinksRead(_) => 2,
        MetaError::ExhibitHttp(_) | MetaError::ExhibitStatus { .. } => 3,
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
    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Text
    };

    match cli.command {
        Commands::Patch(args) => run_patch(args, output_mode),
        Commands::Preview(args) => run_preview(args),
    }
}

fn run_patch(args: PatchArgs, output_mode: OutputMode) -> miette::Result<()> {
    let overrides = Overrides {
        links: args.links,
        table: args.table,
        out_dir: args.out_dir,
        backup_dir: args.backup_dir,
        bucket_prefix: args.bucket_prefix,
        citation: args.citation,
    };
    let config = ConfigLoader::resolve(args.config.as_deref(), overrides).into_diagnostic()?;

    let store = OutputStore::new(config.out_dir.clone(), config.backup_dir.clone());
    let client = ExhibitHttpClient::new().into_diagnostic()?;
    let app = App::new(store, client);

    let result = app
        .run(
            &config,
            PatchOptions {
                dry_run: args.dry_run,
            },
        )
        .into_diagnostic()?;

    match output_mode {
        OutputMode::Json => JsonOutput::print_batch(&result).into_diagnostic()?,
        OutputMode::Text => {
            for item in &result.items {
                println!("{}", item.upload_command);
            }
        }
    }
    Ok(())
}

fn run_preview(args: PreviewArgs) -> miette::Result<()> {
    let table = Utf8PathBuf::from(args.table);
    let citation = args.citation.as_deref().unwrap_or(DEFAULT_CITATION);
    let previews = preview(&table, citation).into_diagnostic()?;
    for (name, markdown) in &previews {
        println!("--- {name} ---");
        println!("{markdown}");
        println!();
    }
    Ok(())
}
