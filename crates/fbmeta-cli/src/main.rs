//! fbmeta CLI - Firebird schema export and script runner.

use clap::{Parser, Subcommand};
use fbmeta::{ApplyReport, Config, FbMetaError, FirebirdFactory, Orchestrator};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, Level};
use tracing_subscriber::fmt::format::FmtSpan;

#[derive(Parser)]
#[command(name = "fbmeta")]
#[command(about = "Export Firebird schema objects as scripts and apply script directories")]
#[command(version)]
struct Cli {
    /// Path to YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output JSON result to stdout
    #[arg(long)]
    output_json: bool,

    /// Log format: text or json
    #[arg(long, default_value = "text")]
    log_format: String,

    /// Log verbosity: debug, info, warn, error
    #[arg(long, default_value = "info")]
    verbosity: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a fresh database and apply every script in a directory
    BuildDb {
        /// Directory the database file is created in
        #[arg(long)]
        db_dir: PathBuf,

        /// Directory of .sql scripts to apply
        #[arg(long)]
        scripts_dir: PathBuf,

        /// Firebird connection string (overrides the config file)
        #[arg(long)]
        connection_string: Option<String>,
    },

    /// Write CREATE scripts for every domain, table and procedure
    ExportScripts {
        /// Directory the scripts are written to
        #[arg(long)]
        output_dir: PathBuf,

        /// Firebird connection string (overrides the config file)
        #[arg(long)]
        connection_string: Option<String>,
    },

    /// Apply every script in a directory to an existing database
    UpdateDb {
        /// Directory of .sql scripts to apply
        #[arg(long)]
        scripts_dir: PathBuf,

        /// Firebird connection string (overrides the config file)
        #[arg(long)]
        connection_string: Option<String>,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::from(e.exit_code())
        }
    }
}

fn run() -> Result<(), FbMetaError> {
    let cli = Cli::parse();

    setup_logging(&cli.verbosity, &cli.log_format);

    let config = match &cli.config {
        Some(path) => {
            let config = Config::load(path)?;
            info!("Loaded configuration from {:?}", path);
            config
        }
        None => Config::default(),
    };

    let orchestrator = Orchestrator::new(FirebirdFactory);

    match cli.command {
        Commands::BuildDb {
            db_dir,
            scripts_dir,
            connection_string,
        } => {
            let connection = config.resolve_connection(connection_string.as_deref(), false)?;
            let report =
                orchestrator.build_database(&connection, &config.build, &db_dir, &scripts_dir)?;
            print_apply_report(&report, cli.output_json, "Build completed!")?;
        }

        Commands::ExportScripts {
            output_dir,
            connection_string,
        } => {
            let connection = config.resolve_connection(connection_string.as_deref(), true)?;
            let report = orchestrator.export_scripts(&connection, &output_dir)?;

            if cli.output_json {
                println!("{}", report.to_json()?);
            } else {
                println!("\nExport completed!");
                println!("  Run ID: {}", report.run.run_id);
                println!("  Duration: {:.2}s", report.run.duration_seconds);
                println!("  Domains: {}", report.domains);
                println!("  Tables: {}", report.tables);
                println!("  Procedures: {}", report.procedures);
                println!("  Output: {}", report.output_dir.display());
            }
        }

        Commands::UpdateDb {
            scripts_dir,
            connection_string,
        } => {
            let connection = config.resolve_connection(connection_string.as_deref(), true)?;
            let report = orchestrator.update_database(&connection, &scripts_dir)?;
            print_apply_report(&report, cli.output_json, "Update completed!")?;
        }
    }

    Ok(())
}

fn print_apply_report(report: &ApplyReport, json: bool, title: &str) -> Result<(), FbMetaError> {
    if json {
        println!("{}", report.to_json()?);
        return Ok(());
    }

    println!("\n{}", title);
    println!("  Run ID: {}", report.run.run_id);
    println!("  Duration: {:.2}s", report.run.duration_seconds);
    println!("  Database: {}", report.database);
    println!(
        "  Scripts: {}/{} executed ({} blank)",
        report.scripts_executed, report.scripts_total, report.scripts_skipped
    );
    Ok(())
}

fn setup_logging(verbosity: &str, format: &str) {
    let level = match verbosity.to_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // Logs go to stderr so --output-json keeps stdout clean
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_writer(std::io::stderr);

    if format == "json" {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
