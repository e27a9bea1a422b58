use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use ingest_bench::runner::executor::DEFAULT_MAX_WORKERS;
use ingest_bench::{RunOptions, ToolPaths};
use log::{error, info, LevelFilter};

use crate::commands;
use crate::context::Context;
use crate::formatters::{Formatter, OutputFormat};

#[derive(Parser)]
#[command(name = "ingest-bench")]
#[command(about = "Balayages de benchmark des outils d'ingestion Oracle", long_about = None)]
struct Cli {
    /// Active les journaux de débogage
    #[arg(long, global = true)]
    debug: bool,

    /// Format de sortie (table, text, json)
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    format: OutputFormat,

    /// Nombre maximal de processus lancés en même temps
    #[arg(long, default_value_t = DEFAULT_MAX_WORKERS as u32, value_parser = clap::value_parser!(u32).range(1..), global = true)]
    max_parallel: u32,

    /// Désactive les couleurs des messages
    #[arg(long, global = true)]
    no_color: bool,

    /// Masque la barre de progression
    #[arg(long, global = true)]
    no_progress: bool,

    /// Chemin du client SQL
    #[arg(long, env = "INGEST_BENCH_SQLCL", global = true)]
    sqlcl: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Balayer le générateur de données sur un schéma
    Sweep(commands::sweep::SweepArgs),

    /// Balayer le chargeur Java simple
    Simple(commands::simple::SimpleArgs),

    /// Lancer en parallèle chaque fichier de contrôle d'un répertoire
    Loads(commands::loads::LoadsArgs),
}

fn init_logging(debug: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if debug {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
}

/// Exécute l'application CLI
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let mut tools = ToolPaths::default();
    if let Some(sqlcl) = cli.sqlcl {
        tools.sql_client = sqlcl;
    }
    let options = RunOptions {
        max_workers: cli.max_parallel as usize,
        show_progress: !cli.no_progress,
        show_script_output: true,
    };
    let mut context = Context::new(cli.format, !cli.no_color, tools, options);

    match execute(&mut context, cli.command) {
        Ok(()) => {
            info!("Benchmark run finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Unable to run test: {:#}", e);
            eprintln!("{}", failure_message(context.formatter(), &e));
            ExitCode::FAILURE
        }
    }
}

fn execute(context: &mut Context, command: Commands) -> Result<()> {
    match command {
        Commands::Sweep(args) => commands::sweep::execute(context, args),
        Commands::Simple(args) => commands::simple::execute(context, args),
        Commands::Loads(args) => commands::loads::execute(context, args),
    }
}

/// Message affiché sur stderr quand une commande échoue
fn failure_message(formatter: &dyn Formatter, error: &anyhow::Error) -> String {
    formatter.format_error(&format!("Unable to run test: {:#}", error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_sweep_lists() {
        let cli = Cli::try_parse_from([
            "ingest-bench", "sweep", "-u", "soe", "-p", "soe", "--cs", "//db/soe",
            "--bat", "50,100", "--com", "10", "--st", "document", "--async", "--debug",
        ])
        .unwrap();

        assert!(cli.debug);
        match cli.command {
            Commands::Sweep(args) => {
                assert_eq!(args.dimensions.batch_sizes, vec![50, 100]);
                assert_eq!(args.dimensions.commit_sizes, vec![10]);
                assert!(args.dimensions.processes.is_empty());
                assert!(args.async_mode);
            }
            _ => panic!("expected sweep"),
        }
    }

    #[test]
    fn test_failure_message_uses_formatter() {
        let error = anyhow::anyhow!("exited with status 3").context("Sweep failed");

        let table = OutputFormat::Table.formatter(false);
        assert_eq!(
            failure_message(table.as_ref(), &error),
            "Error: Unable to run test: Sweep failed: exited with status 3"
        );

        let json = OutputFormat::Json.formatter(false);
        assert_eq!(
            failure_message(json.as_ref(), &error),
            r#"{"error":"Unable to run test: Sweep failed: exited with status 3"}"#
        );
    }

    #[test]
    fn test_rejects_zero_and_missing_connection() {
        assert!(Cli::try_parse_from(["ingest-bench", "simple", "-u", "a", "-p", "b", "--cs", "c", "--tc", "0"]).is_err());
        assert!(Cli::try_parse_from(["ingest-bench", "simple", "-u", "a", "-p", "b"]).is_err());
    }
}
