pub mod loads;
pub mod simple;
pub mod sweep;

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use ingest_bench::{Connection, Report, RunOptions, SweepConfig};

use crate::context::Context;
use crate::formatters::Layout;

/// Options de connexion à la base
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Nom d'utilisateur
    #[arg(short, long)]
    pub username: String,

    /// Mot de passe
    #[arg(short, long)]
    pub password: String,

    /// Chaîne de connexion
    #[arg(long = "connectstring", visible_alias = "cs")]
    pub connect_string: String,
}

impl From<ConnectionArgs> for Connection {
    fn from(args: ConnectionArgs) -> Self {
        Connection::new(args.username, args.password, args.connect_string)
    }
}

/// Listes séparées par des virgules pour chaque dimension
#[derive(Args, Debug, Clone)]
pub struct DimensionArgs {
    /// Tailles de commit à tester
    #[arg(long = "commitsizes", visible_alias = "com", value_delimiter = ',',
          value_parser = clap::value_parser!(u32).range(1..))]
    pub commit_sizes: Vec<u32>,

    /// Tailles de lot à tester
    #[arg(long = "batchsizes", visible_alias = "bat", value_delimiter = ',',
          value_parser = clap::value_parser!(u32).range(1..))]
    pub batch_sizes: Vec<u32>,

    /// Nombres de threads à tester (1 par défaut)
    #[arg(long = "threads", visible_alias = "tc", value_delimiter = ',',
          value_parser = clap::value_parser!(u32).range(1..))]
    pub threads: Vec<u32>,

    /// Nombre de processus (JVM) par combinaison (1 par défaut)
    #[arg(long = "processes", visible_alias = "proc", value_delimiter = ',',
          value_parser = clap::value_parser!(u32).range(1..))]
    pub processes: Vec<u32>,
}

impl DimensionArgs {
    pub fn sweep(&self) -> SweepConfig {
        SweepConfig {
            commit_sizes: self.commit_sizes.clone(),
            batch_sizes: self.batch_sizes.clone(),
            thread_counts: self.threads.clone(),
            process_counts: self.processes.clone(),
            ..Default::default()
        }
    }
}

/// Options du script de préparation et de l'affichage
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Script SQL à lancer avant les tests
    #[arg(long = "runscript", visible_alias = "rs")]
    pub run_script: Option<PathBuf>,

    /// Masque la sortie du script de préparation
    #[arg(long = "suppress", visible_alias = "ss")]
    pub suppress: bool,

    /// Affiche les résultats de chaque processus
    #[arg(long = "procdisplay", visible_alias = "pd")]
    pub proc_display: bool,
}

impl RunArgs {
    pub fn options(&self, context: &Context) -> RunOptions {
        RunOptions {
            show_script_output: !self.suppress,
            ..context.options()
        }
    }
}

/// Affiche le rapport, avec le détail par processus si demandé
pub fn print_report(context: &Context, report: &Report, layout: Layout, proc_display: bool) -> Result<()> {
    let formatter = context.formatter();
    if proc_display {
        for row in &report.rows {
            println!("{}", formatter.format_info("Individual JVM Results"));
            println!("{}", formatter.format_processes(row)?);
        }
    }
    println!("{}", formatter.format_report(report, layout)?);
    Ok(())
}
