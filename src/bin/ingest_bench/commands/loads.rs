use std::path::PathBuf;

use anyhow::{bail, Context as _, Result};
use clap::Args;
use ingest_bench::core::tools::{sql_banner, sql_loader};
use ingest_bench::runner::driver::{control_files, run_loads};
use ingest_bench::{CommandLine, Connection, ProcessLauncher};
use log::debug;

use crate::commands::ConnectionArgs;
use crate::context::Context;

#[derive(Args, Debug)]
pub struct LoadsArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Répertoire contenant les fichiers de contrôle
    #[arg(short, long)]
    pub directory: PathBuf,

    /// Se connecte seulement et lance une requête triviale par fichier
    #[arg(long)]
    pub banner: bool,

    /// Chemin du chargeur en masse
    #[arg(long, env = "INGEST_BENCH_LOADER")]
    pub loader: Option<PathBuf>,
}

/// Lance un chargement par fichier de contrôle, tous en parallèle
pub fn execute(context: &mut Context, args: LoadsArgs) -> Result<()> {
    let files = control_files(&args.directory)
        .with_context(|| format!("Unable to read {:?}", args.directory))?;
    if files.is_empty() {
        bail!("No .ctl files found in {:?}", args.directory);
    }
    debug!("control files : {:?}", files);

    let connection = Connection::from(args.connection);
    let loader = args.loader.unwrap_or_else(|| context.tools().loader.clone());
    let commands: Vec<CommandLine> = files
        .iter()
        .map(|file| {
            if args.banner {
                sql_banner(&context.tools().sql_client, &connection)
            } else {
                sql_loader(&loader, &connection, file)
            }
        })
        .collect();

    run_loads(&ProcessLauncher, &commands, context.options().max_workers).context("Load failed")?;

    println!("{}", context.formatter().format_info(&format!("Finished {} loads", commands.len())));
    Ok(())
}
