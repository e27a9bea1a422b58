use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;
use ingest_bench::{SweepDefaults, Workload};

use crate::commands::{print_report, ConnectionArgs, DimensionArgs, RunArgs};
use crate::context::Context;
use crate::formatters::Layout;

#[derive(Args, Debug)]
pub struct SimpleArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(flatten)]
    pub dimensions: DimensionArgs,

    #[command(flatten)]
    pub run: RunArgs,

    /// Nombre de lignes insérées par chaque processus
    #[arg(long = "rowcount", visible_alias = "rc", default_value_t = 1000,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub row_count: u32,

    /// Chemin du jar du chargeur
    #[arg(long, env = "INGEST_BENCH_JAR")]
    pub jar: Option<PathBuf>,
}

/// Balaye le chargeur Java simple sur toutes les combinaisons
pub fn execute(context: &mut Context, args: SimpleArgs) -> Result<()> {
    let jar = args.jar.clone().unwrap_or_else(|| context.tools().simple_jar.clone());
    let workload = Workload::SimpleLoader {
        jar,
        row_count: args.row_count,
    };
    let sweep = args.dimensions.sweep().with_defaults(SweepDefaults::SIMPLE_LOADER);

    let runner = context.runner(
        args.connection.into(),
        workload,
        args.run.run_script.as_deref(),
        args.run.options(context),
    );
    let report = runner.run_sweep(&sweep).context("Simple loader sweep failed")?;

    print_report(context, &report, Layout::SimpleLoader, args.run.proc_display)
}
