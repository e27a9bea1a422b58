use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use clap::{Args, ValueEnum};
use ingest_bench::{SchemaType, SweepDefaults, Workload};
use log::debug;

use crate::commands::{print_report, ConnectionArgs, DimensionArgs, RunArgs};
use crate::context::Context;
use crate::formatters::Layout;

/// Schéma rempli par le générateur
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Schema {
    Relational,
    Document,
    Simple,
}

impl From<Schema> for SchemaType {
    fn from(schema: Schema) -> Self {
        match schema {
            Schema::Relational => SchemaType::Relational,
            Schema::Document => SchemaType::Document,
            Schema::Simple => SchemaType::Simple,
        }
    }
}

#[derive(Args, Debug)]
pub struct SweepArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(flatten)]
    pub dimensions: DimensionArgs,

    #[command(flatten)]
    pub run: RunArgs,

    /// Schéma cible : relational, document ou simple
    #[arg(long = "schematype", visible_alias = "st", value_enum, default_value_t = Schema::Relational)]
    pub schema: Schema,

    /// Multiplicateurs d'image à tester (1 par défaut)
    #[arg(long = "imagemultipliers", visible_alias = "im", value_delimiter = ',',
          value_parser = clap::value_parser!(u32).range(1..))]
    pub image_multipliers: Vec<u32>,

    /// Échelle du benchmark
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub scale: u32,

    /// Chemin de l'exécutable du générateur de données
    #[arg(long = "dglocation", visible_alias = "dgl", env = "INGEST_BENCH_DATAGEN")]
    pub dg_location: Option<PathBuf>,

    /// Répertoire des modèles de configuration
    #[arg(long, default_value = ".")]
    pub config_dir: PathBuf,

    /// Utilise des transactions asynchrones
    #[arg(long = "async")]
    pub async_mode: bool,

    /// Lance chaque combinaison avec et sans transactions asynchrones
    #[arg(long, conflicts_with = "async_mode")]
    pub async_sweep: bool,
}

/// Valeurs du drapeau async à balayer
fn async_modes(async_mode: bool, async_sweep: bool) -> Vec<bool> {
    match (async_mode, async_sweep) {
        (_, true) => vec![false, true],
        (true, false) => vec![true],
        (false, false) => vec![false],
    }
}

/// Chemin du modèle de configuration du schéma, qui doit exister
fn config_template(config_dir: &Path, schema: SchemaType) -> Result<PathBuf> {
    let config = config_dir.join(schema.config_file());
    if !config.is_file() {
        anyhow::bail!("Config template {:?} not found", config);
    }
    Ok(config)
}

/// Balaye le générateur de données sur toutes les combinaisons
pub fn execute(context: &mut Context, args: SweepArgs) -> Result<()> {
    let schema = SchemaType::from(args.schema);
    let config = config_template(&args.config_dir, schema)?;

    let executable = args
        .dg_location
        .clone()
        .unwrap_or_else(|| context.tools().data_generator.clone());
    let workload = Workload::DataGenerator {
        executable,
        config,
        schema,
        scale: args.scale,
    };

    let mut sweep = args.dimensions.sweep();
    sweep.image_multipliers = args.image_multipliers.clone();
    sweep.async_modes = async_modes(args.async_mode, args.async_sweep);
    let sweep = sweep.with_defaults(SweepDefaults::DATA_GENERATOR);
    debug!("schema : {:?}, scale : {}, sweep : {:?}", schema, args.scale, sweep);

    let runner = context.runner(
        args.connection.into(),
        workload,
        args.run.run_script.as_deref(),
        args.run.options(context),
    );
    let report = runner.run_sweep(&sweep).context("Sweep failed")?;

    print_report(context, &report, Layout::DataGenerator, args.run.proc_display)
}
