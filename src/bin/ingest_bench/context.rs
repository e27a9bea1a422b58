use std::path::Path;

use ingest_bench::core::tools::sql_script;
use ingest_bench::{Connection, ProcessLauncher, RunOptions, Runner, ToolPaths, Workload};

use crate::formatters::{Formatter, OutputFormat};

/// Contexte partagé par toutes les commandes
pub struct Context {
    /// Formateur courant
    formatter: Box<dyn Formatter>,

    /// Emplacement des outils externes
    tools: ToolPaths,

    options: RunOptions,
}

impl Context {
    pub fn new(format: OutputFormat, colored: bool, tools: ToolPaths, options: RunOptions) -> Self {
        Context {
            formatter: format.formatter(colored),
            tools,
            options,
        }
    }

    pub fn formatter(&self) -> &dyn Formatter {
        self.formatter.as_ref()
    }

    pub fn tools(&self) -> &ToolPaths {
        &self.tools
    }

    pub fn options(&self) -> RunOptions {
        self.options
    }

    /// Crée un exécuteur pour `workload`, avec un script de préparation optionnel
    pub fn runner(
        &self,
        connection: Connection,
        workload: Workload,
        setup_script: Option<&Path>,
        options: RunOptions,
    ) -> Runner<ProcessLauncher> {
        let runner = Runner::new(ProcessLauncher, connection, workload).with_options(options);
        match setup_script {
            Some(script) => runner.with_setup(sql_script(&self.tools.sql_client, script)),
            None => runner,
        }
    }
}
