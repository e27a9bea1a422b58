//! Parameter sweep driver
//!
//! The [`Runner`] walks every combination of a [`SweepConfig`] in order.
//! For each one it prepares the command line (deriving an image config
//! when needed), fans it out to the requested number of processes,
//! scrapes each output and appends a [`SummaryRow`] to the report.

use std::path::{Path, PathBuf};
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};

use crate::core::command::{CommandLine, Connection};
use crate::core::errors::Result;
use crate::core::sweep::{Combination, SweepConfig};
use crate::core::tools::Workload;
use crate::metrics::report::{Report, SummaryRow};
use crate::metrics::scrape::{scrape, RunResult};
use crate::runner::executor::{fan_out, Launcher, DEFAULT_MAX_WORKERS};
use crate::runner::image_config::{derive_image_config, DerivedConfig};

/// Options controlling how a sweep is run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Cap on concurrently running processes within a combination
    pub max_workers: usize,
    /// Draw a progress bar over the combinations
    pub show_progress: bool,
    /// Print the output of the setup script
    pub show_script_output: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            max_workers: DEFAULT_MAX_WORKERS,
            show_progress: true,
            show_script_output: true,
        }
    }
}

/// Drives one workload through a sweep
pub struct Runner<L> {
    launcher: L,
    connection: Connection,
    workload: Workload,
    setup: Option<CommandLine>,
    options: RunOptions,
}

impl<L: Launcher> Runner<L> {
    pub fn new(launcher: L, connection: Connection, workload: Workload) -> Self {
        Runner {
            launcher,
            connection,
            workload,
            setup: None,
            options: RunOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RunOptions) -> Self {
        self.options = options;
        self
    }

    /// Run `command` once before the first combination
    pub fn with_setup(mut self, command: CommandLine) -> Self {
        self.setup = Some(command);
        self
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    /// Run every combination and collect one summary row for each
    pub fn run_sweep(&self, sweep: &SweepConfig) -> Result<Report> {
        if let Some(setup) = &self.setup {
            self.run_setup(setup)?;
        }

        info!("Starting sweep of {} combinations", sweep.len());
        let progress = self.progress_bar(sweep.len() as u64);
        let mut report = Report::new();

        for combination in sweep.combinations() {
            match self.run_combination(&combination) {
                Ok(row) => report.push(row),
                Err(e) => {
                    progress.abandon();
                    return Err(e);
                }
            }
            progress.inc(1);
        }

        progress.finish();
        info!("Completed {} combinations", report.len());
        Ok(report)
    }

    /// Run one combination on `combination.processes` parallel processes
    pub fn run_combination(&self, combination: &Combination) -> Result<SummaryRow> {
        let derived = self.derived_config(combination)?;
        let command = self.workload.command(
            &self.connection,
            combination,
            derived.as_ref().map(DerivedConfig::path),
        );
        let commands = vec![command; combination.processes as usize];

        let start = Instant::now();
        let outcome = fan_out(&self.launcher, &commands, self.options.max_workers);
        let elapsed = start.elapsed();

        if let Some(derived) = derived {
            let path = derived.path().to_path_buf();
            if let Err(e) = derived.close() {
                warn!("Unable to remove derived config {:?}: {}", path, e);
            }
        }

        let results: Vec<RunResult> = outcome?.iter().map(|output| scrape(output)).collect();
        let image_size = if self.workload.sweeps_image_size() {
            u64::from(combination.image_multiplier) * 100
        } else {
            0
        };
        let row = SummaryRow::new(*combination, image_size, elapsed, results);

        debug!(
            "insertion time = {}, connection time = {}, rows_inserted = {}, reported rate = {}, max_insertion_time = {}",
            row.totals.insertion_time,
            row.totals.connection_time,
            row.totals.rows_inserted,
            row.totals.reported_rate,
            row.totals.max_insertion_time
        );
        Ok(row)
    }

    fn derived_config(&self, combination: &Combination) -> Result<Option<DerivedConfig>> {
        if !self.workload.sweeps_image_size() {
            return Ok(None);
        }
        match self.workload.base_config() {
            Some(base) => derive_image_config(base, combination.image_multiplier).map(Some),
            None => Ok(None),
        }
    }

    fn run_setup(&self, setup: &CommandLine) -> Result<()> {
        println!("Running script {}", setup);
        let output = self.launcher.launch(setup)?;
        if self.options.show_script_output {
            println!("Output from script run : \n");
            println!("{}", output);
        }
        Ok(())
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        let bar = if self.options.show_progress {
            ProgressBar::new(len)
        } else {
            ProgressBar::hidden()
        };
        if let Ok(style) = ProgressStyle::with_template("Tests Run {pos}/{len} [{wide_bar}] {elapsed_precise}") {
            bar.set_style(style.progress_chars("=>-"));
        }
        bar
    }
}

/// Every `*.ctl` control file in `dir`, sorted by name
pub fn control_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "ctl") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Run one command per control file, all at once, logging each output
pub fn run_loads<L: Launcher + ?Sized>(launcher: &L, commands: &[CommandLine], max_workers: usize) -> Result<()> {
    let outputs = fan_out(launcher, commands, max_workers)?;
    for (command, output) in commands.iter().zip(&outputs) {
        debug!("Output of {} :\n{}", command, output);
    }
    debug!("Finished all threads");
    Ok(())
}
