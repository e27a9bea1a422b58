//! External tool templates
//!
//! Each supported executable has one fixed command line template into
//! which the connection and the current combination are substituted.

use std::env;
use std::path::{Path, PathBuf};

use crate::core::command::{CommandLine, Connection};
use crate::core::sweep::Combination;

/// Locations of the external executables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPaths {
    /// SQL client used for setup scripts and banner tests
    pub sql_client: PathBuf,
    /// Native data generator
    pub data_generator: PathBuf,
    /// Jar of the simple Java loader
    pub simple_jar: PathBuf,
    /// Bulk loader used for control files
    pub loader: PathBuf,
}

impl Default for ToolPaths {
    fn default() -> Self {
        let home = env::var_os("HOME").map(PathBuf::from).unwrap_or_default();
        ToolPaths {
            sql_client: home.join("sqlcl/bin/sql"),
            data_generator: home.join("datagenerator/bin/datagenerator"),
            simple_jar: home.join("OraIngestTests/SimpleOraTest.jar"),
            loader: PathBuf::from("sqlldr"),
        }
    }
}

/// Predefined data generator schemas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaType {
    Relational,
    Document,
    Simple,
}

impl SchemaType {
    /// File name of the config template for this schema
    pub fn config_file(&self) -> &'static str {
        match self {
            SchemaType::Relational => "anpr_relationalv2.xml",
            SchemaType::Document => "anpr_documentv2.xml",
            SchemaType::Simple => "anpr_simple.xml",
        }
    }

    /// Whether this schema carries generated images whose size can be swept
    pub fn has_images(&self) -> bool {
        !matches!(self, SchemaType::Simple)
    }
}

/// The tool a sweep drives, with its fixed parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Workload {
    /// Native data generator driven by an XML config
    DataGenerator {
        executable: PathBuf,
        config: PathBuf,
        schema: SchemaType,
        scale: u32,
    },
    /// Java loader inserting a fixed number of rows
    SimpleLoader { jar: PathBuf, row_count: u32 },
}

impl Workload {
    /// Whether each image multiplier needs its own derived config
    pub fn sweeps_image_size(&self) -> bool {
        matches!(self, Workload::DataGenerator { schema, .. } if schema.has_images())
    }

    /// Base config the derived configs are cloned from
    pub fn base_config(&self) -> Option<&Path> {
        match self {
            Workload::DataGenerator { config, .. } => Some(config.as_path()),
            Workload::SimpleLoader { .. } => None,
        }
    }

    /// Build the command line for one combination
    ///
    /// `config` overrides the base config (used for derived image configs).
    pub fn command(&self, conn: &Connection, combo: &Combination, config: Option<&Path>) -> CommandLine {
        match self {
            Workload::DataGenerator {
                executable,
                config: base,
                scale,
                ..
            } => {
                let config = config.unwrap_or(base.as_path());
                let mut cmd = CommandLine::new(executable.display().to_string())
                    .opt("-c", config.display())
                    .opt("-u", &conn.username)
                    .opt("-p", &conn.password)
                    .opt("-cs", &conn.connect_string)
                    .opt("-bs", combo.batch_size)
                    .opt("-commit", combo.commit_size)
                    .opt("-scale", scale)
                    .arg("-db")
                    .arg("-cl")
                    .arg("-nodrop")
                    .arg("-noddl")
                    .opt("-tc", combo.threads);
                if combo.async_mode {
                    cmd = cmd.arg("-async");
                }
                cmd.redact(&conn.password)
            }
            Workload::SimpleLoader { jar, row_count } => CommandLine::new("java")
                .opt("-jar", jar.display())
                .opt("-u", &conn.username)
                .opt("-p", &conn.password)
                .opt("-cs", &conn.connect_string)
                .opt("-bs", combo.batch_size)
                .opt("-cf", combo.commit_size)
                .opt("-rc", row_count)
                .opt("-tc", combo.threads)
                .redact(&conn.password),
        }
    }
}

/// Run a SQL script through the client without logging in first
pub fn sql_script(sql_client: &Path, script: &Path) -> CommandLine {
    CommandLine::new(sql_client.display().to_string())
        .arg("/nolog")
        .arg(format!("@{}", script.display()))
}

/// Log in and run a trivial query, exercising connection setup only
pub fn sql_banner(sql_client: &Path, conn: &Connection) -> CommandLine {
    CommandLine::new(sql_client.display().to_string())
        .arg(conn.credentials())
        .stdin("select 1 from dual\nexit;\n")
        .redact(&conn.password)
}

/// Bulk load one control file
pub fn sql_loader(loader: &Path, conn: &Connection, control_file: &Path) -> CommandLine {
    CommandLine::new(loader.display().to_string())
        .arg(conn.credentials())
        .arg(format!("control={}", control_file.display()))
        .redact(&conn.password)
}
