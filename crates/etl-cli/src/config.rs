//! TOML job configuration.
//!
//! Every run is described by an explicit job file rather than hard-coded
//! paths. Relative paths inside the file resolve against the file's own
//! directory, so a job folder can be moved as a unit.
//!
//! ```toml
//! name = "people"
//! source_dir = "data"
//! log_path = "log/etl.log"
//!
//! fields = [
//!     { name = "name", type = "string" },
//!     { name = "height", type = "float" },
//!     { name = "weight", type = "float" },
//! ]
//!
//! [[transform]]
//! op = "scale"
//! field = "height"
//! factor = 0.0254
//!
//! [[transform]]
//! op = "round"
//! field = "height"
//! decimals = 2
//!
//! [[sinks]]
//! kind = "csv"
//! path = "out/transformed_data.csv"
//!
//! [[sinks]]
//! kind = "sqlite"
//! path = "out/people.db"
//! table = "people"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use etl_model::{Field, Schema};
use etl_output::SinkTarget;
use etl_transform::TransformRule;

/// One job: schema, sources, transform rules, sinks, and the progress log.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobConfig {
    /// Job name, used in logs.
    pub name: String,
    /// Directory scanned for csv/json/xml source files.
    pub source_dir: PathBuf,
    /// Append-only progress log file.
    pub log_path: PathBuf,
    /// The declared field set, in output order.
    pub fields: Vec<Field>,
    /// Transform rules, applied in declaration order.
    #[serde(default, rename = "transform")]
    pub transforms: Vec<RuleSpec>,
    /// Sink targets, written in declaration order.
    #[serde(default)]
    pub sinks: Vec<SinkSpec>,
}

/// A transform rule as written in the job file.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case", deny_unknown_fields)]
pub enum RuleSpec {
    Scale { field: String, factor: f64 },
    Round { field: String, decimals: u32 },
    ToNumber { field: String },
}

/// A sink target as written in the job file.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum SinkSpec {
    Csv { path: PathBuf },
    Json { path: PathBuf },
    Sqlite { path: PathBuf, table: String },
}

impl JobConfig {
    /// Load and validate a job file, resolving relative paths against its
    /// directory.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read job file {}", path.display()))?;
        let mut config: JobConfig = toml::from_str(&content)
            .with_context(|| format!("parse job file {}", path.display()))?;

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        config.resolve_paths(base);
        config.validate()?;
        Ok(config)
    }

    fn resolve_paths(&mut self, base: &Path) {
        self.source_dir = resolve(base, &self.source_dir);
        self.log_path = resolve(base, &self.log_path);
        for sink in &mut self.sinks {
            match sink {
                SinkSpec::Csv { path }
                | SinkSpec::Json { path }
                | SinkSpec::Sqlite { path, .. } => *path = resolve(base, path),
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if self.fields.is_empty() {
            bail!("job '{}' declares no fields", self.name);
        }
        let schema = self.schema();
        for rule in &self.transforms {
            let field = match rule {
                RuleSpec::Scale { field, .. }
                | RuleSpec::Round { field, .. }
                | RuleSpec::ToNumber { field } => field,
            };
            if schema.index_of(field).is_none() {
                bail!(
                    "job '{}': transform rule targets unknown field '{field}'",
                    self.name
                );
            }
        }
        Ok(())
    }

    /// The declared schema.
    pub fn schema(&self) -> Schema {
        Schema::new(self.fields.clone())
    }

    /// Transform rules in application order.
    pub fn rules(&self) -> Vec<TransformRule> {
        self.transforms
            .iter()
            .map(|spec| match spec {
                RuleSpec::Scale { field, factor } => TransformRule::scale(field, *factor),
                RuleSpec::Round { field, decimals } => TransformRule::round(field, *decimals),
                RuleSpec::ToNumber { field } => TransformRule::to_number(field),
            })
            .collect()
    }

    /// Sink targets in write order.
    pub fn sink_targets(&self) -> Vec<SinkTarget> {
        self.sinks
            .iter()
            .map(|spec| match spec {
                SinkSpec::Csv { path } => SinkTarget::Csv { path: path.clone() },
                SinkSpec::Json { path } => SinkTarget::JsonLines { path: path.clone() },
                SinkSpec::Sqlite { path, table } => SinkTarget::Sqlite {
                    path: path.clone(),
                    table: table.clone(),
                },
            })
            .collect()
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
