//! Job configuration: a JSON job file, overridden by command-line flags.
//!
//! ```json
//! {
//!   "data_dir": "data",
//!   "relations": ["r", "s", "t", "u"],
//!   "join_columns": ["b", "c", "d"],
//!   "k": 10,
//!   "allowed_relations": ["r", "s", "t", "u"]
//! }
//! ```
//!
//! A relative `data_dir` is resolved against the job file's directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use bestpath_engine::{ChainQuery, DEFAULT_JOIN_COLUMNS, DEFAULT_RELATIONS};
use bestpath_ingest::{AllowList, JsonDirReader};
use clap::Args;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JobConfig {
    pub data_dir: Option<PathBuf>,
    pub relations: Option<Vec<String>>,
    pub join_columns: Option<Vec<String>>,
    pub k: Option<i64>,
    pub allowed_relations: Option<Vec<String>>,
}

impl JobConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let mut config: JobConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing job file {}", path.display()))?;

        if let (Some(dir), Some(base)) = (config.data_dir.as_mut(), path.parent()) {
            if dir.is_relative() {
                *dir = base.join(&*dir);
            }
        }
        Ok(config)
    }

    /// Fields set in `other` win.
    pub fn overlay(self, other: JobConfig) -> JobConfig {
        JobConfig {
            data_dir: other.data_dir.or(self.data_dir),
            relations: other.relations.or(self.relations),
            join_columns: other.join_columns.or(self.join_columns),
            k: other.k.or(self.k),
            allowed_relations: other.allowed_relations.or(self.allowed_relations),
        }
    }

    pub fn resolve(self) -> Result<Job> {
        let data_dir = self
            .data_dir
            .ok_or_else(|| anyhow!("no data directory: pass --data or set \"data_dir\""))?;
        let k = self
            .k
            .ok_or_else(|| anyhow!("no k: pass -k or set \"k\" in the job file"))?;

        let relations = fixed::<4>(
            "relations",
            self.relations
                .unwrap_or_else(|| DEFAULT_RELATIONS.map(str::to_string).to_vec()),
        )?;
        let join_columns = fixed::<3>(
            "join_columns",
            self.join_columns
                .unwrap_or_else(|| DEFAULT_JOIN_COLUMNS.map(str::to_string).to_vec()),
        )?;

        let allow = match self.allowed_relations {
            Some(names) => AllowList::only(names)?,
            None => AllowList::any(),
        };

        Ok(Job {
            data_dir,
            query: ChainQuery {
                relations,
                join_columns,
                k,
            },
            allow,
        })
    }
}

fn fixed<const N: usize>(field: &str, values: Vec<String>) -> Result<[String; N]> {
    let len = values.len();
    <[String; N]>::try_from(values)
        .map_err(|_| anyhow!("`{field}` needs exactly {N} names, got {len}"))
}

/// Job selection flags shared by `run` and `verify`.
#[derive(Args, Debug, Clone, Default)]
pub struct JobArgs {
    /// JSON job file; flags below override its fields.
    #[arg(long)]
    pub job: Option<PathBuf>,

    /// Directory holding one `<relation>.json` table per relation.
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Four relation names in chain order (default r,s,t,u).
    #[arg(long, value_delimiter = ',')]
    pub relations: Option<Vec<String>>,

    /// Three join columns between consecutive relations (default b,c,d).
    #[arg(long, value_delimiter = ',')]
    pub join_columns: Option<Vec<String>>,

    /// Number of paths to return.
    #[arg(short, long, allow_hyphen_values = true)]
    pub k: Option<i64>,

    /// Only these relations may be read.
    #[arg(long, value_delimiter = ',')]
    pub allow: Option<Vec<String>>,
}

impl JobArgs {
    pub fn to_config(&self) -> Result<JobConfig> {
        let base = match &self.job {
            Some(path) => JobConfig::load(path)?,
            None => JobConfig::default(),
        };
        Ok(base.overlay(JobConfig {
            data_dir: self.data.clone(),
            relations: self.relations.clone(),
            join_columns: self.join_columns.clone(),
            k: self.k,
            allowed_relations: self.allow.clone(),
        }))
    }

    pub fn resolve(&self) -> Result<Job> {
        self.to_config()?.resolve()
    }
}

/// A fully resolved invocation.
#[derive(Debug, Clone)]
pub struct Job {
    pub data_dir: PathBuf,
    pub query: ChainQuery,
    pub allow: AllowList,
}

impl Job {
    pub fn reader(&self) -> JsonDirReader {
        JsonDirReader::new(&self.data_dir).with_allow_list(self.allow.clone())
    }
}
