/*! Run configuration.

One JSON file drives a whole run: sample name, output locations, the
global filter settings, the category pool and the per-source quotas.
Everything the core treats as a parameter lives here; the sampler itself
never touches paths.
!*/
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use oxilangtag::LanguageTag;
use serde::Deserialize;

use crate::error::Error;
use crate::sampling::zone::{DEFAULT_THRESHOLD, DEFAULT_ZONES};

fn default_registry_file() -> String {
    "ids_sampled_ads.tsv".to_string()
}

fn default_min_year() -> u16 {
    2001
}

fn default_zones() -> Vec<u32> {
    DEFAULT_ZONES.to_vec()
}

fn default_threshold() -> u32 {
    DEFAULT_THRESHOLD
}

fn default_min_chars() -> usize {
    200
}

fn default_max_chars() -> usize {
    2500
}

fn default_share_threshold() -> f64 {
    0.4
}

#[derive(Debug, Clone, Deserialize)]
pub struct SamplingConfig {
    pub sample_name: String,
    pub output_dir: PathBuf,
    /// Registry filename, resolved inside `output_dir`. Shared between
    /// samples so that no two samples ever pick the same ad.
    #[serde(default = "default_registry_file")]
    pub registry_file: String,
    pub language: LanguageTag<String>,
    #[serde(default = "default_min_year")]
    pub min_year: u16,
    #[serde(default = "default_zones")]
    pub zones: Vec<u32>,
    #[serde(default = "default_threshold")]
    pub threshold: u32,
    #[serde(default = "default_min_chars")]
    pub min_chars: usize,
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,
    pub category: CategoryConfig,
    pub sources: Vec<SourceConfig>,
}

impl SamplingConfig {
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn sample_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("sample_{}.jsonl", self.sample_name))
    }

    pub fn shuffled_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("sample_{}_shuffled.jsonl", self.sample_name))
    }

    pub fn registry_path(&self) -> PathBuf {
        self.output_dir.join(&self.registry_file)
    }
}

/// The category pool: a keyword list or a topic budget.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryConfig {
    /// Line-separated single-use term list.
    Keyword { terms: PathBuf },
    /// Topic-assignment store plus per-topic acceptance counts.
    Topic {
        assignments: PathBuf,
        #[serde(default = "default_share_threshold")]
        share_threshold: f64,
        budgets: HashMap<u32, usize>,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub name: String,
    /// Glob pattern of this source's archive files.
    pub archives: String,
    /// Desired acceptances per year.
    pub years: HashMap<u16, usize>,
    /// Run-wide cap for this source.
    pub total: usize,
    /// Archives span several years (keep scanning a file after one
    /// year's budget runs out).
    #[serde(default)]
    pub multi_year: bool,
    /// Cap acceptances per file to spread the sample across files.
    #[serde(default)]
    pub per_file_cap: Option<usize>,
    /// Visit archives in random order.
    #[serde(default)]
    pub shuffle_files: bool,
    /// Only consider this many archives (applied after shuffling, so a
    /// random subset when `shuffle_files` is set).
    #[serde(default)]
    pub file_limit: Option<usize>,
    /// Archive filenames carry their year: skip files whose year budget
    /// is already exhausted without parsing them.
    #[serde(default)]
    pub year_in_filename: bool,
}
