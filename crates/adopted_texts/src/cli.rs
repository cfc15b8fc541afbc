use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use engine_logging::{LogDestination, DEFAULT_LOG_FILE};
use harvester_core::DEFAULT_SOURCE_LABEL;
use harvester_engine::{FetchSettings, HarvestSettings, HubSettings, DEFAULT_SEED_URL};
use log::LevelFilter;

pub const DEFAULT_DATASET_NAME: &str = "Dutch-European-Parliament-Adopted-Texts";

#[derive(Debug, Parser)]
#[command(
    name = "adopted_texts",
    about = "Scrape European Parliament adopted texts (NL) and publish them as a dataset"
)]
pub struct Cli {
    /// First table-of-contents page of the chain
    #[arg(long, default_value = DEFAULT_SEED_URL)]
    pub seed: String,

    /// Value of the `source` field on every record
    #[arg(long, default_value = DEFAULT_SOURCE_LABEL)]
    pub source: String,

    /// Hub namespace that owns the dataset
    #[arg(long, env = "HF_USERNAME", default_value = "YOUR_HUGGINGFACE_USERNAME")]
    pub hf_username: String,

    #[arg(long, default_value = DEFAULT_DATASET_NAME)]
    pub dataset_name: String,

    /// Write token; publishing is skipped without one
    #[arg(long, env = "HF_TOKEN", hide_env_values = true)]
    pub hf_token: Option<String>,

    #[arg(long, default_value = "https://huggingface.co")]
    pub hub_endpoint: String,

    /// Also write records.jsonl and manifest.json to this directory
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 20)]
    pub timeout_secs: u64,

    /// Also log to ./engine.log
    #[arg(long)]
    pub log_file: bool,

    /// Log debug output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn destination_id(&self) -> String {
        format!("{}/{}", self.hf_username, self.dataset_name)
    }

    /// Token, ignoring an empty value.
    pub fn token(&self) -> Option<&str> {
        self.hf_token.as_deref().filter(|token| !token.trim().is_empty())
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            request_timeout: Duration::from_secs(self.timeout_secs),
            ..FetchSettings::default()
        }
    }

    pub fn harvest_settings(&self) -> HarvestSettings {
        HarvestSettings {
            seed_url: self.seed.clone(),
            source_label: self.source.clone(),
        }
    }

    pub fn hub_settings(&self) -> HubSettings {
        HubSettings {
            endpoint: self.hub_endpoint.clone(),
            ..HubSettings::default()
        }
    }

    pub fn log_destination(&self) -> LogDestination {
        if self.log_file {
            LogDestination::Both(PathBuf::from(DEFAULT_LOG_FILE))
        } else {
            LogDestination::Terminal
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }
}
