use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use strum::{Display, EnumString, IntoEnumIterator};
use validator::Validate;

use crate::optimizer::{SolverLimits, StrategyKind, BRUTE_FORCE_HARD_CAP};

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Config {
    pub input: InputConfig,
    #[validate(nested)]
    pub solver: SolverConfig,
    #[validate(nested)]
    pub sampling: SamplingConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub path: PathBuf,
    pub delimiter: char,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/solar_data.csv"),
            delimiter: ',',
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct SolverConfig {
    /// Installation budget (RM)
    #[validate(range(min = 0))]
    pub budget: i64,
    #[validate(length(min = 1))]
    pub strategies: Vec<StrategyKind>,
    #[validate(range(min = 1, max = 63))]
    pub max_brute_force_candidates: u32,
    #[validate(range(min = 1))]
    pub max_dp_cells: u64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        let limits = SolverLimits::default();
        Self {
            budget: 50_000,
            strategies: StrategyKind::iter().collect(),
            max_brute_force_candidates: limits.max_brute_force_candidates,
            max_dp_cells: limits.max_dp_cells,
        }
    }
}

impl SolverConfig {
    pub fn limits(&self) -> SolverLimits {
        SolverLimits {
            max_brute_force_candidates: self.max_brute_force_candidates.min(BRUTE_FORCE_HARD_CAP),
            max_dp_cells: self.max_dp_cells,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct SamplingConfig {
    /// Candidates kept before running brute force on a larger input
    #[validate(range(min = 1))]
    pub sample_size: usize,
    /// Fixed seed for reproducible samples
    pub seed: Option<u64>,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            sample_size: 20,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub format: ReportFormat,
}

impl Config {
    /// Built-in defaults, then `config/default.toml`, then `extra` if given,
    /// then `SSO__`-prefixed environment variables
    pub fn load(extra: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file("config/default.toml"));
        if let Some(path) = extra {
            if !path.exists() {
                anyhow::bail!("config file not found: {}", path.display());
            }
            figment = figment.merge(Toml::file(path));
        }
        figment = figment.merge(Env::prefixed("SSO__").split("__"));

        Self::from_figment(figment)
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        let cfg: Config = figment.extract().context("failed to read configuration")?;
        cfg.validate().context("invalid configuration")?;
        Ok(cfg)
    }
}
