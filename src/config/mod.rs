use crate::algorithms::ContributorPolicy;
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub recommendation: RecommendationConfig,
    pub neighbors: NeighborConfig,
    pub runtime: RuntimeConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationConfig {
    pub max_results: usize,
    pub contributor_policy: ContributorPolicy,
    pub exclude_rated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NeighborConfig {
    pub k: usize,
    /// Fixed feature dimension; inferred from the first catalog movie if unset.
    pub feature_dimension: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub worker_threads: usize,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            max_results: 10,
            contributor_policy: ContributorPolicy::PositiveOnly,
            exclude_rated: false,
        }
    }
}

impl Default for NeighborConfig {
    fn default() -> Self {
        Self {
            k: 3,
            feature_dimension: None,
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            worker_threads: num_cpus::get(),
        }
    }
}

impl Config {
    /// Loads `path` (any format the `config` crate understands) and applies
    /// `CINEREC__SECTION__KEY` environment overrides on top.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(Self::environment())
            .build()
            .with_context(|| format!("failed to load config {}", path.display()))?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults with environment overrides only.
    pub fn from_env() -> anyhow::Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?)
            .add_source(Self::environment())
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix("CINEREC")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.recommendation.max_results == 0 {
            bail!("recommendation.max_results must be greater than 0");
        }
        if self.runtime.worker_threads == 0 {
            bail!("runtime.worker_threads must be greater than 0");
        }
        if self.neighbors.feature_dimension == Some(0) {
            bail!("neighbors.feature_dimension must be greater than 0 when set");
        }
        Ok(())
    }
}
