use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use toolflow_catalog::Catalog;
use toolflow_flow::{FlowConfig, FlowEngine};

pub const CATALOG_ENV: &str = "TOOLFLOW_CATALOG";
pub const CONFIG_ENV: &str = "TOOLFLOW_CONFIG";

/// Where the engine inputs come from, after flags and environment are merged.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub catalog: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

impl Settings {
    /// Flags win over environment variables; empty variables are ignored.
    pub fn resolve(catalog_flag: Option<PathBuf>, config_flag: Option<PathBuf>) -> Self {
        Self {
            catalog: catalog_flag.or_else(|| env_path(CATALOG_ENV)),
            config: config_flag.or_else(|| env_path(CONFIG_ENV)),
        }
    }

    pub fn load_catalog(&self) -> Result<Catalog> {
        match &self.catalog {
            Some(path) => Catalog::from_path(path)
                .with_context(|| format!("Failed to load catalog {}", path.display())),
            None => Catalog::builtin().context("Built-in catalog is invalid"),
        }
    }

    pub fn load_config(&self) -> Result<FlowConfig> {
        match &self.config {
            Some(path) => FlowConfig::from_path(path)
                .with_context(|| format!("Failed to load config {}", path.display())),
            None => Ok(FlowConfig::default()),
        }
    }

    pub fn build_engine(&self) -> Result<FlowEngine> {
        let catalog = self.load_catalog()?;
        let config = self.load_config()?;
        log::debug!(
            "engine ready: {} tools, catalog {}",
            catalog.len(),
            describe(self.catalog.as_deref())
        );
        FlowEngine::with_config(catalog, config).context("Invalid engine config")
    }
}

fn env_path(var: &str) -> Option<PathBuf> {
    env::var_os(var)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

fn describe(path: Option<&Path>) -> String {
    path.map_or_else(|| "built-in".to_string(), |p| p.display().to_string())
}
