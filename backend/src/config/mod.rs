//! Central module for application-wide configuration settings.
//!
//! This module handles loading and managing configuration parameters such as
//! the listener address, the dataset path, and the classifier hyperparameters.
//! Every setting comes from a `SYMPTOM_*` environment variable and falls back
//! to a default that reproduces the service's stock behaviour.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use symptom_model::{FeatureSchema, ModelKind, ModelParams};
use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";
pub const DEFAULT_DATASET_PATH: &str = "disease_symptom_dataset.csv";
pub const DEFAULT_HOLDOUT_RATIO: f64 = 0.2;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub dataset_path: PathBuf,
    pub schema: FeatureSchema,
    pub model: ModelParams,
    pub holdout_ratio: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            dataset_path: PathBuf::from(DEFAULT_DATASET_PATH),
            schema: FeatureSchema::default(),
            model: ModelParams::default(),
            holdout_ratio: DEFAULT_HOLDOUT_RATIO,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup; `from_env` passes the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let get = |key: &'static str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = parse_or(get("SYMPTOM_BIND_ADDR"), "SYMPTOM_BIND_ADDR", defaults.bind_addr)?;
        let dataset_path = get("SYMPTOM_DATASET_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.dataset_path);

        let kind = match get("SYMPTOM_MODEL_KIND") {
            Some(v) => v.parse::<ModelKind>().map_err(|e| ConfigError::Invalid {
                key: "SYMPTOM_MODEL_KIND",
                value: v.clone(),
                reason: e.to_string(),
            })?,
            None => defaults.model.kind,
        };
        let n_trees = parse_or(get("SYMPTOM_N_TREES"), "SYMPTOM_N_TREES", defaults.model.n_trees)?;
        let max_depth = match get("SYMPTOM_MAX_DEPTH") {
            Some(v) => Some(parse_value::<usize>(v, "SYMPTOM_MAX_DEPTH")?),
            None => defaults.model.max_depth,
        };
        let seed = parse_or(get("SYMPTOM_SEED"), "SYMPTOM_SEED", defaults.model.seed)?;
        let holdout_ratio = parse_or(
            get("SYMPTOM_HOLDOUT_RATIO"),
            "SYMPTOM_HOLDOUT_RATIO",
            defaults.holdout_ratio,
        )?;

        let model = ModelParams {
            kind,
            n_trees,
            max_depth,
            seed,
        };
        model.validate().map_err(|e| ConfigError::Invalid {
            key: "SYMPTOM_N_TREES/SYMPTOM_MAX_DEPTH",
            value: format!("{}/{:?}", n_trees, max_depth),
            reason: e.to_string(),
        })?;
        if !(0.0..1.0).contains(&holdout_ratio) {
            return Err(ConfigError::Invalid {
                key: "SYMPTOM_HOLDOUT_RATIO",
                value: holdout_ratio.to_string(),
                reason: "must be in [0, 1)".to_string(),
            });
        }

        Ok(Self {
            bind_addr,
            dataset_path,
            schema: defaults.schema,
            model,
            holdout_ratio,
        })
    }
}

fn parse_value<T>(value: String, key: &'static str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
        key,
        reason: e.to_string(),
        value,
    })
}

fn parse_or<T>(value: Option<String>, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.map_or(Ok(default), |v| parse_value(v, key))
}
