use std::path::Path;

use anyhow::Result;
use serde::Deserialize;
use serde::Serialize;

use crate::random::MersenneTwister;

/// A seed as written in a settings file, either `seed: 42` or
/// `seed: "dragon"`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum SeedSetting {
    Number(i64),
    Text(String),
}

/// Generator settings, stored as json5.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct RngSettings {
    /// Missing or empty seeds from entropy.
    pub seed: Option<SeedSetting>,
}

impl RngSettings {
    pub fn from_json5_str(data: &str) -> Result<Self> {
        Ok(json5::from_str(data)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data_str = std::fs::read_to_string(path)?;
        Self::from_json5_str(&data_str)
    }

    /// An initialized generator.
    pub fn build(&self) -> MersenneTwister {
        match &self.seed {
            Some(SeedSetting::Number(seed)) => MersenneTwister::from_seed(*seed),
            Some(SeedSetting::Text(seed)) => MersenneTwister::from_str_seed(seed),
            None => MersenneTwister::from_entropy(),
        }
    }
}
