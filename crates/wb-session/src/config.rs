use std::path::PathBuf;

use serde::Deserialize;
use wb_lesson::DEFAULT_NOISE_WORDS;

const ENV_PREFIX: &str = "WORDBANK_";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub env: Environment,
    /// Root directory of the file blob store.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Decoys synthesized per exercise when the lesson has none.
    #[serde(default = "default_noise_words")]
    pub noise_words: usize,
    #[serde(default = "default_share_base_url")]
    pub share_base_url: String,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./wordbank-data")
}

fn default_noise_words() -> usize {
    DEFAULT_NOISE_WORDS
}

fn default_share_base_url() -> String {
    "https://wordbank.local/".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            env: Environment::default(),
            data_dir: default_data_dir(),
            noise_words: default_noise_words(),
            share_base_url: default_share_base_url(),
        }
    }
}

impl SessionConfig {
    /// Read `WORDBANK_*` variables, loading a `.env` file first if present.
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::prefixed(ENV_PREFIX).from_env()
    }

    pub fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed(ENV_PREFIX).from_iter(vars)
    }
}
