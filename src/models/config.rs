use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::utils::errors::McmmError;
use crate::utils::Env;

pub const CURSEFORGE_API_URL_PROD: &str = "https://api.curseforge.com/v1";
const CONFIG_DIR_NAME: &str = "mcmm";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Contents of the optional TOML config file.
#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub api_key: Option<String>,
    pub api_url: Option<String>,
    pub game_version: Option<String>,
    pub output_dir: Option<PathBuf>,
}

/// Values given on the command line. They win over everything else.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub game_version: Option<String>,
    pub output_dir: Option<PathBuf>,
}

/// Fully resolved settings used by the client and the commands.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: Option<String>,
    pub api_url: String,
    pub game_version: Option<String>,
    pub output_dir: PathBuf,
    /// Where the config file was looked up, for error messages.
    pub config_path: Option<PathBuf>,
}

impl Settings {
    pub fn resolve<E: Env>(env: &E, overrides: Overrides) -> Result<Self> {
        let config_path = config_path(env);
        let file = match &config_path {
            Some(path) => load_config_file(path)?,
            None => ConfigFile::default(),
        };

        let api_key = env.var("CURSEFORGE_API_KEY").or(file.api_key);
        let api_url = env
            .var("CURSEFORGE_API_URL")
            .or(file.api_url)
            .unwrap_or_else(|| CURSEFORGE_API_URL_PROD.to_string());

        // An explicit empty version on the command line turns filtering off.
        let game_version = match overrides.game_version {
            Some(version) => Some(version),
            None => env.var("MCMM_GAME_VERSION").or(file.game_version),
        }
        .filter(|version| !version.trim().is_empty());

        let output_dir = match overrides
            .output_dir
            .or_else(|| env.var("MCMM_OUTPUT_DIR").map(PathBuf::from))
            .or(file.output_dir)
        {
            Some(dir) if dir.is_absolute() => dir,
            Some(dir) => env.current_dir()?.join(dir),
            None => env.current_dir()?,
        };

        Ok(Self {
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            api_url,
            game_version,
            output_dir,
            config_path,
        })
    }

    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            let location = self
                .config_path
                .as_ref()
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| format!("{CONFIG_DIR_NAME}/{CONFIG_FILE_NAME}"));
            anyhow!(McmmError::ApiKeyNotFound(location))
        })
    }
}

fn config_path<E: Env>(env: &E) -> Option<PathBuf> {
    if let Some(path) = env.var("MCMM_CONFIG") {
        return Some(PathBuf::from(path));
    }
    env.config_dir()
        .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

pub fn load_config_file(path: &std::path::Path) -> Result<ConfigFile> {
    if !path.exists() {
        return Ok(ConfigFile::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    toml::from_str(&content).map_err(|err| {
        anyhow!(McmmError::InvalidConfig(format!(
            "{}: {}",
            path.display(),
            McmmError::from(err)
        )))
    })
}
