use crate::makefile::CompilerConfig;
use crate::utils::error::{Error, Result};
use crate::utils::log::{log, LogLevel};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

enum ConfigParam {
    DefaultCc(String),
    DefaultCxx(String),
    DefaultCxxflags(String),
    Author(String),
}

/// Per-user defaults, stored as toml in the platform config directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    default_cc: String,
    default_cxx: String,
    default_cxxflags: String,
    author: String,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        let compiler = CompilerConfig::default();
        GlobalConfig {
            default_cc: compiler.cc,
            default_cxx: compiler.cxx,
            default_cxxflags: compiler.cxxflags,
            author: "Ying Xiong".to_string(),
        }
    }
}

/// Location of the user config file, if the platform has a config directory
pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "xyconf").map(|dirs| dirs.config_dir().join("config.toml"))
}

impl GlobalConfig {
    /// Sets one parameter and saves the file
    pub fn set_defaults(config: &Path, parameter: &str, value: &str) -> Result<()> {
        let param = match parameter {
            "default_cc" => ConfigParam::DefaultCc(value.to_string()),
            "default_cxx" => ConfigParam::DefaultCxx(value.to_string()),
            "default_cxxflags" => ConfigParam::DefaultCxxflags(value.to_string()),
            "author" => ConfigParam::Author(value.to_string()),
            _ => {
                return Err(Error::Argument(format!(
                    "invalid parameter {}. See `xyconf config --help` for more info",
                    parameter
                )))
            }
        };
        let mut global_conf = GlobalConfig::from_file(config)?;
        match param {
            ConfigParam::DefaultCc(value) => global_conf.default_cc = value,
            ConfigParam::DefaultCxx(value) => global_conf.default_cxx = value,
            ConfigParam::DefaultCxxflags(value) => global_conf.default_cxxflags = value,
            ConfigParam::Author(value) => global_conf.author = value,
        }
        global_conf.save(config)?;
        log(LogLevel::Log, &format!("Set {} = {:?}", parameter, value));
        Ok(())
    }

    /// Reads the config file. A missing file yields the built-in defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            log(
                LogLevel::Debug,
                &format!("No config at {}, using defaults", path.display()),
            );
            return Ok(GlobalConfig::default());
        }
        let config =
            std::fs::read_to_string(path).map_err(|e| Error::io("could not read", path, e))?;
        toml::from_str(&config).map_err(|source| Error::Parse {
            what: path.display().to_string(),
            source,
        })
    }

    /// Reads the config from the platform location
    pub fn load() -> Result<Self> {
        match config_path() {
            Some(path) => GlobalConfig::from_file(&path),
            None => Ok(GlobalConfig::default()),
        }
    }

    fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::io("could not create", parent, e))?;
        }
        let text = toml::to_string(self)
            .map_err(|e| Error::Configuration(format!("could not serialize config: {}", e)))?;
        std::fs::write(path, text).map_err(|e| Error::io("could not write", path, e))
    }

    /// Compiler settings with command line values taking precedence
    pub fn compiler(
        &self,
        cc: Option<String>,
        cxx: Option<String>,
        cxxflags: Option<String>,
        use_tr1: bool,
    ) -> CompilerConfig {
        CompilerConfig {
            cc: cc.unwrap_or_else(|| self.default_cc.clone()),
            cxx: cxx.unwrap_or_else(|| self.default_cxx.clone()),
            cxxflags: cxxflags.unwrap_or_else(|| self.default_cxxflags.clone()),
            use_tr1,
        }
    }

    pub fn get_author(&self) -> String {
        self.author.clone()
    }
}
