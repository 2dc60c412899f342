#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::collections::HashMap;
use std::env;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::ArgMatches;
use clap::Command;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;
use tokio::fs;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    ApiURL,
    Chatbot,
    ConfigFile,
    SessionID,
    TokenFile,
}

fn app_dir(base: Option<path::PathBuf>) -> path::PathBuf {
    return base.unwrap_or_else(env::temp_dir).join("parley");
}

pub struct Config {}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        if let Some(val) = CONFIG.get(&key.to_string()) {
            return val.to_string();
        }

        return "".to_string();
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key.to_string(), value.to_string());
    }

    pub fn default(key: ConfigKey) -> String {
        let res = match key {
            ConfigKey::ApiURL => "http://localhost:8080".to_string(),
            ConfigKey::Chatbot => "".to_string(),

            // Special
            ConfigKey::ConfigFile => app_dir(dirs::config_dir())
                .join("config.toml")
                .to_string_lossy()
                .to_string(),
            ConfigKey::SessionID => "".to_string(),
            ConfigKey::TokenFile => app_dir(dirs::cache_dir())
                .join("token")
                .to_string_lossy()
                .to_string(),
        };

        return res;
    }

    /// Directory holding `debug.log`. `PARLEY_LOG_DIR` takes priority.
    pub fn log_dir() -> path::PathBuf {
        if let Ok(dir) = env::var("PARLEY_LOG_DIR") {
            if !dir.is_empty() {
                return path::PathBuf::from(dir);
            }
        }

        return app_dir(dirs::cache_dir());
    }

    /// Resolves every key from defaults, then the TOML config file, then
    /// command line arguments and environment variables. Nothing is stored
    /// unless every layer loads cleanly.
    pub async fn load(cmd: Command, clap_arg_matches: Vec<&ArgMatches>) -> Result<()> {
        let mut values = ConfigKey::iter()
            .map(|key| return (key, Config::default(key)))
            .collect::<HashMap<ConfigKey, String>>();

        let mut config_file = Config::default(ConfigKey::ConfigFile);
        for matches in clap_arg_matches.as_slice() {
            if let Ok(Some(arg_config_file)) =
                matches.try_get_one::<String>(&ConfigKey::ConfigFile.to_string())
            {
                config_file = arg_config_file.to_string();
            }
        }

        let config_path = path::PathBuf::from(&config_file);
        if config_path.exists() {
            let toml_str = fs::read_to_string(&config_path).await?;
            let doc = toml_str.parse::<toml_edit::Document>()?;

            for (name, _) in doc.iter() {
                if !cmd
                    .get_arguments()
                    .any(|e| return e.get_long() == Some(name))
                {
                    tracing::warn!(key = name, "Ignoring unknown key in config file");
                }
            }

            for key in ConfigKey::iter() {
                if key == ConfigKey::ConfigFile {
                    continue;
                }

                if let Some(val) = doc.get(&key.to_string()) {
                    let val_str = match val.as_str() {
                        Some(val_str) => val_str,
                        None => {
                            bail!(format!(
                                "config.toml has an invalid value for key '{key}': expected a string"
                            ));
                        }
                    };
                    if val_str.is_empty() {
                        continue;
                    }
                    if key == ConfigKey::ApiURL && reqwest::Url::parse(val_str).is_err() {
                        bail!(format!(
                            "config.toml has an invalid value for key '{key}': {val_str} is not a URL"
                        ));
                    }
                    values.insert(key, val_str.to_string());
                }
            }
        }

        for key in ConfigKey::iter() {
            for matches in clap_arg_matches.as_slice() {
                if let Ok(Some(val)) = matches.try_get_one::<String>(&key.to_string()) {
                    if val.is_empty() {
                        continue;
                    }
                    values.insert(key, val.to_string());
                }
            }
        }

        for (key, val) in values.iter() {
            Config::set(*key, val);
        }

        tracing::debug!(
            api_url = Config::get(ConfigKey::ApiURL),
            chatbot = Config::get(ConfigKey::Chatbot),
            session_id = Config::get(ConfigKey::SessionID),
            config_file = config_file.as_str(),
            "config"
        );

        return Ok(());
    }

    /// Commented TOML of every user facing key with its default value.
    pub fn serialize_default(cmd: Command) -> String {
        let toml_str = ConfigKey::iter()
            .filter_map(|key| {
                if key == ConfigKey::SessionID || key == ConfigKey::ConfigFile {
                    return None;
                }

                let long = key.to_string();
                let arg = cmd
                    .get_arguments()
                    .find(|e| return e.get_long() == Some(long.as_str()))?;

                let help = arg
                    .get_help()
                    .map(|e| return e.to_string())
                    .unwrap_or_default();
                let description = help
                    .split("[default:")
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_string();

                let default = Config::default(key);
                let val = if default.is_empty() {
                    format!("# {key} = \"\"")
                } else {
                    format!("{key} = \"{default}\"")
                };

                return Some(format!("# {description}\n{val}"));
            })
            .collect::<Vec<String>>()
            .join("\n\n");

        return toml_str;
    }
}
