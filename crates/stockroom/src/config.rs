use std::{
    env, fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use color_eyre::{eyre::eyre, Result};
use directories::ProjectDirs;
use inventory::{ItemGateway, JsonFileGateway, MemoryGateway, RealtimeDbGateway};
use lazy_static::lazy_static;
use serde::Deserialize;
use tracing::{info, warn};

const CONFIG_FILES: [(&str, config::FileFormat); 2] = [
    ("config.json5", config::FileFormat::Json5),
    ("config.toml", config::FileFormat::Toml),
];

/// Which gateway the app talks to.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    Memory,
    #[default]
    File,
    Realtime,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct GatewayConfig {
    #[serde(default)]
    pub backend: Backend,
    /// JSON document for the file backend. Defaults to `<data_dir>/items.json`.
    #[serde(default)]
    pub file: Option<PathBuf>,
    /// Database root URL for the realtime backend.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub auth: Option<String>,
}

impl GatewayConfig {
    pub fn build(&self, data_dir: &Path) -> Result<Arc<dyn ItemGateway>> {
        let gateway: Arc<dyn ItemGateway> = match self.backend {
            Backend::Memory => Arc::new(MemoryGateway::new()),
            Backend::File => {
                let path = self
                    .file
                    .clone()
                    .unwrap_or_else(|| data_dir.join("items.json"));
                info!(path = %path.display(), "using file gateway");
                Arc::new(JsonFileGateway::new(path))
            }
            Backend::Realtime => {
                let url = self
                    .url
                    .as_deref()
                    .ok_or_else(|| eyre!("gateway.url is required for the realtime backend"))?;
                info!(%url, "using realtime database gateway");
                let gateway = RealtimeDbGateway::new(url);
                match &self.auth {
                    Some(token) => Arc::new(gateway.with_auth(token.clone())),
                    None => Arc::new(gateway),
                }
            }
        };
        Ok(gateway)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data_dir: PathBuf,
    #[serde(default)]
    pub config_dir: PathBuf,
    #[serde(default = "default_tick_rate")]
    pub tick_rate: f64,
    #[serde(default = "default_frame_rate")]
    pub frame_rate: f64,
    #[serde(default)]
    pub gateway: GatewayConfig,
}

fn default_tick_rate() -> f64 {
    4.0
}

fn default_frame_rate() -> f64 {
    30.0
}

lazy_static! {
    pub static ref PROJECT_NAME: String = env!("CARGO_CRATE_NAME").to_uppercase().to_string();
    pub static ref DATA_FOLDER: Option<PathBuf> =
        env::var(format!("{}_DATA", PROJECT_NAME.clone()))
            .ok()
            .map(PathBuf::from);
    pub static ref CONFIG_FOLDER: Option<PathBuf> =
        env::var(format!("{}_CONFIG", PROJECT_NAME.clone()))
            .ok()
            .map(PathBuf::from);
    pub static ref LOG_ENV: String = format!("{}_LOG_LEVEL", PROJECT_NAME.clone());
    pub static ref LOG_FILE: String = format!("{}.log", env!("CARGO_PKG_NAME"));
}

impl Config {
    /// Defaults, then `config.json5` / `config.toml` from the config dir, then
    /// `STOCKROOM__*` environment variables (`__` separates nesting levels).
    pub fn new() -> Result<Self, config::ConfigError> {
        let data_dir = get_data_dir();
        let config_dir = get_config_dir();
        let mut builder = config::Config::builder()
            .set_default("data_dir", data_dir.to_string_lossy().to_string())?
            .set_default("config_dir", config_dir.to_string_lossy().to_string())?;

        let mut found_config = false;
        for (file, format) in &CONFIG_FILES {
            let source = config::File::from(config_dir.join(file))
                .format(*format)
                .required(false);
            builder = builder.add_source(source);
            if config_dir.join(file).exists() {
                found_config = true
            }
        }
        if !found_config {
            warn!("No configuration file found, running on defaults");
        }

        builder = builder.add_source(
            config::Environment::with_prefix(&PROJECT_NAME)
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }
}

pub fn get_data_dir() -> PathBuf {
    if let Some(s) = DATA_FOLDER.clone() {
        s
    } else if let Some(proj_dirs) = project_directory() {
        proj_dirs.data_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".data")
    }
}

pub fn get_config_dir() -> PathBuf {
    if let Some(s) = CONFIG_FOLDER.clone() {
        s
    } else if let Some(proj_dirs) = project_directory() {
        proj_dirs.config_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".config")
    }
}

fn project_directory() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "chicken105", env!("CARGO_PKG_NAME"))
}

pub fn ensure_data_and_config_dirs_exist() -> std::io::Result<()> {
    fs::create_dir_all(get_data_dir())?;
    fs::create_dir_all(get_config_dir())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(toml: &str) -> Config {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = parse("");
        assert_eq!(cfg.tick_rate, 4.0);
        assert_eq!(cfg.frame_rate, 30.0);
        assert_eq!(cfg.gateway.backend, Backend::File);
    }

    #[test]
    fn realtime_section_is_read() {
        let cfg = parse(
            r#"
            tick_rate = 8.0

            [gateway]
            backend = "realtime"
            url = "https://bakery.example.com"
            auth = "secret"
            "#,
        );
        assert_eq!(cfg.tick_rate, 8.0);
        assert_eq!(cfg.gateway.backend, Backend::Realtime);
        assert_eq!(cfg.gateway.url.as_deref(), Some("https://bakery.example.com"));
        assert_eq!(cfg.gateway.auth.as_deref(), Some("secret"));
    }

    #[test]
    fn realtime_without_url_is_an_error() {
        let gateway = GatewayConfig {
            backend: Backend::Realtime,
            ..Default::default()
        };
        assert!(gateway.build(Path::new(".")).is_err());
    }
}
