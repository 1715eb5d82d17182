use std::env;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_COMIC: &str = "official-dew-comic-website";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid config value for '{key}': {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Server settings, read from the environment at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub comics_dir: PathBuf,
    pub public_dir: PathBuf,
    /// Comic the root path redirects to.
    pub default_comic: String,
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            comics_dir: PathBuf::from("comics"),
            public_dir: PathBuf::from("public"),
            default_comic: DEFAULT_COMIC.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl AppConfig {
    /// `COMICS_DIR`, `PUBLIC_DIR`, `DEFAULT_COMIC` and `PORT`, each optional.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AppConfig::default();

        if let Some(dir) = lookup("COMICS_DIR") {
            config.comics_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("PUBLIC_DIR") {
            config.public_dir = PathBuf::from(dir);
        }
        if let Some(slug) = lookup("DEFAULT_COMIC").filter(|s| !s.is_empty()) {
            config.default_comic = slug;
        }
        if let Some(port) = lookup("PORT") {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue { key: "PORT", value: port })?;
        }

        Ok(config)
    }

    pub fn custom_logo_dir(&self) -> PathBuf {
        self.public_dir.join("assets").join("custom-logo")
    }

    pub fn patterns_dir(&self) -> PathBuf {
        self.public_dir.join("assets").join("patterns")
    }

    /// Create both served roots so the static mounts have something to serve.
    pub fn ensure_dirs(&self) -> io::Result<()> {
        std::fs::create_dir_all(&self.comics_dir)?;
        std::fs::create_dir_all(&self.public_dir)
    }
}
