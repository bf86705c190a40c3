//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// Project-level config file names, checked in order
const PROJECT_FILES: [&str; 2] = ["pulse.toml", ".pulse.toml"];

/// Prefix of environment overrides (`PULSE_SERVER__PORT=8080`)
const ENV_PREFIX: &str = "PULSE_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `PULSE_*` environment variables (`__` separates sections)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./pulse.toml` or `./.pulse.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/lecture-pulse/config.toml`
    /// 5. Default values
    ///
    /// Unset secrets are then filled from `S2_ACCESS_TOKEN` and
    /// `GEMINI_API_KEY`.
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let global = Self::global_config_path();
        let project = Self::project_config_path();
        let config: FileConfig = Self::figment(
            global.as_deref(),
            project.as_deref(),
            config_path.map(PathBuf::as_path),
        )
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .map_err(Box::new)?;
        Ok(config.with_secret_fallbacks(|name| std::env::var(name).ok()))
    }

    /// Merge the file layers that exist, lowest priority first
    fn figment(global: Option<&Path>, project: Option<&Path>, explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));
        for path in [global, project].into_iter().flatten() {
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            }
        }
        // An explicit file must exist; figment reports it missing otherwise
        if let Some(path) = explicit {
            figment = figment.merge(Toml::file_exact(path));
        }
        figment
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default().with_secret_fallbacks(|name| std::env::var(name).ok())
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/lecture-pulse/config.toml if set,
    /// otherwise falls back to ~/.config/lecture-pulse/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("lecture-pulse").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Describe the config file locations being used (for `--show-config`)
    pub fn describe_sources() -> Vec<String> {
        let mut lines = vec!["Configuration sources (in priority order):".to_string()];
        lines.push(format!("  [env  ] {ENV_PREFIX}* variables"));
        match Self::project_config_path() {
            Some(path) => lines.push(format!("  [FOUND] Project: {}", path.display())),
            None => lines.push("  [     ] Project: ./pulse.toml or ./.pulse.toml".to_string()),
        }
        if let Some(path) = Self::global_config_path() {
            let marker = if path.exists() { "FOUND" } else { "     " };
            lines.push(format!("  [{marker}] Global:  {}", path.display()));
        }
        lines.push("  [     ] Default: built-in defaults".to_string());
        lines
    }
}
