//! Configuration loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// Prefix of environment overrides (`AGENDAI_DISPATCH__MAX_ITERATIONS=3`)
pub const ENV_PREFIX: &str = "AGENDAI_";
/// Standard Google Cloud variable mapped onto `model.project_id`
pub const PROJECT_ENV: &str = "GOOGLE_CLOUD_PROJECT";

const PROJECT_FILES: [&str; 2] = ["agendai.toml", ".agendai.toml"];

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `GOOGLE_CLOUD_PROJECT` (model.project_id only)
    /// 2. `AGENDAI_<SECTION>__<KEY>` environment variables
    /// 3. Explicit config path (if provided)
    /// 4. Project root: `./agendai.toml` or `./.agendai.toml`
    /// 5. Global: `~/.config/agendai/config.toml`
    /// 6. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let files = Self::files_figment(
            Self::global_config_path().as_deref(),
            Self::project_config_path().as_deref(),
            config_path.map(PathBuf::as_path),
        );
        Self::with_env(files, ENV_PREFIX, PROJECT_ENV)
            .extract()
            .map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Defaults merged with whichever of the given files exist.
    pub fn files_figment(
        global: Option<&Path>,
        project: Option<&Path>,
        explicit: Option<&Path>,
    ) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        for path in [global, project].into_iter().flatten() {
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            }
        }

        // An explicit path is merged even if missing so the user hears about it.
        if let Some(path) = explicit {
            figment = figment.merge(Toml::file_exact(path));
        }

        figment
    }

    /// Layer environment overrides on top of `figment`.
    pub fn with_env(figment: Figment, prefix: &str, project_var: &'static str) -> Figment {
        figment
            .merge(Env::prefixed(prefix).split("__"))
            .merge(
                Env::raw()
                    .only(&[project_var])
                    .map(|_| "model.project_id".into()),
            )
    }

    /// Get the global config file path (`~/.config/agendai/config.toml`)
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("agendai").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(explicit: Option<&PathBuf>) {
        println!("Configuration sources (in priority order):");

        println!("  [ENV  ] {PROJECT_ENV} -> model.project_id");
        println!("  [ENV  ] {ENV_PREFIX}<SECTION>__<KEY>");

        if let Some(path) = explicit {
            let mark = if path.exists() { "FOUND" } else { "MISS " };
            println!("  [{mark}] Explicit: {}", path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./agendai.toml or ./.agendai.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}
