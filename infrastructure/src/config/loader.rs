//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::PathBuf;

/// Prefix of configuration environment variables (`LABDASH_SERVER__BASE_URL`, ...)
pub const ENV_PREFIX: &str = "LABDASH_";

const PROJECT_FILES: [&str; 2] = ["labdash.toml", ".labdash.toml"];

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `LABDASH_` environment variables (`__` separates section and key)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./labdash.toml` or `./.labdash.toml`
    /// 4. Global: `$CONFIG_DIR/labdash/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        Self::figment(config_path).extract().map_err(Box::new)
    }

    fn figment(config_path: Option<&PathBuf>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("labdash").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(config_path: Option<&PathBuf>) {
        println!("Configuration sources (in priority order):");

        let env_vars: Vec<String> = std::env::vars()
            .map(|(k, _)| k)
            .filter(|k| k.starts_with(ENV_PREFIX))
            .collect();
        if env_vars.is_empty() {
            println!("  [     ] Env:      {}*", ENV_PREFIX);
        } else {
            println!("  [FOUND] Env:      {}", env_vars.join(", "));
        }

        if let Some(path) = config_path {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{:5}] Explicit: {}", mark, path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project:  {}", path.display());
        } else {
            println!("  [     ] Project:  ./labdash.toml or ./.labdash.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:   {}", path.display());
            } else {
                println!("  [     ] Global:   {}", path.display());
            }
        }

        println!("  [     ] Default:  built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.dashboard.page_size, 20);
        assert!(config.output.color);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("labdash"));
    }

    #[test]
    fn test_project_file_then_explicit_then_env() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "labdash.toml",
                r#"
[server]
base_url = "http://project:8000"

[dashboard]
page_size = 25
risk_limit = 10
"#,
            )?;
            jail.create_file(
                "override.toml",
                r#"
[dashboard]
page_size = 40
"#,
            )?;
            jail.set_env("LABDASH_DASHBOARD__RISK_LIMIT", "55");

            let explicit = PathBuf::from("override.toml");
            let config = ConfigLoader::load(Some(&explicit)).map_err(|e| *e)?;

            assert_eq!(config.server.base_url, "http://project:8000");
            assert_eq!(config.dashboard.page_size, 40);
            assert_eq!(config.dashboard.risk_limit, 55);
            assert_eq!(config.dashboard.refresh_interval_seconds, 30);
            Ok(())
        });
    }

    #[test]
    fn test_dot_file_is_found() {
        Jail::expect_with(|jail| {
            jail.create_file(".labdash.toml", "[output]\ncolor = false\n")?;

            let config = ConfigLoader::load(None).map_err(|e| *e)?;

            assert!(!config.output.color);
            assert_eq!(
                ConfigLoader::project_config_path(),
                Some(PathBuf::from(".labdash.toml"))
            );
            Ok(())
        });
    }
}
