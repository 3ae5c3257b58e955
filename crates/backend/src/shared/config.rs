use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub artifacts: ArtifactsConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ArtifactsConfig {
    /// Directory containing `data_clean/` and `outputs/`
    pub root: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Client bundle served for every non-API path
    pub static_dir: String,
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[artifacts]
root = "."

[server]
host = "0.0.0.0"
port = 3000
static_dir = "dist"
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

/// Artifacts root directory. Relative paths resolve against the current
/// working directory, where the upstream notebooks write their outputs.
pub fn get_artifacts_root(config: &Config) -> anyhow::Result<PathBuf> {
    let root = Path::new(&config.artifacts.root);

    if root.is_absolute() {
        return Ok(root.to_path_buf());
    }

    Ok(std::env::current_dir()?.join(root))
}

pub fn get_bind_address(config: &Config) -> anyhow::Result<SocketAddr> {
    let host: IpAddr = config
        .server
        .host
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid server.host '{}': {}", config.server.host, e))?;
    Ok(SocketAddr::new(host, config.server.port))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Result<Config, _> = toml::from_str(DEFAULT_CONFIG);
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.artifacts.root, ".");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.static_dir, "dist");
    }

    #[test]
    fn test_bind_address() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(get_bind_address(&config).unwrap().to_string(), "0.0.0.0:3000");

        let mut bad = config.clone();
        bad.server.host = "localhost:80".to_string();
        assert!(get_bind_address(&bad).is_err());
    }

    #[test]
    fn test_absolute_artifacts_root_is_kept() {
        let mut config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        let dir = tempfile::tempdir().unwrap();
        config.artifacts.root = dir.path().display().to_string();
        assert_eq!(get_artifacts_root(&config).unwrap(), dir.path());
    }
}
