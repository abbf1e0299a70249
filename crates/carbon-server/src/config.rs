use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming the TOML config file.
pub const CONFIG_PATH_VAR: &str = "CARBON_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "carbon.toml";
pub const ENV_PREFIX: &str = "CARBON_";
/// Module the page imports from `/pkg`.
pub const WEB_ENTRY_MODULE: &str = "carbon_web.js";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Uploaded files are kept here when set.
    pub upload_dir: Option<PathBuf>,
    pub max_upload_bytes: usize,
    pub factors_path: Option<PathBuf>,
    pub alternatives_path: Option<PathBuf>,
    /// Directory holding the built wasm bundle, served under `/pkg`.
    pub web_pkg_dir: Option<PathBuf>,
    pub cors_permissive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 5000,
            upload_dir: None,
            max_upload_bytes: 10 * 1024 * 1024,
            factors_path: None,
            alternatives_path: None,
            web_pkg_dir: None,
            cors_permissive: false,
        }
    }
}

impl ServerConfig {
    /// Defaults, then the TOML file named by `CARBON_CONFIG` (or `carbon.toml`),
    /// then `CARBON_*` environment variables.
    pub fn load() -> Result<ServerConfig, figment::Error> {
        let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.into());
        Self::figment(Path::new(&path)).extract()
    }

    pub fn figment(toml_path: &Path) -> Figment {
        Figment::from(Serialized::defaults(ServerConfig::default()))
            .merge(Toml::file(toml_path))
            .merge(Env::prefixed(ENV_PREFIX).ignore(&["config"]))
    }

    pub fn bind_addr(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }

    /// Why the page at `/` cannot load its wasm module, if it cannot.
    pub fn web_bundle_problem(&self) -> Option<String> {
        match &self.web_pkg_dir {
            None => Some(format!(
                "web_pkg_dir is not set; /pkg is not served and the page at / will not load \
                 (build crates/carbon-web with wasm-pack and set {ENV_PREFIX}WEB_PKG_DIR)"
            )),
            Some(dir) if !dir.join(WEB_ENTRY_MODULE).is_file() => Some(format!(
                "{} not found; the page at / will not load",
                dir.join(WEB_ENTRY_MODULE).display()
            )),
            Some(_) => None,
        }
    }
}
