use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use clap::builder::BoolishValueParser;

pub(crate) const DEFAULT_CACHE_ADDR: &str = "wes-app-meta-cache:6379";
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Parser)]
#[command(name = "app-meta-init", version)]
pub struct Cli {
    /// Path to the kubeconfig file [default: ~/.kube/config, falling back to in-cluster config]
    #[arg(long)]
    pub kubeconfig: Option<PathBuf>,

    /// Address (host:port) of the app meta cache
    #[arg(long, env = "APP_META_CACHE_ADDR", default_value = DEFAULT_CACHE_ADDR)]
    pub cache_addr: String,

    /// Collect and log metadata without writing it to the cache
    #[arg(long, env = "APP_META_SKIP_CACHE_WRITE", value_parser = BoolishValueParser::new())]
    pub skip_cache_write: bool,

    /// Deadline in seconds for the node lookup and cache write combined
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,
}

impl Cli {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Kubeconfig to load, or `None` for in-cluster config.
    pub fn kubeconfig_path(&self) -> Option<PathBuf> {
        resolve_kubeconfig(self.kubeconfig.as_deref(), std::env::var_os("HOME"))
    }
}

/// Pick the kubeconfig file.
///
/// An explicit path is used as given, except that an empty path selects
/// in-cluster config. Without one, `$HOME/.kube/config` is used when it exists.
pub fn resolve_kubeconfig(explicit: Option<&Path>, home: Option<OsString>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return (!path.as_os_str().is_empty()).then(|| path.to_path_buf());
    }

    home.filter(|h| !h.is_empty())
        .map(|h| PathBuf::from(h).join(".kube").join("config"))
        .filter(|p| p.is_file())
}
