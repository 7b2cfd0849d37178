use std::{
    collections::HashMap,
    env,
    fs,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{anyhow, Result};
use directories::BaseDirs;

use crate::process::python::default_interpreter;

#[derive(Debug, Clone)]
pub struct Config {
    inner: HashMap<String, String>,
    pub config_path: PathBuf,
}

impl Config {
    pub fn load() -> Self {
        Self::load_from(&default_config_path())
    }

    pub fn load_from(config_path: &Path) -> Self {
        let mut map = default_map();

        // Read .pyrunrc if exists
        if config_path.exists() {
            if let Ok(file) = fs::File::open(config_path) {
                let reader = BufReader::new(file);
                for line in reader.lines().map_while(std::result::Result::ok) {
                    let line = line.trim();
                    if line.is_empty() || line.starts_with('#') {
                        continue;
                    }
                    if let Some((k, v)) = line.split_once('=') {
                        map.insert(k.trim().to_string(), v.trim().to_string());
                    }
                }
            }
        }

        // Overlay environment variables (take precedence)
        for (k, v) in env::vars() {
            if is_config_key(&k) {
                map.insert(k, v);
            }
        }

        Self {
            inner: map,
            config_path: config_path.to_path_buf(),
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        // ENV first
        if let Ok(v) = env::var(key) {
            return Some(v);
        }
        self.inner.get(key).cloned()
    }

    pub fn get_u64(&self, key: &str) -> Result<u64> {
        let raw = self.get(key).ok_or_else(|| anyhow!("missing config value {key}"))?;
        raw.trim()
            .parse::<u64>()
            .map_err(|e| anyhow!("invalid {key}={raw}: {e}"))
    }

    pub fn interpreter(&self) -> PathBuf {
        self.get("PYRUN_INTERPRETER")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(default_interpreter()))
    }

    pub fn timeout(&self) -> Result<Duration> {
        self.get_u64("PYRUN_TIMEOUT_MS").map(Duration::from_millis)
    }

    pub fn drain_grace(&self) -> Result<Duration> {
        self.get_u64("PYRUN_DRAIN_GRACE_MS").map(Duration::from_millis)
    }

    pub fn display_limit(&self) -> Result<usize> {
        Ok(self.get_u64("PYRUN_DISPLAY_LIMIT")? as usize)
    }

    pub fn log_filter(&self) -> String {
        self.get("PYRUN_LOG").unwrap_or_else(|| "pyrun=warn".to_string())
    }
}

fn is_config_key(k: &str) -> bool {
    k.starts_with("PYRUN_")
}

fn default_config_path() -> PathBuf {
    let base = BaseDirs::new()
        .map(|b| b.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("~/.config"));
    base.join("pyrun").join(".pyrunrc")
}

fn default_map() -> HashMap<String, String> {
    let mut m = HashMap::new();

    m.insert("PYRUN_INTERPRETER".into(), default_interpreter().into());

    // Numbers
    m.insert("PYRUN_TIMEOUT_MS".into(), "3000".into());
    m.insert("PYRUN_DRAIN_GRACE_MS".into(), "2000".into());
    m.insert("PYRUN_DISPLAY_LIMIT".into(), "200".into());

    m.insert("PYRUN_LOG".into(), "pyrun=warn".into());

    m
}
