//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use sava_store::MemoryStore;
use sava_storefront::{Lang, SessionState, Settings, Storefront};

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Where the configuration was loaded from, if anywhere.
    pub config_path: Option<PathBuf>,
    /// Storefront settings from the environment.
    pub settings: Settings,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, settings: Settings, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => {
                let path = resolve(&cwd, Path::new(path));
                (CliConfig::load(&path)?, Some(path))
            }
            None => match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            },
        };
        if let Some(path) = &config_path {
            output.debug(&format!("Using config {}", path.display()));
        }

        Ok(Self {
            config,
            config_path,
            settings,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(&config_path) {
                        return Some((config, config_path));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Store snapshot file.
    pub fn store_path(&self) -> PathBuf {
        resolve(&self.cwd, &self.config.store.path)
    }

    /// Session state file.
    pub fn session_path(&self) -> PathBuf {
        resolve(&self.cwd, &self.config.session.path)
    }

    /// Open the storefront over the store snapshot.
    pub fn storefront(&self) -> Result<Storefront<MemoryStore>> {
        let path = self.store_path();
        let store = MemoryStore::open(&path, self.settings.currency)
            .with_context(|| format!("Failed to open store: {}", path.display()))?;
        Ok(Storefront::new(store, self.settings.clone()))
    }

    /// Load the saved session, or start a new one.
    pub fn load_session(&self, shop: &Storefront<MemoryStore>) -> Result<SessionState> {
        let path = self.session_path();
        if !path.exists() {
            let mut session = shop.new_session();
            session.lang = Lang::parse(&self.config.session.lang).unwrap_or_default();
            return Ok(session);
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read session: {}", path.display()))?;
        let session: SessionState = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse session: {}", path.display()))?;
        if session.guest_cart.currency != self.settings.currency {
            tracing::warn!(
                path = %path.display(),
                "saved session uses another currency, starting a new one"
            );
            let mut fresh = shop.new_session();
            fresh.lang = session.lang;
            return Ok(fresh);
        }
        Ok(session)
    }

    /// Persist the session for the next command.
    pub fn save_session(&self, session: &SessionState) -> Result<()> {
        let path = self.session_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(session)?;
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write session: {}", path.display()))
    }
}

/// Resolve a path relative to the working directory.
fn resolve(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}
