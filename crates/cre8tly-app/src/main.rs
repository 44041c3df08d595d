//! Main application entry point (native).

#[cfg(feature = "native")]
fn main() {
    env_logger::init();
    log::info!("Starting Cre8tly Studio");

    if let Err(e) = native::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(feature = "native")]
mod native {
    use std::sync::Arc;

    use cre8tly_app::{AppConfig, AppContext, AppResult, ShortcutRegistry};
    use cre8tly_core::routing::EnvProbe;
    use cre8tly_core::storage::FileStore;
    use cre8tly_core::time::Instant;

    /// Environment variable pointing at a JSON config file.
    const CONFIG_ENV: &str = "CRE8TLY_CONFIG";

    fn load_config() -> AppResult<AppConfig> {
        let Ok(path) = std::env::var(CONFIG_ENV) else {
            return Ok(AppConfig::default());
        };
        log::info!("Loading config from {}", path);
        let json = std::fs::read_to_string(&path).map_err(|e| {
            cre8tly_core::StorageError::Io(format!("Failed to read {}: {}", path, e))
        })?;
        Ok(AppConfig::from_json(&json)?)
    }

    pub fn run() -> AppResult<()> {
        let config = load_config()?;
        let store = FileStore::in_data_dir(&config.storage_namespace)?;
        log::info!("Preferences at {}", store.path().display());

        let context = AppContext::new(config, Arc::new(store));
        for line in ShortcutRegistry::help() {
            log::debug!("{}", line);
        }

        let start = Instant::now();
        let pending = context.start(&EnvProbe::default(), start);
        std::thread::sleep(pending.remaining(start));
        if let Some(route) = pending.poll(Instant::now()) {
            log::info!("Entry route: {}", route);
        }
        Ok(())
    }
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
