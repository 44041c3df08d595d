//! WASM entry point.

use std::sync::Arc;

use cre8tly_core::routing::WindowProbe;
use cre8tly_core::storage::LocalStorage;
use cre8tly_core::time::Instant;
use wasm_bindgen::prelude::*;

use crate::{AppConfig, AppContext};

/// Initialize logging and the app context, and resolve the entry route.
///
/// The returned error is surfaced to JavaScript as a string.
#[wasm_bindgen(start)]
pub fn run_wasm() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info)
        .map_err(|e| JsValue::from_str(&format!("Failed to initialize logger: {}", e)))?;

    log::info!("Starting Cre8tly Studio (WASM)");

    let store = LocalStorage::new().map_err(|e| JsValue::from_str(&e.to_string()))?;
    let context = AppContext::new(AppConfig::default(), Arc::new(store));
    let pending = context.start(&WindowProbe, Instant::now());
    log::info!(
        "Entry route for {} shell: {}",
        pending.runtime(),
        context.router().resolve(pending.runtime())
    );
    Ok(())
}
