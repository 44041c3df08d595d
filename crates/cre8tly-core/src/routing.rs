//! Entry routing for the browser and desktop shells.
//!
//! The same front-end runs in a browser tab and inside the desktop shell.
//! On start-up the entry route checks which one it is in and navigates to
//! the matching landing route after a short fixed delay, giving the
//! navigation layer time to finish mounting.

use crate::time::{Duration, Instant};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Delay between the entry decision and the actual navigation.
pub const NAVIGATION_DELAY: Duration = Duration::from_millis(250);

/// Environment variable the desktop shell sets for its webview process.
pub const DESKTOP_ENV_MARKER: &str = "TAURI_ENV_PLATFORM";

/// Where the front-end is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Runtime {
    Browser,
    Desktop,
}

impl fmt::Display for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Runtime::Browser => "browser",
            Runtime::Desktop => "desktop",
        })
    }
}

/// Detects the desktop runtime marker.
pub trait RuntimeProbe {
    fn detect(&self) -> Runtime;
}

/// Probe that always answers the same runtime.
#[derive(Debug, Clone, Copy)]
pub struct FixedRuntime(pub Runtime);

impl RuntimeProbe for FixedRuntime {
    fn detect(&self) -> Runtime {
        self.0
    }
}

/// Checks for the desktop shell's environment marker.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct EnvProbe {
    marker: String,
}

#[cfg(not(target_arch = "wasm32"))]
impl EnvProbe {
    pub fn new(marker: impl Into<String>) -> Self {
        Self { marker: marker.into() }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for EnvProbe {
    fn default() -> Self {
        Self::new(DESKTOP_ENV_MARKER)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl RuntimeProbe for EnvProbe {
    fn detect(&self) -> Runtime {
        runtime_for_marker(std::env::var_os(&self.marker).as_deref())
    }
}

/// A set, non-empty marker means the desktop shell.
#[cfg(not(target_arch = "wasm32"))]
fn runtime_for_marker(value: Option<&std::ffi::OsStr>) -> Runtime {
    match value {
        Some(value) if !value.is_empty() => Runtime::Desktop,
        _ => Runtime::Browser,
    }
}

/// Checks for the `window.__TAURI__` global injected by the desktop shell.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowProbe;

#[cfg(target_arch = "wasm32")]
impl RuntimeProbe for WindowProbe {
    fn detect(&self) -> Runtime {
        let Some(window) = web_sys::window() else {
            return Runtime::Browser;
        };
        let has_marker = js_sys::Reflect::has(&window, &"__TAURI__".into()).unwrap_or(false);
        if has_marker {
            Runtime::Desktop
        } else {
            Runtime::Browser
        }
    }
}

/// A navigation target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Route(String);

impl Route {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Landing routes per runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteTargets {
    pub browser: Route,
    pub desktop: Route,
}

impl Default for RouteTargets {
    fn default() -> Self {
        Self {
            browser: Route::new("/"),
            desktop: Route::new("/login"),
        }
    }
}

/// Decides the first navigation.
#[derive(Debug, Clone)]
pub struct EntryRouter {
    targets: RouteTargets,
    delay: Duration,
}

impl Default for EntryRouter {
    fn default() -> Self {
        Self::new(RouteTargets::default())
    }
}

impl EntryRouter {
    pub fn new(targets: RouteTargets) -> Self {
        Self {
            targets,
            delay: NAVIGATION_DELAY,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Target route for `runtime`.
    pub fn resolve(&self, runtime: Runtime) -> &Route {
        match runtime {
            Runtime::Browser => &self.targets.browser,
            Runtime::Desktop => &self.targets.desktop,
        }
    }

    /// Probe the runtime and schedule navigation `delay` after `now`.
    pub fn schedule(&self, probe: &dyn RuntimeProbe, now: Instant) -> PendingNavigation {
        let runtime = probe.detect();
        let route = self.resolve(runtime).clone();
        log::info!("Running in {} shell, navigating to {}", runtime, route);
        PendingNavigation {
            runtime,
            route,
            due: now + self.delay,
        }
    }
}

/// A navigation waiting for its delay to pass.
#[derive(Debug, Clone)]
pub struct PendingNavigation {
    runtime: Runtime,
    route: Route,
    due: Instant,
}

impl PendingNavigation {
    pub fn runtime(&self) -> Runtime {
        self.runtime
    }

    /// The route, once `now` has reached the due time.
    pub fn poll(&self, now: Instant) -> Option<&Route> {
        (now >= self.due).then_some(&self.route)
    }

    /// Time left before the navigation fires.
    pub fn remaining(&self, now: Instant) -> Duration {
        self.due.saturating_duration_since(now)
    }
}
