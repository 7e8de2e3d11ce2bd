//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Logging (env_logger on native, browser console on web)
//! - Default storage (data-dir file on native, LocalStorage on web)

use crate::error::StorageError;

/// Install the platform logger. Safe to call more than once.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).try_init();
}

#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Environment variable overriding the native data directory
#[cfg(not(target_arch = "wasm32"))]
pub const DATA_DIR_ENV: &str = "AVOID_OBSTACLES_DATA_DIR";

/// Default durable store for this platform
#[cfg(not(target_arch = "wasm32"))]
pub fn default_store() -> Result<crate::persistence::FileStore, StorageError> {
    use crate::persistence::FileStore;

    match std::env::var_os(DATA_DIR_ENV) {
        Some(dir) => FileStore::open(dir),
        None => FileStore::open_default(),
    }
}

#[cfg(target_arch = "wasm32")]
pub fn default_store() -> Result<crate::persistence::LocalStorage, StorageError> {
    crate::persistence::LocalStorage::open()
}
