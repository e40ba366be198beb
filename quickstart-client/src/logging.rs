/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 */

//! Logger installation.
//!
//! The crate only logs through the `log` facade. Hosts call [`init_logging`]
//! once; repeated calls are ignored.

use log::LevelFilter;

/// Install the browser console logger and panic hook.
#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
pub fn init_logging(level: LevelFilter) {
    console_error_panic_hook::set_once();
    let level = level.to_level().unwrap_or(log::Level::Error);
    if console_log::init_with_level(level).is_err() {
        log::debug!("logger already initialized");
    }
}

/// Install `env_logger`, letting `RUST_LOG` override `level`.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging(level: LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}

/// Without the `wasm` feature there is no console sink; only the level is set.
#[cfg(all(target_arch = "wasm32", not(feature = "wasm")))]
pub fn init_logging(level: LevelFilter) {
    log::set_max_level(level);
}
