//! Logging setup plus conditional macros gated on a module-level
//! `ENABLE_LOGS` flag, so chatty modules can be muted without touching
//! call sites.
//!
//! ```text
//! const ENABLE_LOGS: bool = true;
//!
//! use foodlab::log_info;
//! log_info!("logged only when ENABLE_LOGS is true");
//! ```

/// Initialize env_logger for binaries and examples embedding this crate.
/// Reads `RUST_LOG`, defaulting to info level.
pub fn init() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
}

/// Conditional info logging; the calling module must define
/// `const ENABLE_LOGS: bool`.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::info!($($arg)*);
        }
    };
}

/// Conditional warn logging; the calling module must define
/// `const ENABLE_LOGS: bool`.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::warn!($($arg)*);
        }
    };
}

/// Conditional error logging; the calling module must define
/// `const ENABLE_LOGS: bool`.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::error!($($arg)*);
        }
    };
}
