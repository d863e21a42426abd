use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Remedia";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default `tracing` filter when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "info,remedia=debug"
}

/// Get the application data directory
/// ~/Remedia/ on all platforms (user-visible, per design requirement)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Remedia")
}

/// Directory holding the persisted state blobs.
pub fn storage_dir() -> PathBuf {
    app_data_dir().join("storage")
}
