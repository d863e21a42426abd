//! Remedia — medication reminder core.
//!
//! Local-first state management for a medication reminder app: the
//! medication & dose store (CRUD plus the derived daily schedule), the
//! account session, and the per-screen derived views. All state persists as
//! JSON blobs in a pluggable key-value store; there is no backend.
//!
//! UI consumers hold a [`store::MedicationStore`] and an
//! [`account::AccountStore`] by handle and funnel every mutation through
//! their operation sets; reads derive screens via [`dashboard`],
//! [`medication_list`] and [`history`].

pub mod account;
pub mod config;
pub mod dashboard;
pub mod history;
pub mod medication_list;
pub mod models;
pub mod notify;
pub mod seed;
pub mod storage;
pub mod store;

pub use account::{AccountError, AccountStore};
pub use models::{
    DoseStatus, Medication, MedicationDose, MedicationUpdate, NewMedication, Plan, UserAccount,
};
pub use notify::{LogNotifier, MemoryNotifier, Notification, Notifier, Severity};
pub use storage::{BlobStore, FileBlobStore, MemoryBlobStore, StorageError};
pub use store::{MedicationStore, StoreError};

use tracing_subscriber::EnvFilter;

/// Initialize tracing for binaries embedding the crate.
///
/// Honors `RUST_LOG` when set, otherwise falls back to the crate default.
/// Calling it twice is a caller bug; the second call panics in debug via
/// `tracing_subscriber`'s own guard.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
}

/// Open both stores over file-backed blobs in the default storage
/// directory, logging notifications through `tracing`.
pub fn open_default_stores() -> Result<(MedicationStore, AccountStore), StoreError> {
    let dir = config::storage_dir();
    let medications = MedicationStore::load(
        Box::new(FileBlobStore::new(&dir)),
        Box::new(LogNotifier),
    )?;
    let account = AccountStore::load(
        Box::new(FileBlobStore::new(&dir)),
        Box::new(LogNotifier),
    )?;
    Ok((medications, account))
}
