//! Local State Config

use std::path::PathBuf;

use clap::Args;
use tiffin::storage::{FileStore, StorageError};

/// Where the session token and cart snapshot are kept.
#[derive(Debug, Clone, Args)]
pub struct StorageConfig {
    /// Directory holding the session token and cart snapshot
    #[arg(long, env = "TIFFIN_STATE_DIR", default_value = ".tiffin", global = true)]
    pub state_dir: PathBuf,

    /// Keep the cart when the session ends
    #[arg(long, env = "TIFFIN_KEEP_CART_ON_LOGOUT", default_value_t = false, global = true)]
    pub keep_cart_on_logout: bool,
}

impl StorageConfig {
    /// Open the state directory, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the directory cannot be created.
    pub fn open(&self) -> Result<FileStore, StorageError> {
        FileStore::open(&self.state_dir)
    }
}
