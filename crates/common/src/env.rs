//! Environment/runtime helpers
//!
//! Startup sanity check for the backing file. The file is never created
//! here: a missing store is served as "not found" until someone puts it in
//! place.

use std::path::Path;

use tracing::{info, warn};

/// Report whether the backing file exists; warn when it does not.
pub async fn check_data_file(path: &Path) -> bool {
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_file() => {
            info!(path = %path.display(), bytes = meta.len(), "backing file found");
            true
        }
        Ok(_) => {
            warn!(path = %path.display(), "backing path is not a regular file; catalog requests will 404");
            false
        }
        Err(_) => {
            warn!(path = %path.display(), "backing file not found; catalog requests will 404");
            false
        }
    }
}
