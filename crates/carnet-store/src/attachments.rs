//! Receipt and photo storage.
//!
//! Receipts are append-only: every upload becomes a new file prefixed with
//! the upload timestamp, so nothing is ever overwritten. Photos are keyed
//! by vehicle name, one per vehicle.

use std::fs;
use std::path::{Path, PathBuf};

use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::store::{PHOTOS_DIR, RECEIPTS_DIR, Store};

const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[year][month][day]_[hour][minute][second]");

/// Photo extensions probed by [`Store::find_photo`], in order.
const PHOTO_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

impl Store {
    /// Copy a receipt file into the receipt directory.
    ///
    /// The stored name is `<yyyymmdd_hhmmss>_<original-name>`, keeping
    /// uploads collision-free without touching existing files. Returns the
    /// path of the stored copy.
    pub fn add_attachment(&self, source: &Path) -> Result<PathBuf> {
        let name = source
            .file_name()
            .ok_or_else(|| Error::InvalidAttachment(source.to_path_buf()))?;

        let stamp = OffsetDateTime::now_utc().format(TIMESTAMP_FORMAT)?;
        let dest = self
            .root()
            .join(RECEIPTS_DIR)
            .join(format!("{}_{}", stamp, name.to_string_lossy()));

        fs::copy(source, &dest)?;
        info!("Stored receipt {}", dest.display());
        Ok(dest)
    }

    /// Store a vehicle photo as `photos/<name>.<ext>`, replacing any photo
    /// with the same extension.
    pub fn add_photo(&self, vehicle: &str, source: &Path) -> Result<PathBuf> {
        let ext = source
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .ok_or_else(|| Error::InvalidAttachment(source.to_path_buf()))?;

        let dest = self
            .root()
            .join(PHOTOS_DIR)
            .join(format!("{}.{}", vehicle, ext));
        fs::copy(source, &dest)?;
        debug!("Stored photo {}", dest.display());
        Ok(dest)
    }

    /// Look up the photo for a vehicle: probe `photos/<name>.<ext>` for
    /// each known extension and return the first match.
    #[must_use]
    pub fn find_photo(&self, vehicle: &str) -> Option<PathBuf> {
        for ext in PHOTO_EXTENSIONS {
            let candidate = self
                .root()
                .join(PHOTOS_DIR)
                .join(format!("{}.{}", vehicle, ext));
            if candidate.exists() {
                return Some(candidate);
            }
        }
        None
    }
}
