//! On-disk marker recording which queue variant owns a directory.
//!
//! ```text
//! <dir>/
//! ├── tierq.json   # {"kind": "priority", "format": 1}
//! └── data/        # key-value store
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tierq_models::QueueKind;
use tracing::debug;

use crate::atomic::{atomic_write_json, read_json_optional};
use crate::error::{PersistenceError, Result};

/// File name of the marker inside a queue directory.
pub const MARKER_FILE: &str = "tierq.json";

/// Current marker format version.
const FORMAT_VERSION: u32 = 1;

/// Contents of the marker file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    /// Variant that created the directory.
    pub kind: QueueKind,
    /// Marker format version.
    pub format: u32,
}

/// Outcome of [`check_kind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindCheck {
    /// No marker existed; one was written for the requested kind.
    Created,
    /// The marker names the requested kind.
    Matched,
    /// The marker names a different kind.
    Mismatch(QueueKind),
}

/// Checks that `dir` may be opened as `kind`, writing the marker on
/// first use.
pub fn check_kind(dir: &Path, kind: QueueKind) -> Result<KindCheck> {
    let path = dir.join(MARKER_FILE);

    match read_json_optional::<Marker>(&path)? {
        Some(marker) if marker.format != FORMAT_VERSION => Err(PersistenceError::InvalidData(
            format!("unsupported marker format {} in {}", marker.format, path.display()),
        )),
        Some(marker) if marker.kind == kind => Ok(KindCheck::Matched),
        Some(marker) => Ok(KindCheck::Mismatch(marker.kind)),
        None => {
            let marker = Marker {
                kind,
                format: FORMAT_VERSION,
            };
            atomic_write_json(&path, &marker)?;
            debug!(path = %path.display(), %kind, "Wrote queue marker");
            Ok(KindCheck::Created)
        }
    }
}
