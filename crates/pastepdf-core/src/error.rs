//! Errors surfaced by editor operations.

use crate::assets::AssetId;
use crate::images::ImageLoadError;
use crate::item::ItemId;
use thiserror::Error;

/// Editor errors.
///
/// None of these are fatal: an error ends the current gesture or command and
/// leaves previously committed canvas state untouched.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Unsupported file type: {0} (PDF and images only)")]
    UnsupportedFileType(String),
    #[error("Upload failed: {0}")]
    UploadFailed(String),
    #[error("Malformed upload response: {0}")]
    MalformedUpload(String),
    #[error("Asset not found: {0}")]
    AssetNotFound(AssetId),
    #[error("Page {page} not found in asset {asset}")]
    PageNotFound { asset: AssetId, page: usize },
    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),
    #[error("{operation} requires {expected} selected item(s), found {actual}")]
    InvalidSelection {
        operation: &'static str,
        expected: &'static str,
        actual: usize,
    },
    #[error("Crop mode is active")]
    CropModeActive,
    #[error("Crop mode is not active")]
    CropModeInactive,
    #[error("Nothing on the canvas to export")]
    EmptyCanvas,
    #[error("Malformed drop payload: {0}")]
    MalformedPayload(String),
    #[error("Image load failed: {0}")]
    ImageLoad(#[from] ImageLoadError),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;

/// Check that `actual` selected items fall within `min..=max`.
pub(crate) fn require_selection(
    operation: &'static str,
    expected: &'static str,
    actual: usize,
    min: usize,
    max: usize,
) -> EditorResult<()> {
    if (min..=max).contains(&actual) {
        Ok(())
    } else {
        log::warn!("{} rejected: {} item(s) selected", operation, actual);
        Err(EditorError::InvalidSelection {
            operation,
            expected,
            actual,
        })
    }
}
