//! Uploaded source documents and their pages.
//!
//! Assets are produced by the external storage collaborator and are
//! read-only to the editor once registered.

use crate::error::{EditorError, EditorResult};
use crate::images::ImageHandle;
use kurbo::Size;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier issued by the storage collaborator for an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(pub Uuid);

impl AssetId {
    /// Generate a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AssetId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Kind of source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    #[default]
    Pdf,
    Image,
}

impl AssetKind {
    /// Detect kind from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(AssetKind::Pdf),
            "jpg" | "jpeg" | "png" | "gif" | "bmp" => Some(AssetKind::Image),
            _ => None,
        }
    }

    /// Detect kind from a file name, rejecting unsupported types.
    pub fn from_file_name(name: &str) -> EditorResult<Self> {
        name.rsplit_once('.')
            .and_then(|(_, ext)| Self::from_extension(ext))
            .ok_or_else(|| EditorError::UnsupportedFileType(name.to_string()))
    }
}

/// One page of an asset, with its native pixel dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetPage {
    pub page_index: usize,
    pub native_width: f64,
    pub native_height: f64,
    pub thumbnail: ImageHandle,
}

impl AssetPage {
    pub fn native_size(&self) -> Size {
        Size::new(self.native_width, self.native_height)
    }
}

/// An uploaded file and its pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: AssetId,
    pub filename: String,
    pub kind: AssetKind,
    pub pages: Vec<AssetPage>,
}

impl Asset {
    pub fn page(&self, page_index: usize) -> EditorResult<&AssetPage> {
        self.pages
            .get(page_index)
            .ok_or(EditorError::PageNotFound {
                asset: self.id,
                page: page_index,
            })
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Page entry of an upload response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedPage {
    #[serde(alias = "pageIndex")]
    pub page_num: usize,
    pub width: f64,
    pub height: f64,
    #[serde(alias = "thumbnailHandle")]
    pub thumbnail: ImageHandle,
}

/// Response of the storage collaborator's upload endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    #[serde(default, alias = "assetId")]
    pub file_id: Option<AssetId>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default, alias = "pageCount")]
    pub page_count: Option<usize>,
    #[serde(default, rename = "type")]
    pub kind: Option<AssetKind>,
    #[serde(default)]
    pub pages: Vec<UploadedPage>,
    #[serde(default)]
    pub error: Option<String>,
}

impl UploadResponse {
    /// Parse a response body.
    pub fn from_json(json: &str) -> EditorResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Convert a successful response into an asset.
    pub fn into_asset(self) -> EditorResult<Asset> {
        if !self.success {
            return Err(EditorError::UploadFailed(
                self.error.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }
        let id = self
            .file_id
            .ok_or_else(|| EditorError::MalformedUpload("missing file_id".to_string()))?;

        if let Some(count) = self.page_count {
            if count != self.pages.len() {
                log::warn!(
                    "Upload {} reports {} pages but lists {}",
                    id,
                    count,
                    self.pages.len()
                );
            }
        }

        let mut pages = Vec::with_capacity(self.pages.len());
        for (index, page) in self.pages.into_iter().enumerate() {
            if !(page.width > 0.0 && page.height > 0.0) {
                return Err(EditorError::MalformedUpload(format!(
                    "page {} has invalid size {}x{}",
                    page.page_num, page.width, page.height
                )));
            }
            pages.push(AssetPage {
                page_index: index,
                native_width: page.width,
                native_height: page.height,
                thumbnail: page.thumbnail,
            });
        }

        Ok(Asset {
            id,
            filename: self.filename.unwrap_or_default(),
            kind: self.kind.unwrap_or_default(),
            pages,
        })
    }
}

/// Registered assets, in upload order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetLibrary {
    assets: Vec<Asset>,
}

impl AssetLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an asset, replacing any asset with the same id.
    pub fn insert(&mut self, asset: Asset) {
        match self.assets.iter_mut().find(|a| a.id == asset.id) {
            Some(existing) => *existing = asset,
            None => self.assets.push(asset),
        }
    }

    pub fn remove(&mut self, id: AssetId) -> Option<Asset> {
        let index = self.assets.iter().position(|a| a.id == id)?;
        Some(self.assets.remove(index))
    }

    pub fn get(&self, id: AssetId) -> EditorResult<&Asset> {
        self.assets
            .iter()
            .find(|a| a.id == id)
            .ok_or(EditorError::AssetNotFound(id))
    }

    pub fn page(&self, id: AssetId, page_index: usize) -> EditorResult<&AssetPage> {
        self.get(id)?.page(page_index)
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UPLOAD: &str = r#"{
        "success": true,
        "file_id": "0b7c2a9e-3f4d-4e5a-8b6c-7d8e9f0a1b2c",
        "filename": "report.pdf",
        "page_count": 2,
        "pages": [
            {"page_num": 0, "width": 595, "height": 842,
             "thumbnail": "/api/thumbnail/0b7c2a9e-3f4d-4e5a-8b6c-7d8e9f0a1b2c/0"},
            {"page_num": 1, "width": 842, "height": 595,
             "thumbnail": "/api/thumbnail/0b7c2a9e-3f4d-4e5a-8b6c-7d8e9f0a1b2c/1"}
        ]
    }"#;

    #[test]
    fn test_format_detection() {
        assert_eq!(AssetKind::from_extension("pdf"), Some(AssetKind::Pdf));
        assert_eq!(AssetKind::from_extension("PDF"), Some(AssetKind::Pdf));
        assert_eq!(AssetKind::from_extension("jpeg"), Some(AssetKind::Image));
        assert_eq!(AssetKind::from_extension("bmp"), Some(AssetKind::Image));
        assert_eq!(AssetKind::from_extension("webp"), None);
    }

    #[test]
    fn test_file_name_rejects_unsupported() {
        assert_eq!(AssetKind::from_file_name("scan.Page1.PNG").unwrap(), AssetKind::Image);
        assert!(matches!(
            AssetKind::from_file_name("notes.docx"),
            Err(EditorError::UnsupportedFileType(_))
        ));
        assert!(AssetKind::from_file_name("README").is_err());
    }

    #[test]
    fn test_upload_into_asset() {
        let asset = UploadResponse::from_json(UPLOAD).unwrap().into_asset().unwrap();
        assert_eq!(asset.filename, "report.pdf");
        assert_eq!(asset.kind, AssetKind::Pdf);
        assert_eq!(asset.page_count(), 2);
        assert_eq!(asset.page(1).unwrap().native_size(), Size::new(842.0, 595.0));
        assert!(matches!(asset.page(2), Err(EditorError::PageNotFound { page: 2, .. })));
    }

    #[test]
    fn test_upload_image_type() {
        let json = r#"{"success": true, "file_id": "0b7c2a9e-3f4d-4e5a-8b6c-7d8e9f0a1b2c",
            "filename": "photo.jpg", "page_count": 1, "type": "image",
            "pages": [{"page_num": 0, "width": 1200, "height": 800, "thumbnail": "t0"}]}"#;
        let asset = UploadResponse::from_json(json).unwrap().into_asset().unwrap();
        assert_eq!(asset.kind, AssetKind::Image);
    }

    #[test]
    fn test_upload_failure() {
        let json = r#"{"success": false, "error": "bad file"}"#;
        let result = UploadResponse::from_json(json).unwrap().into_asset();
        assert!(matches!(result, Err(EditorError::UploadFailed(msg)) if msg == "bad file"));
    }

    #[test]
    fn test_upload_rejects_zero_sized_page() {
        let json = r#"{"success": true, "file_id": "0b7c2a9e-3f4d-4e5a-8b6c-7d8e9f0a1b2c",
            "pages": [{"page_num": 0, "width": 0, "height": 800, "thumbnail": "t0"}]}"#;
        let result = UploadResponse::from_json(json).unwrap().into_asset();
        assert!(matches!(result, Err(EditorError::MalformedUpload(_))));
    }

    #[test]
    fn test_library_insert_remove() {
        let mut library = AssetLibrary::new();
        let asset = UploadResponse::from_json(UPLOAD).unwrap().into_asset().unwrap();
        let id = asset.id;
        library.insert(asset.clone());
        library.insert(asset);
        assert_eq!(library.len(), 1);
        assert!(library.page(id, 0).is_ok());

        assert!(library.remove(id).is_some());
        assert!(matches!(library.get(id), Err(EditorError::AssetNotFound(_))));
    }
}
