//! In-memory image source.

use super::{BoxFuture, ImageHandle, ImageKey, ImageLoadError, ImageResult, ImageSource};
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory image source for testing and headless use.
///
/// Images are registered per key URL. Every request is recorded so callers
/// can assert what was asked for.
#[derive(Default)]
pub struct MemoryImageSource {
    images: RwLock<HashMap<String, ImageHandle>>,
    requests: RwLock<Vec<ImageKey>>,
}

impl MemoryImageSource {
    /// Create a new empty image source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the image returned for `key`.
    pub fn insert(&self, key: &ImageKey, handle: ImageHandle) {
        if let Ok(mut images) = self.images.write() {
            images.insert(key.to_url(), handle);
        }
    }

    /// Keys requested so far, in request order.
    pub fn requests(&self) -> Vec<ImageKey> {
        self.requests
            .read()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

impl ImageSource for MemoryImageSource {
    fn load(&self, key: &ImageKey) -> BoxFuture<'_, ImageResult<ImageHandle>> {
        let key = key.clone();
        Box::pin(async move {
            self.requests
                .write()
                .map_err(|e| ImageLoadError::Other(format!("Lock error: {}", e)))?
                .push(key.clone());

            let images = self
                .images
                .read()
                .map_err(|e| ImageLoadError::Other(format!("Lock error: {}", e)))?;
            let url = key.to_url();
            images
                .get(&url)
                .cloned()
                .ok_or(ImageLoadError::NotFound(url))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetId;
    use crate::images::block_on;
    use crate::item::CropRegion;

    #[test]
    fn test_load_registered() {
        let source = MemoryImageSource::new();
        let key = ImageKey::page(AssetId::new(), 0);
        source.insert(&key, ImageHandle::new("blob:page-0"));

        let handle = block_on(source.load(&key)).unwrap();
        assert_eq!(handle.as_str(), "blob:page-0");
        assert_eq!(source.requests(), vec![key]);
    }

    #[test]
    fn test_missing_is_not_found() {
        let source = MemoryImageSource::new();
        let asset = AssetId::new();
        source.insert(&ImageKey::page(asset, 0), ImageHandle::new("blob:page-0"));

        let cropped = ImageKey::cropped(asset, 0, CropRegion::new(0.0, 0.0, 10.0, 10.0));
        let result = block_on(source.load(&cropped));
        assert!(matches!(result, Err(ImageLoadError::NotFound(_))));
        assert_eq!(source.requests().len(), 1);
    }
}
