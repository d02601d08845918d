//! Image acquisition boundary.
//!
//! Items never own pixels. They carry an [`ImageHandle`] that an external
//! renderer resolves, and new handles are acquired through an [`ImageSource`]
//! keyed by `(asset, page, crop)`.

mod memory;

pub use memory::MemoryImageSource;

use crate::assets::AssetId;
use crate::item::CropRegion;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Opaque, URL-like handle to displayable pixels for a page or page region.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageHandle(pub String);

impl ImageHandle {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifies the pixels to acquire: a page, optionally restricted to a crop region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageKey {
    pub asset_id: AssetId,
    pub page_index: usize,
    pub crop: Option<CropRegion>,
}

impl ImageKey {
    pub fn page(asset_id: AssetId, page_index: usize) -> Self {
        Self {
            asset_id,
            page_index,
            crop: None,
        }
    }

    pub fn cropped(asset_id: AssetId, page_index: usize, crop: CropRegion) -> Self {
        Self {
            asset_id,
            page_index,
            crop: Some(crop),
        }
    }

    /// Thumbnail endpoint path for this key.
    pub fn to_url(&self) -> String {
        let base = format!("/api/thumbnail/{}/{}", self.asset_id, self.page_index);
        match &self.crop {
            Some(crop) => format!(
                "{}?crop={},{},{},{}",
                base, crop.x, crop.y, crop.width, crop.height
            ),
            None => base,
        }
    }
}

/// Image acquisition errors.
#[derive(Debug, Clone, Error)]
pub enum ImageLoadError {
    #[error("Image not found: {0}")]
    NotFound(String),
    #[error("Image decode failed: {0}")]
    Decode(String),
    #[error("Image request failed: {0}")]
    Request(String),
    #[error("Image source error: {0}")]
    Other(String),
}

/// Result type for image acquisition.
pub type ImageResult<T> = Result<T, ImageLoadError>;

/// Boxed future for async operations (runtime-agnostic, not required to be `Send`).
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Source of displayable images for pages and cropped page regions.
///
/// Loads have no cancellation. A failed load only affects the item waiting on it.
pub trait ImageSource {
    /// Acquire the image for `key`.
    fn load(&self, key: &ImageKey) -> BoxFuture<'_, ImageResult<ImageHandle>>;
}

/// Image source that resolves every key to its thumbnail URL without fetching.
///
/// Used where the renderer fetches lazily from the handle itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlImageSource;

impl ImageSource for UrlImageSource {
    fn load(&self, key: &ImageKey) -> BoxFuture<'_, ImageResult<ImageHandle>> {
        let url = key.to_url();
        Box::pin(async move { Ok(ImageHandle(url)) })
    }
}

#[cfg(test)]
pub(crate) fn block_on<F: Future>(f: F) -> F::Output {
    // Simple blocking executor for tests
    use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

    fn dummy_raw_waker() -> RawWaker {
        fn no_op(_: *const ()) {}
        fn clone(_: *const ()) -> RawWaker {
            dummy_raw_waker()
        }
        static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, no_op, no_op, no_op);
        RawWaker::new(std::ptr::null(), &VTABLE)
    }

    let waker = unsafe { Waker::from_raw(dummy_raw_waker()) };
    let mut cx = Context::from_waker(&waker);
    let mut f = std::pin::pin!(f);

    loop {
        if let Poll::Ready(result) = f.as_mut().poll(&mut cx) {
            return result;
        }
    }
}
