//! PastePDF Core Library
//!
//! Platform-agnostic editor core for composing pages of PDFs and images onto a
//! single output page: placement, selection, transforms, cropping, alignment,
//! the view transform and the export document.

pub mod align;
pub mod assets;
pub mod canvas;
pub mod config;
pub mod crop;
pub mod editor;
pub mod error;
pub mod export;
pub mod geometry;
pub mod images;
pub mod input;
pub mod item;
pub mod selection;
pub mod transform;
pub mod view;

pub use align::{AlignMode, DistributeMode};
pub use assets::{Asset, AssetId, AssetKind, AssetLibrary, AssetPage, UploadResponse};
pub use canvas::CanvasDocument;
pub use config::{CanvasPreset, CanvasSettings, EditorConfig, GridLines, Orientation, Rgb};
pub use crop::{CropRequest, CropSession};
pub use editor::{CursorKind, EditorAction, EditorState, EventResponse};
pub use error::{EditorError, EditorResult};
pub use export::{ExportDocument, ExportItem};
pub use geometry::{Handle, Rotation};
pub use images::{
    ImageHandle, ImageKey, ImageLoadError, ImageSource, MemoryImageSource, UrlImageSource,
};
pub use input::{DropPayload, InputEvent, KeyCommand, Modifiers, MouseButton};
pub use item::{CanvasItem, CropRegion, ItemId};
pub use selection::{Selection, SelectionState};
pub use transform::DragState;
pub use view::ViewTransform;
