//! Declarative placement document for the export collaborator.

use crate::assets::{AssetId, AssetKind};
use crate::canvas::CanvasDocument;
use crate::config::{CanvasSettings, Rgb};
use crate::error::{EditorError, EditorResult};
use crate::geometry::Rotation;
use crate::item::CanvasItem;
use serde::{Deserialize, Serialize};

/// One placed page. Geometry is in canvas units, `clip` in native page pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportItem {
    pub file_id: AssetId,
    pub page_num: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: Rotation,
    #[serde(rename = "type")]
    pub kind: AssetKind,
    /// `[x0, y0, x1, y1]`, present only for cropped items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clip: Option<[f64; 4]>,
}

impl From<&CanvasItem> for ExportItem {
    fn from(item: &CanvasItem) -> Self {
        Self {
            file_id: item.asset_id,
            page_num: item.page_index,
            x: item.x,
            y: item.y,
            width: item.width,
            height: item.height,
            rotation: item.rotation,
            kind: item.kind,
            clip: item.crop.as_ref().map(|crop| crop.clip()),
        }
    }
}

/// The export request body. `items` runs bottommost first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub background_color: Rgb,
    pub items: Vec<ExportItem>,
}

impl ExportDocument {
    /// Build the document for a canvas. An empty canvas has nothing to export.
    pub fn build(settings: &CanvasSettings, document: &CanvasDocument) -> EditorResult<Self> {
        if document.is_empty() {
            return Err(EditorError::EmptyCanvas);
        }
        Ok(Self {
            canvas_width: settings.width,
            canvas_height: settings.height,
            background_color: settings.background,
            items: document.items().iter().map(ExportItem::from).collect(),
        })
    }

    pub fn to_json(&self) -> EditorResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
