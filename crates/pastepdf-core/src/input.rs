//! Discrete input events fed to the editor.
//!
//! Positions are in screen space (CSS pixels relative to the canvas
//! container); the editor converts them before any hit-testing.

use crate::assets::AssetId;
use crate::error::{EditorError, EditorResult};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const CTRL: Modifiers = Modifiers {
        shift: false,
        ctrl: true,
        alt: false,
        meta: false,
    };

    /// Held to toggle items in and out of the selection.
    pub fn multi_select(&self) -> bool {
        self.ctrl || self.meta || self.shift
    }

    /// Held to turn the wheel into zoom.
    pub fn zoom(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// One input event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    PointerDown {
        position: Point,
        #[serde(default)]
        button: MouseButton,
        #[serde(default)]
        modifiers: Modifiers,
    },
    PointerMove {
        position: Point,
    },
    PointerUp {
        position: Point,
        #[serde(default)]
        button: MouseButton,
    },
    Wheel {
        position: Point,
        delta: Vec2,
        #[serde(default)]
        modifiers: Modifiers,
    },
    /// Secondary click requesting the context menu.
    ContextMenu {
        position: Point,
    },
    KeyPressed {
        key: String,
        #[serde(default)]
        modifiers: Modifiers,
    },
    /// Drag-and-drop of a page thumbnail onto the canvas.
    Drop {
        position: Point,
        /// Raw transfer data, `{"fileId": ..., "pageNum": ...}`.
        payload: String,
    },
}

/// Keyboard shortcut meanings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    DeleteSelection,
    RotateSelection,
    CancelCrop,
    ApplyCrop,
}

impl KeyCommand {
    /// Map a key name (as reported by the platform) to a command.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Delete" => Some(KeyCommand::DeleteSelection),
            "r" | "R" => Some(KeyCommand::RotateSelection),
            "Escape" => Some(KeyCommand::CancelCrop),
            "Enter" => Some(KeyCommand::ApplyCrop),
            _ => None,
        }
    }
}

/// Transfer data of a page dragged from the asset panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropPayload {
    pub file_id: AssetId,
    pub page_num: usize,
}

impl DropPayload {
    pub fn parse(payload: &str) -> EditorResult<Self> {
        serde_json::from_str(payload).map_err(|e| EditorError::MalformedPayload(e.to_string()))
    }

    pub fn to_json(&self) -> EditorResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
