//! PastePDF headless driver.
//!
//! Replays a recorded editing session (uploads, input events, toolbar
//! actions) against an [`EditorState`] and produces the export document.

use pastepdf_core::{
    EditorAction, EditorConfig, EditorError, EditorState, ExportDocument, ImageSource, InputEvent,
    UploadResponse,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that end a replay.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Editor(#[from] EditorError),
}

pub type AppResult<T> = Result<T, AppError>;

/// One recorded step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Step {
    Input(InputEvent),
    Action(EditorAction),
}

/// A recorded session file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Session {
    /// Upload responses, registered before any step runs.
    pub uploads: Vec<UploadResponse>,
    pub steps: Vec<Step>,
}

impl Session {
    pub fn from_json(json: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> AppResult<Self> {
        Self::from_json(&read(path)?)
    }
}

/// Load an editor configuration, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> AppResult<EditorConfig> {
    match path {
        Some(path) => Ok(EditorConfig::from_json(&read(path)?)?),
        None => Ok(EditorConfig::default()),
    }
}

fn read(path: &Path) -> AppResult<String> {
    fs::read_to_string(path).map_err(|source| AppError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Counters reported after a replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayStats {
    pub steps: usize,
    pub failed: usize,
}

/// Replay a session. A failing upload or step is logged and skipped.
pub fn replay(
    editor: &mut EditorState,
    session: Session,
    images: &dyn ImageSource,
) -> ReplayStats {
    let mut stats = ReplayStats::default();

    for upload in session.uploads {
        if let Err(e) = editor.register_upload(upload) {
            log::warn!("Upload skipped: {}", e);
            stats.failed += 1;
        }
    }

    for (index, step) in session.steps.into_iter().enumerate() {
        stats.steps += 1;
        let result = match step {
            Step::Input(event) => editor.handle_event(event),
            Step::Action(action) => editor.perform(action),
        };
        if let Err(e) = result {
            log::warn!("Step {} failed: {}", index, e);
            stats.failed += 1;
        }
        for e in pollster::block_on(editor.resolve_pending_crops(images)) {
            log::error!("Step {}: {}", index, e);
            stats.failed += 1;
        }
    }

    log::info!(
        "Replayed {} step(s), {} failed, {} item(s) on canvas",
        stats.steps,
        stats.failed,
        editor.item_count()
    );
    stats
}

/// Write the export document to `output`, or return it for stdout.
pub fn write_export(document: &ExportDocument, output: Option<&Path>) -> AppResult<Option<String>> {
    let json = document.to_json()?;
    match output {
        Some(path) => {
            fs::write(path, json).map_err(|source| AppError::Io {
                path: path.display().to_string(),
                source,
            })?;
            log::info!("Wrote {}", path.display());
            Ok(None)
        }
        None => Ok(Some(json)),
    }
}
