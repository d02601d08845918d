//! Editor state and event dispatch.
//!
//! [`EditorState`] owns everything the page compositor knows: registered
//! assets, placed items, the selection, the active gesture, the crop session
//! and the view. Input events and toolbar actions are applied one at a time
//! through [`EditorState::handle_event`] and [`EditorState::perform`].

use crate::align::{self, AlignMode, DistributeMode};
use crate::assets::{Asset, AssetId, AssetLibrary, UploadResponse};
use crate::canvas::CanvasDocument;
use crate::config::{CanvasPreset, CanvasSettings, EditorConfig, GridLines, Rgb};
use crate::crop::{self, CropRequest, CropSession};
use crate::error::{require_selection, EditorError, EditorResult};
use crate::export::ExportDocument;
use crate::geometry::{Handle, HANDLE_HIT_RADIUS};
use crate::images::{ImageHandle, ImageResult, ImageSource};
use crate::input::{DropPayload, InputEvent, KeyCommand, Modifiers, MouseButton};
use crate::item::ItemId;
use crate::selection::Selection;
use crate::transform::DragState;
use crate::view::ViewTransform;
use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Pointer cursor to show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CursorKind {
    #[default]
    Default,
    /// Over an item that can be dragged.
    Move,
    /// Over a resize handle.
    Resize(Handle),
    /// Dragging the view.
    Grabbing,
}

impl CursorKind {
    /// CSS cursor name.
    pub fn css_name(self) -> &'static str {
        match self {
            CursorKind::Default => "default",
            CursorKind::Move => "move",
            CursorKind::Resize(handle) => handle.cursor_name(),
            CursorKind::Grabbing => "grabbing",
        }
    }
}

/// What the adapter should do after an event or action.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EventResponse {
    /// The event was handled; the adapter should not pass it on (e.g. wheel scroll).
    pub consumed: bool,
    pub redraw: bool,
    pub cursor: CursorKind,
    /// Open the context menu at this screen point.
    pub context_menu: Option<Point>,
}

impl EventResponse {
    /// Event not intercepted.
    pub fn ignored() -> Self {
        Self::default()
    }

    /// Event handled, nothing to redraw.
    pub fn handled() -> Self {
        Self {
            consumed: true,
            ..Self::default()
        }
    }

    /// Event handled and the canvas changed.
    pub fn redraw() -> Self {
        Self {
            consumed: true,
            redraw: true,
            ..Self::default()
        }
    }

    fn with_cursor(mut self, cursor: CursorKind) -> Self {
        self.cursor = cursor;
        self
    }
}

/// Toolbar, context-menu and settings commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EditorAction {
    PlacePage {
        file_id: AssetId,
        page_num: usize,
        /// Top-left corner, canvas units.
        position: Point,
    },
    BringToFront,
    BringForward,
    SendBackward,
    SendToBack,
    Rotate,
    Delete,
    EnterCrop,
    ApplyCrop,
    CancelCrop,
    Align(AlignMode),
    Distribute(DistributeMode),
    CenterOnCanvas,
    ZoomIn,
    ZoomOut,
    ResetZoom,
    SetPreset(CanvasPreset),
    SetCanvasSize { width: u32, height: u32 },
    SwapOrientation,
    SetBackground(Rgb),
    ShowGrid(bool),
    ClearCanvas,
    DeleteAsset(AssetId),
}

/// Complete editor state.
#[derive(Debug, Clone)]
pub struct EditorState {
    assets: AssetLibrary,
    document: CanvasDocument,
    selection: Selection,
    drag: DragState,
    crop: Option<CropSession>,
    /// Crop commits awaiting their replacement image.
    pending_crops: Vec<CropRequest>,
    view: ViewTransform,
    settings: CanvasSettings,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl EditorState {
    pub fn new(config: EditorConfig) -> Self {
        let mut view = ViewTransform::new(
            config.canvas.size(),
            config.container,
            config.device_pixel_ratio,
        );
        view.set_canvas_origin(config.canvas_origin);
        Self {
            assets: AssetLibrary::new(),
            document: CanvasDocument::new(),
            selection: Selection::new(),
            drag: DragState::Idle,
            crop: None,
            pending_crops: Vec::new(),
            view,
            settings: config.canvas,
        }
    }

    /// Registered upload assets.
    pub fn assets(&self) -> &AssetLibrary {
        &self.assets
    }

    /// Placed items, bottom to top.
    pub fn document(&self) -> &CanvasDocument {
        &self.document
    }

    /// Selected items in selection order.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The pointer gesture in progress; idle between gestures.
    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }

    /// The active crop session, if any.
    pub fn crop_session(&self) -> Option<&CropSession> {
        self.crop.as_ref()
    }

    pub fn is_cropping(&self) -> bool {
        self.crop.is_some()
    }

    /// Zoom, pan and screen mapping.
    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    /// Output canvas size, background and grid.
    pub fn settings(&self) -> &CanvasSettings {
        &self.settings
    }

    /// Number of placed items.
    pub fn item_count(&self) -> usize {
        self.document.len()
    }

    /// Grid lines to draw, if the grid is shown.
    pub fn grid_lines(&self) -> Option<GridLines> {
        self.settings
            .show_grid
            .then(|| GridLines::for_canvas(self.settings.width, self.settings.height))
    }

    /// Whether resize handles are drawn (exactly one item selected, not cropping).
    pub fn shows_handles(&self) -> bool {
        self.crop.is_none() && self.selection.single().is_some()
    }

    fn ensure_not_cropping(&self) -> EditorResult<()> {
        if self.crop.is_some() {
            log::warn!("Command rejected while cropping");
            return Err(EditorError::CropModeActive);
        }
        Ok(())
    }

    // ---- Assets ----

    /// Register an asset from the storage collaborator.
    pub fn add_asset(&mut self, asset: Asset) -> AssetId {
        let id = asset.id;
        log::info!(
            "Registered asset {} ({}, {} pages)",
            id,
            asset.filename,
            asset.page_count()
        );
        self.assets.insert(asset);
        id
    }

    /// Register the result of an upload.
    pub fn register_upload(&mut self, response: UploadResponse) -> EditorResult<AssetId> {
        let asset = response.into_asset().inspect_err(|e| log::warn!("{}", e))?;
        Ok(self.add_asset(asset))
    }

    /// Delete an asset and every item placed from it.
    pub fn delete_asset(&mut self, asset_id: AssetId) -> EditorResult<Vec<ItemId>> {
        self.assets
            .remove(asset_id)
            .ok_or(EditorError::AssetNotFound(asset_id))?;
        let removed = self.document.remove_asset_items(asset_id);
        self.forget_items(&removed);
        log::info!("Deleted asset {} and {} item(s)", asset_id, removed.len());
        Ok(removed)
    }

    /// Place a page at half its native size with its top-left corner at
    /// `origin` (canvas units). The new item becomes the selection.
    pub fn place_page(
        &mut self,
        asset_id: AssetId,
        page_index: usize,
        origin: Point,
    ) -> EditorResult<ItemId> {
        self.ensure_not_cropping()?;
        let asset = self.assets.get(asset_id)?;
        let page = asset.page(page_index)?;
        let size = page.native_size() / 2.0;
        let id = self
            .document
            .add_item(asset_id, asset.kind, page, origin, size);
        self.selection.replace(id);
        Ok(id)
    }

    /// Drop every reference to removed items from transient state.
    fn forget_items(&mut self, removed: &[ItemId]) {
        if removed.is_empty() {
            return;
        }
        self.selection.retain(|id| !removed.contains(&id));
        if removed.iter().any(|&id| self.drag.references(id)) {
            self.drag = DragState::Idle;
        }
        if let Some(session) = &self.crop {
            if removed.contains(&session.target()) {
                log::info!("Crop target {} removed, leaving crop mode", session.target());
                self.crop = None;
                self.drag = DragState::Idle;
            }
        }
    }

    // ---- Layer order ----

    fn primary(&self, operation: &'static str) -> EditorResult<ItemId> {
        self.ensure_not_cropping()?;
        require_selection(operation, "at least 1", self.selection.len(), 1, usize::MAX)?;
        self.selection
            .primary()
            .ok_or(EditorError::InvalidSelection {
                operation,
                expected: "at least 1",
                actual: 0,
            })
    }

    pub fn bring_to_front(&mut self) -> EditorResult<bool> {
        let id = self.primary("Bring to front")?;
        Ok(self.document.bring_to_front(id))
    }

    pub fn bring_forward(&mut self) -> EditorResult<bool> {
        let id = self.primary("Bring forward")?;
        Ok(self.document.bring_forward(id))
    }

    pub fn send_backward(&mut self) -> EditorResult<bool> {
        let id = self.primary("Send backward")?;
        Ok(self.document.send_backward(id))
    }

    pub fn send_to_back(&mut self) -> EditorResult<bool> {
        let id = self.primary("Send to back")?;
        Ok(self.document.send_to_back(id))
    }

    // ---- Selection-wide commands ----

    /// Rotate every selected item a quarter turn.
    pub fn rotate_selection(&mut self) -> EditorResult<()> {
        self.ensure_not_cropping()?;
        require_selection("Rotate", "at least 1", self.selection.len(), 1, usize::MAX)?;
        for &id in self.selection.ids() {
            if let Some(item) = self.document.get_mut(id) {
                item.rotate();
                log::info!("Rotated {} to {}°", id, item.rotation.degrees());
            }
        }
        Ok(())
    }

    /// Remove every selected item.
    pub fn delete_selection(&mut self) -> EditorResult<Vec<ItemId>> {
        self.ensure_not_cropping()?;
        require_selection("Delete", "at least 1", self.selection.len(), 1, usize::MAX)?;
        let removed: Vec<ItemId> = self
            .selection
            .ids()
            .iter()
            .filter_map(|&id| self.document.remove_item(id).map(|item| item.id()))
            .collect();
        self.forget_items(&removed);
        self.selection.clear();
        log::info!("Deleted {} item(s)", removed.len());
        Ok(removed)
    }

    pub fn align(&mut self, mode: AlignMode) -> EditorResult<()> {
        self.ensure_not_cropping()?;
        align::align(&mut self.document, self.selection.ids(), mode)
    }

    pub fn distribute(&mut self, mode: DistributeMode) -> EditorResult<()> {
        self.ensure_not_cropping()?;
        align::distribute(&mut self.document, self.selection.ids(), mode)
    }

    pub fn center_on_canvas(&mut self) -> EditorResult<()> {
        self.ensure_not_cropping()?;
        align::center_on_canvas(&mut self.document, self.selection.ids(), self.settings.size())
    }

    /// Remove all items. Returns false if the canvas was already empty.
    pub fn clear_canvas(&mut self) -> bool {
        if self.document.is_empty() {
            return false;
        }
        let removed: Vec<ItemId> = self.document.items().iter().map(|item| item.id()).collect();
        self.document.clear();
        self.forget_items(&removed);
        self.selection.clear();
        log::info!("Cleared canvas ({} items)", removed.len());
        true
    }

    // ---- Crop ----

    /// Enter crop mode on the single selected item.
    pub fn enter_crop(&mut self) -> EditorResult<()> {
        self.ensure_not_cropping()?;
        require_selection("Crop", "exactly 1", self.selection.len(), 1, 1)?;
        let id = self.primary("Crop")?;
        let item = self.document.require(id)?;
        let page = self.assets.page(item.asset_id, item.page_index)?;
        let session = CropSession::begin(item, page);
        log::debug!("Crop mode on {}", id);
        self.crop = Some(session);
        self.drag = DragState::Idle;
        Ok(())
    }

    /// Leave crop mode. With `apply`, returns the commit request; the item is
    /// not touched until [`EditorState::complete_crop`].
    pub fn exit_crop(&mut self, apply: bool) -> EditorResult<Option<CropRequest>> {
        let session = self.crop.take().ok_or(EditorError::CropModeInactive)?;
        if matches!(
            self.drag,
            DragState::CroppingMove { .. } | DragState::CroppingResize { .. }
        ) {
            self.drag = DragState::Idle;
        }
        if !apply {
            log::debug!("Crop cancelled on {}", session.target());
            return Ok(None);
        }
        let item = self.document.require(session.target())?;
        let request = session.into_request(item);
        log::debug!("Crop requested for {}: {:?}", request.item, request.region);
        Ok(Some(request))
    }

    /// Apply a crop once its image load has finished. On failure the item keeps
    /// its previous state, including any earlier crop.
    pub fn complete_crop(
        &mut self,
        request: CropRequest,
        image: ImageResult<ImageHandle>,
    ) -> EditorResult<()> {
        let image = image.map_err(|e| {
            log::error!("Cropped image for {} failed to load: {}", request.item, e);
            EditorError::ImageLoad(e)
        })?;
        match self.document.get_mut(request.item) {
            Some(item) => {
                crop::apply_crop(item, &request, image);
                log::info!(
                    "Cropped {} to {:?}, now {:.1}x{:.1}",
                    request.item,
                    request.region,
                    item.width,
                    item.height
                );
            }
            None => log::warn!("Cropped item {} no longer exists", request.item),
        }
        Ok(())
    }

    /// Apply the current crop, loading its image from `source`.
    pub async fn commit_crop(&mut self, source: &dyn ImageSource) -> EditorResult<()> {
        let Some(request) = self.exit_crop(true)? else {
            return Ok(());
        };
        let image = source.load(&request.key).await;
        self.complete_crop(request, image)
    }

    /// Crop commits started by events or actions that are still waiting for an image.
    pub fn pending_crops(&self) -> &[CropRequest] {
        &self.pending_crops
    }

    pub fn take_pending_crops(&mut self) -> Vec<CropRequest> {
        std::mem::take(&mut self.pending_crops)
    }

    /// Load and apply every pending crop. Failures are logged and collected;
    /// each only affects its own item.
    pub async fn resolve_pending_crops(&mut self, source: &dyn ImageSource) -> Vec<EditorError> {
        let mut errors = Vec::new();
        for request in self.take_pending_crops() {
            let image = source.load(&request.key).await;
            if let Err(e) = self.complete_crop(request, image) {
                errors.push(e);
            }
        }
        errors
    }

    fn queue_crop(&mut self, apply: bool) -> EditorResult<()> {
        if let Some(request) = self.exit_crop(apply)? {
            self.pending_crops.push(request);
        }
        Ok(())
    }

    // ---- View and settings ----

    pub fn zoom_in(&mut self) -> bool {
        self.view.zoom_in()
    }

    pub fn zoom_out(&mut self) -> bool {
        self.view.zoom_out()
    }

    pub fn reset_zoom(&mut self) -> bool {
        self.view.reset_zoom()
    }

    pub fn set_preset(&mut self, preset: CanvasPreset) {
        self.settings.apply_preset(preset);
        self.view.set_canvas_size(self.settings.size());
    }

    pub fn set_canvas_size(&mut self, width: u32, height: u32) {
        self.settings.set_size(width, height);
        self.view.set_canvas_size(self.settings.size());
    }

    pub fn swap_orientation(&mut self) {
        self.settings.swap_orientation();
        self.view.set_canvas_size(self.settings.size());
    }

    pub fn set_background(&mut self, color: Rgb) {
        self.settings.background = color;
    }

    pub fn set_show_grid(&mut self, show: bool) {
        self.settings.show_grid = show;
    }

    pub fn set_container_size(&mut self, size: Size) {
        self.view.set_container_size(size);
    }

    // ---- Export ----

    pub fn export(&self) -> EditorResult<ExportDocument> {
        let export = ExportDocument::build(&self.settings, &self.document)
            .inspect_err(|e| log::warn!("Export rejected: {}", e))?;
        log::info!("Exporting {} item(s)", export.items.len());
        Ok(export)
    }

    // ---- Commands ----

    /// Run a toolbar or context-menu command.
    pub fn perform(&mut self, action: EditorAction) -> EditorResult<EventResponse> {
        log::debug!("Action {:?}", action);
        match action {
            EditorAction::PlacePage {
                file_id,
                page_num,
                position,
            } => {
                self.place_page(file_id, page_num, position)?;
            }
            EditorAction::BringToFront => {
                self.bring_to_front()?;
            }
            EditorAction::BringForward => {
                self.bring_forward()?;
            }
            EditorAction::SendBackward => {
                self.send_backward()?;
            }
            EditorAction::SendToBack => {
                self.send_to_back()?;
            }
            EditorAction::Rotate => self.rotate_selection()?,
            EditorAction::Delete => {
                self.delete_selection()?;
            }
            EditorAction::EnterCrop => self.enter_crop()?,
            EditorAction::ApplyCrop => self.queue_crop(true)?,
            EditorAction::CancelCrop => self.queue_crop(false)?,
            EditorAction::Align(mode) => self.align(mode)?,
            EditorAction::Distribute(mode) => self.distribute(mode)?,
            EditorAction::CenterOnCanvas => self.center_on_canvas()?,
            EditorAction::ZoomIn => {
                self.zoom_in();
            }
            EditorAction::ZoomOut => {
                self.zoom_out();
            }
            EditorAction::ResetZoom => {
                self.reset_zoom();
            }
            EditorAction::SetPreset(preset) => self.set_preset(preset),
            EditorAction::SetCanvasSize { width, height } => self.set_canvas_size(width, height),
            EditorAction::SwapOrientation => self.swap_orientation(),
            EditorAction::SetBackground(color) => self.set_background(color),
            EditorAction::ShowGrid(show) => self.set_show_grid(show),
            EditorAction::ClearCanvas => {
                self.clear_canvas();
            }
            EditorAction::DeleteAsset(asset_id) => {
                self.delete_asset(asset_id)?;
            }
        }
        Ok(EventResponse::redraw())
    }

    // ---- Input ----

    /// Apply one input event.
    pub fn handle_event(&mut self, event: InputEvent) -> EditorResult<EventResponse> {
        match event {
            InputEvent::PointerDown {
                position,
                button,
                modifiers,
            } => Ok(self.pointer_down(position, button, modifiers)),
            InputEvent::PointerMove { position } => Ok(self.pointer_move(position)),
            InputEvent::PointerUp { .. } => Ok(self.pointer_up()),
            InputEvent::Wheel {
                delta, modifiers, ..
            } => Ok(self.wheel(delta, modifiers)),
            InputEvent::ContextMenu { position } => Ok(self.context_menu(position)),
            InputEvent::KeyPressed { key, .. } => self.key_pressed(&key),
            InputEvent::Drop { position, payload } => Ok(self.drop_payload(position, &payload)),
        }
    }

    /// Cursor for a canvas-space point while no gesture is active.
    pub fn cursor_at(&self, point: Point) -> CursorKind {
        if let Some(session) = &self.crop {
            return match session.handle_at(point) {
                Some(handle) => CursorKind::Resize(handle),
                None if session.contains(point) => CursorKind::Move,
                None => CursorKind::Default,
            };
        }
        if let Some(handle) = self.handle_under(point) {
            return CursorKind::Resize(handle);
        }
        match self.document.item_at_point(point) {
            Some(_) => CursorKind::Move,
            None => CursorKind::Default,
        }
    }

    /// Resize handle of the single selected item under `point`.
    fn handle_under(&self, point: Point) -> Option<Handle> {
        let item = self.document.get(self.selection.single()?)?;
        crate::geometry::handle_at(item.bounds(), point, HANDLE_HIT_RADIUS)
    }

    fn pointer_down(
        &mut self,
        position: Point,
        button: MouseButton,
        modifiers: Modifiers,
    ) -> EventResponse {
        if button != MouseButton::Left {
            return EventResponse::ignored();
        }
        let point = self.view.screen_to_canvas(position);

        if let Some(session) = &self.crop {
            self.drag = session.begin_drag(point).unwrap_or_default();
            return EventResponse::handled().with_cursor(self.cursor_at(point));
        }

        // Handles of the single selected item take priority.
        if let (Some(id), Some(handle)) = (self.selection.single(), self.handle_under(point)) {
            if let Some(drag) = DragState::begin_resize(&self.document, id, handle, point) {
                log::debug!("Resize {} from {:?}", id, handle);
                self.drag = drag;
                return EventResponse::handled().with_cursor(CursorKind::Resize(handle));
            }
        }

        if let Some(id) = self.document.item_at_point(point) {
            self.selection.click(id, modifiers.multi_select());
            if self.selection.contains(id) {
                self.drag = DragState::begin_move(&self.document, self.selection.ids(), point);
                log::debug!("Move {} item(s)", self.selection.len());
            }
            return EventResponse::redraw().with_cursor(CursorKind::Move);
        }

        self.selection.clear();
        if self.view.is_zoomed_in() {
            self.drag = DragState::Panning {
                start: position,
                original_offset: self.view.pan_offset(),
            };
            return EventResponse::redraw().with_cursor(CursorKind::Grabbing);
        }
        EventResponse::redraw()
    }

    fn pointer_move(&mut self, position: Point) -> EventResponse {
        let point = self.view.screen_to_canvas(position);
        match &self.drag {
            DragState::Idle => EventResponse::ignored().with_cursor(self.cursor_at(point)),
            DragState::Panning {
                start,
                original_offset,
            } => {
                let offset = *original_offset + (position - *start);
                self.view.set_pan_offset(offset);
                EventResponse::redraw().with_cursor(CursorKind::Grabbing)
            }
            DragState::CroppingMove { .. } | DragState::CroppingResize { .. } => {
                let changed = match self.crop.as_mut() {
                    Some(session) => session.drag_to(&self.drag, point),
                    None => false,
                };
                let mut response = EventResponse::handled().with_cursor(self.drag_cursor());
                response.redraw = changed;
                response
            }
            DragState::Moving { .. } | DragState::Resizing { .. } => {
                let changed = self.drag.drag_items(&mut self.document, point);
                let mut response = EventResponse::handled().with_cursor(self.drag_cursor());
                response.redraw = changed;
                response
            }
        }
    }

    fn drag_cursor(&self) -> CursorKind {
        match self.drag {
            DragState::Idle => CursorKind::Default,
            DragState::Moving { .. } | DragState::CroppingMove { .. } => CursorKind::Move,
            DragState::Resizing { handle, .. } | DragState::CroppingResize { handle, .. } => {
                CursorKind::Resize(handle)
            }
            DragState::Panning { .. } => CursorKind::Grabbing,
        }
    }

    fn pointer_up(&mut self) -> EventResponse {
        let was_active = !self.drag.is_idle();
        self.drag = DragState::Idle;
        EventResponse {
            consumed: true,
            redraw: was_active,
            ..EventResponse::default()
        }
    }

    fn wheel(&mut self, delta: Vec2, modifiers: Modifiers) -> EventResponse {
        if !modifiers.zoom() {
            return EventResponse::ignored();
        }
        let changed = self.view.zoom_wheel(delta.y);
        EventResponse {
            consumed: true,
            redraw: changed,
            ..EventResponse::default()
        }
    }

    fn context_menu(&mut self, position: Point) -> EventResponse {
        if self.crop.is_some() {
            return EventResponse::ignored();
        }
        let point = self.view.screen_to_canvas(position);
        match self.document.item_at_point(point) {
            Some(id) => {
                self.selection.context_click(id);
                EventResponse {
                    context_menu: Some(position),
                    ..EventResponse::redraw()
                }
            }
            None => EventResponse::ignored(),
        }
    }

    fn key_pressed(&mut self, key: &str) -> EditorResult<EventResponse> {
        let Some(command) = KeyCommand::from_key(key) else {
            return Ok(EventResponse::ignored());
        };

        if self.crop.is_some() {
            return match command {
                KeyCommand::CancelCrop => {
                    self.queue_crop(false)?;
                    Ok(EventResponse::redraw())
                }
                KeyCommand::ApplyCrop => {
                    self.queue_crop(true)?;
                    Ok(EventResponse::redraw())
                }
                _ => Ok(EventResponse::ignored()),
            };
        }

        if self.selection.is_empty() {
            return Ok(EventResponse::ignored());
        }
        match command {
            KeyCommand::DeleteSelection => {
                self.delete_selection()?;
                Ok(EventResponse::redraw())
            }
            KeyCommand::RotateSelection => {
                self.rotate_selection()?;
                Ok(EventResponse::redraw())
            }
            KeyCommand::CancelCrop | KeyCommand::ApplyCrop => Ok(EventResponse::ignored()),
        }
    }

    fn drop_payload(&mut self, position: Point, payload: &str) -> EventResponse {
        let point = self.view.screen_to_canvas(position);
        let placed = DropPayload::parse(payload)
            .and_then(|drop| self.place_page(drop.file_id, drop.page_num, point));
        match placed {
            Ok(_) => EventResponse::redraw(),
            Err(e) => {
                log::warn!("Dropped payload ignored: {}", e);
                EventResponse::handled()
            }
        }
    }
}
