//! Canvas document and editing state.

use crate::selection::{ClickModifiers, Selection};
use crate::shapes::{Shape, ShapeId};
use crate::storage::{KeyValueStore, StorageError, StorageResult};
use crate::transform::{TransientTransform, commit_transform};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Maximum number of undo states to keep.
const MAX_UNDO_HISTORY: usize = 50;

/// Generated duplicate ids tried before falling back to random ones.
const MAX_ID_ATTEMPTS: usize = 8;

/// Offset applied to both axes of every duplicated shape.
pub const DUPLICATE_OFFSET: f64 = 20.0;

/// A snapshot of document state for undo/redo.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DocumentSnapshot {
    shapes: HashMap<ShapeId, Shape>,
    z_order: Vec<ShapeId>,
}

/// A canvas document containing all shapes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasDocument {
    /// Unique document identifier.
    pub id: String,
    /// Document name.
    pub name: String,
    /// All shapes in the document, keyed by ID.
    shapes: HashMap<ShapeId, Shape>,
    /// Z-order of shapes (back to front).
    z_order: Vec<ShapeId>,
    #[serde(skip)]
    undo_stack: Vec<DocumentSnapshot>,
    #[serde(skip)]
    redo_stack: Vec<DocumentSnapshot>,
}

impl Default for CanvasDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: "Untitled".to_string(),
            shapes: HashMap::new(),
            z_order: Vec::new(),
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    fn snapshot(&self) -> DocumentSnapshot {
        DocumentSnapshot {
            shapes: self.shapes.clone(),
            z_order: self.z_order.clone(),
        }
    }

    fn restore(&mut self, snapshot: DocumentSnapshot) {
        self.shapes = snapshot.shapes;
        self.z_order = snapshot.z_order;
    }

    /// Push current state to undo stack (call before making changes).
    pub fn push_undo(&mut self) {
        let snapshot = self.snapshot();
        self.undo_stack.push(snapshot);
        self.redo_stack.clear();

        if self.undo_stack.len() > MAX_UNDO_HISTORY {
            self.undo_stack.remove(0);
        }
    }

    /// Undo the last change. Returns false if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.undo_stack.pop() else {
            return false;
        };
        let current = self.snapshot();
        self.redo_stack.push(current);
        self.restore(snapshot);
        true
    }

    /// Redo the last undone change. Returns false if there was nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.redo_stack.pop() else {
            return false;
        };
        let current = self.snapshot();
        self.undo_stack.push(current);
        self.restore(snapshot);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Add a shape on top of the z-order.
    ///
    /// A shape whose id is already present replaces the existing entry in place.
    pub fn add_shape(&mut self, shape: Shape) {
        let id = shape.id().clone();
        log::debug!("Adding {} shape {}", shape.kind(), id);
        if self.shapes.insert(id.clone(), shape).is_none() {
            self.z_order.push(id);
        }
    }

    /// Remove a shape from the document.
    pub fn remove_shape(&mut self, id: &ShapeId) -> Option<Shape> {
        self.z_order.retain(|shape_id| shape_id != id);
        self.shapes.remove(id)
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
        self.z_order.clear();
    }

    pub fn get_shape(&self, id: &ShapeId) -> Option<&Shape> {
        self.shapes.get(id)
    }

    pub fn contains(&self, id: &ShapeId) -> bool {
        self.shapes.contains_key(id)
    }

    /// Get shapes in z-order (back to front).
    pub fn shapes_ordered(&self) -> impl Iterator<Item = &Shape> {
        self.z_order.iter().filter_map(|id| self.shapes.get(id))
    }

    /// Z-order of shape ids (back to front).
    pub fn z_order(&self) -> &[ShapeId] {
        &self.z_order
    }

    pub fn bring_to_front(&mut self, id: &ShapeId) {
        if self.contains(id) {
            self.z_order.retain(|shape_id| shape_id != id);
            self.z_order.push(id.clone());
        }
    }

    pub fn send_to_back(&mut self, id: &ShapeId) {
        if self.contains(id) {
            self.z_order.retain(|shape_id| shape_id != id);
            self.z_order.insert(0, id.clone());
        }
    }

    /// Fold a finished gesture into the shape with `id`.
    ///
    /// Only the matching entry is replaced; every other shape is left as is.
    /// Returns false if no shape has that id, in which case the transient is
    /// left untouched.
    pub fn commit_transform(&mut self, id: &ShapeId, transient: &mut TransientTransform) -> bool {
        let Some(shape) = self.shapes.get_mut(id) else {
            log::warn!("Transform commit for unknown shape {}", id);
            return false;
        };
        *shape = commit_transform(shape, transient);
        let size = shape.size();
        log::debug!(
            "Committed transform for {}: {}x{} at ({}, {})",
            id,
            size.width,
            size.height,
            transient.position.x,
            transient.position.y
        );
        true
    }

    /// Copy every shape in `ids`, offset by [`DUPLICATE_OFFSET`] on both axes.
    ///
    /// Ids without a matching shape are skipped. Copies go on top of the
    /// z-order in the order given. Returns the ids of the new shapes.
    pub fn duplicate(&mut self, ids: &[ShapeId]) -> Vec<ShapeId> {
        self.duplicate_with(ids, ShapeId::for_duplicate)
    }

    /// [`duplicate`](Self::duplicate) with a custom id source. `next_id` gets
    /// the batch index of the copy being made.
    pub fn duplicate_with(
        &mut self,
        ids: &[ShapeId],
        mut next_id: impl FnMut(usize) -> ShapeId,
    ) -> Vec<ShapeId> {
        let mut created = Vec::with_capacity(ids.len());
        for (index, id) in ids.iter().enumerate() {
            let Some(source) = self.shapes.get(id) else {
                continue;
            };
            let source = source.clone();
            let new_id = self.unused_id(|| next_id(index));
            let mut copy = source.with_new_id(new_id.clone());
            copy.translate(Vec2::new(DUPLICATE_OFFSET, DUPLICATE_OFFSET));
            self.add_shape(copy);
            created.push(new_id);
        }
        if !created.is_empty() {
            log::info!("Duplicated {} shape(s)", created.len());
        }
        created
    }

    /// First candidate not already in the document. After
    /// [`MAX_ID_ATTEMPTS`] collisions the last candidate gets a numeric
    /// suffix; one of the first `len + 1` suffixes is always free.
    fn unused_id(&self, mut candidate: impl FnMut() -> ShapeId) -> ShapeId {
        let mut last = candidate();
        for _ in 1..MAX_ID_ATTEMPTS {
            if !self.shapes.contains_key(&last) {
                return last;
            }
            log::warn!("Duplicate id {} already in use, regenerating", last);
            last = candidate();
        }
        if !self.shapes.contains_key(&last) {
            return last;
        }
        log::warn!("Generated ids keep colliding, suffixing {}", last);
        let mut suffix = 1usize;
        loop {
            let id = ShapeId::from(format!("{}-{}", last, suffix));
            if !self.shapes.contains_key(&id) {
                return id;
            }
            suffix += 1;
        }
    }

    /// Get the bounding box of all shapes.
    pub fn bounds(&self) -> Option<Rect> {
        self.shapes
            .values()
            .map(Shape::bounds)
            .reduce(|acc, bounds| acc.union(bounds))
    }

    /// Find shapes at a point, front to back.
    pub fn shapes_at_point(&self, point: Point, tolerance: f64) -> Vec<ShapeId> {
        self.z_order
            .iter()
            .rev()
            .filter(|id| {
                self.shapes
                    .get(*id)
                    .is_some_and(|s| s.hit_test(point, tolerance))
            })
            .cloned()
            .collect()
    }

    /// Find shapes whose bounds overlap a rectangle, back to front.
    pub fn shapes_in_rect(&self, rect: Rect) -> Vec<ShapeId> {
        self.z_order
            .iter()
            .filter(|id| {
                self.shapes
                    .get(*id)
                    .is_some_and(|s| rect.intersect(s.bounds()).area() > 0.0)
            })
            .cloned()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Serialize the document to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a document from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Persist the document under `key`.
    pub fn save_to(&self, store: &dyn KeyValueStore, key: &str) -> StorageResult<()> {
        let json = self
            .to_json()
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        store.set(key, &json)
    }

    /// Load a document previously stored under `key`.
    pub fn load_from(store: &dyn KeyValueStore, key: &str) -> StorageResult<Self> {
        let json = store
            .get(key)?
            .ok_or_else(|| StorageError::NotFound(key.to_string()))?;
        Self::from_json(&json).map_err(|e| StorageError::Serialization(e.to_string()))
    }
}

/// Runtime canvas state (not persisted).
#[derive(Debug, Clone, Default)]
pub struct Canvas {
    /// The document being edited.
    pub document: CanvasDocument,
    /// Currently selected shape IDs.
    pub selection: Selection,
    /// Whether the shape settings panel is open.
    pub side_panel_open: bool,
}

impl Canvas {
    /// Create a new canvas with an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a canvas with an existing document.
    pub fn with_document(document: CanvasDocument) -> Self {
        Self {
            document,
            ..Self::default()
        }
    }

    /// Handle a click on a shape: update the selection and open the side panel.
    ///
    /// Returns false (and changes nothing) if the shape does not exist.
    pub fn click_shape(&mut self, id: &ShapeId, modifiers: ClickModifiers) -> bool {
        if !self.document.contains(id) {
            return false;
        }
        self.selection.click(id, modifiers);
        self.side_panel_open = true;
        true
    }

    /// Select every shape whose bounds overlap `rect`, replacing the selection.
    pub fn select_in_rect(&mut self, rect: Rect) {
        self.selection = self.document.shapes_in_rect(rect).into_iter().collect();
    }

    pub fn select_all(&mut self) {
        self.selection = self.document.z_order().iter().cloned().collect();
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn is_selected(&self, id: &ShapeId) -> bool {
        self.selection.contains(id)
    }

    pub fn close_side_panel(&mut self) {
        self.side_panel_open = false;
    }

    /// Duplicate the selected shapes. Both originals and copies end up selected.
    pub fn duplicate_selected(&mut self) -> Vec<ShapeId> {
        if self.selection.is_empty() {
            return Vec::new();
        }
        let ids = self.selection.as_slice().to_vec();
        self.document.push_undo();
        let created = self.document.duplicate(&ids);
        self.selection.extend(created.iter().cloned());
        created
    }

    /// Commit a finished gesture on `id` with an undo point.
    pub fn commit_transform(&mut self, id: &ShapeId, transient: &mut TransientTransform) -> bool {
        if !self.document.contains(id) {
            return false;
        }
        self.document.push_undo();
        self.document.commit_transform(id, transient)
    }

    /// Delete selected shapes.
    pub fn delete_selected(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        self.document.push_undo();
        for id in self.selection.iter() {
            self.document.remove_shape(id);
        }
        self.selection.clear();
    }

    /// Undo and drop selected ids that no longer exist.
    pub fn undo(&mut self) -> bool {
        let undone = self.document.undo();
        self.prune_selection();
        undone
    }

    pub fn redo(&mut self) -> bool {
        let redone = self.document.redo();
        self.prune_selection();
        redone
    }

    fn prune_selection(&mut self) {
        let document = &self.document;
        self.selection.retain(|id| document.contains(id));
    }
}
