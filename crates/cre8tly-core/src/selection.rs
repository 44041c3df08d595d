//! Selection set for canvas shapes.

use crate::shapes::ShapeId;
use serde::{Deserialize, Serialize};

/// Modifier keys held during a click.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClickModifiers {
    pub shift: bool,
}

impl ClickModifiers {
    pub const NONE: Self = Self { shift: false };
    pub const SHIFT: Self = Self { shift: true };
}

/// Ordered set of selected shape identifiers.
///
/// Insertion order is preserved and an identifier appears at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    ids: Vec<ShapeId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a click on `id`.
    ///
    /// A plain click replaces the selection with `{id}`. A shift-click toggles
    /// `id` and leaves every other selected identifier in place.
    pub fn click(&mut self, id: &ShapeId, modifiers: ClickModifiers) {
        if modifiers.shift {
            self.toggle(id);
        } else {
            self.ids.clear();
            self.ids.push(id.clone());
        }
    }

    /// Add `id` if absent, remove it if present.
    pub fn toggle(&mut self, id: &ShapeId) {
        if let Some(pos) = self.ids.iter().position(|s| s == id) {
            self.ids.remove(pos);
        } else {
            self.ids.push(id.clone());
        }
    }

    /// Add `id` if absent. Returns whether it was added.
    pub fn insert(&mut self, id: ShapeId) -> bool {
        if self.contains(&id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    pub fn remove(&mut self, id: &ShapeId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|s| s != id);
        self.ids.len() != before
    }

    pub fn extend(&mut self, ids: impl IntoIterator<Item = ShapeId>) {
        for id in ids {
            self.insert(id);
        }
    }

    /// Keep only identifiers for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(&ShapeId) -> bool) {
        self.ids.retain(|id| keep(id));
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: &ShapeId) -> bool {
        self.ids.contains(id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShapeId> {
        self.ids.iter()
    }

    pub fn as_slice(&self) -> &[ShapeId] {
        &self.ids
    }
}

impl FromIterator<ShapeId> for Selection {
    fn from_iter<T: IntoIterator<Item = ShapeId>>(iter: T) -> Self {
        let mut selection = Selection::new();
        selection.extend(iter);
        selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> (ShapeId, ShapeId, ShapeId) {
        (ShapeId::from("a"), ShapeId::from("b"), ShapeId::from("c"))
    }

    #[test]
    fn test_plain_click_replaces() {
        let (a, b, c) = ids();
        let mut sel: Selection = [a.clone(), b.clone()].into_iter().collect();
        sel.click(&c, ClickModifiers::NONE);
        assert_eq!(sel.as_slice(), &[c]);
    }

    #[test]
    fn test_plain_click_on_selected_collapses() {
        let (a, b, _) = ids();
        let mut sel: Selection = [a.clone(), b.clone()].into_iter().collect();
        sel.click(&a, ClickModifiers::NONE);
        assert_eq!(sel.as_slice(), &[a]);
    }

    #[test]
    fn test_shift_click_toggles() {
        let (a, b, c) = ids();
        let mut sel: Selection = [a.clone(), b.clone()].into_iter().collect();

        sel.click(&c, ClickModifiers::SHIFT);
        assert_eq!(sel.as_slice(), &[a.clone(), b.clone(), c.clone()]);

        sel.click(&b, ClickModifiers::SHIFT);
        assert_eq!(sel.as_slice(), &[a, c]);
    }

    #[test]
    fn test_no_duplicates() {
        let (a, _, _) = ids();
        let mut sel = Selection::new();
        assert!(sel.insert(a.clone()));
        assert!(!sel.insert(a.clone()));
        assert_eq!(sel.len(), 1);
        assert!(sel.remove(&a));
        assert!(sel.is_empty());
    }
}
