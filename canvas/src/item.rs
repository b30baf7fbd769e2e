//! Board and item models: card data, sparse updates, and the item store.
//!
//! This module defines the data shared between the canvas core and the
//! persistence layer: `Board`, `Item`, `ItemStatus`, a sparse-update type
//! for partial edits (`ItemPatch`), and the in-memory collection that
//! holds the active board's items (`ItemStore`). Data flows in from the
//! network (JSON deserialization) and from the session (mutations); the
//! scene reads from `ItemStore` to lay out cards.

#[cfg(test)]
#[path = "item_test.rs"]
mod item_test;

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Unique identifier for a board.
pub type BoardId = Uuid;

/// Unique identifier for an item.
pub type ItemId = Uuid;

/// A named container of items; the unit of cascade deletion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub id: BoardId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Workflow status of an item card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    /// Not started (the default on creation).
    #[default]
    Todo,
    /// Actively being worked.
    InProgress,
    /// Awaiting review.
    Review,
    /// Finished.
    Done,
    /// Kept for reference, out of the active flow.
    Archived,
}

/// A positioned, sized card of content and status on a board.
///
/// `position_x` / `position_y` are unconstrained world coordinates — the
/// canvas is infinite in both directions. `width` / `height` are positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    /// The board this item belongs to; deleting the board deletes the item.
    pub board_id: BoardId,
    pub title: String,
    pub description: Option<String>,
    pub status: ItemStatus,
    /// Open-ended structured payload (XML/JSON text) rendered by the card.
    pub structured_content: Option<String>,
    pub position_x: f64,
    pub position_y: f64,
    pub width: f64,
    pub height: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Sparse update for an item. `None` leaves a field untouched. The
/// nullable fields use a double `Option`: an explicit JSON `null`
/// deserializes to `Some(None)` and clears the value, while an omitted
/// field stays `None` and keeps it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "double_option"
    )]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ItemStatus>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "double_option"
    )]
    pub structured_content: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl ItemPatch {
    /// Apply the present fields to an item in place. Timestamps are the
    /// persistence layer's concern and are not touched here.
    pub fn apply_to(&self, item: &mut Item) {
        if let Some(ref title) = self.title {
            item.title = title.clone();
        }
        if let Some(ref description) = self.description {
            item.description = description.clone();
        }
        if let Some(status) = self.status {
            item.status = status;
        }
        if let Some(ref content) = self.structured_content {
            item.structured_content = content.clone();
        }
        if let Some(x) = self.position_x {
            item.position_x = x;
        }
        if let Some(y) = self.position_y {
            item.position_y = y;
        }
        if let Some(w) = self.width {
            item.width = w;
        }
        if let Some(h) = self.height {
            item.height = h;
        }
    }

    /// Whether the patch carries no fields at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.structured_content.is_none()
            && self.position_x.is_none()
            && self.position_y.is_none()
            && self.width.is_none()
            && self.height.is_none()
    }
}

/// Deserialize a field so that "absent" and "present but null" stay
/// distinguishable: pair with `#[serde(default)]` on the field.
pub(crate) fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}

/// In-memory collection of the active board's items.
#[derive(Debug, Default)]
pub struct ItemStore {
    items: HashMap<ItemId, Item>,
}

impl ItemStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an item. An existing item with the same `id` is
    /// overwritten (how authoritative responses supersede optimistic ones).
    pub fn insert(&mut self, item: Item) {
        self.items.insert(item.id, item);
    }

    /// Remove an item by id, returning it if it was present.
    pub fn remove(&mut self, id: &ItemId) -> Option<Item> {
        self.items.remove(id)
    }

    /// Return a reference to an item by id.
    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<&Item> {
        self.items.get(id)
    }

    /// Move an item to a new world position without touching anything
    /// else (the optimistic half of a drag commit). Returns false if the
    /// id is unknown.
    pub fn set_position(&mut self, id: &ItemId, x: f64, y: f64) -> bool {
        let Some(item) = self.items.get_mut(id) else {
            return false;
        };
        item.position_x = x;
        item.position_y = y;
        true
    }

    /// Replace the whole collection with a fresh snapshot.
    pub fn replace_all(&mut self, items: Vec<Item>) {
        self.items.clear();
        for item in items {
            self.items.insert(item.id, item);
        }
    }

    /// All items ordered by creation time then id — the draw order, with
    /// later cards on top.
    #[must_use]
    pub fn sorted_items(&self) -> Vec<&Item> {
        let mut items: Vec<&Item> = self.items.values().collect();
        items.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        items
    }

    /// Number of items currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the store contains no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
