//! In-memory persistence for boards and items.
//!
//! DESIGN
//! ======
//! One `RwLock` guards both tables so cross-table operations (cascade
//! delete, referential checks on item create) see a consistent snapshot.
//! All writes stamp `updated_at` server-side; clients never supply
//! timestamps. The store implements the canvas crate's persistence
//! contract, so a `BoardSession` can run against it directly in tests.
//!
//! ERROR HANDLING
//! ==============
//! Lookups against unknown ids return the typed not-found variants;
//! validation failures (empty names/titles, non-positive dimensions)
//! return `Invalid`. Deletes report absence via `Ok(false)` rather than
//! an error, matching the delete endpoints' `success` payload.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use canvas::consts::{DEFAULT_ITEM_HEIGHT, DEFAULT_ITEM_WIDTH};
use canvas::item::{Board, BoardId, Item, ItemId, ItemPatch};
use canvas::session::{
    BoardPatch, CreateBoardInput, CreateItemInput, PersistError, Persistence, UpdateItemInput,
};

// =============================================================================
// TABLES
// =============================================================================

#[derive(Default)]
struct Tables {
    boards: HashMap<BoardId, Board>,
    items: HashMap<ItemId, Item>,
}

/// In-memory board/item store behind a single `RwLock`.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

// =============================================================================
// OPERATIONS
// =============================================================================

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All boards, most recently updated first.
    pub async fn list_boards(&self) -> Vec<Board> {
        let tables = self.tables.read().await;
        let mut boards: Vec<Board> = tables.boards.values().cloned().collect();
        boards.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then_with(|| a.id.cmp(&b.id)));
        boards
    }

    /// Create a board with a server-generated id and timestamps.
    ///
    /// # Errors
    ///
    /// `Invalid` when the name is empty.
    pub async fn create_board(&self, input: CreateBoardInput) -> Result<Board, PersistError> {
        if input.name.trim().is_empty() {
            return Err(PersistError::Invalid("board name must not be empty".into()));
        }
        let now = Utc::now();
        let board = Board {
            id: Uuid::new_v4(),
            name: input.name,
            description: input.description,
            created_at: now,
            updated_at: now,
        };
        let mut tables = self.tables.write().await;
        tables.boards.insert(board.id, board.clone());
        Ok(board)
    }

    /// Fetch a single board.
    ///
    /// # Errors
    ///
    /// `BoardNotFound` when the id is unknown.
    pub async fn get_board(&self, id: BoardId) -> Result<Board, PersistError> {
        let tables = self.tables.read().await;
        tables
            .boards
            .get(&id)
            .cloned()
            .ok_or(PersistError::BoardNotFound(id))
    }

    /// Apply a sparse board update and bump `updated_at`.
    ///
    /// # Errors
    ///
    /// `BoardNotFound` when the id is unknown; `Invalid` when the patch
    /// sets an empty name.
    pub async fn update_board(
        &self,
        id: BoardId,
        patch: BoardPatch,
    ) -> Result<Board, PersistError> {
        if patch.name.as_ref().is_some_and(|n| n.trim().is_empty()) {
            return Err(PersistError::Invalid("board name must not be empty".into()));
        }
        let mut tables = self.tables.write().await;
        let board = tables
            .boards
            .get_mut(&id)
            .ok_or(PersistError::BoardNotFound(id))?;
        if let Some(name) = patch.name {
            board.name = name;
        }
        if let Some(description) = patch.description {
            board.description = description;
        }
        board.updated_at = Utc::now();
        Ok(board.clone())
    }

    /// Delete a board and every item on it. Returns whether a board was
    /// removed.
    pub async fn delete_board(&self, id: BoardId) -> bool {
        let mut tables = self.tables.write().await;
        if tables.boards.remove(&id).is_none() {
            return false;
        }
        let before = tables.items.len();
        tables.items.retain(|_, item| item.board_id != id);
        let cascaded = before - tables.items.len();
        info!(board_id = %id, items = cascaded, "deleted board");
        true
    }

    /// Items on a board, oldest first (draw order).
    ///
    /// # Errors
    ///
    /// `BoardNotFound` when the board id is unknown.
    pub async fn items_for_board(&self, board_id: BoardId) -> Result<Vec<Item>, PersistError> {
        let tables = self.tables.read().await;
        if !tables.boards.contains_key(&board_id) {
            return Err(PersistError::BoardNotFound(board_id));
        }
        let mut items: Vec<Item> = tables
            .items
            .values()
            .filter(|i| i.board_id == board_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(items)
    }

    /// Fetch a single item.
    ///
    /// # Errors
    ///
    /// `ItemNotFound` when the id is unknown.
    pub async fn get_item(&self, id: ItemId) -> Result<Item, PersistError> {
        let tables = self.tables.read().await;
        tables
            .items
            .get(&id)
            .cloned()
            .ok_or(PersistError::ItemNotFound(id))
    }

    /// Create an item, filling unspecified fields with the server
    /// defaults: status `todo`, the world origin, a 200x150 card.
    ///
    /// # Errors
    ///
    /// `BoardNotFound` when the target board does not exist; `Invalid`
    /// for an empty title or non-positive dimensions.
    pub async fn create_item(&self, input: CreateItemInput) -> Result<Item, PersistError> {
        if input.title.trim().is_empty() {
            return Err(PersistError::Invalid("item title must not be empty".into()));
        }
        if input.width.is_some_and(|w| w <= 0.0) || input.height.is_some_and(|h| h <= 0.0) {
            return Err(PersistError::Invalid(
                "width and height must be positive".into(),
            ));
        }
        let mut tables = self.tables.write().await;
        if !tables.boards.contains_key(&input.board_id) {
            return Err(PersistError::BoardNotFound(input.board_id));
        }
        let now = Utc::now();
        let item = Item {
            id: Uuid::new_v4(),
            board_id: input.board_id,
            title: input.title,
            description: input.description,
            status: input.status.unwrap_or_default(),
            structured_content: input.structured_content,
            position_x: input.position_x.unwrap_or(0.0),
            position_y: input.position_y.unwrap_or(0.0),
            width: input.width.unwrap_or(DEFAULT_ITEM_WIDTH),
            height: input.height.unwrap_or(DEFAULT_ITEM_HEIGHT),
            created_at: now,
            updated_at: now,
        };
        tables.items.insert(item.id, item.clone());
        Ok(item)
    }

    /// Apply a sparse item update and bump `updated_at`. Omitted fields
    /// stay; explicit nulls clear the nullable ones.
    ///
    /// # Errors
    ///
    /// `ItemNotFound` when the id is unknown; `Invalid` when the patch
    /// sets an empty title or non-positive dimensions.
    pub async fn update_item(&self, id: ItemId, patch: ItemPatch) -> Result<Item, PersistError> {
        if patch.title.as_ref().is_some_and(|t| t.trim().is_empty()) {
            return Err(PersistError::Invalid("item title must not be empty".into()));
        }
        if patch.width.is_some_and(|w| w <= 0.0) || patch.height.is_some_and(|h| h <= 0.0) {
            return Err(PersistError::Invalid(
                "width and height must be positive".into(),
            ));
        }
        let mut tables = self.tables.write().await;
        let item = tables
            .items
            .get_mut(&id)
            .ok_or(PersistError::ItemNotFound(id))?;
        patch.apply_to(item);
        item.updated_at = Utc::now();
        Ok(item.clone())
    }

    /// Move an item, bumping `updated_at`. The narrow write used by drag
    /// commits.
    ///
    /// # Errors
    ///
    /// `ItemNotFound` when the id is unknown.
    pub async fn update_item_position(
        &self,
        id: ItemId,
        x: f64,
        y: f64,
    ) -> Result<Item, PersistError> {
        let mut tables = self.tables.write().await;
        let item = tables
            .items
            .get_mut(&id)
            .ok_or(PersistError::ItemNotFound(id))?;
        item.position_x = x;
        item.position_y = y;
        item.updated_at = Utc::now();
        Ok(item.clone())
    }

    /// Delete an item. Returns whether an item was removed.
    pub async fn delete_item(&self, id: ItemId) -> bool {
        let mut tables = self.tables.write().await;
        tables.items.remove(&id).is_some()
    }
}

// =============================================================================
// PERSISTENCE CONTRACT
// =============================================================================

impl Persistence for MemoryStore {
    async fn list_boards(&self) -> Result<Vec<Board>, PersistError> {
        Ok(MemoryStore::list_boards(self).await)
    }

    async fn create_board(&self, input: CreateBoardInput) -> Result<Board, PersistError> {
        MemoryStore::create_board(self, input).await
    }

    async fn get_board(&self, id: BoardId) -> Result<Board, PersistError> {
        MemoryStore::get_board(self, id).await
    }

    async fn update_board(&self, id: BoardId, patch: BoardPatch) -> Result<Board, PersistError> {
        MemoryStore::update_board(self, id, patch).await
    }

    async fn delete_board(&self, id: BoardId) -> Result<bool, PersistError> {
        Ok(MemoryStore::delete_board(self, id).await)
    }

    async fn items_for_board(&self, board_id: BoardId) -> Result<Vec<Item>, PersistError> {
        MemoryStore::items_for_board(self, board_id).await
    }

    async fn create_item(&self, input: CreateItemInput) -> Result<Item, PersistError> {
        MemoryStore::create_item(self, input).await
    }

    async fn update_item(&self, input: UpdateItemInput) -> Result<Item, PersistError> {
        MemoryStore::update_item(self, input.id, input.patch).await
    }

    async fn update_item_position(
        &self,
        id: ItemId,
        x: f64,
        y: f64,
    ) -> Result<Item, PersistError> {
        MemoryStore::update_item_position(self, id, x, y).await
    }

    async fn delete_item(&self, id: ItemId) -> Result<bool, PersistError> {
        Ok(MemoryStore::delete_item(self, id).await)
    }
}
