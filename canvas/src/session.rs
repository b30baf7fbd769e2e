//! Board session: local board/item state and the persistence contract.
//!
//! DESIGN
//! ======
//! The session owns the board list and the selected board's item store
//! and is the only writer to either, so no other component needs a
//! writable handle on the collection. UI actions and scene commits funnel
//! through it; every mutation delegates to the persistence collaborator
//! and applies the authoritative response to local state. Selecting a
//! board is a total replace via a fresh fetch, never an incremental diff.
//!
//! ERROR HANDLING
//! ==============
//! Form-level validation (non-empty titles, positive dimensions) rejects
//! before any persistence call is made. Failures on the optimistic
//! position path are logged and swallowed: the local position stays until
//! the next full refetch overwrites it.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::consts::{SPAWN_SPREAD_X, SPAWN_SPREAD_Y};
use crate::item::{
    Board, BoardId, Item, ItemId, ItemPatch, ItemStatus, ItemStore, double_option,
};

// =============================================================================
// TYPES
// =============================================================================

/// Error surface of the persistence collaborator.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("board not found: {0}")]
    BoardNotFound(BoardId),
    #[error("item not found: {0}")]
    ItemNotFound(ItemId),
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("persistence unavailable: {0}")]
    Unavailable(String),
}

/// Session-level failures: local form validation plus propagated
/// persistence errors.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("width and height must be positive")]
    NonPositiveDimensions,
    #[error("board name must not be empty")]
    EmptyBoardName,
    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// Input for creating a board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBoardInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Sparse update for a board: omitted fields stay, an explicit null
/// clears the description.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoardPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "double_option"
    )]
    pub description: Option<Option<String>>,
}

/// Input for creating an item. Optional fields take the persistence
/// layer's defaults: status `todo`, position `(0, 0)`, a 200x150 card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateItemInput {
    pub board_id: BoardId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ItemStatus>,
    #[serde(default)]
    pub structured_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl CreateItemInput {
    /// Minimal input: title only, everything else left to defaults.
    #[must_use]
    pub fn new(board_id: BoardId, title: impl Into<String>) -> Self {
        Self {
            board_id,
            title: title.into(),
            description: None,
            status: None,
            structured_content: None,
            position_x: None,
            position_y: None,
            width: None,
            height: None,
        }
    }

    /// Scatter the new card over the spawn region near the origin, the
    /// way the toolbar places freshly created items.
    #[must_use]
    pub fn at_random_position(mut self) -> Self {
        let mut rng = rand::rng();
        self.position_x = Some(rng.random_range(0.0..SPAWN_SPREAD_X));
        self.position_y = Some(rng.random_range(0.0..SPAWN_SPREAD_Y));
        self
    }

    fn validate(&self) -> Result<(), SessionError> {
        if self.title.trim().is_empty() {
            return Err(SessionError::EmptyTitle);
        }
        if self.width.is_some_and(|w| w <= 0.0) || self.height.is_some_and(|h| h <= 0.0) {
            return Err(SessionError::NonPositiveDimensions);
        }
        Ok(())
    }
}

/// Sparse item update paired with its target id. On the wire the patch
/// fields sit beside the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateItemInput {
    pub id: ItemId,
    #[serde(flatten)]
    pub patch: ItemPatch,
}

// =============================================================================
// PERSISTENCE CONTRACT
// =============================================================================

/// The persistence/API collaborator the canvas core depends on. All calls
/// are request/response; the client is the sole driver of state refresh.
#[allow(async_fn_in_trait)]
pub trait Persistence {
    async fn list_boards(&self) -> Result<Vec<Board>, PersistError>;
    async fn create_board(&self, input: CreateBoardInput) -> Result<Board, PersistError>;
    async fn get_board(&self, id: BoardId) -> Result<Board, PersistError>;
    async fn update_board(&self, id: BoardId, patch: BoardPatch) -> Result<Board, PersistError>;
    /// Cascade delete: the board's items go with it. Returns whether a
    /// board was actually removed.
    async fn delete_board(&self, id: BoardId) -> Result<bool, PersistError>;
    async fn items_for_board(&self, board_id: BoardId) -> Result<Vec<Item>, PersistError>;
    async fn create_item(&self, input: CreateItemInput) -> Result<Item, PersistError>;
    async fn update_item(&self, input: UpdateItemInput) -> Result<Item, PersistError>;
    /// Narrow high-frequency variant of update used exclusively by
    /// drag commits.
    async fn update_item_position(&self, id: ItemId, x: f64, y: f64)
    -> Result<Item, PersistError>;
    async fn delete_item(&self, id: ItemId) -> Result<bool, PersistError>;
}

// =============================================================================
// SESSION
// =============================================================================

/// Client-side session over a persistence collaborator `P`.
pub struct BoardSession<P> {
    persistence: P,
    boards: Vec<Board>,
    active: Option<Board>,
    items: ItemStore,
}

impl<P: Persistence> BoardSession<P> {
    #[must_use]
    pub fn new(persistence: P) -> Self {
        Self {
            persistence,
            boards: Vec::new(),
            active: None,
            items: ItemStore::new(),
        }
    }

    /// All known boards, in the order the collaborator returned them.
    #[must_use]
    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    /// The currently selected board, if any.
    #[must_use]
    pub fn active_board(&self) -> Option<&Board> {
        self.active.as_ref()
    }

    /// The selected board's item collection (read-only; the session is
    /// the sole writer).
    #[must_use]
    pub fn items(&self) -> &ItemStore {
        &self.items
    }

    /// Fetch the board list. Auto-selects the first board when nothing is
    /// selected yet (startup behavior).
    ///
    /// # Errors
    ///
    /// Propagates collaborator failures.
    pub async fn refresh_boards(&mut self) -> Result<(), SessionError> {
        self.boards = self.persistence.list_boards().await?;
        if self.active.is_none() {
            if let Some(first) = self.boards.first().cloned() {
                self.select_board(first).await?;
            }
        }
        Ok(())
    }

    /// Make `board` the active board and replace the item collection with
    /// a fresh full fetch.
    ///
    /// # Errors
    ///
    /// Propagates collaborator failures; the previous selection stays in
    /// place when the fetch fails.
    pub async fn select_board(&mut self, board: Board) -> Result<(), SessionError> {
        let items = self.persistence.items_for_board(board.id).await?;
        info!(board_id = %board.id, items = items.len(), "selected board");
        self.active = Some(board);
        self.items.replace_all(items);
        Ok(())
    }

    /// Create a board, append it locally, and make it active.
    ///
    /// # Errors
    ///
    /// Rejects an empty name before any call; propagates collaborator
    /// failures.
    pub async fn create_board(&mut self, input: CreateBoardInput) -> Result<Board, SessionError> {
        if input.name.trim().is_empty() {
            return Err(SessionError::EmptyBoardName);
        }
        let board = self.persistence.create_board(input).await?;
        self.boards.push(board.clone());
        self.select_board(board.clone()).await?;
        Ok(board)
    }

    /// Apply a partial board edit; merges the authoritative result into
    /// local state.
    ///
    /// # Errors
    ///
    /// Rejects an empty name before any call; propagates collaborator
    /// failures.
    pub async fn update_board(
        &mut self,
        id: BoardId,
        patch: BoardPatch,
    ) -> Result<Board, SessionError> {
        if patch.name.as_ref().is_some_and(|n| n.trim().is_empty()) {
            return Err(SessionError::EmptyBoardName);
        }
        let board = self.persistence.update_board(id, patch).await?;
        if let Some(existing) = self.boards.iter_mut().find(|b| b.id == id) {
            *existing = board.clone();
        }
        if self.active.as_ref().is_some_and(|b| b.id == id) {
            self.active = Some(board.clone());
        }
        Ok(board)
    }

    /// Delete a board (cascades to its items server-side). Clears the
    /// active selection and the item collection when it was the deleted
    /// board.
    ///
    /// # Errors
    ///
    /// Propagates collaborator failures.
    pub async fn delete_board(&mut self, id: BoardId) -> Result<(), SessionError> {
        self.persistence.delete_board(id).await?;
        self.boards.retain(|b| b.id != id);
        if self.active.as_ref().is_some_and(|b| b.id == id) {
            self.active = None;
            self.items.replace_all(Vec::new());
        }
        Ok(())
    }

    /// Create an item; the authoritative item (generated id, timestamps,
    /// applied defaults) is appended to local state.
    ///
    /// # Errors
    ///
    /// Rejects invalid form input before any call; propagates
    /// collaborator failures.
    pub async fn create_item(&mut self, input: CreateItemInput) -> Result<Item, SessionError> {
        input.validate()?;
        let item = self.persistence.create_item(input).await?;
        self.items.insert(item.clone());
        Ok(item)
    }

    /// Partial update: omitted fields stay untouched server-side, an
    /// explicit null clears. The returned authoritative item replaces the
    /// local copy.
    ///
    /// # Errors
    ///
    /// Rejects invalid form input before any call; propagates
    /// collaborator failures.
    pub async fn update_item(&mut self, input: UpdateItemInput) -> Result<Item, SessionError> {
        if input.patch.title.as_ref().is_some_and(|t| t.trim().is_empty()) {
            return Err(SessionError::EmptyTitle);
        }
        if input.patch.width.is_some_and(|w| w <= 0.0)
            || input.patch.height.is_some_and(|h| h <= 0.0)
        {
            return Err(SessionError::NonPositiveDimensions);
        }
        let item = self.persistence.update_item(input).await?;
        self.items.insert(item.clone());
        Ok(item)
    }

    /// Delete an item. The local copy is removed on success; an unknown
    /// id is a no-op locally either way.
    ///
    /// # Errors
    ///
    /// Propagates collaborator failures.
    pub async fn delete_item(&mut self, id: ItemId) -> Result<(), SessionError> {
        let deleted = self.persistence.delete_item(id).await?;
        if deleted {
            self.items.remove(&id);
        }
        Ok(())
    }

    /// Commit a drag's final world position. The local copy moves first
    /// (optimistic); on success the authoritative item — with its new
    /// `updated_at` — replaces it, and on failure the error is logged
    /// while the optimistic position stays until the next refetch.
    pub async fn commit_position(&mut self, id: ItemId, x: f64, y: f64) {
        self.items.set_position(&id, x, y);
        match self.persistence.update_item_position(id, x, y).await {
            Ok(item) => {
                self.items.insert(item);
            }
            Err(e) => {
                warn!(error = %e, item_id = %id, "position commit failed; keeping optimistic position");
            }
        }
    }
}
