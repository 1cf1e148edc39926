use super::state::{Action, AppState, Effect, Notice, reduce, submit_draft};
use super::view::ListRow;
use crate::config::{StorageLocation, UserStoreConfig};
use crate::db::{RecordSlot, SlotDb};
use crate::draft::{DraftBuffer, Mode};
use crate::error::{StoreError, StoreResult};
use crate::store::RecordStore;
use crate::types::{Field, FieldSet, RecordId};
use tracing::{debug, info, warn};

/// Blocking yes/no question put to the user before a destructive action.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this user?";
pub const CLEAR_PROMPT: &str = "Are you sure you want to clear all users?";

/// Sole owner of the application state. Every accepted transition is
/// written to the slot before it becomes the current state.
pub struct Controller {
    slot: RecordSlot,
    state: AppState,
}

impl Controller {
    pub fn open(config: &UserStoreConfig) -> StoreResult<Self> {
        let db = match &config.location {
            StorageLocation::File(path) => SlotDb::open(path)?,
            StorageLocation::InMemory => SlotDb::open_in_memory()?,
        };
        Ok(Self::new(
            RecordSlot::new(db, config.slot_key.clone()),
            config.field_set,
        ))
    }

    /// Load the store from `slot` once and start in `Creating` mode.
    pub fn new(slot: RecordSlot, field_set: FieldSet) -> Self {
        let store = slot.load();
        info!(key = slot.key(), count = store.len(), "record store loaded");
        Self {
            slot,
            state: AppState::new(store, field_set),
        }
    }

    // ─── Read side ──────────────────────────────────────────────────────────

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn store(&self) -> &RecordStore {
        &self.state.store
    }

    pub fn draft(&self) -> &DraftBuffer {
        &self.state.draft
    }

    pub fn mode(&self) -> Mode {
        self.state.draft.mode()
    }

    /// Index of the record under edit, derived from its id.
    pub fn editing_index(&self) -> Option<usize> {
        self.mode()
            .editing_id()
            .and_then(|id| self.state.store.position(id))
    }

    pub fn can_clear_all(&self) -> bool {
        !self.state.store.is_empty()
    }

    pub fn list_rows(&self, reveal_passwords: bool) -> Vec<ListRow> {
        self.state
            .store
            .iter()
            .enumerate()
            .map(|(i, r)| ListRow::new(i, r, reveal_passwords))
            .collect()
    }

    // ─── Write side ─────────────────────────────────────────────────────────

    /// Apply `action`: compute the transition, perform its persistence
    /// effect, then adopt the new state. Nothing changes if either step fails.
    pub fn dispatch(&mut self, action: Action) -> StoreResult<Option<Notice>> {
        let transition = reduce(&self.state, action)?;
        self.commit(transition.state, transition.effect)?;
        Ok(transition.notice)
    }

    fn commit(&mut self, next: AppState, effect: Effect) -> StoreResult<()> {
        match effect {
            Effect::None => {}
            Effect::Save => self.slot.save(&next.store)?,
            Effect::ClearSlot => self.slot.clear()?,
        }
        self.state = next;
        Ok(())
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) -> StoreResult<()> {
        let value = value.into();
        debug!(%field, "input changed");
        self.dispatch(Action::SetField(field, value))?;
        Ok(())
    }

    pub fn toggle_password(&mut self) -> StoreResult<bool> {
        self.dispatch(Action::TogglePassword)?;
        Ok(self.state.draft.show_password())
    }

    /// Create or update from the draft, depending on the mode.
    pub fn submit(&mut self) -> StoreResult<Notice> {
        let (next, notice) = submit_draft(&self.state).inspect_err(|e| {
            if let StoreError::Validation(reason) = e {
                warn!(%reason, "submission rejected");
            }
        })?;
        self.commit(next, Effect::Save)?;
        match notice {
            Notice::Added(id) => info!(%id, "new user added"),
            Notice::Updated(id) => info!(%id, "user updated"),
            _ => {}
        }
        Ok(notice)
    }

    /// Copy the record at `index` into the draft and enter `Editing`.
    pub fn begin_edit(&mut self, index: usize) -> StoreResult<RecordId> {
        let id = self.state.store.id_at(index)?;
        self.dispatch(Action::BeginEdit(id))?;
        debug!(index, %id, "editing user");
        Ok(id)
    }

    pub fn cancel_edit(&mut self) -> StoreResult<()> {
        self.dispatch(Action::CancelEdit)?;
        Ok(())
    }

    /// Delete the record at `index` after confirmation. A declined prompt is
    /// a no-op reported as [`Notice::Cancelled`].
    pub fn delete_at(&mut self, index: usize, confirm: &mut impl Confirm) -> StoreResult<Notice> {
        let id = self.state.store.id_at(index)?;
        self.delete(id, confirm)
    }

    pub fn delete(&mut self, id: RecordId, confirm: &mut impl Confirm) -> StoreResult<Notice> {
        let index = self
            .state
            .store
            .position(id)
            .ok_or(StoreError::RecordNotFound(id.0))?;
        if !confirm.confirm(DELETE_PROMPT) {
            info!(%id, "delete cancelled");
            return Ok(Notice::Cancelled);
        }
        let notice = self
            .dispatch(Action::Delete(id))?
            .unwrap_or(Notice::Deleted { id, index });
        info!(%id, index, "user deleted");
        Ok(notice)
    }

    /// Empty the store and remove the slot after confirmation.
    pub fn clear_all(&mut self, confirm: &mut impl Confirm) -> StoreResult<Notice> {
        if !confirm.confirm(CLEAR_PROMPT) {
            info!("clear all cancelled");
            return Ok(Notice::Cancelled);
        }
        let notice = self.dispatch(Action::ClearAll)?.unwrap_or(Notice::Cleared);
        info!("all users cleared");
        Ok(notice)
    }
}
