use crate::draft::{DraftBuffer, Mode};
use crate::error::{StoreError, StoreResult};
use crate::store::RecordStore;
use crate::types::{Field, FieldSet, RecordId};
use crate::validation::validate;

// ════════════════════════════════════════════════════════════════════════
// State
// ════════════════════════════════════════════════════════════════════════

/// Everything the form-and-list surface owns: the Record Store and the
/// Draft Buffer (which carries the mode).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub store: RecordStore,
    pub draft: DraftBuffer,
}

impl AppState {
    pub fn new(store: RecordStore, field_set: FieldSet) -> Self {
        Self {
            store,
            draft: DraftBuffer::new(field_set),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════
// Actions and results
// ════════════════════════════════════════════════════════════════════════

/// One user event. Destructive actions arrive here already confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetField(Field, String),
    Submit,
    BeginEdit(RecordId),
    CancelEdit,
    Delete(RecordId),
    ClearAll,
    TogglePassword,
}

/// Persistence side effect the controller must carry out before adopting
/// the new state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Overwrite the slot with the full store.
    Save,
    /// Remove the slot.
    ClearSlot,
}

/// What the user is told after an accepted action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Added(RecordId),
    Updated(RecordId),
    Deleted { id: RecordId, index: usize },
    Cleared,
    /// A destructive action was declined at the confirmation step.
    Cancelled,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::Added(_) => "New user added.",
            Notice::Updated(_) => "User updated.",
            Notice::Deleted { .. } => "User deleted.",
            Notice::Cleared => "All users cleared.",
            Notice::Cancelled => "Cancelled.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: AppState,
    pub effect: Effect,
    pub notice: Option<Notice>,
}

impl Transition {
    fn quiet(state: AppState) -> Self {
        Self {
            state,
            effect: Effect::None,
            notice: None,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════
// Reducer
// ════════════════════════════════════════════════════════════════════════

/// Pure transition function. Rejected actions return an error and leave the
/// caller's state as it was.
pub fn reduce(state: &AppState, action: Action) -> StoreResult<Transition> {
    let mut next = state.clone();
    match action {
        Action::SetField(field, value) => {
            next.draft.set_field(field, value);
            Ok(Transition::quiet(next))
        }
        Action::TogglePassword => {
            next.draft.toggle_password();
            Ok(Transition::quiet(next))
        }
        Action::CancelEdit => {
            next.draft.reset();
            Ok(Transition::quiet(next))
        }
        Action::BeginEdit(id) => {
            let stored = state
                .store
                .get_by_id(id)
                .ok_or(StoreError::RecordNotFound(id.0))?;
            next.draft.load(id, stored.record.clone());
            Ok(Transition::quiet(next))
        }
        Action::Submit => {
            let (next, notice) = submit_draft(state)?;
            Ok(Transition {
                state: next,
                effect: Effect::Save,
                notice: Some(notice),
            })
        }
        Action::Delete(id) => {
            let (index, _) = next.store.remove(id)?;
            if state.draft.mode() == Mode::Editing(id) {
                next.draft.reset();
            }
            Ok(Transition {
                state: next,
                effect: Effect::Save,
                notice: Some(Notice::Deleted { id, index }),
            })
        }
        Action::ClearAll => {
            next.store.clear();
            next.draft.reset();
            Ok(Transition {
                state: next,
                effect: Effect::ClearSlot,
                notice: Some(Notice::Cleared),
            })
        }
    }
}

/// Validate the draft, then update the record under edit or append a new
/// one. The returned state still has to be saved.
pub fn submit_draft(state: &AppState) -> StoreResult<(AppState, Notice)> {
    let draft = state.draft.record();
    validate(draft, state.draft.field_set())?;

    let mut next = state.clone();
    let notice = match state.draft.mode() {
        Mode::Editing(id) if state.store.get_by_id(id).is_some() => {
            next.store.replace(id, draft.clone())?;
            Notice::Updated(id)
        }
        _ => Notice::Added(next.store.push(draft.clone())?),
    };
    next.draft.reset();
    Ok((next, notice))
}
