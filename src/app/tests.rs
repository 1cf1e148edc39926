// ═══════════════════════════════════════════════════════════════════════
// Controller / reducer behaviour
// ═══════════════════════════════════════════════════════════════════════
use super::*;
use crate::config::UserStoreConfig;
use crate::db::{RecordSlot, SlotDb};
use crate::draft::Mode;
use crate::error::StoreError;
use crate::record::UserRecord;
use crate::store::RecordStore;
use crate::types::{DEFAULT_SLOT_KEY, Field, FieldSet, RecordId};
use crate::validation::ValidationError;
use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;

fn yes() -> impl FnMut(&str) -> bool {
    |_: &str| true
}

fn no() -> impl FnMut(&str) -> bool {
    |_: &str| false
}

fn basic() -> Controller {
    Controller::open(&UserStoreConfig::in_memory().with_field_set(FieldSet::Basic)).unwrap()
}

fn fill(ctl: &mut Controller, name: &str, email: &str) {
    ctl.set_field(Field::Name, name).unwrap();
    ctl.set_field(Field::Email, email).unwrap();
}

fn add(ctl: &mut Controller, name: &str, email: &str) -> RecordId {
    fill(ctl, name, email);
    match ctl.submit().unwrap() {
        Notice::Added(id) => id,
        other => panic!("expected Added, got {other:?}"),
    }
}

fn names(ctl: &Controller) -> Vec<String> {
    ctl.store().iter().map(|r| r.record.name.clone()).collect()
}

fn assert_creating_with_empty_draft(ctl: &Controller) {
    assert_eq!(ctl.mode(), Mode::Creating);
    assert!(ctl.draft().is_empty());
}

// ─── Scenarios ──────────────────────────────────────────────────────────

#[test]
fn test_submit_into_empty_store() {
    let mut ctl = basic();
    add(&mut ctl, "A", "a@x.com");

    assert_eq!(ctl.store().len(), 1);
    assert_eq!(ctl.store().get(0).unwrap().record, UserRecord::new("A", "a@x.com"));
    assert_creating_with_empty_draft(&ctl);
}

#[test]
fn test_invalid_email_leaves_store_and_draft_untouched() {
    let mut ctl = basic();
    add(&mut ctl, "A", "a@x.com");
    fill(&mut ctl, "B", "bad-email");
    let before = ctl.state().clone();

    let err = ctl.submit().unwrap_err();
    assert!(matches!(err, StoreError::Validation(ValidationError::InvalidEmail)));
    assert_eq!(ctl.store().len(), 1);
    assert_eq!(ctl.state(), &before);
    assert_eq!(ctl.draft().record().name, "B");
}

#[test]
fn test_missing_fields_rejected_in_credentials_set() {
    let mut ctl = Controller::open(&UserStoreConfig::in_memory()).unwrap();
    fill(&mut ctl, "A", "a@x.com");
    let err = ctl.submit().unwrap_err();
    assert!(matches!(err, StoreError::Validation(ValidationError::MissingFields)));

    ctl.set_field(Field::Username, "ann").unwrap();
    ctl.set_field(Field::Password, "pw").unwrap();
    assert!(matches!(ctl.submit().unwrap(), Notice::Added(_)));
    let stored = &ctl.store().get(0).unwrap().record;
    assert_eq!(stored.username.as_deref(), Some("ann"));
}

#[test]
fn test_edit_middle_record() {
    let mut ctl = basic();
    for n in ["R0", "R1", "R2"] {
        add(&mut ctl, n, &format!("{}@x.com", n.to_lowercase()));
    }
    let id = ctl.begin_edit(1).unwrap();
    assert_eq!(ctl.mode(), Mode::Editing(id));
    assert_eq!(ctl.draft().record().name, "R1");

    fill(&mut ctl, "R1-new", "r1@x.com");
    assert_eq!(ctl.submit().unwrap(), Notice::Updated(id));

    assert_eq!(names(&ctl), vec!["R0", "R1-new", "R2"]);
    assert_eq!(ctl.store().get(1).unwrap().record.email, "r1@x.com");
    assert_eq!(ctl.store().get(1).unwrap().id, id);
    assert_creating_with_empty_draft(&ctl);
}

// ─── Delete ─────────────────────────────────────────────────────────────

#[test]
fn test_delete_shifts_indices() {
    let mut ctl = basic();
    for n in ["R0", "R1", "R2", "R3"] {
        add(&mut ctl, n, "r@x.com");
    }
    let before: Vec<_> = ctl.store().records().to_vec();

    let notice = ctl.delete_at(1, &mut yes()).unwrap();
    assert!(matches!(notice, Notice::Deleted { index: 1, .. }));

    let after = ctl.store().records();
    assert_eq!(after.len(), 3);
    assert_eq!(after[0], before[0]);
    assert_eq!(after[1], before[2]);
    assert_eq!(after[2], before[3]);
}

#[test]
fn test_delete_declined_is_noop() {
    let mut ctl = basic();
    add(&mut ctl, "A", "a@x.com");
    let before = ctl.state().clone();
    assert_eq!(ctl.delete_at(0, &mut no()).unwrap(), Notice::Cancelled);
    assert_eq!(ctl.state(), &before);
}

#[test]
fn test_delete_prompts_exactly_once() {
    let mut ctl = basic();
    add(&mut ctl, "A", "a@x.com");
    let mut prompts = Vec::new();
    ctl.delete_at(0, &mut |p: &str| {
        prompts.push(p.to_string());
        true
    })
    .unwrap();
    assert_eq!(prompts, vec![super::controller::DELETE_PROMPT.to_string()]);
}

#[test]
fn test_delete_out_of_range_never_prompts() {
    let mut ctl = basic();
    add(&mut ctl, "A", "a@x.com");
    let mut asked = false;
    let err = ctl
        .delete_at(1, &mut |_: &str| {
            asked = true;
            true
        })
        .unwrap_err();
    assert!(matches!(err, StoreError::IndexOutOfRange { index: 1, len: 1 }));
    assert!(!asked);
}

#[test]
fn test_begin_edit_then_delete_same_record_resets_draft() {
    let mut ctl = basic();
    add(&mut ctl, "A", "a@x.com");
    add(&mut ctl, "B", "b@x.com");
    ctl.begin_edit(1).unwrap();
    ctl.delete_at(1, &mut yes()).unwrap();

    assert_creating_with_empty_draft(&ctl);
    assert_eq!(names(&ctl), vec!["A"]);
}

#[test]
fn test_edit_target_follows_record_when_earlier_one_deleted() {
    let mut ctl = basic();
    for n in ["R0", "R1", "R2"] {
        add(&mut ctl, n, "r@x.com");
    }
    let id = ctl.begin_edit(2).unwrap();
    ctl.delete_at(0, &mut yes()).unwrap();

    assert_eq!(ctl.mode(), Mode::Editing(id));
    assert_eq!(ctl.editing_index(), Some(1));

    fill(&mut ctl, "R2-new", "r2@x.com");
    ctl.submit().unwrap();
    assert_eq!(names(&ctl), vec!["R1", "R2-new"]);
}

#[test]
fn test_cancel_edit_then_submit_creates() {
    let mut ctl = basic();
    add(&mut ctl, "A", "a@x.com");
    ctl.begin_edit(0).unwrap();
    ctl.cancel_edit().unwrap();
    assert_creating_with_empty_draft(&ctl);

    add(&mut ctl, "B", "b@x.com");
    assert_eq!(names(&ctl), vec!["A", "B"]);
}

#[test]
fn test_begin_edit_out_of_range() {
    let mut ctl = basic();
    assert!(matches!(
        ctl.begin_edit(0),
        Err(StoreError::IndexOutOfRange { index: 0, len: 0 })
    ));
    assert_eq!(ctl.mode(), Mode::Creating);
}

// ─── Clear all ──────────────────────────────────────────────────────────

#[test]
fn test_clear_all_twice() {
    let mut ctl = basic();
    add(&mut ctl, "A", "a@x.com");
    ctl.begin_edit(0).unwrap();
    assert!(ctl.can_clear_all());

    assert_eq!(ctl.clear_all(&mut yes()).unwrap(), Notice::Cleared);
    assert!(ctl.store().is_empty());
    assert_creating_with_empty_draft(&ctl);

    assert_eq!(ctl.clear_all(&mut yes()).unwrap(), Notice::Cleared);
    assert!(ctl.store().is_empty());
    assert!(!ctl.can_clear_all());
}

#[test]
fn test_clear_all_declined() {
    let mut ctl = basic();
    add(&mut ctl, "A", "a@x.com");
    assert_eq!(ctl.clear_all(&mut no()).unwrap(), Notice::Cancelled);
    assert_eq!(ctl.store().len(), 1);
}

// ─── Persistence ────────────────────────────────────────────────────────

fn file_controller(file: &NamedTempFile) -> Controller {
    let slot = RecordSlot::new(SlotDb::open(file.path()).unwrap(), DEFAULT_SLOT_KEY);
    Controller::new(slot, FieldSet::Basic)
}

#[test]
fn test_every_mutation_is_durable() {
    let file = NamedTempFile::new().unwrap();
    {
        let mut ctl = file_controller(&file);
        add(&mut ctl, "A", "a@x.com");
        add(&mut ctl, "B", "b@x.com");
        ctl.begin_edit(0).unwrap();
        fill(&mut ctl, "A2", "a2@x.com");
        ctl.submit().unwrap();
        ctl.delete_at(1, &mut yes()).unwrap();
    }
    let ctl = file_controller(&file);
    assert_eq!(names(&ctl), vec!["A2"]);
    assert_creating_with_empty_draft(&ctl);
}

#[test]
fn test_clear_all_removes_slot() {
    let file = NamedTempFile::new().unwrap();
    {
        let mut ctl = file_controller(&file);
        add(&mut ctl, "A", "a@x.com");
        ctl.clear_all(&mut yes()).unwrap();
    }
    let db = SlotDb::open(file.path()).unwrap();
    assert!(db.read(DEFAULT_SLOT_KEY).unwrap().is_none());
}

#[test]
fn test_draft_edits_are_not_persisted() {
    let file = NamedTempFile::new().unwrap();
    {
        let mut ctl = file_controller(&file);
        fill(&mut ctl, "A", "a@x.com");
    }
    let db = SlotDb::open(file.path()).unwrap();
    assert!(db.read(DEFAULT_SLOT_KEY).unwrap().is_none());
}

// ─── Reducer in isolation ───────────────────────────────────────────────

#[test]
fn test_reduce_is_pure() {
    let mut store = RecordStore::new();
    let id = store.push(UserRecord::new("A", "a@x.com")).unwrap();
    let state = AppState::new(store, FieldSet::Basic);
    let snapshot = state.clone();

    let t = reduce(&state, Action::Delete(id)).unwrap();
    assert_eq!(t.effect, Effect::Save);
    assert!(t.state.store.is_empty());
    assert_eq!(state, snapshot);

    let t = reduce(&state, Action::ClearAll).unwrap();
    assert_eq!(t.effect, Effect::ClearSlot);

    let t = reduce(&state, Action::SetField(Field::Name, "B".into())).unwrap();
    assert_eq!(t.effect, Effect::None);
    assert_eq!(t.notice, None);
}

#[test]
fn test_submit_for_vanished_edit_target_appends() {
    let mut store = RecordStore::new();
    let id = store.push(UserRecord::new("A", "a@x.com")).unwrap();
    let mut state = AppState::new(store, FieldSet::Basic);
    state.draft.load(id, UserRecord::new("A2", "a2@x.com"));
    state.store.remove(id).unwrap();

    let t = reduce(&state, Action::Submit).unwrap();
    assert!(matches!(t.notice, Some(Notice::Added(_))));
    assert_eq!(t.state.store.len(), 1);
    assert_eq!(t.state.store.get(0).unwrap().record.name, "A2");
}

#[test]
fn test_submit_notice_matches_reducer() {
    let mut ctl = basic();
    fill(&mut ctl, "A", "a@x.com");
    let expected = reduce(ctl.state(), Action::Submit).unwrap();

    let notice = ctl.submit().unwrap();
    assert_eq!(Some(notice), expected.notice);
    assert_eq!(ctl.state(), &expected.state);
}

#[test]
fn test_submit_with_exhausted_ids_is_an_error() {
    let slot = RecordSlot::new(SlotDb::open_in_memory().unwrap(), DEFAULT_SLOT_KEY);
    slot.write_raw(br#"[{"id":18446744073709551614,"name":"A","email":"a@x.com"}]"#)
        .unwrap();
    let mut ctl = Controller::new(slot, FieldSet::Basic);
    fill(&mut ctl, "B", "b@x.com");
    let before = ctl.state().clone();

    assert!(matches!(ctl.submit(), Err(StoreError::IdsExhausted)));
    assert_eq!(ctl.state(), &before);
    assert_eq!(names(&ctl), vec!["A"]);
}

#[test]
fn test_list_rows_mask_passwords() {
    let mut ctl = Controller::open(&UserStoreConfig::in_memory()).unwrap();
    fill(&mut ctl, "A", "a@x.com");
    ctl.set_field(Field::Username, "ann").unwrap();
    ctl.set_field(Field::Password, "hunter2").unwrap();
    ctl.submit().unwrap();

    let rows = ctl.list_rows(false);
    assert_eq!(rows[0].password.as_deref(), Some("********"));
    assert_eq!(
        rows[0].to_string(),
        "[0] A  Email: a@x.com  Username: ann  Password: ********"
    );
    assert_eq!(ctl.list_rows(true)[0].password.as_deref(), Some("hunter2"));
}
