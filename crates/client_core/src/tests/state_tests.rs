use super::*;

fn task(id: &str, text: &str, completed: bool) -> Task {
    Task::new(id, text, completed)
}

fn loaded(tasks: Vec<Task>) -> TodoState {
    let mut state = TodoState::default();
    state.replace_all(tasks);
    state
}

#[test]
fn replace_all_keeps_first_occurrence_of_duplicate_ids() {
    let mut state = TodoState::default();
    let dropped = state.replace_all(vec![
        task("1", "buy milk", false),
        task("2", "wash car", false),
        task("1", "buy milk again", true),
    ]);

    assert_eq!(dropped, 1);
    assert_eq!(
        state.tasks(),
        &[task("1", "buy milk", false), task("2", "wash car", false)]
    );
}

#[test]
fn insert_created_appends_new_ids_and_replaces_known_ones() {
    let mut state = loaded(vec![task("1", "buy milk", false)]);

    assert_eq!(
        state.insert_created(task("2", "wash car", false)),
        Insertion::Appended
    );
    assert_eq!(
        state.insert_created(task("1", "buy bread", false)),
        Insertion::ReplacedExisting
    );
    assert_eq!(
        state.tasks(),
        &[task("1", "buy bread", false), task("2", "wash car", false)]
    );
}

#[test]
fn replace_task_preserves_position() {
    let mut state = loaded(vec![
        task("1", "a", false),
        task("2", "b", false),
        task("3", "c", false),
    ]);

    assert!(state.replace_task(task("2", "b", true)));
    let ids: Vec<&str> = state.tasks().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["1", "2", "3"]);
    assert!(state.tasks()[1].completed);
}

#[test]
fn replace_task_does_not_reinsert_missing_ids() {
    let mut state = loaded(vec![task("1", "a", false)]);

    assert!(!state.replace_task(task("9", "ghost", true)));
    assert_eq!(state.tasks(), &[task("1", "a", false)]);
}

#[test]
fn remove_task_is_a_no_op_for_absent_ids() {
    let mut state = loaded(vec![task("1", "a", false)]);

    assert!(!state.remove_task(&TaskId::from("2")));
    assert!(state.remove_task(&TaskId::from("1")));
    assert!(state.tasks().is_empty());
}

#[test]
fn begin_edit_copies_task_text_into_session_and_draft() {
    let mut state = loaded(vec![task("1", "buy milk", false)]);

    assert!(state.begin_edit(&TaskId::from("1")));
    assert!(state.edit_session().is_active());
    assert_eq!(state.edit_session().target(), Some(&TaskId::from("1")));
    assert_eq!(state.edit_session().draft_text(), "buy milk");
    assert_eq!(state.draft(), "buy milk");
}

#[test]
fn begin_edit_rejects_unknown_task() {
    let mut state = loaded(vec![task("1", "buy milk", false)]);

    assert!(!state.begin_edit(&TaskId::from("2")));
    assert_eq!(state.edit_session(), &EditSession::default());
}

#[test]
fn typing_while_editing_updates_session_draft() {
    let mut state = loaded(vec![task("1", "buy milk", false)]);
    state.begin_edit(&TaskId::from("1"));

    state.set_draft("buy oat milk".to_string());

    assert_eq!(state.draft(), "buy oat milk");
    assert_eq!(state.edit_session().draft_text(), "buy oat milk");
}

#[test]
fn removing_the_edit_target_ends_the_edit() {
    let mut state = loaded(vec![task("1", "a", false), task("2", "b", false)]);
    state.begin_edit(&TaskId::from("1"));

    state.remove_task(&TaskId::from("1"));

    assert!(!state.edit_session().is_active());
    assert_eq!(state.draft(), "");
}

#[test]
fn removing_another_task_keeps_the_edit() {
    let mut state = loaded(vec![task("1", "a", false), task("2", "b", false)]);
    state.begin_edit(&TaskId::from("1"));

    state.remove_task(&TaskId::from("2"));

    assert_eq!(state.edit_session().target(), Some(&TaskId::from("1")));
    assert_eq!(state.draft(), "a");
}

#[test]
fn finish_edit_only_clears_matching_session() {
    let mut state = loaded(vec![task("1", "a", false), task("2", "b", false)]);
    state.begin_edit(&TaskId::from("2"));

    assert!(!state.finish_edit(&TaskId::from("1")));
    assert!(state.edit_session().is_active());

    assert!(state.finish_edit(&TaskId::from("2")));
    assert!(!state.edit_session().is_active());
    assert_eq!(state.draft(), "");
}

#[test]
fn reload_without_edit_target_abandons_the_edit() {
    let mut state = loaded(vec![task("1", "a", false)]);
    state.begin_edit(&TaskId::from("1"));

    state.replace_all(vec![task("2", "b", false)]);

    assert!(!state.edit_session().is_active());
    assert_eq!(state.draft(), "");
}

#[test]
fn snapshot_reflects_current_state() {
    let mut state = loaded(vec![task("1", "a", false)]);
    state.set_draft("draft".to_string());

    let snapshot = state.snapshot();

    assert_eq!(snapshot.tasks, vec![task("1", "a", false)]);
    assert_eq!(snapshot.draft, "draft");
    assert!(!snapshot.edit_session.is_active());
}
