//! Longer undo/redo and debounce sequences

use pagebuilder_editor::{History, HistoryConfig, LayoutEdit};
use pagebuilder_model::component::{ButtonPatch, TextPatch};
use pagebuilder_model::{create_initial_layout, ComponentType, ComponentUpdate, PageLayout};
use std::sync::Arc;
use std::time::{Duration, Instant};

fn set_title(title: String) -> LayoutEdit {
    LayoutEdit::SetTitle { title }
}

#[test]
fn test_history_keeps_last_hundred() {
    let mut history = History::new(Arc::new(create_initial_layout()));

    for i in 1..=130 {
        assert!(history.apply(&set_title(format!("Title {}", i))));
    }

    assert_eq!(history.past().len(), 100);
    // Pre-state of edit 31 is the result of edit 30
    assert_eq!(history.past()[0].title, "Title 30");
    assert_eq!(history.current().title, "Title 130");

    let mut undone = 0;
    while history.undo() {
        undone += 1;
    }
    assert_eq!(undone, 100);
    assert_eq!(history.current().title, "Title 30");
    assert_eq!(history.future().len(), 100);
    assert_eq!(history.future()[0].title, "Title 31");
}

#[test]
fn test_unlimited_capacity() {
    let config = HistoryConfig {
        capacity: 0,
        ..Default::default()
    };
    let mut history = History::with_config(Arc::new(create_initial_layout()), &config);

    for i in 0..150 {
        history.apply(&set_title(format!("Title {}", i)));
    }
    assert_eq!(history.undo_levels(), 150);
}

#[test]
fn test_undo_redo_interleaved_with_edits() {
    let mut history = History::new(Arc::new(create_initial_layout()));
    history.apply(&LayoutEdit::AddSection);
    history.apply(&LayoutEdit::AddSection);
    history.apply(&set_title("Page".to_string()));

    history.undo();
    history.undo();
    assert_eq!(history.current().sections.len(), 2);
    assert_eq!(history.redo_levels(), 2);

    history.redo();
    assert_eq!(history.current().sections.len(), 3);

    // Branching discards the remaining redo
    history.apply(&LayoutEdit::AddSection);
    assert!(!history.can_redo());
    assert_eq!(history.current().sections.len(), 4);
    assert_eq!(history.current().title, "");
}

#[test]
fn test_snapshots_are_unaffected_by_later_edits() {
    let mut history = History::new(Arc::new(create_initial_layout()));
    history.apply(&set_title("First".to_string()));
    let snapshot: PageLayout = (*history.past()[0]).clone();

    history.apply(&LayoutEdit::AddSection);
    history.apply(&set_title("Second".to_string()));

    assert_eq!(*history.past()[0], snapshot);
}

/// Two text components in the first column, returned with their ids
fn two_texts() -> (History, String, String) {
    let mut history = History::new(Arc::new(create_initial_layout()));
    let column_id = history.current().sections[0].rows[0].columns[0].id.clone();
    for _ in 0..2 {
        history.apply(&LayoutEdit::AddComponent {
            column_id: column_id.clone(),
            component_type: ComponentType::Text,
            target_index: None,
        });
    }
    history.clear();

    let column = history.current().find_column(&column_id).unwrap();
    let first = column.components[0].id.clone();
    let second = column.components[1].id.clone();
    (history, first, second)
}

fn text(value: &str) -> ComponentUpdate {
    ComponentUpdate::Text(TextPatch {
        text: Some(value.to_string()),
    })
}

#[test]
fn test_switching_components_starts_new_checkpoint() {
    let (mut history, first, second) = two_texts();
    let start = Instant::now();

    history.update_component_at(&first, &text("a"), start);
    history.update_component_at(&second, &text("b"), start + Duration::from_millis(10));
    history.update_component_at(&first, &text("ab"), start + Duration::from_millis(20));

    assert_eq!(history.undo_levels(), 3);
}

#[test]
fn test_mismatched_update_still_extends_window() {
    let (mut history, first, _) = two_texts();
    let start = Instant::now();

    history.update_component_at(&first, &text("a"), start);

    let wrong_type = ComponentUpdate::Button(ButtonPatch {
        label: Some("Go".to_string()),
        ..Default::default()
    });
    assert!(!history.update_component_at(
        &first,
        &wrong_type,
        start + Duration::from_millis(300)
    ));

    // Within 450ms of the ignored edit, so still the same burst
    history.update_component_at(&first, &text("ab"), start + Duration::from_millis(600));
    assert_eq!(history.undo_levels(), 1);
}

#[test]
fn test_debounced_burst_undoes_in_one_step() {
    let (mut history, first, _) = two_texts();
    let before = Arc::clone(history.current());
    let start = Instant::now();

    for (i, value) in ["H", "He", "Hel", "Hell", "Hello"].iter().enumerate() {
        history.update_component_at(
            &first,
            &text(value),
            start + Duration::from_millis(100 * i as u64),
        );
    }

    assert_eq!(history.undo_levels(), 1);
    assert!(history.undo());
    assert!(Arc::ptr_eq(history.current(), &before));
}
