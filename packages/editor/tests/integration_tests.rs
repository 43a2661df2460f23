//! Integration tests for editor crate

use pagebuilder_editor::{
    DirectoryStorage, EditSession, HistoryConfig, LayoutEdit, LayoutRepository, MemoryStorage,
    PreviewPage, Storage, LAYOUT_STORAGE_KEY,
};
use pagebuilder_model::{ButtonSize, ButtonVariant, ComponentBody, ComponentType};

const BROKEN_LAYOUT: &str = r##"{
    "title": "Broken",
    "sections": [{
        "id": "s1",
        "name": "Hero",
        "rows": [{
            "id": "r1",
            "columns": [{
                "id": "c1",
                "span": 99,
                "components": [{ "id": "k1", "type": "button", "label": "Go", "url": "#" }]
            }]
        }]
    }]
}"##;

#[test]
fn test_load_broken_stored_layout() {
    let repository = LayoutRepository::new(MemoryStorage::new());
    repository
        .storage()
        .set_item(LAYOUT_STORAGE_KEY, BROKEN_LAYOUT)
        .unwrap();

    let outcome = repository.load_layout();
    assert!(outcome.repaired);
    assert!(!outcome.malformed);

    let layout = outcome.layout.unwrap();
    assert_eq!(layout.title, "Broken");

    let column = layout.find_column("c1").unwrap();
    assert_eq!(column.span, 12);
    assert_eq!(
        column.components[0].body,
        ComponentBody::Button {
            label: "Go".to_string(),
            url: "#".to_string(),
            variant: ButtonVariant::Primary,
            size: ButtonSize::Md,
        }
    );
}

#[test]
fn test_add_components_with_negative_index() {
    let repository = LayoutRepository::new(MemoryStorage::new());
    let mut session = EditSession::new(repository, &HistoryConfig::default());
    let column_id = session.layout().sections[0].rows[0].columns[0].id.clone();

    session.apply(&LayoutEdit::AddComponent {
        column_id: column_id.clone(),
        component_type: ComponentType::Text,
        target_index: None,
    });
    session.apply(&LayoutEdit::AddComponent {
        column_id: column_id.clone(),
        component_type: ComponentType::Button,
        target_index: Some(-10),
    });

    let column = session.layout().find_column(&column_id).unwrap();
    assert_eq!(column.components.len(), 2);
    assert_eq!(column.components[0].component_type(), ComponentType::Button);
    assert_eq!(column.components[1].component_type(), ComponentType::Text);
}

#[test]
fn test_edit_save_preview_workflow() {
    let dir = tempfile::tempdir().unwrap();
    let storage = DirectoryStorage::new(dir.path());
    let mut session = EditSession::new(LayoutRepository::new(storage), &HistoryConfig::default());

    session.load_travel_template().unwrap();
    session.apply(&LayoutEdit::SetTitle {
        title: "Summer Deals".to_string(),
    });
    assert!(session.save());
    assert!(dir.path().join("page-builder-layout.json").exists());

    // A separate reader sees the saved page
    let reader = LayoutRepository::new(DirectoryStorage::new(dir.path()));
    let page = PreviewPage::from(reader.load_layout());

    assert_eq!(page.notice(), None);
    assert!(page.render().starts_with("Summer Deals\n"));
}

#[test]
fn test_preview_of_malformed_and_missing_store() {
    let dir = tempfile::tempdir().unwrap();
    let repository = LayoutRepository::new(DirectoryStorage::new(dir.path()));
    assert_eq!(
        PreviewPage::from(repository.load_layout()),
        PreviewPage::NothingStored
    );

    std::fs::write(dir.path().join("page-builder-layout.json"), "[1, 2, 3]").unwrap();
    assert_eq!(
        PreviewPage::from(repository.load_layout()),
        PreviewPage::Invalid
    );
}

#[test]
fn test_preview_of_repaired_store() {
    let repository = LayoutRepository::new(MemoryStorage::new());
    repository
        .storage()
        .set_item(LAYOUT_STORAGE_KEY, BROKEN_LAYOUT)
        .unwrap();

    let page = PreviewPage::from(repository.load_layout());
    assert!(page.notice().is_some());
    assert!(page.render().contains("- button: [Go](#) primary/md"));
}

#[test]
fn test_session_round_trip_through_storage() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;

    let mut writer = EditSession::new(
        LayoutRepository::new(DirectoryStorage::new(dir.path())),
        &HistoryConfig::default(),
    );
    writer.apply(&LayoutEdit::AddSection);
    assert!(writer.save());

    let mut reader = EditSession::new(
        LayoutRepository::new(DirectoryStorage::new(dir.path())),
        &HistoryConfig::default(),
    );
    let outcome = reader.load();

    assert!(!outcome.repaired);
    assert_eq!(reader.layout().as_ref(), writer.layout().as_ref());
    Ok(())
}
