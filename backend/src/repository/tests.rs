//! Repository Integration Tests
//!
//! Tests for the repositories and commands with an in-memory SQLite database.

#[cfg(test)]
mod tests {
    use crate::commands::{self, CreateEntryRequest, OrderAssignment, ReorderRequest, UpdateEntryRequest};
    use crate::domain::{
        Attachment, ChecklistEntry, ChecklistTemplate, DomainError, EntryBody, EntryDraft, EntryPatch,
        ResponseType,
    };
    use crate::repository::{EntryPositioningOperations, Repository, TemplateTagOperations};
    use crate::AppState;

    fn setup_test_db() -> AppState {
        AppState::in_memory().expect("Failed to init test DB")
    }

    async fn create_template(state: &AppState, title: &str) -> ChecklistTemplate {
        commands::create_template(state, title).await.expect("Failed to create template")
    }

    async fn add(state: &AppState, template_id: u32, draft: EntryDraft) -> ChecklistEntry {
        commands::create_entry(state, CreateEntryRequest { template_id, draft, order_no: None })
            .await
            .expect("Failed to create entry")
    }

    fn order_of(entries: &[ChecklistEntry]) -> Vec<(u32, i32)> {
        entries.iter().map(|e| (e.id, e.order_no)).collect()
    }

    #[tokio::test]
    async fn test_append_assigns_increasing_order_numbers() {
        let state = setup_test_db();
        let template = create_template(&state, "Forklift daily").await;

        let a = add(&state, template.id, EntryDraft::item("Horn", ResponseType::Checkbox)).await;
        let b = add(&state, template.id, EntryDraft::section("Engine Checks")).await;
        let c = add(&state, template.id, EntryDraft::item("Oil", ResponseType::PassFailNa)).await;

        assert_eq!((a.order_no, b.order_no, c.order_no), (1, 2, 3));
        assert!(a.id > 0);

        let listed = commands::list_entries(&state, template.id).await.unwrap();
        assert_eq!(order_of(&listed), vec![(a.id, 1), (b.id, 2), (c.id, 3)]);
    }

    #[tokio::test]
    async fn test_section_break_persists_as_tagged_variant() {
        let state = setup_test_db();
        let template = create_template(&state, "Van").await;
        let section = add(&state, template.id, EntryDraft::section("Cab")).await;

        let found = state.entries.find_by_id(section.id).await.unwrap().unwrap();
        assert_eq!(found.body, EntryBody::SectionBreak { details: "Cab".to_string() });
    }

    #[tokio::test]
    async fn test_unknown_stored_code_reads_as_unknown() {
        let state = setup_test_db();
        let template = create_template(&state, "Legacy").await;
        {
            let conn = state.db_state.connection();
            let conn = conn.lock().await;
            conn.execute(
                "INSERT INTO entries (template_id, details, response_type, mandatory, order_no) VALUES (?, 'Old', 42, 0, 1)",
                rusqlite::params![template.id],
            )
            .unwrap();
        }

        let listed = commands::list_entries(&state, template.id).await.unwrap();
        assert!(matches!(
            listed[0].body,
            EntryBody::Item { response_type: ResponseType::Unknown(42), .. }
        ));
    }

    #[tokio::test]
    async fn test_attachment_round_trip() {
        let state = setup_test_db();
        let template = create_template(&state, "Boiler").await;
        let draft = EntryDraft::item("Service sheet", ResponseType::Image).with_attachment(Attachment {
            file_name: "sheet.pdf".to_string(),
            file_size: 2048,
        });
        let created = add(&state, template.id, draft).await;

        let found = state.entries.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn test_update_never_changes_order_number() {
        let state = setup_test_db();
        let template = create_template(&state, "Scaffold").await;
        add(&state, template.id, EntryDraft::item("Base plates", ResponseType::Checkbox)).await;
        let b = add(&state, template.id, EntryDraft::item("Ties", ResponseType::Checkbox)).await;

        let updated = commands::update_entry(
            &state,
            UpdateEntryRequest {
                id: b.id,
                patch: EntryPatch {
                    details: Some("Ties every 4m".to_string()),
                    mandatory: Some(true),
                    ..Default::default()
                },
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.order_no, 2);
        assert_eq!(updated.details(), "Ties every 4m");
        assert!(matches!(updated.body, EntryBody::Item { mandatory: true, .. }));
    }

    #[tokio::test]
    async fn test_update_rejects_invalid_patch_without_writing() {
        let state = setup_test_db();
        let template = create_template(&state, "Ladder").await;
        let a = add(&state, template.id, EntryDraft::item("Feet", ResponseType::Checkbox)).await;

        let err = commands::update_entry(
            &state,
            UpdateEntryRequest { id: a.id, patch: EntryPatch::details("  ") },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, DomainError::ValidationFailed(_)));

        let found = state.entries.find_by_id(a.id).await.unwrap().unwrap();
        assert_eq!(found.details(), "Feet");
    }

    #[tokio::test]
    async fn test_delete_leaves_gap() {
        let state = setup_test_db();
        let template = create_template(&state, "Crane").await;
        let a = add(&state, template.id, EntryDraft::item("Hook", ResponseType::Checkbox)).await;
        let b = add(&state, template.id, EntryDraft::item("Rope", ResponseType::Checkbox)).await;
        let c = add(&state, template.id, EntryDraft::item("Brake", ResponseType::Checkbox)).await;

        commands::delete_entry(&state, b.id).await.unwrap();

        let listed = commands::list_entries(&state, template.id).await.unwrap();
        assert_eq!(order_of(&listed), vec![(a.id, 1), (c.id, 3)]);
        assert_eq!(state.entries.next_order_no(template.id).await.unwrap(), 4);

        let err = commands::delete_entry(&state, b.id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_reorder_batch_renumbers() {
        let state = setup_test_db();
        let template = create_template(&state, "Truck").await;
        let a = add(&state, template.id, EntryDraft::item("A", ResponseType::Checkbox)).await;
        let b = add(&state, template.id, EntryDraft::item("B", ResponseType::Checkbox)).await;
        let c = add(&state, template.id, EntryDraft::item("C", ResponseType::Checkbox)).await;

        commands::reorder_entries(&state, ReorderRequest::sequential(template.id, &[c.id, a.id, b.id]))
            .await
            .unwrap();

        let listed = commands::list_entries(&state, template.id).await.unwrap();
        assert_eq!(order_of(&listed), vec![(c.id, 1), (a.id, 2), (b.id, 3)]);
    }

    #[tokio::test]
    async fn test_reorder_with_stale_id_set_is_a_conflict() {
        let state = setup_test_db();
        let template = create_template(&state, "Pump").await;
        let a = add(&state, template.id, EntryDraft::item("A", ResponseType::Checkbox)).await;
        let b = add(&state, template.id, EntryDraft::item("B", ResponseType::Checkbox)).await;
        let c = add(&state, template.id, EntryDraft::item("C", ResponseType::Checkbox)).await;

        // Someone else deleted C; our reorder still names it
        commands::delete_entry(&state, c.id).await.unwrap();
        let err = commands::reorder_entries(&state, ReorderRequest::sequential(template.id, &[c.id, b.id, a.id]))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::ConflictDuringReorder(_)));

        // Nothing was written
        let listed = commands::list_entries(&state, template.id).await.unwrap();
        assert_eq!(order_of(&listed), vec![(a.id, 1), (b.id, 2)]);
    }

    #[tokio::test]
    async fn test_reorder_rejects_non_dense_numbers() {
        let state = setup_test_db();
        let template = create_template(&state, "Lift").await;
        let a = add(&state, template.id, EntryDraft::item("A", ResponseType::Checkbox)).await;
        let b = add(&state, template.id, EntryDraft::item("B", ResponseType::Checkbox)).await;

        let request = ReorderRequest {
            template_id: template.id,
            items: vec![
                OrderAssignment { id: a.id, order_no: 1 },
                OrderAssignment { id: b.id, order_no: 5 },
            ],
        };
        let err = commands::reorder_entries(&state, request).await.unwrap_err();
        assert!(matches!(err, DomainError::ValidationFailed(_)));
    }

    #[tokio::test]
    async fn test_reorder_unknown_template() {
        let state = setup_test_db();
        let err = commands::reorder_entries(&state, ReorderRequest::sequential(99, &[]))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_create_entry_validation_writes_nothing() {
        let state = setup_test_db();
        let template = create_template(&state, "Generator").await;

        let mut draft = EntryDraft::item("Fuel", ResponseType::Checkbox);
        draft.response_type = None;
        let err = commands::create_entry(
            &state,
            CreateEntryRequest { template_id: template.id, draft, order_no: None },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, DomainError::ValidationFailed(_)));

        let err = commands::create_entry(
            &state,
            CreateEntryRequest { template_id: 999, draft: EntryDraft::section("X"), order_no: None },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));

        assert!(commands::list_entries(&state, template.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_entries_unknown_template() {
        let state = setup_test_db();
        let err = commands::list_entries(&state, 12).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_template_cascades() {
        let state = setup_test_db();
        let template = create_template(&state, "Excavator").await;
        let other = create_template(&state, "Dumper").await;
        add(&state, template.id, EntryDraft::item("Tracks", ResponseType::Checkbox)).await;
        let kept = add(&state, other.id, EntryDraft::item("Skip", ResponseType::Checkbox)).await;
        let tag = commands::create_tag(&state, "Plant", None).await.unwrap();
        commands::assign_tag(&state, template.id, tag.id).await.unwrap();

        commands::delete_template(&state, template.id).await.unwrap();

        let remaining = state.entries.list().await.unwrap();
        assert_eq!(order_of(&remaining), vec![(kept.id, 1)]);
        assert!(commands::get_templates_with_tag(&state, tag.id).await.unwrap().is_empty());
        assert!(commands::get_tag(&state, tag.id).await.unwrap().is_some());

        let err = commands::load_template(&state, template.id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_load_template_includes_entries_and_tags() {
        let state = setup_test_db();
        let template = create_template(&state, "Fire alarm").await;
        add(&state, template.id, EntryDraft::item("Panel", ResponseType::PassFailNa)).await;
        let safety = commands::create_tag(&state, "safety", None).await.unwrap();
        let annual = commands::create_tag(&state, "Annual", Some("#00AA00".to_string())).await.unwrap();
        commands::assign_tag(&state, template.id, safety.id).await.unwrap();
        commands::assign_tag(&state, template.id, annual.id).await.unwrap();
        // Assigning twice is harmless
        commands::assign_tag(&state, template.id, annual.id).await.unwrap();

        let detail = commands::load_template(&state, template.id).await.unwrap();
        assert_eq!(detail.template.title, "Fire alarm");
        assert_eq!(detail.entries.len(), 1);
        let names: Vec<&str> = detail.tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Annual", "safety"]);
    }

    #[tokio::test]
    async fn test_delete_tag_keeps_template() {
        let state = setup_test_db();
        let template = create_template(&state, "Gas").await;
        let tag = commands::create_tag(&state, "Gas Safe", None).await.unwrap();
        commands::assign_tag(&state, template.id, tag.id).await.unwrap();

        commands::delete_tag(&state, tag.id).await.unwrap();

        assert!(state.templates.exists(template.id).await.unwrap());
        assert!(state.tags.get_tags_for_template(template.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unassign_tag() {
        let state = setup_test_db();
        let template = create_template(&state, "Roof").await;
        let tag = commands::ensure_tag(&state, "Height").await.unwrap();
        assert_eq!(commands::ensure_tag(&state, "Height").await.unwrap().id, tag.id);

        commands::assign_tag(&state, template.id, tag.id).await.unwrap();
        commands::unassign_tag(&state, template.id, tag.id).await.unwrap();

        assert!(commands::get_template_tags(&state, template.id).await.unwrap().is_empty());
        assert!(commands::get_tag(&state, tag.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_duplicate_tag_name() {
        let state = setup_test_db();
        commands::create_tag(&state, "Electrical", None).await.unwrap();
        let err = commands::create_tag(&state, "Electrical", None).await.unwrap_err();
        assert!(matches!(err, DomainError::ValidationFailed(_)));
    }

    #[tokio::test]
    async fn test_assign_missing_tag() {
        let state = setup_test_db();
        let template = create_template(&state, "Lighting").await;
        let err = commands::assign_tag(&state, template.id, 77).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_rename_and_search_templates() {
        let state = setup_test_db();
        let template = create_template(&state, "Forklift").await;
        create_template(&state, "Van weekly").await;

        let renamed = commands::rename_template(&state, template.id, "Forklift weekly").await.unwrap();
        assert_eq!(renamed.title, "Forklift weekly");

        let found = commands::search_templates(&state, "weekly").await.unwrap();
        let titles: Vec<&str> = found.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Forklift weekly", "Van weekly"]);

        let err = commands::rename_template(&state, template.id, "").await.unwrap_err();
        assert!(matches!(err, DomainError::ValidationFailed(_)));
        assert_eq!(commands::list_templates(&state).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_require_reports_kind() {
        let state = setup_test_db();
        let template = create_template(&state, "Crane").await;
        assert_eq!(state.templates.require(template.id).await.unwrap().title, "Crane");

        let err = state.entries.require(404).await.unwrap_err();
        assert_eq!(err, DomainError::NotFound("Entry 404 not found".to_string()));
        let err = commands::update_entry(&state, UpdateEntryRequest { id: 404, patch: EntryPatch::details("x") })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_tags_ignores_case() {
        let state = setup_test_db();
        commands::create_tag(&state, "brakes", None).await.unwrap();
        commands::create_tag(&state, "Airbags", None).await.unwrap();
        commands::create_tag(&state, "Cab", None).await.unwrap();

        let names: Vec<String> = commands::list_tags(&state).await.unwrap().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["Airbags", "brakes", "Cab"]);
    }

    #[tokio::test]
    async fn test_update_tag_rename_and_color() {
        let state = setup_test_db();
        let tag = commands::create_tag(&state, "Safty", Some("#FF0000".to_string())).await.unwrap();

        let renamed = commands::update_tag(&state, tag.id, Some("Safety"), None).await.unwrap();
        assert_eq!(renamed.name, "Safety");
        assert_eq!(renamed.color.as_deref(), Some("#FF0000"));

        let cleared = commands::update_tag(&state, tag.id, None, Some(None)).await.unwrap();
        assert_eq!(cleared.name, "Safety");
        assert!(cleared.color.is_none());
        assert_eq!(commands::get_tag(&state, tag.id).await.unwrap(), Some(cleared));

        let err = commands::update_tag(&state, 999, Some("Other"), None).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_tag_rejects_duplicate_name() {
        let state = setup_test_db();
        commands::create_tag(&state, "Electrical", None).await.unwrap();
        let tyres = commands::create_tag(&state, "Tyres", None).await.unwrap();

        let err = commands::update_tag(&state, tyres.id, Some("electrical"), None).await.unwrap_err();
        assert!(matches!(err, DomainError::ValidationFailed(_)));
        assert_eq!(commands::get_tag(&state, tyres.id).await.unwrap().unwrap().name, "Tyres");
    }

    #[tokio::test]
    async fn test_tag_names_match_ignoring_case() {
        let state = setup_test_db();
        let safety = commands::create_tag(&state, "Safety", None).await.unwrap();

        let found = commands::ensure_tag(&state, "safety").await.unwrap();
        assert_eq!(found.id, safety.id);
        assert_eq!(commands::list_tags(&state).await.unwrap().len(), 1);

        let err = commands::create_tag(&state, "SAFETY", None).await.unwrap_err();
        assert!(matches!(err, DomainError::ValidationFailed(_)));
    }
}
