//! Built-in tool catalogue

use draftdesk::tools::ToolRegistry;
use draftdesk::wizard::GenerationSession;

#[test]
fn test_builtin_catalogue_ids_and_categories() {
    let registry = ToolRegistry::builtin().unwrap();
    let ids: Vec<&str> = registry.list().iter().map(|t| t.id()).collect();
    assert_eq!(
        ids,
        vec![
            "forms",
            "research-assistant",
            "capital-raising-advisory-agreement",
            "board-meeting-assistant",
            "general-meeting-assistant",
            "resolution-assistant",
        ]
    );

    let meetings: Vec<&str> = registry
        .list_by_category("meetings")
        .iter()
        .map(|t| t.id())
        .collect();
    assert_eq!(
        meetings,
        vec!["board-meeting-assistant", "general-meeting-assistant"]
    );
}

#[test]
fn test_every_schema_validates_and_defaults_assemble() {
    let registry = ToolRegistry::builtin().unwrap();
    for tool in registry.list() {
        assert!(tool.schema().validate().is_ok(), "{} schema invalid", tool.id());
        let defaults = tool.schema().default_fields();
        let plan = tool.assemble(&defaults);
        assert!(plan.part_count() >= 1);
        assert_eq!(plan.instructions(), tool.assemble(&defaults).instructions());
    }
}

#[test]
fn test_general_meeting_minutes_require_attendees() {
    let registry = ToolRegistry::builtin().unwrap();
    let mut session = GenerationSession::new(registry.get("general-meeting-assistant").unwrap());
    let schema = session.tool().schema().clone();
    let attendees = schema.field("attendees_list").unwrap();

    assert!(!schema.is_required(attendees, session.fields()));
    session.set_input("document_type", "Minutes").unwrap();
    assert!(schema.is_required(attendees, session.fields()));
}
