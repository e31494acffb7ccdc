//! Property-based tests for determinism guarantees

use draftdesk::export::sanitize_file_name;
use draftdesk::tools::ToolRegistry;
use draftdesk::wizard::GenerationSession;
use proptest::prelude::*;

/// Free text for every text-like field of the general meeting tool.
fn general_meeting_inputs() -> impl Strategy<Value = Vec<(String, String)>> {
    let names = [
        "company_name",
        "financial_year",
        "meeting_time",
        "meeting_mode_or_venue",
        "chairperson",
        "company_secretary",
    ];
    proptest::collection::vec("[A-Za-z0-9 ,.&-]{0,24}", names.len()).prop_map(move |values| {
        names
            .iter()
            .map(|n| n.to_string())
            .zip(values)
            .collect()
    })
}

proptest! {
    #[test]
    fn test_assembly_is_pure(inputs in general_meeting_inputs(), minutes in any::<bool>()) {
        let registry = ToolRegistry::builtin().unwrap();
        let tool = registry.get("general-meeting-assistant").unwrap();
        let mut session = GenerationSession::new(tool.clone());
        for (name, value) in &inputs {
            session.set_input(name, value).unwrap();
        }
        if minutes {
            session.set_input("document_type", "Minutes").unwrap();
        }

        let first = tool.assemble(session.fields());
        let second = tool.assemble(session.fields());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_sanitized_names_are_safe(raw in ".{0,64}") {
        let name = sanitize_file_name(&raw);
        prop_assert!(!name.is_empty());
        prop_assert!(name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-'));
        prop_assert!(!name.starts_with('_') && !name.ends_with('_'));
        prop_assert_eq!(sanitize_file_name(&name), name.clone());
    }
}
