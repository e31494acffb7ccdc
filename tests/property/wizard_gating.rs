//! Property-based tests for step gating

use draftdesk::tools::ToolRegistry;
use draftdesk::wizard::{GenerationSession, SessionState};
use proptest::prelude::*;

proptest! {
    /// Blanking any required field on the first step keeps the wizard there.
    #[test]
    fn test_advance_never_skips_empty_required_field(
        blank in prop::sample::select(vec![
            "company_name",
            "date_time",
            "agenda_items",
            "directors_present",
            "chairperson",
            "company_secretary",
        ]),
        filler in "[A-Za-z][A-Za-z ]{0,16}",
        whitespace in "[ \t]{0,4}",
    ) {
        let registry = ToolRegistry::builtin().unwrap();
        let mut session = GenerationSession::new(registry.get("board-meeting-assistant").unwrap());
        for name in [
            "company_name",
            "date_time",
            "agenda_items",
            "directors_present",
            "chairperson",
            "company_secretary",
        ] {
            let value = if name == blank { whitespace.as_str() } else { filler.as_str() };
            session.set_input(name, value).unwrap();
        }

        prop_assert!(session.advance().is_err());
        prop_assert_eq!(session.state(), &SessionState::Collecting { step: 0 });
        prop_assert_eq!(session.missing_fields().len(), 1);
    }
}
