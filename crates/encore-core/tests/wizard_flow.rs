//! End-to-end wizard flows, plus property tests over random operation
//! sequences.

use encore_core::model::canned;
use encore_core::{
    Domain, LeavePolicy, Navigation, Page, PreferenceKey, PreferenceSet, Router, Wizard,
    WizardState, MAX_FAVORITES,
};
use proptest::prelude::*;

// ===== Strategies =====

/// Titles: arbitrary printable text, whitespace-only text, or a real title
/// with padding.
fn arbitrary_title() -> impl Strategy<Value = String> {
    prop_oneof![
        "\\PC{0,12}",
        "[ \t]{0,4}",
        "[ ]{0,2}[A-Za-z][A-Za-z ]{0,10}[ ]{0,2}",
    ]
}

#[derive(Debug, Clone)]
enum Op {
    Add(String),
    Remove(usize),
    Commit(String),
    Advance,
    SetGenre(String),
    Submit,
    Succeed,
    Fail,
    Back,
    Draft(String),
}

fn list_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        2 => arbitrary_title().prop_map(Op::Add),
        1 => (0usize..7).prop_map(Op::Remove),
        1 => arbitrary_title().prop_map(Op::Commit),
    ]
}

fn any_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        arbitrary_title().prop_map(Op::Add),
        (0usize..7).prop_map(Op::Remove),
        arbitrary_title().prop_map(Op::Commit),
        Just(Op::Advance),
        "[a-z-]{0,12}".prop_map(Op::SetGenre),
        Just(Op::Submit),
        Just(Op::Succeed),
        Just(Op::Fail),
        Just(Op::Back),
        arbitrary_title().prop_map(Op::Draft),
    ]
}

/// Apply `op`, ignoring rejected transitions. `last_ticket` tracks the most
/// recent submission so results can be delivered to it.
fn apply(wizard: &mut Wizard, op: Op, last_ticket: &mut Option<u64>) {
    match op {
        Op::Add(title) => {
            wizard.add(&title).ok();
        }
        Op::Remove(index) => {
            wizard.remove(index);
        }
        Op::Commit(title) => {
            wizard.set_draft(title);
            wizard.commit_draft().ok();
        }
        Op::Advance => {
            wizard.advance().ok();
        }
        Op::SetGenre(genre) => wizard.set_field(PreferenceKey::Genre, genre),
        Op::Submit => {
            if let Ok(submission) = wizard.begin_submit() {
                *last_ticket = Some(submission.ticket);
            }
        }
        Op::Succeed => {
            if let Some(ticket) = *last_ticket {
                wizard.finish_submit::<String>(ticket, Ok(canned(Domain::Book)));
            }
        }
        Op::Fail => {
            if let Some(ticket) = *last_ticket {
                wizard.finish_submit(ticket, Err("connection refused"));
            }
        }
        Op::Back => {
            wizard.back().ok();
        }
        Op::Draft(text) => wizard.set_draft(text),
    }
}

// ===== Property Tests =====

proptest! {
    /// Property: favorites never exceed the maximum and never hold blank or
    /// untrimmed titles, whatever is typed.
    #[test]
    fn favorites_stay_bounded_and_non_blank(
        ops in prop::collection::vec(list_op(), 1..200)
    ) {
        let mut wizard = Wizard::new(Domain::Movie);
        let mut last_ticket = None;

        for op in ops {
            apply(&mut wizard, op, &mut last_ticket);

            let favorites = wizard.favorites();
            prop_assert!(favorites.len() <= MAX_FAVORITES);
            prop_assert!(
                favorites.iter().all(|t| !t.is_empty() && t.trim() == t),
                "bad entry in {:?}",
                favorites
            );
        }
    }

    /// Property: whitespace-only input is always rejected.
    #[test]
    fn blank_titles_never_added(blank in "[ \t\n]{0,6}") {
        let mut wizard = Wizard::new(Domain::Anime);
        prop_assert!(wizard.add(&blank).is_err());
        prop_assert!(wizard.favorites().is_empty());
    }

    /// Property: reset from any reachable state restores the initial state.
    #[test]
    fn reset_restores_initial_state(
        ops in prop::collection::vec(any_op(), 0..40)
    ) {
        let mut wizard = Wizard::new(Domain::Book);
        let mut last_ticket = None;
        for op in ops {
            apply(&mut wizard, op, &mut last_ticket);
        }

        wizard.reset();

        prop_assert!(wizard.favorites().is_empty());
        prop_assert_eq!(wizard.preferences(), &PreferenceSet::default());
        prop_assert_eq!(wizard.state(), &WizardState::CollectingTitles);
        prop_assert_eq!(wizard.step(), 1);
        prop_assert!(wizard.recommendations().is_empty());
    }
}

#[test]
fn test_full_capacity_scenario() {
    let mut wizard = Wizard::new(Domain::Movie);
    for title in ["Alien", "Heat", "Ran", "Up", "Jaws"] {
        wizard.add(title).unwrap();
    }
    assert!(wizard.add("Inception").is_err());

    wizard.remove(2);
    wizard.add("Inception").unwrap();

    let titles: Vec<_> = wizard.favorites().iter().collect();
    assert_eq!(titles, ["Alien", "Heat", "Up", "Jaws", "Inception"]);
}

#[test]
fn test_complete_flow_through_router() {
    let mut router = Router::new(LeavePolicy::Confirm);
    assert_eq!(router.select(Domain::Anime), Navigation::Moved);

    let wizard = router.active_wizard_mut().unwrap();
    wizard.set_draft("Mushishi");
    wizard.commit_draft().unwrap();
    wizard.advance().unwrap();
    wizard.set_field(PreferenceKey::Mood, "short");
    wizard.set_field(PreferenceKey::Name, "Ada");

    let submission = wizard.begin_submit().unwrap();
    let body = serde_json::to_value(&submission.request).unwrap();
    assert_eq!(body["type"], "anime");
    assert_eq!(body["favorites"][0], "Mushishi");
    assert_eq!(body["preferences"]["mood"], "short");
    assert!(body["preferences"].get("name").is_none());

    wizard.finish_submit::<String>(submission.ticket, Ok(canned(Domain::Anime)));
    assert_eq!(wizard.recommendations().len(), 5);

    // Results count as progress, so leaving asks first.
    assert!(matches!(
        router.logo_click(),
        Navigation::NeedsConfirmation { .. }
    ));
    assert_eq!(router.confirm_leave(), Some(Page::Landing));
    assert!(router.wizard(Domain::Anime).recommendations().is_empty());
}

#[test]
fn test_result_for_preserved_wizard_applies_after_leaving() {
    let mut router = Router::new(LeavePolicy::Preserve);
    router.select(Domain::Movie);
    let wizard = router.active_wizard_mut().unwrap();
    wizard.add("Heat").unwrap();
    wizard.advance().unwrap();
    let submission = wizard.begin_submit().unwrap();

    router.logo_click();
    let applied = router
        .wizard_mut(Domain::Movie)
        .finish_submit::<String>(submission.ticket, Ok(canned(Domain::Movie)));

    assert_eq!(applied, encore_core::Applied::Shown);
    router.select(Domain::Movie);
    assert_eq!(router.active_wizard().unwrap().step(), 3);
}
