//! End-to-end render loops against the demo providers.

mod common;

use common::*;
use remote_ui::component::{InputEdit, RenderNode};
use remote_ui::demo::{button_provider, input_provider, tabs_provider};
use remote_ui::region::RegionPhase;
use remote_ui::state::{StateMap, StateValue};

// -- Tabs ---------------------------------------------------------------------

#[tokio::test]
async fn tabs_start_on_first_tab() {
    let region = mounted(tabs_provider()).await;

    assert!(region.state().is_empty());
    assert_eq!(region.phase(), RegionPhase::Rendered);
    match region.view().find(&first_control(&region)) {
        Some(RenderNode::Tabs {
            titles, selected, ..
        }) => {
            assert_eq!(titles, &vec!["First tab".to_string(), "Second tab".to_string()]);
            assert_eq!(*selected, 0);
        }
        other => panic!("expected tabs, got {:?}", other),
    }
    assert_eq!(texts(&region), vec!["Tab number 1"]);
}

#[tokio::test]
async fn selecting_a_tab_refetches_with_bound_state() {
    let mut region = mounted(tabs_provider()).await;
    let tabs = first_control(&region);

    assert!(region.select_tab(&tabs, 1));
    assert_eq!(
        *region.state(),
        StateMap::from([("selectedTab", StateValue::Number(1.0))])
    );
    region.settle().await;

    assert_eq!(texts(&region), vec!["Tab number 2"]);
    assert_eq!(region.renders(), 2);
    assert!(matches!(
        region.view().find(&tabs),
        Some(RenderNode::Tabs { selected: 1, .. })
    ));
}

#[tokio::test]
async fn out_of_range_tab_is_ignored() {
    let mut region = mounted(tabs_provider()).await;
    let tabs = first_control(&region);

    assert!(!region.select_tab(&tabs, 5));
    assert!(region.state().is_empty());
    assert_eq!(region.engine().in_flight(), 0);
}

// -- Button -------------------------------------------------------------------

#[tokio::test]
async fn counter_starts_at_zero() {
    let region = mounted(button_provider()).await;
    assert_eq!(texts(&region), vec!["Presses: 0"]);
}

#[tokio::test]
async fn each_press_increments_through_the_handler() {
    let mut region = mounted(button_provider()).await;
    let button = first_control(&region);

    assert!(region.press(&button));
    region.settle().await;
    assert_eq!(region.state().value("count"), StateValue::Number(1.0));
    assert_eq!(texts(&region), vec!["Presses: 1"]);

    assert!(region.press(&button));
    region.settle().await;
    assert_eq!(region.state().value("count"), StateValue::Number(2.0));
    assert_eq!(texts(&region), vec!["Presses: 2"]);
}

// -- Text input ---------------------------------------------------------------

#[tokio::test]
async fn submitted_text_is_echoed() {
    let mut region = mounted(input_provider()).await;
    let input = first_control(&region);
    assert_eq!(texts(&region), vec!["You entered: "]);

    for ch in "hello".chars() {
        assert!(region.edit_input(&input, InputEdit::Insert(ch)));
    }
    // Typing alone does not touch the store.
    assert!(region.state().is_empty());

    assert!(region.submit_input(&input));
    region.settle().await;

    assert_eq!(
        *region.state(),
        StateMap::from([("value", StateValue::from("hello"))])
    );
    assert_eq!(texts(&region), vec!["You entered: hello"]);
    assert!(matches!(
        region.view().find(&input),
        Some(RenderNode::TextInput { draft, .. }) if draft == "hello"
    ));
}

#[tokio::test]
async fn draft_survives_refetch() {
    let mut region = mounted(input_provider()).await;
    let input = first_control(&region);

    region.edit_input(&input, InputEdit::Insert('x'));
    region.refresh();
    region.settle().await;

    assert!(matches!(
        region.view().find(&input),
        Some(RenderNode::TextInput { draft, .. }) if draft == "x"
    ));
}
