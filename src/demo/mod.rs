//! Demo providers: a tab switcher, a press counter and a text echo.
//!
//! Trees are built as JSON, the same shape a remote backend would send,
//! including `false` in place of conditionally omitted children.

mod latency;

pub use latency::{with_latency, Latency};

use std::sync::Arc;

use serde_json::{json, Value};

use crate::config::ScreenChoice;
use crate::provider::{handler_fn, HandlerTable, JsonSource, Provider};
use crate::state::{StateMap, StateValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Tabs,
    Button,
    Input,
}

impl Screen {
    pub const ALL: [Screen; 3] = [Screen::Tabs, Screen::Button, Screen::Input];

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Tabs => "Tabs example",
            Screen::Button => "Button example",
            Screen::Input => "Input example",
        }
    }

    pub fn provider(&self) -> Provider {
        match self {
            Screen::Tabs => tabs_provider(),
            Screen::Button => button_provider(),
            Screen::Input => input_provider(),
        }
    }
}

impl ScreenChoice {
    pub fn screens(&self) -> Vec<Screen> {
        match self {
            ScreenChoice::Tabs => vec![Screen::Tabs],
            ScreenChoice::Button => vec![Screen::Button],
            ScreenChoice::Input => vec![Screen::Input],
            ScreenChoice::All => Screen::ALL.to_vec(),
        }
    }
}

/// `value` when `cond` holds, otherwise a falsy slot.
fn when(cond: bool, value: Value) -> Value {
    if cond {
        value
    } else {
        Value::Bool(false)
    }
}

/// `state[key] || fallback`, rendered as text.
fn text_or(state: &StateMap, key: &str, fallback: &str) -> String {
    match state.get(key) {
        Some(value) if value.is_truthy() => value.to_string(),
        _ => fallback.to_string(),
    }
}

fn number_or_zero(value: &StateValue) -> f64 {
    if value.is_truthy() {
        value.as_number().unwrap_or(0.0)
    } else {
        0.0
    }
}

pub fn tabs_provider() -> Provider {
    let source = JsonSource::new(|state: &StateMap| {
        let selected = number_or_zero(&state.value("selectedTab"));
        tracing::debug!(selected, "Tabs screen requested");
        json!({
            "ui": {
                "com": "vstack",
                "items": [
                    {
                        "com": "tabs",
                        "tabs": ["First tab", "Second tab"],
                        "state": { "selected": "selectedTab" }
                    },
                    when(selected == 0.0, json!({ "com": "label", "text": "Tab number 1" })),
                    when(selected == 1.0, json!({ "com": "label", "text": "Tab number 2" }))
                ]
            }
        })
    });
    Provider::new(source, HandlerTable::new())
}

pub fn button_provider() -> Provider {
    let source = JsonSource::new(|state: &StateMap| {
        tracing::debug!(count = %state.value("count"), "Button screen requested");
        json!({
            "ui": {
                "com": "hstack",
                "items": [
                    { "com": "button", "text": "Press me!", "onpress": "onPressed" },
                    { "com": "label", "text": format!("Presses: {}", text_or(state, "count", "0")) }
                ]
            }
        })
    });
    let handlers = HandlerTable::new().with(
        "onPressed",
        handler_fn(|state: Arc<StateMap>| async move {
            let count = number_or_zero(&state.value("count")) + 1.0;
            tracing::debug!(count, "Button pressed");
            Ok(StateMap::from([("count", count)]))
        }),
    );
    Provider::new(source, handlers)
}

pub fn input_provider() -> Provider {
    let source = JsonSource::new(|state: &StateMap| {
        tracing::debug!(value = %state.value("value"), "Input screen requested");
        json!({
            "ui": {
                "com": "hstack",
                "items": [
                    { "com": "text-input", "state": { "value": "value" } },
                    { "com": "label", "text": format!("You entered: {}", text_or(state, "value", "")) }
                ]
            }
        })
    });
    Provider::new(source, HandlerTable::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Component;
    use crate::provider::UiSource;

    #[tokio::test]
    async fn tabs_screen_omits_unselected_label() {
        let provider = tabs_provider();
        let response = provider
            .source
            .get_ui(Arc::new(StateMap::from([("selectedTab", 1usize)])))
            .await
            .unwrap();
        let Component::VStack(stack) = response.ui else {
            panic!("expected vstack");
        };
        assert_eq!(stack.items[1], None);
        assert_eq!(stack.items[2], Some(Component::label("Tab number 2")));
    }

    #[tokio::test]
    async fn counter_handler_increments() {
        let provider = button_provider();
        let handler = provider.handlers.get("onPressed").unwrap();
        let patch = handler
            .call(Arc::new(StateMap::from([("count", 1i64)])))
            .await
            .unwrap();
        assert_eq!(patch, StateMap::from([("count", 2i64)]));
    }

    #[test]
    fn all_choice_lists_every_screen() {
        assert_eq!(ScreenChoice::All.screens().len(), 3);
        assert_eq!(ScreenChoice::Input.screens(), vec![Screen::Input]);
    }
}
