//! Declarative component descriptors as delivered by a provider.
//!
//! The set of kinds is closed. A descriptor whose `com` tag is not one of
//! them still decodes, as [`Component::Unknown`], so a newer provider cannot
//! break an older client.

use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tags this client knows how to render.
pub const KNOWN_KINDS: &[&str] = &[
    "empty",
    "hstack",
    "vstack",
    "label",
    "tabs",
    "button",
    "text-input",
];

#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    Empty,
    HStack(Stack),
    VStack(Stack),
    Label(Label),
    Tabs(Tabs),
    Button(Button),
    TextInput(TextInput),
    /// Descriptor with a tag outside [`KNOWN_KINDS`].
    Unknown { com: String },
}

/// Children of a container. `None` marks a slot the provider left falsy.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Stack {
    #[serde(default, deserialize_with = "deserialize_slots")]
    pub items: Vec<Option<Component>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Label {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Tabs {
    #[serde(default)]
    pub tabs: Vec<String>,
    #[serde(default, skip_serializing_if = "TabsBinding::is_unbound")]
    pub state: TabsBinding,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TabsBinding {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<String>,
}

impl TabsBinding {
    fn is_unbound(&self) -> bool {
        self.selected.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Button {
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub onpress: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub onsubmit: Option<String>,
    #[serde(default, skip_serializing_if = "InputBinding::is_unbound")]
    pub state: InputBinding,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InputBinding {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl InputBinding {
    fn is_unbound(&self) -> bool {
        self.value.is_none()
    }
}

impl Component {
    /// The `com` tag of this descriptor.
    pub fn kind(&self) -> &str {
        match self {
            Component::Empty => "empty",
            Component::HStack(_) => "hstack",
            Component::VStack(_) => "vstack",
            Component::Label(_) => "label",
            Component::Tabs(_) => "tabs",
            Component::Button(_) => "button",
            Component::TextInput(_) => "text-input",
            Component::Unknown { com } => com,
        }
    }

    pub fn label(text: impl Into<String>) -> Self {
        Component::Label(Label { text: text.into() })
    }

    pub fn hstack(items: impl IntoIterator<Item = Option<Component>>) -> Self {
        Component::HStack(Stack {
            items: items.into_iter().collect(),
        })
    }

    pub fn vstack(items: impl IntoIterator<Item = Option<Component>>) -> Self {
        Component::VStack(Stack {
            items: items.into_iter().collect(),
        })
    }

    pub fn button(text: impl Into<String>, onpress: Option<&str>) -> Self {
        Component::Button(Button {
            text: text.into(),
            onpress: onpress.map(str::to_string),
        })
    }

    pub fn tabs<S: Into<String>>(tabs: impl IntoIterator<Item = S>, selected: Option<&str>) -> Self {
        Component::Tabs(Tabs {
            tabs: tabs.into_iter().map(Into::into).collect(),
            state: TabsBinding {
                selected: selected.map(str::to_string),
            },
        })
    }

    pub fn text_input(onsubmit: Option<&str>, value: Option<&str>) -> Self {
        Component::TextInput(TextInput {
            onsubmit: onsubmit.map(str::to_string),
            state: InputBinding {
                value: value.map(str::to_string),
            },
        })
    }
}

impl Default for Component {
    fn default() -> Self {
        Component::Empty
    }
}

/// Wire shape of the known kinds.
#[derive(Deserialize)]
#[serde(tag = "com", rename_all = "kebab-case")]
enum KnownComponent {
    Empty,
    Hstack(Stack),
    Vstack(Stack),
    Label(Label),
    Tabs(Tabs),
    Button(Button),
    TextInput(TextInput),
}

impl From<KnownComponent> for Component {
    fn from(known: KnownComponent) -> Self {
        match known {
            KnownComponent::Empty => Component::Empty,
            KnownComponent::Hstack(stack) => Component::HStack(stack),
            KnownComponent::Vstack(stack) => Component::VStack(stack),
            KnownComponent::Label(label) => Component::Label(label),
            KnownComponent::Tabs(tabs) => Component::Tabs(tabs),
            KnownComponent::Button(button) => Component::Button(button),
            KnownComponent::TextInput(input) => Component::TextInput(input),
        }
    }
}

/// Borrowed wire shape, so serializing does not clone the tree.
#[derive(Serialize)]
#[serde(tag = "com", rename_all = "kebab-case")]
enum KnownComponentRef<'a> {
    Empty,
    Hstack(&'a Stack),
    Vstack(&'a Stack),
    Label(&'a Label),
    Tabs(&'a Tabs),
    Button(&'a Button),
    TextInput(&'a TextInput),
}

impl Serialize for Component {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let known = match self {
            Component::Empty => KnownComponentRef::Empty,
            Component::HStack(stack) => KnownComponentRef::Hstack(stack),
            Component::VStack(stack) => KnownComponentRef::Vstack(stack),
            Component::Label(label) => KnownComponentRef::Label(label),
            Component::Tabs(tabs) => KnownComponentRef::Tabs(tabs),
            Component::Button(button) => KnownComponentRef::Button(button),
            Component::TextInput(input) => KnownComponentRef::TextInput(input),
            Component::Unknown { com } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("com", com)?;
                return map.end();
            }
        };
        known.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Component {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        component_from_value(value).map_err(de::Error::custom)
    }
}

fn component_from_value(value: Value) -> Result<Component, serde_json::Error> {
    let com = match value.get("com") {
        Some(Value::String(com)) => com.clone(),
        Some(other) => return Ok(Component::Unknown { com: other.to_string() }),
        None => return Err(de::Error::missing_field("com")),
    };
    if !KNOWN_KINDS.contains(&com.as_str()) {
        return Ok(Component::Unknown { com });
    }
    serde_json::from_value::<KnownComponent>(value).map(Component::from)
}

/// `null`, `false`, `0` and `""` are omitted slots; objects are descriptors;
/// any other truthy value is an unknown descriptor named after its JSON text.
fn deserialize_slots<'de, D>(deserializer: D) -> Result<Vec<Option<Component>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<Value>::deserialize(deserializer)?;
    raw.into_iter()
        .map(|value| match value {
            Value::Object(_) => component_from_value(value)
                .map(Some)
                .map_err(de::Error::custom),
            other if is_falsy(&other) => Ok(None),
            other => Ok(Some(Component::Unknown {
                com: other.to_string(),
            })),
        })
        .collect()
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
