//! The collaborator a region renders for.
//!
//! A provider is two things: a [`UiSource`] that maps a state snapshot to a
//! component tree, and a [`HandlerTable`] of named [`RpcHandler`]s that map a
//! snapshot to a partial state patch. Both are object-safe async traits, so an
//! in-process screen and a network client are interchangeable.

mod error;

pub use error::ProviderError;

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::component::Component;
use crate::state::StateMap;

/// Response to a tree fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiResponse {
    pub ui: Component,
}

impl UiResponse {
    pub fn new(ui: Component) -> Self {
        Self { ui }
    }
}

/// Produces the tree to render for a state snapshot.
///
/// May be called again before an earlier call resolves.
#[async_trait]
pub trait UiSource: Send + Sync {
    async fn get_ui(&self, state: Arc<StateMap>) -> Result<UiResponse, ProviderError>;
}

/// Maps a state snapshot to the keys that should change.
#[async_trait]
pub trait RpcHandler: Send + Sync {
    async fn call(&self, state: Arc<StateMap>) -> Result<StateMap, ProviderError>;
}

/// [`UiSource`] backed by an async closure.
pub struct FnSource<F>(F);

/// Wrap an async closure as a [`UiSource`].
pub fn source_fn<F, Fut>(f: F) -> FnSource<F>
where
    F: Fn(Arc<StateMap>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<UiResponse, ProviderError>> + Send + 'static,
{
    FnSource(f)
}

#[async_trait]
impl<F, Fut> UiSource for FnSource<F>
where
    F: Fn(Arc<StateMap>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<UiResponse, ProviderError>> + Send + 'static,
{
    async fn get_ui(&self, state: Arc<StateMap>) -> Result<UiResponse, ProviderError> {
        (self.0)(state).await
    }
}

/// [`RpcHandler`] backed by an async closure.
pub struct FnHandler<F>(F);

/// Wrap an async closure as an [`RpcHandler`].
pub fn handler_fn<F, Fut>(f: F) -> FnHandler<F>
where
    F: Fn(Arc<StateMap>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<StateMap, ProviderError>> + Send + 'static,
{
    FnHandler(f)
}

#[async_trait]
impl<F, Fut> RpcHandler for FnHandler<F>
where
    F: Fn(Arc<StateMap>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<StateMap, ProviderError>> + Send + 'static,
{
    async fn call(&self, state: Arc<StateMap>) -> Result<StateMap, ProviderError> {
        (self.0)(state).await
    }
}

/// [`UiSource`] whose trees arrive as JSON values, the shape a remote
/// backend delivers. Falsy `items` slots and unknown kinds decode the same
/// way they would off the wire.
pub struct JsonSource<F>(F);

impl<F> JsonSource<F>
where
    F: Fn(&StateMap) -> Value + Send + Sync + 'static,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

#[async_trait]
impl<F> UiSource for JsonSource<F>
where
    F: Fn(&StateMap) -> Value + Send + Sync + 'static,
{
    async fn get_ui(&self, state: Arc<StateMap>) -> Result<UiResponse, ProviderError> {
        let payload = (self.0)(state.as_ref());
        Ok(serde_json::from_value(payload)?)
    }
}

/// Named handlers supplied by a provider.
#[derive(Clone, Default)]
pub struct HandlerTable {
    handlers: HashMap<String, Arc<dyn RpcHandler>>,
}

impl HandlerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style registration.
    pub fn with(mut self, name: impl Into<String>, handler: impl RpcHandler + 'static) -> Self {
        self.insert(name, handler);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, handler: impl RpcHandler + 'static) {
        self.handlers.insert(name.into(), Arc::new(handler));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn RpcHandler>)> {
        self.handlers.iter().map(|(name, handler)| (name.as_str(), handler))
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn RpcHandler>> {
        self.handlers.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for HandlerTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerTable")
            .field("handlers", &self.names())
            .finish()
    }
}

/// Source plus handler table: everything a region needs from the outside.
#[derive(Clone)]
pub struct Provider {
    pub source: Arc<dyn UiSource>,
    pub handlers: HandlerTable,
}

impl Provider {
    pub fn new(source: impl UiSource + 'static, handlers: HandlerTable) -> Self {
        Self {
            source: Arc::new(source),
            handlers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::StateValue;
    use serde_json::json;

    #[tokio::test]
    async fn json_source_decodes_trees() {
        let source = JsonSource::new(|state: &StateMap| {
            json!({ "ui": { "com": "label", "text": format!("n={}", state.value("n")) } })
        });
        let response = source
            .get_ui(Arc::new(StateMap::from([("n", 3i64)])))
            .await
            .unwrap();
        assert_eq!(response.ui, Component::label("n=3"));
    }

    #[tokio::test]
    async fn json_source_reports_decode_errors() {
        let source = JsonSource::new(|_: &StateMap| json!({ "ui": 42 }));
        let err = source.get_ui(Arc::new(StateMap::new())).await.unwrap_err();
        assert_eq!(err.error_type(), "decode");
    }

    #[tokio::test]
    async fn handler_table_lookup() {
        let table = HandlerTable::new().with(
            "inc",
            handler_fn(|state: Arc<StateMap>| async move {
                let n = state.value("n").as_number().unwrap_or(0.0);
                Ok(StateMap::from([("n", n + 1.0)]))
            }),
        );
        assert!(table.contains("inc"));
        assert!(table.get("dec").is_none());
        let patch = table
            .get("inc")
            .unwrap()
            .call(Arc::new(StateMap::new()))
            .await
            .unwrap();
        assert_eq!(patch.value("n"), StateValue::Number(1.0));
    }
}
