//! Shared test utilities: controllable providers and region helpers.

#![allow(dead_code, unused_imports)]

use async_trait::async_trait;
use parking_lot::Mutex;
use remote_ui::component::{Component, ControlId, RenderNode};
use remote_ui::provider::{
    HandlerTable, Provider, ProviderError, RpcHandler, UiResponse, UiSource,
};
use remote_ui::region::Region;
use remote_ui::state::StateMap;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::{oneshot, Notify};

/// Region on the current test runtime.
pub fn region_for(provider: Provider) -> Region {
    Region::new(provider, Handle::current())
}

/// Mount and run until the first tree is on screen.
pub async fn mounted(provider: Provider) -> Region {
    let mut region = region_for(provider);
    region.mount();
    region.settle().await;
    region
}

/// Labels of the current view, in order.
pub fn texts(region: &Region) -> Vec<String> {
    region.view().texts()
}

/// First interactive control of the current view.
pub fn first_control(region: &Region) -> ControlId {
    region
        .view()
        .focusables()
        .into_iter()
        .next()
        .expect("view has no interactive control")
}

/// A fetch parked until the test answers it.
pub struct PendingFetch {
    pub state: Arc<StateMap>,
    reply: oneshot::Sender<Result<UiResponse, ProviderError>>,
}

impl PendingFetch {
    pub fn reply(self, result: Result<UiResponse, ProviderError>) {
        let _ = self.reply.send(result);
    }

    pub fn label(self, text: &str) {
        self.reply(Ok(UiResponse::new(Component::label(text))));
    }
}

struct GateInner {
    pending: Mutex<VecDeque<PendingFetch>>,
    arrived: Notify,
}

/// Source whose fetches complete only when the test says so, in any order.
#[derive(Clone)]
pub struct Gate(Arc<GateInner>);

impl Gate {
    pub fn new() -> Self {
        Self(Arc::new(GateInner {
            pending: Mutex::new(VecDeque::new()),
            arrived: Notify::new(),
        }))
    }

    pub fn provider(&self, handlers: HandlerTable) -> Provider {
        Provider::new(self.clone(), handlers)
    }

    /// Wait for the next fetch to reach the source.
    pub async fn next_call(&self) -> PendingFetch {
        loop {
            if let Some(call) = self.0.pending.lock().pop_front() {
                return call;
            }
            self.0.arrived.notified().await;
        }
    }
}

#[async_trait]
impl UiSource for Gate {
    async fn get_ui(&self, state: Arc<StateMap>) -> Result<UiResponse, ProviderError> {
        let (reply, rx) = oneshot::channel();
        self.0.pending.lock().push_back(PendingFetch { state, reply });
        self.0.arrived.notify_one();
        rx.await
            .unwrap_or_else(|_| Err(ProviderError::Rejected("gate closed".into())))
    }
}

/// A handler call parked until the test answers it.
pub struct PendingCall {
    pub state: Arc<StateMap>,
    reply: oneshot::Sender<Result<StateMap, ProviderError>>,
}

impl PendingCall {
    pub fn patch(self, patch: StateMap) {
        let _ = self.reply.send(Ok(patch));
    }
}

struct HandlerGateInner {
    pending: Mutex<VecDeque<PendingCall>>,
    arrived: Notify,
}

/// Handler whose calls complete only when the test says so, in any order.
#[derive(Clone)]
pub struct HandlerGate(Arc<HandlerGateInner>);

impl HandlerGate {
    pub fn new() -> Self {
        Self(Arc::new(HandlerGateInner {
            pending: Mutex::new(VecDeque::new()),
            arrived: Notify::new(),
        }))
    }

    /// Wait for the next call to reach the handler.
    pub async fn next_call(&self) -> PendingCall {
        loop {
            if let Some(call) = self.0.pending.lock().pop_front() {
                return call;
            }
            self.0.arrived.notified().await;
        }
    }
}

#[async_trait]
impl RpcHandler for HandlerGate {
    async fn call(&self, state: Arc<StateMap>) -> Result<StateMap, ProviderError> {
        let (reply, rx) = oneshot::channel();
        self.0.pending.lock().push_back(PendingCall { state, reply });
        self.0.arrived.notify_one();
        rx.await
            .unwrap_or_else(|_| Err(ProviderError::Rejected("gate closed".into())))
    }
}

/// Source that counts calls and renders a fixed tree.
pub struct CountingSource {
    pub calls: Arc<AtomicUsize>,
    tree: Component,
}

impl CountingSource {
    pub fn new(tree: Component) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                calls: Arc::clone(&calls),
                tree,
            },
            calls,
        )
    }
}

#[async_trait]
impl UiSource for CountingSource {
    async fn get_ui(&self, _state: Arc<StateMap>) -> Result<UiResponse, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(UiResponse::new(self.tree.clone()))
    }
}
