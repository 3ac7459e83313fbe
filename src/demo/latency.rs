//! Provider decorator that delays every call, to exercise the render loop
//! against a slow backend, and fails calls that outlive a deadline.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::provider::{HandlerTable, Provider, ProviderError, RpcHandler, UiResponse, UiSource};
use crate::state::StateMap;

/// `base_ms` plus a random share of up to `jitter_ms`, optionally cut off
/// after `timeout_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Latency {
    pub base_ms: u64,
    pub jitter_ms: u64,
    pub timeout_ms: Option<u64>,
}

impl Latency {
    pub fn new(base_ms: u64, jitter_ms: u64) -> Self {
        Self {
            base_ms,
            jitter_ms,
            timeout_ms: None,
        }
    }

    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    /// True when wrapping a provider would change nothing.
    pub fn is_passthrough(&self) -> bool {
        self.base_ms == 0 && self.jitter_ms == 0 && self.timeout_ms.is_none()
    }

    pub fn sample(&self) -> Duration {
        let jitter = match self.jitter_ms {
            0 => 0,
            max => rand::random_range(0..=max),
        };
        Duration::from_millis(self.base_ms + jitter)
    }

    async fn run<T, F>(&self, call: F) -> Result<T, ProviderError>
    where
        F: Future<Output = Result<T, ProviderError>>,
    {
        let delay = self.sample();
        let delayed = async move {
            tracing::debug!(delay_ms = delay.as_millis() as u64, "Simulating network latency");
            tokio::time::sleep(delay).await;
            call.await
        };
        match self.timeout_ms {
            Some(millis) => tokio::time::timeout(Duration::from_millis(millis), delayed)
                .await
                .unwrap_or_else(|_| {
                    tracing::warn!(timeout_ms = millis, "Provider call timed out");
                    Err(ProviderError::Timeout { millis })
                }),
            None => delayed.await,
        }
    }
}

struct DelayedSource {
    inner: Arc<dyn UiSource>,
    latency: Latency,
}

#[async_trait]
impl UiSource for DelayedSource {
    async fn get_ui(&self, state: Arc<StateMap>) -> Result<UiResponse, ProviderError> {
        self.latency.run(self.inner.get_ui(state)).await
    }
}

struct DelayedHandler {
    inner: Arc<dyn RpcHandler>,
    latency: Latency,
}

#[async_trait]
impl RpcHandler for DelayedHandler {
    async fn call(&self, state: Arc<StateMap>) -> Result<StateMap, ProviderError> {
        self.latency.run(self.inner.call(state)).await
    }
}

/// Wrap the source and every handler of `provider` in `latency`.
pub fn with_latency(provider: Provider, latency: Latency) -> Provider {
    if latency.is_passthrough() {
        return provider;
    }
    let mut handlers = HandlerTable::new();
    for (name, handler) in provider.handlers.iter() {
        handlers.insert(
            name,
            DelayedHandler {
                inner: Arc::clone(handler),
                latency,
            },
        );
    }
    Provider::new(
        DelayedSource {
            inner: provider.source,
            latency,
        },
        handlers,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Component;
    use crate::provider::source_fn;

    #[test]
    fn sample_stays_in_range() {
        let latency = Latency::new(30, 10);
        for _ in 0..50 {
            let ms = latency.sample().as_millis() as u64;
            assert!((30..=40).contains(&ms));
        }
    }

    #[test]
    fn jitter_spreads_samples() {
        let latency = Latency::new(0, 1_000);
        let first = latency.sample();
        assert!((0..50).any(|_| latency.sample() != first));
    }

    #[test]
    fn zero_latency_is_passthrough() {
        assert_eq!(Latency::default().sample(), Duration::ZERO);
        assert!(Latency::default().is_passthrough());
        assert!(!Latency::default().with_timeout(10).is_passthrough());
    }

    #[tokio::test]
    async fn slow_call_times_out() {
        let slow = source_fn(|_state: Arc<StateMap>| async move {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(UiResponse::new(Component::label("late")))
        });
        let provider = with_latency(
            Provider::new(slow, HandlerTable::new()),
            Latency::new(0, 0).with_timeout(20),
        );
        let err = provider
            .source
            .get_ui(Arc::new(StateMap::new()))
            .await
            .unwrap_err();
        assert_eq!(err.error_type(), "timeout");
    }

    #[tokio::test]
    async fn fast_call_passes_through() {
        let fast = source_fn(|_state: Arc<StateMap>| async move {
            Ok(UiResponse::new(Component::label("ok")))
        });
        let provider = with_latency(
            Provider::new(fast, HandlerTable::new()),
            Latency::new(1, 0).with_timeout(1000),
        );
        let response = provider
            .source
            .get_ui(Arc::new(StateMap::new()))
            .await
            .unwrap();
        assert_eq!(response.ui, Component::label("ok"));
    }
}
