//! The half of a region that controls talk to: state store, fetch
//! scheduling and handler dispatch.
//!
//! Provider calls run as tasks on the tokio runtime. Each one carries a
//! sequence number and posts a [`Completion`] back over a channel; the
//! region owner applies completions on its own thread, so the store is only
//! ever written from one place.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

use crate::component::RegionContext;
use crate::dispatch::Dispatcher;
use crate::provider::{Provider, ProviderError, UiResponse, UiSource};
use crate::region::phase::{PhaseIntent, PhaseReducer, RegionPhase};
use crate::state::{StateMap, StateStore, StateValue};
use crate::ui::mvi::Reducer;

/// Callback run after a task posts its completion, so a blocking host loop
/// can wake up and drain.
pub type Notifier = Arc<dyn Fn() + Send + Sync>;

#[derive(Debug)]
pub enum Completion {
    Fetch {
        seq: u64,
        result: Result<UiResponse, ProviderError>,
    },
    Handler {
        seq: u64,
        name: String,
        result: Result<StateMap, ProviderError>,
    },
}

impl Completion {
    pub fn seq(&self) -> u64 {
        match self {
            Completion::Fetch { seq, .. } | Completion::Handler { seq, .. } => *seq,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WorkKind {
    Fetch,
    Handler,
}

struct InFlight {
    kind: WorkKind,
    abort: AbortHandle,
}

/// Sends a task's completion back to the region. If the task unwinds before
/// reporting, the prepared failure is sent from `Drop` instead, so the seq
/// never stays in flight. Aborted tasks send nothing.
struct Reporter {
    tx: mpsc::UnboundedSender<Completion>,
    notifier: Option<Notifier>,
    on_panic: Option<Completion>,
}

impl Reporter {
    fn send(&self, completion: Completion) {
        let _ = self.tx.send(completion);
        if let Some(notify) = &self.notifier {
            notify();
        }
    }

    fn report(mut self, completion: Completion) {
        self.on_panic = None;
        self.send(completion);
    }
}

impl Drop for Reporter {
    fn drop(&mut self) {
        if !std::thread::panicking() {
            return;
        }
        if let Some(failure) = self.on_panic.take() {
            tracing::warn!(seq = failure.seq(), "Provider task panicked");
            self.send(failure);
        }
    }
}

pub struct Engine {
    store: StateStore,
    source: Arc<dyn UiSource>,
    dispatcher: Dispatcher,
    runtime: Handle,
    tx: mpsc::UnboundedSender<Completion>,
    notifier: Option<Notifier>,
    phase: RegionPhase,
    mounted: bool,
    next_seq: u64,
    /// Highest handler sequence number whose patch has been merged.
    merged_handler_seq: u64,
    in_flight: HashMap<u64, InFlight>,
}

impl Engine {
    pub(crate) fn new(
        provider: Provider,
        runtime: Handle,
        tx: mpsc::UnboundedSender<Completion>,
    ) -> Self {
        Self {
            store: StateStore::new(),
            source: provider.source,
            dispatcher: Dispatcher::new(provider.handlers),
            runtime,
            tx,
            notifier: None,
            phase: RegionPhase::default(),
            mounted: false,
            next_seq: 0,
            merged_handler_seq: 0,
            in_flight: HashMap::new(),
        }
    }

    pub(crate) fn set_notifier(&mut self, notifier: Notifier) {
        self.notifier = Some(notifier);
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    pub fn state(&self) -> Arc<StateMap> {
        self.store.get()
    }

    pub fn phase(&self) -> RegionPhase {
        self.phase
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    fn dispatch_phase(&mut self, intent: PhaseIntent) {
        self.phase = PhaseReducer::reduce(self.phase, intent);
    }

    fn next_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    pub(crate) fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.issue_fetch();
    }

    /// Abort every in-flight task, stop issuing new ones and drop the store.
    /// A later mount starts again from an empty state.
    pub(crate) fn unmount(&mut self) {
        for (seq, work) in self.in_flight.drain() {
            tracing::debug!(seq, kind = ?work.kind, "Cancelling on unmount");
            work.abort.abort();
        }
        self.mounted = false;
        self.store = StateStore::new();
        self.merged_handler_seq = 0;
        self.dispatch_phase(PhaseIntent::Unmount);
    }

    /// Ask the provider for a tree built from the current snapshot. Any
    /// fetch still in flight is superseded and cancelled.
    pub(crate) fn issue_fetch(&mut self) -> Option<u64> {
        if !self.mounted {
            return None;
        }
        let superseded: Vec<u64> = self
            .in_flight
            .iter()
            .filter(|(_, work)| work.kind == WorkKind::Fetch)
            .map(|(seq, _)| *seq)
            .collect();
        for seq in superseded {
            if let Some(work) = self.in_flight.remove(&seq) {
                tracing::debug!(seq, "Cancelling superseded fetch");
                work.abort.abort();
            }
        }

        let seq = self.next_seq();
        let snapshot = self.store.get();
        let source = Arc::clone(&self.source);
        let reporter = self.reporter(Completion::Fetch {
            seq,
            result: Err(ProviderError::Panicked),
        });
        tracing::debug!(seq, keys = snapshot.len(), "Fetching tree");

        let handle = self.runtime.spawn(async move {
            let result = source.get_ui(snapshot).await;
            reporter.report(Completion::Fetch { seq, result });
        });
        self.in_flight.insert(
            seq,
            InFlight {
                kind: WorkKind::Fetch,
                abort: handle.abort_handle(),
            },
        );
        self.dispatch_phase(PhaseIntent::FetchIssued { seq });
        Some(seq)
    }

    fn reporter(&self, on_panic: Completion) -> Reporter {
        Reporter {
            tx: self.tx.clone(),
            notifier: self.notifier.clone(),
            on_panic: Some(on_panic),
        }
    }

    /// Forget a finished task. Returns false if it had already been
    /// cancelled, in which case its result must be dropped.
    pub(crate) fn finish(&mut self, seq: u64) -> bool {
        self.in_flight.remove(&seq).is_some()
    }

    /// Decide whether the fetch result for `seq` is the one the loop is
    /// waiting for, and advance the phase accordingly.
    pub(crate) fn resolve_fetch(&mut self, seq: u64, ok: bool) -> bool {
        if !self.phase.awaits(seq) {
            return false;
        }
        if ok {
            self.dispatch_phase(PhaseIntent::FetchResolved { seq });
        } else {
            self.dispatch_phase(PhaseIntent::FetchFailed { seq });
        }
        true
    }

    /// Merge a handler patch unless a newer handler already merged.
    pub(crate) fn merge_handler_result(&mut self, seq: u64, name: &str, patch: &StateMap) -> bool {
        if seq <= self.merged_handler_seq {
            tracing::debug!(seq, handler = %name, "Discarding stale handler result");
            return false;
        }
        self.merged_handler_seq = seq;
        let keys = Dispatcher::apply(&mut self.store, patch);
        tracing::debug!(seq, handler = %name, ?keys, "Merged handler result");
        self.issue_fetch();
        true
    }
}

impl RegionContext for Engine {
    fn set_bound_state(&mut self, key: &str, value: StateValue) {
        if !self.mounted {
            tracing::debug!(key = %key, "Region unmounted, ignoring state write");
            return;
        }
        tracing::debug!(key = %key, value = %value, "Bound state updated");
        self.store.set_bound(key, value);
        self.issue_fetch();
    }

    fn call_rpc_handler(&mut self, name: &str) {
        if !self.mounted {
            return;
        }
        let Some(handler) = self.dispatcher.resolve(name) else {
            return;
        };
        let seq = self.next_seq();
        // Snapshot at invocation time, after any binding written just before.
        let snapshot = self.store.get();
        let owned_name = name.to_string();
        let reporter = self.reporter(Completion::Handler {
            seq,
            name: owned_name.clone(),
            result: Err(ProviderError::Panicked),
        });
        tracing::debug!(seq, handler = %name, "Calling handler");

        let handle = self.runtime.spawn(async move {
            let result = handler.call(snapshot).await;
            reporter.report(Completion::Handler {
                seq,
                name: owned_name,
                result,
            });
        });
        self.in_flight.insert(
            seq,
            InFlight {
                kind: WorkKind::Handler,
                abort: handle.abort_handle(),
            },
        );
    }
}
