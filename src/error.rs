//! Region error taxonomy and a bounded history of recent failures.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::SystemTime;

use parking_lot::Mutex;
use thiserror::Error;

use crate::provider::ProviderError;

/// Recoverable failures surfaced by a render loop. None of them stop the
/// region from accepting further input.
#[derive(Debug, Clone, Error)]
pub enum RegionError {
    #[error("Tree fetch #{seq} failed: {source}")]
    FetchFailed {
        seq: u64,
        #[source]
        source: ProviderError,
    },

    #[error("Handler '{name}' (#{seq}) failed: {source}")]
    HandlerFailed {
        seq: u64,
        name: String,
        #[source]
        source: ProviderError,
    },
}

impl RegionError {
    pub fn seq(&self) -> u64 {
        match self {
            RegionError::FetchFailed { seq, .. } | RegionError::HandlerFailed { seq, .. } => *seq,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub at: SystemTime,
    pub error: RegionError,
}

/// Ring buffer of recent region errors, shared by clone.
#[derive(Debug, Clone)]
pub struct ErrorRegistry {
    inner: Arc<Mutex<VecDeque<ErrorRecord>>>,
    capacity: usize,
}

impl ErrorRegistry {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity: capacity.max(1),
        }
    }

    pub fn record(&self, error: RegionError) {
        tracing::warn!(error = %error, "Region error");
        let mut entries = self.inner.lock();
        if entries.len() >= self.capacity {
            entries.pop_front();
        }
        entries.push_back(ErrorRecord {
            at: SystemTime::now(),
            error,
        });
    }

    /// Most recent first.
    pub fn recent(&self) -> Vec<ErrorRecord> {
        self.inner.lock().iter().rev().cloned().collect()
    }

    pub fn last(&self) -> Option<RegionError> {
        self.inner.lock().back().map(|record| record.error.clone())
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }
}

impl Default for ErrorRegistry {
    fn default() -> Self {
        Self::new(50)
    }
}
