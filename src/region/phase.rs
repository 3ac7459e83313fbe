//! Render loop phase machine.
//!
//! `Idle → Fetching → Rendered`, with every fetch tagged by a sequence
//! number. Only the fetch the loop is currently waiting for can move it out
//! of `Fetching`; answers to superseded fetches leave the phase alone.

use crate::ui::mvi::{Intent, Reducer, UiState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegionPhase {
    /// Not mounted, or mounted but nothing rendered yet and no fetch pending.
    #[default]
    Idle,
    Fetching {
        /// Sequence number of the latest issued fetch.
        seq: u64,
        /// Whether a tree from an earlier fetch is on screen.
        rendered: bool,
    },
    Rendered,
}

impl UiState for RegionPhase {}

impl RegionPhase {
    /// True when a result for `seq` should be applied.
    pub fn awaits(&self, seq: u64) -> bool {
        matches!(self, RegionPhase::Fetching { seq: pending, .. } if *pending == seq)
    }

    pub fn is_fetching(&self) -> bool {
        matches!(self, RegionPhase::Fetching { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            RegionPhase::Idle => "idle",
            RegionPhase::Fetching { .. } => "fetching",
            RegionPhase::Rendered => "rendered",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseIntent {
    FetchIssued { seq: u64 },
    FetchResolved { seq: u64 },
    FetchFailed { seq: u64 },
    Unmount,
}

impl Intent for PhaseIntent {}

pub struct PhaseReducer;

impl Reducer for PhaseReducer {
    type State = RegionPhase;
    type Intent = PhaseIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            PhaseIntent::FetchIssued { seq } => match state {
                RegionPhase::Idle => RegionPhase::Fetching {
                    seq,
                    rendered: false,
                },
                RegionPhase::Fetching { rendered, .. } => RegionPhase::Fetching { seq, rendered },
                RegionPhase::Rendered => RegionPhase::Fetching {
                    seq,
                    rendered: true,
                },
            },
            PhaseIntent::FetchResolved { seq } if state.awaits(seq) => RegionPhase::Rendered,
            PhaseIntent::FetchFailed { seq } => match state {
                RegionPhase::Fetching {
                    seq: pending,
                    rendered,
                } if pending == seq => {
                    // Keep whatever is on screen
                    if rendered {
                        RegionPhase::Rendered
                    } else {
                        RegionPhase::Idle
                    }
                }
                other => other,
            },
            PhaseIntent::FetchResolved { .. } => state,
            PhaseIntent::Unmount => RegionPhase::Idle,
        }
    }
}
