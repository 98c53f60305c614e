//! Engine States and Lifecycle Phases

use std::fmt;

/// Coarse engine state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineState {
    /// No key material loaded, boundary inactive
    Cold,
    /// Ephemeral key loaded inside an active boundary
    Active,
    /// Wiping in progress
    Teardown,
    /// An anomaly was detected; reachable from every other state, and only
    /// teardown leaves it
    Locked,
}

impl EngineState {
    pub fn can_transition_to(self, next: EngineState) -> bool {
        use EngineState::*;
        matches!(
            (self, next),
            (Cold, Active)
                | (Cold, Locked)
                | (Active, Cold)
                | (Active, Teardown)
                | (Active, Locked)
                | (Teardown, Cold)
                | (Teardown, Locked)
                | (Locked, Teardown)
                | (Locked, Cold)
        )
    }
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineState::Cold => write!(f, "COLD"),
            EngineState::Active => write!(f, "ACTIVE"),
            EngineState::Teardown => write!(f, "TEARDOWN"),
            EngineState::Locked => write!(f, "LOCKED"),
        }
    }
}

/// Step within one unlock-to-erase cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecyclePhase {
    Unlock,
    Execute,
    Erase,
}

impl LifecyclePhase {
    /// `Erase` is terminal; the cycle restarts only after a lifecycle reset.
    pub fn can_transition_to(self, next: LifecyclePhase) -> bool {
        use LifecyclePhase::*;
        matches!(
            (self, next),
            (Unlock, Execute) | (Unlock, Erase) | (Execute, Execute) | (Execute, Erase)
        )
    }
}

impl fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecyclePhase::Unlock => write!(f, "UNLOCK"),
            LifecyclePhase::Execute => write!(f, "EXECUTE"),
            LifecyclePhase::Erase => write!(f, "ERASE"),
        }
    }
}
