//! Mediation
//!
//! Every state and phase change goes through `MediationController`.
//! Violations are reported to the `AnomalyHandler` and force `Locked`.

use crate::error::{ErrorCode, WalletError};

use super::state::{EngineState, LifecyclePhase};

/// Rule violations detected by the engine
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Anomaly {
    #[error("Illegal state transition: {from} -> {to}")]
    IllegalState { from: EngineState, to: EngineState },

    #[error("Lifecycle must begin with UNLOCK, got {to}")]
    LifecycleNotStarted { to: LifecyclePhase },

    #[error("Illegal lifecycle transition: {from} -> {to}")]
    IllegalPhase { from: LifecyclePhase, to: LifecyclePhase },

    #[error("Engine is locked")]
    Locked,

    #[error("Boundary not active")]
    BoundaryInactive,

    #[error("Classified buffer has been wiped")]
    BufferInvalidated,

    #[error("Payload of {requested} bytes exceeds buffer capacity of {capacity}")]
    BufferOverflow { capacity: usize, requested: usize },

    #[error("Ephemeral key not loaded")]
    KeyNotLoaded,

    #[error("Ephemeral key does not match the verifying key")]
    KeyMismatch,

    #[error("Malformed signature: {0}")]
    MalformedSignature(String),
}

impl Anomaly {
    pub fn code(&self) -> ErrorCode {
        match self {
            Anomaly::IllegalState { .. }
            | Anomaly::LifecycleNotStarted { .. }
            | Anomaly::IllegalPhase { .. } => ErrorCode::IllegalTransition,
            Anomaly::Locked => ErrorCode::EngineLocked,
            Anomaly::BoundaryInactive => ErrorCode::BoundaryInactive,
            Anomaly::BufferInvalidated => ErrorCode::BufferInvalidated,
            Anomaly::BufferOverflow { .. } => ErrorCode::InvalidInput,
            Anomaly::KeyNotLoaded => ErrorCode::KeyNotLoaded,
            Anomaly::KeyMismatch | Anomaly::MalformedSignature(_) => ErrorCode::VerificationFailed,
        }
    }
}

impl From<Anomaly> for WalletError {
    fn from(anomaly: Anomaly) -> Self {
        WalletError::new(anomaly.code(), anomaly.to_string())
    }
}

/// Most recent anomalies kept by `AnomalyHandler`
pub const MAX_ANOMALY_HISTORY: usize = 32;

/// Logs anomalies and keeps the most recent ones for inspection
#[derive(Debug, Default)]
pub struct AnomalyHandler {
    history: Vec<Anomaly>,
}

impl AnomalyHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&mut self, anomaly: &Anomaly) {
        crate::log_error!("engine", "Anomaly detected", reason = anomaly);
        if self.history.len() == MAX_ANOMALY_HISTORY {
            self.history.remove(0);
        }
        self.history.push(anomaly.clone());
    }

    /// Oldest first, at most `MAX_ANOMALY_HISTORY` entries
    pub fn history(&self) -> &[Anomaly] {
        &self.history
    }
}

/// Owner of the engine state and lifecycle phase
#[derive(Debug)]
pub struct MediationController {
    state: EngineState,
    phase: Option<LifecyclePhase>,
    anomalies: AnomalyHandler,
}

impl MediationController {
    pub fn new(anomalies: AnomalyHandler) -> Self {
        Self {
            state: EngineState::Cold,
            phase: None,
            anomalies,
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// `None` before the first `Unlock` and after a reset
    pub fn phase(&self) -> Option<LifecyclePhase> {
        self.phase
    }

    pub fn anomalies(&self) -> &AnomalyHandler {
        &self.anomalies
    }

    pub fn transition_state(&mut self, next: EngineState) -> Result<(), Anomaly> {
        if !self.state.can_transition_to(next) {
            return Err(self.escalate(Anomaly::IllegalState {
                from: self.state,
                to: next,
            }));
        }
        self.state = next;
        Ok(())
    }

    pub fn transition_phase(&mut self, next: LifecyclePhase) -> Result<(), Anomaly> {
        match self.phase {
            None if next != LifecyclePhase::Unlock => {
                Err(self.escalate(Anomaly::LifecycleNotStarted { to: next }))
            }
            Some(current) if !current.can_transition_to(next) => {
                Err(self.escalate(Anomaly::IllegalPhase {
                    from: current,
                    to: next,
                }))
            }
            _ => {
                self.phase = Some(next);
                Ok(())
            }
        }
    }

    /// Fails without side effects when the engine is locked
    pub fn ensure_unlocked(&self) -> Result<(), Anomaly> {
        if self.state == EngineState::Locked {
            return Err(Anomaly::Locked);
        }
        Ok(())
    }

    /// Report `anomaly` and lock the engine. Returns the anomaly for `Err`.
    ///
    /// Every state may move to `Locked`, so this never fails; escalating an
    /// already locked engine only records the anomaly.
    pub fn escalate(&mut self, anomaly: Anomaly) -> Anomaly {
        self.anomalies.handle(&anomaly);
        debug_assert!(
            self.state == EngineState::Locked || self.state.can_transition_to(EngineState::Locked)
        );
        self.state = EngineState::Locked;
        anomaly
    }

    pub fn reset_lifecycle(&mut self) {
        self.phase = None;
    }
}
