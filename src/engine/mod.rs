//! Blackout Execution Engine
//!
//! A lifecycle-enforcing container for ephemeral key material:
//! - `unlock` loads a key into an active boundary (COLD -> ACTIVE)
//! - `execute` signs payloads copied into a classified buffer
//! - `erase` destroys the key, wipes the boundary and returns to COLD
//!
//! Any rule violation locks the engine. A locked engine refuses work until
//! `erase` tears it down.

mod boundary;
mod mediation;
mod security;
mod state;

pub use boundary::{Boundary, ClassifiedBuffer, MAX_BUFFER_SIZE};
pub use mediation::{Anomaly, AnomalyHandler, MediationController, MAX_ANOMALY_HISTORY};
pub use security::{SecurityController, SIGNATURE_LEN};
pub use state::{EngineState, LifecyclePhase};

use secp256k1::{PublicKey, SecretKey};

use crate::error::WalletResult;

#[derive(Debug)]
pub struct BlackoutEngine {
    boundary: Boundary,
    security: SecurityController,
    mediation: MediationController,
}

impl BlackoutEngine {
    /// Cold engine that verifies against `public_key`
    pub fn new(public_key: PublicKey) -> Self {
        Self {
            boundary: Boundary::new(),
            security: SecurityController::new(public_key),
            mediation: MediationController::new(AnomalyHandler::new()),
        }
    }

    pub fn state(&self) -> EngineState {
        self.mediation.state()
    }

    pub fn phase(&self) -> Option<LifecyclePhase> {
        self.mediation.phase()
    }

    pub fn anomalies(&self) -> &[Anomaly] {
        self.mediation.anomalies().history()
    }

    pub fn public_key(&self) -> &PublicKey {
        self.security.public_key()
    }

    /// Enter ACTIVE/UNLOCK with `secret_key` as the ephemeral signing key
    pub fn unlock(&mut self, secret_key: SecretKey) -> WalletResult<()> {
        self.mediation.ensure_unlocked()?;
        self.mediation.transition_state(EngineState::Active)?;
        self.mediation.transition_phase(LifecyclePhase::Unlock)?;

        self.boundary.activate();
        if let Err(anomaly) = self.security.load_ephemeral_key(secret_key) {
            return Err(self.mediation.escalate(anomaly).into());
        }

        crate::log_info!("engine", "Engine unlocked");
        Ok(())
    }

    /// Sign `payload` inside the boundary. Returns a 64-byte compact signature.
    pub fn execute(&mut self, payload: &[u8]) -> WalletResult<[u8; SIGNATURE_LEN]> {
        self.mediation.ensure_unlocked()?;
        self.mediation.transition_phase(LifecyclePhase::Execute)?;

        match sign_in_boundary(&mut self.boundary, &self.security, payload) {
            Ok(signature) => {
                crate::log_debug!("engine", "Payload signed", payload_len = payload.len());
                Ok(signature)
            }
            Err(anomaly) => Err(self.mediation.escalate(anomaly).into()),
        }
    }

    pub fn verify(&self, payload: &[u8], signature: &[u8]) -> WalletResult<bool> {
        Ok(self.security.verify(payload, signature)?)
    }

    /// Tear down to COLD. Valid from every state; a locked engine is
    /// recovered only this way.
    pub fn erase(&mut self) {
        if self.mediation.state() == EngineState::Active {
            // An illegal phase here locks the engine; teardown proceeds anyway.
            let _ = self.mediation.transition_phase(LifecyclePhase::Erase);
        }
        self.teardown();
    }

    fn teardown(&mut self) {
        let from = self.mediation.state();
        if from != EngineState::Cold {
            let _ = self.mediation.transition_state(EngineState::Teardown);
        }

        self.security.destroy_ephemeral_key();
        self.boundary.destroy();
        self.mediation.reset_lifecycle();

        if self.mediation.state() == EngineState::Teardown {
            let _ = self.mediation.transition_state(EngineState::Cold);
        }
        crate::log_info!("engine", "Engine torn down", from = from);
    }
}

impl Drop for BlackoutEngine {
    fn drop(&mut self) {
        self.security.destroy_ephemeral_key();
        self.boundary.destroy();
    }
}

fn sign_in_boundary(
    boundary: &mut Boundary,
    security: &SecurityController,
    payload: &[u8],
) -> Result<[u8; SIGNATURE_LEN], Anomaly> {
    let buffer = boundary.allocate_buffer(payload.len())?;
    buffer.write(payload)?;
    let contents = buffer.read()?;
    security.sign(&contents)
}
