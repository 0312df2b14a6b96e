//! Single shared PIN gate
//!
//! The PIN is either unset or set. The first verification attempt against an
//! unset PIN stores the attempted value (first-run bootstrap); that transition
//! is the only one and cannot be undone through this API.

use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::records::RecordStore;
use crate::types::Category;

/// Persisted PIN state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PinState {
    Unset,
    Set(String),
}

impl PinState {
    /// An absent or empty stored value counts as unset
    pub fn from_stored(stored: Option<String>) -> Self {
        match stored {
            Some(pin) if !pin.is_empty() => PinState::Set(pin),
            _ => PinState::Unset,
        }
    }

    pub fn is_set(&self) -> bool {
        matches!(self, PinState::Set(_))
    }
}

/// Successful verification outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    /// No PIN existed; the attempt is now the PIN
    FirstTime,
    /// Attempt matched the stored PIN
    Accepted,
}

/// PIN verification and change over the `user:pin` document
#[derive(Clone)]
pub struct PinGate {
    records: Arc<RecordStore>,
}

impl PinGate {
    pub fn new(records: Arc<RecordStore>) -> Self {
        Self { records }
    }

    pub async fn state(&self) -> CoreResult<PinState> {
        let stored: Option<String> = self.records.read_value(Category::Pin).await?;
        Ok(PinState::from_stored(stored))
    }

    /// Verify `attempt`. Against an unset PIN this stores `attempt` and
    /// returns [`Verification::FirstTime`].
    pub async fn verify(&self, attempt: &str) -> CoreResult<Verification> {
        let _guard = self.records.lock(Category::Pin).await;

        match self.state().await? {
            PinState::Unset => {
                self.records.write_value(Category::Pin, attempt).await?;
                log::info!("PIN set on first verification");
                Ok(Verification::FirstTime)
            }
            PinState::Set(stored) if stored == attempt => Ok(Verification::Accepted),
            PinState::Set(_) => Err(CoreError::InvalidPin),
        }
    }

    /// Replace the PIN. `old` must equal the stored PIN exactly; an unset PIN
    /// matches nothing.
    pub async fn change(&self, old: &str, new: &str) -> CoreResult<()> {
        let _guard = self.records.lock(Category::Pin).await;

        match self.state().await? {
            PinState::Set(stored) if stored == old => {
                self.records.write_value(Category::Pin, new).await?;
                log::info!("PIN changed");
                Ok(())
            }
            _ => Err(CoreError::InvalidCurrentPin),
        }
    }
}
