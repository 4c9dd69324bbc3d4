//! In-memory [`StateStore`] for tests and dry runs.

use chrono::{DateTime, Utc};
use gitpet_types::PetState;
use validator::Validate;

use crate::error::StoreError;
use crate::{LoadOrigin, LoadedState, StateStore};

/// Keeps the state in memory and counts saves.
///
/// Saves are validated like the file store, so an invalid state is
/// rejected here too.
#[derive(Debug, Default, Clone)]
pub struct MemoryStateStore {
    state: Option<PetState>,
    saves: usize,
}

impl MemoryStateStore {
    /// An empty store; the first load hatches a new pet.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `state`.
    pub const fn with_state(state: PetState) -> Self {
        Self {
            state: Some(state),
            saves: 0,
        }
    }

    /// The last saved (or seeded) state.
    pub const fn state(&self) -> Option<&PetState> {
        self.state.as_ref()
    }

    /// Number of successful saves.
    pub const fn saves(&self) -> usize {
        self.saves
    }
}

impl StateStore for MemoryStateStore {
    fn load(&mut self, now: DateTime<Utc>) -> LoadedState {
        match &self.state {
            Some(state) => LoadedState {
                state: state.clone(),
                origin: LoadOrigin::Stored {
                    repairs: Vec::new(),
                },
            },
            None => LoadedState {
                state: PetState::new(now),
                origin: LoadOrigin::Fresh,
            },
        }
    }

    fn save(&mut self, state: &PetState) -> Result<(), StoreError> {
        state.validate()?;
        self.state = Some(state.clone());
        self.saves = self.saves.saturating_add(1);
        Ok(())
    }
}
