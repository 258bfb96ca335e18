// Copyright (c) 2025 - Cowboy AI, Inc.
//! Provider Lifecycle State Machine
//!
//! The provider moves through its lifecycle by pure transitions from
//! `(State, Input)` to the next state. [`StateHistory`] holds the current
//! state of a running provider and records every accepted transition with
//! its timestamp; rejected transitions leave it untouched.
//!
//! ```text
//! Uninitialized --Initialize--> Initialized --Cleanup--> CleanedUp
//!       |                                                   ^
//!       +---------------------Cleanup-----------------------+
//! ```
//!
//! # Example
//!
//! ```rust
//! use cim_provider::state_machine::{LifecycleInput, ProviderState, StateHistory};
//!
//! let mut lifecycle = StateHistory::new(ProviderState::Uninitialized);
//! lifecycle.apply(LifecycleInput::Initialize, chrono::Utc::now()).unwrap();
//! assert!(lifecycle.current().is_serving());
//!
//! // A second initialize is rejected and not recorded
//! assert!(lifecycle.apply(LifecycleInput::Initialize, chrono::Utc::now()).is_err());
//! assert_eq!(lifecycle.transitions().len(), 1);
//! ```

pub mod provider_lifecycle;

pub use provider_lifecycle::{LifecycleInput, ProviderState};

/// Result of a lifecycle transition
pub type TransitionResult<S> = Result<S, TransitionError>;

/// Rejected lifecycle transition
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    /// No transition leaves this state on the given input
    #[error("Invalid transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    /// Transition exists but its precondition does not hold
    #[error("Precondition failed: {0}")]
    PreconditionFailed(String),
}

/// Lifecycle states driven by inputs
pub trait StateMachine: Sized + Copy {
    /// Input that triggers transitions
    type Input;

    /// Next state for `input`, or why it is rejected
    fn transition(&self, input: &Self::Input) -> TransitionResult<Self>;

    /// Inputs accepted from this state
    fn valid_inputs(&self) -> Vec<Self::Input>;

    /// Check if a transition is valid without performing it
    fn can_transition(&self, input: &Self::Input) -> bool {
        self.transition(input).is_ok()
    }
}

/// One accepted transition
#[derive(Debug, Clone)]
pub struct Transition<S, I> {
    pub from: S,
    pub to: S,
    pub input: I,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Current lifecycle state plus the transitions that led to it
#[derive(Debug, Clone)]
pub struct StateHistory<S: StateMachine> {
    current: S,
    transitions: Vec<Transition<S, S::Input>>,
}

impl<S: StateMachine> StateHistory<S> {
    pub fn new(initial: S) -> Self {
        Self {
            current: initial,
            transitions: Vec::new(),
        }
    }

    /// Apply `input`; on error the state and history are unchanged
    pub fn apply(
        &mut self,
        input: S::Input,
        timestamp: chrono::DateTime<chrono::Utc>,
    ) -> TransitionResult<()> {
        let to = self.current.transition(&input)?;
        self.transitions.push(Transition {
            from: self.current,
            to,
            input,
            timestamp,
        });
        self.current = to;
        Ok(())
    }

    pub fn current(&self) -> S {
        self.current
    }

    pub fn transitions(&self) -> &[Transition<S, S::Input>] {
        &self.transitions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_history_records_accepted_transitions() {
        let started = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let stopped = Utc.with_ymd_and_hms(2025, 1, 1, 1, 0, 0).unwrap();

        let mut lifecycle = StateHistory::new(ProviderState::Uninitialized);
        lifecycle.apply(LifecycleInput::Initialize, started).unwrap();
        lifecycle.apply(LifecycleInput::Cleanup, stopped).unwrap();
        assert!(lifecycle.apply(LifecycleInput::Cleanup, stopped).is_err());

        assert_eq!(lifecycle.current(), ProviderState::CleanedUp);
        let transitions = lifecycle.transitions();
        assert_eq!(transitions.len(), 2);
        assert_eq!(transitions[0].from, ProviderState::Uninitialized);
        assert_eq!(transitions[0].timestamp, started);
        assert_eq!(transitions[1].input, LifecycleInput::Cleanup);
        assert_eq!(transitions[1].to, ProviderState::CleanedUp);
    }
}
