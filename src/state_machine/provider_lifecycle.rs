// Copyright (c) 2025 - Cowboy AI, Inc.
//! Provider Lifecycle States
//!
//! # States
//!
//! - Uninitialized: loaded by the CIMOM, no registry yet
//! - Initialized: registry seeded, serving requests
//! - CleanedUp: released (terminal)
//!
//! # Inputs
//!
//! - Initialize: Uninitialized → Initialized
//! - Cleanup: Uninitialized | Initialized → CleanedUp

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{StateMachine, TransitionError, TransitionResult};

/// Provider lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProviderState {
    Uninitialized,
    Initialized,
    CleanedUp,
}

impl ProviderState {
    /// Check if requests may be served
    pub fn is_serving(&self) -> bool {
        matches!(self, Self::Initialized)
    }
}

impl fmt::Display for ProviderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Uninitialized => "Uninitialized",
            Self::Initialized => "Initialized",
            Self::CleanedUp => "CleanedUp",
        };
        write!(f, "{}", name)
    }
}

/// Lifecycle input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleInput {
    Initialize,
    Cleanup,
}

impl StateMachine for ProviderState {
    type Input = LifecycleInput;

    fn transition(&self, input: &Self::Input) -> TransitionResult<Self> {
        use LifecycleInput::*;
        use ProviderState::*;

        match (self, input) {
            (Uninitialized, Initialize) => Ok(Initialized),
            (Uninitialized, Cleanup) | (Initialized, Cleanup) => Ok(CleanedUp),
            (Initialized, Initialize) => Err(TransitionError::PreconditionFailed(
                "provider already initialized".to_string(),
            )),
            (CleanedUp, _) => Err(TransitionError::InvalidTransition {
                from: CleanedUp.to_string(),
                to: "any state".to_string(),
            }),
        }
    }

    fn valid_inputs(&self) -> Vec<Self::Input> {
        match self {
            Self::Uninitialized => vec![LifecycleInput::Initialize, LifecycleInput::Cleanup],
            Self::Initialized => vec![LifecycleInput::Cleanup],
            Self::CleanedUp => Vec::new(),
        }
    }
}
