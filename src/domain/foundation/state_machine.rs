//! State machine trait for lifecycle enums.
//!
//! Used by the gateway to name each phase of an in-flight request and to keep
//! the allowed moves between phases in one place.

use super::ValidationError;

/// Trait for enums that represent a finite state machine.
///
/// Implementors list their allowed transitions; validated transitions and
/// terminal detection come for free.
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if moving from self to target is allowed.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all states reachable in one step from the current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs the transition, returning error if it is not allowed.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Checks if the current state has no outgoing transitions.
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
