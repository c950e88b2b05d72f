//! Phases of one request inside the Auth Gateway.
//!
//! ```text
//! Sending ──► Completed
//!    │   └──► TransportFailed
//!    ▼
//! AuthFailed ──► Refreshing ──► Retrying ──► Completed | Rejected | TransportFailed
//!    │               └────────► LoggedOut
//!    ├──► Retrying   (credential already renewed by someone else)
//!    ├──► LoggedOut  (session gone)
//!    └──► Rejected   (anonymous or refresh call)
//! ```

use std::fmt;

use crate::domain::foundation::StateMachine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatewayPhase {
    /// First attempt in flight.
    Sending,
    /// A response other than an authorization failure was received.
    Completed,
    /// The transport failed (network, timeout, malformed response).
    TransportFailed,
    /// The backend answered 401.
    AuthFailed,
    /// Waiting on the shared refresh operation.
    Refreshing,
    /// Second and final attempt in flight.
    Retrying,
    /// Terminal authorization failure surfaced to the caller.
    Rejected,
    /// Session cleared; caller receives `SessionExpired`.
    LoggedOut,
}

impl StateMachine for GatewayPhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use GatewayPhase::*;
        matches!(
            (self, target),
            (Sending, Completed)
                | (Sending, TransportFailed)
                | (Sending, AuthFailed)
                | (AuthFailed, Refreshing)
                | (AuthFailed, Retrying)
                | (AuthFailed, LoggedOut)
                | (AuthFailed, Rejected)
                | (Refreshing, Retrying)
                | (Refreshing, LoggedOut)
                | (Retrying, Completed)
                | (Retrying, Rejected)
                | (Retrying, TransportFailed)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use GatewayPhase::*;
        match self {
            Sending => vec![Completed, TransportFailed, AuthFailed],
            AuthFailed => vec![Refreshing, Retrying, LoggedOut, Rejected],
            Refreshing => vec![Retrying, LoggedOut],
            Retrying => vec![Completed, Rejected, TransportFailed],
            Completed | TransportFailed | Rejected | LoggedOut => vec![],
        }
    }
}

impl fmt::Display for GatewayPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GatewayPhase::Sending => "SENDING",
            GatewayPhase::Completed => "COMPLETED",
            GatewayPhase::TransportFailed => "TRANSPORT_FAILED",
            GatewayPhase::AuthFailed => "AUTH_FAILED",
            GatewayPhase::Refreshing => "REFRESHING",
            GatewayPhase::Retrying => "RETRYING",
            GatewayPhase::Rejected => "REJECTED",
            GatewayPhase::LoggedOut => "LOGGED_OUT",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use GatewayPhase::*;

    const ALL: [GatewayPhase; 8] = [
        Sending,
        Completed,
        TransportFailed,
        AuthFailed,
        Refreshing,
        Retrying,
        Rejected,
        LoggedOut,
    ];

    #[test]
    fn retrying_can_never_reenter_auth_failed() {
        assert!(!Retrying.can_transition_to(&AuthFailed));
        assert!(!Retrying.can_transition_to(&Refreshing));
        assert!(Retrying.transition_to(AuthFailed).is_err());
    }

    #[test]
    fn refreshing_only_leads_to_retry_or_logout() {
        assert_eq!(Refreshing.valid_transitions(), vec![Retrying, LoggedOut]);
    }

    #[test]
    fn outcomes_are_terminal() {
        for phase in [Completed, TransportFailed, Rejected, LoggedOut] {
            assert!(phase.is_terminal(), "{} should be terminal", phase);
        }
        for phase in [Sending, AuthFailed, Refreshing, Retrying] {
            assert!(!phase.is_terminal(), "{} should not be terminal", phase);
        }
    }

    #[test]
    fn can_transition_to_is_consistent_with_valid_transitions() {
        for from in ALL {
            for to in ALL {
                assert_eq!(
                    from.can_transition_to(&to),
                    from.valid_transitions().contains(&to),
                    "{:?} -> {:?}",
                    from,
                    to
                );
            }
        }
    }

    #[test]
    fn transition_to_succeeds_for_refresh_path() {
        assert_eq!(AuthFailed.transition_to(Refreshing), Ok(Refreshing));
        assert_eq!(Refreshing.transition_to(Retrying), Ok(Retrying));
    }

    #[test]
    fn display_uses_screaming_case() {
        assert_eq!(AuthFailed.to_string(), "AUTH_FAILED");
        assert_eq!(LoggedOut.to_string(), "LOGGED_OUT");
    }
}
