//! Session tokens for rejecting results from superseded requests.

use std::fmt;

use crate::error::VizError;

/// Identifier of one request session. Later sessions compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionToken(u64);

impl SessionToken {
    /// Raw counter value.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic token source; only the most recently issued token is current.
///
/// # Example
/// ```
/// use sortviz_core::session::TokenIssuer;
///
/// let mut issuer = TokenIssuer::new();
/// let first = issuer.issue();
/// let second = issuer.issue();
/// assert!(second > first);
/// assert!(issuer.check(first).is_err());
/// assert!(issuer.check(second).is_ok());
/// ```
#[derive(Debug, Default)]
pub struct TokenIssuer {
    current: u64,
}

impl TokenIssuer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new session, superseding every earlier token.
    pub fn issue(&mut self) -> SessionToken {
        self.current += 1;
        SessionToken(self.current)
    }

    /// Supersede the current session without starting a new one.
    pub fn invalidate(&mut self) {
        self.current += 1;
    }

    /// Token of the live session.
    #[must_use]
    pub fn current(&self) -> SessionToken {
        SessionToken(self.current)
    }

    #[must_use]
    pub fn is_current(&self, token: SessionToken) -> bool {
        token.0 == self.current
    }

    /// `Err(VizError::Stale)` unless `token` is current.
    pub fn check(&self, token: SessionToken) -> Result<(), VizError> {
        if self.is_current(token) {
            Ok(())
        } else {
            Err(VizError::Stale {
                token: token.0,
                current: self.current,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalidate_supersedes_issued_token() {
        let mut issuer = TokenIssuer::new();
        let token = issuer.issue();
        issuer.invalidate();
        assert!(!issuer.is_current(token));
        assert_eq!(
            issuer.check(token),
            Err(VizError::Stale {
                token: 1,
                current: 2
            })
        );
    }

    #[test]
    fn fresh_issuer_has_no_live_token() {
        let mut issuer = TokenIssuer::new();
        let initial = issuer.current();
        let issued = issuer.issue();
        assert_ne!(initial, issued);
        assert_eq!(issued.to_string(), "#1");
    }
}
