//! The caller's session, handed explicitly to every workflow.

use std::sync::Arc;

use stamps_identity::{Identity, IdentityError, IdentityProvider, LoginPrompt, Principal};
use tracing::debug;

/// Holds the identity of the signed-in caller, if any.
///
/// A session is created on login and torn down on logout. Every change of identity swaps in a
/// new shared identity and bumps the [`generation`](Session::generation).
#[derive(Debug, Clone, Default)]
pub struct Session {
    identity: Option<Arc<Identity>>,
    generation: u64,
}

impl Session {
    pub fn signed_out() -> Self {
        Self::default()
    }

    pub fn signed_in(identity: Identity) -> Self {
        Self {
            identity: Some(Arc::new(identity)),
            generation: 1,
        }
    }

    /// Picks up a session that is still active with `provider`.
    pub fn restore(provider: &mut dyn IdentityProvider) -> Result<Self, IdentityError> {
        match provider.restore()? {
            Some(identity) => Ok(Self::signed_in(identity)),
            None => Ok(Self::signed_out()),
        }
    }

    /// Runs the provider's login flow. Returns true when the caller ended up signed in; a
    /// cancelled login leaves the session untouched.
    pub fn login(
        &mut self,
        provider: &mut dyn IdentityProvider,
        prompt: &mut dyn LoginPrompt,
    ) -> Result<bool, IdentityError> {
        match provider.login(prompt)? {
            Some(identity) => {
                self.replace(Some(identity));
                Ok(true)
            }
            None => Ok(self.is_authenticated()),
        }
    }

    /// Ends the session with the provider and forgets the identity.
    pub fn logout(&mut self, provider: &mut dyn IdentityProvider) -> Result<(), IdentityError> {
        provider.logout()?;
        self.replace(None);
        Ok(())
    }

    /// Swaps in `identity` without involving a provider.
    pub fn replace(&mut self, identity: Option<Identity>) {
        self.identity = identity.map(Arc::new);
        self.generation += 1;
        debug!(
            "session generation {} ({})",
            self.generation,
            self.principal()
                .map(|p| p.to_string())
                .unwrap_or_else(|| "signed out".to_string())
        );
    }

    pub fn identity(&self) -> Option<&Arc<Identity>> {
        self.identity.as_ref()
    }

    pub fn principal(&self) -> Option<&Principal> {
        self.identity.as_ref().map(|i| i.principal())
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
