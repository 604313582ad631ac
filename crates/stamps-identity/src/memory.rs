use tracing::info;

use crate::identity::Identity;
use crate::provider::{IdentityError, IdentityProvider, LoginPrompt};
use crate::seed::Seed;

/// Keeps a single identity in memory for the life of the process. Suitable for tests and for
/// callers that bring their own seed.
#[derive(Debug, Default)]
pub struct MemoryIdentityProvider {
    seed: Option<Seed>,
    signed_in: bool,
}

impl MemoryIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed(seed: Seed) -> Self {
        Self {
            seed: Some(seed),
            signed_in: false,
        }
    }

    fn identity(&self) -> Result<Option<Identity>, IdentityError> {
        match &self.seed {
            Some(seed) => Ok(Some(Identity::from_seed(Seed::new(seed.expose())?)?)),
            None => Ok(None),
        }
    }
}

impl IdentityProvider for MemoryIdentityProvider {
    fn restore(&mut self) -> Result<Option<Identity>, IdentityError> {
        if !self.signed_in {
            return Ok(None);
        }
        self.identity()
    }

    fn login(&mut self, prompt: &mut dyn LoginPrompt) -> Result<Option<Identity>, IdentityError> {
        if !prompt.confirm("Sign in?")? {
            info!("login cancelled");
            return Ok(None);
        }

        if self.seed.is_none() {
            self.seed = Some(Seed::new_random());
        }

        self.signed_in = true;
        self.identity()
    }

    fn logout(&mut self) -> Result<(), IdentityError> {
        self.signed_in = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Always(bool);

    impl LoginPrompt for Always {
        fn confirm(&mut self, _question: &str) -> std::io::Result<bool> {
            Ok(self.0)
        }
    }

    #[test]
    fn login_logout_cycle() {
        let mut provider = MemoryIdentityProvider::new();
        assert!(provider.restore().unwrap().is_none());

        assert!(provider.login(&mut Always(false)).unwrap().is_none());
        assert!(provider.restore().unwrap().is_none());

        let identity = provider.login(&mut Always(true)).unwrap().unwrap();
        let restored = provider.restore().unwrap().unwrap();
        assert_eq!(identity.principal(), restored.principal());

        provider.logout().unwrap();
        assert!(provider.restore().unwrap().is_none());

        let again = provider.login(&mut Always(true)).unwrap().unwrap();
        assert_eq!(again.principal(), identity.principal());
    }

    #[test]
    fn uses_the_given_seed() {
        let expected = Identity::from_seed(Seed::new(&[0x31u8; 32]).unwrap()).unwrap();

        let mut provider = MemoryIdentityProvider::from_seed(Seed::new(&[0x31u8; 32]).unwrap());
        let identity = provider.login(&mut Always(true)).unwrap().unwrap();
        assert_eq!(identity.principal(), expected.principal());
    }
}
