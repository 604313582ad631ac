//! Identities and sessions kept in a local directory.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use stamps_protocol::util::ClockSource;
use tracing::{debug, info, warn};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::identity::Identity;
use crate::principal::Principal;
use crate::provider::{IdentityError, IdentityProvider, LoginPrompt};
use crate::seed::Seed;

/// Sessions end after this long without use
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

const IDENTITY_FILE: &str = "identity.json";
const SESSION_FILE: &str = "session.json";

#[derive(Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
struct IdentityFile {
    seed: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct SessionFile {
    principal: Principal,
    last_active: u64,
}

/// Keeps the identity seed (`identity.json`, owner read/write only) and the active session
/// (`session.json`) in a home directory. A session lapses once it has been idle for longer than
/// the idle timeout; [`restore`](IdentityProvider::restore) counts as activity.
pub struct FileIdentityProvider {
    home: PathBuf,
    idle_timeout: Duration,
    clock: ClockSource,
}

impl FileIdentityProvider {
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self {
            home: home.into(),
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            clock: ClockSource::System,
        }
    }

    pub fn idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    pub fn clock(mut self, clock: ClockSource) -> Self {
        self.clock = clock;
        self
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Replaces the stored identity with one derived from `seed` and signs in with it. An
    /// existing, different identity is only replaced after the prompt confirms.
    pub fn import(
        &mut self,
        seed: Seed,
        prompt: &mut dyn LoginPrompt,
    ) -> Result<Option<Identity>, IdentityError> {
        let imported = Identity::from_seed(seed)?;

        if let Some(existing) = self.load_identity()?
            && existing.principal() != imported.principal()
        {
            let question = format!(
                "Replace stored identity {} with {}?",
                existing.principal(),
                imported.principal()
            );
            if !prompt.confirm(&question)? {
                info!("login cancelled");
                return Ok(None);
            }
        }

        self.store_identity(&imported)?;
        self.start_session(&imported)?;
        Ok(Some(imported))
    }

    fn identity_path(&self) -> PathBuf {
        self.home.join(IDENTITY_FILE)
    }

    fn session_path(&self) -> PathBuf {
        self.home.join(SESSION_FILE)
    }

    fn load_identity(&self) -> Result<Option<Identity>, IdentityError> {
        let Some(json) = read_optional(&self.identity_path())? else {
            return Ok(None);
        };
        let json = Zeroizing::new(json);

        let file: IdentityFile = serde_json::from_str(&json)?;
        let seed = Seed::from_encoded(&file.seed)?;
        Ok(Some(Identity::from_seed(seed)?))
    }

    fn store_identity(&self, identity: &Identity) -> Result<(), IdentityError> {
        let file = IdentityFile {
            seed: identity.seed().to_hex(),
        };
        let contents = Zeroizing::new(serde_json::to_vec_pretty(&file)?);
        write_private(&self.identity_path(), &contents)?;
        debug!("stored identity {} in {}", identity.principal(), self.home.display());
        Ok(())
    }

    fn start_session(&self, identity: &Identity) -> Result<(), IdentityError> {
        let session = SessionFile {
            principal: identity.principal().clone(),
            last_active: self.clock.epoch_seconds(),
        };
        write_private(&self.session_path(), &serde_json::to_vec_pretty(&session)?)?;
        info!("signed in as {}", identity.principal());
        Ok(())
    }

    fn end_session(&self) -> Result<(), IdentityError> {
        match fs::remove_file(self.session_path()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl IdentityProvider for FileIdentityProvider {
    fn restore(&mut self) -> Result<Option<Identity>, IdentityError> {
        let Some(json) = read_optional(&self.session_path())? else {
            return Ok(None);
        };

        let session: SessionFile = match serde_json::from_str(&json) {
            Ok(session) => session,
            Err(e) => {
                warn!("discarding unreadable session: {e}");
                self.end_session()?;
                return Ok(None);
            }
        };

        let now = self.clock.epoch_seconds();
        let idle = now.saturating_sub(session.last_active);
        if idle > self.idle_timeout.as_secs() {
            info!("session for {} expired after {idle}s idle", session.principal);
            self.end_session()?;
            return Ok(None);
        }

        let Some(identity) = self.load_identity()? else {
            warn!("session refers to a missing identity");
            self.end_session()?;
            return Ok(None);
        };

        if identity.principal() != &session.principal {
            warn!(
                "session principal {} does not match stored identity {}",
                session.principal,
                identity.principal()
            );
            self.end_session()?;
            return Ok(None);
        }

        self.start_session(&identity)?;
        Ok(Some(identity))
    }

    fn login(&mut self, prompt: &mut dyn LoginPrompt) -> Result<Option<Identity>, IdentityError> {
        let identity = match self.load_identity()? {
            Some(identity) => {
                let question = format!("Sign in as {}?", identity.principal());
                if !prompt.confirm(&question)? {
                    info!("login cancelled");
                    return Ok(None);
                }
                identity
            }
            None => {
                let question = format!(
                    "No identity found in {}. Create a new one?",
                    self.home.display()
                );
                if !prompt.confirm(&question)? {
                    info!("login cancelled");
                    return Ok(None);
                }
                let identity = Identity::generate()?;
                self.store_identity(&identity)?;
                identity
            }
        };

        self.start_session(&identity)?;
        Ok(Some(identity))
    }

    fn logout(&mut self) -> Result<(), IdentityError> {
        self.end_session()?;
        info!("signed out");
        Ok(())
    }
}

fn read_optional(path: &Path) -> Result<Option<String>, IdentityError> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn write_private(path: &Path, contents: &[u8]) -> Result<(), IdentityError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;

    // mode() only applies to newly created files
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }

    file.write_all(contents)?;
    Ok(())
}
