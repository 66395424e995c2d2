//! Guard Page use case.
//!
//! Runs before any page logic: a protected page without a stored credential
//! navigates to the login page and must not load.

use crate::ports::credential_store::CredentialStore;
use crate::ports::navigator::Navigator;
use labdash_domain::{GuardDecision, LOGIN_PATH, Page, guard_path};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct GuardPageUseCase {
    store: Arc<dyn CredentialStore>,
    navigator: Arc<dyn Navigator>,
}

impl GuardPageUseCase {
    pub fn new(store: Arc<dyn CredentialStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self { store, navigator }
    }

    /// Check `page`, redirecting to the login page when needed.
    pub fn check(&self, page: Page) -> GuardDecision {
        self.check_path(page.path())
    }

    /// Check a raw navigation path.
    ///
    /// An unreadable store counts as no credential.
    pub fn check_path(&self, path: &str) -> GuardDecision {
        let has_credential = match self.store.load() {
            Ok(credential) => credential.is_some(),
            Err(e) => {
                warn!("Failed to read stored credential: {}", e);
                false
            }
        };

        let decision = guard_path(path, has_credential);
        if decision.is_redirect() {
            info!("No credential for {}, redirecting to {}", path, LOGIN_PATH);
            self.navigator.navigate(LOGIN_PATH);
        } else {
            debug!("Page guard allows {}", path);
        }
        decision
    }
}
