use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use tokio::sync::watch;

/// AuthState
///
/// The navigator's view of the authentication provider: whether a user is
/// currently signed in, and a one-time "auth resolved" signal that settles
/// after the initial session check and stays settled.
#[async_trait]
pub trait AuthState: Send + Sync {
    /// True while a user is signed in.
    fn current_user_present(&self) -> bool;

    /// Completes once the initial authentication check is done. Returns
    /// immediately on every call after that.
    async fn wait_for_auth(&self);
}

/// Shared handle stored in `NavigatorState`.
pub type AuthStateRef = Arc<dyn AuthState>;

/// AuthSignal
///
/// The production `AuthState`: the authentication provider calls `resolve`
/// when its first session check completes and `set_signed_in` on every later
/// sign-in or sign-out.
pub struct AuthSignal {
    signed_in: AtomicBool,
    resolved: watch::Sender<bool>,
}

impl AuthSignal {
    pub fn new() -> Self {
        let (resolved, _) = watch::channel(false);
        Self {
            signed_in: AtomicBool::new(false),
            resolved,
        }
    }

    /// Settles the signal with the result of the initial check. Later calls
    /// only update the user presence.
    pub fn resolve(&self, signed_in: bool) {
        self.set_signed_in(signed_in);
        let settled = self.resolved.send_if_modified(|resolved| {
            let first = !*resolved;
            *resolved = true;
            first
        });
        if settled {
            tracing::debug!(signed_in, "auth state resolved");
        }
    }

    pub fn set_signed_in(&self, signed_in: bool) {
        self.signed_in.store(signed_in, Ordering::SeqCst);
    }

    pub fn is_resolved(&self) -> bool {
        *self.resolved.borrow()
    }
}

impl Default for AuthSignal {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthState for AuthSignal {
    fn current_user_present(&self) -> bool {
        self.signed_in.load(Ordering::SeqCst)
    }

    async fn wait_for_auth(&self) {
        let mut rx = self.resolved.subscribe();
        // The sender lives in `self`, so the channel cannot close while we wait.
        let _ = rx.wait_for(|resolved| *resolved).await;
    }
}

/// StaticAuth
///
/// Already-resolved auth state with a fixed user presence. Used by tests that
/// do not exercise the auth wait.
#[derive(Clone, Copy, Debug)]
pub struct StaticAuth {
    pub signed_in: bool,
}

impl StaticAuth {
    pub fn signed_in() -> Self {
        Self { signed_in: true }
    }

    pub fn signed_out() -> Self {
        Self { signed_in: false }
    }
}

#[async_trait]
impl AuthState for StaticAuth {
    fn current_user_present(&self) -> bool {
        self.signed_in
    }

    async fn wait_for_auth(&self) {}
}
