//! Session state container.

use std::sync::Arc;

use tiffin::{
    routes::AuthStatus,
    storage::{KeyValueStore, TOKEN_KEY},
};
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{info, warn};

use crate::{
    auth::{AuthService, ProfileState, SessionToken},
    domain::profile::ProfileService,
    http::SessionSignal,
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Session {
    Anonymous,
    Authenticated {
        token: SessionToken,
        profile: ProfileState,
    },
}

/// Holds the signed-in session and keeps it in step with storage.
///
/// The token lives under [`TOKEN_KEY`] so the API client can attach it.
/// Storage failures are logged and otherwise ignored.
#[derive(Debug)]
pub struct AuthStore {
    storage: Arc<dyn KeyValueStore>,
    signals: broadcast::Receiver<SessionSignal>,
    session: Session,
}

impl AuthStore {
    /// Rehydrate the session from a previously stored token.
    ///
    /// A stored token starts with its profile still loading, so the session
    /// reports [`AuthStatus::Resolving`] until [`Self::refresh_profile`] runs.
    pub fn new(
        storage: Arc<dyn KeyValueStore>,
        signals: broadcast::Receiver<SessionSignal>,
    ) -> Self {
        let token = match storage.get(TOKEN_KEY) {
            Ok(token) => token.map(SessionToken::new).filter(|token| !token.is_empty()),
            Err(error) => {
                warn!(%error, "failed to read stored session token");
                None
            }
        };

        let session = match token {
            Some(token) => Session::Authenticated {
                token,
                profile: ProfileState::Loading,
            },
            None => Session::Anonymous,
        };

        Self {
            storage,
            signals,
            session,
        }
    }

    /// Enter the authenticated state with a freshly issued token.
    pub fn login(&mut self, token: SessionToken) {
        if let Err(error) = self.storage.set(TOKEN_KEY, token.expose()) {
            warn!(%error, "failed to persist session token");
        }

        info!("session started");

        self.session = Session::Authenticated {
            token,
            profile: ProfileState::Loading,
        };
    }

    /// Fetch the profile for the current session.
    ///
    /// A 401 ends the session. Any other failure keeps the session and marks
    /// the profile unavailable.
    pub async fn refresh_profile(&mut self, profiles: &dyn ProfileService) {
        if !self.is_authenticated() {
            return;
        }

        let state = match profiles.profile().await {
            Ok(profile) => ProfileState::Loaded(profile),
            Err(error) if error.is_unauthorized() => {
                info!("stored session rejected by backend");
                self.clear_local();
                return;
            }
            Err(error) => {
                warn!(%error, "profile unavailable");
                ProfileState::Unavailable(error.message())
            }
        };

        if let Session::Authenticated { profile, .. } = &mut self.session {
            *profile = state;
        }
    }

    /// End the session. The backend call is best effort.
    pub async fn logout(&mut self, auth: &dyn AuthService) {
        if self.is_authenticated()
            && let Err(error) = auth.logout().await
        {
            warn!(%error, "backend logout failed");
        }

        self.clear_local();
    }

    /// Apply pending session signals.
    ///
    /// Returns `true` when an invalidation tore down a live session. A
    /// lagged receiver counts as an invalidation.
    pub fn poll_signals(&mut self) -> bool {
        let mut invalidated = false;

        loop {
            match self.signals.try_recv() {
                Ok(SessionSignal::Invalidated) | Err(TryRecvError::Lagged(_)) => {
                    invalidated = true;
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }

        if invalidated && self.is_authenticated() {
            info!("session invalidated");
            self.clear_local();
            return true;
        }

        false
    }

    /// Status used by the view guard.
    pub fn status(&self) -> AuthStatus {
        match &self.session {
            Session::Anonymous => AuthStatus::Anonymous,
            Session::Authenticated {
                profile: ProfileState::Loading,
                ..
            } => AuthStatus::Resolving,
            Session::Authenticated { .. } => AuthStatus::Authenticated,
        }
    }

    /// Current token, if signed in.
    pub fn token(&self) -> Option<&SessionToken> {
        match &self.session {
            Session::Authenticated { token, .. } => Some(token),
            Session::Anonymous => None,
        }
    }

    /// Current profile state, if signed in.
    pub fn profile(&self) -> Option<&ProfileState> {
        match &self.session {
            Session::Authenticated { profile, .. } => Some(profile),
            Session::Anonymous => None,
        }
    }

    /// Whether a token is held, whatever the profile state.
    pub fn is_authenticated(&self) -> bool {
        matches!(self.session, Session::Authenticated { .. })
    }

    fn clear_local(&mut self) {
        if let Err(error) = self.storage.remove(TOKEN_KEY) {
            warn!(%error, "failed to remove session token");
        }

        self.session = Session::Anonymous;
    }
}
