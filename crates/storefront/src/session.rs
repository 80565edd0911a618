//! Session state: the bearer token and the identity derived from it.
//!
//! The backend issues a JWT at login. This store never verifies the
//! signature - the backend is the trust boundary and re-checks the token on
//! every protected call - it only decodes the payload segment to learn who
//! is signed in and when the token expires.
//!
//! Expiry is evaluated once, when the store is opened. A token that expires
//! mid-session keeps being attached to requests until the next startup; the
//! backend's 401 responses are the operative gate in between.

use std::time::{SystemTime, UNIX_EPOCH};

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;
use tokio::sync::watch;

use ecobazaar_core::{AccountStatus, Role};

use crate::storage::{SELLER_STATUS_KEY, Storage, TOKEN_KEY};

/// Milliseconds since the unix epoch.
fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .ok()
        .and_then(|d| i64::try_from(d.as_millis()).ok())
        .unwrap_or(i64::MAX)
}

/// Errors from decoding a bearer token.
///
/// These never reach the user: an undecodable token simply means "not
/// signed in".
#[derive(Debug, Error)]
pub enum TokenDecodeError {
    #[error("token is not a three-segment JWT")]
    Malformed,
    #[error("payload segment is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("claims are not valid JSON: {0}")]
    Claims(#[from] serde_json::Error),
}

/// Claims the backend puts in its tokens.
#[derive(Debug, Deserialize)]
struct Claims {
    /// Subject - the account's email address.
    sub: String,
    /// Granted roles, in grant order.
    #[serde(default)]
    roles: Vec<String>,
    /// Expiry, in seconds since the unix epoch.
    exp: i64,
}

/// Identity derived from a decoded token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// The account's email address.
    pub subject: String,
    /// Role names as granted by the backend, order preserved.
    pub roles: Vec<String>,
    /// Token expiry, in seconds since the unix epoch.
    pub expires_at_epoch_secs: i64,
}

impl Identity {
    /// Whether the token this identity came from has expired as of now.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at_epoch_secs * 1000 <= now_millis()
    }

    /// The first granted role that parses as a known [`Role`].
    #[must_use]
    pub fn primary_role(&self) -> Option<Role> {
        self.roles.iter().find_map(|r| r.parse().ok())
    }
}

/// Decode the payload segment of a JWT into an [`Identity`].
///
/// No signature verification is performed.
///
/// # Errors
///
/// Returns an error if the token is not a three-segment JWT with a base64
/// JSON payload carrying `sub` and `exp` claims.
pub fn decode_identity(token: &str) -> Result<Identity, TokenDecodeError> {
    let mut segments = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(TokenDecodeError::Malformed);
    };

    let decoded = URL_SAFE_NO_PAD.decode(payload)?;
    let claims: Claims = serde_json::from_slice(&decoded)?;

    Ok(Identity {
        subject: claims.sub,
        roles: claims.roles,
        expires_at_epoch_secs: claims.exp,
    })
}

/// A snapshot of the session at one point in time.
///
/// The invariant maintained by [`SessionStore`]: `identity` is present if
/// and only if `token` is present.
#[derive(Clone, Default)]
pub struct SessionState {
    token: Option<SecretString>,
    identity: Option<Identity>,
}

impl SessionState {
    fn signed_in(token: SecretString, identity: Identity) -> Self {
        Self {
            token: Some(token),
            identity: Some(identity),
        }
    }

    /// Whether a user is signed in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// The bearer token to attach to protected requests.
    #[must_use]
    pub const fn token(&self) -> Option<&SecretString> {
        self.token.as_ref()
    }

    /// The signed-in identity.
    #[must_use]
    pub const fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }
}

impl std::fmt::Debug for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionState")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("identity", &self.identity)
            .finish()
    }
}

/// Single source of truth for "is a user signed in, and as whom".
///
/// Construct one per app with [`SessionStore::open`]; views observe changes
/// through [`SessionStore::subscribe`].
pub struct SessionStore {
    storage: Storage,
    state: watch::Sender<SessionState>,
}

impl SessionStore {
    /// Open the session store, hydrating from persisted state.
    ///
    /// A persisted token that no longer decodes, or whose expiry has
    /// passed, is cleared and the session starts anonymous - stale
    /// credentials are never surfaced.
    #[must_use]
    pub fn open(storage: Storage) -> Self {
        let initial = match storage.get::<String>(TOKEN_KEY) {
            Ok(Some(raw)) => match decode_identity(&raw) {
                Ok(identity) if !identity.is_expired() => {
                    SessionState::signed_in(SecretString::from(raw), identity)
                }
                Ok(_) => {
                    tracing::info!("persisted token has expired, starting anonymous");
                    clear_persisted(&storage);
                    SessionState::default()
                }
                Err(e) => {
                    tracing::warn!(error = %e, "persisted token is invalid, starting anonymous");
                    clear_persisted(&storage);
                    SessionState::default()
                }
            },
            Ok(None) => SessionState::default(),
            Err(e) => {
                tracing::warn!(error = %e, "could not read persisted token, starting anonymous");
                clear_persisted(&storage);
                SessionState::default()
            }
        };

        let (state, _) = watch::channel(initial);
        Self { storage, state }
    }

    /// Replace the session with one for `token`.
    ///
    /// Fails silently: if the token does not decode, the call logs and
    /// leaves the current session untouched. The caller already showed a
    /// login success; a malformed token is a backend bug, not a user error.
    pub fn login(&self, token: &str) {
        match decode_identity(token) {
            Ok(identity) => {
                if let Err(e) = self.storage.set(TOKEN_KEY, token) {
                    tracing::warn!(error = %e, "failed to persist token");
                }
                self.state.send_replace(SessionState::signed_in(
                    SecretString::from(token.to_owned()),
                    identity,
                ));
            }
            Err(e) => {
                tracing::warn!(error = %e, "ignoring login with undecodable token");
            }
        }
    }

    /// Clear the session and all persisted credentials. Idempotent.
    pub fn logout(&self) {
        clear_persisted(&self.storage);
        self.state.send_replace(SessionState::default());
    }

    /// A snapshot of the current session.
    #[must_use]
    pub fn current(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Observe session changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Persist the seller approval status reported at login.
    pub fn remember_seller_status(&self, status: AccountStatus) {
        if let Err(e) = self.storage.set(SELLER_STATUS_KEY, &status) {
            tracing::warn!(error = %e, "failed to persist seller status");
        }
    }

    /// The persisted seller approval status, if any.
    #[must_use]
    pub fn seller_status(&self) -> Option<AccountStatus> {
        match self.storage.get(SELLER_STATUS_KEY) {
            Ok(status) => status,
            Err(e) => {
                tracing::warn!(error = %e, "could not read persisted seller status");
                None
            }
        }
    }
}

fn clear_persisted(storage: &Storage) {
    for key in [TOKEN_KEY, SELLER_STATUS_KEY] {
        if let Err(e) = storage.remove(key) {
            tracing::warn!(key, error = %e, "failed to clear persisted session state");
        }
    }
}

/// Where to send the user after a successful login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// The buyer storefront.
    Storefront,
    /// The admin dashboard.
    AdminDashboard,
    /// The seller dashboard (active sellers only).
    SellerDashboard,
    /// Holding view for sellers awaiting approval.
    SellerPendingApproval,
    /// Blocked view for suspended sellers.
    SellerBlocked,
}

/// Post-login routing decision from the role and (for sellers) the approval
/// status reported by the login endpoint.
#[must_use]
pub fn destination_for(role: Role, status: Option<AccountStatus>) -> Destination {
    match role {
        Role::Buyer => Destination::Storefront,
        Role::Admin => Destination::AdminDashboard,
        Role::Seller => match status {
            Some(AccountStatus::Active) => Destination::SellerDashboard,
            Some(AccountStatus::Suspended) => Destination::SellerBlocked,
            Some(AccountStatus::PendingApproval) | None => Destination::SellerPendingApproval,
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// Build an unsigned JWT with the given claims payload.
    fn token_with_claims(claims: &serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
        format!("{header}.{payload}.sig")
    }

    fn token(sub: &str, roles: &[&str], exp: i64) -> String {
        token_with_claims(&serde_json::json!({ "sub": sub, "roles": roles, "exp": exp }))
    }

    fn future_exp() -> i64 {
        now_millis() / 1000 + 3600
    }

    fn past_exp() -> i64 {
        now_millis() / 1000 - 3600
    }

    fn temp_store() -> (tempfile::TempDir, Storage) {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path());
        (dir, storage)
    }

    #[test]
    fn test_decode_identity() {
        let token = token("buyer@example.com", &["BUYER"], 1_900_000_000);
        let identity = decode_identity(&token).unwrap();
        assert_eq!(identity.subject, "buyer@example.com");
        assert_eq!(identity.roles, vec!["BUYER"]);
        assert_eq!(identity.expires_at_epoch_secs, 1_900_000_000);
        assert_eq!(identity.primary_role(), Some(Role::Buyer));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            decode_identity("not-a-jwt"),
            Err(TokenDecodeError::Malformed)
        ));
        assert!(matches!(
            decode_identity("a.b.c.d"),
            Err(TokenDecodeError::Malformed)
        ));
        assert!(matches!(
            decode_identity("head.!!!.sig"),
            Err(TokenDecodeError::Base64(_))
        ));

        let not_json = format!("head.{}.sig", URL_SAFE_NO_PAD.encode("plain text"));
        assert!(matches!(
            decode_identity(&not_json),
            Err(TokenDecodeError::Claims(_))
        ));
    }

    #[test]
    fn test_open_with_no_token_is_anonymous() {
        let (_dir, storage) = temp_store();
        let store = SessionStore::open(storage);
        assert!(!store.current().is_authenticated());
        assert!(store.current().identity().is_none());
    }

    #[test]
    fn test_login_then_reopen_restores_session() {
        let (_dir, storage) = temp_store();
        let store = SessionStore::open(storage.clone());
        store.login(&token("buyer@example.com", &["BUYER"], future_exp()));
        assert!(store.current().is_authenticated());

        let reopened = SessionStore::open(storage);
        let state = reopened.current();
        assert!(state.is_authenticated());
        assert_eq!(state.identity().unwrap().subject, "buyer@example.com");
    }

    #[test]
    fn test_expired_token_clears_on_open() {
        let (_dir, storage) = temp_store();
        storage
            .set(TOKEN_KEY, &token("buyer@example.com", &["BUYER"], past_exp()))
            .unwrap();

        let store = SessionStore::open(storage.clone());
        assert!(!store.current().is_authenticated());
        assert!(store.current().identity().is_none());
        // The stale credential is also gone from disk.
        assert!(storage.get::<String>(TOKEN_KEY).unwrap().is_none());
    }

    #[test]
    fn test_undecodable_persisted_token_clears_on_open() {
        let (_dir, storage) = temp_store();
        storage.set(TOKEN_KEY, "garbage").unwrap();

        let store = SessionStore::open(storage.clone());
        assert!(!store.current().is_authenticated());
        assert!(storage.get::<String>(TOKEN_KEY).unwrap().is_none());
    }

    #[test]
    fn test_login_with_bad_token_is_silent_noop() {
        let (_dir, storage) = temp_store();
        let store = SessionStore::open(storage.clone());
        store.login("garbage");
        assert!(!store.current().is_authenticated());
        assert!(storage.get::<String>(TOKEN_KEY).unwrap().is_none());
    }

    #[test]
    fn test_login_replaces_previous_session() {
        let (_dir, storage) = temp_store();
        let store = SessionStore::open(storage);
        store.login(&token("first@example.com", &["BUYER"], future_exp()));
        store.login(&token("second@example.com", &["SELLER"], future_exp()));
        assert_eq!(
            store.current().identity().unwrap().subject,
            "second@example.com"
        );
    }

    #[test]
    fn test_logout_is_idempotent_and_clears_storage() {
        let (_dir, storage) = temp_store();
        let store = SessionStore::open(storage.clone());
        store.login(&token("buyer@example.com", &["BUYER"], future_exp()));
        store.remember_seller_status(AccountStatus::Active);

        store.logout();
        store.logout();

        assert!(!store.current().is_authenticated());
        assert!(storage.get::<String>(TOKEN_KEY).unwrap().is_none());
        assert!(store.seller_status().is_none());
    }

    #[test]
    fn test_subscribers_see_changes() {
        let (_dir, storage) = temp_store();
        let store = SessionStore::open(storage);
        let mut rx = store.subscribe();

        store.login(&token("buyer@example.com", &["BUYER"], future_exp()));
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().is_authenticated());

        store.logout();
        assert!(rx.has_changed().unwrap());
        assert!(!rx.borrow_and_update().is_authenticated());
    }

    #[test]
    fn test_seller_status_roundtrip() {
        let (_dir, storage) = temp_store();
        let store = SessionStore::open(storage);
        assert!(store.seller_status().is_none());
        store.remember_seller_status(AccountStatus::PendingApproval);
        assert_eq!(
            store.seller_status(),
            Some(AccountStatus::PendingApproval)
        );
    }

    #[test]
    fn test_destination_routing() {
        assert_eq!(destination_for(Role::Buyer, None), Destination::Storefront);
        assert_eq!(
            destination_for(Role::Admin, None),
            Destination::AdminDashboard
        );
        assert_eq!(
            destination_for(Role::Seller, Some(AccountStatus::Active)),
            Destination::SellerDashboard
        );
        assert_eq!(
            destination_for(Role::Seller, Some(AccountStatus::Suspended)),
            Destination::SellerBlocked
        );
        assert_eq!(
            destination_for(Role::Seller, Some(AccountStatus::PendingApproval)),
            Destination::SellerPendingApproval
        );
        assert_eq!(
            destination_for(Role::Seller, None),
            Destination::SellerPendingApproval
        );
    }
}
