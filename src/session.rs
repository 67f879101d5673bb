//! Explicit session context shared by the gateway middleware.
//!
//! [`SessionContext`] owns every piece of mutable session state the gateway touches: the
//! credential store holding the bearer token, the sign-out and navigation collaborators, and
//! the teardown counter. It is cloned into the middleware that needs it rather than living in
//! a global.
//!
//! Teardown is idempotent. Overlapping failed requests may each trigger it; every trigger
//! clears storage, signs out, and navigates once, and repeated runs leave the same end state.

pub mod collab;
pub mod secret;

pub use collab::*;
pub use secret::*;

// std
use std::sync::atomic::{AtomicU64, Ordering};
// self
use crate::{_prelude::*, config::GatewayConfig, obs, store::CredentialStore};

/// Storage key that holds the bearer token unless configured otherwise.
pub const DEFAULT_TOKEN_KEY: &str = "token";
/// Storage key that holds the cached role unless configured otherwise.
pub const DEFAULT_ROLE_KEY: &str = "userRole";
/// Route the application is sent to once the session ends.
pub const DEFAULT_LOGIN_PATH: &str = "/login";

/// Summary of a single teardown run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Teardown {
	/// A token was present in storage and has been removed.
	pub token_cleared: bool,
	/// The sign-out collaborator completed without error.
	pub signed_out: bool,
}

/// Session state injected into the gateway.
#[derive(Clone)]
pub struct SessionContext {
	store: Arc<dyn CredentialStore>,
	sign_out: Arc<dyn SignOut>,
	navigator: Arc<dyn Navigator>,
	token_key: String,
	role_key: String,
	login_path: String,
	teardowns: Arc<AtomicU64>,
	teardown_lock: Arc<AsyncMutex<()>>,
}
impl SessionContext {
	/// Creates a context over `store` with no-op collaborators and default keys.
	pub fn new(store: Arc<dyn CredentialStore>) -> Self {
		Self {
			store,
			sign_out: Arc::new(NoopSignOut),
			navigator: Arc::new(RouteState::default()),
			token_key: DEFAULT_TOKEN_KEY.into(),
			role_key: DEFAULT_ROLE_KEY.into(),
			login_path: DEFAULT_LOGIN_PATH.into(),
			teardowns: Default::default(),
			teardown_lock: Default::default(),
		}
	}

	/// Creates a context that uses the keys and login path from `config`.
	pub fn from_config(config: &GatewayConfig, store: Arc<dyn CredentialStore>) -> Self {
		Self::new(store)
			.with_token_key(config.token_key.clone())
			.with_role_key(config.role_key.clone())
			.with_login_path(config.login_path.clone())
	}

	/// Sets the identity-provider sign-out collaborator.
	pub fn with_sign_out(mut self, sign_out: Arc<dyn SignOut>) -> Self {
		self.sign_out = sign_out;

		self
	}

	/// Sets the navigation collaborator.
	pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
		self.navigator = navigator;

		self
	}

	/// Overrides the storage key holding the bearer token.
	pub fn with_token_key(mut self, key: impl Into<String>) -> Self {
		self.token_key = key.into();

		self
	}

	/// Overrides the storage key holding the cached role.
	pub fn with_role_key(mut self, key: impl Into<String>) -> Self {
		self.role_key = key.into();

		self
	}

	/// Overrides the login route used after teardown.
	pub fn with_login_path(mut self, path: impl Into<String>) -> Self {
		self.login_path = path.into();

		self
	}

	/// Login route used after teardown.
	pub fn login_path(&self) -> &str {
		&self.login_path
	}

	/// Number of teardowns performed through this context (and its clones).
	pub fn teardowns(&self) -> u64 {
		self.teardowns.load(Ordering::Relaxed)
	}

	/// Reads the current token from storage. Empty values count as absent.
	pub async fn token(&self) -> Result<Option<SessionToken>> {
		let raw = self.store.load(&self.token_key).await?;

		Ok(raw.filter(|value| !value.is_empty()).map(SessionToken::new))
	}

	/// Returns `true` when a token is currently stored.
	pub async fn is_authenticated(&self) -> Result<bool> {
		Ok(self.token().await?.is_some())
	}

	/// Stores a freshly issued token from the identity provider.
	pub async fn sign_in(&self, token: impl Into<String>) -> Result<()> {
		self.store.save(&self.token_key, token.into()).await?;

		Ok(())
	}

	/// Caches the backend role so dashboards can render before the profile loads.
	pub async fn remember_role(&self, role: impl Into<String>) -> Result<()> {
		self.store.save(&self.role_key, role.into()).await?;

		Ok(())
	}

	/// Reads the cached role, if any.
	pub async fn role(&self) -> Result<Option<String>> {
		Ok(self.store.load(&self.role_key).await?)
	}

	/// Tears the session down: clears token and role, signs out, navigates to login.
	///
	/// Every step is best-effort. Storage and sign-out failures are logged and reported in the
	/// returned [`Teardown`], and navigation happens regardless.
	pub async fn teardown(&self) -> Teardown {
		let _serialized = self.teardown_lock.lock().await;
		let token_cleared = match self.store.remove(&self.token_key).await {
			Ok(previous) => previous.is_some(),
			Err(e) => {
				obs::log_warn!("Failed to clear stored token during teardown: {e}");

				false
			},
		};

		if let Err(e) = self.store.remove(&self.role_key).await {
			obs::log_warn!("Failed to clear cached role during teardown: {e}");
		}

		let signed_out = match self.sign_out.sign_out().await {
			Ok(()) => true,
			Err(e) => {
				obs::log_warn!("{e}");

				false
			},
		};

		self.navigator.navigate(&self.login_path);
		self.teardowns.fetch_add(1, Ordering::Relaxed);
		obs::record_session_teardown();

		Teardown { token_cleared, signed_out }
	}
}
impl Debug for SessionContext {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SessionContext")
			.field("token_key", &self.token_key)
			.field("role_key", &self.role_key)
			.field("login_path", &self.login_path)
			.field("teardowns", &self.teardowns())
			.finish()
	}
}
