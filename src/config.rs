//! Gateway configuration with environment overrides.

// std
use std::{env, time::Duration as StdDuration};
// self
use crate::{
	_prelude::*,
	error::ConfigError,
	session::{DEFAULT_LOGIN_PATH, DEFAULT_ROLE_KEY, DEFAULT_TOKEN_KEY},
};

/// Environment variable holding the backend base URL.
pub const BASE_URL_ENV: &str = "API_BASE_URL";
/// Environment variable holding the transport timeout in milliseconds.
pub const TIMEOUT_ENV: &str = "API_TIMEOUT_MS";
/// Local development backend used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Settings shared by the gateway, its transport, and the session context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GatewayConfig {
	/// Backend base URL every request path is resolved against.
	pub base_url: Url,
	/// Transport-level timeout; `None` keeps the transport default.
	pub timeout: Option<StdDuration>,
	/// Route the application navigates to after teardown.
	pub login_path: String,
	/// Storage key for the bearer token.
	pub token_key: String,
	/// Storage key for the cached role.
	pub role_key: String,
}
impl GatewayConfig {
	/// Builds a configuration for `base_url` with default keys and no timeout.
	pub fn new(base_url: &str) -> Result<Self, ConfigError> {
		Ok(Self {
			base_url: parse_base_url(base_url)?,
			timeout: None,
			login_path: DEFAULT_LOGIN_PATH.into(),
			token_key: DEFAULT_TOKEN_KEY.into(),
			role_key: DEFAULT_ROLE_KEY.into(),
		})
	}

	/// Reads [`BASE_URL_ENV`] and [`TIMEOUT_ENV`], falling back to [`DEFAULT_BASE_URL`].
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|name| env::var(name).ok())
	}

	/// Same as [`from_env`](Self::from_env) but reads variables through `lookup`.
	pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
		let base_url = lookup(BASE_URL_ENV)
			.filter(|value| !value.trim().is_empty())
			.unwrap_or_else(|| DEFAULT_BASE_URL.into());
		let mut config = Self::new(base_url.trim())?;

		if let Some(raw) = lookup(TIMEOUT_ENV) {
			let millis = raw
				.trim()
				.parse::<u64>()
				.map_err(|_| ConfigError::InvalidEnv { name: TIMEOUT_ENV, value: raw.clone() })?;

			config.timeout = Some(StdDuration::from_millis(millis));
		}

		Ok(config)
	}

	/// Sets the transport timeout.
	pub fn with_timeout(mut self, timeout: StdDuration) -> Self {
		self.timeout = Some(timeout);

		self
	}

	/// Sets the login route.
	pub fn with_login_path(mut self, path: impl Into<String>) -> Self {
		self.login_path = path.into();

		self
	}

	/// Sets the storage key for the bearer token.
	pub fn with_token_key(mut self, key: impl Into<String>) -> Self {
		self.token_key = key.into();

		self
	}

	/// Sets the storage key for the cached role.
	pub fn with_role_key(mut self, key: impl Into<String>) -> Self {
		self.role_key = key.into();

		self
	}

	/// Resolves an API path (with or without a leading slash) against the base URL.
	///
	/// Any path prefix on the base URL is preserved, so `http://host/api` + `/users` yields
	/// `http://host/api/users`.
	pub fn resolve(&self, path: &str) -> Result<Url, ConfigError> {
		let mut base = self.base_url.clone();

		if !base.path().ends_with('/') {
			let with_slash = format!("{}/", base.path());

			base.set_path(&with_slash);
		}

		base.join(path.trim_start_matches('/'))
			.map_err(|source| ConfigError::InvalidPath { path: path.to_owned(), source })
	}
}

fn parse_base_url(value: &str) -> Result<Url, ConfigError> {
	let url = Url::parse(value)
		.map_err(|source| ConfigError::InvalidBaseUrl { value: value.to_owned(), source })?;

	match url.scheme() {
		"http" | "https" => Ok(url),
		other => Err(ConfigError::UnsupportedScheme { scheme: other.to_owned() }),
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn lookup_defaults_to_local_backend() {
		let config = GatewayConfig::from_lookup(|_| None)
			.expect("Default configuration should build without environment.");

		assert_eq!(config.base_url.as_str(), "http://localhost:5000/");
		assert_eq!(config.timeout, None);
		assert_eq!(config.login_path, "/login");
		assert_eq!(config.token_key, "token");
		assert_eq!(config.role_key, "userRole");
		assert_eq!(
			config,
			GatewayConfig::new(DEFAULT_BASE_URL).expect("Default base URL should parse.")
		);
	}

	#[test]
	fn lookup_reads_overrides() {
		let config = GatewayConfig::from_lookup(|name| match name {
			BASE_URL_ENV => Some("https://api.example.com/v1".into()),
			TIMEOUT_ENV => Some("8000".into()),
			_ => None,
		})
		.expect("Overridden configuration should build.");

		assert_eq!(config.base_url.as_str(), "https://api.example.com/v1");
		assert_eq!(config.timeout, Some(StdDuration::from_millis(8000)));
	}

	#[test]
	fn lookup_rejects_bad_values() {
		let err = GatewayConfig::from_lookup(|name| {
			(name == TIMEOUT_ENV).then(|| "soon".to_owned())
		})
		.expect_err("Non-numeric timeout should be rejected.");

		assert!(matches!(err, ConfigError::InvalidEnv { name: TIMEOUT_ENV, .. }));

		let err = GatewayConfig::new("ftp://files.example.com")
			.expect_err("Non-HTTP schemes should be rejected.");

		assert!(matches!(err, ConfigError::UnsupportedScheme { .. }));
	}

	#[test]
	fn resolve_keeps_base_prefix() {
		let config =
			GatewayConfig::new("http://localhost:5000/api").expect("Base URL should parse.");
		let url = config.resolve("/tuitions/42").expect("Path should resolve.");

		assert_eq!(url.as_str(), "http://localhost:5000/api/tuitions/42");

		let root = GatewayConfig::new(DEFAULT_BASE_URL)
			.expect("Default base URL should parse.")
			.resolve("notifications/read-all")
			.expect("Path should resolve.");

		assert_eq!(root.as_str(), "http://localhost:5000/notifications/read-all");
	}
}
