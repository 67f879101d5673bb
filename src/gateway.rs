//! The authenticated request gateway.
//!
//! [`Gateway`] is the single entry point every screen uses to reach the backend. It owns the
//! transport, the configuration, and a fixed middleware chain. A gateway built with
//! [`Gateway::with_session`] (or [`Gateway::authenticated`]) attaches the bearer token to every
//! request and tears the session down when the backend rejects it; a public gateway only logs.
//!
//! Rejections are still returned to the caller after teardown, so a screen can show a message
//! while the navigation to the login route takes effect. Nothing is retried.

mod metrics;

pub use metrics::GatewayMetrics;

// crates.io
use serde::de::DeserializeOwned;
// self
#[cfg(feature = "reqwest")] use crate::{http::ReqwestTransport, middleware::RequestLog};
use crate::{
	_prelude::*,
	config::GatewayConfig,
	http::{ApiRequest, ApiResponse, HttpTransport},
	middleware::{BearerAuth, Middleware, Next, SessionGuard},
	obs::{self, RequestOutcome, RequestSpan},
	session::SessionContext,
};

/// Backend gateway with an explicit middleware chain.
#[derive(Clone)]
pub struct Gateway {
	transport: Arc<dyn HttpTransport>,
	config: GatewayConfig,
	middleware: Vec<Arc<dyn Middleware>>,
	session: Option<SessionContext>,
	metrics: Arc<GatewayMetrics>,
}
impl Gateway {
	/// Creates a gateway over `transport` with an empty middleware chain.
	pub fn with_transport(config: GatewayConfig, transport: Arc<dyn HttpTransport>) -> Self {
		Self {
			transport,
			config,
			middleware: Vec::new(),
			session: None,
			metrics: Default::default(),
		}
	}

	/// Appends `layer` to the chain. Layers added first run outermost.
	pub fn with_middleware(mut self, layer: impl Middleware) -> Self {
		self.middleware.push(Arc::new(layer));

		self
	}

	/// Binds `session`: appends [`SessionGuard`] then [`BearerAuth`] to the chain.
	///
	/// Call once per gateway; binding twice would tear down twice per rejection.
	pub fn with_session(mut self, session: SessionContext) -> Self {
		self.middleware.push(Arc::new(SessionGuard::new(session.clone())));
		self.middleware.push(Arc::new(BearerAuth::new(session.clone())));
		self.session = Some(session);

		self
	}

	/// Session bound to this gateway, if any.
	pub fn session(&self) -> Option<&SessionContext> {
		self.session.as_ref()
	}

	/// Configuration in use.
	pub fn config(&self) -> &GatewayConfig {
		&self.config
	}

	/// Request counters.
	pub fn metrics(&self) -> &GatewayMetrics {
		&self.metrics
	}

	/// Sends `request` through the middleware chain.
	///
	/// Returns the response for 2xx statuses. Otherwise returns [`Error::AuthExpired`] for
	/// 401/403 (after teardown when a session is bound), [`Error::Status`] for any other
	/// status, or the transport failure unchanged.
	pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
		let span = RequestSpan::new(request.method.as_str(), "send");

		self.track(RequestOutcome::Attempt);

		let chain = Next::new(self.transport.as_ref(), &self.config, &self.middleware);
		let result = span.instrument(chain.run(request)).await;

		match &result {
			Ok(_) => self.track(RequestOutcome::Success),
			Err(Error::AuthExpired { .. }) => self.track(RequestOutcome::AuthExpired),
			Err(_) => self.track(RequestOutcome::Failure),
		}

		result
	}

	/// Sends `request` and decodes the JSON body as `T`.
	pub async fn send_json<T>(&self, request: ApiRequest) -> Result<T>
	where
		T: DeserializeOwned,
	{
		self.send(request).await?.json()
	}

	/// `GET path`, decoded as `T`.
	pub async fn get<T>(&self, path: impl Into<String>) -> Result<T>
	where
		T: DeserializeOwned,
	{
		self.send_json(ApiRequest::get(path)).await
	}

	/// `POST path` with a JSON body, decoded as `T`.
	pub async fn post<T>(&self, path: impl Into<String>, body: &impl Serialize) -> Result<T>
	where
		T: DeserializeOwned,
	{
		self.send_json(ApiRequest::post(path).json(body)?).await
	}

	/// `PUT path` with a JSON body, decoded as `T`.
	pub async fn put<T>(&self, path: impl Into<String>, body: &impl Serialize) -> Result<T>
	where
		T: DeserializeOwned,
	{
		self.send_json(ApiRequest::put(path).json(body)?).await
	}

	/// `PATCH path` with a JSON body, decoded as `T`.
	pub async fn patch<T>(&self, path: impl Into<String>, body: &impl Serialize) -> Result<T>
	where
		T: DeserializeOwned,
	{
		self.send_json(ApiRequest::patch(path).json(body)?).await
	}

	/// `DELETE path`, decoded as `T`.
	pub async fn delete<T>(&self, path: impl Into<String>) -> Result<T>
	where
		T: DeserializeOwned,
	{
		self.send_json(ApiRequest::delete(path)).await
	}

	fn track(&self, outcome: RequestOutcome) {
		self.metrics.record(outcome);
		obs::record_request_outcome(outcome);
	}
}
#[cfg(feature = "reqwest")]
impl Gateway {
	/// Creates an anonymous reqwest-backed gateway with request logging.
	pub fn public(config: GatewayConfig) -> Result<Self> {
		let transport = ReqwestTransport::from_config(&config)?;

		Ok(Self::with_transport(config, Arc::new(transport)).with_middleware(RequestLog))
	}

	/// Creates a reqwest-backed gateway bound to `session`, with request logging.
	pub fn authenticated(config: GatewayConfig, session: SessionContext) -> Result<Self> {
		Ok(Self::public(config)?.with_session(session))
	}
}
impl Debug for Gateway {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Gateway")
			.field("config", &self.config)
			.field("middleware", &self.middleware.len())
			.field("session", &self.session)
			.finish()
	}
}
