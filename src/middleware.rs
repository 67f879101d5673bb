//! Middleware composed around the transport call.
//!
//! Each [`Middleware`] receives the request and a [`Next`] handle for the rest of the chain.
//! The gateway builds the chain once at construction; there is no implicit registration on a
//! shared client. The built-in layers are:
//!
//! - [`RequestLog`]: logs every request and failed status.
//! - [`SessionGuard`]: tears the session down when the backend answers 401 or 403, then hands
//!   the original error back.
//! - [`BearerAuth`]: reads the token from storage on every call and sets `authorization`.

// self
use crate::{
	_prelude::*,
	config::GatewayConfig,
	http::{AUTHORIZATION, ApiRequest, ApiResponse, HttpTransport},
	obs,
	session::SessionContext,
};

/// Boxed future returned by middleware and the chain.
pub type GatewayFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + 'a + Send>>;

/// A layer wrapping the remaining call chain.
pub trait Middleware
where
	Self: 'static + Send + Sync,
{
	/// Handles `request`, usually by calling [`Next::run`] exactly once.
	fn handle<'a>(&'a self, request: ApiRequest, next: Next<'a>) -> GatewayFuture<'a, ApiResponse>;
}

/// The rest of the middleware chain, ending at the transport.
pub struct Next<'a> {
	transport: &'a dyn HttpTransport,
	config: &'a GatewayConfig,
	chain: &'a [Arc<dyn Middleware>],
}
impl<'a> Next<'a> {
	pub(crate) fn new(
		transport: &'a dyn HttpTransport,
		config: &'a GatewayConfig,
		chain: &'a [Arc<dyn Middleware>],
	) -> Self {
		Self { transport, config, chain }
	}

	/// Passes `request` to the next layer, or to the transport when the chain is exhausted.
	///
	/// Non-2xx answers resolve to an error here, so outer layers observe them as `Err`.
	pub fn run(self, request: ApiRequest) -> GatewayFuture<'a, ApiResponse> {
		match self.chain.split_first() {
			Some((head, rest)) => head.handle(request, Next { chain: rest, ..self }),
			None => Box::pin(dispatch(self.transport, self.config, request)),
		}
	}
}
impl Debug for Next<'_> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Next").field("remaining", &self.chain.len()).finish()
	}
}

async fn dispatch(
	transport: &dyn HttpTransport,
	config: &GatewayConfig,
	request: ApiRequest,
) -> Result<ApiResponse> {
	let mut url = config.resolve(&request.path)?;

	if !request.query.is_empty() {
		url.query_pairs_mut().extend_pairs(request.query.iter());
	}

	let response = transport.execute(url, &request).await?;

	if response.is_success() { Ok(response) } else { Err(response.into_error()) }
}

/// Attaches `authorization: Bearer <token>` when the session holds a token.
///
/// The token is read from storage on every call, so a sign-in or teardown is visible to the
/// very next request.
#[derive(Clone, Debug)]
pub struct BearerAuth {
	session: SessionContext,
}
impl BearerAuth {
	/// Creates the layer over `session`.
	pub fn new(session: SessionContext) -> Self {
		Self { session }
	}
}
impl Middleware for BearerAuth {
	fn handle<'a>(
		&'a self,
		mut request: ApiRequest,
		next: Next<'a>,
	) -> GatewayFuture<'a, ApiResponse> {
		Box::pin(async move {
			if let Some(token) = self.session.token().await? {
				request.set_header(AUTHORIZATION, token.bearer());
			}

			next.run(request).await
		})
	}
}

/// Tears the session down on 401/403 and then surfaces the original error.
#[derive(Clone, Debug)]
pub struct SessionGuard {
	session: SessionContext,
}
impl SessionGuard {
	/// Creates the layer over `session`.
	pub fn new(session: SessionContext) -> Self {
		Self { session }
	}
}
impl Middleware for SessionGuard {
	fn handle<'a>(&'a self, request: ApiRequest, next: Next<'a>) -> GatewayFuture<'a, ApiResponse> {
		Box::pin(async move {
			let result = next.run(request).await;

			if let Err(Error::AuthExpired { status, .. }) = &result {
				obs::log_warn!(
					"Backend rejected the session with HTTP {status}; redirecting to {}.",
					self.session.login_path()
				);

				self.session.teardown().await;
			}

			result
		})
	}
}

/// Logs each request and classifies failed statuses.
#[derive(Clone, Copy, Debug, Default)]
pub struct RequestLog;
impl Middleware for RequestLog {
	fn handle<'a>(&'a self, request: ApiRequest, next: Next<'a>) -> GatewayFuture<'a, ApiResponse> {
		Box::pin(async move {
			obs::log_debug!("[Request] {} {}", request.method, request.path);

			let result = next.run(request).await;

			if let Err(e) = &result {
				match e.status() {
					Some(400) => obs::log_warn!("Bad Request (400)"),
					Some(401) => obs::log_warn!("Unauthorized (401)"),
					Some(403) => obs::log_warn!("Forbidden (403)"),
					Some(500) => obs::log_warn!("Server Error (500)"),
					Some(status) => obs::log_warn!("HTTP Error: {status}"),
					None => obs::log_warn!("Request failed: {e}"),
				}
			}

			result
		})
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{http::TransportFuture, store::MemoryStore};

	struct StatusTransport(u16);
	impl HttpTransport for StatusTransport {
		fn execute<'a>(&'a self, url: Url, request: &'a ApiRequest) -> TransportFuture<'a> {
			let body = serde_json::json!({
				"url": url.as_str(),
				"authorization": request.header_value(AUTHORIZATION),
			})
			.to_string();
			let status = self.0;

			Box::pin(async move { Ok(ApiResponse::new(status, body)) })
		}
	}

	fn config() -> GatewayConfig {
		GatewayConfig::new("http://backend.test").expect("Test base URL should parse.")
	}

	#[tokio::test]
	async fn empty_chain_dispatches_with_query() {
		let transport = StatusTransport(200);
		let config = config();
		let response = Next::new(&transport, &config, &[])
			.run(ApiRequest::get("/tuitions").query("subject", "Math").query("page", "2"))
			.await
			.expect("2xx response should pass through.");
		let echoed: serde_json::Value = response.json().expect("Echo body should decode.");

		assert_eq!(echoed["url"], "http://backend.test/tuitions?subject=Math&page=2");
		assert_eq!(echoed["authorization"], serde_json::Value::Null);
	}

	#[tokio::test]
	async fn bearer_auth_reads_store_per_call() {
		let store = MemoryStore::default();
		let session = SessionContext::new(Arc::new(store.clone()));
		let chain: Vec<Arc<dyn Middleware>> = vec![Arc::new(BearerAuth::new(session.clone()))];
		let transport = StatusTransport(200);
		let config = config();
		let anonymous: serde_json::Value = Next::new(&transport, &config, &chain)
			.run(ApiRequest::get("/users"))
			.await
			.expect("Anonymous request should succeed.")
			.json()
			.expect("Echo body should decode.");

		assert_eq!(anonymous["authorization"], serde_json::Value::Null);

		session.sign_in("fresh-token").await.expect("Sign-in should succeed.");

		let signed: serde_json::Value = Next::new(&transport, &config, &chain)
			.run(ApiRequest::get("/users"))
			.await
			.expect("Authenticated request should succeed.")
			.json()
			.expect("Echo body should decode.");

		assert_eq!(signed["authorization"], "Bearer fresh-token");
	}

	#[tokio::test]
	async fn session_guard_ignores_other_failures() {
		let session = SessionContext::new(Arc::new(MemoryStore::default()));
		let chain: Vec<Arc<dyn Middleware>> =
			vec![Arc::new(RequestLog), Arc::new(SessionGuard::new(session.clone()))];
		let transport = StatusTransport(500);
		let config = config();
		let err = Next::new(&transport, &config, &chain)
			.run(ApiRequest::get("/reports/analytics"))
			.await
			.expect_err("5xx response should fail.");

		assert!(matches!(err, Error::Status { status: 500, .. }));
		assert_eq!(session.teardowns(), 0);

		let transport = StatusTransport(403);
		let err = Next::new(&transport, &config, &chain)
			.run(ApiRequest::get("/reports/analytics"))
			.await
			.expect_err("403 response should fail.");

		assert!(err.is_auth_expired());
		assert_eq!(session.teardowns(), 1);
	}
}
