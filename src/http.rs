//! Transport primitives for backend API calls.
//!
//! [`ApiRequest`] is the request descriptor every screen hands to the gateway, and
//! [`ApiResponse`] is what comes back. [`HttpTransport`] is the gateway's only dependency on an
//! HTTP stack: it sends exactly what it is given and reports whatever status the backend
//! answered with. Status classification (success, session rejection, other failures) happens in
//! the gateway so custom transports never need to know about sessions.

// crates.io
use serde::de::DeserializeOwned;
#[cfg(feature = "reqwest")]
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, RETRY_AFTER};
#[cfg(feature = "reqwest")] use time::format_description::well_known::Rfc2822;
// self
#[cfg(feature = "reqwest")] use crate::{config::GatewayConfig, error::TransportError};
use crate::{_prelude::*, error::ConfigError};

/// Header carrying the bearer token.
pub const AUTHORIZATION: &str = "authorization";
/// Header describing the request body encoding.
pub const CONTENT_TYPE: &str = "content-type";

const BODY_PREVIEW_LIMIT: usize = 512;
const JSON_MEDIA_TYPE: &str = "application/json";

/// Boxed future returned by [`HttpTransport::execute`].
pub type TransportFuture<'a> = Pin<Box<dyn Future<Output = Result<ApiResponse>> + 'a + Send>>;

/// HTTP methods used by the marketplace API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
	/// `GET`
	Get,
	/// `POST`
	Post,
	/// `PUT`
	Put,
	/// `PATCH`
	Patch,
	/// `DELETE`
	Delete,
}
impl Method {
	/// Returns the canonical upper-case method name.
	pub const fn as_str(self) -> &'static str {
		match self {
			Method::Get => "GET",
			Method::Post => "POST",
			Method::Put => "PUT",
			Method::Patch => "PATCH",
			Method::Delete => "DELETE",
		}
	}
}
impl Display for Method {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outbound request descriptor.
///
/// Header names are stored lower-cased so lookups and overrides are case-insensitive.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
	/// HTTP method.
	pub method: Method,
	/// Path relative to the configured base URL, e.g. `/tuitions/42`.
	pub path: String,
	/// Query parameters appended in order.
	pub query: Vec<(String, String)>,
	/// Request headers keyed by lower-case name.
	pub headers: BTreeMap<String, String>,
	/// JSON body, if any.
	pub body: Option<serde_json::Value>,
}
impl ApiRequest {
	/// Creates a request without query, headers, or body.
	pub fn new(method: Method, path: impl Into<String>) -> Self {
		Self {
			method,
			path: path.into(),
			query: Vec::new(),
			headers: BTreeMap::new(),
			body: None,
		}
	}

	/// Shorthand for a `GET` request.
	pub fn get(path: impl Into<String>) -> Self {
		Self::new(Method::Get, path)
	}

	/// Shorthand for a `POST` request.
	pub fn post(path: impl Into<String>) -> Self {
		Self::new(Method::Post, path)
	}

	/// Shorthand for a `PUT` request.
	pub fn put(path: impl Into<String>) -> Self {
		Self::new(Method::Put, path)
	}

	/// Shorthand for a `PATCH` request.
	pub fn patch(path: impl Into<String>) -> Self {
		Self::new(Method::Patch, path)
	}

	/// Shorthand for a `DELETE` request.
	pub fn delete(path: impl Into<String>) -> Self {
		Self::new(Method::Delete, path)
	}

	/// Appends a query parameter.
	pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.query.push((key.into(), value.into()));

		self
	}

	/// Sets a header, replacing any previous value with the same (case-insensitive) name.
	pub fn header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
		self.set_header(name, value);

		self
	}

	/// In-place variant of [`header`](Self::header) used by middleware.
	pub fn set_header(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
		self.headers.insert(name.as_ref().to_ascii_lowercase(), value.into());
	}

	/// Returns a header value by case-insensitive name.
	pub fn header_value(&self, name: &str) -> Option<&str> {
		self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
	}

	/// Serializes `body` as the JSON payload.
	pub fn json(self, body: &impl Serialize) -> Result<Self, ConfigError> {
		Ok(self.json_value(serde_json::to_value(body)?))
	}

	/// Uses an already-built JSON value as the payload.
	///
	/// Adds `content-type: application/json` unless a content type was already set.
	pub fn json_value(mut self, body: serde_json::Value) -> Self {
		self.headers.entry(CONTENT_TYPE.to_owned()).or_insert_with(|| JSON_MEDIA_TYPE.to_owned());
		self.body = Some(body);

		self
	}
}

/// Response returned by the backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
	/// HTTP status code.
	pub status: u16,
	/// Response headers keyed by lower-case name.
	pub headers: BTreeMap<String, String>,
	/// Raw body bytes.
	pub body: Vec<u8>,
	/// Retry-After hint expressed as a relative duration.
	pub retry_after: Option<Duration>,
}
impl ApiResponse {
	/// Creates a response with the given status and body and no headers.
	pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
		Self { status, headers: BTreeMap::new(), body: body.into(), retry_after: None }
	}

	/// Returns `true` for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// Returns `true` when the backend rejected the session credentials.
	pub fn is_session_rejection(&self) -> bool {
		matches!(self.status, 401 | 403)
	}

	/// Decodes the body as JSON. An empty body decodes as JSON `null`.
	pub fn json<T>(&self) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let bytes: &[u8] = if self.body.is_empty() { b"null" } else { &self.body };
		let mut deserializer = serde_json::Deserializer::from_slice(bytes);

		serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|source| Error::Decode { source, status: self.status })
	}

	/// Returns the body as (lossy) UTF-8 text.
	pub fn text(&self) -> String {
		String::from_utf8_lossy(&self.body).into_owned()
	}

	/// Returns the first characters of the body for error messages.
	pub fn body_preview(&self) -> String {
		self.text().chars().take(BODY_PREVIEW_LIMIT).collect()
	}

	/// Converts a non-success response into the matching gateway error.
	pub fn into_error(self) -> Error {
		let body = self.body_preview();

		if self.is_session_rejection() {
			Error::AuthExpired { status: self.status, body }
		} else {
			Error::Status { status: self.status, body, retry_after: self.retry_after }
		}
	}
}

/// Abstraction over HTTP stacks capable of executing gateway requests.
///
/// Implementations send the request to `url` (already resolved against the base URL and
/// carrying the query string) with exactly the headers and body of `request`, and return the
/// backend's answer whatever its status. Only failures to obtain an answer are errors.
pub trait HttpTransport
where
	Self: 'static + Send + Sync,
{
	/// Executes `request` against `url`.
	fn execute<'a>(&'a self, url: Url, request: &'a ApiRequest) -> TransportFuture<'a>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds a client honoring the configured timeout.
	pub fn from_config(config: &GatewayConfig) -> Result<Self, ConfigError> {
		let mut builder = ReqwestClient::builder();

		if let Some(timeout) = config.timeout {
			builder = builder.timeout(timeout);
		}

		Ok(Self(builder.build()?))
	}
}
#[cfg(feature = "reqwest")]
impl HttpTransport for ReqwestTransport {
	fn execute<'a>(&'a self, url: Url, request: &'a ApiRequest) -> TransportFuture<'a> {
		Box::pin(async move {
			let method = match request.method {
				Method::Get => reqwest::Method::GET,
				Method::Post => reqwest::Method::POST,
				Method::Put => reqwest::Method::PUT,
				Method::Patch => reqwest::Method::PATCH,
				Method::Delete => reqwest::Method::DELETE,
			};
			let mut headers = HeaderMap::with_capacity(request.headers.len());

			for (name, value) in &request.headers {
				let invalid = || ConfigError::InvalidHeader { name: name.clone() };
				let header_name =
					HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
				let header_value = HeaderValue::from_str(value).map_err(|_| invalid())?;

				headers.insert(header_name, header_value);
			}

			let mut builder = self.0.request(method, url).headers(headers);

			if let Some(body) = &request.body {
				builder = builder.body(serde_json::to_vec(body).map_err(ConfigError::from)?);
			}

			let response = builder.send().await.map_err(TransportError::from)?;
			let status = response.status().as_u16();
			let retry_after = parse_retry_after(response.headers());
			let headers = response
				.headers()
				.iter()
				.filter_map(|(name, value)| {
					value.to_str().ok().map(|value| (name.as_str().to_owned(), value.to_owned()))
				})
				.collect();
			let body = response.bytes().await.map_err(TransportError::from)?.to_vec();

			Ok(ApiResponse { status, headers, body, retry_after })
		})
	}
}

#[cfg(feature = "reqwest")]
fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
	let value = headers.get(RETRY_AFTER)?;
	let raw = value.to_str().ok()?.trim();

	if let Ok(secs) = raw.parse::<u64>() {
		return i64::try_from(secs).ok().map(Duration::seconds);
	}
	if let Ok(moment) = OffsetDateTime::parse(raw, &Rfc2822) {
		let delta = moment - OffsetDateTime::now_utc();

		if delta.is_positive() {
			return Some(delta);
		}
	}

	None
}
