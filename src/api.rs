//! Typed marketplace endpoints layered on [`Gateway`](crate::gateway::Gateway).
//!
//! Each submodule adds an `impl Gateway` block for one resource. Models keep any JSON fields
//! they do not name in an `extra` map, since the backend's documents are loosely shaped.

pub mod applications;
pub mod bookmarks;
pub mod messages;
pub mod notifications;
pub mod payments;
pub mod reviews;
pub mod role_requests;
pub mod schedules;
pub mod tuitions;
pub mod users;

pub use applications::*;
pub use bookmarks::*;
pub use messages::*;
pub use notifications::*;
pub use payments::*;
pub use reviews::*;
pub use role_requests::*;
pub use schedules::*;
pub use tuitions::*;
pub use users::*;

// crates.io
use serde::de::DeserializeOwned;
use url::form_urlencoded;
// self
use crate::{_prelude::*, gateway::Gateway, http::ApiRequest};

/// Unnamed JSON fields carried alongside a model.
pub type Extra = serde_json::Map<String, serde_json::Value>;

/// Acknowledgement returned by write endpoints.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteAck {
	/// Identifier of an inserted document.
	pub inserted_id: Option<String>,
	/// Number of documents changed by an update.
	pub modified_count: Option<u64>,
	/// Number of documents removed by a delete.
	pub deleted_count: Option<u64>,
	/// Explicit success flag some endpoints send.
	pub success: Option<bool>,
	/// Remaining fields.
	#[serde(flatten)]
	pub extra: Extra,
}
impl WriteAck {
	/// Returns `true` when the backend reports that something was written.
	pub fn is_effective(&self) -> bool {
		self.inserted_id.is_some()
			|| self.modified_count.is_some_and(|count| count > 0)
			|| self.deleted_count.is_some_and(|count| count > 0)
			|| self.success == Some(true)
	}
}

/// Pagination block attached to list responses.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
	/// Current page, starting at 1.
	pub page: Option<u32>,
	/// Page size.
	pub limit: Option<u32>,
	/// Total number of matching items.
	pub total: Option<u64>,
	/// Total number of pages.
	pub total_pages: Option<u32>,
}

/// List response that may arrive as a bare array or as `{ data, pagination | totalPages }`.
///
/// An object without a `data` array (such as `{ "success": false, ... }`) is a decode error.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(from = "PageRepr<T>")]
pub struct Page<T> {
	/// Items on this page.
	pub items: Vec<T>,
	/// Pagination details, when the backend sent any.
	pub pagination: Option<Pagination>,
}
impl<T> Page<T> {
	/// Total pages, defaulting to 1.
	pub fn total_pages(&self) -> u32 {
		self.pagination.as_ref().and_then(|p| p.total_pages).unwrap_or(1).max(1)
	}
}
impl<T> From<PageRepr<T>> for Page<T> {
	fn from(repr: PageRepr<T>) -> Self {
		match repr {
			PageRepr::List(items) => Self { items, pagination: None },
			PageRepr::Wrapped { data, pagination, total_pages } => {
				let pagination = match (pagination, total_pages) {
					(Some(mut p), fallback) => {
						p.total_pages = p.total_pages.or(fallback);

						Some(p)
					},
					(None, Some(total_pages)) =>
						Some(Pagination { total_pages: Some(total_pages), ..Default::default() }),
					(None, None) => None,
				};

				Self { items: data, pagination }
			},
		}
	}
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PageRepr<T> {
	List(Vec<T>),
	#[serde(rename_all = "camelCase")]
	Wrapped { data: Vec<T>, pagination: Option<Pagination>, total_pages: Option<u32> },
}

/// Percent-encodes a value for use as a single path segment.
pub(crate) fn segment(value: &str) -> String {
	form_urlencoded::byte_serialize(value.as_bytes()).collect::<String>().replace('+', "%20")
}

impl Gateway {
	/// Sends `request` and decodes a JSON array. A `null` body yields an empty list.
	pub(crate) async fn list<T>(&self, request: ApiRequest) -> Result<Vec<T>>
	where
		T: DeserializeOwned,
	{
		let list: Option<Vec<T>> = self.send_json(request).await?;

		Ok(list.unwrap_or_default())
	}
}
