//! Saved tutors and tuitions.

// self
use crate::{_prelude::*, api::Extra, gateway::Gateway, http::ApiRequest};

/// What a bookmark points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookmarkKind {
	/// A tutor profile.
	Tutor,
	/// A tuition post.
	Tuition,
}
impl BookmarkKind {
	/// Wire label.
	pub const fn as_str(self) -> &'static str {
		match self {
			BookmarkKind::Tutor => "tutor",
			BookmarkKind::Tuition => "tuition",
		}
	}
}

/// A saved item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
	/// Document identifier.
	#[serde(rename = "_id")]
	pub id: Option<String>,
	/// Bookmarked tutor or tuition id.
	pub item_id: String,
	/// Item kind.
	#[serde(rename = "type")]
	pub kind: Option<BookmarkKind>,
	/// Remaining fields.
	#[serde(flatten)]
	pub extra: Extra,
}

/// Bookmark state after a toggle or lookup.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkState {
	/// Whether the item is now bookmarked.
	#[serde(default)]
	pub bookmarked: bool,
	/// Backend message for the toggle.
	pub message: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ToggleBody<'a> {
	item_id: &'a str,
	#[serde(rename = "type")]
	kind: BookmarkKind,
}

impl Gateway {
	/// `POST /bookmarks`: adds the bookmark, or removes it when it already exists.
	pub async fn toggle_bookmark(
		&self,
		item_id: &str,
		kind: BookmarkKind,
	) -> Result<BookmarkState> {
		self.post("/bookmarks", &ToggleBody { item_id, kind }).await
	}

	/// `GET /is-bookmarked?itemId=..&type=..`.
	pub async fn is_bookmarked(&self, item_id: &str, kind: BookmarkKind) -> Result<bool> {
		let request =
			ApiRequest::get("/is-bookmarked").query("itemId", item_id).query("type", kind.as_str());
		let state: BookmarkState = self.send_json(request).await?;

		Ok(state.bookmarked)
	}

	/// `GET /my-bookmarks?type=..`.
	pub async fn my_bookmarks(&self, kind: BookmarkKind) -> Result<Vec<Bookmark>> {
		self.list(ApiRequest::get("/my-bookmarks").query("type", kind.as_str())).await
	}
}
