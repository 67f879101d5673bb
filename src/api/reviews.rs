//! Student reviews of tutors.

// self
use crate::{
	_prelude::*,
	api::{Extra, WriteAck, segment},
	gateway::Gateway,
	http::ApiRequest,
};

/// A published review.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
	/// Document identifier.
	#[serde(rename = "_id")]
	pub id: Option<String>,
	/// Reviewed tutor.
	pub tutor_email: Option<String>,
	/// Reviewing student.
	pub student_email: Option<String>,
	/// Star rating, 1 to 5.
	pub rating: Option<u8>,
	/// Review text.
	pub comment: Option<String>,
	/// Tuition the review refers to.
	pub tuition_id: Option<String>,
	/// Remaining fields.
	#[serde(flatten)]
	pub extra: Extra,
}

/// Payload for posting a review.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDraft {
	/// Reviewed tutor.
	pub tutor_email: String,
	/// Star rating, 1 to 5.
	pub rating: u8,
	/// Review text.
	pub comment: String,
	/// Tuition the review refers to.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub tuition_id: Option<String>,
}

impl Gateway {
	/// `POST /reviews`.
	pub async fn post_review(&self, review: &ReviewDraft) -> Result<WriteAck> {
		self.post("/reviews", review).await
	}

	/// `GET /reviews/{tutor_email}`: public reviews of one tutor.
	pub async fn tutor_reviews(&self, tutor_email: &str) -> Result<Vec<Review>> {
		self.list(ApiRequest::get(format!("/reviews/{}", segment(tutor_email)))).await
	}
}
