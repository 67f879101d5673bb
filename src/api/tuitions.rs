//! Tuition posts: public listing, student posting, admin moderation.

// self
use crate::{
	_prelude::*,
	api::{Extra, Page, WriteAck, segment},
	gateway::Gateway,
	http::ApiRequest,
};

/// A tuition post.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tuition {
	/// Document identifier.
	#[serde(rename = "_id")]
	pub id: String,
	/// Subject taught.
	pub subject: Option<String>,
	/// Class or grade level.
	pub class: Option<String>,
	/// Where lessons take place.
	pub location: Option<String>,
	/// Offered monthly salary.
	pub salary: Option<f64>,
	/// Moderation status.
	pub status: Option<String>,
	/// Posting student's email.
	pub student_email: Option<String>,
	/// Free-form description.
	pub description: Option<String>,
	/// Remaining fields.
	#[serde(flatten)]
	pub extra: Extra,
}

/// Payload for creating or updating a tuition post.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TuitionDraft {
	/// Subject taught.
	pub subject: String,
	/// Class or grade level.
	pub class: String,
	/// Where lessons take place.
	pub location: String,
	/// Offered monthly salary.
	pub salary: f64,
	/// Lessons per week.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub days_per_week: Option<u8>,
	/// Free-form description.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Posting student's display name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub student_name: Option<String>,
	/// Posting student's email.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub student_email: Option<String>,
	/// Additional form fields.
	#[serde(flatten)]
	pub extra: Extra,
}

/// Moderation states an admin can assign.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TuitionStatus {
	/// Awaiting review.
	Pending,
	/// Visible to tutors.
	Approved,
	/// Hidden from tutors.
	Rejected,
}
impl TuitionStatus {
	/// Wire label.
	pub const fn as_str(self) -> &'static str {
		match self {
			TuitionStatus::Pending => "pending",
			TuitionStatus::Approved => "approved",
			TuitionStatus::Rejected => "rejected",
		}
	}
}

/// Filters for tuition listings. Unset fields are omitted from the query string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TuitionQuery {
	/// Page number.
	pub page: Option<u32>,
	/// Page size.
	pub limit: Option<u32>,
	/// Sort field.
	pub sort_by: Option<String>,
	/// Sort order (`asc` or `desc`).
	pub order: Option<String>,
	/// Free-text search.
	pub search: Option<String>,
	/// Subject filter.
	pub subject: Option<String>,
	/// Class filter.
	pub class: Option<String>,
	/// Location filter.
	pub location: Option<String>,
	/// Moderation status filter.
	pub status: Option<TuitionStatus>,
}
impl TuitionQuery {
	fn apply(&self, mut request: ApiRequest) -> ApiRequest {
		let pairs = [
			("page", self.page.map(|v| v.to_string())),
			("limit", self.limit.map(|v| v.to_string())),
			("sortBy", self.sort_by.clone()),
			("order", self.order.clone()),
			("search", self.search.clone()),
			("subject", self.subject.clone()),
			("class", self.class.clone()),
			("location", self.location.clone()),
			("status", self.status.map(|s| s.as_str().to_owned())),
		];

		for (key, value) in pairs {
			if let Some(value) = value.filter(|v| !v.is_empty()) {
				request = request.query(key, value);
			}
		}

		request
	}
}

#[derive(Serialize)]
struct StatusBody {
	status: &'static str,
}

impl Gateway {
	/// `GET /tuitions`: paginated public listing.
	pub async fn tuitions(&self, query: &TuitionQuery) -> Result<Page<Tuition>> {
		self.send_json(query.apply(ApiRequest::get("/tuitions"))).await
	}

	/// `GET /tuitions/{id}`.
	pub async fn tuition(&self, id: &str) -> Result<Tuition> {
		self.get(format!("/tuitions/{}", segment(id))).await
	}

	/// `GET /tuitions-post`: tuitions open to tutors, usually filtered by `status=approved`.
	pub async fn available_tuitions(&self, query: &TuitionQuery) -> Result<Vec<Tuition>> {
		self.send_json(query.apply(ApiRequest::get("/tuitions-post"))).await
	}

	/// `POST /tuitions-post`.
	pub async fn post_tuition(&self, draft: &TuitionDraft) -> Result<WriteAck> {
		self.post("/tuitions-post", draft).await
	}

	/// `PUT /tuition/{id}`.
	pub async fn update_tuition(&self, id: &str, draft: &TuitionDraft) -> Result<WriteAck> {
		self.put(format!("/tuition/{}", segment(id)), draft).await
	}

	/// `DELETE /tuition/{id}`.
	pub async fn delete_tuition(&self, id: &str) -> Result<WriteAck> {
		self.delete(format!("/tuition/{}", segment(id))).await
	}

	/// `PATCH /tuition-status/{id}`: admin moderation.
	pub async fn set_tuition_status(&self, id: &str, status: TuitionStatus) -> Result<WriteAck> {
		let body = StatusBody { status: status.as_str() };

		self.patch(format!("/tuition-status/{}", segment(id)), &body).await
	}

	/// `GET /my-tuitions`: the signed-in student's posts.
	pub async fn my_tuitions(&self) -> Result<Vec<Tuition>> {
		self.get("/my-tuitions").await
	}

	/// `GET /admin/tuitions`: every post, for moderation.
	pub async fn admin_tuitions(&self) -> Result<Vec<Tuition>> {
		self.get("/admin/tuitions").await
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn query_skips_unset_and_empty_filters() {
		let query = TuitionQuery {
			page: Some(2),
			limit: Some(10),
			search: Some(String::new()),
			subject: Some("Physics".into()),
			status: Some(TuitionStatus::Approved),
			..Default::default()
		};
		let request = query.apply(ApiRequest::get("/tuitions"));

		assert_eq!(
			request.query,
			vec![
				("page".to_owned(), "2".to_owned()),
				("limit".to_owned(), "10".to_owned()),
				("subject".to_owned(), "Physics".to_owned()),
				("status".to_owned(), "approved".to_owned()),
			]
		);
	}

	#[test]
	fn tuition_keeps_unknown_fields() {
		let tuition: Tuition = serde_json::from_str(
			r#"{"_id":"t1","subject":"Math","class":"8","salary":4500,"medium":"English"}"#,
		)
		.expect("Tuition document should decode.");

		assert_eq!(tuition.id, "t1");
		assert_eq!(tuition.salary, Some(4500.0));
		assert_eq!(tuition.extra.get("medium").and_then(|v| v.as_str()), Some("English"));
	}
}
