//! Tutor applications to tuition posts.

// self
use crate::{
	_prelude::*,
	api::{Extra, WriteAck, segment},
	gateway::Gateway,
};

/// A tutor's application.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
	/// Document identifier.
	#[serde(rename = "_id")]
	pub id: String,
	/// Tuition applied to.
	pub tuition_id: Option<String>,
	/// Applicant email.
	pub tutor_email: Option<String>,
	/// Applicant display name.
	pub tutor_name: Option<String>,
	/// Salary the tutor asks for.
	pub expected_salary: Option<f64>,
	/// Review state.
	pub status: Option<String>,
	/// Cover message.
	pub message: Option<String>,
	/// Remaining fields.
	#[serde(flatten)]
	pub extra: Extra,
}

/// Payload sent when a tutor applies.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRequest {
	/// Tuition applied to.
	pub tuition_id: String,
	/// Applicant identifier (their email).
	pub tutor_id: String,
	/// Qualifications.
	pub message: String,
	/// Experience and availability.
	pub availability: String,
	/// Salary the tutor asks for.
	pub expected_salary: u32,
}

/// Review states a student can assign.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
	/// Awaiting the student's decision.
	Pending,
	/// Accepted; payment follows.
	Accepted,
	/// Declined by the student.
	Rejected,
}

#[derive(Serialize)]
struct StatusBody {
	status: ApplicationStatus,
}

impl Gateway {
	/// `POST /tuition-application`. A duplicate application answers 409.
	pub async fn apply(&self, application: &ApplicationRequest) -> Result<WriteAck> {
		self.post("/tuition-application", application).await
	}

	/// `GET /my-applications`: the signed-in tutor's applications.
	pub async fn my_applications(&self) -> Result<Vec<Application>> {
		self.get("/my-applications").await
	}

	/// `GET /applications/{tuition_id}`: applications a student received for one post.
	pub async fn tuition_applications(&self, tuition_id: &str) -> Result<Vec<Application>> {
		self.get(format!("/applications/{}", segment(tuition_id))).await
	}

	/// `PATCH /applications/{id}`.
	pub async fn set_application_status(
		&self,
		id: &str,
		status: ApplicationStatus,
	) -> Result<WriteAck> {
		self.patch(format!("/applications/{}", segment(id)), &StatusBody { status }).await
	}

	/// `DELETE /applications/{id}`.
	pub async fn withdraw_application(&self, id: &str) -> Result<WriteAck> {
		self.delete(format!("/applications/{}", segment(id))).await
	}
}
