//! Class calendar shared by a tutor and a student.

// self
use crate::{
	_prelude::*,
	api::{Extra, WriteAck, segment},
	gateway::Gateway,
	http::ApiRequest,
};

/// A scheduled class.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
	/// Document identifier.
	#[serde(rename = "_id")]
	pub id: String,
	/// Related tuition.
	pub tuition_id: Option<String>,
	/// The other attendee.
	pub partner_email: Option<String>,
	/// Class date as sent by the backend.
	pub date: Option<String>,
	/// Start time (`HH:MM`).
	pub start_time: Option<String>,
	/// End time (`HH:MM`).
	pub end_time: Option<String>,
	/// Subject taught.
	pub subject: Option<String>,
	/// Free-form notes.
	pub notes: Option<String>,
	/// Video call link.
	pub meeting_link: Option<String>,
	/// Remaining fields.
	#[serde(flatten)]
	pub extra: Extra,
}

/// Payload for scheduling a class.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDraft {
	/// Related tuition.
	pub tuition_id: String,
	/// The other attendee.
	pub partner_email: String,
	/// Class date.
	pub date: String,
	/// Start time (`HH:MM`).
	pub start_time: String,
	/// End time (`HH:MM`).
	pub end_time: String,
	/// Subject taught.
	pub subject: String,
	/// Free-form notes.
	pub notes: String,
	/// Video call link.
	pub meeting_link: String,
}

impl Gateway {
	/// `GET /my-schedule`.
	pub async fn my_schedule(&self) -> Result<Vec<Schedule>> {
		self.list(ApiRequest::get("/my-schedule")).await
	}

	/// `POST /schedules`.
	pub async fn create_schedule(&self, schedule: &ScheduleDraft) -> Result<WriteAck> {
		self.post("/schedules", schedule).await
	}

	/// `DELETE /schedules/{id}`: cancels a class.
	pub async fn cancel_schedule(&self, id: &str) -> Result<WriteAck> {
		self.delete(format!("/schedules/{}", segment(id))).await
	}
}
