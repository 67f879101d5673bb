//! In-app notifications.

// self
use crate::{
	_prelude::*,
	api::{Extra, WriteAck, segment},
	gateway::Gateway,
	http::ApiRequest,
};

/// A notification shown in the bell dropdown.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
	/// Document identifier.
	#[serde(rename = "_id")]
	pub id: String,
	/// Category (`review`, `message`, `schedule`, `payment`, ...).
	#[serde(rename = "type")]
	pub kind: Option<String>,
	/// Display text.
	pub message: Option<String>,
	/// In-app route to open on click.
	pub link: Option<String>,
	/// Whether the user has seen it.
	#[serde(default)]
	pub read: bool,
	/// Creation timestamp as sent by the backend.
	pub created_at: Option<String>,
	/// Remaining fields.
	#[serde(flatten)]
	pub extra: Extra,
}

/// Counts unread notifications.
pub fn unread_count(notifications: &[Notification]) -> usize {
	notifications.iter().filter(|n| !n.read).count()
}

impl Gateway {
	/// `GET /notifications`. A `null` body is treated as an empty list.
	pub async fn notifications(&self) -> Result<Vec<Notification>> {
		self.list(ApiRequest::get("/notifications")).await
	}

	/// `PATCH /notifications/{id}/read`.
	pub async fn mark_notification_read(&self, id: &str) -> Result<WriteAck> {
		self.send_json(ApiRequest::patch(format!("/notifications/{}/read", segment(id)))).await
	}

	/// `PATCH /notifications/read-all`.
	pub async fn mark_all_notifications_read(&self) -> Result<WriteAck> {
		self.send_json(ApiRequest::patch("/notifications/read-all")).await
	}

	/// `DELETE /notifications/{id}`.
	pub async fn delete_notification(&self, id: &str) -> Result<WriteAck> {
		self.delete(format!("/notifications/{}", segment(id))).await
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn unread_count_ignores_read_items() {
		let feed: Vec<Notification> = serde_json::from_str(
			r#"[
				{"_id":"n1","type":"message","message":"New message","read":false},
				{"_id":"n2","type":"payment","read":true},
				{"_id":"n3"}
			]"#,
		)
		.expect("Notification feed should decode.");

		assert_eq!(feed[0].kind.as_deref(), Some("message"));
		assert_eq!(unread_count(&feed), 2);
	}
}
