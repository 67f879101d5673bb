//! Requests to switch a student account to a tutor account.

// self
use crate::{
	_prelude::*,
	api::{Extra, WriteAck, segment},
	gateway::Gateway,
};

/// A pending or decided role change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRequest {
	/// Document identifier.
	#[serde(rename = "_id")]
	pub id: String,
	/// Requester's display name.
	pub user_name: Option<String>,
	/// Requester's email.
	pub user_email: Option<String>,
	/// Role held when the request was made.
	pub current_role: Option<String>,
	/// Role asked for.
	pub requested_role: Option<String>,
	/// Review state.
	pub status: Option<RoleRequestStatus>,
	/// Creation timestamp as sent by the backend.
	#[serde(rename = "created_at")]
	pub created_at: Option<String>,
	/// Remaining fields.
	#[serde(flatten)]
	pub extra: Extra,
}

/// Payload for asking to become a tutor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRequestDraft {
	/// Requester's display name.
	pub user_name: String,
	/// Requester's email.
	pub user_email: String,
}

/// Review states of a role request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleRequestStatus {
	/// Awaiting an admin.
	Pending,
	/// Granted; the role has been switched.
	Approved,
	/// Declined.
	Rejected,
}

#[derive(Serialize)]
struct StatusBody {
	status: RoleRequestStatus,
}

impl Gateway {
	/// `POST /role-requests`. A second pending request answers 409.
	pub async fn request_tutor_role(&self, draft: &RoleRequestDraft) -> Result<WriteAck> {
		self.post("/role-requests", draft).await
	}

	/// `GET /role-requests`: every request, for admins.
	pub async fn role_requests(&self) -> Result<Vec<RoleRequest>> {
		self.get("/role-requests").await
	}

	/// `GET /role-requests/my`: the signed-in user's requests.
	pub async fn my_role_requests(&self) -> Result<Vec<RoleRequest>> {
		self.get("/role-requests/my").await
	}

	/// `PATCH /role-requests/{id}`: admin decision.
	pub async fn set_role_request_status(
		&self,
		id: &str,
		status: RoleRequestStatus,
	) -> Result<WriteAck> {
		self.patch(format!("/role-requests/{}", segment(id)), &StatusBody { status }).await
	}
}
