//! Users, tutor profiles, and role management.

// self
use crate::{
	_prelude::*,
	api::{Extra, Page, WriteAck, segment},
	gateway::Gateway,
	http::ApiRequest,
	obs,
};

/// A user or tutor document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
	/// Document identifier.
	#[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	/// Account email.
	pub email: Option<String>,
	/// Display name.
	pub name: Option<String>,
	/// Marketplace role.
	pub role: Option<Role>,
	/// Avatar URL.
	pub photo_url: Option<String>,
	/// Remaining fields.
	#[serde(flatten)]
	pub extra: Extra,
}

/// Marketplace roles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
	/// Posts tuitions, reviews applications, pays tutors.
	Student,
	/// Applies to tuitions.
	Tutor,
	/// Moderates posts and users.
	Admin,
}
impl Role {
	/// Wire label, also used as the cached role value.
	pub const fn as_str(self) -> &'static str {
		match self {
			Role::Student => "student",
			Role::Tutor => "tutor",
			Role::Admin => "admin",
		}
	}
}
impl Display for Role {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for Role {
	type Err = UnknownRole;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"student" => Ok(Role::Student),
			"tutor" => Ok(Role::Tutor),
			"admin" => Ok(Role::Admin),
			other => Err(UnknownRole(other.to_owned())),
		}
	}
}

/// Error returned when a role label is not recognized.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Unknown role `{0}`.")]
pub struct UnknownRole(pub String);

/// Filters for the tutor directory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TutorQuery {
	/// Page number.
	pub page: Option<u32>,
	/// Page size.
	pub limit: Option<u32>,
	/// Free-text search.
	pub search: Option<String>,
}

#[derive(Serialize)]
struct RoleBody {
	role: Role,
}

impl Gateway {
	/// `GET /tutors`: public tutor directory.
	pub async fn tutors(&self, query: &TutorQuery) -> Result<Page<UserProfile>> {
		let mut request = ApiRequest::get("/tutors");

		if let Some(page) = query.page {
			request = request.query("page", page.to_string());
		}
		if let Some(limit) = query.limit {
			request = request.query("limit", limit.to_string());
		}
		if let Some(search) = query.search.as_deref().filter(|s| !s.is_empty()) {
			request = request.query("search", search);
		}

		self.send_json(request).await
	}

	/// `GET /tutors/{id}`.
	pub async fn tutor(&self, id: &str) -> Result<UserProfile> {
		self.get(format!("/tutors/{}", segment(id))).await
	}

	/// `POST /tutors`.
	pub async fn create_tutor(&self, profile: &UserProfile) -> Result<WriteAck> {
		self.post("/tutors", profile).await
	}

	/// `PUT /tutors/{id}`.
	pub async fn update_tutor(&self, id: &str, profile: &UserProfile) -> Result<WriteAck> {
		self.put(format!("/tutors/{}", segment(id)), profile).await
	}

	/// `DELETE /tutors/{id}`.
	pub async fn delete_tutor(&self, id: &str) -> Result<WriteAck> {
		self.delete(format!("/tutors/{}", segment(id))).await
	}

	/// `GET /users`: every account, for admins.
	pub async fn users(&self) -> Result<Vec<UserProfile>> {
		self.get("/users").await
	}

	/// `GET /users/{email}`.
	pub async fn user_by_email(&self, email: &str) -> Result<UserProfile> {
		self.get(format!("/users/{}", segment(email))).await
	}

	/// `GET /user/profile`: the signed-in user's own document.
	pub async fn profile(&self) -> Result<UserProfile> {
		self.get("/user/profile").await
	}

	/// `PATCH /update-role/{id}`.
	pub async fn update_role(&self, id: &str, role: Role) -> Result<WriteAck> {
		self.patch(format!("/update-role/{}", segment(id)), &RoleBody { role }).await
	}

	/// `DELETE /user/{id}`.
	pub async fn delete_user(&self, id: &str) -> Result<WriteAck> {
		self.delete(format!("/user/{}", segment(id))).await
	}

	/// Fetches the user's role from the backend and caches it in the bound session.
	///
	/// When the lookup fails or the document has no role, the previously cached role is
	/// returned instead. A session rejection is still returned as an error, since the cache has
	/// just been cleared by teardown.
	pub async fn sync_role(&self, email: &str) -> Result<Option<Role>> {
		let cached = match self.session() {
			Some(session) => session.role().await?,
			None => None,
		};
		let cached = cached.and_then(|raw| raw.parse::<Role>().ok());

		match self.user_by_email(email).await {
			Ok(UserProfile { role: Some(role), .. }) => {
				if let Some(session) = self.session() {
					session.remember_role(role.as_str()).await?;
				}

				Ok(Some(role))
			},
			Ok(_) => Ok(cached),
			Err(e) if e.is_auth_expired() => Err(e),
			Err(e) => {
				obs::log_warn!("Failed to fetch the user role, using the cached value: {e}");

				Ok(cached)
			},
		}
	}
}
