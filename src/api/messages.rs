//! Direct messaging between students and tutors.

// self
use crate::{
	_prelude::*,
	api::{Extra, WriteAck, segment},
	gateway::Gateway,
	http::ApiRequest,
};

/// The other side of a conversation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
	/// Account email.
	pub email: Option<String>,
	/// Display name.
	pub display_name: Option<String>,
	/// Avatar URL.
	#[serde(rename = "photoURL")]
	pub photo_url: Option<String>,
}

/// A conversation thread.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
	/// Document identifier.
	#[serde(rename = "_id")]
	pub id: String,
	/// Participant emails.
	#[serde(default)]
	pub participants: Vec<String>,
	/// The participant who is not the signed-in user.
	pub other_participant: Option<Participant>,
	/// Preview of the latest message.
	pub last_message: Option<String>,
	/// Timestamp of the latest message as sent by the backend.
	pub last_message_at: Option<String>,
	/// Remaining fields.
	#[serde(flatten)]
	pub extra: Extra,
}

/// A message inside a conversation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
	/// Document identifier.
	#[serde(rename = "_id")]
	pub id: Option<String>,
	/// Owning conversation.
	pub conversation_id: Option<String>,
	/// Author email.
	pub sender_email: Option<String>,
	/// Message text.
	pub content: String,
	/// Creation timestamp as sent by the backend.
	pub created_at: Option<String>,
	/// Remaining fields.
	#[serde(flatten)]
	pub extra: Extra,
}

/// Payload for sending a message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMessage {
	/// Target conversation.
	pub conversation_id: String,
	/// Message text.
	pub content: String,
	/// Recipient, sent when the conversation was just opened.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub receiver_email: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OpenConversation<'a> {
	recipient_email: &'a str,
}

impl Gateway {
	/// `POST /conversations`: returns the existing thread with `recipient_email` or creates one.
	pub async fn open_conversation(&self, recipient_email: &str) -> Result<Conversation> {
		self.post("/conversations", &OpenConversation { recipient_email }).await
	}

	/// `GET /my-conversations`.
	pub async fn my_conversations(&self) -> Result<Vec<Conversation>> {
		self.list(ApiRequest::get("/my-conversations")).await
	}

	/// `GET /messages/{conversation_id}`.
	pub async fn conversation_messages(&self, conversation_id: &str) -> Result<Vec<Message>> {
		self.list(ApiRequest::get(format!("/messages/{}", segment(conversation_id)))).await
	}

	/// `POST /messages`.
	pub async fn send_message(&self, message: &NewMessage) -> Result<WriteAck> {
		self.post("/messages", message).await
	}

	/// Opens (or reuses) the thread with `recipient_email` and posts `content` to it.
	///
	/// Blank messages are not sent; `None` is returned instead.
	pub async fn contact(
		&self,
		recipient_email: &str,
		content: &str,
	) -> Result<Option<(Conversation, WriteAck)>> {
		let content = content.trim();

		if content.is_empty() {
			return Ok(None);
		}

		let conversation = self.open_conversation(recipient_email).await?;
		let ack = self
			.send_message(&NewMessage {
				conversation_id: conversation.id.clone(),
				content: content.to_owned(),
				receiver_email: Some(recipient_email.to_owned()),
			})
			.await?;

		Ok(Some((conversation, ack)))
	}
}
