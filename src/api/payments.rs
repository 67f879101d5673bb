//! Tuition payments: checkout, confirmation, and transaction history.

// self
use crate::{_prelude::*, api::Extra, gateway::Gateway, http::ApiRequest};

/// A recorded payment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
	/// Document identifier.
	#[serde(rename = "_id")]
	pub id: String,
	/// Gateway transaction reference.
	pub transaction_id: Option<String>,
	/// Application that was paid for.
	pub application_id: Option<String>,
	/// Tuition that was paid for.
	pub tuition_id: Option<String>,
	/// Title of that tuition, when the backend joins it in.
	pub tuition_title: Option<String>,
	/// Paying student.
	pub student_email: Option<String>,
	/// Paid tutor.
	pub tutor_email: Option<String>,
	/// Amount in BDT.
	pub amount: Option<f64>,
	/// Payment method label.
	pub method: Option<String>,
	/// Settlement state, `paid` once confirmed.
	pub status: Option<String>,
	/// Payment date as sent by the backend.
	pub date: Option<String>,
	/// Remaining fields.
	#[serde(flatten)]
	pub extra: Extra,
}
impl Payment {
	/// Returns `true` once the payment settled.
	pub fn is_paid(&self) -> bool {
		self.status.as_deref() == Some("paid")
	}
}

/// Checkout payload for an accepted application.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
	/// Accepted application.
	pub application_id: String,
	/// Tuition the application belongs to.
	pub tuition_id: String,
	/// Tutor being paid.
	pub tutor_email: String,
	/// Amount in BDT.
	pub amount: f64,
	/// Payment method label, `Card` for the demo checkout.
	pub method: String,
}

/// Outcome of a checkout or confirmation call.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
	/// Whether the backend accepted the payment.
	#[serde(default)]
	pub success: bool,
	/// Identifier to confirm with [`Gateway::confirm_payment`].
	pub payment_id: Option<String>,
	/// Remaining fields.
	#[serde(flatten)]
	pub extra: Extra,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConfirmBody<'a> {
	session_id: &'a str,
}

impl Gateway {
	/// `POST /payments/demo`: pays for an accepted application.
	pub async fn pay(&self, payment: &PaymentRequest) -> Result<PaymentReceipt> {
		self.post("/payments/demo", payment).await
	}

	/// `POST /payment-success`: confirms a checkout by its session identifier.
	pub async fn confirm_payment(&self, session_id: &str) -> Result<PaymentReceipt> {
		self.post("/payment-success", &ConfirmBody { session_id }).await
	}

	/// `GET /my-payments`: the signed-in user's transactions.
	pub async fn my_payments(&self) -> Result<Vec<Payment>> {
		self.list(ApiRequest::get("/my-payments")).await
	}

	/// `GET /all-payments`: every transaction, for admins.
	pub async fn all_payments(&self) -> Result<Vec<Payment>> {
		self.list(ApiRequest::get("/all-payments")).await
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn payment_fields_follow_backend_names() {
		let payment: Payment = serde_json::from_str(
			r#"{"_id":"p1","transactionId":"TXN-1","amount":5000,"status":"paid","tutorEmail":"t@example.com"}"#,
		)
		.expect("Payment document should decode.");

		assert!(payment.is_paid());
		assert_eq!(payment.transaction_id.as_deref(), Some("TXN-1"));
		assert_eq!(
			serde_json::to_value(ConfirmBody { session_id: "p1" })
				.expect("Confirmation body should serialize."),
			serde_json::json!({ "sessionId": "p1" })
		);

		let declined: PaymentReceipt =
			serde_json::from_str(r#"{"message":"card declined"}"#).expect("Receipt should decode.");

		assert!(!declined.success);
	}
}
