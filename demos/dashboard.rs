//! Walks a tutor dashboard through the gateway against a mock backend: listing open tuitions,
//! applying to one, polling the notification bell, and finally losing the session when the
//! backend rejects the token.

// std
use std::{sync::Arc, time::Duration};
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use serde_json::json;
// self
use tuition_gateway::{
	api::{ApplicationRequest, TuitionQuery, TuitionStatus},
	config::GatewayConfig,
	gateway::Gateway,
	poller::NotificationPoller,
	session::{RouteState, SessionContext},
	store::MemoryStore,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let tuitions = server
		.mock_async(|when, then| {
			when.method(GET).path("/tuitions-post").query_param("status", "approved");
			then.status(200).json_body(json!([
				{ "_id": "t1", "subject": "Physics", "class": "9", "salary": 5500 }
			]));
		})
		.await;
	let apply = server
		.mock_async(|when, then| {
			when.method(POST).path("/tuition-application").header("authorization", "Bearer demo");
			then.status(200).json_body(json!({ "acknowledged": true, "insertedId": "a1" }));
		})
		.await;
	let bell = server
		.mock_async(|when, then| {
			when.method(GET).path("/notifications");
			then.status(200).json_body(json!([
				{ "_id": "n1", "type": "message", "message": "Student replied", "read": false }
			]));
		})
		.await;
	let config = GatewayConfig::new(&server.base_url())?.with_timeout(Duration::from_secs(5));
	let routes = RouteState::new("/dashboard");
	let session = SessionContext::from_config(&config, Arc::new(MemoryStore::default()))
		.with_navigator(Arc::new(routes.clone()));

	session.sign_in("demo").await?;
	session.remember_role("tutor").await?;

	let gateway = Gateway::authenticated(config, session.clone())?;
	let query = TuitionQuery { status: Some(TuitionStatus::Approved), ..Default::default() };
	let open = gateway.available_tuitions(&query).await?;

	println!("Open tuitions: {}.", open.len());

	let ack = gateway
		.apply(&ApplicationRequest {
			tuition_id: open[0].id.clone(),
			tutor_id: "tutor@example.com".into(),
			message: "MSc Physics".into(),
			availability: "Weekday evenings".into(),
			expected_salary: 5500,
		})
		.await?;

	println!("Application stored as {:?}.", ack.inserted_id);

	let poller = NotificationPoller::new(gateway.clone()).with_interval(Duration::from_millis(50));
	let snapshot = poller.poll_once().await?;

	println!("Unread notifications: {}.", snapshot.unread);

	bell.delete_async().await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/notifications");
			then.status(401).body("token expired");
		})
		.await;

	let stopped = poller.run(|snapshot| println!("Bell: {} unread.", snapshot.unread)).await;

	println!("Polling stopped: {stopped}.");
	println!("Signed in: {}.", session.is_authenticated().await?);
	println!("Current route: {}.", routes.current());
	println!("Gateway attempts: {}.", gateway.metrics().attempts());

	tuitions.assert_async().await;
	apply.assert_async().await;

	Ok(())
}
