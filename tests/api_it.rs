mod common;

// std
use std::time::Duration as StdDuration;
// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use common::harness;
use tuition_gateway::{
	api::{
		ApplicationRequest, ApplicationStatus, BookmarkKind, PaymentRequest, Role,
		RoleRequestDraft, RoleRequestStatus, ScheduleDraft, TuitionDraft, TuitionQuery,
		TuitionStatus,
	},
	poller::NotificationPoller,
};

#[tokio::test]
async fn tuition_listing_sends_filters() {
	let server = MockServer::start_async().await;
	let h = harness(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/tuitions-post")
				.query_param("status", "approved")
				.query_param("subject", "Chemistry");
			then.status(200).json_body(json!([
				{ "_id": "t1", "subject": "Chemistry", "class": "10", "salary": 6000 }
			]));
		})
		.await;
	let query = TuitionQuery {
		status: Some(TuitionStatus::Approved),
		subject: Some("Chemistry".into()),
		..Default::default()
	};
	let tuitions =
		h.gateway.available_tuitions(&query).await.expect("Tuition listing should succeed.");

	assert_eq!(tuitions.len(), 1);
	assert_eq!(tuitions[0].salary, Some(6000.0));

	mock.assert_async().await;
}

#[tokio::test]
async fn student_posts_and_moderation_use_json_bodies() {
	let server = MockServer::start_async().await;
	let h = harness(&server);
	let post = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/tuitions-post")
				.header("content-type", "application/json")
				.json_body(json!({
					"subject": "Math",
					"class": "7",
					"location": "Dhanmondi",
					"salary": 4500.0,
					"studentEmail": "student@example.com"
				}));
			then.status(200).json_body(json!({ "acknowledged": true, "insertedId": "t9" }));
		})
		.await;
	let status = server
		.mock_async(|when, then| {
			when.method(PATCH)
				.path("/tuition-status/t9")
				.json_body(json!({ "status": "approved" }));
			then.status(200).json_body(json!({ "modifiedCount": 1 }));
		})
		.await;

	h.session.sign_in("student-token").await.expect("Sign-in should succeed.");

	let draft = TuitionDraft {
		subject: "Math".into(),
		class: "7".into(),
		location: "Dhanmondi".into(),
		salary: 4500.0,
		student_email: Some("student@example.com".into()),
		..Default::default()
	};
	let ack = h.gateway.post_tuition(&draft).await.expect("Posting a tuition should succeed.");

	assert_eq!(ack.inserted_id.as_deref(), Some("t9"));
	assert!(ack.is_effective());

	let ack = h
		.gateway
		.set_tuition_status("t9", TuitionStatus::Approved)
		.await
		.expect("Moderation should succeed.");

	assert_eq!(ack.modified_count, Some(1));

	post.assert_async().await;
	status.assert_async().await;
}

#[tokio::test]
async fn duplicate_application_keeps_session() {
	let server = MockServer::start_async().await;
	let h = harness(&server);
	let apply = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/tuition-application")
				.header("authorization", "Bearer tutor-token")
				.json_body(json!({
					"tuitionId": "t1",
					"tutorId": "tutor@example.com",
					"message": "MSc Physics",
					"availability": "Weekends",
					"expectedSalary": 7000
				}));
			then.status(409).json_body(json!({ "message": "Already applied" }));
		})
		.await;
	let reject = server
		.mock_async(|when, then| {
			when.method(PATCH)
				.path("/applications/a1")
				.json_body(json!({ "status": "rejected" }));
			then.status(200).json_body(json!({ "modifiedCount": 1 }));
		})
		.await;

	h.session.sign_in("tutor-token").await.expect("Sign-in should succeed.");

	let request = ApplicationRequest {
		tuition_id: "t1".into(),
		tutor_id: "tutor@example.com".into(),
		message: "MSc Physics".into(),
		availability: "Weekends".into(),
		expected_salary: 7000,
	};
	let err = h.gateway.apply(&request).await.expect_err("Duplicate application should fail.");

	assert_eq!(err.status(), Some(409));
	assert_eq!(h.sign_out.calls(), 0);

	h.gateway
		.set_application_status("a1", ApplicationStatus::Rejected)
		.await
		.expect("Session should still be usable after a conflict.");

	apply.assert_async().await;
	reject.assert_async().await;
}

#[tokio::test]
async fn notification_actions_hit_expected_routes() {
	let server = MockServer::start_async().await;
	let h = harness(&server);
	let read_one = server
		.mock_async(|when, then| {
			when.method(PATCH).path("/notifications/n1/read");
			then.status(200).json_body(json!({ "modifiedCount": 1 }));
		})
		.await;
	let read_all = server
		.mock_async(|when, then| {
			when.method(PATCH).path("/notifications/read-all");
			then.status(200).json_body(json!({ "modifiedCount": 3 }));
		})
		.await;
	let delete = server
		.mock_async(|when, then| {
			when.method(DELETE).path("/notifications/n2");
			then.status(200).json_body(json!({ "deletedCount": 1 }));
		})
		.await;
	let feed = server
		.mock_async(|when, then| {
			when.method(GET).path("/notifications");
			then.status(200).body("null");
		})
		.await;

	h.session.sign_in("abc123").await.expect("Sign-in should succeed.");

	assert!(h.gateway.mark_notification_read("n1").await.expect("Mark read.").is_effective());
	assert_eq!(
		h.gateway.mark_all_notifications_read().await.expect("Mark all read.").modified_count,
		Some(3)
	);
	assert!(h.gateway.delete_notification("n2").await.expect("Delete.").is_effective());
	assert!(h.gateway.notifications().await.expect("Null feed should decode.").is_empty());

	read_one.assert_async().await;
	read_all.assert_async().await;
	delete.assert_async().await;
	feed.assert_async().await;
}

#[tokio::test]
async fn sync_role_caches_and_falls_back() {
	let server = MockServer::start_async().await;
	let h = harness(&server);
	let found = server
		.mock_async(|when, then| {
			when.method(GET).path("/users/tutor01");
			then.status(200).json_body(json!({ "email": "tutor@example.com", "role": "tutor" }));
		})
		.await;
	let broken = server
		.mock_async(|when, then| {
			when.method(GET).path("/users/ghost01");
			then.status(500).body("lookup failed");
		})
		.await;

	h.session.sign_in("abc123").await.expect("Sign-in should succeed.");

	let role = h.gateway.sync_role("tutor01").await.expect("Role sync should succeed.");

	assert_eq!(role, Some(Role::Tutor));
	assert_eq!(
		h.session.role().await.expect("Role lookup should succeed.").as_deref(),
		Some("tutor")
	);

	let fallback = h
		.gateway
		.sync_role("ghost01")
		.await
		.expect("Backend failure should fall back to the cached role.");

	assert_eq!(fallback, Some(Role::Tutor));

	found.assert_async().await;
	broken.assert_async().await;
}

#[tokio::test]
async fn poller_reports_snapshots_until_session_ends() {
	let server = MockServer::start_async().await;
	let h = harness(&server);
	let feed = server
		.mock_async(|when, then| {
			when.method(GET).path("/notifications").header("authorization", "Bearer abc123");
			then.status(200).json_body(json!([
				{ "_id": "n1", "type": "message", "read": false },
				{ "_id": "n2", "type": "payment", "read": true }
			]));
		})
		.await;

	h.session.sign_in("abc123").await.expect("Sign-in should succeed.");

	let poller =
		NotificationPoller::new(h.gateway.clone()).with_interval(StdDuration::from_millis(20));
	let snapshot = poller.poll_once().await.expect("First poll should succeed.");

	assert_eq!(snapshot.unread, 1);
	assert_eq!(snapshot.notifications.len(), 2);

	feed.delete_async().await;

	let expired = server
		.mock_async(|when, then| {
			when.method(GET).path("/notifications");
			then.status(401).body("token expired");
		})
		.await;
	let mut seen = 0;
	let stopped = poller.run(|_| seen += 1).await;

	assert!(stopped.is_auth_expired());
	assert_eq!(seen, 0);
	assert_eq!(h.sign_out.calls(), 1);
	assert_eq!(h.routes.current(), "/login");

	expired.assert_async().await;
}

#[tokio::test]
async fn poller_skips_transient_failures() {
	let server = MockServer::start_async().await;
	let h = harness(&server);
	let outage = server
		.mock_async(|when, then| {
			when.method(GET).path("/notifications");
			then.status(500).body("database offline");
		})
		.await;

	h.session.sign_in("abc123").await.expect("Sign-in should succeed.");

	let poller =
		NotificationPoller::new(h.gateway.clone()).with_interval(StdDuration::from_millis(10));
	let mut seen = 0;
	let (stopped, expired) = tokio::join!(poller.run(|_| seen += 1), async {
		tokio::time::sleep(StdDuration::from_millis(70)).await;
		outage.delete_async().await;
		server
			.mock_async(|when, then| {
				when.method(GET).path("/notifications");
				then.status(401).body("token expired");
			})
			.await
	});

	assert!(stopped.is_auth_expired());
	assert_eq!(seen, 0);
	assert!(h.gateway.metrics().failures() >= 2);
	assert_eq!(h.gateway.metrics().auth_expired(), 1);
	assert_eq!(h.sign_out.calls(), 1);
	assert_eq!(h.routes.current(), "/login");

	expired.assert_async().await;
}

#[tokio::test]
async fn payment_checkout_confirms_and_lists_history() {
	let server = MockServer::start_async().await;
	let h = harness(&server);
	let checkout = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/payments/demo")
				.header("authorization", "Bearer student-token")
				.json_body(json!({
					"applicationId": "a1",
					"tuitionId": "t1",
					"tutorEmail": "tutor@example.com",
					"amount": 5500.0,
					"method": "Card"
				}));
			then.status(200).json_body(json!({ "success": true, "paymentId": "p1" }));
		})
		.await;
	let confirm = server
		.mock_async(|when, then| {
			when.method(POST).path("/payment-success").json_body(json!({ "sessionId": "p1" }));
			then.status(200).json_body(json!({ "success": true }));
		})
		.await;
	let history = server
		.mock_async(|when, then| {
			when.method(GET).path("/my-payments");
			then.status(200).json_body(json!([
				{ "_id": "p1", "transactionId": "TXN-1", "amount": 5500, "status": "paid" }
			]));
		})
		.await;
	let ledger = server
		.mock_async(|when, then| {
			when.method(GET).path("/all-payments");
			then.status(200).body("null");
		})
		.await;

	h.session.sign_in("student-token").await.expect("Sign-in should succeed.");

	let receipt = h
		.gateway
		.pay(&PaymentRequest {
			application_id: "a1".into(),
			tuition_id: "t1".into(),
			tutor_email: "tutor@example.com".into(),
			amount: 5500.0,
			method: "Card".into(),
		})
		.await
		.expect("Checkout should succeed.");

	assert!(receipt.success);

	let payment_id = receipt.payment_id.expect("Checkout should return a payment id.");
	let confirmed =
		h.gateway.confirm_payment(&payment_id).await.expect("Confirmation should succeed.");

	assert!(confirmed.success);

	let payments = h.gateway.my_payments().await.expect("Payment history should load.");

	assert_eq!(payments.len(), 1);
	assert!(payments[0].is_paid());
	assert_eq!(payments[0].amount, Some(5500.0));
	assert!(h.gateway.all_payments().await.expect("Null ledger should decode.").is_empty());

	checkout.assert_async().await;
	confirm.assert_async().await;
	history.assert_async().await;
	ledger.assert_async().await;
}

#[tokio::test]
async fn contacting_a_tutor_opens_conversation_then_posts() {
	let server = MockServer::start_async().await;
	let h = harness(&server);
	let open = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/conversations")
				.json_body(json!({ "recipientEmail": "tutor@example.com" }));
			then.status(200).json_body(json!({
				"_id": "c1",
				"participants": ["student@example.com", "tutor@example.com"]
			}));
		})
		.await;
	let post = server
		.mock_async(|when, then| {
			when.method(POST).path("/messages").json_body(json!({
				"conversationId": "c1",
				"content": "Are you free on Fridays?",
				"receiverEmail": "tutor@example.com"
			}));
			then.status(200).json_body(json!({ "insertedId": "m1" }));
		})
		.await;
	let thread = server
		.mock_async(|when, then| {
			when.method(GET).path("/messages/c1");
			then.status(200).json_body(json!([
				{
					"_id": "m1",
					"senderEmail": "student@example.com",
					"content": "Are you free on Fridays?"
				}
			]));
		})
		.await;
	let inbox = server
		.mock_async(|when, then| {
			when.method(GET).path("/my-conversations");
			then.status(200).json_body(json!([
				{ "_id": "c1", "lastMessage": "Are you free on Fridays?" }
			]));
		})
		.await;

	h.session.sign_in("student-token").await.expect("Sign-in should succeed.");

	assert!(
		h.gateway
			.contact("tutor@example.com", "   ")
			.await
			.expect("Blank message should be skipped.")
			.is_none()
	);

	let (conversation, ack) = h
		.gateway
		.contact("tutor@example.com", "  Are you free on Fridays?  ")
		.await
		.expect("Contacting a tutor should succeed.")
		.expect("Non-blank message should be sent.");

	assert_eq!(conversation.id, "c1");
	assert_eq!(conversation.participants.len(), 2);
	assert_eq!(ack.inserted_id.as_deref(), Some("m1"));

	let messages = h.gateway.conversation_messages("c1").await.expect("Thread should load.");

	assert_eq!(messages[0].sender_email.as_deref(), Some("student@example.com"));

	let conversations = h.gateway.my_conversations().await.expect("Inbox should load.");

	assert_eq!(conversations[0].last_message.as_deref(), Some("Are you free on Fridays?"));

	open.assert_calls_async(1).await;
	post.assert_calls_async(1).await;
	thread.assert_async().await;
	inbox.assert_async().await;
}

#[tokio::test]
async fn bookmarks_and_role_requests_round_the_dashboard() {
	let server = MockServer::start_async().await;
	let h = harness(&server);
	let toggle = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/bookmarks")
				.json_body(json!({ "itemId": "t1", "type": "tuition" }));
			then.status(200).json_body(json!({ "bookmarked": true, "message": "Bookmarked" }));
		})
		.await;
	let check = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/is-bookmarked")
				.query_param("itemId", "t1")
				.query_param("type", "tuition");
			then.status(200).json_body(json!({ "bookmarked": true }));
		})
		.await;
	let saved = server
		.mock_async(|when, then| {
			when.method(GET).path("/my-bookmarks").query_param("type", "tutor");
			then.status(200).json_body(json!([{ "_id": "b1", "itemId": "u7", "type": "tutor" }]));
		})
		.await;
	let duplicate = server
		.mock_async(|when, then| {
			when.method(POST).path("/role-requests").json_body(json!({
				"userName": "Rahim",
				"userEmail": "rahim@example.com"
			}));
			then.status(409).json_body(json!({ "message": "Request already pending" }));
		})
		.await;
	let decide = server
		.mock_async(|when, then| {
			when.method(PATCH)
				.path("/role-requests/r1")
				.json_body(json!({ "status": "approved" }));
			then.status(200).json_body(json!({ "modifiedCount": 1 }));
		})
		.await;

	h.session.sign_in("abc123").await.expect("Sign-in should succeed.");

	let state = h
		.gateway
		.toggle_bookmark("t1", BookmarkKind::Tuition)
		.await
		.expect("Bookmark toggle should succeed.");

	assert!(state.bookmarked);
	assert!(
		h.gateway
			.is_bookmarked("t1", BookmarkKind::Tuition)
			.await
			.expect("Bookmark lookup should succeed.")
	);

	let bookmarks =
		h.gateway.my_bookmarks(BookmarkKind::Tutor).await.expect("Bookmarks should load.");

	assert_eq!(bookmarks[0].item_id, "u7");
	assert_eq!(bookmarks[0].kind, Some(BookmarkKind::Tutor));

	let err = h
		.gateway
		.request_tutor_role(&RoleRequestDraft {
			user_name: "Rahim".into(),
			user_email: "rahim@example.com".into(),
		})
		.await
		.expect_err("Duplicate role request should fail.");

	assert_eq!(err.status(), Some(409));
	assert_eq!(h.sign_out.calls(), 0);
	assert!(
		h.gateway
			.set_role_request_status("r1", RoleRequestStatus::Approved)
			.await
			.expect("Admin decision should succeed.")
			.is_effective()
	);

	toggle.assert_async().await;
	check.assert_async().await;
	saved.assert_async().await;
	duplicate.assert_async().await;
	decide.assert_async().await;
}

#[tokio::test]
async fn schedules_and_reviews_use_expected_routes() {
	let server = MockServer::start_async().await;
	let h = harness(&server);
	let create = server
		.mock_async(|when, then| {
			when.method(POST).path("/schedules").json_body(json!({
				"tuitionId": "t1",
				"partnerEmail": "student@example.com",
				"date": "2025-03-14",
				"startTime": "17:00",
				"endTime": "18:00",
				"subject": "Physics",
				"notes": "",
				"meetingLink": "https://meet.google.com/"
			}));
			then.status(200).json_body(json!({ "insertedId": "s1" }));
		})
		.await;
	let cancel = server
		.mock_async(|when, then| {
			when.method(DELETE).path("/schedules/s1");
			then.status(200).json_body(json!({ "deletedCount": 1 }));
		})
		.await;
	let reviews = server
		.mock_async(|when, then| {
			when.method(GET).path("/reviews/tutor01");
			then.status(200).json_body(json!([{ "rating": 5, "comment": "Clear explanations" }]));
		})
		.await;

	h.session.sign_in("tutor-token").await.expect("Sign-in should succeed.");

	let draft = ScheduleDraft {
		tuition_id: "t1".into(),
		partner_email: "student@example.com".into(),
		date: "2025-03-14".into(),
		start_time: "17:00".into(),
		end_time: "18:00".into(),
		subject: "Physics".into(),
		meeting_link: "https://meet.google.com/".into(),
		..Default::default()
	};

	let created = h.gateway.create_schedule(&draft).await.expect("Scheduling should succeed.");
	let cancelled = h.gateway.cancel_schedule("s1").await.expect("Cancelling should succeed.");

	assert_eq!(created.inserted_id.as_deref(), Some("s1"));
	assert!(cancelled.is_effective());

	let found = h.gateway.tutor_reviews("tutor01").await.expect("Reviews should load.");

	assert_eq!(found[0].rating, Some(5));

	create.assert_async().await;
	cancel.assert_async().await;
	reviews.assert_async().await;
}
