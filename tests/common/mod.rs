#![allow(dead_code)]

// std
use std::sync::{
	Arc,
	atomic::{AtomicU64, Ordering},
};
// crates.io
use httpmock::MockServer;
// self
use tuition_gateway::{
	config::GatewayConfig,
	gateway::Gateway,
	session::{RouteState, SessionContext, SignOut, SignOutFuture},
	store::MemoryStore,
};

/// Counts sign-out invocations.
#[derive(Clone, Debug, Default)]
pub struct RecordingSignOut(Arc<AtomicU64>);
impl RecordingSignOut {
	pub fn calls(&self) -> u64 {
		self.0.load(Ordering::SeqCst)
	}
}
impl SignOut for RecordingSignOut {
	fn sign_out(&self) -> SignOutFuture<'_> {
		self.0.fetch_add(1, Ordering::SeqCst);

		Box::pin(async { Ok(()) })
	}
}

/// Everything a test needs to observe the session side effects.
pub struct Harness {
	pub gateway: Gateway,
	pub session: SessionContext,
	pub store: MemoryStore,
	pub sign_out: RecordingSignOut,
	pub routes: RouteState,
}

pub fn harness(server: &MockServer) -> Harness {
	let config =
		GatewayConfig::new(&server.base_url()).expect("Mock server base URL should parse.");
	let store = MemoryStore::default();
	let sign_out = RecordingSignOut::default();
	let routes = RouteState::new("/dashboard");
	let session = SessionContext::from_config(&config, Arc::new(store.clone()))
		.with_sign_out(Arc::new(sign_out.clone()))
		.with_navigator(Arc::new(routes.clone()));
	let gateway = Gateway::authenticated(config, session.clone())
		.expect("Reqwest-backed gateway should build.");

	Harness { gateway, session, store, sign_out, routes }
}
