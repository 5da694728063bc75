//! Integration tests wiring the flow service to the infrastructure layer

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use fa_core::domain::entities::{PendingRegistration, Session, UserRecord};
use fa_core::repositories::store::SessionStore;
use fa_core::services::otp::{
    NavigatorTrait, OtpFlowConfig, OtpFlowService, ResendOutcome, SubmitOutcome,
};
use fa_core::services::session::SessionService;
use fa_core::{DomainError, FlowError};
use fa_infra::api::{create_auth_api, MockAuthApi};
use fa_infra::config::AuthApiConfig;
use fa_infra::storage::MemoryStore;

const PHONE: &str = "9876543210";

struct TestNavigator {
    verified: AtomicUsize,
    edits: AtomicUsize,
}

impl TestNavigator {
    fn new() -> Self {
        Self {
            verified: AtomicUsize::new(0),
            edits: AtomicUsize::new(0),
        }
    }
}

impl NavigatorTrait for TestNavigator {
    fn verification_succeeded(&self, _session: Option<&Session>) {
        self.verified.fetch_add(1, Ordering::SeqCst);
    }

    fn edit_target_requested(&self, _target: &str) {
        self.edits.fetch_add(1, Ordering::SeqCst);
    }
}

fn quiet_api() -> MockAuthApi {
    create_auth_api(&AuthApiConfig {
        console_output: false,
        latency_ms: 0,
        ..AuthApiConfig::default()
    })
}

#[tokio::test]
async fn test_full_stack_verification_flow() {
    let store = Arc::new(MemoryStore::new());
    let sessions = Arc::new(SessionService::new(Arc::clone(&store)));
    let api = Arc::new(quiet_api());
    let navigator = Arc::new(TestNavigator::new());

    // Register step: stage the account and dispatch the first code
    let record = UserRecord::new("priya@fanarena.com", "tok-42").with_phone(PHONE);
    sessions
        .stage_registration(&PendingRegistration::with_target(record, PHONE))
        .await
        .unwrap();
    api.seed_code(PHONE, "335577").await;

    // Verification step
    let flow = OtpFlowService::from_pending(
        Arc::clone(&api),
        Arc::clone(&api),
        Arc::clone(&sessions),
        Arc::clone(&navigator),
        OtpFlowConfig::default(),
    )
    .await
    .unwrap();

    assert_eq!(flow.paste("335577").await, 6);
    let session = match flow.submit().await.unwrap() {
        SubmitOutcome::Verified(Some(session)) => session,
        _ => panic!("Expected a verified session"),
    };
    assert_eq!(session.token, "tok-42");

    // The handoff reached the real store
    assert!(sessions.is_authenticated().await.unwrap());
    assert!(sessions.pending_registration().await.unwrap().is_none());
    assert_eq!(navigator.verified.load(Ordering::SeqCst), 1);

    // The promoted record sits in storage as the client's camelCase JSON
    let raw = store.get("user").await.unwrap().unwrap();
    let stored: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored["email"], "priya@fanarena.com");
    assert_eq!(stored["phone"], PHONE);
    assert_eq!(store.get("tempUser").await.unwrap(), None);
}

#[tokio::test(start_paused = true)]
async fn test_resend_generates_a_code_the_endpoint_accepts() {
    let store = Arc::new(MemoryStore::new());
    let sessions = Arc::new(SessionService::new(Arc::clone(&store)));
    let api = Arc::new(quiet_api());
    let navigator = Arc::new(TestNavigator::new());

    sessions
        .stage_registration(&PendingRegistration::with_target(
            UserRecord::new("a@b.com", "t1"),
            PHONE,
        ))
        .await
        .unwrap();

    let flow = OtpFlowService::new(
        PHONE,
        Arc::clone(&api),
        Arc::clone(&api),
        sessions,
        navigator,
        OtpFlowConfig::default(),
    );

    // Cooldown first
    tokio::time::sleep(tokio::time::Duration::from_millis(61_500)).await;
    match flow.resend().await.unwrap() {
        ResendOutcome::Dispatched {
            message_id,
            next_resend_at,
        } => {
            assert!(message_id.starts_with("mock_"));
            assert!(next_resend_at > chrono::Utc::now());
        }
        _ => panic!("Expected a dispatched resend"),
    }

    // The dispatched code verifies through the same endpoint
    let code = api.last_code(PHONE).await.unwrap();
    flow.paste(&code).await;
    match flow.submit().await.unwrap() {
        SubmitOutcome::Verified(Some(_)) => {}
        _ => panic!("Expected the dispatched code to verify"),
    }
}

#[tokio::test(start_paused = true)]
async fn test_dispatch_outage_surfaces_a_resend_error() {
    let store = Arc::new(MemoryStore::new());
    let sessions = Arc::new(SessionService::new(store));
    let api = Arc::new(quiet_api());
    let navigator = Arc::new(TestNavigator::new());

    let flow = OtpFlowService::new(
        PHONE,
        Arc::clone(&api),
        Arc::clone(&api),
        sessions,
        navigator,
        OtpFlowConfig::default(),
    );

    tokio::time::sleep(tokio::time::Duration::from_millis(61_500)).await;
    api.set_simulate_failure(true);

    match flow.resend().await.unwrap_err() {
        DomainError::Flow(FlowError::ResendFailed { message }) => {
            assert_eq!(message, "Simulated dispatch failure");
        }
        _ => panic!("Expected a failed resend"),
    }

    // The flow survives the outage and recovers once dispatch does
    api.set_simulate_failure(false);
    tokio::time::sleep(tokio::time::Duration::from_millis(61_500)).await;
    match flow.resend().await.unwrap() {
        ResendOutcome::Dispatched { .. } => {}
        _ => panic!("Expected the retry to dispatch"),
    }
}

#[tokio::test]
async fn test_initialize_builds_a_working_container() {
    std::env::set_var("AUTH_API_CONSOLE", "0");
    std::env::set_var("AUTH_API_LATENCY_MS", "0");

    let services = fa_infra::initialize().await.unwrap();

    let sessions = Arc::new(SessionService::new(Arc::clone(&services.store)));
    sessions
        .stage_registration(&PendingRegistration::with_target(
            UserRecord::new("a@b.com", "t1"),
            PHONE,
        ))
        .await
        .unwrap();

    services.auth_api.seed_code(PHONE, "112233").await;
    let navigator = Arc::new(TestNavigator::new());
    let flow = OtpFlowService::from_pending(
        Arc::clone(&services.auth_api),
        Arc::clone(&services.auth_api),
        sessions,
        navigator,
        OtpFlowConfig::default(),
    )
    .await
    .unwrap();

    flow.paste("112233").await;
    match flow.submit().await.unwrap() {
        SubmitOutcome::Verified(Some(_)) => {}
        _ => panic!("Expected the container wiring to verify"),
    }
}
