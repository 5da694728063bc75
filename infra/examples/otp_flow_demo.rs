//! Example walking through the OTP verification flow end to end
//!
//! Run with: cargo run --example otp_flow_demo

use std::sync::Arc;
use tokio::time::{sleep, Duration};

use fa_core::domain::entities::{PendingRegistration, Session, UserRecord};
use fa_core::services::otp::{NavigatorTrait, OtpFlowConfig, OtpFlowService, SubmitOutcome};
use fa_core::services::session::SessionService;
use fa_infra::api::MockAuthApi;
use fa_infra::config::AuthApiConfig;
use fa_infra::storage::MemoryStore;

struct ConsoleNavigator;

impl NavigatorTrait for ConsoleNavigator {
    fn verification_succeeded(&self, session: Option<&Session>) {
        match session {
            Some(session) => println!(
                "-> navigating to /dashboard as {}",
                session.user.display_name()
            ),
            None => println!("-> navigating to /dashboard (no session)"),
        }
    }

    fn edit_target_requested(&self, target: &str) {
        println!("-> navigating back to /register to edit {}", target);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let phone = "9876543210";

    let store = Arc::new(MemoryStore::new());
    let sessions = Arc::new(SessionService::new(Arc::clone(&store)));
    let api = Arc::new(MockAuthApi::from_config(&AuthApiConfig {
        latency_ms: 50,
        ..AuthApiConfig::default()
    }));
    let navigator = Arc::new(ConsoleNavigator);

    println!("\n=== Registration stages the account ===");
    let record = UserRecord::new("priya@fanarena.com", "tok-42").with_name("Priya", "Sharma");
    sessions
        .stage_registration(&PendingRegistration::with_target(record, phone))
        .await?;
    api.seed_code(phone, "482916").await;
    println!("Staged registration for {} and dispatched code 482916", phone);

    // Short cooldown so the demo does not wait out a full minute
    let config = OtpFlowConfig {
        resend_cooldown_seconds: 3,
        ..OtpFlowConfig::default()
    };
    let flow = OtpFlowService::from_pending(
        Arc::clone(&api),
        Arc::clone(&api),
        Arc::clone(&sessions),
        navigator,
        config,
    )
    .await?;

    println!("\n=== A wrong guess is rejected, digits stay ===");
    flow.paste("000000").await;
    if let SubmitOutcome::Rejected(_) = flow.submit().await? {
        let snapshot = flow.snapshot().await;
        let filled = snapshot.slots.iter().flatten().count();
        println!("Rejected: {}", snapshot.error.unwrap_or_default());
        println!("Buffer still holds {} digits", filled);
    }

    println!("\n=== Resend after the cooldown ===");
    sleep(Duration::from_secs(4)).await;
    flow.resend().await?;
    let code = api.last_code(phone).await.expect("code dispatched");
    println!(
        "Countdown restarted at {}",
        flow.snapshot().await.countdown_display
    );

    println!("\n=== The fresh code verifies ===");
    flow.paste(&code).await;
    match flow.submit().await? {
        SubmitOutcome::Verified(Some(session)) => {
            println!("Verified! Session token: {}", session.token);
        }
        other => println!("Unexpected outcome: {:?}", other),
    }

    println!("\n=== Storage after the handoff ===");
    println!("authenticated: {}", sessions.is_authenticated().await?);
    println!(
        "staged registration cleaned up: {}",
        sessions.pending_registration().await?.is_none()
    );

    Ok(())
}
