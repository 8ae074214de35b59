use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::time::timeout;

use pt_app::{SessionContext, SessionGate};
use pt_core::ports::{
    IdentityEmission, IdentityError, IdentityProviderPort, IdentitySubscription,
    NotificationLevel, NotificationPort,
};
use pt_core::session::{GatePhase, IdentityUser, Session, SessionGateState, SessionUser};

struct TestMocks {
    provider: Arc<FakeIdentityProvider>,
    notifications: Arc<Mutex<Vec<(NotificationLevel, String)>>>,
}

struct FakeIdentityProvider {
    sender: Mutex<Option<mpsc::UnboundedSender<IdentityEmission>>>,
    subscribes: AtomicUsize,
    unsubscribes: Arc<AtomicUsize>,
    sign_outs: AtomicUsize,
    refuse_subscribe: bool,
}

impl FakeIdentityProvider {
    fn new(refuse_subscribe: bool) -> Self {
        Self {
            sender: Mutex::new(None),
            subscribes: AtomicUsize::new(0),
            unsubscribes: Arc::new(AtomicUsize::new(0)),
            sign_outs: AtomicUsize::new(0),
            refuse_subscribe,
        }
    }

    fn emit(&self, emission: IdentityEmission) {
        let guard = self.sender.lock().unwrap();
        guard
            .as_ref()
            .expect("no active subscription")
            .send(emission)
            .expect("gate stopped listening");
    }

    fn close(&self) {
        self.sender.lock().unwrap().take();
    }

    fn unsubscribes(&self) -> usize {
        self.unsubscribes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityProviderPort for FakeIdentityProvider {
    async fn subscribe(&self) -> Result<IdentitySubscription, IdentityError> {
        if self.refuse_subscribe {
            return Err(IdentityError::Unavailable("offline".into()));
        }
        self.subscribes.fetch_add(1, Ordering::SeqCst);
        let (tx, rx) = mpsc::unbounded_channel();
        *self.sender.lock().unwrap() = Some(tx);
        let unsubscribes = self.unsubscribes.clone();
        Ok(IdentitySubscription::new(rx, move || {
            unsubscribes.fetch_add(1, Ordering::SeqCst);
        }))
    }

    async fn id_token(&self) -> Result<Option<String>, IdentityError> {
        Ok(None)
    }

    async fn sign_out(&self) -> Result<(), IdentityError> {
        self.sign_outs.fetch_add(1, Ordering::SeqCst);
        // the provider confirms through its stream
        if let Some(sender) = self.sender.lock().unwrap().as_ref() {
            let _ = sender.send(Ok(None));
        }
        Ok(())
    }
}

struct MockNotifier {
    seen: Arc<Mutex<Vec<(NotificationLevel, String)>>>,
}

impl NotificationPort for MockNotifier {
    fn notify(&self, level: NotificationLevel, message: &str) {
        self.seen.lock().unwrap().push((level, message.to_string()));
    }
}

async fn start_gate(refuse_subscribe: bool) -> (TestMocks, SessionGate) {
    let provider = Arc::new(FakeIdentityProvider::new(refuse_subscribe));
    let notifications = Arc::new(Mutex::new(Vec::new()));
    let notifier = Arc::new(MockNotifier {
        seen: notifications.clone(),
    });

    let gate = SessionGate::start(provider.clone(), notifier).await;
    (
        TestMocks {
            provider,
            notifications,
        },
        gate,
    )
}

async fn wait_until<F>(context: &mut SessionContext, predicate: F) -> SessionGateState
where
    F: Fn(&SessionGateState) -> bool,
{
    timeout(Duration::from_secs(2), async {
        loop {
            let snapshot = context.snapshot();
            if predicate(&snapshot) {
                return snapshot;
            }
            assert!(context.changed().await, "session gate dropped");
        }
    })
    .await
    .expect("session gate did not reach the expected state")
}

fn john() -> IdentityUser {
    IdentityUser {
        display_name: Some("John Doe".into()),
        email: Some("john@example.com".into()),
        photo_url: Some("https://example.com/john.png".into()),
    }
}

fn jane() -> IdentityUser {
    IdentityUser {
        display_name: Some("Jane".into()),
        email: Some("jane@example.com".into()),
        photo_url: None,
    }
}

#[tokio::test]
async fn test_fresh_gate_is_loading_without_session() {
    let (mocks, gate) = start_gate(false).await;
    let context = gate.context();

    assert!(context.loading());
    assert_eq!(context.session(), None);
    assert_eq!(context.phase(), GatePhase::Loading);
    assert_eq!(mocks.provider.subscribes.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_null_fields_normalize_to_empty_strings() {
    let (mocks, gate) = start_gate(false).await;
    let mut context = gate.context();

    mocks.provider.emit(Ok(Some(IdentityUser {
        display_name: None,
        email: None,
        photo_url: None,
    })));
    let phase = context.wait_until_resolved().await;

    assert!(!context.loading());
    assert_eq!(
        phase,
        GatePhase::Authenticated(SessionUser {
            name: String::new(),
            email: String::new(),
            image: String::new(),
        })
    );
}

#[tokio::test]
async fn test_loading_latch_releases_once() {
    let (mocks, gate) = start_gate(false).await;
    let mut context = gate.context();

    mocks.provider.emit(Ok(None));
    assert_eq!(context.wait_until_resolved().await, GatePhase::Unauthenticated);

    mocks.provider.emit(Ok(Some(john())));
    let state = wait_until(&mut context, |s| s.session.is_some()).await;
    assert!(!state.loading());

    gate.set_loading(true).await;
    assert!(!context.loading());
}

#[tokio::test]
async fn test_later_emissions_overwrite_earlier_ones() {
    let (mocks, gate) = start_gate(false).await;
    let mut context = gate.context();

    mocks.provider.emit(Ok(Some(john())));
    mocks.provider.emit(Ok(Some(jane())));
    mocks.provider.emit(Ok(None));

    let state = wait_until(&mut context, |s| !s.loading() && s.session.is_none()).await;
    assert_eq!(state.phase(), GatePhase::Unauthenticated);

    mocks.provider.emit(Ok(Some(jane())));
    let state = wait_until(&mut context, |s| s.session.is_some()).await;
    assert_eq!(
        state.session.unwrap().user.email,
        "jane@example.com".to_string()
    );
}

#[tokio::test]
async fn test_local_sign_out_is_optimistic_and_confirmed() {
    let (mocks, gate) = start_gate(false).await;
    let mut context = gate.context();

    mocks.provider.emit(Ok(Some(john())));
    wait_until(&mut context, |s| s.session.is_some()).await;

    let state = gate.sign_out().await;

    assert_eq!(state.session, None);
    assert_eq!(mocks.provider.sign_outs.load(Ordering::SeqCst), 1);
    // the confirming null emission changes nothing
    let state = wait_until(&mut context, |s| s.session.is_none()).await;
    assert_eq!(state.phase(), GatePhase::Unauthenticated);
}

#[tokio::test]
async fn test_local_sign_in_sets_session_ahead_of_stream() {
    let (mocks, gate) = start_gate(false).await;
    let mut context = gate.context();
    mocks.provider.emit(Ok(None));
    context.wait_until_resolved().await;

    gate.set_session(Session::from_identity(&jane())).await;

    assert_eq!(
        context.session().map(|s| s.user.name),
        Some("Jane".to_string())
    );
}

#[tokio::test]
async fn test_stream_failure_resolves_to_unauthenticated() {
    let (mocks, gate) = start_gate(false).await;
    let mut context = gate.context();

    mocks
        .provider
        .emit(Err(IdentityError::Stream("token refresh failed".into())));

    assert_eq!(context.wait_until_resolved().await, GatePhase::Unauthenticated);
    let notifications = mocks.notifications.lock().unwrap().clone();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].0, NotificationLevel::Error);
    assert!(notifications[0].1.contains("token refresh failed"));
}

#[tokio::test]
async fn test_refused_subscription_does_not_hang_in_loading() {
    let (mocks, gate) = start_gate(true).await;

    assert_eq!(gate.context().phase(), GatePhase::Unauthenticated);
    assert_eq!(mocks.provider.unsubscribes(), 0);
    gate.stop().await;
}

#[tokio::test]
async fn test_unsubscribes_exactly_once_after_many_transitions() {
    let (mocks, gate) = start_gate(false).await;
    let mut context = gate.context();

    for _ in 0..5 {
        mocks.provider.emit(Ok(Some(john())));
        wait_until(&mut context, |s| s.session.is_some()).await;
        mocks.provider.emit(Ok(None));
        wait_until(&mut context, |s| s.session.is_none() && !s.loading()).await;
    }

    gate.stop().await;
    gate.stop().await;
    assert_eq!(mocks.provider.unsubscribes(), 1);

    drop(gate);
    assert_eq!(mocks.provider.unsubscribes(), 1);
}

#[tokio::test]
async fn test_stream_end_keeps_state_and_releases_subscription() {
    let (mocks, gate) = start_gate(false).await;
    let mut context = gate.context();

    mocks.provider.emit(Ok(Some(john())));
    wait_until(&mut context, |s| s.session.is_some()).await;
    mocks.provider.close();

    gate.stop().await;

    assert_eq!(mocks.provider.unsubscribes(), 1);
    assert!(context.session().is_some());
}

#[tokio::test]
async fn test_dropping_gate_releases_subscription() {
    let (mocks, gate) = start_gate(false).await;
    drop(gate);

    timeout(Duration::from_secs(2), async {
        while mocks.provider.unsubscribes() == 0 {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("subscription was not released");
    assert_eq!(mocks.provider.unsubscribes(), 1);
}

#[tokio::test]
async fn test_remember_me_does_not_affect_gating() {
    let (mocks, gate) = start_gate(false).await;
    let mut context = gate.context();
    mocks.provider.emit(Ok(None));
    context.wait_until_resolved().await;

    gate.set_remember_me(true).await;

    assert!(context.remember_me());
    assert_eq!(context.phase(), GatePhase::Unauthenticated);
}
