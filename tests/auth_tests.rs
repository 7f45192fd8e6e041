use std::{sync::Arc, time::Duration};

use pix_navigator::{AuthSignal, AuthState, StaticAuth};
use tokio::time::timeout;

#[tokio::test]
async fn test_signal_starts_unresolved_and_signed_out() {
    let auth = Arc::new(AuthSignal::new());
    assert!(!auth.is_resolved());
    assert!(!auth.current_user_present());

    let waiting = timeout(Duration::from_millis(50), auth.wait_for_auth()).await;
    assert!(waiting.is_err(), "wait must not complete before resolve");
}

#[tokio::test]
async fn test_waiters_wake_on_resolve() {
    let auth = Arc::new(AuthSignal::new());
    let waiter = {
        let auth = auth.clone();
        tokio::spawn(async move { auth.wait_for_auth().await })
    };
    tokio::task::yield_now().await;

    auth.resolve(true);

    timeout(Duration::from_secs(1), waiter)
        .await
        .expect("waiter woke up")
        .unwrap();
    assert!(auth.current_user_present());
}

#[tokio::test]
async fn test_signal_stays_settled() {
    let auth = AuthSignal::new();
    auth.resolve(false);
    auth.resolve(true);
    auth.set_signed_in(false);

    assert!(auth.is_resolved());
    assert!(!auth.current_user_present());
    timeout(Duration::from_millis(50), auth.wait_for_auth())
        .await
        .expect("settled signal returns immediately");
}

#[tokio::test]
async fn test_static_auth() {
    assert!(StaticAuth::signed_in().current_user_present());
    assert!(!StaticAuth::signed_out().current_user_present());
    StaticAuth::signed_out().wait_for_auth().await;
}
