use super::*;

// Cross-module behavior of the orchestrator. Stage-level coverage lives in
// the per-module test blocks; the full network flows live in
// tests/integration_upgrade.rs against a mock release feed.

fn dev_context() -> UpdateContext {
    // Point the endpoints at a port nothing listens on, so an accidental
    // network access fails loudly instead of reaching the real feed.
    UpdateContext::from_build_env()
        .with_version(context::DEV_VERSION)
        .with_api_base("http://127.0.0.1:1")
        .with_download_base("http://127.0.0.1:1")
}

#[tokio::test]
async fn run_skips_dev_builds_without_network_access() {
    let outcome = run(&dev_context()).await;
    match outcome {
        UpdateOutcome::Skipped { version } => assert_eq!(version, context::DEV_VERSION),
        other => panic!("expected Skipped, got {other:?}"),
    }
}

#[tokio::test]
async fn check_skips_dev_builds_without_network_access() {
    let outcome = check(&dev_context()).await;
    assert!(matches!(outcome, UpdateOutcome::Skipped { .. }));
}

#[tokio::test]
async fn unreachable_feed_degrades_to_network_failure() {
    let ctx = dev_context().with_version("1.0.0");
    let outcome = run(&ctx).await;
    match outcome {
        UpdateOutcome::Failed(failure) => {
            assert!(matches!(failure.error, UpdateError::Network { .. }));
            assert!(failure.available.is_none());
        }
        other => panic!("expected Failed, got {other:?}"),
    }
}

#[test]
fn build_version_defaults_to_dev_sentinel() {
    // Local builds leave BOOKFORGE_VERSION unset, so the binary under test
    // carries the sentinel and will never try to update itself.
    assert_eq!(context::BUILD_VERSION, context::DEV_VERSION);
}
