use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use portal_nav::{
    AgeRange, FieldValuesConfig, FieldValuesFetcher, FieldValuesPatch, FieldValuesProvider,
    MockFieldValuesFetcher,
};

/// Enables log output for a test run when RUST_LOG is set. Repeated calls
/// are harmless: only the first subscriber wins.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Waits for the in-flight attempt to settle, failing the test if it never
/// does.
async fn settle(provider: &FieldValuesProvider) {
    for _ in 0..200 {
        if !provider.is_loading() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("field-values provider never finished loading");
}

/// A fetcher that counts how many attempts were actually started.
struct CountingFetcher {
    calls: Arc<AtomicUsize>,
    delay: Duration,
    patch: FieldValuesPatch,
}

#[async_trait]
impl FieldValuesFetcher for CountingFetcher {
    async fn fetch(&self) -> Result<FieldValuesPatch, String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        Ok(self.patch.clone())
    }
}

// --- Merge Semantics ---

#[test]
fn merge_overwrites_only_present_keys() {
    let defaults = FieldValuesConfig::default();
    let patch = FieldValuesPatch {
        topics: Some(vec!["x".to_string(), "y".to_string()]),
        ..FieldValuesPatch::default()
    };

    let merged = defaults.merged(&patch);

    assert_eq!(merged.topics, vec!["x".to_string(), "y".to_string()]);
    // Every other key is carried over unchanged.
    assert_eq!(merged.format, defaults.format);
    assert_eq!(merged.resources_available, defaults.resources_available);
    assert_eq!(merged.bloom_level, defaults.bloom_level);
    assert_eq!(merged.mental_load, defaults.mental_load);
    assert_eq!(merged.physical_energy, defaults.physical_energy);
    assert_eq!(merged.priority_categories, defaults.priority_categories);
    assert_eq!(merged.age_range, defaults.age_range);
}

#[test]
fn merge_is_shallow_not_deep() {
    // A present key replaces the default list wholesale; list contents are
    // never unioned.
    let defaults = FieldValuesConfig::default();
    let patch = FieldValuesPatch {
        format: Some(vec!["OnlyThis".to_string()]),
        ..FieldValuesPatch::default()
    };

    let merged = defaults.merged(&patch);
    assert_eq!(merged.format, vec!["OnlyThis".to_string()]);
}

#[test]
fn empty_patch_leaves_defaults_identical() {
    let defaults = FieldValuesConfig::default();
    assert_eq!(defaults.merged(&FieldValuesPatch::default()), defaults);
}

#[test]
fn patch_deserializes_from_the_wire_shape() {
    // The remote endpoint returns a JSON object with zero or more keys;
    // age_range is an object, the rest are string lists.
    let json = r#"{"topics": ["Robotics"], "age_range": {"min": 6, "max": 12}}"#;
    let patch: FieldValuesPatch = serde_json::from_str(json).unwrap();

    assert_eq!(patch.topics, Some(vec!["Robotics".to_string()]));
    assert_eq!(patch.age_range, Some(AgeRange { min: 6, max: 12 }));
    assert!(patch.format.is_none());
}

// --- Provider Semantics ---

#[tokio::test]
async fn load_returns_defaults_synchronously() {
    let fetcher = Arc::new(MockFieldValuesFetcher::new_failing().with_delay(
        Duration::from_millis(100),
    ));
    let provider = FieldValuesProvider::new(fetcher);

    // Usable immediately, before the background attempt resolves.
    let config = provider.load();
    assert_eq!(config, FieldValuesConfig::default());
    assert!(provider.is_loading());
}

#[tokio::test]
async fn successful_fetch_replaces_patched_keys_atomically() {
    let patch = FieldValuesPatch {
        topics: Some(vec!["Coding".to_string()]),
        age_range: Some(AgeRange { min: 5, max: 10 }),
        ..FieldValuesPatch::default()
    };
    let provider = FieldValuesProvider::new(Arc::new(MockFieldValuesFetcher::new(patch)));

    provider.refetch();
    settle(&provider).await;

    let config = provider.current();
    assert_eq!(config.topics, vec!["Coding".to_string()]);
    assert_eq!(config.age_range, AgeRange { min: 5, max: 10 });
    assert_eq!(config.format, FieldValuesConfig::default().format);
    assert!(provider.error().is_none());
}

#[tokio::test]
async fn failed_fetch_keeps_defaults_and_records_the_error() {
    init_tracing();
    let provider = FieldValuesProvider::new(Arc::new(MockFieldValuesFetcher::new_failing()));

    provider.refetch();
    settle(&provider).await;

    // Default retained, error surfaced, loading finished.
    assert_eq!(provider.current(), FieldValuesConfig::default());
    let error = provider.error().expect("failure must be recorded");
    assert!(!error.is_empty());
    assert!(!provider.is_loading());
}

#[tokio::test]
async fn refetch_while_loading_is_a_no_op() {
    let calls = Arc::new(AtomicUsize::new(0));
    let provider = FieldValuesProvider::new(Arc::new(CountingFetcher {
        calls: Arc::clone(&calls),
        delay: Duration::from_millis(50),
        patch: FieldValuesPatch::default(),
    }));

    provider.refetch();
    // Give the spawned task a chance to start before hammering refetch.
    tokio::time::sleep(Duration::from_millis(10)).await;
    provider.refetch();
    provider.refetch();
    settle(&provider).await;

    assert_eq!(calls.load(Ordering::SeqCst), 1, "only one attempt may start");

    // Once settled, a new attempt is permitted again.
    provider.refetch();
    settle(&provider).await;
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn close_discards_an_in_flight_result() {
    let patch = FieldValuesPatch {
        topics: Some(vec!["MustNeverAppear".to_string()]),
        ..FieldValuesPatch::default()
    };
    let fetcher =
        Arc::new(MockFieldValuesFetcher::new(patch).with_delay(Duration::from_millis(30)));
    let provider = FieldValuesProvider::new(fetcher);

    provider.refetch();
    provider.close();

    // Wait well past the fetch delay: the result must have been dropped.
    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(provider.current(), FieldValuesConfig::default());
    assert!(provider.error().is_none());
}

#[tokio::test]
async fn refetch_after_close_is_a_no_op() {
    let calls = Arc::new(AtomicUsize::new(0));
    let provider = FieldValuesProvider::new(Arc::new(CountingFetcher {
        calls: Arc::clone(&calls),
        delay: Duration::from_millis(1),
        patch: FieldValuesPatch::default(),
    }));

    provider.close();
    provider.refetch();
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(!provider.is_loading());
}

#[tokio::test]
async fn clones_share_one_snapshot() {
    let patch = FieldValuesPatch {
        mental_load: Some(vec!["Variable".to_string()]),
        ..FieldValuesPatch::default()
    };
    let provider = FieldValuesProvider::new(Arc::new(MockFieldValuesFetcher::new(patch)));
    let reader = provider.clone();

    provider.refetch();
    settle(&reader).await;

    assert_eq!(reader.current().mental_load, vec!["Variable".to_string()]);
}
