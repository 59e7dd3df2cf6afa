use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::config::AppConfig;
use crate::models::{FieldValuesConfig, FieldValuesPatch};

// 1. FieldValuesFetcher Contract

/// FieldValuesFetcher
///
/// Defines the abstract contract for obtaining the remote field-values
/// partial record. This trait lets us swap the concrete implementation from
/// the real HTTP client (HttpFieldValuesClient) to the in-memory mock
/// (MockFieldValuesFetcher) during testing without touching the provider.
///
/// Every failure mode (network error, non-2xx status, malformed body) is
/// collapsed into the `Err(String)` side: the provider treats them all the
/// same way, as "no data".
#[async_trait]
pub trait FieldValuesFetcher: Send + Sync {
    /// Performs one fetch attempt against the remote source. No retries.
    async fn fetch(&self) -> Result<FieldValuesPatch, String>;
}

/// The concrete type used to share a fetcher across provider clones.
pub type FetcherState = Arc<dyn FieldValuesFetcher>;

// 2. The Real Implementation (HTTP)

/// HttpFieldValuesClient
///
/// The concrete fetcher: a single GET against the configured endpoint,
/// expecting a JSON object with zero or more of the field-values keys.
#[derive(Clone)]
pub struct HttpFieldValuesClient {
    client: reqwest::Client,
    url: String,
}

impl HttpFieldValuesClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    /// Constructs the client from the loaded application configuration.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.field_values_url.clone())
    }
}

#[async_trait]
impl FieldValuesFetcher for HttpFieldValuesClient {
    async fn fetch(&self) -> Result<FieldValuesPatch, String> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| format!("field-values request failed: {e}"))?;

        // Non-2xx statuses are failures, not data.
        let response = response
            .error_for_status()
            .map_err(|e| format!("field-values endpoint returned an error status: {e}"))?;

        response
            .json::<FieldValuesPatch>()
            .await
            .map_err(|e| format!("field-values response was not valid JSON: {e}"))
    }
}

// 3. The Mock Implementation (For Tests)

/// MockFieldValuesFetcher
///
/// A mock fetcher used exclusively in tests. It can return a canned patch,
/// simulate a failure, or delay its answer to keep an attempt in flight while
/// the test pokes at the provider.
#[derive(Clone, Default)]
pub struct MockFieldValuesFetcher {
    /// The patch returned on success.
    pub patch: FieldValuesPatch,
    /// When true, every fetch returns a simulated failure.
    pub should_fail: bool,
    /// Optional artificial latency before the result is produced.
    pub delay: Option<Duration>,
}

impl MockFieldValuesFetcher {
    pub fn new(patch: FieldValuesPatch) -> Self {
        Self {
            patch,
            should_fail: false,
            delay: None,
        }
    }

    pub fn new_failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl FieldValuesFetcher for MockFieldValuesFetcher {
    async fn fetch(&self) -> Result<FieldValuesPatch, String> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.should_fail {
            return Err("Mock Fetch Error: Simulation requested".to_string());
        }
        Ok(self.patch.clone())
    }
}

// 4. The Provider

/// Shared mutable state behind every clone of a provider handle.
struct ProviderState {
    values: FieldValuesConfig,
    is_loading: bool,
    error: Option<String>,
    /// Set by `close`. Any fetch result arriving afterwards is discarded.
    closed: bool,
}

/// FieldValuesProvider
///
/// Owns the field-values snapshot consumed by the upload form. The snapshot
/// is always usable: it starts from the compiled-in defaults and is only ever
/// replaced wholesale, under the state lock, so readers never observe a
/// partial merge.
///
/// Failure semantics: a failed fetch is non-fatal. It is logged at warning
/// severity, recorded in `error()`, and the previous (default or last-good)
/// snapshot stays in effect. A fetch that never resolves simply leaves the
/// current snapshot in effect indefinitely.
///
/// Cloning the provider clones the handle, not the state: all clones observe
/// the same snapshot.
#[derive(Clone)]
pub struct FieldValuesProvider {
    fetcher: FetcherState,
    state: Arc<Mutex<ProviderState>>,
}

impl FieldValuesProvider {
    /// new
    ///
    /// Builds a provider over the given fetcher, seeded with the compiled-in
    /// defaults. No fetch is started; see `load` / `refetch`.
    pub fn new(fetcher: FetcherState) -> Self {
        Self {
            fetcher,
            state: Arc::new(Mutex::new(ProviderState {
                values: FieldValuesConfig::default(),
                is_loading: false,
                error: None,
                closed: false,
            })),
        }
    }

    /// load
    ///
    /// Returns a usable config synchronously (defaults, or the last-good
    /// snapshot) and kicks off one background fetch attempt that may later
    /// replace it. Safe to call repeatedly: the fetch is a no-op while an
    /// attempt is already in flight.
    pub fn load(&self) -> FieldValuesConfig {
        self.refetch();
        self.current()
    }

    /// current
    ///
    /// The current snapshot. Atomic from the reader's point of view: the
    /// value is cloned out under the lock, so a concurrent replacement can
    /// never expose a mix of old and new keys.
    pub fn current(&self) -> FieldValuesConfig {
        self.lock_state().values.clone()
    }

    /// True while a fetch attempt is in flight.
    pub fn is_loading(&self) -> bool {
        self.lock_state().is_loading
    }

    /// The message of the most recent failed attempt, cleared when a later
    /// attempt starts.
    pub fn error(&self) -> Option<String> {
        self.lock_state().error.clone()
    }

    /// refetch
    ///
    /// Requests one new fetch attempt, fire-and-forget. At most one attempt
    /// is in flight at a time: calling this while loading is a no-op, and a
    /// new attempt never cancels a running one. Requires a tokio runtime.
    pub fn refetch(&self) {
        {
            let mut state = self.lock_state();
            if state.closed || state.is_loading {
                return;
            }
            state.is_loading = true;
            state.error = None;
        }

        let fetcher = Arc::clone(&self.fetcher);
        let shared = Arc::clone(&self.state);

        tokio::spawn(async move {
            let result = fetcher.fetch().await;

            let mut state = lock_shared(&shared);
            if state.closed {
                // The consuming UI went away while the request was in
                // flight; the result must not be applied.
                tracing::debug!("discarding field-values fetch result after close");
                return;
            }
            state.is_loading = false;

            match result {
                Ok(patch) => {
                    // Replace the snapshot in one assignment under the lock.
                    state.values = state.values.merged(&patch);
                    state.error = None;
                    tracing::debug!("field-values snapshot updated from remote");
                }
                Err(message) => {
                    tracing::warn!(error = %message, "field-values fetch failed, keeping current config");
                    state.error = Some(message);
                }
            }
        });
    }

    /// close
    ///
    /// Unmount semantics: marks the provider closed so that an in-flight
    /// fetch result is discarded rather than applied, and later `refetch`
    /// calls become no-ops. The last-observed snapshot remains readable.
    pub fn close(&self) {
        self.lock_state().closed = true;
    }

    fn lock_state(&self) -> MutexGuard<'_, ProviderState> {
        lock_shared(&self.state)
    }
}

/// Locks the provider state, recovering from a poisoned lock. The state is a
/// plain value snapshot, so the last write before a panic is still coherent.
fn lock_shared(state: &Arc<Mutex<ProviderState>>) -> MutexGuard<'_, ProviderState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
