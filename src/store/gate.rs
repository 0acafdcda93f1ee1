//! Load-once gate over an entity collection.
//!
//! The gate moves through `Unloaded → Loading → Loaded`. While a load is in
//! flight every `ensure_loaded` caller joins it instead of starting another
//! fetch, and all of them observe the same outcome. A failed, timed out or
//! cancelled load drops back to `Unloaded` so the next caller retries.
//! Nothing leaves `Loaded`.

use crate::errors::{FetchError, LoadError};
use crate::models::Entity;
use crate::source::DataSource;
use crate::store::collection::CollectionState;
use futures::FutureExt;
use parking_lot::Mutex;
use std::any::Any;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::AbortHandle;

/// Default upper bound for a single fetch.
pub const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_secs(30);

type Outcome = Option<Result<(), LoadError>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Unloaded,
    Loading,
    Loaded,
}

/// Shared handle; clones refer to the same collection.
pub struct LoadGate<E: Entity> {
    inner: Arc<Inner<E>>,
}

struct Inner<E: Entity> {
    name: String,
    source: Arc<dyn DataSource<E>>,
    timeout: Duration,
    state: Mutex<GateState<E>>,
    loaded_tx: watch::Sender<bool>,
    fetches: AtomicU64,
}

struct GateState<E> {
    collection: CollectionState<E>,
    in_flight: Option<InFlight>,
    next_ticket: u64,
}

/// The single load currently running. Whoever takes it out of the state
/// (completion or cancel) is the one that releases the waiters.
struct InFlight {
    ticket: u64,
    done: watch::Sender<Outcome>,
    task: AbortHandle,
}

impl<E: Entity> Clone for LoadGate<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E: Entity> fmt::Debug for LoadGate<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadGate")
            .field("name", &self.inner.name)
            .field("phase", &self.phase())
            .field("timeout", &self.inner.timeout)
            .finish()
    }
}

impl<E: Entity> LoadGate<E> {
    pub fn new(name: impl Into<String>, source: Arc<dyn DataSource<E>>, timeout: Duration) -> Self {
        let (loaded_tx, _) = watch::channel(false);
        Self {
            inner: Arc::new(Inner {
                name: name.into(),
                source,
                timeout,
                state: Mutex::new(GateState {
                    collection: CollectionState::new(),
                    in_flight: None,
                    next_ticket: 0,
                }),
                loaded_tx,
                fetches: AtomicU64::new(0),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Resolves to `Ok(true)` once the collection is loaded.
    ///
    /// Starts a fetch only when the collection is unloaded and no fetch is
    /// running; otherwise it returns immediately or joins the running one.
    /// Must be polled inside a Tokio runtime: the fetch runs on its own task,
    /// so dropping this future does not abort it for the other waiters.
    pub async fn ensure_loaded(&self) -> Result<bool, LoadError> {
        let mut done = {
            let mut state = self.inner.state.lock();
            if state.collection.is_loaded() {
                return Ok(true);
            }
            match &state.in_flight {
                Some(flight) => {
                    tracing::debug!(collection = %self.inner.name, "joining in-flight load");
                    flight.done.subscribe()
                }
                None => self.start_load(&mut state),
            }
        };

        let outcome = match done.wait_for(Option::is_some).await {
            Ok(outcome) => outcome.clone(),
            // sender gone without an outcome: the task was torn down
            Err(_) => None,
        };

        match outcome {
            Some(Ok(())) => Ok(true),
            Some(Err(e)) => Err(e),
            None => Err(LoadError::Cancelled),
        }
    }

    fn start_load(&self, state: &mut GateState<E>) -> watch::Receiver<Outcome> {
        let ticket = state.next_ticket;
        state.next_ticket += 1;

        let (done, rx) = watch::channel(None);
        let attempt = self.inner.fetches.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::info!(collection = %self.inner.name, attempt, "starting load");

        let inner = Arc::clone(&self.inner);
        let handle = tokio::spawn(async move {
            let result = inner.fetch().await;
            inner.complete(ticket, result);
        });

        state.in_flight = Some(InFlight {
            ticket,
            done,
            task: handle.abort_handle(),
        });
        rx
    }

    /// Aborts the running fetch and releases its waiters with
    /// [`LoadError::Cancelled`]. Returns `false` when nothing was running.
    pub fn cancel(&self) -> bool {
        let flight = self.inner.state.lock().in_flight.take();
        match flight {
            Some(flight) => {
                flight.task.abort();
                flight.done.send_replace(Some(Err(LoadError::Cancelled)));
                tracing::info!(collection = %self.inner.name, "load cancelled");
                true
            }
            None => false,
        }
    }

    pub fn phase(&self) -> LoadPhase {
        let state = self.inner.state.lock();
        if state.collection.is_loaded() {
            LoadPhase::Loaded
        } else if state.in_flight.is_some() {
            LoadPhase::Loading
        } else {
            LoadPhase::Unloaded
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.inner.state.lock().collection.is_loaded()
    }

    /// Current snapshot; empty until the first successful load.
    pub fn get_all(&self) -> Vec<E> {
        self.inner.state.lock().collection.get_all()
    }

    pub fn get_by_key(&self, key: &str) -> Option<E> {
        self.inner.state.lock().collection.get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.state.lock().collection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Signal that flips to `true` when the collection becomes loaded.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.inner.loaded_tx.subscribe()
    }

    /// Number of fetches started so far.
    pub fn fetch_count(&self) -> u64 {
        self.inner.fetches.load(Ordering::SeqCst)
    }
}

impl<E: Entity> Inner<E> {
    async fn fetch(&self) -> Result<Vec<E>, LoadError> {
        let call = AssertUnwindSafe(self.source.fetch_all()).catch_unwind();
        match tokio::time::timeout(self.timeout, call).await {
            Err(_) => Err(LoadError::TimedOut(self.timeout)),
            Ok(Err(panic)) => Err(FetchError::Panicked(panic_message(panic.as_ref())).into()),
            Ok(Ok(result)) => result.map_err(LoadError::from),
        }
    }

    fn complete(&self, ticket: u64, result: Result<Vec<E>, LoadError>) {
        let (done, outcome) = {
            let mut state = self.state.lock();
            let Some(flight) = state.in_flight.take_if(|f| f.ticket == ticket) else {
                tracing::debug!(
                    collection = %self.name,
                    ticket,
                    "discarding result of a cancelled load"
                );
                return;
            };

            let outcome = match result {
                Ok(records) => {
                    let count = records.len();
                    state.collection.replace_all(records);
                    tracing::info!(collection = %self.name, count, "collection loaded");
                    Ok(())
                }
                Err(e) => {
                    tracing::warn!(collection = %self.name, error = %e, "load failed");
                    Err(e)
                }
            };
            (flight.done, outcome)
        };

        if outcome.is_ok() {
            self.loaded_tx.send_replace(true);
        }
        done.send_replace(Some(outcome));
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
