use async_trait::async_trait;
use futures::FutureExt;
use futures::future::join_all;
use parking_lot::Mutex;
use rworktime::errors::{FetchError, LoadError};
use rworktime::models::Entity;
use rworktime::service::{EntityService, Resolver};
use rworktime::source::DataSource;
use rworktime::store::{LoadGate, LoadPhase};
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Semaphore;

#[derive(Debug, Clone, PartialEq)]
struct Item {
    id: &'static str,
    value: u32,
}

impl Entity for Item {
    fn key(&self) -> String {
        self.id.to_string()
    }
}

fn item(id: &'static str, value: u32) -> Item {
    Item { id, value }
}

/// Replays canned responses in order; optionally waits for a permit
/// before answering so a test can hold a load in flight.
struct ScriptedSource {
    responses: Mutex<VecDeque<Result<Vec<Item>, FetchError>>>,
    release: Option<Arc<Semaphore>>,
    calls: AtomicUsize,
}

impl ScriptedSource {
    fn new(responses: Vec<Result<Vec<Item>, FetchError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            release: None,
            calls: AtomicUsize::new(0),
        }
    }

    fn gated(responses: Vec<Result<Vec<Item>, FetchError>>, release: Arc<Semaphore>) -> Self {
        Self {
            release: Some(release),
            ..Self::new(responses)
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DataSource<Item> for ScriptedSource {
    async fn fetch_all(&self) -> Result<Vec<Item>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(release) = &self.release {
            release
                .acquire()
                .await
                .map_err(|e| FetchError::Host(e.to_string()))?
                .forget();
        }
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::Host("no scripted response left".into())))
    }
}

struct NeverSource;

#[async_trait]
impl DataSource<Item> for NeverSource {
    async fn fetch_all(&self) -> Result<Vec<Item>, FetchError> {
        std::future::pending().await
    }
}

struct PanickingSource;

#[async_trait]
impl DataSource<Item> for PanickingSource {
    async fn fetch_all(&self) -> Result<Vec<Item>, FetchError> {
        panic!("backend exploded")
    }
}

fn gate_over(source: Arc<ScriptedSource>) -> LoadGate<Item> {
    LoadGate::new("Item", source, Duration::from_secs(5))
}

#[tokio::test]
async fn concurrent_callers_share_one_fetch() {
    let release = Arc::new(Semaphore::new(0));
    let source = Arc::new(ScriptedSource::gated(
        vec![Ok(vec![item("a", 1), item("b", 2)])],
        Arc::clone(&release),
    ));
    let gate = gate_over(Arc::clone(&source));

    let callers: Vec<_> = (0..10).map(|_| gate.ensure_loaded()).collect();
    let releaser = {
        let release = Arc::clone(&release);
        tokio::spawn(async move { release.add_permits(1) })
    };

    let results = join_all(callers).await;
    releaser.await.unwrap();

    assert!(results.iter().all(|r| *r == Ok(true)));
    assert_eq!(gate.fetch_count(), 1);
    assert_eq!(source.calls(), 1);
    assert_eq!(gate.get_all(), vec![item("a", 1), item("b", 2)]);
}

#[tokio::test]
async fn loaded_collection_is_not_fetched_again() {
    let source = Arc::new(ScriptedSource::new(vec![Ok(vec![item("a", 1)])]));
    let gate = gate_over(Arc::clone(&source));

    assert_eq!(gate.ensure_loaded().await, Ok(true));
    assert_eq!(gate.ensure_loaded().await, Ok(true));
    assert_eq!(gate.clone().ensure_loaded().await, Ok(true));

    assert_eq!(source.calls(), 1);
    assert_eq!(gate.phase(), LoadPhase::Loaded);
}

#[tokio::test]
async fn snapshot_keeps_fetch_order_and_last_duplicate_value() {
    let source = Arc::new(ScriptedSource::new(vec![Ok(vec![
        item("b", 1),
        item("a", 2),
        item("b", 3),
    ])]));
    let gate = gate_over(source);

    assert!(gate.get_all().is_empty());
    gate.ensure_loaded().await.unwrap();

    assert_eq!(gate.get_all(), vec![item("b", 3), item("a", 2)]);
    assert_eq!(gate.get_by_key("a"), Some(item("a", 2)));
    assert_eq!(gate.get_by_key("zzz"), None);
    assert_eq!(gate.len(), 2);
}

#[tokio::test]
async fn empty_result_still_counts_as_loaded() {
    let source = Arc::new(ScriptedSource::new(vec![Ok(vec![])]));
    let gate = gate_over(Arc::clone(&source));

    assert_eq!(gate.ensure_loaded().await, Ok(true));
    assert!(gate.is_loaded());
    assert!(gate.is_empty());

    gate.ensure_loaded().await.unwrap();
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn failed_load_is_retried_by_the_next_caller() {
    let source = Arc::new(ScriptedSource::new(vec![
        Err(FetchError::Database("disk I/O error".into())),
        Ok(vec![item("a", 1)]),
    ]));
    let gate = gate_over(Arc::clone(&source));

    let first = gate.ensure_loaded().await;
    assert_eq!(
        first,
        Err(LoadError::Fetch(FetchError::Database("disk I/O error".into())))
    );
    assert_eq!(gate.phase(), LoadPhase::Unloaded);
    assert!(gate.get_all().is_empty());

    assert_eq!(gate.ensure_loaded().await, Ok(true));
    assert_eq!(gate.get_all(), vec![item("a", 1)]);
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn waiters_of_a_failed_load_all_see_the_error() {
    let release = Arc::new(Semaphore::new(0));
    let source = Arc::new(ScriptedSource::gated(
        vec![Err(FetchError::Io("connection reset".into()))],
        Arc::clone(&release),
    ));
    let gate = gate_over(Arc::clone(&source));

    let callers: Vec<_> = (0..3).map(|_| gate.ensure_loaded()).collect();
    tokio::spawn(async move { release.add_permits(1) });

    for result in join_all(callers).await {
        assert!(matches!(result, Err(LoadError::Fetch(FetchError::Io(_)))));
    }
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn collections_load_independently() {
    let bad = Arc::new(ScriptedSource::new(vec![Err(FetchError::Host("rejected".into()))]));
    let good = Arc::new(ScriptedSource::new(vec![Ok(vec![item("x", 9)])]));
    let a = gate_over(bad);
    let b = gate_over(good);

    let (ra, rb) = tokio::join!(a.ensure_loaded(), b.ensure_loaded());

    assert!(ra.is_err());
    assert_eq!(rb, Ok(true));
    assert_eq!(a.phase(), LoadPhase::Unloaded);
    assert_eq!(b.get_all(), vec![item("x", 9)]);
}

#[tokio::test(start_paused = true)]
async fn hung_fetch_times_out_and_resets() {
    let gate = LoadGate::new("Item", Arc::new(NeverSource), Duration::from_secs(5));

    let result = gate.ensure_loaded().await;

    assert_eq!(result, Err(LoadError::TimedOut(Duration::from_secs(5))));
    assert_eq!(gate.phase(), LoadPhase::Unloaded);
    assert!(gate.get_all().is_empty());
}

#[tokio::test(start_paused = true)]
async fn timeout_releases_every_waiter_then_retries() {
    let release = Arc::new(Semaphore::new(0));
    let source = Arc::new(ScriptedSource::gated(
        vec![Ok(vec![item("a", 1), item("b", 2)])],
        Arc::clone(&release),
    ));
    let gate = LoadGate::new("Item", source.clone(), Duration::from_secs(2));

    let callers: Vec<_> = (0..5).map(|_| gate.ensure_loaded()).collect();
    for result in join_all(callers).await {
        assert_eq!(result, Err(LoadError::TimedOut(Duration::from_secs(2))));
    }
    assert_eq!(gate.phase(), LoadPhase::Unloaded);
    assert_eq!(gate.fetch_count(), 1);

    release.add_permits(1);
    assert_eq!(gate.ensure_loaded().await, Ok(true));
    assert_eq!(gate.get_all(), vec![item("a", 1), item("b", 2)]);
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn cancel_releases_every_waiter() {
    let release = Arc::new(Semaphore::new(0));
    let source = Arc::new(ScriptedSource::gated(vec![], release));
    let gate = gate_over(source);

    let mut waiters: Vec<_> = (0..4).map(|_| Box::pin(gate.ensure_loaded())).collect();
    for waiter in &mut waiters {
        assert!(futures::poll!(waiter.as_mut()).is_pending());
    }
    assert_eq!(gate.phase(), LoadPhase::Loading);
    assert_eq!(gate.fetch_count(), 1);

    assert!(gate.cancel());
    for result in join_all(waiters).await {
        assert_eq!(result, Err(LoadError::Cancelled));
    }
    assert_eq!(gate.phase(), LoadPhase::Unloaded);
}

#[tokio::test]
async fn cancel_releases_waiters_and_allows_a_new_load() {
    let release = Arc::new(Semaphore::new(0));
    let source = Arc::new(ScriptedSource::gated(
        vec![Ok(vec![item("a", 1)])],
        Arc::clone(&release),
    ));
    let gate = gate_over(Arc::clone(&source));

    let waiter = {
        let gate = gate.clone();
        tokio::spawn(async move { gate.ensure_loaded().await })
    };
    while gate.phase() != LoadPhase::Loading {
        tokio::task::yield_now().await;
    }

    assert!(gate.cancel());
    assert_eq!(waiter.await.unwrap(), Err(LoadError::Cancelled));
    assert_eq!(gate.phase(), LoadPhase::Unloaded);
    assert!(!gate.cancel());

    release.add_permits(1);
    assert_eq!(gate.ensure_loaded().await, Ok(true));
    assert_eq!(gate.fetch_count(), 2);
    assert_eq!(gate.get_all(), vec![item("a", 1)]);
}

#[tokio::test]
async fn panicking_fetch_is_reported_as_error() {
    let gate = LoadGate::new("Item", Arc::new(PanickingSource), Duration::from_secs(5));

    match gate.ensure_loaded().await {
        Err(LoadError::Fetch(FetchError::Panicked(msg))) => {
            assert!(msg.contains("backend exploded"))
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(gate.phase(), LoadPhase::Unloaded);
}

#[tokio::test]
async fn dropping_a_waiter_does_not_abort_the_load() {
    let release = Arc::new(Semaphore::new(0));
    let source = Arc::new(ScriptedSource::gated(
        vec![Ok(vec![item("a", 1)])],
        Arc::clone(&release),
    ));
    let gate = gate_over(Arc::clone(&source));

    // first poll starts the load, then the future is dropped
    assert!(gate.ensure_loaded().now_or_never().is_none());
    assert_eq!(gate.phase(), LoadPhase::Loading);

    release.add_permits(1);
    assert_eq!(gate.ensure_loaded().await, Ok(true));
    assert_eq!(gate.fetch_count(), 1);
}

#[tokio::test]
async fn loaded_signal_flips_once_records_are_in_place() {
    let source = Arc::new(ScriptedSource::new(vec![Ok(vec![item("a", 1)])]));
    let gate = gate_over(source);
    let mut loaded = gate.subscribe();
    assert!(!*loaded.borrow());

    let observer = {
        let gate = gate.clone();
        tokio::spawn(async move {
            loaded.wait_for(|l| *l).await.unwrap();
            gate.get_all()
        })
    };

    gate.ensure_loaded().await.unwrap();
    assert_eq!(observer.await.unwrap(), vec![item("a", 1)]);
}

#[tokio::test]
async fn resolver_goes_through_the_service() {
    let source = Arc::new(ScriptedSource::new(vec![
        Err(FetchError::Decode("bad row".into())),
        Ok(vec![item("a", 1)]),
    ]));
    let service: EntityService<Item> = EntityService::new("Item", source, Duration::from_secs(5));

    assert!(Resolver::new(&service).resolve().await.is_err());
    assert!(!service.is_loaded());

    assert_eq!(Resolver::new(&service).resolve().await, Ok(true));
    assert_eq!(service.get_by_key("a"), Some(item("a", 1)));
    assert_eq!(service.fetch_count(), 2);
    assert_eq!(service.entity_name(), "Item");
}
