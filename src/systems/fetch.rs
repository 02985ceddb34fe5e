use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

use rpick_api::{FetchError, JsonTransport};

/// Outcome of a background fetch, tagged with the id it was issued under.
#[derive(Debug)]
pub(crate) struct FetchResult<T> {
    pub id: u64,
    pub outcome: Result<T, FetchError>,
}

/// Runs fetch jobs on short-lived worker threads and funnels their results
/// back to the UI thread.
///
/// The runtime remembers the id of the latest dispatched job. Workers check it
/// once their request returns and drop superseded results instead of sending
/// them, so the receiver mostly sees fresh outcomes. Callers still compare ids
/// on receipt since a result can race a newer dispatch.
pub(crate) struct FetchRuntime<T> {
    tx: Sender<FetchResult<T>>,
    rx: Receiver<FetchResult<T>>,
    latest_id: Arc<AtomicU64>,
    transport: Arc<dyn JsonTransport>,
}

impl<T: Send + 'static> FetchRuntime<T> {
    pub(crate) fn new(transport: Arc<dyn JsonTransport>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            tx,
            rx,
            latest_id: Arc::new(AtomicU64::new(0)),
            transport,
        }
    }

    /// Run `job` in the background under `id`, superseding earlier jobs.
    pub(crate) fn dispatch<F>(&self, id: u64, job: F)
    where
        F: FnOnce(&dyn JsonTransport) -> Result<T, FetchError> + Send + 'static,
    {
        self.latest_id.store(id, AtomicOrdering::Release);

        let tx = self.tx.clone();
        let latest_id = Arc::clone(&self.latest_id);
        let transport = Arc::clone(&self.transport);
        let spawned = thread::Builder::new()
            .name(format!("rpick-fetch-{id}"))
            .spawn(move || {
                let outcome = job(transport.as_ref());
                if should_abort(id, &latest_id) {
                    tracing::trace!(id, "dropping superseded fetch result");
                    return;
                }
                let _ = tx.send(FetchResult { id, outcome });
            });

        if let Err(err) = spawned {
            tracing::error!(id, %err, "failed to spawn fetch worker");
            let _ = self.tx.send(FetchResult {
                id,
                outcome: Err(FetchError::Transport(format!(
                    "failed to spawn fetch worker: {err}"
                ))),
            });
        }
    }

    pub(crate) fn try_recv(&self) -> Result<FetchResult<T>, TryRecvError> {
        self.rx.try_recv()
    }
}

fn should_abort(id: u64, latest_id: &AtomicU64) -> bool {
    latest_id.load(AtomicOrdering::Acquire) != id
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::mpsc::Receiver as StdReceiver;
    use std::time::{Duration, Instant};

    use serde_json::{Value, json};

    use super::*;

    /// Blocks each request until the test releases it.
    struct GatedTransport {
        gates: Mutex<Vec<StdReceiver<()>>>,
    }

    impl JsonTransport for GatedTransport {
        fn get_json(&self, _url: &str, query: &[(String, String)]) -> Result<Value, FetchError> {
            let gate = self.gates.lock().expect("gates").remove(0);
            let _ = gate.recv();
            Ok(json!({ "query": query.len() }))
        }
    }

    fn wait_for<T>(runtime: &FetchRuntime<T>) -> Option<FetchResult<T>>
    where
        T: Send + 'static,
    {
        let deadline = Instant::now() + Duration::from_secs(2);
        while Instant::now() < deadline {
            if let Ok(result) = runtime.try_recv() {
                return Some(result);
            }
            thread::sleep(Duration::from_millis(5));
        }
        None
    }

    #[test]
    fn results_carry_their_dispatch_id() {
        let (release, gate) = mpsc::channel();
        let transport = Arc::new(GatedTransport {
            gates: Mutex::new(vec![gate]),
        });
        let runtime: FetchRuntime<Value> = FetchRuntime::new(transport);
        runtime.dispatch(1, |transport| transport.get_json("/x", &[]));
        release.send(()).expect("release");

        let result = wait_for(&runtime).expect("result");
        assert_eq!(result.id, 1);
        assert!(result.outcome.is_ok());
    }

    #[test]
    fn superseded_results_are_dropped_by_the_worker() {
        let (release_first, first_gate) = mpsc::channel();
        let (release_second, second_gate) = mpsc::channel();
        let transport = Arc::new(GatedTransport {
            gates: Mutex::new(vec![first_gate, second_gate]),
        });
        let runtime: FetchRuntime<Value> = FetchRuntime::new(transport);

        runtime.dispatch(1, |transport| transport.get_json("/x", &[]));
        // Make sure the first worker has taken its gate before the second starts.
        thread::sleep(Duration::from_millis(50));
        runtime.dispatch(2, |transport| transport.get_json("/x", &[]));

        release_second.send(()).expect("release second");
        let fresh = wait_for(&runtime).expect("fresh result");
        assert_eq!(fresh.id, 2);

        release_first.send(()).expect("release first");
        thread::sleep(Duration::from_millis(100));
        assert!(matches!(runtime.try_recv(), Err(TryRecvError::Empty)));
    }
}
