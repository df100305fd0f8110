// ── Request dispatcher ──
//
// Routes request actions to handlers under their registered policy and
// publishes result actions on an explicit channel. Serve-every kinds get a
// task per request; latest-only kinds keep a single slot whose previous
// occupant is aborted when a newer request arrives.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{Mutex, mpsc};
use tokio::task::{JoinHandle, JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use roomsense_api::SensorClient;

use crate::action::{DispatchPolicy, Request, Update};
use crate::config::ServiceConfig;
use crate::error::CoreError;
use crate::handler;

/// Entry point for consumers: feed it requests, read updates off the
/// channel given at construction.
///
/// Cheaply cloneable via `Arc<DispatcherInner>`.
#[derive(Clone)]
pub struct Dispatcher {
    inner: Arc<DispatcherInner>,
}

struct DispatcherInner {
    client: SensorClient,
    update_tx: mpsc::UnboundedSender<Update>,
    cancel: CancellationToken,
    /// Serve-every runs still in flight.
    runs: Mutex<JoinSet<()>>,
    /// The one latest-only run allowed at a time.
    latest: Mutex<Option<JoinHandle<()>>>,
    /// Bumped per latest-only request; a run only publishes if it still
    /// holds the current generation.
    latest_generation: Arc<AtomicU64>,
}

impl Dispatcher {
    /// Build a dispatcher and its HTTP client from configuration.
    pub fn new(
        config: &ServiceConfig,
        update_tx: mpsc::UnboundedSender<Update>,
    ) -> Result<Self, CoreError> {
        Ok(Self::with_client(config.build_client()?, update_tx))
    }

    /// Build a dispatcher around an existing client.
    pub fn with_client(client: SensorClient, update_tx: mpsc::UnboundedSender<Update>) -> Self {
        Self {
            inner: Arc::new(DispatcherInner {
                client,
                update_tx,
                cancel: CancellationToken::new(),
                runs: Mutex::new(JoinSet::new()),
                latest: Mutex::new(None),
                latest_generation: Arc::new(AtomicU64::new(0)),
            }),
        }
    }

    /// Start serving one request under its policy. Returns once the run is
    /// spawned, not when it completes.
    pub async fn dispatch(&self, request: Request) {
        if self.inner.cancel.is_cancelled() {
            debug!(action = request.action_type(), "dispatcher shut down, ignoring request");
            return;
        }

        debug!(action = request.action_type(), "request received");

        match request.policy() {
            DispatchPolicy::ServeEvery => self.serve_every(request).await,
            DispatchPolicy::LatestOnly => self.serve_latest(request).await,
        }
    }

    async fn serve_every(&self, request: Request) {
        let client = self.inner.client.clone();
        let tx = self.inner.update_tx.clone();

        let mut runs = self.inner.runs.lock().await;
        // Reap finished runs so the set doesn't grow with history.
        while runs.try_join_next().is_some() {}
        runs.spawn(async move {
            if let Some(update) = handler::handle(&client, &request).await {
                publish(&tx, update);
            }
        });
    }

    async fn serve_latest(&self, request: Request) {
        let client = self.inner.client.clone();
        let tx = self.inner.update_tx.clone();
        let generation_ref = Arc::clone(&self.inner.latest_generation);

        let mut slot = self.inner.latest.lock().await;
        let generation = generation_ref.fetch_add(1, Ordering::SeqCst) + 1;

        if let Some(previous) = slot.take() {
            if !previous.is_finished() {
                debug!(
                    action = request.action_type(),
                    "superseding in-flight request"
                );
            }
            previous.abort();
        }

        *slot = Some(tokio::spawn(async move {
            let Some(update) = handler::handle(&client, &request).await else {
                return;
            };
            // A newer request arrived while this one was finishing.
            if generation_ref.load(Ordering::SeqCst) != generation {
                debug!(action = update.action_type(), "dropping superseded result");
                return;
            }
            publish(&tx, update);
        }));
    }

    /// Dispatch requests from `requests` until it closes or
    /// [`shutdown`](Self::shutdown) is called.
    pub async fn run(&self, mut requests: mpsc::UnboundedReceiver<Request>) {
        let cancel = self.inner.cancel.clone();
        info!("dispatcher started");

        loop {
            tokio::select! {
                biased;
                () = cancel.cancelled() => break,
                request = requests.recv() => {
                    let Some(request) = request else { break };
                    self.dispatch(request).await;
                }
            }
        }

        debug!("dispatcher loop finished");
    }

    /// Wait for every run spawned so far to finish (or be aborted).
    pub async fn drain(&self) {
        let mut runs = std::mem::take(&mut *self.inner.runs.lock().await);
        while runs.join_next().await.is_some() {}

        let latest = self.inner.latest.lock().await.take();
        if let Some(handle) = latest {
            // An aborted run reports a cancellation error; either way it's done.
            let _ = handle.await;
        }
    }

    /// Stop accepting requests and abort everything in flight.
    pub async fn shutdown(&self) {
        self.inner.cancel.cancel();
        self.inner.runs.lock().await.abort_all();
        if let Some(handle) = self.inner.latest.lock().await.take() {
            handle.abort();
        }
        info!("dispatcher shut down");
    }
}

fn publish(tx: &mpsc::UnboundedSender<Update>, update: Update) {
    let action = update.action_type();
    if tx.send(update).is_err() {
        debug!(action, "update receiver dropped, discarding result");
    } else {
        debug!(action, "dispatched result");
    }
}
