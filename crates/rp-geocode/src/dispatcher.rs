//! Spawns geocode lookups on the tokio runtime and folds results back in.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tracing::{debug, warn};

use rp_core::GeoPoint;

use crate::{Geocoder, LabelCache, LookupTicket, bucket_for};

struct Completion {
    ticket: LookupTicket,
    label:  Option<String>,
}

/// Fire-at-most-once geocoding per path bucket.
///
/// ```text
/// tick ──request(idx)──► cache.begin_lookup ──► tokio::spawn(reverse)
///   │                                                │
///   └──poll()◄──────────── mpsc ◄────────────────────┘
/// ```
///
/// [`request`](Self::request) never waits.  [`poll`](Self::poll) drains
/// finished lookups into the cache without blocking and is meant to run
/// once per frame.  Requests made outside a tokio runtime are recorded as
/// failed lookups.
pub struct GeocodeDispatcher {
    geocoder:    Arc<dyn Geocoder>,
    cache:       LabelCache,
    bucket_size: usize,
    tx:          mpsc::UnboundedSender<Completion>,
    rx:          mpsc::UnboundedReceiver<Completion>,
    tasks:       Vec<AbortHandle>,
    closed:      bool,
}

impl GeocodeDispatcher {
    pub fn new(geocoder: Arc<dyn Geocoder>, bucket_size: usize, capacity: usize) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            geocoder,
            cache: LabelCache::new(capacity),
            bucket_size: bucket_size.max(1),
            tx,
            rx,
            tasks: Vec::new(),
            closed: false,
        }
    }

    pub fn bucket_size(&self) -> usize {
        self.bucket_size
    }

    pub fn cache(&self) -> &LabelCache {
        &self.cache
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Cached label for the bucket containing `path_index`.
    pub fn label_for(&self, path_index: usize) -> Option<&str> {
        self.cache.label(bucket_for(path_index, self.bucket_size))
    }

    /// Start a lookup for the bucket containing `path_index`, unless one is
    /// cached or in flight.  Returns `true` if a lookup was started.
    pub fn request(&mut self, path_index: usize, point: GeoPoint) -> bool {
        if self.closed {
            return false;
        }
        let bucket = bucket_for(path_index, self.bucket_size);
        let Some(ticket) = self.cache.begin_lookup(bucket) else {
            return false;
        };

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!(bucket, "no async runtime; geocode lookup skipped");
            self.cache.complete(ticket, None);
            return false;
        };

        debug!(bucket, %point, "dispatching geocode lookup");
        let geocoder = Arc::clone(&self.geocoder);
        let tx = self.tx.clone();
        let handle = runtime.spawn(async move {
            let label = match geocoder.reverse(point).await {
                Ok(address) => Some(address.label()),
                Err(e) => {
                    warn!(bucket = ticket.bucket, error = %e, "geocode lookup failed");
                    None
                }
            };
            // The receiver is gone once the dispatcher is dropped.
            let _ = tx.send(Completion { ticket, label });
        });
        self.tasks.push(handle.abort_handle());
        true
    }

    /// Fold finished lookups into the cache.  Returns how many were applied;
    /// results from before the last invalidation are discarded.
    pub fn poll(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(done) = self.rx.try_recv() {
            if self.cache.complete(done.ticket, done.label) {
                applied += 1;
            } else {
                debug!(bucket = done.ticket.bucket, "dropping stale geocode result");
            }
        }
        self.tasks.retain(|t| !t.is_finished());
        applied
    }

    /// Abandon in-flight lookups and clear the cache.  Called when the
    /// route changes.
    pub fn invalidate(&mut self) {
        self.abort_all();
        self.cache.invalidate();
        while self.rx.try_recv().is_ok() {}
    }

    /// Invalidate and refuse further requests.
    pub fn close(&mut self) {
        self.invalidate();
        self.closed = true;
    }

    fn abort_all(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

impl Drop for GeocodeDispatcher {
    fn drop(&mut self) {
        self.abort_all();
    }
}

impl std::fmt::Debug for GeocodeDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeocodeDispatcher")
            .field("bucket_size", &self.bucket_size)
            .field("cache", &self.cache)
            .field("in_flight_tasks", &self.tasks.len())
            .field("closed", &self.closed)
            .finish()
    }
}
