//! Unit tests for rp-geocode.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use rp_core::GeoPoint;

use crate::{Address, GeocodeDispatcher, GeocodeError, GeocodeResult, Geocoder};

// ── Mocks ─────────────────────────────────────────────────────────────────────

/// Answers "Main St" after an optional delay, counting calls.
#[derive(Default)]
struct CountingGeocoder {
    calls: AtomicUsize,
    delay: Option<Duration>,
    fail:  bool,
}

#[async_trait]
impl Geocoder for CountingGeocoder {
    async fn reverse(&self, point: GeoPoint) -> GeocodeResult<Address> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(d) = self.delay {
            tokio::time::sleep(d).await;
        }
        if self.fail {
            return Err(GeocodeError::NotFound(point));
        }
        Ok(Address {
            street_name:       Some("Main St".into()),
            locality:          Some("Mobile".into()),
            formatted_address: "1 Main St, Mobile, AL".into(),
        })
    }
}

/// Yield until every in-flight lookup has been folded into the cache.
async fn settle(d: &mut GeocodeDispatcher) {
    for _ in 0..100 {
        tokio::task::yield_now().await;
        d.poll();
        if d.cache().in_flight() == 0 {
            return;
        }
    }
}

fn p() -> GeoPoint {
    GeoPoint::new(30.69, -88.04)
}

// ── Address ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod address {
    use crate::Address;

    #[test]
    fn label_prefers_street_and_locality() {
        let a = Address {
            street_name:       Some("Dauphin St".into()),
            locality:          Some("Mobile".into()),
            formatted_address: "x".into(),
        };
        assert_eq!(a.label(), "Dauphin St, Mobile");
    }

    #[test]
    fn label_falls_back_to_formatted() {
        let a = Address {
            street_name:       Some("  ".into()),
            locality:          None,
            formatted_address: "Somewhere, AL".into(),
        };
        assert_eq!(a.label(), "Somewhere, AL");

        let b = Address { locality: Some("Daphne".into()), ..a };
        assert_eq!(b.label(), "Daphne");
    }
}

// ── LabelCache ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod cache {
    use crate::{LabelCache, bucket_for};

    #[test]
    fn buckets_group_fifty_samples() {
        assert_eq!(bucket_for(0, 50), 0);
        assert_eq!(bucket_for(49, 50), 0);
        assert_eq!(bucket_for(50, 50), 1);
        assert_eq!(bucket_for(7, 0), 7);
    }

    #[test]
    fn lookup_issued_once_per_bucket() {
        let mut c = LabelCache::new(8);
        let t = c.begin_lookup(3).unwrap();
        assert!(c.begin_lookup(3).is_none(), "in flight");
        assert!(c.complete(t, Some("Main St".into())));
        assert!(c.begin_lookup(3).is_none(), "cached");
        assert_eq!(c.label(3), Some("Main St"));
    }

    #[test]
    fn failure_is_cached_as_no_label() {
        let mut c = LabelCache::new(8);
        let t = c.begin_lookup(1).unwrap();
        c.complete(t, None);
        assert!(c.contains(1));
        assert_eq!(c.label(1), None);
        assert!(c.begin_lookup(1).is_none());
    }

    #[test]
    fn stale_ticket_is_ignored() {
        let mut c = LabelCache::new(8);
        let t = c.begin_lookup(2).unwrap();
        c.invalidate();
        assert!(!c.complete(t, Some("Old Rd".into())));
        assert!(c.is_empty());
        assert_eq!(c.generation(), 1);
        // The bucket can be requested again in the new generation.
        assert!(c.begin_lookup(2).is_some());
    }

    #[test]
    fn capacity_evicts_oldest() {
        let mut c = LabelCache::new(2);
        for b in 0..3 {
            let t = c.begin_lookup(b).unwrap();
            c.complete(t, Some(format!("road {b}")));
        }
        assert_eq!(c.len(), 2);
        assert!(!c.contains(0));
        assert_eq!(c.label(2), Some("road 2"));
    }
}

// ── Dispatcher ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod dispatcher {
    use super::*;

    #[tokio::test]
    async fn resolves_label_after_poll() {
        let geo = Arc::new(CountingGeocoder::default());
        let mut d = GeocodeDispatcher::new(geo.clone(), 50, 16);

        assert!(d.request(10, p()));
        assert_eq!(d.label_for(10), None, "never blocks the caller");
        settle(&mut d).await;

        assert_eq!(d.label_for(10), Some("Main St, Mobile"));
        assert_eq!(d.label_for(49), Some("Main St, Mobile"), "same bucket");
        assert_eq!(d.label_for(50), None);
        assert_eq!(geo.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn same_bucket_never_reissued() {
        let geo = Arc::new(CountingGeocoder::default());
        let mut d = GeocodeDispatcher::new(geo.clone(), 50, 16);

        for idx in 0..50 {
            d.request(idx, p());
        }
        settle(&mut d).await;
        for idx in 0..50 {
            assert!(!d.request(idx, p()));
        }
        assert_eq!(geo.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failure_gives_no_label_and_no_retry() {
        let geo = Arc::new(CountingGeocoder { fail: true, ..Default::default() });
        let mut d = GeocodeDispatcher::new(geo.clone(), 50, 16);

        d.request(0, p());
        settle(&mut d).await;
        assert_eq!(d.label_for(0), None);
        assert!(!d.request(0, p()));
        assert_eq!(geo.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn late_results_after_invalidate_are_dropped() {
        let geo = Arc::new(CountingGeocoder {
            delay: Some(Duration::from_millis(20)),
            ..Default::default()
        });
        let mut d = GeocodeDispatcher::new(geo, 50, 16);

        d.request(0, p());
        d.invalidate();
        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(d.poll(), 0);
        assert_eq!(d.label_for(0), None);
    }

    #[tokio::test]
    async fn closed_dispatcher_refuses_requests() {
        let geo = Arc::new(CountingGeocoder::default());
        let mut d = GeocodeDispatcher::new(geo.clone(), 50, 16);
        d.close();
        assert!(d.is_closed());
        assert!(!d.request(0, p()));
        assert_eq!(geo.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn outside_runtime_records_failure() {
        let geo = Arc::new(CountingGeocoder::default());
        let mut d = GeocodeDispatcher::new(geo, 50, 16);
        assert!(!d.request(0, p()));
        assert!(d.cache().contains(0));
        assert_eq!(d.label_for(0), None);
    }
}
