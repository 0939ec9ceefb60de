// Debounce gate: delays an effect until a quiet period has passed since the
// most recent trigger.
//
// Each gate owns at most one pending effect. Scheduling while another effect
// is pending cancels it and restarts the quiet period, so a burst of triggers
// collapses into a single run of the last effect scheduled (trailing edge,
// last write wins).
//
// Gates are plain values owned by whoever coordinates them. Two gates never
// share a timer, so independent sessions (and tests) can't interfere.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

/// Counters describing what a gate has done so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GateStats {
    /// Effects handed to `schedule`.
    pub scheduled: u64,
    /// Pending effects cancelled because a newer one arrived.
    pub replaced: u64,
    /// Effects that survived their quiet period and ran.
    pub fired: u64,
}

/// A single-slot trailing-edge debouncer backed by a tokio task.
///
/// Must be used from inside a tokio runtime; `schedule` spawns the timer task.
pub struct DebounceGate {
    name: &'static str,
    delay: Duration,
    inner: Arc<Mutex<GateInner>>,
}

#[derive(Default)]
struct GateInner {
    /// Bumped on every schedule; a woken timer only runs if it still matches.
    generation: u64,
    pending: Option<JoinHandle<()>>,
    stats: GateStats,
}

impl DebounceGate {
    /// Create a gate that waits `delay` of quiet before firing.
    pub fn new(name: &'static str, delay: Duration) -> Self {
        Self {
            name,
            delay,
            inner: Arc::new(Mutex::new(GateInner::default())),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `effect` to run once the quiet period elapses.
    ///
    /// Any effect still waiting on this gate is cancelled and never runs.
    /// Cancellation and replacement happen under one lock, so there is never
    /// a moment with two live timers. An effect that has already started
    /// running is not interrupted.
    pub fn schedule<F>(&self, effect: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut inner = lock(&self.inner);

        if let Some(previous) = inner.pending.take() {
            previous.abort();
            inner.stats.replaced += 1;
            debug!(gate = self.name, "Debounce window reset");
        }

        inner.generation += 1;
        inner.stats.scheduled += 1;

        let generation = inner.generation;
        let shared = Arc::clone(&self.inner);
        let delay = self.delay;
        let name = self.name;

        inner.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            {
                let mut inner = lock(&shared);
                if inner.generation != generation {
                    // Superseded between waking and taking the lock
                    return;
                }
                inner.pending = None;
                inner.stats.fired += 1;
            }

            debug!(gate = name, "Debounce window elapsed, firing");
            effect.await;
        }));
    }

    /// True while an effect is waiting out its quiet period.
    pub fn is_pending(&self) -> bool {
        lock(&self.inner).pending.is_some()
    }

    pub fn stats(&self) -> GateStats {
        lock(&self.inner).stats
    }
}

impl Drop for DebounceGate {
    fn drop(&mut self) {
        if let Some(pending) = lock(&self.inner).pending.take() {
            pending.abort();
        }
    }
}

/// The gate state stays consistent even if an effect panicked, so a
/// poisoned lock is still safe to use.
fn lock(inner: &Mutex<GateInner>) -> MutexGuard<'_, GateInner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    // All tests run on a paused clock: sleeps advance virtual time instantly,
    // so the 500ms windows below cost nothing in wall time.

    #[tokio::test(start_paused = true)]
    async fn test_single_schedule_fires_after_delay() {
        let gate = DebounceGate::new("test", Duration::from_millis(500));
        let count = Arc::new(AtomicU32::new(0));

        let c = Arc::clone(&count);
        gate.schedule(async move {
            c.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(499)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert!(gate.is_pending());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(!gate.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_runs_only_last_effect() {
        let gate = DebounceGate::new("test", Duration::from_millis(500));
        let seen = Arc::new(Mutex::new(Vec::new()));

        for i in 0..5 {
            let s = Arc::clone(&seen);
            gate.schedule(async move {
                s.lock().unwrap().push(i);
            });
            tokio::time::sleep(Duration::from_millis(100)).await;
        }

        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(*seen.lock().unwrap(), vec![4]);

        let stats = gate.stats();
        assert_eq!(stats.scheduled, 5);
        assert_eq!(stats.replaced, 4);
        assert_eq!(stats.fired, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_activity_resets_the_window() {
        let gate = DebounceGate::new("test", Duration::from_millis(500));
        let count = Arc::new(AtomicU32::new(0));

        let c = Arc::clone(&count);
        gate.schedule(async move {
            c.fetch_add(1, Ordering::SeqCst);
        });
        tokio::time::sleep(Duration::from_millis(400)).await;

        let c = Arc::clone(&count);
        gate.schedule(async move {
            c.fetch_add(10, Ordering::SeqCst);
        });

        // 600ms after the first schedule, but only 200ms after the second
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(301)).await;
        assert_eq!(count.load(Ordering::SeqCst), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn test_separated_events_each_fire() {
        let gate = DebounceGate::new("test", Duration::from_millis(100));
        let count = Arc::new(AtomicU32::new(0));

        for _ in 0..3 {
            let c = Arc::clone(&count);
            gate.schedule(async move {
                c.fetch_add(1, Ordering::SeqCst);
            });
            tokio::time::sleep(Duration::from_millis(150)).await;
        }

        assert_eq!(count.load(Ordering::SeqCst), 3);
        assert_eq!(gate.stats().replaced, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_independent_gates_do_not_interfere() {
        let a = DebounceGate::new("a", Duration::from_millis(100));
        let b = DebounceGate::new("b", Duration::from_millis(100));
        let count = Arc::new(AtomicU32::new(0));

        for gate in [&a, &b] {
            let c = Arc::clone(&count);
            gate.schedule(async move {
                c.fetch_add(1, Ordering::SeqCst);
            });
        }

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending_effect() {
        let count = Arc::new(AtomicU32::new(0));
        {
            let gate = DebounceGate::new("test", Duration::from_millis(100));
            let c = Arc::clone(&count);
            gate.schedule(async move {
                c.fetch_add(1, Ordering::SeqCst);
            });
        }

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }
}
