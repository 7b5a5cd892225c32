//! Trailing-edge debounce over a host [`TimerQueue`].
//!
//! # Invariants
//!
//! 1. At most one call is pending per [`Debounced`] (clones share it).
//! 2. Every [`Debounced::call`] cancels the pending call, if any, and
//!    schedules a new one `wait` later.
//! 3. The wrapped function runs only with the arguments of the last call of
//!    a burst, once `wait` has passed with no further calls.
//! 4. Dropping every handle does not cancel a call that is already
//!    scheduled; it still fires.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, trace, warn};
use web_time::Duration;

use crate::config::DEFAULT_DEBOUNCE_WAIT_MS;
use crate::host::TimerQueue;

struct DebounceInner<Q: TimerQueue, A> {
    queue: Q,
    func: Box<dyn Fn(A)>,
    wait: Duration,
    pending: Cell<Option<Q::Handle>>,
    /// Bumped per call so a stale timer cannot clear a newer pending slot.
    generation: Cell<u64>,
}

/// A function wrapped so that bursts of calls collapse into one trailing call.
///
/// Arguments travel as a single value; use a tuple for several.
pub struct Debounced<Q: TimerQueue, A> {
    inner: Rc<DebounceInner<Q, A>>,
}

impl<Q: TimerQueue, A> Clone for Debounced<Q, A> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<Q: TimerQueue, A> fmt::Debug for Debounced<Q, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debounced")
            .field("wait", &self.inner.wait)
            .field("pending", &self.inner.pending.get())
            .finish()
    }
}

/// Wrap `func` so it runs once, `wait` after the last of a burst of calls.
pub fn debounce<Q, A, F>(queue: Q, func: F, wait: Duration) -> Debounced<Q, A>
where
    Q: TimerQueue + 'static,
    A: 'static,
    F: Fn(A) + 'static,
{
    Debounced {
        inner: Rc::new(DebounceInner {
            queue,
            func: Box::new(func),
            wait,
            pending: Cell::new(None),
            generation: Cell::new(0),
        }),
    }
}

/// [`debounce`] with the default 300 ms window.
pub fn debounce_default<Q, A, F>(queue: Q, func: F) -> Debounced<Q, A>
where
    Q: TimerQueue + 'static,
    A: 'static,
    F: Fn(A) + 'static,
{
    debounce(queue, func, Duration::from_millis(DEFAULT_DEBOUNCE_WAIT_MS))
}

impl<Q, A> Debounced<Q, A>
where
    Q: TimerQueue + 'static,
    A: 'static,
{
    /// Supersede any pending call with one carrying `args`.
    pub fn call(&self, args: A) {
        let inner = &self.inner;
        if let Some(handle) = inner.pending.take() {
            trace!(?handle, "debounce: superseding pending call");
            inner.queue.cancel(handle);
        }
        let generation = inner.generation.get().wrapping_add(1);
        inner.generation.set(generation);

        let owner = Rc::clone(inner);
        let fire = Box::new(move || {
            if owner.generation.get() == generation {
                owner.pending.set(None);
            }
            trace!(generation, "debounce: firing");
            (owner.func)(args);
        });

        match inner.queue.schedule(inner.wait, fire) {
            Ok(handle) => {
                debug!(wait_ms = inner.wait.as_millis() as u64, "debounce: scheduled");
                inner.pending.set(Some(handle));
            }
            Err(err) => warn!(%err, "debounce: could not schedule call"),
        }
    }

    /// Whether a trailing call is waiting to fire.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.inner.pending.get().is_some()
    }

    #[must_use]
    pub fn wait(&self) -> Duration {
        self.inner.wait
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lab::LabHost;
    use std::cell::RefCell;

    fn recorder() -> (Rc<RefCell<Vec<u32>>>, impl Fn(u32) + 'static) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        (calls, move |v| sink.borrow_mut().push(v))
    }

    #[test]
    fn burst_collapses_to_last_call() {
        let host = LabHost::new();
        let (calls, f) = recorder();
        let debounced = debounce(host.clone(), f, Duration::from_millis(100));

        for i in 1..=5 {
            debounced.call(i);
            if i < 5 {
                host.advance(Duration::from_millis(50));
            }
        }
        host.advance(Duration::from_millis(99));
        assert!(calls.borrow().is_empty());
        assert!(debounced.is_pending());

        host.advance(Duration::from_millis(1));
        assert_eq!(*calls.borrow(), vec![5]);
        assert!(!debounced.is_pending());
    }

    #[test]
    fn separated_calls_each_fire() {
        let host = LabHost::new();
        let (calls, f) = recorder();
        let debounced = debounce(host.clone(), f, Duration::from_millis(10));

        debounced.call(1);
        host.advance(Duration::from_millis(10));
        debounced.call(2);
        host.advance(Duration::from_millis(10));
        assert_eq!(*calls.borrow(), vec![1, 2]);
    }

    #[test]
    fn default_wait_is_300ms() {
        let host = LabHost::new();
        let (calls, f) = recorder();
        let debounced = debounce_default(host.clone(), f);
        assert_eq!(debounced.wait(), Duration::from_millis(300));

        debounced.call(7);
        host.advance(Duration::from_millis(299));
        assert!(calls.borrow().is_empty());
        host.advance(Duration::from_millis(1));
        assert_eq!(*calls.borrow(), vec![7]);
    }

    #[test]
    fn clones_share_the_pending_slot() {
        let host = LabHost::new();
        let (calls, f) = recorder();
        let a = debounce(host.clone(), f, Duration::from_millis(20));
        let b = a.clone();

        a.call(1);
        host.advance(Duration::from_millis(10));
        b.call(2);
        host.advance(Duration::from_millis(20));
        assert_eq!(*calls.borrow(), vec![2]);
        assert_eq!(host.pending_timers(), 0);
    }

    #[test]
    fn instances_do_not_interfere() {
        let host = LabHost::new();
        let (calls, f) = recorder();
        let (other_calls, g) = recorder();
        let a = debounce(host.clone(), f, Duration::from_millis(20));
        let b = debounce(host.clone(), g, Duration::from_millis(20));

        a.call(1);
        b.call(2);
        host.advance(Duration::from_millis(20));
        assert_eq!(*calls.borrow(), vec![1]);
        assert_eq!(*other_calls.borrow(), vec![2]);
    }

    #[test]
    fn dropped_handle_still_fires_scheduled_call() {
        let host = LabHost::new();
        let (calls, f) = recorder();
        {
            let debounced = debounce(host.clone(), f, Duration::from_millis(5));
            debounced.call(9);
        }
        host.advance(Duration::from_millis(5));
        assert_eq!(*calls.borrow(), vec![9]);
    }

    #[test]
    fn tuple_arguments_pass_through() {
        let host = LabHost::new();
        let seen = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&seen);
        let debounced = debounce(
            host.clone(),
            move |(query, page): (String, u32)| *sink.borrow_mut() = Some((query, page)),
            Duration::from_millis(1),
        );
        debounced.call(("qu".to_owned(), 1));
        debounced.call(("quiz".to_owned(), 2));
        host.advance(Duration::from_millis(1));
        assert_eq!(*seen.borrow(), Some(("quiz".to_owned(), 2)));
    }
}
