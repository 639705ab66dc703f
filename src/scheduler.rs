//! Timer sources injected through environments.

use core::time::Duration;

use futures::future::BoxFuture;

/// Source of timers for effects.
///
/// Environments carry a scheduler instead of calling a runtime's timer
/// directly, so tests can substitute a virtual clock.
pub trait Scheduler: Send + Sync {
    /// Complete after `duration` has elapsed on this scheduler's clock.
    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()>;
}

#[cfg(feature = "tokio")]
/// Scheduler backed by the tokio timer.
///
/// Only available with the `tokio` feature. Must be polled inside a tokio
/// runtime with the time driver enabled.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioScheduler;

#[cfg(feature = "tokio")]
impl Scheduler for TokioScheduler {
    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()> {
        Box::pin(tokio::time::sleep(duration))
    }
}

#[cfg(any(test, feature = "testing"))]
pub use self::testing::TestScheduler;

#[cfg(any(test, feature = "testing"))]
mod testing {
    use core::future::Future;
    use core::pin::Pin;
    use core::task::{Context, Poll, Waker};
    use core::time::Duration;
    use std::sync::Arc;

    use futures::future::BoxFuture;
    use spin::Mutex;

    use super::Scheduler;

    #[derive(Default)]
    struct Clock {
        now: Duration,
        next_timer: u64,
        timers: Vec<Timer>,
    }

    struct Timer {
        id: u64,
        deadline: Duration,
        waker: Option<Waker>,
    }

    /// Scheduler driven by a virtual clock.
    ///
    /// Only available with the `testing` feature or during tests.
    ///
    /// Time only moves when [`advance`](Self::advance) is called, which wakes
    /// every timer whose deadline has passed. Pair it with
    /// [`TestStore::run_until_stalled`](crate::TestStore::run_until_stalled)
    /// to process the actions those timers produce.
    ///
    /// ```rust
    /// use core::time::Duration;
    /// use oxide_reduce::{Scheduler, TestScheduler};
    ///
    /// let scheduler = TestScheduler::new();
    /// let _sleep = scheduler.sleep(Duration::from_secs(3));
    /// assert_eq!(scheduler.pending_timers(), 1);
    ///
    /// scheduler.advance(Duration::from_secs(3));
    /// assert_eq!(scheduler.pending_timers(), 0);
    /// ```
    #[derive(Clone, Default)]
    pub struct TestScheduler {
        clock: Arc<Mutex<Clock>>,
    }

    impl TestScheduler {
        pub fn new() -> Self {
            Self::default()
        }

        /// Virtual time elapsed since creation.
        pub fn now(&self) -> Duration {
            self.clock.lock().now
        }

        /// Number of timers that are still waiting for their deadline.
        pub fn pending_timers(&self) -> usize {
            self.clock.lock().timers.len()
        }

        /// Move the clock forward and wake every timer that is now due.
        pub fn advance(&self, duration: Duration) {
            let due: Vec<Waker> = {
                let mut clock = self.clock.lock();
                clock.now += duration;
                let now = clock.now;
                let mut due = Vec::new();
                clock.timers.retain_mut(|timer| {
                    if timer.deadline > now {
                        return true;
                    }
                    due.extend(timer.waker.take());
                    false
                });
                due
            };

            for waker in due {
                waker.wake();
            }
        }
    }

    impl Scheduler for TestScheduler {
        fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()> {
            let mut clock = self.clock.lock();
            let id = clock.next_timer;
            clock.next_timer += 1;
            let deadline = clock.now + duration;
            if deadline > clock.now {
                clock.timers.push(Timer {
                    id,
                    deadline,
                    waker: None,
                });
            }

            Box::pin(TestSleep {
                clock: self.clock.clone(),
                id,
                deadline,
            })
        }
    }

    struct TestSleep {
        clock: Arc<Mutex<Clock>>,
        id: u64,
        deadline: Duration,
    }

    impl Future for TestSleep {
        type Output = ();

        fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
            let mut clock = self.clock.lock();
            if clock.now >= self.deadline {
                return Poll::Ready(());
            }

            if let Some(timer) = clock.timers.iter_mut().find(|timer| timer.id == self.id) {
                timer.waker = Some(cx.waker().clone());
            }
            Poll::Pending
        }
    }

    impl Drop for TestSleep {
        fn drop(&mut self) {
            self.clock.lock().timers.retain(|timer| timer.id != self.id);
        }
    }
}
