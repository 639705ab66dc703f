//! State observation for presentation layers.

use std::sync::Arc;

use spin::Mutex;

/// Receives the store's state after every completed reduction.
///
/// Implement this trait to re-render a view, push a snapshot to another
/// thread, or record states in tests. Closures taking `&State` implement it
/// automatically.
///
/// # Example
///
/// ```rust
/// use oxide_reduce::Observer;
///
/// struct ConsoleObserver;
///
/// impl Observer<u32> for ConsoleObserver {
///     fn observe(&mut self, count: &u32) {
///         println!("count = {count}");
///     }
/// }
/// ```
pub trait Observer<State> {
    /// Called with the current state once per dispatch cycle.
    fn observe(&mut self, state: &State);
}

impl<State, F> Observer<State> for F
where
    F: FnMut(&State),
{
    fn observe(&mut self, state: &State) {
        (*self)(state)
    }
}

/// Observer keeping the latest state readable from any thread.
///
/// Clones share the same snapshot.
///
/// ```rust
/// use oxide_reduce::{Observer, SharedState};
///
/// let shared = SharedState::new(0u32);
/// let mut observer = shared.clone();
/// observer.observe(&7);
///
/// assert_eq!(shared.snapshot(), 7);
/// assert_eq!(shared.version(), 1);
/// ```
pub struct SharedState<State> {
    latest: Arc<Mutex<(u64, State)>>,
}

impl<State> Clone for SharedState<State> {
    fn clone(&self) -> Self {
        Self {
            latest: self.latest.clone(),
        }
    }
}

impl<State: Clone> SharedState<State> {
    /// Start from `initial`, with no state observed yet.
    pub fn new(initial: State) -> Self {
        Self {
            latest: Arc::new(Mutex::new((0, initial))),
        }
    }

    /// A copy of the latest observed state.
    pub fn snapshot(&self) -> State {
        self.latest.lock().1.clone()
    }

    /// Read the latest observed state without cloning it.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&State) -> R,
    {
        f(&self.latest.lock().1)
    }

    /// How many states have been observed so far.
    pub fn version(&self) -> u64 {
        self.latest.lock().0
    }
}

impl<State: Clone> Observer<State> for SharedState<State> {
    fn observe(&mut self, state: &State) {
        let mut latest = self.latest.lock();
        latest.0 += 1;
        latest.1 = state.clone();
    }
}

#[cfg(any(test, feature = "testing"))]
/// Observer that records every observed state for assertions.
///
/// Only available with the `testing` feature or during tests.
///
/// [`TestStore`](crate::TestStore) installs one automatically; use
/// [`TestStore::observer`](crate::TestStore::observer) to inspect it.
pub struct TestObserver<State> {
    snapshots: Arc<Mutex<Vec<State>>>,
}

#[cfg(any(test, feature = "testing"))]
impl<State> Clone for TestObserver<State> {
    fn clone(&self) -> Self {
        Self {
            snapshots: self.snapshots.clone(),
        }
    }
}

#[cfg(any(test, feature = "testing"))]
impl<State: Clone> Observer<State> for TestObserver<State> {
    fn observe(&mut self, state: &State) {
        self.snapshots.lock().push(state.clone());
    }
}

#[cfg(any(test, feature = "testing"))]
impl<State> Default for TestObserver<State> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(any(test, feature = "testing"))]
impl<State> TestObserver<State> {
    pub fn new() -> Self {
        Self {
            snapshots: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get the number of observed states.
    pub fn count(&self) -> usize {
        self.snapshots.lock().len()
    }

    /// Access the observed states with a closure.
    ///
    /// ```rust
    /// # use oxide_reduce::{Observer, TestObserver};
    /// let observer = TestObserver::<u32>::new();
    /// observer.clone().observe(&3);
    ///
    /// observer.with_snapshots(|snapshots| {
    ///     assert_eq!(snapshots, &vec![3]);
    /// });
    /// ```
    pub fn with_snapshots<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Vec<State>) -> R,
    {
        let snapshots = self.snapshots.lock();
        f(&snapshots)
    }
}
