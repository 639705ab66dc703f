//! The store runtime that owns state and drives the dispatch loop.

use std::sync::Arc;

use flume::Receiver;
use futures::channel::oneshot;
use futures::future::{self, BoxFuture, Either, FutureExt, Shared};
use futures::StreamExt;
use spin::Mutex;

use crate::cancellation::Cancellations;
use crate::effect::{Effect, Never};
use crate::emitter::Emitter;
use crate::observer::Observer;
use crate::reducer::Reducer;

/// A spawner trait for executing futures on an async runtime.
///
/// This abstraction allows you to use whatever concurrency model you want
/// (tokio, async-std, embassy, etc.).
///
/// Function pointers and closures automatically implement this trait via the
/// blanket implementation.
pub trait Spawner {
    /// Spawn a future on the async runtime.
    fn spawn(&self, future: BoxFuture<'static, ()>);
}

/// Implement Spawner for any callable type that matches the signature.
///
/// This includes function pointers, closures, and function items.
impl<F> Spawner for F
where
    F: Fn(BoxFuture<'static, ()>),
{
    fn spawn(&self, future: BoxFuture<'static, ()>) {
        self(future)
    }
}

/// Ends a store's lifetime from anywhere.
///
/// Tearing down stops [`Store::run`] and every effect the store spawned;
/// cancelled effects emit nothing afterwards. Dropping the store has the
/// same effect.
#[derive(Clone)]
pub struct TeardownHandle {
    sender: Arc<Mutex<Option<oneshot::Sender<()>>>>,
}

impl TeardownHandle {
    /// Tear the store down. Later calls do nothing.
    pub fn teardown(&self) {
        if let Some(sender) = self.sender.lock().take() {
            log::debug!("tearing down store");
            sender.send(()).ok();
        }
    }

    /// Whether the store has been torn down, explicitly or by being dropped.
    pub fn is_torn_down(&self) -> bool {
        self.sender.lock().is_none()
    }
}

/// The store that owns a feature's state and runs its reducer.
///
/// This is the core of the runtime. It:
/// 1. Receives actions from [`Emitter`]s on a channel
/// 2. Reduces each action, one at a time, through the composed [`Reducer`]
/// 3. Notifies the [`Observer`] with the resulting state
/// 4. Executes the returned [`Effect`] on the [`Spawner`], feeding every
///    action it yields back into the channel
///
/// Only reducers whose effects cannot fail are accepted; wrap failing
/// reducers with [`Reducer::error_handling`] first.
///
/// For testing with manual control, use [`TestStore`].
///
/// # Type Parameters
///
/// * `R` - The composed reducer
/// * `O` - The state observer (implements [`Observer`])
/// * `S` - The spawner implementation type (implements [`Spawner`])
pub struct Store<R, O, S>
where
    R: Reducer,
{
    reducer: R,
    environment: R::Environment,
    state: R::State,
    observer: O,
    spawner: S,
    receiver: Receiver<R::Action>,
    emitter: Emitter<R::Action>,
    cancellations: Cancellations,
    teardown: TeardownHandle,
    torn_down: Shared<oneshot::Receiver<()>>,
    cycles: u64,
}

impl<R, O, S> Store<R, O, S>
where
    R: Reducer<Failure = Never>,
    R::Action: Send + 'static,
    O: Observer<R::State>,
    S: Spawner,
{
    /// Create a new store.
    ///
    /// The store does not process emitted actions until [`Store::run`] is
    /// awaited; [`Store::send`] reduces immediately.
    ///
    /// # Arguments
    ///
    /// * `initial_state` - The initial state
    /// * `reducer` - The composed reducer
    /// * `environment` - Dependencies handed to every reduction
    /// * `observer` - Notified with the state after every reduction
    /// * `spawner` - Spawner to execute effects on your chosen runtime
    pub fn new(
        initial_state: R::State,
        reducer: R,
        environment: R::Environment,
        observer: O,
        spawner: S,
    ) -> Self {
        let (sender, receiver) = flume::unbounded();
        let (teardown_sender, torn_down) = oneshot::channel();

        Store {
            reducer,
            environment,
            state: initial_state,
            observer,
            spawner,
            receiver,
            emitter: Emitter::new(sender),
            cancellations: Cancellations::default(),
            teardown: TeardownHandle {
                sender: Arc::new(Mutex::new(Some(teardown_sender))),
            },
            torn_down: torn_down.shared(),
            cycles: 0,
        }
    }

    /// A handle for dispatching actions into this store.
    pub fn emitter(&self) -> Emitter<R::Action> {
        self.emitter.clone()
    }

    /// The current state.
    pub fn state(&self) -> &R::State {
        &self.state
    }

    /// The cancellation registry of this store's effects.
    pub fn cancellations(&self) -> &Cancellations {
        &self.cancellations
    }

    /// A handle that ends this store's lifetime, usable from any thread.
    pub fn teardown_handle(&self) -> TeardownHandle {
        self.teardown.clone()
    }

    /// Reduce `action` immediately and schedule its effect.
    ///
    /// Ignored once the store has been torn down.
    pub fn send(&mut self, action: R::Action) {
        if self.teardown.is_torn_down() {
            log::debug!("store is torn down; ignoring action");
            return;
        }
        self.step(action);
    }

    /// Run the dispatch loop.
    ///
    /// - Notifies the observer with the initial state.
    /// - Reduces emitted actions in arrival order until the store is torn
    ///   down through a [`TeardownHandle`].
    ///
    /// Actions can be emitted from any thread via the [`Emitter`], but are
    /// always reduced sequentially wherever this future is polled.
    pub async fn run(&mut self) {
        self.observer.observe(&self.state);

        loop {
            let next = {
                let received = self.receiver.recv_async();
                futures::pin_mut!(received);
                match future::select(self.torn_down.clone(), received).await {
                    Either::Left(_) => None,
                    Either::Right((action, _)) => action.ok(),
                }
            };

            match next {
                Some(action) => self.step(action),
                None => break,
            }
        }

        log::debug!("dispatch loop finished after {} cycle(s)", self.cycles);
    }

    fn step(&mut self, action: R::Action) {
        self.cycles += 1;
        log::trace!("dispatch cycle {}", self.cycles);

        let effect = self.reducer.reduce(&mut self.state, action, &self.environment);
        self.observer.observe(&self.state);
        self.schedule(effect);
    }

    fn schedule(&self, effect: Effect<R::Action>) {
        if effect.is_none() {
            return;
        }

        let mut actions = effect
            .into_stream(&self.cancellations)
            .take_until(self.torn_down.clone());
        let emitter = self.emitter.clone();

        self.spawner.spawn(Box::pin(async move {
            while let Some(result) = actions.next().await {
                match result {
                    Ok(action) => emitter.emit(action),
                    Err(never) => match never {},
                }
            }
        }));
    }
}

impl<R, O, S> Drop for Store<R, O, S>
where
    R: Reducer,
{
    fn drop(&mut self) {
        self.teardown.teardown();
    }
}

#[cfg(any(test, feature = "testing"))]
pub use self::testing::TestStore;

#[cfg(any(test, feature = "testing"))]
mod testing {
    use core::time::Duration;

    use futures::executor::{LocalPool, LocalSpawner};
    use futures::future::BoxFuture;
    use futures::task::LocalSpawnExt;

    use super::{Spawner, Store};
    use crate::cancellation::Cancellations;
    use crate::effect::Never;
    use crate::emitter::Emitter;
    use crate::observer::{Observer, TestObserver};
    use crate::reducer::Reducer;
    use crate::scheduler::TestScheduler;

    pub struct PoolSpawner(LocalSpawner);

    impl Spawner for PoolSpawner {
        fn spawn(&self, future: BoxFuture<'static, ()>) {
            if let Err(error) = self.0.spawn_local(future) {
                log::error!("failed to spawn effect: {error}");
            }
        }
    }

    /// Test store for deterministic, manually driven dispatch.
    ///
    /// Only available with the `testing` feature or during tests.
    ///
    /// Effects run on a single-threaded executor owned by the test store.
    /// [`send`](Self::send) reduces an action and then runs effects until
    /// nothing can make progress, recording every action that effects feed
    /// back so tests can assert the exact sequence.
    ///
    /// ```rust
    /// use oxide_reduce::{from_fn, Effect, Never, TestStore};
    ///
    /// #[derive(Clone, Debug, PartialEq)]
    /// enum Action { Start, Finished }
    ///
    /// let reducer = from_fn(|done: &mut bool, action: Action, _: &()| -> Effect<Action, Never> {
    ///     match action {
    ///         Action::Start => Effect::single(async { Ok(Action::Finished) }),
    ///         Action::Finished => {
    ///             *done = true;
    ///             Effect::none()
    ///         }
    ///     }
    /// });
    ///
    /// let mut store = TestStore::new(false, reducer, ());
    /// store.send(Action::Start);
    ///
    /// assert_eq!(store.received(), &[Action::Finished]);
    /// assert!(*store.state());
    /// ```
    pub struct TestStore<R>
    where
        R: Reducer,
    {
        store: Store<R, TestObserver<R::State>, PoolSpawner>,
        observer: TestObserver<R::State>,
        pool: LocalPool,
        received: Vec<R::Action>,
    }

    impl<R> TestStore<R>
    where
        R: Reducer<Failure = Never>,
        R::Action: Clone + Send + 'static,
        R::State: Clone,
    {
        /// Create a test store and record the initial state.
        pub fn new(initial_state: R::State, reducer: R, environment: R::Environment) -> Self {
            let pool = LocalPool::new();
            let observer = TestObserver::new();
            let mut store = Store::new(
                initial_state,
                reducer,
                environment,
                observer.clone(),
                PoolSpawner(pool.spawner()),
            );
            store.observer.observe(&store.state);

            TestStore {
                store,
                observer,
                pool,
                received: Vec::new(),
            }
        }

        /// Reduce `action`, then run effects until the store is idle.
        pub fn send(&mut self, action: R::Action) {
            self.store.send(action);
            self.run_until_stalled();
        }

        /// Run pending effects and reduce every action they emit, until no
        /// effect can make progress without outside input (such as time).
        pub fn run_until_stalled(&mut self) {
            loop {
                self.pool.run_until_stalled();

                let mut progressed = false;
                while let Ok(action) = self.store.receiver.try_recv() {
                    if self.store.teardown.is_torn_down() {
                        continue;
                    }
                    progressed = true;
                    self.received.push(action.clone());
                    self.store.step(action);
                }

                if !progressed {
                    break;
                }
            }
        }

        /// Advance `scheduler` and process whatever becomes due.
        pub fn advance(&mut self, scheduler: &TestScheduler, duration: Duration) {
            scheduler.advance(duration);
            self.run_until_stalled();
        }

        /// Tear the store down, then let cancelled effects wind down.
        pub fn teardown(&mut self) {
            self.store.teardown.teardown();
            self.run_until_stalled();
        }

        /// Actions fed back by effects, in reduction order.
        pub fn received(&self) -> &[R::Action] {
            &self.received
        }

        /// Take the received actions, leaving the log empty.
        pub fn take_received(&mut self) -> Vec<R::Action> {
            std::mem::take(&mut self.received)
        }

        /// The current state.
        pub fn state(&self) -> &R::State {
            self.store.state()
        }

        /// Every state observed so far, starting with the initial one.
        pub fn observer(&self) -> &TestObserver<R::State> {
            &self.observer
        }

        /// Queue actions without reducing them. They are processed, in
        /// order, by the next call that runs effects.
        pub fn emitter(&self) -> Emitter<R::Action> {
            self.store.emitter()
        }

        /// The cancellation registry of this store's effects.
        pub fn cancellations(&self) -> &Cancellations {
            self.store.cancellations()
        }
    }
}
