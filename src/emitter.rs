//! Action emitter handed to presentation layers and running effects.

use flume::Sender;

/// Dispatch handle of a [`Store`](crate::Store).
///
/// Clone this handle to forward user intents from any thread. Actions are
/// queued on the store's channel and reduced one at a time, in the order they
/// arrive.
///
/// `Emitter` wraps a channel sender, making it cheap to clone and
/// thread-safe without any locking overhead.
///
/// # Example
///
/// ```rust
/// use futures::future::BoxFuture;
/// use oxide_reduce::{from_fn, Effect, Never, Store};
///
/// #[derive(Clone)]
/// enum Action { Tap }
///
/// let reducer = from_fn(|taps: &mut u32, _: Action, _: &()| -> Effect<Action, Never> {
///     *taps += 1;
///     Effect::none()
/// });
/// let store = Store::new(0, reducer, (), |_: &u32| {}, |_: BoxFuture<'static, ()>| {});
///
/// let on_tap = {
///     let emitter = store.emitter();
///     move || emitter.emit(Action::Tap)
/// };
/// on_tap();
/// ```
pub struct Emitter<Action>(Sender<Action>);

impl<Action> Clone for Emitter<Action> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<Action> Emitter<Action> {
    pub(crate) fn new(sender: Sender<Action>) -> Self {
        Self(sender)
    }

    /// Queue an action for the store.
    ///
    /// Actions emitted after the store has been dropped are discarded.
    pub fn emit(&self, action: Action) {
        if self.0.send(action).is_err() {
            log::debug!("store is gone; dropping emitted action");
        }
    }
}
