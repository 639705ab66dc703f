//! Composable reducers and cancellable effects for unidirectional data flow.
//!
//! A feature is described by a state, a closed set of actions, and an
//! environment of injected dependencies. A [`Reducer`] mutates the state for
//! each action and returns an [`Effect`]: a lazy description of asynchronous
//! work whose resulting actions are fed back into the [`Store`].
//!
//! Reducers compose:
//! - [`Reducer::combine`] / [`merge`] run several reducers over the same state,
//! - [`Reducer::pullback`] lifts a child feature into its parent's domain,
//! - [`Reducer::error_handling`] wraps a failing tree once so that every
//!   failure becomes actions the state machine understands.
//!
//! ## Example
//!
//! ```rust
//! use oxide_reduce::{case_path, from_fn, Effect, Never, Reducer, TestStore};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! enum CounterAction { Increment, Incremented }
//!
//! #[derive(Clone, Debug, PartialEq)]
//! enum AppAction { Counter(CounterAction), Reset }
//!
//! #[derive(Clone, Debug, Default, PartialEq)]
//! struct AppState { count: u32 }
//!
//! type Counter = Effect<CounterAction, Never>;
//!
//! let counter = from_fn(|count: &mut u32, action: CounterAction, _: &()| -> Counter {
//!     match action {
//!         CounterAction::Increment => Effect::just(CounterAction::Incremented),
//!         CounterAction::Incremented => {
//!             *count += 1;
//!             Effect::none()
//!         }
//!     }
//! });
//!
//! let reset = from_fn(|state: &mut AppState, action: AppAction, _: &()| {
//!     if let AppAction::Reset = action {
//!         state.count = 0;
//!     }
//!     Effect::<AppAction, Never>::none()
//! });
//!
//! let app = reset.combine(counter.pullback(
//!     |state: &mut AppState| &mut state.count,
//!     case_path!(AppAction::Counter),
//!     |_: &()| (),
//! ));
//!
//! let mut store = TestStore::new(AppState::default(), app, ());
//! store.send(AppAction::Counter(CounterAction::Increment));
//!
//! assert_eq!(store.received(), &[AppAction::Counter(CounterAction::Incremented)]);
//! assert_eq!(store.state().count, 1);
//! ```

// Module declarations
pub mod app;
mod cancellation;
mod compose;
mod decorator;
mod effect;
mod emitter;
mod observer;
mod reducer;
mod runtime;
mod scheduler;

// Public re-exports
pub use cancellation::{Cancellations, EffectId};
pub use compose::{merge, CasePath, Combine, Merge, Pullback};
pub use decorator::{CatchFailures, Recover, WithFailure};
pub use effect::{Effect, Never};
pub use emitter::Emitter;
pub use observer::{Observer, SharedState};
pub use reducer::{from_fn, BoxReducer, FnReducer, Reducer};
pub use runtime::{Spawner, Store, TeardownHandle};
pub use scheduler::Scheduler;

#[cfg(feature = "tokio")]
pub use scheduler::TokioScheduler;

// Test utilities (only available with 'testing' feature or during tests)
#[cfg(any(test, feature = "testing"))]
pub use observer::TestObserver;
#[cfg(any(test, feature = "testing"))]
pub use runtime::TestStore;
#[cfg(any(test, feature = "testing"))]
pub use scheduler::TestScheduler;
