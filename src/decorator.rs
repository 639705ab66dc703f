//! Decorator reducers that transform the effects of the reducer they wrap.

use core::marker::PhantomData;

use crate::effect::{Effect, Never};
use crate::reducer::Reducer;

/// Recovery policy of an action type for one failure type.
///
/// Implemented by an application's root action so that
/// [`Reducer::error_handling`] can turn failures into actions the state
/// machine understands (show a notification, clear a credential, stop a
/// spinner).
pub trait Recover<Failure>: Sized {
    /// Describe the actions that recover from `failure`.
    fn recover(failure: Failure) -> Effect<Self, Never>;
}

/// A reducer whose effects never fail. Built by [`Reducer::catch_failures`]
/// and [`Reducer::error_handling`].
///
/// The wrapped reducer's state mutation is applied as-is; only its effect is
/// transformed. Successful actions pass through, each failure is replaced by
/// the effect the handler returns. Members of merged effects recover
/// independently.
pub struct CatchFailures<R, H> {
    reducer: R,
    handler: H,
}

impl<R, H> CatchFailures<R, H> {
    pub(crate) fn new(reducer: R, handler: H) -> Self {
        Self { reducer, handler }
    }
}

impl<R, H> Reducer for CatchFailures<R, H>
where
    R: Reducer,
    R::Action: Send + 'static,
    R::Failure: Send + 'static,
    H: Fn(R::Failure) -> Effect<R::Action, Never> + Send + Sync + Clone + 'static,
{
    type State = R::State;
    type Action = R::Action;
    type Environment = R::Environment;
    type Failure = Never;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        environment: &Self::Environment,
    ) -> Effect<Self::Action, Never> {
        let effect = self.reducer.reduce(state, action, environment);
        let handler = self.handler.clone();
        effect.catch_error(move |failure| {
            log::debug!("recovering from a failed effect");
            handler(failure)
        })
    }
}

/// A non-failing reducer typed as failing with `Failure`. Built by
/// [`Reducer::with_failure`].
pub struct WithFailure<R, Failure> {
    reducer: R,
    _failure: PhantomData<fn() -> Failure>,
}

impl<R, Failure> WithFailure<R, Failure> {
    pub(crate) fn new(reducer: R) -> Self {
        Self {
            reducer,
            _failure: PhantomData,
        }
    }
}

impl<R, Failure> Reducer for WithFailure<R, Failure>
where
    R: Reducer<Failure = Never>,
    R::Action: Send + 'static,
    Failure: Send + 'static,
{
    type State = R::State;
    type Action = R::Action;
    type Environment = R::Environment;
    type Failure = Failure;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        environment: &Self::Environment,
    ) -> Effect<Self::Action, Failure> {
        self.reducer
            .reduce(state, action, environment)
            .map_error(|never| match never {})
    }
}
