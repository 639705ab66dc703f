//! The reducer contract and its composition entry points.

use core::marker::PhantomData;

use crate::compose::{CasePath, Combine, Pullback};
use crate::decorator::{CatchFailures, Recover, WithFailure};
use crate::effect::{Effect, Never};

/// A state transition paired with a description of follow-up work.
///
/// `reduce` mutates `state` in place, synchronously, and returns an
/// [`Effect`] describing asynchronous work whose actions are dispatched back
/// into the store. Reducers never block and never execute their effects.
///
/// `Failure` is the error type the returned effects may fail with. A
/// [`Store`](crate::Store) only runs reducers whose `Failure` is [`Never`];
/// reducers that can fail are wrapped once, at the outermost layer, with
/// [`error_handling`](Self::error_handling) or
/// [`catch_failures`](Self::catch_failures).
///
/// # Example
///
/// ```rust
/// use oxide_reduce::{Effect, Never, Reducer};
///
/// #[derive(Clone)]
/// enum CounterAction { Increment, Reset }
///
/// struct CounterReducer;
///
/// impl Reducer for CounterReducer {
///     type State = i32;
///     type Action = CounterAction;
///     type Environment = ();
///     type Failure = Never;
///
///     fn reduce(&self, state: &mut i32, action: CounterAction, _: &()) -> Effect<CounterAction> {
///         match action {
///             CounterAction::Increment => *state += 1,
///             CounterAction::Reset => *state = 0,
///         }
///         Effect::none()
///     }
/// }
///
/// let mut count = 0;
/// CounterReducer.reduce(&mut count, CounterAction::Increment, &());
/// assert_eq!(count, 1);
/// ```
pub trait Reducer {
    type State;
    type Action;
    type Environment;
    type Failure;

    /// Apply `action` to `state` and describe the resulting work.
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        environment: &Self::Environment,
    ) -> Effect<Self::Action, Self::Failure>;

    /// Run `self` then `other` against the same state and action.
    ///
    /// Writes from `other` win on overlapping fields. Effects are merged.
    fn combine<Other>(self, other: Other) -> Combine<Self, Other>
    where
        Self: Sized,
        Other: Reducer<
            State = Self::State,
            Action = Self::Action,
            Environment = Self::Environment,
            Failure = Self::Failure,
        >,
    {
        Combine::new(self, other)
    }

    /// Lift this reducer into a parent domain.
    ///
    /// See [`Pullback`] for the exact semantics.
    fn pullback<State, Action, Environment>(
        self,
        state: for<'a> fn(&'a mut State) -> &'a mut Self::State,
        action: CasePath<Action, Self::Action>,
        environment: fn(&Environment) -> Self::Environment,
    ) -> Pullback<Self, State, Action, Environment>
    where
        Self: Sized,
    {
        Pullback::new(self, state, action, environment)
    }

    /// Recover every failure of this reducer's effects with `handler`.
    fn catch_failures<H>(self, handler: H) -> CatchFailures<Self, H>
    where
        Self: Sized,
        H: Fn(Self::Failure) -> Effect<Self::Action, Never> + Send + Sync + Clone + 'static,
    {
        CatchFailures::new(self, handler)
    }

    /// Recover every failure through the action type's [`Recover`] policy.
    #[allow(clippy::type_complexity)]
    fn error_handling(
        self,
    ) -> CatchFailures<Self, fn(Self::Failure) -> Effect<Self::Action, Never>>
    where
        Self: Sized,
        Self::Action: Recover<Self::Failure>,
    {
        let recover: fn(Self::Failure) -> Effect<Self::Action, Never> =
            <Self::Action as Recover<Self::Failure>>::recover;
        CatchFailures::new(self, recover)
    }

    /// Declare a non-failing reducer as failing with `Failure`.
    ///
    /// Lets never-failing features merge with failing siblings under one
    /// error-handling layer.
    fn with_failure<Failure>(self) -> WithFailure<Self, Failure>
    where
        Self: Sized + Reducer<Failure = Never>,
    {
        WithFailure::new(self)
    }
}

impl<R> Reducer for Box<R>
where
    R: Reducer + ?Sized,
{
    type State = R::State;
    type Action = R::Action;
    type Environment = R::Environment;
    type Failure = R::Failure;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        environment: &Self::Environment,
    ) -> Effect<Self::Action, Self::Failure> {
        (**self).reduce(state, action, environment)
    }
}

/// A type-erased reducer, handy for merging heterogeneous features.
pub type BoxReducer<State, Action, Environment, Failure = Never> = Box<
    dyn Reducer<State = State, Action = Action, Environment = Environment, Failure = Failure>
        + Send
        + Sync,
>;

/// A reducer backed by a plain function or closure. See [`from_fn`].
pub struct FnReducer<State, Action, Environment, Failure, F> {
    reduce: F,
    _domain: PhantomData<fn(&mut State, Action, &Environment) -> Failure>,
}

/// Build a reducer from a closure.
///
/// ```rust
/// use oxide_reduce::{from_fn, Effect, Never, Reducer};
///
/// let double = from_fn(|state: &mut u32, _: (), _: &()| -> Effect<(), Never> {
///     *state *= 2;
///     Effect::none()
/// });
///
/// let mut value = 21;
/// double.reduce(&mut value, (), &());
/// assert_eq!(value, 42);
/// ```
pub fn from_fn<State, Action, Environment, Failure, F>(
    reduce: F,
) -> FnReducer<State, Action, Environment, Failure, F>
where
    F: Fn(&mut State, Action, &Environment) -> Effect<Action, Failure>,
{
    FnReducer {
        reduce,
        _domain: PhantomData,
    }
}

impl<State, Action, Environment, Failure, F> Reducer
    for FnReducer<State, Action, Environment, Failure, F>
where
    F: Fn(&mut State, Action, &Environment) -> Effect<Action, Failure>,
{
    type State = State;
    type Action = Action;
    type Environment = Environment;
    type Failure = Failure;

    fn reduce(
        &self,
        state: &mut State,
        action: Action,
        environment: &Environment,
    ) -> Effect<Action, Failure> {
        (self.reduce)(state, action, environment)
    }
}
