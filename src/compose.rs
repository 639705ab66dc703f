//! Reducer composition: merging siblings and scoping children into parents.

use crate::effect::Effect;
use crate::reducer::Reducer;

/// Two reducers run one after the other. Built by [`Reducer::combine`].
pub struct Combine<First, Second> {
    first: First,
    second: Second,
}

impl<First, Second> Combine<First, Second> {
    pub(crate) fn new(first: First, second: Second) -> Self {
        Self { first, second }
    }
}

impl<First, Second> Reducer for Combine<First, Second>
where
    First: Reducer,
    First::Action: Clone + Send + 'static,
    First::Failure: Send + 'static,
    Second: Reducer<
        State = First::State,
        Action = First::Action,
        Environment = First::Environment,
        Failure = First::Failure,
    >,
{
    type State = First::State;
    type Action = First::Action;
    type Environment = First::Environment;
    type Failure = First::Failure;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        environment: &Self::Environment,
    ) -> Effect<Self::Action, Self::Failure> {
        let first = self.first.reduce(state, action.clone(), environment);
        let second = self.second.reduce(state, action, environment);
        Effect::merge([first, second])
    }
}

/// Any number of reducers of one type, run in order. Built by [`merge`].
pub struct Merge<R> {
    reducers: Vec<R>,
}

/// Merge reducers into one that runs each of them, in iteration order,
/// against the same state and action.
///
/// Pair with [`BoxReducer`](crate::BoxReducer) to merge different reducer
/// types.
pub fn merge<R, I>(reducers: I) -> Merge<R>
where
    R: Reducer,
    I: IntoIterator<Item = R>,
{
    Merge {
        reducers: reducers.into_iter().collect(),
    }
}

impl<R> Reducer for Merge<R>
where
    R: Reducer,
    R::Action: Clone + Send + 'static,
    R::Failure: Send + 'static,
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
        let effects: Vec<_> = self
            .reducers
            .iter()
            .map(|reducer| reducer.reduce(state, action.clone(), environment))
            .collect();
        Effect::merge(effects)
    }
}

/// Extracts one case of an action enum and embeds it back.
///
/// Usually built with [`case_path!`](crate::case_path).
pub struct CasePath<Root, Value> {
    extract: fn(Root) -> Option<Value>,
    embed: fn(Value) -> Root,
}

impl<Root, Value> Clone for CasePath<Root, Value> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Root, Value> Copy for CasePath<Root, Value> {}

impl<Root, Value> CasePath<Root, Value> {
    /// Pair an extraction with its inverse embedding.
    ///
    /// `extract(embed(value))` must return `Some(value)`.
    pub const fn new(extract: fn(Root) -> Option<Value>, embed: fn(Value) -> Root) -> Self {
        Self { extract, embed }
    }

    /// The case's payload, or `None` when `root` is another case.
    pub fn extract(&self, root: Root) -> Option<Value> {
        (self.extract)(root)
    }

    /// Wrap `value` back into its case.
    pub fn embed(&self, value: Value) -> Root {
        (self.embed)(value)
    }
}

/// Build a [`CasePath`] for a single-field tuple variant.
///
/// ```rust
/// use oxide_reduce::case_path;
///
/// #[derive(Debug, PartialEq)]
/// enum AppAction {
///     Counter(i32),
///     Reset,
/// }
///
/// let counter = case_path!(AppAction::Counter);
/// assert_eq!(counter.extract(AppAction::Counter(3)), Some(3));
/// assert_eq!(counter.extract(AppAction::Reset), None);
/// assert_eq!(counter.embed(7), AppAction::Counter(7));
/// ```
#[macro_export]
macro_rules! case_path {
    ($variant:path) => {
        $crate::CasePath::new(
            |root| match root {
                $variant(value) => ::core::option::Option::Some(value),
                #[allow(unreachable_patterns)]
                _ => ::core::option::Option::None,
            },
            $variant,
        )
    };
}

/// A child reducer lifted into a parent domain. Built by [`Reducer::pullback`].
///
/// For each parent action, the [`CasePath`] decides whether the child sees
/// it. Non-matching actions return [`Effect::none`] without running the
/// child. Matching actions run the child against the state slice selected by
/// `state` and the environment derived by `environment`; the child's actions
/// are embedded back into the parent action type.
pub struct Pullback<Child: Reducer, State, Action, Environment> {
    child: Child,
    state: for<'a> fn(&'a mut State) -> &'a mut Child::State,
    action: CasePath<Action, Child::Action>,
    environment: fn(&Environment) -> Child::Environment,
}

impl<Child, State, Action, Environment> Pullback<Child, State, Action, Environment>
where
    Child: Reducer,
{
    pub(crate) fn new(
        child: Child,
        state: for<'a> fn(&'a mut State) -> &'a mut Child::State,
        action: CasePath<Action, Child::Action>,
        environment: fn(&Environment) -> Child::Environment,
    ) -> Self {
        Self {
            child,
            state,
            action,
            environment,
        }
    }
}

impl<Child, State, Action, Environment> Reducer for Pullback<Child, State, Action, Environment>
where
    Child: Reducer,
    Child::Action: Send + 'static,
    Child::Failure: Send + 'static,
    Action: Send + 'static,
{
    type State = State;
    type Action = Action;
    type Environment = Environment;
    type Failure = Child::Failure;

    fn reduce(
        &self,
        state: &mut State,
        action: Action,
        environment: &Environment,
    ) -> Effect<Action, Child::Failure> {
        let Some(child_action) = self.action.extract(action) else {
            return Effect::none();
        };

        let child_environment = (self.environment)(environment);
        self.child
            .reduce((self.state)(state), child_action, &child_environment)
            .map(self.action.embed)
    }
}
