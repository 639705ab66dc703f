//! Declarative effect system for describing deferred asynchronous work.

use core::fmt;
use core::future::Future;
use core::task::Poll;
use std::sync::Arc;

use futures::future::{self, Abortable};
use futures::stream::{self, BoxStream, StreamExt};

use crate::cancellation::{Cancellations, EffectId};

/// The failure type of effects that cannot fail.
pub type Never = core::convert::Infallible;

type Build<Action, Failure> =
    Box<dyn FnOnce(&Cancellations) -> BoxStream<'static, Result<Action, Failure>> + Send>;

enum Work<Action, Failure> {
    None,
    Merge(Vec<Effect<Action, Failure>>),
    Deferred(Build<Action, Failure>),
}

/// Declarative description of asynchronous work that produces actions.
///
/// Effects are returned from [`Reducer::reduce`](crate::Reducer::reduce)
/// after the state has been mutated. Nothing runs when an effect is built:
/// the runtime executes it later through [`Effect::into_stream`], and every
/// action it yields is dispatched back into the store.
///
/// `Failure` is the error the described work can end with. The store only
/// accepts `Effect<Action, Never>`, so failing effects must be recovered with
/// [`catch_error`](Self::catch_error) (usually through a decorator reducer)
/// before they reach it.
///
/// # Example
///
/// ```rust
/// use oxide_reduce::Effect;
///
/// #[derive(Clone)]
/// enum Action {
///     ShowLoading,
///     Loaded(Vec<String>),
///     HideLoading,
/// }
///
/// let effect: Effect<Action, String> = Effect::concatenate(vec![
///     Effect::just(Action::ShowLoading),
///     Effect::single(async { Ok(Action::Loaded(vec!["cached".to_string()])) }),
///     Effect::just(Action::HideLoading),
/// ]);
/// assert!(!effect.is_none());
/// ```
pub struct Effect<Action, Failure = Never>(Work<Action, Failure>);

impl<Action, Failure> fmt::Debug for Effect<Action, Failure> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Work::None => f.write_str("Effect::None"),
            Work::Merge(effects) => f.debug_tuple("Effect::Merge").field(effects).finish(),
            Work::Deferred(_) => f.write_str("Effect::Deferred"),
        }
    }
}

impl<Action, Failure> Default for Effect<Action, Failure> {
    fn default() -> Self {
        Self(Work::None)
    }
}

impl<Action, Failure> Effect<Action, Failure>
where
    Action: Send + 'static,
    Failure: Send + 'static,
{
    fn deferred<B>(build: B) -> Self
    where
        B: FnOnce(&Cancellations) -> BoxStream<'static, Result<Action, Failure>> + Send + 'static,
    {
        Self(Work::Deferred(Box::new(build)))
    }

    /// Create an empty effect.
    ///
    /// # Example
    ///
    /// ```rust
    /// use oxide_reduce::Effect;
    ///
    /// enum Action { Increment }
    ///
    /// let effect: Effect<Action> = Effect::none();
    /// assert!(effect.is_none());
    /// ```
    pub fn none() -> Self {
        Self(Work::None)
    }

    /// Whether this effect describes no work at all.
    pub fn is_none(&self) -> bool {
        matches!(self.0, Work::None)
    }

    /// Create an effect yielding a single action immediately.
    ///
    /// Useful for triggering follow-up actions.
    pub fn just(action: Action) -> Self {
        Self::deferred(move |_| stream::once(future::ready(Ok(action))).boxed())
    }

    /// Create an effect that fails immediately with `failure`.
    pub fn failure(failure: Failure) -> Self {
        Self::deferred(move |_| stream::once(future::ready(Err(failure))).boxed())
    }

    /// Wrap one asynchronous operation.
    ///
    /// The operation is not polled until the runtime executes the effect. Its
    /// output becomes either one action or the failure of this effect.
    ///
    /// ```rust
    /// use oxide_reduce::Effect;
    ///
    /// #[derive(Debug)]
    /// enum Action { Saved(String) }
    ///
    /// let name = "Ada".to_string();
    /// let effect: Effect<Action, String> = Effect::single(async move {
    ///     Ok(Action::Saved(name))
    /// });
    /// ```
    pub fn single<Fut>(operation: Fut) -> Self
    where
        Fut: Future<Output = Result<Action, Failure>> + Send + 'static,
    {
        Self::deferred(move |_| stream::once(operation).boxed())
    }

    /// Run several effects concurrently.
    ///
    /// Actions surface in the order their sources produce them. A failing
    /// member does not cancel its siblings, and decorators applied to the
    /// merged effect later apply to each member independently.
    pub fn merge<I>(effects: I) -> Self
    where
        I: IntoIterator<Item = Effect<Action, Failure>>,
    {
        let mut members = Vec::new();
        for effect in effects {
            match effect.0 {
                Work::None => {}
                Work::Merge(nested) => members.extend(nested),
                work => members.push(Self(work)),
            }
        }

        match members.len() {
            0 => Self::none(),
            1 => members.remove(0),
            _ => Self(Work::Merge(members)),
        }
    }

    /// Run several effects strictly one after another.
    ///
    /// Each member is only started once the previous one has completed. The
    /// first failure ends the sequence: it is yielded and the remaining
    /// members never start.
    pub fn concatenate<I>(effects: I) -> Self
    where
        I: IntoIterator<Item = Effect<Action, Failure>>,
    {
        let members: Vec<_> = effects.into_iter().filter(|e| !e.is_none()).collect();
        if members.is_empty() {
            return Self::none();
        }

        Self::deferred(move |cancellations| {
            let cancellations = cancellations.clone();
            stream::iter(members)
                .map(move |effect| effect.into_stream(&cancellations))
                .flatten()
                .scan(false, |failed, result| {
                    if *failed {
                        return future::ready(None);
                    }
                    *failed = result.is_err();
                    future::ready(Some(result))
                })
                .boxed()
        })
    }

    /// Transform every action this effect yields.
    ///
    /// This is how a scoped child's actions are re-embedded into its parent.
    pub fn map<Mapped, F>(self, transform: F) -> Effect<Mapped, Failure>
    where
        Mapped: Send + 'static,
        F: Fn(Action) -> Mapped + Send + Sync + 'static,
    {
        self.map_shared(Arc::new(transform))
    }

    fn map_shared<Mapped>(
        self,
        transform: Arc<dyn Fn(Action) -> Mapped + Send + Sync>,
    ) -> Effect<Mapped, Failure>
    where
        Mapped: Send + 'static,
    {
        match self.0 {
            Work::None => Effect::none(),
            Work::Merge(members) => Effect(Work::Merge(
                members
                    .into_iter()
                    .map(|member| member.map_shared(transform.clone()))
                    .collect(),
            )),
            Work::Deferred(build) => Effect::deferred(move |cancellations| {
                build(cancellations)
                    .map(move |result| result.map(|action| transform(action)))
                    .boxed()
            }),
        }
    }

    /// Transform the failure of this effect.
    pub fn map_error<Mapped, F>(self, transform: F) -> Effect<Action, Mapped>
    where
        Mapped: Send + 'static,
        F: Fn(Failure) -> Mapped + Send + Sync + 'static,
    {
        self.map_error_shared(Arc::new(transform))
    }

    fn map_error_shared<Mapped>(
        self,
        transform: Arc<dyn Fn(Failure) -> Mapped + Send + Sync>,
    ) -> Effect<Action, Mapped>
    where
        Mapped: Send + 'static,
    {
        match self.0 {
            Work::None => Effect::none(),
            Work::Merge(members) => Effect(Work::Merge(
                members
                    .into_iter()
                    .map(|member| member.map_error_shared(transform.clone()))
                    .collect(),
            )),
            Work::Deferred(build) => Effect::deferred(move |cancellations| {
                build(cancellations)
                    .map(move |result| result.map_err(|failure| transform(failure)))
                    .boxed()
            }),
        }
    }

    /// Recover from failures by substituting the effect returned by `handler`.
    ///
    /// Successful actions pass through unchanged. When this effect is a merge,
    /// every member is recovered on its own so one failure never holds back
    /// or cancels its siblings.
    pub fn catch_error<Recovered, H>(self, handler: H) -> Effect<Action, Recovered>
    where
        Recovered: Send + 'static,
        H: Fn(Failure) -> Effect<Action, Recovered> + Send + Sync + 'static,
    {
        self.catch_error_shared(Arc::new(handler))
    }

    fn catch_error_shared<Recovered>(
        self,
        handler: Arc<dyn Fn(Failure) -> Effect<Action, Recovered> + Send + Sync>,
    ) -> Effect<Action, Recovered>
    where
        Recovered: Send + 'static,
    {
        match self.0 {
            Work::None => Effect::none(),
            Work::Merge(members) => Effect(Work::Merge(
                members
                    .into_iter()
                    .map(|member| member.catch_error_shared(handler.clone()))
                    .collect(),
            )),
            Work::Deferred(build) => Effect::deferred(move |cancellations| {
                let recovery = cancellations.clone();
                build(cancellations)
                    .flat_map(move |result| match result {
                        Ok(action) => stream::once(future::ready(Ok(action))).boxed(),
                        Err(failure) => handler(failure).into_stream(&recovery),
                    })
                    .boxed()
            }),
        }
    }

    /// Run the work but ignore everything it produces, failures included.
    pub fn fire_and_forget<Other, OtherFailure>(self) -> Effect<Other, OtherFailure>
    where
        Other: Send + 'static,
        OtherFailure: Send + 'static,
    {
        if self.is_none() {
            return Effect::none();
        }

        Effect::deferred(move |cancellations| {
            self.into_stream(cancellations)
                .filter_map(|_| future::ready(None))
                .boxed()
        })
    }

    /// Register this effect under `id` so it can be cancelled later.
    ///
    /// With `cancel_in_flight`, effects already running under the same id are
    /// cancelled before this one starts.
    pub fn cancellable(self, id: EffectId, cancel_in_flight: bool) -> Self {
        Self::deferred(move |cancellations| {
            if cancel_in_flight {
                cancellations.cancel(id);
            }

            let (registration, abort) = cancellations.register(id);
            let mut registration = Some(registration);

            // Released on completion, or when the stream is dropped early.
            Abortable::new(self.into_stream(cancellations), abort)
                .chain(stream::poll_fn(move |_| {
                    registration.take();
                    Poll::Ready(None)
                }))
                .boxed()
        })
    }

    /// Cancel every in-flight effect registered under `id`.
    ///
    /// The cancellation happens when this effect is executed; it yields no
    /// actions itself.
    pub fn cancel(id: EffectId) -> Self {
        Self::deferred(move |cancellations| {
            cancellations.cancel(id);
            stream::empty().boxed()
        })
    }

    /// Execute the description.
    ///
    /// Runtimes call this exactly once per effect; reducers never do.
    /// Cancellable members register with `cancellations` while the stream is
    /// built, or when reached in a concatenation.
    pub fn into_stream(
        self,
        cancellations: &Cancellations,
    ) -> BoxStream<'static, Result<Action, Failure>> {
        match self.0 {
            Work::None => stream::empty().boxed(),
            Work::Merge(members) => stream::select_all(
                members
                    .into_iter()
                    .map(|member| member.into_stream(cancellations)),
            )
            .boxed(),
            Work::Deferred(build) => build(cancellations),
        }
    }
}
