//! Transient notification that dismisses itself.

use core::time::Duration;
use std::sync::Arc;

use crate::{Effect, EffectId, Never, Reducer, Scheduler};

/// How long a toast stays visible without interaction.
pub const TOAST_DURATION: Duration = Duration::from_secs(3);

/// Identifies the pending auto-dismiss timer.
pub const DISMISS_TIMER: EffectId = EffectId::new("toast.dismiss");

/// The toast on screen, if any.
///
/// `generation` counts the `Show` actions reduced so far. Each dismiss timer
/// carries the generation that started it, so a timer that fired for an
/// earlier toast cannot hide a newer one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToastState {
    text: Option<String>,
    generation: u64,
}

impl ToastState {
    /// The visible text, or `None` while hiding.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn is_showing(&self) -> bool {
        self.text.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ToastAction {
    Show(String),
    Hide,
    /// The user tapped the visible toast.
    Tapped,
    /// The dismiss timer of the given generation ran out.
    Expired(u64),
}

#[derive(Clone)]
pub struct ToastEnvironment {
    pub scheduler: Arc<dyn Scheduler>,
}

/// Shows and hides the toast.
///
/// Every `Show` restarts the dismiss timer, so the latest text always gets
/// the full [`TOAST_DURATION`]. `Hide` and `Tapped` cancel the timer, and an
/// `Expired` from a replaced timer is ignored.
pub struct ToastReducer;

impl Reducer for ToastReducer {
    type State = ToastState;
    type Action = ToastAction;
    type Environment = ToastEnvironment;
    type Failure = Never;

    fn reduce(
        &self,
        state: &mut ToastState,
        action: ToastAction,
        environment: &ToastEnvironment,
    ) -> Effect<ToastAction> {
        match action {
            ToastAction::Show(text) => {
                state.generation += 1;
                state.text = Some(text);

                let generation = state.generation;
                let scheduler = environment.scheduler.clone();
                Effect::single(async move {
                    scheduler.sleep(TOAST_DURATION).await;
                    Ok(ToastAction::Expired(generation))
                })
                .cancellable(DISMISS_TIMER, true)
            }
            ToastAction::Expired(generation) => {
                if generation == state.generation {
                    state.text = None;
                } else {
                    log::debug!("ignoring stale toast timer {generation}");
                }
                Effect::none()
            }
            ToastAction::Hide => {
                state.text = None;
                Effect::cancel(DISMISS_TIMER)
            }
            ToastAction::Tapped => {
                Effect::merge([Effect::cancel(DISMISS_TIMER), Effect::just(ToastAction::Hide)])
            }
        }
    }
}
