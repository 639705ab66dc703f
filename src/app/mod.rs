//! A small application built from the composition core.
//!
//! The root reducer owns the global loading indicator and the long-running
//! intents (`SaveName`, `LoadData`); each feature is pulled back into the
//! root domain, and the whole tree is wrapped once by the error-handling
//! decorator:
//!
//! ```text
//! error_handling(
//!     AppLogic
//!         + pullback(ProfileReducer)
//!         + pullback(DataReducer)
//!         + pullback(SessionReducer)
//!         + pullback(ToastReducer)
//! )
//! ```

mod data;
mod environment;
mod error;
mod profile;
mod session;
mod toast;

pub use data::{DataAction, DataReducer, DataState};
pub use environment::{AppEnvironment, LoadData, Logout, SaveName};
pub use error::AppError;
pub use profile::{ProfileAction, ProfileReducer, ProfileState};
pub use session::{SessionAction, SessionEnvironment, SessionReducer, SessionState};
pub use toast::{
    ToastAction, ToastEnvironment, ToastReducer, ToastState, DISMISS_TIMER, TOAST_DURATION,
};

use crate::{case_path, Effect, Never, Recover, Reducer};

/// Toast text shown when the credential has been rejected.
pub const SESSION_EXPIRED: &str = "Session expired";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppState {
    pub is_loading: bool,
    pub profile: ProfileState,
    pub data: DataState,
    pub session: SessionState,
    pub toast: ToastState,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppAction {
    SaveName(String),
    LoadData,
    ShowLoading,
    HideLoading,
    HandleUnauthorized,
    Profile(ProfileAction),
    Data(DataAction),
    Session(SessionAction),
    Toast(ToastAction),
}

/// Root-level logic: the loading indicator and the operations it brackets.
///
/// Failures of `save_name` and `load_data` are not handled here. They abort
/// the surrounding sequence and are recovered by [`AppAction`]'s
/// [`Recover`] policy, which also hides the loading indicator.
pub struct AppLogic;

impl Reducer for AppLogic {
    type State = AppState;
    type Action = AppAction;
    type Environment = AppEnvironment;
    type Failure = AppError;

    fn reduce(
        &self,
        state: &mut AppState,
        action: AppAction,
        environment: &AppEnvironment,
    ) -> Effect<AppAction, AppError> {
        match action {
            AppAction::SaveName(name) => {
                let save_name = environment.save_name.clone();
                with_loading(Effect::single(async move {
                    save_name(name.clone())
                        .await
                        .map(|()| AppAction::Profile(ProfileAction::DidSaveName(name)))
                }))
            }
            AppAction::LoadData => {
                let load_data = environment.load_data.clone();
                with_loading(Effect::single(async move {
                    load_data()
                        .await
                        .map(|items| AppAction::Data(DataAction::DidLoad(items)))
                }))
            }
            AppAction::ShowLoading => {
                state.is_loading = true;
                Effect::none()
            }
            AppAction::HideLoading => {
                state.is_loading = false;
                Effect::none()
            }
            AppAction::HandleUnauthorized => session_expired().map_error(|never| match never {}),
            AppAction::Profile(_)
            | AppAction::Data(_)
            | AppAction::Session(_)
            | AppAction::Toast(_) => Effect::none(),
        }
    }
}

fn with_loading(operation: Effect<AppAction, AppError>) -> Effect<AppAction, AppError> {
    Effect::concatenate([
        Effect::just(AppAction::ShowLoading),
        operation,
        Effect::just(AppAction::HideLoading),
    ])
}

fn session_expired() -> Effect<AppAction> {
    Effect::concatenate([
        Effect::just(AppAction::Session(SessionAction::Logout)),
        Effect::just(AppAction::Toast(ToastAction::Show(SESSION_EXPIRED.to_string()))),
    ])
}

impl Recover<AppError> for AppAction {
    fn recover(failure: AppError) -> Effect<Self> {
        log::warn!("recovering from failed operation: {failure}");

        let notify = match failure {
            AppError::Unauthorized => session_expired(),
            AppError::Operation(description) => {
                Effect::just(AppAction::Toast(ToastAction::Show(description)))
            }
        };
        Effect::concatenate([notify, Effect::just(AppAction::HideLoading)])
    }
}

/// The composed app reducer, ready for a [`Store`](crate::Store).
pub fn app_reducer() -> impl Reducer<
    State = AppState,
    Action = AppAction,
    Environment = AppEnvironment,
    Failure = Never,
> {
    let features = ProfileReducer
        .pullback(
            |state: &mut AppState| &mut state.profile,
            case_path!(AppAction::Profile),
            |_: &AppEnvironment| (),
        )
        .combine(DataReducer.pullback(
            |state: &mut AppState| &mut state.data,
            case_path!(AppAction::Data),
            |_: &AppEnvironment| (),
        ))
        .combine(SessionReducer.pullback(
            |state: &mut AppState| &mut state.session,
            case_path!(AppAction::Session),
            AppEnvironment::session,
        ))
        .combine(ToastReducer.pullback(
            |state: &mut AppState| &mut state.toast,
            case_path!(AppAction::Toast),
            AppEnvironment::toast,
        ));

    AppLogic.combine(features.with_failure()).error_handling()
}
