//! Credential held by the app.

use std::sync::Arc;

use futures::future::BoxFuture;

use crate::{Effect, Never, Reducer};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    pub credential: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionAction {
    SignIn(String),
    Logout,
}

#[derive(Clone)]
pub struct SessionEnvironment {
    pub logout: Arc<dyn Fn() -> BoxFuture<'static, ()> + Send + Sync>,
}

pub struct SessionReducer;

impl Reducer for SessionReducer {
    type State = SessionState;
    type Action = SessionAction;
    type Environment = SessionEnvironment;
    type Failure = Never;

    fn reduce(
        &self,
        state: &mut SessionState,
        action: SessionAction,
        environment: &SessionEnvironment,
    ) -> Effect<SessionAction> {
        match action {
            SessionAction::SignIn(credential) => {
                state.credential = Some(credential);
                Effect::none()
            }
            SessionAction::Logout => {
                state.credential = None;

                let logout = environment.logout.clone();
                Effect::<(), Never>::single(async move {
                    logout().await;
                    Ok(())
                })
                .fire_and_forget()
            }
        }
    }
}
