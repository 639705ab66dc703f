//! The user's saved display name.

use crate::{Effect, Never, Reducer};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfileState {
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProfileAction {
    DidSaveName(String),
}

pub struct ProfileReducer;

impl Reducer for ProfileReducer {
    type State = ProfileState;
    type Action = ProfileAction;
    type Environment = ();
    type Failure = Never;

    fn reduce(
        &self,
        state: &mut ProfileState,
        action: ProfileAction,
        _: &(),
    ) -> Effect<ProfileAction> {
        match action {
            ProfileAction::DidSaveName(name) => state.name = name,
        }
        Effect::none()
    }
}
