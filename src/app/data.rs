//! Items fetched from the backend.

use crate::{Effect, Never, Reducer};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DataState {
    pub items: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataAction {
    DidLoad(Vec<String>),
}

pub struct DataReducer;

impl Reducer for DataReducer {
    type State = DataState;
    type Action = DataAction;
    type Environment = ();
    type Failure = Never;

    fn reduce(&self, state: &mut DataState, action: DataAction, _: &()) -> Effect<DataAction> {
        match action {
            DataAction::DidLoad(items) => state.items = items,
        }
        Effect::none()
    }
}
