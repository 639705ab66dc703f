use std::sync::Arc;

use futures::channel::oneshot;
use futures::FutureExt;
use mockall::automock;
use oxide_reduce::app::{app_reducer, AppAction, AppEnvironment, AppError, AppState, SessionAction};
use oxide_reduce::{BoxReducer, TestScheduler, TestStore};

pub(crate) type AppStore = TestStore<BoxReducer<AppState, AppAction, AppEnvironment>>;

#[automock]
pub(crate) trait Backend {
    fn save_name(&self, name: String) -> Result<(), AppError>;
    fn logout(&self);
    fn load_data(&self) -> Result<Vec<String>, AppError>;
}

pub(crate) struct AppTest {
    pub(crate) store: AppStore,
    pub(crate) scheduler: TestScheduler,
}

/// Build an app store whose environment forwards every dependency to `backend`.
pub(crate) fn given_backend(backend: MockBackend) -> AppTest {
    let scheduler = TestScheduler::new();
    let backend = Arc::new(backend);
    let (save, out, load) = (backend.clone(), backend.clone(), backend);

    let environment = AppEnvironment::new(
        move |name| {
            let backend = save.clone();
            async move { backend.save_name(name) }
        },
        move || {
            let backend = out.clone();
            async move { backend.logout() }
        },
        move || {
            let backend = load.clone();
            async move { backend.load_data() }
        },
        scheduler.clone(),
    );

    AppTest {
        store: create_store(environment),
        scheduler,
    }
}

/// Build an app store whose save only completes once the returned sender fires.
pub(crate) fn given_pending_save() -> (AppTest, oneshot::Sender<Result<(), AppError>>) {
    let scheduler = TestScheduler::new();
    let (release, gate) = oneshot::channel::<Result<(), AppError>>();
    let gate = gate.shared();

    let environment = AppEnvironment::new(
        move |_name| {
            let gate = gate.clone();
            async move {
                gate.await
                    .unwrap_or_else(|_| Err(AppError::Operation("save abandoned".to_string())))
            }
        },
        || async {},
        || async { Ok::<Vec<String>, AppError>(Vec::new()) },
        scheduler.clone(),
    );

    let test = AppTest {
        store: create_store(environment),
        scheduler,
    };
    (test, release)
}

fn create_store(environment: AppEnvironment) -> AppStore {
    let reducer: BoxReducer<AppState, AppAction, AppEnvironment> = Box::new(app_reducer());
    TestStore::new(AppState::default(), reducer, environment)
}

pub(crate) fn signed_in(test: &mut AppTest, credential: &str) {
    test.store
        .send(AppAction::Session(SessionAction::SignIn(credential.to_string())));
}
