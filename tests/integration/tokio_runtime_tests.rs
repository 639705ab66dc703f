use futures::future::BoxFuture;
use oxide_reduce::app::{
    app_reducer, AppAction, AppEnvironment, AppError, AppState, TOAST_DURATION,
};
use oxide_reduce::{SharedState, Store, TokioScheduler};
use tokio::time::{sleep, Duration};

#[tokio::test(start_paused = true)]
async fn given_failing_save_on_tokio_should_show_failure_then_dismiss_it() {
    let environment = AppEnvironment::new(
        |_name| async { Err::<(), AppError>(AppError::Operation("Server error".to_string())) },
        || async {},
        || async { Ok::<Vec<String>, AppError>(Vec::new()) },
        TokioScheduler,
    );
    let shared = SharedState::new(AppState::default());
    let mut store = Store::new(
        AppState::default(),
        app_reducer(),
        environment,
        shared.clone(),
        |future: BoxFuture<'static, ()>| {
            tokio::spawn(future);
        },
    );
    let emitter = store.emitter();
    let teardown = store.teardown_handle();

    tokio::join!(store.run(), async {
        emitter.emit(AppAction::SaveName("Ada".to_string()));

        sleep(Duration::from_secs(1)).await;
        let state = shared.snapshot();
        assert_eq!(state.toast.text(), Some("Server error"));
        assert!(!state.is_loading);
        assert_eq!(state.profile.name, "");

        sleep(TOAST_DURATION).await;
        assert!(!shared.snapshot().toast.is_showing());

        teardown.teardown();
    });
}
