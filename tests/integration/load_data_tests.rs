use oxide_reduce::app::{AppAction, AppError, DataAction, ToastAction};

use crate::app_fixture::{given_backend, MockBackend};

#[test]
fn given_load_succeeds_should_store_items_between_loading_markers() {
    let mut backend = MockBackend::new();
    backend
        .expect_load_data()
        .times(1)
        .returning(|| Ok(vec!["first".to_string(), "second".to_string()]));
    let mut test = given_backend(backend);

    test.store.send(AppAction::LoadData);

    assert_eq!(
        test.store.received(),
        &[
            AppAction::ShowLoading,
            AppAction::Data(DataAction::DidLoad(vec![
                "first".to_string(),
                "second".to_string()
            ])),
            AppAction::HideLoading,
        ]
    );
    assert_eq!(test.store.state().data.items, vec!["first", "second"]);
    assert!(!test.store.state().is_loading);
}

#[test]
fn given_load_fails_should_keep_previous_items_and_show_failure() {
    let mut backend = MockBackend::new();
    let mut calls = 0;
    backend.expect_load_data().times(2).returning(move || {
        calls += 1;
        if calls == 1 {
            Ok(vec!["cached".to_string()])
        } else {
            Err(AppError::Operation("Offline".to_string()))
        }
    });
    let mut test = given_backend(backend);
    test.store.send(AppAction::LoadData);
    test.store.take_received();

    test.store.send(AppAction::LoadData);

    assert_eq!(
        test.store.received(),
        &[
            AppAction::ShowLoading,
            AppAction::Toast(ToastAction::Show("Offline".to_string())),
            AppAction::HideLoading,
        ]
    );
    assert_eq!(test.store.state().data.items, vec!["cached"]);
    assert!(!test.store.state().is_loading);
}
