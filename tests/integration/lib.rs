mod app_fixture;

mod composition_tests;
mod load_data_tests;
mod toast_tests;
mod tokio_runtime_tests;
