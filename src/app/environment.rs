//! Dependencies of the app, injected at store construction.

use core::future::Future;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};

use super::error::AppError;
use super::session::SessionEnvironment;
use super::toast::ToastEnvironment;
use crate::Scheduler;

pub type SaveName = Arc<dyn Fn(String) -> BoxFuture<'static, Result<(), AppError>> + Send + Sync>;
pub type Logout = Arc<dyn Fn() -> BoxFuture<'static, ()> + Send + Sync>;
pub type LoadData =
    Arc<dyn Fn() -> BoxFuture<'static, Result<Vec<String>, AppError>> + Send + Sync>;

/// Every side-effecting dependency the app reducers use.
///
/// There is no default: each store gets an explicitly built environment, and
/// tests substitute mocks and a [`TestScheduler`](crate::TestScheduler).
#[derive(Clone)]
pub struct AppEnvironment {
    pub save_name: SaveName,
    pub logout: Logout,
    pub load_data: LoadData,
    pub scheduler: Arc<dyn Scheduler>,
}

impl AppEnvironment {
    pub fn new<Save, SaveFuture, Out, OutFuture, Load, LoadFuture, Sched>(
        save_name: Save,
        logout: Out,
        load_data: Load,
        scheduler: Sched,
    ) -> Self
    where
        Save: Fn(String) -> SaveFuture + Send + Sync + 'static,
        SaveFuture: Future<Output = Result<(), AppError>> + Send + 'static,
        Out: Fn() -> OutFuture + Send + Sync + 'static,
        OutFuture: Future<Output = ()> + Send + 'static,
        Load: Fn() -> LoadFuture + Send + Sync + 'static,
        LoadFuture: Future<Output = Result<Vec<String>, AppError>> + Send + 'static,
        Sched: Scheduler + 'static,
    {
        Self {
            save_name: Arc::new(move |name: String| save_name(name).boxed()),
            logout: Arc::new(move || logout().boxed()),
            load_data: Arc::new(move || load_data().boxed()),
            scheduler: Arc::new(scheduler),
        }
    }

    pub fn session(&self) -> SessionEnvironment {
        SessionEnvironment {
            logout: self.logout.clone(),
        }
    }

    pub fn toast(&self) -> ToastEnvironment {
        ToastEnvironment {
            scheduler: self.scheduler.clone(),
        }
    }
}
