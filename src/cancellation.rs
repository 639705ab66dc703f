//! Registry of in-flight cancellable effects.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::{AbortHandle, AbortRegistration};
use spin::Mutex;

/// Identifies a cancellable effect.
///
/// Ids are compared by value, so every effect started with the same id can
/// be cancelled together.
///
/// ```rust
/// use oxide_reduce::EffectId;
///
/// const DISMISS_TIMER: EffectId = EffectId::new("toast.dismiss");
/// assert_eq!(DISMISS_TIMER.name(), "toast.dismiss");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EffectId(&'static str);

impl EffectId {
    /// Create an id from a name unique to the effect it identifies.
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// The name this id was created with.
    pub fn name(&self) -> &'static str {
        self.0
    }
}

#[derive(Default)]
struct Registry {
    next_token: u64,
    in_flight: HashMap<EffectId, Vec<(u64, AbortHandle)>>,
}

/// Abort handles of the cancellable effects a store is running.
///
/// Cheap to clone; clones share the same registry.
#[derive(Clone, Default)]
pub struct Cancellations {
    registry: Arc<Mutex<Registry>>,
}

impl Cancellations {
    /// Register a new in-flight effect under `id`.
    ///
    /// The entry is removed when the returned [`Registration`] is dropped.
    pub(crate) fn register(&self, id: EffectId) -> (Registration, AbortRegistration) {
        let (handle, abort) = AbortHandle::new_pair();
        let mut registry = self.registry.lock();
        let token = registry.next_token;
        registry.next_token += 1;
        registry.in_flight.entry(id).or_default().push((token, handle));

        let registration = Registration {
            cancellations: self.clone(),
            id,
            token,
        };
        (registration, abort)
    }

    fn release(&self, id: EffectId, token: u64) {
        let mut registry = self.registry.lock();
        if let Some(handles) = registry.in_flight.get_mut(&id) {
            handles.retain(|(registered, _)| *registered != token);
            if handles.is_empty() {
                registry.in_flight.remove(&id);
            }
        }
    }

    /// Abort every effect registered under `id`, returning how many were running.
    pub fn cancel(&self, id: EffectId) -> usize {
        let handles = self.registry.lock().in_flight.remove(&id).unwrap_or_default();
        for (_, handle) in &handles {
            handle.abort();
        }
        if !handles.is_empty() {
            log::debug!("cancelled {} in-flight effect(s) for {:?}", handles.len(), id);
        }
        handles.len()
    }

    /// Number of effects currently registered under `id`.
    pub fn in_flight(&self, id: EffectId) -> usize {
        self.registry
            .lock()
            .in_flight
            .get(&id)
            .map_or(0, Vec::len)
    }
}

/// Keeps one effect registered in [`Cancellations`] until dropped.
pub(crate) struct Registration {
    cancellations: Cancellations,
    id: EffectId,
    token: u64,
}

impl Drop for Registration {
    fn drop(&mut self) {
        self.cancellations.release(self.id, self.token);
    }
}
