//! Scoped context providers
//!
//! Consumers reach shared handles (theme state, locale state, ...) without having
//! them passed through every intermediate call. A provider installs a value for the
//! lifetime of a guard; any code on the same thread may then look it up by type:
//!
//! ```ignore
//! let _guard = provide(theme_handle.clone());
//!
//! // anywhere below, on this thread:
//! let theme: ThemeHandle = use_context();
//! ```
//!
//! Providers nest: the most recently installed value of a type wins until its guard
//! drops. Lookups with no provider in scope panic, since a silent default would hide
//! a wiring mistake. The UI runs on a single thread, so the stack is thread-local
//! and guards are `!Send`.

use std::any::{type_name, Any, TypeId};
use std::cell::{Cell, RefCell};
use std::marker::PhantomData;

use rustc_hash::FxHashMap;

type ProviderStack = Vec<(u64, Box<dyn Any>)>;

thread_local! {
    static PROVIDERS: RefCell<FxHashMap<TypeId, ProviderStack>> =
        RefCell::new(FxHashMap::default());
    static NEXT_ID: Cell<u64> = const { Cell::new(0) };
}

/// Keeps a provided value in scope; dropping it removes the value
#[must_use = "the value is only provided while the guard is alive"]
pub struct ProviderGuard {
    id: u64,
    type_id: TypeId,
    type_name: &'static str,
    _not_send: PhantomData<*const ()>,
}

impl Drop for ProviderGuard {
    fn drop(&mut self) {
        // The thread-local may already be gone during thread teardown.
        // Guards can drop out of order, so remove this guard's own entry.
        let _ = PROVIDERS.try_with(|providers| {
            let mut providers = providers.borrow_mut();
            if let Some(stack) = providers.get_mut(&self.type_id) {
                if let Some(pos) = stack.iter().rposition(|(id, _)| *id == self.id) {
                    stack.remove(pos);
                }
                if stack.is_empty() {
                    providers.remove(&self.type_id);
                }
            }
        });
        tracing::trace!(provider = self.type_name, "provider scope closed");
    }
}

/// Install `value` for the current thread until the returned guard drops
pub fn provide<T: Clone + 'static>(value: T) -> ProviderGuard {
    let type_id = TypeId::of::<T>();
    let id = NEXT_ID.with(|next| {
        let id = next.get();
        next.set(id + 1);
        id
    });
    PROVIDERS.with(|providers| {
        providers
            .borrow_mut()
            .entry(type_id)
            .or_default()
            .push((id, Box::new(value)));
    });
    tracing::trace!(provider = type_name::<T>(), "provider scope opened");
    ProviderGuard {
        id,
        type_id,
        type_name: type_name::<T>(),
        _not_send: PhantomData,
    }
}

/// Run `f` with `value` provided, removing it afterwards
pub fn with_provider<T: Clone + 'static, R>(value: T, f: impl FnOnce() -> R) -> R {
    let _guard = provide(value);
    f()
}

/// Innermost provided value of type `T`, if any
pub fn try_use_context<T: Clone + 'static>() -> Option<T> {
    PROVIDERS.with(|providers| {
        providers
            .borrow()
            .get(&TypeId::of::<T>())
            .and_then(|stack| stack.last())
            .and_then(|(_, value)| value.downcast_ref::<T>())
            .cloned()
    })
}

/// Innermost provided value of type `T`.
///
/// # Panics
///
/// Panics when no provider of `T` is in scope on this thread.
pub fn use_context<T: Clone + 'static>() -> T {
    try_use_context::<T>().unwrap_or_else(|| {
        panic!(
            "no provider for `{}` in scope; wrap the caller in `provide()`",
            type_name::<T>()
        )
    })
}
