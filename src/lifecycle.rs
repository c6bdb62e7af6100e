//! Lifetime management for rendered subtrees
//!
//! Long-lived resources (polling intervals, resize observers, window
//! listeners) are RAII handles: `gloo` listeners and timers, plus the
//! observer guards below. They are dropped from a `Cleanup` that runs at
//! most once. Two paths can trigger it:
//!
//! - the slide renderer disposing its `RenderScope` before replacing the
//!   tree (explicit, deterministic);
//! - a `MutationObserver` noticing the owning node left the document
//!   (covers subtrees the renderer does not own, e.g. modal content).
//!
//! Whichever comes first wins; the other becomes a no-op.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, MutationObserver, MutationObserverInit, Node, ResizeObserver};

// ============================================================================
// Run-once cleanup
// ============================================================================

type CleanupFn = Box<dyn FnOnce()>;

/// Shared handle to a cleanup action that runs at most once
#[derive(Clone)]
pub struct Cleanup(Rc<RefCell<Option<CleanupFn>>>);

impl Cleanup {
    pub fn new(f: impl FnOnce() + 'static) -> Self {
        Self(Rc::new(RefCell::new(Some(Box::new(f)))))
    }

    /// Run the action if it has not run yet; returns whether it ran
    pub fn run(&self) -> bool {
        let action = self.0.borrow_mut().take();
        match action {
            Some(f) => {
                f();
                true
            }
            None => false,
        }
    }

    pub fn is_done(&self) -> bool {
        self.0.borrow().is_none()
    }
}

/// Cleanups registered while one slide is mounted
#[derive(Default)]
pub struct RenderScope {
    cleanups: Vec<Cleanup>,
}

impl RenderScope {
    pub fn register(&mut self, cleanup: Cleanup) {
        // Drop handles that already ran through the removal watcher
        self.cleanups.retain(|c| !c.is_done());
        self.cleanups.push(cleanup);
    }

    /// Detach all pending cleanups; the caller runs them outside any borrow
    pub fn take(&mut self) -> Vec<Cleanup> {
        std::mem::take(&mut self.cleanups)
    }

    pub fn pending(&self) -> usize {
        self.cleanups.iter().filter(|c| !c.is_done()).count()
    }
}

/// Run every cleanup, returning how many actually ran
pub fn dispose_all(cleanups: Vec<Cleanup>) -> usize {
    cleanups.into_iter().filter(|c| c.run()).count()
}

// ============================================================================
// Observer guards
// ============================================================================

/// `ResizeObserver` over a set of elements, disconnected on drop
pub struct ResizeWatch {
    observer: ResizeObserver,
    _callback: Closure<dyn FnMut(JsValue, JsValue)>,
}

impl ResizeWatch {
    pub fn new<F>(targets: &[&Element], mut f: F) -> Result<Self, JsValue>
    where
        F: FnMut() + 'static,
    {
        let callback = Closure::wrap(
            Box::new(move |_entries: JsValue, _observer: JsValue| f()) as Box<dyn FnMut(JsValue, JsValue)>
        );
        let observer = ResizeObserver::new(callback.as_ref().unchecked_ref())?;
        for target in targets {
            observer.observe(target);
        }
        Ok(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for ResizeWatch {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

// ============================================================================
// Removal watcher
// ============================================================================

type WatcherParts = (MutationObserver, Closure<dyn FnMut(JsValue, MutationObserver)>);

/// Tie `f` to the presence of `node` in its document
///
/// The returned cleanup runs `f` and disconnects the watcher. It fires by
/// itself the first time a mutation shows `node` detached after it had been
/// seen attached; nodes that were never attached are not considered removed.
pub fn tie_to_node<F>(node: &Node, f: F) -> Result<Cleanup, JsValue>
where
    F: FnOnce() + 'static,
{
    let document = node
        .owner_document()
        .or_else(|| web_sys::window().and_then(|w| w.document()))
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let parts: Rc<RefCell<Option<WatcherParts>>> = Rc::new(RefCell::new(None));

    let cleanup = {
        let parts = parts.clone();
        Cleanup::new(move || {
            if let Some((observer, _callback)) = parts.borrow_mut().take() {
                observer.disconnect();
            }
            f();
        })
    };

    let seen_attached = Rc::new(Cell::new(node.is_connected()));
    let watched = node.clone();
    let on_mutation = cleanup.clone();
    let callback = Closure::wrap(Box::new(move |_records: JsValue, _observer: MutationObserver| {
        if watched.is_connected() {
            seen_attached.set(true);
        } else if seen_attached.get() {
            log::debug!("Rendered node left the document, releasing its resources");
            let cleanup = on_mutation.clone();
            cleanup.run();
        }
    }) as Box<dyn FnMut(JsValue, MutationObserver)>);

    let observer = MutationObserver::new(callback.as_ref().unchecked_ref())?;
    let init = MutationObserverInit::new();
    init.set_child_list(true);
    init.set_subtree(true);
    observer.observe_with_options(&document, &init)?;

    *parts.borrow_mut() = Some((observer, callback));
    Ok(cleanup)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleanup_runs_once() {
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        let cleanup = Cleanup::new(move || c.set(c.get() + 1));
        let other = cleanup.clone();

        assert!(!cleanup.is_done());
        assert!(cleanup.run());
        assert!(!other.run());
        assert!(other.is_done());
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_scope_disposes_pending_cleanups() {
        let count = Rc::new(Cell::new(0));
        let mut scope = RenderScope::default();

        let early = {
            let c = count.clone();
            Cleanup::new(move || c.set(c.get() + 1))
        };
        scope.register(early.clone());
        for _ in 0..3 {
            let c = count.clone();
            scope.register(Cleanup::new(move || c.set(c.get() + 10)));
        }

        // One resource released itself before the slide changed
        early.run();
        assert_eq!(scope.pending(), 3);

        let ran = dispose_all(scope.take());
        assert_eq!(ran, 3);
        assert_eq!(count.get(), 31);
        assert_eq!(scope.pending(), 0);
    }

    #[test]
    fn test_register_prunes_finished_handles() {
        let mut scope = RenderScope::default();
        let done = Cleanup::new(|| {});
        done.run();
        scope.register(done);
        scope.register(Cleanup::new(|| {}));
        assert_eq!(scope.take().len(), 1);
    }
}
