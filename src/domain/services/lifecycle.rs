//! Teardown bookkeeping for a page binding.
//!
//! One cancellation token stops the refresh schedule, and detach hooks undo
//! whatever event listeners were attached. A hook registered after `stop()`
//! runs on the spot, so a start deferred to `DOMContentLoaded` cannot leave a
//! live handler behind.

use std::cell::RefCell;

use tokio_util::sync::CancellationToken;

type DetachHook = Box<dyn FnOnce()>;

#[derive(Default)]
pub struct Lifecycle {
    cancel: CancellationToken,
    detach: RefCell<Vec<DetachHook>>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn is_stopped(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Register a hook to run on `stop()`, or now if already stopped
    pub fn on_stop(&self, hook: impl FnOnce() + 'static) {
        if self.is_stopped() {
            hook();
            return;
        }
        self.detach.borrow_mut().push(Box::new(hook));
    }

    /// Run `start` unless stopped. Returns whether it ran.
    pub fn start_if_active(&self, start: impl FnOnce()) -> bool {
        if self.is_stopped() {
            return false;
        }
        start();
        true
    }

    pub fn stop(&self) {
        self.cancel.cancel();
        // Hooks run outside the borrow; they may drop closures that hold `self`
        let hooks: Vec<DetachHook> = self.detach.borrow_mut().drain(..).collect();
        for hook in hooks {
            hook();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counter() -> (Rc<Cell<usize>>, impl Fn() -> Box<dyn FnOnce()>) {
        let count = Rc::new(Cell::new(0));
        let make = {
            let count = count.clone();
            move || -> Box<dyn FnOnce()> {
                let count = count.clone();
                Box::new(move || count.set(count.get() + 1))
            }
        };
        (count, make)
    }

    #[test]
    fn test_stop_runs_each_hook_once() {
        let lifecycle = Lifecycle::new();
        let (detached, hook) = counter();
        lifecycle.on_stop(hook());
        lifecycle.on_stop(hook());

        lifecycle.stop();
        lifecycle.stop();

        assert_eq!(detached.get(), 2);
        assert!(lifecycle.is_stopped());
        assert!(lifecycle.cancel_token().is_cancelled());
    }

    #[test]
    fn test_deferred_start_after_stop_attaches_nothing() {
        let lifecycle = Lifecycle::new();
        lifecycle.stop();

        let started = Cell::new(false);
        assert!(!lifecycle.start_if_active(|| started.set(true)));
        assert!(!started.get());

        // A listener attached anyway is detached immediately
        let (detached, hook) = counter();
        lifecycle.on_stop(hook());
        assert_eq!(detached.get(), 1);
    }

    #[test]
    fn test_start_runs_while_active() {
        let lifecycle = Lifecycle::new();
        let started = Cell::new(false);
        assert!(lifecycle.start_if_active(|| started.set(true)));
        assert!(started.get());
        assert!(!lifecycle.is_stopped());
    }
}
