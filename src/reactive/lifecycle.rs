//! Component lifecycle
//!
//! A `Scope` stands in for one mounted component instance: code registered
//! with `on_mount` runs exactly once, when the host calls `mount`.

use std::cell::{Cell, RefCell};

use crate::error::{Error, Result};

type MountHook = Box<dyn FnOnce() -> Result<()>>;

#[derive(Default)]
pub struct Scope {
    hooks: RefCell<Vec<MountHook>>,
    mounted: Cell<bool>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `f` to run on mount. If the scope is already mounted it runs now.
    pub fn on_mount(&self, f: impl FnOnce() -> Result<()> + 'static) -> Result<()> {
        if self.mounted.get() {
            return f();
        }
        self.hooks.borrow_mut().push(Box::new(f));
        Ok(())
    }

    /// Run every queued hook in registration order.
    ///
    /// A failing hook does not stop the others; the first error is returned.
    pub fn mount(&self) -> Result<()> {
        if self.mounted.replace(true) {
            return Err(Error::AlreadyMounted);
        }

        let hooks = std::mem::take(&mut *self.hooks.borrow_mut());
        log::debug!("Mounting scope ({} hooks)", hooks.len());

        let mut first_err = None;
        for hook in hooks {
            if let Err(e) = hook() {
                log::error!("Mount hook failed: {}", e);
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_hooks_run_once_in_order() {
        let scope = Scope::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        for i in 0..3 {
            let order = Rc::clone(&order);
            scope
                .on_mount(move || {
                    order.borrow_mut().push(i);
                    Ok(())
                })
                .unwrap();
        }
        assert!(order.borrow().is_empty());

        scope.mount().unwrap();
        assert_eq!(*order.borrow(), vec![0, 1, 2]);
        assert!(matches!(scope.mount(), Err(Error::AlreadyMounted)));
        assert_eq!(*order.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn test_failed_hook_reported_after_all_run() {
        let scope = Scope::new();
        let ran = Rc::new(Cell::new(false));
        scope
            .on_mount(|| Err(Error::UnknownWorker("ghost".into())))
            .unwrap();
        let flag = Rc::clone(&ran);
        scope
            .on_mount(move || {
                flag.set(true);
                Ok(())
            })
            .unwrap();

        assert!(matches!(scope.mount(), Err(Error::UnknownWorker(_))));
        assert!(ran.get());
        assert!(scope.is_mounted());
    }

    #[test]
    fn test_late_hook_runs_immediately() {
        let scope = Scope::new();
        scope.mount().unwrap();
        let ran = Rc::new(Cell::new(false));
        let flag = Rc::clone(&ran);
        scope
            .on_mount(move || {
                flag.set(true);
                Ok(())
            })
            .unwrap();
        assert!(ran.get());
    }
}
