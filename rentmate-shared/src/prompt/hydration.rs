use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use futures::channel::oneshot;

/// One-shot signal resolved by the auth layer once the user record has
/// arrived. Clones share the same signal.
#[derive(Debug, Clone, Default)]
pub struct Hydration {
    inner: Rc<RefCell<HydrationInner>>,
}

#[derive(Debug, Default)]
struct HydrationInner {
    resolved: bool,
    waiters: Vec<oneshot::Sender<()>>,
}

impl Hydration {
    /// An unresolved signal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the user as loaded and wakes every waiter. Later calls do
    /// nothing.
    pub fn resolve(&self) {
        let waiters = {
            let mut inner = self.inner.borrow_mut();
            if inner.resolved {
                return;
            }
            inner.resolved = true;
            std::mem::take(&mut inner.waiters)
        };
        for waiter in waiters {
            let _ = waiter.send(());
        }
    }

    /// Whether [`Hydration::resolve`] has been called.
    pub fn is_resolved(&self) -> bool {
        self.inner.borrow().resolved
    }

    /// Resolves with `true` once the signal fires, or `false` if every
    /// handle to the signal was dropped first.
    pub fn wait(&self) -> impl Future<Output = bool> + 'static {
        let receiver = {
            let mut inner = self.inner.borrow_mut();
            if inner.resolved {
                None
            } else {
                let (sender, receiver) = oneshot::channel();
                inner.waiters.push(sender);
                Some(receiver)
            }
        };
        async move {
            match receiver {
                None => true,
                Some(receiver) => receiver.await.is_ok(),
            }
        }
    }
}
