//! Application lifecycle signals.
//!
//! The observable core never looks at how an application goes to the
//! background. It only accepts a [`LifecycleSource`] that calls back on
//! "entered background" and "became active". [`LifecycleCenter`] is a plain
//! in-process source that whatever detects those transitions can post to.

use std::rc::Rc;

use smallvec::SmallVec;
use tracing::trace;

use crate::{
  rc::{MutRc, RcDeref, RcDerefMut},
  subscription::{Receipt, ReceiptMap},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
  DidEnterBackground,
  DidBecomeActive,
}

/// Anything that can tell interested parties about lifecycle transitions.
pub trait LifecycleSource {
  fn register(&self, on_background: Box<dyn Fn()>, on_active: Box<dyn Fn()>) -> Registration;
}

/// Deregistration handle returned by [`LifecycleSource::register`].
///
/// Dropping it deregisters.
#[must_use]
pub struct Registration {
  cancel: Option<Box<dyn FnOnce()>>,
}

impl Registration {
  pub fn new(cancel: impl FnOnce() + 'static) -> Self { Registration { cancel: Some(Box::new(cancel)) } }

  pub fn cancel(mut self) {
    if let Some(cancel) = self.cancel.take() {
      cancel();
    }
  }
}

impl Drop for Registration {
  fn drop(&mut self) {
    if let Some(cancel) = self.cancel.take() {
      cancel();
    }
  }
}

struct Handlers {
  on_background: Rc<dyn Fn()>,
  on_active: Rc<dyn Fn()>,
}

/// An in-process [`LifecycleSource`]. Clones post to the same set of
/// handlers.
#[derive(Clone, Default)]
pub struct LifecycleCenter {
  handlers: MutRc<ReceiptMap<Handlers>>,
}

impl LifecycleCenter {
  pub fn new() -> Self { Self::default() }

  /// Invoke every handler registered for `event`.
  pub fn post(&self, event: LifecycleEvent) {
    let handlers: SmallVec<[Rc<dyn Fn()>; 2]> = self
      .handlers
      .rc_deref()
      .iter()
      .map(|h| match event {
        LifecycleEvent::DidEnterBackground => h.on_background.clone(),
        LifecycleEvent::DidBecomeActive => h.on_active.clone(),
      })
      .collect();
    trace!(?event, handlers = handlers.len(), "posting lifecycle event");
    for handler in handlers {
      handler();
    }
  }

  pub fn handler_count(&self) -> usize { self.handlers.rc_deref().len() }
}

impl LifecycleSource for LifecycleCenter {
  fn register(&self, on_background: Box<dyn Fn()>, on_active: Box<dyn Fn()>) -> Registration {
    let receipt: Receipt = self.handlers.rc_deref_mut().add(Handlers {
      on_background: Rc::from(on_background),
      on_active: Rc::from(on_active),
    });
    let handlers = self.handlers.downgrade();
    Registration::new(move || {
      if let Some(handlers) = handlers.upgrade() {
        let _removed = handlers.rc_deref_mut().remove(receipt);
      }
    })
  }
}

#[cfg(test)]
mod test {
  use std::cell::RefCell;

  use super::*;

  #[test]
  fn post_reaches_matching_handler() {
    let center = LifecycleCenter::new();
    let log = Rc::new(RefCell::new(vec![]));
    let (bg, fg) = (log.clone(), log.clone());
    let _registration = center.register(
      Box::new(move || bg.borrow_mut().push("background")),
      Box::new(move || fg.borrow_mut().push("active")),
    );

    center.post(LifecycleEvent::DidEnterBackground);
    center.post(LifecycleEvent::DidBecomeActive);
    assert_eq!(*log.borrow(), vec!["background", "active"]);
  }

  #[test]
  fn dropping_registration_deregisters() {
    let center = LifecycleCenter::new();
    let registration = center.register(Box::new(|| {}), Box::new(|| {}));
    assert_eq!(center.handler_count(), 1);
    drop(registration);
    assert_eq!(center.handler_count(), 0);

    center
      .register(Box::new(|| {}), Box::new(|| {}))
      .cancel();
    assert_eq!(center.handler_count(), 0);
  }
}
