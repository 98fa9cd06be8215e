use std::{cell::Cell, rc::Rc};

use super::{Receipt, ReceiptBag, Subscription};
use crate::observable::Observable;

/// A receipt bundled with the pause controls of the observable that issued
/// it.
///
/// Pausing is scoped to the observable, not to this one binding: pausing
/// suspends every observer of the owning observable, and unpausing replays
/// its current value to all of them.
///
/// Clones share their disposal state, so [`PausableReceipt::dispose`] unbinds
/// at most once no matter how many clones call it.
#[derive(Clone)]
pub struct PausableReceipt {
  receipt: Receipt,
  unbind: Rc<dyn Fn(Receipt)>,
  pause: Rc<dyn Fn()>,
  unpause: Rc<dyn Fn()>,
  disposed: Rc<Cell<bool>>,
}

impl PausableReceipt {
  pub(crate) fn new<T: Clone + 'static>(source: &Observable<T>, receipt: Receipt) -> Self {
    let unbind = source.clone();
    let pause = source.clone();
    let unpause = source.clone();
    PausableReceipt {
      receipt,
      unbind: Rc::new(move |r| unbind.unbind(r)),
      pause: Rc::new(move || pause.pause()),
      unpause: Rc::new(move || unpause.unpause()),
      disposed: Rc::new(Cell::new(false)),
    }
  }

  #[inline]
  pub fn receipt(&self) -> Receipt { self.receipt }

  pub fn pause(&self) { (self.pause)() }

  pub fn unpause(&self) { (self.unpause)() }

  /// Unbind the receipt. Only the first call has any effect.
  pub fn dispose(&self) {
    if !self.disposed.replace(true) {
      (self.unbind)(self.receipt);
    }
  }

  pub fn is_disposed(&self) -> bool { self.disposed.get() }

  /// Hand this receipt over to `bag`.
  pub fn add_to(self, bag: &ReceiptBag) { bag.add(self); }
}

impl Subscription for PausableReceipt {
  fn unsubscribe(self) { self.dispose() }

  fn is_closed(&self) -> bool { self.is_disposed() }
}

#[cfg(test)]
mod test {
  use std::cell::RefCell;

  use tracing_test::traced_test;

  use super::*;
  use crate::observable::Replay;

  #[test]
  fn pause_and_unpause_forward_to_the_observable() {
    let o = Observable::new(Some(1));
    let seen = Rc::new(RefCell::new(vec![]));
    let c_seen = seen.clone();
    let receipt = o.pausable_bind_with(Replay::Skip.into(), move |v| c_seen.borrow_mut().push(v));

    receipt.pause();
    assert!(o.is_paused());
    o.set_value(2);
    assert!(seen.borrow().is_empty());

    receipt.unpause();
    assert!(!o.is_paused());
    assert_eq!(*seen.borrow(), vec![2]);
  }

  #[test]
  #[traced_test]
  fn dispose_unbinds_exactly_once() {
    let o = Observable::<i32>::default();
    let receipt = o.pausable_bind(|_| {});
    let twin = receipt.clone();
    assert_eq!(o.subscriber_count(), 1);

    receipt.dispose();
    twin.dispose();
    assert_eq!(o.subscriber_count(), 0);
    assert!(twin.is_closed());
    assert!(!logs_contain("invalid receipt"));
  }

  #[test]
  fn pausable_subscribe_passes_the_observable() {
    let o = Observable::<i32>::default();
    let hits = Rc::new(Cell::new(0));
    let c_hits = hits.clone();
    let receipt = o.pausable_subscribe(move |_, v| c_hits.set(c_hits.get() + v));

    o.set_value(2);
    receipt.unsubscribe();
    o.set_value(3);
    assert_eq!(hits.get(), 2);
  }
}
