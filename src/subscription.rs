//! Receipts, subscription handles and their containers.
//!
//! A [`Receipt`] is the token handed out by every bind call. It carries no
//! payload; two receipts are equal only when they came from the same bind.

use std::{
  fmt::{Display, Formatter},
  sync::atomic::{AtomicU64, Ordering},
};

mod bag;
mod pausable;
mod receipt_map;

pub use bag::ReceiptBag;
pub use pausable::PausableReceipt;
pub use receipt_map::ReceiptMap;

static NEXT_RECEIPT: AtomicU64 = AtomicU64::new(1);

/// Unique identity of one subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Receipt(u64);

impl Receipt {
  /// Mint a receipt that has never been handed out before.
  pub(crate) fn mint() -> Self { Receipt(NEXT_RECEIPT.fetch_add(1, Ordering::Relaxed)) }

  #[inline]
  pub fn id(&self) -> u64 { self.0 }
}

impl Display for Receipt {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result { write!(f, "receipt#{}", self.0) }
}

/// A handle able to cancel the subscription it stands for.
pub trait Subscription {
  /// Stop delivery. Cancelling an already cancelled subscription is a no-op.
  fn unsubscribe(self);

  fn is_closed(&self) -> bool;

  /// Activates "RAII" behavior for this subscription. That means
  /// `unsubscribe()` will be called automatically as soon as the returned
  /// value goes out of scope.
  ///
  /// **Attention:** If you don't assign the return value to a variable,
  /// `unsubscribe()` is called immediately, which is probably not what you
  /// want!
  fn unsubscribe_when_dropped(self) -> SubscriptionGuard<Self>
  where
    Self: Sized,
  {
    SubscriptionGuard::new(self)
  }
}

/// An RAII implementation of a "scoped subscribed" of a subscription.
/// When this structure is dropped (falls out of scope), the subscription will
/// be unsubscribed.
///
/// If you want to drop it immediately, wrap it in its own scope
#[derive(Debug)]
#[must_use]
pub struct SubscriptionGuard<T: Subscription>(Option<T>);

impl<T: Subscription> SubscriptionGuard<T> {
  /// Wraps an existing subscription with a guard to enable RAII behavior for
  /// it.
  pub fn new(subscription: T) -> SubscriptionGuard<T> { SubscriptionGuard(Some(subscription)) }

  /// Give up the guard without unsubscribing.
  pub fn into_inner(mut self) -> T {
    self
      .0
      .take()
      .expect("guard already released")
  }
}

impl<T: Subscription> Drop for SubscriptionGuard<T> {
  #[inline]
  fn drop(&mut self) {
    if let Some(subscription) = self.0.take() {
      subscription.unsubscribe();
    }
  }
}

#[cfg(test)]
mod test {
  use std::{cell::Cell, rc::Rc};

  use super::*;

  struct Flag(Rc<Cell<bool>>);

  impl Subscription for Flag {
    fn unsubscribe(self) { self.0.set(true) }

    fn is_closed(&self) -> bool { self.0.get() }
  }

  #[test]
  fn receipts_are_unique() {
    let a = Receipt::mint();
    let b = Receipt::mint();
    assert_ne!(a, b);
    assert_eq!(a, a);
    assert!(a.to_string().starts_with("receipt#"));
  }

  #[test]
  fn guard_unsubscribes_on_drop() {
    let closed = Rc::new(Cell::new(false));
    {
      let _guard = Flag(closed.clone()).unsubscribe_when_dropped();
      assert!(!closed.get());
    }
    assert!(closed.get());
  }

  #[test]
  fn released_guard_keeps_subscription() {
    let closed = Rc::new(Cell::new(false));
    let guard = Flag(closed.clone()).unsubscribe_when_dropped();
    let flag = guard.into_inner();
    assert!(!closed.get());
    assert!(!flag.is_closed());
  }
}
