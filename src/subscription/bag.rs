use tracing::trace;

use super::PausableReceipt;
use crate::{
  lifecycle::{LifecycleSource, Registration},
  rc::{MutRc, RcDeref, RcDerefMut},
};

/// A collection of [`PausableReceipt`]s that can be paused and unpaused as a
/// group.
///
/// A bag built with [`ReceiptBag::with_lifecycle`] pauses itself when the
/// application enters the background and unpauses when it becomes active
/// again. The registration holds the bag weakly and is dropped with it.
///
/// ```rust
/// use std::{cell::Cell, rc::Rc};
///
/// use rxbinding::prelude::*;
///
/// let center = LifecycleCenter::new();
/// let bag = ReceiptBag::with_lifecycle(&center);
/// let o = Observable::new(Some(1));
/// let hits = Rc::new(Cell::new(0));
/// let c_hits = hits.clone();
/// o.pausable_bind_with(Replay::Skip.into(), move |_| c_hits.set(c_hits.get() + 1))
///   .add_to(&bag);
///
/// center.post(LifecycleEvent::DidEnterBackground);
/// o.set_value(2);
/// assert_eq!(hits.get(), 0);
///
/// center.post(LifecycleEvent::DidBecomeActive);
/// assert_eq!(hits.get(), 1);
/// ```
#[derive(Default)]
pub struct ReceiptBag {
  receipts: MutRc<Vec<PausableReceipt>>,
  _registration: Option<Registration>,
}

impl ReceiptBag {
  /// A bag that is only paused and unpaused by hand.
  pub fn new() -> Self { Self::default() }

  /// A bag that also follows the lifecycle events of `source`.
  pub fn with_lifecycle<S: LifecycleSource + ?Sized>(source: &S) -> Self {
    let receipts = MutRc::own(Vec::new());
    let on_background = receipts.downgrade();
    let on_active = receipts.downgrade();
    let registration = source.register(
      Box::new(move || {
        if let Some(receipts) = on_background.upgrade() {
          pause_all(&receipts);
        }
      }),
      Box::new(move || {
        if let Some(receipts) = on_active.upgrade() {
          unpause_all(&receipts);
        }
      }),
    );
    ReceiptBag { receipts, _registration: Some(registration) }
  }

  pub fn add(&self, receipt: PausableReceipt) { self.receipts.rc_deref_mut().push(receipt); }

  /// Pause every member, in membership order.
  pub fn pause(&self) { pause_all(&self.receipts) }

  /// Unpause every member, in membership order.
  pub fn unpause(&self) { unpause_all(&self.receipts) }

  /// Dispose every member and empty the bag.
  pub fn dispose(&self) {
    let receipts = std::mem::take(&mut *self.receipts.rc_deref_mut());
    trace!(count = receipts.len(), "disposing receipt bag");
    for receipt in receipts {
      receipt.dispose();
    }
  }

  pub fn len(&self) -> usize { self.receipts.rc_deref().len() }

  pub fn is_empty(&self) -> bool { self.receipts.rc_deref().is_empty() }
}

// Members are snapshotted first: unpausing replays values, and the replayed
// callbacks may add to the bag.
fn pause_all(receipts: &MutRc<Vec<PausableReceipt>>) {
  let snapshot = receipts.rc_deref().clone();
  trace!(count = snapshot.len(), "pausing receipt bag");
  for receipt in &snapshot {
    receipt.pause();
  }
}

fn unpause_all(receipts: &MutRc<Vec<PausableReceipt>>) {
  let snapshot = receipts.rc_deref().clone();
  trace!(count = snapshot.len(), "unpausing receipt bag");
  for receipt in &snapshot {
    receipt.unpause();
  }
}
