//! Derived observables.
//!
//! Every operator here has the same shape: it creates a child observable,
//! binds a relay to the source that writes into the child, and records the
//! relay's receipt in the child's keep-alive map together with a strong
//! handle to the source. A chain therefore keeps working when intermediate
//! handles are dropped, as long as something holds the leaf.
//!
//! Each operator replays the source's current value by default; the
//! `*_with` forms take a [`Replay`] to opt out.

use crate::observable::{Observable, Replay};

pub mod compact_map;
pub mod debug;
pub mod distinct;
pub mod filter;
pub mod map;
pub mod reduce;
pub mod zip;

pub use zip::{zip, zip3, zip4, zip5};

/// Bind `relay` to `source` and hand it a child observable to write into.
///
/// The relay holds the child weakly; the child owns the source.
pub(crate) fn derive<T, U, F>(source: &Observable<T>, replay: Replay, relay: F) -> Observable<U>
where
  T: Clone + 'static,
  U: 'static,
  F: Fn(&Observable<U>, T) + 'static,
{
  let child = Observable::default();
  let weak = child.downgrade();
  let receipt = source.bind_with(replay.into(), move |value| {
    if let Some(child) = weak.upgrade() {
      relay(&child, value);
    }
  });
  child.retain_upstream(source, receipt);
  child
}

#[cfg(test)]
mod test {
  use std::{cell::RefCell, rc::Rc};

  use super::*;

  #[test]
  fn child_keeps_source_alive() {
    let source = Observable::new(Some(1));
    let weak = source.downgrade();
    let child = derive(&source, Replay::Current, |child: &Observable<i32>, v: i32| {
      child.set_value(v)
    });
    drop(source);

    assert!(weak.upgrade().is_some());
    assert_eq!(child.value(), Some(1));
  }

  #[test]
  fn dropping_child_unbinds_relay() {
    let source = Observable::new(Some(1));
    let child = derive(&source, Replay::Skip, |child: &Observable<i32>, v: i32| {
      child.set_value(v)
    });
    assert_eq!(source.subscriber_count(), 1);

    drop(child);
    assert_eq!(source.subscriber_count(), 0);
  }

  #[test]
  fn skip_leaves_child_absent() {
    let source = Observable::new(Some(1));
    let seen = Rc::new(RefCell::new(vec![]));
    let c_seen = seen.clone();
    let child = derive(&source, Replay::Skip, |child: &Observable<i32>, v: i32| {
      child.set_value(v)
    });
    child.bind(move |v| c_seen.borrow_mut().push(v));
    assert_eq!(child.value(), None);

    source.set_value(2);
    assert_eq!(*seen.borrow(), vec![2]);
  }
}
