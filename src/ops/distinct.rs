use super::derive;
use crate::observable::{Observable, Replay};

impl<T: Clone + PartialEq + 'static> Observable<T> {
  /// Creates a new observable that only receives values that differ from its
  /// own current value. The first value always passes.
  pub fn distinct(&self) -> Observable<T> { self.distinct_with(Replay::Current) }

  pub fn distinct_with(&self, replay: Replay) -> Observable<T> {
    derive(self, replay, |child, value| {
      let changed = child.with(|current| current != Some(&value));
      if changed {
        child.set_value(value);
      }
    })
  }
}

#[cfg(test)]
mod test {
  use std::{cell::RefCell, rc::Rc};

  use crate::prelude::*;

  #[test]
  fn distinct() {
    let o = Observable::<&str>::default();
    let d = o.distinct();
    let seen = Rc::new(RefCell::new(vec![]));
    let c_seen = seen.clone();
    d.bind(move |v| c_seen.borrow_mut().push(v));

    o.set_value("foo");
    o.set_value("foo");
    o.set_value("bar");
    assert_eq!(*seen.borrow(), vec!["foo", "bar"]);
  }

  #[test]
  fn repeat_after_change_passes() {
    let o = Observable::new(Some(1));
    let d = o.distinct();
    let seen = Rc::new(RefCell::new(vec![]));
    let c_seen = seen.clone();
    d.bind(move |v| c_seen.borrow_mut().push(v));

    o.set_value(1);
    o.set_value(2);
    o.set_value(1);
    assert_eq!(*seen.borrow(), vec![1, 2, 1]);
  }
}
