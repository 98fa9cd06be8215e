use super::derive;
use crate::observable::{Observable, Replay};

impl<T: Clone + 'static> Observable<T> {
  /// Creates a new observable from the values for which `f` returns `Some`.
  pub fn compact_map<U, F>(&self, f: F) -> Observable<U>
  where
    U: Clone + 'static,
    F: Fn(T) -> Option<U> + 'static,
  {
    self.compact_map_with(Replay::Current, f)
  }

  pub fn compact_map_with<U, F>(&self, replay: Replay, f: F) -> Observable<U>
  where
    U: Clone + 'static,
    F: Fn(T) -> Option<U> + 'static,
  {
    derive(self, replay, move |child, value| {
      if let Some(mapped) = f(value) {
        child.set_value(mapped);
      }
    })
  }
}

#[cfg(test)]
mod test {
  use std::{cell::RefCell, rc::Rc};

  use crate::prelude::*;

  #[test]
  fn compact_map() {
    let o = Observable::new(Some("1"));
    let parsed = o.compact_map(|s| s.parse::<i32>().ok());
    let seen = Rc::new(RefCell::new(vec![]));
    let c_seen = seen.clone();
    parsed.bind(move |v| c_seen.borrow_mut().push(v));
    assert_eq!(*seen.borrow(), vec![1]);

    o.set_value("two");
    o.set_value("3");
    assert_eq!(*seen.borrow(), vec![1, 3]);
    assert_eq!(parsed.value(), Some(3));
  }

  #[test]
  fn skip_replay() {
    let o = Observable::new(Some("1"));
    let parsed = o.compact_map_with(Replay::Skip, |s| s.parse::<i32>().ok());
    assert_eq!(parsed.value(), None);
    o.set_value("2");
    assert_eq!(parsed.value(), Some(2));
  }
}
