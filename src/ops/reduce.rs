use super::derive;
use crate::observable::{Observable, Replay};

impl<T: Clone + 'static> Observable<T> {
  /// Creates a new observable holding a running accumulation of this one.
  ///
  /// The child's own value is the accumulator: each incoming value is folded
  /// into it with `step`, starting from `initial` while the child is absent.
  /// `initial` itself is never emitted.
  pub fn reduce<A, F>(&self, initial: A, step: F) -> Observable<A>
  where
    A: Clone + 'static,
    F: Fn(A, T) -> A + 'static,
  {
    self.reduce_with(Replay::Current, initial, step)
  }

  pub fn reduce_with<A, F>(&self, replay: Replay, initial: A, step: F) -> Observable<A>
  where
    A: Clone + 'static,
    F: Fn(A, T) -> A + 'static,
  {
    derive(self, replay, move |child, value| {
      let acc = child.value().unwrap_or_else(|| initial.clone());
      child.set_value(step(acc, value));
    })
  }
}

#[cfg(test)]
mod test {
  use std::{cell::RefCell, rc::Rc};

  use crate::prelude::*;

  #[test]
  fn reduce() {
    let o = Observable::<&str>::default();
    let joined = o.reduce(String::new(), |acc, v| acc + v);
    let seen = Rc::new(RefCell::new(vec![]));
    let c_seen = seen.clone();
    joined.bind(move |v| c_seen.borrow_mut().push(v));
    assert!(seen.borrow().is_empty());

    o.set_value("f");
    o.set_value("o");
    o.set_value("o");
    assert_eq!(*seen.borrow(), vec!["f", "fo", "foo"]);
  }

  #[test]
  fn deep_reduce() {
    let o = Observable::<&str>::default();
    let counted = o
      .reduce(String::new(), |acc, v| acc + v)
      .reduce(0, |acc, s: String| acc + s.len());
    let seen = Rc::new(RefCell::new(vec![]));
    let c_seen = seen.clone();
    counted.bind(move |v| c_seen.borrow_mut().push(v));

    o.set_value("f");
    o.set_value("o");
    o.set_value("o");
    assert_eq!(*seen.borrow(), vec![1, 3, 6]);
  }

  #[test]
  fn replayed_value_seeds_the_accumulator() {
    let o = Observable::new(Some(5));
    let sum = o.reduce(100, |acc, v| acc + v);
    assert_eq!(sum.value(), Some(105));
    o.set_value(1);
    assert_eq!(sum.value(), Some(106));
  }
}
