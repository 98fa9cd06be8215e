use super::derive;
use crate::observable::{Observable, Replay};

impl<T: Clone + 'static> Observable<T> {
  /// Creates a new observable whose value is `f` applied to each value of
  /// this one.
  pub fn map<U, F>(&self, f: F) -> Observable<U>
  where
    U: Clone + 'static,
    F: Fn(T) -> U + 'static,
  {
    self.map_with(Replay::Current, f)
  }

  pub fn map_with<U, F>(&self, replay: Replay, f: F) -> Observable<U>
  where
    U: Clone + 'static,
    F: Fn(T) -> U + 'static,
  {
    derive(self, replay, move |child, value| child.set_value(f(value)))
  }
}

#[cfg(test)]
mod test {
  use std::{cell::RefCell, rc::Rc};

  use crate::prelude::*;

  #[derive(Clone, Debug, PartialEq)]
  enum Lookup {
    Three,
    BadMap,
  }

  #[test]
  fn map_types() {
    let o = Observable::<String>::default();
    let p = o.map(|s| s.len());
    let seen = Rc::new(RefCell::new(vec![]));
    let c_seen = seen.clone();
    p.bind(move |v| c_seen.borrow_mut().push(v));

    o.set_value("foo".into());
    o.set_value("quux".into());
    assert_eq!(*seen.borrow(), vec![3, 4]);
  }

  #[test]
  fn replays_into_the_child() {
    let o = Observable::new(Some(2));
    assert_eq!(o.map(|v| v * 10).value(), Some(20));
    assert_eq!(o.map_with(Replay::Skip, |v| v * 10).value(), None);
  }

  #[test]
  fn deep_map() {
    let o = Observable::<String>::default();
    let p = o
      .map(|s| s.len())
      .map(|n| n == 3)
      .map(|three| if three { Lookup::Three } else { Lookup::BadMap });

    let seen = Rc::new(RefCell::new(vec![]));
    let c_seen = seen.clone();
    let receipt = p.bind(move |v| c_seen.borrow_mut().push(v));

    o.set_value("boo".into());
    assert_eq!(*seen.borrow(), vec![Lookup::Three]);

    p.unbind(receipt);
    drop(p);
    // The whole chain is gone, only the root's own observers remain.
    assert_eq!(o.subscriber_count(), 0);
    o.set_value("bo".into());
    assert_eq!(*seen.borrow(), vec![Lookup::Three]);
  }

  #[test]
  fn deep_interrupted_map() {
    let o = Observable::<String>::default();
    let p = o.map(|s| s.len());
    let q = p.map(|n| n == 3);
    let v = q.map(|three| if three { Lookup::Three } else { Lookup::BadMap });

    let seen = Rc::new(RefCell::new(vec![]));
    let c_seen = seen.clone();
    v.bind(move |l| c_seen.borrow_mut().push(l));

    // Knocking out the middle of the chain leaves it functional.
    drop(p);
    drop(q);
    o.set_value("bee".into());
    assert_eq!(*seen.borrow(), vec![Lookup::Three]);
  }
}
