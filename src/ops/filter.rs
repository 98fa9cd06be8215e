use super::derive;
use crate::observable::{Observable, Replay};

impl<T: Clone + 'static> Observable<T> {
  /// Creates a new observable that only receives the values for which `f`
  /// returns `true`. Rejected values leave the child untouched.
  pub fn filter<F>(&self, f: F) -> Observable<T>
  where
    F: Fn(&T) -> bool + 'static,
  {
    self.filter_with(Replay::Current, f)
  }

  pub fn filter_with<F>(&self, replay: Replay, f: F) -> Observable<T>
  where
    F: Fn(&T) -> bool + 'static,
  {
    derive(self, replay, move |child, value| {
      if f(&value) {
        child.set_value(value);
      }
    })
  }
}
