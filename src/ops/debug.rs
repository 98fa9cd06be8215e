use std::fmt::Debug;

use tracing::debug;

use crate::observable::Observable;

impl<T: Clone + Debug + 'static> Observable<T> {
  /// Creates a new observable that passes every value through unchanged and
  /// logs it at `debug` level under `label`.
  pub fn debug(&self, label: impl Into<String>) -> Observable<T> {
    let label = label.into();
    self.map(move |value| {
      debug!(label = %label, ?value, "observable value");
      value
    })
  }
}

#[cfg(test)]
mod test {
  use tracing_test::traced_test;

  use crate::prelude::*;

  #[test]
  #[traced_test]
  fn logs_each_value() {
    let o = Observable::new(Some(7));
    let d = o.debug("speed");
    o.set_value(8);

    assert_eq!(d.value(), Some(8));
    assert!(logs_contain("speed"));
    assert!(logs_contain("value=7"));
    assert!(logs_contain("value=8"));
  }
}
