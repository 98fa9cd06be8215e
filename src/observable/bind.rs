use std::{
  fmt::{Debug, Formatter},
  rc::Rc,
};

use tracing::debug;

use super::Observable;
use crate::{
  scheduler::{Dispatcher, MainContext},
  subscription::{PausableReceipt, Receipt},
};

/// Whether a new binding receives the current value straight away.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Replay {
  /// Deliver the current value, if any, before `bind` returns.
  #[default]
  Current,
  /// Wait for the next write.
  Skip,
}

/// Options of [`Observable::bind_with`].
///
/// ```rust
/// use futures::executor::LocalPool;
/// use rxbinding::prelude::*;
///
/// let pool = LocalPool::new();
/// let options = BindOptions::default()
///   .replay(Replay::Skip)
///   .on(pool.spawner());
/// # let _ = options;
/// ```
#[derive(Clone, Default)]
pub struct BindOptions {
  pub(crate) replay: Replay,
  pub(crate) dispatch: Option<Rc<dyn Dispatcher>>,
}

impl BindOptions {
  pub fn replay(mut self, replay: Replay) -> Self {
    self.replay = replay;
    self
  }

  /// Run the callback through `dispatcher` for every write.
  pub fn on(self, dispatcher: impl Dispatcher + 'static) -> Self { self.on_shared(Rc::new(dispatcher)) }

  pub fn on_shared(mut self, dispatcher: Rc<dyn Dispatcher>) -> Self {
    self.dispatch = Some(dispatcher);
    self
  }
}

impl From<Replay> for BindOptions {
  fn from(replay: Replay) -> Self { BindOptions::default().replay(replay) }
}

impl Debug for BindOptions {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("BindOptions")
      .field("replay", &self.replay)
      .field("dispatch", &self.dispatch.is_some())
      .finish()
  }
}

impl<T: Clone + 'static> Observable<T> {
  /// Bind `f` to this observable, replaying the current value if there is
  /// one.
  pub fn bind<F>(&self, f: F) -> Receipt
  where
    F: Fn(T) + 'static,
  {
    self.bind_with(BindOptions::default(), f)
  }

  /// Bind `f` to this observable.
  ///
  /// With a dispatcher, each write hands the call over to it, unless the
  /// dispatcher reports the caller is already running on it. The replay of
  /// the current value is always synchronous on the caller.
  pub fn bind_with<F>(&self, options: BindOptions, f: F) -> Receipt
  where
    F: Fn(T) + 'static,
  {
    let BindOptions { replay, dispatch } = options;
    let f = Rc::new(f);
    let deliver = f.clone();
    let receipt = match dispatch {
      None => self.subscribe(move |_, value| deliver(value)),
      Some(dispatcher) => self.subscribe(move |_, value| {
        if dispatcher.is_current() {
          deliver(value);
        } else {
          let deliver = deliver.clone();
          dispatcher.dispatch(Box::new(move || deliver(value)));
        }
      }),
    };

    if replay == Replay::Current {
      if let Some(value) = self.value() {
        f(value);
      }
    }
    receipt
  }

  /// Bind `f` so that it runs on the thread's [`MainContext`].
  ///
  /// Without an installed main context the binding behaves like
  /// [`Observable::bind`].
  pub fn bind_ui<F>(&self, f: F) -> Receipt
  where
    F: Fn(T) + 'static,
  {
    let options = match MainContext::current() {
      Some(main) => BindOptions::default().on_shared(main),
      None => {
        debug!("no main context installed, binding synchronously");
        BindOptions::default()
      }
    };
    self.bind_with(options, f)
  }

  /// [`Observable::bind`], returning a receipt that can also pause and
  /// unpause this observable.
  pub fn pausable_bind<F>(&self, f: F) -> PausableReceipt
  where
    F: Fn(T) + 'static,
  {
    self.pausable_bind_with(BindOptions::default(), f)
  }

  pub fn pausable_bind_with<F>(&self, options: BindOptions, f: F) -> PausableReceipt
  where
    F: Fn(T) + 'static,
  {
    PausableReceipt::new(self, self.bind_with(options, f))
  }

  /// [`Observable::subscribe`], returning a pausable receipt.
  pub fn pausable_subscribe<F>(&self, observer: F) -> PausableReceipt
  where
    F: Fn(&Observable<T>, T) + 'static,
  {
    PausableReceipt::new(self, self.subscribe(observer))
  }
}
