//! Execution contexts a binding may hand its callback over to.
//!
//! Everything here is single-threaded: a dispatcher queues work for the
//! executor that owns it, which runs on the thread that created it.

use std::{cell::Cell, rc::Rc};

use futures::{executor::LocalSpawner, task::LocalSpawnExt};
use once_cell::unsync::OnceCell;
use tracing::{trace, warn};

/// Runs a binding callback somewhere other than inside the write that
/// triggered it.
pub trait Dispatcher {
  /// Queue `task`. It must not run before this call returns.
  fn dispatch(&self, task: Box<dyn FnOnce()>);

  /// Whether the caller is already running on this context, in which case a
  /// binding calls straight through instead of dispatching.
  fn is_current(&self) -> bool { false }
}

impl<D: Dispatcher + ?Sized> Dispatcher for Rc<D> {
  #[inline]
  fn dispatch(&self, task: Box<dyn FnOnce()>) { (**self).dispatch(task) }

  #[inline]
  fn is_current(&self) -> bool { (**self).is_current() }
}

impl Dispatcher for LocalSpawner {
  fn dispatch(&self, task: Box<dyn FnOnce()>) {
    if let Err(err) = self.spawn_local(async move { task() }) {
      warn!(%err, "dropping binding callback, executor is shut down");
    }
  }
}

thread_local! {
  static MAIN_CONTEXT: OnceCell<Rc<MainContext>> = const { OnceCell::new() };
}

/// The default UI context: an executor that UI work runs on.
///
/// The context counts as current while it runs one of its own tasks, or
/// inside [`MainContext::enter`]. Writes made there call bound callbacks
/// synchronously; writes from anywhere else are queued onto the executor.
pub struct MainContext {
  spawner: LocalSpawner,
  depth: Rc<Cell<usize>>,
}

/// Marks the context as current until dropped.
struct Entered(Rc<Cell<usize>>);

impl Entered {
  fn new(depth: &Rc<Cell<usize>>) -> Self {
    depth.set(depth.get() + 1);
    Entered(depth.clone())
  }
}

impl Drop for Entered {
  fn drop(&mut self) { self.0.set(self.0.get() - 1) }
}

impl MainContext {
  pub fn new(spawner: LocalSpawner) -> Self { Self { spawner, depth: Rc::new(Cell::new(0)) } }

  /// Make this the context used by [`Observable::bind_ui`] on the current
  /// thread. A thread's main context can be installed only once; a second
  /// install hands the context back.
  ///
  /// [`Observable::bind_ui`]: crate::observable::Observable::bind_ui
  pub fn install(self) -> Result<(), MainContext> {
    MAIN_CONTEXT.with(|cell| {
      if cell.get().is_some() {
        return Err(self);
      }
      let _ = cell.set(Rc::new(self));
      trace!("main context installed");
      Ok(())
    })
  }

  /// The main context installed on the current thread, if any.
  pub fn current() -> Option<Rc<MainContext>> { MAIN_CONTEXT.with(|cell| cell.get().cloned()) }

  /// Run `f` as if it were a task of this context, e.g. from a UI event
  /// handler that the executor does not drive.
  pub fn enter<R>(&self, f: impl FnOnce() -> R) -> R {
    let _entered = Entered::new(&self.depth);
    f()
  }
}

impl Dispatcher for MainContext {
  fn dispatch(&self, task: Box<dyn FnOnce()>) {
    let depth = self.depth.clone();
    self.spawner.dispatch(Box::new(move || {
      let _entered = Entered::new(&depth);
      task()
    }))
  }

  fn is_current(&self) -> bool { self.depth.get() > 0 }
}
