//! The single-value observable container.
//!
//! # Design
//!
//! [`Observable<T>`] is a cloneable handle onto one shared core held in a
//! [`MutRc`]. The core owns three pieces of private state:
//!
//! - the value slot, `None` until the first write;
//! - the observer map, [`Receipt`] to callback;
//! - the keep-alive map, [`Receipt`] to an owned upstream link.
//!
//! Writing the value fans out synchronously to every observer. The core is
//! never borrowed while a callback runs, so callbacks may write back into any
//! observable (including this one), bind, or unbind. Such writes nest: the
//! inner fan-out completes before the outer one resumes.
//!
//! # Ownership
//!
//! Derived observables hold their parents, never the other way around. The
//! parent only holds a relay callback carrying a [`WeakObservable`] of the
//! child. The child records the relay's receipt together with a strong handle
//! to the parent in its keep-alive map. Dropping the last handle of the child
//! drops that entry, which unbinds the relay from the parent.

use std::{
  any::Any,
  fmt::{Debug, Formatter},
  rc::Rc,
};

use smallvec::SmallVec;
use tracing::{trace, warn};

use crate::{
  error::BindingError,
  rc::{MutRc, RcDeref, RcDerefMut, WeakMutRc},
  subscription::{Receipt, ReceiptMap, Subscription},
};

mod bind;

pub use bind::{BindOptions, Replay};

type Callback<T> = Rc<dyn Fn(&Observable<T>, T)>;

struct Core<T> {
  value: Option<T>,
  observers: ReceiptMap<Callback<T>>,
  keep_alive: ReceiptMap<Box<dyn Any>>,
  paused: bool,
  on_dispose: Option<Rc<dyn Fn()>>,
}

/// A value container that notifies its observers whenever it is written.
///
/// Cloning an `Observable` creates a new handle to the **same** core.
///
/// ```rust
/// use std::{cell::RefCell, rc::Rc};
///
/// use rxbinding::prelude::*;
///
/// let name = Observable::new(Some("foo".to_string()));
/// let seen = Rc::new(RefCell::new(vec![]));
/// let c_seen = seen.clone();
///
/// // The current value is replayed immediately.
/// let receipt = name.bind(move |v| c_seen.borrow_mut().push(v));
/// name.set_value("bar".to_string());
/// name.unbind(receipt);
/// name.set_value("baz".to_string());
///
/// assert_eq!(*seen.borrow(), vec!["foo", "bar"]);
/// ```
pub struct Observable<T> {
  core: MutRc<Core<T>>,
}

/// A non-owning handle to an [`Observable`].
pub struct WeakObservable<T> {
  core: WeakMutRc<Core<T>>,
}

impl<T> Clone for Observable<T> {
  fn clone(&self) -> Self { Self { core: self.core.clone() } }
}

impl<T> Clone for WeakObservable<T> {
  fn clone(&self) -> Self { Self { core: self.core.clone() } }
}

impl<T> Default for Observable<T> {
  fn default() -> Self { Self::new(None) }
}

impl<T> From<T> for Observable<T> {
  fn from(value: T) -> Self { Self::new(Some(value)) }
}

impl<T: Debug> Debug for Observable<T> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let core = self.core.rc_deref();
    f.debug_struct("Observable")
      .field("value", &core.value)
      .field("observers", &core.observers.len())
      .field("keep_alive", &core.keep_alive.len())
      .field("paused", &core.paused)
      .finish()
  }
}

impl<T> WeakObservable<T> {
  #[inline]
  pub fn upgrade(&self) -> Option<Observable<T>> {
    self
      .core
      .upgrade()
      .map(|core| Observable { core })
  }
}

impl<T> Observable<T> {
  /// Create an observable, optionally seeded with a value. Seeding does not
  /// notify anyone, since nobody can be bound yet.
  pub fn new(initial: Option<T>) -> Self {
    Self {
      core: MutRc::own(Core {
        value: initial,
        observers: ReceiptMap::new(),
        keep_alive: ReceiptMap::new(),
        paused: false,
        on_dispose: None,
      }),
    }
  }

  /// Like [`Observable::new`], with `on_dispose` called after every
  /// successful unbind.
  pub fn with_on_dispose(initial: Option<T>, on_dispose: impl Fn() + 'static) -> Self {
    let observable = Self::new(initial);
    observable.core.rc_deref_mut().on_dispose = Some(Rc::new(on_dispose));
    observable
  }

  #[inline]
  pub fn downgrade(&self) -> WeakObservable<T> { WeakObservable { core: self.core.downgrade() } }

  /// Whether both handles refer to the same core.
  #[inline]
  pub fn ptr_eq(&self, other: &Self) -> bool { self.core.ptr_eq(&other.core) }

  /// Access the current value by reference without cloning.
  ///
  /// # Panics
  ///
  /// Panics if `f` writes to this observable.
  pub fn with<R>(&self, f: impl FnOnce(Option<&T>) -> R) -> R { f(self.core.rc_deref().value.as_ref()) }

  pub fn has_value(&self) -> bool { self.core.rc_deref().value.is_some() }

  /// Reset the slot to absent. Observers are not notified.
  pub fn clear(&self) { let _old = self.core.rc_deref_mut().value.take(); }

  pub fn subscriber_count(&self) -> usize { self.core.rc_deref().observers.len() }

  pub fn is_paused(&self) -> bool { self.core.rc_deref().paused }

  /// Suspend delivery to every observer of this observable. Writes keep
  /// updating the value.
  pub fn pause(&self) {
    self.core.rc_deref_mut().paused = true;
    trace!("observable paused");
  }

  /// Register `observer` under a fresh receipt. Nothing is replayed; see
  /// [`Observable::bind`] for that.
  pub fn subscribe<F>(&self, observer: F) -> Receipt
  where
    F: Fn(&Observable<T>, T) + 'static,
  {
    let receipt = self
      .core
      .rc_deref_mut()
      .observers
      .add(Rc::new(observer));
    trace!(%receipt, "observer subscribed");
    receipt
  }

  /// Keep `holder` alive for as long as `receipt` is bound. The holder is
  /// never used, only owned; it is dropped by [`Observable::unbind`] or when
  /// this observable goes away.
  pub fn retain<H: Any>(&self, receipt: Receipt, holder: H) {
    let _replaced = self
      .core
      .rc_deref_mut()
      .keep_alive
      .insert(receipt, Box::new(holder));
  }

  /// Remove the observer and keep-alive entry recorded under `receipt`.
  ///
  /// Unknown or already removed receipts are reported with a warning and
  /// otherwise ignored, so teardown paths may race to dispose the same
  /// receipt.
  pub fn unbind(&self, receipt: Receipt) {
    if let Err(err) = self.try_unbind(receipt) {
      warn!(%receipt, "{err}");
    }
  }

  /// Checked form of [`Observable::unbind`].
  pub fn try_unbind(&self, receipt: Receipt) -> Result<(), BindingError> {
    // Removed entries are dropped only after the borrow ends: a keep-alive
    // link unbinds upstream when dropped.
    let (observer, holder, on_dispose) = {
      let mut core = self.core.rc_deref_mut();
      (core.observers.remove(receipt), core.keep_alive.remove(receipt), core.on_dispose.clone())
    };
    if observer.is_none() && holder.is_none() {
      return Err(BindingError::UnknownReceipt(receipt));
    }
    trace!(%receipt, "observer unbound");
    drop((observer, holder));
    if let Some(on_dispose) = on_dispose {
      on_dispose();
    }
    Ok(())
  }

  /// Whether `receipt` still names a live observer of this observable.
  pub fn is_bound(&self, receipt: Receipt) -> bool { self.core.rc_deref().observers.contains(receipt) }

  /// A handle that unbinds `receipt` from this observable when unsubscribed.
  /// Combine with [`Subscription::unsubscribe_when_dropped`] for
  /// dispose-on-drop.
  pub fn binding(&self, receipt: Receipt) -> Binding<T> { Binding { source: self.downgrade(), receipt } }

  /// Record that this observable is derived from `source` through the
  /// binding `relay`. `source` stays alive as long as this observable does.
  pub(crate) fn retain_upstream<S: 'static>(&self, source: &Observable<S>, relay: Receipt)
  where
    T: 'static,
  {
    self.retain(relay, Upstream { source: source.clone(), relay });
  }
}

impl<T: Clone> Observable<T> {
  /// A snapshot of the current value.
  pub fn value(&self) -> Option<T> { self.core.rc_deref().value.clone() }

  /// Store `value`, then notify every observer synchronously.
  pub fn set_value(&self, value: T) {
    // The old value may own a derived observable whose drop unbinds from us.
    let _old = std::mem::replace(&mut self.core.rc_deref_mut().value, Some(value.clone()));
    self.notify(value);
  }

  /// Notify every observer again with the current value, if there is one.
  pub fn fire(&self) {
    if let Some(value) = self.value() {
      self.notify(value);
    }
  }

  /// Resume delivery and replay the current value to every observer.
  /// Unpausing an observable that is not paused does nothing.
  pub fn unpause(&self) {
    let was_paused = std::mem::replace(&mut self.core.rc_deref_mut().paused, false);
    if was_paused {
      trace!("observable unpaused");
      self.fire();
    }
  }

  fn notify(&self, value: T) {
    let observers: SmallVec<[(Receipt, Callback<T>); 2]> = {
      let core = self.core.rc_deref();
      if core.paused {
        return;
      }
      core
        .observers
        .receipts()
        .zip(core.observers.iter().cloned())
        .collect()
    };

    let mut iter = observers.into_iter().peekable();
    while let Some((receipt, observer)) = iter.next() {
      {
        // An earlier observer may have paused this observable or unbound a
        // later one.
        let core = self.core.rc_deref();
        if core.paused {
          return;
        }
        if !core.observers.contains(receipt) {
          continue;
        }
      }
      if iter.peek().is_some() {
        observer(self, value.clone());
      } else {
        observer(self, value);
        break;
      }
    }
  }
}

/// Keep-alive entry of a derived observable: owns its source and unbinds the
/// relay from it when dropped.
struct Upstream<S> {
  source: Observable<S>,
  relay: Receipt,
}

impl<S> Drop for Upstream<S> {
  fn drop(&mut self) { let _ = self.source.try_unbind(self.relay); }
}

/// Subscription handle for one receipt of one observable.
///
/// The handle does not keep the observable alive.
pub struct Binding<T> {
  source: WeakObservable<T>,
  receipt: Receipt,
}

impl<T> Binding<T> {
  #[inline]
  pub fn receipt(&self) -> Receipt { self.receipt }
}

impl<T> Subscription for Binding<T> {
  fn unsubscribe(self) {
    if let Some(source) = self.source.upgrade() {
      source.unbind(self.receipt);
    }
  }

  fn is_closed(&self) -> bool {
    self
      .source
      .upgrade()
      .map_or(true, |source| !source.is_bound(self.receipt))
  }
}
