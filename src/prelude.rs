//! Prelude module for convenient imports
//!
//! This module re-exports commonly used types and traits for easy access.

// Lifecycle
pub use crate::lifecycle::{LifecycleCenter, LifecycleEvent, LifecycleSource, Registration};
// Zip family
pub use crate::ops::{zip, zip3, zip4, zip5};
// Dispatch
pub use crate::scheduler::{Dispatcher, MainContext};
// Subscription
pub use crate::subscription::*;
pub use crate::{
  error::BindingError,
  observable::{BindOptions, Binding, Observable, Replay, WeakObservable},
};
