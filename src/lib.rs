//! # rxbinding: observable values for UI bindings
//!
//! Single-threaded value containers that notify their observers on every
//! write, with replaying binds, derived observables, zips and pausable
//! receipts.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::{cell::RefCell, rc::Rc};
//!
//! use rxbinding::prelude::*;
//!
//! let speed = Observable::new(Some(12.5_f64));
//! let label = speed
//!   .filter(|v| *v >= 0.0)
//!   .map(|v| format!("{v:.1} km/h"));
//!
//! let shown = Rc::new(RefCell::new(String::new()));
//! let c_shown = shown.clone();
//! let receipt = label.bind(move |text| *c_shown.borrow_mut() = text);
//! assert_eq!(*shown.borrow(), "12.5 km/h");
//!
//! speed.set_value(30.0);
//! assert_eq!(*shown.borrow(), "30.0 km/h");
//! label.unbind(receipt);
//! ```
//!
//! ## Key Concepts
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Observable`] | Shared value slot; writes fan out synchronously |
//! | [`Receipt`] | Identity of one binding, used to unbind it |
//! | [`PausableReceipt`] | Receipt that can also pause its observable |
//! | [`ReceiptBag`] | Pauses and unpauses a group of receipts, optionally on lifecycle events |
//! | [`Dispatcher`] | Where a binding's callback runs |
//!
//! ## Feature Flags
//!
//! None yet; the default feature set is empty.
//!
//! [`Observable`]: observable::Observable
//! [`Receipt`]: subscription::Receipt
//! [`PausableReceipt`]: subscription::PausableReceipt
//! [`ReceiptBag`]: subscription::ReceiptBag
//! [`Dispatcher`]: scheduler::Dispatcher

pub mod error;
pub mod lifecycle;
pub mod observable;
pub mod ops;
pub mod prelude;
pub mod rc;
pub mod scheduler;
pub mod subscription;

// Re-export the prelude module
pub use prelude::*;

// Bring README.md into Cargo-driven doctests.
#[cfg(doctest)]
mod __markdown_doctests {
  mod readme {
    #![doc = include_str!("../README.md")]
  }
}
