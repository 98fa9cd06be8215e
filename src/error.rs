use thiserror::Error;

use crate::subscription::Receipt;

/// Misuse reported by the checked operations of an observable.
///
/// None of these are fatal: the unchecked counterparts log them and carry on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BindingError {
  /// The receipt was never issued by this observable, or it was already
  /// unbound.
  #[error("attempted to unbind with an invalid receipt ({0})")]
  UnknownReceipt(Receipt),
}
