use smallvec::SmallVec;

use super::Receipt;

/// A small map from [`Receipt`] to an item.
///
/// # Design
///
/// - **SmallVec Optimization**: Uses `SmallVec<[_; 2]>` to avoid heap
///   allocation for the common case of 0-2 entries; most observables have a
///   single binding.
/// - **Unordered**: Iteration order follows insertion, but callers must not
///   rely on it.
///
/// # Examples
///
/// ```rust
/// use rxbinding::subscription::ReceiptMap;
///
/// let mut map: ReceiptMap<&str> = ReceiptMap::default();
/// let r = map.add("first");
/// assert!(map.contains(r));
/// assert_eq!(map.remove(r), Some("first"));
/// assert!(map.is_empty());
/// ```
pub struct ReceiptMap<U> {
  items: SmallVec<[(Receipt, U); 2]>,
}

impl<U> Default for ReceiptMap<U> {
  fn default() -> Self { Self { items: SmallVec::new() } }
}

impl<U> ReceiptMap<U> {
  /// Create an empty map.
  #[inline]
  pub fn new() -> Self { Self::default() }

  /// Add an item under a freshly minted receipt.
  #[inline]
  pub fn add(&mut self, item: U) -> Receipt {
    let receipt = Receipt::mint();
    self.items.push((receipt, item));
    receipt
  }

  /// Insert an item under an existing receipt, replacing any previous entry.
  /// Returns the replaced item.
  pub fn insert(&mut self, receipt: Receipt, item: U) -> Option<U> {
    match self.items.iter_mut().find(|(r, _)| *r == receipt) {
      Some((_, slot)) => Some(std::mem::replace(slot, item)),
      None => {
        self.items.push((receipt, item));
        None
      }
    }
  }

  /// Remove an item by receipt.
  pub fn remove(&mut self, receipt: Receipt) -> Option<U> {
    self
      .items
      .iter()
      .position(|(r, _)| *r == receipt)
      .map(|pos| self.items.remove(pos).1)
  }

  #[inline]
  pub fn contains(&self, receipt: Receipt) -> bool { self.items.iter().any(|(r, _)| *r == receipt) }

  #[inline]
  pub fn get(&self, receipt: Receipt) -> Option<&U> {
    self
      .items
      .iter()
      .find(|(r, _)| *r == receipt)
      .map(|(_, item)| item)
  }

  #[inline]
  pub fn len(&self) -> usize { self.items.len() }

  #[inline]
  pub fn is_empty(&self) -> bool { self.items.is_empty() }

  #[inline]
  pub fn receipts(&self) -> impl Iterator<Item = Receipt> + '_ { self.items.iter().map(|(r, _)| *r) }

  #[inline]
  pub fn iter(&self) -> impl Iterator<Item = &U> { self.items.iter().map(|(_, item)| item) }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn add_remove() {
    let mut map = ReceiptMap::new();
    let r1 = map.add(1);
    let r2 = map.add(2);
    assert_eq!(map.len(), 2);
    assert_eq!(map.remove(r1), Some(1));
    assert_eq!(map.remove(r1), None);
    assert_eq!(map.get(r2), Some(&2));
    assert_eq!(map.receipts().collect::<Vec<_>>(), vec![r2]);
  }

  #[test]
  fn insert_replaces_existing_entry() {
    let mut map = ReceiptMap::new();
    let r = map.add("a");
    assert_eq!(map.insert(r, "b"), Some("a"));
    assert_eq!(map.len(), 1);

    let foreign = Receipt::mint();
    assert_eq!(map.insert(foreign, "c"), None);
    assert_eq!(map.len(), 2);
  }
}
