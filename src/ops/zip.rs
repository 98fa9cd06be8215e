//! Joining several observables into one observable of their latest values.
//!
//! A zip emits whenever any of its sources does, with every slot holding the
//! latest value of its source, or `None` while that source has never been
//! written.

use crate::observable::{Observable, Replay};

/// Zip two observables.
///
/// The zip owns both sources, so it keeps delivering after the caller drops
/// its own handles to them.
///
/// ```rust
/// use rxbinding::prelude::*;
///
/// let a = Observable::new(Some("a"));
/// let b = Observable::<i32>::default();
/// let ab = zip(&a, &b);
/// assert_eq!(ab.value(), Some((Some("a"), None)));
///
/// b.set_value(42);
/// assert_eq!(ab.value(), Some((Some("a"), Some(42))));
/// ```
pub fn zip<A, B>(a: &Observable<A>, b: &Observable<B>) -> Observable<(Option<A>, Option<B>)>
where
  A: Clone + 'static,
  B: Clone + 'static,
{
  let zipped = Observable::default();

  let (weak_zip, weak_b) = (zipped.downgrade(), b.downgrade());
  let relay_a = a.bind_with(Replay::Skip.into(), move |a| {
    if let Some(zipped) = weak_zip.upgrade() {
      let b = weak_b.upgrade().and_then(|b| b.value());
      zipped.set_value((Some(a), b));
    }
  });

  let (weak_zip, weak_a) = (zipped.downgrade(), a.downgrade());
  let relay_b = b.bind_with(Replay::Skip.into(), move |b| {
    if let Some(zipped) = weak_zip.upgrade() {
      let a = weak_a.upgrade().and_then(|a| a.value());
      zipped.set_value((a, Some(b)));
    }
  });

  zipped.retain_upstream(a, relay_a);
  zipped.retain_upstream(b, relay_b);
  // Seeded through a regular write, so later binds replay it.
  zipped.set_value((a.value(), b.value()));
  zipped
}

/// Zip three observables.
pub fn zip3<A, B, C>(
  a: &Observable<A>, b: &Observable<B>, c: &Observable<C>,
) -> Observable<(Option<A>, Option<B>, Option<C>)>
where
  A: Clone + 'static,
  B: Clone + 'static,
  C: Clone + 'static,
{
  zip(&zip(a, b), c).map(|(ab, c)| {
    let (a, b) = ab.unwrap_or((None, None));
    (a, b, c)
  })
}

/// Zip four observables.
pub fn zip4<A, B, C, D>(
  a: &Observable<A>, b: &Observable<B>, c: &Observable<C>, d: &Observable<D>,
) -> Observable<(Option<A>, Option<B>, Option<C>, Option<D>)>
where
  A: Clone + 'static,
  B: Clone + 'static,
  C: Clone + 'static,
  D: Clone + 'static,
{
  zip(&zip3(a, b, c), d).map(|(abc, d)| {
    let (a, b, c) = abc.unwrap_or((None, None, None));
    (a, b, c, d)
  })
}

/// Zip five observables.
#[allow(clippy::type_complexity)]
pub fn zip5<A, B, C, D, E>(
  a: &Observable<A>, b: &Observable<B>, c: &Observable<C>, d: &Observable<D>, e: &Observable<E>,
) -> Observable<(Option<A>, Option<B>, Option<C>, Option<D>, Option<E>)>
where
  A: Clone + 'static,
  B: Clone + 'static,
  C: Clone + 'static,
  D: Clone + 'static,
  E: Clone + 'static,
{
  zip(&zip4(a, b, c, d), e).map(|(abcd, e)| {
    let (a, b, c, d) = abcd.unwrap_or((None, None, None, None));
    (a, b, c, d, e)
  })
}
