use std::iter::FusedIterator;

use crate::misc::Try;

/// Outcome of a guarded call that can be read by name or by position.
///
/// Exactly one of `data` and `error` is present. The named accessors
/// ([`data`], [`error`]) and the positional forms ([`as_tuple`],
/// [`into_tuple`], [`iter`]) all read the same two slots, in the order
/// `(data, error)`:
///
/// ```
/// use guardrail::{guarded_invoke, Slot};
///
/// let outcome = guarded_invoke(|| 21 * 2);
/// assert_eq!(Some(&42), outcome.data());
///
/// let (data, error) = outcome.as_tuple();
/// assert_eq!((Some(&42), true), (data, error.is_none()));
///
/// assert!(matches!(outcome.iter().next(), Some(Slot::Data(Some(&42)))));
/// ```
///
/// The value is read-only once built. With the `serde` feature it
/// serializes as a map holding only `data` and `error`.
///
/// [`data`]: Guarded::data
/// [`error`]: Guarded::error
/// [`as_tuple`]: Guarded::as_tuple
/// [`into_tuple`]: Guarded::into_tuple
/// [`iter`]: Guarded::iter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Guarded<T, E> {
    data: Option<T>,
    error: Option<E>,
}

impl<T, E> Guarded<T, E> {
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: E) -> Self {
        Self {
            data: None,
            error: Some(error),
        }
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&E> {
        self.error.as_ref()
    }

    pub fn is_ok(&self) -> bool {
        self.data.is_some()
    }

    pub fn is_err(&self) -> bool {
        self.error.is_some()
    }

    pub fn as_tuple(&self) -> (Option<&T>, Option<&E>) {
        (self.data.as_ref(), self.error.as_ref())
    }

    pub fn into_tuple(self) -> (Option<T>, Option<E>) {
        (self.data, self.error)
    }

    /// Positional view: yields the data slot, then the error slot, then
    /// nothing. Every call starts over from the first slot.
    pub fn iter(&self) -> Positions<'_, T, E> {
        Positions {
            guarded: self,
            index: 0,
        }
    }

    pub fn into_result(self) -> Result<T, E> {
        match (self.data, self.error) {
            (Some(data), _) => Ok(data),
            (None, Some(error)) => Err(error),
            (None, None) => unreachable!("guarded outcome without data and error"),
        }
    }
}

impl<T, E> From<Result<T, E>> for Guarded<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(error) => Self::failure(error),
        }
    }
}

impl<T, E> From<Guarded<T, E>> for Result<T, E> {
    fn from(guarded: Guarded<T, E>) -> Self {
        guarded.into_result()
    }
}

impl<T, E> From<Guarded<T, E>> for (Option<T>, Option<E>) {
    fn from(guarded: Guarded<T, E>) -> Self {
        guarded.into_tuple()
    }
}

impl<T, E> Try for Guarded<T, E> {
    type Ok = T;
    type Error = E;

    fn into_result(self) -> Result<T, E> {
        Guarded::into_result(self)
    }

    fn from_ok(v: T) -> Self {
        Self::success(v)
    }

    fn from_error(v: E) -> Self {
        Self::failure(v)
    }
}

impl<'a, T, E> IntoIterator for &'a Guarded<T, E> {
    type Item = Slot<'a, T, E>;
    type IntoIter = Positions<'a, T, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/* Slot */

/// One positional element of a [`Guarded`] outcome.
#[derive(Debug, PartialEq, Eq)]
pub enum Slot<'a, T, E> {
    Data(Option<&'a T>),
    Error(Option<&'a E>),
}

impl<'a, T, E> Clone for Slot<'a, T, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T, E> Copy for Slot<'a, T, E> {}

/* Positions */

pub struct Positions<'a, T, E> {
    guarded: &'a Guarded<T, E>,
    index: usize,
}

impl<'a, T, E> Clone for Positions<'a, T, E> {
    fn clone(&self) -> Self {
        Self {
            guarded: self.guarded,
            index: self.index,
        }
    }
}

impl<'a, T, E> Iterator for Positions<'a, T, E> {
    type Item = Slot<'a, T, E>;

    fn next(&mut self) -> Option<Self::Item> {
        let slot = match self.index {
            0 => Slot::Data(self.guarded.data()),
            1 => Slot::Error(self.guarded.error()),
            _ => return None,
        };

        self.index += 1;

        Some(slot)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = 2usize.saturating_sub(self.index);

        (len, Some(len))
    }
}

impl<'a, T, E> ExactSizeIterator for Positions<'a, T, E> {}

impl<'a, T, E> FusedIterator for Positions<'a, T, E> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exactly_one_side() {
        let a: Guarded<usize, &str> = Guarded::success(1);
        let b: Guarded<usize, &str> = Guarded::failure("x");

        assert!(a.is_ok() && !a.is_err());
        assert!(b.is_err() && !b.is_ok());
        assert_eq!((Some(&1), None), a.as_tuple());
        assert_eq!((None, Some(&"x")), b.as_tuple());
    }

    #[test]
    fn test_positions() {
        let g: Guarded<usize, &str> = Guarded::success(5);

        let mut it = g.iter();
        assert_eq!(2, it.len());
        assert_eq!(Some(Slot::Data(Some(&5))), it.next());
        assert_eq!(Some(Slot::Error(None)), it.next());
        assert_eq!(None, it.next());
        assert_eq!(None, it.next());
        assert_eq!(0, it.len());

        // restartable
        let slots: Vec<_> = (&g).into_iter().collect();
        assert_eq!(vec![Slot::Data(Some(&5)), Slot::Error(None)], slots);
        assert_eq!(2, g.iter().count());
    }

    #[test]
    fn test_positional_and_named_agree() {
        let g: Guarded<usize, &str> = Guarded::failure("bad");

        let (data, error): (Option<usize>, Option<&str>) = g.into();
        assert_eq!(g.data().copied(), data);
        assert_eq!(g.error().copied(), error);

        let slots: Vec<_> = g.iter().collect();
        assert_eq!(vec![Slot::Data(None), Slot::Error(Some(&"bad"))], slots);
    }

    #[test]
    fn test_result_conversion() {
        let g: Guarded<usize, &str> = Ok(3).into();
        assert_eq!(Ok(3), g.into_result());

        let g: Guarded<usize, &str> = Err("e").into();
        let r: Result<usize, &str> = g.into();
        assert_eq!(Err("e"), r);
    }

    #[test]
    fn test_try() {
        let g = <Guarded<usize, ()> as Try>::from_ok(2);

        assert_eq!(Ok(2), Try::into_result(g));
        assert_eq!(Guarded::failure(()), Guarded::<usize, ()>::from_error(()));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serialize_named_fields_only() {
        let g: Guarded<usize, String> = Guarded::success(1);

        assert_eq!(
            serde_json::json!({ "data": 1, "error": null }),
            serde_json::to_value(&g).unwrap()
        );
    }
}
