use super::Try;

/// Flat projection of an outcome: exactly one of `value` and `error` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Unwrapped<T, E> {
    pub value: Option<T>,
    pub error: Option<E>,
}

impl<T, E> Unwrapped<T, E> {
    pub fn is_ok(&self) -> bool {
        self.value.is_some()
    }
}

/// Projects any [`Try`] outcome into its `{ value, error }` form.
pub fn unwrap<R>(outcome: R) -> Unwrapped<R::Ok, R::Error>
where
    R: Try,
{
    match outcome.into_result() {
        Ok(value) => Unwrapped {
            value: Some(value),
            error: None,
        },
        Err(error) => Unwrapped {
            value: None,
            error: Some(error),
        },
    }
}
