/// Common shape of every two-branch outcome the guards can produce.
///
/// The guards capture work into a plain `Result` first and then hand the
/// branches to `from_ok` / `from_error`, so the same input shape can be
/// settled into a `Result`, a [`Guarded`] or any other implementor.
///
/// [`Guarded`]: crate::Guarded
pub trait Try {
    type Ok;
    type Error;

    fn into_result(self) -> Result<Self::Ok, Self::Error>;
    fn from_ok(v: Self::Ok) -> Self;
    fn from_error(v: Self::Error) -> Self;

    fn from_result(r: Result<Self::Ok, Self::Error>) -> Self
    where
        Self: Sized,
    {
        match r {
            Ok(v) => Self::from_ok(v),
            Err(v) => Self::from_error(v),
        }
    }
}

impl<T> Try for Option<T> {
    type Ok = T;
    type Error = ();

    fn into_result(self) -> Result<T, ()> {
        self.ok_or(())
    }

    fn from_ok(v: T) -> Self {
        Some(v)
    }

    fn from_error(_: ()) -> Self {
        None
    }
}

impl<T, E> Try for Result<T, E> {
    type Ok = T;
    type Error = E;

    fn into_result(self) -> Result<T, E> {
        self
    }

    fn from_ok(v: T) -> Self {
        Ok(v)
    }

    fn from_error(v: E) -> Self {
        Err(v)
    }

    fn from_result(r: Result<T, E>) -> Self {
        r
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_maps_none_to_unit_error() {
        assert_eq!(Err(()), None::<usize>.into_result());
        assert_eq!(Ok(3), Some(3usize).into_result());
        assert_eq!(None, Option::<usize>::from_result(Err(())));
    }

    #[test]
    fn test_result_is_identity() {
        let r: Result<usize, &str> = Try::from_result(Err("x"));

        assert_eq!(Err("x"), r.into_result());
        assert_eq!(Ok::<_, &str>(1), Result::from_ok(1));
    }
}
