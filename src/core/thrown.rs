use std::any::Any;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::marker::PhantomData;
use std::panic::resume_unwind;

use thiserror::Error;

/// Default error-type hint of [`Thrown`]: nothing is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unknown {}

/// A value that was thrown (a panic payload) or reported as the error of
/// fallible work, captured by one of the guards.
///
/// The payload is kept exactly as it was produced. `H` is a hint about
/// the type the caller expects to find inside; it is only used for typing
/// and never influences what gets captured. Use [`Thrown::downcast_ref`]
/// to look at the actual payload regardless of the hint.
#[derive(Error)]
#[error("{}", describe(.payload))]
pub struct Thrown<H = Unknown> {
    payload: Box<dyn Any + Send>,
    hint: PhantomData<fn() -> H>,
}

impl<H> Thrown<H> {
    /// Captures `payload` as thrown.
    ///
    /// A payload that was already captured, a `Box<dyn Any + Send>` or a
    /// `Thrown` with the same hint or with [`Unknown`], is taken over as it
    /// is instead of being wrapped a second time.
    pub fn new<P>(payload: P) -> Self
    where
        P: Any + Send,
        H: 'static,
    {
        Self {
            payload: unwrap_payload::<H>(Box::new(payload)),
            hint: PhantomData,
        }
    }

    /// Wraps a payload as returned by `catch_unwind` without boxing it again.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        Self {
            payload: unwrap_payload::<Unknown>(payload),
            hint: PhantomData,
        }
    }

    pub fn is<X>(&self) -> bool
    where
        X: Any,
    {
        (*self.payload).is::<X>()
    }

    pub fn downcast_ref<X>(&self) -> Option<&X>
    where
        X: Any,
    {
        (*self.payload).downcast_ref::<X>()
    }

    pub fn downcast<X>(self) -> Result<X, Self>
    where
        X: Any,
    {
        match self.payload.downcast::<X>() {
            Ok(x) => Ok(*x),
            Err(payload) => Err(Self::from_panic(payload)),
        }
    }

    /// The payload as the hinted type, if that is what was thrown.
    pub fn hinted(&self) -> Option<&H>
    where
        H: Any,
    {
        self.downcast_ref::<H>()
    }

    /// Text of a `&str` or `String` payload, as produced by `panic!`.
    pub fn message(&self) -> Option<&str> {
        message(&self.payload)
    }

    pub fn rehint<H2>(self) -> Thrown<H2> {
        Thrown::from_panic(self.payload)
    }

    pub fn into_payload(self) -> Box<dyn Any + Send> {
        self.payload
    }

    /// Throws the payload again on the current thread.
    pub fn resume(self) -> ! {
        resume_unwind(self.payload)
    }
}

impl<H> Debug for Thrown<H> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Thrown")
            .field("payload", &describe(&self.payload))
            .finish()
    }
}

fn unwrap_payload<H>(mut payload: Box<dyn Any + Send>) -> Box<dyn Any + Send>
where
    H: 'static,
{
    loop {
        payload = match payload.downcast::<Box<dyn Any + Send>>() {
            Ok(inner) => *inner,
            Err(payload) => match payload.downcast::<Thrown<H>>() {
                Ok(thrown) => (*thrown).into_payload(),
                Err(payload) => match payload.downcast::<Thrown>() {
                    Ok(thrown) => (*thrown).into_payload(),
                    Err(payload) => return payload,
                },
            },
        };
    }
}

#[allow(clippy::borrowed_box)]
fn message(payload: &Box<dyn Any + Send>) -> Option<&str> {
    if let Some(s) = (**payload).downcast_ref::<&'static str>() {
        Some(*s)
    } else if let Some(s) = (**payload).downcast_ref::<String>() {
        Some(s.as_str())
    } else {
        None
    }
}

#[allow(clippy::borrowed_box)]
fn describe(payload: &Box<dyn Any + Send>) -> &str {
    message(payload).unwrap_or("opaque thrown value")
}
