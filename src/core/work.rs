use std::any::Any;
use std::future::Future;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::thread::Result as ThreadResult;

use futures::future::{ready, CatchUnwind, Either, FutureExt, Map, Ready};
use log::trace;

use super::{Thrown, Unknown};
use crate::misc::Try;

/// Future returned for asynchronous work: polls the wrapped future inside
/// `catch_unwind` and settles its output into `R`.
pub type Settled<Fut, R> =
    Map<CatchUnwind<AssertUnwindSafe<Fut>>, fn(ThreadResult<<Fut as Future>::Output>) -> R>;

/// Future returned for [`Lazy`] work: already settled if creating the
/// future panicked, otherwise [`Settled`].
pub type Resolving<Fut, R> = Either<Ready<R>, Settled<Fut, R>>;

/// A unit of work the guards know how to run.
///
/// Every supported call shape implements this trait, and the caller picks
/// the shape when building the input:
///
/// - a closure `FnOnce() -> T` runs synchronously; panics are captured.
/// - [`Value`] wraps an already computed value.
/// - [`Fallible`] runs a closure returning a [`Try`] type (`Result`,
///   `Option`, ...); its error branch is captured like a panic.
/// - [`Pending`] awaits a future; panics while polling are captured.
/// - [`Rejectable`] awaits a future resolving to a [`Try`] type; its
///   error branch is captured as the rejection.
/// - [`Lazy`] calls a closure producing a future and awaits it.
///
/// A plain closure that returns a future is synchronous work: the future
/// itself becomes the success value and nothing it does later is
/// captured. Wrap such closures in [`Lazy`].
///
/// `H` is the error-type hint carried by the resulting [`Thrown`]. It has
/// no influence on what gets captured.
pub trait Work<H = Unknown>: Sized {
    /// Type of the value produced when the work succeeds.
    type Value;

    /// What [`run`](Work::run) returns: `R` itself for synchronous work,
    /// a future resolving to `R` for asynchronous work.
    type Output<R>;

    /// Future resolving to `R`, for callers that want an asynchronous
    /// result no matter the shape of the work.
    type Eventual<R>: Future<Output = R>;

    /// Runs the work and settles its outcome into `R`.
    ///
    /// Nothing thrown or rejected by the work escapes this call.
    fn run<R>(self) -> Self::Output<R>
    where
        R: Try<Ok = Self::Value, Error = Thrown<H>>;

    /// Same as [`run`](Work::run), but always returns a future.
    /// Synchronous work is still executed eagerly.
    fn run_eventual<R>(self) -> Self::Eventual<R>
    where
        R: Try<Ok = Self::Value, Error = Thrown<H>>;
}

/* Value */

/// Work that is already done.
#[derive(Debug, Clone, Copy)]
pub struct Value<T>(pub T);

impl<T, H> Work<H> for Value<T> {
    type Value = T;
    type Output<R> = R;
    type Eventual<R> = Ready<R>;

    fn run<R>(self) -> R
    where
        R: Try<Ok = T, Error = Thrown<H>>,
    {
        R::from_ok(self.0)
    }

    fn run_eventual<R>(self) -> Ready<R>
    where
        R: Try<Ok = T, Error = Thrown<H>>,
    {
        ready(R::from_ok(self.0))
    }
}

/* FnOnce */

impl<F, T, H> Work<H> for F
where
    F: FnOnce() -> T,
{
    type Value = T;
    type Output<R> = R;
    type Eventual<R> = Ready<R>;

    fn run<R>(self) -> R
    where
        R: Try<Ok = T, Error = Thrown<H>>,
    {
        settle::<T, R, H>(catch_unwind(AssertUnwindSafe(self)))
    }

    fn run_eventual<R>(self) -> Ready<R>
    where
        R: Try<Ok = T, Error = Thrown<H>>,
    {
        ready(<Self as Work<H>>::run(self))
    }
}

/* Fallible */

/// Closure whose `Err` (or `None`) is captured like a thrown value.
#[derive(Debug, Clone, Copy)]
pub struct Fallible<F>(pub F);

impl<F, O, H> Work<H> for Fallible<F>
where
    F: FnOnce() -> O,
    O: Try,
    O::Error: Any + Send,
    H: 'static,
{
    type Value = O::Ok;
    type Output<R> = R;
    type Eventual<R> = Ready<R>;

    fn run<R>(self) -> R
    where
        R: Try<Ok = O::Ok, Error = Thrown<H>>,
    {
        settle_try::<O, R, H>(catch_unwind(AssertUnwindSafe(self.0)))
    }

    fn run_eventual<R>(self) -> Ready<R>
    where
        R: Try<Ok = O::Ok, Error = Thrown<H>>,
    {
        ready(<Self as Work<H>>::run(self))
    }
}

/* Pending */

/// A future whose output is the success value.
#[derive(Debug, Clone, Copy)]
pub struct Pending<Fut>(pub Fut);

impl<Fut, H> Work<H> for Pending<Fut>
where
    Fut: Future,
{
    type Value = Fut::Output;
    type Output<R> = Settled<Fut, R>;
    type Eventual<R> = Settled<Fut, R>;

    fn run<R>(self) -> Settled<Fut, R>
    where
        R: Try<Ok = Fut::Output, Error = Thrown<H>>,
    {
        AssertUnwindSafe(self.0)
            .catch_unwind()
            .map(settle::<Fut::Output, R, H> as fn(_) -> R)
    }

    fn run_eventual<R>(self) -> Settled<Fut, R>
    where
        R: Try<Ok = Fut::Output, Error = Thrown<H>>,
    {
        <Self as Work<H>>::run(self)
    }
}

/* Rejectable */

/// A future resolving to a [`Try`] type; its error branch is the rejection.
#[derive(Debug, Clone, Copy)]
pub struct Rejectable<Fut>(pub Fut);

impl<Fut, H> Work<H> for Rejectable<Fut>
where
    Fut: Future,
    Fut::Output: Try,
    <Fut::Output as Try>::Error: Any + Send,
    H: 'static,
{
    type Value = <Fut::Output as Try>::Ok;
    type Output<R> = Settled<Fut, R>;
    type Eventual<R> = Settled<Fut, R>;

    fn run<R>(self) -> Settled<Fut, R>
    where
        R: Try<Ok = Self::Value, Error = Thrown<H>>,
    {
        AssertUnwindSafe(self.0)
            .catch_unwind()
            .map(settle_try::<Fut::Output, R, H> as fn(_) -> R)
    }

    fn run_eventual<R>(self) -> Settled<Fut, R>
    where
        R: Try<Ok = Self::Value, Error = Thrown<H>>,
    {
        <Self as Work<H>>::run(self)
    }
}

/* Lazy */

/// Closure producing a future. The closure runs immediately; a panic
/// raised before the future exists settles the outcome right away.
#[derive(Debug, Clone, Copy)]
pub struct Lazy<F>(pub F);

impl<F, Fut, H> Work<H> for Lazy<F>
where
    F: FnOnce() -> Fut,
    Fut: Future,
{
    type Value = Fut::Output;
    type Output<R> = Resolving<Fut, R>;
    type Eventual<R> = Resolving<Fut, R>;

    fn run<R>(self) -> Resolving<Fut, R>
    where
        R: Try<Ok = Fut::Output, Error = Thrown<H>>,
    {
        match catch_unwind(AssertUnwindSafe(self.0)) {
            Ok(fut) => Either::Right(<Pending<Fut> as Work<H>>::run(Pending(fut))),
            Err(payload) => Either::Left(ready(R::from_error(capture(payload)))),
        }
    }

    fn run_eventual<R>(self) -> Resolving<Fut, R>
    where
        R: Try<Ok = Fut::Output, Error = Thrown<H>>,
    {
        <Self as Work<H>>::run(self)
    }
}

/* helpers */

pub(crate) fn capture<H>(payload: Box<dyn Any + Send>) -> Thrown<H> {
    let thrown = Thrown::from_panic(payload);

    trace!("captured panic: {}", thrown);

    thrown
}

pub(crate) fn reject<E, H>(error: E) -> Thrown<H>
where
    E: Any + Send,
    H: 'static,
{
    let thrown = Thrown::new(error);

    trace!("captured error value: {}", thrown);

    thrown
}

fn settle<V, R, H>(res: ThreadResult<V>) -> R
where
    R: Try<Ok = V, Error = Thrown<H>>,
{
    match res {
        Ok(v) => R::from_ok(v),
        Err(payload) => R::from_error(capture(payload)),
    }
}

fn settle_try<O, R, H>(res: ThreadResult<O>) -> R
where
    O: Try,
    O::Error: Any + Send,
    R: Try<Ok = O::Ok, Error = Thrown<H>>,
    H: 'static,
{
    match res {
        Ok(o) => match o.into_result() {
            Ok(v) => R::from_ok(v),
            Err(e) => R::from_error(reject(e)),
        },
        Err(payload) => R::from_error(capture(payload)),
    }
}
