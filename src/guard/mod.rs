mod func;

pub use self::func::{
    guarded_invoke_async_fn, guarded_invoke_async_fn_as, guarded_invoke_fn, guarded_invoke_fn_as,
    Callable, GuardedAsyncFn, GuardedFn,
};

use crate::core::{Guarded, Thrown, Work};

/// Builds the success branch.
pub fn ok<T, E>(value: T) -> Result<T, E> {
    Ok(value)
}

/// Builds the failure branch, keeping `error` exactly as given.
pub fn err<T, E>(error: E) -> Result<T, E> {
    Err(error)
}

/// Runs `work` and returns its outcome as a `Result`.
///
/// Synchronous work (closures, [`Value`], [`Fallible`]) returns the
/// `Result` directly, asynchronous work ([`Pending`], [`Rejectable`],
/// [`Lazy`]) returns a future resolving to it. A panic, or the error
/// branch of fallible work, ends up in `Err` as a [`Thrown`].
///
/// ```
/// use guardrail::try_safe;
///
/// assert_eq!(1, try_safe(|| 1).unwrap());
///
/// let thrown = try_safe(|| -> usize { panic!("test") }).unwrap_err();
/// assert_eq!(Some("test"), thrown.message());
/// ```
///
/// [`Value`]: crate::Value
/// [`Fallible`]: crate::Fallible
/// [`Pending`]: crate::Pending
/// [`Rejectable`]: crate::Rejectable
/// [`Lazy`]: crate::Lazy
pub fn try_safe<W>(work: W) -> W::Output<Result<W::Value, Thrown>>
where
    W: Work,
{
    work.run()
}

/// Same as [`try_safe`], with an error-type hint `H` for the captured
/// [`Thrown`]. The hint does not filter anything.
pub fn try_safe_as<H, W>(work: W) -> W::Output<Result<W::Value, Thrown<H>>>
where
    W: Work<H>,
{
    work.run()
}

/// Runs `work` and returns its outcome as a [`Guarded`], readable by
/// name (`data()`, `error()`) or by position (`as_tuple()`, `iter()`).
///
/// Like [`try_safe`], the result is returned directly for synchronous
/// work and as a future for asynchronous work.
pub fn guarded_invoke<W>(work: W) -> W::Output<Guarded<W::Value, Thrown>>
where
    W: Work,
{
    work.run()
}

pub fn guarded_invoke_as<H, W>(work: W) -> W::Output<Guarded<W::Value, Thrown<H>>>
where
    W: Work<H>,
{
    work.run()
}

/// Like [`guarded_invoke`], but always returns a future, whatever the
/// shape of `work`. Synchronous work still runs before this returns.
pub fn safe_guard<W>(work: W) -> W::Eventual<Guarded<W::Value, Thrown>>
where
    W: Work,
{
    work.run_eventual()
}

pub fn safe_guard_as<H, W>(work: W) -> W::Eventual<Guarded<W::Value, Thrown<H>>>
where
    W: Work<H>,
{
    work.run_eventual()
}
