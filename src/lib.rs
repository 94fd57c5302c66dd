//! Turns panics, errors and failed futures into plain values.
//!
//! Work is handed to one of the guards ([`try_safe`], [`guarded_invoke`],
//! [`safe_guard`]) in one of the shapes implementing [`Work`]. Whatever
//! the work throws or rejects with is captured as a [`Thrown`] and
//! returned in the failure branch; nothing propagates past the guard.
//! Synchronous work is settled synchronously, asynchronous work through
//! a future.
//!
//! ```
//! use guardrail::{guarded_invoke, try_safe, unwrap, Fallible};
//!
//! let parsed = try_safe(Fallible(|| "42".parse::<u32>()));
//! assert_eq!(42, parsed.unwrap());
//!
//! let (data, error) = guarded_invoke(Fallible(|| "x".parse::<u32>())).into_tuple();
//! assert!(data.is_none());
//! assert!(error.unwrap().is::<std::num::ParseIntError>());
//!
//! let flat = unwrap(try_safe(|| 1));
//! assert_eq!((Some(1), true), (flat.value, flat.error.is_none()));
//! ```
//!
//! Captured panics still pass through the process panic hook first, so
//! the default hook prints its `thread '..' panicked at ..` message to
//! stderr even though the guard handles the panic. Install a quieter hook
//! with [`std::panic::set_hook`] where that output is unwanted:
//!
//! ```
//! use guardrail::try_safe;
//!
//! let hook = std::panic::take_hook();
//! std::panic::set_hook(Box::new(|_| {}));
//! let res = try_safe(|| -> u32 { panic!("quiet") });
//! std::panic::set_hook(hook);
//!
//! assert_eq!(Some("quiet"), res.unwrap_err().message());
//! ```

mod core;
mod executor;
mod guard;
mod misc;

pub use self::core::{
    Fallible, Guarded, Lazy, Pending, Positions, Rejectable, Resolving, Settled, Slot, Thrown,
    Unknown, Value, Work,
};
#[cfg(feature = "tokio")]
pub use self::executor::Spawned;
pub use self::guard::{
    err, guarded_invoke, guarded_invoke_as, guarded_invoke_async_fn, guarded_invoke_async_fn_as,
    guarded_invoke_fn, guarded_invoke_fn_as, ok, safe_guard, safe_guard_as, try_safe, try_safe_as,
    Callable, GuardedAsyncFn, GuardedFn,
};
pub use self::misc::{unwrap, Try, Unwrapped};
