mod outcome;
mod thrown;
mod work;

#[cfg(feature = "tokio")]
pub(crate) use self::work::{capture, reject};

pub use self::outcome::{Guarded, Positions, Slot};
pub use self::thrown::{Thrown, Unknown};
pub use self::work::{Fallible, Lazy, Pending, Rejectable, Resolving, Settled, Value, Work};
