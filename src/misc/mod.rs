mod try_;
mod unwrap;

pub use try_::Try;
pub use unwrap::{unwrap, Unwrapped};
