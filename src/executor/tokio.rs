use futures::future::{FutureExt, Map};
use tokio::task::{JoinError, JoinHandle};

use crate::core::{capture, reject, Thrown, Work};
use crate::misc::Try;

/// A spawned tokio task. A panic inside the task is captured with its
/// original payload; a cancelled task fails with the [`JoinError`].
pub struct Spawned<T>(pub JoinHandle<T>);

impl<T, H> Work<H> for Spawned<T>
where
    H: 'static,
{
    type Value = T;
    type Output<R> = Map<JoinHandle<T>, fn(Result<T, JoinError>) -> R>;
    type Eventual<R> = Map<JoinHandle<T>, fn(Result<T, JoinError>) -> R>;

    fn run<R>(self) -> Self::Output<R>
    where
        R: Try<Ok = T, Error = Thrown<H>>,
    {
        self.0.map(join::<T, R, H> as fn(_) -> R)
    }

    fn run_eventual<R>(self) -> Self::Eventual<R>
    where
        R: Try<Ok = T, Error = Thrown<H>>,
    {
        <Self as Work<H>>::run(self)
    }
}

fn join<T, R, H>(res: Result<T, JoinError>) -> R
where
    R: Try<Ok = T, Error = Thrown<H>>,
    H: 'static,
{
    match res {
        Ok(v) => R::from_ok(v),
        Err(err) if err.is_panic() => R::from_error(capture(err.into_panic())),
        Err(err) => R::from_error(reject(err)),
    }
}
