use std::future::Future;
use std::marker::PhantomData;

use crate::core::{Guarded, Lazy, Resolving, Thrown, Unknown};

use super::guarded_invoke_as;

/// Functions that can be called with their arguments packed into a tuple.
///
/// Implemented for every `Fn` taking up to eight arguments.
pub trait Callable<Args> {
    type Output;

    fn call_with(&self, args: Args) -> Self::Output;
}

macro_rules! callable_tuple {
    ($($A:ident),*) => {
        #[allow(non_snake_case)]
        impl<F, T, $($A,)*> Callable<($($A,)*)> for F
        where
            F: Fn($($A),*) -> T,
        {
            type Output = T;

            fn call_with(&self, ($($A,)*): ($($A,)*)) -> T {
                (self)($($A),*)
            }
        }
    };
}

callable_tuple!();
callable_tuple!(A1);
callable_tuple!(A1, A2);
callable_tuple!(A1, A2, A3);
callable_tuple!(A1, A2, A3, A4);
callable_tuple!(A1, A2, A3, A4, A5);
callable_tuple!(A1, A2, A3, A4, A5, A6);
callable_tuple!(A1, A2, A3, A4, A5, A6, A7);
callable_tuple!(A1, A2, A3, A4, A5, A6, A7, A8);

/* GuardedFn */

/// Synchronous function whose calls return [`Guarded`] outcomes.
pub struct GuardedFn<F, H = Unknown> {
    f: F,
    hint: PhantomData<fn() -> H>,
}

impl<F, H> GuardedFn<F, H> {
    pub fn call<Args>(&self, args: Args) -> Guarded<F::Output, Thrown<H>>
    where
        F: Callable<Args>,
    {
        guarded_invoke_as::<H, _>(move || self.f.call_with(args))
    }

    pub fn into_inner(self) -> F {
        self.f
    }
}

impl<F, H> Clone for GuardedFn<F, H>
where
    F: Clone,
{
    fn clone(&self) -> Self {
        Self {
            f: self.f.clone(),
            hint: PhantomData,
        }
    }
}

/// Wraps `f` so that calling it never panics and yields a [`Guarded`].
///
/// ```
/// use guardrail::guarded_invoke_fn;
///
/// let div = guarded_invoke_fn(|a: u32, b: u32| a / b);
///
/// assert_eq!(Some(&3), div.call((7, 2)).data());
/// assert!(div.call((7, 0)).is_err());
/// ```
pub fn guarded_invoke_fn<F>(f: F) -> GuardedFn<F> {
    guarded_invoke_fn_as::<Unknown, F>(f)
}

pub fn guarded_invoke_fn_as<H, F>(f: F) -> GuardedFn<F, H> {
    GuardedFn {
        f,
        hint: PhantomData,
    }
}

/* GuardedAsyncFn */

/// Function returning a future, whose calls resolve to [`Guarded`]
/// outcomes.
pub struct GuardedAsyncFn<F, H = Unknown> {
    f: F,
    hint: PhantomData<fn() -> H>,
}

impl<F, H> GuardedAsyncFn<F, H> {
    /// Calls the function right away and returns the guarded future.
    pub fn call<Args>(
        &self,
        args: Args,
    ) -> Resolving<F::Output, Guarded<<F::Output as Future>::Output, Thrown<H>>>
    where
        F: Callable<Args>,
        F::Output: Future,
    {
        guarded_invoke_as::<H, _>(Lazy(move || self.f.call_with(args)))
    }

    pub fn into_inner(self) -> F {
        self.f
    }
}

impl<F, H> Clone for GuardedAsyncFn<F, H>
where
    F: Clone,
{
    fn clone(&self) -> Self {
        Self {
            f: self.f.clone(),
            hint: PhantomData,
        }
    }
}

pub fn guarded_invoke_async_fn<F>(f: F) -> GuardedAsyncFn<F> {
    guarded_invoke_async_fn_as::<Unknown, F>(f)
}

pub fn guarded_invoke_async_fn_as<H, F>(f: F) -> GuardedAsyncFn<F, H> {
    GuardedAsyncFn {
        f,
        hint: PhantomData,
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    struct SyntaxError;

    #[test]
    fn test_forwards_arguments() {
        let concat = guarded_invoke_fn(|a: &str, b: usize, c: char| format!("{}{}{}", a, b, c));

        let x = concat.call(("a", 1, 'c'));
        assert_eq!(Some("a1c"), x.data().map(String::as_str));
    }

    #[test]
    fn test_zero_and_many_arguments() {
        let zero = guarded_invoke_fn(|| 0usize);
        assert_eq!(Some(&0), zero.call(()).data());

        let many = guarded_invoke_fn(|a: u8, b: u8, c: u8, d: u8, e: u8, f: u8, g: u8, h: u8| {
            [a, b, c, d, e, f, g, h].iter().map(|x| *x as usize).sum::<usize>()
        });
        assert_eq!(Some(&36), many.call((1, 2, 3, 4, 5, 6, 7, 8)).data());
    }

    #[test]
    fn test_same_as_guarded_invoke() {
        let f = |a: i32, b: i32| -> i32 {
            if b == 0 {
                panic!("division by zero");
            }
            a / b
        };
        let g = guarded_invoke_fn(f);

        for &(a, b) in &[(6, 3), (1, 0), (-8, 2)] {
            let wrapped = g.call((a, b));
            let direct = guarded_invoke(|| f(a, b));

            assert_eq!(wrapped.data(), direct.data());
            assert_eq!(
                wrapped.error().map(|e| e.message()),
                direct.error().map(|e| e.message())
            );
        }
    }

    #[test]
    fn test_callable_repeatedly() {
        let count = AtomicUsize::new(0);
        let f = guarded_invoke_fn(|step: usize| count.fetch_add(step, Ordering::Relaxed));

        f.call((1,));
        f.call((2,));

        assert_eq!(3, count.load(Ordering::Relaxed));
    }

    #[test]
    fn test_hint() {
        let f = guarded_invoke_fn_as::<SyntaxError, _>(|| -> usize { std::panic::panic_any("other") });
        let x = f.call(());

        let error = x.error().unwrap();
        assert!(error.hinted().is_none());
        assert_eq!(Some("other"), error.message());
    }

    #[tokio::test]
    async fn test_async_fn() {
        async fn fetch(id: usize, fail: bool) -> usize {
            if fail {
                panic!("fetch {} failed", id);
            }
            id * 10
        }

        let f = guarded_invoke_async_fn(fetch);

        let x = f.call((4, false)).await;
        assert_eq!(Some(&40), x.data());

        let x = f.call((5, true)).await;
        assert_eq!(Some("fetch 5 failed"), x.error().unwrap().message());
    }

    #[tokio::test]
    async fn test_async_fn_panics_before_future() {
        let f = guarded_invoke_async_fn_as::<SyntaxError, _>(|x: usize| {
            if x == 0 {
                panic!("no future");
            }
            async move { x }
        });

        let x = f.call((0,)).await;
        assert_eq!(Some("no future"), x.error().unwrap().message());

        let x = f.call((2,)).await;
        assert_eq!(Some(&2), x.data());
    }
}
