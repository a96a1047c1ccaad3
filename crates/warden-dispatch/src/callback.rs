// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The callback capability: one type, two execution models.
//!
//! The model is fixed by the constructor used at registration time.
//! [`Callback::invoke`] then runs the callback inline or awaits it, and turns
//! both an `Err` and a panic into a [`BoxError`] the dispatcher can wrap.

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use strum::Display;
use thiserror::Error;
use warden_core::BoxError;

type ImmediateFn<Req, Out> = dyn Fn(Req) -> Result<Out, BoxError> + Send + Sync;
type SuspendingFn<Req, Out> =
    dyn Fn(Req) -> BoxFuture<'static, Result<Out, BoxError>> + Send + Sync;

/// How a callback runs when invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum InvocationMode {
    /// Completes on the calling task before `invoke` returns.
    Immediate,
    /// Returns a future that is awaited.
    Suspending,
}

/// A user callback panicked instead of returning.
#[derive(Debug, Error)]
#[error("callback panicked: {message}")]
pub struct CallbackPanic {
    pub message: String,
}

impl CallbackPanic {
    fn boxed(payload: Box<dyn std::any::Any + Send>) -> BoxError {
        Box::new(Self::from_payload(payload))
    }

    fn from_payload(payload: Box<dyn std::any::Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };
        Self { message }
    }
}

/// A registered user callback taking `Req` and producing `Out`.
pub enum Callback<Req, Out> {
    Immediate(Arc<ImmediateFn<Req, Out>>),
    Suspending(Arc<SuspendingFn<Req, Out>>),
}

impl<Req, Out> Callback<Req, Out>
where
    Req: Send + 'static,
    Out: Send + 'static,
{
    /// Wrap a synchronous, fallible function.
    pub fn immediate<F, O, E>(f: F) -> Self
    where
        F: Fn(Req) -> Result<O, E> + Send + Sync + 'static,
        O: Into<Out>,
        E: Into<BoxError>,
    {
        Self::Immediate(Arc::new(move |req: Req| -> Result<Out, BoxError> {
            f(req).map(Into::into).map_err(Into::into)
        }))
    }

    /// Wrap a synchronous function that cannot fail.
    pub fn infallible<F, O>(f: F) -> Self
    where
        F: Fn(Req) -> O + Send + Sync + 'static,
        O: Into<Out>,
    {
        Self::Immediate(Arc::new(move |req: Req| -> Result<Out, BoxError> {
            Ok(f(req).into())
        }))
    }

    /// Wrap a function returning a future, typically an `async` closure body.
    pub fn suspending<F, Fut, O, E>(f: F) -> Self
    where
        F: Fn(Req) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<O, E>> + Send + 'static,
        O: Into<Out> + 'static,
        E: Into<BoxError> + 'static,
    {
        Self::Suspending(Arc::new(
            move |req: Req| -> BoxFuture<'static, Result<Out, BoxError>> {
                let fut = f(req);
                Box::pin(async move { fut.await.map(Into::into).map_err(Into::into) })
            },
        ))
    }

    pub fn mode(&self) -> InvocationMode {
        match self {
            Callback::Immediate(_) => InvocationMode::Immediate,
            Callback::Suspending(_) => InvocationMode::Suspending,
        }
    }

    /// Run the callback to completion.
    ///
    /// A panic inside the callback (or inside its future) is caught and
    /// returned as a [`CallbackPanic`] error.
    pub async fn invoke(&self, req: Req) -> Result<Out, BoxError> {
        match self {
            Callback::Immediate(f) => std::panic::catch_unwind(AssertUnwindSafe(|| f(req)))
                .unwrap_or_else(|payload| Err(CallbackPanic::boxed(payload))),
            Callback::Suspending(f) => {
                let fut = match std::panic::catch_unwind(AssertUnwindSafe(|| f(req))) {
                    Ok(fut) => fut,
                    Err(payload) => return Err(CallbackPanic::boxed(payload)),
                };
                AssertUnwindSafe(fut)
                    .catch_unwind()
                    .await
                    .unwrap_or_else(|payload| Err(CallbackPanic::boxed(payload)))
            }
        }
    }
}

impl<Req, Out> Clone for Callback<Req, Out> {
    fn clone(&self) -> Self {
        match self {
            Callback::Immediate(f) => Callback::Immediate(Arc::clone(f)),
            Callback::Suspending(f) => Callback::Suspending(Arc::clone(f)),
        }
    }
}

impl<Req, Out> std::fmt::Debug for Callback<Req, Out> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Callback::Immediate(_) => f.write_str("Callback::Immediate(..)"),
            Callback::Suspending(_) => f.write_str("Callback::Suspending(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[tokio::test]
    async fn immediate_returns_value() {
        let cb: Callback<u32, u32> = Callback::infallible(|n: u32| n * 2);
        assert_eq!(cb.mode(), InvocationMode::Immediate);
        assert_eq!(cb.invoke(21).await.unwrap(), 42);
    }

    #[tokio::test]
    async fn suspending_is_awaited() {
        let cb: Callback<u32, u32> = Callback::suspending(|n: u32| async move {
            tokio::task::yield_now().await;
            Ok::<_, BoxError>(n + 1)
        });
        assert_eq!(cb.mode(), InvocationMode::Suspending);
        assert_eq!(cb.invoke(1).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn error_is_returned_not_swallowed() {
        let cb: Callback<(), bool> =
            Callback::immediate(|_: ()| Err::<bool, _>(std::io::Error::other("boom")));
        let err = cb.invoke(()).await.unwrap_err();
        assert_eq!(err.to_string(), "boom");
        assert!(err.downcast_ref::<std::io::Error>().is_some());
    }

    #[tokio::test]
    async fn immediate_panic_becomes_error() {
        let cb: Callback<(), bool> = Callback::infallible(|_: ()| -> bool { panic!("kaboom") });
        let err = cb.invoke(()).await.unwrap_err();
        let panic = err.downcast_ref::<CallbackPanic>().expect("panic error");
        assert_eq!(panic.message, "kaboom");
    }

    #[tokio::test]
    async fn suspending_panic_becomes_error() {
        let cb: Callback<(), bool> = Callback::suspending(|_: ()| async {
            tokio::task::yield_now().await;
            if true {
                panic!("late {}", "kaboom");
            }
            Ok::<bool, BoxError>(true)
        });
        let err = cb.invoke(()).await.unwrap_err();
        let panic = err.downcast_ref::<CallbackPanic>().expect("panic error");
        assert_eq!(panic.message, "late kaboom");
    }

    #[tokio::test]
    async fn clones_share_the_same_function() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let cb: Callback<(), bool> = Callback::infallible(move |_: ()| {
            counter.fetch_add(1, Ordering::SeqCst);
            true
        });
        let copy = cb.clone();
        cb.invoke(()).await.unwrap();
        copy.invoke(()).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(format!("{copy:?}"), "Callback::Immediate(..)");
    }
}
