//! Stream adapters that run the operator's taps.
//!
//! Both adapters forward every item unchanged. Handlers run inline inside
//! `poll_next`, before the item is handed downstream, so a panicking handler
//! surfaces from the poll that delivered the notification.
//!
//! Error and completion are exclusive: once an `Err` item has been reported,
//! the end of the stream no longer calls `complete`. Items after an error are
//! still forwarded and tapped.

use std::convert::Infallible;
use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_util::{ready, Stream};
use pin_project_lite::pin_project;

use crate::operator::{
    CompleteHandler, DebugOperator, DebugOperatorConfig, DebugOptions, ErrorHandler, NextHandler,
};

/// Handlers resolved for one subscription.
pub(crate) struct Taps<T, E> {
    next: NextHandler<T>,
    error: ErrorHandler<E>,
    complete: CompleteHandler,
    errored: bool,
    completed: bool,
}

impl<T, E> Taps<T, E> {
    pub(crate) fn new(config: &DebugOperatorConfig<T, E>) -> Self {
        Self {
            next: config.next.clone(),
            error: config.error.clone(),
            complete: config.complete.clone(),
            errored: false,
            completed: false,
        }
    }

    fn on_next(&self, value: &T) {
        (self.next)(value)
    }

    fn on_error(&mut self, err: &E) {
        self.errored = true;
        (self.error)(err)
    }

    // Sources polled again after ending must not report completion twice.
    fn on_complete(&mut self) {
        if self.completed {
            return;
        }
        self.completed = true;
        if !self.errored {
            (self.complete)()
        }
    }
}

pin_project! {
    /// Stream returned by [`DebugOperator::apply`].
    #[must_use = "streams do nothing unless polled"]
    pub struct Debugged<S, T, E> {
        #[pin]
        source: S,
        taps: Option<Taps<T, E>>,
    }
}

impl<S, T, E> Debugged<S, T, E> {
    pub(crate) fn new(source: S, taps: Option<Taps<T, E>>) -> Self {
        Self { source, taps }
    }

    /// Whether this adapter is a plain passthrough.
    pub fn is_passthrough(&self) -> bool {
        self.taps.is_none()
    }

    pub fn get_ref(&self) -> &S {
        &self.source
    }

    pub fn into_inner(self) -> S {
        self.source
    }
}

impl<S, T, E> Stream for Debugged<S, T, E>
where
    S: Stream<Item = T>,
{
    type Item = T;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        let this = self.project();
        let item = ready!(this.source.poll_next(cx));

        if let Some(taps) = this.taps.as_mut() {
            match &item {
                Some(value) => taps.on_next(value),
                None => taps.on_complete(),
            }
        }

        Poll::Ready(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.source.size_hint()
    }
}

impl<S: fmt::Debug, T, E> fmt::Debug for Debugged<S, T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debugged")
            .field("source", &self.source)
            .field("passthrough", &self.is_passthrough())
            .finish()
    }
}

pin_project! {
    /// Stream returned by [`DebugOperator::apply_try`].
    #[must_use = "streams do nothing unless polled"]
    pub struct TryDebugged<S, T, E> {
        #[pin]
        source: S,
        taps: Option<Taps<T, E>>,
    }
}

impl<S, T, E> TryDebugged<S, T, E> {
    pub(crate) fn new(source: S, taps: Option<Taps<T, E>>) -> Self {
        Self { source, taps }
    }

    /// Whether this adapter is a plain passthrough.
    pub fn is_passthrough(&self) -> bool {
        self.taps.is_none()
    }

    pub fn get_ref(&self) -> &S {
        &self.source
    }

    pub fn into_inner(self) -> S {
        self.source
    }
}

impl<S, T, E> Stream for TryDebugged<S, T, E>
where
    S: Stream<Item = Result<T, E>>,
{
    type Item = Result<T, E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Result<T, E>>> {
        let this = self.project();
        let item = ready!(this.source.poll_next(cx));

        if let Some(taps) = this.taps.as_mut() {
            match &item {
                Some(Ok(value)) => taps.on_next(value),
                Some(Err(err)) => taps.on_error(err),
                None => taps.on_complete(),
            }
        }

        Poll::Ready(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.source.size_hint()
    }
}

impl<S: fmt::Debug, T, E> fmt::Debug for TryDebugged<S, T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TryDebugged")
            .field("source", &self.source)
            .field("passthrough", &self.is_passthrough())
            .finish()
    }
}

/// Pipeline-style access to the debug operator.
pub trait DebugStreamExt: Stream + Sized {
    /// Tap with an operator built from the process-wide defaults.
    fn debug<O>(self, options: O) -> Debugged<Self, Self::Item, Infallible>
    where
        O: Into<DebugOptions<Self::Item, Infallible>>,
        Self::Item: fmt::Debug + 'static,
    {
        super::debug(options).apply(self)
    }

    /// Tap with an already constructed operator.
    fn debug_with<E>(self, operator: &DebugOperator<Self::Item, E>) -> Debugged<Self, Self::Item, E> {
        operator.apply(self)
    }

    /// Tap a `Result` stream with an operator built from the process-wide defaults.
    fn try_debug<T, E, O>(self, options: O) -> TryDebugged<Self, T, E>
    where
        Self: Stream<Item = Result<T, E>>,
        O: Into<DebugOptions<T, E>>,
        T: fmt::Debug + 'static,
        E: fmt::Debug + 'static,
    {
        super::debug(options).apply_try(self)
    }

    /// Tap a `Result` stream with an already constructed operator.
    fn try_debug_with<T, E>(self, operator: &DebugOperator<T, E>) -> TryDebugged<Self, T, E>
    where
        Self: Stream<Item = Result<T, E>>,
    {
        operator.apply_try(self)
    }
}

impl<S: Stream> DebugStreamExt for S {}
