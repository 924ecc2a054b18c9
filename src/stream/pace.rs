//! Latest-wins stream pacing.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use futures::Stream;
use pin_project_lite::pin_project;
use tokio::time::{Instant, Sleep, sleep_until};

/// Extension trait to cap a stream's emission rate
pub trait PaceExt: Stream {
    /// Emit at most once per `period`, always the most recent item.
    ///
    /// Items that arrive while the period has not elapsed replace each
    /// other; only the newest survives to the next emission. The first
    /// available item is emitted immediately.
    fn pace(self, period: Duration) -> Paced<Self>
    where
        Self: Sized,
    {
        Paced::new(self, period)
    }
}

impl<S: Stream> PaceExt for S {}

pin_project! {
    /// Stream combinator produced by [`PaceExt::pace`].
    pub struct Paced<S: Stream> {
        #[pin]
        inner: S,
        #[pin]
        deadline: Sleep,
        period: Duration,
        latest: Option<S::Item>,
        terminated: bool,
    }
}

impl<S: Stream> Paced<S> {
    fn new(inner: S, period: Duration) -> Self {
        Self {
            inner,
            // Already elapsed: the first item goes out without delay.
            deadline: sleep_until(Instant::now()),
            period,
            latest: None,
            terminated: false,
        }
    }
}

impl<S: Stream> Stream for Paced<S> {
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        // Drain whatever is ready right now, keeping only the newest item.
        if !*this.terminated {
            loop {
                match this.inner.as_mut().poll_next(cx) {
                    Poll::Ready(Some(item)) => *this.latest = Some(item),
                    Poll::Ready(None) => {
                        *this.terminated = true;
                        break;
                    }
                    Poll::Pending => break,
                }
            }
        }

        if *this.terminated && this.latest.is_none() {
            return Poll::Ready(None);
        }

        // Emit once the period has elapsed; an expired deadline stays
        // expired, so an item arriving late goes out as soon as it lands.
        if this.deadline.as_mut().poll(cx).is_ready() {
            if let Some(item) = this.latest.take() {
                this.deadline.as_mut().reset(Instant::now() + *this.period);
                return Poll::Ready(Some(item));
            }
        }

        Poll::Pending
    }
}
