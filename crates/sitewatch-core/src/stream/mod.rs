// ── Reactive alert streams ──
//
// Subscription type for consuming collection changes from the store.

mod filter;

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::model::Alert;

pub use filter::AlertFilter;

/// A subscription to the alert collection.
///
/// Yields the current snapshot first, then a new one each time the
/// collection changes. Ends once the store has been dropped.
pub struct AlertStream {
    inner: WatchStream<Arc<Vec<Alert>>>,
}

impl AlertStream {
    pub(crate) fn new(receiver: watch::Receiver<Arc<Vec<Alert>>>) -> Self {
        Self {
            inner: WatchStream::new(receiver),
        }
    }
}

impl Stream for AlertStream {
    type Item = Arc<Vec<Alert>>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
