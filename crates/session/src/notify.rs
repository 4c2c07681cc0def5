//! In-process fan-out of change notifications.
//!
//! - No IO / no async
//! - Every live subscription receives every message it accepts, in publish order
//! - Dropped subscriptions are pruned on the next publish

use std::sync::{Mutex, MutexGuard, PoisonError, mpsc};

/// Receiving end of a [`Broadcaster`].
///
/// Dropping the subscription detaches it.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Mutex<mpsc::Receiver<M>>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: mpsc::Receiver<M>) -> Self {
        Self {
            receiver: Mutex::new(receiver),
        }
    }

    fn receiver(&self) -> MutexGuard<'_, mpsc::Receiver<M>> {
        self.receiver.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Option<M> {
        self.receiver().try_recv().ok()
    }

    /// Everything published since the last drain.
    pub fn drain(&self) -> Vec<M> {
        self.receiver().try_iter().collect()
    }

    /// Stop receiving messages.
    pub fn unsubscribe(self) {}
}

type Filter<M> = Box<dyn Fn(&M) -> bool + Send>;

struct Subscriber<M> {
    tx: mpsc::Sender<M>,
    filter: Option<Filter<M>>,
}

impl<M> Subscriber<M> {
    fn wants(&self, message: &M) -> bool {
        self.filter.as_ref().is_none_or(|accepts| accepts(message))
    }
}

pub struct Broadcaster<M> {
    subscribers: Mutex<Vec<Subscriber<M>>>,
}

impl<M> core::fmt::Debug for Broadcaster<M> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Broadcaster")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl<M> Default for Broadcaster<M> {
    fn default() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
        }
    }
}

impl<M> Broadcaster<M> {
    /// Number of live subscriptions as of the last publish.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().map(|subs| subs.len()).unwrap_or(0)
    }

    fn attach(&self, filter: Option<Filter<M>>) -> Subscription<M> {
        let (tx, rx) = mpsc::channel();

        // A poisoned lock still yields a subscription; it just never fires.
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.push(Subscriber { tx, filter });
        }

        Subscription::new(rx)
    }
}

impl<M: Clone> Broadcaster<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `message` to every live subscription that accepts it.
    ///
    /// Rejected messages are never queued.
    pub fn publish(&self, message: M) {
        match self.subscribers.lock() {
            Ok(mut subs) => subs.retain(|sub| !sub.wants(&message) || sub.tx.send(message.clone()).is_ok()),
            Err(_) => tracing::error!("notification lock poisoned; dropping message"),
        }
    }

    pub fn subscribe(&self) -> Subscription<M> {
        self.attach(None)
    }

    /// Subscribe to the messages `accepts` returns true for.
    pub fn subscribe_where(&self, accepts: impl Fn(&M) -> bool + Send + 'static) -> Subscription<M> {
        self.attach(Some(Box::new(accepts)))
    }
}
