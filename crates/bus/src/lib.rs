//! Synchronous, topic-keyed publish/subscribe bus.
//!
//! Subscribers are plain closures registered against a string topic. [`EventBus::emit`]
//! fans a payload out to every subscriber of that topic, in subscription order, on the
//! calling thread. There is no return-value aggregation and no queueing.
//!
//! The subscriber list for a topic is snapshotted before any subscriber runs, so a
//! subscriber may freely subscribe, unsubscribe, or emit again. Such changes become
//! visible from the next emission.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use rustc_hash::FxHashMap as HashMap;

#[cfg(test)]
mod tests;

/// Callback invoked for every payload published on a subscribed topic.
pub type Listener<P> = Arc<dyn Fn(&P) + Send + Sync>;

/// Identifier of a single subscription, unique within one bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

struct Entry<P> {
	id: SubscriptionId,
	listener: Listener<P>,
}

impl<P> Clone for Entry<P> {
	fn clone(&self) -> Self {
		Self {
			id: self.id,
			listener: self.listener.clone(),
		}
	}
}

struct BusInner<P> {
	topics: RwLock<HashMap<Box<str>, Vec<Entry<P>>>>,
	next_id: AtomicU64,
}

/// Process-wide publish/subscribe channel keyed by topic name.
///
/// Cloning is cheap and yields another handle to the same bus.
pub struct EventBus<P> {
	inner: Arc<BusInner<P>>,
}

impl<P> Clone for EventBus<P> {
	fn clone(&self) -> Self {
		Self {
			inner: self.inner.clone(),
		}
	}
}

impl<P> Default for EventBus<P> {
	fn default() -> Self {
		Self::new()
	}
}

impl<P> fmt::Debug for EventBus<P> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let topics = self.inner.topics.read();
		f.debug_struct("EventBus")
			.field("topics", &topics.len())
			.field("subscribers", &topics.values().map(Vec::len).sum::<usize>())
			.finish()
	}
}

impl<P> EventBus<P> {
	pub fn new() -> Self {
		Self {
			inner: Arc::new(BusInner {
				topics: RwLock::new(HashMap::default()),
				next_id: AtomicU64::new(1),
			}),
		}
	}

	/// Subscribes `listener` to `topic`.
	///
	/// The returned [`Subscription`] is the only way to deregister the listener by
	/// handle; dropping it leaves the listener attached.
	pub fn on<F>(&self, topic: &str, listener: F) -> Subscription<P>
	where
		F: Fn(&P) + Send + Sync + 'static,
	{
		let id = SubscriptionId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
		self.inner
			.topics
			.write()
			.entry(Box::from(topic))
			.or_default()
			.push(Entry {
				id,
				listener: Arc::new(listener),
			});
		tracing::trace!(topic, id = id.0, "bus.on");

		Subscription {
			topic: Box::from(topic),
			id,
			bus: Arc::downgrade(&self.inner),
		}
	}

	/// Removes the subscription `id` from `topic`.
	///
	/// Returns `false` if no such subscription exists.
	pub fn off(&self, topic: &str, id: SubscriptionId) -> bool {
		remove_entry(&self.inner, topic, id)
	}

	/// Publishes `payload` to every subscriber of `topic`, in subscription order.
	pub fn emit(&self, topic: &str, payload: &P) {
		let listeners: Vec<Entry<P>> = match self.inner.topics.read().get(topic) {
			Some(entries) => entries.clone(),
			None => Vec::new(),
		};
		tracing::trace!(topic, listeners = listeners.len(), "bus.emit");

		for entry in &listeners {
			(entry.listener)(payload);
		}
	}

	/// Number of live subscribers on `topic`.
	pub fn subscriber_count(&self, topic: &str) -> usize {
		self.inner.topics.read().get(topic).map_or(0, Vec::len)
	}

	/// Drops every subscription on every topic.
	pub fn clear(&self) {
		self.inner.topics.write().clear();
	}
}

fn remove_entry<P>(inner: &BusInner<P>, topic: &str, id: SubscriptionId) -> bool {
	let mut topics = inner.topics.write();
	let Some(entries) = topics.get_mut(topic) else {
		return false;
	};
	let before = entries.len();
	entries.retain(|e| e.id != id);
	let removed = entries.len() != before;
	if entries.is_empty() {
		topics.remove(topic);
	}
	if removed {
		tracing::trace!(topic, id = id.0, "bus.off");
	}
	removed
}

/// Deregistration capability returned by [`EventBus::on`].
pub struct Subscription<P> {
	topic: Box<str>,
	id: SubscriptionId,
	bus: Weak<BusInner<P>>,
}

impl<P> Subscription<P> {
	pub fn id(&self) -> SubscriptionId {
		self.id
	}

	pub fn topic(&self) -> &str {
		&self.topic
	}

	/// Detaches the listener. A no-op once the bus has been dropped or the listener
	/// was already removed through [`EventBus::off`] or [`EventBus::clear`].
	pub fn unsubscribe(self) -> bool {
		match self.bus.upgrade() {
			Some(inner) => remove_entry(&inner, &self.topic, self.id),
			None => false,
		}
	}
}

impl<P> fmt::Debug for Subscription<P> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Subscription")
			.field("topic", &self.topic)
			.field("id", &self.id)
			.finish()
	}
}
