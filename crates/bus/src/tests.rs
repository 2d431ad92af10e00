use std::sync::Arc;

use parking_lot::Mutex;
use pretty_assertions::assert_eq;

use super::*;

fn recorder() -> (Arc<Mutex<Vec<String>>>, impl Fn(&str) -> Box<dyn Fn(&u32) + Send + Sync>) {
	let log = Arc::new(Mutex::new(Vec::new()));
	let sink = log.clone();
	let make = move |tag: &str| -> Box<dyn Fn(&u32) + Send + Sync> {
		let sink = sink.clone();
		let tag = tag.to_string();
		Box::new(move |v: &u32| sink.lock().push(format!("{tag}:{v}")))
	};
	(log, make)
}

#[test]
fn emit_fans_out_in_subscription_order() {
	let bus = EventBus::<u32>::new();
	let (log, make) = recorder();
	let _a = bus.on("t", make("a"));
	let _b = bus.on("t", make("b"));
	let _c = bus.on("other", make("c"));

	bus.emit("t", &7);

	assert_eq!(*log.lock(), vec!["a:7".to_string(), "b:7".to_string()]);
}

#[test]
fn emit_without_subscribers_is_silent() {
	let bus = EventBus::<u32>::new();
	bus.emit("nobody", &1);
	assert_eq!(bus.subscriber_count("nobody"), 0);
}

#[test]
fn unsubscribe_detaches_only_that_listener() {
	let bus = EventBus::<u32>::new();
	let (log, make) = recorder();
	let a = bus.on("t", make("a"));
	let _b = bus.on("t", make("b"));

	assert!(a.unsubscribe());
	bus.emit("t", &1);

	assert_eq!(*log.lock(), vec!["b:1".to_string()]);
	assert_eq!(bus.subscriber_count("t"), 1);
}

#[test]
fn off_is_idempotent() {
	let bus = EventBus::<u32>::new();
	let sub = bus.on("t", |_| {});
	let id = sub.id();

	assert!(bus.off("t", id));
	assert!(!bus.off("t", id));
	assert!(!sub.unsubscribe());
}

#[test]
fn dropping_subscription_keeps_listener() {
	let bus = EventBus::<u32>::new();
	let (log, make) = recorder();
	drop(bus.on("t", make("a")));

	bus.emit("t", &3);

	assert_eq!(*log.lock(), vec!["a:3".to_string()]);
}

#[test]
fn unsubscribe_after_bus_dropped_is_noop() {
	let bus = EventBus::<u32>::new();
	let sub = bus.on("t", |_| {});
	drop(bus);
	assert!(!sub.unsubscribe());
}

#[test]
fn reentrant_subscribe_applies_to_next_emit() {
	let bus = EventBus::<u32>::new();
	let hits = Arc::new(Mutex::new(0u32));

	let inner_bus = bus.clone();
	let inner_hits = hits.clone();
	let _outer = bus.on("t", move |_| {
		let hits = inner_hits.clone();
		drop(inner_bus.on("t", move |_| *hits.lock() += 1));
	});

	bus.emit("t", &0);
	assert_eq!(*hits.lock(), 0);

	bus.emit("t", &0);
	assert_eq!(*hits.lock(), 1);
}

#[test]
fn clear_drops_everything() {
	let bus = EventBus::<u32>::new();
	let _a = bus.on("a", |_| {});
	let _b = bus.on("b", |_| {});
	bus.clear();
	assert_eq!(bus.subscriber_count("a") + bus.subscriber_count("b"), 0);
}
