use state_waiter::{EventEmitter, Flow, Signal, Stateful};
use std::{cell::Cell, rc::Rc};

struct Sensor {
    reading: Cell<u32>,
    events: EventEmitter<u32>,
}

impl Sensor {
    fn new() -> Rc<Self> {
        Rc::new(Self {
            reading: Cell::new(0),
            events: EventEmitter::new(),
        })
    }

    fn record(&self, reading: u32) {
        self.reading.set(reading);
        self.events.emit("reading", &reading);
    }
}

impl Stateful for Sensor {
    type State = u32;
    type Event = u32;

    fn state(&self) -> u32 {
        self.reading.get()
    }

    fn events(&self) -> &EventEmitter<u32> {
        &self.events
    }
}

#[test]
fn attaching_twice_shares_one_notifier() {
    let sensor = Sensor::new();
    let first = Signal::attach(sensor.clone());
    let second = Signal::attach(sensor.clone());

    assert!(Rc::ptr_eq(first.notifier(), second.notifier()));
    assert!(Rc::ptr_eq(first.emitter(), &sensor));
}

#[test]
fn every_emission_fires_the_signal() {
    let sensor = Sensor::new();
    let signal = Signal::attach(sensor.clone());
    let fired = Rc::new(Cell::new(0));

    let count = fired.clone();
    signal.subscribe(Rc::new(move || {
        count.set(count.get() + 1);
        Flow::Keep
    }));

    sensor.record(1);
    sensor.events().emit("calibrated", &0);
    sensor.events().emit("anything", &7);

    assert_eq!(fired.get(), 3);
}

#[test]
fn named_listeners_still_receive_payloads() {
    let sensor = Sensor::new();
    let signal = Signal::attach(sensor.clone());
    let last = Rc::new(Cell::new(0));

    let slot = last.clone();
    sensor.events().on("reading", move |reading| slot.set(*reading));
    signal.subscribe(Rc::new(|| Flow::Keep));

    sensor.record(42);

    assert_eq!(last.get(), 42);
    assert_eq!(signal.state(), 42);
}

#[test]
fn removes_listeners_that_ask_to_be_removed() {
    let sensor = Sensor::new();
    let signal = Signal::attach(sensor.clone());
    let fired = Rc::new(Cell::new(0));

    let count = fired.clone();
    let id = signal.subscribe(Rc::new(move || {
        count.set(count.get() + 1);
        Flow::Remove
    }));

    sensor.record(1);
    sensor.record(2);

    assert_eq!(fired.get(), 1);
    assert!(!signal.unsubscribe(id));
}

#[test]
fn unsubscribes_once() {
    let sensor = Sensor::new();
    let signal = Signal::attach(sensor.clone());

    let id = signal.subscribe(Rc::new(|| Flow::Keep));

    assert!(signal.unsubscribe(id));
    assert!(!signal.unsubscribe(id));
    assert!(signal.notifier().is_empty());
}

#[test]
fn subscriptions_made_during_a_pass_wait_for_the_next() {
    let sensor = Sensor::new();
    let signal = Signal::attach(sensor.clone());
    let late = Rc::new(Cell::new(0));

    let inner = signal.clone();
    let count = late.clone();
    signal.subscribe(Rc::new(move || {
        let count = count.clone();
        inner.subscribe(Rc::new(move || {
            count.set(count.get() + 1);
            Flow::Remove
        }));
        Flow::Remove
    }));

    sensor.record(1);
    assert_eq!(late.get(), 0);

    sensor.record(2);
    assert_eq!(late.get(), 1);
}

#[test]
fn off_removes_a_named_listener() {
    let sensor = Sensor::new();
    let id = sensor.events().on("reading", |_| panic!("removed listener ran"));

    assert_eq!(sensor.events().listener_count("reading"), 1);
    assert!(sensor.events().off(id));
    assert!(!sensor.events().off(id));

    assert!(!sensor.events().emit("reading", &1));
}
