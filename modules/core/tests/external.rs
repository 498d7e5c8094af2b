//! External producers: foreign-thread emits, weak-handle liveness after
//! loop destruction, shared-handle emits, and producer counting.

use std::{
  sync::{
    atomic::{AtomicI64, AtomicUsize, Ordering},
    Arc,
  },
  thread,
  time::Duration,
};

use hardwire_core_rs::{Emit, EmitError, InboxKind, OnEvent, SharedLoop};
use hardwire_macros_rs::wiring;

#[derive(Clone)]
struct Report {
  value: i64,
}

struct ReportSink {
  count: Arc<AtomicUsize>,
  sum:   Arc<AtomicI64>,
}

// Marker type; only its declaration participates in the wiring.
#[allow(dead_code)]
struct Probe;

wiring! {
  loop ReportLoop {
    receiver sink: ReportSink {
      mode: thread,
      receives: [Report],
    },
    producer probe: Probe {
      emits: [Report],
    },
  }
}

impl<'a> OnEvent<Report, ReportLoopReportSinkDispatcher<'a>> for ReportSink {
  fn on_event(&mut self, event: Report, _dispatcher: &mut ReportLoopReportSinkDispatcher<'a>) {
    self.count.fetch_add(1, Ordering::Relaxed);
    self.sum.fetch_add(event.value, Ordering::Relaxed);
  }
}

#[test]
fn an_external_producer_counts_toward_inbox_selection() {
  assert_eq!(ReportLoop::SINK_PRODUCER_COUNT, 1);
  assert_eq!(ReportLoop::SINK_INBOX_KIND, InboxKind::SingleProducer);
}

#[test]
fn external_emits_from_a_foreign_thread_all_arrive() {
  let count = Arc::new(AtomicUsize::new(0));
  let sum = Arc::new(AtomicI64::new(0));

  let shared = SharedLoop::new(ReportLoop::new(ReportSink { count: Arc::clone(&count), sum: Arc::clone(&sum) }));
  shared.start().unwrap();
  assert!(shared.is_running());

  let mut emitter = shared.emitter::<Probe>();
  let producer = thread::spawn(move || {
    for value in 1..=100 {
      emitter.emit(Report { value }).unwrap();
    }
  });
  producer.join().unwrap();

  while count.load(Ordering::Relaxed) < 100 {
    thread::sleep(Duration::from_millis(1));
  }
  shared.stop();

  assert_eq!(count.load(Ordering::Relaxed), 100);
  // Sum of 1..=100.
  assert_eq!(sum.load(Ordering::Relaxed), 5050);
}

#[test]
fn handles_outlive_the_loop_and_fail_closed() {
  let count = Arc::new(AtomicUsize::new(0));
  let sum = Arc::new(AtomicI64::new(0));

  let emitter = {
    let shared = SharedLoop::new(ReportLoop::new(ReportSink { count: Arc::clone(&count), sum: Arc::clone(&sum) }));
    shared.start().unwrap();

    let emitter = shared.emitter::<Probe>();
    assert!(emitter.is_valid());

    let mut live = emitter.clone();
    live.emit(Report { value: 1 }).unwrap();
    while count.load(Ordering::Relaxed) < 1 {
      thread::sleep(Duration::from_millis(1));
    }
    shared.stop();
    emitter
  };

  assert!(!emitter.is_valid());
  let mut emitter = emitter;
  assert_eq!(emitter.emit(Report { value: 2 }), Err(EmitError::Closed));
  // Nothing was delivered after destruction.
  assert_eq!(count.load(Ordering::Relaxed), 1);
  assert_eq!(sum.load(Ordering::Relaxed), 1);
}

#[test]
fn shared_handles_emit_through_the_remote_path() {
  let count = Arc::new(AtomicUsize::new(0));
  let sum = Arc::new(AtomicI64::new(0));

  let shared = SharedLoop::new(ReportLoop::new(ReportSink { count: Arc::clone(&count), sum: Arc::clone(&sum) }));
  shared.start().unwrap();

  let mut handle = shared.clone();
  handle.emit(Report { value: 7 }).unwrap();

  while count.load(Ordering::Relaxed) < 1 {
    thread::sleep(Duration::from_millis(1));
  }
  shared.stop();
  assert_eq!(sum.load(Ordering::Relaxed), 7);
}

#[derive(Clone)]
struct Metric {
  value: i64,
}

#[derive(Clone)]
struct Kick;

struct MetricSource {
  kicked: usize,
}

struct MetricSink {
  count: Arc<AtomicUsize>,
}

#[allow(dead_code)]
struct MeterProbe;

wiring! {
  loop MeterLoop {
    receiver source: MetricSource {
      receives: [Kick],
      emits: [Metric],
    },
    receiver meter: MetricSink {
      mode: thread,
      receives: [Metric],
    },
    producer meter_probe: MeterProbe {
      emits: [Metric],
    },
  }
}

impl<'a> OnEvent<Kick, MeterLoopMetricSourceDispatcher<'a>> for MetricSource {
  fn on_event(&mut self, _event: Kick, dispatcher: &mut MeterLoopMetricSourceDispatcher<'a>) {
    self.kicked += 1;
    dispatcher.emit(Metric { value: 1 }).unwrap();
  }
}

impl<'a> OnEvent<Metric, MeterLoopMetricSinkDispatcher<'a>> for MetricSink {
  fn on_event(&mut self, _event: Metric, _dispatcher: &mut MeterLoopMetricSinkDispatcher<'a>) {
    self.count.fetch_add(1, Ordering::Relaxed);
  }
}

#[test]
fn a_loop_emitter_and_an_external_producer_make_two_classes() {
  assert_eq!(MeterLoop::METER_PRODUCER_COUNT, 2);
  assert_eq!(MeterLoop::METER_INBOX_KIND, InboxKind::MultiProducer);
}

#[test]
fn loop_origin_and_external_emits_reach_the_same_inbox() {
  let count = Arc::new(AtomicUsize::new(0));
  let mut event_loop = MeterLoop::new(MetricSource { kicked: 0 }, MetricSink { count: Arc::clone(&count) });
  event_loop.start().unwrap();

  // Loop-origin class: dispatching a Kick makes the source emit a Metric.
  event_loop.emit(Kick).unwrap();
  let mut strategy = hardwire_core_rs::Spin::new(&mut event_loop);
  while strategy.poll() {}

  // External class: a weak handle off the owned loop.
  let mut emitter = event_loop.emitter::<MeterProbe>();
  assert!(emitter.is_valid());
  emitter.emit(Metric { value: 2 }).unwrap();

  while count.load(Ordering::Relaxed) < 2 {
    thread::sleep(Duration::from_millis(1));
  }
  event_loop.stop();

  assert_eq!(event_loop.source().kicked, 1);
  assert_eq!(count.load(Ordering::Relaxed), 2);
}
