//! Thread-hosted wiring: worker-driven ping-pong, producer counting and
//! inbox selection, mixed hosting, restartability.

use std::{
  sync::{
    atomic::{AtomicI32, AtomicI64, AtomicUsize, Ordering},
    Arc,
  },
  thread,
  time::Duration,
};

use hardwire_core_rs::{Emit, InboxKind, Inspect, OnEvent, Spin};
use hardwire_macros_rs::wiring;

#[derive(Clone)]
struct Ping {
  value: i32,
}

#[derive(Clone)]
struct Pong {
  value: i32,
}

struct PingSide {
  received: Arc<AtomicUsize>,
  last:     Arc<AtomicI32>,
}

struct PongSide {
  received: Arc<AtomicUsize>,
}

wiring! {
  loop ThreadPingPong {
    receiver ping_side: PingSide {
      mode: thread,
      receives: [Pong],
      emits: [Ping],
    },
    receiver pong_side: PongSide {
      mode: thread,
      receives: [Ping],
      emits: [Pong],
    },
  }
}

impl<'a> OnEvent<Pong, ThreadPingPongPingSideDispatcher<'a>> for PingSide {
  fn on_event(&mut self, event: Pong, dispatcher: &mut ThreadPingPongPingSideDispatcher<'a>) {
    self.received.fetch_add(1, Ordering::Relaxed);
    self.last.store(event.value, Ordering::Relaxed);
    if event.value < 100 {
      dispatcher.emit(Ping { value: event.value + 1 }).unwrap();
    }
  }
}

impl<'a> OnEvent<Ping, ThreadPingPongPongSideDispatcher<'a>> for PongSide {
  fn on_event(&mut self, event: Ping, dispatcher: &mut ThreadPingPongPongSideDispatcher<'a>) {
    self.received.fetch_add(1, Ordering::Relaxed);
    dispatcher.emit(Pong { value: event.value + 1 }).unwrap();
  }
}

#[test]
fn single_producer_sides_select_the_lock_free_inbox() {
  assert_eq!(ThreadPingPong::PING_SIDE_PRODUCER_COUNT, 1);
  assert_eq!(ThreadPingPong::PONG_SIDE_PRODUCER_COUNT, 1);
  assert_eq!(ThreadPingPong::PING_SIDE_INBOX_KIND, InboxKind::SingleProducer);
  assert_eq!(ThreadPingPong::PONG_SIDE_INBOX_KIND, InboxKind::SingleProducer);
}

#[test]
fn worker_ping_pong_completes_without_loop_polling() {
  let pings = Arc::new(AtomicUsize::new(0));
  let last = Arc::new(AtomicI32::new(0));
  let pongs = Arc::new(AtomicUsize::new(0));

  let mut event_loop = ThreadPingPong::new(
    PingSide { received: Arc::clone(&pings), last: Arc::clone(&last) },
    PongSide { received: Arc::clone(&pongs) },
  );
  event_loop.start().unwrap();
  event_loop.emit(Ping { value: 0 }).unwrap();

  while last.load(Ordering::Relaxed) < 101 {
    thread::sleep(Duration::from_millis(1));
  }
  thread::sleep(Duration::from_millis(10));
  event_loop.stop();

  assert_eq!(pings.load(Ordering::Relaxed), 51);
  assert_eq!(pongs.load(Ordering::Relaxed), 51);
  assert_eq!(last.load(Ordering::Relaxed), 101);
}

#[derive(Clone)]
struct Tick {
  value: i32,
}

#[derive(Clone)]
struct Tock {
  value: i32,
}

#[derive(Clone)]
struct Merged {
  value:  i32,
  source: u8,
}

struct SourceA {
  count: Arc<AtomicUsize>,
}

struct SourceB {
  count: Arc<AtomicUsize>,
}

struct Collector {
  count:  Arc<AtomicUsize>,
  from_a: Arc<AtomicUsize>,
  from_b: Arc<AtomicUsize>,
}

wiring! {
  loop MergeLoop {
    receiver source_a: SourceA {
      mode: thread,
      receives: [Tick],
      emits: [Merged],
    },
    receiver source_b: SourceB {
      mode: thread,
      receives: [Tock],
      emits: [Merged],
    },
    receiver collector: Collector {
      mode: thread,
      receives: [Merged],
    },
  }
}

impl<'a> OnEvent<Tick, MergeLoopSourceADispatcher<'a>> for SourceA {
  fn on_event(&mut self, event: Tick, dispatcher: &mut MergeLoopSourceADispatcher<'a>) {
    self.count.fetch_add(1, Ordering::Relaxed);
    dispatcher.emit(Merged { value: event.value, source: 1 }).unwrap();
  }
}

impl<'a> OnEvent<Tock, MergeLoopSourceBDispatcher<'a>> for SourceB {
  fn on_event(&mut self, event: Tock, dispatcher: &mut MergeLoopSourceBDispatcher<'a>) {
    self.count.fetch_add(1, Ordering::Relaxed);
    dispatcher.emit(Merged { value: event.value, source: 2 }).unwrap();
  }
}

impl<'a> OnEvent<Merged, MergeLoopCollectorDispatcher<'a>> for Collector {
  fn on_event(&mut self, event: Merged, _dispatcher: &mut MergeLoopCollectorDispatcher<'a>) {
    self.count.fetch_add(1, Ordering::Relaxed);
    if event.source == 1 {
      self.from_a.fetch_add(1, Ordering::Relaxed);
    } else {
      self.from_b.fetch_add(1, Ordering::Relaxed);
    }
  }
}

#[test]
fn two_worker_producers_select_the_mutex_inbox() {
  assert_eq!(MergeLoop::COLLECTOR_PRODUCER_COUNT, 2);
  assert_eq!(MergeLoop::COLLECTOR_INBOX_KIND, InboxKind::MultiProducer);
  // The sources themselves have no declared producer at all.
  assert_eq!(MergeLoop::SOURCE_A_PRODUCER_COUNT, 0);
  assert_eq!(MergeLoop::SOURCE_A_INBOX_KIND, InboxKind::SingleProducer);
}

#[test]
fn two_producers_reach_one_consumer_without_loss() {
  const ROUNDS: usize = 50;

  let source_a = Arc::new(AtomicUsize::new(0));
  let source_b = Arc::new(AtomicUsize::new(0));
  let count = Arc::new(AtomicUsize::new(0));
  let from_a = Arc::new(AtomicUsize::new(0));
  let from_b = Arc::new(AtomicUsize::new(0));

  let mut event_loop = MergeLoop::new(
    SourceA { count: Arc::clone(&source_a) },
    SourceB { count: Arc::clone(&source_b) },
    Collector { count: Arc::clone(&count), from_a: Arc::clone(&from_a), from_b: Arc::clone(&from_b) },
  );
  event_loop.start().unwrap();

  for round in 0..ROUNDS {
    let value = i32::try_from(round).unwrap();
    event_loop.emit(Tick { value }).unwrap();
    event_loop.emit(Tock { value }).unwrap();
  }

  while count.load(Ordering::Relaxed) < ROUNDS * 2 {
    thread::sleep(Duration::from_millis(1));
  }
  event_loop.stop();

  assert_eq!(source_a.load(Ordering::Relaxed), ROUNDS);
  assert_eq!(source_b.load(Ordering::Relaxed), ROUNDS);
  assert_eq!(count.load(Ordering::Relaxed), ROUNDS * 2);
  assert_eq!(from_a.load(Ordering::Relaxed), ROUNDS);
  assert_eq!(from_b.load(Ordering::Relaxed), ROUNDS);
}

#[derive(Clone)]
struct Sample {
  value: i32,
}

struct LoopTally {
  count: usize,
  sum:   i64,
}

struct ThreadTally {
  count: Arc<AtomicUsize>,
  sum:   Arc<AtomicI64>,
}

wiring! {
  loop MixedLoop {
    receiver loop_tally: LoopTally {
      receives: [Sample],
    },
    receiver thread_tally: ThreadTally {
      mode: thread,
      receives: [Sample],
    },
  }
}

impl<'a> OnEvent<Sample, MixedLoopLoopTallyDispatcher<'a>> for LoopTally {
  fn on_event(&mut self, event: Sample, _dispatcher: &mut MixedLoopLoopTallyDispatcher<'a>) {
    self.count += 1;
    self.sum += i64::from(event.value);
  }
}

impl<'a> OnEvent<Sample, MixedLoopThreadTallyDispatcher<'a>> for ThreadTally {
  fn on_event(&mut self, event: Sample, _dispatcher: &mut MixedLoopThreadTallyDispatcher<'a>) {
    self.count.fetch_add(1, Ordering::Relaxed);
    self.sum.fetch_add(i64::from(event.value), Ordering::Relaxed);
  }
}

#[test]
fn both_hosting_modes_see_every_emit_of_a_shared_event() {
  const ROUNDS: i32 = 50;

  let count = Arc::new(AtomicUsize::new(0));
  let sum = Arc::new(AtomicI64::new(0));

  let mut event_loop = MixedLoop::new(
    LoopTally { count: 0, sum: 0 },
    ThreadTally { count: Arc::clone(&count), sum: Arc::clone(&sum) },
  );
  event_loop.start().unwrap();

  for value in 0..ROUNDS {
    event_loop.emit(Sample { value }).unwrap();
  }

  let mut strategy = Spin::new(&mut event_loop);
  while strategy.poll() {}

  while count.load(Ordering::Relaxed) < 50 {
    thread::sleep(Duration::from_millis(1));
  }
  event_loop.stop();

  let expected_sum = i64::from(ROUNDS * (ROUNDS - 1) / 2);
  assert_eq!(event_loop.loop_tally().count, 50);
  assert_eq!(event_loop.loop_tally().sum, expected_sum);
  assert_eq!(count.load(Ordering::Relaxed), 50);
  assert_eq!(sum.load(Ordering::Relaxed), expected_sum);
}

#[derive(Clone)]
struct Beat;

struct BeatSink {
  count: Arc<AtomicUsize>,
}

wiring! {
  loop BeatLoop {
    receiver sink: BeatSink {
      mode: thread,
      receives: [Beat],
    },
  }
}

impl<'a> OnEvent<Beat, BeatLoopBeatSinkDispatcher<'a>> for BeatSink {
  fn on_event(&mut self, _event: Beat, _dispatcher: &mut BeatLoopBeatSinkDispatcher<'a>) {
    self.count.fetch_add(1, Ordering::Relaxed);
  }
}

#[test]
fn a_stopped_loop_can_be_started_again() {
  let count = Arc::new(AtomicUsize::new(0));
  let mut event_loop = BeatLoop::new(BeatSink { count: Arc::clone(&count) });

  event_loop.start().unwrap();
  event_loop.emit(Beat).unwrap();
  while count.load(Ordering::Relaxed) < 1 {
    thread::sleep(Duration::from_millis(1));
  }
  event_loop.stop();
  assert!(!event_loop.is_running());

  event_loop.start().unwrap();
  assert!(event_loop.is_running());
  event_loop.emit(Beat).unwrap();
  while count.load(Ordering::Relaxed) < 2 {
    thread::sleep(Duration::from_millis(1));
  }
  event_loop.stop();

  assert_eq!(count.load(Ordering::Relaxed), 2);
  // Typed access to a thread-hosted receiver goes through its lock.
  let guard = <BeatLoop as Inspect<BeatSink>>::inspect(&event_loop);
  assert_eq!(guard.count.load(Ordering::Relaxed), 2);
}
