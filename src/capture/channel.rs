// --- EVENT CHANNEL ---
// Lock-free hand-off between the hook callback (producer) and the drag worker (consumer).
//
// Button events go through a fixed ring of slots; moves go through a single
// overwrite-in-place cell. The producer only touches `head`, the slots, the move
// cell and the pending flag; the consumer only touches `tail`.

use super::{ButtonEvent, ButtonKind};
use crate::geometry::ScreenPoint;
use std::sync::atomic::{fence, AtomicBool, AtomicU8, AtomicU64, AtomicUsize, Ordering};

pub const CHANNEL_CAPACITY: usize = 128;

/// One ring slot. `seq` holds `index + 1` of the event last published into it,
/// so the consumer can tell a live slot from one the producer has lapped.
struct Slot {
    seq: AtomicUsize,
    kind: AtomicU8,
    pos: AtomicU64,
}

impl Slot {
    const fn empty() -> Self {
        Slot {
            seq: AtomicUsize::new(0),
            kind: AtomicU8::new(0),
            pos: AtomicU64::new(0),
        }
    }
}

pub struct EventChannel {
    slots: [Slot; CHANNEL_CAPACITY],
    head: AtomicUsize,
    tail: AtomicUsize,
    latest_move: AtomicU64,
    move_pending: AtomicBool,
}

/// What one drain pass produced besides the events themselves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainReport {
    pub delivered: usize,
    /// Events overwritten before the consumer reached them.
    pub lost: usize,
}

impl Default for EventChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl EventChannel {
    pub fn new() -> Self {
        EventChannel {
            slots: [const { Slot::empty() }; CHANNEL_CAPACITY],
            head: AtomicUsize::new(0),
            tail: AtomicUsize::new(0),
            latest_move: AtomicU64::new(0),
            move_pending: AtomicBool::new(false),
        }
    }

    // --- PRODUCER SIDE (hook thread only) ---

    /// Publishes a button event. Never blocks; when the ring is full the oldest
    /// unread event is overwritten.
    pub fn push_button(&self, event: ButtonEvent) {
        let index = self.head.load(Ordering::Relaxed);
        let slot = &self.slots[index % CHANNEL_CAPACITY];

        // Invalidate first so a consumer racing on this slot rejects the torn read.
        slot.seq.store(0, Ordering::Relaxed);
        fence(Ordering::Release);
        slot.kind.store(event.kind as u8, Ordering::Relaxed);
        slot.pos.store(event.position.pack(), Ordering::Relaxed);
        slot.seq.store(index.wrapping_add(1), Ordering::Release);

        self.head.store(index.wrapping_add(1), Ordering::Release);
    }

    /// Replaces the pending move sample with `p`.
    pub fn store_move(&self, p: ScreenPoint) {
        self.latest_move.store(p.pack(), Ordering::Relaxed);
        self.move_pending.store(true, Ordering::Release);
    }

    // --- CONSUMER SIDE (worker thread only) ---

    /// Appends every button event published before this call to `out`, oldest
    /// first, and advances `tail` past them.
    pub fn drain_buttons(&self, out: &mut Vec<ButtonEvent>) -> DrainReport {
        let head = self.head.load(Ordering::Acquire);
        let mut tail = self.tail.load(Ordering::Relaxed);
        let mut report = DrainReport::default();

        let backlog = head.wrapping_sub(tail);
        if backlog > CHANNEL_CAPACITY {
            report.lost = backlog - CHANNEL_CAPACITY;
            tail = head.wrapping_sub(CHANNEL_CAPACITY);
        }

        while tail != head {
            match self.read_slot(tail) {
                Some(event) => {
                    out.push(event);
                    report.delivered += 1;
                }
                None => report.lost += 1,
            }
            tail = tail.wrapping_add(1);
        }

        self.tail.store(tail, Ordering::Release);
        report
    }

    /// Takes the latest move sample if one arrived since the previous call.
    pub fn take_move(&self) -> Option<ScreenPoint> {
        if self.move_pending.swap(false, Ordering::AcqRel) {
            Some(ScreenPoint::unpack(self.latest_move.load(Ordering::Relaxed)))
        } else {
            None
        }
    }

    /// Unconsumed button events, capped at the ring capacity.
    pub fn pending_buttons(&self) -> usize {
        let head = self.head.load(Ordering::Acquire);
        let tail = self.tail.load(Ordering::Relaxed);
        head.wrapping_sub(tail).min(CHANNEL_CAPACITY)
    }

    fn read_slot(&self, index: usize) -> Option<ButtonEvent> {
        let slot = &self.slots[index % CHANNEL_CAPACITY];
        let expected = index.wrapping_add(1);
        if slot.seq.load(Ordering::Acquire) != expected {
            return None;
        }
        let kind = slot.kind.load(Ordering::Relaxed);
        let pos = slot.pos.load(Ordering::Relaxed);
        fence(Ordering::Acquire);
        if slot.seq.load(Ordering::Relaxed) != expected {
            return None;
        }
        Some(ButtonEvent {
            kind: ButtonKind::from_u8(kind)?,
            position: ScreenPoint::unpack(pos),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn ev(kind: ButtonKind, x: i32) -> ButtonEvent {
        ButtonEvent {
            kind,
            position: ScreenPoint::new(x, -x),
        }
    }

    #[test]
    fn test_events_arrive_in_order_exactly_once() {
        let ch = EventChannel::new();
        let kinds = [
            ButtonKind::PrimaryDown,
            ButtonKind::PrimaryUp,
            ButtonKind::SecondaryDown,
            ButtonKind::SecondaryUp,
        ];
        for i in 0..40 {
            ch.push_button(ev(kinds[i % 4], i as i32));
        }

        let mut out = Vec::new();
        let report = ch.drain_buttons(&mut out);
        assert_eq!(report, DrainReport { delivered: 40, lost: 0 });
        for (i, e) in out.iter().enumerate() {
            assert_eq!(*e, ev(kinds[i % 4], i as i32));
        }

        out.clear();
        assert_eq!(ch.drain_buttons(&mut out).delivered, 0);
        assert!(out.is_empty());
    }

    #[test]
    fn test_overflow_keeps_last_capacity_events_oldest_first() {
        let ch = EventChannel::new();
        let extra = 37;
        for i in 0..(CHANNEL_CAPACITY + extra) {
            ch.push_button(ev(ButtonKind::PrimaryDown, i as i32));
        }
        assert_eq!(ch.pending_buttons(), CHANNEL_CAPACITY);

        let mut out = Vec::new();
        let report = ch.drain_buttons(&mut out);
        assert_eq!(report.delivered, CHANNEL_CAPACITY);
        assert_eq!(report.lost, extra);
        let xs: Vec<i32> = out.iter().map(|e| e.position.x).collect();
        let expected: Vec<i32> = (extra as i32..(CHANNEL_CAPACITY + extra) as i32).collect();
        assert_eq!(xs, expected);
    }

    #[test]
    fn test_drain_resumes_after_partial_consumption() {
        let ch = EventChannel::new();
        let mut out = Vec::new();
        for round in 0..5 {
            for i in 0..100 {
                ch.push_button(ev(ButtonKind::SecondaryUp, round * 100 + i));
            }
            out.clear();
            let report = ch.drain_buttons(&mut out);
            assert_eq!(report.lost, 0);
            assert_eq!(out.len(), 100);
            assert_eq!(out[0].position.x, round * 100);
            assert_eq!(out[99].position.x, round * 100 + 99);
        }
    }

    #[test]
    fn test_moves_coalesce_to_latest() {
        let ch = EventChannel::new();
        assert_eq!(ch.take_move(), None);

        ch.store_move(ScreenPoint::new(1, 1));
        ch.store_move(ScreenPoint::new(2, 2));
        ch.store_move(ScreenPoint::new(3, 3));
        assert_eq!(ch.take_move(), Some(ScreenPoint::new(3, 3)));
        assert_eq!(ch.take_move(), None);
    }

    #[test]
    fn test_concurrent_producer_preserves_order() {
        let ch = Arc::new(EventChannel::new());
        let total = 20_000;

        let producer = {
            let ch = Arc::clone(&ch);
            std::thread::spawn(move || {
                for i in 0..total {
                    // Stay well inside the ring so nothing is overwritten.
                    while ch.pending_buttons() > CHANNEL_CAPACITY / 2 {
                        std::thread::yield_now();
                    }
                    ch.push_button(ev(ButtonKind::PrimaryDown, i));
                }
            })
        };

        let mut seen = Vec::with_capacity(total as usize);
        let mut out = Vec::new();
        while seen.len() < total as usize {
            out.clear();
            let report = ch.drain_buttons(&mut out);
            assert_eq!(report.lost, 0);
            seen.extend(out.iter().map(|e| e.position.x));
            std::thread::yield_now();
        }
        producer.join().unwrap();

        let expected: Vec<i32> = (0..total).collect();
        assert_eq!(seen, expected);
    }
}
