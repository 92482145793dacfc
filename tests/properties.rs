use std::collections::VecDeque;

use proptest::prelude::*;
use ringdeque::RingBuffer;

const PROPTEST_CASES: u32 = 256;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[derive(Debug, Clone)]
enum Op {
    PushBack(i32),
    PopBack,
    PopFront,
    Insert(usize, i32),
    Erase(usize),
    EraseRange(usize, usize),
    Reserve(usize),
    Clear,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => any::<i32>().prop_map(Op::PushBack),
        1 => Just(Op::PopBack),
        2 => Just(Op::PopFront),
        2 => (0..20usize, any::<i32>()).prop_map(|(at, v)| Op::Insert(at, v)),
        1 => (0..20usize).prop_map(Op::Erase),
        1 => (0..20usize, 0..20usize).prop_map(|(a, b)| Op::EraseRange(a, b)),
        1 => (0..24usize).prop_map(Op::Reserve),
        1 => Just(Op::Clear),
    ]
}

/// Applies `op` to the model the way the ring buffer is documented to.
fn apply_model(model: &mut VecDeque<i32>, capacity: &mut usize, op: &Op) {
    match *op {
        Op::PushBack(v) => {
            if *capacity == 0 {
                return;
            }
            if model.len() == *capacity {
                model.pop_front();
            }
            model.push_back(v);
        }
        Op::PopBack => {
            model.pop_back();
        }
        Op::PopFront => {
            model.pop_front();
        }
        Op::Insert(at, v) => {
            if at >= model.len() {
                apply_model(model, capacity, &Op::PushBack(v));
            } else {
                if model.len() == *capacity {
                    model.pop_back();
                }
                model.insert(at, v);
            }
        }
        Op::Erase(at) => {
            if at < model.len() {
                model.remove(at);
            }
        }
        Op::EraseRange(first, last) => {
            let last = last.min(model.len());
            if first < last {
                model.drain(first..last);
            }
        }
        Op::Reserve(n) => *capacity = (*capacity).max(n),
        Op::Clear => model.clear(),
    }
}

fn apply_ring(ring: &mut RingBuffer<i32>, op: &Op) {
    match *op {
        Op::PushBack(v) => ring.push_back(v),
        Op::PopBack => {
            ring.pop_back();
        }
        Op::PopFront => {
            ring.pop_front();
        }
        Op::Insert(at, v) => {
            ring.insert(at, v);
        }
        Op::Erase(at) => {
            ring.erase(at);
        }
        Op::EraseRange(first, last) => {
            ring.erase_range(first, last);
        }
        Op::Reserve(n) => ring.reserve(n),
        Op::Clear => ring.clear(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(PROPTEST_CASES))]

    #[test]
    fn matches_vecdeque_model(capacity in 0..8usize,
                              ops in prop::collection::vec(op(), 1..200)) {
        init_tracing();
        let mut ring = RingBuffer::with_capacity(capacity);
        let mut model = VecDeque::new();
        let mut model_capacity = capacity;

        for op in &ops {
            apply_ring(&mut ring, op);
            apply_model(&mut model, &mut model_capacity, op);

            prop_assert_eq!(ring.capacity(), model_capacity);
            prop_assert_eq!(ring.len(), model.len());
            prop_assert!(ring.len() <= ring.capacity());
            prop_assert_eq!(ring.is_full(), ring.len() == ring.capacity());
            prop_assert_eq!(ring.is_empty(), model.is_empty());
            prop_assert_eq!(ring.front(), model.front());
            prop_assert_eq!(ring.back(), model.back());
            prop_assert!(ring.iter().eq(model.iter()));
        }
    }

    #[test]
    fn wraparound_push_keeps_newest(capacity in 1..16usize, extra in 1..40usize) {
        let mut ring = RingBuffer::with_capacity(capacity);
        for i in 0..capacity + extra {
            ring.push_back(i);
        }
        prop_assert_eq!(ring.len(), capacity);
        prop_assert_eq!(ring.front(), Some(&extra));
        prop_assert_eq!(ring.back(), Some(&(capacity + extra - 1)));
    }

    #[test]
    fn insert_then_erase_round_trips(values in prop::collection::vec(any::<i16>(), 0..12),
                                     rotate in 0..12usize,
                                     pos in 0..16usize,
                                     v in any::<i16>()) {
        let mut ring = RingBuffer::with_capacity(values.len() + 1);
        // move the front away from slot 0
        for _ in 0..rotate {
            ring.push_back(0);
            ring.pop_front();
        }
        ring.extend(values.iter().copied());
        let before: Vec<_> = ring.iter().copied().collect();

        let at = ring.insert(pos, v);
        prop_assert_eq!(ring.get(at), Some(&v));
        ring.erase(at);
        prop_assert_eq!(ring, before);
    }

    #[test]
    fn reserve_preserves_order(values in prop::collection::vec(any::<u8>(), 1..20),
                               capacity in 1..10usize,
                               grow in 1..20usize) {
        let mut ring = RingBuffer::with_capacity(capacity);
        ring.extend(values.iter().copied());
        let before: Vec<_> = ring.iter().copied().collect();

        ring.reserve(capacity + grow);
        prop_assert_eq!(ring.capacity(), capacity + grow);
        prop_assert_eq!(ring, before);
    }

    #[test]
    fn pop_back_undoes_push_back(values in prop::collection::vec(any::<i64>(), 0..9), v in any::<i64>()) {
        let mut ring = RingBuffer::with_capacity(10);
        ring.extend(values.iter().copied());
        let len = ring.len();
        ring.push_back(v);
        prop_assert_eq!(ring.pop_back(), Some(v));
        prop_assert_eq!(ring.len(), len);
    }
}
