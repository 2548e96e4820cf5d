#![no_main]

use std::collections::VecDeque;

use blocking_ring::BoundedBlockingQueue;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&first, ops)) = data.split_first() else {
        return;
    };
    let capacity = usize::from(first % 32) + 1;
    let Ok(queue) = BoundedBlockingQueue::new(capacity) else {
        return;
    };
    let mut model = VecDeque::with_capacity(capacity);

    for &op in ops {
        if op & 1 == 0 {
            let accepted = queue.try_put(op).is_ok();
            assert_eq!(accepted, model.len() < capacity);
            if accepted {
                model.push_back(op);
            }
        } else {
            assert_eq!(queue.try_get().ok(), model.pop_front());
        }
        assert_eq!(queue.len(), model.len());
        assert_eq!(queue.is_full(), model.len() == capacity);
        assert_eq!(queue.is_empty(), model.is_empty());
    }
});
