//! End-to-end ordering scenarios.

use tempfile::tempdir;
use tierq_models::Order;
use tierq_work::{PriorityQueue, QueueError};

fn seed(queue: &PriorityQueue) {
    queue.enqueue(5, "a").unwrap();
    queue.enqueue(1, "b").unwrap();
    queue.enqueue(5, "c").unwrap();
}

fn next(queue: &PriorityQueue) -> String {
    queue.dequeue().unwrap().to_string_lossy()
}

#[test]
fn test_ascending_serves_low_values_first() {
    let dir = tempdir().unwrap();
    let queue = PriorityQueue::open(dir.path(), Order::Asc).unwrap();
    seed(&queue);

    assert_eq!(next(&queue), "b");
    assert_eq!(next(&queue), "a");
    assert_eq!(next(&queue), "c");
    assert!(matches!(queue.dequeue(), Err(QueueError::Empty)));
}

#[test]
fn test_descending_serves_high_values_first() {
    let dir = tempdir().unwrap();
    let queue = PriorityQueue::open(dir.path(), Order::Desc).unwrap();
    seed(&queue);

    assert_eq!(next(&queue), "a");
    assert_eq!(next(&queue), "c");
    assert_eq!(next(&queue), "b");
}

#[test]
fn test_dequeue_by_priority_ignores_cursor() {
    let dir = tempdir().unwrap();
    let queue = PriorityQueue::open(dir.path(), Order::Asc).unwrap();
    seed(&queue);

    let item = queue.dequeue_by_priority(5).unwrap();
    assert_eq!(item.as_str(), Some("a"));
    assert_eq!(queue.peek().unwrap().as_str(), Some("b"));
}

#[test]
fn test_update_keeps_position_and_counters() {
    let dir = tempdir().unwrap();
    let queue = PriorityQueue::open(dir.path(), Order::Asc).unwrap();
    seed(&queue);

    let mut item = queue.peek_by_priority_id(5, 2).unwrap();
    queue.update(&mut item, "z").unwrap();

    let peeked = queue.peek_by_priority_id(5, 2).unwrap();
    assert_eq!(peeked.as_str(), Some("z"));
    assert_eq!(queue.len(), 3);
    assert_eq!(queue.level_len(5), 2);
    assert_eq!(queue.level_len(1), 1);

    assert_eq!(next(&queue), "b");
    assert_eq!(next(&queue), "a");
    assert_eq!(next(&queue), "z");
}

#[test]
fn test_peeks_do_not_change_length() {
    let dir = tempdir().unwrap();
    let queue = PriorityQueue::open(dir.path(), Order::Asc).unwrap();
    seed(&queue);

    let item = queue.peek_by_priority_id(1, 1).unwrap();
    assert_eq!(item.as_str(), Some("b"));
    queue.peek().unwrap();
    queue.peek_by_offset(2).unwrap();

    assert_eq!(queue.len(), 3);
    assert!(matches!(
        queue.peek_by_offset(queue.len()),
        Err(QueueError::OutOfBounds)
    ));
}

#[test]
fn test_interleaved_priorities_keep_fifo_within_level() {
    let dir = tempdir().unwrap();
    let queue = PriorityQueue::open(dir.path(), Order::Asc).unwrap();

    for i in 0..30u32 {
        let priority = (i % 3) as u8 * 10;
        queue.enqueue(priority, format!("{}-{}", priority, i)).unwrap();
    }

    let mut out = Vec::new();
    while let Ok(item) = queue.dequeue() {
        out.push((item.priority, item.id));
    }

    assert_eq!(out.len(), 30);
    let mut sorted = out.clone();
    sorted.sort();
    assert_eq!(out, sorted);
}
