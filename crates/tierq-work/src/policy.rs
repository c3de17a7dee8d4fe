//! Ordering policy and the current-level cursor.
//!
//! The cursor points at the most important nonempty level. It is moved
//! eagerly when a more important level receives an item, and lazily
//! (by a full scan) when the level it points at runs dry. Lower levels
//! are only served once every more important level is empty.

use tierq_models::Order;

use crate::level::Levels;

/// Tracks which priority level is currently being served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    order: Order,
    level: u8,
}

impl Cursor {
    /// Creates a cursor parked at the least important level.
    pub fn new(order: Order) -> Self {
        Self {
            order,
            level: order.least_important(),
        }
    }

    /// Creates a cursor settled on the most important nonempty level.
    pub fn recover(order: Order, levels: &Levels) -> Self {
        let mut cursor = Self::new(order);
        if let Some(priority) = cursor.scan(levels) {
            cursor.level = priority;
        }
        cursor
    }

    /// The ordering mode.
    pub fn order(&self) -> Order {
        self.order
    }

    /// The level the cursor currently points at.
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Preempts the current level if `priority` is more important.
    pub fn on_enqueue(&mut self, priority: u8) {
        if self.order.more_important(priority, self.level) {
            self.level = priority;
        }
    }

    /// Finds the most important nonempty level without moving the cursor.
    pub fn peek(&self, levels: &Levels) -> Option<u8> {
        if !levels.get(self.level).is_empty() {
            return Some(self.level);
        }
        self.scan(levels)
    }

    /// Moves the cursor to the most important nonempty level if the current
    /// one is empty. When every level is empty the cursor is parked at the
    /// least important level and `None` is returned.
    pub fn settle(&mut self, levels: &Levels) -> Option<u8> {
        if !levels.get(self.level).is_empty() {
            return Some(self.level);
        }

        self.level = self.order.least_important();
        let found = self.scan(levels);
        if let Some(priority) = found {
            self.level = priority;
        }
        found
    }

    fn scan(&self, levels: &Levels) -> Option<u8> {
        self.order.all().find(|p| !levels.get(*p).is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn levels_with(items: &[(u8, u64)]) -> Levels {
        let mut levels = Levels::new();
        for (priority, count) in items {
            levels.get_mut(*priority).tail = *count;
        }
        levels
    }

    #[test]
    fn test_new_parks_at_least_important() {
        assert_eq!(Cursor::new(Order::Asc).level(), 255);
        assert_eq!(Cursor::new(Order::Desc).level(), 0);
    }

    #[test]
    fn test_enqueue_preempts_only_more_important() {
        let mut cursor = Cursor::new(Order::Asc);

        cursor.on_enqueue(5);
        assert_eq!(cursor.level(), 5);

        cursor.on_enqueue(9);
        assert_eq!(cursor.level(), 5);

        cursor.on_enqueue(1);
        assert_eq!(cursor.level(), 1);
    }

    #[test]
    fn test_enqueue_preempts_desc() {
        let mut cursor = Cursor::new(Order::Desc);

        cursor.on_enqueue(5);
        cursor.on_enqueue(1);
        assert_eq!(cursor.level(), 5);

        cursor.on_enqueue(200);
        assert_eq!(cursor.level(), 200);
    }

    #[test]
    fn test_settle_finds_most_important() {
        let levels = levels_with(&[(7, 1), (3, 2), (200, 1)]);

        let mut asc = Cursor::new(Order::Asc);
        assert_eq!(asc.settle(&levels), Some(3));
        assert_eq!(asc.level(), 3);

        let mut desc = Cursor::new(Order::Desc);
        assert_eq!(desc.settle(&levels), Some(200));
        assert_eq!(desc.level(), 200);
    }

    #[test]
    fn test_settle_keeps_nonempty_current() {
        let levels = levels_with(&[(7, 1)]);
        let mut cursor = Cursor::new(Order::Asc);
        cursor.on_enqueue(7);

        assert_eq!(cursor.settle(&levels), Some(7));
    }

    #[test]
    fn test_settle_empty_parks_cursor() {
        let levels = Levels::new();
        let mut cursor = Cursor::new(Order::Asc);
        cursor.on_enqueue(4);

        assert_eq!(cursor.settle(&levels), None);
        assert_eq!(cursor.level(), 255);
    }

    #[test]
    fn test_peek_does_not_move() {
        let levels = levels_with(&[(9, 1)]);
        let mut cursor = Cursor::new(Order::Asc);
        cursor.on_enqueue(2);

        assert_eq!(cursor.peek(&levels), Some(9));
        assert_eq!(cursor.level(), 2);
    }

    #[test]
    fn test_recover() {
        let levels = levels_with(&[(0, 1), (128, 3)]);

        assert_eq!(Cursor::recover(Order::Asc, &levels).level(), 0);
        assert_eq!(Cursor::recover(Order::Desc, &levels).level(), 128);
        assert_eq!(Cursor::recover(Order::Asc, &Levels::new()).level(), 255);
    }

    #[test]
    fn test_recover_skips_nonempty_least_important() {
        let asc = levels_with(&[(255, 1), (3, 1)]);
        assert_eq!(Cursor::recover(Order::Asc, &asc).level(), 3);

        let desc = levels_with(&[(0, 1), (9, 1)]);
        assert_eq!(Cursor::recover(Order::Desc, &desc).level(), 9);

        let only_least = levels_with(&[(0, 2)]);
        assert_eq!(Cursor::recover(Order::Desc, &only_least).level(), 0);
    }
}
