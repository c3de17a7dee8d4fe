//! Priority ordering mode.

use serde::{Deserialize, Serialize};

/// Which end of the 0..=255 priority range is served first.
///
/// The mode is fixed when a priority queue is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Order {
    /// Priority 0 is most important.
    #[default]
    Asc,
    /// Priority 255 is most important.
    Desc,
}

impl Order {
    /// Returns true if `priority` is strictly more important than `than`.
    pub fn more_important(&self, priority: u8, than: u8) -> bool {
        match self {
            Order::Asc => priority < than,
            Order::Desc => priority > than,
        }
    }

    /// The least important priority value under this mode.
    pub fn least_important(&self) -> u8 {
        match self {
            Order::Asc => u8::MAX,
            Order::Desc => u8::MIN,
        }
    }

    /// The most important priority value under this mode.
    pub fn most_important(&self) -> u8 {
        match self {
            Order::Asc => u8::MIN,
            Order::Desc => u8::MAX,
        }
    }

    /// Iterates priorities from `start` toward less important values,
    /// `start` included.
    pub fn descending_from(&self, start: u8) -> Box<dyn Iterator<Item = u8>> {
        match self {
            Order::Asc => Box::new(start..=u8::MAX),
            Order::Desc => Box::new((u8::MIN..=start).rev()),
        }
    }

    /// Iterates all 256 priorities from most to least important.
    pub fn all(&self) -> Box<dyn Iterator<Item = u8>> {
        self.descending_from(self.most_important())
    }
}

impl std::fmt::Display for Order {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Order::Asc => write!(f, "asc"),
            Order::Desc => write!(f, "desc"),
        }
    }
}

impl std::str::FromStr for Order {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Order::Asc),
            "desc" | "descending" => Ok(Order::Desc),
            other => Err(format!("unknown order: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_more_important_asc() {
        assert!(Order::Asc.more_important(1, 5));
        assert!(!Order::Asc.more_important(5, 1));
        assert!(!Order::Asc.more_important(3, 3));
    }

    #[test]
    fn test_more_important_desc() {
        assert!(Order::Desc.more_important(5, 1));
        assert!(!Order::Desc.more_important(1, 5));
        assert!(!Order::Desc.more_important(3, 3));
    }

    #[test]
    fn test_extremes() {
        assert_eq!(Order::Asc.most_important(), 0);
        assert_eq!(Order::Asc.least_important(), 255);
        assert_eq!(Order::Desc.most_important(), 255);
        assert_eq!(Order::Desc.least_important(), 0);
    }

    #[test]
    fn test_descending_from() {
        let asc: Vec<u8> = Order::Asc.descending_from(253).collect();
        assert_eq!(asc, vec![253, 254, 255]);

        let desc: Vec<u8> = Order::Desc.descending_from(2).collect();
        assert_eq!(desc, vec![2, 1, 0]);
    }

    #[test]
    fn test_all_covers_every_priority() {
        assert_eq!(Order::Asc.all().count(), 256);
        assert_eq!(Order::Desc.all().next(), Some(255));
        assert_eq!(Order::Desc.all().last(), Some(0));
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("asc".parse::<Order>().unwrap(), Order::Asc);
        assert_eq!("DESC".parse::<Order>().unwrap(), Order::Desc);
        assert!("sideways".parse::<Order>().is_err());
        assert_eq!(Order::Desc.to_string(), "desc");
    }
}
