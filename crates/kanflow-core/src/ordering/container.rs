use serde::{Deserialize, Serialize};

/// Which kind of container a parent key refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderedTable {
    /// Columns ordered within a board (parent key: board id)
    Columns,
    /// Tasks ordered within a column (parent key: column id)
    Tasks,
}

impl OrderedTable {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderedTable::Columns => "columns",
            OrderedTable::Tasks => "tasks",
        }
    }
}

/// Direction of a shift range update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShiftDelta {
    /// `position + 1`: opens a slot
    Increment,
    /// `position - 1`: closes a slot
    Decrement,
}

impl ShiftDelta {
    pub fn as_i64(&self) -> i64 {
        match self {
            ShiftDelta::Increment => 1,
            ShiftDelta::Decrement => -1,
        }
    }
}

/// A bulk position update scoped to one container
///
/// Affects every row with `parent == parent_id` and
/// `lower <= position <= upper` (`upper == None` means unbounded).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftRange {
    pub parent_id: String,
    pub lower: u32,
    pub upper: Option<u32>,
    pub delta: ShiftDelta,
}

impl ShiftRange {
    pub fn between(parent_id: impl Into<String>, lower: u32, upper: u32, delta: ShiftDelta) -> Self {
        Self {
            parent_id: parent_id.into(),
            lower,
            upper: Some(upper),
            delta,
        }
    }

    /// Close the hole left at `position`: decrement everything after it
    pub fn closing_gap_after(parent_id: impl Into<String>, position: u32) -> Self {
        Self {
            parent_id: parent_id.into(),
            lower: position.saturating_add(1),
            upper: None,
            delta: ShiftDelta::Decrement,
        }
    }

    /// Open a slot at `position`: increment it and everything after it
    pub fn opening_gap_at(parent_id: impl Into<String>, position: u32) -> Self {
        Self {
            parent_id: parent_id.into(),
            lower: position,
            upper: None,
            delta: ShiftDelta::Increment,
        }
    }

    pub fn contains(&self, parent_id: &str, position: u32) -> bool {
        parent_id == self.parent_id
            && position >= self.lower
            && self.upper.map_or(true, |upper| position <= upper)
    }

    /// Position after this shift, for a row inside the range
    ///
    /// A decrement never takes a position below zero.
    pub fn shifted(&self, position: u32) -> u32 {
        match self.delta {
            ShiftDelta::Increment => position.saturating_add(1),
            ShiftDelta::Decrement => position.saturating_sub(1),
        }
    }
}

/// Position for an item appended to a container whose highest position is `max`
pub fn next_position(max: Option<u32>) -> u32 {
    max.map_or(0, |m| m.saturating_add(1))
}

/// Clamp a requested slot into `[0, max]`
pub fn clamp_position(requested: u32, max: u32) -> u32 {
    requested.min(max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_position() {
        assert_eq!(next_position(None), 0);
        assert_eq!(next_position(Some(0)), 1);
        assert_eq!(next_position(Some(4)), 5);
    }

    #[test]
    fn test_clamp_position() {
        assert_eq!(clamp_position(2, 5), 2);
        assert_eq!(clamp_position(9, 5), 5);
        assert_eq!(clamp_position(0, 0), 0);
    }

    #[test]
    fn test_closing_gap_range_excludes_removed_slot() {
        let range = ShiftRange::closing_gap_after("col-a", 1);
        assert!(!range.contains("col-a", 1));
        assert!(range.contains("col-a", 2));
        assert!(range.contains("col-a", 100));
        assert!(!range.contains("col-b", 2));
        assert_eq!(range.delta.as_i64(), -1);
    }

    #[test]
    fn test_opening_gap_range_includes_target_slot() {
        let range = ShiftRange::opening_gap_at("col-b", 0);
        assert!(range.contains("col-b", 0));
        assert!(range.contains("col-b", 3));
        assert_eq!(range.shifted(3), 4);
    }

    #[test]
    fn test_between_is_inclusive() {
        let range = ShiftRange::between("c", 1, 3, ShiftDelta::Decrement);
        assert!(!range.contains("c", 0));
        assert!(range.contains("c", 1));
        assert!(range.contains("c", 3));
        assert!(!range.contains("c", 4));
    }
}
