//! Board layout generation
//!
//! Pure geometry: pin lattice, payout slot row, wall planes. A `Board` is
//! immutable after `generate`; resizing the play area means generating a
//! fresh board from an updated `BoardConfig`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::settings::BoardConfig;

/// Ordered payout multipliers, mapped 1:1 left-to-right onto the slot row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiplierTable(Vec<f64>);

impl Default for MultiplierTable {
    fn default() -> Self {
        Self(vec![
            110.0, 41.0, 10.0, 5.0, 3.0, 2.0, 1.5, 1.0, 0.5, 0.3, 0.5, 1.0, 1.5, 2.0, 3.0, 5.0,
            10.0, 41.0, 110.0,
        ])
    }
}

impl MultiplierTable {
    /// Build a custom table. Negative multipliers are clamped to zero so a
    /// settlement can never debit the player.
    pub fn new(multipliers: Vec<f64>) -> Self {
        Self(multipliers.into_iter().map(|m| m.max(0.0)).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    /// True if the table reads the same left-to-right and right-to-left.
    /// The default casino table is palindromic; custom tables may not be.
    pub fn is_symmetric(&self) -> bool {
        self.0.iter().eq(self.0.iter().rev())
    }
}

/// One payout zone at the bottom of the board
///
/// Horizontal containment is half-open (`[x, x + width)`) so the contiguous
/// slot row partitions the wall span: every position between the walls maps
/// to exactly one slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Slot {
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }
}

/// Static board geometry, immutable after generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub width: f32,
    pub height: f32,
    pub pin_radius: f32,
    /// Pin centers, top row first, left-to-right within a row
    pub pins: Vec<Vec2>,
    /// Payout zones, left-to-right, one per multiplier
    pub slots: Vec<Slot>,
    pub multipliers: MultiplierTable,
    /// Vertical wall planes, aligned with the outermost slot edges
    pub left_wall: f32,
    pub right_wall: f32,
}

impl Board {
    /// Generate the triangular pin lattice and slot row
    ///
    /// Row `r` (0-indexed) holds `r + 3` pins, horizontally centered.
    /// The slot row spans `multipliers.len()` contiguous zones of
    /// `h_spacing` width, centered under the board; the walls sit at its
    /// outer edges so every ball that reaches slot depth lands in a zone.
    pub fn generate(config: &BoardConfig, multipliers: MultiplierTable) -> Self {
        let mut pins = Vec::new();
        for row in 0..config.rows {
            let pins_in_row = row + 3;
            let row_width = (pins_in_row - 1) as f32 * config.h_spacing;
            let row_start_x = (config.width - row_width) / 2.0;
            let y = config.start_y + row as f32 * config.v_spacing;
            for pin in 0..pins_in_row {
                pins.push(Vec2::new(row_start_x + pin as f32 * config.h_spacing, y));
            }
        }

        // Slot row: one v-spacing below the bottom pins, raised by the
        // overlap margin so the zones overlap the ball's path.
        let slot_y = config.start_y + config.rows as f32 * config.v_spacing
            - config.slot_overlap_margin;
        let slot_count = multipliers.len();
        let slot_row_width = slot_count as f32 * config.h_spacing;
        let slots_left = (config.width - slot_row_width) / 2.0;

        let slots = (0..slot_count)
            .map(|i| Slot {
                x: slots_left + i as f32 * config.h_spacing,
                y: slot_y,
                width: config.h_spacing,
                height: config.slot_height,
            })
            .collect();

        log::debug!(
            "generated board: {} pins in {} rows, {} slots, walls [{:.1}, {:.1}]",
            pins.len(),
            config.rows,
            slot_count,
            slots_left,
            slots_left + slot_row_width,
        );

        Self {
            width: config.width,
            height: config.height,
            pin_radius: config.pin_radius,
            pins,
            slots,
            multipliers,
            left_wall: slots_left,
            right_wall: slots_left + slot_row_width,
        }
    }

    /// Horizontal center of the play area between the walls
    pub fn center_x(&self) -> f32 {
        (self.left_wall + self.right_wall) / 2.0
    }

    /// Index of the slot containing `point`, if any. Scan order is
    /// left-to-right, first match wins. A miss means the ball keeps
    /// falling; misconfigured geometry degrades to the out-of-bounds
    /// fallback instead of a fault.
    pub fn slot_at(&self, point: Vec2) -> Option<usize> {
        self.slots.iter().position(|slot| slot.contains(point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_board() -> Board {
        Board::generate(&BoardConfig::default(), MultiplierTable::default())
    }

    #[test]
    fn test_default_multiplier_table_is_palindromic() {
        let table = MultiplierTable::default();
        assert_eq!(table.len(), 19);
        assert!(table.is_symmetric());
        assert_eq!(table.get(0), Some(110.0));
        assert_eq!(table.get(9), Some(0.3)); // center slot
        assert_eq!(table.get(18), Some(110.0));
    }

    #[test]
    fn test_negative_multipliers_clamped() {
        let table = MultiplierTable::new(vec![-1.0, 0.5, 2.0]);
        assert_eq!(table.get(0), Some(0.0));
    }

    #[test]
    fn test_pin_counts_per_row() {
        let board = default_board();
        // 16 rows, row r holds r + 3 pins: sum = 3 + 4 + ... + 18 = 168
        assert_eq!(board.pins.len(), 168);
        // Top row: 3 pins at start_y
        let top: Vec<_> = board.pins.iter().filter(|p| p.y == 100.0).collect();
        assert_eq!(top.len(), 3);
        // Bottom row: 18 pins
        let bottom_y = 100.0 + 15.0 * 30.0;
        let bottom: Vec<_> = board.pins.iter().filter(|p| p.y == bottom_y).collect();
        assert_eq!(bottom.len(), 18);
    }

    #[test]
    fn test_rows_are_centered() {
        let board = default_board();
        for row in 0..16usize {
            let y = 100.0 + row as f32 * 30.0;
            let xs: Vec<f32> = board.pins.iter().filter(|p| p.y == y).map(|p| p.x).collect();
            let mid = (xs.first().unwrap() + xs.last().unwrap()) / 2.0;
            assert!((mid - 400.0).abs() < 1e-3, "row {row} not centered: {mid}");
        }
    }

    #[test]
    fn test_slots_match_multipliers() {
        let board = default_board();
        assert_eq!(board.slots.len(), board.multipliers.len());
    }

    #[test]
    fn test_slot_row_covers_wall_span() {
        let board = default_board();
        // Contiguous: each slot starts where the previous one ends
        for pair in board.slots.windows(2) {
            assert!((pair[0].x + pair[0].width - pair[1].x).abs() < 1e-3);
        }
        // Outermost edges are the walls
        assert!((board.slots[0].x - board.left_wall).abs() < 1e-3);
        let last = board.slots.last().unwrap();
        assert!((last.x + last.width - board.right_wall).abs() < 1e-3);
        // Every x between the walls maps to exactly one slot
        let y = board.slots[0].y + 1.0;
        let mut x = board.left_wall;
        while x < board.right_wall {
            let hits = board
                .slots
                .iter()
                .filter(|s| s.contains(Vec2::new(x, y)))
                .count();
            assert_eq!(hits, 1, "x = {x} matched {hits} slots");
            x += 0.5;
        }
    }

    #[test]
    fn test_generate_is_idempotent() {
        let config = BoardConfig::default();
        let a = Board::generate(&config, MultiplierTable::default());
        let b = Board::generate(&config, MultiplierTable::default());
        assert_eq!(a, b);
    }

    #[test]
    fn test_resize_regenerates_centered() {
        let mut config = BoardConfig::default();
        config.width = 1200.0;
        let board = Board::generate(&config, MultiplierTable::default());
        assert!((board.center_x() - 600.0).abs() < 1e-3);
    }

    #[test]
    fn test_slot_at_first_match_scan_order() {
        let board = default_board();
        let y = board.slots[0].y + 1.0;
        // On the shared edge between slot 0 and slot 1 the half-open
        // containment assigns slot 1, never both.
        let edge = board.slots[1].x;
        assert_eq!(board.slot_at(Vec2::new(edge, y)), Some(1));
        // Above the slot row: no match
        assert_eq!(board.slot_at(Vec2::new(board.center_x(), 200.0)), None);
    }
}
