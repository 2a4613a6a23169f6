//! Corner-configuration bitmask algebra for the iso-surface lookup.
//!
//! ```text
//!              v4_______e4_____________v5
//!                  /|                    /|
//!                 / |                   / |
//!              e7/  |                e5/  |
//!               /___|______e6_________/   |
//!            v7|    |                 |v6 |e9
//!              |    |                 |   |
//!              |    |e8               |e10|
//!           e11|    |                 |   |
//!              |    |_________________|___|
//!              |   / v0      e0       |   /v1
//!              |  /                   |  /
//!              | /e3                  | /e1
//!              |/_____________________|/
//!              v3         e2          v2
//! ```
//!
//! The numeric bit values index the configuration table and are shared with
//! every other crate in the workspace; they must never change.
#![forbid(unsafe_code)]

use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, Not};

/// Occupancy configuration of a cube neighborhood, one bit per corner.
///
/// Edge and face constants are fixed unions of corner bits, usable both as
/// combination values and as lookup keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CornerMask(u8);

impl CornerMask {
    pub const NONE: CornerMask = CornerMask(0);

    pub const V0: CornerMask = CornerMask(1);
    pub const V1: CornerMask = CornerMask(2);
    pub const V2: CornerMask = CornerMask(4);
    pub const V3: CornerMask = CornerMask(8);
    pub const V4: CornerMask = CornerMask(16);
    pub const V5: CornerMask = CornerMask(32);
    pub const V6: CornerMask = CornerMask(64);
    pub const V7: CornerMask = CornerMask(128);

    pub const ALL: CornerMask = CornerMask(255);

    // Edges: union of the two adjacent corners along the cube wire-frame.
    pub const E0: CornerMask = Self::V0.or(Self::V1);
    pub const E1: CornerMask = Self::V1.or(Self::V2);
    pub const E2: CornerMask = Self::V2.or(Self::V3);
    pub const E3: CornerMask = Self::V3.or(Self::V0);
    pub const E4: CornerMask = Self::V4.or(Self::V5);
    pub const E5: CornerMask = Self::V5.or(Self::V6);
    pub const E6: CornerMask = Self::V6.or(Self::V7);
    pub const E7: CornerMask = Self::V7.or(Self::V4);
    pub const E8: CornerMask = Self::V0.or(Self::V4);
    pub const E9: CornerMask = Self::V1.or(Self::V5);
    pub const E10: CornerMask = Self::V2.or(Self::V6);
    pub const E11: CornerMask = Self::V3.or(Self::V7);

    // Faces: union of the four bounding edges.
    pub const BOTTOM: CornerMask = Self::E0.or(Self::E1).or(Self::E2).or(Self::E3);
    pub const TOP: CornerMask = Self::E7.or(Self::E4).or(Self::E5).or(Self::E6);
    pub const LEFT: CornerMask = Self::E8.or(Self::E3).or(Self::E11).or(Self::E7);
    pub const RIGHT: CornerMask = Self::E9.or(Self::E1).or(Self::E10).or(Self::E5);
    pub const BACK: CornerMask = Self::E0.or(Self::E9).or(Self::E4).or(Self::E8);
    pub const FRONT: CornerMask = Self::E2.or(Self::E10).or(Self::E6).or(Self::E11);

    /// The eight primitive corner bits in index order.
    pub const CORNERS: [CornerMask; 8] = [
        Self::V0,
        Self::V1,
        Self::V2,
        Self::V3,
        Self::V4,
        Self::V5,
        Self::V6,
        Self::V7,
    ];

    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn or(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }

    #[inline]
    pub const fn and(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }

    /// Complement restricted to the eight corner bits (`ALL ^ self`).
    #[inline]
    pub const fn complement(self) -> Self {
        Self(!self.0)
    }

    /// Clears every bit of `rhs` from `self`.
    #[inline]
    pub const fn remove(self, rhs: Self) -> Self {
        Self(self.0 & !rhs.0)
    }

    /// Whether every bit of `other` is set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_all(self) -> bool {
        self.0 == 255
    }
}

impl BitOr for CornerMask {
    type Output = CornerMask;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        self.or(rhs)
    }
}

impl BitOrAssign for CornerMask {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.or(rhs);
    }
}

impl BitAnd for CornerMask {
    type Output = CornerMask;
    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        self.and(rhs)
    }
}

impl BitAndAssign for CornerMask {
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        *self = self.and(rhs);
    }
}

impl BitXor for CornerMask {
    type Output = CornerMask;
    #[inline]
    fn bitxor(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }
}

impl Not for CornerMask {
    type Output = CornerMask;
    #[inline]
    fn not(self) -> Self {
        self.complement()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The bit patterns below are the lookup protocol; a change here breaks
    // every table built against them.
    #[test]
    fn corner_bits_are_powers_of_two() {
        for (i, c) in CornerMask::CORNERS.iter().enumerate() {
            assert_eq!(c.bits(), 1u8 << i);
        }
    }

    #[test]
    fn edges_are_adjacent_corner_unions() {
        let expected = [
            (CornerMask::E0, CornerMask::V0, CornerMask::V1),
            (CornerMask::E1, CornerMask::V1, CornerMask::V2),
            (CornerMask::E2, CornerMask::V2, CornerMask::V3),
            (CornerMask::E3, CornerMask::V3, CornerMask::V0),
            (CornerMask::E4, CornerMask::V4, CornerMask::V5),
            (CornerMask::E5, CornerMask::V5, CornerMask::V6),
            (CornerMask::E6, CornerMask::V6, CornerMask::V7),
            (CornerMask::E7, CornerMask::V7, CornerMask::V4),
            (CornerMask::E8, CornerMask::V0, CornerMask::V4),
            (CornerMask::E9, CornerMask::V1, CornerMask::V5),
            (CornerMask::E10, CornerMask::V2, CornerMask::V6),
            (CornerMask::E11, CornerMask::V3, CornerMask::V7),
        ];
        for (edge, a, b) in expected {
            assert_eq!(edge, a | b);
        }
    }

    #[test]
    fn faces_are_bounding_edge_unions() {
        assert_eq!(
            CornerMask::BOTTOM,
            CornerMask::E0 | CornerMask::E1 | CornerMask::E2 | CornerMask::E3
        );
        assert_eq!(
            CornerMask::TOP,
            CornerMask::E7 | CornerMask::E4 | CornerMask::E5 | CornerMask::E6
        );
        assert_eq!(
            CornerMask::LEFT,
            CornerMask::E8 | CornerMask::E3 | CornerMask::E11 | CornerMask::E7
        );
        assert_eq!(
            CornerMask::RIGHT,
            CornerMask::E9 | CornerMask::E1 | CornerMask::E10 | CornerMask::E5
        );
        assert_eq!(
            CornerMask::BACK,
            CornerMask::E0 | CornerMask::E9 | CornerMask::E4 | CornerMask::E8
        );
        assert_eq!(
            CornerMask::FRONT,
            CornerMask::E2 | CornerMask::E10 | CornerMask::E6 | CornerMask::E11
        );
    }

    #[test]
    fn face_values_are_stable() {
        assert_eq!(CornerMask::BOTTOM.bits(), 15);
        assert_eq!(CornerMask::TOP.bits(), 240);
        assert_eq!(CornerMask::LEFT.bits(), 153);
        assert_eq!(CornerMask::RIGHT.bits(), 102);
        assert_eq!(CornerMask::BACK.bits(), 51);
        assert_eq!(CornerMask::FRONT.bits(), 204);
    }

    #[test]
    fn complement_of_extremes() {
        assert_eq!(!CornerMask::NONE, CornerMask::ALL);
        assert_eq!(!CornerMask::ALL, CornerMask::NONE);
    }

    #[test]
    fn remove_clears_membership() {
        let m = CornerMask::BOTTOM.remove(CornerMask::V1);
        assert!(!m.contains(CornerMask::V1));
        assert!(m.contains(CornerMask::V0));
        assert_eq!(m | CornerMask::V1, CornerMask::BOTTOM);
    }
}
