use isosurf_mask::CornerMask;
use proptest::prelude::*;

proptest! {
    // complement(m) == 255 - m over the full 8-bit range
    #[test]
    fn complement_is_all_minus_bits(bits in 0u8..=255) {
        let m = CornerMask::from_bits(bits);
        prop_assert_eq!(m.complement().bits() as u16, 255u16 - bits as u16);
    }

    // m | complement(m) == ALL and m & complement(m) == NONE
    #[test]
    fn complement_partitions_all(bits in 0u8..=255) {
        let m = CornerMask::from_bits(bits);
        prop_assert_eq!(m | m.complement(), CornerMask::ALL);
        prop_assert_eq!(m & m.complement(), CornerMask::NONE);
    }

    // Double complement is the identity
    #[test]
    fn complement_involution(bits in 0u8..=255) {
        let m = CornerMask::from_bits(bits);
        prop_assert_eq!(m.complement().complement(), m);
    }

    // OR is commutative and NONE is its identity
    #[test]
    fn or_laws(a in 0u8..=255, b in 0u8..=255) {
        let (a, b) = (CornerMask::from_bits(a), CornerMask::from_bits(b));
        prop_assert_eq!(a | b, b | a);
        prop_assert_eq!(a | CornerMask::NONE, a);
    }

    // remove really subtracts: (m.remove(s)) & s == NONE, and
    // re-adding the removed intersection restores m
    #[test]
    fn remove_then_restore(a in 0u8..=255, b in 0u8..=255) {
        let (m, s) = (CornerMask::from_bits(a), CornerMask::from_bits(b));
        let removed = m.remove(s);
        prop_assert_eq!(removed & s, CornerMask::NONE);
        prop_assert_eq!(removed | (m & s), m);
    }

    // contains agrees with bitwise subset
    #[test]
    fn contains_is_subset(a in 0u8..=255, b in 0u8..=255) {
        let (m, s) = (CornerMask::from_bits(a), CornerMask::from_bits(b));
        prop_assert_eq!(m.contains(s), (m & s) == s);
    }

    // XOR with ALL is another spelling of complement
    #[test]
    fn xor_all_is_complement(bits in 0u8..=255) {
        let m = CornerMask::from_bits(bits);
        prop_assert_eq!(m ^ CornerMask::ALL, m.complement());
    }
}
