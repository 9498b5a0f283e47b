use std::ops::{BitOr, BitOrAssign};

use crate::variant::Variant;

/// Bit-set of variants to suppress from delivery.
///
/// Bit *i* set means "suppress the variant with index *i*". The empty mask
/// suppresses nothing; bits above the last variant are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FilterMask(u32);

impl FilterMask {
    /// Suppress nothing.
    pub const NONE: FilterMask = FilterMask(0);
    /// Suppress journal messages.
    pub const JOURNAL: FilterMask = FilterMask::of(Variant::Journal);
    /// Suppress shipyard messages.
    pub const SHIPYARD: FilterMask = FilterMask::of(Variant::Shipyard);
    /// Suppress commodity messages.
    pub const COMMODITY: FilterMask = FilterMask::of(Variant::Commodity);
    /// Suppress blackmarket messages.
    pub const BLACKMARKET: FilterMask = FilterMask::of(Variant::Blackmarket);
    /// Suppress outfitting messages.
    pub const OUTFITTING: FilterMask = FilterMask::of(Variant::Outfitting);

    /// Mask suppressing exactly one variant.
    pub const fn of(variant: Variant) -> Self {
        FilterMask(1 << variant.index())
    }

    /// Build a mask from raw bits.
    pub const fn from_bits(bits: u32) -> Self {
        FilterMask(bits)
    }

    /// Raw bits of this mask.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Mask suppressing every variant except `variant`.
    pub fn only(variant: Variant) -> Self {
        Variant::ALL
            .into_iter()
            .filter(|other| *other != variant)
            .fold(FilterMask::NONE, |mask, other| mask | FilterMask::of(other))
    }

    /// True if messages of `variant` must not be delivered.
    pub const fn suppresses(self, variant: Variant) -> bool {
        self.0 & (1 << variant.index()) != 0
    }

    /// Variants that will still be delivered under this mask.
    pub fn delivered(self) -> Vec<Variant> {
        Variant::ALL
            .into_iter()
            .filter(|variant| !self.suppresses(*variant))
            .collect()
    }
}

impl BitOr for FilterMask {
    type Output = FilterMask;

    fn bitor(self, rhs: Self) -> Self::Output {
        FilterMask(self.0 | rhs.0)
    }
}

impl BitOrAssign for FilterMask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl From<Variant> for FilterMask {
    fn from(variant: Variant) -> Self {
        FilterMask::of(variant)
    }
}

impl FromIterator<Variant> for FilterMask {
    fn from_iter<I: IntoIterator<Item = Variant>>(iter: I) -> Self {
        iter.into_iter()
            .fold(FilterMask::NONE, |mask, variant| mask | FilterMask::of(variant))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_mask_suppresses_nothing() {
        for variant in Variant::ALL {
            assert!(!FilterMask::NONE.suppresses(variant));
        }
        assert_eq!(FilterMask::default(), FilterMask::NONE);
    }

    #[test]
    fn flags_combine_with_or() {
        let mask = FilterMask::SHIPYARD | FilterMask::COMMODITY;
        assert!(mask.suppresses(Variant::Shipyard));
        assert!(mask.suppresses(Variant::Commodity));
        assert!(!mask.suppresses(Variant::Journal));
        assert_eq!(
            mask.delivered(),
            vec![Variant::Journal, Variant::Blackmarket, Variant::Outfitting]
        );
    }

    #[test]
    fn only_keeps_a_single_variant() {
        let mask = FilterMask::only(Variant::Journal);
        assert_eq!(mask.delivered(), vec![Variant::Journal]);
        assert_eq!(
            mask,
            FilterMask::SHIPYARD
                | FilterMask::COMMODITY
                | FilterMask::BLACKMARKET
                | FilterMask::OUTFITTING
        );
    }

    #[test]
    fn unrelated_bits_are_ignored() {
        let mask = FilterMask::from_bits(1 << 20);
        assert_eq!(mask.delivered().len(), Variant::ALL.len());
    }

    #[test]
    fn collects_from_variants() {
        let mut mask: FilterMask = [Variant::Journal, Variant::Outfitting].into_iter().collect();
        assert_eq!(mask, FilterMask::JOURNAL | FilterMask::OUTFITTING);
        mask |= FilterMask::BLACKMARKET;
        assert!(mask.suppresses(Variant::Blackmarket));
        assert_eq!(mask.bits(), 0b11001);
    }
}
