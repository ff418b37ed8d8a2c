/// Bits used per axis in a packed [`GridKey`].
const AXIS_BITS: u32 = 32;
const AXIS_MASK: u128 = (1 << AXIS_BITS) - 1;

/// A grid coordinate packed into a single `u128` (32 biased bits per axis,
/// laid out `x | y << 32 | z << 64`). Every `i32` coordinate has its own
/// key, so distinct cells never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridKey(u128);

impl GridKey {
    /// Pack a coordinate.
    #[must_use]
    pub fn pack(x: i32, y: i32, z: i32) -> Self {
        Self(bias(x) | (bias(y) << AXIS_BITS) | (bias(z) << (2 * AXIS_BITS)))
    }

    /// Recover the coordinate.
    #[must_use]
    pub fn unpack(self) -> (i32, i32, i32) {
        let unbias = |shift: u32| {
            let biased = ((self.0 >> shift) & AXIS_MASK) as u32;
            (biased ^ 0x8000_0000) as i32
        };
        (unbias(0), unbias(AXIS_BITS), unbias(2 * AXIS_BITS))
    }

    /// The raw packed value.
    #[must_use]
    pub fn raw(self) -> u128 {
        self.0
    }
}

/// Flip the sign bit so `i32::MIN..=i32::MAX` maps onto `0..=u32::MAX` in
/// order.
fn bias(v: i32) -> u128 {
    u128::from((v as u32) ^ 0x8000_0000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_unpack_preserves_signed_coordinates() {
        for &(x, y, z) in &[
            (0, 0, 0),
            (-1, 2, -3),
            (i32::MIN, i32::MAX, 0),
            (2_000_000, -5_000_000, 77),
        ] {
            assert_eq!(GridKey::pack(x, y, z).unpack(), (x, y, z));
        }
    }

    #[test]
    fn neighbouring_cells_get_distinct_keys() {
        let a = GridKey::pack(1, 0, 0);
        let b = GridKey::pack(0, 1, 0);
        let c = GridKey::pack(0, 0, 1);
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, c);
    }

    #[test]
    fn far_cells_stay_distinct() {
        assert_ne!(
            GridKey::pack(2_000_000, 0, 0),
            GridKey::pack(2_000_001, 0, 0)
        );
        assert_ne!(GridKey::pack(i32::MAX, 0, 0), GridKey::pack(i32::MAX - 1, 0, 0));
    }

    #[test]
    fn key_order_follows_x_within_a_row() {
        assert!(GridKey::pack(-3, 0, 0) < GridKey::pack(4, 0, 0));
    }
}
