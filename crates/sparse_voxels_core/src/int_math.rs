use num::PrimInt;

/// The least power of 2 that is at least `x`, found by scanning powers of 2 starting at 1. Returns 1 for `x <= 1`, and `None`
/// if that power of 2 is not representable in `T`.
#[inline]
pub fn next_power_of_two<T: PrimInt>(x: T) -> Option<T> {
    let max_shiftable = T::max_value() >> 1;
    let mut r = T::one();
    while r < x {
        if r > max_shiftable {
            return None;
        }
        r = r << 1;
    }

    Some(r)
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn next_pow2() {
        assert_eq!(next_power_of_two(-3), Some(1));
        assert_eq!(next_power_of_two(0), Some(1));
        assert_eq!(next_power_of_two(1), Some(1));
        assert_eq!(next_power_of_two(2), Some(2));
        assert_eq!(next_power_of_two(3), Some(4));
        assert_eq!(next_power_of_two(16), Some(16));
        assert_eq!(next_power_of_two(17), Some(32));
        assert_eq!(next_power_of_two(64u32), Some(64));
    }

    #[test]
    fn next_pow2_stops_at_the_largest_representable_power() {
        assert_eq!(next_power_of_two(1i32 << 30), Some(1 << 30));
        assert_eq!(next_power_of_two((1i32 << 30) + 1), None);
        assert_eq!(next_power_of_two(i32::MAX), None);
        assert_eq!(next_power_of_two(200u8), None);
        assert_eq!(next_power_of_two(u32::MAX), None);
        assert_eq!(next_power_of_two((1u32 << 31) - 1), Some(1 << 31));
    }
}
