// -*- mode: rust; -*-
//
// This file is part of curve25519-donna.
//
// To the extent possible under law, the authors have waived all copyright and
// related or neighboring rights to curve25519-donna, using the Creative
// Commons "CC0" public domain dedication.  See
// <http://creativecommons.org/publicdomain/zero/1.0/> for full details.

//! Field arithmetic modulo \\(p = 2\^{255} - 19\\), using \\(64\\)-bit
//! limbs with \\(128\\)-bit products.

use core::fmt::Debug;
use core::ops::{Add, AddAssign};
use core::ops::{Mul, MulAssign};

use subtle::Choice;
use subtle::ConditionallySelectable;

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

/// Mask selecting the low 51 bits of a limb.
const LOW_51_BIT_MASK: u64 = (1u64 << 51) - 1;

/// A `FieldElement51` represents an element of the field
/// \\( \mathbb Z / (2\^{255} - 19)\\).
///
/// In the 64-bit implementation, a `FieldElement` is represented in
/// radix \\(2\^{51}\\) as five `u64`s; the coefficients are allowed to
/// grow up to \\(2\^{54}\\) between reductions modulo \\(p\\).
///
/// Multiplication, squaring and subtraction leave their output carried,
/// with limbs at (or a few units above) \\(2\^{51}\\).  Additions,
/// including the one inside `scalar_product_sum`, are left uncarried, so a
/// sum may only be fed to a multiply, a square or
/// [`FieldElement51::to_bytes`] before it is carried by one of those.
///
/// # Note
///
/// The `curve25519_donna::field` module provides a type alias
/// `FieldElement` to `FieldElement51`; the backend-specific name should
/// not be used outside of the `field` module.
#[derive(Copy, Clone)]
pub struct FieldElement51(pub(crate) [u64; 5]);

impl Debug for FieldElement51 {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "FieldElement51({:?})", &self.0[..])
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for FieldElement51 {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

/// Multiply two 64-bit integers with 128 bits of output.
#[inline(always)]
fn m(x: u64, y: u64) -> u128 {
    (x as u128) * (y as u128)
}

/// Convert an array of (at least) eight bytes into a u64.
#[inline(always)]
fn load8(input: &[u8]) -> u64 {
    (input[0] as u64)
        | ((input[1] as u64) << 8)
        | ((input[2] as u64) << 16)
        | ((input[3] as u64) << 24)
        | ((input[4] as u64) << 32)
        | ((input[5] as u64) << 40)
        | ((input[6] as u64) << 48)
        | ((input[7] as u64) << 56)
}

impl<'b> AddAssign<&'b FieldElement51> for FieldElement51 {
    /// Limb-wise sum with no carry.
    fn add_assign(&mut self, _rhs: &'b FieldElement51) {
        for i in 0..5 {
            self.0[i] += _rhs.0[i];
        }
    }
}

impl<'a, 'b> Add<&'b FieldElement51> for &'a FieldElement51 {
    type Output = FieldElement51;
    fn add(self, _rhs: &'b FieldElement51) -> FieldElement51 {
        let mut output = *self;
        output += _rhs;
        output
    }
}

impl<'b> MulAssign<&'b FieldElement51> for FieldElement51 {
    fn mul_assign(&mut self, _rhs: &'b FieldElement51) {
        let result = &*self * _rhs;
        self.0 = result.0;
    }
}

impl<'a, 'b> Mul<&'b FieldElement51> for &'a FieldElement51 {
    type Output = FieldElement51;

    #[rustfmt::skip] // keep alignment of c[i] calculations
    fn mul(self, _rhs: &'b FieldElement51) -> FieldElement51 {
        // Alias self, _rhs for more readable formulas
        let a: &[u64; 5] = &self.0;
        let b: &[u64; 5] = &_rhs.0;

        // The carry (c[i] >> 51) of the accumulators below fits into a u64
        // iff the input limbs are at most 54 bits wide.
        debug_assert!(a[0] < (1 << 54)); debug_assert!(b[0] < (1 << 54));
        debug_assert!(a[1] < (1 << 54)); debug_assert!(b[1] < (1 << 54));
        debug_assert!(a[2] < (1 << 54)); debug_assert!(b[2] < (1 << 54));
        debug_assert!(a[3] < (1 << 54)); debug_assert!(b[3] < (1 << 54));
        debug_assert!(a[4] < (1 << 54)); debug_assert!(b[4] < (1 << 54));

        // Terms landing at or above 2^255 wrap around to the bottom
        // multiplied by 19, so fold the 19 in before accumulating.
        let a1_19 = a[1] * 19;
        let a2_19 = a[2] * 19;
        let a3_19 = a[3] * 19;
        let a4_19 = a[4] * 19;

        // Multiply to get 128-bit coefficients of output
        let c0: u128 = m(a[0], b[0]) + m(a4_19, b[1]) + m(a1_19, b[4]) + m(a2_19, b[3]) + m(a3_19, b[2]);
        let c1: u128 = m(a[0], b[1]) + m(a[1],  b[0]) + m(a4_19, b[2]) + m(a2_19, b[4]) + m(a3_19, b[3]);
        let c2: u128 = m(a[0], b[2]) + m(a[2],  b[0]) + m(a[1],  b[1]) + m(a4_19, b[3]) + m(a3_19, b[4]);
        let c3: u128 = m(a[0], b[3]) + m(a[3],  b[0]) + m(a[1],  b[2]) + m(a[2],  b[1]) + m(a4_19, b[4]);
        let c4: u128 = m(a[0], b[4]) + m(a[4],  b[0]) + m(a[3],  b[1]) + m(a[1],  b[3]) + m(a[2],  b[2]);

        FieldElement51::carry_wide([c0, c1, c2, c3, c4])
    }
}

impl ConditionallySelectable for FieldElement51 {
    fn conditional_select(
        a: &FieldElement51,
        b: &FieldElement51,
        choice: Choice,
    ) -> FieldElement51 {
        FieldElement51([
            u64::conditional_select(&a.0[0], &b.0[0], choice),
            u64::conditional_select(&a.0[1], &b.0[1], choice),
            u64::conditional_select(&a.0[2], &b.0[2], choice),
            u64::conditional_select(&a.0[3], &b.0[3], choice),
            u64::conditional_select(&a.0[4], &b.0[4], choice),
        ])
    }

    /// Exchange `a` and `b` iff `choice` is set, touching every limb of
    /// both operands with the same instructions either way.
    fn conditional_swap(a: &mut FieldElement51, b: &mut FieldElement51, choice: Choice) {
        // 0 - 0 = all zeroes, 0 - 1 = all ones
        let mask = 0u64.wrapping_sub(choice.unwrap_u8() as u64);
        for i in 0..5 {
            let x = mask & (a.0[i] ^ b.0[i]);
            a.0[i] ^= x;
            b.0[i] ^= x;
        }
    }

    fn conditional_assign(&mut self, other: &FieldElement51, choice: Choice) {
        for i in 0..5 {
            self.0[i].conditional_assign(&other.0[i], choice);
        }
    }
}

impl FieldElement51 {
    /// The scalar \\( 0 \\).
    pub const ZERO: FieldElement51 = FieldElement51([0, 0, 0, 0, 0]);
    /// The scalar \\( 1 \\).
    pub const ONE: FieldElement51 = FieldElement51([1, 0, 0, 0, 0]);

    /// Carry the 128-bit accumulators of a product down to five limbs.
    ///
    /// One full pass takes every accumulator below \\(2\^{51}\\), folding
    /// the overflow of the top limb back into the bottom one multiplied by
    /// 19.  That fold can push limb 0 over \\(2\^{51}\\) again, so a short
    /// second pass moves its excess up through limbs 1 and 2; limb 2 may
    /// be left a few units above \\(2\^{51}\\).
    #[inline(always)]
    fn carry_wide(mut c: [u128; 5]) -> FieldElement51 {
        // The 128-bit accumulators live in two 64-bit registers each.  By
        // rebinding the names after carrying, we inform LLVM that the
        // values have shrunk, so it can free the upper registers.
        c[1] += c[0] >> 51;
        let mut r0: u64 = (c[0] as u64) & LOW_51_BIT_MASK;
        c[2] += c[1] >> 51;
        let mut r1: u64 = (c[1] as u64) & LOW_51_BIT_MASK;
        c[3] += c[2] >> 51;
        let mut r2: u64 = (c[2] as u64) & LOW_51_BIT_MASK;
        c[4] += c[3] >> 51;
        let r3: u64 = (c[3] as u64) & LOW_51_BIT_MASK;
        let carry: u64 = (c[4] >> 51) as u64;
        let r4: u64 = (c[4] as u64) & LOW_51_BIT_MASK;

        r0 += carry * 19;
        r1 += r0 >> 51;
        r0 &= LOW_51_BIT_MASK;
        r2 += r1 >> 51;
        r1 &= LOW_51_BIT_MASK;

        FieldElement51([r0, r1, r2, r3, r4])
    }

    /// Set `self` to `rhs - self`.
    ///
    /// Note the order of the operands.  The ladder always wants the
    /// difference written over the subtrahend, which saves a copy.
    ///
    /// The subtraction is done on signed limbs.  Borrows are propagated up
    /// in rounds, and a borrow out of the top limb wraps to limb 0 as 19.
    /// Borrow decisions are made with masks from arithmetic shifts rather
    /// than branches.
    ///
    /// Both operands must be carried.  A carried `self` may lie anywhere in
    /// \([0, 2p)\), so the difference can need two wraps before it is
    /// nonnegative; the third round settles the borrows of the second wrap.
    pub(crate) fn difference_backwards(&mut self, rhs: &FieldElement51) {
        const TWO_TO_THE_51: i64 = 1 << 51;

        let mut r: [i64; 5] = [
            (rhs.0[0] as i64) - (self.0[0] as i64),
            (rhs.0[1] as i64) - (self.0[1] as i64),
            (rhs.0[2] as i64) - (self.0[2] as i64),
            (rhs.0[3] as i64) - (self.0[3] as i64),
            (rhs.0[4] as i64) - (self.0[4] as i64),
        ];

        /// If `r[i]` is negative, borrow `2^51` for it from `r[j]`, which
        /// is charged `weight` units.
        #[inline(always)]
        fn borrow(r: &mut [i64; 5], i: usize, j: usize, weight: i64) {
            // All ones if r[i] is negative, all zeroes otherwise.
            let t = r[i] >> 63;
            r[j] -= weight & t;
            r[i] += TWO_TO_THE_51 & t;
        }

        for _ in 0..3 {
            borrow(&mut r, 0, 1, 1);
            borrow(&mut r, 1, 2, 1);
            borrow(&mut r, 2, 3, 1);
            borrow(&mut r, 3, 4, 1);
            borrow(&mut r, 4, 0, 19);
        }

        debug_assert!(r.iter().all(|&limb| limb >= 0));

        self.0 = [r[0] as u64, r[1] as u64, r[2] as u64, r[3] as u64, r[4] as u64];
    }

    /// Compute `self * scalar + add`, where `scalar` is a small constant
    /// (the ladder uses 121665).
    ///
    /// The product is carried; `add` is then summed in without a carry.
    pub(crate) fn scalar_product_sum(&self, scalar: u64, add: &FieldElement51) -> FieldElement51 {
        let a: &[u64; 5] = &self.0;
        let mut r = [0u64; 5];
        let mut carry: u64 = 0;

        for i in 0..5 {
            let c: u128 = m(a[i], scalar) + (carry as u128);
            r[i] = (c as u64) & LOW_51_BIT_MASK;
            carry = (c >> 51) as u64;
        }
        r[0] += carry * 19;

        FieldElement51([
            r[0] + add.0[0],
            r[1] + add.0[1],
            r[2] + add.0[2],
            r[3] + add.0[3],
            r[4] + add.0[4],
        ])
    }

    /// Load a `FieldElement51` from the low 255 bits of a 256-bit
    /// input.
    ///
    /// # Warning
    ///
    /// This function does not check that the input used the canonical
    /// representative.  It masks the high bit, but it will happily
    /// decode 2^255 - 18 to 1.  Applications that require a canonical
    /// encoding of every field element should decode, re-encode to
    /// the canonical encoding, and check that the input was
    /// canonical.
    #[rustfmt::skip] // keep alignment of bit shifts
    pub fn from_bytes(bytes: &[u8; 32]) -> FieldElement51 {
        FieldElement51(
        // load bits [  0, 64), no shift
        [  load8(&bytes[ 0..])        & LOW_51_BIT_MASK
        // load bits [ 48,112), shift to [ 51,112)
        , (load8(&bytes[ 6..]) >>  3) & LOW_51_BIT_MASK
        // load bits [ 96,160), shift to [102,160)
        , (load8(&bytes[12..]) >>  6) & LOW_51_BIT_MASK
        // load bits [152,216), shift to [153,216)
        , (load8(&bytes[19..]) >>  1) & LOW_51_BIT_MASK
        // load bits [192,256), shift to [204,255)
        , (load8(&bytes[24..]) >> 12) & LOW_51_BIT_MASK
        ])
    }

    /// Serialize this `FieldElement51` to a 32-byte array.  The
    /// encoding is canonical: the output is always the unique
    /// representative in \\([0, p)\\).
    pub fn to_bytes(self) -> [u8; 32] {
        let mut t = self.0;

        /// Carry limbs 0 through 3 into their successors.
        #[inline(always)]
        fn carry(t: &mut [u64; 5]) {
            t[1] += t[0] >> 51;
            t[0] &= LOW_51_BIT_MASK;
            t[2] += t[1] >> 51;
            t[1] &= LOW_51_BIT_MASK;
            t[3] += t[2] >> 51;
            t[2] &= LOW_51_BIT_MASK;
            t[4] += t[3] >> 51;
            t[3] &= LOW_51_BIT_MASK;
        }

        /// Carry every limb, wrapping the top carry around as 19.
        #[inline(always)]
        fn carry_full(t: &mut [u64; 5]) {
            carry(t);
            t[0] += 19 * (t[4] >> 51);
            t[4] &= LOW_51_BIT_MASK;
        }

        carry_full(&mut t);
        carry_full(&mut t);

        // Now t is in [0, 2^255), properly carried.  Either t < p, or t is
        // one of the 19 values in [p, 2^255).  Adding 19 moves the second
        // case past 2^255, where the wrap-around carry reduces it.
        t[0] += 19;
        carry_full(&mut t);

        // Now t is in [19, 2^255) and offset by 19.  Adding
        // 2^255 - 19 = p removes the offset and lands in [2^255, 2^256 - 19).
        t[0] += (1u64 << 51) - 19;
        t[1] += (1u64 << 51) - 1;
        t[2] += (1u64 << 51) - 1;
        t[3] += (1u64 << 51) - 1;
        t[4] += (1u64 << 51) - 1;

        // Carry, discarding bit 255 instead of wrapping it, which subtracts
        // the 2^255 offset.
        carry(&mut t);
        t[4] &= LOW_51_BIT_MASK;

        // Pack 5 * 51 bits into 4 * 64 bits, little-endian.
        let mut s = [0u8; 32];
        for n in 0..4 {
            let shift = 13 * n as u32;
            let word = (t[n] >> shift) | (t[n + 1] << (51 - shift));
            s[8 * n..8 * n + 8].copy_from_slice(&word.to_le_bytes());
        }

        // High bit should be zero.
        debug_assert!((s[31] & 0b1000_0000u8) == 0u8);

        s
    }

    /// Given `k > 0`, return `self^(2^k)`.
    #[rustfmt::skip] // keep alignment of c[i] calculations
    pub fn pow2k(&self, mut k: u32) -> FieldElement51 {
        debug_assert!(k > 0);

        let mut a: [u64; 5] = self.0;

        loop {
            debug_assert!(a[0] < (1 << 54));
            debug_assert!(a[1] < (1 << 54));
            debug_assert!(a[2] < (1 << 54));
            debug_assert!(a[3] < (1 << 54));
            debug_assert!(a[4] < (1 << 54));

            // Precondition: assume input limbs a[i] are bounded as
            //
            // a[i] < 2^(51 + b)
            //
            // where b is a real parameter measuring the "bit excess" of the
            // limbs.  Cross terms appear twice in a square, so they are
            // doubled once up front instead of multiplied twice.
            let d0    = a[0] * 2;
            let d1    = a[1] * 2;
            let d2_19 = a[2] * 2 * 19;
            let a4_19 = a[4] * 19;
            let d4_19 = a4_19 * 2;
            let a3_19 = a[3] * 19;

            let c0: u128 = m(a[0], a[0]) + m(d4_19, a[1]) + m(d2_19, a[3]);
            let c1: u128 = m(d0,   a[1]) + m(d4_19, a[2]) + m(a[3],  a3_19);
            let c2: u128 = m(d0,   a[2]) + m(a[1],  a[1]) + m(d4_19, a[3]);
            let c3: u128 = m(d0,   a[3]) + m(d1,    a[2]) + m(a[4],  a4_19);
            let c4: u128 = m(d0,   a[4]) + m(d1,    a[3]) + m(a[2],  a[2]);

            a = FieldElement51::carry_wide([c0, c1, c2, c3, c4]).0;

            k -= 1;
            if k == 0 {
                break;
            }
        }

        FieldElement51(a)
    }

    /// Returns the square of this field element.
    ///
    /// The result is identical, limb for limb, to `self * self`.
    pub fn square(&self) -> FieldElement51 {
        self.pow2k(1)
    }
}
