// -*- mode: rust; -*-
//
// This file is part of curve25519-donna.
//
// To the extent possible under law, the authors have waived all copyright and
// related or neighboring rights to curve25519-donna, using the Creative
// Commons "CC0" public domain dedication.  See
// <http://creativecommons.org/publicdomain/zero/1.0/> for full details.

//! Field arithmetic modulo \\(p = 2\^{255} - 19\\).
//!
//! The `curve25519_donna::field` module provides a type alias
//! `curve25519_donna::field::FieldElement` to the field element type
//! defined in the `backend` module.
//!
//! Field operations defined in terms of machine
//! operations, such as field multiplication or squaring, are defined in
//! the backend implementation.
//!
//! Field operations defined in terms of other field operations, such as
//! field inversion, are defined here.

use subtle::Choice;
use subtle::ConstantTimeEq;

use crate::backend;

/// A `FieldElement` represents an element of the field
/// \\( \mathbb Z / (2\^{255} - 19)\\).
///
/// The `FieldElement` type is an alias for the 64-bit limb
/// implementation.
pub(crate) type FieldElement = backend::serial::u64::field::FieldElement51;

impl Eq for FieldElement {}

impl PartialEq for FieldElement {
    fn eq(&self, other: &FieldElement) -> bool {
        self.ct_eq(other).into()
    }
}

impl ConstantTimeEq for FieldElement {
    /// Test equality between two `FieldElement`s.  Since the
    /// internal representation is not canonical, the field elements
    /// are normalized to wire format before comparison.
    fn ct_eq(&self, other: &FieldElement) -> Choice {
        self.to_bytes().ct_eq(&other.to_bytes())
    }
}

impl FieldElement {
    /// Determine if this `FieldElement` is zero.
    ///
    /// # Return
    ///
    /// If zero, return `Choice(1)`.  Otherwise, return `Choice(0)`.
    pub(crate) fn is_zero(&self) -> Choice {
        let zero = [0u8; 32];
        let bytes = self.to_bytes();

        bytes.ct_eq(&zero)
    }

    /// Given a nonzero field element, compute its inverse.
    ///
    /// The inverse is computed as self^(p-2), since
    /// x^(p-2)x = x^(p-1) = 1 (mod p).
    ///
    /// The exponent is public, so the chain of squarings and
    /// multiplications below is fixed; it runs in the same time for
    /// every input.
    ///
    /// This function returns zero on input zero.
    #[rustfmt::skip] // keep alignment of explanatory comments
    #[allow(clippy::let_and_return)]
    pub(crate) fn invert(&self) -> FieldElement {
        // The bits of p-2 = 2^255 -19 -2 are 11010111111...11.
        //
        // Each temporary variable t_i is of the form (self)^e_i.
        // Squaring t_i corresponds to multiplying e_i by 2,
        // so the pow2k function shifts e_i left by k places.
        // Multiplying t_i and t_j corresponds to adding e_i + e_j.
        //
        // Temporary t_i                      e_i
        //
        let t0  = self.square();           // 2
        let t1  = t0.pow2k(2);             // 8
        let t2  = self * &t1;              // 9
        let t3  = &t2 * &t0;               // 11
        let t4  = t3.square();             // 22
        let t5  = &t4 * &t2;               // 2^5  - 2^0
        let t6  = t5.pow2k(5);             // 2^10 - 2^5
        let t7  = &t6 * &t5;               // 2^10 - 2^0
        let t8  = t7.pow2k(10);            // 2^20 - 2^10
        let t9  = &t8 * &t7;               // 2^20 - 2^0
        let t10 = t9.pow2k(20);            // 2^40 - 2^20
        let t11 = &t10 * &t9;              // 2^40 - 2^0
        let t12 = t11.pow2k(10);           // 2^50 - 2^10
        let t13 = &t12 * &t7;              // 2^50 - 2^0
        let t14 = t13.pow2k(50);           // 2^100 - 2^50
        let t15 = &t14 * &t13;             // 2^100 - 2^0
        let t16 = t15.pow2k(100);          // 2^200 - 2^100
        let t17 = &t16 * &t15;             // 2^200 - 2^0
        let t18 = t17.pow2k(50);           // 2^250 - 2^50
        let t19 = &t18 * &t13;             // 2^250 - 2^0
        let t20 = t19.pow2k(5);            // 2^255 - 2^5
        let t21 = &t20 * &t3;              // 2^255 - 21

        t21
    }
}

#[cfg(test)]
mod test {
    use crate::backend::serial::u64::field::FieldElement51;
    use crate::field::*;

    use subtle::ConditionallySelectable;

    /// Random element a of GF(2^255-19), from Sage
    /// a = 1070314506888354081329385823235218444233221\
    ///     2228051251926706380353716438957572
    static A_BYTES: [u8; 32] = [
        0x04, 0xfe, 0xdf, 0x98, 0xa7, 0xfa, 0x0a, 0x68, 0x84, 0x92, 0xbd, 0x59, 0x08, 0x07, 0xa7,
        0x03, 0x9e, 0xd1, 0xf6, 0xf2, 0xe1, 0xd9, 0xe2, 0xa4, 0xa4, 0x51, 0x47, 0x36, 0xf3, 0xc3,
        0xa9, 0x17,
    ];

    /// Byte representation of a**2
    static ASQ_BYTES: [u8; 32] = [
        0x75, 0x97, 0x24, 0x9e, 0xe6, 0x06, 0xfe, 0xab, 0x24, 0x04, 0x56, 0x68, 0x07, 0x91, 0x2d,
        0x5d, 0x0b, 0x0f, 0x3f, 0x1c, 0xb2, 0x6e, 0xf2, 0xe2, 0x63, 0x9c, 0x12, 0xba, 0x73, 0x0b,
        0xe3, 0x62,
    ];

    /// Byte representation of 1/a
    static AINV_BYTES: [u8; 32] = [
        0x96, 0x1b, 0xcd, 0x8d, 0x4d, 0x5e, 0xa2, 0x3a, 0xe9, 0x36, 0x37, 0x93, 0xdb, 0x7b, 0x4d,
        0x70, 0xb8, 0x0d, 0xc0, 0x55, 0xd0, 0x4c, 0x1d, 0x7b, 0x90, 0x71, 0xd8, 0xe9, 0xb6, 0x18,
        0xe6, 0x30,
    ];

    /// Notice that the last element has the high bit set, which
    /// should be ignored
    static B_BYTES: [u8; 32] = [
        113, 191, 169, 143, 91, 234, 121, 15, 241, 131, 217, 36, 230, 101, 92, 234, 8, 208, 170,
        251, 97, 127, 70, 210, 58, 23, 166, 87, 240, 169, 184, 178,
    ];

    /// p = 2^255 - 19, little-endian.
    static P_BYTES: [u8; 32] = [
        0xed, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0x7f,
    ];

    fn small(x: u64) -> FieldElement {
        FieldElement::from_bytes(&{
            let mut bytes = [0u8; 32];
            bytes[..8].copy_from_slice(&x.to_le_bytes());
            bytes
        })
    }

    #[test]
    fn a_mul_a_vs_a_squared_constant() {
        let a = FieldElement::from_bytes(&A_BYTES);
        let asq = FieldElement::from_bytes(&ASQ_BYTES);
        assert_eq!(asq, &a * &a);
    }

    #[test]
    fn a_square_vs_a_squared_constant() {
        let a = FieldElement::from_bytes(&A_BYTES);
        let asq = FieldElement::from_bytes(&ASQ_BYTES);
        assert_eq!(asq, a.square());
    }

    #[test]
    fn square_is_limbwise_identical_to_mul() {
        let a = FieldElement::from_bytes(&A_BYTES);
        let b = FieldElement::from_bytes(&B_BYTES);
        // An uncarried sum exercises limbs above 2^51.
        let c = &a + &b;
        for x in [a, b, c, FieldElement::ZERO, FieldElement::ONE] {
            assert_eq!(x.square().0, (&x * &x).0);
        }
    }

    #[test]
    fn pow2k_is_repeated_squaring() {
        let a = FieldElement::from_bytes(&A_BYTES);
        let mut expected = a;
        for _ in 0..7 {
            expected = expected.square();
        }
        assert_eq!(a.pow2k(7).0, expected.0);
    }

    #[test]
    fn mul_is_commutative_limbwise() {
        let a = FieldElement::from_bytes(&A_BYTES);
        let b = FieldElement::from_bytes(&B_BYTES);
        assert_eq!((&a * &b).0, (&b * &a).0);
    }

    #[test]
    fn a_invert_vs_inverse_of_a_constant() {
        let a = FieldElement::from_bytes(&A_BYTES);
        let ainv = FieldElement::from_bytes(&AINV_BYTES);
        let should_be_inverse = a.invert();
        assert_eq!(ainv, should_be_inverse);
        assert_eq!(FieldElement::ONE, &a * &should_be_inverse);
    }

    #[test]
    fn invert_zero_is_zero() {
        assert!(bool::from(FieldElement::ZERO.invert().is_zero()));
    }

    #[test]
    fn equality() {
        let a = FieldElement::from_bytes(&A_BYTES);
        let ainv = FieldElement::from_bytes(&AINV_BYTES);
        assert!(a == a);
        assert!(a != ainv);
    }

    #[test]
    fn from_bytes_highbit_is_ignored() {
        let mut cleared_bytes = B_BYTES;
        cleared_bytes[31] &= 127u8;
        let with_highbit_set = FieldElement::from_bytes(&B_BYTES);
        let without_highbit_set = FieldElement::from_bytes(&cleared_bytes);
        assert_eq!(without_highbit_set, with_highbit_set);
    }

    #[test]
    fn encoding_is_canonical() {
        // Encode 1 wrongly as 1 + (2^255 - 19) = 2^255 - 18
        let one_encoded_wrongly_bytes: [u8; 32] = [
            0xee, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
            0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
            0xff, 0xff, 0xff, 0x7f,
        ];
        // Decode to a field element
        let one = FieldElement::from_bytes(&one_encoded_wrongly_bytes);
        // .. then check that the encoding is correct
        let one_bytes = one.to_bytes();
        assert_eq!(one_bytes[0], 1);
        for byte in &one_bytes[1..] {
            assert_eq!(*byte, 0);
        }
    }

    #[test]
    fn encoding_of_p_and_neighbours() {
        // p encodes to 0
        assert_eq!(FieldElement::from_bytes(&P_BYTES).to_bytes(), [0u8; 32]);

        // p - 1 is canonical and must survive unchanged
        let mut p_minus_one = P_BYTES;
        p_minus_one[0] -= 1;
        assert_eq!(FieldElement::from_bytes(&p_minus_one).to_bytes(), p_minus_one);

        // 2^255 - 1 = p + 18
        let mut all_ones = [0xffu8; 32];
        all_ones[31] = 0x7f;
        assert_eq!(FieldElement::from_bytes(&all_ones).to_bytes(), small(18).to_bytes());
        assert_eq!(small(18).to_bytes()[0], 18);
    }

    #[test]
    fn encoding_reduces_unreduced_limbs() {
        // Each limb at 2^54 - 1, well past the 51-bit carried form.
        let big = FieldElement51([(1 << 54) - 1; 5]);
        let bytes = big.to_bytes();
        assert!(bytes[31] & 0x80 == 0);
        // Multiplying by one carries the limbs; the value must not change.
        assert_eq!(bytes, (&big * &FieldElement::ONE).to_bytes());
    }

    #[test]
    fn decode_of_encode_is_identity_for_canonical_limbs() {
        for bytes in [A_BYTES, ASQ_BYTES, AINV_BYTES] {
            let x = FieldElement::from_bytes(&bytes);
            assert_eq!(x.to_bytes(), bytes);
            assert_eq!(FieldElement::from_bytes(&x.to_bytes()).0, x.0);
        }
    }

    #[test]
    fn difference_backwards_subtracts_self_from_rhs() {
        let a = FieldElement::from_bytes(&A_BYTES);
        let b = FieldElement::from_bytes(&B_BYTES);

        // d = a - b
        let mut d = b;
        d.difference_backwards(&a);
        assert_eq!(&d + &b, a);

        // b - a is the negation of a - b
        let mut e = a;
        e.difference_backwards(&b);
        assert!(bool::from((&d + &e).is_zero()));
    }

    #[test]
    fn difference_backwards_borrows_across_every_limb() {
        // 0 - 1 = p - 1
        let mut x = FieldElement::ONE;
        x.difference_backwards(&FieldElement::ZERO);
        let mut p_minus_one = P_BYTES;
        p_minus_one[0] -= 1;
        assert_eq!(x.to_bytes(), p_minus_one);

        // x - x = 0
        let a = FieldElement::from_bytes(&A_BYTES);
        let mut y = a;
        y.difference_backwards(&a);
        assert_eq!(y.0, [0u64; 5]);
    }

    #[test]
    fn difference_backwards_wraps_twice_for_large_subtrahend() {
        // A carried product can exceed p: limb 2 sits at 2^51 here, and the
        // value is p + 16950344771469312.
        let big = FieldElement51([1187746075672557, 7, 1 << 51, (1 << 51) - 1, (1 << 51) - 1]);
        let rhs = small(2803722522624);

        let mut d = big;
        d.difference_backwards(&rhs);
        assert!(d.0.iter().all(|&limb| limb < (1 << 52)));
        assert_eq!(&d + &big, rhs);
    }

    #[test]
    fn scalar_product_sum_matches_field_mul() {
        let a = FieldElement::from_bytes(&A_BYTES);
        let b = FieldElement::from_bytes(&B_BYTES);
        let product_sum = a.scalar_product_sum(121665, &b);
        assert_eq!(product_sum, &(&a * &small(121665)) + &b);
    }

    #[test]
    fn conditional_swap() {
        let a = FieldElement::from_bytes(&A_BYTES);
        let b = FieldElement::from_bytes(&B_BYTES);

        let (mut x, mut y) = (a, b);
        FieldElement::conditional_swap(&mut x, &mut y, Choice::from(0));
        assert_eq!(x.0, a.0);
        assert_eq!(y.0, b.0);

        FieldElement::conditional_swap(&mut x, &mut y, Choice::from(1));
        assert_eq!(x.0, b.0);
        assert_eq!(y.0, a.0);
    }

    #[test]
    fn conditional_select() {
        let a = FieldElement::from_bytes(&A_BYTES);
        let b = FieldElement::from_bytes(&B_BYTES);
        assert_eq!(FieldElement::conditional_select(&a, &b, Choice::from(0)).0, a.0);
        assert_eq!(FieldElement::conditional_select(&a, &b, Choice::from(1)).0, b.0);
    }
}
