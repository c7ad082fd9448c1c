// -*- mode: rust; -*-
//
// This file is part of curve25519-donna.
//
// To the extent possible under law, the authors have waived all copyright and
// related or neighboring rights to curve25519-donna, using the Creative
// Commons "CC0" public domain dedication.  See
// <http://creativecommons.org/publicdomain/zero/1.0/> for full details.

//! Scalar multiplication on the Montgomery form of Curve25519.
//!
//! Montgomery arithmetic works not on the curve itself, but on the
//! \\(u\\)-line, which discards sign information and unifies the curve
//! and its quadratic twist.  See [_Montgomery curves and their
//! arithmetic_][costello-smith] by Costello and Smith for more details.
//!
//! The `MontgomeryPoint` struct contains the affine \\(u\\)-coordinate
//! \\(u\_0(P)\\) of a point \\(P\\) on either the curve or the twist.
//! Here the map \\(u\_0 : \mathcal M \rightarrow \mathbb F\_p \\) is
//! defined by \\(u\_0((u,v)) = u\\) for \\(u \neq \infty\\) and
//! \\(u\_0(\infty) = 0\\).
//!
//! Scalar multiplication on the \\(u\\)-line is provided by
//! [`MontgomeryPoint::mul_clamped`], which clamps the scalar and runs a
//! Montgomery ladder with a fixed number of steps.  Input points are
//! never validated: any 32 bytes decode to some \\(u\\), and every \\(u\\)
//! yields a well-defined result.
//!
//! [costello-smith]: https://eprint.iacr.org/2017/212.pdf

// We allow non snake_case names because coordinates in projective space are
// traditionally denoted by the capitalisation of their respective
// counterparts in affine space.
#![allow(non_snake_case)]

use core::hash::{Hash, Hasher};

use crate::backend::serial::u64::constants::AMINUS2_OVER_FOUR;
use crate::field::FieldElement;
use crate::scalar::clamp_integer;

use subtle::Choice;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

/// Holds the \\(u\\)-coordinate of a point on the Montgomery form of
/// Curve25519 or its twist.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MontgomeryPoint(pub [u8; 32]);

/// Equality of `MontgomeryPoint`s is defined mod p.
impl ConstantTimeEq for MontgomeryPoint {
    fn ct_eq(&self, other: &MontgomeryPoint) -> Choice {
        let self_fe = FieldElement::from_bytes(&self.0);
        let other_fe = FieldElement::from_bytes(&other.0);

        self_fe.ct_eq(&other_fe)
    }
}

impl PartialEq for MontgomeryPoint {
    fn eq(&self, other: &MontgomeryPoint) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for MontgomeryPoint {}

// Equal MontgomeryPoints must hash to the same value. So we have to get them into a canonical
// encoding first
impl Hash for MontgomeryPoint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Do a round trip through a `FieldElement`. `to_bytes` is guaranteed to give a canonical
        // 32-byte encoding
        let canonical_bytes = FieldElement::from_bytes(&self.0).to_bytes();
        canonical_bytes.hash(state);
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for MontgomeryPoint {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl MontgomeryPoint {
    /// The point at \\(u = 0\\), which is the image of the identity (and of
    /// the point of order two).  It is a fixed point of every scalar
    /// multiplication.
    pub const ZERO: MontgomeryPoint = MontgomeryPoint([0u8; 32]);

    /// View this `MontgomeryPoint` as an array of bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert this `MontgomeryPoint` to an array of bytes.
    pub const fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Determine whether this point encodes \\(u = 0\\), in constant time.
    pub fn is_zero(&self) -> Choice {
        FieldElement::from_bytes(&self.0).is_zero()
    }

    /// Multiply this point by `clamp_integer(bytes)`. For a description of clamping, see
    /// [`clamp_integer`].
    ///
    /// This is the X25519 function of RFC 7748.
    pub fn mul_clamped(self, bytes: [u8; 32]) -> Self {
        #[allow(unused_mut)]
        let mut scalar = clamp_integer(bytes);

        let result = self.ladder(&scalar).as_affine();

        #[cfg(feature = "zeroize")]
        scalar.zeroize();

        result
    }

    /// Run the Montgomery ladder for the 256 bits of `scalar`, most
    /// significant first, returning the projective result.
    ///
    /// The ladder keeps two points, \\(nQ\\) and \\((n+1)Q\\), whose
    /// difference is always the input \\(Q\\).  Each step reads one scalar
    /// bit, swaps the pair iff the bit differs from the previous one, and
    /// replaces the pair with \\(2 \cdot nQ\\) and \\(nQ + (n+1)Q\\).
    ///
    /// Every scalar, clamped or not, takes exactly 256 steps, and each step
    /// executes the same field operations whatever the bit.
    pub(crate) fn ladder(&self, scalar: &[u8; 32]) -> ProjectivePoint {
        let affine_u = FieldElement::from_bytes(&self.0);

        let mut nq = ProjectivePoint::identity();
        let mut nqpq = ProjectivePoint {
            X: affine_u,
            Z: FieldElement::ONE,
        };

        let mut lastbit: u8 = 0;
        for i in (0..256).rev() {
            let bit: u8 = (scalar[i >> 3] >> (i & 7)) & 1;
            ProjectivePoint::conditional_swap(&mut nq, &mut nqpq, Choice::from(bit ^ lastbit));
            lastbit = bit;

            differential_add_and_double(&mut nq, &mut nqpq, &affine_u);
        }
        // The final value of lastbit is bit 0 of the scalar.
        ProjectivePoint::conditional_swap(&mut nq, &mut nqpq, Choice::from(lastbit));

        // Don't leave the bit or the other ladder point on the stack
        #[cfg(feature = "zeroize")]
        {
            lastbit.zeroize();
            nqpq.zeroize();
        }

        nq
    }
}

/// A `ProjectivePoint` holds a point on the projective line
/// \\( \mathbb P(\mathbb F\_p) \\), which we identify with the Kummer
/// line of the Montgomery curve.
///
/// Two of these make up the state of the Montgomery ladder.
#[derive(Copy, Clone, Debug)]
pub(crate) struct ProjectivePoint {
    pub X: FieldElement,
    pub Z: FieldElement,
}

impl ProjectivePoint {
    /// The identity, \\((1 : 0)\\).
    pub(crate) fn identity() -> ProjectivePoint {
        ProjectivePoint {
            X: FieldElement::ONE,
            Z: FieldElement::ZERO,
        }
    }

    /// Dehomogenize this point to affine coordinates.
    ///
    /// # Return
    ///
    /// * \\( u = X / Z \\) if \\( Z \neq 0 \\);
    /// * \\( 0 \\) if \\( Z = 0 \\).
    pub(crate) fn as_affine(&self) -> MontgomeryPoint {
        let u = &self.X * &self.Z.invert();
        MontgomeryPoint(u.to_bytes())
    }
}

impl ConditionallySelectable for ProjectivePoint {
    fn conditional_select(
        a: &ProjectivePoint,
        b: &ProjectivePoint,
        choice: Choice,
    ) -> ProjectivePoint {
        ProjectivePoint {
            X: FieldElement::conditional_select(&a.X, &b.X, choice),
            Z: FieldElement::conditional_select(&a.Z, &b.Z, choice),
        }
    }

    /// Swap the \\(X\\) limbs and the \\(Z\\) limbs independently, each
    /// with the mask-and-xor exchange of the field backend.
    fn conditional_swap(a: &mut ProjectivePoint, b: &mut ProjectivePoint, choice: Choice) {
        FieldElement::conditional_swap(&mut a.X, &mut b.X, choice);
        FieldElement::conditional_swap(&mut a.Z, &mut b.Z, choice);
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for ProjectivePoint {
    fn zeroize(&mut self) {
        self.X.zeroize();
        self.Z.zeroize();
    }
}

/// Perform the double-and-add step of the Montgomery ladder.
///
/// Given projective points
/// \\( (X\_P : Z\_P) = P \\),
/// \\( (X\_Q : Z\_Q) = Q \\),
/// and the affine difference
/// \\(      u\_{Q-P} = u(Q-P) \\),
/// set
/// $$
///     (X\_P : Z\_P) \gets [2]P
/// $$
/// and
/// $$
///     (X\_Q : Z\_Q) \gets P + Q.
/// $$
///
/// Differences are written with `difference_backwards`, which overwrites
/// its receiver with `rhs - self`; every sum is left uncarried and fed
/// straight into a multiply or square.
#[rustfmt::skip] // keep alignment of explanatory comments
fn differential_add_and_double(
    P: &mut ProjectivePoint,
    Q: &mut ProjectivePoint,
    affine_PmQ: &FieldElement,
) {
    let orig_xp = P.X;
    P.X += &P.Z;                         // X_P + Z_P
    P.Z.difference_backwards(&orig_xp);  // X_P - Z_P

    let orig_xq = Q.X;
    Q.X += &Q.Z;                         // X_Q + Z_Q
    Q.Z.difference_backwards(&orig_xq);  // X_Q - Z_Q

    let mut t0 = &Q.X * &P.Z;            // (X_Q + Z_Q)(X_P - Z_P)
    let mut t1 = &P.X * &Q.Z;            // (X_P + Z_P)(X_Q - Z_Q)

    let orig_t0 = t0;
    t0 += &t1;                           // 2 (X_P X_Q - Z_P Z_Q)
    t1.difference_backwards(&orig_t0);   // 2 (X_P Z_Q - X_Q Z_P)

    let t2 = t1.square();                // 4 (X_P Z_Q - X_Q Z_P)^2
    Q.X = t0.square();                   // 4 (X_P X_Q - Z_P Z_Q)^2 = X_{P+Q}
    Q.Z = &t2 * affine_PmQ;              // u(Q-P) 4 (X_P Z_Q - X_Q Z_P)^2 = Z_{P+Q}

    let xx = P.X.square();               // (X_P + Z_P)^2
    let mut zz = P.Z.square();           // (X_P - Z_P)^2
    P.X = &xx * &zz;                     // (X_P^2 - Z_P^2)^2 = X_{2P}
    zz.difference_backwards(&xx);        // 4 X_P Z_P

    // (X_P + Z_P)^2 + ((A - 2) / 4) 4 X_P Z_P
    let t3 = zz.scalar_product_sum(AMINUS2_OVER_FOUR, &xx);
    P.Z = &zz * &t3;                     // 4 X_P Z_P ((X_P + Z_P)^2 + ((A - 2) / 4) 4 X_P Z_P) = Z_{2P}
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------
