// -*- mode: rust; -*-
//
// This file is part of curve25519-donna.
//
// To the extent possible under law, the authors have waived all copyright and
// related or neighboring rights to curve25519-donna, using the Creative
// Commons "CC0" public domain dedication.  See
// <http://creativecommons.org/publicdomain/zero/1.0/> for full details.

//! This module contains backend-specific constant values, such as the
//! 64-bit limbs of curve constants.

/// `(A - 2) / 4 = 121665`, where `A = 486662` is the Montgomery curve
/// coefficient.  Small enough to be applied with a single
/// `u64 x u64 -> u128` multiply per limb.
pub(crate) const AMINUS2_OVER_FOUR: u64 = 121665;

