// -*- mode: rust; -*-
//
// This file is part of curve25519-donna.
//
// To the extent possible under law, the authors have waived all copyright and
// related or neighboring rights to curve25519-donna, using the Creative
// Commons "CC0" public domain dedication.  See
// <http://creativecommons.org/publicdomain/zero/1.0/> for full details.

//! Arithmetic backends.
//!
//! Only the portable serial backend is provided: five 51-bit limbs in
//! `u64`s with `u128` products.  Every target Rust supports has `u128`,
//! so there is nothing to select at build time.

pub mod serial;
