// -*- mode: rust; -*-
//
// This file is part of curve25519-donna.
//
// To the extent possible under law, the authors have waived all copyright and
// related or neighboring rights to curve25519-donna, using the Creative
// Commons "CC0" public domain dedication.  See
// <http://creativecommons.org/publicdomain/zero/1.0/> for full details.

//! Serial implementations of field arithmetic.

pub mod u64;
