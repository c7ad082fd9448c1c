// -*- mode: rust; -*-
//
// This file is part of curve25519-donna.
//
// To the extent possible under law, the authors have waived all copyright and
// related or neighboring rights to curve25519-donna, using the Creative
// Commons "CC0" public domain dedication.  See
// <http://creativecommons.org/publicdomain/zero/1.0/> for full details.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg, doc_cfg, doc_cfg_hide))]
#![cfg_attr(docsrs, doc(cfg_hide(docsrs)))]
#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

//------------------------------------------------------------------------
// External dependencies:
//------------------------------------------------------------------------

#[cfg(feature = "std")]
extern crate std;

//------------------------------------------------------------------------
// curve25519-donna public modules
//------------------------------------------------------------------------

// Point operations on the Montgomery form of Curve25519
pub mod montgomery;

// Scalar clamping
pub mod scalar;

// Useful constants, like the X25519 basepoint
pub mod constants;

// Errors reported by the key layer
pub mod errors;

//------------------------------------------------------------------------
// curve25519-donna internal modules
//------------------------------------------------------------------------

// Finite field arithmetic mod p = 2^255 - 19
pub(crate) mod field;

// The u64 limb backend lives here
pub(crate) mod backend;

// The x25519 function and key types
mod x25519;

pub use crate::errors::Error;
pub use crate::x25519::*;
