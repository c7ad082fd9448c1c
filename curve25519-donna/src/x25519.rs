// -*- mode: rust; -*-
//
// This file is part of curve25519-donna.
//
// To the extent possible under law, the authors have waived all copyright and
// related or neighboring rights to curve25519-donna, using the Creative
// Commons "CC0" public domain dedication.  See
// <http://creativecommons.org/publicdomain/zero/1.0/> for full details.

//! x25519 Diffie-Hellman key exchange
//!
//! This implements x25519 key exchange as specified by Mike Hamburg
//! and Adam Langley in [RFC7748](https://tools.ietf.org/html/rfc7748).
//!
//! Two surfaces are offered.  The byte-oriented functions
//! [`scalar_mult`], [`make_private`], [`make_public`] and [`make_shared`]
//! take and return plain `[u8; 32]`s.  The key types [`PrivateKey`],
//! [`PublicKey`] and [`SharedSecret`] wrap the same operations, check slice
//! lengths, and wipe secrets when they go out of scope.

use crate::constants::X25519_BASEPOINT;
use crate::errors::Error;
use crate::montgomery::MontgomeryPoint;
use crate::scalar::clamp_integer;

use subtle::Choice;

#[cfg(feature = "zeroize")]
use zeroize::{Zeroize, ZeroizeOnDrop};

/// The length in bytes of every scalar, point and shared secret.
const KEY_LENGTH: usize = 32;

/// Copy `bytes` into an array, or report which type refused them.
fn to_array(name: &'static str, bytes: &[u8]) -> Result<[u8; KEY_LENGTH], Error> {
    <[u8; KEY_LENGTH]>::try_from(bytes).map_err(|_| Error::InvalidLength {
        name,
        expected: KEY_LENGTH,
        actual: bytes.len(),
    })
}

/// The bare, byte-oriented x25519 function, exactly as specified in RFC7748.
///
/// `secret` is clamped, `point` is decoded with its top bit ignored, and the
/// canonical encoding of the resulting \\(u\\)-coordinate is returned.  Every
/// pair of inputs is accepted; low-order points give a zero output rather
/// than an error.
///
/// This can be used with [`X25519_BASEPOINT_BYTES`] for people who
/// cannot use the typed key API.
///
/// # Example
///
/// ```
/// use curve25519_donna::{scalar_mult, X25519_BASEPOINT_BYTES};
///
/// let alice = [0x77; 32];
/// let bob = [0x5d; 32];
///
/// let alice_public = scalar_mult(alice, X25519_BASEPOINT_BYTES);
/// let bob_public = scalar_mult(bob, X25519_BASEPOINT_BYTES);
///
/// assert_eq!(scalar_mult(alice, bob_public), scalar_mult(bob, alice_public));
/// ```
pub fn scalar_mult(secret: [u8; 32], point: [u8; 32]) -> [u8; 32] {
    MontgomeryPoint(point).mul_clamped(secret).to_bytes()
}

/// Turn 32 bytes of seed material into a private key by clamping them.
///
/// See [`clamp_integer`] for the bits this touches.
pub fn make_private(seed: [u8; 32]) -> [u8; 32] {
    clamp_integer(seed)
}

/// Compute the public key belonging to `private`.
pub fn make_public(private: [u8; 32]) -> [u8; 32] {
    scalar_mult(private, X25519_BASEPOINT_BYTES)
}

/// Compute the secret shared between `private` and the holder of
/// `peer_public`.
///
/// The output is the raw \\(u\\)-coordinate; hash it before using it as a
/// key.
pub fn make_shared(private: [u8; 32], peer_public: [u8; 32]) -> [u8; 32] {
    scalar_mult(private, peer_public)
}

/// The X25519 basepoint, for use with the bare, byte-oriented functions.
pub const X25519_BASEPOINT_BYTES: [u8; 32] = X25519_BASEPOINT.0;

/// A Diffie-Hellman public key.
///
/// We implement `Zeroize` so that downstream consumers may derive it for `Drop`
/// should they wish to erase public keys from memory.  Note that this erasure
/// (in this crate) does *not* automatically happen, but either must be derived
/// for Drop or explicitly called.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub struct PublicKey(pub(crate) MontgomeryPoint);

impl From<[u8; 32]> for PublicKey {
    /// Given a byte array, construct a x25519 `PublicKey`.
    fn from(bytes: [u8; 32]) -> PublicKey {
        PublicKey(MontgomeryPoint(bytes))
    }
}

impl<'a> TryFrom<&'a [u8]> for PublicKey {
    type Error = Error;

    /// Construct a `PublicKey` from a slice, which must be exactly 32 bytes.
    fn try_from(bytes: &'a [u8]) -> Result<PublicKey, Error> {
        to_array("PublicKey", bytes).map(PublicKey::from)
    }
}

impl<'a> From<&'a PrivateKey> for PublicKey {
    /// Given an x25519 [`PrivateKey`], compute its corresponding [`PublicKey`].
    fn from(secret: &'a PrivateKey) -> PublicKey {
        PublicKey(X25519_BASEPOINT.mul_clamped(secret.0))
    }
}

impl PublicKey {
    /// Convert this public key to a byte array.
    #[inline]
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.to_bytes()
    }

    /// View this public key as a byte array.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; 32] {
        self.0.as_bytes()
    }
}

impl AsRef<[u8]> for PublicKey {
    /// View this public key as a byte array.
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for PublicKey {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

/// A Diffie-Hellman private key.
///
/// The bytes are clamped on the way in, so [`PrivateKey::to_bytes`] returns
/// the clamped scalar rather than the seed it was built from.  A
/// `PrivateKey` may be used for any number of key agreements.
///
/// There is deliberately no `Debug` impl, and no serialization.
#[derive(Clone)]
pub struct PrivateKey([u8; 32]);

impl PrivateKey {
    /// Clamp 32 bytes of seed material into a `PrivateKey`.
    ///
    /// Generating the seed is up to the caller; it should come from a
    /// cryptographically secure source.
    pub fn from_bytes(seed: [u8; 32]) -> PrivateKey {
        PrivateKey(make_private(seed))
    }

    /// Compute the [`PublicKey`] belonging to this key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey::from(self)
    }

    /// Perform a Diffie-Hellman key agreement between `self` and
    /// `their_public` key to produce a [`SharedSecret`].
    pub fn diffie_hellman(&self, their_public: &PublicKey) -> SharedSecret {
        SharedSecret(their_public.0.mul_clamped(self.0))
    }

    /// Extract this key's (clamped) bytes for serialization.
    #[inline]
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// View this key as a byte array.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl From<[u8; 32]> for PrivateKey {
    /// Clamp a byte array into a `PrivateKey`.
    fn from(seed: [u8; 32]) -> PrivateKey {
        PrivateKey::from_bytes(seed)
    }
}

impl<'a> TryFrom<&'a [u8]> for PrivateKey {
    type Error = Error;

    /// Clamp a slice into a `PrivateKey`.  The slice must be exactly 32
    /// bytes; the temporary copy is wiped after clamping.
    fn try_from(bytes: &'a [u8]) -> Result<PrivateKey, Error> {
        #[allow(unused_mut)]
        let mut seed = to_array("PrivateKey", bytes)?;
        let key = PrivateKey::from_bytes(seed);

        #[cfg(feature = "zeroize")]
        seed.zeroize();

        Ok(key)
    }
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        #[cfg(feature = "zeroize")]
        self.0.zeroize();
    }
}

#[cfg(feature = "zeroize")]
impl ZeroizeOnDrop for PrivateKey {}

/// The result of a Diffie-Hellman key exchange.
///
/// Each party computes this using their [`PrivateKey`] and their
/// counterparty's [`PublicKey`].
pub struct SharedSecret(pub(crate) MontgomeryPoint);

impl SharedSecret {
    /// Convert this shared secret to a byte array.
    #[inline]
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.to_bytes()
    }

    /// View this shared secret key as a byte array.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; 32] {
        self.0.as_bytes()
    }

    /// Ensure in constant-time that this shared secret did not result from a
    /// key exchange with non-contributory behaviour.
    ///
    /// A peer who hands over the zero point, or any other point of small
    /// order, forces the shared secret to zero whatever our private key is.
    /// Protocols which need both parties to contribute to the result should
    /// reject such exchanges; see [RFC7748 section 6.1].
    ///
    /// # Returns
    ///
    /// Returns `true` if the key exchange was contributory (good), and `false`
    /// otherwise (can be bad for some protocols).
    ///
    /// [RFC7748 section 6.1]: https://tools.ietf.org/html/rfc7748#section-6.1
    #[must_use]
    pub fn was_contributory(&self) -> bool {
        let contributory: Choice = !self.0.is_zero();
        contributory.into()
    }
}

impl AsRef<[u8]> for SharedSecret {
    /// View this shared secret key as a byte array.
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl Drop for SharedSecret {
    fn drop(&mut self) {
        #[cfg(feature = "zeroize")]
        self.0.zeroize();
    }
}

#[cfg(feature = "zeroize")]
impl ZeroizeOnDrop for SharedSecret {}
