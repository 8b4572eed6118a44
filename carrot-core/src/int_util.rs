//! Fixed-width signed integer serialization: little-endian magnitude with
//! the high bit of the last byte as the sign flag. Used for the coinbase
//! input context and kept as a standalone utility with its own tests.

pub const INT256_BYTES: usize = 32;
pub const INT512_BYTES: usize = 64;

macro_rules! define_signed_int {
    ($name:ident, $bytes:expr) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        pub struct $name {
            negative: bool,
            magnitude: [u8; $bytes],
        }

        impl $name {
            pub const ZERO: Self = Self {
                negative: false,
                magnitude: [0u8; $bytes],
            };

            /// Magnitude must leave the sign bit clear; negative zero
            /// normalizes to zero.
            pub fn new(negative: bool, magnitude: [u8; $bytes]) -> Option<Self> {
                if magnitude[$bytes - 1] & 0x80 != 0 {
                    return None;
                }
                let is_zero = magnitude.iter().all(|b| *b == 0);
                Some(Self {
                    negative: negative && !is_zero,
                    magnitude,
                })
            }

            pub fn is_negative(&self) -> bool {
                self.negative
            }

            pub fn magnitude(&self) -> &[u8; $bytes] {
                &self.magnitude
            }

            pub fn to_bytes(&self) -> [u8; $bytes] {
                let mut out = self.magnitude;
                if self.negative {
                    out[$bytes - 1] |= 0x80;
                }
                out
            }

            pub fn from_bytes(mut bytes: [u8; $bytes]) -> Self {
                let negative = bytes[$bytes - 1] & 0x80 != 0;
                bytes[$bytes - 1] &= 0x7f;
                let is_zero = bytes.iter().all(|b| *b == 0);
                Self {
                    negative: negative && !is_zero,
                    magnitude: bytes,
                }
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                let mut magnitude = [0u8; $bytes];
                magnitude[..8].copy_from_slice(&value.to_le_bytes());
                Self {
                    negative: false,
                    magnitude,
                }
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                let mut magnitude = [0u8; $bytes];
                magnitude[..8].copy_from_slice(&value.unsigned_abs().to_le_bytes());
                Self {
                    negative: value < 0,
                    magnitude,
                }
            }
        }
    };
}

define_signed_int! {Int256, INT256_BYTES}
define_signed_int! {Int512, INT512_BYTES}
