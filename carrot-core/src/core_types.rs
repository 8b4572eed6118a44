use core::ops::BitXor;
use curve25519_dalek::{edwards::CompressedEdwardsY, MontgomeryPoint, Scalar};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::consts::*;
use crate::random::Random;
use crate::transcript::Transcriptable;

macro_rules! define_tiny_type {
    ($tiny:ident, $doc:literal, $base:ty $(,$extra_derivs:ident)*) => {
        #[doc = $doc]
        #[derive(Clone, Debug, PartialEq, Eq, Zeroize $(,$extra_derivs)*)]
        pub struct $tiny(pub $base);

        impl Random for $tiny {
            type Params = <$base as Random>::Params;
            fn new_random_with_params<R: rand_core::CryptoRngCore + ?Sized>(
                rng: &mut R,
                p: Self::Params,
            ) -> Self {
                $tiny(<$base>::new_random_with_params(rng, p))
            }
        }

        impl Transcriptable for $tiny {
            fn write_transcript_bytes<W: std::io::Write>(
                &self,
                writer: W,
            ) -> std::io::Result<usize> {
                self.0.write_transcript_bytes(writer)
            }
        }
    };
}

macro_rules! define_tiny_edwards_type {
    ($tiny:ident, $doc:literal) => {
        define_tiny_type! {$tiny, $doc, CompressedEdwardsY, Hash}

        impl $tiny {
            pub fn from_bytes(bytes: [u8; 32]) -> Self {
                Self(CompressedEdwardsY(bytes))
            }

            pub fn as_bytes(&self) -> &[u8; 32] {
                self.0.as_bytes()
            }
        }
    };
}

macro_rules! define_tiny_montgomery_type {
    ($tiny:ident, $doc:literal $(,$extra_derivs:ident)*) => {
        define_tiny_type! {$tiny, $doc, MontgomeryPoint $(,$extra_derivs)*}

        impl $tiny {
            pub fn from_bytes(bytes: [u8; 32]) -> Self {
                Self(MontgomeryPoint(bytes))
            }

            pub fn as_bytes(&self) -> &[u8; 32] {
                self.0.as_bytes()
            }
        }
    };
}

macro_rules! define_tiny_scalar_type {
    ($tiny:ident, $doc:literal) => {
        define_tiny_type! {$tiny, $doc, Scalar, ZeroizeOnDrop}

        impl $tiny {
            pub fn from_bytes_mod_order(bytes: [u8; 32]) -> Self {
                Self(Scalar::from_bytes_mod_order(bytes))
            }

            pub fn as_bytes(&self) -> &[u8; 32] {
                self.0.as_bytes()
            }
        }

        impl From<u64> for $tiny {
            fn from(value: u64) -> Self {
                Self(Scalar::from(value))
            }
        }
    };
}

macro_rules! define_tiny_byte_type {
    ($tiny:ident, $doc:literal, $size:expr $(,$extra_derivs:ident)*) => {
        define_tiny_type! {$tiny, $doc, [u8; $size] $(,$extra_derivs)*}

        impl $tiny {
            pub fn as_bytes(&self) -> &[u8; $size] {
                &self.0
            }
        }

        impl Default for $tiny {
            fn default() -> Self {
                Self([0u8; $size])
            }
        }

        impl From<[u8; $size]> for $tiny {
            fn from(value: [u8; $size]) -> Self {
                Self(value)
            }
        }
    };
}

define_tiny_edwards_type! {AddressSpendPubkey, "Address spend pubkey K^j_s (K_s at index (0, 0))"}
define_tiny_edwards_type! {AddressViewPubkey, "Address view pubkey K^j_v"}
define_tiny_edwards_type! {OutputPubkey, "Transaction output pubkey / one-time address K_o"}
define_tiny_edwards_type! {AmountCommitment, "Pedersen amount commitment C_a = k_a G + a H"}
define_tiny_edwards_type! {OnetimeExtension, "Difference between a one-time address and its address spend pubkey"}
define_tiny_edwards_type! {ReturnAddressPoint, "F point carried out-of-band for return payments, F = k_rp^-1 k_v K^change_o"}

define_tiny_montgomery_type! {EnoteEphemeralPubkey, "Enote ephemeral pubkey D_e"}
define_tiny_montgomery_type! {MontgomeryECDH, "Uncontextualized sender-receiver ECDH secret s_sr", ZeroizeOnDrop}

define_tiny_scalar_type! {ProveSpendKey, "Prove-spend key k_ps"}
define_tiny_scalar_type! {GenerateImageKey, "Generate-image key k_gi"}
define_tiny_scalar_type! {ViewIncomingKey, "Incoming view key k_v"}
define_tiny_scalar_type! {AddressIndexGeneratorSecret, "Address index generator m = H_n(s_ga, j_major, j_minor)"}
define_tiny_scalar_type! {SubaddressScalarSecret, "Subaddress scalar d, with d = 1 at index (0, 0)"}
define_tiny_scalar_type! {AmountBlindingKey, "Blinding factor k_a for an amount commitment"}
define_tiny_scalar_type! {EnoteEphemeralKey, "Private key d_e for an enote ephemeral pubkey"}
define_tiny_scalar_type! {OnetimeExtensionG, "Opening of a one-time extension against the G generator"}
define_tiny_scalar_type! {OnetimeExtensionT, "Opening of a one-time extension against the T generator"}
define_tiny_scalar_type! {OnetimeExtensionRp, "Return-payment extension k_rp"}
define_tiny_scalar_type! {OpeningScalarSecret, "Combined opening scalar for a one-time address"}

define_tiny_byte_type! {Uniform32Secret, "Unbiased 32-byte secret", 32, ZeroizeOnDrop}
define_tiny_byte_type! {ViewBalanceSecret, "View-balance secret s_vb", 32, ZeroizeOnDrop}
define_tiny_byte_type! {GenerateAddressSecret, "Generate-address secret s_ga", 32, ZeroizeOnDrop}
define_tiny_byte_type! {SenderReceiverSecret, "Contextualized sender-receiver secret s^ctx_sr", 32, ZeroizeOnDrop}

define_tiny_byte_type! {JanusAnchor,
    "Janus anchor: normal enote ephemeral privkey randomness, or a special-enote HMAC of the ephemeral pubkey",
    JANUS_ANCHOR_BYTES}
define_tiny_byte_type! {EncryptedJanusAnchor, "Janus anchor XORd with its encryption mask", JANUS_ANCHOR_BYTES}
define_tiny_byte_type! {EncryptedAmount, "Amount XORd with its encryption mask", ENCRYPTED_AMOUNT_BYTES}
define_tiny_byte_type! {PaymentId, "Legacy payment ID", PAYMENT_ID_BYTES}
define_tiny_byte_type! {EncryptedPaymentId, "Legacy payment ID XORd with its encryption mask", PAYMENT_ID_BYTES}
define_tiny_byte_type! {ViewTag, "Short view tag for fast scan rejection", VIEW_TAG_BYTES}
define_tiny_byte_type! {InputContext, "Transaction-unique byte string binding enotes to their tx", INPUT_CONTEXT_BYTES}
define_tiny_byte_type! {KeyImage, "Opaque 32-byte key image", KEY_IMAGE_BYTES}

/// Carrot amount, 64-bit
pub type Amount = u64;

/// Block index for coinbase enote input contexts
pub type BlockIndex = u64;

/// Carrot enote types
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CarrotEnoteType {
    Payment,
    Change,
}

impl CarrotEnoteType {
    pub(crate) fn as_byte(self) -> u8 {
        match self {
            CarrotEnoteType::Payment => 0,
            CarrotEnoteType::Change => 1,
        }
    }
}

pub const NULL_JANUS_ANCHOR: JanusAnchor = JanusAnchor([0u8; JANUS_ANCHOR_BYTES]);
pub const NULL_PAYMENT_ID: PaymentId = PaymentId([0u8; PAYMENT_ID_BYTES]);

////////////////////////////////////////////////////////////////////////////////

fn xor_bytes<const N: usize>(a: &[u8; N], b: &[u8; N]) -> [u8; N] {
    let mut c = *a;
    for i in 0..N {
        c[i] ^= b[i];
    }
    c
}

macro_rules! impl_tiny_byte_type_xor {
    ($t:ident, $enc_t:ident) => {
        impl BitXor<&$enc_t> for &$t {
            type Output = $enc_t;
            fn bitxor(self, rhs: &$enc_t) -> Self::Output {
                $enc_t(xor_bytes(&self.0, &rhs.0))
            }
        }

        impl BitXor<&$enc_t> for &$enc_t {
            type Output = $t;
            fn bitxor(self, rhs: &$enc_t) -> Self::Output {
                $t(xor_bytes(&self.0, &rhs.0))
            }
        }
    };
}

impl_tiny_byte_type_xor! {JanusAnchor, EncryptedJanusAnchor}
impl_tiny_byte_type_xor! {PaymentId, EncryptedPaymentId}

impl BitXor<&EncryptedAmount> for &Amount {
    type Output = EncryptedAmount;
    fn bitxor(self, rhs: &EncryptedAmount) -> Self::Output {
        EncryptedAmount(xor_bytes(&self.to_le_bytes(), &rhs.0))
    }
}

impl BitXor<&EncryptedAmount> for &EncryptedAmount {
    type Output = Amount;
    fn bitxor(self, rhs: &EncryptedAmount) -> Self::Output {
        Amount::from_le_bytes(xor_bytes(&self.0, &rhs.0))
    }
}
