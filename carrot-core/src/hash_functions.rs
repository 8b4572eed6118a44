use curve25519_dalek::Scalar;
use sha3::{Digest, Keccak256};

pub(crate) fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

macro_rules! define_derive_bytes_x {
    ($f:ident, $outlen:expr) => {
        pub fn $f(transcript: &[u8]) -> [u8; $outlen] {
            let digest = keccak256(transcript);
            let mut out = [0u8; $outlen];
            out.copy_from_slice(&digest[..$outlen]);
            out
        }
    };
}

define_derive_bytes_x! {derive_bytes_3, 3}
define_derive_bytes_x! {derive_bytes_8, 8}
define_derive_bytes_x! {derive_bytes_16, 16}
define_derive_bytes_x! {derive_bytes_32, 32}

/// H_n: Keccak-256 of the transcript, reduced mod the group order.
pub fn derive_scalar(transcript: &[u8]) -> Scalar {
    Scalar::from_bytes_mod_order(keccak256(transcript))
}
