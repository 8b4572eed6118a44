use curve25519_dalek::{edwards::CompressedEdwardsY, EdwardsPoint, Scalar};
use zeroize::Zeroizing;

use crate::core_types::*;
use crate::domain_separators;
use crate::generators;
use crate::hash_functions::derive_scalar;
use crate::transcript::make_carrot_transcript;

////
// SpendAuthorityProof
// - Schnorr proof of knowledge of (x, y) such that Ko = x G + y T, without
//   revealing either scalar
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpendAuthorityProof {
    /// R_G = r1 G
    pub commitment_g: CompressedEdwardsY,
    /// R_T = r2 T
    pub commitment_t: CompressedEdwardsY,
    /// c = H_n(R_G, R_T, Ko)
    pub challenge: Scalar,
    /// z1 = r1 + c x
    pub response_g: Scalar,
    /// z2 = r2 + c y
    pub response_t: Scalar,
}

fn make_spend_authority_challenge(
    commitment_g: &CompressedEdwardsY,
    commitment_t: &CompressedEdwardsY,
    onetime_address: &OutputPubkey,
) -> Scalar {
    // c = H_n(R_G, R_T, Ko)
    let transcript = make_carrot_transcript!(domain_separators::SPEND_AUTHORITY_PROOF,
        CompressedEdwardsY : commitment_g, CompressedEdwardsY : commitment_t,
        OutputPubkey : onetime_address);
    derive_scalar(&transcript)
}

pub fn make_carrot_spend_authority_proof<R>(
    x: &OpeningScalarSecret,
    y: &OpeningScalarSecret,
    onetime_address: &OutputPubkey,
    rng: &mut R,
) -> SpendAuthorityProof
where
    R: rand_core::CryptoRngCore,
{
    // 1. random commitment nonces
    let r1 = Zeroizing::new(Scalar::random(rng));
    let r2 = Zeroizing::new(Scalar::random(rng));

    // 2. R_G = r1 G, R_T = r2 T
    let commitment_g = EdwardsPoint::mul_base(&r1).compress();
    let commitment_t = (*r2 * *generators::T).compress();

    // 3. c = H_n(R_G, R_T, Ko)
    let challenge = make_spend_authority_challenge(&commitment_g, &commitment_t, onetime_address);

    // 4. z1 = r1 + c x, z2 = r2 + c y
    let response_g = *r1 + challenge * x.0;
    let response_t = *r2 + challenge * y.0;

    SpendAuthorityProof {
        commitment_g,
        commitment_t,
        challenge,
        response_g,
        response_t,
    }
}

pub fn verify_carrot_spend_authority_proof(
    proof: &SpendAuthorityProof,
    onetime_address: &OutputPubkey,
) -> bool {
    let Some(onetime_address_point) = onetime_address.0.decompress() else {
        return false;
    };
    let Some(commitment_g_point) = proof.commitment_g.decompress() else {
        return false;
    };
    let Some(commitment_t_point) = proof.commitment_t.decompress() else {
        return false;
    };

    // 1. c' = H_n(R_G, R_T, Ko)
    let challenge =
        make_spend_authority_challenge(&proof.commitment_g, &proof.commitment_t, onetime_address);

    // 2. c' ?= c
    if challenge != proof.challenge {
        return false;
    }

    // 3. z1 G + z2 T - c' Ko ?= R_G + R_T
    let reconstructed = EdwardsPoint::mul_base(&proof.response_g)
        + proof.response_t * *generators::T
        - challenge * onetime_address_point;
    reconstructed == commitment_g_point + commitment_t_point
}
