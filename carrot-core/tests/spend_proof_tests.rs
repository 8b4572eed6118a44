mod common;

use crate::common::math::scalar_mul_gt;
use crate::common::random::gen_random;

use carrot_core::spend_proof::*;
use carrot_core::*;
use curve25519_dalek::Scalar;
use rand_core::OsRng;

fn gen_opening_and_address() -> (OpeningScalarSecret, OpeningScalarSecret, OutputPubkey) {
    let x: OpeningScalarSecret = gen_random();
    let y: OpeningScalarSecret = gen_random();
    let onetime_address = OutputPubkey(scalar_mul_gt(&x.0, &y.0));
    (x, y, onetime_address)
}

#[test]
fn spend_authority_proof_completeness() {
    let (x, y, onetime_address) = gen_opening_and_address();

    let proof = make_carrot_spend_authority_proof(&x, &y, &onetime_address, &mut OsRng);
    assert!(verify_carrot_spend_authority_proof(&proof, &onetime_address));
}

#[test]
fn spend_authority_proof_rejects_mutations() {
    let (x, y, onetime_address) = gen_opening_and_address();
    let proof = make_carrot_spend_authority_proof(&x, &y, &onetime_address, &mut OsRng);

    // R_G
    let mut mutated = proof.clone();
    mutated.commitment_g = gen_random::<OutputPubkey>().0;
    assert!(!verify_carrot_spend_authority_proof(&mutated, &onetime_address));

    // R_T
    let mut mutated = proof.clone();
    mutated.commitment_t = gen_random::<OutputPubkey>().0;
    assert!(!verify_carrot_spend_authority_proof(&mutated, &onetime_address));

    // c
    let mut mutated = proof.clone();
    mutated.challenge += Scalar::ONE;
    assert!(!verify_carrot_spend_authority_proof(&mutated, &onetime_address));

    // z1
    let mut mutated = proof.clone();
    mutated.response_g += Scalar::ONE;
    assert!(!verify_carrot_spend_authority_proof(&mutated, &onetime_address));

    // z2
    let mut mutated = proof.clone();
    mutated.response_t += Scalar::ONE;
    assert!(!verify_carrot_spend_authority_proof(&mutated, &onetime_address));

    // K
    let (_, _, other_onetime_address) = gen_opening_and_address();
    assert!(!verify_carrot_spend_authority_proof(&proof, &other_onetime_address));
}

#[test]
fn spend_authority_proof_rejects_wrong_opening() {
    let (x, y, _) = gen_opening_and_address();
    let (_, _, other_onetime_address) = gen_opening_and_address();

    // proving with scalars that do not open the claimed address
    let proof = make_carrot_spend_authority_proof(&x, &y, &other_onetime_address, &mut OsRng);
    assert!(!verify_carrot_spend_authority_proof(&proof, &other_onetime_address));
}

#[test]
fn spend_authority_proof_binds_recovered_enote_opening() {
    use crate::common::keys::MockKeys;
    use crate::common::random::gen_non_null_janus_anchor;
    use carrot_core::payment_proposal::*;
    use carrot_core::scan;

    let keys = MockKeys::generate();

    let proposal = CarrotPaymentProposalV1 {
        destination: keys.main_address(),
        amount: gen_random(),
        randomness: gen_non_null_janus_anchor(),
    };
    let tx_first_key_image: KeyImage = gen_random();
    let (enote_proposal, encrypted_payment_id) =
        get_output_proposal_normal_v1(&proposal, &tx_first_key_image).unwrap();

    let s_sender_receiver_unctx = scan::make_carrot_uncontextualized_shared_key_receiver(
        &keys.secrets.k_view_incoming,
        &enote_proposal.enote.enote_ephemeral_pubkey,
    )
    .unwrap();
    let record = scan::try_scan_carrot_enote_external(
        &enote_proposal.enote,
        Some(&encrypted_payment_id),
        &s_sender_receiver_unctx,
        &keys.secrets.k_view_incoming,
        &keys.secrets.account_spend_pubkey,
    )
    .unwrap();

    // the recovered opening of Ko proves spend authority over the enote
    let (x, y) = keys
        .try_opening_for_onetime_address(
            &record.address_spend_pubkey,
            &record.sender_extension_g,
            &record.sender_extension_t,
        )
        .unwrap();

    let proof = make_carrot_spend_authority_proof(
        &OpeningScalarSecret(x),
        &OpeningScalarSecret(y),
        &enote_proposal.enote.onetime_address,
        &mut OsRng,
    );
    assert!(verify_carrot_spend_authority_proof(
        &proof,
        &enote_proposal.enote.onetime_address
    ));
}
