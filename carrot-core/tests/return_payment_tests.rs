mod common;

use crate::common::keys::MockKeys;
use crate::common::math::scalar_mul_gt;
use crate::common::random::{gen_non_null_janus_anchor, gen_random};

use carrot_core::enote_utils;
use carrot_core::output_set_finalization::*;
use carrot_core::payment_proposal::{self, *};
use carrot_core::return_address::*;
use carrot_core::scan;
use carrot_core::*;
use rand_core::OsRng;

#[test]
fn return_payment_round_trip() {
    let alice = MockKeys::generate();
    let bob = MockKeys::generate();

    // --- Alice pays Bob with a normal + change 2-out set -----------------

    let payment_amount: Amount = 1 + (gen_random::<u32>() as Amount);
    let change_amount: Amount = 1 + (gen_random::<u32>() as Amount);

    let outbound_proposal = CarrotPaymentProposalV1 {
        destination: bob.main_address(),
        amount: payment_amount,
        randomness: gen_non_null_janus_anchor(),
    };

    let tx_first_key_image: KeyImage = gen_random();
    let input_context = enote_utils::make_carrot_input_context(&tx_first_key_image);

    let shared_enote_ephemeral_pubkey =
        payment_proposal::get_enote_ephemeral_pubkey(&outbound_proposal, &input_context).unwrap();

    let change_proposal = CarrotPaymentProposalSelfSendV1 {
        destination_address_spend_pubkey: alice.secrets.account_spend_pubkey.clone(),
        amount: change_amount,
        enote_type: CarrotEnoteType::Change,
        enote_ephemeral_pubkey: shared_enote_ephemeral_pubkey,
    };

    let (output_enote_proposals, encrypted_payment_id) = get_output_enote_proposals(
        vec![outbound_proposal.clone()],
        core::slice::from_ref(&change_proposal),
        Some(&alice.secrets.s_view_balance),
        Some(&alice.secrets.k_view_incoming),
        &alice.secrets.account_spend_pubkey,
        &tx_first_key_image,
        &mut OsRng,
    )
    .expect("get_output_enote_proposals");
    assert_eq!(2, output_enote_proposals.len());

    // --- Alice recognizes her change; Bob recognizes his payment --------

    let mut change_enote = None;
    let mut change_record = None;
    let mut outbound_enote = None;
    for output_enote_proposal in &output_enote_proposals {
        if let Ok(record) = scan::try_scan_carrot_enote_internal(
            &output_enote_proposal.enote,
            &alice.secrets.s_view_balance,
        ) {
            change_enote = Some(output_enote_proposal.enote.clone());
            change_record = Some(record);
        } else {
            outbound_enote = Some(output_enote_proposal.enote.clone());
        }
    }
    let change_enote = change_enote.expect("alice finds her change");
    let change_record = change_record.unwrap();
    let outbound_enote = outbound_enote.expect("one enote is the outbound payment");
    assert_eq!(change_amount, change_record.amount);

    let bob_unctx = scan::make_carrot_uncontextualized_shared_key_receiver(
        &bob.secrets.k_view_incoming,
        &outbound_enote.enote_ephemeral_pubkey,
    )
    .unwrap();
    let bob_record = scan::try_scan_carrot_enote_external(
        &outbound_enote,
        Some(&encrypted_payment_id),
        &bob_unctx,
        &bob.secrets.k_view_incoming,
        &bob.secrets.account_spend_pubkey,
    )
    .expect("bob recognizes the payment");
    assert_eq!(payment_amount, bob_record.amount);

    // --- Alice derives the F point for the outbound enote ---------------

    // the sender-side shared secret of the outbound enote
    let d_e = enote_utils::make_carrot_enote_ephemeral_privkey(
        &outbound_proposal.randomness,
        &input_context,
        &outbound_proposal.destination.address_spend_pubkey,
        &outbound_proposal.destination.address_view_pubkey,
        &outbound_proposal.destination.payment_id,
    );
    let alice_s_sr = enote_utils::make_carrot_uncontextualized_shared_key_sender(
        &d_e,
        &outbound_proposal.destination.address_view_pubkey,
    )
    .unwrap();
    let alice_s_sender_receiver = enote_utils::make_carrot_sender_receiver_secret(
        alice_s_sr.as_bytes(),
        &outbound_enote.enote_ephemeral_pubkey,
        &input_context,
    );

    let return_address_point = make_carrot_return_address_point(
        &alice.secrets.k_view_incoming,
        &change_enote.onetime_address,
        &alice_s_sender_receiver,
        &outbound_enote.amount_commitment,
    )
    .expect("make_carrot_return_address_point");

    // --- Bob recovers the return destination from (F, K^change_o) -------

    // k_rp MUST come from the old s^ctx_sr of the tx Bob received
    let bob_s_sender_receiver = enote_utils::make_carrot_sender_receiver_secret(
        bob_unctx.as_bytes(),
        &outbound_enote.enote_ephemeral_pubkey,
        &input_context,
    );
    let return_view_pubkey = recover_carrot_return_view_pubkey(
        &return_address_point,
        &bob_s_sender_receiver,
        &outbound_enote.amount_commitment,
    )
    .expect("recover_carrot_return_view_pubkey");

    // sanity: key_return = k_v K^change_o as Alice would compute it
    let expected_return_view_pubkey = (alice.secrets.k_view_incoming.0
        * change_enote.onetime_address.0.decompress().unwrap())
    .compress();
    assert_eq!(expected_return_view_pubkey, return_view_pubkey.0);

    // --- Bob returns the funds minus a fee -------------------------------

    let fee = payment_amount >> 4;
    let return_proposal = CarrotPaymentProposalReturnV1 {
        return_onetime_pubkey: change_enote.onetime_address.clone(),
        return_view_pubkey,
        amount: payment_amount - fee,
        randomness: gen_non_null_janus_anchor(),
    };

    let return_tx_first_key_image: KeyImage = gen_random();
    let (return_enote_proposal, return_encrypted_payment_id) =
        get_output_proposal_return_v1(&return_proposal, &return_tx_first_key_image)
            .expect("get_output_proposal_return_v1");

    // --- Alice scans the return with her plain external scan -------------

    let alice_unctx = scan::make_carrot_uncontextualized_shared_key_receiver(
        &alice.secrets.k_view_incoming,
        &return_enote_proposal.enote.enote_ephemeral_pubkey,
    )
    .unwrap();
    let return_record = scan::try_scan_carrot_enote_external(
        &return_enote_proposal.enote,
        Some(&return_encrypted_payment_id),
        &alice_unctx,
        &alice.secrets.k_view_incoming,
        &alice.secrets.account_spend_pubkey,
    )
    .expect("alice recognizes the return");

    // the recovered "destination spend key" is her own change Ko
    assert_eq!(
        change_enote.onetime_address.as_bytes(),
        return_record.address_spend_pubkey.as_bytes()
    );
    assert_eq!(payment_amount - fee, return_record.amount);
    assert_eq!(NULL_PAYMENT_ID, return_record.payment_id);
    assert_eq!(CarrotEnoteType::Payment, return_record.enote_type);

    // --- combined extensions open the returned enote ----------------------

    // Ko_return = Ko_change + ext_return
    //           = K_s + ext_change + ext_return
    //           = (k_gi + g_change + g_return) G + (k_ps + t_change + t_return) T
    let x = alice.secrets.k_generate_image.0
        + change_record.sender_extension_g.0
        + return_record.sender_extension_g.0;
    let y = alice.secrets.k_prove_spend.0
        + change_record.sender_extension_t.0
        + return_record.sender_extension_t.0;
    assert_eq!(
        scalar_mul_gt(&x, &y),
        return_enote_proposal.enote.onetime_address.0
    );
}
