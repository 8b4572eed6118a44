use curve25519_dalek::constants::ED25519_BASEPOINT_POINT;
use thiserror::Error;

use crate::core_types::*;
use crate::device::{self, ViewBalanceSecretDevice, ViewIncomingKeyDevice};
use crate::enote::{CarrotCoinbaseEnoteV1, CarrotEnoteV1};
use crate::enote_record::{
    CarrotCoinbaseIntermediateEnoteRecordV1, CarrotIntermediateEnoteRecordV1,
};
use crate::enote_utils::*;
use crate::math_utils::zero_commit;
use subtle::ConstantTimeEq;

/// Negative scanning outcomes. Neither is an error: `Miss` means the enote
/// is not addressed to this account, `Janus` means it decrypted correctly
/// but failed Janus protection verification and must not be credited.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ScanFailure {
    #[error("enote does not belong to this account")]
    Miss,
    #[error("enote failed janus protection verification")]
    Janus,
}

pub type ScanResult<T> = core::result::Result<T, ScanFailure>;

/// s_sr = 8 k_v D_e
pub fn make_carrot_uncontextualized_shared_key_receiver<VI: ViewIncomingKeyDevice>(
    k_view_dev: &VI,
    enote_ephemeral_pubkey: &EnoteEphemeralPubkey,
) -> device::Result<MontgomeryECDH> {
    k_view_dev.view_key_scalar_mult_x25519(enote_ephemeral_pubkey)
}

#[allow(clippy::type_complexity)]
fn scan_carrot_destination_parts(
    onetime_address: &OutputPubkey,
    amount_commitment: &AmountCommitment,
    encrypted_janus_anchor: &EncryptedJanusAnchor,
    encrypted_payment_id: Option<&EncryptedPaymentId>,
    s_sender_receiver: &SenderReceiverSecret,
) -> Option<(
    OnetimeExtensionG,
    OnetimeExtensionT,
    AddressSpendPubkey,
    PaymentId,
    JanusAnchor,
)> {
    // k^o_g = H_n("..G..", s^ctx_sr, C_a)
    let sender_extension_g =
        make_carrot_onetime_address_extension_g(s_sender_receiver, amount_commitment);

    // k^o_t = H_n("..T..", s^ctx_sr, C_a)
    let sender_extension_t =
        make_carrot_onetime_address_extension_t(s_sender_receiver, amount_commitment);

    // K^j_s = Ko - K^o_ext = Ko - (k^o_g G + k^o_t T)
    let address_spend_pubkey =
        recover_address_spend_pubkey(onetime_address, s_sender_receiver, amount_commitment)?;

    // pid = pid_enc XOR m_pid, if applicable
    let nominal_payment_id = match encrypted_payment_id {
        Some(encrypted_payment_id) => {
            decrypt_legacy_payment_id(encrypted_payment_id, s_sender_receiver, onetime_address)
        }
        None => NULL_PAYMENT_ID,
    };

    // anchor = anchor_enc XOR m_anchor
    let nominal_janus_anchor =
        decrypt_carrot_anchor(encrypted_janus_anchor, s_sender_receiver, onetime_address);

    Some((
        sender_extension_g,
        sender_extension_t,
        address_spend_pubkey,
        nominal_payment_id,
        nominal_janus_anchor,
    ))
}

#[allow(clippy::type_complexity)]
fn try_scan_carrot_non_coinbase_core(
    enote: &CarrotEnoteV1,
    encrypted_payment_id: Option<&EncryptedPaymentId>,
    s_sender_receiver: &SenderReceiverSecret,
) -> Option<(
    OnetimeExtensionG,
    OnetimeExtensionT,
    AddressSpendPubkey,
    Amount,
    AmountBlindingKey,
    PaymentId,
    CarrotEnoteType,
    JanusAnchor,
)> {
    // k^o_g, k^o_t, K^j_s', pid', anchor'
    let (
        sender_extension_g,
        sender_extension_t,
        address_spend_pubkey,
        nominal_payment_id,
        nominal_janus_anchor,
    ) = scan_carrot_destination_parts(
        &enote.onetime_address,
        &enote.amount_commitment,
        &enote.anchor_enc,
        encrypted_payment_id,
        s_sender_receiver,
    )?;

    // if cannot recompute C_a for either enote type, then FAIL
    let (amount, amount_blinding_factor, enote_type) = try_get_carrot_amount(
        s_sender_receiver,
        &enote.amount_enc,
        &enote.onetime_address,
        &enote.amount_commitment,
    )?;

    Some((
        sender_extension_g,
        sender_extension_t,
        address_spend_pubkey,
        amount,
        amount_blinding_factor,
        nominal_payment_id,
        enote_type,
        nominal_janus_anchor,
    ))
}

/// Check that the enote could not have been produced by a Janus attack:
/// either its anchor re-derives the ephemeral pubkey for the recovered
/// address (normal sends), or it matches the special self-send anchor.
#[allow(clippy::too_many_arguments)]
fn verify_carrot_janus_protection<VI: ViewIncomingKeyDevice>(
    input_context: &InputContext,
    onetime_address: &OutputPubkey,
    k_view_dev: &VI,
    account_spend_pubkey: &AddressSpendPubkey,
    nominal_address_spend_pubkey: &AddressSpendPubkey,
    enote_ephemeral_pubkey: &EnoteEphemeralPubkey,
    nominal_anchor: &JanusAnchor,
    nominal_payment_id: &mut PaymentId,
) -> bool {
    // equal spend pubkeys mean the main address was recovered
    let is_subaddress = nominal_address_spend_pubkey != account_spend_pubkey;

    // K^j_v' = k_v K^j_s' for a subaddress, k_v G otherwise
    let nominal_view_point = if is_subaddress {
        let Some(spend_point) = nominal_address_spend_pubkey.0.decompress() else {
            return false;
        };
        spend_point
    } else {
        ED25519_BASEPOINT_POINT
    };
    let Ok(nominal_address_view_pubkey) =
        k_view_dev.view_key_scalar_mult_ed25519(&nominal_view_point)
    else {
        return false;
    };
    let nominal_address_view_pubkey = AddressViewPubkey(nominal_address_view_pubkey.compress());

    // if D_e can be recomputed with pid', then PASS
    if verify_carrot_external_janus_protection(
        nominal_anchor,
        input_context,
        nominal_address_spend_pubkey,
        &nominal_address_view_pubkey,
        is_subaddress,
        nominal_payment_id,
        enote_ephemeral_pubkey,
    ) {
        return true;
    }

    // if D_e can be recomputed with a null pid, then PASS
    *nominal_payment_id = NULL_PAYMENT_ID;
    if verify_carrot_external_janus_protection(
        nominal_anchor,
        input_context,
        nominal_address_spend_pubkey,
        &nominal_address_view_pubkey,
        is_subaddress,
        &NULL_PAYMENT_ID,
        enote_ephemeral_pubkey,
    ) {
        return true;
    }

    // anchor_sp = H_16(D_e, input_context, Ko, k_v, K_s)
    let Ok(expected_special_anchor) = k_view_dev.make_janus_anchor_special(
        enote_ephemeral_pubkey,
        input_context,
        onetime_address,
        account_spend_pubkey,
    ) else {
        return false;
    };

    // attempt special janus check: anchor_sp ?= anchor'
    bool::from(
        expected_special_anchor
            .as_bytes()
            .as_slice()
            .ct_eq(nominal_anchor.as_bytes().as_slice()),
    )
}

/// Scan a non-coinbase enote with the incoming view key.
pub fn try_scan_carrot_enote_external<VI: ViewIncomingKeyDevice>(
    enote: &CarrotEnoteV1,
    encrypted_payment_id: Option<&EncryptedPaymentId>,
    s_sender_receiver_unctx: &MontgomeryECDH,
    k_view_dev: &VI,
    account_spend_pubkey: &AddressSpendPubkey,
) -> ScanResult<CarrotIntermediateEnoteRecordV1> {
    // input_context = "R" || KI_1
    let input_context = make_carrot_input_context(&enote.tx_first_key_image);

    // if vt' != vt, then FAIL
    if !test_carrot_view_tag(
        s_sender_receiver_unctx.as_bytes(),
        &input_context,
        &enote.onetime_address,
        &enote.view_tag,
    ) {
        return Err(ScanFailure::Miss);
    }

    // s^ctx_sr = H_32(s_sr, D_e, input_context)
    let s_sender_receiver = make_carrot_sender_receiver_secret(
        s_sender_receiver_unctx.as_bytes(),
        &enote.enote_ephemeral_pubkey,
        &input_context,
    );

    // do core scanning
    let (
        sender_extension_g,
        sender_extension_t,
        address_spend_pubkey,
        amount,
        amount_blinding_factor,
        mut payment_id,
        enote_type,
        nominal_janus_anchor,
    ) = try_scan_carrot_non_coinbase_core(enote, encrypted_payment_id, &s_sender_receiver)
        .ok_or(ScanFailure::Miss)?;

    // verify Janus attack protection
    if !verify_carrot_janus_protection(
        &input_context,
        &enote.onetime_address,
        k_view_dev,
        account_spend_pubkey,
        &address_spend_pubkey,
        &enote.enote_ephemeral_pubkey,
        &nominal_janus_anchor,
        &mut payment_id,
    ) {
        tracing::debug!("carrot enote failed janus protection verification");
        return Err(ScanFailure::Janus);
    }

    Ok(CarrotIntermediateEnoteRecordV1 {
        enote: enote.clone(),
        sender_extension_g,
        sender_extension_t,
        address_spend_pubkey,
        amount,
        amount_blinding_factor,
        payment_id,
        enote_type,
        is_internal: false,
    })
}

/// Scan a non-coinbase enote with the view-balance secret. Janus checks are
/// not needed: internal self-sends are trusted by construction.
pub fn try_scan_carrot_enote_internal<VB: ViewBalanceSecretDevice>(
    enote: &CarrotEnoteV1,
    s_view_balance_dev: &VB,
) -> ScanResult<CarrotIntermediateEnoteRecordV1> {
    // input_context = "R" || KI_1
    let input_context = make_carrot_input_context(&enote.tx_first_key_image);

    // vt = H_3(s_vb || input_context || Ko)
    let nominal_view_tag = s_view_balance_dev
        .make_internal_view_tag(&input_context, &enote.onetime_address)
        .map_err(|_| ScanFailure::Miss)?;

    // if vt' != vt, then FAIL
    if !bool::from(
        nominal_view_tag
            .as_bytes()
            .as_slice()
            .ct_eq(enote.view_tag.as_bytes().as_slice()),
    ) {
        return Err(ScanFailure::Miss);
    }

    // s^ctx_sr = H_32(s_vb, D_e, input_context)
    let s_sender_receiver = s_view_balance_dev
        .make_internal_sender_receiver_secret(&enote.enote_ephemeral_pubkey, &input_context)
        .map_err(|_| ScanFailure::Miss)?;

    // do core scanning; the anchor is meaningless for internal enotes
    let (
        sender_extension_g,
        sender_extension_t,
        address_spend_pubkey,
        amount,
        amount_blinding_factor,
        _,
        enote_type,
        _,
    ) = try_scan_carrot_non_coinbase_core(enote, None, &s_sender_receiver)
        .ok_or(ScanFailure::Miss)?;

    Ok(CarrotIntermediateEnoteRecordV1 {
        enote: enote.clone(),
        sender_extension_g,
        sender_extension_t,
        address_spend_pubkey,
        amount,
        amount_blinding_factor,
        payment_id: NULL_PAYMENT_ID,
        enote_type,
        is_internal: true,
    })
}

/// Scan a coinbase enote with the incoming view key. Only the main address
/// is recognized: with a cleartext amount there is no committed target for
/// a subaddress table scan to disambiguate.
pub fn try_scan_carrot_coinbase_enote<VI: ViewIncomingKeyDevice>(
    enote: &CarrotCoinbaseEnoteV1,
    s_sender_receiver_unctx: &MontgomeryECDH,
    k_view_dev: &VI,
    account_spend_pubkey: &AddressSpendPubkey,
) -> ScanResult<CarrotCoinbaseIntermediateEnoteRecordV1> {
    // input_context = "C" || IntToBytes256(block_index)
    let input_context = make_carrot_input_context_coinbase(enote.block_index);

    // if vt' != vt, then FAIL
    if !test_carrot_view_tag(
        s_sender_receiver_unctx.as_bytes(),
        &input_context,
        &enote.onetime_address,
        &enote.view_tag,
    ) {
        return Err(ScanFailure::Miss);
    }

    // s^ctx_sr = H_32(s_sr, D_e, input_context)
    let s_sender_receiver = make_carrot_sender_receiver_secret(
        s_sender_receiver_unctx.as_bytes(),
        &enote.enote_ephemeral_pubkey,
        &input_context,
    );

    // C_a = G + a H
    let implied_amount_commitment = AmountCommitment(zero_commit(enote.amount));

    // k^o_g, k^o_t, K^j_s', anchor'
    let (
        sender_extension_g,
        sender_extension_t,
        address_spend_pubkey,
        mut nominal_payment_id,
        nominal_janus_anchor,
    ) = scan_carrot_destination_parts(
        &enote.onetime_address,
        &implied_amount_commitment,
        &enote.anchor_enc,
        None,
        &s_sender_receiver,
    )
    .ok_or(ScanFailure::Miss)?;

    // if K^j_s' != K_s, then FAIL
    if &address_spend_pubkey != account_spend_pubkey {
        return Err(ScanFailure::Miss);
    }

    // verify Janus attack protection
    if !verify_carrot_janus_protection(
        &input_context,
        &enote.onetime_address,
        k_view_dev,
        account_spend_pubkey,
        &address_spend_pubkey,
        &enote.enote_ephemeral_pubkey,
        &nominal_janus_anchor,
        &mut nominal_payment_id,
    ) {
        tracing::debug!("carrot coinbase enote failed janus protection verification");
        return Err(ScanFailure::Janus);
    }

    Ok(CarrotCoinbaseIntermediateEnoteRecordV1 {
        enote: enote.clone(),
        sender_extension_g,
        sender_extension_t,
        address_spend_pubkey,
    })
}
