//! Return payments: paying received funds back to the originating wallet
//! without learning its address, per the published return-address scheme.
//! The sender of the original payment derives an F point from the enote's
//! contextualized secret and their own change output; the recipient combines
//! F with the same secret to obtain the ECDH view pubkey of the change
//! output's one-time address, then pays it like a subaddress.

use crate::core_types::*;
use crate::destination::CarrotDestinationV1;
use crate::device::ViewIncomingKeyDevice;
use crate::enote_utils::make_carrot_onetime_address_extension_rp;
use crate::math_utils::scalar_mul_key_vartime;
use crate::payment_proposal::{
    get_output_proposal_normal_v1, CarrotPaymentProposalV1, Error, RCTOutputEnoteProposal, Result,
};

////
// CarrotPaymentProposalReturnV1
// - for creating an output proposal that pays a previously received change
//   output's one-time address back
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CarrotPaymentProposalReturnV1 {
    /// K^change_o, the one-time address being paid back
    pub return_onetime_pubkey: OutputPubkey,
    /// k_v K^change_o, recovered as k_rp F
    pub return_view_pubkey: AddressViewPubkey,
    /// a
    pub amount: Amount,
    /// anchor_norm: secret 16-byte randomness for the Janus anchor
    pub randomness: JanusAnchor,
}

/// F = k_rp^-1 (k_v K^change_o)
///
/// Computed by the sender of the outbound enote, who knows both its
/// contextualized secret and the paired change output.
pub fn make_carrot_return_address_point<VI: ViewIncomingKeyDevice>(
    k_view_dev: &VI,
    change_onetime_address: &OutputPubkey,
    s_sender_receiver: &SenderReceiverSecret,
    amount_commitment: &AmountCommitment,
) -> Result<ReturnAddressPoint> {
    // k_rp = H_n(s^ctx_sr, C_a)
    let k_return_payment =
        make_carrot_onetime_address_extension_rp(s_sender_receiver, amount_commitment);

    // k_v K^change_o
    let change_point = change_onetime_address
        .0
        .decompress()
        .ok_or(Error::BadAddressPoints)?;
    let view_change_point = k_view_dev.view_key_scalar_mult_ed25519(&change_point)?;

    // F = k_rp^-1 (k_v K^change_o)
    Ok(ReturnAddressPoint(
        (k_return_payment.0.invert() * view_change_point).compress(),
    ))
}

/// key_return = k_rp F = k_v K^change_o
///
/// Computed by the recipient of the outbound enote after scanning it; the
/// recovered point is the view pubkey of the return destination.
pub fn recover_carrot_return_view_pubkey(
    return_address_point: &ReturnAddressPoint,
    s_sender_receiver: &SenderReceiverSecret,
    amount_commitment: &AmountCommitment,
) -> Result<AddressViewPubkey> {
    // k_rp = H_n(s^ctx_sr, C_a)
    let k_return_payment =
        make_carrot_onetime_address_extension_rp(s_sender_receiver, amount_commitment);

    // key_return = k_rp F
    Ok(AddressViewPubkey(
        scalar_mul_key_vartime(&k_return_payment.0, &return_address_point.0)
            .ok_or(Error::BadAddressPoints)?,
    ))
}

/// Convert a return payment proposal into an output enote. The change
/// one-time address is paid exactly like a subaddress whose spend pubkey is
/// K^change_o and whose view pubkey is k_v K^change_o, so the original
/// wallet recognizes the enote with its plain external scan.
pub fn get_output_proposal_return_v1(
    proposal: &CarrotPaymentProposalReturnV1,
    tx_first_key_image: &KeyImage,
) -> Result<(RCTOutputEnoteProposal, EncryptedPaymentId)> {
    let destination = CarrotDestinationV1 {
        address_spend_pubkey: AddressSpendPubkey(proposal.return_onetime_pubkey.0),
        address_view_pubkey: proposal.return_view_pubkey.clone(),
        is_subaddress: true,
        payment_id: NULL_PAYMENT_ID,
    };

    get_output_proposal_normal_v1(
        &CarrotPaymentProposalV1 {
            destination,
            amount: proposal.amount,
            randomness: proposal.randomness.clone(),
        },
        tx_first_key_image,
    )
}
