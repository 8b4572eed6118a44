use thiserror::Error;

use crate::core_types::*;
use crate::destination::CarrotDestinationV1;
use crate::device::{self, ViewBalanceSecretDevice, ViewIncomingKeyDevice};
use crate::enote::{CarrotCoinbaseEnoteV1, CarrotEnoteV1};
use crate::enote_utils::*;
use crate::random::new_random;

////
// CarrotPaymentProposalV1
// - for creating an output proposal to send an amount to someone
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CarrotPaymentProposalV1 {
    /// user address
    pub destination: CarrotDestinationV1,
    /// a
    pub amount: Amount,
    /// anchor_norm: secret 16-byte randomness for the Janus anchor
    pub randomness: JanusAnchor,
}

////
// CarrotPaymentProposalSelfSendV1
// - for creating an output proposal to send change or a payment to yourself
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CarrotPaymentProposalSelfSendV1 {
    /// one of our own address spend pubkeys: K^j_s
    pub destination_address_spend_pubkey: AddressSpendPubkey,
    /// a
    pub amount: Amount,
    /// enote_type
    pub enote_type: CarrotEnoteType,
    /// D_e, reused from the paired output in a 2-out set
    pub enote_ephemeral_pubkey: EnoteEphemeralPubkey,
}

////
// RCTOutputEnoteProposal
// - a constructed enote plus the opening of its amount commitment, which
//   the surrounding tx builder needs for range proofs
///
#[derive(Clone, Debug)]
pub struct RCTOutputEnoteProposal {
    pub enote: CarrotEnoteV1,
    pub amount: Amount,
    pub amount_blinding_factor: AmountBlindingKey,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("normal payment proposal has zero janus anchor randomness")]
    ZeroRandomness,
    #[error("normal payment proposals contain duplicate randomness")]
    DuplicateRandomness,
    #[error("coinbase outputs cannot pay subaddresses or integrated addresses")]
    CoinbaseDestinationNotMain,
    #[error("output set has fewer than the minimum number of outputs")]
    TooFewOutputs,
    #[error("output set has more than the maximum number of outputs")]
    TooManyOutputs,
    #[error("output set contains no self-send output")]
    NoSelfSend,
    #[error("output set contains more than one integrated address output")]
    MultipleIntegrated,
    #[error("address contains an undecodable or torsioned point")]
    BadAddressPoints,
    #[error("neither a view-balance nor a view-incoming device was provided")]
    MissingDevice,
    #[error("a 2-out set must share one enote ephemeral pubkey")]
    UnsharedEphemeralPubkey,
    #[error("a >2-out set must have pairwise-distinct enote ephemeral pubkeys")]
    DuplicateEphemeralPubkey,
    #[error("device error: {0}")]
    Device(#[from] device::Error),
    #[error("internal inconsistency: {0}")]
    Fatal(&'static str),
}

pub type Result<T> = core::result::Result<T, Error>;

fn get_enote_ephemeral_privkey(
    proposal: &CarrotPaymentProposalV1,
    input_context: &InputContext,
) -> EnoteEphemeralKey {
    // d_e = H_n(anchor_norm, input_context, K^j_s, K^j_v, pid)
    make_carrot_enote_ephemeral_privkey(
        &proposal.randomness,
        input_context,
        &proposal.destination.address_spend_pubkey,
        &proposal.destination.address_view_pubkey,
        &proposal.destination.payment_id,
    )
}

/// Get the proposal's enote ephemeral pubkey D_e.
pub fn get_enote_ephemeral_pubkey(
    proposal: &CarrotPaymentProposalV1,
    input_context: &InputContext,
) -> Result<EnoteEphemeralPubkey> {
    let enote_ephemeral_privkey = get_enote_ephemeral_privkey(proposal, input_context);

    make_carrot_enote_ephemeral_pubkey(
        &enote_ephemeral_privkey,
        &proposal.destination.address_spend_pubkey,
        proposal.destination.is_subaddress,
    )
    .ok_or(Error::BadAddressPoints)
}

fn get_normal_proposal_ecdh_parts(
    proposal: &CarrotPaymentProposalV1,
    input_context: &InputContext,
) -> Result<(EnoteEphemeralPubkey, MontgomeryECDH)> {
    // 1. d_e = H_n(anchor_norm, input_context, K^j_s, K^j_v, pid)
    let enote_ephemeral_privkey = get_enote_ephemeral_privkey(proposal, input_context);

    // 2. make D_e
    let enote_ephemeral_pubkey = get_enote_ephemeral_pubkey(proposal, input_context)?;

    // 3. s_sr = 8 d_e ConvertPointE(K^j_v)
    let s_sender_receiver_unctx = make_carrot_uncontextualized_shared_key_sender(
        &enote_ephemeral_privkey,
        &proposal.destination.address_view_pubkey,
    )
    .ok_or(Error::BadAddressPoints)?;

    Ok((enote_ephemeral_pubkey, s_sender_receiver_unctx))
}

fn get_output_proposal_parts(
    s_sender_receiver: &SenderReceiverSecret,
    destination_spend_pubkey: &AddressSpendPubkey,
    payment_id: &PaymentId,
    amount: Amount,
    enote_type: CarrotEnoteType,
    coinbase_amount_commitment: bool,
) -> Result<(
    AmountBlindingKey,
    AmountCommitment,
    OutputPubkey,
    EncryptedAmount,
    EncryptedPaymentId,
)> {
    // 1. k_a = H_n(s^ctx_sr, enote_type) if !coinbase, else 1
    let amount_blinding_factor = if coinbase_amount_commitment {
        AmountBlindingKey::from(1u64)
    } else {
        make_carrot_amount_blinding_factor(s_sender_receiver, enote_type)
    };

    // 2. C_a = k_a G + a H
    let amount_commitment = make_carrot_amount_commitment(amount, &amount_blinding_factor);

    // 3. Ko = K^j_s + K^o_ext = K^j_s + (k^o_g G + k^o_t T)
    let onetime_address = make_carrot_onetime_address(
        destination_spend_pubkey,
        s_sender_receiver,
        &amount_commitment,
    )
    .ok_or(Error::BadAddressPoints)?;

    // 4. a_enc = a XOR m_a
    let encrypted_amount = encrypt_carrot_amount(amount, s_sender_receiver, &onetime_address);

    // 5. pid_enc = pid XOR m_pid
    let encrypted_payment_id =
        encrypt_legacy_payment_id(payment_id, s_sender_receiver, &onetime_address);

    Ok((
        amount_blinding_factor,
        amount_commitment,
        onetime_address,
        encrypted_amount,
        encrypted_payment_id,
    ))
}

fn get_external_output_proposal_parts(
    s_sender_receiver_unctx: &MontgomeryECDH,
    destination_spend_pubkey: &AddressSpendPubkey,
    payment_id: &PaymentId,
    amount: Amount,
    enote_type: CarrotEnoteType,
    enote_ephemeral_pubkey: &EnoteEphemeralPubkey,
    input_context: &InputContext,
    coinbase_amount_commitment: bool,
) -> Result<(
    SenderReceiverSecret,
    AmountBlindingKey,
    AmountCommitment,
    OutputPubkey,
    EncryptedAmount,
    EncryptedPaymentId,
    ViewTag,
)> {
    // 1. s^ctx_sr = H_32(s_sr, D_e, input_context)
    let s_sender_receiver = make_carrot_sender_receiver_secret(
        s_sender_receiver_unctx.as_bytes(),
        enote_ephemeral_pubkey,
        input_context,
    );

    // 2. k_a, C_a, Ko, a_enc, pid_enc
    let (
        amount_blinding_factor,
        amount_commitment,
        onetime_address,
        encrypted_amount,
        encrypted_payment_id,
    ) = get_output_proposal_parts(
        &s_sender_receiver,
        destination_spend_pubkey,
        payment_id,
        amount,
        enote_type,
        coinbase_amount_commitment,
    )?;

    // 3. vt = H_3(s_sr || input_context || Ko)
    let view_tag = make_carrot_view_tag(
        s_sender_receiver_unctx.as_bytes(),
        input_context,
        &onetime_address,
    );

    Ok((
        s_sender_receiver,
        amount_blinding_factor,
        amount_commitment,
        onetime_address,
        encrypted_amount,
        encrypted_payment_id,
        view_tag,
    ))
}

/// Convert a normal payment proposal into a coinbase output enote.
pub fn get_coinbase_output_proposal_v1(
    proposal: &CarrotPaymentProposalV1,
    block_index: BlockIndex,
) -> Result<CarrotCoinbaseEnoteV1> {
    // 1. sanity checks
    if proposal.randomness == NULL_JANUS_ANCHOR {
        return Err(Error::ZeroRandomness);
    }
    if proposal.destination.is_subaddress || proposal.destination.is_integrated() {
        return Err(Error::CoinbaseDestinationNotMain);
    }

    // 2. input_context = "C" || IntToBytes256(block_index)
    let input_context = make_carrot_input_context_coinbase(block_index);

    // 3. make D_e and do external ECDH
    let (enote_ephemeral_pubkey, s_sender_receiver_unctx) =
        get_normal_proposal_ecdh_parts(proposal, &input_context)?;

    // 4. build the output enote address pieces
    let (s_sender_receiver, _, _, onetime_address, _, _, view_tag) =
        get_external_output_proposal_parts(
            &s_sender_receiver_unctx,
            &proposal.destination.address_spend_pubkey,
            &NULL_PAYMENT_ID,
            proposal.amount,
            CarrotEnoteType::Payment,
            &enote_ephemeral_pubkey,
            &input_context,
            true,
        )?;

    // 5. anchor_enc = anchor XOR m_anchor
    let anchor_enc =
        encrypt_carrot_anchor(&proposal.randomness, &s_sender_receiver, &onetime_address);

    // 6. save the cleartext amount and block index
    Ok(CarrotCoinbaseEnoteV1 {
        onetime_address,
        amount: proposal.amount,
        anchor_enc,
        view_tag,
        enote_ephemeral_pubkey,
        block_index,
    })
}

/// Convert a normal payment proposal into an output enote.
pub fn get_output_proposal_normal_v1(
    proposal: &CarrotPaymentProposalV1,
    tx_first_key_image: &KeyImage,
) -> Result<(RCTOutputEnoteProposal, EncryptedPaymentId)> {
    // 1. sanity checks
    if proposal.randomness == NULL_JANUS_ANCHOR {
        return Err(Error::ZeroRandomness);
    }

    // 2. input_context = "R" || KI_1
    let input_context = make_carrot_input_context(tx_first_key_image);

    // 3. make D_e and do external ECDH
    let (enote_ephemeral_pubkey, s_sender_receiver_unctx) =
        get_normal_proposal_ecdh_parts(proposal, &input_context)?;

    // 4. build the output enote address pieces
    let (
        s_sender_receiver,
        amount_blinding_factor,
        amount_commitment,
        onetime_address,
        amount_enc,
        encrypted_payment_id,
        view_tag,
    ) = get_external_output_proposal_parts(
        &s_sender_receiver_unctx,
        &proposal.destination.address_spend_pubkey,
        &proposal.destination.payment_id,
        proposal.amount,
        CarrotEnoteType::Payment,
        &enote_ephemeral_pubkey,
        &input_context,
        false,
    )?;

    // 5. anchor_enc = anchor XOR m_anchor
    let anchor_enc =
        encrypt_carrot_anchor(&proposal.randomness, &s_sender_receiver, &onetime_address);

    // 6. save the amount and first key image
    Ok((
        RCTOutputEnoteProposal {
            enote: CarrotEnoteV1 {
                onetime_address,
                amount_commitment,
                amount_enc,
                anchor_enc,
                view_tag,
                enote_ephemeral_pubkey,
                tx_first_key_image: tx_first_key_image.clone(),
            },
            amount: proposal.amount,
            amount_blinding_factor,
        },
        encrypted_payment_id,
    ))
}

/// Convert a self-send payment proposal into an output enote, recognizable
/// with the incoming view key alone.
pub fn get_output_proposal_special_v1<VI: ViewIncomingKeyDevice>(
    proposal: &CarrotPaymentProposalSelfSendV1,
    k_view_dev: &VI,
    account_spend_pubkey: &AddressSpendPubkey,
    tx_first_key_image: &KeyImage,
) -> Result<RCTOutputEnoteProposal> {
    // 1. input_context = "R" || KI_1
    let input_context = make_carrot_input_context(tx_first_key_image);

    // 2. s_sr = 8 k_v D_e
    let s_sender_receiver_unctx =
        k_view_dev.view_key_scalar_mult_x25519(&proposal.enote_ephemeral_pubkey)?;

    // 3. build the output enote address pieces
    let (
        s_sender_receiver,
        amount_blinding_factor,
        amount_commitment,
        onetime_address,
        amount_enc,
        _,
        view_tag,
    ) = get_external_output_proposal_parts(
        &s_sender_receiver_unctx,
        &proposal.destination_address_spend_pubkey,
        &NULL_PAYMENT_ID,
        proposal.amount,
        proposal.enote_type,
        &proposal.enote_ephemeral_pubkey,
        &input_context,
        false,
    )?;

    // 4. anchor_sp = H_16(D_e, input_context, Ko, k_v, K_s)
    let janus_anchor_special = k_view_dev.make_janus_anchor_special(
        &proposal.enote_ephemeral_pubkey,
        &input_context,
        &onetime_address,
        account_spend_pubkey,
    )?;

    // 5. anchor_enc = anchor_sp XOR m_anchor
    let anchor_enc =
        encrypt_carrot_anchor(&janus_anchor_special, &s_sender_receiver, &onetime_address);

    // 6. save the enote ephemeral pubkey, first key image, and amount
    Ok(RCTOutputEnoteProposal {
        enote: CarrotEnoteV1 {
            onetime_address,
            amount_commitment,
            amount_enc,
            anchor_enc,
            view_tag,
            enote_ephemeral_pubkey: proposal.enote_ephemeral_pubkey.clone(),
            tx_first_key_image: tx_first_key_image.clone(),
        },
        amount: proposal.amount,
        amount_blinding_factor,
    })
}

/// Convert a self-send payment proposal into an output enote, recognizable
/// only with the view-balance secret. No ECDH is performed.
pub fn get_output_proposal_internal_v1<VB, R>(
    proposal: &CarrotPaymentProposalSelfSendV1,
    s_view_balance_dev: &VB,
    tx_first_key_image: &KeyImage,
    rng: &mut R,
) -> Result<RCTOutputEnoteProposal>
where
    VB: ViewBalanceSecretDevice,
    R: rand_core::CryptoRngCore,
{
    // 1. input_context = "R" || KI_1
    let input_context = make_carrot_input_context(tx_first_key_image);

    // 2. s^ctx_sr = H_32(s_vb, D_e, input_context)
    let s_sender_receiver = s_view_balance_dev
        .make_internal_sender_receiver_secret(&proposal.enote_ephemeral_pubkey, &input_context)?;

    // 3. build the output enote address pieces
    let (amount_blinding_factor, amount_commitment, onetime_address, amount_enc, _) =
        get_output_proposal_parts(
            &s_sender_receiver,
            &proposal.destination_address_spend_pubkey,
            &NULL_PAYMENT_ID,
            proposal.amount,
            proposal.enote_type,
            false,
        )?;

    // 4. vt = H_3(s_vb || input_context || Ko)
    let view_tag =
        s_view_balance_dev.make_internal_view_tag(&input_context, &onetime_address)?;

    // 5. anchor_enc is uniformly random for internal enotes
    let anchor_enc: EncryptedJanusAnchor = new_random(rng);

    // 6. save the enote ephemeral pubkey, first key image, and amount
    Ok(RCTOutputEnoteProposal {
        enote: CarrotEnoteV1 {
            onetime_address,
            amount_commitment,
            amount_enc,
            anchor_enc,
            view_tag,
            enote_ephemeral_pubkey: proposal.enote_ephemeral_pubkey.clone(),
            tx_first_key_image: tx_first_key_image.clone(),
        },
        amount: proposal.amount,
        amount_blinding_factor,
    })
}
