use crate::consts::{CARROT_MAX_TX_OUTPUTS, CARROT_MIN_TX_OUTPUTS};
use crate::core_types::*;
use crate::destination::CarrotDestinationV1;
use crate::device::{ViewBalanceSecretDevice, ViewIncomingKeyDevice};
use crate::math_utils::is_invalid_or_has_torsion;
use crate::payment_proposal::*;
use crate::random::{new_random, Random};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdditionalOutputType {
    /// self-send proposal with enote_type = "payment" and a shared D_e
    PaymentShared,
    /// self-send proposal with enote_type = "change" and a shared D_e
    ChangeShared,
    /// self-send proposal with enote_type = "change" and a unique D_e
    ChangeUnique,
    /// outgoing proposal to a random address with amount 0
    Dummy,
}

#[derive(Clone, Debug)]
pub enum AdditionalOutputProposal {
    None,
    Normal(CarrotPaymentProposalV1),
    SelfSend(CarrotPaymentProposalSelfSendV1),
}

/// Decide which output must be appended to complete a proposal set.
/// Returns Ok(None) when the set is already complete, and a fatal error on
/// the two inconsistent rows (zero outputs, or a set that needs another
/// output but is already full).
pub fn get_additional_output_type(
    num_outgoing: usize,
    num_selfsend: usize,
    remaining_change: bool,
    have_payment_type_selfsend: bool,
) -> Result<Option<AdditionalOutputType>> {
    let num_outputs = num_outgoing + num_selfsend;
    let already_completed = num_outputs >= 2 && num_selfsend >= 1 && !remaining_change;
    if num_outputs == 0 {
        Err(Error::Fatal("output set contains zero outputs"))
    } else if already_completed {
        Ok(None)
    } else if num_outputs == 1 {
        if num_selfsend == 0 {
            Ok(Some(AdditionalOutputType::ChangeShared))
        } else if !remaining_change {
            Ok(Some(AdditionalOutputType::Dummy))
        } else if have_payment_type_selfsend {
            Ok(Some(AdditionalOutputType::ChangeShared))
        } else {
            Ok(Some(AdditionalOutputType::PaymentShared))
        }
    } else if num_outputs < CARROT_MAX_TX_OUTPUTS {
        Ok(Some(AdditionalOutputType::ChangeUnique))
    } else {
        Err(Error::Fatal(
            "set needs finalization but already contains too many outputs",
        ))
    }
}

/// Build the proposal decided by `get_additional_output_type`. SHARED
/// variants reuse `other_enote_ephemeral_pubkey`; UNIQUE draws a fresh
/// X25519 pubkey; DUMMY pays a freshly generated main address amount 0.
pub fn get_additional_output_proposal<R>(
    num_outgoing: usize,
    num_selfsend: usize,
    needed_change_amount: Amount,
    have_payment_type_selfsend: bool,
    change_address_spend_pubkey: &AddressSpendPubkey,
    other_enote_ephemeral_pubkey: &EnoteEphemeralPubkey,
    rng: &mut R,
) -> Result<AdditionalOutputProposal>
where
    R: rand_core::CryptoRngCore,
{
    let additional_output_type = get_additional_output_type(
        num_outgoing,
        num_selfsend,
        needed_change_amount != 0,
        have_payment_type_selfsend,
    )?;

    let Some(additional_output_type) = additional_output_type else {
        return Ok(AdditionalOutputProposal::None);
    };

    Ok(match additional_output_type {
        AdditionalOutputType::PaymentShared => {
            AdditionalOutputProposal::SelfSend(CarrotPaymentProposalSelfSendV1 {
                destination_address_spend_pubkey: change_address_spend_pubkey.clone(),
                amount: needed_change_amount,
                enote_type: CarrotEnoteType::Payment,
                enote_ephemeral_pubkey: other_enote_ephemeral_pubkey.clone(),
            })
        }
        AdditionalOutputType::ChangeShared => {
            AdditionalOutputProposal::SelfSend(CarrotPaymentProposalSelfSendV1 {
                destination_address_spend_pubkey: change_address_spend_pubkey.clone(),
                amount: needed_change_amount,
                enote_type: CarrotEnoteType::Change,
                enote_ephemeral_pubkey: other_enote_ephemeral_pubkey.clone(),
            })
        }
        AdditionalOutputType::ChangeUnique => {
            AdditionalOutputProposal::SelfSend(CarrotPaymentProposalSelfSendV1 {
                destination_address_spend_pubkey: change_address_spend_pubkey.clone(),
                amount: needed_change_amount,
                enote_type: CarrotEnoteType::Change,
                enote_ephemeral_pubkey: new_random(rng),
            })
        }
        AdditionalOutputType::Dummy => {
            AdditionalOutputProposal::Normal(CarrotPaymentProposalV1 {
                destination: CarrotDestinationV1::new_random_with_params(rng, (false, false)),
                amount: 0,
                randomness: new_random(rng),
            })
        }
    })
}

/// Convert a complete proposal set into the final output enotes of a tx,
/// plus the single published encrypted payment ID. Validates the set-level
/// invariants and emits the enotes sorted by one-time address.
pub fn get_output_enote_proposals<VB, VI, R>(
    mut normal_payment_proposals: Vec<CarrotPaymentProposalV1>,
    selfsend_payment_proposals: &[CarrotPaymentProposalSelfSendV1],
    s_view_balance_dev: Option<&VB>,
    k_view_dev: Option<&VI>,
    account_spend_pubkey: &AddressSpendPubkey,
    tx_first_key_image: &KeyImage,
    rng: &mut R,
) -> Result<(Vec<RCTOutputEnoteProposal>, EncryptedPaymentId)>
where
    VB: ViewBalanceSecretDevice,
    VI: ViewIncomingKeyDevice,
    R: rand_core::CryptoRngCore,
{
    // assert payment proposal counts
    let num_proposals = normal_payment_proposals.len() + selfsend_payment_proposals.len();
    if num_proposals < CARROT_MIN_TX_OUTPUTS {
        return Err(Error::TooFewOutputs);
    }
    if num_proposals > CARROT_MAX_TX_OUTPUTS {
        return Err(Error::TooManyOutputs);
    }
    if selfsend_payment_proposals.is_empty() {
        return Err(Error::NoSelfSend);
    }

    // assert there is at most 1 integrated address payment proposal
    let num_integrated = normal_payment_proposals
        .iter()
        .filter(|proposal| proposal.destination.is_integrated())
        .count();
    if num_integrated > 1 {
        return Err(Error::MultipleIntegrated);
    }

    // assert anchor_norm != 0 for payments
    if normal_payment_proposals
        .iter()
        .any(|proposal| proposal.randomness == NULL_JANUS_ANCHOR)
    {
        return Err(Error::ZeroRandomness);
    }

    // sort normal payment proposals by anchor_norm and assert uniqueness of
    // randomness for each payment
    normal_payment_proposals.sort_by(|a, b| a.randomness.as_bytes().cmp(b.randomness.as_bytes()));
    if normal_payment_proposals
        .windows(2)
        .any(|pair| pair[0].randomness == pair[1].randomness)
    {
        return Err(Error::DuplicateRandomness);
    }

    tracing::debug!(
        num_outgoing = normal_payment_proposals.len(),
        num_selfsend = selfsend_payment_proposals.len(),
        "finalizing carrot output set"
    );

    // construct normal enotes
    let mut output_enote_proposals = Vec::with_capacity(num_proposals);
    let mut encrypted_payment_id = EncryptedPaymentId::default();
    for (i, normal_payment_proposal) in normal_payment_proposals.iter().enumerate() {
        let (output_enote_proposal, proposal_encrypted_payment_id) =
            get_output_proposal_normal_v1(normal_payment_proposal, tx_first_key_image)?;
        output_enote_proposals.push(output_enote_proposal);

        // set pid_enc from the first or the integrated proposal
        let is_first = i == 0;
        let is_integrated = normal_payment_proposal.destination.is_integrated();
        if is_first || is_integrated {
            encrypted_payment_id = proposal_encrypted_payment_id;
        }
    }

    // in the case that the pid target is ambiguous, set it to random bytes
    let ambiguous_pid_destination = num_integrated == 0 && normal_payment_proposals.len() > 1;
    if ambiguous_pid_destination {
        encrypted_payment_id = new_random(rng);
    }

    // construct selfsend enotes, preferring internal enotes over special
    // enotes when a view-balance device is available
    for selfsend_payment_proposal in selfsend_payment_proposals {
        let output_enote_proposal = if let Some(s_view_balance_dev) = s_view_balance_dev {
            get_output_proposal_internal_v1(
                selfsend_payment_proposal,
                s_view_balance_dev,
                tx_first_key_image,
                rng,
            )?
        } else if let Some(k_view_dev) = k_view_dev {
            get_output_proposal_special_v1(
                selfsend_payment_proposal,
                k_view_dev,
                account_spend_pubkey,
                tx_first_key_image,
            )?
        } else {
            return Err(Error::MissingDevice);
        };
        output_enote_proposals.push(output_enote_proposal);
    }

    // sort enotes by D_e and assert the sharing invariant: a 2-out set
    // shares one D_e, a >2-out set has pairwise-distinct D_e
    output_enote_proposals.sort_by(|a, b| {
        a.enote
            .enote_ephemeral_pubkey
            .as_bytes()
            .cmp(b.enote.enote_ephemeral_pubkey.as_bytes())
    });
    let has_unique_ephemeral_pubkeys = output_enote_proposals
        .windows(2)
        .all(|pair| pair[0].enote.enote_ephemeral_pubkey != pair[1].enote.enote_ephemeral_pubkey);
    if num_proposals == 2 && has_unique_ephemeral_pubkeys {
        return Err(Error::UnsharedEphemeralPubkey);
    }
    if num_proposals > 2 && !has_unique_ephemeral_pubkeys {
        return Err(Error::DuplicateEphemeralPubkey);
    }

    // final output order is by Ko
    output_enote_proposals.sort_by(|a, b| {
        a.enote
            .onetime_address
            .as_bytes()
            .cmp(b.enote.onetime_address.as_bytes())
    });

    // assert uniqueness of Ko and that all Ko lie in the prime-order subgroup
    for (i, output_enote_proposal) in output_enote_proposals.iter().enumerate() {
        if is_invalid_or_has_torsion(&output_enote_proposal.enote.onetime_address.0) {
            return Err(Error::BadAddressPoints);
        }
        if i > 0
            && output_enote_proposals[i - 1].enote.onetime_address
                == output_enote_proposal.enote.onetime_address
        {
            return Err(Error::Fatal("output set contains duplicate onetime addresses"));
        }
    }

    Ok((output_enote_proposals, encrypted_payment_id))
}
