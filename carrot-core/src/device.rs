use curve25519_dalek::EdwardsPoint;
use thiserror::Error;

use crate::address_utils::make_carrot_index_extension_generator;
use crate::core_types::*;
use crate::enote_utils::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("device not connected")]
    NotConnected,
    #[error("device needs password")]
    PasswordNeeded,
    #[error("device failed an internal computation")]
    Internal,
}

pub type Result<T> = core::result::Result<T, Error>;

/// Borrowing handle over the incoming view key k_v. The core never copies
/// the underlying secret into long-lived storage.
pub trait ViewIncomingKeyDevice {
    /// kvP = k_v * P
    #[allow(non_snake_case)]
    fn view_key_scalar_mult_ed25519(&self, P: &EdwardsPoint) -> Result<EdwardsPoint>;

    /// s_sr = 8 k_v D
    #[allow(non_snake_case)]
    fn view_key_scalar_mult_x25519(&self, D: &EnoteEphemeralPubkey) -> Result<MontgomeryECDH>;

    /// anchor_sp = H_16(D_e, input_context, Ko, k_v, K_s)
    fn make_janus_anchor_special(
        &self,
        enote_ephemeral_pubkey: &EnoteEphemeralPubkey,
        input_context: &InputContext,
        onetime_address: &OutputPubkey,
        account_spend_pubkey: &AddressSpendPubkey,
    ) -> Result<JanusAnchor>;
}

/// Borrowing handle over the view-balance secret s_vb.
pub trait ViewBalanceSecretDevice {
    /// vt = H_3(s_vb || input_context || Ko)
    fn make_internal_view_tag(
        &self,
        input_context: &InputContext,
        onetime_address: &OutputPubkey,
    ) -> Result<ViewTag>;

    /// s^ctx_sr = H_32(s_vb, D_e, input_context)
    fn make_internal_sender_receiver_secret(
        &self,
        enote_ephemeral_pubkey: &EnoteEphemeralPubkey,
        input_context: &InputContext,
    ) -> Result<SenderReceiverSecret>;
}

/// Borrowing handle over the generate-address secret s_ga.
pub trait GenerateAddressSecretDevice {
    /// m = H_n(s_ga, j_major, j_minor)
    fn make_index_extension_generator(
        &self,
        j_major: u32,
        j_minor: u32,
    ) -> Result<AddressIndexGeneratorSecret>;
}

impl ViewIncomingKeyDevice for ViewIncomingKey {
    #[allow(non_snake_case)]
    fn view_key_scalar_mult_ed25519(&self, P: &EdwardsPoint) -> Result<EdwardsPoint> {
        Ok(self.0 * P)
    }

    #[allow(non_snake_case)]
    fn view_key_scalar_mult_x25519(&self, D: &EnoteEphemeralPubkey) -> Result<MontgomeryECDH> {
        Ok(make_carrot_uncontextualized_shared_key_receiver(self, D))
    }

    fn make_janus_anchor_special(
        &self,
        enote_ephemeral_pubkey: &EnoteEphemeralPubkey,
        input_context: &InputContext,
        onetime_address: &OutputPubkey,
        account_spend_pubkey: &AddressSpendPubkey,
    ) -> Result<JanusAnchor> {
        Ok(make_carrot_janus_anchor_special(
            enote_ephemeral_pubkey,
            input_context,
            onetime_address,
            self,
            account_spend_pubkey,
        ))
    }
}

impl ViewBalanceSecretDevice for ViewBalanceSecret {
    fn make_internal_view_tag(
        &self,
        input_context: &InputContext,
        onetime_address: &OutputPubkey,
    ) -> Result<ViewTag> {
        Ok(make_carrot_view_tag(
            self.as_bytes(),
            input_context,
            onetime_address,
        ))
    }

    fn make_internal_sender_receiver_secret(
        &self,
        enote_ephemeral_pubkey: &EnoteEphemeralPubkey,
        input_context: &InputContext,
    ) -> Result<SenderReceiverSecret> {
        Ok(make_carrot_sender_receiver_secret(
            self.as_bytes(),
            enote_ephemeral_pubkey,
            input_context,
        ))
    }
}

impl GenerateAddressSecretDevice for GenerateAddressSecret {
    fn make_index_extension_generator(
        &self,
        j_major: u32,
        j_minor: u32,
    ) -> Result<AddressIndexGeneratorSecret> {
        Ok(make_carrot_index_extension_generator(self, j_major, j_minor))
    }
}
