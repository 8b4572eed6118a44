use curve25519_dalek::EdwardsPoint;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::core_types::*;
use crate::destination::CarrotDestinationV1;
use crate::domain_separators;
use crate::generators;
use crate::hash_functions::*;
use crate::math_utils::*;
use crate::transcript::make_carrot_transcript;

pub fn make_carrot_provespend_key(s_master: &Uniform32Secret) -> ProveSpendKey {
    // k_ps = H_n(s_m)
    let transcript = make_carrot_transcript!(domain_separators::PROVE_SPEND_KEY,
        Uniform32Secret : s_master);
    ProveSpendKey(derive_scalar(&transcript))
}

pub fn make_carrot_viewbalance_secret(s_master: &Uniform32Secret) -> ViewBalanceSecret {
    // s_vb = H_32(s_m)
    let transcript = make_carrot_transcript!(domain_separators::VIEW_BALANCE_SECRET,
        Uniform32Secret : s_master);
    ViewBalanceSecret(derive_bytes_32(&transcript))
}

pub fn make_carrot_generateimage_key(s_view_balance: &ViewBalanceSecret) -> GenerateImageKey {
    // k_gi = H_n(s_vb)
    let transcript = make_carrot_transcript!(domain_separators::GENERATE_IMAGE_KEY,
        ViewBalanceSecret : s_view_balance);
    GenerateImageKey(derive_scalar(&transcript))
}

pub fn make_carrot_viewincoming_key(s_view_balance: &ViewBalanceSecret) -> ViewIncomingKey {
    // k_v = H_n(s_vb)
    let transcript = make_carrot_transcript!(domain_separators::INCOMING_VIEW_KEY,
        ViewBalanceSecret : s_view_balance);
    ViewIncomingKey(derive_scalar(&transcript))
}

pub fn make_carrot_generateaddress_secret(
    s_view_balance: &ViewBalanceSecret,
) -> GenerateAddressSecret {
    // s_ga = H_32(s_vb)
    let transcript = make_carrot_transcript!(domain_separators::GENERATE_ADDRESS_SECRET,
        ViewBalanceSecret : s_view_balance);
    GenerateAddressSecret(derive_bytes_32(&transcript))
}

pub fn make_carrot_spend_pubkey(
    k_generate_image: &GenerateImageKey,
    k_prove_spend: &ProveSpendKey,
) -> AddressSpendPubkey {
    // K_s = k_gi G + k_ps T
    AddressSpendPubkey(scalar_mul_gt(&k_generate_image.0, &k_prove_spend.0))
}

pub fn make_carrot_account_view_pubkey(
    k_view: &ViewIncomingKey,
    spend_pubkey: &AddressSpendPubkey,
) -> Option<AddressViewPubkey> {
    // K_v = k_v K_s
    Some(AddressViewPubkey(scalar_mul_key_vartime(
        &k_view.0,
        &spend_pubkey.0,
    )?))
}

pub fn make_carrot_primary_address_view_pubkey(k_view: &ViewIncomingKey) -> AddressViewPubkey {
    // K^0_v = k_v G
    AddressViewPubkey(scalar_mul_base(&k_view.0))
}

////
// CarrotAccountSecrets
// - the full secret tree under one master seed, plus the account pubkeys
///
#[derive(Clone, Debug, Zeroize, ZeroizeOnDrop)]
pub struct CarrotAccountSecrets {
    /// k_ps
    pub k_prove_spend: ProveSpendKey,
    /// s_vb
    pub s_view_balance: ViewBalanceSecret,
    /// k_gi
    pub k_generate_image: GenerateImageKey,
    /// k_v
    pub k_view_incoming: ViewIncomingKey,
    /// s_ga
    pub s_generate_address: GenerateAddressSecret,
    /// K_s = k_gi G + k_ps T
    pub account_spend_pubkey: AddressSpendPubkey,
    /// K_v = k_v K_s
    pub account_view_pubkey: AddressViewPubkey,
    /// K^0_v = k_v G
    pub main_address_view_pubkey: AddressViewPubkey,
}

/// Derive the whole secret tree from the master seed. Total and
/// deterministic: equal seeds reproduce the tree byte for byte.
pub fn derive_all(s_master: &Uniform32Secret) -> CarrotAccountSecrets {
    let k_prove_spend = make_carrot_provespend_key(s_master);
    let s_view_balance = make_carrot_viewbalance_secret(s_master);
    let k_generate_image = make_carrot_generateimage_key(&s_view_balance);
    let k_view_incoming = make_carrot_viewincoming_key(&s_view_balance);
    let s_generate_address = make_carrot_generateaddress_secret(&s_view_balance);

    // K_s = k_gi G + k_ps T
    let spend_point =
        EdwardsPoint::mul_base(&k_generate_image.0) + k_prove_spend.0 * *generators::T;

    // K_v = k_v K_s
    let account_view_pubkey = AddressViewPubkey((k_view_incoming.0 * spend_point).compress());

    // K^0_v = k_v G
    let main_address_view_pubkey = make_carrot_primary_address_view_pubkey(&k_view_incoming);

    CarrotAccountSecrets {
        k_prove_spend,
        s_view_balance,
        k_generate_image,
        k_view_incoming,
        s_generate_address,
        account_spend_pubkey: AddressSpendPubkey(spend_point.compress()),
        account_view_pubkey,
        main_address_view_pubkey,
    }
}

impl CarrotAccountSecrets {
    pub fn make_main_address(&self) -> CarrotDestinationV1 {
        CarrotDestinationV1::make_main_address(
            self.account_spend_pubkey.clone(),
            self.main_address_view_pubkey.clone(),
        )
    }

    pub fn make_subaddress(&self, j_major: u32, j_minor: u32) -> Option<CarrotDestinationV1> {
        CarrotDestinationV1::make_subaddress(
            &self.account_spend_pubkey,
            &self.account_view_pubkey,
            &self.s_generate_address,
            j_major,
            j_minor,
        )
    }

    pub fn make_integrated_address(&self, payment_id: PaymentId) -> CarrotDestinationV1 {
        CarrotDestinationV1::make_integrated_address(
            self.account_spend_pubkey.clone(),
            self.main_address_view_pubkey.clone(),
            payment_id,
        )
    }
}
