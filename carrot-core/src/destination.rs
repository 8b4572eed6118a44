use crate::address_utils::make_carrot_subaddress_scalar;
use crate::core_types::*;
use crate::device::GenerateAddressSecretDevice;
use crate::math_utils::scalar_mul_key_vartime;
use crate::random::Random;

////
// CarrotDestinationV1
// - the public part of an address, plus the flags a sender needs
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CarrotDestinationV1 {
    /// K^j_s
    pub address_spend_pubkey: AddressSpendPubkey,
    /// K^j_v
    pub address_view_pubkey: AddressViewPubkey,
    /// is_subaddress
    pub is_subaddress: bool,
    /// pid, null for non-integrated addresses
    pub payment_id: PaymentId,
}

impl CarrotDestinationV1 {
    pub fn make_main_address(
        account_spend_pubkey: AddressSpendPubkey,
        primary_address_view_pubkey: AddressViewPubkey,
    ) -> Self {
        Self {
            address_spend_pubkey: account_spend_pubkey,
            address_view_pubkey: primary_address_view_pubkey,
            is_subaddress: false,
            payment_id: NULL_PAYMENT_ID,
        }
    }

    pub fn make_subaddress<G: GenerateAddressSecretDevice>(
        account_spend_pubkey: &AddressSpendPubkey,
        account_view_pubkey: &AddressViewPubkey,
        s_generate_address_dev: &G,
        j_major: u32,
        j_minor: u32,
    ) -> Option<Self> {
        // index (0, 0) is the main address, which has its own view pubkey
        if j_major == 0 && j_minor == 0 {
            return None;
        }

        // m = H_n(s_ga, j_major, j_minor)
        let address_index_generator = s_generate_address_dev
            .make_index_extension_generator(j_major, j_minor)
            .ok()?;

        // d = H_n(K_s, m, j_major, j_minor)
        let subaddress_scalar = make_carrot_subaddress_scalar(
            account_spend_pubkey,
            &address_index_generator,
            j_major,
            j_minor,
        );

        // K^j_s = d K_s
        let address_spend_pubkey = AddressSpendPubkey(scalar_mul_key_vartime(
            &subaddress_scalar.0,
            &account_spend_pubkey.0,
        )?);

        // K^j_v = d K_v = k_v K^j_s
        let address_view_pubkey = AddressViewPubkey(scalar_mul_key_vartime(
            &subaddress_scalar.0,
            &account_view_pubkey.0,
        )?);

        Some(Self {
            address_spend_pubkey,
            address_view_pubkey,
            is_subaddress: true,
            payment_id: NULL_PAYMENT_ID,
        })
    }

    pub fn make_integrated_address(
        account_spend_pubkey: AddressSpendPubkey,
        primary_address_view_pubkey: AddressViewPubkey,
        payment_id: PaymentId,
    ) -> Self {
        debug_assert!(payment_id != NULL_PAYMENT_ID);
        Self {
            address_spend_pubkey: account_spend_pubkey,
            address_view_pubkey: primary_address_view_pubkey,
            is_subaddress: false,
            payment_id,
        }
    }

    pub fn is_integrated(&self) -> bool {
        self.payment_id != NULL_PAYMENT_ID
    }
}

impl Random for CarrotDestinationV1 {
    type Params = (bool, bool);
    fn new_random_with_params<R: rand_core::CryptoRngCore + ?Sized>(
        rng: &mut R,
        p: Self::Params,
    ) -> Self {
        let (is_subaddress, is_integrated_address) = p;
        CarrotDestinationV1 {
            address_spend_pubkey: AddressSpendPubkey::new_random_with_params(rng, ()),
            address_view_pubkey: AddressViewPubkey::new_random_with_params(rng, ()),
            is_subaddress,
            payment_id: if is_integrated_address {
                PaymentId::new_random_with_params(rng, ())
            } else {
                NULL_PAYMENT_ID
            },
        }
    }
}
