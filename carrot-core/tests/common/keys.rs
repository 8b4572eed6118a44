use std::collections::HashMap;

use carrot_core::account::{derive_all, CarrotAccountSecrets};
use carrot_core::address_utils::{
    make_carrot_index_extension_generator, make_carrot_subaddress_scalar,
};
use carrot_core::random::new_random;
use carrot_core::*;
use curve25519_dalek::Scalar;

use crate::common::math::scalar_mul_gt;
use crate::common::{MAX_SUBADDRESS_MAJOR_INDEX, MAX_SUBADDRESS_MINOR_INDEX};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubaddressIndex {
    pub major: u32,
    pub minor: u32,
}

impl SubaddressIndex {
    pub fn is_subaddress(&self) -> bool {
        self.major != 0 || self.minor != 0
    }
}

pub struct MockKeys {
    pub s_master: Uniform32Secret,
    pub secrets: CarrotAccountSecrets,
    pub subaddress_map: HashMap<AddressSpendPubkey, SubaddressIndex>,
}

impl MockKeys {
    pub fn generate() -> Self {
        let s_master: Uniform32Secret = new_random(&mut rand_core::OsRng);
        Self::from_master(s_master)
    }

    pub fn from_master(s_master: Uniform32Secret) -> Self {
        let secrets = derive_all(&s_master);

        let mut subaddress_map = HashMap::new();
        for major in 0..MAX_SUBADDRESS_MAJOR_INDEX {
            for minor in 0..MAX_SUBADDRESS_MINOR_INDEX {
                let index = SubaddressIndex { major, minor };
                let address_spend_pubkey = if index.is_subaddress() {
                    secrets
                        .make_subaddress(major, minor)
                        .expect("make_subaddress")
                        .address_spend_pubkey
                } else {
                    secrets.account_spend_pubkey.clone()
                };
                subaddress_map.insert(address_spend_pubkey, index);
            }
        }

        Self {
            s_master,
            secrets,
            subaddress_map,
        }
    }

    pub fn main_address(&self) -> CarrotDestinationV1 {
        self.secrets.make_main_address()
    }

    pub fn integrated_address(&self, payment_id: PaymentId) -> CarrotDestinationV1 {
        self.secrets.make_integrated_address(payment_id)
    }

    pub fn subaddress(&self, index: SubaddressIndex) -> CarrotDestinationV1 {
        if index.is_subaddress() {
            self.secrets
                .make_subaddress(index.major, index.minor)
                .expect("make_subaddress")
        } else {
            self.main_address()
        }
    }

    /// (k^g_a, k^t_a, K^j_s) such that K^j_s = k^g_a G + k^t_a T
    pub fn opening_for_subaddress(&self, index: SubaddressIndex) -> (Scalar, Scalar, AddressSpendPubkey) {
        // m = H_n(s_ga, j_major, j_minor)
        let address_index_generator = make_carrot_index_extension_generator(
            &self.secrets.s_generate_address,
            index.major,
            index.minor,
        );

        // d = H_n(K_s, m, j_major, j_minor), or 1 at (0, 0)
        let subaddress_scalar = make_carrot_subaddress_scalar(
            &self.secrets.account_spend_pubkey,
            &address_index_generator,
            index.major,
            index.minor,
        );

        // k^g_a = d k_gi
        let address_privkey_g = self.secrets.k_generate_image.0 * subaddress_scalar.0;

        // k^t_a = d k_ps
        let address_privkey_t = self.secrets.k_prove_spend.0 * subaddress_scalar.0;

        // sanity check the opening against the derived address
        let recomputed_spend_pubkey = scalar_mul_gt(&address_privkey_g, &address_privkey_t);
        assert_eq!(
            recomputed_spend_pubkey,
            self.subaddress(index).address_spend_pubkey.0
        );

        (
            address_privkey_g,
            address_privkey_t,
            AddressSpendPubkey(recomputed_spend_pubkey),
        )
    }

    pub fn try_opening_for_onetime_address(
        &self,
        address_spend_pubkey: &AddressSpendPubkey,
        sender_extension_g: &OnetimeExtensionG,
        sender_extension_t: &OnetimeExtensionT,
    ) -> Option<(Scalar, Scalar)> {
        let index = *self.subaddress_map.get(address_spend_pubkey)?;

        let (address_privkey_g, address_privkey_t, recomputed_spend_pubkey) =
            self.opening_for_subaddress(index);
        assert_eq!(&recomputed_spend_pubkey, address_spend_pubkey);

        // x = k^g_a + k^o_g
        let x = address_privkey_g + sender_extension_g.0;

        // y = k^t_a + k^o_t
        let y = address_privkey_t + sender_extension_t.0;

        Some((x, y))
    }

    pub fn can_open_onetime_address(
        &self,
        address_spend_pubkey: &AddressSpendPubkey,
        sender_extension_g: &OnetimeExtensionG,
        sender_extension_t: &OnetimeExtensionT,
        onetime_address: &OutputPubkey,
    ) -> bool {
        let Some((x, y)) = self.try_opening_for_onetime_address(
            address_spend_pubkey,
            sender_extension_g,
            sender_extension_t,
        ) else {
            return false;
        };

        // Ko' = x G + y T
        let recomputed_onetime_address = scalar_mul_gt(&x, &y);

        // Ko' ?= Ko
        &recomputed_onetime_address == &onetime_address.0
    }
}
