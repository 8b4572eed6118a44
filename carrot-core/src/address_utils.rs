use curve25519_dalek::Scalar;

use crate::core_types::*;
use crate::domain_separators;
use crate::hash_functions::*;
use crate::transcript::make_carrot_transcript;

pub fn make_carrot_index_extension_generator(
    s_generate_address: &GenerateAddressSecret,
    j_major: u32,
    j_minor: u32,
) -> AddressIndexGeneratorSecret {
    // m = H_n(s_ga, j_major, j_minor)
    let transcript = make_carrot_transcript!(domain_separators::SUBADDRESS_INDEX_GEN,
        GenerateAddressSecret : s_generate_address, u32 : &j_major, u32 : &j_minor);
    AddressIndexGeneratorSecret(derive_scalar(&transcript))
}

pub fn make_carrot_subaddress_scalar(
    account_spend_pubkey: &AddressSpendPubkey,
    s_address_index_generator: &AddressIndexGeneratorSecret,
    j_major: u32,
    j_minor: u32,
) -> SubaddressScalarSecret {
    // d = 1 at the main address index
    if j_major == 0 && j_minor == 0 {
        return SubaddressScalarSecret(Scalar::ONE);
    }

    // d = H_n(K_s, m, j_major, j_minor)
    let transcript = make_carrot_transcript!(domain_separators::SUBADDRESS_SCALAR,
        AddressSpendPubkey : account_spend_pubkey,
        AddressIndexGeneratorSecret : s_address_index_generator,
        u32 : &j_major, u32 : &j_minor);
    SubaddressScalarSecret(derive_scalar(&transcript))
}
