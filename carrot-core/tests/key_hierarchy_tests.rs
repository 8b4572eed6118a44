mod common;

use crate::common::keys::{MockKeys, SubaddressIndex};
use crate::common::math::scalar_mul_gt;
use crate::common::random::{gen_random, gen_subaddress_index_major, gen_subaddress_index_minor};

use carrot_core::account;
use carrot_core::*;
use curve25519_dalek::EdwardsPoint;

#[test]
fn key_hierarchy_determinism() {
    let s_master: Uniform32Secret = gen_random();
    let a = account::derive_all(&s_master);
    let b = account::derive_all(&s_master);

    assert_eq!(a.k_prove_spend, b.k_prove_spend);
    assert_eq!(a.s_view_balance, b.s_view_balance);
    assert_eq!(a.k_generate_image, b.k_generate_image);
    assert_eq!(a.k_view_incoming, b.k_view_incoming);
    assert_eq!(a.s_generate_address, b.s_generate_address);
    assert_eq!(a.account_spend_pubkey, b.account_spend_pubkey);
    assert_eq!(a.account_view_pubkey, b.account_view_pubkey);
    assert_eq!(a.main_address_view_pubkey, b.main_address_view_pubkey);
}

#[test]
fn key_hierarchy_domain_separation() {
    let s_master: Uniform32Secret = gen_random();
    let secrets = account::derive_all(&s_master);

    // every derived secret is distinct
    assert_ne!(secrets.k_prove_spend.0, secrets.k_generate_image.0);
    assert_ne!(secrets.k_prove_spend.0, secrets.k_view_incoming.0);
    assert_ne!(secrets.k_generate_image.0, secrets.k_view_incoming.0);
    assert_ne!(secrets.s_view_balance.0, secrets.s_generate_address.0);
    assert_ne!(&secrets.s_view_balance.0, s_master.as_bytes());
}

#[test]
fn key_consistency() {
    let keys = MockKeys::generate();
    let secrets = &keys.secrets;

    // K_s = k_gi G + k_ps T
    let recomputed_spend_pubkey =
        scalar_mul_gt(&secrets.k_generate_image.0, &secrets.k_prove_spend.0);
    assert_eq!(recomputed_spend_pubkey, secrets.account_spend_pubkey.0);

    // K^0_v = k_v G
    assert_eq!(
        EdwardsPoint::mul_base(&secrets.k_view_incoming.0).compress(),
        secrets.main_address_view_pubkey.0
    );

    // K_v = k_v K_s
    let spend_point = secrets.account_spend_pubkey.0.decompress().unwrap();
    assert_eq!(
        (secrets.k_view_incoming.0 * spend_point).compress(),
        secrets.account_view_pubkey.0
    );
}

#[test]
fn subaddress_view_key_consistency() {
    let keys = MockKeys::generate();
    let secrets = &keys.secrets;

    let j_major = gen_subaddress_index_major();
    let j_minor = gen_subaddress_index_minor();
    let subaddress = keys.subaddress(SubaddressIndex {
        major: j_major,
        minor: j_minor,
    });

    // K^j_v = k_v K^j_s, with the account-level k_v
    let subaddress_spend_point = subaddress.address_spend_pubkey.0.decompress().unwrap();
    assert_eq!(
        (secrets.k_view_incoming.0 * subaddress_spend_point).compress(),
        subaddress.address_view_pubkey.0
    );
}

#[test]
fn subaddress_spend_key_opens_under_account_keys() {
    let keys = MockKeys::generate();

    for index in [
        SubaddressIndex { major: 0, minor: 0 },
        SubaddressIndex { major: 1, minor: 0 },
        SubaddressIndex { major: 0, minor: 1 },
        SubaddressIndex { major: 4, minor: 19 },
    ] {
        // opening_for_subaddress asserts K^j_s = (d k_gi) G + (d k_ps) T
        let (_, _, recomputed) = keys.opening_for_subaddress(index);
        assert_eq!(recomputed, keys.subaddress(index).address_spend_pubkey);
    }
}

#[test]
fn subaddress_rejects_main_index() {
    let keys = MockKeys::generate();
    assert!(keys.secrets.make_subaddress(0, 0).is_none());
}

#[test]
fn integrated_address_shares_main_address_keys() {
    let keys = MockKeys::generate();
    let payment_id = crate::common::random::gen_non_null_payment_id();

    let main_address = keys.main_address();
    let integrated_address = keys.integrated_address(payment_id.clone());

    assert_eq!(
        main_address.address_spend_pubkey,
        integrated_address.address_spend_pubkey
    );
    assert_eq!(
        main_address.address_view_pubkey,
        integrated_address.address_view_pubkey
    );
    assert!(!integrated_address.is_subaddress);
    assert_eq!(integrated_address.payment_id, payment_id);
    assert!(integrated_address.is_integrated());
    assert!(!main_address.is_integrated());
}

#[test]
fn generator_t_is_usable() {
    // T is torsion-free and independent of the basepoint
    assert!(carrot_core::generators::T.is_torsion_free());
    assert_ne!(
        *carrot_core::generators::T,
        curve25519_dalek::constants::ED25519_BASEPOINT_POINT
    );
}
