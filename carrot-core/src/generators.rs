use curve25519_dalek::EdwardsPoint;
use std::sync::LazyLock;

use crate::domain_separators;
use crate::hash_functions::keccak256;

pub use monero_generators::H;

/// T = 8 Hp(Keccak256("Monero Generator T"))
///
/// Nothing-up-my-sleeve generator with unknown discrete log against G and H,
/// used for the second component of account spend keys and one-time address
/// extensions.
pub static T: LazyLock<EdwardsPoint> = LazyLock::new(|| {
    monero_generators::hash_to_point(keccak256(domain_separators::GENERATOR_T.as_bytes()))
        .mul_by_cofactor()
});

#[cfg(test)]
mod test {
    use super::*;
    use curve25519_dalek::constants::ED25519_BASEPOINT_POINT;
    use curve25519_dalek::traits::Identity;

    #[test]
    fn generator_t_reproduction() {
        let recomputed = monero_generators::hash_to_point(keccak256(
            domain_separators::GENERATOR_T.as_bytes(),
        ))
        .mul_by_cofactor();
        assert_eq!(*T, recomputed);
    }

    #[test]
    fn generator_t_properties() {
        assert!(T.is_torsion_free());
        assert_ne!(*T, EdwardsPoint::identity());
        assert_ne!(*T, ED25519_BASEPOINT_POINT);
        assert_ne!(*T, *H);
    }
}
