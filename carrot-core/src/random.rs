use curve25519_dalek::{edwards::CompressedEdwardsY, EdwardsPoint, MontgomeryPoint, Scalar};

/// Uniform sampling from a caller-provided CSPRNG. The crate never owns an
/// RNG; randomness is always injected.
pub trait Random {
    type Params;
    fn new_random_with_params<R: rand_core::CryptoRngCore + ?Sized>(
        rng: &mut R,
        p: Self::Params,
    ) -> Self;
}

pub fn new_random<R, T>(rng: &mut R) -> T
where
    R: rand_core::CryptoRngCore + ?Sized,
    T: Random<Params = ()>,
{
    T::new_random_with_params(rng, ())
}

macro_rules! impl_random_uint {
    ($t:ident) => {
        impl Random for $t {
            type Params = ();
            fn new_random_with_params<R: rand_core::CryptoRngCore + ?Sized>(
                rng: &mut R,
                _: Self::Params,
            ) -> Self {
                const N_BYTES: usize = core::mem::size_of::<$t>();
                Self::from_le_bytes(<[u8; N_BYTES] as Random>::new_random_with_params(rng, ()))
            }
        }
    };
}

impl_random_uint! {u8}
impl_random_uint! {u16}
impl_random_uint! {u32}
impl_random_uint! {u64}

impl<const N: usize> Random for [u8; N] {
    type Params = ();
    fn new_random_with_params<R: rand_core::CryptoRngCore + ?Sized>(
        rng: &mut R,
        _: Self::Params,
    ) -> Self {
        let mut v = [0u8; N];
        rng.fill_bytes(&mut v);
        v
    }
}

impl Random for Scalar {
    type Params = ();
    fn new_random_with_params<R: rand_core::CryptoRngCore + ?Sized>(
        rng: &mut R,
        _: Self::Params,
    ) -> Self {
        let mut wide = [0u8; 64];
        rng.fill_bytes(&mut wide);
        Scalar::from_bytes_mod_order_wide(&wide)
    }
}

impl Random for EdwardsPoint {
    type Params = ();
    fn new_random_with_params<R: rand_core::CryptoRngCore + ?Sized>(
        rng: &mut R,
        _: Self::Params,
    ) -> Self {
        EdwardsPoint::mul_base(&Scalar::new_random_with_params(rng, ()))
    }
}

impl Random for CompressedEdwardsY {
    type Params = ();
    fn new_random_with_params<R: rand_core::CryptoRngCore + ?Sized>(
        rng: &mut R,
        _: Self::Params,
    ) -> Self {
        EdwardsPoint::new_random_with_params(rng, ()).compress()
    }
}

impl Random for MontgomeryPoint {
    type Params = ();
    fn new_random_with_params<R: rand_core::CryptoRngCore + ?Sized>(
        rng: &mut R,
        _: Self::Params,
    ) -> Self {
        EdwardsPoint::new_random_with_params(rng, ()).to_montgomery()
    }
}
