use curve25519_dalek::{edwards::CompressedEdwardsY, EdwardsPoint, Scalar};

pub fn scalar_mul_gt(x: &Scalar, y: &Scalar) -> CompressedEdwardsY {
    (EdwardsPoint::mul_base(x) + y * *carrot_core::generators::T).compress()
}
