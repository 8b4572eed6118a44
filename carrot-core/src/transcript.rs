use curve25519_dalek::{edwards::CompressedEdwardsY, EdwardsPoint, MontgomeryPoint, Scalar};
use std::io::Write;

/// Serialization into hash transcripts: integers little-endian, points and
/// scalars as their 32-byte encodings.
pub trait Transcriptable {
    fn write_transcript_bytes<W: Write>(&self, writer: W) -> std::io::Result<usize>;
}

macro_rules! impl_transcript_uint {
    ($t:ident) => {
        impl Transcriptable for $t {
            fn write_transcript_bytes<W: Write>(&self, mut writer: W) -> std::io::Result<usize> {
                writer.write(&self.to_le_bytes())
            }
        }
    };
}

impl_transcript_uint! {u8}
impl_transcript_uint! {u16}
impl_transcript_uint! {u32}
impl_transcript_uint! {u64}

impl<const N: usize> Transcriptable for [u8; N] {
    fn write_transcript_bytes<W: Write>(&self, mut writer: W) -> std::io::Result<usize> {
        writer.write(self)
    }
}

impl Transcriptable for &str {
    fn write_transcript_bytes<W: Write>(&self, mut writer: W) -> std::io::Result<usize> {
        writer.write(self.as_bytes())
    }
}

impl Transcriptable for Scalar {
    fn write_transcript_bytes<W: Write>(&self, mut writer: W) -> std::io::Result<usize> {
        writer.write(&self.to_bytes())
    }
}

impl Transcriptable for CompressedEdwardsY {
    fn write_transcript_bytes<W: Write>(&self, mut writer: W) -> std::io::Result<usize> {
        writer.write(&self.0)
    }
}

impl Transcriptable for EdwardsPoint {
    fn write_transcript_bytes<W: Write>(&self, writer: W) -> std::io::Result<usize> {
        self.compress().write_transcript_bytes(writer)
    }
}

impl Transcriptable for MontgomeryPoint {
    fn write_transcript_bytes<W: Write>(&self, writer: W) -> std::io::Result<usize> {
        self.to_bytes().write_transcript_bytes(writer)
    }
}

/// Builds `len(label) || label || args...` in a buffer that wipes itself,
/// since transcripts routinely carry secret key material.
macro_rules! make_carrot_transcript {
    ( $domain_sep:expr $(, $t:ty : $es:expr)* $(,)? ) => {
        {
            debug_assert!($domain_sep.len() < 256);
            debug_assert!($domain_sep.is_ascii());
            let mut transcript_ = zeroize::Zeroizing::new(vec![($domain_sep.len() as u8)]);
            let _ = $crate::transcript::Transcriptable::write_transcript_bytes(
                &$domain_sep, &mut *transcript_);
            $(
                let _ = <$t as $crate::transcript::Transcriptable>::write_transcript_bytes(
                    $es, &mut *transcript_);
            )*
            transcript_
        }
    };
}

pub(crate) use make_carrot_transcript;
