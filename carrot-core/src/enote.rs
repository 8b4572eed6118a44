use crate::consts::*;
use crate::core_types::*;

////
// CarrotEnoteV1
// - onetime address, amount commitment, encrypted amount, encrypted janus
//   anchor, view tag, ephemeral pubkey, tx first key image
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CarrotEnoteV1 {
    /// K_o
    pub onetime_address: OutputPubkey,
    /// C_a
    pub amount_commitment: AmountCommitment,
    /// a_enc
    pub amount_enc: EncryptedAmount,
    /// anchor_enc
    pub anchor_enc: EncryptedJanusAnchor,
    /// view_tag
    pub view_tag: ViewTag,
    /// D_e
    pub enote_ephemeral_pubkey: EnoteEphemeralPubkey,
    /// KI_1
    pub tx_first_key_image: KeyImage,
}

////
// CarrotCoinbaseEnoteV1
// - onetime address, cleartext amount, encrypted janus anchor, view tag,
//   ephemeral pubkey, block index
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CarrotCoinbaseEnoteV1 {
    /// K_o
    pub onetime_address: OutputPubkey,
    /// a
    pub amount: Amount,
    /// anchor_enc
    pub anchor_enc: EncryptedJanusAnchor,
    /// view_tag
    pub view_tag: ViewTag,
    /// D_e
    pub enote_ephemeral_pubkey: EnoteEphemeralPubkey,
    /// block_index
    pub block_index: BlockIndex,
}

fn take<const N: usize>(bytes: &[u8], cursor: &mut usize) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes[*cursor..*cursor + N]);
    *cursor += N;
    out
}

fn put(bytes: &mut [u8], cursor: &mut usize, field: &[u8]) {
    bytes[*cursor..*cursor + field.len()].copy_from_slice(field);
    *cursor += field.len();
}

impl CarrotEnoteV1 {
    /// K_o || C_a || a_enc || anchor_enc || vt || D_e || KI_1
    pub fn to_bytes(&self) -> [u8; CARROT_ENOTE_V1_BYTES] {
        let mut out = [0u8; CARROT_ENOTE_V1_BYTES];
        let mut cursor = 0;
        put(&mut out, &mut cursor, self.onetime_address.as_bytes());
        put(&mut out, &mut cursor, self.amount_commitment.as_bytes());
        put(&mut out, &mut cursor, self.amount_enc.as_bytes());
        put(&mut out, &mut cursor, self.anchor_enc.as_bytes());
        put(&mut out, &mut cursor, self.view_tag.as_bytes());
        put(&mut out, &mut cursor, self.enote_ephemeral_pubkey.as_bytes());
        put(&mut out, &mut cursor, self.tx_first_key_image.as_bytes());
        debug_assert_eq!(cursor, CARROT_ENOTE_V1_BYTES);
        out
    }

    pub fn from_bytes(bytes: &[u8; CARROT_ENOTE_V1_BYTES]) -> Self {
        let mut cursor = 0;
        let enote = Self {
            onetime_address: OutputPubkey::from_bytes(take(bytes, &mut cursor)),
            amount_commitment: AmountCommitment::from_bytes(take(bytes, &mut cursor)),
            amount_enc: EncryptedAmount::from(take(bytes, &mut cursor)),
            anchor_enc: EncryptedJanusAnchor::from(take(bytes, &mut cursor)),
            view_tag: ViewTag::from(take(bytes, &mut cursor)),
            enote_ephemeral_pubkey: EnoteEphemeralPubkey::from_bytes(take(bytes, &mut cursor)),
            tx_first_key_image: KeyImage::from(take(bytes, &mut cursor)),
        };
        debug_assert_eq!(cursor, CARROT_ENOTE_V1_BYTES);
        enote
    }
}

impl CarrotCoinbaseEnoteV1 {
    /// K_o || a || anchor_enc || vt || D_e || block_index
    pub fn to_bytes(&self) -> [u8; CARROT_COINBASE_ENOTE_V1_BYTES] {
        let mut out = [0u8; CARROT_COINBASE_ENOTE_V1_BYTES];
        let mut cursor = 0;
        put(&mut out, &mut cursor, self.onetime_address.as_bytes());
        put(&mut out, &mut cursor, &self.amount.to_le_bytes());
        put(&mut out, &mut cursor, self.anchor_enc.as_bytes());
        put(&mut out, &mut cursor, self.view_tag.as_bytes());
        put(&mut out, &mut cursor, self.enote_ephemeral_pubkey.as_bytes());
        put(&mut out, &mut cursor, &self.block_index.to_le_bytes());
        debug_assert_eq!(cursor, CARROT_COINBASE_ENOTE_V1_BYTES);
        out
    }

    pub fn from_bytes(bytes: &[u8; CARROT_COINBASE_ENOTE_V1_BYTES]) -> Self {
        let mut cursor = 0;
        let enote = Self {
            onetime_address: OutputPubkey::from_bytes(take(bytes, &mut cursor)),
            amount: Amount::from_le_bytes(take(bytes, &mut cursor)),
            anchor_enc: EncryptedJanusAnchor::from(take(bytes, &mut cursor)),
            view_tag: ViewTag::from(take(bytes, &mut cursor)),
            enote_ephemeral_pubkey: EnoteEphemeralPubkey::from_bytes(take(bytes, &mut cursor)),
            block_index: BlockIndex::from_le_bytes(take(bytes, &mut cursor)),
        };
        debug_assert_eq!(cursor, CARROT_COINBASE_ENOTE_V1_BYTES);
        enote
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::random::new_random;
    use rand_core::OsRng;

    fn gen_enote() -> CarrotEnoteV1 {
        CarrotEnoteV1 {
            onetime_address: new_random(&mut OsRng),
            amount_commitment: new_random(&mut OsRng),
            amount_enc: new_random(&mut OsRng),
            anchor_enc: new_random(&mut OsRng),
            view_tag: new_random(&mut OsRng),
            enote_ephemeral_pubkey: new_random(&mut OsRng),
            tx_first_key_image: new_random(&mut OsRng),
        }
    }

    fn gen_coinbase_enote() -> CarrotCoinbaseEnoteV1 {
        CarrotCoinbaseEnoteV1 {
            onetime_address: new_random(&mut OsRng),
            amount: new_random(&mut OsRng),
            anchor_enc: new_random(&mut OsRng),
            view_tag: new_random(&mut OsRng),
            enote_ephemeral_pubkey: new_random(&mut OsRng),
            block_index: new_random(&mut OsRng),
        }
    }

    #[test]
    fn enote_wire_round_trip() {
        let enote = gen_enote();
        assert_eq!(enote, CarrotEnoteV1::from_bytes(&enote.to_bytes()));
    }

    #[test]
    fn coinbase_enote_wire_round_trip() {
        let enote = gen_coinbase_enote();
        assert_eq!(
            enote,
            CarrotCoinbaseEnoteV1::from_bytes(&enote.to_bytes())
        );
    }

    #[test]
    fn enote_wire_field_offsets() {
        let enote = gen_enote();
        let bytes = enote.to_bytes();
        assert_eq!(&bytes[0..32], enote.onetime_address.as_bytes());
        assert_eq!(&bytes[32..64], enote.amount_commitment.as_bytes());
        assert_eq!(&bytes[64..72], enote.amount_enc.as_bytes());
        assert_eq!(&bytes[72..88], enote.anchor_enc.as_bytes());
        assert_eq!(&bytes[88..91], enote.view_tag.as_bytes());
        assert_eq!(&bytes[91..123], enote.enote_ephemeral_pubkey.as_bytes());
        assert_eq!(&bytes[123..155], enote.tx_first_key_image.as_bytes());
    }

    #[test]
    fn coinbase_enote_wire_field_offsets() {
        let enote = gen_coinbase_enote();
        let bytes = enote.to_bytes();
        assert_eq!(&bytes[0..32], enote.onetime_address.as_bytes());
        assert_eq!(bytes[32..40], enote.amount.to_le_bytes());
        assert_eq!(&bytes[40..56], enote.anchor_enc.as_bytes());
        assert_eq!(&bytes[56..59], enote.view_tag.as_bytes());
        assert_eq!(&bytes[59..91], enote.enote_ephemeral_pubkey.as_bytes());
        assert_eq!(bytes[91..99], enote.block_index.to_le_bytes());
    }
}
