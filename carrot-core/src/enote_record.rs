use crate::core_types::*;
use crate::enote::{CarrotCoinbaseEnoteV1, CarrotEnoteV1};

////
// CarrotIntermediateEnoteRecordV1
// - a non-coinbase enote recognized by scanning, with everything recovered
//   short of the subaddress index lookup
///
#[derive(Clone, Debug)]
pub struct CarrotIntermediateEnoteRecordV1 {
    /// original enote
    pub enote: CarrotEnoteV1,
    /// k^o_g
    pub sender_extension_g: OnetimeExtensionG,
    /// k^o_t
    pub sender_extension_t: OnetimeExtensionT,
    /// K^j_s
    pub address_spend_pubkey: AddressSpendPubkey,
    /// a
    pub amount: Amount,
    /// k_a
    pub amount_blinding_factor: AmountBlindingKey,
    /// pid
    pub payment_id: PaymentId,
    /// enote_type
    pub enote_type: CarrotEnoteType,
    /// true when recognized with the view-balance secret
    pub is_internal: bool,
}

////
// CarrotCoinbaseIntermediateEnoteRecordV1
// - a coinbase enote recognized by scanning; the amount is cleartext and
//   the recovered address is always the main address
///
#[derive(Clone, Debug)]
pub struct CarrotCoinbaseIntermediateEnoteRecordV1 {
    /// original enote
    pub enote: CarrotCoinbaseEnoteV1,
    /// k^o_g
    pub sender_extension_g: OnetimeExtensionG,
    /// k^o_t
    pub sender_extension_t: OnetimeExtensionT,
    /// K^j_s
    pub address_spend_pubkey: AddressSpendPubkey,
}

/// Sum over the record shapes scanning can produce.
#[derive(Clone, Debug)]
pub enum IntermediateEnoteRecordVariant {
    Normal(CarrotIntermediateEnoteRecordV1),
    Coinbase(CarrotCoinbaseIntermediateEnoteRecordV1),
}

impl IntermediateEnoteRecordVariant {
    pub fn amount(&self) -> Amount {
        match self {
            Self::Normal(record) => record.amount,
            Self::Coinbase(record) => record.enote.amount,
        }
    }

    pub fn onetime_address(&self) -> &OutputPubkey {
        match self {
            Self::Normal(record) => &record.enote.onetime_address,
            Self::Coinbase(record) => &record.enote.onetime_address,
        }
    }

    pub fn sender_extensions(&self) -> (&OnetimeExtensionG, &OnetimeExtensionT) {
        match self {
            Self::Normal(record) => (&record.sender_extension_g, &record.sender_extension_t),
            Self::Coinbase(record) => (&record.sender_extension_g, &record.sender_extension_t),
        }
    }

    pub fn address_spend_pubkey(&self) -> &AddressSpendPubkey {
        match self {
            Self::Normal(record) => &record.address_spend_pubkey,
            Self::Coinbase(record) => &record.address_spend_pubkey,
        }
    }
}

impl From<CarrotIntermediateEnoteRecordV1> for IntermediateEnoteRecordVariant {
    fn from(record: CarrotIntermediateEnoteRecordV1) -> Self {
        Self::Normal(record)
    }
}

impl From<CarrotCoinbaseIntermediateEnoteRecordV1> for IntermediateEnoteRecordVariant {
    fn from(record: CarrotCoinbaseIntermediateEnoteRecordV1) -> Self {
        Self::Coinbase(record)
    }
}
