//! Core of the Carrot addressing protocol: a one-time-address construction
//! over Ed25519 with an auxiliary generator T, plus the matching scanning
//! procedure, output-set finalization policy, and spend-authority proof.

pub mod account;
pub mod address_utils;
mod consts;
mod core_types;
pub mod destination;
pub mod device;
mod domain_separators;
pub mod enote;
pub mod enote_record;
pub mod enote_utils;
pub mod generators;
mod hash_functions;
pub mod int_util;
mod math_utils;
pub mod output_set_finalization;
pub mod payment_proposal;
pub mod random;
pub mod return_address;
pub mod scan;
pub mod spend_proof;
mod transcript;

pub use consts::*;
pub use core_types::*;
pub use destination::CarrotDestinationV1;
pub use enote::{CarrotCoinbaseEnoteV1, CarrotEnoteV1};
pub use enote_record::{
    CarrotCoinbaseIntermediateEnoteRecordV1, CarrotIntermediateEnoteRecordV1,
    IntermediateEnoteRecordVariant,
};
