use carrot_core::random::{new_random, Random};
use carrot_core::*;

use crate::common::{MAX_SUBADDRESS_MAJOR_INDEX, MAX_SUBADDRESS_MINOR_INDEX};

pub fn gen_random<R>() -> R
where
    R: Random<Params = ()>,
{
    new_random(&mut rand_core::OsRng)
}

pub fn gen_subaddress_index_major() -> u32 {
    1 + gen_random::<u32>() % (MAX_SUBADDRESS_MAJOR_INDEX - 1)
}

pub fn gen_subaddress_index_minor() -> u32 {
    1 + gen_random::<u32>() % (MAX_SUBADDRESS_MINOR_INDEX - 1)
}

pub fn gen_non_null_payment_id() -> PaymentId {
    loop {
        let res = gen_random();
        if res != NULL_PAYMENT_ID {
            return res;
        }
    }
}

pub fn gen_non_null_janus_anchor() -> JanusAnchor {
    loop {
        let res = gen_random();
        if res != NULL_JANUS_ANCHOR {
            return res;
        }
    }
}

pub fn gen_block_index() -> BlockIndex {
    1 + gen_random::<BlockIndex>() % 5_000_000
}
