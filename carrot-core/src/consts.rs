pub const JANUS_ANCHOR_BYTES: usize = 16;
pub const ENCRYPTED_AMOUNT_BYTES: usize = 8;
pub const PAYMENT_ID_BYTES: usize = 8;
pub const VIEW_TAG_BYTES: usize = 3;
pub const KEY_IMAGE_BYTES: usize = 32;
pub const INPUT_CONTEXT_BYTES: usize = 1 + 32;

pub const CARROT_MIN_TX_OUTPUTS: usize = 2;
pub const CARROT_MAX_TX_OUTPUTS: usize = 16;

/// K_o || C_a || a_enc || anchor_enc || vt || D_e || KI_1
pub const CARROT_ENOTE_V1_BYTES: usize =
    32 + 32 + ENCRYPTED_AMOUNT_BYTES + JANUS_ANCHOR_BYTES + VIEW_TAG_BYTES + 32 + KEY_IMAGE_BYTES;

/// K_o || a || anchor_enc || vt || D_e || block_index
pub const CARROT_COINBASE_ENOTE_V1_BYTES: usize =
    32 + 8 + JANUS_ANCHOR_BYTES + VIEW_TAG_BYTES + 32 + 8;
