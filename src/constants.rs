// ===== REGISTRATION LIMITS =====
pub const MIN_PLAYERS: u32 = 2;
pub const MAX_PLAYERS: u32 = 256;

// ===== TIMING LIMITS (seconds) =====
pub const MAX_START_DELAY: u32 = 60 * 60 * 24 * 7; // one week
pub const MAX_START_TIME_IN_FUTURE: i64 = 60 * 60 * 24 * 30; // one month
