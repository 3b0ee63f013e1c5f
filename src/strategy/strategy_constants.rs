// --- EXPIRATION SELECTION ---
/// Days from today the selected option expiration should be closest to
pub const DEFAULT_HORIZON_DAYS: i64 = 365;
pub const MAX_HORIZON_DAYS: i64 = 3650; // listed expirations never reach ten years out

// --- SENTIMENT RATIO ---
/// Open interest at which a contract's ratio weight doubles
pub const OPEN_INTEREST_SCALE: f64 = 1_000_000.0;

// --- RANKING ---
/// Number of candidates kept after ranking by sentiment ratio
pub const TOP_N: usize = 10;
