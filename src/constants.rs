// Remote venue
pub const DEFAULT_CLOB_HOST: &str = "https://clob.polymarket.com";
pub const BUILDER_TRADES_PATH: &str = "/builder/trades";
pub const DEFAULT_CLOB_TIMEOUT_SECS: u64 = 30;

/// Cursor value the venue returns once the last page has been served.
pub const END_CURSOR: &str = "LTE=";

// Pagination guard, not a business limit
pub const DEFAULT_MAX_PAGES: usize = 1000;
pub const DEFAULT_PAGE_TIMEOUT_SECS: u64 = 45;

// Window sizes
pub const DEFAULT_WINDOW_HOURS: i64 = 24;
pub const MAX_WINDOW_HOURS: i64 = 24 * 365 * 10;
pub const DEFAULT_EXTRA_WINDOWS: &str = "7d=168";
pub const PRIMARY_WINDOW_NAME: &str = "window";

// Field aliases, checked in order. Names drifted between API revisions.
pub const SIZE_FIELDS: [&str; 3] = ["sizeUsdc", "size_usdc", "size"];
pub const TX_HASH_FIELDS: [&str; 2] = ["transactionHash", "transaction_hash"];
pub const OWNER_FIELDS: [&str; 1] = ["owner"];
pub const MATCH_TIME_FIELDS: [&str; 2] = ["matchTime", "match_time"];

// Page envelope keys
pub const RECORD_LIST_KEYS: [&str; 2] = ["trades", "data"];
pub const CURSOR_KEYS: [&str; 2] = ["next_cursor", "nextCursor"];

// Builder auth headers
pub const HEADER_BUILDER_API_KEY: &str = "POLY_BUILDER_API_KEY";
pub const HEADER_BUILDER_PASSPHRASE: &str = "POLY_BUILDER_PASSPHRASE";
pub const HEADER_BUILDER_SIGNATURE: &str = "POLY_BUILDER_SIGNATURE";
pub const HEADER_BUILDER_TIMESTAMP: &str = "POLY_BUILDER_TIMESTAMP";
