use std::time::Duration;

/// Number of leading lines inspected for script detection and header labels
pub const HEADER_LOOKAHEAD: usize = 10;

/// Lines scanned after a header when the grammar searches forward for the name
pub const NAME_LOOKAHEAD: usize = 4;

/// Section boundaries written by the game client (short and long dash runs)
pub const SEPARATORS: [&str; 2] = ["---", "--------"];

/// Name the client emits when it has nothing better; never a real item
pub const PLACEHOLDER_NAME: &str = "Unknown Item";

/// How long a fetched price history stays fresh in the cache
pub const HISTORY_FRESHNESS: Duration = Duration::from_secs(5 * 60);

/// League used when the caller does not pick one
pub const DEFAULT_LEAGUE: &str = "Standard";

/// Number of price log entries requested per history fetch
pub const DEFAULT_LOG_COUNT: u32 = 4;

/// Currency prices are quoted in
pub const DEFAULT_REFERENCE_CURRENCY: &str = "exalted";

/// Progress update interval (tick every N files)
pub const PROGRESS_INTERVAL: u64 = 64;
