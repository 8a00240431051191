/// Maximum number of photos attached to one shipment
pub const MAX_PHOTOS: usize = 4;

/// Minimum package description length, in characters
pub const MIN_DESCRIPTION_CHARS: usize = 10;

/// Fixed description used for air freight shipments (not user-editable)
pub const AIRFREIGHT_DESCRIPTION: &str = "Air freight parcel";

/// Number of calendar days scanned for pickup dates, today included
pub const PICKUP_WINDOW_DAYS: usize = 14;

/// Maximum number of pickup dates offered
pub const MAX_PICKUP_CANDIDATES: usize = 4;

/// Local hour every confirmed pickup is normalised to
pub const PICKUP_HOUR: u32 = 10;

/// Default Shipment Service base URL
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Default HTTP timeout in seconds
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 30;
