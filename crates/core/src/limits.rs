//! Listing and reporting limits.

/// Page size when a listing request gives no `limit`.
pub const DEFAULT_LIST_LIMIT: u64 = 50;

/// Largest page any listing returns.
pub const MAX_LIST_LIMIT: u64 = 1000;

/// Items shown in each "recent" list of the admin dashboard.
pub const RECENT_ITEMS: u64 = 5;
