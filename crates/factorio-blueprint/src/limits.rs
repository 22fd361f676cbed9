//! Format constants and decoding limits.

/// Version tag the game writes in front of every blueprint string (`'0'`).
pub const DEFAULT_VERSION_BYTE: u8 = b'0';

/// Default cap on the inflated JSON size of a single blueprint string (256 MiB).
///
/// Large books of megabase blueprints stay well below this; the cap exists so
/// a small adversarial string cannot inflate without bound.
pub const MAX_JSON_LEN: u64 = 256 * 1024 * 1024;

/// Item name of a blueprint record.
pub const BLUEPRINT_ITEM: &str = "blueprint";

/// Item name of a blueprint book record.
pub const BLUEPRINT_BOOK_ITEM: &str = "blueprint-book";

/// Number of icon slots a blueprint or book can show.
pub const MAX_ICONS: u8 = 4;
