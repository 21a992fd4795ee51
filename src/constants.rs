// Constants module - centralized default values and wire tokens
//
// Keeping the wire tokens here means the serializer and the parser can
// never disagree on them.

// =============================================================================
// Proxy defaults
// =============================================================================

/// Default origin of the image-transformation proxy
pub const DEFAULT_BASE_URL: &str = "https://api.phake.app/image";

/// Default config file looked up by the CLI
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

// =============================================================================
// Wire format
// =============================================================================

/// Options segment used when no option is present
pub const DEFAULT_SEGMENT: &str = "default";

/// Separator between option fragments in the options segment
pub const OPTION_SEPARATOR: &str = ":";

/// Separator between width and height inside `size(...)`
pub const SIZE_SEPARATOR: &str = ",";

// =============================================================================
// Option limits
// =============================================================================

/// Highest accepted quality percentage
pub const MAX_QUALITY: u8 = 100;

// =============================================================================
// Logging defaults
// =============================================================================

/// Filter directive used when RUST_LOG is not set
pub const DEFAULT_LOG_LEVEL: &str = "info";
