// =============================================================================
// Application Identity
// =============================================================================

/// Application name in lowercase (for paths and identifiers)
pub const APP_NAME_LOWER: &str = "querykit";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "querykit.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "QUERYKIT_CONFIG";

// =============================================================================
// Environment Variables - Logging
// =============================================================================

/// Environment variable for log filter (falls back to RUST_LOG)
pub const ENV_LOG: &str = "QUERYKIT_LOG";

// =============================================================================
// Environment Variables - Database
// =============================================================================

/// Environment variable for the database URL
pub const ENV_DATABASE_URL: &str = "QUERYKIT_DATABASE_URL";

/// Environment variable for the pool size
pub const ENV_DATABASE_MAX_CONNECTIONS: &str = "QUERYKIT_DATABASE_MAX_CONNECTIONS";

// =============================================================================
// Database Defaults
// =============================================================================

/// Default database URL
pub const DEFAULT_DATABASE_URL: &str = "sqlite://querykit.db";

/// Default maximum pool connections
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Default busy timeout in seconds
pub const DEFAULT_BUSY_TIMEOUT_SECS: u64 = 5;
