//! Default size limits for untrusted input

/// Maximum length for a JWT token string (64KB)
pub const MAX_TOKEN_LENGTH: usize = 64 * 1024;

/// Maximum size for decoded JWT header JSON (8KB)
/// Headers are typically small (< 1KB), but we allow reasonable margin
pub const MAX_DECODED_HEADER_SIZE: usize = 8 * 1024;

/// Maximum size for decoded JWT payload JSON (64KB)
pub const MAX_DECODED_PAYLOAD_SIZE: usize = 64 * 1024;
