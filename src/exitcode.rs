/// Standard Unix exit codes for the oriby CLI application.
///
/// These codes follow the BSD convention where possible and provide
/// meaningful feedback about the type of error that occurred.
///
/// Successful termination
pub const SUCCESS: i32 = 0;

/// Command line usage error - invalid arguments, unknown ids, rejected edits
pub const USAGE: i32 = 64;

/// Input data was malformed - unreadable import document or corrupt store contents
pub const DATAERR: i32 = 65;

/// The server bookmark document could not be retrieved
pub const UNAVAILABLE: i32 = 69;

/// Store could not be opened or written
pub const IOERR: i32 = 74;
