//! Process exit codes

/// Command completed
pub const EXIT_SUCCESS: i32 = 0;

/// The request was refused: not found, duplicate, occupied, not empty, ...
pub const EXIT_FAILURE: i32 = 1;

/// Something outside the request went wrong: I/O, corrupt files, configuration
pub const EXIT_ERROR: i32 = 2;
