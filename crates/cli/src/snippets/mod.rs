//! Contains `include_str!` of all the help files
//! These can then be used easily for help functions

pub const HELP_GENERAL: &str = include_str!("h01_general.help");
pub const HELP_TOPICS: &str = include_str!("h02_topics.help");

pub const HELP_SYMBOLS: &str = include_str!("h03_symbols.help");
pub const HELP_SAMPLES: &str = include_str!("h04_samples.help");
pub const HELP_RENDERING: &str = include_str!("h05_rendering.help");
pub const HELP_FUNCTIONS: &str = include_str!("h06_functions.help");
pub const HELP_ERRORS: &str = include_str!("h07_errors.help");
