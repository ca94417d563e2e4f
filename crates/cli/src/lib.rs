//! Snow plow tracker command line.
//!
//! - [`args`] - argument definitions
//! - [`commands`] - one handler per subcommand
//! - [`default_address`] - fallback address for `check`
//! - [`format`] - console rendering
//! - [`settings`] - endpoints and timeouts

pub mod args;
pub mod commands;
pub mod default_address;
pub mod error;
pub mod format;
pub mod settings;
