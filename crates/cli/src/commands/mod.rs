//! Command handlers, one module per subcommand.

pub mod check;
pub mod convert;
pub mod env_names;
pub mod get;
pub mod set;
pub mod show;
