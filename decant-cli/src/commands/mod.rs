// decant-cli/src/commands/mod.rs

pub mod check;
pub mod convert;
