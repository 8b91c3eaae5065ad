pub mod config;
pub mod error;
pub mod flags;
pub mod highlight;
pub mod shell;

pub mod core;
pub mod input;
pub mod path;
pub mod process;

#[cfg(test)]
pub(crate) mod test_support;
