#![forbid(unsafe_code)]
//! mxsniff_lib — identify email service providers from MX records

pub mod extract;
pub mod sniff;

pub use extract::get_domain;
pub use sniff::{
    Error as SniffError, LookupMx, MxAnswer, MxRecord, ProviderRegistry, builtin_registry,
    mxsniff, sniff_domain, sniff_with,
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
