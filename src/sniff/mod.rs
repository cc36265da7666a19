//! MX resolution and provider matching.
//!
//! The public entry point is [`mxsniff`], which extracts a domain from a
//! free-form input, resolves its MX records with the system resolver and
//! matches the exchanges against the builtin provider registry. The pieces
//! compose individually: [`sniff_with`] takes any [`LookupMx`] capability and
//! any [`ProviderRegistry`], which keeps the matching logic testable without
//! touching the network.

mod error;
mod registry;
mod resolver;
mod types;

pub use error::SniffError as Error;
pub use registry::{ProviderRegistry, builtin_registry};
pub use resolver::{LookupMx, mxsniff, sniff_domain, sniff_with};
pub use types::{MxAnswer, MxRecord};

#[cfg(test)]
mod tests;
