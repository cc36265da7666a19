use trust_dns_resolver::{
    Resolver,
    error::{ResolveError, ResolveErrorKind},
};

use super::{Error, MxAnswer, MxRecord, ProviderRegistry, registry};
use crate::extract::get_domain;

/// Lookup the email service providers behind `input` (an email address, URL
/// or domain), using the system resolver and the builtin provider registry.
///
/// Returns the identified provider ids ordered by MX preference, deduplicated;
/// an empty list means the domain resolved to no known provider (or had no MX
/// records at all).
pub fn mxsniff(input: &str) -> Result<Vec<String>, Error> {
    sniff_domain(&get_domain(input), registry::builtin_registry())
}

/// Resolve `domain`'s MX records with the system resolver and match them
/// against `registry`.
///
/// The domain is normalized via IDNA before querying DNS.
pub fn sniff_domain(domain: &str, registry: &ProviderRegistry) -> Result<Vec<String>, Error> {
    let ascii = normalize_domain(domain)?;
    let resolver = Resolver::from_system_conf().map_err(Error::resolver_init)?;
    sniff_with(&resolver, registry, &ascii)
}

/// Core matching walk over an injected resolution capability.
///
/// Records are sorted by ascending preference (stable on ties) so that the
/// most authoritative exchange decides which provider is listed first; a
/// provider with several matching exchanges appears once.
pub fn sniff_with<R>(
    resolver: &R,
    registry: &ProviderRegistry,
    ascii_domain: &str,
) -> Result<Vec<String>, Error>
where
    R: LookupMx,
{
    let mut records = match resolver.lookup_mx(ascii_domain).map_err(Error::lookup)? {
        MxAnswer::Records(records) => records,
        MxAnswer::NoRecords => return Ok(Vec::new()),
    };

    records.sort_by_key(|record| record.preference);

    #[cfg(feature = "with-tracing")]
    tracing::debug!(domain = ascii_domain, records = records.len(), "resolved MX records");

    let mut providers: Vec<String> = Vec::new();
    for record in &records {
        let exchange = normalize_exchange(&record.exchange);
        if let Some(provider) = registry.provider_for(&exchange) {
            if !providers.iter().any(|known| known == provider) {
                providers.push(provider.to_string());
            }
        }
    }

    #[cfg(feature = "with-tracing")]
    tracing::debug!(domain = ascii_domain, matched = providers.len(), "provider match complete");

    Ok(providers)
}

pub(crate) fn normalize_domain(domain: &str) -> Result<String, Error> {
    let trimmed = domain.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptyDomain);
    }
    idna::domain_to_ascii(trimmed).map_err(Error::idna)
}

pub(crate) fn normalize_exchange(exchange: &str) -> String {
    exchange.trim_end_matches('.').to_ascii_lowercase()
}

/// MX resolution capability. Implementations return the record set, a
/// `NoRecords` signal when the domain is absent or mail-less, or the
/// DNS-layer error.
pub trait LookupMx {
    fn lookup_mx(&self, domain: &str) -> Result<MxAnswer, ResolveError>;
}

impl LookupMx for Resolver {
    fn lookup_mx(&self, domain: &str) -> Result<MxAnswer, ResolveError> {
        let lookup = match Resolver::mx_lookup(self, domain) {
            Ok(lookup) => lookup,
            Err(err) if is_no_records(&err) => return Ok(MxAnswer::NoRecords),
            Err(err) => return Err(err),
        };
        let records: Vec<MxRecord> = lookup
            .iter()
            .map(|mx| MxRecord::new(mx.preference(), mx.exchange().to_utf8()))
            .collect();
        if records.is_empty() {
            Ok(MxAnswer::NoRecords)
        } else {
            Ok(MxAnswer::Records(records))
        }
    }
}

// NXDOMAIN and empty answers both surface as NoRecordsFound.
fn is_no_records(err: &ResolveError) -> bool {
    matches!(err.kind(), ResolveErrorKind::NoRecordsFound { .. })
}

#[cfg(test)]
impl LookupMx for crate::sniff::tests::StubResolver {
    fn lookup_mx(&self, domain: &str) -> Result<MxAnswer, ResolveError> {
        (self.on_lookup)(domain)
    }
}
