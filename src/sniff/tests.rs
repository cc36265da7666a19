use trust_dns_resolver::error::{ResolveError, ResolveErrorKind};

use super::{Error, MxAnswer, MxRecord, ProviderRegistry, builtin_registry, resolver};

type LookupResult = Result<MxAnswer, ResolveError>;
type LookupFn = dyn Fn(&str) -> LookupResult;

pub(crate) struct StubResolver {
    pub on_lookup: Box<LookupFn>,
}

impl StubResolver {
    fn new<F>(f: F) -> Self
    where
        F: Fn(&str) -> LookupResult + 'static,
    {
        Self {
            on_lookup: Box::new(f),
        }
    }
}

fn records(entries: &[(u16, &str)]) -> MxAnswer {
    MxAnswer::Records(
        entries
            .iter()
            .map(|(preference, exchange)| MxRecord::new(*preference, *exchange))
            .collect(),
    )
}

#[test]
fn normalize_domain_rejects_empty() {
    let err = resolver::normalize_domain("  ").expect_err("empty domain should fail");
    assert!(matches!(err, Error::EmptyDomain));
}

#[test]
fn normalize_exchange_trims_dot_and_lowercases() {
    let out = resolver::normalize_exchange("Mail.EXAMPLE.com.");
    assert_eq!(out, "mail.example.com");
}

#[test]
fn sniff_with_lists_single_provider_once() {
    let stub = StubResolver::new(|domain| {
        assert_eq!(domain, "gmail.com");
        Ok(records(&[
            (5, "gmail-smtp-in.l.google.com"),
            (10, "alt1.gmail-smtp-in.l.google.com"),
            (20, "alt2.gmail-smtp-in.l.google.com"),
        ]))
    });

    let providers = resolver::sniff_with(&stub, builtin_registry(), "gmail.com")
        .expect("lookup succeeds");
    assert_eq!(providers, vec!["google-gmail".to_string()]);
}

#[test]
fn sniff_with_orders_providers_by_preference() {
    // migration scenario: the lower-preference host is the live provider
    let stub = StubResolver::new(|_| {
        Ok(records(&[
            (20, "aspmx.l.google.com"),
            (10, "mx.zoho.com"),
        ]))
    });

    let providers = resolver::sniff_with(&stub, builtin_registry(), "example.com")
        .expect("lookup succeeds");
    assert_eq!(providers, vec!["zoho".to_string(), "google-apps".to_string()]);
}

#[test]
fn sniff_with_keeps_resolver_order_on_preference_ties() {
    let stub = StubResolver::new(|_| {
        Ok(records(&[
            (10, "aspmx.l.google.com"),
            (10, "mx.zoho.com"),
        ]))
    });

    let providers = resolver::sniff_with(&stub, builtin_registry(), "example.com")
        .expect("lookup succeeds");
    assert_eq!(providers, vec!["google-apps".to_string(), "zoho".to_string()]);
}

#[test]
fn sniff_with_skips_unknown_exchanges() {
    let stub = StubResolver::new(|_| {
        Ok(records(&[
            (10, "mx1.selfhosted.example"),
            (20, "mx2.selfhosted.example"),
        ]))
    });

    let providers = resolver::sniff_with(&stub, builtin_registry(), "selfhosted.example")
        .expect("lookup succeeds");
    assert!(providers.is_empty());
}

#[test]
fn sniff_with_normalizes_resolved_exchanges() {
    let stub = StubResolver::new(|_| Ok(records(&[(10, "ASPMX.L.Google.COM.")])));

    let providers = resolver::sniff_with(&stub, builtin_registry(), "example.com")
        .expect("lookup succeeds");
    assert_eq!(providers, vec!["google-apps".to_string()]);
}

#[test]
fn sniff_with_treats_no_records_as_empty() {
    let stub = StubResolver::new(|_| Ok(MxAnswer::NoRecords));

    let providers = resolver::sniff_with(&stub, builtin_registry(), "example.com")
        .expect("no records is not an error");
    assert!(providers.is_empty());
}

#[test]
fn sniff_with_surfaces_lookup_failures() {
    let stub = StubResolver::new(|_| Err(ResolveError::from(ResolveErrorKind::Timeout)));

    let err = resolver::sniff_with(&stub, builtin_registry(), "example.com")
        .expect_err("timeout should surface");
    match err {
        Error::Lookup { class, .. } => assert_eq!(class, "timeout"),
        other => panic!("expected Lookup error, got {other:?}"),
    }
}

#[test]
fn lookup_failure_display_carries_classification() {
    let stub = StubResolver::new(|_| Err(ResolveError::from(ResolveErrorKind::Timeout)));

    let err = resolver::sniff_with(&stub, builtin_registry(), "example.com")
        .expect_err("timeout should surface");
    let message = err.to_string();
    assert!(message.contains("MX lookup failed"), "{message}");
    assert!(message.contains("timeout"), "{message}");
}

#[test]
fn sniff_with_honors_caller_registry() {
    let registry = ProviderRegistry::from_entries([("acme", ["mx.acme.example"])]);
    let stub = StubResolver::new(|_| Ok(records(&[(10, "mx.acme.example")])));

    let providers =
        resolver::sniff_with(&stub, &registry, "acme.example").expect("lookup succeeds");
    assert_eq!(providers, vec!["acme".to_string()]);
}
