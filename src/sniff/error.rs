use thiserror::Error;
use trust_dns_resolver::error::{ResolveError, ResolveErrorKind};

#[derive(Debug, Error)]
pub enum SniffError {
    #[error("domain is empty")]
    EmptyDomain,
    #[error("domain IDNA conversion failed")]
    IdnaConversion {
        #[source]
        source: idna::Errors,
    },
    #[error("resolver initialization failed: {source}")]
    ResolverInit {
        #[source]
        source: std::io::Error,
    },
    #[error("MX lookup failed ({class}): {source}")]
    Lookup {
        /// Coarse classification of the underlying DNS failure.
        class: &'static str,
        #[source]
        source: ResolveError,
    },
}

impl SniffError {
    pub(crate) fn idna(source: idna::Errors) -> Self {
        Self::IdnaConversion { source }
    }

    pub(crate) fn resolver_init(source: std::io::Error) -> Self {
        Self::ResolverInit { source }
    }

    pub(crate) fn lookup(source: ResolveError) -> Self {
        Self::Lookup {
            class: classify(&source),
            source,
        }
    }
}

fn classify(err: &ResolveError) -> &'static str {
    match err.kind() {
        ResolveErrorKind::Timeout => "timeout",
        ResolveErrorKind::Io(_) => "io",
        ResolveErrorKind::Proto(_) => "protocol",
        ResolveErrorKind::NoConnections => "no-connections",
        ResolveErrorKind::Message(_) | ResolveErrorKind::Msg(_) => "message",
        ResolveErrorKind::NoRecordsFound { .. } => "no-records",
        _ => "unknown",
    }
}
