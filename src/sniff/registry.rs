//! Provider registry: a reverse index from mail-exchange hostname to the
//! identifier of the service provider known to operate it.
//!
//! The builtin table lists exact exchange hostnames per provider; the
//! registry inverts it once at construction and is immutable afterwards.

use std::collections::HashMap;
use std::sync::OnceLock;

use phf::phf_map;

/// Known providers and the exchanges they answer on. Exact hostnames only,
/// lowercase, no trailing dot. Maintainers keep hostnames unique across
/// providers; on a duplicate the last inverted entry wins.
static BUILTIN_PROVIDERS: phf::Map<&'static str, &'static [&'static str]> = phf_map! {
    "google-gmail" => &[
        "gmail-smtp-in.l.google.com",
        "alt1.gmail-smtp-in.l.google.com",
        "alt2.gmail-smtp-in.l.google.com",
        "alt3.gmail-smtp-in.l.google.com",
        "alt4.gmail-smtp-in.l.google.com",
    ],
    "google-apps" => &[
        "aspmx.l.google.com",
        "alt1.aspmx.l.google.com",
        "alt2.aspmx.l.google.com",
        "alt3.aspmx.l.google.com",
        "alt4.aspmx.l.google.com",
        "aspmx2.googlemail.com",
        "aspmx3.googlemail.com",
        "aspmx4.googlemail.com",
        "aspmx5.googlemail.com",
        "smtp.google.com",
    ],
    "microsoft-hotmail" => &[
        "mx1.hotmail.com",
        "mx2.hotmail.com",
        "mx3.hotmail.com",
        "mx4.hotmail.com",
    ],
    "yahoo-mail" => &[
        "mta5.am0.yahoodns.net",
        "mta6.am0.yahoodns.net",
        "mta7.am0.yahoodns.net",
    ],
    "apple-icloud" => &[
        "mx01.mail.icloud.com",
        "mx02.mail.icloud.com",
        "mx03.mail.icloud.com",
        "mx04.mail.icloud.com",
        "mx05.mail.icloud.com",
        "mx06.mail.icloud.com",
    ],
    "zoho" => &[
        "mx.zoho.com",
        "mx2.zoho.com",
        "mx3.zoho.com",
    ],
    "fastmail" => &[
        "in1-smtp.messagingengine.com",
        "in2-smtp.messagingengine.com",
    ],
    "protonmail" => &[
        "mail.protonmail.ch",
        "mailsec.protonmail.ch",
    ],
    "yandex-mail" => &[
        "mx.yandex.ru",
        "mx.yandex.net",
    ],
    "qq-mail" => &[
        "mx1.qq.com",
        "mx2.qq.com",
        "mx3.qq.com",
    ],
    "mail-ru" => &[
        "mxs.mail.ru",
        "emx.mail.ru",
    ],
    "netease-163" => &[
        "163mx00.mxmail.netease.com",
        "163mx01.mxmail.netease.com",
        "163mx02.mxmail.netease.com",
        "163mx03.mxmail.netease.com",
    ],
    "rackspace-email" => &[
        "mx1.emailsrvr.com",
        "mx2.emailsrvr.com",
    ],
    "godaddy-secureserver" => &[
        "smtp.secureserver.net",
        "mailstore1.secureserver.net",
    ],
    "ovh" => &[
        "mx1.ovh.net",
        "mx2.ovh.net",
        "mx3.ovh.net",
        "mxb.ovh.net",
    ],
    "gandi" => &[
        "spool.mail.gandi.net",
        "fb.mail.gandi.net",
    ],
    "ionos" => &[
        "mx00.kundenserver.de",
        "mx01.kundenserver.de",
        "mx00.ionos.de",
        "mx01.ionos.de",
    ],
    "mailgun" => &[
        "mxa.mailgun.org",
        "mxb.mailgun.org",
    ],
    "sendgrid" => &[
        "mx.sendgrid.net",
    ],
    "amazon-ses-inbound" => &[
        "inbound-smtp.us-east-1.amazonaws.com",
        "inbound-smtp.us-west-2.amazonaws.com",
        "inbound-smtp.eu-west-1.amazonaws.com",
    ],
    "mimecast" => &[
        "eu-smtp-inbound-1.mimecast.com",
        "eu-smtp-inbound-2.mimecast.com",
        "us-smtp-inbound-1.mimecast.com",
        "us-smtp-inbound-2.mimecast.com",
    ],
};

/// Reverse index `exchange hostname -> provider identifier`, built once and
/// read-only afterwards. Lookups expect hostnames already lowercased with no
/// trailing dot (the matcher normalizes resolved exchanges before querying).
#[derive(Debug, Clone)]
pub struct ProviderRegistry {
    index: HashMap<String, String>,
}

impl ProviderRegistry {
    /// Build a registry by inverting `provider -> hostnames` entries.
    /// Hostnames are lowercased and stripped of a trailing dot here so the
    /// source data may be loose about either.
    pub fn from_entries<P, H, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (P, H)>,
        P: AsRef<str>,
        H: IntoIterator,
        H::Item: AsRef<str>,
    {
        let mut index = HashMap::new();
        for (provider, hosts) in entries {
            let provider = provider.as_ref();
            for host in hosts {
                let host = host.as_ref().trim().trim_end_matches('.').to_ascii_lowercase();
                if host.is_empty() {
                    continue;
                }
                index.insert(host, provider.to_string());
            }
        }
        Self { index }
    }

    /// Parse a `{"provider": ["exchange", ...]}` JSON object.
    #[cfg(feature = "with-serde")]
    pub fn from_json_str(data: &str) -> Result<Self, serde_json::Error> {
        let table: std::collections::BTreeMap<String, Vec<String>> = serde_json::from_str(data)?;
        Ok(Self::from_entries(table))
    }

    pub fn provider_for(&self, exchange: &str) -> Option<&str> {
        self.index.get(exchange).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

/// Registry over the builtin provider table, constructed on first use and
/// shared for the life of the process.
pub fn builtin_registry() -> &'static ProviderRegistry {
    static REGISTRY: OnceLock<ProviderRegistry> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        ProviderRegistry::from_entries(
            BUILTIN_PROVIDERS
                .entries()
                .map(|(provider, hosts)| (*provider, hosts.iter().copied())),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_entries_lowercases_and_strips_trailing_dot() {
        let registry = ProviderRegistry::from_entries([("acme", ["MX1.Acme.EXAMPLE."])]);
        assert_eq!(registry.provider_for("mx1.acme.example"), Some("acme"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn duplicate_hostname_keeps_last_provider() {
        let registry = ProviderRegistry::from_entries([
            ("first", vec!["mx.shared.example"]),
            ("second", vec!["mx.shared.example"]),
        ]);
        assert_eq!(registry.provider_for("mx.shared.example"), Some("second"));
    }

    #[test]
    fn unknown_exchange_has_no_provider() {
        let registry = ProviderRegistry::from_entries([("acme", ["mx1.acme.example"])]);
        assert_eq!(registry.provider_for("mx9.other.example"), None);
    }

    #[test]
    fn builtin_covers_gmail_and_apps() {
        let registry = builtin_registry();
        assert!(!registry.is_empty());
        assert_eq!(
            registry.provider_for("gmail-smtp-in.l.google.com"),
            Some("google-gmail")
        );
        assert_eq!(registry.provider_for("aspmx.l.google.com"), Some("google-apps"));
    }

    #[cfg(feature = "with-serde")]
    #[test]
    fn json_registry_round_trips_into_index() {
        let registry = ProviderRegistry::from_json_str(
            r#"{"acme": ["MX1.acme.example.", "mx2.acme.example"]}"#,
        )
        .expect("valid registry JSON");
        assert_eq!(registry.provider_for("mx1.acme.example"), Some("acme"));
        assert_eq!(registry.provider_for("mx2.acme.example"), Some("acme"));
    }
}
