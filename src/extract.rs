//! Domain extraction from free-form input.
//!
//! [`get_domain`] accepts an email address, a URL or a bare domain and
//! returns the domain part as-is. Extraction is best-effort and never fails;
//! case folding and trailing-dot stripping happen at match time, not here.

use mailparse::{MailAddr, addrparse};
use url::Url;

/// Extract the domain name from an email address, URL or (raw) domain name.
///
/// - `example@example.com` -> `example.com`
/// - `Jane Doe <jane@example.com>` -> `example.com`
/// - `http://www.example.com:8080/x` -> `www.example.com`
/// - `example.com` -> `example.com`
pub fn get_domain(input: &str) -> String {
    if input.contains('@') {
        // Appears to be an email address.
        match parsed_address(input) {
            Some(addr) => after_last_at(&addr),
            None => after_last_at(input),
        }
    } else if input.contains("//") {
        host_from_url(input)
    } else {
        input.to_string()
    }
}

/// Permissive header-style parsing, accepts display names and bare addresses.
fn parsed_address(input: &str) -> Option<String> {
    let parsed = addrparse(input).ok()?;
    parsed.iter().find_map(|addr| match addr {
        MailAddr::Single(info) => Some(info.addr.clone()),
        MailAddr::Group(group) => group.addrs.first().map(|info| info.addr.clone()),
    })
}

fn after_last_at(input: &str) -> String {
    input.rsplit('@').next().unwrap_or_default().to_string()
}

fn host_from_url(input: &str) -> String {
    if let Ok(url) = Url::parse(input) {
        if let Some(host) = url.host_str() {
            return host.to_string();
        }
    }
    // Not absolute-URL shaped; degrade to the netloc-ish slice by hand.
    let after = input.split_once("//").map_or(input, |(_, rest)| rest);
    let netloc = after.split(['/', '?', '#']).next().unwrap_or_default();
    netloc.split(':').next().unwrap_or_default().to_string()
}
