use url::{Host, Url};

const DEFAULT_SCHEME_PREFIX: &str = "https://";
const RECOGNIZED_PREFIXES: &[&str] = &["http://", "https://"];
const WWW_PREFIX: &str = "www.";

fn has_scheme_prefix(input: &str) -> bool {
    RECOGNIZED_PREFIXES.iter().any(|prefix| {
        input
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    })
}

/// At least two labels and none of them empty, e.g. `nike.com`.
fn is_qualified_domain(host: &str) -> bool {
    let mut labels = 0;
    for label in host.split('.') {
        if label.is_empty() {
            return false;
        }
        labels += 1;
    }
    labels >= 2
}

fn strip_www(host: &str) -> &str {
    let mut current = host;
    while let Some(rest) = current.strip_prefix(WWW_PREFIX) {
        if !is_qualified_domain(rest) {
            break;
        }
        current = rest;
    }
    current
}

/// Canonical domain of a scanned payload, or `None` when the payload is not a
/// usable URL.
///
/// Payloads without an `http://`/`https://` prefix are parsed as `https://`.
/// The host is lowercased by the URL parser and loses its leading `www.`.
pub fn extract_domain(payload: &str) -> Option<String> {
    let payload = payload.trim();
    if payload.is_empty() {
        return None;
    }

    let candidate = if has_scheme_prefix(payload) {
        payload.to_string()
    } else {
        format!("{}{}", DEFAULT_SCHEME_PREFIX, payload)
    };

    let parsed = match Url::parse(&candidate) {
        Ok(url) => url,
        Err(e) => {
            tracing::debug!("Payload is not a parseable URL ({}): {:?}", e, payload);
            return None;
        }
    };

    match parsed.host()? {
        Host::Domain(domain) => {
            if !is_qualified_domain(domain) {
                tracing::debug!("Host '{}' is not a qualified domain", domain);
                return None;
            }
            Some(strip_www(domain).to_string())
        }
        Host::Ipv4(addr) => Some(addr.to_string()),
        Host::Ipv6(addr) => Some(format!("[{}]", addr)),
    }
}
