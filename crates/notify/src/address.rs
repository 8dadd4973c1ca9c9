use regex::Regex;
use std::sync::LazyLock;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Minimal `local@domain.tld` check, no whitespace anywhere
pub fn is_email(candidate: &str) -> bool {
    EMAIL.is_match(candidate)
}

/// Every address that fails [`is_email`], in input order
pub fn invalid_addresses<'a>(addresses: &'a [String]) -> Vec<&'a str> {
    addresses
        .iter()
        .map(String::as_str)
        .filter(|a| !is_email(a))
        .collect()
}

/// Domain part of an address or `Name <address>` mailbox
pub fn domain_of(mailbox: &str) -> Option<&str> {
    let (_, domain) = mailbox.rsplit_once('@')?;
    let domain = domain.trim().trim_end_matches('>').trim();
    (!domain.is_empty()).then_some(domain)
}
