//! Incoming link extraction
//!
//! Turns a raw URL string into a typed navigation intent, tolerating the
//! shapes the OS funnels through the link channel:
//! - custom scheme: usersmgmt://user/<id>
//! - universal link: https://usersmanagement.app/user/<id> (any subdomain)
//! - query form: any URL carrying userId=<id>
//!
//! Path matches (digits only) win over the query form. Anything else yields
//! no intent; the platform routes plenty of non-app URLs through the same
//! channel, so unrecognized input is not an error.

use chrono::{DateTime, Utc};
use regex::Regex;
use url::Url;

/// A parsed deep-link target. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkIntent {
    pub target_user_id: String,
    pub raw_url: String,
    pub observed_at: DateTime<Utc>,
}

impl LinkIntent {
    fn new(target_user_id: String, raw_url: &str) -> Self {
        Self {
            target_user_id,
            raw_url: raw_url.to_string(),
            observed_at: Utc::now(),
        }
    }
}

/// Extract a navigation intent from a raw URL, if it matches a known shape.
///
/// Pure parse: no side effects, never panics, malformed input simply fails
/// to match.
pub fn extract(raw_url: &str) -> Option<LinkIntent> {
    let id = match Url::parse(raw_url) {
        Ok(url) => id_from_url(&url),
        // Not something the URL parser accepts (relative path, bare junk).
        // The shapes are still recognizable textually, so fall back to a
        // pattern scan before giving up.
        Err(_) => id_from_raw(raw_url),
    }?;
    Some(LinkIntent::new(id, raw_url))
}

fn id_from_url(url: &Url) -> Option<String> {
    // The custom scheme puts "user" in the host position
    // (usersmgmt://user/5 parses as host "user", path "/5"), so the host
    // participates in the segment scan.
    let mut segments: Vec<&str> = Vec::new();
    if let Some(host) = url.host_str() {
        segments.push(host);
    }
    if let Some(path) = url.path_segments() {
        segments.extend(path);
    }

    for pair in segments.windows(2) {
        if pair[0] == "user" && is_digits(pair[1]) {
            return Some(pair[1].to_string());
        }
    }

    // Query form: userId=<value>, any non-empty value
    url.query_pairs()
        .find(|(key, value)| key == "userId" && !value.is_empty())
        .map(|(_, value)| value.into_owned())
}

fn id_from_raw(raw: &str) -> Option<String> {
    let path_re = Regex::new(r"(?:^|[/:])user/([0-9]+)").ok()?;
    if let Some(caps) = path_re.captures(raw) {
        return Some(caps[1].to_string());
    }

    let query_re = Regex::new(r"[?&]userId=([^&#\s]+)").ok()?;
    query_re.captures(raw).map(|caps| caps[1].to_string())
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
