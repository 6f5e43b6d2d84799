//! Typeahead ranking over venue names, plus a per-client request limiter.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::envelope::VenueSummary;

/// How a suggestion matched the query. Variants are ordered best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    NamePrefix,
    NameSubstring,
    Location,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub id: String,
    pub name: String,
    pub kind: MatchKind,
}

/// Rank venues against a typeahead query.
///
/// Matching is case-insensitive. Name prefixes rank above name substrings,
/// which rank above city/country substrings. Within a kind, shorter names
/// come first, then alphabetical. A blank query yields nothing.
pub fn rank_suggestions(query: &str, venues: &[VenueSummary], limit: usize) -> Vec<Suggestion> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() || limit == 0 {
        return Vec::new();
    }

    let mut ranked: Vec<Suggestion> = venues
        .iter()
        .filter_map(|v| {
            match_kind(&needle, v).map(|kind| Suggestion {
                id: v.id.clone(),
                name: v.name.clone(),
                kind,
            })
        })
        .collect();

    ranked.sort_by(|a, b| {
        a.kind
            .cmp(&b.kind)
            .then_with(|| a.name.chars().count().cmp(&b.name.chars().count()))
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
    ranked.truncate(limit);
    ranked
}

fn match_kind(needle: &str, venue: &VenueSummary) -> Option<MatchKind> {
    let name = venue.name.to_lowercase();
    if name.starts_with(needle) {
        return Some(MatchKind::NamePrefix);
    }
    if name.contains(needle) {
        return Some(MatchKind::NameSubstring);
    }
    let location = venue.location.as_ref()?;
    [&location.city, &location.country]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(needle))
        .then_some(MatchKind::Location)
}

/// Returned when a client is over its budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryAfter(pub Duration);

/// Fixed-window request limiter keyed by client.
///
/// Time is passed in by the caller so behaviour is deterministic. Expired
/// clients are only dropped by [`prune`](Self::prune); long-lived callers
/// should prune before each [`check`](Self::check) to keep memory bounded.
#[derive(Debug)]
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    clients: HashMap<String, (Instant, u32)>,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            clients: HashMap::new(),
        }
    }

    /// Record a request from `key` at `now`.
    ///
    /// # Errors
    /// Returns [`RetryAfter`] with the time left in the current window when the
    /// client has already used `max_requests` in it.
    pub fn check(&mut self, key: &str, now: Instant) -> Result<(), RetryAfter> {
        let entry = self.clients.entry(key.to_string()).or_insert((now, 0));

        if now.duration_since(entry.0) >= self.window {
            *entry = (now, 0);
        }

        if entry.1 >= self.max_requests {
            let elapsed = now.duration_since(entry.0);
            return Err(RetryAfter(self.window.saturating_sub(elapsed)));
        }

        entry.1 += 1;
        Ok(())
    }

    /// Drop clients whose window closed before `now`.
    pub fn prune(&mut self, now: Instant) {
        let window = self.window;
        self.clients
            .retain(|_, (start, _)| now.duration_since(*start) < window);
    }

    /// Number of clients with an entry, expired or not.
    pub fn tracked_clients(&self) -> usize {
        self.clients.len()
    }
}
