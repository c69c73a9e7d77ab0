//! Profile lookup by training id, name or phone number.
//!
//! The scan is linear and first-match-in-order: profiles are visited in
//! collection order and, within one profile, the rules are tried as
//! id -> name -> phone. The first profile satisfying any rule wins; there is
//! no ranking.

use std::fmt;
use tracing::debug;

use crate::domain::fields::is_phone_header;
use crate::domain::TraineeProfile;
use crate::error::{RegistryError, Result};
use crate::observability::metrics;

/// The rule that selected a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    /// Query equals the training id.
    Id,
    /// Query is a substring of the name (case-sensitive).
    Name,
    /// Query is a substring of a value stored under a phone-like header.
    Phone,
}

impl MatchRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchRule::Id => "id",
            MatchRule::Name => "name",
            MatchRule::Phone => "phone",
        }
    }
}

impl fmt::Display for MatchRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileMatch<'a> {
    pub profile: &'a TraineeProfile,
    pub rule: MatchRule,
}

fn match_rule(profile: &TraineeProfile, term: &str) -> Option<MatchRule> {
    if profile.id == term {
        return Some(MatchRule::Id);
    }
    if profile.name.contains(term) {
        return Some(MatchRule::Name);
    }
    let phone_hit = profile.details.iter().any(|(key, value)| {
        is_phone_header(key) && value.as_trimmed_string().contains(term)
    });
    phone_hit.then_some(MatchRule::Phone)
}

/// Find the first profile matching `query`.
///
/// The query is trimmed the same way stored names and ids are. An empty
/// query is rejected with [`RegistryError::InvalidQuery`]; no match is
/// `Ok(None)`.
pub fn find_profile<'a>(profiles: &'a [TraineeProfile], query: &str) -> Result<Option<ProfileMatch<'a>>> {
    let term = query.trim();
    if term.is_empty() {
        metrics::search::invalid_query();
        return Err(RegistryError::InvalidQuery);
    }

    let found = profiles.iter().find_map(|profile| {
        match_rule(profile, term).map(|rule| ProfileMatch { profile, rule })
    });

    match &found {
        Some(hit) => {
            debug!(id = %hit.profile.id, rule = %hit.rule, "Search matched");
            metrics::search::matched(hit.rule.as_str());
        }
        None => {
            debug!(scanned = profiles.len(), "Search found no profile");
            metrics::search::no_match();
        }
    }

    Ok(found)
}
