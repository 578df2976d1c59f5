//! Keyword lexicon: seed vocabularies, rule-override cue sets and the
//! cold-start substring heuristic.

use aho_corasick::{AhoCorasick, MatchKind};
use firlens_core::{Error, Result};
use std::collections::HashSet;

/// Seed keywords suggestive of a criminal incident
pub const SEED_FIR: &[&str] = &[
    "stolen", "robbery", "theft", "assault", "violence", "attack", "murder", "rape", "kidnap",
    "burglary", "snatch", "threat", "extortion", "arson", "hit", "kill", "weapon", "injury",
    "molest", "harass", "beat", "fight", "crime", "abuse", "illegal",
];

/// Seed keywords suggestive of an administrative or service request.
///
/// `"ID"` is kept uppercase: it never matches lowercased text.
pub const SEED_NON_FIR: &[&str] = &[
    "noc", "verification", "certificate", "passport", "address", "proof", "character", "police",
    "clearance", "document", "lost", "missing", "misplace", "found", "helpdesk", "service",
    "issue", "request", "application", "ID", "card", "wallet", "booking", "info", "support",
    "feedback",
];

/// Unambiguous violent-crime keywords
pub const STRONG_FIR: &[&str] = &[
    "stolen", "robbery", "assault", "murder", "rape", "kidnap", "burglary", "snatch",
    "extortion", "weapon", "violence", "attack",
];

/// Administrative-request cue words
pub const NON_FIR_CUES: &[&str] = &[
    "lost", "missing", "misplace", "noc", "verification", "certificate", "passport", "address",
    "proof", "clearance", "document", "found", "service", "issue", "request", "application",
    "support", "feedback",
];

/// Rule flags computed over a token set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RuleFlags {
    /// A token is an unambiguous violent-crime keyword
    pub has_strong_fir: bool,
    /// A token is an administrative-request cue
    pub has_non_fir_cue: bool,
}

impl RuleFlags {
    /// Administrative cue present with no violent-crime keyword
    pub fn is_override(&self) -> bool {
        !self.has_strong_fir && self.has_non_fir_cue
    }
}

/// Keyword hits counted by the cold-start heuristic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedHits {
    /// Distinct incident seed keywords found
    pub fir: usize,
    /// Distinct administrative seed keywords found
    pub non_fir: usize,
}

/// Compiled keyword sets
pub struct Lexicon {
    strong_fir: HashSet<&'static str>,
    non_fir_cues: HashSet<&'static str>,
    seed_fir: AhoCorasick,
    seed_non_fir: AhoCorasick,
}

impl Lexicon {
    /// Build the matchers for the built-in keyword lists
    pub fn new() -> Result<Self> {
        let seed_fir = build_matcher(SEED_FIR, "incident")?;
        let seed_non_fir = build_matcher(SEED_NON_FIR, "administrative")?;

        Ok(Self {
            strong_fir: STRONG_FIR.iter().copied().collect(),
            non_fir_cues: NON_FIR_CUES.iter().copied().collect(),
            seed_fir,
            seed_non_fir,
        })
    }

    /// Compute rule flags by exact token membership
    pub fn flags<S: AsRef<str>>(&self, tokens: &[S]) -> RuleFlags {
        let mut flags = RuleFlags::default();
        for token in tokens {
            let token = token.as_ref();
            flags.has_strong_fir |= self.strong_fir.contains(token);
            flags.has_non_fir_cue |= self.non_fir_cues.contains(token);
        }
        flags
    }

    /// Count distinct seed keywords occurring as substrings of `joined`
    pub fn seed_hits(&self, joined: &str) -> SeedHits {
        SeedHits {
            fir: distinct_matches(&self.seed_fir, joined),
            non_fir: distinct_matches(&self.seed_non_fir, joined),
        }
    }
}

fn build_matcher(patterns: &[&str], kind: &str) -> Result<AhoCorasick> {
    AhoCorasick::builder()
        .match_kind(MatchKind::Standard)
        .build(patterns)
        .map_err(|e| Error::classifier(format!("Failed to build {kind} keyword matcher: {e}")))
}

fn distinct_matches(matcher: &AhoCorasick, haystack: &str) -> usize {
    let mut seen = vec![false; matcher.patterns_len()];
    for m in matcher.find_overlapping_iter(haystack) {
        seen[m.pattern().as_usize()] = true;
    }
    seen.into_iter().filter(|hit| *hit).count()
}
