//! Entry data models.

use super::errors::{EntryPoolError, EntryPoolResult};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;

/// Entry ID type
pub type EntryId = i64;

/// Club ID type
pub type ClubId = i64;

/// Which way a seed performance is measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeedKind {
    Time,
    Mark,
}

impl std::fmt::Display for SeedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeedKind::Time => write!(f, "time"),
            SeedKind::Mark => write!(f, "mark"),
        }
    }
}

/// Prior best performance used to rank entries before competition.
///
/// Times are better when lower, marks are better when higher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedPerformance {
    /// Time in milliseconds
    TimeMs(u64),
    /// Distance or height in centimetres
    MarkCm(u32),
}

impl SeedPerformance {
    pub fn kind(&self) -> SeedKind {
        match self {
            SeedPerformance::TimeMs(_) => SeedKind::Time,
            SeedPerformance::MarkCm(_) => SeedKind::Mark,
        }
    }

    /// Orders two seeds best-first: `Less` means `self` is the better seed.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SeedPerformance::TimeMs(a), SeedPerformance::TimeMs(b)) => a.cmp(b),
            (SeedPerformance::MarkCm(a), SeedPerformance::MarkCm(b)) => b.cmp(a),
            // A validated pool never mixes kinds; keep the order total anyway.
            (SeedPerformance::TimeMs(_), SeedPerformance::MarkCm(_)) => Ordering::Less,
            (SeedPerformance::MarkCm(_), SeedPerformance::TimeMs(_)) => Ordering::Greater,
        }
    }
}

impl std::fmt::Display for SeedPerformance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeedPerformance::TimeMs(ms) => write!(f, "{}.{:03}s", ms / 1000, ms % 1000),
            SeedPerformance::MarkCm(cm) => write!(f, "{}.{:02}m", cm / 100, cm % 100),
        }
    }
}

/// Orders optional seeds best-first, with unseeded entries after every seeded one.
pub fn compare_seeds(a: Option<&SeedPerformance>, b: Option<&SeedPerformance>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.compare(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Registration status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    #[default]
    Active,
    Withdrawn,
}

/// A single registration in an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Entry ID, unique within the event
    pub entry_id: EntryId,
    /// Bib number (display only)
    #[serde(default)]
    pub bib: Option<String>,
    /// Seed performance, if the athlete has one
    #[serde(default)]
    pub seed: Option<SeedPerformance>,
    /// Club the athlete represents
    #[serde(default)]
    pub club_id: Option<ClubId>,
    /// Registration status
    #[serde(default)]
    pub status: EntryStatus,
}

impl Entry {
    /// Create an active, unseeded entry without a club
    pub fn new(entry_id: EntryId) -> Self {
        Self {
            entry_id,
            bib: None,
            seed: None,
            club_id: None,
            status: EntryStatus::Active,
        }
    }

    pub fn with_seed(mut self, seed: SeedPerformance) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_club(mut self, club_id: ClubId) -> Self {
        self.club_id = Some(club_id);
        self
    }

    pub fn with_bib(mut self, bib: impl Into<String>) -> Self {
        self.bib = Some(bib.into());
        self
    }

    pub fn withdrawn(mut self) -> Self {
        self.status = EntryStatus::Withdrawn;
        self
    }

    pub fn is_active(&self) -> bool {
        self.status == EntryStatus::Active
    }
}

/// Validated set of entries for one event, in registration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Entry>", into = "Vec<Entry>")]
pub struct EntryPool {
    entries: Vec<Entry>,
}

impl EntryPool {
    /// Create a pool, rejecting duplicate ids and mixed seed kinds
    pub fn new(entries: Vec<Entry>) -> EntryPoolResult<Self> {
        let mut seen = HashSet::with_capacity(entries.len());
        let mut kind: Option<SeedKind> = None;

        for entry in &entries {
            if !seen.insert(entry.entry_id) {
                return Err(EntryPoolError::DuplicateEntry(entry.entry_id));
            }

            if let Some(seed) = &entry.seed {
                match kind {
                    None => kind = Some(seed.kind()),
                    Some(expected) if expected != seed.kind() => {
                        return Err(EntryPoolError::MixedSeedKinds {
                            entry_id: entry.entry_id,
                            expected: expected.to_string(),
                            found: seed.kind().to_string(),
                        });
                    }
                    Some(_) => {}
                }
            }
        }

        Ok(Self { entries })
    }

    /// All entries, withdrawn ones included
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Entries taking part in seeding and ranking
    pub fn active(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(|e| e.is_active())
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    pub fn get(&self, entry_id: EntryId) -> Option<&Entry> {
        self.entries.iter().find(|e| e.entry_id == entry_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TryFrom<Vec<Entry>> for EntryPool {
    type Error = EntryPoolError;

    fn try_from(entries: Vec<Entry>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<EntryPool> for Vec<Entry> {
    fn from(pool: EntryPool) -> Self {
        pool.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_seeds_lower_is_better() {
        let fast = SeedPerformance::TimeMs(10_100);
        let slow = SeedPerformance::TimeMs(10_900);
        assert_eq!(fast.compare(&slow), Ordering::Less);
        assert_eq!(slow.compare(&fast), Ordering::Greater);
    }

    #[test]
    fn test_mark_seeds_higher_is_better() {
        let long = SeedPerformance::MarkCm(780);
        let short = SeedPerformance::MarkCm(640);
        assert_eq!(long.compare(&short), Ordering::Less);
    }

    #[test]
    fn test_unseeded_sorts_last() {
        let seed = SeedPerformance::TimeMs(60_000);
        assert_eq!(compare_seeds(Some(&seed), None), Ordering::Less);
        assert_eq!(compare_seeds(None, Some(&seed)), Ordering::Greater);
        assert_eq!(compare_seeds(None, None), Ordering::Equal);
    }

    #[test]
    fn test_seed_display() {
        assert_eq!(SeedPerformance::TimeMs(10_050).to_string(), "10.050s");
        assert_eq!(SeedPerformance::MarkCm(812).to_string(), "8.12m");
    }

    #[test]
    fn test_pool_rejects_duplicate_ids() {
        let err = EntryPool::new(vec![Entry::new(1), Entry::new(2), Entry::new(1)]).unwrap_err();
        assert_eq!(err, EntryPoolError::DuplicateEntry(1));
    }

    #[test]
    fn test_pool_rejects_mixed_seed_kinds() {
        let err = EntryPool::new(vec![
            Entry::new(1).with_seed(SeedPerformance::TimeMs(12_000)),
            Entry::new(2),
            Entry::new(3).with_seed(SeedPerformance::MarkCm(500)),
        ])
        .unwrap_err();
        assert!(matches!(err, EntryPoolError::MixedSeedKinds { entry_id: 3, .. }));
    }

    #[test]
    fn test_active_skips_withdrawn() {
        let pool = EntryPool::new(vec![
            Entry::new(1),
            Entry::new(2).withdrawn(),
            Entry::new(3).with_club(7).with_bib("203"),
        ])
        .unwrap();

        let ids: Vec<EntryId> = pool.active().map(|e| e.entry_id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(pool.active_count(), 2);
        assert_eq!(pool.len(), 3);
        assert_eq!(pool.get(3).and_then(|e| e.bib.as_deref()), Some("203"));
    }

    #[test]
    fn test_pool_deserialize_validates() {
        let json = r#"[{"entry_id": 1}, {"entry_id": 1}]"#;
        let result: Result<EntryPool, _> = serde_json::from_str(json);
        assert!(result.is_err());

        let json = r#"[{"entry_id": 1, "seed": {"time_ms": 11000}, "club_id": 4}, {"entry_id": 2, "status": "withdrawn"}]"#;
        let pool: EntryPool = serde_json::from_str(json).unwrap();
        assert_eq!(pool.active_count(), 1);
        assert_eq!(pool.entries()[0].seed, Some(SeedPerformance::TimeMs(11_000)));
    }
}
