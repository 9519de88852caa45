//! Salt freshness.
//!
//! The server hands out salts together with the period they are valid for
//! (`future_salt valid_since:int valid_until:int salt:long`). A
//! [`SaltWindow`] remembers them so incoming envelopes carrying a stale or
//! unknown salt can be rejected.

/// One server-issued salt and its validity period, in unix seconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FutureSalt {
    /// First second the salt may be used.
    pub valid_since: i32,
    /// Last second the salt may be used.
    pub valid_until: i32,
    /// The salt value.
    pub salt: i64,
}

impl FutureSalt {
    fn accepts(&self, now: i32, grace: i32) -> bool {
        self.valid_since <= now && now <= self.valid_until.saturating_add(grace)
    }
}

/// The set of salts currently accepted, ordered by `valid_since`.
#[derive(Clone, Debug, Default)]
pub struct SaltWindow {
    salts: Vec<FutureSalt>,
    grace: i32,
}

impl SaltWindow {
    /// An empty window with no grace period. Accepts nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty window that keeps accepting a salt for `secs` seconds past
    /// its `valid_until`, to absorb clock skew between the peers.
    pub fn with_grace(secs: i32) -> Self {
        Self { salts: Vec::new(), grace: secs.max(0) }
    }

    /// Grace period in seconds.
    pub fn grace(&self) -> i32 {
        self.grace
    }

    /// Remember `salt`. A salt value already present is replaced.
    pub fn insert(&mut self, salt: FutureSalt) {
        self.salts.retain(|s| s.salt != salt.salt);
        let at = self.salts.partition_point(|s| s.valid_since <= salt.valid_since);
        self.salts.insert(at, salt);
    }

    /// Whether `salt` may be used at unix time `now`.
    pub fn is_valid(&self, salt: i64, now: i32) -> bool {
        self.salts.iter().any(|s| s.salt == salt && s.accepts(now, self.grace))
    }

    /// The most recently started salt valid at `now`, for outgoing messages.
    pub fn current(&self, now: i32) -> Option<i64> {
        self.salts.iter().rev().find(|s| s.accepts(now, self.grace)).map(|s| s.salt)
    }

    /// Forget salts that can no longer become valid. Returns how many were dropped.
    pub fn prune(&mut self, now: i32) -> usize {
        let before = self.salts.len();
        let grace = self.grace;
        self.salts.retain(|s| now <= s.valid_until.saturating_add(grace));
        before - self.salts.len()
    }

    /// Number of salts held.
    pub fn len(&self) -> usize {
        self.salts.len()
    }

    /// True if no salt is held.
    pub fn is_empty(&self) -> bool {
        self.salts.is_empty()
    }
}

impl Extend<FutureSalt> for SaltWindow {
    fn extend<T: IntoIterator<Item = FutureSalt>>(&mut self, iter: T) {
        for salt in iter {
            self.insert(salt);
        }
    }
}

impl FromIterator<FutureSalt> for SaltWindow {
    fn from_iter<T: IntoIterator<Item = FutureSalt>>(iter: T) -> Self {
        let mut window = Self::new();
        window.extend(iter);
        window
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn salt(valid_since: i32, valid_until: i32, salt: i64) -> FutureSalt {
        FutureSalt { valid_since, valid_until, salt }
    }

    #[test]
    fn empty_window_accepts_nothing() {
        let w = SaltWindow::new();
        assert!(w.is_empty());
        assert!(!w.is_valid(0, 0));
        assert_eq!(w.current(0), None);
    }

    #[test]
    fn validity_is_inclusive() {
        let w: SaltWindow = [salt(100, 200, 7)].into_iter().collect();
        assert!(!w.is_valid(7, 99));
        assert!(w.is_valid(7, 100));
        assert!(w.is_valid(7, 200));
        assert!(!w.is_valid(7, 201));
        assert!(!w.is_valid(8, 150));
    }

    #[test]
    fn grace_extends_the_end_only() {
        let mut w = SaltWindow::with_grace(30);
        w.insert(salt(100, 200, 7));
        assert!(w.is_valid(7, 230));
        assert!(!w.is_valid(7, 231));
        assert!(!w.is_valid(7, 99));
        assert_eq!(SaltWindow::with_grace(-5).grace(), 0);
    }

    #[test]
    fn current_prefers_latest_started() {
        let w: SaltWindow = [salt(0, 3600, 1), salt(1800, 5400, 2), salt(3600, 7200, 3)]
            .into_iter()
            .collect();
        assert_eq!(w.current(100), Some(1));
        assert_eq!(w.current(2000), Some(2));
        assert_eq!(w.current(3600), Some(3));
        assert_eq!(w.current(8000), None);
    }

    #[test]
    fn reinserting_a_salt_replaces_it() {
        let mut w = SaltWindow::new();
        w.insert(salt(0, 10, 5));
        w.insert(salt(20, 30, 5));
        assert_eq!(w.len(), 1);
        assert!(!w.is_valid(5, 5));
        assert!(w.is_valid(5, 25));
    }

    #[test]
    fn prune_drops_expired() {
        let mut w: SaltWindow = [salt(0, 10, 1), salt(0, 20, 2), salt(30, 40, 3)].into_iter().collect();
        assert_eq!(w.prune(15), 1);
        assert_eq!(w.len(), 2);
        assert!(w.is_valid(2, 15));
    }
}
