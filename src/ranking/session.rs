//! Comparison session ("battle") - binary insertion driven by user decisions
//!
//! A session narrows a half-open index range `[low, high)` over the ranked
//! list. Each decision compares the candidate against the item at
//! `mid = floor((low + high) / 2)` and halves the range. When the range
//! collapses (`low >= high`) the candidate's insertion index is `low`.
//!
//! The phase is a plain value updated by pure transition functions, so a
//! session can be stored, cloned or serialized by whatever layer drives it.

use serde::{Deserialize, Serialize};

use crate::core::types::Candidate;
use crate::ranking::list::RankedList;
use crate::ranking::tier::Tier;

/// The outcome of one comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Choice {
    /// The candidate ranks above the item at `mid`
    Candidate,
    /// The item at `mid` ranks above the candidate
    Opponent,
}

/// Bounds before a decision, kept for undo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub low: usize,
    pub high: usize,
    pub mid: usize,
}

/// Lifecycle of a comparison session
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BattlePhase {
    #[default]
    NotStarted,
    Active {
        low: usize,
        high: usize,
        history: Vec<Snapshot>,
    },
    /// Terminal. Holders discard the session on reaching it.
    Resolved { index: usize },
}

/// Midpoint with floor division: even ranges round toward `low`
pub fn midpoint(low: usize, high: usize) -> usize {
    (low + high) / 2
}

impl BattlePhase {
    /// Enter the session over a list of `list_len` items
    ///
    /// An empty list has nothing to compare against and resolves at 0.
    pub fn begin(list_len: usize) -> Self {
        if list_len == 0 {
            BattlePhase::Resolved { index: 0 }
        } else {
            BattlePhase::Active {
                low: 0,
                high: list_len,
                history: Vec::new(),
            }
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, BattlePhase::Active { .. })
    }

    /// Current `(low, high)` while active
    pub fn bounds(&self) -> Option<(usize, usize)> {
        match self {
            BattlePhase::Active { low, high, .. } => Some((*low, *high)),
            _ => None,
        }
    }

    /// Index currently being compared against, always derived from the bounds
    pub fn mid(&self) -> Option<usize> {
        self.bounds().map(|(low, high)| midpoint(low, high))
    }

    pub fn resolved_index(&self) -> Option<usize> {
        match self {
            BattlePhase::Resolved { index } => Some(*index),
            _ => None,
        }
    }

    /// Number of decisions currently on the undo stack
    pub fn decisions(&self) -> usize {
        match self {
            BattlePhase::Active { history, .. } => history.len(),
            _ => 0,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.decisions() > 0
    }

    /// Apply one comparison decision. Ignored unless active.
    pub fn decide(self, choice: Choice) -> Self {
        let (low, high, mut history) = match self {
            BattlePhase::Active { low, high, history } => (low, high, history),
            other => return other,
        };

        let mid = midpoint(low, high);
        history.push(Snapshot { low, high, mid });

        let (low, high) = match choice {
            Choice::Candidate => (low, mid),
            Choice::Opponent => (mid + 1, high),
        };

        if low >= high {
            BattlePhase::Resolved { index: low }
        } else {
            BattlePhase::Active { low, high, history }
        }
    }

    /// Revert exactly one decision. Ignored when inactive or history is empty.
    pub fn undo(self) -> Self {
        match self {
            BattlePhase::Active {
                low,
                high,
                mut history,
            } => match history.pop() {
                Some(snapshot) => BattlePhase::Active {
                    low: snapshot.low,
                    high: snapshot.high,
                    history,
                },
                None => BattlePhase::Active { low, high, history },
            },
            other => other,
        }
    }

    /// Resolve at the current midpoint, however wide the range still is
    pub fn skip(self) -> Self {
        match self {
            BattlePhase::Active { low, high, .. } => BattlePhase::Resolved {
                index: midpoint(low, high),
            },
            other => other,
        }
    }
}

/// What a caller sees after driving the session one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Still comparing; `opponent` is the list index to show next
    Pending { opponent: usize },
    /// Range collapsed; insert the candidate at `index`
    Resolved { index: usize },
    /// The operation did not apply in the current phase
    Ignored,
}

/// Result of trying to open a session
#[derive(Debug, Clone, PartialEq)]
pub enum SessionStart {
    /// The list was empty; no comparison is possible
    Immediate { index: usize },
    /// The candidate's id is already ranked; nothing was created
    Duplicate,
    Started(BattleSession),
}

/// One candidate being placed against a ranked list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleSession {
    candidate: Candidate,
    tier: Tier,
    list_len: usize,
    phase: BattlePhase,
}

impl BattleSession {
    /// Open a session for `candidate` against `list`
    pub fn start(candidate: Candidate, tier: Tier, list: &RankedList) -> SessionStart {
        if list.contains(candidate.id) {
            tracing::debug!(id = %candidate.id, "candidate already ranked");
            return SessionStart::Duplicate;
        }

        match BattlePhase::begin(list.len()) {
            BattlePhase::Resolved { index } => SessionStart::Immediate { index },
            phase => SessionStart::Started(Self {
                candidate,
                tier,
                list_len: list.len(),
                phase,
            }),
        }
    }

    pub fn candidate(&self) -> &Candidate {
        &self.candidate
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn phase(&self) -> &BattlePhase {
        &self.phase
    }

    pub fn list_len(&self) -> usize {
        self.list_len
    }

    pub fn is_active(&self) -> bool {
        self.phase.is_active()
    }

    pub fn can_undo(&self) -> bool {
        self.phase.can_undo()
    }

    /// List index of the item to compare against, if there is one
    pub fn current_opponent_index(&self) -> Option<usize> {
        self.phase.mid().filter(|&mid| mid < self.list_len)
    }

    pub fn pick_candidate_superior(&mut self) -> Progress {
        self.apply(|phase| phase.decide(Choice::Candidate))
    }

    pub fn pick_opponent_superior(&mut self) -> Progress {
        self.apply(|phase| phase.decide(Choice::Opponent))
    }

    pub fn pick(&mut self, choice: Choice) -> Progress {
        self.apply(|phase| phase.decide(choice))
    }

    pub fn undo(&mut self) -> Progress {
        if !self.can_undo() {
            return Progress::Ignored;
        }
        self.apply(BattlePhase::undo)
    }

    pub fn skip(&mut self) -> Progress {
        self.apply(BattlePhase::skip)
    }

    pub fn into_candidate(self) -> Candidate {
        self.candidate
    }

    fn apply(&mut self, transition: impl FnOnce(BattlePhase) -> BattlePhase) -> Progress {
        if !self.phase.is_active() {
            return Progress::Ignored;
        }

        self.phase = transition(std::mem::take(&mut self.phase));

        match &self.phase {
            BattlePhase::Resolved { index } => Progress::Resolved { index: *index },
            phase => match phase.mid() {
                Some(opponent) => Progress::Pending { opponent },
                None => Progress::Ignored,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::RankedItem;

    fn list_of(n: u64) -> RankedList {
        let mut list = RankedList::new();
        for i in 0..n {
            list.push(RankedItem::new(i + 1, format!("Movie {}", i + 1), Tier::Mid, 6.5))
                .unwrap();
        }
        list
    }

    fn started(n: u64) -> BattleSession {
        match BattleSession::start(Candidate::new(1000, "New"), Tier::Mid, &list_of(n)) {
            SessionStart::Started(session) => session,
            other => panic!("expected session, got {:?}", other),
        }
    }

    #[test]
    fn test_begin_empty_resolves_at_zero() {
        assert_eq!(BattlePhase::begin(0), BattlePhase::Resolved { index: 0 });
    }

    #[test]
    fn test_start_on_empty_list_is_immediate() {
        let start = BattleSession::start(Candidate::new(1, "Solo"), Tier::High, &RankedList::new());
        assert_eq!(start, SessionStart::Immediate { index: 0 });
    }

    #[test]
    fn test_start_duplicate() {
        let start = BattleSession::start(Candidate::new(2, "Again"), Tier::Low, &list_of(3));
        assert_eq!(start, SessionStart::Duplicate);
    }

    #[test]
    fn test_initial_bounds() {
        let session = started(5);
        assert_eq!(session.phase().bounds(), Some((0, 5)));
        assert_eq!(session.current_opponent_index(), Some(2));
        assert!(!session.can_undo());
    }

    #[test]
    fn test_mid_rounds_toward_low() {
        assert_eq!(midpoint(0, 4), 2);
        assert_eq!(midpoint(0, 1), 0);
        assert_eq!(midpoint(3, 6), 4);
        assert_eq!(midpoint(2, 3), 2);
    }

    #[test]
    fn test_two_item_walkthrough() {
        let mut session = started(2);
        assert_eq!(session.current_opponent_index(), Some(1));

        assert_eq!(session.pick_candidate_superior(), Progress::Pending { opponent: 0 });
        assert_eq!(session.phase().bounds(), Some((0, 1)));

        assert_eq!(session.pick_opponent_superior(), Progress::Resolved { index: 1 });
        assert_eq!(session.phase().resolved_index(), Some(1));
        assert_eq!(session.current_opponent_index(), None);
    }

    #[test]
    fn test_candidate_always_wins_goes_to_top() {
        let mut session = started(7);
        let mut progress = Progress::Ignored;
        for _ in 0..3 {
            progress = session.pick_candidate_superior();
        }
        assert_eq!(progress, Progress::Resolved { index: 0 });
    }

    #[test]
    fn test_opponent_always_wins_goes_to_bottom() {
        let mut session = started(7);
        let mut progress = Progress::Ignored;
        for _ in 0..3 {
            progress = session.pick_opponent_superior();
        }
        assert_eq!(progress, Progress::Resolved { index: 7 });
    }

    #[test]
    fn test_undo_restores_bounds() {
        let mut session = started(10);
        session.pick_opponent_superior();
        assert_eq!(session.phase().bounds(), Some((6, 10)));

        assert_eq!(session.undo(), Progress::Pending { opponent: 5 });
        assert_eq!(session.phase().bounds(), Some((0, 10)));
        assert!(!session.can_undo());
    }

    #[test]
    fn test_undo_with_empty_history_is_ignored() {
        let mut session = started(4);
        let before = session.clone();
        assert_eq!(session.undo(), Progress::Ignored);
        assert_eq!(session, before);
    }

    #[test]
    fn test_undo_reverts_only_one_decision() {
        let mut session = started(16);
        session.pick_opponent_superior(); // [9, 16)
        session.pick_candidate_superior(); // [9, 12)
        session.undo();
        assert_eq!(session.phase().bounds(), Some((9, 16)));
        assert_eq!(session.phase().decisions(), 1);
    }

    #[test]
    fn test_skip_resolves_at_mid() {
        let mut session = started(9);
        session.pick_opponent_superior(); // [5, 9)
        assert_eq!(session.skip(), Progress::Resolved { index: 7 });
    }

    #[test]
    fn test_operations_after_resolve_are_ignored() {
        let mut session = started(1);
        assert_eq!(session.pick_candidate_superior(), Progress::Resolved { index: 0 });
        assert_eq!(session.pick_opponent_superior(), Progress::Ignored);
        assert_eq!(session.skip(), Progress::Ignored);
        assert_eq!(session.undo(), Progress::Ignored);
        assert_eq!(session.phase().resolved_index(), Some(0));
    }

    #[test]
    fn test_pure_transitions_ignore_inactive_phases() {
        let resolved = BattlePhase::Resolved { index: 3 };
        assert_eq!(resolved.clone().decide(Choice::Candidate), resolved);
        assert_eq!(resolved.clone().skip(), resolved);
        assert_eq!(BattlePhase::NotStarted.undo(), BattlePhase::NotStarted);
    }

    #[test]
    fn test_session_serializes() {
        let mut session = started(3);
        session.pick_candidate_superior();
        let json = serde_json::to_string(&session).unwrap();
        let restored: BattleSession = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, session);
    }
}
