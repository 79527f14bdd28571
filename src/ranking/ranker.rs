//! Ranker - owns the ranked list and at most one live comparison session
//!
//! Flow: `begin` a candidate with a tier, answer comparisons with `pick`
//! until the range collapses (or `skip`), and the candidate is scored and
//! inserted. `cancel` drops the session without touching the list.

use crate::core::error::{CineError, Result};
use crate::core::types::{Candidate, ItemId, RankedItem};
use crate::ranking::list::RankedList;
use crate::ranking::score::synthesize_score;
use crate::ranking::session::{BattleSession, Choice, Progress, SessionStart};
use crate::ranking::tier::Tier;

/// Outcome of starting to rank a candidate
#[derive(Debug, Clone, PartialEq)]
pub enum BeginOutcome {
    /// Placed without comparisons (the list was empty)
    Placed { item: RankedItem, index: usize },
    /// The id is already ranked; nothing changed
    Duplicate,
    /// A session is open; compare against the item at `opponent_index`
    Battle { opponent_index: usize },
    /// Another candidate's session is still open
    Busy,
}

/// Outcome of a single session operation
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Keep comparing against the item at `opponent_index`
    Compare { opponent_index: usize },
    /// Session resolved; the candidate is now in the list
    Placed { item: RankedItem, index: usize },
    /// No session, or the operation does not apply right now
    Ignored,
}

/// A finished non-interactive placement
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub item: RankedItem,
    pub index: usize,
    pub comparisons: usize,
}

#[derive(Debug, Default)]
pub struct Ranker {
    list: RankedList,
    session: Option<BattleSession>,
}

impl Ranker {
    pub fn new(list: RankedList) -> Self {
        Self {
            list,
            session: None,
        }
    }

    pub fn list(&self) -> &RankedList {
        &self.list
    }

    pub fn into_list(self) -> RankedList {
        self.list
    }

    pub fn session(&self) -> Option<&BattleSession> {
        self.session.as_ref()
    }

    pub fn in_battle(&self) -> bool {
        self.session.is_some()
    }

    pub fn can_undo(&self) -> bool {
        self.session.as_ref().is_some_and(BattleSession::can_undo)
    }

    /// The list item the candidate is currently up against
    pub fn opponent(&self) -> Option<&RankedItem> {
        let index = self.session.as_ref()?.current_opponent_index()?;
        self.list.get(index)
    }

    /// Start placing `candidate` with the given tier
    pub fn begin(&mut self, candidate: Candidate, tier: Tier) -> Result<BeginOutcome> {
        if self.session.is_some() {
            tracing::warn!(id = %candidate.id, "session already open, ignoring new candidate");
            return Ok(BeginOutcome::Busy);
        }

        match BattleSession::start(candidate.clone(), tier, &self.list) {
            SessionStart::Duplicate => Ok(BeginOutcome::Duplicate),
            SessionStart::Immediate { index } => {
                let item = self.place(candidate, tier, index)?;
                Ok(BeginOutcome::Placed { item, index })
            }
            SessionStart::Started(session) => {
                let opponent_index = session.current_opponent_index().unwrap_or(0);
                tracing::debug!(
                    id = %candidate.id,
                    %tier,
                    list_len = self.list.len(),
                    "battle started"
                );
                self.session = Some(session);
                Ok(BeginOutcome::Battle { opponent_index })
            }
        }
    }

    pub fn pick(&mut self, choice: Choice) -> Result<Step> {
        self.drive(|session| session.pick(choice))
    }

    pub fn undo(&mut self) -> Result<Step> {
        self.drive(BattleSession::undo)
    }

    pub fn skip(&mut self) -> Result<Step> {
        self.drive(BattleSession::skip)
    }

    /// Abandon the open session. The list is untouched.
    pub fn cancel(&mut self) -> Option<Candidate> {
        let session = self.session.take()?;
        tracing::debug!(id = %session.candidate().id, "battle cancelled");
        Some(session.into_candidate())
    }

    /// Remove by id. Refused while a battle is open.
    pub fn remove(&mut self, id: ItemId) -> Result<Option<RankedItem>> {
        self.ensure_idle()?;
        let removed = self.list.remove_by_id(id);
        if let Some(item) = &removed {
            tracing::info!(id = %item.id, title = %item.title, "removed from rankings");
        }
        Ok(removed)
    }

    pub fn reorder(&mut self, new_order: &[ItemId]) -> Result<()> {
        self.ensure_idle()?;
        self.list.reorder(new_order)?;
        tracing::info!(len = new_order.len(), "rankings reordered");
        Ok(())
    }

    pub fn move_item(&mut self, from: usize, to: usize) -> Result<()> {
        self.ensure_idle()?;
        self.list.move_item(from, to)?;
        tracing::info!(from, to, "ranking moved");
        Ok(())
    }

    /// The open session's bounds were taken over the current list; it must
    /// not change underneath them
    fn ensure_idle(&self) -> Result<()> {
        match &self.session {
            Some(session) => Err(CineError::SessionInProgress(session.candidate().id)),
            None => Ok(()),
        }
    }

    /// Run a whole session non-interactively, asking `judge` for each
    /// comparison as `judge(candidate, opponent)`
    ///
    /// Returns `None` for a duplicate or when another session is open.
    pub fn place_by(
        &mut self,
        candidate: Candidate,
        tier: Tier,
        mut judge: impl FnMut(&Candidate, &RankedItem) -> Choice,
    ) -> Result<Option<Placement>> {
        match self.begin(candidate, tier)? {
            BeginOutcome::Placed { item, index } => {
                return Ok(Some(Placement {
                    item,
                    index,
                    comparisons: 0,
                }))
            }
            BeginOutcome::Duplicate | BeginOutcome::Busy => return Ok(None),
            BeginOutcome::Battle { .. } => {}
        }

        let mut comparisons = 0;
        loop {
            let choice = match (self.session.as_ref(), self.opponent()) {
                (Some(session), Some(opponent)) => Some(judge(session.candidate(), opponent)),
                _ => None,
            };
            let Some(choice) = choice else {
                self.cancel();
                return Ok(None);
            };
            comparisons += 1;

            match self.pick(choice)? {
                Step::Placed { item, index } => {
                    return Ok(Some(Placement {
                        item,
                        index,
                        comparisons,
                    }))
                }
                Step::Compare { .. } => {}
                Step::Ignored => {
                    self.cancel();
                    return Ok(None);
                }
            }
        }
    }

    fn drive(&mut self, op: impl FnOnce(&mut BattleSession) -> Progress) -> Result<Step> {
        let Some(session) = self.session.as_mut() else {
            return Ok(Step::Ignored);
        };

        match op(&mut *session) {
            Progress::Pending { opponent } => {
                tracing::debug!(
                    opponent,
                    bounds = ?session.phase().bounds(),
                    "comparison recorded"
                );
                Ok(Step::Compare {
                    opponent_index: opponent,
                })
            }
            Progress::Ignored => Ok(Step::Ignored),
            Progress::Resolved { index } => {
                let candidate = session.candidate().clone();
                let tier = session.tier();
                // On failure the session stays, so `cancel` can hand the candidate back
                let item = self.place(candidate, tier, index)?;
                self.session = None;
                Ok(Step::Placed { item, index })
            }
        }
    }

    fn place(&mut self, candidate: Candidate, tier: Tier, index: usize) -> Result<RankedItem> {
        let score = synthesize_score(tier, index, self.list.len() + 1);
        let item = candidate.into_ranked(tier, score);
        self.list.insert_at(item.clone(), index)?;
        tracing::info!(
            id = %item.id,
            title = %item.title,
            rank = index + 1,
            score,
            "placed in rankings"
        );
        Ok(item)
    }
}
