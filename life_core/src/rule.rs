// rule.rs - Editable transition table and the handle shared by editor and clock

use std::sync::{Arc, PoisonError, RwLock};

use rand::Rng;

use crate::error::{LifeError, Result};
use crate::grid::State;
use crate::grid::State::{Dead as D, Living as L};

/// Number of entries per state: live-neighbor counts 0 through 8.
pub const NEIGHBOR_COUNTS: usize = 9;

/// Next state for every (current state, live-neighbor count) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RuleTable {
    living: [State; NEIGHBOR_COUNTS],
    dead: [State; NEIGHBOR_COUNTS],
}

impl RuleTable {
    /// Standard Game of Life: birth on 3, survival on 2 or 3.
    pub const CONWAY: RuleTable = RuleTable {
        living: [D, D, L, L, D, D, D, D, D],
        dead: [D, D, D, L, D, D, D, D, D],
    };

    /// Every transition leads to a dead cell.
    pub const EMPTY: RuleTable = RuleTable {
        living: [D; NEIGHBOR_COUNTS],
        dead: [D; NEIGHBOR_COUNTS],
    };

    /// Each of the 18 entries independently living or dead with even odds.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut draw = || -> [State; NEIGHBOR_COUNTS] {
            std::array::from_fn(|_| if rng.gen_bool(0.5) { L } else { D })
        };
        let living = draw();
        let dead = draw();
        Self { living, dead }
    }

    fn row(&self, state: State) -> &[State; NEIGHBOR_COUNTS] {
        match state {
            State::Living => &self.living,
            State::Dead   => &self.dead,
        }
    }

    fn row_mut(&mut self, state: State) -> &mut [State; NEIGHBOR_COUNTS] {
        match state {
            State::Living => &mut self.living,
            State::Dead   => &mut self.dead,
        }
    }

    fn check_count(count: usize) -> Result<()> {
        if count < NEIGHBOR_COUNTS {
            Ok(())
        } else {
            Err(LifeError::InvalidRuleIndex { count })
        }
    }

    /// Lookup used by the step engine. `count` comes from a neighbor count and
    /// is always within 0..=8.
    pub fn next_state(&self, state: State, count: u8) -> State {
        self.row(state)[count as usize]
    }

    pub fn entry(&self, state: State, count: usize) -> Result<State> {
        Self::check_count(count)?;
        Ok(self.row(state)[count])
    }

    pub fn set_entry(&mut self, state: State, count: usize, next: State) -> Result<()> {
        Self::check_count(count)?;
        self.row_mut(state)[count] = next;
        Ok(())
    }

    /// Flip one entry between living and dead; returns the new value.
    pub fn toggle(&mut self, state: State, count: usize) -> Result<State> {
        Self::check_count(count)?;
        let entry = &mut self.row_mut(state)[count];
        *entry = entry.flipped();
        Ok(*entry)
    }

    /// All 18 entries as (state, count, next) triples, living block first.
    pub fn entries(&self) -> impl Iterator<Item = (State, usize, State)> + '_ {
        [State::Living, State::Dead].into_iter().flat_map(move |state| {
            self.row(state)
                .iter()
                .enumerate()
                .map(move |(count, &next)| (state, count, next))
        })
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Shared reference to the active rule table.
///
/// Steps read one snapshot per generation. Point edits go through
/// `Arc::make_mut`, so a snapshot held by an in-flight step is never touched;
/// presets replace the `Arc` wholesale.
#[derive(Debug, Clone, Default)]
pub struct RuleHandle {
    inner: Arc<RwLock<Arc<RuleTable>>>,
}

impl RuleHandle {
    pub fn new(table: RuleTable) -> Self {
        Self { inner: Arc::new(RwLock::new(Arc::new(table))) }
    }

    /// The table as of now. Later edits do not affect the returned value.
    pub fn snapshot(&self) -> Arc<RuleTable> {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    pub fn set_entry(&self, state: State, count: usize, next: State) -> Result<()> {
        RuleTable::check_count(count)?;
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        Arc::make_mut(&mut *guard).set_entry(state, count, next)?;
        tracing::debug!(?state, count, ?next, "rule entry set");
        Ok(())
    }

    pub fn toggle(&self, state: State, count: usize) -> Result<State> {
        RuleTable::check_count(count)?;
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let next = Arc::make_mut(&mut *guard).toggle(state, count)?;
        tracing::debug!(?state, count, ?next, "rule entry toggled");
        Ok(next)
    }

    /// Swap in a whole new table.
    pub fn replace(&self, table: RuleTable) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(table);
    }

    pub fn load_conway(&self) {
        self.replace(RuleTable::CONWAY);
        tracing::info!("loaded Conway rule");
    }

    pub fn load_random<R: Rng + ?Sized>(&self, rng: &mut R) {
        self.replace(RuleTable::random(rng));
        tracing::info!("loaded random rule");
    }
}
