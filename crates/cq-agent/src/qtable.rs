//! Sparse action-value table.
//!
//! One row per visited [`StateKey`]; each row holds a slot per [`Action`].
//! A slot is `None` until the pair is first read or written, at which point
//! it becomes 0.  Entries are never removed.

use rustc_hash::FxHashMap;

use crate::{Action, StateKey};

type Row = [Option<f64>; Action::COUNT];

/// Summary of the table's contents.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QTableStats {
    pub state_count:  usize,
    /// Initialized (state, action) pairs.
    pub action_count: usize,
    /// 0 for an empty table.
    pub max_q_value:  f64,
    /// 0 for an empty table.
    pub min_q_value:  f64,
}

#[derive(Clone, Debug, Default)]
pub struct QTable {
    rows: FxHashMap<StateKey, Row>,
}

impl QTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Q(s, a) without initializing it.
    pub fn peek(&self, state: &StateKey, action: Action) -> Option<f64> {
        self.rows.get(state).and_then(|row| row[action.index()])
    }

    /// Q(s, a), initializing the entry to 0 on first access.
    pub fn get_or_init(&mut self, state: &StateKey, action: Action) -> f64 {
        if let Some(row) = self.rows.get_mut(state) {
            return *row[action.index()].get_or_insert(0.0);
        }
        self.insert_row(state, action, 0.0);
        0.0
    }

    pub fn set(&mut self, state: &StateKey, action: Action, value: f64) {
        if let Some(row) = self.rows.get_mut(state) {
            row[action.index()] = Some(value);
            return;
        }
        self.insert_row(state, action, value);
    }

    fn insert_row(&mut self, state: &StateKey, action: Action, value: f64) {
        let mut row = [None; Action::COUNT];
        row[action.index()] = Some(value);
        self.rows.insert(state.clone(), row);
    }

    /// Largest initialized value in `state`'s row; `None` if the state was
    /// never visited.
    pub fn max_value(&self, state: &StateKey) -> Option<f64> {
        self.rows
            .get(state)?
            .iter()
            .flatten()
            .copied()
            .reduce(f64::max)
    }

    pub fn stats(&self) -> QTableStats {
        let values: Vec<f64> = self.rows.values().flat_map(|row| row.iter().flatten().copied()).collect();
        QTableStats {
            state_count:  self.rows.len(),
            action_count: values.len(),
            max_q_value:  values.iter().copied().reduce(f64::max).unwrap_or(0.0),
            min_q_value:  values.iter().copied().reduce(f64::min).unwrap_or(0.0),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
