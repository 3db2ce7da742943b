//! The transition table: a deterministic `(state, symbol)` keyed rule set.

use crate::types::{State, Transition};
use std::collections::HashMap;
use std::fmt;

/// Transition rules keyed by `(state, read symbol)`.
///
/// Inserting a second rule for an existing key replaces the first one (last write
/// wins). The replaced rules are kept in [`TransitionTable::overridden`] so they can be
/// reported, and keys remember the order in which they first appeared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransitionTable {
    rules: HashMap<(State, char), Transition>,
    order: Vec<(State, char)>,
    overridden: Vec<Transition>,
}

impl TransitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `transition`, returning the rule it replaced, if any.
    pub fn insert(&mut self, transition: Transition) -> Option<Transition> {
        let key = transition.key();
        let previous = self.rules.insert(key, transition);

        match previous {
            Some(previous) => self.overridden.push(previous),
            None => self.order.push(key),
        }

        previous
    }

    /// Finds the rule for `state` reading `symbol`. `None` means the machine halts.
    pub fn lookup(&self, state: State, symbol: char) -> Option<&Transition> {
        self.rules.get(&(state, symbol))
    }

    /// Iterates over the rules in the order their keys first appeared.
    pub fn iter(&self) -> impl Iterator<Item = &Transition> {
        self.order.iter().filter_map(|key| self.rules.get(key))
    }

    /// Rules that were replaced by a later rule with the same key.
    pub fn overridden(&self) -> &[Transition] {
        &self.overridden
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl FromIterator<Transition> for TransitionTable {
    fn from_iter<I: IntoIterator<Item = Transition>>(iter: I) -> Self {
        let mut table = TransitionTable::new();
        for transition in iter {
            table.insert(transition);
        }
        table
    }
}

impl fmt::Display for TransitionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for transition in self.iter() {
            writeln!(f, "{transition}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(state: State, read: char, write: char, movement: char, next_state: State) -> Transition {
        Transition {
            state,
            read,
            write,
            movement,
            next_state,
        }
    }

    #[test]
    fn test_lookup() {
        let table: TransitionTable = [rule(0, 'a', 'b', 'R', 1), rule(1, 'b', 'b', 'L', 0)]
            .into_iter()
            .collect();

        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup(0, 'a'), Some(&rule(0, 'a', 'b', 'R', 1)));
        assert_eq!(table.lookup(1, 'b').map(|t| t.next_state), Some(0));
        assert_eq!(table.lookup(0, 'b'), None);
        assert_eq!(table.lookup(2, 'a'), None);
    }

    #[test]
    fn test_last_write_wins() {
        let mut table = TransitionTable::new();
        assert_eq!(table.insert(rule(0, 'a', 'b', 'R', 1)), None);
        table.insert(rule(0, 'c', 'c', 'S', 0));

        let replaced = table.insert(rule(0, 'a', 'x', 'L', 2));
        assert_eq!(replaced, Some(rule(0, 'a', 'b', 'R', 1)));

        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup(0, 'a'), Some(&rule(0, 'a', 'x', 'L', 2)));
        assert_eq!(table.overridden(), &[rule(0, 'a', 'b', 'R', 1)]);

        // The replaced key keeps its original position.
        let keys: Vec<_> = table.iter().map(|t| t.key()).collect();
        assert_eq!(keys, vec![(0, 'a'), (0, 'c')]);
    }

    #[test]
    fn test_display() {
        let table: TransitionTable = [rule(0, 'a', 'b', 'R', 1), rule(1, '$', '$', 'S', 2)]
            .into_iter()
            .collect();

        assert_eq!(table.to_string(), "0 a b R 1\n1 $ $ S 2\n");
    }
}
