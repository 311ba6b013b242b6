//! Page ordering rules as a directed graph: validating updates against the rules and putting bad ones in order.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

use itertools::Itertools;
use petgraph::graphmap::DiGraphMap;
use petgraph::Direction::Outgoing;
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::error::{InputError, InputResult, OrderError};

/// Identifier of a single page.
pub type PageId = u32;

/// One update: the pages to print, in the order given.
pub type Update = Vec<PageId>;

/// Updates handed to one parallel task at a time.
const CHUNK_SIZE: usize = 1024;

/// A set of "`before` must be printed before `after`" rules.
///
/// Stored as a graph with an edge `before -> after` per rule. Built once and only read afterwards,
/// so any number of updates can be checked against it at the same time.
#[derive(Clone, Debug, Default)]
pub struct OrderingRules {
    graph: DiGraphMap<PageId, ()>,
}

impl OrderingRules {
    /// An empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `before` must precede `after`. Repeated rules are stored once.
    pub fn add_rule(&mut self, before: PageId, after: PageId) -> &mut Self {
        self.graph.add_edge(before, after, ());
        self
    }

    /// Number of distinct rules.
    pub fn len(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether there are no rules at all.
    pub fn is_empty(&self) -> bool {
        self.graph.edge_count() == 0
    }

    /// Whether a rule says `before` must precede `after`.
    pub fn must_precede(&self, before: PageId, after: PageId) -> bool {
        self.graph.contains_edge(before, after)
    }

    /// Whether `sequence` breaks none of the rules.
    ///
    /// Walks left to right; a page with a rule requiring it to come before a page already placed is a violation.
    /// Pages no rule mentions never cause one.
    pub fn is_consistent(&self, sequence: &[PageId]) -> bool {
        let mut placed = HashSet::with_capacity(sequence.len());

        for &page in sequence {
            if self.graph.neighbors_directed(page, Outgoing).any(|after| placed.contains(&after)) {
                return false;
            }
            placed.insert(page);
        }

        true
    }

    /// The lexicographically smallest ordering of the pages in `sequence` that satisfies every rule between them.
    ///
    /// Rules mentioning pages outside `sequence` are ignored, and a page listed twice appears once.
    /// Uses Kahn's algorithm, always taking the smallest page whose predecessors are all placed.
    pub fn topological_order(&self, sequence: &[PageId]) -> Result<Vec<PageId>, OrderError> {
        let mut in_degree: HashMap<PageId, usize> = sequence.iter().map(|&page| (page, 0)).collect();

        for page in in_degree.keys().copied().collect_vec() {
            for after in self.graph.neighbors_directed(page, Outgoing) {
                if let Some(degree) = in_degree.get_mut(&after) {
                    *degree += 1;
                }
            }
        }

        let mut ready: BinaryHeap<Reverse<PageId>> = in_degree.iter()
            .filter(|(_, degree)| **degree == 0)
            .map(|(page, _)| Reverse(*page))
            .collect();
        let mut order = Vec::with_capacity(in_degree.len());

        while let Some(Reverse(page)) = ready.pop() {
            order.push(page);

            for after in self.graph.neighbors_directed(page, Outgoing) {
                if let Some(degree) = in_degree.get_mut(&after) {
                    *degree -= 1;
                    if *degree == 0 {
                        ready.push(Reverse(after));
                    }
                }
            }
        }

        if order.len() < in_degree.len() {
            let remaining = in_degree.into_iter()
                .filter(|(_, degree)| *degree > 0)
                .map(|(page, _)| page)
                .sorted()
                .collect_vec();
            return Err(OrderError::CycleDetected { remaining });
        }

        Ok(order)
    }
}

impl FromIterator<(PageId, PageId)> for OrderingRules {
    fn from_iter<I: IntoIterator<Item=(PageId, PageId)>>(iter: I) -> Self {
        let mut rules = Self::new();
        for (before, after) in iter {
            rules.add_rule(before, after);
        }
        rules
    }
}

/// The page in the middle of `update`; for an even length, the later of the two middle pages.
pub fn middle_page(update: &[PageId]) -> Option<PageId> {
    update.get(update.len() / 2).copied()
}

/// A parsed print queue: the ordering rules followed by the updates to print.
#[derive(Clone, Debug, Default)]
pub struct PrintQueue {
    rules: OrderingRules,
    updates: Vec<Update>,
    skipped: usize,
}

impl PrintQueue {
    /// Parse the two-section format: `A|B` rule lines, a blank line, then comma-separated updates.
    ///
    /// Lines that do not parse are skipped with a warning and counted in [`Self::skipped`].
    /// Input without a single usable rule or update is [`InputError::Empty`].
    pub fn parse(text: &str) -> InputResult<Self> {
        let mut queue = Self::default();
        let mut in_updates = false;
        let mut seen_rules = false;

        for (index, line) in text.lines().enumerate() {
            let line_no = index + 1;
            let line = line.trim();
            if line.is_empty() {
                in_updates |= seen_rules;
                continue;
            }
            seen_rules = true;

            let parsed = if in_updates {
                parse_update(line_no, line).map(|update| queue.updates.push(update))
            } else {
                parse_rule(line_no, line).map(|(before, after)| {
                    queue.rules.add_rule(before, after);
                })
            };

            if let Err(err) = parsed {
                warn!(%err, "skipping malformed line");
                queue.skipped += 1;
            }
        }

        if queue.rules.is_empty() && queue.updates.is_empty() {
            return Err(InputError::Empty);
        }

        Ok(queue)
    }

    /// Assemble a queue from parts already in hand.
    pub fn new(rules: OrderingRules, updates: Vec<Update>) -> Self {
        Self { rules, updates, skipped: 0 }
    }

    /// The ordering rules.
    pub fn rules(&self) -> &OrderingRules {
        &self.rules
    }

    /// The updates, in input order.
    pub fn updates(&self) -> &[Update] {
        &self.updates
    }

    /// Number of malformed lines dropped while parsing.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Sum of the middle pages of every update already in a consistent order.
    pub fn ordered_middle_sum(&self) -> u64 {
        self.updates.par_chunks(CHUNK_SIZE)
            .map(|chunk| chunk.iter()
                .filter(|update| self.rules.is_consistent(update))
                .filter_map(|update| middle_page(update))
                .map(u64::from)
                .sum::<u64>())
            .sum()
    }

    /// Sum of the middle pages of every inconsistent update, after putting it in order.
    ///
    /// Fails if the rules between the pages of any such update form a cycle.
    pub fn reordered_middle_sum(&self) -> Result<u64, OrderError> {
        self.updates.par_chunks(CHUNK_SIZE)
            .map(|chunk| {
                let mut sum = 0u64;
                for update in chunk.iter().filter(|update| !self.rules.is_consistent(update)) {
                    let ordered = self.rules.topological_order(update)?;
                    debug!(?update, ?ordered, "reordered update");
                    sum += middle_page(&ordered).map_or(0, u64::from);
                }
                Ok::<_, OrderError>(sum)
            })
            .sum()
    }
}

fn parse_page(line: usize, token: &str) -> InputResult<PageId> {
    token.trim().parse()
        .map_err(|err| InputError::malformed(line, format!("bad page number {token:?}: {err}")))
}

fn parse_rule(line: usize, text: &str) -> InputResult<(PageId, PageId)> {
    let (before, after) = text.split_once('|')
        .ok_or_else(|| InputError::malformed(line, "rule has no '|' separator"))?;
    Ok((parse_page(line, before)?, parse_page(line, after)?))
}

fn parse_update(line: usize, text: &str) -> InputResult<Update> {
    text.split(',').map(|token| parse_page(line, token)).collect()
}
