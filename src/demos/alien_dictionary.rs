//! Alien Dictionary (problem 269): letter order by topological sort.
//!
//! Adjacent words of a sorted alien dictionary reveal at most one ordering
//! relation each (their first differing letter). The relations form a
//! graph that Kahn's algorithm sorts. Every phase is recorded:
//!
//! 1. graph initialization over all distinct letters (first-seen order)
//! 2. one step per newly discovered edge; a repeated relation is skipped
//!    silently, an impossible prefix pair ends the sequence at once
//! 3. queue seeding, then per popped letter a "processing" step and, when
//!    it has successors, a "neighbors updated" step
//! 4. a single terminal step with the ordering or a cycle report
//!
//! Each step carries a full copy of the graph and in-degree maps so a
//! recorded step never changes afterwards.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::engine::{AlgorithmStep, StepGenerator};

/// Source listing shown next to the animation.
pub const LISTING: &str = r"fn alien_order(words: &[&str]) -> String {
    let mut graph: IndexMap<char, Vec<char>> = IndexMap::new();
    let mut in_degree: IndexMap<char, usize> = IndexMap::new();
    for c in words.iter().flat_map(|w| w.chars()) {
        graph.entry(c).or_default();
        in_degree.entry(c).or_insert(0);
    }

    for pair in words.windows(2) {
        let (first, second) = (pair[0], pair[1]);
        if first.len() > second.len() && first.starts_with(second) {
            return String::new();
        }
        if let Some((a, b)) = first.chars().zip(second.chars()).find(|(a, b)| a != b) {
            if !graph[&a].contains(&b) {
                graph[&a].push(b);
                in_degree[&b] += 1;
            }
        }
    }

    let mut queue: VecDeque<char> =
        in_degree.iter().filter(|(_, &d)| d == 0).map(|(&c, _)| c).collect();
    let mut result = String::new();
    while let Some(c) = queue.pop_front() {
        result.push(c);
        for &next in &graph[&c] {
            in_degree[&next] -= 1;
            if in_degree[&next] == 0 {
                queue.push_back(next);
            }
        }
    }

    if result.chars().count() == in_degree.len() { result } else { String::new() }
}";

/// Zero-based lines of [`LISTING`] that steps highlight.
pub mod lines {
    /// Graph and in-degree initialization.
    pub const INIT: usize = 4;
    /// Early return on an impossible prefix pair.
    pub const INVALID: usize = 11;
    /// Edge insertion.
    pub const ADD_EDGE: usize = 15;
    /// Queue seeding.
    pub const SEED_QUEUE: usize = 21;
    /// Letter appended to the result.
    pub const PROCESS: usize = 25;
    /// Successor in-degree decrement.
    pub const UPDATE_NEIGHBORS: usize = 27;
    /// Final result.
    pub const RESULT: usize = 34;
}

/// Adjacency list: letter to the letters it precedes, in insertion order.
pub type Graph = IndexMap<char, Vec<char>>;

/// Letter to its count of unresolved predecessors.
pub type InDegree = IndexMap<char, usize>;

/// What a topological-sort step records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TopologicalStepKind {
    /// Every distinct letter registered with no edges.
    Initialized,
    /// A new ordering relation `from < to`.
    EdgeFound {
        /// Letter that comes first.
        from: char,
        /// Letter that comes after.
        to: char,
    },
    /// `earlier` is longer than `later` and starts with it.
    Invalid {
        /// Word that appears first in the list.
        earlier: String,
        /// Word that appears right after it.
        later: String,
    },
    /// Queue filled with the in-degree-zero letters.
    QueueSeeded,
    /// A letter was popped and appended to the result.
    Processing,
    /// The popped letter's successors had their in-degree decremented.
    NeighborsUpdated,
    /// Every letter placed.
    Complete {
        /// The discovered alphabet order.
        order: String,
    },
    /// Letters remain with unresolved predecessors.
    Cycle,
}

/// One snapshot of the alien-dictionary solve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologicalStep {
    /// What this step records.
    pub kind: TopologicalStepKind,
    /// Adjacency list at this point.
    pub graph: Graph,
    /// In-degrees at this point.
    pub in_degree: InDegree,
    /// Letters eligible for processing, front first.
    pub queue: Vec<char>,
    /// Letters already placed in output order.
    pub result: Vec<char>,
    /// Letter handled by this step.
    pub current_char: Option<char>,
    /// Narration.
    pub message: String,
    /// Line of [`LISTING`] to highlight.
    pub highlight_line: usize,
    /// True only on the pop-and-append step.
    pub processing: bool,
}

impl AlgorithmStep for TopologicalStep {
    fn message(&self) -> &str {
        &self.message
    }

    fn highlight_line(&self) -> usize {
        self.highlight_line
    }

    fn is_terminal(&self) -> bool {
        matches!(
            self.kind,
            TopologicalStepKind::Invalid { .. }
                | TopologicalStepKind::Complete { .. }
                | TopologicalStepKind::Cycle
        )
    }
}

/// How a word list resolves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AlienOutcome {
    /// A complete alphabet order.
    Ordered {
        /// Letters in alien order.
        order: String,
    },
    /// The relations contain a cycle.
    Cycle,
    /// A longer word precedes its own prefix.
    Invalid {
        /// The longer word.
        earlier: String,
        /// Its prefix, listed after it.
        later: String,
    },
}

/// Solver state shared by step generation and step counting.
struct Solver {
    graph: Graph,
    in_degree: InDegree,
    queue: VecDeque<char>,
    result: Vec<char>,
    steps: Vec<TopologicalStep>,
    count: usize,
    record: bool,
}

impl Solver {
    fn new(record: bool) -> Self {
        Self {
            graph: Graph::new(),
            in_degree: InDegree::new(),
            queue: VecDeque::new(),
            result: Vec::new(),
            steps: Vec::new(),
            count: 0,
            record,
        }
    }

    /// Record a snapshot; `message` is only evaluated when recording.
    fn push(
        &mut self,
        kind: TopologicalStepKind,
        current_char: Option<char>,
        highlight_line: usize,
        message: impl FnOnce(&Self) -> String,
    ) {
        self.count += 1;
        if !self.record {
            return;
        }
        let processing = kind == TopologicalStepKind::Processing;
        let message = message(self);
        self.steps.push(TopologicalStep {
            kind,
            graph: self.graph.clone(),
            in_degree: self.in_degree.clone(),
            queue: self.queue.iter().copied().collect(),
            result: self.result.clone(),
            current_char,
            message,
            highlight_line,
            processing,
        });
    }

    fn run<S: AsRef<str>>(&mut self, words: &[S]) -> AlienOutcome {
        for c in words.iter().flat_map(|w| w.as_ref().chars()) {
            self.graph.entry(c).or_default();
            self.in_degree.entry(c).or_insert(0);
        }
        self.push(TopologicalStepKind::Initialized, None, lines::INIT, |s| {
            format!(
                "Initialized graph with characters: {}",
                join(s.graph.keys().copied())
            )
        });

        for pair in words.windows(2) {
            let (first, second) = (pair[0].as_ref(), pair[1].as_ref());

            if first.len() > second.len() && first.starts_with(second) {
                let kind = TopologicalStepKind::Invalid {
                    earlier: first.to_string(),
                    later: second.to_string(),
                };
                self.push(kind, None, lines::INVALID, |_| {
                    format!("Invalid: \"{first}\" is longer than \"{second}\" but starts with it")
                });
                tracing::debug!(earlier = first, later = second, "Prefix ordering is impossible");
                return AlienOutcome::Invalid {
                    earlier: first.to_string(),
                    later: second.to_string(),
                };
            }

            let Some((from, to)) = first.chars().zip(second.chars()).find(|(a, b)| a != b)
            else {
                continue;
            };

            let successors = self.graph.entry(from).or_default();
            if successors.contains(&to) {
                tracing::debug!(%from, %to, "Relation already known, skipping");
                continue;
            }
            successors.push(to);
            *self.in_degree.entry(to).or_insert(0) += 1;

            self.push(
                TopologicalStepKind::EdgeFound { from, to },
                None,
                lines::ADD_EDGE,
                |_| format!("Found order: '{from}' < '{to}' from \"{first}\" vs \"{second}\""),
            );
        }

        self.queue = self
            .in_degree
            .iter()
            .filter(|(_, &degree)| degree == 0)
            .map(|(&c, _)| c)
            .collect();
        self.push(TopologicalStepKind::QueueSeeded, None, lines::SEED_QUEUE, |s| {
            format!(
                "Starting topological sort. Queue initialized with: {}",
                join(s.queue.iter().copied())
            )
        });

        while let Some(c) = self.queue.pop_front() {
            self.result.push(c);
            self.push(TopologicalStepKind::Processing, Some(c), lines::PROCESS, |_| {
                format!("Processing '{c}'. Added to result.")
            });

            let successors = self.graph.get(&c).cloned().unwrap_or_default();
            for next in &successors {
                if let Some(degree) = self.in_degree.get_mut(next) {
                    *degree = degree.saturating_sub(1);
                    if *degree == 0 {
                        self.queue.push_back(*next);
                    }
                }
            }

            if !successors.is_empty() {
                self.push(
                    TopologicalStepKind::NeighborsUpdated,
                    Some(c),
                    lines::UPDATE_NEIGHBORS,
                    |_| format!("Updated neighbors of '{c}': {}", join(successors.iter().copied())),
                );
            }
        }

        if self.result.len() == self.in_degree.len() {
            let order: String = self.result.iter().collect();
            let message = format!("Complete! Alien order: \"{order}\"");
            self.push(
                TopologicalStepKind::Complete {
                    order: order.clone(),
                },
                None,
                lines::RESULT,
                |_| message,
            );
            AlienOutcome::Ordered { order }
        } else {
            tracing::debug!(
                placed = self.result.len(),
                letters = self.in_degree.len(),
                "Cycle detected"
            );
            self.push(TopologicalStepKind::Cycle, None, lines::RESULT, |_| {
                "No valid ordering exists (cycle detected)".to_string()
            });
            AlienOutcome::Cycle
        }
    }
}

fn join(chars: impl Iterator<Item = char>) -> String {
    chars.map(String::from).collect::<Vec<_>>().join(", ")
}

/// Generate the full step sequence for `words`.
///
/// Never fails: an impossible prefix pair and a cyclic relation set are
/// both reported through a terminal step.
#[must_use]
pub fn generate_steps<S: AsRef<str>>(words: &[S]) -> Vec<TopologicalStep> {
    let mut solver = Solver::new(true);
    solver.run(words);
    solver.steps
}

/// Length of [`generate_steps`]`(words)` without recording snapshots.
#[must_use]
pub fn step_count<S: AsRef<str>>(words: &[S]) -> usize {
    let mut solver = Solver::new(false);
    solver.run(words);
    solver.count
}

/// Resolve `words` without recording any steps.
#[must_use]
pub fn outcome<S: AsRef<str>>(words: &[S]) -> AlienOutcome {
    Solver::new(false).run(words)
}

/// The alien alphabet order, or `None` for cyclic or invalid input.
#[must_use]
pub fn alien_order<S: AsRef<str>>(words: &[S]) -> Option<String> {
    match outcome(words) {
        AlienOutcome::Ordered { order } => Some(order),
        AlienOutcome::Cycle | AlienOutcome::Invalid { .. } => None,
    }
}

/// Split comma-separated input into trimmed, non-empty words.
#[must_use]
pub fn parse_word_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|word| !word.is_empty())
        .map(String::from)
        .collect()
}

/// Relations discovered by a step sequence, in discovery order.
#[must_use]
pub fn discovered_edges(steps: &[TopologicalStep]) -> Vec<(char, char)> {
    steps
        .iter()
        .filter_map(|step| match step.kind {
            TopologicalStepKind::EdgeFound { from, to } => Some((from, to)),
            _ => None,
        })
        .collect()
}

/// Whether `order` is a topological sort of `graph`.
///
/// Every letter of the graph must appear exactly once and every edge
/// `a -> b` must place `a` before `b`. Any valid sort is accepted, not
/// just the one Kahn's algorithm happens to produce.
#[must_use]
pub fn is_valid_order(order: &str, graph: &Graph) -> bool {
    let mut position: IndexMap<char, usize> = IndexMap::new();
    for (i, c) in order.chars().enumerate() {
        if position.insert(c, i).is_some() {
            return false;
        }
    }
    if position.len() != graph.len() || !graph.keys().all(|c| position.contains_key(c)) {
        return false;
    }
    graph.iter().all(|(from, successors)| {
        successors
            .iter()
            .all(|to| position.get(from) < position.get(to))
    })
}

/// Step generator for the Alien Dictionary visualizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlienDictionary;

impl StepGenerator for AlienDictionary {
    type Input = [String];
    type Step = TopologicalStep;

    const LISTING: &'static str = LISTING;

    fn generate(input: &[String]) -> Vec<TopologicalStep> {
        generate_steps(input)
    }

    fn step_count(input: &[String]) -> usize {
        step_count(input)
    }
}
