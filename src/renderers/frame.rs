//! Renderer-agnostic frame data.
//!
//! A [`RenderFrame`] holds everything needed to draw one step, decoupled
//! from ratatui and the browser. It is a pure function of the session.

use serde::Serialize;

use crate::catalog::Difficulty;
use crate::demos::{palindrome, PalindromeStep, TopologicalStep};
use crate::session::{Session, StepSequence};

/// Data for one rendered step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderFrame {
    /// Problem number.
    pub problem: u32,
    /// Problem title.
    pub title: String,
    /// Difficulty badge.
    pub difficulty: Difficulty,
    /// Zero-based index of the step shown.
    pub step: usize,
    /// Number of steps in the sequence.
    pub total_steps: usize,
    /// "Step i of n", 1-based.
    pub step_label: String,
    /// Narration of the step.
    pub message: String,
    /// Source listing with the highlighted line marked.
    pub code: Vec<CodeLine>,
    /// Whether playback is running.
    pub playing: bool,
    /// Speed multiplier.
    pub speed: f64,
    /// Step-back button enabled.
    pub can_step_back: bool,
    /// Step-forward button enabled.
    pub can_step_forward: bool,
    /// Problem-specific view.
    pub view: ProblemView,
}

/// One line of the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeLine {
    /// Zero-based line number.
    pub number: usize,
    /// Line text.
    pub text: String,
    /// Whether this is the line being executed.
    pub highlighted: bool,
}

/// Problem-specific part of the frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProblemView {
    /// Two-pointer scan.
    Palindrome(PalindromeView),
    /// Topological sort.
    AlienDictionary(AlienView),
}

/// Which pointers sit on a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerRole {
    /// No pointer.
    None,
    /// Left pointer only.
    Left,
    /// Right pointer only.
    Right,
    /// Both pointers (odd-length middle).
    Both,
}

/// One character of the cleaned string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Cell {
    /// Character.
    pub ch: char,
    /// Pointers on this cell.
    pub role: PointerRole,
    /// Under a pointer while a comparison is shown.
    pub comparing: bool,
}

/// Result badge of a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Comparison {
    /// Left character.
    pub left: char,
    /// Right character.
    pub right: char,
    /// Whether they match.
    pub is_match: bool,
}

/// Palindrome view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PalindromeView {
    /// Raw input.
    pub original: String,
    /// Cleaned string.
    pub cleaned: String,
    /// Per-character pointer roles.
    pub cells: Vec<Cell>,
    /// Left pointer position, shown while it has not crossed the right.
    pub left: Option<usize>,
    /// Right pointer position, shown while it differs from the left.
    pub right: Option<usize>,
    /// Badge shown while comparing.
    pub comparison: Option<Comparison>,
}

/// Colour class of a graph node.
///
/// Precedence: processing, then resolved, then queued, then pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeStatus {
    /// Not yet eligible.
    Pending,
    /// In the queue.
    Queued,
    /// Placed in the result.
    Resolved,
    /// Being popped in this step.
    Processing,
}

/// One graph node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    /// Letter.
    pub letter: char,
    /// Unresolved predecessors.
    pub in_degree: usize,
    /// Letters it precedes.
    pub successors: Vec<char>,
    /// Colour class.
    pub status: NodeStatus,
}

/// Alien-dictionary view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlienView {
    /// Input words.
    pub words: Vec<String>,
    /// Nodes in first-seen order.
    pub nodes: Vec<Node>,
    /// Queue, front first.
    pub queue: Vec<char>,
    /// Letters placed so far.
    pub result: Vec<char>,
}

impl RenderFrame {
    /// Capture the frame for the session's current step.
    #[must_use]
    pub fn capture(session: &Session) -> Self {
        let problem = session.problem_info();
        let steps = session.steps();
        let playback = session.playback();
        let step = playback.current();
        let highlight = steps.highlight_line(step);

        let view = match steps {
            StepSequence::Palindrome(seq) => ProblemView::Palindrome(palindrome_view(
                session.palindrome_input(),
                seq.get(step),
            )),
            StepSequence::AlienDictionary(seq) => ProblemView::AlienDictionary(alien_view(
                session.alien_words(),
                seq.get(step),
            )),
        };

        Self {
            problem: problem.id.number(),
            title: problem.title.to_string(),
            difficulty: problem.difficulty,
            step,
            total_steps: steps.len(),
            step_label: format!("Step {} of {}", step + 1, steps.len()),
            message: steps.message(step).unwrap_or_default().to_string(),
            code: problem
                .code_lines()
                .enumerate()
                .map(|(number, text)| CodeLine {
                    number,
                    text: text.to_string(),
                    highlighted: highlight == Some(number),
                })
                .collect(),
            playing: playback.is_playing(),
            speed: playback.speed().value(),
            can_step_back: playback.can_step_back(),
            can_step_forward: playback.can_step_forward(),
            view,
        }
    }

    /// Highlighted listing line, if any.
    #[must_use]
    pub fn highlighted_line(&self) -> Option<&CodeLine> {
        self.code.iter().find(|line| line.highlighted)
    }

    /// Serialize to JSON for cross-boundary transfer.
    ///
    /// # Errors
    ///
    /// Returns `VizError::Serialization` if serialization fails.
    pub fn to_json(&self) -> crate::error::VizResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

fn palindrome_view(input: &str, step: Option<&PalindromeStep>) -> PalindromeView {
    let cleaned = palindrome::clean(input);
    let left = step.and_then(|s| s.left);
    let right = step.and_then(|s| s.right);
    let comparing = step.is_some_and(|s| s.comparing);

    let cells = cleaned
        .chars()
        .enumerate()
        .map(|(i, ch)| {
            let role = match (left == Some(i), right == Some(i)) {
                (true, true) => PointerRole::Both,
                (true, false) => PointerRole::Left,
                (false, true) => PointerRole::Right,
                (false, false) => PointerRole::None,
            };
            Cell {
                ch,
                role,
                comparing: comparing && role != PointerRole::None,
            }
        })
        .collect();

    let comparison = step.filter(|s| s.comparing).and_then(|s| {
        Some(Comparison {
            left: s.left_char?,
            right: s.right_char?,
            is_match: s.is_match?,
        })
    });

    let crossed = matches!((left, right), (Some(l), Some(r)) if l > r);
    PalindromeView {
        original: input.to_string(),
        cleaned,
        cells,
        left: left.filter(|_| !crossed),
        right: right.filter(|&r| !crossed && Some(r) != left),
        comparison,
    }
}

fn alien_view(words: &[String], step: Option<&TopologicalStep>) -> AlienView {
    let Some(step) = step else {
        return AlienView {
            words: words.to_vec(),
            nodes: Vec::new(),
            queue: Vec::new(),
            result: Vec::new(),
        };
    };

    let nodes = step
        .graph
        .iter()
        .map(|(&letter, successors)| Node {
            letter,
            in_degree: step.in_degree.get(&letter).copied().unwrap_or_default(),
            successors: successors.clone(),
            status: node_status(step, letter),
        })
        .collect();

    AlienView {
        words: words.to_vec(),
        nodes,
        queue: step.queue.clone(),
        result: step.result.clone(),
    }
}

fn node_status(step: &TopologicalStep, letter: char) -> NodeStatus {
    if step.processing && step.current_char == Some(letter) {
        NodeStatus::Processing
    } else if step.result.contains(&letter) {
        NodeStatus::Resolved
    } else if step.queue.contains(&letter) {
        NodeStatus::Queued
    } else {
        NodeStatus::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProblemId;
    use crate::demos::alien_dictionary;

    #[test]
    fn test_initial_palindrome_frame() {
        let session = Session::default();
        let frame = session.frame();

        assert_eq!(frame.problem, 125);
        assert_eq!(frame.title, "Valid Palindrome");
        assert_eq!(frame.step_label, "Step 1 of 21");
        assert!(!frame.playing);
        assert!(!frame.can_step_back);
        assert!(frame.can_step_forward);
        assert_eq!(
            frame.highlighted_line().map(|l| l.number),
            Some(palindrome::lines::START)
        );

        let ProblemView::Palindrome(view) = frame.view else {
            panic!("expected palindrome view");
        };
        assert_eq!(view.cleaned, "amanaplanacanalpanama");
        assert_eq!(view.cells[0].role, PointerRole::Left);
        assert_eq!(view.cells[20].role, PointerRole::Right);
        assert!(view.comparison.is_none());
    }

    #[test]
    fn test_comparison_badge() {
        let mut session = Session::default();
        session.set_palindrome_input("race a car");
        for _ in 0..7 {
            session.step_forward();
        }
        let frame = session.frame();
        let ProblemView::Palindrome(view) = frame.view else {
            panic!("expected palindrome view");
        };
        let comparison = view.comparison.expect("comparing");
        assert_eq!((comparison.left, comparison.right), ('e', 'a'));
        assert!(!comparison.is_match);
        assert!(view.cells[3].comparing);
        assert!(view.cells[4].comparing);
        assert!(!view.cells[0].comparing);
    }

    #[test]
    fn test_single_cell_has_both_pointers() {
        let steps = palindrome::generate_steps("a");
        let view = palindrome_view("a", steps.first());
        assert_eq!(view.cells[0].role, PointerRole::Both);
        assert_eq!(view.left, Some(0));
        assert_eq!(view.right, None);
    }

    #[test]
    fn test_success_step_hides_pointers() {
        let steps = palindrome::generate_steps("Madam");
        let view = palindrome_view("Madam", steps.last());
        assert!(view.cells.iter().all(|c| c.role == PointerRole::None));
        assert_eq!((view.left, view.right), (None, None));
    }

    #[test]
    fn test_alien_frame_nodes() {
        let mut session = Session::default();
        session.select_problem(ProblemId::AlienDictionary);
        let frame = session.frame();
        assert_eq!(frame.step_label, "Step 1 of 16");

        let ProblemView::AlienDictionary(view) = frame.view else {
            panic!("expected alien view");
        };
        let letters: Vec<char> = view.nodes.iter().map(|n| n.letter).collect();
        assert_eq!(letters, vec!['w', 'r', 't', 'f', 'e']);
        assert!(view.nodes.iter().all(|n| n.status == NodeStatus::Pending));
        assert_eq!(view.words.len(), 5);
    }

    #[test]
    fn test_node_status_precedence() {
        let steps = alien_dictionary::generate_steps(&["z", "x"]);
        let processing = steps
            .iter()
            .find(|s| s.processing)
            .expect("processing step");
        let letter = processing.current_char.expect("current char");
        assert_eq!(node_status(processing, letter), NodeStatus::Processing);

        let last = steps.last().expect("terminal step");
        assert_eq!(node_status(last, 'z'), NodeStatus::Resolved);

        let seeded = steps
            .iter()
            .find(|s| s.kind == alien_dictionary::TopologicalStepKind::QueueSeeded)
            .expect("seeded step");
        assert_eq!(node_status(seeded, 'z'), NodeStatus::Queued);
        assert_eq!(node_status(seeded, 'x'), NodeStatus::Pending);
    }

    #[test]
    fn test_frame_json() {
        let frame = Session::default().frame();
        let json = frame.to_json().expect("serialize");
        assert!(json.contains("\"kind\":\"palindrome\""));
        assert!(json.contains("\"step_label\":\"Step 1 of 21\""));
    }
}
