//! Static problem catalog.
//!
//! Reference data for every visualized problem: header, statement, worked
//! examples, constraints, preset inputs and the listing whose lines the
//! step generators highlight.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::demos::{AlienDictionary, Palindrome, StepGenerator};
use crate::error::{VizError, VizResult};

/// Catalog key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum ProblemId {
    /// Problem 125.
    #[default]
    ValidPalindrome,
    /// Problem 269.
    AlienDictionary,
}

impl ProblemId {
    /// Catalog order.
    pub const ALL: [Self; 2] = [Self::ValidPalindrome, Self::AlienDictionary];

    /// Problem number.
    #[must_use]
    pub const fn number(self) -> u32 {
        match self {
            Self::ValidPalindrome => 125,
            Self::AlienDictionary => 269,
        }
    }

    /// Look up a problem by number.
    ///
    /// # Errors
    ///
    /// Returns `VizError::UnknownProblem` for numbers not in the catalog.
    pub fn from_number(number: u32) -> VizResult<Self> {
        Self::ALL
            .into_iter()
            .find(|id| id.number() == number)
            .ok_or(VizError::UnknownProblem(number))
    }

    /// Position in [`ProblemId::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::ValidPalindrome => 0,
            Self::AlienDictionary => 1,
        }
    }

    /// Next problem, if any.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        Self::ALL.get(self.index() + 1).copied()
    }

    /// Previous problem, if any.
    #[must_use]
    pub fn previous(self) -> Option<Self> {
        self.index()
            .checked_sub(1)
            .and_then(|i| Self::ALL.get(i).copied())
    }

    /// Catalog entry.
    #[must_use]
    pub fn problem(self) -> &'static Problem {
        match self {
            Self::ValidPalindrome => &VALID_PALINDROME,
            Self::AlienDictionary => &ALIEN_DICTIONARY,
        }
    }
}

impl TryFrom<u32> for ProblemId {
    type Error = VizError;

    fn try_from(number: u32) -> VizResult<Self> {
        Self::from_number(number)
    }
}

impl From<ProblemId> for u32 {
    fn from(id: ProblemId) -> Self {
        id.number()
    }
}

/// Accepts the problem number or a short name (`palindrome`, `alien`).
impl FromStr for ProblemId {
    type Err = VizError;

    fn from_str(s: &str) -> VizResult<Self> {
        let name = s.trim().to_ascii_lowercase();
        match name.as_str() {
            "palindrome" | "valid-palindrome" => Ok(Self::ValidPalindrome),
            "alien" | "alien-dictionary" => Ok(Self::AlienDictionary),
            _ => name.parse::<u32>().map_or_else(
                |_| Err(VizError::UnknownProblemName(s.to_string())),
                Self::from_number,
            ),
        }
    }
}

impl fmt::Display for ProblemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Problem difficulty badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    /// Easy.
    Easy,
    /// Medium.
    Medium,
    /// Hard.
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        })
    }
}

/// One worked example.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Example {
    /// Input as shown.
    pub input: &'static str,
    /// Expected output as shown.
    pub output: &'static str,
    /// Why.
    pub explanation: &'static str,
}

/// A preset input button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Preset {
    /// Button label.
    pub label: &'static str,
    /// Raw input text; comma-separated for word lists.
    pub input: &'static str,
}

/// Catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Problem {
    /// Catalog key.
    pub id: ProblemId,
    /// Title.
    pub title: &'static str,
    /// Difficulty.
    pub difficulty: Difficulty,
    /// Problem statement.
    pub description: &'static str,
    /// Worked examples.
    pub examples: &'static [Example],
    /// Input constraints.
    pub constraints: &'static [&'static str],
    /// Source listing shown beside the animation.
    pub code: &'static str,
    /// Quick-pick inputs.
    pub presets: &'static [Preset],
}

impl Problem {
    /// Listing split into lines; highlight lines are 0-based indices into it.
    pub fn code_lines(&self) -> impl Iterator<Item = &'static str> {
        self.code.lines()
    }

    /// Preset by 0-based position.
    #[must_use]
    pub fn preset(&self, index: usize) -> Option<&'static Preset> {
        self.presets.get(index)
    }
}

static VALID_PALINDROME: Problem = Problem {
    id: ProblemId::ValidPalindrome,
    title: "Valid Palindrome",
    difficulty: Difficulty::Easy,
    description: "A phrase is a palindrome if, after converting all uppercase letters into \
                  lowercase letters and removing all non-alphanumeric characters, it reads \
                  the same forward and backward.",
    examples: &[
        Example {
            input: "\"A man, a plan, a canal: Panama\"",
            output: "true",
            explanation: "\"amanaplanacanalpanama\" is a palindrome.",
        },
        Example {
            input: "\"race a car\"",
            output: "false",
            explanation: "\"raceacar\" is not a palindrome.",
        },
        Example {
            input: "\" \"",
            output: "true",
            explanation: "s is an empty string \"\" after removing non-alphanumeric \
                          characters. An empty string reads the same forward and backward.",
        },
    ],
    constraints: &[
        "1 <= s.length <= 2 * 10^5",
        "s consists only of printable ASCII characters.",
    ],
    code: Palindrome::LISTING,
    presets: &[
        Preset {
            label: "Panama",
            input: "A man, a plan, a canal: Panama",
        },
        Preset {
            label: "race a car",
            input: "race a car",
        },
        Preset {
            label: "Car or cat",
            input: "Was it a car or a cat I saw?",
        },
        Preset {
            label: "Madam",
            input: "Madam",
        },
        Preset {
            label: "Nixon",
            input: "No 'x' in Nixon",
        },
    ],
};

static ALIEN_DICTIONARY: Problem = Problem {
    id: ProblemId::AlienDictionary,
    title: "Alien Dictionary",
    difficulty: Difficulty::Hard,
    description: "There is a new alien language that uses the English alphabet, but the order \
                  among the letters is unknown. You are given a list of words from the alien \
                  language's dictionary, sorted lexicographically by the rules of that \
                  language. Return a string of the unique letters sorted in increasing order \
                  by the alien rules. If there is no solution, return an empty string. If \
                  there are multiple solutions, return any of them.",
    examples: &[
        Example {
            input: "words = [\"wrt\",\"wrf\",\"er\",\"ett\",\"rftt\"]",
            output: "\"wertf\"",
            explanation: "From \"wrt\" and \"wrf\", 't' < 'f'. From \"wrt\" and \"er\", \
                          'w' < 'e'. From \"er\" and \"ett\", 'r' < 't'. From \"ett\" and \
                          \"rftt\", 'e' < 'r'. So the order is \"wertf\".",
        },
        Example {
            input: "words = [\"z\",\"x\"]",
            output: "\"zx\"",
            explanation: "From \"z\" and \"x\", 'z' < 'x'. So the order is \"zx\".",
        },
    ],
    constraints: &[
        "1 <= words.length <= 100",
        "1 <= words[i].length <= 100",
        "words[i] consists of only lowercase English letters.",
    ],
    code: AlienDictionary::LISTING,
    presets: &[
        Preset {
            label: "Example 1",
            input: "wrt,wrf,er,ett,rftt",
        },
        Preset {
            label: "Simple",
            input: "z,x",
        },
        Preset {
            label: "Cycle",
            input: "z,x,z",
        },
        Preset {
            label: "Invalid prefix",
            input: "abc,ab",
        },
        Preset {
            label: "Two chains",
            input: "ac,ab,zc,zb",
        },
    ],
};

/// Every catalog entry in navigation order.
pub fn problems() -> impl Iterator<Item = &'static Problem> {
    ProblemId::ALL.into_iter().map(ProblemId::problem)
}
