//! Type-and-erase text animation.
//!
//! A [`Script`] is either a list of single lines or a list of
//! question/answer [`Pair`]s. [`Typewriter::start`] claims the target in the
//! [`SessionRegistry`] (cancelling whatever was animating there), mounts the
//! first frame and hands back a [`Session`] whose `run` future drives the
//! loop until it is cancelled or the target goes away.

mod engine;
mod frame;
mod highlight;
mod registry;
mod surface;
mod timing;

pub use engine::{Outcome, Session, Typewriter, TypewriterJob};
pub use frame::{CursorSide, Frame};
pub use highlight::{Highlighter, Run};
pub use registry::SessionRegistry;
pub use surface::{DocumentTarget, SurfaceError, TypewriterSurface};
pub use timing::TypewriterTiming;

/// Lines used when a section supplies nothing to animate.
pub const FALLBACK_LINES: &[&str] = &[
    "Designing calm interfaces.",
    "Shipping small, sharp tools.",
    "Learning something new every week.",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Script {
    Lines(Vec<String>),
    Pairs(Vec<Pair>),
}

/// Trim every line and drop the blank ones.
pub fn build_lines<S: AsRef<str>>(raw: &[S]) -> Vec<String> {
    raw.iter()
        .map(|line| line.as_ref().trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Group a flat sequence two at a time into question/answer pairs.
///
/// A trailing odd element becomes a question with an empty answer; pairs
/// where both halves are blank are dropped.
pub fn build_typewriter_pairs<S: AsRef<str>>(raw: &[S]) -> Vec<Pair> {
    raw.chunks(2)
        .map(|chunk| Pair {
            question: chunk[0].as_ref().trim().to_string(),
            answer: chunk
                .get(1)
                .map(|answer| answer.as_ref().trim().to_string())
                .unwrap_or_default(),
        })
        .filter(|pair| !(pair.question.is_empty() && pair.answer.is_empty()))
        .collect()
}

impl Script {
    /// Build a script, substituting [`FALLBACK_LINES`] when nothing usable
    /// remains.
    pub fn from_raw<S: AsRef<str>>(raw: &[S], pairs_mode: bool) -> Self {
        if pairs_mode {
            let pairs = build_typewriter_pairs(raw);
            if pairs.is_empty() {
                Script::Pairs(build_typewriter_pairs(FALLBACK_LINES))
            } else {
                Script::Pairs(pairs)
            }
        } else {
            let lines = build_lines(raw);
            if lines.is_empty() {
                Script::Lines(build_lines(FALLBACK_LINES))
            } else {
                Script::Lines(lines)
            }
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Script::Lines(lines) => lines.len(),
            Script::Pairs(pairs) => pairs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_pairs(&self) -> bool {
        matches!(self, Script::Pairs(_))
    }

    /// Stable text of the first entry, mirrored into the target's label.
    pub fn accessible_label(&self) -> String {
        match self {
            Script::Lines(lines) => lines.first().cloned().unwrap_or_default(),
            Script::Pairs(pairs) => pairs
                .first()
                .map(|pair| {
                    [pair.question.as_str(), pair.answer.as_str()]
                        .iter()
                        .filter(|part| !part.is_empty())
                        .copied()
                        .collect::<Vec<_>>()
                        .join(" ")
                })
                .unwrap_or_default(),
        }
    }

    /// The first entry fully typed; used for the reduced-motion render.
    pub fn first_frame(&self) -> Frame {
        let frame = match self {
            Script::Lines(lines) => {
                Frame::line(lines.first().map(String::as_str).unwrap_or_default())
            }
            Script::Pairs(pairs) => match pairs.first() {
                Some(pair) => {
                    let side = if pair.answer.is_empty() {
                        CursorSide::Question
                    } else {
                        CursorSide::Answer
                    };
                    Frame::pair(&pair.question, &pair.answer, side)
                }
                None => Frame::pair("", "", CursorSide::Question),
            },
        };
        frame.frozen()
    }

    /// Frame shown right after mount, before the first character lands.
    pub fn empty_frame(&self) -> Frame {
        match self {
            Script::Lines(_) => Frame::line(""),
            Script::Pairs(_) => Frame::pair("", "", CursorSide::Question),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_group_two_at_a_time_with_odd_tail() {
        assert_eq!(
            build_typewriter_pairs(&["Q1", "A1", "Q2"]),
            vec![
                Pair {
                    question: "Q1".to_string(),
                    answer: "A1".to_string()
                },
                Pair {
                    question: "Q2".to_string(),
                    answer: String::new()
                },
            ]
        );
    }

    #[test]
    fn blank_pairs_are_dropped_but_half_blank_pairs_survive() {
        let pairs = build_typewriter_pairs(&["  ", "", " Why? ", "  ", "", "Because."]);
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].question, "Why?");
        assert_eq!(pairs[0].answer, "");
        assert_eq!(pairs[1].question, "");
        assert_eq!(pairs[1].answer, "Because.");
    }

    #[test]
    fn empty_sources_fall_back_to_builtin_lines() {
        let empty: [&str; 0] = [];
        match Script::from_raw(&empty, false) {
            Script::Lines(lines) => assert_eq!(lines.len(), FALLBACK_LINES.len()),
            other => panic!("expected lines, got {other:?}"),
        }
        assert!(!Script::from_raw(&["   "], true).is_empty());
    }

    #[test]
    fn label_mirrors_first_entry() {
        assert_eq!(Script::from_raw(&[" Hello ", "World"], false).accessible_label(), "Hello");
        assert_eq!(
            Script::from_raw(&["What?", "This.", "Next"], true).accessible_label(),
            "What? This."
        );
    }
}
