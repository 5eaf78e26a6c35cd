use crate::dom::escape_html;
use regex::{Regex, RegexBuilder};
use tracing::warn;

/// A slice of text and whether it matched a keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run<'a> {
    pub text: &'a str,
    pub highlighted: bool,
}

/// Wraps keyword matches in an accent-colored span.
///
/// Matching runs on the raw text and every piece is escaped on its own, so
/// neither the text nor the keywords can smuggle markup into the output.
#[derive(Debug, Clone, Default)]
pub struct Highlighter {
    pattern: Option<Regex>,
}

impl Highlighter {
    /// Case-insensitive matcher over whole-word occurrences of `keywords`.
    pub fn from_keywords<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut terms: Vec<String> = keywords
            .into_iter()
            .map(|term| term.as_ref().trim().to_string())
            .filter(|term| !term.is_empty())
            .collect();
        if terms.is_empty() {
            return Self::default();
        }
        // Longest first so alternation prefers "Rust Analyzer" over "Rust".
        terms.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        terms.dedup();
        let alternation = terms
            .iter()
            .map(|term| regex::escape(term))
            .collect::<Vec<_>>()
            .join("|");
        match RegexBuilder::new(&alternation).case_insensitive(true).build() {
            Ok(pattern) => Self {
                pattern: Some(pattern),
            },
            Err(err) => {
                warn!("Keyword pattern rejected, highlighting disabled: {err}");
                Self::default()
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.pattern.is_some()
    }

    pub fn runs<'a>(&self, text: &'a str) -> Vec<Run<'a>> {
        let Some(pattern) = &self.pattern else {
            return plain_run(text);
        };
        let mut runs = Vec::new();
        let mut cursor = 0;
        for found in pattern.find_iter(text) {
            if found.is_empty() || !is_word_bounded(text, found.start(), found.end()) {
                continue;
            }
            if found.start() > cursor {
                runs.push(Run {
                    text: &text[cursor..found.start()],
                    highlighted: false,
                });
            }
            runs.push(Run {
                text: found.as_str(),
                highlighted: true,
            });
            cursor = found.end();
        }
        if cursor < text.len() {
            runs.push(Run {
                text: &text[cursor..],
                highlighted: false,
            });
        }
        runs
    }

    pub fn render_html(&self, text: &str, accent: &str) -> String {
        let accent = escape_html(accent);
        let mut html = String::with_capacity(text.len());
        for run in self.runs(text) {
            if run.highlighted {
                html.push_str(&format!(
                    r#"<span class="tw-highlight" style="color: {accent}">{}</span>"#,
                    escape_html(run.text)
                ));
            } else {
                html.push_str(&escape_html(run.text));
            }
        }
        html
    }
}

fn plain_run(text: &str) -> Vec<Run<'_>> {
    if text.is_empty() {
        Vec::new()
    } else {
        vec![Run {
            text,
            highlighted: false,
        }]
    }
}

/// Word characters on either edge of a match must not continue into
/// neighbouring word characters. Edges like the `+` in "C++" are exempt.
fn is_word_bounded(text: &str, start: usize, end: usize) -> bool {
    let is_word = |ch: char| ch.is_alphanumeric() || ch == '_';
    let matched = &text[start..end];
    let first = matched.chars().next();
    let last = matched.chars().next_back();
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    let left_ok = !(first.is_some_and(is_word) && before.is_some_and(is_word));
    let right_ok = !(last.is_some_and(is_word) && after.is_some_and(is_word));
    left_ok && right_ok
}
