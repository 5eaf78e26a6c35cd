use super::highlight::Highlighter;

/// Which half of a pair the cursor trails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorSide {
    Question,
    Answer,
}

/// One rendered step of a typewriter session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub question: String,
    /// `None` in single-line mode.
    pub answer: Option<String>,
    pub cursor: CursorSide,
    /// False for the reduced-motion render: the cursor stays but never blinks.
    pub animated: bool,
}

impl Frame {
    pub fn line(text: &str) -> Self {
        Self {
            question: text.to_string(),
            answer: None,
            cursor: CursorSide::Question,
            animated: true,
        }
    }

    pub fn pair(question: &str, answer: &str, cursor: CursorSide) -> Self {
        Self {
            question: question.to_string(),
            answer: Some(answer.to_string()),
            cursor,
            animated: true,
        }
    }

    pub fn frozen(mut self) -> Self {
        self.animated = false;
        self
    }

    /// Visible text without markup.
    pub fn plain_text(&self) -> String {
        match &self.answer {
            Some(answer) if !answer.is_empty() => format!("{} {}", self.question, answer),
            _ => self.question.clone(),
        }
    }

    fn cursor_markup(&self) -> &'static str {
        if self.animated {
            r#"<span class="tw-cursor" aria-hidden="true"></span>"#
        } else {
            r#"<span class="tw-cursor tw-cursor--static" aria-hidden="true"></span>"#
        }
    }

    pub fn render_html(&self, highlighter: &Highlighter, accent: &str) -> String {
        let question = highlighter.render_html(&self.question, accent);
        match &self.answer {
            None => format!("{question}{}", self.cursor_markup()),
            Some(answer) => {
                let answer = highlighter.render_html(answer, accent);
                let (q_cursor, a_cursor) = match self.cursor {
                    CursorSide::Question => (self.cursor_markup(), ""),
                    CursorSide::Answer => ("", self.cursor_markup()),
                };
                format!(
                    r#"<span class="tw-question">{question}{q_cursor}</span><span class="tw-answer">{answer}{a_cursor}</span>"#
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_follows_the_active_half() {
        let hl = Highlighter::default();
        let html = Frame::pair("Who?", "Me", CursorSide::Answer).render_html(&hl, "#007aff");
        assert_eq!(
            html,
            r#"<span class="tw-question">Who?</span><span class="tw-answer">Me<span class="tw-cursor" aria-hidden="true"></span></span>"#
        );
    }

    #[test]
    fn frozen_frames_keep_a_static_cursor() {
        let hl = Highlighter::default();
        let html = Frame::line("Hello").frozen().render_html(&hl, "#007aff");
        assert_eq!(
            html,
            r#"Hello<span class="tw-cursor tw-cursor--static" aria-hidden="true"></span>"#
        );
    }
}
