use super::frame::{CursorSide, Frame};
use super::highlight::Highlighter;
use super::registry::SessionRegistry;
use super::surface::{DocumentTarget, SurfaceError, TypewriterSurface};
use super::timing::TypewriterTiming;
use super::{Pair, Script};
use crate::cancellation::{CancellationToken, Wait};
use crate::dom::{NodeId, SharedDocument};
use rand::{SeedableRng, rngs::StdRng};
use std::convert::Infallible;
use std::time::Duration;
use tracing::{debug, info, warn};

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Finished on its own: reduced-motion render or the target went away.
    Completed,
    /// Superseded or stopped through its token.
    Cancelled,
    Failed(String),
}

/// Everything needed to animate one target.
#[derive(Debug, Clone)]
pub struct TypewriterJob {
    pub target: NodeId,
    pub script: Script,
    pub highlighter: Highlighter,
    pub accent: String,
}

#[derive(Debug, Clone)]
pub struct Typewriter {
    registry: SessionRegistry,
    timing: TypewriterTiming,
    reduced_motion: bool,
}

impl Typewriter {
    pub fn new(timing: TypewriterTiming, reduced_motion: bool) -> Self {
        Self {
            registry: SessionRegistry::new(),
            timing,
            reduced_motion,
        }
    }

    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    pub fn timing(&self) -> TypewriterTiming {
        self.timing
    }

    pub fn set_reduced_motion(&mut self, reduced_motion: bool) {
        self.reduced_motion = reduced_motion;
    }

    pub fn start(&self, doc: &SharedDocument, job: TypewriterJob) -> Session<DocumentTarget> {
        let surface = DocumentTarget::new(doc.clone(), job.target);
        self.start_on(job.target, surface, job.script, job.highlighter, job.accent)
    }

    /// Cancel any session owning `key`, then mount the first frame.
    ///
    /// Both happen before this returns, so an older loop can never paint
    /// over the new one.
    pub fn start_on<S: TypewriterSurface>(
        &self,
        key: NodeId,
        surface: S,
        script: Script,
        highlighter: Highlighter,
        accent: String,
    ) -> Session<S> {
        let token = self.registry.claim(key);
        let session = Session {
            key,
            surface,
            script,
            highlighter,
            accent,
            timing: self.timing,
            reduced_motion: self.reduced_motion,
            token,
            registry: self.registry.clone(),
            rng: StdRng::from_entropy(),
        };
        session.mount();
        session
    }
}

enum Stop {
    Cancelled,
    Detached,
    Failed(String),
}

impl From<SurfaceError> for Stop {
    fn from(err: SurfaceError) -> Self {
        match err {
            SurfaceError::Detached(_) => Stop::Detached,
        }
    }
}

/// One live run of the animation loop for a target.
pub struct Session<S> {
    key: NodeId,
    surface: S,
    script: Script,
    highlighter: Highlighter,
    accent: String,
    timing: TypewriterTiming,
    reduced_motion: bool,
    token: CancellationToken,
    registry: SessionRegistry,
    rng: StdRng,
}

impl<S: TypewriterSurface> Session<S> {
    /// Deterministic jitter.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn target(&self) -> NodeId {
        self.key
    }

    fn mount(&self) {
        let label = self.script.accessible_label();
        let frame = if self.reduced_motion {
            self.script.first_frame()
        } else {
            self.script.empty_frame()
        };
        let markup = frame.render_html(&self.highlighter, &self.accent);
        let mounted = self
            .surface
            .set_label(&label)
            .and_then(|()| self.surface.paint(&frame, markup));
        if let Err(err) = mounted {
            debug!(target_node = self.key.index(), "Typewriter mount skipped: {err}");
        }
    }

    pub async fn run(mut self) -> Outcome {
        let outcome = if self.reduced_motion {
            Outcome::Completed
        } else {
            match self.drive().await {
                Ok(never) => match never {},
                Err(Stop::Cancelled) => Outcome::Cancelled,
                Err(Stop::Detached) => Outcome::Completed,
                Err(Stop::Failed(reason)) => {
                    warn!(target_node = self.key.index(), "Typewriter session failed: {reason}");
                    Outcome::Failed(reason)
                }
            }
        };
        self.registry.release(self.key, &self.token);
        info!(target_node = self.key.index(), ?outcome, "Typewriter session ended");
        outcome
    }

    async fn drive(&mut self) -> Result<Infallible, Stop> {
        if self.script.is_empty() {
            return Err(Stop::Failed("script has no entries".to_string()));
        }
        let script = self.script.clone();
        loop {
            match &script {
                Script::Lines(lines) => {
                    for line in lines {
                        self.cycle_line(line).await?;
                    }
                }
                Script::Pairs(pairs) => {
                    for pair in pairs {
                        self.cycle_pair(pair).await?;
                    }
                }
            }
        }
    }

    async fn cycle_line(&mut self, line: &str) -> Result<(), Stop> {
        let len = line.chars().count();
        for shown in 1..=len {
            self.type_pause().await?;
            self.show(Frame::line(prefix(line, shown)))?;
        }
        self.pause(self.timing.hold_delay()).await?;
        for shown in (0..len).rev() {
            self.pause(self.timing.erase_delay()).await?;
            self.show(Frame::line(prefix(line, shown)))?;
        }
        self.pause(self.timing.between_lines_delay()).await
    }

    async fn cycle_pair(&mut self, pair: &Pair) -> Result<(), Stop> {
        let question = pair.question.as_str();
        let answer = pair.answer.as_str();
        let q_len = question.chars().count();
        let a_len = answer.chars().count();

        for shown in 1..=q_len {
            self.type_pause().await?;
            self.show(Frame::pair(prefix(question, shown), "", CursorSide::Question))?;
        }
        if q_len > 0 && a_len > 0 {
            self.pause(self.timing.answer_start_delay()).await?;
        }
        for shown in 1..=a_len {
            self.type_pause().await?;
            self.show(Frame::pair(question, prefix(answer, shown), CursorSide::Answer))?;
        }
        self.pause(self.timing.hold_delay()).await?;
        for shown in (0..a_len).rev() {
            self.pause(self.timing.erase_delay()).await?;
            self.show(Frame::pair(question, prefix(answer, shown), CursorSide::Answer))?;
        }
        for shown in (0..q_len).rev() {
            self.pause(self.timing.erase_delay()).await?;
            self.show(Frame::pair(prefix(question, shown), "", CursorSide::Question))?;
        }
        self.pause(self.timing.between_lines_delay()).await
    }

    async fn type_pause(&mut self) -> Result<(), Stop> {
        let delay = self.timing.type_delay(&mut self.rng);
        self.pause(delay).await
    }

    async fn pause(&self, delay: Duration) -> Result<(), Stop> {
        match self.token.sleep(delay).await {
            Wait::Elapsed => Ok(()),
            Wait::Cancelled => Err(Stop::Cancelled),
        }
    }

    fn show(&self, frame: Frame) -> Result<(), Stop> {
        if self.token.check_cancelled("paint").is_err() {
            return Err(Stop::Cancelled);
        }
        if !self.surface.is_attached() {
            return Err(Stop::Detached);
        }
        let markup = frame.render_html(&self.highlighter, &self.accent);
        self.surface.paint(&frame, markup)?;
        Ok(())
    }
}

/// The first `count` characters of `text`.
fn prefix(text: &str, count: usize) -> &str {
    match text.char_indices().nth(count) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[derive(Clone, Default)]
    struct Recorder {
        frames: Arc<Mutex<Vec<Frame>>>,
        detached: Arc<AtomicBool>,
    }

    impl TypewriterSurface for Recorder {
        fn paint(&self, frame: &Frame, _markup: String) -> Result<(), SurfaceError> {
            self.frames.lock().push(frame.clone());
            Ok(())
        }

        fn set_label(&self, _label: &str) -> Result<(), SurfaceError> {
            Ok(())
        }

        fn is_attached(&self) -> bool {
            !self.detached.load(Ordering::SeqCst)
        }
    }

    fn steady_timing() -> TypewriterTiming {
        TypewriterTiming {
            type_jitter_ms: 0,
            ..TypewriterTiming::default()
        }
    }

    fn lines(raw: &[&str]) -> Script {
        Script::from_raw(raw, false)
    }

    fn target() -> NodeId {
        let mut doc = Document::new();
        let body = doc.body();
        doc.create_element("span", body)
    }

    fn texts(frames: &[Frame]) -> Vec<(String, Option<String>, CursorSide)> {
        frames
            .iter()
            .map(|f| (f.question.clone(), f.answer.clone(), f.cursor))
            .collect()
    }

    #[test]
    fn prefix_counts_characters_not_bytes() {
        assert_eq!(prefix("héllo", 2), "hé");
        assert_eq!(prefix("hi", 5), "hi");
        assert_eq!(prefix("hi", 0), "");
    }

    #[tokio::test(start_paused = true)]
    async fn single_line_types_holds_erases_and_cycles() {
        let engine = Typewriter::new(steady_timing(), false);
        let recorder = Recorder::default();
        let session = engine.start_on(
            target(),
            recorder.clone(),
            lines(&["ab"]),
            Highlighter::default(),
            "#007aff".to_string(),
        );
        let token = session.token();
        let handle = tokio::spawn(session.run());

        // 55 + 55 typing, 1400 hold, 28 + 28 erase, 350 between, 55 typing.
        tokio::time::sleep(Duration::from_millis(2000)).await;
        token.cancel();
        let outcome = handle.await.expect("session task should not panic");
        assert_eq!(outcome, Outcome::Cancelled);

        let shown: Vec<String> = recorder
            .frames
            .lock()
            .iter()
            .map(|f| f.question.clone())
            .collect();
        assert_eq!(shown, vec!["", "a", "ab", "a", "", "a"]);
    }

    #[tokio::test(start_paused = true)]
    async fn lines_play_in_order_after_the_between_lines_pause() {
        let engine = Typewriter::new(steady_timing(), false);
        let recorder = Recorder::default();
        let session = engine.start_on(
            target(),
            recorder.clone(),
            lines(&["ab", "cd"]),
            Highlighter::default(),
            String::new(),
        );
        let token = session.token();
        let handle = tokio::spawn(session.run());

        // "ab" is gone at 1566; 350 between lines puts "c" at 1971.
        tokio::time::sleep(Duration::from_millis(1950)).await;
        let last = recorder.frames.lock().last().map(|f| f.question.clone());
        assert_eq!(last.as_deref(), Some(""));

        tokio::time::sleep(Duration::from_millis(50)).await;
        token.cancel();
        handle.await.expect("session task should not panic");

        let shown: Vec<String> = recorder
            .frames
            .lock()
            .iter()
            .map(|f| f.question.clone())
            .collect();
        assert_eq!(shown, vec!["", "a", "ab", "a", "", "c"]);
    }

    #[tokio::test(start_paused = true)]
    async fn second_pair_starts_from_an_empty_frame() {
        let engine = Typewriter::new(steady_timing(), false);
        let recorder = Recorder::default();
        let session = engine.start_on(
            target(),
            recorder.clone(),
            Script::from_raw(&["Q", "A", "R", "B"], true),
            Highlighter::default(),
            String::new(),
        );
        let token = session.token();
        let handle = tokio::spawn(session.run());

        // First pair is erased by 1866; "R" lands at 2271 after the 350 pause.
        tokio::time::sleep(Duration::from_millis(2300)).await;
        token.cancel();
        handle.await.expect("session task should not panic");

        let some = |s: &str| Some(s.to_string());
        assert_eq!(
            texts(&recorder.frames.lock()),
            vec![
                (String::new(), some(""), CursorSide::Question),
                ("Q".to_string(), some(""), CursorSide::Question),
                ("Q".to_string(), some("A"), CursorSide::Answer),
                ("Q".to_string(), some(""), CursorSide::Answer),
                (String::new(), some(""), CursorSide::Question),
                ("R".to_string(), some(""), CursorSide::Question),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn paired_mode_moves_the_cursor_between_halves() {
        let engine = Typewriter::new(steady_timing(), false);
        let recorder = Recorder::default();
        let session = engine.start_on(
            target(),
            recorder.clone(),
            Script::from_raw(&["Q", "A"], true),
            Highlighter::default(),
            "#007aff".to_string(),
        );
        let token = session.token();
        let handle = tokio::spawn(session.run());

        // 55 question, 300 answer delay, 55 answer, 1400 hold, 28 + 28 erase.
        tokio::time::sleep(Duration::from_millis(1900)).await;
        token.cancel();
        handle.await.expect("session task should not panic");

        let some = |s: &str| Some(s.to_string());
        assert_eq!(
            texts(&recorder.frames.lock()),
            vec![
                (String::new(), some(""), CursorSide::Question),
                ("Q".to_string(), some(""), CursorSide::Question),
                ("Q".to_string(), some("A"), CursorSide::Answer),
                ("Q".to_string(), some(""), CursorSide::Answer),
                (String::new(), some(""), CursorSide::Question),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn missing_answer_skips_the_answer_delay() {
        let engine = Typewriter::new(steady_timing(), false);
        let recorder = Recorder::default();
        let session = engine.start_on(
            target(),
            recorder.clone(),
            Script::from_raw(&["Q"], true),
            Highlighter::default(),
            String::new(),
        );
        let token = session.token();
        let handle = tokio::spawn(session.run());

        // 55 typing, 1400 hold, 28 erase lands at 1483 without any answer delay.
        tokio::time::sleep(Duration::from_millis(1490)).await;
        token.cancel();
        handle.await.expect("session task should not panic");

        let frames = recorder.frames.lock();
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[2].question, "");
    }

    #[tokio::test(start_paused = true)]
    async fn restarting_cancels_the_old_loop_before_the_new_paint() {
        let doc = Document::new().into_shared();
        let node = {
            let mut doc = doc.lock();
            let body = doc.body();
            doc.create_element("span", body)
        };
        let engine = Typewriter::new(steady_timing(), false);
        let job = |line: &str| TypewriterJob {
            target: node,
            script: lines(&[line]),
            highlighter: Highlighter::default(),
            accent: "#007aff".to_string(),
        };

        let first = engine.start(&doc, job("xxxxxxxx"));
        let first_token = first.token();
        let first_handle = tokio::spawn(first.run());
        tokio::time::sleep(Duration::from_millis(120)).await;

        let second = engine.start(&doc, job("hello"));
        assert!(first_token.is_cancelled());
        let mounted = doc
            .lock()
            .get(node)
            .and_then(|el| el.frame().cloned())
            .expect("second session mounts a frame");
        assert_eq!(mounted.question, "");

        let second_token = second.token();
        let second_handle = tokio::spawn(second.run());
        assert_eq!(
            first_handle.await.expect("first task should not panic"),
            Outcome::Cancelled
        );

        tokio::time::sleep(Duration::from_millis(300)).await;
        let shown = doc
            .lock()
            .get(node)
            .and_then(|el| el.frame().map(|f| f.question.clone()))
            .expect("frame present");
        assert!("hello".starts_with(&shown) && !shown.is_empty());
        assert_eq!(engine.registry().len(), 1);

        second_token.cancel();
        second_handle.await.expect("second task should not panic");
        assert!(engine.registry().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn reduced_motion_renders_the_first_line_once() {
        let doc = Document::new().into_shared();
        let node = {
            let mut doc = doc.lock();
            let body = doc.body();
            doc.create_element("span", body)
        };
        let engine = Typewriter::new(TypewriterTiming::default(), true);
        let session = engine.start(
            &doc,
            TypewriterJob {
                target: node,
                script: lines(&["Hello"]),
                highlighter: Highlighter::default(),
                accent: "#007aff".to_string(),
            },
        );
        assert_eq!(session.run().await, Outcome::Completed);
        tokio::time::sleep(Duration::from_secs(10)).await;

        let doc = doc.lock();
        let element = doc.get(node).expect("target exists");
        let frame = element.frame().expect("frame painted");
        assert_eq!(frame.plain_text(), "Hello");
        assert!(!frame.animated);
        assert!(element.html().contains("tw-cursor--static"));
        assert_eq!(element.attribute("aria-label"), Some("Hello"));
    }

    #[tokio::test(start_paused = true)]
    async fn detached_target_ends_the_session() {
        let engine = Typewriter::new(steady_timing(), false);
        let recorder = Recorder::default();
        let session = engine.start_on(
            target(),
            recorder.clone(),
            lines(&["long line here"]),
            Highlighter::default(),
            String::new(),
        );
        let handle = tokio::spawn(session.run());
        tokio::time::sleep(Duration::from_millis(130)).await;
        recorder.detached.store(true, Ordering::SeqCst);
        assert_eq!(
            handle.await.expect("session task should not panic"),
            Outcome::Completed
        );
        assert!(engine.registry().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn empty_script_fails_without_looping() {
        let engine = Typewriter::new(steady_timing(), false);
        let session = engine.start_on(
            target(),
            Recorder::default(),
            Script::Lines(Vec::new()),
            Highlighter::default(),
            String::new(),
        );
        assert!(matches!(session.run().await, Outcome::Failed(_)));
    }
}
