use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::auth::UserProfile;
use crate::capture::CaptureState;
use crate::capture::camera::Surface;
use crate::capture::voice::{RecognitionEvent, append_spaced};
use crate::config::Pacing;
use crate::conversation::{
    ConversationMessage, OutOfTurn, SessionContext, SessionSummary, Speaker, Transcript,
};
use crate::interviewer::scripted::Script;
use crate::interviewer::{Interviewer, InterviewerError, SessionMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Preview step: devices can be toggled, nothing has been said yet.
    Initializing,
    AwaitingInterviewerTurn,
    AwaitingCandidateInput,
    Submitting,
    /// The script ran out; only ending the interview is left.
    Concluded,
    Ended,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Nothing to submit")]
    EmptyInput,
    #[error("Still waiting for the interviewer")]
    Busy,
    #[error("The interview has not started")]
    NotStarted,
    #[error("The interview has already started")]
    AlreadyStarted,
    #[error("The interviewer has no more questions")]
    Concluded,
    #[error("The interview has ended")]
    Ended,
    #[error(transparent)]
    OutOfTurn(#[from] OutOfTurn),
}

enum TurnSource {
    Remote {
        interviewer: Arc<dyn Interviewer>,
        history: Vec<ConversationMessage>,
        context: SessionContext,
    },
    Scripted {
        delay: Duration,
    },
}

/// An interviewer turn that has been requested but not produced yet.
/// Resolving it does not borrow the session.
pub struct PendingTurn {
    ticket: u64,
    source: TurnSource,
}

impl PendingTurn {
    pub async fn resolve(self) -> TurnOutcome {
        let reply = match self.source {
            TurnSource::Remote {
                interviewer,
                history,
                context,
            } => Reply::Remote(interviewer.respond(&history, &context).await),
            TurnSource::Scripted { delay } => {
                tokio::time::sleep(delay).await;
                Reply::Scripted
            }
        };

        TurnOutcome {
            ticket: self.ticket,
            reply,
        }
    }
}

enum Reply {
    Remote(Result<String, InterviewerError>),
    Scripted,
}

pub struct TurnOutcome {
    ticket: u64,
    reply: Reply,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    Interviewer(ConversationMessage),
    Concluded,
    /// The outcome no longer belongs to a live request.
    Discarded,
}

pub struct InterviewSession {
    context: SessionContext,
    mode: SessionMode,
    script: Script,
    pacing: Pacing,
    transcript: Transcript,
    state: SessionState,
    input: String,
    capture: CaptureState,
    in_flight: Option<u64>,
    next_ticket: u64,
    started_at: Option<Instant>,
    candidate: Option<UserProfile>,
}

impl InterviewSession {
    pub fn new(
        context: SessionContext,
        mode: SessionMode,
        pacing: Pacing,
        capture: CaptureState,
    ) -> Self {
        let script = Script::for_language(context.language);
        tracing::info!(role = %context.role, language = %context.language, ?mode, "Session created");

        Self {
            context,
            mode,
            script,
            pacing,
            transcript: Transcript::new(),
            state: SessionState::Initializing,
            input: String::new(),
            capture,
            in_flight: None,
            next_ticket: 1,
            started_at: None,
            candidate: None,
        }
    }

    pub fn with_candidate(mut self, candidate: Option<UserProfile>) -> Self {
        self.candidate = candidate;
        self
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn messages(&self) -> &[ConversationMessage] {
        self.transcript.messages()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn capture(&self) -> &CaptureState {
        &self.capture
    }

    pub fn capture_mut(&mut self) -> &mut CaptureState {
        &mut self.capture
    }

    pub fn is_input_locked(&self) -> bool {
        self.state != SessionState::AwaitingCandidateInput
    }

    pub fn can_submit(&self) -> bool {
        !self.is_input_locked()
            && (!self.input.trim().is_empty() || !self.capture.heard_so_far().trim().is_empty())
    }

    /// Sample answer to the current scripted question.
    pub fn hint(&self) -> Option<&'static str> {
        match self.mode {
            SessionMode::Scripted => self.script.hint(),
            SessionMode::Assisted(_) => None,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at
            .map(|started_at| started_at.elapsed())
            .unwrap_or_default()
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        if !self.is_input_locked() {
            self.input = text.into();
        }
    }

    pub fn append_input(&mut self, text: &str) {
        if !self.is_input_locked() {
            append_spaced(&mut self.input, text);
        }
    }

    pub async fn toggle_camera(&mut self) -> bool {
        if self.state == SessionState::Ended {
            return false;
        }
        self.capture.toggle_camera().await
    }

    pub fn toggle_microphone(&mut self) -> bool {
        let enabled = !self.capture.microphone_enabled();
        if let Some(heard) = self.capture.set_microphone(enabled) {
            self.take_spoken(&heard);
        }
        enabled
    }

    pub fn start_voice(&mut self) -> Result<(), crate::capture::CaptureError> {
        self.capture.start_voice()
    }

    /// No-op when nothing is being captured.
    pub fn stop_voice(&mut self) {
        if let Some(heard) = self.capture.stop_voice() {
            self.take_spoken(&heard);
        }
    }

    pub fn on_voice_event(&mut self, event: RecognitionEvent) {
        if self.state == SessionState::Ended {
            return;
        }
        if let Some(heard) = self.capture.on_voice_event(event) {
            self.take_spoken(&heard);
        }
    }

    fn take_spoken(&mut self, heard: &str) {
        if !self.is_input_locked() {
            append_spaced(&mut self.input, heard);
        }
    }

    /// Leaves the preview step and asks for the opening line.
    pub fn begin(&mut self) -> Result<PendingTurn, SessionError> {
        match self.state {
            SessionState::Initializing => {}
            SessionState::Ended => return Err(SessionError::Ended),
            _ => return Err(SessionError::AlreadyStarted),
        }

        self.started_at = Some(Instant::now());
        self.capture.show_on(Surface::Main);
        self.state = SessionState::AwaitingInterviewerTurn;
        Ok(self.dispatch(self.pacing.greeting_delay()))
    }

    /// Records the candidate's answer and asks for the interviewer's reply.
    /// Any running voice capture is stopped and its text included.
    pub fn submit(&mut self) -> Result<PendingTurn, SessionError> {
        match self.state {
            SessionState::AwaitingCandidateInput => {}
            SessionState::Initializing => return Err(SessionError::NotStarted),
            SessionState::AwaitingInterviewerTurn | SessionState::Submitting => {
                return Err(SessionError::Busy);
            }
            SessionState::Concluded => return Err(SessionError::Concluded),
            SessionState::Ended => return Err(SessionError::Ended),
        }

        self.stop_voice();

        let answer = self.input.trim();
        if answer.is_empty() {
            return Err(SessionError::EmptyInput);
        }

        let answer = answer.to_owned();
        self.transcript.append(Speaker::Candidate, answer)?;
        self.input.clear();
        self.state = SessionState::Submitting;

        Ok(self.dispatch(self.pacing.reply_delay()))
    }

    fn dispatch(&mut self, delay: Duration) -> PendingTurn {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.in_flight = Some(ticket);

        let source = match &self.mode {
            SessionMode::Assisted(interviewer) => TurnSource::Remote {
                interviewer: Arc::clone(interviewer),
                history: self.transcript.messages().to_vec(),
                context: self.context.clone(),
            },
            SessionMode::Scripted => TurnSource::Scripted { delay },
        };

        PendingTurn { ticket, source }
    }

    /// Applies a resolved turn. Outcomes for an ended session or for a
    /// request that is no longer in flight are dropped. A failed turn with
    /// no script left concludes the session, in assisted mode too.
    pub fn apply(&mut self, outcome: TurnOutcome) -> Applied {
        if self.state == SessionState::Ended || self.in_flight != Some(outcome.ticket) {
            tracing::debug!(ticket = outcome.ticket, "Discarding stale interviewer turn");
            return Applied::Discarded;
        }
        self.in_flight = None;

        let line = match outcome.reply {
            Reply::Remote(Ok(text)) => Some(text),
            Reply::Remote(Err(err)) => {
                tracing::warn!(%err, "Interviewer unavailable, falling back to script");
                self.script.next_line().map(str::to_owned)
            }
            Reply::Scripted => self.script.next_line().map(str::to_owned),
        };

        let Some(line) = line else {
            tracing::info!("Script exhausted");
            self.state = SessionState::Concluded;
            return Applied::Concluded;
        };

        match self.transcript.append(Speaker::Interviewer, line) {
            Ok(message) => {
                let message = message.clone();
                self.state = SessionState::AwaitingCandidateInput;
                Applied::Interviewer(message)
            }
            Err(err) => {
                tracing::error!(%err, "Interviewer turn out of order");
                Applied::Discarded
            }
        }
    }

    /// Ends the interview. Capture devices are released before anything
    /// else; the returned summary goes to the reporting side.
    pub fn end(&mut self) -> Result<SessionSummary, SessionError> {
        if self.state == SessionState::Ended {
            return Err(SessionError::Ended);
        }

        self.capture.release();
        self.state = SessionState::Ended;
        self.in_flight = None;
        self.input.clear();
        tracing::info!(turns = self.transcript.len(), "Session ended");

        Ok(SessionSummary {
            role: self.context.role.clone(),
            language: self.context.language,
            candidate: self.candidate.clone(),
            elapsed_secs: self.elapsed().as_secs(),
            transcript: self.transcript.messages().to_vec(),
        })
    }
}

impl Drop for InterviewSession {
    fn drop(&mut self) {
        self.capture.release();
    }
}

pub fn format_elapsed(elapsed: Duration) -> String {
    let seconds = elapsed.as_secs();
    format!("{:02} : {:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::CaptureError;
    use crate::capture::testing::{MockCamera, MockRecognizer};
    use crate::capture::voice::{SpeechRecognizer, Unsupported};
    use crate::conversation::{Language, PriorDocuments};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replies from a queue; an empty queue means the API is down.
    struct QueuedInterviewer {
        replies: Mutex<VecDeque<Result<String, InterviewerError>>>,
        requests: Mutex<Vec<Vec<ConversationMessage>>>,
    }

    impl QueuedInterviewer {
        fn new(replies: Vec<Result<String, InterviewerError>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into()),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Self::new(Vec::new())
        }

        fn requests(&self) -> Vec<Vec<ConversationMessage>> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Interviewer for QueuedInterviewer {
        async fn respond(
            &self,
            history: &[ConversationMessage],
            _context: &SessionContext,
        ) -> Result<String, InterviewerError> {
            self.requests.lock().unwrap().push(history.to_vec());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(InterviewerError::Empty))
        }
    }

    fn context() -> SessionContext {
        SessionContext {
            role: "Software Engineer".to_string(),
            language: Language::En,
            documents: PriorDocuments::default(),
        }
    }

    fn session_with(
        mode: SessionMode,
        camera: Arc<MockCamera>,
        recognizer: Arc<dyn SpeechRecognizer>,
    ) -> InterviewSession {
        let capture = CaptureState::new(camera, recognizer, Language::En);
        InterviewSession::new(context(), mode, Pacing::IMMEDIATE, capture)
    }

    fn session(mode: SessionMode) -> InterviewSession {
        session_with(mode, MockCamera::new(), MockRecognizer::new())
    }

    fn english_script() -> Vec<&'static str> {
        Script::for_language(Language::En).lines().collect()
    }

    fn interviewer_lines(session: &InterviewSession) -> Vec<String> {
        session
            .messages()
            .iter()
            .filter(|m| m.speaker == Speaker::Interviewer)
            .map(|m| m.text.clone())
            .collect()
    }

    async fn drive(session: &mut InterviewSession, pending: PendingTurn) -> Applied {
        let outcome = pending.resolve().await;
        session.apply(outcome)
    }

    async fn answer(session: &mut InterviewSession, text: &str) -> Applied {
        session.set_input(text);
        let pending = session.submit().unwrap();
        drive(session, pending).await
    }

    fn assert_alternates(session: &InterviewSession) {
        assert!(
            session
                .messages()
                .windows(2)
                .all(|pair| pair[0].speaker != pair[1].speaker)
        );
    }

    #[tokio::test]
    async fn test_scripted_session_starts_with_first_line() {
        let mut session = session(SessionMode::Scripted);
        assert_eq!(session.state(), SessionState::Initializing);

        let pending = session.begin().unwrap();
        assert_eq!(session.state(), SessionState::AwaitingInterviewerTurn);
        assert!(session.is_input_locked());

        let applied = drive(&mut session, pending).await;

        assert!(matches!(applied, Applied::Interviewer(ref m) if m.text == english_script()[0]));
        assert_eq!(session.state(), SessionState::AwaitingCandidateInput);
        assert!(session.hint().is_some());
    }

    #[tokio::test]
    async fn test_assisted_session_uses_remote_lines() {
        let interviewer = QueuedInterviewer::new(vec![
            Ok("Welcome, tell me about yourself.".to_string()),
            Ok("Why this role?".to_string()),
        ]);
        let mut session = session(SessionMode::Assisted(interviewer.clone()));

        let pending = session.begin().unwrap();
        drive(&mut session, pending).await;
        answer(&mut session, "I write Rust.").await;

        assert_eq!(
            interviewer_lines(&session),
            vec!["Welcome, tell me about yourself.", "Why this role?"]
        );
        assert_eq!(session.hint(), None);

        let requests = interviewer.requests();
        assert!(requests[0].is_empty());
        assert_eq!(requests[1].len(), 2);
        assert_eq!(requests[1][1].speaker, Speaker::Candidate);
        assert_eq!(requests[1][1].text, "I write Rust.");
    }

    #[tokio::test]
    async fn test_failing_remote_falls_back_to_script_in_order() {
        let mut session = session(SessionMode::Assisted(QueuedInterviewer::failing()));

        let pending = session.begin().unwrap();
        drive(&mut session, pending).await;
        for reply in ["Yes.", "I am an engineer.", "I like teams."] {
            answer(&mut session, reply).await;
        }

        assert_eq!(interviewer_lines(&session), english_script()[..4].to_vec());
        assert_eq!(session.state(), SessionState::AwaitingCandidateInput);
        assert_alternates(&session);
    }

    #[tokio::test]
    async fn test_fallback_index_ignores_successful_remote_turns() {
        let interviewer = QueuedInterviewer::new(vec![
            Ok("Remote greeting".to_string()),
            Ok("Remote question".to_string()),
            Err(InterviewerError::Malformed("truncated".to_string())),
        ]);
        let mut session = session(SessionMode::Assisted(interviewer));

        let pending = session.begin().unwrap();
        drive(&mut session, pending).await;
        answer(&mut session, "One").await;
        answer(&mut session, "Two").await;

        assert_eq!(
            interviewer_lines(&session),
            vec!["Remote greeting", "Remote question", english_script()[0]]
        );
    }

    #[tokio::test]
    async fn test_scripted_session_concludes_when_script_runs_out() {
        let mut session = session(SessionMode::Scripted);
        let pending = session.begin().unwrap();
        drive(&mut session, pending).await;

        let script_len = english_script().len();
        for turn in 1..script_len {
            let applied = answer(&mut session, &format!("answer {turn}")).await;
            assert!(matches!(applied, Applied::Interviewer(_)));
        }
        assert_eq!(answer(&mut session, "last answer").await, Applied::Concluded);

        assert_eq!(session.state(), SessionState::Concluded);
        assert_eq!(interviewer_lines(&session).len(), script_len);
        session.set_input("more");
        assert_eq!(session.submit().err(), Some(SessionError::Concluded));
        assert_alternates(&session);
    }

    #[tokio::test]
    async fn test_assisted_session_concludes_when_fallback_runs_out() {
        let mut session = session(SessionMode::Assisted(QueuedInterviewer::failing()));
        let pending = session.begin().unwrap();
        drive(&mut session, pending).await;

        for turn in 1..english_script().len() {
            answer(&mut session, &format!("answer {turn}")).await;
        }
        assert_eq!(answer(&mut session, "last answer").await, Applied::Concluded);

        assert_eq!(session.state(), SessionState::Concluded);
        assert!(session.is_input_locked());
        assert!(session.end().is_ok());
    }

    #[tokio::test]
    async fn test_submission_while_in_flight_is_rejected() {
        let mut session = session(SessionMode::Scripted);
        let pending = session.begin().unwrap();
        drive(&mut session, pending).await;

        session.set_input("First answer");
        let pending = session.submit().unwrap();
        assert!(!session.can_submit());

        session.set_input("Second answer");
        assert_eq!(session.submit().err(), Some(SessionError::Busy));
        assert_eq!(session.input(), "");

        drive(&mut session, pending).await;
        assert_eq!(
            session
                .messages()
                .iter()
                .filter(|m| m.speaker == Speaker::Candidate)
                .count(),
            1
        );
    }

    #[tokio::test]
    async fn test_empty_input_cannot_be_submitted() {
        let mut session = session(SessionMode::Scripted);
        let pending = session.begin().unwrap();
        drive(&mut session, pending).await;

        session.set_input("   ");
        assert!(!session.can_submit());
        assert_eq!(session.submit().err(), Some(SessionError::EmptyInput));
        assert_eq!(session.state(), SessionState::AwaitingCandidateInput);
    }

    #[tokio::test]
    async fn test_submit_before_start_is_rejected() {
        let mut session = session(SessionMode::Scripted);
        session.set_input("Hello");
        assert_eq!(session.submit().err(), Some(SessionError::NotStarted));
        assert!(session.begin().is_ok());
        assert_eq!(session.begin().err(), Some(SessionError::AlreadyStarted));
    }

    #[tokio::test]
    async fn test_response_after_end_is_discarded() {
        let interviewer = QueuedInterviewer::new(vec![Ok("Late greeting".to_string())]);
        let mut session = session(SessionMode::Assisted(interviewer));

        let pending = session.begin().unwrap();
        let summary = session.end().unwrap();
        let applied = drive(&mut session, pending).await;

        assert_eq!(applied, Applied::Discarded);
        assert_eq!(session.state(), SessionState::Ended);
        assert!(session.messages().is_empty());
        assert!(summary.transcript.is_empty());
        assert_eq!(session.end().err(), Some(SessionError::Ended));
    }

    #[tokio::test]
    async fn test_outcome_is_applied_only_once() {
        let mut session = session(SessionMode::Scripted);
        let pending = session.begin().unwrap();
        let outcome = pending.resolve().await;
        let duplicate = TurnOutcome {
            ticket: outcome.ticket,
            reply: Reply::Scripted,
        };

        assert!(matches!(session.apply(outcome), Applied::Interviewer(_)));
        assert_eq!(session.apply(duplicate), Applied::Discarded);
        assert_eq!(session.messages().len(), 1);
    }

    #[tokio::test]
    async fn test_voice_transcript_joins_typed_text() {
        let recognizer = MockRecognizer::new();
        let mut session = session_with(SessionMode::Scripted, MockCamera::new(), recognizer);
        let pending = session.begin().unwrap();
        drive(&mut session, pending).await;

        session.set_input("I think");
        session.toggle_microphone();
        session.start_voice().unwrap();
        session.on_voice_event(RecognitionEvent::Result {
            transcript: "teamwork matters".to_string(),
            is_final: true,
        });
        session.on_voice_event(RecognitionEvent::End);

        assert_eq!(session.input(), "I think teamwork matters");
    }

    #[tokio::test]
    async fn test_submit_flushes_running_voice_capture() {
        let mut session = session(SessionMode::Scripted);
        let pending = session.begin().unwrap();
        drive(&mut session, pending).await;

        session.toggle_microphone();
        session.start_voice().unwrap();
        session.on_voice_event(RecognitionEvent::Result {
            transcript: "Spoken answer".to_string(),
            is_final: true,
        });
        assert!(session.can_submit());

        let pending = session.submit().unwrap();
        drive(&mut session, pending).await;

        assert_eq!(session.messages()[1].text, "Spoken answer");
        assert!(!session.capture().is_capturing_voice());
        assert_eq!(session.input(), "");
    }

    #[tokio::test]
    async fn test_listening_with_nothing_heard_cannot_submit() {
        let mut session = session(SessionMode::Scripted);
        let pending = session.begin().unwrap();
        drive(&mut session, pending).await;

        session.toggle_microphone();
        session.start_voice().unwrap();
        assert!(!session.can_submit());

        session.on_voice_event(RecognitionEvent::Result {
            transcript: "half a".to_string(),
            is_final: false,
        });
        assert!(!session.can_submit());

        session.on_voice_event(RecognitionEvent::Result {
            transcript: "half an answer".to_string(),
            is_final: true,
        });
        assert!(session.can_submit());
    }

    #[tokio::test]
    async fn test_voice_heard_while_waiting_is_dropped() {
        let mut session = session(SessionMode::Scripted);
        let pending = session.begin().unwrap();
        drive(&mut session, pending).await;

        session.set_input("First answer");
        let pending = session.submit().unwrap();
        assert_eq!(session.state(), SessionState::Submitting);

        session.toggle_microphone();
        session.start_voice().unwrap();
        session.on_voice_event(RecognitionEvent::Result {
            transcript: "said too early".to_string(),
            is_final: true,
        });
        session.on_voice_event(RecognitionEvent::End);
        assert_eq!(session.input(), "");

        drive(&mut session, pending).await;
        assert_eq!(session.input(), "");
        assert_eq!(session.messages()[1].text, "First answer");
    }

    #[tokio::test]
    async fn test_stopping_voice_twice_is_harmless() {
        let mut session = session(SessionMode::Scripted);
        session.toggle_microphone();
        session.start_voice().unwrap();

        session.stop_voice();
        session.stop_voice();

        assert!(!session.capture().is_capturing_voice());
    }

    #[tokio::test]
    async fn test_unsupported_voice_leaves_text_input_working() {
        let mut session = session_with(
            SessionMode::Scripted,
            MockCamera::new(),
            Arc::new(Unsupported),
        );
        let pending = session.begin().unwrap();
        drive(&mut session, pending).await;

        session.toggle_microphone();
        assert!(matches!(session.start_voice(), Err(CaptureError::Unsupported)));
        assert!(session.capture().voice_notice().is_some());

        let applied = answer(&mut session, "Typed instead").await;

        assert!(matches!(applied, Applied::Interviewer(_)));
        assert_eq!(session.messages()[1].text, "Typed instead");
    }

    #[tokio::test]
    async fn test_disabling_camera_leaves_no_live_tracks() {
        let camera = MockCamera::new();
        let mut session = session_with(SessionMode::Scripted, camera.clone(), MockRecognizer::new());

        assert!(session.toggle_camera().await);
        assert_eq!(camera.live_tracks(), 1);

        assert!(!session.toggle_camera().await);
        assert_eq!(camera.live_tracks(), 0);
        assert!(!session.capture().camera_enabled());
    }

    #[tokio::test]
    async fn test_end_and_drop_release_the_camera() {
        let camera = MockCamera::new();
        let mut session = session_with(SessionMode::Scripted, camera.clone(), MockRecognizer::new());
        session.toggle_camera().await;
        session.end().unwrap();
        assert_eq!(camera.live_tracks(), 0);
        assert!(!session.toggle_camera().await);

        let camera = MockCamera::new();
        {
            let mut session =
                session_with(SessionMode::Scripted, camera.clone(), MockRecognizer::new());
            session.toggle_camera().await;
            assert_eq!(camera.live_tracks(), 1);
        }
        assert_eq!(camera.live_tracks(), 0);
    }

    #[tokio::test]
    async fn test_summary_carries_transcript_and_candidate() {
        let candidate = UserProfile {
            id: "1".to_string(),
            email: "ada@example.com".to_string(),
            name: "Ada".to_string(),
            picture: None,
        };
        let mut session = session(SessionMode::Scripted).with_candidate(Some(candidate.clone()));
        let pending = session.begin().unwrap();
        drive(&mut session, pending).await;
        answer(&mut session, "Ready").await;

        let summary = session.end().unwrap();

        assert_eq!(summary.role, "Software Engineer");
        assert_eq!(summary.candidate, Some(candidate));
        assert_eq!(summary.transcript.len(), 3);
        assert_eq!(summary.transcript[1].text, "Ready");
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::from_secs(252)), "04 : 12");
        assert_eq!(format_elapsed(Duration::ZERO), "00 : 00");
    }
}
