//! Interview Session
//!
//! Bootstraps a mock interview for a job title and drives the fixed number of
//! applicant/interviewer rounds against a `DialogueService`.
//!
//! Phases move `AwaitingRole -> AwaitingApplicantInput -> AwaitingServiceReply`
//! and back, once per round, ending in `Complete`. A round's two turns are
//! committed together after the reply stream is fully drained, so a failed
//! round never leaves a partial exchange in the transcript.

use crate::{
    error::InterviewError,
    llm_client::{ChatContext, DialogueService, StreamedReply},
    terminal::Terminal,
    transcript::{Transcript, Turn},
};
use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::{debug, info, instrument};

/// Number of rounds when nothing else is configured.
pub const DEFAULT_ROUNDS: u32 = 6;

pub const ROLE_PROMPT: &str = "\nWhat position are you interviewing for? ";
pub const APPLICANT_PROMPT: &str = "\n[applicant] ";
pub const OPENING_QUESTION: &str = "Tell me about yourself.";
pub const COMPLETION_MESSAGE: &str = "\nInterview session complete. Thank you for practicing!";

const INSTRUCTION_TEMPLATE: &str = include_str!("../prompts/interviewer_instruction.md");

/// Immutable parameters of one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Free-form role text as typed by the user; never validated.
    pub job_title: String,
    pub rounds: u32,
}

impl SessionConfig {
    pub fn new(job_title: impl Into<String>) -> Self {
        Self {
            job_title: job_title.into(),
            rounds: DEFAULT_ROUNDS,
        }
    }

    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds;
        self
    }
}

/// Where the session currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingRole,
    AwaitingApplicantInput,
    AwaitingServiceReply,
    Complete,
}

/// Builds the instruction handed once to the dialogue service.
pub fn interviewer_instruction(job_title: &str) -> String {
    INSTRUCTION_TEMPLATE.trim().replace("{job_title}", job_title)
}

/// Builds the two seed turns: the applicant's context and the opening question.
pub fn seed_transcript(job_title: &str) -> Transcript {
    let mut transcript = Transcript::new();
    transcript.push(Turn::applicant(&format!(
        "I am preparing for a {} job interview. Can you help me practice?",
        job_title
    )));
    transcript.push(Turn::interviewer(OPENING_QUESTION));
    transcript
}

pub struct InterviewSession {
    config: SessionConfig,
    instruction: String,
    transcript: Transcript,
    phase: Phase,
}

impl InterviewSession {
    /// Creates a session with its instruction and seed transcript in place.
    pub fn new(config: SessionConfig) -> Self {
        let instruction = interviewer_instruction(&config.job_title);
        let transcript = seed_transcript(&config.job_title);
        Self {
            config,
            instruction,
            transcript,
            phase: Phase::AwaitingApplicantInput,
        }
    }

    /// A session that has not been told its role yet. The transcript stays
    /// empty until `read_role` succeeds.
    fn awaiting_role(rounds: u32) -> Self {
        Self {
            config: SessionConfig::new("").with_rounds(rounds),
            instruction: String::new(),
            transcript: Transcript::new(),
            phase: Phase::AwaitingRole,
        }
    }

    /// Reads the job title, then fills in the instruction and seed transcript
    /// and shows the opening question.
    async fn read_role<R, W>(&mut self, terminal: &mut Terminal<R, W>) -> Result<(), InterviewError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        debug!(phase = ?self.phase, "Waiting for the job title");
        let job_title = terminal.prompt(ROLE_PROMPT, "the job title").await?;

        *self = Self::new(SessionConfig::new(job_title).with_rounds(self.config.rounds));
        info!(job_title = %self.config.job_title, rounds = self.config.rounds, "Interview session bootstrapped");

        let opening = self
            .transcript
            .last()
            .map(|turn| turn.text().to_string())
            .unwrap_or_default();
        terminal.say(&format!("\n{}", opening)).await?;
        Ok(())
    }

    /// Asks for the job title, builds the session and shows the opening
    /// question so the visible conversation starts in sync with the transcript.
    pub async fn bootstrap<R, W>(
        terminal: &mut Terminal<R, W>,
        rounds: u32,
    ) -> Result<Self, InterviewError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut session = Self::awaiting_role(rounds);
        session.read_role(terminal).await?;
        Ok(session)
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Runs every configured round, then prints the completion message.
    ///
    /// Errors are not caught here: the first failing round ends the session
    /// and the error is returned to the caller.
    pub async fn run_rounds<R, W>(
        &mut self,
        service: &dyn DialogueService,
        terminal: &mut Terminal<R, W>,
    ) -> Result<(), InterviewError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        for round in 1..=self.config.rounds {
            self.run_round(round, service, terminal).await?;
        }

        terminal.say(COMPLETION_MESSAGE).await?;
        self.phase = Phase::Complete;
        info!(turns = self.transcript.len(), "Interview session complete");
        Ok(())
    }

    /// One applicant/interviewer exchange.
    #[instrument(name = "round", skip_all, fields(round = round))]
    pub async fn run_round<R, W>(
        &mut self,
        round: u32,
        service: &dyn DialogueService,
        terminal: &mut Terminal<R, W>,
    ) -> Result<(), InterviewError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        self.phase = Phase::AwaitingApplicantInput;
        let answer = terminal
            .prompt(APPLICANT_PROMPT, "the applicant's answer")
            .await?;
        let applicant = Turn::applicant(&answer);

        self.phase = Phase::AwaitingServiceReply;
        let chat = ChatContext::start(self.instruction.clone(), self.transcript.to_contents());
        let stream = service
            .send_message_stream(chat, applicant.to_content())
            .await
            .map_err(InterviewError::Service)?;
        let reply = StreamedReply::collect(stream)
            .await
            .map_err(InterviewError::Service)?;
        debug!(fragments = reply.fragments(), "Reply stream drained");

        let question = reply.finish();
        if question.is_empty() {
            debug!("Dialogue service returned an empty reply");
        }
        let interviewer = Turn::interviewer(&question);
        let printed = format!("\n{}", interviewer.text());

        self.transcript.push(applicant);
        self.transcript.push(interviewer);
        self.phase = Phase::AwaitingApplicantInput;

        terminal.say(&printed).await?;
        info!(turns = self.transcript.len(), "Round complete");
        Ok(())
    }
}
