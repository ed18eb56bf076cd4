//! Session wiring shared by the binary: run one interview over a terminal and
//! turn its outcome into a process exit status.

use interview_core::{InterviewSession, llm_client::DialogueService, terminal::Terminal};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::error;

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;

/// Bootstraps a session from the terminal and runs all of its rounds.
pub async fn run_session<R, W>(
    service: &dyn DialogueService,
    terminal: &mut Terminal<R, W>,
    rounds: u32,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut session = InterviewSession::bootstrap(terminal, rounds).await?;
    session.run_rounds(service, terminal).await?;
    Ok(())
}

/// Maps a session outcome to an exit status. Failures are logged and printed
/// to `stderr` as `Error: <description>`.
pub fn report_outcome(outcome: &anyhow::Result<()>, stderr: &mut impl Write) -> u8 {
    match outcome {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            error!(error = ?e, "Interview session failed");
            let _ = writeln!(stderr, "Error: {:#}", e);
            EXIT_FAILURE
        }
    }
}
