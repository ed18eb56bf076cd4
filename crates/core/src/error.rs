/// Failures that end an interview session.
#[derive(Debug, thiserror::Error)]
pub enum InterviewError {
    #[error("Input stream closed while waiting for {0}")]
    InputClosed(&'static str),
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Dialogue service failed: {0:#}")]
    Service(anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interview_error_display() {
        assert_eq!(
            InterviewError::InputClosed("the job title").to_string(),
            "Input stream closed while waiting for the job title"
        );

        let service = InterviewError::Service(
            anyhow::anyhow!("quota exceeded").context("streaming reply for round 2"),
        );
        assert_eq!(
            service.to_string(),
            "Dialogue service failed: streaming reply for round 2: quota exceeded"
        );
    }
}
