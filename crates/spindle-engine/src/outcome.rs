use crate::EngineError;

/// Result of an orchestration that may stop at a confirmation prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow<T> {
    Completed(T),
    /// The user declined a confirmation; nothing further was done.
    Aborted,
}

impl<T> Flow<T> {
    pub const fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted)
    }
}

/// What the command line reports back to the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitOutcome {
    Success,
    UserAborted,
    Failure(String),
}

impl ExitOutcome {
    /// Process exit status: 0 on success, 2 when the user aborted, 1 otherwise.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Success => 0,
            Self::Failure(_) => 1,
            Self::UserAborted => 2,
        }
    }
}

impl<T> From<Result<Flow<T>, EngineError>> for ExitOutcome {
    fn from(result: Result<Flow<T>, EngineError>) -> Self {
        match result {
            Ok(Flow::Completed(_)) => Self::Success,
            Ok(Flow::Aborted) => Self::UserAborted,
            Err(e) => Self::Failure(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_distinguish_abort_from_failure() {
        assert_eq!(ExitOutcome::Success.exit_code(), 0);
        assert_eq!(ExitOutcome::Failure("boom".into()).exit_code(), 1);
        assert_eq!(ExitOutcome::UserAborted.exit_code(), 2);
    }

    #[test]
    fn converts_from_engine_results() {
        let done: Result<Flow<()>, EngineError> = Ok(Flow::Completed(()));
        let aborted: Result<Flow<()>, EngineError> = Ok(Flow::Aborted);
        let failed: Result<Flow<()>, EngineError> =
            Err(EngineError::Validation("no commits".into()));

        assert_eq!(ExitOutcome::from(done), ExitOutcome::Success);
        assert_eq!(ExitOutcome::from(aborted), ExitOutcome::UserAborted);
        assert_eq!(
            ExitOutcome::from(failed),
            ExitOutcome::Failure("no commits".into())
        );
    }
}
