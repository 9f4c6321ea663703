use std::process::ExitCode;

/// Outcome of a command: an exit status plus an optional message for stderr.
#[derive(Debug)]
pub struct Exit {
    code: u8,
    message: Option<String>,
}

impl Exit {
    pub fn success() -> Self {
        Self {
            code: 0,
            message: None,
        }
    }

    /// The template did not compile, or rendering failed for a reason other
    /// than not-found.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            code: 1,
            message: Some(message.into()),
        }
    }

    /// Rendering asked for a 404.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            code: 2,
            message: Some(message.into()),
        }
    }

    pub fn report(self) -> ExitCode {
        if let Some(message) = &self.message {
            eprintln!("{message}");
        }
        ExitCode::from(self.code)
    }
}
