use crate::logger::Logger;

/// Errors surfaced by the cookie accessors and the cookie-backed state.
#[derive(Debug, thiserror::Error)]
pub enum CookieError {
    /// A hook rendered outside of a `CookiesInServer` provider.
    #[error("Provider missing! Render this component inside a CookiesInServer provider")]
    ProviderMissing,

    /// The serialized cookie text is malformed. Never recovered from locally.
    #[error("Cannot decode cookie value: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Cannot encode cookie value: {0}")]
    Encode(#[source] serde_json::Error),

    /// The client store backend failed.
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// Logs `error` at error level and hands it back, so misconfiguration shows up
/// in the log even when the caller swallows the `Err`.
pub fn user_error(logger: &dyn Logger, error: CookieError) -> CookieError {
    logger.error(&error.to_string());
    error
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::RecordingLogger;
    use log::Level;

    #[test]
    fn user_error_logs_and_returns_the_error() {
        let logger = RecordingLogger::new();
        let err = user_error(&logger, CookieError::ProviderMissing);

        assert!(matches!(err, CookieError::ProviderMissing));
        assert_eq!(logger.count(Level::Error), 1);
        assert!(logger.messages(Level::Error)[0].contains("Provider missing"));
    }

    #[test]
    fn store_errors_are_transparent() {
        let err: CookieError = anyhow::anyhow!("disk full").into();
        assert_eq!(err.to_string(), "disk full");
    }
}
