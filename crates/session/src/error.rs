use thiserror::Error;

/// Failure of the persisted key-value store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("store io error: {0}")]
    Io(String),

    #[error("store serialization error: {0}")]
    Serialization(String),

    /// Internal lock poisoning.
    #[error("store lock poisoned")]
    Poisoned,
}

/// Credential exchange failed. The only session error meant for end users.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthenticationError {
    #[error("email and password are required")]
    MissingCredentials,

    /// The backend refused the credentials; carries its message.
    #[error("{0}")]
    Rejected(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("malformed login reply: {0}")]
    MalformedReply(String),

    #[error("could not persist session: {0}")]
    Store(#[from] StoreError),
}

/// Problems reading the persisted session. Never surfaced to the UI; the
/// holder logs them and falls back to "not authenticated".
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionStateError {
    #[error("corrupted session state: {0}")]
    CorruptedSessionState(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}
