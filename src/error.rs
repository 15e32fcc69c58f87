pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unsupported feature {feature}")]
    UnsupportedFeature { feature: String },

    #[error("invalid argument {value}: {reason}")]
    InvalidArgument { value: String, reason: String },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error("miscellaneous/internal error: {0}")]
    Other(#[from] OtherError),
}

impl Error {
    pub fn invalid_argument<V: Into<String>, R: Into<String>>(value: V, reason: R) -> Self {
        Self::InvalidArgument {
            value: value.into(),
            reason: reason.into(),
        }
    }
}

impl From<curl::Error> for Error {
    fn from(value: curl::Error) -> Self {
        if value.is_couldnt_connect() {
            Self::Network(NetworkError::Connect(Box::new(value)))
        } else if value.is_couldnt_resolve_host() || value.is_couldnt_resolve_proxy() {
            Self::Network(NetworkError::Dns(Box::new(value)))
        } else if value.is_ssl_connect_error()
            || value.is_ssl_certproblem()
            || value.is_peer_failed_verification()
            || value.is_ssl_issuer_error()
        {
            Self::Protocol(ProtocolError::TlsVerification(Box::new(value)))
        } else if value.is_operation_timedout() {
            Self::Network(NetworkError::TimedOut(Box::new(value)))
        } else if value.is_recv_error() || value.is_send_error() || value.is_got_nothing() {
            Self::Network(NetworkError::Disconnected(Box::new(value)))
        } else {
            Self::Other(OtherError::from(value))
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub struct ParseError {
    reason: String,
    #[source]
    source: Option<BoxedError>,
}

impl ParseError {
    pub fn new<S: Into<String>>(reason: S) -> Self {
        Self {
            reason: reason.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: BoxedError) -> Self {
        self.source = Some(source);
        self
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "parse error: {}", self.reason)?;

        // The detail ends up in user-facing diagnostics, so carry the cause along.
        if let Some(source) = &self.source {
            write!(f, " ({})", source)?;
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ProtocolError {
    #[error("protocol response error: {0}")]
    InvalidResponse(BoxedError),

    #[error("TLS verification error: {0}")]
    TlsVerification(BoxedError),
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum NetworkError {
    #[error("connection error: {0}")]
    Connect(BoxedError),

    #[error("DNS resolution error: {0}")]
    Dns(BoxedError),

    #[error("network operation timed out: {0}")]
    TimedOut(BoxedError),

    #[error("connection disconnected: {0}")]
    Disconnected(BoxedError),
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum OtherError {
    #[error(transparent)]
    Curl(#[from] curl::Error),

    #[error(transparent)]
    Custom(#[from] BoxedError),
}
