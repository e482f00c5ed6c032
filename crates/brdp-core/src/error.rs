use thiserror::Error;

/// Errors produced by the brdp core and gateway layers.
#[derive(Debug, Error)]
pub enum BrdpError {
    #[error("gateway error ({status}): {reason}")]
    Gateway { status: u16, reason: String },

    #[error("ambiguous request; matching targets: {0}")]
    AmbiguousTarget(usize),

    #[error("no matching {0}")]
    WrongTargetType(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type BrdpResult<T> = Result<T, BrdpError>;
