use thiserror::Error;

/// Failures while bringing up or talking to a test backend.
#[derive(Debug, Error)]
pub enum TestInfraError {
    #[error("failed to manage test container: {0}")]
    Container(#[from] testcontainers::TestcontainersError),

    #[error("failed to reach test redis: {0}")]
    Redis(#[from] redis::RedisError),
}

pub type Result<T> = std::result::Result<T, TestInfraError>;
