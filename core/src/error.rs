use thiserror::Error;

// Failures a generation run can report. Geometric degeneracy is tolerated, never raised.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("planar partition failed for {sites} seed points")]
    Partition { sites: usize },

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),
}
