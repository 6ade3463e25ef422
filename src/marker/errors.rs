use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarkerError {
    #[error("marker region '{id}' not found")]
    RegionNotFound { id: String },

    #[error("marker region '{id}' has a begin marker but no matching end marker")]
    UnterminatedRegion { id: String },
}
