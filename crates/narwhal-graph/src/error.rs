pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("invalid id {id:?}: {reason}")]
    InvalidId { id: String, reason: String },

    #[error("graph already contains a vertex with id {id:?}")]
    DuplicateVertex { id: String },

    #[error("vertex {vertex:?} already has a port with id {port:?}")]
    DuplicatePort { vertex: String, port: String },

    #[error("edge references unknown vertex {vertex:?}")]
    UnknownVertex { vertex: String },

    #[error("vertex {vertex:?} has no port {port:?}")]
    UnknownPort { vertex: String, port: String },

    #[error("unsupported cardinal direction: {value:?}")]
    UnsupportedDirection { value: String },

    #[error("port percentage must be within [0, 100], got {value}")]
    PercentageOutOfRange { value: f64 },
}
