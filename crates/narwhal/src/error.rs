pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Graph(#[from] narwhal_graph::Error),

    #[error("graph has no edge at index {edge_index}")]
    UnknownEdge { edge_index: usize },

    #[error("edge {edge_index} has a missing endpoint vertex: {vertex}")]
    MissingEndpoint { edge_index: usize, vertex: String },

    #[error("vertex {vertex} has a non-finite position")]
    NonFinitePosition { vertex: String },

    #[error("spring force on edge {edge_index} left a vertex at a non-finite position")]
    NonFiniteDisplacement { edge_index: usize },

    #[error("invalid layout options: {message}")]
    InvalidOptions { message: String },

    #[error("layout did not converge within {passes} passes")]
    DidNotConverge { passes: usize },
}
