mod adjacency;
mod decomposition;

pub use adjacency::Adjacency;
pub use decomposition::Decomposition;
