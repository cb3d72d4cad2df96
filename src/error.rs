use thiserror::Error;

/// Errors raised by the queue, the search engine, the strategies and the
/// game state they drive.
///
/// Vertices are rendered with their `Debug` representation so that one error
/// type serves every vertex type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("element is already present in the queue")]
    DuplicateElement,

    #[error("queue is empty")]
    EmptyQueue,

    #[error("element is not present in the queue")]
    NotFound,

    #[error("vertex {vertex} is not reachable from the source")]
    Unreachable { vertex: String },

    #[error("vertex {to} is not adjacent to {from}")]
    NotAdjacent { from: String, to: String },

    #[error("move costs {cost} steps but only {remaining} remain")]
    BudgetExceeded { cost: u32, remaining: u32 },

    #[error("explored the whole reachable region without finding the target")]
    TargetUnreachable,

    #[error("no open tile at row {row}, column {col}")]
    NoOpenTile { row: usize, col: usize },

    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn unreachable<V: std::fmt::Debug>(vertex: &V) -> Error {
        Error::Unreachable {
            vertex: format!("{:?}", vertex),
        }
    }

    pub fn parse(line: usize, reason: impl Into<String>) -> Error {
        Error::Parse {
            line,
            reason: reason.into(),
        }
    }

    pub fn not_adjacent<V: std::fmt::Debug>(from: &V, to: &V) -> Error {
        Error::NotAdjacent {
            from: format!("{:?}", from),
            to: format!("{:?}", to),
        }
    }
}
