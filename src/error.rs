use thiserror::Error;

macro_rules! graph_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::GraphError {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::GraphError {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// The library separates three outcomes that callers usually want to tell apart:
///
/// - **Misuse** of an API (a vertex that was never added, an arrow index past the
///   end of an adjacency list) is reported as an `Err` at the call site.
/// - **"Nothing found"** (no path between two vertices) is *not* an error for the
///   single-pair searches, which return `Ok(None)`.
/// - **Waypoint chaining**, which must either produce a complete route or fail
///   explicitly, reports an unreachable leg as [`Error::NoPath`].
///
/// # Error Categories
///
/// ## Precondition Violations
/// - [`Error::VertexNotFound`] - A vertex that is not part of the graph was supplied
/// - [`Error::VertexIndexOutOfBounds`] - A dense vertex index past the vertex count
/// - [`Error::ArrowIndexOutOfBounds`] - An arrow slot past a vertex's arrow count
///
/// ## Search Failures
/// - [`Error::NoPath`] - A required leg of a waypoint route could not be connected
///
/// ## Internal Errors
/// - [`Error::GraphError`] - Structural inconsistency detected inside a graph
///
/// # Examples
///
/// ```rust
/// use digraph::{DirectedGraphBuilder, Error};
///
/// let mut builder: DirectedGraphBuilder<&str, ()> = DirectedGraphBuilder::new();
/// builder.add_vertex("A");
///
/// match builder.add_arrow("A", "B", ()) {
///     Err(Error::VertexNotFound(name)) => assert_eq!(name, "\"B\""),
///     other => panic!("unexpected result: {other:?}"),
/// }
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A vertex passed to a builder or search is not part of the graph.
    ///
    /// The payload is the `Debug` rendering of the offending vertex.
    #[error("vertex not in graph: {0}")]
    VertexNotFound(String),

    /// A dense vertex index is outside `0..count`.
    #[error("vertex index {index} is out of bounds for a graph with {count} vertices")]
    VertexIndexOutOfBounds {
        /// The index that was supplied
        index: usize,
        /// The number of vertices in the graph
        count: usize,
    },

    /// An arrow slot index is outside the outgoing arrows of a vertex.
    #[error("arrow index {index} is out of bounds for vertex {vertex} with {count} arrows")]
    ArrowIndexOutOfBounds {
        /// The vertex whose adjacency list was addressed
        vertex: String,
        /// The slot index that was supplied
        index: usize,
        /// The number of outgoing arrows of the vertex
        count: usize,
    },

    /// A route over waypoints could not be built.
    ///
    /// Only the waypoint APIs use this variant. Single-pair searches report
    /// an unreachable goal as `Ok(None)` instead.
    #[error("no path: {message}")]
    NoPath {
        /// Description of the leg that could not be connected
        message: String,
    },

    /// An internal structure was found in an inconsistent state.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of the inconsistency
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Graph error - {file}:{line}: {message}")]
    GraphError {
        /// The message to be printed for the GraphError error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },
}

impl Error {
    /// Builds a [`Error::VertexNotFound`] from any debuggable vertex.
    pub(crate) fn vertex_not_found<V: std::fmt::Debug + ?Sized>(vertex: &V) -> Self {
        Error::VertexNotFound(format!("{vertex:?}"))
    }
}
