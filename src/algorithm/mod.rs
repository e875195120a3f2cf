//! Graph algorithms
mod shortest_path;
pub use self::shortest_path::*;
mod strongly_connected;
pub use self::strongly_connected::*;
mod eulerian;
pub use self::eulerian::*;
