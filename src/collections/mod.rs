//! Collections the algorithms are built on.
//!
//! They are independent concrete types, each offering exactly what its callers need:
//! a bounded LIFO stack and a bounded min-heap with decrease-key.
mod heap;
pub use self::heap::*;
mod stack;
pub use self::stack::*;
