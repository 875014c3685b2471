//! Runtime execution for Monkey programs using tree-walking evaluation

mod evaluator;
mod object;

pub use evaluator::{Evaluator, Node};
pub use object::{Object, ObjectType, FALSE, NULL, TRUE};
