/// Built-in rule book of the ape collection
pub mod collection;
/// Step-by-step layer compositor
pub mod compositor;
/// Conflict rule model and rule book
pub mod rules;

pub use compositor::{Composition, Compositor};
pub use rules::RuleBook;
