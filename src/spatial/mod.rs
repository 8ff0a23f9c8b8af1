mod quadtree;
mod barnes_hut;
mod tree_builder;

pub use quadtree::*;
pub use barnes_hut::*;
pub use tree_builder::*;

#[cfg(test)]
mod quadtree_tests;
