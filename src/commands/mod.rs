mod compare;

pub use compare::{run_compare, CompareArgs};
