pub mod clean_abstract;
pub mod load;
pub mod merge;
pub mod segment;
