//! Domain atoms for the Petskub backend: record shapes as the hosted
//! database returns them, submission rules for the public forms, and the
//! article body parser. Nothing in here performs I/O.

pub mod articles;
pub mod forum;
pub mod markup;
pub mod media;
pub mod pets;
pub mod reports;
pub mod validation;
