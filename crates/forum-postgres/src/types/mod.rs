//! Named database constraints and their categories.

mod constraint;

pub use constraint::{
    AccountConstraints, CommentConstraints, ConstraintCategory, ConstraintViolation,
    PostConstraints,
};
