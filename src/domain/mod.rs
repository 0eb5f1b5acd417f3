pub mod post;
pub mod submission;
