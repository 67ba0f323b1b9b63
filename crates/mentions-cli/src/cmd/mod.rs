pub mod candidates;
pub mod comments;
pub mod completions;
pub mod mentions;
pub mod replay;
