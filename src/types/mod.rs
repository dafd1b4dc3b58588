pub mod pagination;
pub mod quiz;
pub mod response;
pub mod submission;
