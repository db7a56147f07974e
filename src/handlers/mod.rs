pub mod history;
pub mod vacancy;
