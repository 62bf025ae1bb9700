pub mod inspect;
pub mod report;
