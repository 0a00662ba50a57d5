pub mod compose;
pub mod contacts;
pub mod run;
