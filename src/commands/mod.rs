pub mod download;
pub mod plot;
pub mod run;
