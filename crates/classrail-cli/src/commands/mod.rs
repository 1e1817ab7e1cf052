pub mod cards;
pub mod config;
pub mod logout;
pub mod run;
