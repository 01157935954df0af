pub mod charts;
pub mod config;
pub mod error;
pub mod filter_state;
pub mod form;
pub mod numeric_input;
pub mod search;
pub mod storage;
pub mod theme;
