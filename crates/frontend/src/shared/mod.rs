pub mod charts;
pub mod config;
pub mod dom;
pub mod dom_form;
pub mod filter_persistence;
pub mod form_validation;
pub mod storage;
pub mod table_search;
pub mod theme;
