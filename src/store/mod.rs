pub mod catalog;
pub mod process_model;
pub mod supplier_history;
