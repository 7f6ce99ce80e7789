pub mod catalog;
pub mod collate;
pub mod order_store;
pub mod phrase;
pub mod rate;
pub mod view;
