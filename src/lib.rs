pub mod assessor;
pub mod banner;
pub mod commands;
pub mod config;
pub mod consts;
pub mod error;
pub mod events;
pub mod form;
pub mod session;
pub mod store;
pub mod trigger;
pub mod view;
