pub mod browser;
pub mod config;
pub mod defaults;
pub mod diagnostics;
pub mod edit;
pub mod model;
pub mod output;
pub mod presets;
pub mod resolve;
pub mod session;
pub mod source;
pub mod store;
pub mod transfer;
pub mod view;
pub mod visibility;
