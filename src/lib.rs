pub mod cli;
pub mod error;
pub mod hash;
pub mod list_shortcuts;
pub mod model;
pub mod onchain;
pub mod quoter;
pub mod run;
pub mod shortcuts;
pub mod weiroll;
