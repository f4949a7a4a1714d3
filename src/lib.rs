pub mod cli;
pub mod config;
pub mod directory;
pub mod document;
pub mod error;
pub mod job;
pub mod logging;
pub mod mailer;
pub mod package;
pub mod report;
pub mod splitter;
