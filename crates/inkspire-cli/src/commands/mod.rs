pub mod classify;
pub mod generate;
pub mod init;
pub mod styles;
