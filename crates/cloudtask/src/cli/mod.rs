pub mod commands;
pub mod init;
pub mod interactive;
