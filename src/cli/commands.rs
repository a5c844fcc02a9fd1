//! # Commands Module / 命令模块
//!
//! One module per CLI action. The `all` action chains the others.
//!
//! 每个 CLI 操作对应一个模块。`all` 操作依次串联其他操作。

pub mod all;
pub mod list;
pub mod rich;
pub mod summary;
