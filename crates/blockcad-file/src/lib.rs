//! BlockCAD 文件格式处理
//!
//! 支持：
//! - `.bcad` 原生格式（MessagePack + Zstd）

pub mod error;
pub mod metadata;
pub mod native;

pub use error::FileError;
pub use metadata::DocumentMetadata;
pub use native::{load, save, LoadedDocument};
