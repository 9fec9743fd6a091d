//! 文档元数据

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 文档元数据
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// 文档唯一标识
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl DocumentMetadata {
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            author: String::new(),
            created_at: now,
            modified_at: now,
        }
    }

    /// 更新修改时间
    pub fn touch(&mut self) {
        self.modified_at = Utc::now();
    }
}

impl Default for DocumentMetadata {
    fn default() -> Self {
        Self::new("Untitled")
    }
}
