//! # Error 模块
//!
//! 定义 pfx-runtime 中使用的错误类型。
//!
//! 字段解析与描述符构建本身**不会失败**（所有字段都有容错默认值），
//! 错误只出现在加载边界：把外部文档反序列化为源记录的阶段。

use thiserror::Error;

/// 加载错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoadError {
    /// JSON 文档无效或结构不符合预期
    #[error("效果定义 JSON 无效: {message}")]
    Json { message: String },

    /// 同名效果重复注册
    #[error("效果 '{name}' 重复定义")]
    DuplicateEffect { name: String },
}

impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json {
            message: e.to_string(),
        }
    }
}

/// Result 类型别名
pub type LoadResult<T> = Result<T, LoadError>;
