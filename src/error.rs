//! 错误类型定义 - 文档生成流程的错误分类

use std::path::PathBuf;
use thiserror::Error;

/// 文档生成过程中的错误分类
#[derive(Debug, Error)]
pub enum DocforgeError {
    /// 不支持的模型Provider
    #[error("unsupported model provider: {0}")]
    UnsupportedProvider(String),

    /// 缺少Provider凭证（环境变量未配置）
    #[error("missing credentials: environment variable {0} is not set")]
    MissingCredentials(&'static str),

    /// 请求构造失败：主题为空
    #[error("topic must not be empty")]
    EmptyTopic,

    /// Agent执行失败：模型输出在解析预算内无法解析为工具调用或最终答案
    #[error("agent execution failed: {0}")]
    AgentExecution(String),

    /// PDF渲染失败
    #[error("failed to render PDF to {path}: {reason}")]
    Render { path: PathBuf, reason: String },
}
