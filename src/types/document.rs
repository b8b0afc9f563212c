use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::LLMProvider;
use crate::error::DocforgeError;

/// 文档生成请求
#[derive(Debug, Clone)]
pub struct DocumentRequest {
    /// 文档主题
    pub topic: String,
    /// 子主题（可为空）
    pub subtopic: String,
    /// 要覆盖的关键点，按输入顺序
    pub key_points: Vec<String>,
    /// 模型Provider
    pub model_provider: LLMProvider,
    /// 输出PDF路径
    pub output_file: PathBuf,
    /// 是否启用自主研究
    pub enable_research: bool,
}

impl DocumentRequest {
    /// 构造请求。主题为空时构造失败。
    pub fn new(
        topic: impl Into<String>,
        subtopic: impl Into<String>,
        key_points: Vec<String>,
        model_provider: LLMProvider,
        output_file: impl Into<PathBuf>,
        enable_research: bool,
    ) -> Result<Self, DocforgeError> {
        let topic = topic.into();
        if topic.trim().is_empty() {
            return Err(DocforgeError::EmptyTopic);
        }

        Ok(Self {
            topic,
            subtopic: subtopic.into(),
            key_points,
            model_provider,
            output_file: output_file.into(),
            enable_research,
        })
    }
}

/// 结构化文档内容 - 内容结构化阶段的产物，渲染阶段的输入
#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
pub struct StructuredDocument {
    /// 文档标题
    pub title: String,
    /// 引言部分
    pub introduction: String,
    /// 正文章节，按渲染顺序
    pub sections: Vec<DocumentSection>,
    /// 结论部分
    pub conclusion: String,
    /// 参考文献（可为空）
    #[serde(default)]
    pub references: Vec<String>,
}

/// 文档章节
#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
pub struct DocumentSection {
    /// 章节标题
    pub title: String,
    /// 章节内容，段落之间以空行分隔
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_rejects_empty_topic() {
        let result = DocumentRequest::new(
            "",
            "",
            vec![],
            LLMProvider::OpenAI,
            "output.pdf",
            false,
        );
        assert!(matches!(result, Err(DocforgeError::EmptyTopic)));

        let result = DocumentRequest::new(
            "   ",
            "",
            vec![],
            LLMProvider::OpenAI,
            "output.pdf",
            false,
        );
        assert!(matches!(result, Err(DocforgeError::EmptyTopic)));
    }

    #[test]
    fn test_request_preserves_key_point_order() {
        let request = DocumentRequest::new(
            "Photosynthesis",
            "",
            vec!["Light reactions".to_string(), "Dark reactions".to_string()],
            LLMProvider::OpenAI,
            "output.pdf",
            false,
        )
        .unwrap();

        assert_eq!(request.key_points[0], "Light reactions");
        assert_eq!(request.key_points[1], "Dark reactions");
    }
}
