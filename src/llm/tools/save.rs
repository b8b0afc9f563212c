//! 内容保存工具 - Agent工作内容的暂存

use anyhow::Result;
use rig::tool::Tool;
use serde::Deserialize;
use std::path::PathBuf;

use crate::config::ToolsConfig;

const SCRATCH_FILE_NAME: &str = "document_content.txt";

/// 内容保存工具。写入进程级共享的暂存文件；
/// 暂存内容仅作参考，下游消费的权威值是Agent的最终答案。
#[derive(Debug, Clone)]
pub struct AgentToolSave {
    scratch_dir: PathBuf,
}

/// 保存参数
#[derive(Debug, Deserialize)]
pub struct SaveArgs {
    pub content: String,
}

/// 保存工具错误
#[derive(Debug)]
pub struct SaveToolError;

impl std::fmt::Display for SaveToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Save tool error")
    }
}

impl std::error::Error for SaveToolError {}

impl AgentToolSave {
    pub fn new(config: &ToolsConfig) -> Self {
        Self {
            scratch_dir: config.scratch_dir.clone(),
        }
    }

    /// 暂存文件路径
    pub fn scratch_path(&self) -> PathBuf {
        self.scratch_dir.join(SCRATCH_FILE_NAME)
    }

    /// 保存内容。IO错误折叠为文本结果返回给模型。
    pub async fn save(&self, content: &str) -> String {
        println!("   💾 保存Agent工作内容");

        match self.save_inner(content).await {
            Ok(()) => {
                "Content saved successfully. It will be formatted into a PDF document."
                    .to_string()
            }
            Err(e) => format!("Error saving content: {}", e),
        }
    }

    async fn save_inner(&self, content: &str) -> Result<()> {
        tokio::fs::create_dir_all(&self.scratch_dir).await?;
        tokio::fs::write(self.scratch_path(), content).await?;
        Ok(())
    }
}

impl Tool for AgentToolSave {
    const NAME: &'static str = "save_content";

    type Error = SaveToolError;
    type Args = SaveArgs;
    type Output = String;

    async fn definition(&self, _prompt: String) -> rig::completion::ToolDefinition {
        rig::completion::ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Save document content for later processing into a PDF. Use this to \
                          save your final document content."
                .to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "content": {
                        "type": "string",
                        "description": "Document content to save"
                    }
                },
                "required": ["content"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        Ok(self.save(&args.content).await)
    }
}
