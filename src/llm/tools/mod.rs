//! Agent研究工具集

use anyhow::Result;
use rig::tool::Tool;
use std::time::Duration;

pub mod encyclopedia;
pub mod save;
pub mod search;

pub use encyclopedia::AgentToolEncyclopedia;
pub use save::AgentToolSave;
pub use search::AgentToolSearch;

use crate::config::Config;

/// 单次生成请求装配的工具集。
/// 搜索与百科工具仅在启用研究时包含，保存工具始终包含。
#[derive(Clone)]
pub struct Toolset {
    pub search: Option<AgentToolSearch>,
    pub encyclopedia: Option<AgentToolEncyclopedia>,
    pub save: AgentToolSave,
}

impl Toolset {
    /// 按请求装配工具集
    pub fn assemble(config: &Config, enable_research: bool) -> Result<Self> {
        let timeout = Duration::from_secs(config.llm.timeout_seconds);

        let (search, encyclopedia) = if enable_research {
            (
                Some(AgentToolSearch::new(&config.tools, timeout)?),
                Some(AgentToolEncyclopedia::new(timeout)?),
            )
        } else {
            (None, None)
        };

        Ok(Self {
            search,
            encyclopedia,
            save: AgentToolSave::new(&config.tools),
        })
    }

    /// 当前包含的工具名列表
    pub fn tool_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.search.is_some() {
            names.push(AgentToolSearch::NAME);
        }
        if self.encyclopedia.is_some() {
            names.push(AgentToolEncyclopedia::NAME);
        }
        names.push(AgentToolSave::NAME);
        names
    }

    /// 文本模式策略的工具使用说明
    pub fn text_mode_instructions(&self) -> String {
        let mut lines = Vec::new();
        if self.search.is_some() {
            lines.push(format!(
                "- {}: Search the web for information about a topic. Input: the search query.",
                AgentToolSearch::NAME
            ));
        }
        if self.encyclopedia.is_some() {
            lines.push(format!(
                "- {}: Look up an encyclopedia article about a topic. Input: the topic to look up.",
                AgentToolEncyclopedia::NAME
            ));
        }
        lines.push(format!(
            "- {}: Save document content for later processing into a PDF. Input: the content to save.",
            AgentToolSave::NAME
        ));
        lines.join("\n")
    }

    /// 按名称分发文本形式的工具调用。未知工具名返回None。
    pub async fn dispatch(&self, name: &str, input: &str) -> Option<String> {
        if name == AgentToolSearch::NAME {
            let search = self.search.as_ref()?;
            return Some(search.search(input).await);
        }
        if name == AgentToolEncyclopedia::NAME {
            let encyclopedia = self.encyclopedia.as_ref()?;
            return Some(encyclopedia.lookup(input).await);
        }
        if name == AgentToolSave::NAME {
            return Some(self.save.save(input).await);
        }
        None
    }
}
