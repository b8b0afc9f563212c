use crate::config::Config;
use crate::error::DocforgeError;
use crate::types::DocumentRequest;
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// docforge-rs - 由Rust与AI驱动的结构化PDF文档生成引擎
#[derive(Parser, Debug)]
#[command(name = "docforge-rs")]
#[command(
    about = "AI-powered document generation engine. It takes a topic, subtopic and key points, optionally performs autonomous research, and renders a structured PDF document."
)]
#[command(author = "Sopaco")]
#[command(version)]
pub struct Args {
    /// 文档主题
    #[arg(long)]
    pub topic: Option<String>,

    /// 子主题（可选）
    #[arg(long, default_value = "")]
    pub subtopic: String,

    /// 要覆盖的关键点（可指定多个）
    #[arg(long = "key-points", num_args = 1..)]
    pub key_points: Vec<String>,

    /// 模型Provider (openai, anthropic)
    #[arg(long = "model", default_value = "openai")]
    pub model: String,

    /// 输出PDF路径
    #[arg(long, default_value = "output.pdf")]
    pub output: PathBuf,

    /// 启用自主研究
    #[arg(long)]
    pub research: bool,

    /// 以Web表单模式启动
    #[arg(long)]
    pub serve: bool,

    /// Web服务监听端口
    #[arg(long)]
    pub port: Option<u16>,

    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 是否启用详细日志
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// 加载配置并应用CLI覆盖
    pub fn load_config(&self) -> Config {
        let mut config = if let Some(config_path) = &self.config {
            // 如果显式指定了配置文件路径，从该路径加载
            Config::from_file(config_path).unwrap_or_else(|_| {
                panic!("⚠️ 警告: 无法读取配置文件 {:?}", config_path)
            })
        } else {
            // 如果没有显式指定配置文件，尝试从默认位置加载
            let default_config_path = std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join("docforge.toml");

            if default_config_path.exists() {
                Config::from_file(&default_config_path).unwrap_or_else(|_| {
                    panic!(
                        "⚠️ 警告: 无法读取默认配置文件 {:?}",
                        default_config_path
                    )
                })
            } else {
                // 默认配置文件不存在，使用默认值
                Config::default()
            }
        };

        if let Some(port) = self.port {
            config.port = port;
        }
        config.verbose = self.verbose || config.verbose;

        config
    }

    /// 将CLI参数转换为文档生成请求
    pub fn to_request(&self) -> Result<DocumentRequest> {
        let topic = self
            .topic
            .as_deref()
            .map(str::trim)
            .filter(|topic| !topic.is_empty())
            .ok_or(DocforgeError::EmptyTopic)?;

        let provider = self.model.parse()?;

        let request = DocumentRequest::new(
            topic,
            self.subtopic.trim(),
            self.key_points.clone(),
            provider,
            self.output.clone(),
            self.research,
        )?;

        Ok(request)
    }
}
