use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod cli;
mod config;
mod error;
mod generator;
mod llm;
mod pdf;
mod types;
mod web;

use crate::config::LLMProvider;

#[tokio::main]
async fn main() -> Result<()> {
    // 从.env加载环境变量（凭证不进入配置文件）
    dotenvy::dotenv().ok();

    let args = cli::Args::parse();
    let config = args.load_config();

    if args.serve {
        // Web模式：初始化tracing日志
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;

        // 两个Provider都可能被表单选中，凭证缺失是启动期致命错误
        for provider in [LLMProvider::OpenAI, LLMProvider::Anthropic] {
            let env_name = provider.api_key_env();
            if std::env::var(env_name).map(|v| v.is_empty()).unwrap_or(true) {
                eprintln!("❌ 缺少环境变量 {}，请在.env中配置后重启", env_name);
                std::process::exit(1);
            }
        }

        return web::serve(config).await;
    }

    // CLI模式
    let request = match args.to_request() {
        Ok(request) => request,
        Err(e) => {
            eprintln!("❌ {}", e);
            eprintln!("使用 --help 查看用法");
            std::process::exit(1);
        }
    };

    match generator::generate(&config, &request).await {
        Ok(_) => Ok(()),
        Err(e) => {
            eprintln!("❌ 生成失败: {}", e);
            std::process::exit(1);
        }
    }
}
