//! 文档生成工作流：提示词组装、Agent编排、内容结构化、PDF渲染

pub mod orchestrator;
pub mod prompt;
pub mod structurer;

use anyhow::Result;
use std::path::PathBuf;

use crate::config::Config;
use crate::llm::client::LLMClient;
use crate::pdf::PdfRenderer;
use crate::types::DocumentRequest;

use orchestrator::AgentOrchestrator;
use structurer::ContentStructurer;

/// 执行一次完整的文档生成，返回产出的PDF路径。
pub async fn generate(config: &Config, request: &DocumentRequest) -> Result<PathBuf> {
    println!(
        "🚀 开始生成文档: {} (provider: {})",
        request.topic, request.model_provider
    );

    // 按请求选择Provider。请求与配置的Provider不一致时，
    // 配置中的模型与凭证不再适用，重新按Provider解析。
    let mut config = config.clone();
    if config.llm.provider != request.model_provider {
        config.llm.provider = request.model_provider;
        config.llm.api_key.clear();
        config.llm.model.clear();
    }
    config.llm.resolve_api_key()?;

    let llm_client = LLMClient::new(config.clone())?;

    println!("🤖 运行Agent收集文档内容...");
    let orchestrator = AgentOrchestrator::new(&llm_client, &config);
    let agent_output = orchestrator.run(request).await?;

    println!("📑 结构化文档内容...");
    let structurer = ContentStructurer::new(&llm_client);
    let document = structurer.structure(request, &agent_output).await;

    println!("📄 渲染PDF文档...");
    PdfRenderer::render(&document, &request.output_file)?;

    println!("✅ 文档生成完成: {}", request.output_file.display());
    Ok(request.output_file.clone())
}
