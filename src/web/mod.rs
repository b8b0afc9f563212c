//! Web表单前端 - 表单提交、后台生成任务与单槽位状态跟踪

use axum::{
    Router,
    extract::{Form, Path, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Redirect},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use crate::config::{Config, LLMProvider};
use crate::generator;
use crate::types::DocumentRequest;

/// 生成任务状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationState {
    Idle,
    Processing,
    Success,
    Error,
}

/// 进程级单槽位状态记录。
/// 生成开始时置为processing，由后台任务在完成或失败时覆写一次。
#[derive(Debug, Clone)]
pub struct GenerationStatus {
    pub state: GenerationState,
    pub message: String,
    pub file_path: Option<String>,
}

impl Default for GenerationStatus {
    fn default() -> Self {
        Self {
            state: GenerationState::Idle,
            message: "No generation has been started.".to_string(),
            file_path: None,
        }
    }
}

/// 状态槽位。所有状态转换都经过互斥锁，
/// 保证状态页读取与后台任务写入之间不会出现撕裂读。
pub type StatusSlot = Arc<Mutex<GenerationStatus>>;

fn lock_slot(slot: &StatusSlot) -> std::sync::MutexGuard<'_, GenerationStatus> {
    slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// 准入控制：仅当没有进行中的任务时占用槽位并置为processing。
/// 返回false表示已有任务在进行，新请求应被拒绝而非排队。
pub fn try_begin(slot: &StatusSlot) -> bool {
    let mut status = lock_slot(slot);
    if status.state == GenerationState::Processing {
        return false;
    }

    *status = GenerationStatus {
        state: GenerationState::Processing,
        message: "Document generation in progress...".to_string(),
        file_path: None,
    };
    true
}

/// 后台任务完成时写入最终状态
pub fn complete(slot: &StatusSlot, result: Result<String, String>) {
    let mut status = lock_slot(slot);
    *status = match result {
        Ok(file_path) => GenerationStatus {
            state: GenerationState::Success,
            message: "Document successfully generated".to_string(),
            file_path: Some(file_path),
        },
        Err(message) => GenerationStatus {
            state: GenerationState::Error,
            message,
            file_path: None,
        },
    };
}

/// Web应用状态
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub status: StatusSlot,
}

/// 表单字段
#[derive(Debug, Deserialize)]
pub struct GenerateForm {
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub subtopic: String,
    #[serde(default)]
    pub key_points: String,
    #[serde(default)]
    pub model_provider: String,
    #[serde(default)]
    pub enable_research: Option<String>,
}

/// 启动Web服务
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let port = config.port;
    let state = AppState {
        config,
        status: StatusSlot::default(),
    };
    let app = build_router(state);

    let listener = TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    let addr = listener.local_addr()?;

    info!("Document generator web interface listening on {}", addr);
    info!("Form: http://{}/  Status: http://{}/status", addr, addr);

    axum::serve(listener, app).await?;

    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/generate", post(generate_document))
        .route("/status", get(check_status))
        .route("/download/{filename}", get(download_file))
        .route("/health", get(health_check))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index() -> Html<String> {
    Html(render_index(None))
}

async fn health_check() -> axum::response::Json<Value> {
    axum::response::Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn generate_document(
    State(state): State<AppState>,
    Form(form): Form<GenerateForm>,
) -> axum::response::Response {
    let topic = form.topic.trim().to_string();
    if topic.is_empty() {
        return Html(render_index(Some("Topic is required"))).into_response();
    }

    let provider = if form.model_provider.is_empty() {
        LLMProvider::default()
    } else {
        match form.model_provider.parse::<LLMProvider>() {
            Ok(provider) => provider,
            Err(e) => return Html(render_index(Some(&e.to_string()))).into_response(),
        }
    };

    // 单飞准入：已有任务在进行时拒绝而非排队
    if !try_begin(&state.status) {
        return Html(render_index(Some(
            "A document generation is already in progress. Please wait for it to complete.",
        )))
        .into_response();
    }

    let key_points = form
        .key_points
        .lines()
        .map(str::trim)
        .filter(|point| !point.is_empty())
        .map(str::to_string)
        .collect::<Vec<_>>();

    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let output_file = format!("document_{}.pdf", timestamp);
    let enable_research = form.enable_research.as_deref() == Some("on");

    let request = match DocumentRequest::new(
        topic,
        form.subtopic.trim().to_string(),
        key_points,
        provider,
        &output_file,
        enable_research,
    ) {
        Ok(request) => request,
        Err(e) => {
            complete(&state.status, Err(e.to_string()));
            return Html(render_index(Some(&e.to_string()))).into_response();
        }
    };

    let status = state.status.clone();
    let config = state.config.clone();
    tokio::spawn(async move {
        info!(
            "Generating document about '{}' using {}",
            request.topic, request.model_provider
        );

        match generator::generate(&config, &request).await {
            Ok(path) => {
                info!("Document successfully generated: {}", path.display());
                complete(&status, Ok(path.display().to_string()));
            }
            Err(e) => {
                error!("Error generating document: {}", e);
                complete(&status, Err(format!("Error generating document: {}", e)));
            }
        }
    });

    Redirect::to("/status").into_response()
}

async fn check_status(State(state): State<AppState>) -> Html<String> {
    let status = lock_slot(&state.status).clone();
    Html(render_status(&status))
}

async fn download_file(Path(filename): Path<String>) -> axum::response::Response {
    if !is_safe_filename(&filename) {
        return (StatusCode::BAD_REQUEST, "Invalid file name").into_response();
    }

    match tokio::fs::read(&filename).await {
        Ok(bytes) => (
            [
                (header::CONTENT_TYPE, "application/pdf".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", filename),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(_) => (StatusCode::NOT_FOUND, "File not found").into_response(),
    }
}

/// 下载文件名校验：仅允许当前目录下的裸文件名
fn is_safe_filename(filename: &str) -> bool {
    !filename.is_empty()
        && !filename.contains('/')
        && !filename.contains('\\')
        && !filename.contains("..")
}

fn render_index(error: Option<&str>) -> String {
    let flash = match error {
        Some(message) => format!(
            r#"<div class="alert">{}</div>"#,
            html_escape(message)
        ),
        None => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>AI Document Generator</title>
    <style>
        body {{ font-family: sans-serif; max-width: 800px; margin: 30px auto; padding: 0 16px; }}
        label {{ display: block; margin-top: 12px; font-weight: bold; }}
        input[type=text], textarea {{ width: 100%; padding: 6px; }}
        textarea {{ min-height: 120px; }}
        .alert {{ background: #fdd; border: 1px solid #c99; padding: 10px; margin-bottom: 16px; }}
        button {{ margin-top: 16px; padding: 8px 24px; }}
    </style>
</head>
<body>
    <h1>AI Document Generator</h1>
    {flash}
    <form action="/generate" method="post">
        <label for="topic">Topic *</label>
        <input type="text" id="topic" name="topic" required>

        <label for="subtopic">Subtopic (Optional)</label>
        <input type="text" id="subtopic" name="subtopic">

        <label for="key_points">Key Points (One per line)</label>
        <textarea id="key_points" name="key_points" placeholder="Enter key points, one per line"></textarea>

        <label>AI Model Provider</label>
        <div>
            <input type="radio" name="model_provider" id="openai" value="openai" checked>
            <label for="openai" style="display:inline;font-weight:normal">OpenAI (GPT-4o)</label>
        </div>
        <div>
            <input type="radio" name="model_provider" id="anthropic" value="anthropic">
            <label for="anthropic" style="display:inline;font-weight:normal">Anthropic (Claude 3.5 Sonnet)</label>
        </div>

        <div style="margin-top:12px">
            <input type="checkbox" id="enable_research" name="enable_research">
            <label for="enable_research" style="display:inline;font-weight:normal">Enable autonomous research</label>
        </div>

        <button type="submit">Generate Document</button>
    </form>
    <p><small>Note: Document generation may take a few minutes, especially with research enabled.</small></p>
</body>
</html>"#
    )
}

fn render_status(status: &GenerationStatus) -> String {
    let (state_label, refresh, extra) = match status.state {
        GenerationState::Processing => (
            "Processing",
            r#"<meta http-equiv="refresh" content="5">"#,
            String::new(),
        ),
        GenerationState::Success => {
            let download = status
                .file_path
                .as_deref()
                .map(|path| {
                    format!(
                        r#"<p><a href="/download/{}">Download PDF</a></p>"#,
                        html_escape(path)
                    )
                })
                .unwrap_or_default();
            ("Success", "", download)
        }
        GenerationState::Error => ("Error", "", String::new()),
        GenerationState::Idle => ("Idle", "", String::new()),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    {refresh}
    <title>Generation Status</title>
    <style>body {{ font-family: sans-serif; max-width: 800px; margin: 30px auto; padding: 0 16px; }}</style>
</head>
<body>
    <h1>Document Generation Status</h1>
    <p><strong>Status:</strong> {state_label}</p>
    <p>{message}</p>
    {extra}
    <p><a href="/">Back to form</a></p>
</body>
</html>"#,
        message = html_escape(&status.message),
    )
}

fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

// Include tests
#[cfg(test)]
mod tests;
