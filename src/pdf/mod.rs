//! PDF渲染器 - 将结构化文档渲染为分页PDF

use printpdf::{GeneratePdfOptions, PdfDocument, PdfSaveOptions};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::DocforgeError;
use crate::types::StructuredDocument;

/// PDF渲染器
pub struct PdfRenderer;

impl PdfRenderer {
    /// 渲染结构化文档为PDF文件。
    /// 先写入同目录的临时路径，成功后原子重命名到目标路径，
    /// 避免失败时留下承诺给用户的半成品文件。
    pub fn render(document: &StructuredDocument, output_path: &Path) -> Result<(), DocforgeError> {
        let html = build_html(document);
        let mut warnings = Vec::new();

        let pdf = PdfDocument::from_html(
            &html,
            &BTreeMap::new(),
            &BTreeMap::new(),
            &GeneratePdfOptions::default(),
            &mut warnings,
        )
        .map_err(|e| DocforgeError::Render {
            path: output_path.to_path_buf(),
            reason: e.to_string(),
        })?;

        if !warnings.is_empty() {
            eprintln!("⚠️ PDF渲染产生 {} 条警告", warnings.len());
        }

        let bytes = pdf.save(&PdfSaveOptions::default(), &mut warnings);

        let tmp_path = output_path.with_extension("pdf.tmp");
        let write_result = fs::write(&tmp_path, &bytes)
            .and_then(|_| fs::rename(&tmp_path, output_path));
        write_result.map_err(|e| DocforgeError::Render {
            path: output_path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

/// 组装渲染用的HTML。纯函数：相同文档产生逐字节相同的输出。
/// 布局顺序为标题、引言、各章节、结论（非空时）、参考文献（非空时）。
pub fn build_html(document: &StructuredDocument) -> String {
    let mut html = String::new();
    html.push_str(
        "<!DOCTYPE html><html><head><style>\
         body { font-family: sans-serif; font-size: 11pt; } \
         h1 { text-align: center; font-size: 16pt; } \
         h2 { font-size: 12pt; }\
         </style></head><body>",
    );

    html.push_str(&format!("<h1>{}</h1>", escape(&sanitize(&document.title))));

    push_heading(&mut html, "Introduction");
    push_body(&mut html, &document.introduction);

    for section in &document.sections {
        push_heading(&mut html, &section.title);
        push_body(&mut html, &section.content);
    }

    if !document.conclusion.is_empty() {
        push_heading(&mut html, "Conclusion");
        push_body(&mut html, &document.conclusion);
    }

    if !document.references.is_empty() {
        push_heading(&mut html, "References");
        for (index, reference) in document.references.iter().enumerate() {
            html.push_str(&format!(
                "<p>{}. {}</p>",
                index + 1,
                escape(&sanitize(reference))
            ));
        }
    }

    html.push_str("</body></html>");
    html
}

/// 按目标单字节拉丁字符集转写文本，字符集之外的字符替换为占位符。
/// 这是有意的有损策略：多数非拉丁文字与符号会被不可恢复地替换，
/// 属于已知限制而非缺陷。
pub fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| if (c as u32) <= 0xFF { c } else { '?' })
        .collect()
}

fn push_heading(html: &mut String, title: &str) {
    html.push_str(&format!("<h2>{}</h2>", escape(&sanitize(title))));
}

/// 正文按空行切分为段落；段落内的空白串（含换行）折叠为单个空格。
fn push_body(html: &mut String, text: &str) {
    let cleaned = sanitize(text);
    for paragraph in cleaned.split("\n\n") {
        let collapsed = paragraph.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() {
            continue;
        }
        html.push_str(&format!("<p>{}</p>", escape(&collapsed)));
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
