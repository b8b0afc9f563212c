//! 内容结构化 - 将Agent的自由文本输出整理为结构化文档。
//! 主路径为Schema约束的LLM提取，任何解析失败都回退到确定性的启发式切分，
//! 因此对外永不失败。

use crate::llm::client::LLMClient;
use crate::types::{DocumentRequest, DocumentSection, StructuredDocument};

/// 结构化阶段的系统提示词
const STRUCTURING_SYSTEM_PROMPT: &str = "You are a document structuring assistant. Your task \
is to take content about a topic and structure it into a formal document with proper sections.

The output should follow this structure:
1. Title - A clear, descriptive title for the document
2. Introduction - A brief introduction to the topic
3. Sections - Multiple sections covering different aspects of the topic
4. Conclusion - A summary of the key points
5. References - List of sources (if applicable)

Format the output as a valid JSON object matching the requested schema.";

/// 内容结构化器
pub struct ContentStructurer<'a> {
    llm: &'a LLMClient,
}

impl<'a> ContentStructurer<'a> {
    pub fn new(llm: &'a LLMClient) -> Self {
        Self { llm }
    }

    /// 结构化Agent输出。LLM提取失败时静默回退，始终返回结构化文档。
    pub async fn structure(
        &self,
        request: &DocumentRequest,
        agent_output: &str,
    ) -> StructuredDocument {
        let user_prompt = format!(
            "Please structure the following content into a formal document:\n\n\
             Topic: {}\n\
             Subtopic: {}\n\n\
             Content:\n{}",
            request.topic, request.subtopic, agent_output
        );

        match self
            .llm
            .extract::<StructuredDocument>(STRUCTURING_SYSTEM_PROMPT, &user_prompt)
            .await
        {
            Ok(document) => document,
            Err(e) => {
                eprintln!("⚠️ 结构化提取失败，使用启发式回退: {}", e);
                fallback_document(request, agent_output)
            }
        }
    }
}

/// 启发式回退：按标题行切分Agent输出并归类章节。
pub fn fallback_document(request: &DocumentRequest, agent_content: &str) -> StructuredDocument {
    let sections = split_sections(agent_content);
    let classified = classify_sections(sections);

    let title = if request.subtopic.is_empty() {
        request.topic.clone()
    } else {
        format!("{}: {}", request.topic, request.subtopic)
    };

    // 没有识别到显式引言时，取原始输出的第一个段落
    let introduction = if classified.introduction.is_empty() && !agent_content.is_empty() {
        agent_content
            .split("\n\n")
            .next()
            .unwrap_or("")
            .to_string()
    } else {
        classified.introduction
    };

    StructuredDocument {
        title,
        introduction,
        sections: classified.ordinary,
        conclusion: classified.conclusion,
        references: classified.references,
    }
}

/// 标题行判定：非空，且以markdown标题标记开头，或长度小于60且全为大写形式。
fn is_heading(line: &str) -> bool {
    !line.is_empty()
        && (line.starts_with('#')
            || (line.chars().count() < 60 && line == line.to_uppercase().as_str()))
}

/// 将文本按标题行切分为章节。标题前的内容不属于任何章节；
/// 章节内容为标题之后的非空行，直到下一个标题。
fn split_sections(content: &str) -> Vec<DocumentSection> {
    let mut sections = Vec::new();
    let mut current_title: Option<String> = None;
    let mut current_content: Vec<&str> = Vec::new();

    for raw_line in content.lines() {
        let line = raw_line.trim();

        if is_heading(line) {
            if let Some(title) = current_title.take() {
                if !current_content.is_empty() {
                    sections.push(DocumentSection {
                        title,
                        content: current_content.join("\n"),
                    });
                    current_content.clear();
                }
            }
            current_title = Some(line.trim_start_matches('#').trim().to_string());
        } else if current_title.is_some() && !line.is_empty() {
            current_content.push(line);
        }
    }

    if let Some(title) = current_title {
        if !current_content.is_empty() {
            sections.push(DocumentSection {
                title,
                content: current_content.join("\n"),
            });
        }
    }

    sections
}

/// 章节归类结果
struct ClassifiedSections {
    introduction: String,
    conclusion: String,
    references: Vec<String>,
    ordinary: Vec<DocumentSection>,
}

/// 单趟归类：每个章节至多归入引言、结论、参考文献之一，其余保留为普通章节。
/// 每类只提取首个匹配的章节，后续匹配同一关键词的章节保留为普通章节。
fn classify_sections(sections: Vec<DocumentSection>) -> ClassifiedSections {
    let mut classified = ClassifiedSections {
        introduction: String::new(),
        conclusion: String::new(),
        references: Vec::new(),
        ordinary: Vec::new(),
    };
    let mut introduction_taken = false;
    let mut conclusion_taken = false;
    let mut references_taken = false;

    for section in sections {
        let title = section.title.to_lowercase();

        if !introduction_taken && title.contains("introduction") {
            classified.introduction = section.content;
            introduction_taken = true;
        } else if !conclusion_taken && title.contains("conclusion") {
            classified.conclusion = section.content;
            conclusion_taken = true;
        } else if !references_taken
            && (title.contains("reference") || title.contains("bibliography"))
        {
            classified.references = section
                .content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect();
            references_taken = true;
        } else {
            classified.ordinary.push(section);
        }
    }

    classified
}

// Include tests
#[cfg(test)]
mod tests;
