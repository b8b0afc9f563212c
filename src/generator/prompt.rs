//! 提示词组装 - 构建交给Agent的系统提示词与任务指令

use crate::types::DocumentRequest;

/// 研究模式的系统提示词
const SYSTEM_PROMPT_RESEARCH: &str = "You are an intelligent document creation assistant that \
helps users create well-structured documents on various topics. When given a topic, subtopic \
and key points, you'll research the topic and create detailed, factual content with proper \
citations.

Follow these guidelines:
1. When researching, be thorough but focus on reliable sources
2. Create well-structured content with clear sections
3. Ensure all information is accurate and properly cited
4. Organize the content logically based on the key points provided
5. Use the search and encyclopedia tools to gather information when needed
6. Use the save tool to save your final document content

Your final output should be comprehensive, well-organized, and focused on the topic and \
subtopics.";

/// 纯知识模式的系统提示词
const SYSTEM_PROMPT_KNOWLEDGE_ONLY: &str = "You are an intelligent document creation assistant \
that helps users create well-structured documents on various topics. When given a topic, \
subtopic and key points, you'll create detailed content based on your knowledge.

Follow these guidelines:
1. Create well-structured content with clear sections
2. Organize the content logically based on the key points provided
3. Ensure the content is comprehensive and informative
4. Use the save tool to save your final document content

Your final output should be comprehensive, well-organized, and focused on the topic and \
subtopics.";

/// 按研究开关选择系统提示词变体
pub fn system_prompt(enable_research: bool) -> &'static str {
    if enable_research {
        SYSTEM_PROMPT_RESEARCH
    } else {
        SYSTEM_PROMPT_KNOWLEDGE_ONLY
    }
}

/// 文本模式策略的系统提示词：在基础变体上追加工具清单与调用格式约定
pub fn text_mode_system_prompt(enable_research: bool, tool_instructions: &str) -> String {
    format!(
        "{}\n\nYou have access to the following tools:\n{}\n\n\
         To invoke a tool, reply using this exact format:\n\
         Thought: reason about what to do next\n\
         Action: <tool name>\n\
         Action Input: <input for the tool>\n\n\
         After each action you will receive an Observation with the tool result.\n\
         When you have gathered enough information, reply with:\n\
         Final Answer: <the complete document content>",
        system_prompt(enable_research),
        tool_instructions
    )
}

/// 组装交给Agent的任务指令。纯函数，对相同输入产生相同输出。
pub fn compose(request: &DocumentRequest) -> String {
    let key_points_text = request
        .key_points
        .iter()
        .map(|point| format!("- {}", point))
        .collect::<Vec<_>>()
        .join("\n");

    let research_directive = if request.enable_research {
        "Please research this topic thoroughly using the available tools and provide detailed \
         information.\n\n"
    } else {
        ""
    };

    format!(
        "Create a comprehensive document on the following topic:\n\n\
         Topic: {}\n\
         Subtopic: {}\n\n\
         Key points to cover:\n\
         {}\n\n\
         {}\
         Generate a well-structured document with:\n\
         1. An informative introduction\n\
         2. Detailed sections for each key point\n\
         3. A conclusion that summarizes the main findings\n\
         4. References/citations (if research is enabled)\n\n\
         Organize the content logically and ensure it is comprehensive and easy to understand.",
        request.topic, request.subtopic, key_points_text, research_directive
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LLMProvider;

    fn request(enable_research: bool) -> DocumentRequest {
        DocumentRequest::new(
            "Photosynthesis",
            "Energy conversion",
            vec![
                "Light reactions".to_string(),
                "Dark reactions".to_string(),
                "Chlorophyll".to_string(),
            ],
            LLMProvider::OpenAI,
            "output.pdf",
            enable_research,
        )
        .unwrap()
    }

    #[test]
    fn test_compose_contains_topic_and_key_points_in_order() {
        let prompt = compose(&request(false));

        assert!(prompt.contains("Photosynthesis"));
        assert!(prompt.contains("Energy conversion"));

        let light = prompt.find("- Light reactions").unwrap();
        let dark = prompt.find("- Dark reactions").unwrap();
        let chlorophyll = prompt.find("- Chlorophyll").unwrap();
        assert!(light < dark);
        assert!(dark < chlorophyll);
    }

    #[test]
    fn test_compose_research_directive() {
        let with_research = compose(&request(true));
        let without_research = compose(&request(false));

        assert!(with_research.contains("research this topic thoroughly"));
        assert!(!without_research.contains("research this topic thoroughly"));
    }

    #[test]
    fn test_compose_is_deterministic() {
        assert_eq!(compose(&request(true)), compose(&request(true)));
    }

    #[test]
    fn test_system_prompt_variants() {
        assert!(system_prompt(true).contains("research the topic"));
        assert!(system_prompt(false).contains("based on your knowledge"));
    }

    #[test]
    fn test_text_mode_system_prompt_embeds_tools() {
        let prompt = text_mode_system_prompt(false, "- save_content: Save document content.");
        assert!(prompt.contains("save_content"));
        assert!(prompt.contains("Action Input:"));
        assert!(prompt.contains("Final Answer:"));
    }
}
