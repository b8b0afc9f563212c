#[cfg(test)]
mod tests {
    use crate::config::LLMProvider;
    use crate::generator::structurer::fallback_document;
    use crate::types::DocumentRequest;

    fn request(topic: &str, subtopic: &str) -> DocumentRequest {
        DocumentRequest::new(
            topic,
            subtopic,
            vec![],
            LLMProvider::OpenAI,
            "output.pdf",
            false,
        )
        .unwrap()
    }

    #[test]
    fn test_fallback_segmentation() {
        let content = "INTRODUCTION\nThis is the intro.\nMAIN POINT\nBody text.\nCONCLUSION\nWrap up.";
        let document = fallback_document(&request("Photosynthesis", ""), content);

        assert_eq!(document.title, "Photosynthesis");
        assert_eq!(document.introduction, "This is the intro.");
        assert_eq!(document.sections.len(), 1);
        assert_eq!(document.sections[0].title, "MAIN POINT");
        assert_eq!(document.sections[0].content, "Body text.");
        assert_eq!(document.conclusion, "Wrap up.");
        assert!(document.references.is_empty());
    }

    #[test]
    fn test_title_includes_subtopic_when_present() {
        let document = fallback_document(&request("Photosynthesis", "Light reactions"), "");
        assert_eq!(document.title, "Photosynthesis: Light reactions");

        let document = fallback_document(&request("Photosynthesis", ""), "");
        assert_eq!(document.title, "Photosynthesis");
    }

    #[test]
    fn test_long_upper_case_line_is_not_a_heading() {
        // 60个字符以上的全大写行视为正文而非标题
        let long_line = "A".repeat(60);
        let content = format!("HEADING\nFirst line.\n{}\nMore body.", long_line);
        let document = fallback_document(&request("Topic", ""), &content);

        assert_eq!(document.sections.len(), 1);
        assert_eq!(document.sections[0].title, "HEADING");
        assert!(document.sections[0].content.contains(&long_line));
        assert!(document.sections[0].content.contains("More body."));
    }

    #[test]
    fn test_markup_heading_of_any_length_is_a_heading() {
        let long_heading = format!("## {}", "Very long heading ".repeat(10));
        let content = format!("{}\nSection body.", long_heading);
        let document = fallback_document(&request("Topic", ""), &content);

        assert_eq!(document.sections.len(), 1);
        assert!(document.sections[0].title.starts_with("Very long heading"));
        assert_eq!(document.sections[0].content, "Section body.");
    }

    #[test]
    fn test_markdown_heading_markers_are_stripped() {
        let content = "# Overview\nSome text.\n### Details\nMore text.";
        let document = fallback_document(&request("Topic", ""), content);

        assert_eq!(document.sections.len(), 2);
        assert_eq!(document.sections[0].title, "Overview");
        assert_eq!(document.sections[1].title, "Details");
    }

    #[test]
    fn test_references_are_split_into_lines() {
        let content = "REFERENCES\nSmith, J. (2020). Plants.\n\nDoe, A. (2021). Leaves.";
        let document = fallback_document(&request("Topic", ""), content);

        assert_eq!(
            document.references,
            vec!["Smith, J. (2020). Plants.", "Doe, A. (2021). Leaves."]
        );
        assert!(document.sections.is_empty());
    }

    #[test]
    fn test_bibliography_heading_feeds_references() {
        let content = "BIBLIOGRAPHY\nFirst source\nSecond source";
        let document = fallback_document(&request("Topic", ""), content);

        assert_eq!(document.references, vec!["First source", "Second source"]);
    }

    #[test]
    fn test_first_match_wins_for_duplicate_keywords() {
        // 后续匹配同一关键词的章节保留为普通章节
        let content = "INTRODUCTION\nFirst intro.\n# Another Introduction\nSecond intro.\nCONCLUSION\nThe end.";
        let document = fallback_document(&request("Topic", ""), content);

        assert_eq!(document.introduction, "First intro.");
        assert_eq!(document.conclusion, "The end.");
        assert_eq!(document.sections.len(), 1);
        assert_eq!(document.sections[0].title, "Another Introduction");
        assert_eq!(document.sections[0].content, "Second intro.");
    }

    #[test]
    fn test_introduction_falls_back_to_first_paragraph() {
        let content = "Plants convert light into energy.\n\nSECTION ONE\nDetails here.";
        let document = fallback_document(&request("Topic", ""), content);

        assert_eq!(document.introduction, "Plants convert light into energy.");
        assert_eq!(document.sections.len(), 1);
        assert_eq!(document.sections[0].title, "SECTION ONE");
    }

    #[test]
    fn test_empty_content_produces_empty_document() {
        let document = fallback_document(&request("Topic", ""), "");

        assert_eq!(document.title, "Topic");
        assert!(document.introduction.is_empty());
        assert!(document.sections.is_empty());
        assert!(document.conclusion.is_empty());
        assert!(document.references.is_empty());
    }

    #[test]
    fn test_heading_without_content_is_dropped() {
        let content = "FIRST\nBody.\nEMPTY HEADING";
        let document = fallback_document(&request("Topic", ""), content);

        assert_eq!(document.sections.len(), 1);
        assert_eq!(document.sections[0].title, "FIRST");
    }
}
