#[cfg(test)]
mod tests {
    use crate::web::{GenerationState, StatusSlot, complete, try_begin};

    #[test]
    fn test_admission_control_rejects_second_request() {
        let slot = StatusSlot::default();

        assert!(try_begin(&slot));
        // 进行中时第二个请求被拒绝，槽位内容不被覆盖
        assert!(!try_begin(&slot));

        let status = slot.lock().unwrap().clone();
        assert_eq!(status.state, GenerationState::Processing);
        assert_eq!(status.message, "Document generation in progress...");
        assert!(status.file_path.is_none());
    }

    #[test]
    fn test_slot_accepts_new_request_after_completion() {
        let slot = StatusSlot::default();

        assert!(try_begin(&slot));
        complete(&slot, Ok("document_20250101_000000.pdf".to_string()));

        let status = slot.lock().unwrap().clone();
        assert_eq!(status.state, GenerationState::Success);
        assert_eq!(
            status.file_path.as_deref(),
            Some("document_20250101_000000.pdf")
        );

        assert!(try_begin(&slot));
    }

    #[test]
    fn test_complete_with_error_records_message() {
        let slot = StatusSlot::default();

        assert!(try_begin(&slot));
        complete(&slot, Err("Error generating document: boom".to_string()));

        let status = slot.lock().unwrap().clone();
        assert_eq!(status.state, GenerationState::Error);
        assert!(status.message.contains("boom"));
        assert!(status.file_path.is_none());

        assert!(try_begin(&slot));
    }

    #[test]
    fn test_download_filename_validation() {
        use crate::web::is_safe_filename;

        assert!(is_safe_filename("document_20250101_000000.pdf"));
        assert!(!is_safe_filename(""));
        assert!(!is_safe_filename("../secret.pdf"));
        assert!(!is_safe_filename("subdir/file.pdf"));
        assert!(!is_safe_filename("subdir\\file.pdf"));
    }

    #[test]
    fn test_initial_state_is_idle() {
        let slot = StatusSlot::default();
        let status = slot.lock().unwrap().clone();
        assert_eq!(status.state, GenerationState::Idle);
    }
}
