// Unit tests for rbac-dashboard
// Exercise the dashboard operations through the public API

#[cfg(test)]
mod dashboard_tests {
    use rbac_dashboard::app::form::FormError;
    use rbac_dashboard::app::{ActiveTab, AppState, InputMode, ModalState};
    use rbac_dashboard::store::{UserDraft, UserStatus};

    fn create_test_app() -> AppState {
        AppState::default()
    }

    fn fill_draft(app: &mut AppState, name: &str, email: &str) {
        app.draft.name = name.to_string();
        app.draft.email = email.to_string();
    }

    #[test]
    fn test_seed_state() {
        let app = create_test_app();
        assert_eq!(app.active_tab, ActiveTab::Users);
        assert_eq!(app.users().len(), 2);
        assert_eq!(app.roles.len(), 2);
        assert_eq!(app.roles[0].permissions, vec!["users_read", "users_write", "users_delete"]);
        assert!(app.modal.is_none());
        assert_eq!(app.draft, UserDraft::default());
    }

    #[test]
    fn test_add_user_gets_next_id() {
        let mut app = create_test_app();
        app.open_add_modal();
        fill_draft(&mut app, "Alice", "a@x.com");
        let id = app.submit_add().expect("valid draft");

        assert_eq!(id, 3);
        assert_eq!(app.users().len(), 3);
        let u = &app.users()[2];
        assert_eq!(u.id, 3);
        assert_eq!(u.name, "Alice");
        assert_eq!(u.email, "a@x.com");
        assert_eq!(u.role, "manager");
        assert_eq!(u.status, UserStatus::Active);
        assert!(app.modal.is_none());
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.draft, UserDraft::default());
    }

    #[test]
    fn test_edit_preserves_id_and_untouched_fields() {
        let mut app = create_test_app();
        assert!(app.open_edit_modal(1));
        assert_eq!(app.editing_user, Some(1));
        assert_eq!(app.draft.email, "john@example.com");
        app.draft.name = "John D.".to_string();
        assert_eq!(app.submit_form(), Ok(1));

        let u = app.directory.get(1).unwrap();
        assert_eq!(u.name, "John D.");
        assert_eq!(u.email, "john@example.com");
        assert_eq!(u.role, "admin");
        assert_eq!(u.status, UserStatus::Active);
        assert_eq!(app.users().len(), 2);
        assert_eq!(app.editing_user, None);
    }

    #[test]
    fn test_edit_unknown_user_does_not_open() {
        let mut app = create_test_app();
        assert!(!app.open_edit_modal(99));
        assert!(app.modal.is_none());
    }

    #[test]
    fn test_toggle_status_twice_restores() {
        let mut app = create_test_app();
        app.toggle_status(2);
        assert_eq!(app.directory.get(2).unwrap().status, UserStatus::Inactive);
        app.toggle_status(2);
        assert_eq!(app.directory.get(2).unwrap().status, UserStatus::Active);
        // other users untouched
        assert_eq!(app.directory.get(1).unwrap().status, UserStatus::Active);
    }

    #[test]
    fn test_delete_after_confirmation() {
        let mut app = create_test_app();
        assert!(app.request_delete(1));
        assert!(matches!(app.modal, Some(ModalState::DeleteConfirm { user_id: 1, .. })));
        // nothing happens until answered
        assert_eq!(app.users().len(), 2);

        let removed = app.resolve_delete(true).expect("user removed");
        assert_eq!(removed.id, 1);
        assert_eq!(app.users().len(), 1);
        assert_eq!(app.users()[0].id, 2);
        assert!(app.modal.is_none());
    }

    #[test]
    fn test_declined_delete_keeps_list() {
        let mut app = create_test_app();
        let before = app.users().to_vec();
        app.request_delete(2);
        assert!(app.resolve_delete(false).is_none());
        assert_eq!(app.users(), before.as_slice());
        assert!(app.modal.is_none());
    }

    #[test]
    fn test_resolve_without_prompt_is_noop() {
        let mut app = create_test_app();
        assert!(app.resolve_delete(true).is_none());
        assert_eq!(app.users().len(), 2);
    }

    #[test]
    fn test_add_then_cancel_resets_draft() {
        let mut app = create_test_app();
        app.open_add_modal();
        fill_draft(&mut app, "Half typed", "half@");
        app.close_modal();
        assert_eq!(app.users().len(), 2);
        assert_eq!(app.draft, UserDraft::default());
        assert!(app.modal.is_none());
    }

    #[test]
    fn test_rejected_submit_changes_nothing() {
        let mut app = create_test_app();
        app.open_add_modal();
        fill_draft(&mut app, "", "a@x.com");
        assert_eq!(app.submit_add(), Err(FormError::NameRequired));
        assert_eq!(app.users().len(), 2);
        match &app.modal {
            Some(ModalState::UserForm { error, .. }) => {
                assert_eq!(error.as_deref(), Some("Name is required"))
            }
            other => panic!("form should stay open, got {:?}", other),
        }
        // draft is kept for correction
        assert_eq!(app.draft.email, "a@x.com");
    }

    #[test]
    fn test_rejected_edit_keeps_user_and_form() {
        let mut app = create_test_app();
        let before = app.directory.get(2).cloned();
        assert!(app.open_edit_modal(2));

        app.draft.name.clear();
        assert_eq!(app.submit_form(), Err(FormError::NameRequired));
        assert_eq!(app.directory.get(2).cloned(), before);
        assert_eq!(app.editing_user, Some(2));
        assert!(matches!(app.modal, Some(ModalState::UserForm { error: Some(_), .. })));
        assert_eq!(app.input_mode, InputMode::Modal);

        fill_draft(&mut app, "Jane S.", "jane at example");
        assert_eq!(app.submit_edit(2), Err(FormError::EmailMalformed));
        assert_eq!(app.directory.get(2).cloned(), before);
        assert_eq!(app.editing_user, Some(2));
        match &app.modal {
            Some(ModalState::UserForm { error, .. }) => {
                assert_eq!(error.as_deref(), Some("Email must look like name@domain"))
            }
            other => panic!("form should stay open, got {:?}", other),
        }
        assert_eq!(app.users().len(), 2);
    }

    #[test]
    fn test_email_whitespace_trimmed_on_submit() {
        let mut app = create_test_app();
        app.open_add_modal();
        fill_draft(&mut app, "Alice", "  a@x.com ");
        let id = app.submit_add().expect("valid draft");
        assert_eq!(app.directory.get(id).unwrap().email, "a@x.com");

        assert!(app.open_edit_modal(1));
        app.draft.email = "\tjd@example.com  ".to_string();
        assert_eq!(app.submit_form(), Ok(1));
        assert_eq!(app.directory.get(1).unwrap().email, "jd@example.com");
    }

    #[test]
    fn test_ids_not_reused_after_delete_then_add() {
        let mut app = create_test_app();
        app.request_delete(2);
        app.resolve_delete(true);
        app.open_add_modal();
        fill_draft(&mut app, "Zed", "z@x.com");
        let id = app.submit_add().unwrap();
        assert_eq!(id, 3);
        assert_ne!(id, 2);
    }

    #[test]
    fn test_switch_tab_keeps_data() {
        let mut app = create_test_app();
        app.move_selection(1);
        app.switch_tab(ActiveTab::Roles);
        assert_eq!(app.active_tab, ActiveTab::Roles);
        assert_eq!(app.selected_index, 0);
        assert_eq!(app.users().len(), 2);
        assert!(app.selected_user().is_none());
        assert_eq!(app.selected_role().map(|r| r.name.as_str()), Some("admin"));
    }

    #[test]
    fn test_search_filters_active_list() {
        let mut app = create_test_app();
        app.set_search("JANE@");
        let hits: Vec<u32> = app.filtered_users().iter().map(|u| u.id).collect();
        assert_eq!(hits, vec![2]);

        app.switch_tab(ActiveTab::Roles);
        app.set_search("adm");
        assert_eq!(app.visible_len(), 1);
        app.set_search("");
        assert_eq!(app.visible_len(), 2);
    }

    #[test]
    fn test_selection_clamped_after_filter_and_delete() {
        let mut app = create_test_app();
        app.move_selection(5);
        assert_eq!(app.selected_index, 1);
        app.set_search("john");
        assert_eq!(app.selected_index, 0);
        app.set_search("");
        app.move_selection(1);
        app.request_delete(2);
        app.resolve_delete(true);
        assert_eq!(app.selected_index, 0);
        app.request_delete(1);
        app.resolve_delete(true);
        assert_eq!(app.selected_index, 0);
        assert!(app.selected_user().is_none());
    }

    #[test]
    fn test_roles_are_read_only() {
        let mut app = create_test_app();
        app.switch_tab(ActiveTab::Roles);
        let before = app.roles.clone();
        app.notify_roles_read_only();
        assert!(matches!(app.modal, Some(ModalState::Info { .. })));
        assert_eq!(app.roles, before);
    }
}

#[cfg(test)]
mod error_handling_tests {
    use std::error::Error as _;
    use std::path::Path;

    use rbac_dashboard::error::{IoContext, SetupError};

    #[test]
    fn test_io_error_names_action_and_path() {
        let base_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let result: Result<(), std::io::Error> = Err(base_error);

        let err = result.at_path("open log file", Path::new("/tmp/dash.log")).unwrap_err();
        let err_string = err.to_string();
        assert!(err_string.contains("open log file /tmp/dash.log"));
        assert!(err_string.contains("file not found"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_not_a_directory_message() {
        let err = SetupError::NotADirectory(Path::new("/etc/hosts").to_path_buf());
        assert_eq!(err.to_string(), "/etc/hosts is not a directory");
        assert!(err.source().is_none());
    }
}
