use showcase_cli::{parse_command, Command, CommandError};
use showcase_core::UiEvent;

fn event(line: &str) -> UiEvent {
    match parse_command(line) {
        Ok(Command::Event(event)) => event,
        other => panic!("expected an event for {line:?}, got {other:?}"),
    }
}

#[test]
fn navigation_commands() {
    assert_eq!(event("nav demo"), UiEvent::NavigateSection("demo".into()));
    assert_eq!(event("tab code"), UiEvent::NavigateTab("code".into()));
    assert_eq!(event("back"), UiEvent::HistoryBack);
    assert_eq!(event("forward"), UiEvent::HistoryForward);
}

#[test]
fn request_with_and_without_body() {
    assert_eq!(
        event("GET /api/users/1"),
        UiEvent::Request {
            method: "GET".into(),
            path: "/api/users/1".into(),
            body: None,
        }
    );
    assert_eq!(
        event(r#"post /api/users {"name": "Alice", "email": "alice@example.com"}"#),
        UiEvent::Request {
            method: "post".into(),
            path: "/api/users".into(),
            body: Some(r#"{"name": "Alice", "email": "alice@example.com"}"#.into()),
        }
    );
}

#[test]
fn unsupported_methods_still_reach_the_backend() {
    assert!(matches!(
        event("OPTIONS /api/users"),
        UiEvent::Request { ref method, .. } if method == "OPTIONS"
    ));
}

#[test]
fn add_takes_last_word_as_email() {
    assert_eq!(
        event("add Mary Ann Evans mary@example.com"),
        UiEvent::CreateUser {
            name: "Mary Ann Evans".into(),
            email: "mary@example.com".into(),
        }
    );
}

#[test]
fn rename_and_remove() {
    assert_eq!(
        event("rename 2 Jane Doe"),
        UiEvent::RenameUser {
            id: 2,
            name: "Jane Doe".into(),
        }
    );
    assert_eq!(event("rm 3"), UiEvent::DeleteUser { id: 3 });
}

#[test]
fn bad_input_is_reported() {
    assert_eq!(
        parse_command("rm three"),
        Err(CommandError::BadId("three".into()))
    );
    assert_eq!(
        parse_command("add Alice"),
        Err(CommandError::Usage("add <name> <email>"))
    );
    assert_eq!(
        parse_command("launch"),
        Err(CommandError::Unknown("launch".into()))
    );
}

#[test]
fn keywords() {
    assert_eq!(parse_command("users"), Ok(Command::Users));
    assert_eq!(parse_command("help"), Ok(Command::Help));
    assert_eq!(parse_command("quit"), Ok(Command::Quit));
}
