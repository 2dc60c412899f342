use super::help_text;
use super::SlashCommand;

#[test]
fn it_parse_empty_string() {
    assert!(SlashCommand::parse("").is_none());
}

#[test]
fn it_parse_space_only() {
    assert!(SlashCommand::parse("   ").is_none());
}

#[test]
fn it_parse_single_slash() {
    assert!(SlashCommand::parse("/").is_none());
}

#[test]
fn it_parse_plain_text() {
    assert!(SlashCommand::parse("Hello there").is_none());
}

#[test]
fn it_parse_valid_prefix() {
    let cmd = SlashCommand::parse("/q").unwrap();
    assert_eq!(cmd.command, "/q");
    assert!(cmd.is_quit());
}

#[test]
fn it_is_quit() {
    assert!(SlashCommand::parse("/quit").unwrap().is_quit());
    assert!(SlashCommand::parse("/exit").unwrap().is_quit());
}

#[test]
fn it_is_bot_select_with_name() {
    let cmd = SlashCommand::parse("/bot  Travel Agent").unwrap();
    assert!(cmd.is_bot_select());
    assert_eq!(cmd.rest(), "Travel Agent");
}

#[test]
fn it_is_bot_list() {
    let cmd = SlashCommand::parse("/bots").unwrap();
    assert!(cmd.is_bot_list());
    assert!(!cmd.is_bot_select());
}

#[test]
fn it_is_session_select() {
    let cmd = SlashCommand::parse("/session new").unwrap();
    assert!(cmd.is_session_select());
    assert_eq!(cmd.args, vec!["new".to_string()]);
}

#[test]
fn it_is_session_list() {
    assert!(SlashCommand::parse("/s").unwrap().is_session_list());
    assert!(SlashCommand::parse("/sessions").unwrap().is_session_list());
}

#[test]
fn it_is_session_new() {
    assert!(SlashCommand::parse("/n").unwrap().is_session_new());
}

#[test]
fn it_is_attach_with_paths() {
    let cmd = SlashCommand::parse("/attach ./a.png ./b.txt").unwrap();
    assert!(cmd.is_attach());
    assert_eq!(cmd.args.len(), 2);
}

#[test]
fn it_is_detach() {
    let cmd = SlashCommand::parse("/d 2").unwrap();
    assert!(cmd.is_detach());
    assert_eq!(cmd.args, vec!["2".to_string()]);
}

#[test]
fn it_is_login_and_logout() {
    assert!(SlashCommand::parse("/login eyJhbGciOi").unwrap().is_login());
    assert!(SlashCommand::parse("/logout").unwrap().is_logout());
}

#[test]
fn it_lists_every_command_in_help() {
    let help = help_text();
    for cmd in [
        "/bots", "/bot", "/sessions", "/session", "/new", "/attach", "/detach", "/files",
        "/login", "/logout", "/quit", "/help",
    ] {
        assert!(help.contains(cmd), "help is missing {cmd}");
    }
}
