#[cfg(test)]
#[path = "shell_test.rs"]
mod tests;

use std::io::Write;
use std::path;

use anyhow::Result;
use owo_colors::OwoColorize;
use owo_colors::Stream;
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;
use tokio::sync::mpsc;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::help_text;
use crate::domain::models::Action;
use crate::domain::models::AttachedFile;
use crate::domain::models::Author;
use crate::domain::models::Delivery;
use crate::domain::models::Event;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::models::Session;
use crate::domain::models::SessionSelection;
use crate::domain::models::SlashCommand;
use crate::domain::services::AppState;
use crate::domain::services::Attachments;
use crate::domain::services::Notice;
use crate::domain::services::NoticeKind;

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

fn format_bots(bots: &[String], selected: Option<&str>) -> String {
    if bots.is_empty() {
        return "No chatbots are available yet.".to_string();
    }

    return bots
        .iter()
        .map(|bot| {
            let marker = if Some(bot.as_str()) == selected {
                "*"
            } else {
                " "
            };
            return format!("{marker} {bot}");
        })
        .collect::<Vec<String>>()
        .join("\n");
}

fn format_sessions(sessions: &[Session], selection: &SessionSelection) -> String {
    let mut lines = sessions
        .iter()
        .map(|session| {
            let marker = if selection.session_id() == Some(session.id.as_str()) {
                "*"
            } else {
                " "
            };
            if session.name.is_empty() {
                return format!("{marker} {}", session.id);
            }
            return format!("{marker} {} (ID: {})", session.name, session.id);
        })
        .collect::<Vec<String>>();

    if selection.is_new() {
        lines.push("* new chat".to_string());
    }
    if lines.is_empty() {
        return "There are no sessions yet. Send a message to start one.".to_string();
    }

    return lines.join("\n");
}

fn format_files(files: &[AttachedFile]) -> String {
    if files.is_empty() {
        return "No files attached.".to_string();
    }

    return files
        .iter()
        .enumerate()
        .map(|(idx, file)| {
            let mut line = format!(
                "{}. {} ({}, {} bytes)",
                idx + 1,
                file.name,
                file.mime_type,
                file.size
            );
            if let Some(preview) = file.preview_path() {
                line = format!("{line}\n   preview: {}", preview.to_string_lossy());
            }
            return line;
        })
        .collect::<Vec<String>>()
        .join("\n");
}

fn format_message(message: &Message) -> String {
    let mut lines = vec![message.text.to_string()];
    for file in message.files.iter() {
        lines.push(format!(
            "  [{}] {} ({} bytes)",
            file.mime_type, file.name, file.size
        ));
    }
    if let Delivery::Failed(reason) = message.delivery() {
        lines.push(format!("  (not delivered: {reason})"));
    }

    return lines.join("\n");
}

fn format_header(state: &AppState) -> String {
    let chatbot = match &state.chatbot {
        Some(chatbot) => chatbot.to_string(),
        None => return "No chatbot selected. Run /bots to pick one.".to_string(),
    };

    let session = match &state.selection {
        SessionSelection::Existing(id) => state
            .sessions
            .iter()
            .find(|session| return &session.id == id && !session.name.is_empty())
            .map(|session| return session.name.to_string())
            .unwrap_or_else(|| return id.to_string()),
        _ => "new chat".to_string(),
    };

    return format!("--- {chatbot} / {session} ---");
}

fn prompt(state: &AppState) -> String {
    if state.login_open {
        return "credential> ".to_string();
    }
    if let Some(chatbot) = &state.chatbot {
        return format!("{chatbot}> ");
    }

    return "> ".to_string();
}

fn print_message(message: &Message) {
    let label = format!("{}:", message.author);
    let text = format_message(message);

    if message.message_type() == MessageType::Error {
        println!(
            "{} {}",
            label.if_supports_color(Stream::Stdout, |e| return e.red()),
            text.if_supports_color(Stream::Stdout, |e| return e.red())
        );
        return;
    }

    match message.author {
        Author::User => println!(
            "{} {text}",
            label.if_supports_color(Stream::Stdout, |e| return e.cyan())
        ),
        Author::Bot(_) => println!(
            "{} {text}",
            label.if_supports_color(Stream::Stdout, |e| return e.green())
        ),
        Author::Parley => println!(
            "{} {text}",
            label.if_supports_color(Stream::Stdout, |e| return e.yellow())
        ),
    }
}

fn print_notice(notice: &Notice) {
    let label = format!("{}:", Author::Parley);
    match notice.kind {
        NoticeKind::Info => println!(
            "{} {}",
            label.if_supports_color(Stream::Stdout, |e| return e.yellow()),
            notice.text
        ),
        NoticeKind::Advisory => println!(
            "{} {}",
            label.if_supports_color(Stream::Stdout, |e| return e.yellow()),
            notice
                .text
                .if_supports_color(Stream::Stdout, |e| return e.bold())
        ),
    }
}

fn advise(text: &str) {
    print_notice(&Notice {
        kind: NoticeKind::Advisory,
        text: text.to_string(),
    });
}

/// Prints whatever changed in the thread since the last call. A new view
/// generation means the thread was swapped out and is printed from the top.
struct Renderer {
    generation: Option<u64>,
    rendered: usize,
}

impl Renderer {
    fn new() -> Renderer {
        return Renderer {
            generation: None,
            rendered: 0,
        };
    }

    fn render(&mut self, state: &mut AppState) -> bool {
        let mut printed = false;

        if self.generation != Some(state.view_generation()) {
            self.generation = Some(state.view_generation());
            self.rendered = 0;
            if state.chatbot.is_some() {
                println!(
                    "\n{}",
                    format_header(state).if_supports_color(Stream::Stdout, |e| return e.dimmed())
                );
                printed = true;
            }
        }

        if state.messages.len() < self.rendered {
            self.rendered = state.messages.len();
        }
        for message in state.messages[self.rendered..].iter() {
            print_message(message);
            printed = true;
        }
        self.rendered = state.messages.len();

        for notice in state.take_notices() {
            print_notice(&notice);
            printed = true;
        }

        return printed;
    }
}

async fn attach(state: &mut AppState, paths: &[String]) {
    let mut batch = vec![];
    for path_str in paths {
        match Attachments::read(&path::PathBuf::from(path_str)).await {
            Ok(file) => batch.push(file),
            Err(err) => {
                tracing::warn!(error = ?err, path = path_str.as_str(), "Skipping unreadable file");
                advise(&format!("Couldn't read {path_str}, skipping it."));
            }
        }
    }

    if !batch.is_empty() {
        state.attach_files(batch);
    }
}

async fn handle_command(state: &mut AppState, command: &SlashCommand) -> Result<Flow> {
    if command.is_quit() {
        return Ok(Flow::Quit);
    }

    if command.is_help() {
        println!("{}", help_text());
    } else if command.is_bot_list() {
        println!("{}", format_bots(&state.bots, state.chatbot.as_deref()));
    } else if command.is_bot_select() {
        let name = command.rest();
        if name.is_empty() {
            println!("{}", format_bots(&state.bots, state.chatbot.as_deref()));
        } else {
            state.select_chatbot(&name)?;
        }
    } else if command.is_session_list() {
        println!("{}", format_sessions(&state.sessions, &state.selection));
    } else if command.is_session_select() {
        match SessionSelection::parse(&command.rest()) {
            SessionSelection::None => {
                println!("{}", format_sessions(&state.sessions, &state.selection));
            }
            selection => state.select_session(selection)?,
        }
    } else if command.is_session_new() {
        state.select_session(SessionSelection::New)?;
    } else if command.is_attach() {
        if command.args.is_empty() {
            advise("Add one or more file paths after /attach.");
        } else {
            attach(state, &command.args).await;
        }
    } else if command.is_detach() {
        let removed = command
            .args
            .first()
            .and_then(|arg| return arg.parse::<usize>().ok())
            .filter(|idx| return *idx > 0)
            .map(|idx| return state.remove_attachment(idx - 1))
            .unwrap_or(false);
        if !removed && !state.creating_session {
            advise("Pass the number of an attached file, see /files.");
        }
    } else if command.is_file_list() {
        println!("{}", format_files(&state.attachments));
    } else if command.is_login() {
        state.login(&command.rest())?;
    } else if command.is_logout() {
        state.logout()?;
    }

    return Ok(Flow::Continue);
}

async fn handle_line(state: &mut AppState, line: &str) -> Result<Flow> {
    if let Some(command) = SlashCommand::parse(line) {
        return handle_command(state, &command).await;
    }

    if state.login_open {
        if line.trim().is_empty() {
            state.cancel_login();
        } else {
            state.login(line)?;
        }
        return Ok(Flow::Continue);
    }

    state.set_compose(line);
    state.send_message()?;

    return Ok(Flow::Continue);
}

fn print_prompt(state: &AppState) -> Result<()> {
    print!(
        "{}",
        prompt(state).if_supports_color(Stream::Stdout, |e| return e.bold())
    );
    std::io::stdout().flush()?;

    return Ok(());
}

/// Runs the chat loop until the user quits, stdin closes or the actions
/// worker goes away.
pub async fn start(
    tx: mpsc::UnboundedSender<Action>,
    mut rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut state = AppState::new(tx);
    state.init(
        &Config::get(ConfigKey::Chatbot),
        &Config::get(ConfigKey::SessionID),
    )?;

    let welcome = "Welcome to Parley! Type /help for commands.";
    println!(
        "{}",
        welcome.if_supports_color(Stream::Stdout, |e| return e.bold())
    );

    let mut renderer = Renderer::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    print_prompt(&state)?;

    loop {
        let mut prompt_again = false;
        tokio::select! {
            line = lines.next_line() => {
                let line = match line? {
                    Some(line) => line,
                    None => break,
                };
                if handle_line(&mut state, &line).await? == Flow::Quit {
                    break;
                }
                prompt_again = true;
            }
            event = rx.recv() => {
                match event {
                    Some(event) => state.handle_event(event)?,
                    None => break,
                }
            }
        }

        if renderer.render(&mut state) {
            prompt_again = true;
        }
        if prompt_again {
            print_prompt(&state)?;
        }
    }

    state.discard_compose();
    return Ok(());
}
