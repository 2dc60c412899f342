#[cfg(test)]
#[path = "slash_commands_test.rs"]
mod tests;

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- /bots - Lists all available chatbots.
- /bot (/b) [NAME] - Switches to a chatbot. Clears the current conversation.
- /sessions (/s) - Lists your sessions with the selected chatbot.
- /session [SESSION_ID,new] - Opens a session by ID, or starts a new one that is created when you send your first message.
- /new (/n) - Shorthand for `/session new`.
- /attach (/a) [PATH...] - Attaches up to 5 images, text files, or PDFs to your next message.
- /detach (/d) [FILE_NUMBER] - Removes an attached file.
- /files (/f) - Lists attached files.
- /login [GOOGLE_CREDENTIAL] - Signs in with a Google identity credential.
- /logout - Signs out and clears the conversation.
- /quit /exit (/q) - Exit Parley.
- /help (/h) - Provides this help menu.

Anything else you type is sent to the selected chatbot.
        "#;

    return text.trim().to_string();
}

pub struct SlashCommand {
    command: String,
    pub args: Vec<String>,
}

impl SlashCommand {
    pub fn parse(text: &str) -> Option<SlashCommand> {
        let mut args = text
            .split_whitespace()
            .map(|e| return e.to_string())
            .collect::<Vec<String>>();
        if args.is_empty() {
            return None;
        }
        let prefix = args.remove(0);

        let cmd = SlashCommand {
            command: prefix,
            args,
        };
        if cmd.is_quit()
            || cmd.is_help()
            || cmd.is_bot_list()
            || cmd.is_bot_select()
            || cmd.is_session_list()
            || cmd.is_session_select()
            || cmd.is_session_new()
            || cmd.is_attach()
            || cmd.is_detach()
            || cmd.is_file_list()
            || cmd.is_login()
            || cmd.is_logout()
        {
            return Some(cmd);
        }

        return None;
    }

    /// Arguments joined back together, for names containing spaces.
    pub fn rest(&self) -> String {
        return self.args.join(" ");
    }

    pub fn is_quit(&self) -> bool {
        return ["/q", "/quit", "/exit"].contains(&self.command.as_str());
    }

    pub fn is_help(&self) -> bool {
        return ["/h", "/help"].contains(&self.command.as_str());
    }

    pub fn is_bot_list(&self) -> bool {
        return self.command == "/bots";
    }

    pub fn is_bot_select(&self) -> bool {
        return ["/b", "/bot"].contains(&self.command.as_str());
    }

    pub fn is_session_list(&self) -> bool {
        return ["/s", "/sessions"].contains(&self.command.as_str());
    }

    pub fn is_session_select(&self) -> bool {
        return self.command == "/session";
    }

    pub fn is_session_new(&self) -> bool {
        return ["/n", "/new"].contains(&self.command.as_str());
    }

    pub fn is_attach(&self) -> bool {
        return ["/a", "/attach"].contains(&self.command.as_str());
    }

    pub fn is_detach(&self) -> bool {
        return ["/d", "/detach"].contains(&self.command.as_str());
    }

    pub fn is_file_list(&self) -> bool {
        return ["/f", "/files"].contains(&self.command.as_str());
    }

    pub fn is_login(&self) -> bool {
        return self.command == "/login";
    }

    pub fn is_logout(&self) -> bool {
        return self.command == "/logout";
    }
}
