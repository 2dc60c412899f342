use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Author {
    User,
    Bot(String),
    Parley,
}

impl Author {
    /// Maps the `sender` label stored by the remote service back to an author.
    /// The service records the user's own messages under "You".
    pub fn from_sender(sender: &str) -> Author {
        let trimmed = sender.trim();
        if trimmed.eq_ignore_ascii_case("you") || trimmed.eq_ignore_ascii_case("user") {
            return Author::User;
        }

        return Author::Bot(trimmed.to_string());
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Author::User => return write!(f, "You"),
            Author::Bot(name) => return write!(f, "{name}"),
            Author::Parley => return write!(f, "Parley"),
        }
    }
}
