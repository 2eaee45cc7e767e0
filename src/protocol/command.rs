use std::fmt;

/// A command line sent to the server.
///
/// Only the line itself is modelled here; binary bodies that follow
/// `IDENTIFY` and `PUB` are written separately by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    Identify,
    Subscribe { topic: &'a str, channel: &'a str },
    Publish { topic: &'a str },
    Ready(u64),
    Finish(&'a str),
    Touch(&'a str),
    Close,
    Nop,
}

impl Command<'_> {
    /// The full, newline-terminated line.
    pub fn line(&self) -> String {
        format!("{self}\n")
    }
}

impl fmt::Display for Command<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identify => write!(f, "IDENTIFY"),
            Self::Subscribe { topic, channel } => write!(f, "SUB {topic} {channel}"),
            Self::Publish { topic } => write!(f, "PUB {topic}"),
            Self::Ready(count) => write!(f, "RDY {count}"),
            Self::Finish(id) => write!(f, "FIN {id}"),
            Self::Touch(id) => write!(f, "TOUCH {id}"),
            Self::Close => write!(f, "CLS"),
            Self::Nop => write!(f, "NOP"),
        }
    }
}
