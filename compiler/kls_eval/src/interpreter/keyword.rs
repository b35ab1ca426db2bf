//! Statement keywords.

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub(crate) enum Keyword {
    Set,
    Call,
    Goto,
    Var,
    Export,
    Pop,
    If,
    Else,
    Fi,
    While,
    Done,
    Define,
    End,
    Return,
    Exit,
}

impl Keyword {
    pub(crate) fn lookup(text: &str) -> Option<Keyword> {
        match text {
            "set" => Some(Keyword::Set),
            "call" => Some(Keyword::Call),
            "goto" => Some(Keyword::Goto),
            "var" => Some(Keyword::Var),
            "export" => Some(Keyword::Export),
            "pop" => Some(Keyword::Pop),
            "if" => Some(Keyword::If),
            "else" => Some(Keyword::Else),
            "fi" => Some(Keyword::Fi),
            "while" => Some(Keyword::While),
            "done" => Some(Keyword::Done),
            "define" => Some(Keyword::Define),
            "end" => Some(Keyword::End),
            "return" => Some(Keyword::Return),
            "exit" => Some(Keyword::Exit),
            _ => None,
        }
    }
}
