use std::fmt;

#[macro_export]
macro_rules! swipecal_err {
    // Case with just a message literal
    ($kind:expr, $msg:expr) => {
        $crate::utils::errors::SwipecalError {
            kind: $kind,
            message: $msg.into(),
            file: file!(),
            line: line!(),
        }
    };
    // Case with message + format arguments
    ($kind:expr, $fmt:expr, $($args:tt)*) => {
        $crate::utils::errors::SwipecalError {
            kind: $kind,
            message: format!($fmt, $($args)*),
            file: file!(),
            line: line!(),
        }
    };
}

#[derive(Debug)]
pub struct SwipecalError {
    pub kind: SwipecalErrorKind,
    pub message: String,
    pub file: &'static str,
    pub line: u32,
}
impl fmt::Display for SwipecalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} ({}:{})",
            self.kind, self.message, self.file, self.line
        )
    }
}
impl std::error::Error for SwipecalError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum SwipecalErrorKind {
    Deserialize,

    DateParse,

    UndefinedAttribute,
    InvalidAttribute,
    InvalidData,

    TaskJoin,

    FileOpen,
    FileExist,

    DirCreate,
    DirRead,

    EnvVar,

    Gtk,
}
