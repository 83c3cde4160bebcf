use std::borrow::Cow;
use wsb_derive::wsb_error;

#[wsb_error]
pub enum ProbeError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read_missing() -> Result<String, ProbeError> {
    std::fs::read_to_string("/definitely/not/here").context("reading fixture")
}

fn main() {
    let err = read_missing().unwrap_err();
    assert!(err.to_string().starts_with("IO error (reading fixture): "));

    let internal: ProbeError = "boom".into();
    assert_eq!(internal.to_string(), "Internal error: boom");

    let io: ProbeError = std::io::Error::other("disk").into();
    assert_eq!(io.to_string(), "IO error: disk");
}
