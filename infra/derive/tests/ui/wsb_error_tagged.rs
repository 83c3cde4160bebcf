use std::borrow::Cow;
use wsb_derive::wsb_error;

mod leaf {
    use std::borrow::Cow;

    #[wsb_derive::wsb_error]
    pub enum LeafError {
        #[error("leaf failed{}: {message}", format_context(.context))]
        Failed { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    }
}

use leaf::LeafError;

// `Tagged` carries a name next to its source, so no `From<LeafError>` is generated.
#[wsb_error]
pub enum TaggedError {
    #[error("{name}{}: {source}", format_context(.context))]
    Tagged { name: Cow<'static, str>, source: LeafError, context: Option<Cow<'static, str>> },
}

fn main() {
    let leaf = LeafError::Failed { message: "boom".into(), context: None };
    let err = TaggedError::Tagged { name: "a".into(), source: leaf, context: None };
    assert_eq!(err.to_string(), "a: leaf failed: boom");
    assert!(std::error::Error::source(&err).is_some());
}
