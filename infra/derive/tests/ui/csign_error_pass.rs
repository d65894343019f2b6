use csign_derive::csign_error;
use std::borrow::Cow;

#[csign_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Counter overflow{}: {message}", format_context(.context))]
    Overflow { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read() -> Result<(), DemoError> {
    Err(std::io::Error::other("disk")).context("reading activation")
}

fn advance(counter: u64) -> Result<u64, DemoError> {
    counter.checked_add(1).ok_or_else(|| "counter exhausted".into())
}

fn main() {
    let err = read().unwrap_err();
    assert!(err.to_string().contains("(reading activation)"));

    let err = advance(u64::MAX).unwrap_err();
    assert!(matches!(err, DemoError::Internal { .. }));

    let overflow: Result<(), DemoError> = Err(DemoError::Overflow {
        message: "window".into(),
        context: None,
    });
    let err = overflow.context("probing").unwrap_err();
    assert_eq!(err.to_string(), "Counter overflow (probing): window");
}
