#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Input is not a Jira comment: {0}")]
    InvalidComment(String),

    #[error("{0} unsupported element(s) skipped while --strict is set")]
    StrictWarnings(usize),
}
