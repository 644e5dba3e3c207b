use thiserror::Error;

use faena_core::models::issue::ValidationIssue;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no form loaded")]
    NotLoaded,

    #[error("form could not be loaded: {message}")]
    Load { message: String },

    #[error("form is read-only")]
    ReadOnly,

    #[error("question '{0}' is read-only")]
    QuestionReadOnly(String),

    #[error("unknown question '{0}'")]
    UnknownQuestion(String),

    #[error("'{value}' is not an option of question '{question_id}'")]
    UnknownOption { question_id: String, value: String },

    #[error("question '{question_id}' does not accept {input} input")]
    UnsupportedInput {
        question_id: String,
        input: &'static str,
    },

    #[error("'{file_name}' is not an image")]
    NotAnImage { file_name: String },

    #[error("question '{question_id}' accepts at most {max} pictures")]
    TooManyPictures { question_id: String, max: u32 },

    #[error("question '{question_id}' has no picture at index {index}")]
    NoSuchPicture { question_id: String, index: usize },

    #[error("question '{0}' does not accept comments")]
    CommentsNotAllowed(String),

    #[error("{} field(s) need attention", .0.len())]
    Validation(Vec<ValidationIssue>),

    #[error("a submission is already in progress")]
    Busy,

    #[error("submission failed: {message}")]
    Submit { message: String },
}
