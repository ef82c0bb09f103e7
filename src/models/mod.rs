mod question;
mod response;

pub use question::{Question, QuestionKind};
pub use response::Response;
