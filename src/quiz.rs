//! Question bank
//!
//! Immutable stream → questions mapping, built once at startup and shared
//! read-only by every session.

mod bank;

pub use bank::default_bank;

use serde::Serialize;

/// A single multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub text: String,
    pub options: Vec<String>,
}

impl Question {
    pub fn new(text: impl Into<String>, options: &[&str]) -> Self {
        Self {
            text: text.into(),
            options: options.iter().map(|o| (*o).to_string()).collect(),
        }
    }

    pub fn has_option(&self, choice: &str) -> bool {
        self.options.iter().any(|o| o == choice)
    }
}

/// A subject track and its ordered questions
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stream {
    pub name: String,
    pub questions: Vec<Question>,
}

/// Ordered collection of streams
#[derive(Debug, Clone, Default)]
pub struct QuestionBank {
    streams: Vec<Stream>,
}

impl QuestionBank {
    /// Builder used by the static bank and tests
    #[must_use]
    pub fn with_stream(mut self, name: impl Into<String>, questions: Vec<Question>) -> Self {
        self.streams.push(Stream {
            name: name.into(),
            questions,
        });
        self
    }

    pub fn stream(&self, name: &str) -> Option<&Stream> {
        self.streams.iter().find(|s| s.name == name)
    }

    pub fn questions(&self, stream: &str) -> Option<&[Question]> {
        self.stream(stream).map(|s| s.questions.as_slice())
    }

    pub fn question(&self, stream: &str, index: usize) -> Option<&Question> {
        self.questions(stream).and_then(|q| q.get(index))
    }

    /// Number of questions in a stream (0 for unknown streams)
    pub fn len(&self, stream: &str) -> usize {
        self.questions(stream).map_or(0, <[Question]>::len)
    }

    pub fn contains(&self, stream: &str) -> bool {
        self.stream(stream).is_some()
    }

    pub fn stream_names(&self) -> impl Iterator<Item = &str> {
        self.streams.iter().map(|s| s.name.as_str())
    }

    pub fn streams(&self) -> &[Stream] {
        &self.streams
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bank_streams_in_order() {
        let bank = default_bank();
        let names: Vec<_> = bank.stream_names().collect();
        assert_eq!(names, vec!["Science", "Mathematics", "Arts", "Commerce"]);
    }

    #[test]
    fn test_default_bank_shape() {
        let bank = default_bank();
        for stream in bank.streams() {
            assert_eq!(stream.questions.len(), 10, "{}", stream.name);
            for question in &stream.questions {
                assert!(!question.text.is_empty());
                assert!(
                    (2..=3).contains(&question.options.len()),
                    "{} has {} options",
                    question.text,
                    question.options.len()
                );
            }
        }
    }

    #[test]
    fn test_lookup() {
        let bank = default_bank();
        let q = bank.question("Commerce", 5).unwrap();
        assert_eq!(q.text, "Do you want to pursue CA/CS/MBA?");
        assert!(q.has_option("MBA"));
        assert!(!q.has_option("Yes"));

        assert!(bank.question("Commerce", 10).is_none());
        assert!(bank.questions("Music").is_none());
        assert_eq!(bank.len("Music"), 0);
        assert!(!bank.contains("science"));
    }
}
