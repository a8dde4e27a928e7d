//! Built-in question bank

use super::{Question, QuestionBank};

const YES_NO_SOMETIMES: &[&str] = &["Yes", "No", "Sometimes"];
const YES_NO_MAYBE: &[&str] = &["Yes", "No", "Maybe"];
const YES_NO_SOMEWHAT: &[&str] = &["Yes", "No", "Somewhat"];

/// The four streams offered to students
pub fn default_bank() -> QuestionBank {
    QuestionBank::default()
        .with_stream(
            "Science",
            vec![
                Question::new("Do you enjoy conducting experiments?", YES_NO_SOMETIMES),
                Question::new(
                    "Would you like to work in a lab or field research?",
                    &["Lab", "Field", "Both"],
                ),
                Question::new("Are you curious about how the human body works?", YES_NO_SOMEWHAT),
                Question::new("Do you enjoy solving physics problems?", YES_NO_SOMETIMES),
                Question::new("Would you like a career in medicine?", YES_NO_MAYBE),
                Question::new("Do you enjoy chemistry experiments?", YES_NO_SOMETIMES),
                Question::new("Do you like studying about space and universe?", YES_NO_MAYBE),
                Question::new("Do you want to invent or innovate in technology?", YES_NO_MAYBE),
                Question::new("Do you like environmental studies?", YES_NO_MAYBE),
                Question::new(
                    "Would you prefer to become a scientist or researcher?",
                    &["Scientist", "Researcher", "Not sure"],
                ),
            ],
        )
        .with_stream(
            "Mathematics",
            vec![
                Question::new(
                    "Do you enjoy solving puzzles and logical problems?",
                    YES_NO_SOMETIMES,
                ),
                Question::new("Would you like to work in finance or analytics?", YES_NO_MAYBE),
                Question::new("Are you interested in computer algorithms?", YES_NO_SOMEWHAT),
                Question::new("Do you enjoy statistics and probability?", YES_NO_SOMETIMES),
                Question::new("Do you like abstract thinking?", YES_NO_SOMETIMES),
                Question::new("Do you want to pursue data science?", YES_NO_MAYBE),
                Question::new("Do you like optimization problems?", YES_NO_MAYBE),
                Question::new("Do you want to become a mathematician?", YES_NO_MAYBE),
                Question::new("Do you like teaching mathematics?", YES_NO_MAYBE),
                Question::new(
                    "Would you prefer working in academia or industry?",
                    &["Academia", "Industry", "Both"],
                ),
            ],
        )
        .with_stream(
            "Arts",
            vec![
                Question::new("Do you enjoy painting, music, or drama?", YES_NO_SOMETIMES),
                Question::new("Do you want to pursue literature studies?", YES_NO_MAYBE),
                Question::new("Do you like philosophy?", YES_NO_SOMEWHAT),
                Question::new("Are you interested in history and culture?", YES_NO_MAYBE),
                Question::new("Do you like designing or creating?", YES_NO_SOMETIMES),
                Question::new("Do you want to work in media or journalism?", YES_NO_MAYBE),
                Question::new("Do you like psychology?", YES_NO_SOMEWHAT),
                Question::new("Would you like a career in filmmaking?", YES_NO_MAYBE),
                Question::new("Do you enjoy languages?", YES_NO_SOMEWHAT),
                Question::new("Do you want to become a social scientist?", YES_NO_MAYBE),
            ],
        )
        .with_stream(
            "Commerce",
            vec![
                Question::new("Do you enjoy learning about business?", YES_NO_SOMEWHAT),
                Question::new("Would you like to become an entrepreneur?", YES_NO_MAYBE),
                Question::new("Are you interested in economics?", YES_NO_SOMEWHAT),
                Question::new("Do you like studying accounts?", YES_NO_SOMETIMES),
                Question::new("Do you want to work in banking?", YES_NO_MAYBE),
                Question::new("Do you want to pursue CA/CS/MBA?", &["CA", "CS", "MBA"]),
                Question::new("Do you like finance?", YES_NO_SOMEWHAT),
                Question::new("Do you want to become a business analyst?", YES_NO_MAYBE),
                Question::new("Would you like to work in stock market?", YES_NO_MAYBE),
                Question::new("Do you want to work in international business?", YES_NO_MAYBE),
            ],
        )
}
