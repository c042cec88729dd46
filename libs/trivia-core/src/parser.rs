//! Question set loaders.
//!
//! Two formats are accepted. Structured JSON, a list of categories:
//! ```json
//! [{"title": "Math", "questions": [{"value": 100, "question": "2 + 2", "answer": "4"}]}]
//! ```
//! and hand-authored markdown:
//! ```markdown
//! # Math
//! V: 100
//! Q: 2 + 2
//! A: 4
//!
//! V: 200
//! Q: 5 x 6
//! A: 30
//! ```
//! Question and answer text may span several lines.

use crate::error::{ParseError, Result};
use crate::types::{Category, Question, QuestionSet};

/// On-disk format of a question source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Markdown,
}

impl SourceFormat {
    /// Guess the format from a file name or URL. Anything not ending in
    /// `.md`/`.markdown` is treated as JSON.
    pub fn from_name(name: &str) -> Self {
        let lower = name.to_ascii_lowercase();
        if lower.ends_with(".md") || lower.ends_with(".markdown") {
            Self::Markdown
        } else {
            Self::Json
        }
    }
}

/// Parse content in the given format.
pub fn parse(content: &str, format: SourceFormat) -> Result<QuestionSet> {
    match format {
        SourceFormat::Json => parse_json(content),
        SourceFormat::Markdown => parse_markdown(content),
    }
}

/// Parse a JSON category list.
pub fn parse_json(content: &str) -> Result<QuestionSet> {
    let set: QuestionSet = serde_json::from_str(content)?;
    validate(set)
}

/// Parse markdown content into a question set.
pub fn parse_markdown(content: &str) -> Result<QuestionSet> {
    let mut parser = Parser::new();

    for (idx, line) in content.lines().enumerate() {
        parser.process_line(line, idx + 1)?;
    }

    validate(QuestionSet::new(parser.finalize()?))
}

/// Largest point value a question may carry.
pub const MAX_POINT_VALUE: i64 = 1_000_000;

/// Reject sets with no questions or with point values outside
/// `0..=MAX_POINT_VALUE`. Empty categories are kept; the board shows them
/// as hidden cells.
pub fn validate(set: QuestionSet) -> Result<QuestionSet> {
    let bad_value = set
        .categories
        .iter()
        .flat_map(|c| &c.questions)
        .map(|q| q.value)
        .find(|v| !(0..=MAX_POINT_VALUE).contains(v));
    if let Some(value) = bad_value {
        return Err(ParseError::ValueOutOfRange {
            value,
            max: MAX_POINT_VALUE,
        });
    }
    if set.is_empty() {
        return Err(ParseError::EmptySet);
    }
    Ok(set)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Field {
    Question,
    Answer,
}

struct QuestionBuilder {
    value: Option<i64>,
    question: Option<String>,
    answer: Option<String>,
    start_line: usize,
}

impl QuestionBuilder {
    fn new(start_line: usize) -> Self {
        Self {
            value: None,
            question: None,
            answer: None,
            start_line,
        }
    }

    fn build(self) -> Result<Question> {
        let value = self.value.ok_or(ParseError::MissingValue {
            line: self.start_line,
        })?;
        let question = self.question.ok_or(ParseError::MissingQuestion {
            line: self.start_line,
        })?;
        let answer = self.answer.ok_or(ParseError::MissingAnswer {
            line: self.start_line,
        })?;

        Ok(Question {
            value,
            question: question.trim().to_string(),
            answer: answer.trim().to_string(),
        })
    }
}

struct Parser {
    categories: Vec<Category>,
    category: Option<Category>,
    current: Option<QuestionBuilder>,
    current_field: Option<Field>,
    buffer: Vec<String>,
}

impl Parser {
    fn new() -> Self {
        Self {
            categories: Vec::new(),
            category: None,
            current: None,
            current_field: None,
            buffer: Vec::new(),
        }
    }

    fn process_line(&mut self, line: &str, line_num: usize) -> Result<()> {
        match Self::parse_line(line) {
            LineType::Category(title) => self.handle_category(title)?,
            LineType::Value(raw) => self.handle_value(raw, line_num)?,
            LineType::Question(text) => self.handle_question(text, line_num)?,
            LineType::Answer(text) => self.handle_answer(text, line_num)?,
            LineType::Text(text) => self.buffer.push(text.to_string()),
            LineType::Empty => self.buffer.push(String::new()),
        }
        Ok(())
    }

    fn parse_line(line: &str) -> LineType<'_> {
        let trimmed = line.trim();

        if let Some(rest) = trimmed.strip_prefix('#') {
            LineType::Category(rest.trim_start_matches('#').trim())
        } else if let Some(rest) = trimmed.strip_prefix("V:") {
            LineType::Value(rest.trim())
        } else if let Some(rest) = trimmed.strip_prefix("Q:") {
            LineType::Question(rest.trim())
        } else if let Some(rest) = trimmed.strip_prefix("A:") {
            LineType::Answer(rest.trim())
        } else if trimmed.is_empty() {
            LineType::Empty
        } else {
            LineType::Text(line)
        }
    }

    fn handle_category(&mut self, title: &str) -> Result<()> {
        self.finish_question()?;
        self.finish_category();
        self.category = Some(Category {
            title: title.to_string(),
            questions: Vec::new(),
        });
        Ok(())
    }

    fn handle_value(&mut self, raw: &str, line_num: usize) -> Result<()> {
        self.require_category(line_num)?;
        let value = raw.parse::<i64>().map_err(|_| ParseError::InvalidValue {
            line: line_num,
            value: raw.to_string(),
        })?;

        // A value line always opens a new question.
        self.finish_question()?;
        let mut builder = QuestionBuilder::new(line_num);
        builder.value = Some(value);
        self.current = Some(builder);
        Ok(())
    }

    fn handle_question(&mut self, text: &str, line_num: usize) -> Result<()> {
        self.require_category(line_num)?;
        self.flush_buffer();

        let needs_new = self
            .current
            .as_ref()
            .map_or(true, |q| q.question.is_some());
        if needs_new {
            self.finish_question()?;
            self.current = Some(QuestionBuilder::new(line_num));
        }

        self.current_field = Some(Field::Question);
        self.buffer.push(text.to_string());
        Ok(())
    }

    fn handle_answer(&mut self, text: &str, line_num: usize) -> Result<()> {
        self.flush_buffer();
        if self.current.is_none() {
            return Err(ParseError::MissingQuestion { line: line_num });
        }
        self.current_field = Some(Field::Answer);
        self.buffer.push(text.to_string());
        Ok(())
    }

    fn require_category(&self, line_num: usize) -> Result<()> {
        if self.category.is_none() {
            return Err(ParseError::NoCategory { line: line_num });
        }
        Ok(())
    }

    fn flush_buffer(&mut self) {
        if self.buffer.is_empty() {
            return;
        }

        let content = self.buffer.join("\n");
        self.buffer.clear();

        if let Some(ref mut question) = self.current {
            match self.current_field {
                Some(Field::Question) => question.question = Some(content),
                Some(Field::Answer) => question.answer = Some(content),
                None => {}
            }
        }
    }

    fn finish_question(&mut self) -> Result<()> {
        self.flush_buffer();
        self.current_field = None;

        if let Some(builder) = self.current.take() {
            let question = builder.build()?;
            if let Some(ref mut category) = self.category {
                category.questions.push(question);
            }
        }
        Ok(())
    }

    fn finish_category(&mut self) {
        if let Some(category) = self.category.take() {
            self.categories.push(category);
        }
    }

    fn finalize(mut self) -> Result<Vec<Category>> {
        self.finish_question()?;
        self.finish_category();
        Ok(self.categories)
    }
}

enum LineType<'a> {
    Category(&'a str),
    Value(&'a str),
    Question(&'a str),
    Answer(&'a str),
    Text(&'a str),
    Empty,
}
