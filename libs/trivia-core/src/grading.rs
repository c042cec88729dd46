//! Free-text answer grading.
//!
//! A submission is accepted when it is phrased as a question and then matches
//! the reference answer by one of: numeric word form, substring containment in
//! either direction, or a small Levenshtein distance.

use crate::types::{GradingVerdict, MatchedBy};

/// Interrogative openers a submission must start with.
///
/// Order matters for stripping: only the first matching prefix is removed.
pub const QUESTION_PREFIXES: [&str; 6] = [
    "what is", "what are", "who is", "who are", "what's", "who's",
];

const ONES: [&str; 10] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];
const TEENS: [&str; 10] = [
    "ten", "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen",
    "eighteen", "nineteen",
];
const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

/// Grade a raw submission against the reference answer.
pub fn grade_answer(raw_user: &str, correct: &str) -> GradingVerdict {
    let question_form = has_question_form(raw_user);
    let normalized_user = normalize_answer(raw_user);
    let normalized_correct = normalize_reference(correct);
    let edit_distance = levenshtein_distance(&normalized_user, &normalized_correct);

    let matched_by = if !question_form
        || normalized_correct.is_empty()
        || normalized_user.is_empty()
    {
        // Empty strings are substrings of everything.
        MatchedBy::None
    } else if numeric_match(&normalized_user, &normalized_correct) {
        MatchedBy::Numeric
    } else if normalized_user.contains(normalized_correct.as_str())
        || normalized_correct.contains(normalized_user.as_str())
    {
        MatchedBy::Substring
    } else if edit_distance <= allowed_distance(&normalized_correct) {
        MatchedBy::Fuzzy
    } else {
        MatchedBy::None
    };

    GradingVerdict {
        accepted: matched_by != MatchedBy::None,
        question_form,
        normalized_user,
        normalized_correct,
        edit_distance,
        matched_by,
    }
}

/// Whether the lower-cased, trimmed answer opens with an interrogative phrase.
pub fn has_question_form(raw: &str) -> bool {
    let lowered = raw.to_lowercase();
    let trimmed = lowered.trim();
    QUESTION_PREFIXES.iter().any(|p| trimmed.starts_with(p))
}

/// Normalize a player's submission, dropping a leading interrogative phrase.
pub fn normalize_answer(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let trimmed = lowered.trim();
    let stripped = QUESTION_PREFIXES
        .iter()
        .find_map(|p| trimmed.strip_prefix(p))
        .unwrap_or(trimmed);
    clean(stripped)
}

/// Normalize a reference answer. No phrase is stripped.
pub fn normalize_reference(raw: &str) -> String {
    clean(raw.to_lowercase().trim())
}

fn clean(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string()
}

/// Edit distance tolerated for a fuzzy match.
pub fn allowed_distance(normalized_correct: &str) -> usize {
    if normalized_correct.chars().count() <= 4 {
        1
    } else {
        2
    }
}

/// English word form for 0-99. Larger values stay as digits.
pub fn number_to_words(n: u64) -> String {
    match n {
        0..=9 => ONES[n as usize].to_string(),
        10..=19 => TEENS[(n - 10) as usize].to_string(),
        20..=99 => {
            let tens = TENS[(n / 10) as usize];
            match n % 10 {
                0 => tens.to_string(),
                ones => format!("{} {}", tens, ONES[ones as usize]),
            }
        }
        _ => n.to_string(),
    }
}

fn numeric_match(user: &str, correct: &str) -> bool {
    match correct.parse::<u64>() {
        Ok(n) => user == correct || user == number_to_words(n),
        Err(_) => false,
    }
}

/// Calculate Levenshtein distance between two strings.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let mut prev = (0..=n).collect::<Vec<_>>();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;

        for j in 1..=n {
            curr[j] = if a_chars[i - 1] == b_chars[j - 1] {
                prev[j - 1]
            } else {
                1 + prev[j].min(curr[j - 1]).min(prev[j - 1])
            };
        }

        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}
