use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// The optionally signed number at the end of the display text.
    static ref TRAILING_NUMBER: Regex = Regex::new(r"(-?\d+\.?\d*)$").unwrap();
}

const fn is_operator_char(ch: char) -> bool {
    matches!(ch, '+' | '-' | '×' | '÷' | '%')
}

const fn display_operator(op: char) -> Option<char> {
    match op {
        '*' => Some('×'),
        '/' => Some('÷'),
        '+' | '-' | '%' => Some(op),
        _ => None,
    }
}

/// Accumulates calculator button presses into the display text. The text is
/// what the user sees; `×`, `÷` and `−` stay in display form until the
/// expression is submitted for evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayBuffer {
    text: String,
}

impl DisplayBuffer {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            text: String::new(),
        }
    }

    /// The raw accumulated text, as sent to the evaluator on equals.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// What the display shows: the accumulated text, or `0` when empty.
    #[must_use]
    pub fn rendered(&self) -> &str {
        if self.text.is_empty() { "0" } else { &self.text }
    }

    pub fn press_digit(&mut self, digit: char) {
        if digit.is_ascii_digit() {
            self.text.push(digit);
        }
    }

    /// Appends an operator (`+ - * / %`), storing `*` and `/` as `×` and
    /// `÷`. On an empty display only `-` registers; a trailing operator is
    /// replaced rather than stacked.
    pub fn press_operator(&mut self, op: char) {
        let Some(display_op) = display_operator(op) else {
            return;
        };
        if self.text.is_empty() {
            if op == '-' {
                self.text.push('-');
            }
            return;
        }
        if self.text.chars().last().is_some_and(is_operator_char) {
            self.text.pop();
        }
        self.text.push(display_op);
    }

    /// Appends a decimal point unless the number being typed already has one.
    pub fn press_decimal(&mut self) {
        let current_number = self.text.rsplit(is_operator_char).next().unwrap_or("");
        if !current_number.contains('.') {
            self.text.push('.');
        }
    }

    /// Negates the number at the end of the display by prepending or
    /// stripping a `-`. Does nothing when the display does not end in a
    /// number.
    pub fn toggle_sign(&mut self) {
        let Some(found) = TRAILING_NUMBER.find(&self.text) else {
            return;
        };
        let start = found.start();
        let toggled = match found.as_str().strip_prefix('-') {
            Some(unsigned) => unsigned.to_string(),
            None => format!("-{}", found.as_str()),
        };
        self.text.truncate(start);
        self.text.push_str(&toggled);
    }

    pub fn backspace(&mut self) {
        self.text.pop();
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Replaces the display with an evaluation result, verbatim. Error
    /// strings are shown exactly as returned.
    pub fn apply_result(&mut self, result: &str) {
        self.text = result.to_string();
    }
}
