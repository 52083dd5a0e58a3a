use std::fmt::Write as _;

use thiserror::Error;

use super::model::BoundingBox;

// ---------------------------------------------------------------------------
// Label text format
// ---------------------------------------------------------------------------

/// Number formatting for label files. Passed explicitly so callers never
/// depend on host locale settings.
///
/// Built with [`LabelFormat::new`], which only accepts settings whose output
/// parses back: the separator must be ASCII punctuation other than `-` or
/// `+`, and the line ending must be `"\n"` or `"\r\n"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelFormat {
    decimal_separator: char,
    line_ending: &'static str,
}

impl Default for LabelFormat {
    fn default() -> Self {
        Self {
            decimal_separator: '.',
            line_ending: "\n",
        }
    }
}

/// Rejected [`LabelFormat`] settings.
#[derive(Debug, Error, PartialEq)]
pub enum FormatError {
    #[error("'{0}' cannot be used as a decimal separator")]
    Separator(char),
    #[error("unsupported line ending {0:?}")]
    LineEnding(String),
}

impl LabelFormat {
    pub fn new(decimal_separator: char, line_ending: &'static str) -> Result<Self, FormatError> {
        if !decimal_separator.is_ascii_punctuation() || matches!(decimal_separator, '-' | '+') {
            return Err(FormatError::Separator(decimal_separator));
        }
        if !matches!(line_ending, "\n" | "\r\n") {
            return Err(FormatError::LineEnding(line_ending.to_string()));
        }
        Ok(Self {
            decimal_separator,
            line_ending,
        })
    }

    pub fn decimal_separator(&self) -> char {
        self.decimal_separator
    }

    pub fn line_ending(&self) -> &'static str {
        self.line_ending
    }

    fn push_float(&self, out: &mut String, value: f64) {
        // `{}` on f64 is the shortest representation that round-trips.
        if self.decimal_separator == '.' {
            let _ = write!(out, "{value}");
        } else {
            let text = value.to_string();
            out.extend(text.chars().map(|c| if c == '.' { self.decimal_separator } else { c }));
        }
    }
}

/// Serialise boxes with the default format: one
/// `<class> <cx> <cy> <w> <h>` line per box, in order.
pub fn serialize(boxes: &[BoundingBox]) -> String {
    serialize_with(boxes, &LabelFormat::default())
}

pub fn serialize_with(boxes: &[BoundingBox], format: &LabelFormat) -> String {
    let mut out = String::new();
    for bb in boxes {
        let _ = write!(out, "{}", bb.object_index);
        for value in [bb.center_x, bb.center_y, bb.width, bb.height] {
            out.push(' ');
            format.push_float(&mut out, value);
        }
        out.push_str(format.line_ending);
    }
    out
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Errors for a malformed label file. Line numbers are 1-based.
#[derive(Debug, Error, PartialEq)]
pub enum LabelError {
    #[error("line {line}: expected 5 fields, found {found}")]
    FieldCount { line: usize, found: usize },
    #[error("line {line}: invalid class index '{value}'")]
    ClassIndex { line: usize, value: String },
    #[error("line {line}: invalid coordinate '{value}'")]
    Coordinate { line: usize, value: String },
}

/// Parse label text written in the default format. Blank lines are skipped.
pub fn parse(text: &str) -> Result<Vec<BoundingBox>, LabelError> {
    parse_with(text, &LabelFormat::default())
}

pub fn parse_with(text: &str, format: &LabelFormat) -> Result<Vec<BoundingBox>, LabelError> {
    let mut boxes = Vec::new();

    for (i, raw) in text.lines().enumerate() {
        let line = i + 1;
        let fields: Vec<&str> = raw.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        if fields.len() != 5 {
            return Err(LabelError::FieldCount {
                line,
                found: fields.len(),
            });
        }

        let object_index = fields[0]
            .parse::<i32>()
            .map_err(|_| LabelError::ClassIndex {
                line,
                value: fields[0].to_string(),
            })?;

        let mut coords = [0.0f64; 4];
        for (slot, tok) in coords.iter_mut().zip(&fields[1..]) {
            *slot = parse_float(tok, format).ok_or_else(|| LabelError::Coordinate {
                line,
                value: tok.to_string(),
            })?;
        }

        let [center_x, center_y, width, height] = coords;
        boxes.push(BoundingBox::new(object_index, center_x, center_y, width, height));
    }

    Ok(boxes)
}

fn parse_float(tok: &str, format: &LabelFormat) -> Option<f64> {
    if format.decimal_separator == '.' {
        tok.parse().ok()
    } else {
        tok.replace(format.decimal_separator, ".").parse().ok()
    }
}
