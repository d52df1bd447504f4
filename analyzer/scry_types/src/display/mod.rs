//! Compact rendering of pattern trees.
//!
//! The rendering is deliberately terse: a pattern tree is an overview a
//! developer scans, not a serialization. Container entries fold onto one
//! line until they stop fitting, numeric ranges compress large integers
//! with magnitude suffixes, and long enumerations truncate with an
//! ellipsis.


use std::fmt;

use crate::pattern::{
    Bool, DateTime, Dict, DictField, Field, Fields, Float, Int, List, NumRepr, NumberKind,
    Pattern, Str, StrRepr, Tuple, TupleField, Url,
};
use scry_ir::Datum;

const FOLD_WIDTH: usize = 60;

/// Compress an integer with a power-of-1000 magnitude suffix: `1500` →
/// `1.5K`, `-2_000_000` → `-2.0M`.
pub fn format_int(value: i64) -> String {
    const SUFFIXES: [&str; 6] = ["", "K", "M", "G", "T", "P"];
    if value == 0 {
        return "0".to_owned();
    }
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let index = (((value as f64).abs().log(1000.0)).floor() as usize).min(SUFFIXES.len() - 1);
    if index == 0 {
        value.to_string()
    } else {
        #[allow(clippy::cast_precision_loss)]
        let scaled = value as f64 / 1000f64.powi(index as i32);
        format!("{scaled:.1}{}", SUFFIXES[index])
    }
}

/// Truncate to `width` characters with an ellipsis.
fn shorten(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_owned();
    }
    let mut out: String = text.chars().take(width.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

fn indent(text: &str, prefix: &str) -> String {
    text.lines()
        .map(|line| format!("{prefix}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Join entries `open…close`, folding onto multiple lines when long.
fn bracketed(open: char, close: char, parts: &[String], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let joined = parts.join(", ");
    if joined.contains('\n') || joined.len() > FOLD_WIDTH {
        let folded = indent(&parts.join(",\n"), "    ");
        write!(f, "{open}\n{folded}\n{close}")
    } else {
        write!(f, "{open}{joined}{close}")
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Empty => Ok(()),
            Pattern::Value => write!(f, "value"),
            Pattern::Dict(dict) => dict.fmt(f),
            Pattern::Tuple(tuple) => tuple.fmt(f),
            Pattern::List(list) => list.fmt(f),
            Pattern::Str(str_pat) => str_pat.fmt(f),
            Pattern::Url(url) => url.fmt(f),
            Pattern::Bool(bool_pat) => bool_pat.fmt(f),
            Pattern::Int(int) => int.fmt(f),
            Pattern::Float(float) => float.fmt(f),
            Pattern::DateTime(dt) => dt.fmt(f),
            Pattern::StrRepr(repr) => repr.fmt(f),
            Pattern::NumRepr(repr) => repr.fmt(f),
            Pattern::Field(field) => field.fmt(f),
            Pattern::Fields(fields) => fields.fmt(f),
        }
    }
}

impl fmt::Display for Dict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.content {
            None => write!(f, "{{}}"),
            Some(fields) => {
                let parts: Vec<String> = fields.iter().map(ToString::to_string).collect();
                bracketed('{', '}', &parts, f)
            }
        }
    }
}

impl fmt::Display for DictField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.value)
    }
}

impl fmt::Display for Tuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.content {
            None => write!(f, "()"),
            Some(fields) => {
                let parts: Vec<String> = fields.iter().map(ToString::to_string).collect();
                bracketed('(', ')', &parts, f)
            }
        }
    }
}

impl fmt::Display for TupleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Named columns keep their name in front.
        if let Pattern::Field(field) = &self.index {
            if let Datum::Str(name) = &field.value {
                return write!(f, "{name}={}", self.value);
            }
        }
        write!(f, "{}", self.value)
    }
}

impl fmt::Display for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.content {
            None => write!(f, "[]"),
            Some(item) => {
                let parts = [item.to_string()];
                bracketed('[', ']', &parts, f)
            }
        }
    }
}

impl fmt::Display for Str {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.template {
            None => write!(f, "str"),
            Some(template) => {
                let rendered: String = template.iter().map(ToString::to_string).collect();
                write!(f, "str pattern={}", shorten(&rendered, FOLD_WIDTH))
            }
        }
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "URL")
    }
}

impl fmt::Display for Bool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bool")
    }
}

impl fmt::Display for Int {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "int range={}..{}",
            format_int(*self.values.min()),
            format_int(*self.values.max())
        )
    }
}

impl fmt::Display for Float {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "float range={:.1}..{:.1}",
            self.values.min().get(),
            self.values.max().get()
        )
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "datetime range={}..{}",
            self.values.min().format("%Y-%m-%d %H:%M:%S"),
            self.values.max().format("%Y-%m-%d %H:%M:%S")
        )
    }
}

impl fmt::Display for StrRepr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "str of {} pattern={}", self.inner, self.format)
    }
}

impl fmt::Display for NumRepr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.format {
            NumberKind::Int => write!(f, "int of {}", self.inner),
            NumberKind::Float => write!(f, "float of {}", self.inner),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, if self.optional { "*" } else { "" })
    }
}

impl fmt::Display for Fields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let choices = self
            .members()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("|");
        write!(f, "<{}>", shorten(&choices, FOLD_WIDTH))
    }
}
