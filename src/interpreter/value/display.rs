use std::fmt;

use crate::{
    interpreter::value::{core::Value, function::Function},
    util::num::{format_native, format_rounded},
};

/// How numbers are printed when a value is turned into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberStyle {
    /// Shortest round-trip form: `3.5`, `3`, `0.1`. Used by templates.
    #[default]
    Native,
    /// Rounded to zero fractional digits: `2.6` prints as `3`. Used for
    /// script results.
    Rounded,
}

impl Value {
    /// Renders the value as text.
    ///
    /// Strings print raw at the top level and double-quoted inside arrays and
    /// objects. Object keys are printed in sorted order.
    ///
    /// # Example
    /// ```
    /// use brickengine::{NumberStyle, Value};
    ///
    /// let value = Value::from(vec![Value::from(2.6), Value::Null, Value::from("a")]);
    ///
    /// assert_eq!(value.render(NumberStyle::Native), r#"[2.6, null, "a"]"#);
    /// assert_eq!(value.render(NumberStyle::Rounded), r#"[3, null, "a"]"#);
    /// ```
    #[must_use]
    pub fn render(&self, style: NumberStyle) -> String {
        let mut out = String::new();
        self.write_rendered(&mut out, style, false);
        out
    }

    fn write_rendered(&self, out: &mut String, style: NumberStyle, nested: bool) {
        match self {
            Self::Null => out.push_str("null"),
            Self::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            Self::Number(n) => out.push_str(&match style {
                                                 NumberStyle::Native => format_native(*n),
                                                 NumberStyle::Rounded => format_rounded(*n),
                                             }),
            Self::String(s) if nested => push_quoted(out, s),
            Self::String(s) => out.push_str(s),
            Self::Array(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    item.write_rendered(out, style, true);
                }
                out.push(']');
            },
            Self::Object(map) => {
                let mut keys: Vec<&String> = map.keys().collect();
                keys.sort();

                out.push('{');
                for (i, key) in keys.into_iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    push_quoted(out, key);
                    out.push_str(": ");
                    if let Some(value) = map.get(key) {
                        value.write_rendered(out, style, true);
                    }
                }
                out.push('}');
            },
            Self::Function(Function::Native(native)) => {
                out.push_str("<native ");
                out.push_str(native.name());
                out.push('>');
            },
            Self::Function(Function::Closure(closure)) => match &closure.name {
                Some(name) => {
                    out.push_str("<fn ");
                    out.push_str(name);
                    out.push('>');
                },
                None => out.push_str("<fn>"),
            },
        }
    }
}

fn push_quoted(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out.push('"');
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(NumberStyle::Native))
    }
}
