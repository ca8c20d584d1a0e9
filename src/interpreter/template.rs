use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};

use crate::{
    error::Error,
    interpreter::{
        evaluator::core::Evaluator, parser::core::parse_template_expression,
        value::{context::Context, core::Value, display::NumberStyle},
    },
};

/// Matches one `{{ expression }}` placeholder. A placeholder never spans
/// lines.
static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{\s*(.*?)\s*\}\}").expect("placeholder pattern is valid"));

impl Evaluator<'_> {
    /// Renders a template by evaluating every `{{ expression }}` placeholder.
    ///
    /// Each placeholder is parsed as a single expression and evaluated
    /// against `ctx`, so bindings made by one placeholder are visible to the
    /// next. Results are printed with the native number form (`3.5`, `3`).
    /// Text outside placeholders is copied unchanged, and a template without
    /// placeholders is returned as is.
    ///
    /// # Parameters
    /// - `source`: The template text.
    /// - `ctx`: Variable bindings shared by all placeholders.
    ///
    /// # Returns
    /// The rendered text.
    ///
    /// # Errors
    /// The first failing placeholder aborts rendering. Its error is wrapped in
    /// [`Error::Placeholder`] together with the placeholder's source text.
    ///
    /// # Example
    /// ```
    /// use brickengine::{Context, Evaluator, Functions};
    ///
    /// let functions = Functions::with_builtins();
    /// let mut ctx = Context::new();
    /// ctx.insert("price", 3.5);
    ///
    /// let out = Evaluator::new(&functions).run_template("Total: {{ price * 2 }} ({{ upper('eur') }})",
    ///                                                   &mut ctx)
    ///                                     .unwrap();
    /// assert_eq!(out, "Total: 7 (EUR)");
    /// ```
    pub fn run_template(&self, source: &str, ctx: &mut Context) -> Result<String, Error> {
        if !PLACEHOLDER.is_match(source) {
            return Ok(source.to_owned());
        }

        debug!(bytes = source.len(), "rendering template");
        let mut out = String::with_capacity(source.len());
        let mut last = 0;
        let mut count = 0usize;

        for caps in PLACEHOLDER.captures_iter(source) {
            let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            out.push_str(&source[last..whole.start()]);

            let value = self.eval_placeholder(inner.as_str(), ctx)?;
            out.push_str(&value.render(NumberStyle::Native));

            last = whole.end();
            count += 1;
        }
        out.push_str(&source[last..]);

        debug!(placeholders = count, "template rendered");
        Ok(out)
    }

    fn eval_placeholder(&self, expression: &str, ctx: &mut Context) -> Result<Value, Error> {
        trace!(expression, "evaluating placeholder");

        let wrap = |source: Error| Error::Placeholder { expression: expression.to_owned(),
                                                        source:     Box::new(source), };
        let expr = parse_template_expression(expression).map_err(|err| wrap(err.into()))?;
        self.eval(&expr, ctx).map_err(|err| wrap(err.into()))
    }
}
