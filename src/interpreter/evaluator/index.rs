use std::rc::Rc;

use tracing::warn;

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::{context::Context, core::Value},
    },
};

impl Evaluator<'_> {
    /// Evaluates `target[index]`.
    ///
    /// The target must be an array; the index is truncated to an integer.
    ///
    /// # Errors
    /// - `ExpectedArray` if the target is not an array.
    /// - `ExpectedNumber` / `InvalidIndex` if the index is not a
    ///   non-negative number.
    /// - `IndexOutOfBounds` if the index is past the end.
    pub(crate) fn eval_index(&self,
                             target: &Expr,
                             index: &Expr,
                             line: usize,
                             ctx: &mut Context)
                             -> EvalResult<Value> {
        let target = self.eval(target, ctx)?;
        let index = self.eval(index, ctx)?;

        let items = target.as_array(line)?;
        let index = index.as_index(line)?;

        items.get(index)
             .cloned()
             .ok_or(RuntimeError::IndexOutOfBounds { len: items.len(),
                                                     found: index,
                                                     line })
    }

    /// Executes `path[index] = value`.
    ///
    /// The array stored at `path` is modified in place (copied first if it is
    /// shared) and padded with nulls when `index` is past the end.
    ///
    /// # Returns
    /// The assigned value.
    ///
    /// # Errors
    /// - `ExpectedArray` if `path` does not hold an array.
    /// - `InvalidIndex` if the index is not a non-negative number.
    /// - `ArrayTooLarge` if the padding would not fit the memory ceiling or
    ///   cannot be allocated.
    pub(crate) fn exec_index_assignment(&self,
                                        path: &[String],
                                        index: &Expr,
                                        value: &Expr,
                                        line: usize,
                                        ctx: &mut Context)
                                        -> EvalResult<Value> {
        let index = self.eval(index, ctx)?.as_index(line)?;
        let value = self.eval(value, ctx)?;

        match ctx.lookup_mut(path, line)? {
            Some(Value::Array(items)) => {
                let items = Rc::make_mut(items);
                if index >= items.len() {
                    self.pad_array(items, index + 1, line)?;
                }
                items[index] = value.clone();
                Ok(value)
            },
            other => Err(RuntimeError::ExpectedArray { found: other.map_or("null", |value| value.type_name()),
                                                       line }),
        }
    }

    /// Grows `items` to `len` elements with trailing nulls.
    ///
    /// The new size is checked against `max_memory_bytes` before anything is
    /// allocated, and the allocation itself is fallible.
    fn pad_array(&self, items: &mut Vec<Value>, len: usize, line: usize) -> EvalResult<()> {
        let bytes = u64::try_from(len.saturating_mul(size_of::<Value>())).unwrap_or(u64::MAX);
        let over_limit = self.limits.max_memory_bytes.is_some_and(|limit| bytes > limit);

        if over_limit || items.try_reserve_exact(len - items.len()).is_err() {
            warn!(len, line, "assignment aborted: array too large");
            return Err(RuntimeError::ArrayTooLarge { len, line });
        }
        items.resize(len, Value::Null);
        Ok(())
    }
}
