use crate::{
    ast::{Expr, ForKind, Statement},
    interpreter::{
        evaluator::{
            core::{EvalResult, Evaluator, Flow},
            governor::Governor,
        },
        value::{context::Context, core::Value},
    },
};

impl Evaluator<'_> {
    /// Executes a `for` loop of either shape.
    ///
    /// Loops yield null unless a `return` inside the body ends them early, in
    /// which case the `Return` is passed on.
    pub(crate) fn exec_for(&self,
                           kind: &ForKind,
                           body: &[Statement],
                           line: usize,
                           ctx: &mut Context)
                           -> EvalResult<Flow> {
        match kind {
            ForKind::Classic { init,
                               condition,
                               update, } => self.exec_classic_for(init, condition, update, body, line, ctx),
            ForKind::Each { var, iterable } => self.exec_for_each(var, iterable, body, line, ctx),
        }
    }

    /// `for init; condition; update { body }`
    ///
    /// Every pass counts against the iteration limit and samples memory
    /// before the condition is checked.
    fn exec_classic_for(&self,
                        init: &Statement,
                        condition: &Expr,
                        update: &Statement,
                        body: &[Statement],
                        line: usize,
                        ctx: &mut Context)
                        -> EvalResult<Flow> {
        if let flow @ Flow::Return(_) = self.exec(init, ctx)? {
            return Ok(flow);
        }

        let mut governor = Governor::new(&self.limits, line);
        loop {
            governor.tick()?;
            governor.check_memory()?;

            if !self.eval(condition, ctx)?.is_truthy() {
                break;
            }
            if let flow @ Flow::Return(_) = self.exec_block(body, ctx)? {
                return Ok(flow);
            }
            if let flow @ Flow::Return(_) = self.exec(update, ctx)? {
                return Ok(flow);
            }
        }
        Ok(Flow::Value(Value::Null))
    }

    /// `for var in iterable { body }`
    ///
    /// The iterable must be an array. The loop variable is bound in the
    /// enclosing context and keeps its last value after the loop. The body
    /// sees a snapshot: assigning to the iterated array does not change which
    /// elements are visited.
    fn exec_for_each(&self,
                     var: &str,
                     iterable: &Expr,
                     body: &[Statement],
                     line: usize,
                     ctx: &mut Context)
                     -> EvalResult<Flow> {
        let iterable = self.eval(iterable, ctx)?;
        let items = iterable.as_array(line)?;

        for item in items.iter() {
            ctx.insert(var, item.clone());
            if let flow @ Flow::Return(_) = self.exec_block(body, ctx)? {
                return Ok(flow);
            }
        }
        Ok(Flow::Value(Value::Null))
    }

    /// `while condition { body }`
    ///
    /// Every pass counts against the iteration limit; memory is sampled every
    /// `memory_check_interval` passes.
    pub(crate) fn exec_while(&self,
                             condition: &Expr,
                             body: &[Statement],
                             line: usize,
                             ctx: &mut Context)
                             -> EvalResult<Flow> {
        let mut governor = Governor::new(&self.limits, line);
        loop {
            governor.tick()?;
            governor.check_memory_periodically()?;

            if !self.eval(condition, ctx)?.is_truthy() {
                break;
            }
            if let flow @ Flow::Return(_) = self.exec_block(body, ctx)? {
                return Ok(flow);
            }
        }
        Ok(Flow::Value(Value::Null))
    }
}
