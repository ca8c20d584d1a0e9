use std::rc::Rc;

use tracing::debug;

use crate::{
    ast::{Block, ElseIf, Expr, Statement},
    interpreter::{
        evaluator::core::{EvalResult, Evaluator, Flow},
        value::{
            context::Context,
            core::Value,
            function::{Closure, Function},
        },
    },
};

impl Evaluator<'_> {
    /// Executes a single statement.
    ///
    /// Declarations and assignments write into `ctx` and yield the assigned
    /// value; a function declaration yields the new closure; control
    /// statements yield null unless a `return` flows out of them.
    ///
    /// # Parameters
    /// - `statement`: Statement to execute.
    /// - `ctx`: Variable bindings, modified in place.
    ///
    /// # Returns
    /// How the statement finished.
    pub fn exec(&self, statement: &Statement, ctx: &mut Context) -> EvalResult<Flow> {
        match statement {
            Statement::Expression { expr, .. } => Ok(Flow::Value(self.eval(expr, ctx)?)),
            Statement::Let { name, value, .. } => {
                let value = self.eval(value, ctx)?;
                ctx.insert(name.clone(), value.clone());
                Ok(Flow::Value(value))
            },
            Statement::Assign { path, value, .. } => {
                let value = self.eval(value, ctx)?;
                ctx.assign(path, value.clone());
                Ok(Flow::Value(value))
            },
            Statement::IndexAssign { path,
                                     index,
                                     value,
                                     line, } => {
                Ok(Flow::Value(self.exec_index_assignment(path, index, value, *line, ctx)?))
            },
            Statement::Function(def) => {
                let closure = Value::Function(Function::Closure(Rc::new(Closure::capture(def, ctx))));
                if let Some(name) = &def.name {
                    ctx.insert(name.clone(), closure.clone());
                }
                Ok(Flow::Value(closure))
            },
            Statement::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.eval(expr, ctx)?,
                    None => Value::Null,
                };
                Ok(Flow::Return(value))
            },
            Statement::If { condition,
                            then_block,
                            else_ifs,
                            else_block,
                            .. } => self.exec_if(condition, then_block, else_ifs, else_block.as_ref(), ctx),
            Statement::For { kind, body, line } => self.exec_for(kind, body, *line, ctx),
            Statement::While { condition,
                               body,
                               line, } => self.exec_while(condition, body, *line, ctx),
            Statement::TryCatch { try_block,
                                  catch_block,
                                  .. } => self.exec_try(try_block, catch_block, ctx),
        }
    }

    /// Executes statements in order, stopping at the first `return`.
    ///
    /// # Returns
    /// `Flow::Return` if a `return` was executed, otherwise a null value.
    pub fn exec_block(&self, statements: &[Statement], ctx: &mut Context) -> EvalResult<Flow> {
        for statement in statements {
            if let flow @ Flow::Return(_) = self.exec(statement, ctx)? {
                return Ok(flow);
            }
        }
        Ok(Flow::Value(Value::Null))
    }

    fn exec_if(&self,
               condition: &Expr,
               then_block: &Block,
               else_ifs: &[ElseIf],
               else_block: Option<&Block>,
               ctx: &mut Context)
               -> EvalResult<Flow> {
        if self.eval(condition, ctx)?.is_truthy() {
            return self.exec_block(then_block, ctx);
        }
        for arm in else_ifs {
            if self.eval(&arm.condition, ctx)?.is_truthy() {
                return self.exec_block(&arm.block, ctx);
            }
        }
        match else_block {
            Some(block) => self.exec_block(block, ctx),
            None => Ok(Flow::Value(Value::Null)),
        }
    }

    /// Runs the try block; if it fails, runs the catch block instead of
    /// propagating the error.
    ///
    /// Errors raised by the catch block propagate, as do errors that abort
    /// the run.
    fn exec_try(&self, try_block: &Block, catch_block: &Block, ctx: &mut Context) -> EvalResult<Flow> {
        match self.exec_block(try_block, ctx) {
            Ok(flow) => Ok(flow),
            Err(error) if error.aborts_run() => Err(error),
            Err(error) => {
                debug!(%error, "try block failed, running catch block");
                self.exec_block(catch_block, ctx)
            },
        }
    }
}
