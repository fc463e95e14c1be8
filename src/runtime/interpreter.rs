use super::compare;
use super::context::Context;
use super::errors::{RuntimeError, RuntimeResult};
use super::object::{Closure, Object};
use crate::frontend::{
    Expr, InfixOperator, LogicalOperator, PrefixOperator, Program, Stmt, ADD_METHOD,
};

use std::io::Write;

/// Runs a program against the given global closure.
pub fn execute_program(
    program: &Program,
    closure: &mut Closure,
    context: &mut dyn Context,
) -> RuntimeResult<()> {
    execute_block(&program.stmts, closure, context)
}

/// Runs a statement sequence. A `return` escapes as
/// `RuntimeError::Return` and is caught at the method-call boundary.
pub(crate) fn execute_block(
    stmts: &[Stmt],
    closure: &mut Closure,
    context: &mut dyn Context,
) -> RuntimeResult<()> {
    for stmt in stmts.iter() {
        execute_statement(stmt, closure, context)?;
    }
    Ok(())
}

fn execute_statement(
    stmt: &Stmt,
    closure: &mut Closure,
    context: &mut dyn Context,
) -> RuntimeResult<()> {
    match stmt {
        Stmt::Expression(expr) => {
            eval_expression(expr, closure, context)?;
        }
        Stmt::Print(args) => execute_print(args, closure, context)?,
        Stmt::IfElse(condition, if_suite, else_suite) => {
            if eval_expression(condition, closure, context)?.is_true() {
                execute_block(if_suite, closure, context)?;
            } else if let Some(else_suite) = else_suite {
                execute_block(else_suite, closure, context)?;
            }
        }
        Stmt::Return(expr) => {
            let value = match expr {
                Some(expr) => eval_expression(expr, closure, context)?,
                None => Object::None,
            };
            return Err(RuntimeError::Return(value));
        }
        Stmt::ClassDecl(class) => {
            closure.insert(class.name().to_owned(), Object::Class(class.clone()));
        }
    }

    Ok(())
}

fn execute_print(
    args: &[Expr],
    closure: &mut Closure,
    context: &mut dyn Context,
) -> RuntimeResult<()> {
    let mut values = Vec::with_capacity(args.len());
    for arg in args.iter() {
        values.push(eval_expression(arg, closure, context)?);
    }

    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            write!(context.output_stream(), " ")?;
        }
        value.print(context)?;
    }
    writeln!(context.output_stream())?;

    Ok(())
}

fn eval_expression(
    expr: &Expr,
    closure: &mut Closure,
    context: &mut dyn Context,
) -> RuntimeResult<Object> {
    match expr {
        Expr::NumberLiteral(n) => Ok(Object::Number(*n)),
        Expr::StringLiteral(s) => Ok(Object::String(s.clone())),
        Expr::BooleanLiteral(b) => Ok(Object::Boolean(*b)),
        Expr::NoneLiteral => Ok(Object::None),
        Expr::Variable(name) => lookup_variable(name, closure),
        Expr::Assign(name, expr) => {
            let value = eval_expression(expr, closure, context)?;
            closure.insert(name.clone(), value.clone());
            Ok(value)
        }
        Expr::Infix(op, lhs, rhs) => eval_infix_operator(*op, lhs, rhs, closure, context),
        Expr::Prefix(op, expr) => eval_prefix_operator(*op, expr, closure, context),
        Expr::Logical(op, lhs, rhs) => eval_logical_operator(*op, lhs, rhs, closure, context),
        Expr::Get(obj_expr, field) => eval_field_get(obj_expr, field, closure, context),
        Expr::Set(obj_expr, field, value_expr) => {
            eval_field_set(obj_expr, field, value_expr, closure, context)
        }
        Expr::Call(callee, args) => eval_call(callee, args, closure, context),
        Expr::NewInstance(class, args) => {
            let args = eval_arguments(args, closure, context)?;
            class.instantiate(args, context)
        }
    }
}

fn lookup_variable(name: &str, closure: &Closure) -> RuntimeResult<Object> {
    match closure.get(name) {
        Some(value) => Ok(value.clone()),
        None => Err(RuntimeError::UndefinedVariable(name.to_owned())),
    }
}

fn eval_field_get(
    obj_expr: &Expr,
    field: &str,
    closure: &mut Closure,
    context: &mut dyn Context,
) -> RuntimeResult<Object> {
    match eval_expression(obj_expr, closure, context)? {
        Object::Instance(instance) => instance.get_field(field).ok_or_else(|| {
            RuntimeError::MissingField(instance.class_name().to_owned(), field.to_owned())
        }),
        other => Err(RuntimeError::NotAnInstance(other)),
    }
}

fn eval_field_set(
    obj_expr: &Expr,
    field: &str,
    value_expr: &Expr,
    closure: &mut Closure,
    context: &mut dyn Context,
) -> RuntimeResult<Object> {
    let instance = match eval_expression(obj_expr, closure, context)? {
        Object::Instance(instance) => instance,
        other => return Err(RuntimeError::NotAnInstance(other)),
    };

    let value = eval_expression(value_expr, closure, context)?;
    instance.set_field(field, value.clone());

    Ok(value)
}

fn eval_call(
    callee: &Expr,
    raw_args: &[Expr],
    closure: &mut Closure,
    context: &mut dyn Context,
) -> RuntimeResult<Object> {
    // Method call: the only place a method name may appear.
    if let Expr::Get(obj_expr, method_name) = callee {
        let receiver = match eval_expression(obj_expr, closure, context)? {
            Object::Instance(instance) => instance,
            other => return Err(RuntimeError::NotAnInstance(other)),
        };
        let args = eval_arguments(raw_args, closure, context)?;
        return receiver.call(method_name, args, context);
    }

    match eval_expression(callee, closure, context)? {
        Object::Class(class) => {
            let args = eval_arguments(raw_args, closure, context)?;
            class.instantiate(args, context)
        }
        other => Err(RuntimeError::NotCallable(other)),
    }
}

fn eval_arguments(
    raw_args: &[Expr],
    closure: &mut Closure,
    context: &mut dyn Context,
) -> RuntimeResult<Vec<Object>> {
    let mut args = Vec::with_capacity(raw_args.len());
    for raw_arg in raw_args.iter() {
        args.push(eval_expression(raw_arg, closure, context)?);
    }
    Ok(args)
}

fn eval_logical_operator(
    op: LogicalOperator,
    lhs: &Expr,
    rhs: &Expr,
    closure: &mut Closure,
    context: &mut dyn Context,
) -> RuntimeResult<Object> {
    let lhs = eval_expression(lhs, closure, context)?;

    // Short circuit; the result is always a Bool.
    let result = match op {
        LogicalOperator::And if !lhs.is_true() => false,
        LogicalOperator::Or if lhs.is_true() => true,
        _ => eval_expression(rhs, closure, context)?.is_true(),
    };

    Ok(Object::Boolean(result))
}

fn eval_prefix_operator(
    op: PrefixOperator,
    expr: &Expr,
    closure: &mut Closure,
    context: &mut dyn Context,
) -> RuntimeResult<Object> {
    let value = eval_expression(expr, closure, context)?;
    match op {
        PrefixOperator::Negate => match value {
            Object::Number(n) => Ok(Object::Number(-n)),
            other => Err(RuntimeError::IllegalUnaryOp(op, other)),
        },
        PrefixOperator::LogicalNot => Ok(Object::Boolean(!value.is_true())),
    }
}

fn eval_infix_operator(
    op: InfixOperator,
    lhs: &Expr,
    rhs: &Expr,
    closure: &mut Closure,
    context: &mut dyn Context,
) -> RuntimeResult<Object> {
    let lhs = eval_expression(lhs, closure, context)?;
    let rhs = eval_expression(rhs, closure, context)?;

    match op {
        InfixOperator::Add => match (lhs, rhs) {
            (Object::Number(a), Object::Number(b)) => Ok(Object::Number(a + b)),
            (Object::String(a), Object::String(b)) => Ok(Object::String(a + &b)),
            (Object::Instance(instance), rhs) if instance.has_method(ADD_METHOD, 1) => {
                instance.call(ADD_METHOD, vec![rhs], context)
            }
            (a, b) => Err(RuntimeError::IllegalBinaryOp(op, a, b)),
        },
        InfixOperator::Subtract => numerical_binop(op, lhs, rhs, |a, b| Object::Number(a - b)),
        InfixOperator::Multiply => numerical_binop(op, lhs, rhs, |a, b| Object::Number(a * b)),
        InfixOperator::Divide => match (lhs, rhs) {
            (Object::Number(a), Object::Number(b)) => {
                if b != 0 {
                    Ok(Object::Number(a / b))
                } else {
                    Err(RuntimeError::DivideByZero)
                }
            }
            (a, b) => Err(RuntimeError::IllegalBinaryOp(op, a, b)),
        },
        InfixOperator::EqualTo => Ok(Object::Boolean(compare::equal(&lhs, &rhs, context)?)),
        InfixOperator::NotEqualTo => Ok(Object::Boolean(compare::not_equal(&lhs, &rhs, context)?)),
        InfixOperator::LessThan => Ok(Object::Boolean(compare::less(&lhs, &rhs, context)?)),
        InfixOperator::LessEq => Ok(Object::Boolean(compare::less_or_equal(&lhs, &rhs, context)?)),
        InfixOperator::GreaterThan => Ok(Object::Boolean(compare::greater(&lhs, &rhs, context)?)),
        InfixOperator::GreaterEq => Ok(Object::Boolean(compare::greater_or_equal(
            &lhs, &rhs, context,
        )?)),
    }
}

fn numerical_binop<F>(
    op: InfixOperator,
    lhs: Object,
    rhs: Object,
    func: F,
) -> RuntimeResult<Object>
where
    F: Fn(i32, i32) -> Object,
{
    match (lhs, rhs) {
        (Object::Number(a), Object::Number(b)) => Ok(func(a, b)),
        (a, b) => Err(RuntimeError::IllegalBinaryOp(op, a, b)),
    }
}
