use super::context::Context;
use super::errors::{RuntimeError, RuntimeResult};
use super::object::Object;
use crate::frontend::{EQ_METHOD, LT_METHOD};

/// Tests two values for equality. `None` equals only `None`; primitives of
/// the same kind compare by value; an instance on the left dispatches
/// `__eq__`, which must yield a `Bool`.
pub fn equal(lhs: &Object, rhs: &Object, context: &mut dyn Context) -> RuntimeResult<bool> {
    match (lhs, rhs) {
        (Object::None, Object::None) => Ok(true),
        (Object::Boolean(l), Object::Boolean(r)) => Ok(l == r),
        (Object::Number(l), Object::Number(r)) => Ok(l == r),
        (Object::String(l), Object::String(r)) => Ok(l == r),
        (Object::Instance(instance), _) => {
            let result = instance.call(EQ_METHOD, vec![rhs.clone()], context)?;
            result
                .as_bool()
                .ok_or(RuntimeError::NotComparable("equality"))
        }
        _ => Err(RuntimeError::NotComparable("equality")),
    }
}

/// Strict-order test. Primitives of the same kind compare by value; an
/// instance on the left dispatches `__lt__`, which must yield a `Bool`.
pub fn less(lhs: &Object, rhs: &Object, context: &mut dyn Context) -> RuntimeResult<bool> {
    match (lhs, rhs) {
        (Object::Boolean(l), Object::Boolean(r)) => Ok(l < r),
        (Object::Number(l), Object::Number(r)) => Ok(l < r),
        (Object::String(l), Object::String(r)) => Ok(l < r),
        (Object::Instance(instance), _) if *rhs != Object::None => {
            let result = instance.call(LT_METHOD, vec![rhs.clone()], context)?;
            result.as_bool().ok_or(RuntimeError::NotComparable("less"))
        }
        _ => Err(RuntimeError::NotComparable("less")),
    }
}

pub fn not_equal(lhs: &Object, rhs: &Object, context: &mut dyn Context) -> RuntimeResult<bool> {
    Ok(!equal(lhs, rhs, context)?)
}

pub fn greater(lhs: &Object, rhs: &Object, context: &mut dyn Context) -> RuntimeResult<bool> {
    Ok(!less(lhs, rhs, context)? && !equal(lhs, rhs, context)?)
}

pub fn less_or_equal(
    lhs: &Object,
    rhs: &Object,
    context: &mut dyn Context,
) -> RuntimeResult<bool> {
    Ok(less(lhs, rhs, context)? || equal(lhs, rhs, context)?)
}

pub fn greater_or_equal(
    lhs: &Object,
    rhs: &Object,
    context: &mut dyn Context,
) -> RuntimeResult<bool> {
    Ok(!less(lhs, rhs, context)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::Expr;
    use crate::frontend::Stmt;
    use crate::runtime::class::{ClassPtr, InstancePtr, Method};
    use crate::runtime::context::WriterContext;

    fn ctx() -> WriterContext<Vec<u8>> {
        WriterContext::new(Vec::new())
    }

    fn number(n: i32) -> Object {
        Object::Number(n)
    }

    fn string(s: &str) -> Object {
        Object::String(s.to_owned())
    }

    #[test]
    fn test_primitive_equality() {
        let mut ctx = ctx();
        assert!(equal(&number(5), &number(5), &mut ctx).unwrap());
        assert!(!equal(&number(5), &number(6), &mut ctx).unwrap());
        assert!(equal(&string("ab"), &string("ab"), &mut ctx).unwrap());
        assert!(equal(&Object::Boolean(true), &Object::Boolean(true), &mut ctx).unwrap());
        assert!(equal(&Object::None, &Object::None, &mut ctx).unwrap());
    }

    #[test]
    fn test_mixed_types_not_comparable() {
        let mut ctx = ctx();
        assert!(matches!(
            equal(&number(5), &string("5"), &mut ctx),
            Err(RuntimeError::NotComparable("equality"))
        ));
        assert!(matches!(
            equal(&Object::None, &number(5), &mut ctx),
            Err(RuntimeError::NotComparable("equality"))
        ));
        assert!(matches!(
            less(&Object::None, &Object::None, &mut ctx),
            Err(RuntimeError::NotComparable("less"))
        ));
        assert!(matches!(
            less(&Object::Boolean(true), &number(1), &mut ctx),
            Err(RuntimeError::NotComparable("less"))
        ));
    }

    #[test]
    fn test_primitive_ordering() {
        let mut ctx = ctx();
        assert!(less(&number(3), &number(5), &mut ctx).unwrap());
        assert!(!less(&number(5), &number(3), &mut ctx).unwrap());
        assert!(less(&string("abc"), &string("abd"), &mut ctx).unwrap());
        assert!(less(&Object::Boolean(false), &Object::Boolean(true), &mut ctx).unwrap());
    }

    #[test]
    fn test_derived_orderings() {
        let mut ctx = ctx();
        assert!(not_equal(&number(1), &number(2), &mut ctx).unwrap());
        assert!(greater(&number(2), &number(1), &mut ctx).unwrap());
        assert!(!greater(&number(2), &number(2), &mut ctx).unwrap());
        assert!(less_or_equal(&number(2), &number(2), &mut ctx).unwrap());
        assert!(greater_or_equal(&number(2), &number(2), &mut ctx).unwrap());
        assert!(!greater_or_equal(&number(1), &number(2), &mut ctx).unwrap());
    }

    #[test]
    fn test_total_order_law() {
        // For any two same-type primitives: a <= b or b < a.
        let mut ctx = ctx();
        let values = [number(-2), number(0), number(3), number(3)];
        for a in &values {
            for b in &values {
                assert!(
                    less_or_equal(a, b, &mut ctx).unwrap() || less(b, a, &mut ctx).unwrap(),
                    "{:?} vs {:?}",
                    a,
                    b
                );
            }
        }
    }

    fn comparable_class() -> ClassPtr {
        // __eq__/__lt__ compare the `rank` field against the other's rank.
        let other_rank = Expr::Get(
            Box::new(Expr::Variable("other".to_owned())),
            "rank".to_owned(),
        );
        let self_rank = Expr::Get(
            Box::new(Expr::Variable("self".to_owned())),
            "rank".to_owned(),
        );
        let eq_body = vec![Stmt::Return(Some(Expr::Infix(
            crate::frontend::InfixOperator::EqualTo,
            Box::new(self_rank.clone()),
            Box::new(other_rank.clone()),
        )))];
        let lt_body = vec![Stmt::Return(Some(Expr::Infix(
            crate::frontend::InfixOperator::LessThan,
            Box::new(self_rank),
            Box::new(other_rank),
        )))];
        ClassPtr::new(
            "Ranked".to_owned(),
            vec![
                Method {
                    name: "__eq__".to_owned(),
                    params: vec!["other".to_owned()],
                    body: eq_body,
                },
                Method {
                    name: "__lt__".to_owned(),
                    params: vec!["other".to_owned()],
                    body: lt_body,
                },
            ],
            None,
        )
    }

    fn ranked(class: &ClassPtr, rank: i32) -> Object {
        let instance = InstancePtr::new(class);
        instance.set_field("rank", Object::Number(rank));
        Object::Instance(instance)
    }

    #[test]
    fn test_instance_dispatches_dunders() {
        let mut ctx = ctx();
        let class = comparable_class();
        let low = ranked(&class, 1);
        let high = ranked(&class, 2);

        assert!(equal(&low, &ranked(&class, 1), &mut ctx).unwrap());
        assert!(!equal(&low, &high, &mut ctx).unwrap());
        assert!(less(&low, &high, &mut ctx).unwrap());
        assert!(greater(&high, &low, &mut ctx).unwrap());
        assert!(less_or_equal(&low, &ranked(&class, 1), &mut ctx).unwrap());
        assert!(greater_or_equal(&high, &low, &mut ctx).unwrap());
    }

    #[test]
    fn test_instance_without_dunders() {
        let mut ctx = ctx();
        let class = ClassPtr::new("Plain".to_owned(), vec![], None);
        let instance = Object::Instance(InstancePtr::new(&class));

        assert!(matches!(
            equal(&instance, &number(1), &mut ctx),
            Err(RuntimeError::NoSuchMethod(..))
        ));
        assert!(matches!(
            less(&instance, &number(1), &mut ctx),
            Err(RuntimeError::NoSuchMethod(..))
        ));
    }
}
