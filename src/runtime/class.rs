use super::context::Context;
use super::errors::{RuntimeError, RuntimeResult};
use super::interpreter::execute_block;
use super::object::{Closure, Object};
use crate::frontend::{Stmt, INIT_METHOD, SELF_STR, STR_METHOD};

use std::cell::{RefCell, RefMut};
use std::fmt;
use std::io::Write;
use std::rc::Rc;

/// A method as owned by its class: formal parameters exclude `self`.
#[derive(Debug, PartialEq, Clone)]
pub struct Method {
    pub name: String,
    pub params: Vec<String>,
    pub body: Vec<Stmt>,
}

struct ClassData {
    name: String,
    // Declaration order, searched linearly. Behind a RefCell so the parser
    // can register a class before its method bodies are parsed, which lets
    // those bodies instantiate their own class.
    methods: RefCell<Vec<Method>>,
    parent: Option<ClassPtr>,
}

#[derive(Clone)]
pub struct ClassPtr(Rc<ClassData>);

pub struct InstanceData {
    class: ClassPtr,
    fields: RefCell<Closure>,
}

#[derive(Clone)]
pub struct InstancePtr(Rc<InstanceData>);

impl ClassPtr {
    pub fn new(name: String, methods: Vec<Method>, parent: Option<ClassPtr>) -> Self {
        let data = ClassData {
            name,
            methods: RefCell::new(methods),
            parent,
        };
        ClassPtr(Rc::new(data))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Installs the method list of a class that was registered ahead of its
    /// body. Called once, when the declaration has been fully parsed.
    pub fn define_methods(&self, methods: Vec<Method>) {
        *self.0.methods.borrow_mut() = methods;
    }

    /// Resolves a method by name: own methods first, then the whole parent
    /// chain.
    pub fn find_method(&self, name: &str) -> Option<Method> {
        let method = self
            .0
            .methods
            .borrow()
            .iter()
            .find(|m| m.name == name)
            .cloned();
        match &self.0.parent {
            Some(parent) => method.or_else(|| parent.find_method(name)),
            None => method,
        }
    }

    /// Creates an instance, running `__init__` when one with matching arity
    /// exists.
    pub fn instantiate(
        &self,
        args: Vec<Object>,
        context: &mut dyn Context,
    ) -> RuntimeResult<Object> {
        let instance = InstancePtr::new(self);

        if instance.has_method(INIT_METHOD, args.len()) {
            instance.call(INIT_METHOD, args, context)?;
        } else if !args.is_empty() {
            return Err(RuntimeError::NoSuchMethod(
                self.name().to_owned(),
                INIT_METHOD.to_owned(),
            ));
        }

        Ok(Object::Instance(instance))
    }
}

impl InstancePtr {
    pub fn new(class: &ClassPtr) -> Self {
        let data = InstanceData {
            class: class.clone(),
            fields: RefCell::new(Closure::new()),
        };
        InstancePtr(Rc::new(data))
    }

    pub fn class_name(&self) -> &str {
        self.0.class.name()
    }

    /// The mutable per-instance environment.
    pub fn fields(&self) -> RefMut<'_, Closure> {
        self.0.fields.borrow_mut()
    }

    pub fn get_field(&self, name: &str) -> Option<Object> {
        self.0.fields.borrow().get(name).cloned()
    }

    pub fn set_field(&self, name: &str, value: Object) {
        self.0.fields.borrow_mut().insert(name.to_owned(), value);
    }

    /// True iff a method with this name resolves and takes exactly
    /// `argument_count` arguments besides `self`.
    pub fn has_method(&self, name: &str, argument_count: usize) -> bool {
        match self.0.class.find_method(name) {
            Some(method) => method.params.len() == argument_count,
            None => false,
        }
    }

    /// Invokes a method on this instance. The body runs in a fresh closure
    /// binding `self` and then each formal parameter; a `return` in the
    /// body becomes the call's value, otherwise the call yields `None`.
    pub fn call(
        &self,
        name: &str,
        args: Vec<Object>,
        context: &mut dyn Context,
    ) -> RuntimeResult<Object> {
        let method = match self.0.class.find_method(name) {
            Some(method) if method.params.len() == args.len() => method,
            _ => {
                return Err(RuntimeError::NoSuchMethod(
                    self.class_name().to_owned(),
                    name.to_owned(),
                ))
            }
        };

        let mut closure = Closure::new();
        closure.insert(SELF_STR.to_owned(), Object::Instance(self.clone()));
        for (param, arg) in method.params.iter().zip(args) {
            closure.insert(param.clone(), arg);
        }

        match execute_block(&method.body, &mut closure, context) {
            Ok(()) => Ok(Object::None),
            Err(RuntimeError::Return(value)) => Ok(value),
            Err(e) => Err(e),
        }
    }

    /// Prints through `__str__` when defined with zero parameters, else a
    /// stable identity token.
    pub fn print(&self, context: &mut dyn Context) -> RuntimeResult<()> {
        if self.has_method(STR_METHOD, 0) {
            let value = self.call(STR_METHOD, vec![], context)?;
            value.print(context)
        } else {
            write!(context.output_stream(), "{}", self)?;
            Ok(())
        }
    }
}

impl PartialEq<ClassPtr> for ClassPtr {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq<InstancePtr> for InstancePtr {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for ClassPtr {}

impl Eq for InstancePtr {}

impl fmt::Debug for ClassPtr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<class {}>", self.0.name)
    }
}

impl fmt::Debug for InstancePtr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl fmt::Display for InstancePtr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "<{} object at {:p}>",
            self.0.class.name(),
            Rc::as_ptr(&self.0)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::Expr;
    use crate::runtime::context::WriterContext;

    fn method(name: &str, params: &[&str], body: Vec<Stmt>) -> Method {
        Method {
            name: name.to_owned(),
            params: params.iter().map(|p| (*p).to_owned()).collect(),
            body,
        }
    }

    fn return_string(value: &str) -> Vec<Stmt> {
        vec![Stmt::Return(Some(Expr::StringLiteral(value.to_owned())))]
    }

    #[test]
    fn test_method_resolution_prefers_own() {
        let base = ClassPtr::new(
            "Base".to_owned(),
            vec![method("greet", &[], return_string("base"))],
            None,
        );
        let derived = ClassPtr::new(
            "Derived".to_owned(),
            vec![method("greet", &[], return_string("derived"))],
            Some(base),
        );

        let found = derived.find_method("greet").unwrap();
        assert_eq!(found.body, return_string("derived"));
    }

    #[test]
    fn test_method_resolution_walks_whole_chain() {
        let grandparent = ClassPtr::new(
            "A".to_owned(),
            vec![method("foo", &[], return_string("A.foo"))],
            None,
        );
        let parent = ClassPtr::new("B".to_owned(), vec![], Some(grandparent));
        let child = ClassPtr::new("C".to_owned(), vec![], Some(parent));

        assert!(child.find_method("foo").is_some());
        assert!(child.find_method("bar").is_none());
    }

    #[test]
    fn test_declaration_order_wins() {
        // Linear scan returns the first match, not an alphabetical one.
        let class = ClassPtr::new(
            "C".to_owned(),
            vec![
                method("zeta", &[], return_string("first")),
                method("alpha", &[], return_string("second")),
            ],
            None,
        );
        assert_eq!(
            class.find_method("zeta").unwrap().body,
            return_string("first")
        );
        assert_eq!(class.0.methods.borrow()[0].name, "zeta");
    }

    #[test]
    fn test_define_methods_after_registration() {
        let class = ClassPtr::new("Late".to_owned(), vec![], None);
        let alias = class.clone();
        assert!(alias.find_method("greet").is_none());

        class.define_methods(vec![method("greet", &[], return_string("hi"))]);
        assert!(alias.find_method("greet").is_some());
    }

    #[test]
    fn test_has_method_checks_arity() {
        let class = ClassPtr::new(
            "C".to_owned(),
            vec![method("f", &["x"], vec![Stmt::Return(None)])],
            None,
        );
        let instance = InstancePtr::new(&class);

        assert!(instance.has_method("f", 1));
        assert!(!instance.has_method("f", 0));
        assert!(!instance.has_method("g", 0));
    }

    #[test]
    fn test_call_binds_self_and_params() {
        // def keep(self, value): self.kept = value
        let class = ClassPtr::new(
            "Keeper".to_owned(),
            vec![method(
                "keep",
                &["value"],
                vec![Stmt::Expression(Expr::Set(
                    Box::new(Expr::Variable("self".to_owned())),
                    "kept".to_owned(),
                    Box::new(Expr::Variable("value".to_owned())),
                ))],
            )],
            None,
        );
        let instance = InstancePtr::new(&class);
        let mut context = WriterContext::new(Vec::new());

        let result = instance
            .call("keep", vec![Object::Number(42)], &mut context)
            .unwrap();
        assert_eq!(result, Object::None);
        assert_eq!(instance.get_field("kept"), Some(Object::Number(42)));
    }

    #[test]
    fn test_call_missing_method() {
        let class = ClassPtr::new("Empty".to_owned(), vec![], None);
        let instance = InstancePtr::new(&class);
        let mut context = WriterContext::new(Vec::new());

        let result = instance.call("missing", vec![], &mut context);
        assert!(matches!(result, Err(RuntimeError::NoSuchMethod(..))));
    }

    #[test]
    fn test_print_dispatches_str() {
        let class = ClassPtr::new(
            "Greeting".to_owned(),
            vec![method("__str__", &[], return_string("hi"))],
            None,
        );
        let instance = InstancePtr::new(&class);
        let mut context = WriterContext::new(Vec::new());

        instance.print(&mut context).unwrap();
        assert_eq!(context.into_inner(), b"hi");
    }

    #[test]
    fn test_print_identity_without_str() {
        let class = ClassPtr::new("Plain".to_owned(), vec![], None);
        let instance = InstancePtr::new(&class);
        let mut context = WriterContext::new(Vec::new());

        instance.print(&mut context).unwrap();
        let printed = String::from_utf8(context.into_inner()).unwrap();
        assert!(printed.starts_with("<Plain object at 0x"));

        // The identity token is stable across prints of the same instance.
        let mut context = WriterContext::new(Vec::new());
        instance.print(&mut context).unwrap();
        assert_eq!(printed, String::from_utf8(context.into_inner()).unwrap());
    }

    #[test]
    fn test_str_with_params_is_ignored_by_print() {
        let class = ClassPtr::new(
            "Odd".to_owned(),
            vec![method("__str__", &["x"], return_string("nope"))],
            None,
        );
        let instance = InstancePtr::new(&class);
        let mut context = WriterContext::new(Vec::new());

        instance.print(&mut context).unwrap();
        let printed = String::from_utf8(context.into_inner()).unwrap();
        assert!(printed.starts_with("<Odd object at 0x"));
    }

    #[test]
    fn test_instantiate_runs_init() {
        // def __init__(self, x): self.x = x
        let class = ClassPtr::new(
            "Box".to_owned(),
            vec![method(
                "__init__",
                &["x"],
                vec![Stmt::Expression(Expr::Set(
                    Box::new(Expr::Variable("self".to_owned())),
                    "x".to_owned(),
                    Box::new(Expr::Variable("x".to_owned())),
                ))],
            )],
            None,
        );
        let mut context = WriterContext::new(Vec::new());

        let obj = class
            .instantiate(vec![Object::Number(9)], &mut context)
            .unwrap();
        match obj {
            Object::Instance(instance) => {
                assert_eq!(instance.get_field("x"), Some(Object::Number(9)))
            }
            other => panic!("expected instance, got {:?}", other),
        }
    }

    #[test]
    fn test_instantiate_arity_mismatch() {
        let class = ClassPtr::new("Empty".to_owned(), vec![], None);
        let mut context = WriterContext::new(Vec::new());

        assert!(class.instantiate(vec![], &mut context).is_ok());
        assert!(matches!(
            class.instantiate(vec![Object::Number(1)], &mut context),
            Err(RuntimeError::NoSuchMethod(..))
        ));
    }
}
