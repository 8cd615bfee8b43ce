use rust_fscript::{new_global_record, Context, JSRecord, ScriptError, Value, VarKind};

#[ctor::ctor]
fn __init_test_logger() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default()).is_test(true).try_init();
}

fn new_context() -> Context {
    Context::new(new_global_record(None))
}

fn number_of(context: &Context, name: &str) -> f64 {
    match context.get(name, None) {
        Ok(Value::Number(n)) => n,
        other => panic!("Expected {name} to be a number, got {:?}", other),
    }
}

#[cfg(test)]
mod context_tests {
    use super::*;

    #[test]
    fn test_shadowing_across_scopes() {
        let mut context = new_context();
        context.declare("x", Value::Number(1.0), VarKind::Let, None).unwrap();
        context.scope_in();
        context.declare("x", Value::Number(2.0), VarKind::Let, None).unwrap();
        assert_eq!(number_of(&context, "x"), 2.0);
        context.scope_out().unwrap();
        assert_eq!(number_of(&context, "x"), 1.0);
    }

    #[test]
    fn test_const_assignment_fails() {
        let mut context = new_context();
        context.declare("x", Value::Number(1.0), VarKind::Const, None).unwrap();
        let result = context.assign("x", Value::Number(2.0), None);
        match result {
            Err(ScriptError::TypeError { message, .. }) => assert_eq!(message, "invalid assignment to const 'x'"),
            _ => panic!("Expected TypeError, got {:?}", result),
        }
        assert_eq!(number_of(&context, "x"), 1.0);
    }

    #[test]
    fn test_let_assignment_updates_innermost_binding() {
        let mut context = new_context();
        context.declare("x", Value::Number(1.0), VarKind::Let, None).unwrap();
        context.scope_in();
        context.assign("x", Value::Number(5.0), None).unwrap();
        context.scope_out().unwrap();
        assert_eq!(number_of(&context, "x"), 5.0);
    }

    #[test]
    fn test_redeclaration_in_same_frame_fails() {
        let mut context = new_context();
        context.declare("x", Value::Number(1.0), VarKind::Let, None).unwrap();
        let result = context.declare("x", Value::Number(2.0), VarKind::Const, None);
        match result {
            Err(ScriptError::SyntaxError { message, .. }) => assert_eq!(message, "redeclaration of const x"),
            _ => panic!("Expected SyntaxError, got {:?}", result),
        }
    }

    #[test]
    fn test_base_scope_cannot_be_popped() {
        let mut context = new_context();
        assert!(matches!(context.scope_out(), Err(ScriptError::InternalError { .. })));
        context.scope_in();
        assert_eq!(context.depth(), 2);
        context.scope_out().unwrap();
        assert!(context.scope_out().is_err());
        assert_eq!(context.depth(), 1);
    }

    #[test]
    fn test_popped_bindings_are_discarded() {
        let mut context = new_context();
        context.scope_in();
        context.declare("inner", Value::Boolean(true), VarKind::Let, None).unwrap();
        context.scope_out().unwrap();
        assert!(matches!(context.get("inner", None), Ok(Value::Undefined)));
    }

    #[test]
    fn test_global_fallback() {
        let global = JSRecord::new();
        global.insert("answer".to_string(), Value::Number(42.0));
        let mut context = Context::new(new_global_record(Some(&global)));
        assert_eq!(number_of(&context, "answer"), 42.0);

        context.assign("created", Value::Number(1.0), None).unwrap();
        assert!(matches!(context.global_this().get_own("created"), Some(Value::Number(n)) if n == 1.0));

        context.declare("answer", Value::Number(0.0), VarKind::Let, None).unwrap();
        assert_eq!(number_of(&context, "answer"), 0.0);
        assert!(matches!(context.global_this().get_own("answer"), Some(Value::Number(n)) if n == 42.0));
    }

    #[test]
    fn test_global_self_names() {
        let mut context = new_context();
        match context.get("globalThis", None) {
            Ok(Value::Record(record)) => assert!(record.ptr_eq(context.global_this())),
            other => panic!("Expected the global record, got {:?}", other),
        }
        let result = context.assign("self", Value::Null, None);
        assert!(matches!(result, Err(ScriptError::TypeError { .. })));
    }

    #[test]
    fn test_current_this_starts_as_global() {
        let mut context = new_context();
        match context.current_this() {
            Value::Record(record) => assert!(record.ptr_eq(context.global_this())),
            other => panic!("Expected the global record, got {:?}", other),
        }
        let previous = context.set_current_this(Value::Undefined);
        assert!(matches!(previous, Value::Record(_)));
        assert!(matches!(context.current_this(), Value::Undefined));
    }

    #[test]
    fn test_with_scope_pops_on_error() {
        let mut context = new_context();
        let result: Result<(), ScriptError> = context.with_scope(|scoped| {
            scoped.declare("x", Value::Number(1.0), VarKind::Let, None)?;
            scoped.declare("x", Value::Number(2.0), VarKind::Let, None)
        });
        assert!(result.is_err());
        assert_eq!(context.depth(), 1);
        assert!(matches!(context.get("x", None), Ok(Value::Undefined)));

        let value = context
            .with_scope(|scoped| {
                scoped.declare("y", Value::Number(3.0), VarKind::Const, None)?;
                scoped.get("y", None)
            })
            .unwrap();
        assert!(matches!(value, Value::Number(n) if n == 3.0));
        assert_eq!(context.depth(), 1);
    }
}
