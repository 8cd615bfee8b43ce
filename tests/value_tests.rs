use rust_fscript::{JSArray, JSFunction, JSRecord, Position, Range, ScriptError, Value};

#[ctor::ctor]
fn __init_test_logger() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default()).is_test(true).try_init();
}

fn key(s: &str) -> Value {
    Value::String(s.to_string())
}

fn call_method(receiver: &Value, name: &str, args: &[Value]) -> Result<Value, ScriptError> {
    match receiver.get(&key(name), None)? {
        Value::Function(method) => method.exec(args, false),
        other => panic!("Expected {name} to be a function, got {:?}", other),
    }
}

fn method(receiver: &Value, name: &str) -> JSFunction {
    match receiver.get(&key(name), None) {
        Ok(Value::Function(method)) => method,
        other => panic!("Expected {name} to be a function, got {:?}", other),
    }
}

#[cfg(test)]
mod value_tests {
    use super::*;

    #[test]
    fn test_type_names() {
        assert_eq!(Value::Null.type_name(), "null");
        assert_eq!(Value::Undefined.type_name(), "undefined");
        assert_eq!(Value::Boolean(true).type_name(), "Boolean");
        assert_eq!(Value::Number(1.0).type_name(), "Number");
        assert_eq!(Value::String(String::new()).type_name(), "String");
        assert_eq!(Value::Array(JSArray::default()).type_name(), "Array");
        assert_eq!(Value::Record(JSRecord::new()).type_name(), "Record");
        assert_eq!(Value::Function(JSFunction::native(|_| Ok(Value::Undefined))).type_name(), "Function");
    }

    #[test]
    fn test_primitive_to_string_methods() {
        let result = call_method(&Value::Boolean(true), "toString", &[]);
        assert!(matches!(result, Ok(Value::String(ref s)) if s == "true"));

        let result = call_method(&Value::Number(255.0), "toString", &[]);
        assert!(matches!(result, Ok(Value::String(ref s)) if s == "255"));

        let result = call_method(&Value::Number(255.0), "toString", &[Value::Number(16.0)]);
        assert!(matches!(result, Ok(Value::String(ref s)) if s == "ff"));

        let result = call_method(&key("hi"), "toString", &[]);
        assert!(matches!(result, Ok(Value::String(ref s)) if s == "hi"));
    }

    #[test]
    fn test_number_to_string_rejects_bad_radix() {
        let result = call_method(&Value::Number(1.0), "toString", &[key("16")]);
        assert_eq!(
            result.unwrap_err().message(),
            "Expected type: [number, undefined], Actual type: String"
        );
        let result = call_method(&Value::Number(1.0), "toString", &[Value::Number(37.0)]);
        assert!(matches!(result, Err(ScriptError::RangeError { .. })));
    }

    #[test]
    fn test_more_primitive_members() {
        let result = call_method(&Value::Number(1.005), "toFixed", &[Value::Number(1.0)]);
        assert!(matches!(result, Ok(Value::String(ref s)) if s == "1.0"));
        let result = call_method(&key("Abc"), "toUpperCase", &[]);
        assert!(matches!(result, Ok(Value::String(ref s)) if s == "ABC"));
        let result = call_method(&key("Abc"), "toLowerCase", &[]);
        assert!(matches!(result, Ok(Value::String(ref s)) if s == "abc"));
        let result = call_method(&Value::Boolean(false), "valueOf", &[]);
        assert!(matches!(result, Ok(Value::Boolean(false))));
        assert!(matches!(key("héllo").get(&key("length"), None), Ok(Value::Number(n)) if n == 5.0));
    }

    #[test]
    fn test_unknown_primitive_member_is_undefined() {
        assert!(matches!(Value::Number(1.0).get(&key("nope"), None), Ok(Value::Undefined)));
        assert!(matches!(Value::Boolean(true).get(&Value::Null, None), Ok(Value::Undefined)));
    }

    #[test]
    fn test_primitive_method_is_not_a_constructor() {
        let to_string = method(&Value::Number(1.0), "toString");
        let result = to_string.exec(&[], true);
        match result {
            Err(ScriptError::TypeError { message, .. }) => assert_eq!(message, "This is not a constructor"),
            _ => panic!("Expected TypeError, got {:?}", result),
        }
    }

    #[test]
    fn test_primitive_method_checks_this() {
        let to_string = method(&Value::Boolean(true), "toString");
        let result = to_string.bind(Value::Number(1.0)).exec(&[], false);
        assert_eq!(
            result.unwrap_err().message(),
            "Expected 'this' to be a Boolean, but actually Number"
        );

        let to_string = method(&key("s"), "toString");
        let result = to_string.bind(Value::Undefined).exec(&[], false);
        assert_eq!(
            result.unwrap_err().message(),
            "Expected 'this' to be a String, but actually undefined"
        );
    }

    #[test]
    fn test_primitives_are_immutable() {
        for value in [Value::Boolean(true), Value::Number(1.0), key("s")] {
            let result = value.set(&key("x"), Value::Null, None);
            match result {
                Err(ScriptError::TypeError { message, .. }) => {
                    assert_eq!(message, format!("You cannot set any value to {}", value.type_name()));
                }
                _ => panic!("Expected TypeError, got {:?}", result),
            }
        }
    }

    #[test]
    fn test_nullish_member_access_fails() {
        assert!(Value::Null.get(&key("x"), None).is_err());
        assert!(Value::Undefined.set(&key("x"), Value::Null, None).is_err());
    }

    #[test]
    fn test_errors_carry_range() {
        let range = Range::new(Position { line: 3, column: 4 }, Position { line: 3, column: 9 });
        let err = Value::Number(1.0).set(&key("x"), Value::Null, Some(range)).unwrap_err();
        assert_eq!(err.range(), Some(range));
        assert_eq!(range.to_string(), "3:4-3:9");

        let to_string = method(&Value::Number(1.0), "toString");
        assert_eq!(to_string.exec(&[], true).unwrap_err().range(), None);
    }

    #[test]
    fn test_primitive_conversions() {
        assert_eq!(Value::Boolean(true).to_primitive_as_number(), Some(1.0));
        assert_eq!(Value::Number(-0.0).to_primitive_as_string().as_deref(), Some("0"));
        assert_eq!(key(" 42 ").to_primitive_as_number(), Some(42.0));
        assert_eq!(Value::Null.to_primitive_as_string(), None);
        assert_eq!(Value::Undefined.to_primitive_as_number(), None);
    }
}
