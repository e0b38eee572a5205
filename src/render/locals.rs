use serde_json::Value;

/// Merges locals passed to a single template over the render globals.
///
/// Maps are merged shallowly with the locals taking precedence, `null`
/// keeps the globals and anything else replaces them.
pub(crate) fn merge(globals: &Value, locals: Value) -> Value {
    match (globals, locals) {
        (Value::Object(globals), Value::Object(locals)) => {
            let mut merged = globals.clone();
            merged.extend(locals);
            Value::Object(merged)
        }
        (globals, Value::Null) => globals.clone(),
        (_, locals) => locals,
    }
}
