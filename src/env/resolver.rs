use std::collections::HashMap;

use crate::env::interpolator::parse_vars;
use crate::model::request::VariableMap;

/// Substitute every known `{{name}}` placeholder in `input` with its value
/// from `vars`. Unknown names keep their placeholder text verbatim; inputs
/// without placeholders come back unchanged.
pub fn resolve(input: &str, vars: &VariableMap) -> String {
    let var_spans = parse_vars(input);
    if var_spans.is_empty() {
        return input.to_string();
    }

    let mut output = String::with_capacity(input.len());
    let mut last = 0;

    for (start, end, name) in &var_spans {
        output.push_str(&input[last..*start]);
        match vars.get(name.as_str()) {
            Some(val) => output.push_str(val),
            // Keep the original `{{name}}` text for unresolved
            None => output.push_str(&input[*start..*end]),
        }
        last = *end;
    }

    output.push_str(&input[last..]);
    output
}

/// Resolve the values of a string map. Keys are never substituted.
pub fn resolve_values(
    map: &HashMap<String, String>,
    vars: &VariableMap,
) -> HashMap<String, String> {
    map.iter().map(|(k, v)| (k.clone(), resolve(v, vars))).collect()
}
