/// Parse all `{{identifier}}` spans in `input`.
/// Returns a list of `(start_byte, end_byte, name)` where start/end are byte
/// offsets in the original string (inclusive of the `{{` and `}}` delimiters).
/// An identifier is one or more of `[A-Za-z0-9_]`; anything else between the
/// braces disqualifies the token. A malformed opener does not hide a valid
/// token starting inside it, so `{{{x}}}` still yields the `{{x}}` span.
pub fn parse_vars(input: &str) -> Vec<(usize, usize, String)> {
    let mut result = Vec::new();
    let bytes = input.as_bytes();
    let len = bytes.len();
    let mut i = 0;

    while i + 1 < len {
        if bytes[i] == b'{' && bytes[i + 1] == b'{' {
            let inner_start = i + 2;
            let mut j = inner_start;
            while j < len && is_identifier_byte(bytes[j]) {
                j += 1;
            }
            if j > inner_start && j + 1 < len && bytes[j] == b'}' && bytes[j + 1] == b'}' {
                result.push((i, j + 2, input[inner_start..j].to_string()));
                i = j + 2;
            } else {
                i += 1;
            }
        } else {
            i += 1;
        }
    }

    result
}

fn is_identifier_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}
