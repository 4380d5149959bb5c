//! Decoding of git's C-style quoted paths
//!
//! Git wraps a path in double quotes and escapes it when it contains
//! control characters, quotes or backslashes (and non-ASCII bytes unless
//! `core.quotePath` is off).

/// Decode `"a\tb"` into `a<TAB>b`; `None` if the line is not a quoted path
#[must_use]
pub fn unquote(line: &str) -> Option<String> {
    let inner = line.strip_prefix('"')?.strip_suffix('"')?;
    let mut bytes = Vec::with_capacity(inner.len());
    let mut chars = inner.bytes().peekable();

    while let Some(b) = chars.next() {
        if b != b'\\' {
            bytes.push(b);
            continue;
        }
        let escaped = chars.next()?;
        let decoded = match escaped {
            b'a' => 0x07,
            b'b' => 0x08,
            b'f' => 0x0c,
            b'n' => b'\n',
            b'r' => b'\r',
            b't' => b'\t',
            b'v' => 0x0b,
            b'"' => b'"',
            b'\\' => b'\\',
            b'0'..=b'3' => {
                // Three octal digits encode one raw byte
                let mut value = u32::from(escaped - b'0');
                for _ in 0..2 {
                    let digit = chars.next_if(|d| (b'0'..=b'7').contains(d))?;
                    value = value * 8 + u32::from(digit - b'0');
                }
                u8::try_from(value).ok()?
            },
            _ => return None,
        };
        bytes.push(decoded);
    }

    Some(String::from_utf8_lossy(&bytes).into_owned())
}
