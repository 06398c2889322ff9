/// Width of the timestamp column at the start of every line
const TIME_WIDTH: usize = 10;

/// Byte offset where the payload starts (timestamp column plus one separator)
const PAYLOAD_OFFSET: usize = TIME_WIDTH + 1;

/// A single log line split into its fixed-width columns
///
/// Lines look like `TTTTTTTTTT <payload>`. Nothing here can fail: a short or
/// garbled line yields a zero timestamp and/or an empty payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawLine<'a> {
    pub time: i64,
    pub payload: &'a str,
}

impl<'a> RawLine<'a> {
    pub fn parse(line: &'a str) -> Self {
        let bytes = line.as_bytes();
        let time = parse_leading_int(&bytes[..bytes.len().min(TIME_WIDTH)]);

        // Payload begins at the first char boundary at or after the offset
        let payload = (PAYLOAD_OFFSET..=line.len())
            .find(|&i| line.is_char_boundary(i))
            .map(|i| &line[i..])
            .unwrap_or("");

        Self { time, payload }
    }
}

/// Integer value of the leading numeric part of `bytes`
///
/// Accepts leading ASCII whitespace and an optional sign, then reads digits
/// until the first non-digit. Returns 0 when no digits are found.
fn parse_leading_int(bytes: &[u8]) -> i64 {
    let mut iter = bytes.iter().copied().skip_while(|b| b.is_ascii_whitespace()).peekable();

    let negative = match iter.peek() {
        Some(b'-') => {
            iter.next();
            true
        }
        Some(b'+') => {
            iter.next();
            false
        }
        _ => false,
    };

    // At most ten digits, so this cannot overflow
    let value = iter
        .take_while(|b| b.is_ascii_digit())
        .fold(0i64, |acc, b| acc * 10 + i64::from(b - b'0'));

    if negative { -value } else { value }
}
