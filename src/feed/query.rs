use crate::core::models::FeedQuery;

impl FeedQuery {
    /// Read the `limit` query parameter.
    ///
    /// Leading-integer parsing: `"3abc"` is 3 and `"2.9"` is 2. Anything without
    /// leading digits yields the default; the result is clamped into range.
    #[must_use]
    pub fn from_limit_param(raw: Option<&str>) -> Self {
        let limit = raw
            .and_then(parse_leading_int)
            .map_or(Self::DEFAULT_LIMIT, |n| {
                let clamped = n.clamp(Self::MIN_LIMIT as i64, Self::MAX_LIMIT as i64);
                usize::try_from(clamped).unwrap_or(Self::DEFAULT_LIMIT)
            });
        Self { limit }
    }
}

fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digit_count = digits.bytes().take_while(u8::is_ascii_digit).count();
    if digit_count == 0 {
        return None;
    }

    let value = digits[..digit_count].bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    Some(if negative { -value } else { value })
}
