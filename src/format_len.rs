// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Upper bound on the rendered width of a strftime-style format.
//!
//! Fixed-width text output needs to know how wide a formatted timestamp can
//! get before any timestamp is formatted. [`get_datetime_fmt_len`] walks the
//! format once, counts literal characters as-is and replaces every
//! recognised directive by the widest rendering chrono can produce for it
//! (C locale, years 0001–9999).

/// Widest time-zone name rendered by `%Z`: an offset with seconds
/// (`"+00:19:32"`), as local-mean-time zones and `FixedOffset` produce.
pub const MAX_TZ_NAME_LEN: usize = 9;

/// Longest English weekday name (`"Wednesday"`).
const MAX_WEEKDAY_LEN: usize = 9;

/// Longest English month name (`"September"`).
const MAX_MONTH_LEN: usize = 9;

/// Directives made of more than one character after `%` (and any padding
/// flag). Longest first so `::z` wins over `:z`.
const MULTI_CHAR_DIRECTIVES: &[&str] = &[
    ":::z", "::z", ":z", "#z", ".3f", ".6f", ".9f", ".f", "3f", "6f", "9f",
];

/// Maximum number of characters any datetime can render with `datetime_fmt`.
///
/// Literal text counts one per character. A `%` sequence that is not a
/// recognised directive is also counted literally. The bound is never
/// smaller than the rendered length and is exact for formats built only from
/// fixed-width directives.
///
/// ```
/// use ocb_utils::get_datetime_fmt_len;
///
/// assert_eq!(get_datetime_fmt_len("%Y-%m-%d %H:%M:%S"), 19);
/// assert_eq!(get_datetime_fmt_len("%A"), 9);
/// assert_eq!(get_datetime_fmt_len("No Directives"), 13);
/// ```
pub fn get_datetime_fmt_len(datetime_fmt: &str) -> usize {
    let mut len = 0;
    let mut rest = datetime_fmt;

    while let Some(pos) = rest.find('%') {
        len += rest[..pos].chars().count();
        let after = &rest[pos + 1..];

        let flag_len = match after.chars().next() {
            Some('-' | '_' | '0') => 1,
            _ => 0,
        };
        let body = &after[flag_len..];

        let (spec, width) = match MULTI_CHAR_DIRECTIVES.iter().find(|d| body.starts_with(**d)) {
            Some(spec) => (*spec, directive_width(spec)),
            None => match body.chars().next() {
                Some(c) => {
                    let spec = &body[..c.len_utf8()];
                    (spec, directive_width(spec))
                }
                None => ("", None),
            },
        };

        let consumed = 1 + flag_len + spec.len();
        len += match width {
            Some(width) => width,
            None => rest[pos..pos + consumed].chars().count(),
        };
        rest = &rest[pos + consumed..];
    }

    len + rest.chars().count()
}

fn directive_width(spec: &str) -> Option<usize> {
    let width = match spec {
        // date
        "Y" | "G" => 4,
        "C" | "y" | "g" | "m" | "d" | "e" | "U" | "W" | "V" => 2,
        "q" | "w" | "u" => 1,
        "b" | "h" | "a" => 3,
        "B" => MAX_MONTH_LEN,
        "A" => MAX_WEEKDAY_LEN,
        "j" => 3,
        "D" | "x" => 8,
        "F" => 10,
        "v" => 2 + 1 + 3 + 1 + 4,
        // time
        "H" | "k" | "I" | "l" | "M" | "S" | "P" | "p" => 2,
        "f" | "9f" => 9,
        "6f" => 6,
        "3f" => 3,
        ".f" | ".9f" => 10,
        ".6f" => 7,
        ".3f" => 4,
        "R" => 5,
        "T" | "X" => 8,
        "r" => 11,
        // zone
        "Z" => MAX_TZ_NAME_LEN,
        "z" => 5,
        ":z" | "#z" => 6,
        "::z" => 9,
        ":::z" => 3,
        // composites
        "c" => 3 + 1 + 3 + 1 + 2 + 1 + 8 + 1 + 4,
        "+" => 19 + 10 + 6,
        "s" => 12,
        "t" | "n" | "%" => 1,
        _ => return None,
    };
    Some(width)
}
