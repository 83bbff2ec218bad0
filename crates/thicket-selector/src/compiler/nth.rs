//! [§ 14.1 The `An+B` notation](https://www.w3.org/TR/selectors-4/#anb)

/// A parsed `An+B` expression.
///
/// "The An+B notation defines an integer step (A) and offset (B), and
/// represents the An+Bth elements in a list, for every positive integer or
/// zero value of n, with the first element in the list having index 1."
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nth {
    /// The step.
    pub a: i32,
    /// The offset.
    pub b: i32,
}

impl Nth {
    /// Parse `odd`, `even`, `B`, `An`, `An+B`, `An-B`, `-n+B`, `+n` and
    /// friends. Whitespace anywhere is ignored.
    pub fn parse(text: &str) -> Option<Self> {
        let compact: String = text
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();

        match compact.as_str() {
            "odd" => return Some(Self { a: 2, b: 1 }),
            "even" => return Some(Self { a: 2, b: 0 }),
            "" => return None,
            _ => {}
        }

        let Some((step, offset)) = compact.split_once('n') else {
            return Some(Self {
                a: 0,
                b: parse_integer(&compact)?,
            });
        };

        let a = match step {
            "" | "+" => 1,
            "-" => -1,
            digits => parse_integer(digits)?,
        };
        let b = match offset {
            "" => 0,
            signed if signed.starts_with(['+', '-']) => parse_integer(signed)?,
            _ => return None,
        };

        Some(Self { a, b })
    }

    /// Whether the 1-based `position` is `a*n + b` for some `n >= 0`.
    pub fn matches(self, position: usize) -> bool {
        let Ok(position) = i64::try_from(position) else {
            return false;
        };
        let a = i64::from(self.a);
        let diff = position - i64::from(self.b);

        if a == 0 {
            diff == 0
        } else {
            diff % a == 0 && diff / a >= 0
        }
    }
}

/// An optionally signed run of ASCII digits.
fn parse_integer(text: &str) -> Option<i32> {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}
