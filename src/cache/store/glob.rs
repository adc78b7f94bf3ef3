/// Match `text` against a Redis-style glob.
///
/// Supports `*`, `?`, `[...]` classes (with `^` negation and `a-z` ranges)
/// and `\` escapes, which is the subset `SCAN MATCH` understands.
pub fn glob_match(pattern: &str, text: &str) -> bool {
    let p: Vec<char> = pattern.chars().collect();
    let t: Vec<char> = text.chars().collect();

    let (mut pi, mut ti) = (0usize, 0usize);
    // Pattern index after the last `*`, and the text index it is currently absorbing up to.
    let mut star: Option<(usize, usize)> = None;

    while ti < t.len() {
        let step = if pi < p.len() {
            match p[pi] {
                '*' => {
                    star = Some((pi + 1, ti));
                    pi += 1;
                    continue;
                }
                '?' => Some(1),
                '\\' if pi + 1 < p.len() => (p[pi + 1] == t[ti]).then_some(2),
                '[' => match class_match(&p[pi..], t[ti]) {
                    Some((true, len)) => Some(len),
                    Some((false, _)) => None,
                    None => (t[ti] == '[').then_some(1),
                },
                c => (c == t[ti]).then_some(1),
            }
        } else {
            None
        };

        match step {
            Some(advance) => {
                pi += advance;
                ti += 1;
            }
            None => match star {
                Some((resume, absorbed)) => {
                    pi = resume;
                    ti = absorbed + 1;
                    star = Some((resume, absorbed + 1));
                }
                None => return false,
            },
        }
    }

    while pi < p.len() && p[pi] == '*' {
        pi += 1;
    }
    pi == p.len()
}

/// Evaluate a `[...]` class starting at `p[0]`. Returns the match result and
/// the class length, or `None` when the class is unterminated.
fn class_match(p: &[char], c: char) -> Option<(bool, usize)> {
    let negate = p.get(1) == Some(&'^');
    let mut i = if negate { 2 } else { 1 };
    let mut matched = false;

    while i < p.len() {
        match p[i] {
            ']' => return Some((matched != negate, i + 1)),
            '\\' if i + 1 < p.len() => {
                matched |= p[i + 1] == c;
                i += 2;
            }
            lo if i + 2 < p.len() && p[i + 1] == '-' && p[i + 2] != ']' => {
                let hi = p[i + 2];
                let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
                matched |= (lo..=hi).contains(&c);
                i += 3;
            }
            other => {
                matched |= other == c;
                i += 1;
            }
        }
    }

    None
}
