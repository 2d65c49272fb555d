pub fn separated_by<T, F>(
    out: &mut String,
    values: impl IntoIterator<Item = T>,
    mut f: F,
    separator: &str,
) where
    F: FnMut(&mut String, T),
{
    let mut len = out.len();
    for v in values {
        if out.len() > len {
            out.push_str(separator);
        }
        len = out.len();
        f(out, v);
    }
}

/// Splits a `NAME(a,b)` type token into its name and the raw parenthesized arguments.
///
/// Returns `None` as arguments when there are no parentheses and `Err` when they are unbalanced.
pub(crate) fn split_type_token(token: &str) -> Result<(&str, Option<&str>), ()> {
    let Some(open) = token.find('(') else {
        return Ok((token, None));
    };
    let rest = &token[open + 1..];
    let Some(close) = rest.find(')') else {
        return Err(());
    };
    Ok((&token[..open], Some(&rest[..close])))
}

/// Parses the arguments of a type token: `len` or `len,len2`.
pub(crate) fn parse_lengths(args: &str) -> Result<(u32, u32), ()> {
    let mut parts = args.split(',').map(str::trim);
    let length = parts
        .next()
        .filter(|v| !v.is_empty())
        .ok_or(())?
        .parse::<u32>()
        .map_err(|_| ())?;
    let length2 = match parts.next() {
        Some(v) => v.parse::<u32>().map_err(|_| ())?,
        None => 0,
    };
    if parts.next().is_some() {
        return Err(());
    }
    Ok((length, length2))
}

#[macro_export]
macro_rules! truncate_long {
    ($query:expr) => {
        format_args!(
            "{}{}",
            &$query[..::std::cmp::min($query.len(), 497)].trim_end(),
            if $query.len() > 497 { "..." } else { "" },
        )
    };
}
