use anyhow::{anyhow, Context, Result};

/// One `(tag, id)` pair scanned from a route line, e.g. `H1` or `(P,3)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteToken {
    pub tag: char,
    pub id: usize,
}

impl RouteToken {
    pub fn new(tag: char, id: usize) -> Self {
        Self {
            tag: tag.to_ascii_uppercase(),
            id,
        }
    }
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == ',' || c == ';'
}

/// Scans a route made of parenthesised groups.
///
/// Two spellings are accepted and may be mixed on one line:
/// * `(H,1)(P,3)`: the group itself is the action.
/// * `H1(0,0) P3(4,5,60)`: the text in front of a group is the action and
///   the group is an annotation that gets discarded.
///
/// Anything after the last closed group is ignored.
pub fn lex_route(input: &str) -> Result<Vec<RouteToken>> {
    let mut tokens = Vec::new();
    let mut rest = input;
    while let Some(open) = rest.find('(') {
        let close = match rest[open..].find(')') {
            Some(offset) => open + offset,
            None => break,
        };
        let prefix = rest[..open].trim_matches(is_separator);
        let group = &rest[open + 1..close];
        let token = if prefix.is_empty() {
            parse_group(group)
        } else {
            parse_token(prefix)
        };
        tokens.push(
            token.with_context(|| format!("Invalid route step near '{}'", rest[..=close].trim()))?,
        );
        rest = &rest[close + 1..];
    }
    Ok(tokens)
}

fn parse_group(group: &str) -> Result<RouteToken> {
    let parts: Vec<&str> = group.split(',').map(str::trim).collect();
    match parts.as_slice() {
        [tag, id] => {
            let mut chars = tag.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_alphabetic() => Ok(RouteToken::new(c, parse_id(id)?)),
                _ => Err(anyhow!("Expected a single letter tag, got '{}'", tag)),
            }
        }
        [token] => parse_token(token),
        _ => Err(anyhow!("Expected '(TAG,id)', got '({})'", group)),
    }
}

fn parse_token(token: &str) -> Result<RouteToken> {
    let mut chars = token.chars();
    match chars.next() {
        Some(tag) if tag.is_alphabetic() => Ok(RouteToken::new(tag, parse_id(chars.as_str())?)),
        _ => Err(anyhow!("Expected a tag letter followed by an id, got '{}'", token)),
    }
}

fn parse_id(id: &str) -> Result<usize> {
    let id = id.trim();
    id.parse::<usize>()
        .map_err(|_| anyhow!("Expected a non-negative integer id, got '{}'", id))
}
