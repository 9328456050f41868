use regex::Regex;

use crate::error::Error;

/// Predicate over a match target (absolute path or relative key). Kept as
/// a seam so tests can substitute literal or glob matchers without tying
/// expectation evaluation to one pattern dialect.
pub trait PathMatcher {
    fn is_match(&self, target: &str) -> bool;
}

/// Full-string regular expression match: the pattern must cover the whole
/// target, not a substring of it.
pub struct RegexMatcher {
    re: Regex,
}

impl RegexMatcher {
    pub fn new(pattern: &str) -> Result<Self, Error> {
        let re = Regex::new(&format!("^(?:{pattern})$"))?;
        Ok(Self { re })
    }
}

impl PathMatcher for RegexMatcher {
    fn is_match(&self, target: &str) -> bool {
        self.re.is_match(target)
    }
}
