//! Six-part dataset path grammar
//!
//! Paths have the shape `/A/B/C/D/E/F/`: six parts delimited by exactly seven
//! slashes. Any part may be empty. Part D may hold a regular expression,
//! which is used when matching series inside an external container.

use std::fmt;

use regex::Regex;

use crate::error::{CatalogError, CatalogResult};

/// A parsed six-part dataset path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathParts {
    pub a: String,
    pub b: String,
    pub c: String,
    pub d: String,
    pub e: String,
    pub f: String,
}

impl PathParts {
    /// Parse a path string, trimming surrounding whitespace per part
    pub fn parse(s: &str) -> CatalogResult<Self> {
        let trimmed = s.trim();
        if !trimmed.starts_with('/') || !trimmed.ends_with('/') {
            return Err(CatalogError::BadInput(format!(
                "path must start and end with '/': {}",
                s
            )));
        }

        let pieces: Vec<&str> = trimmed.split('/').collect();
        // "/A/B/C/D/E/F/" splits into ["", A, B, C, D, E, F, ""]
        if pieces.len() != 8 {
            return Err(CatalogError::BadInput(format!(
                "path must have six parts delimited by seven '/': {}",
                s
            )));
        }

        Ok(Self {
            a: pieces[1].trim().to_string(),
            b: pieces[2].trim().to_string(),
            c: pieces[3].trim().to_string(),
            d: pieces[4].trim().to_string(),
            e: pieces[5].trim().to_string(),
            f: pieces[6].trim().to_string(),
        })
    }

    /// Parse then re-serialize, producing the canonical form of a path string
    ///
    /// Idempotent: normalizing an already-normalized path returns it unchanged.
    pub fn normalize(s: &str) -> CatalogResult<String> {
        Ok(Self::parse(s)?.to_string())
    }

    /// Compile this path into a matcher for container series lookup
    ///
    /// Empty parts match anything. Part D compiles as an anchored regex;
    /// the other parts compare as case-insensitive literals.
    pub fn matcher(&self) -> CatalogResult<PathMatcher> {
        let d = if self.d.is_empty() {
            None
        } else {
            let re = Regex::new(&format!("^(?i:{})$", self.d)).map_err(|e| {
                CatalogError::BadInput(format!("invalid pattern in path part D: {}", e))
            })?;
            Some(re)
        };

        Ok(PathMatcher {
            a: literal(&self.a),
            b: literal(&self.b),
            c: literal(&self.c),
            d,
            e: literal(&self.e),
            f: literal(&self.f),
        })
    }
}

impl fmt::Display for PathParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "/{}/{}/{}/{}/{}/{}/",
            self.a, self.b, self.c, self.d, self.e, self.f
        )
    }
}

fn literal(part: &str) -> Option<String> {
    if part.is_empty() {
        None
    } else {
        Some(part.to_string())
    }
}

/// Compiled matcher for one six-part path pattern
#[derive(Debug)]
pub struct PathMatcher {
    a: Option<String>,
    b: Option<String>,
    c: Option<String>,
    d: Option<Regex>,
    e: Option<String>,
    f: Option<String>,
}

impl PathMatcher {
    /// Check whether a concrete path satisfies this pattern
    pub fn matches(&self, candidate: &PathParts) -> bool {
        part_matches(&self.a, &candidate.a)
            && part_matches(&self.b, &candidate.b)
            && part_matches(&self.c, &candidate.c)
            && self.d.as_ref().map_or(true, |re| re.is_match(&candidate.d))
            && part_matches(&self.e, &candidate.e)
            && part_matches(&self.f, &candidate.f)
    }
}

fn part_matches(pattern: &Option<String>, value: &str) -> bool {
    match pattern {
        Some(p) => p.eq_ignore_ascii_case(value),
        None => true,
    }
}
