use std::collections::HashMap;
use std::fmt;

use regex::Regex;

use crate::meta::{GetLocation, LocationMeta, Meta};
use crate::preprocessor::marker::Tag;

/// marker problem the transformation silently tolerates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerProblem {
    /// begin marker without any end marker of the same tag after it
    Unclosed(Tag),
    /// end marker while no block of the same tag is open
    Stray(Tag),
    /// begin marker inside an open block of the same tag, becomes part of its body
    Nested(Tag),
}

impl fmt::Display for MarkerProblem {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MarkerProblem::Unclosed(tag) => {
                write!(f, "unclosed {} (no {} follows)", tag.begin_marker(), tag.end_marker())
            }
            MarkerProblem::Stray(tag) => {
                write!(f, "stray {} (no open {})", tag.end_marker(), tag.begin_marker())
            }
            MarkerProblem::Nested(tag) => {
                write!(f, "nested {} inside an open {} block", tag.begin_marker(), tag.begin_marker())
            }
        }
    }
}

pub type LocatedProblem = Meta<MarkerProblem, LocationMeta>;

/// matches any marker line, capturing its kind and tag
pub fn marker_line_regex(comment_prefix: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        r"(?m)^[^\S\n]*(?P<prefix>{})[^\S\n](?P<kind>BEGIN|END)_(?P<tag>NORMAL|OPTIMIZED)\b",
        regex::escape(comment_prefix),
    ))
}

/// pair markers of each tag independently, the same way block substitution does,
/// and report every marker that would not be part of a matched pair
pub fn scan_markers(marker_line: &Regex, source: &str) -> Vec<LocatedProblem> {
    let mut problems = vec![];
    let mut open: HashMap<Tag, usize> = HashMap::new();

    for caps in marker_line.captures_iter(source) {
        let tag = match Tag::from_keyword(&caps["tag"]) {
            Some(tag) => tag,
            None => continue,
        };
        let offset = caps.name("prefix").map_or(0, |m| m.start());
        match &caps["kind"] {
            "BEGIN" => {
                if open.contains_key(&tag) {
                    problems.push(Meta::new(MarkerProblem::Nested(tag), LocationMeta::from(offset)));
                } else {
                    open.insert(tag, offset);
                }
            }
            _ => {
                if open.remove(&tag).is_none() {
                    problems.push(Meta::new(MarkerProblem::Stray(tag), LocationMeta::from(offset)));
                }
            }
        }
    }

    for (tag, offset) in open {
        problems.push(Meta::new(MarkerProblem::Unclosed(tag), LocationMeta::from(offset)));
    }
    problems.sort_by_key(|problem| problem.get_location().offset);
    problems
}
