use regex::Regex;
use tracing::debug;

use crate::mode::BuildMode;

pub use self::balance::{LocatedProblem, MarkerProblem};
pub use self::marker::{BlockAction, BlockPattern, Tag};

mod balance;
mod marker;

/// line comment token of Lua, the scripts this tool is built for
pub const LUA_COMMENT_PREFIX: &str = "--";

/// rewrites source code into one of the build variants,
/// all patterns are compiled once and shared by every processed file
#[derive(Debug, Clone)]
pub struct Preprocessor {
    normal_blocks: BlockPattern,
    optimized_blocks: BlockPattern,
    comment_line: Regex,
    blank_line: Regex,
    marker_line: Regex,
}

impl Preprocessor {
    pub fn new(comment_prefix: &str) -> Result<Self, regex::Error> {
        let prefix = regex::escape(comment_prefix);
        Ok(Self {
            normal_blocks: BlockPattern::new(comment_prefix, Tag::Normal)?,
            optimized_blocks: BlockPattern::new(comment_prefix, Tag::Optimized)?,
            comment_line: Regex::new(&format!(r"(?m)^[^\S\n]*{}.*(?:\n|\z)", prefix))?,
            blank_line: Regex::new(r"(?m)^[^\S\n]*(?:\n|\z)")?,
            marker_line: balance::marker_line_regex(comment_prefix)?,
        })
    }

    pub fn lua() -> Result<Self, regex::Error> {
        Self::new(LUA_COMMENT_PREFIX)
    }

    /// produce the variant selected by mode
    pub fn process(&self, mode: BuildMode, source: &str) -> String {
        if mode.is_optimized() {
            self.apply_optimized(source)
        } else {
            self.apply_normal(source)
        }
    }

    /// keep normal bodies, remove optimized blocks, leave everything else as it is
    pub fn apply_normal(&self, source: &str) -> String {
        let (code, kept) = self.normal_blocks.substitute(source, BlockAction::Keep);
        let (code, dropped) = self.optimized_blocks.substitute(&code, BlockAction::Drop);
        debug!(kept, dropped, "applied NORMAL blocks");
        code
    }

    /// remove normal blocks, keep optimized bodies, then strip comment and blank lines;
    /// order matters: stripping runs on the output of block substitution
    pub fn apply_optimized(&self, source: &str) -> String {
        let (code, dropped) = self.normal_blocks.substitute(source, BlockAction::Drop);
        let (code, kept) = self.optimized_blocks.substitute(&code, BlockAction::Keep);
        let code = self.strip_comment_lines(&code);
        let code = self.strip_blank_lines(&code);
        debug!(kept, dropped, "applied OPTIMIZED blocks");
        code
    }

    /// remove every line starting (after indentation) with the comment prefix
    pub fn strip_comment_lines(&self, source: &str) -> String {
        self.comment_line.replace_all(source, "").into_owned()
    }

    /// remove every empty or whitespace-only line
    pub fn strip_blank_lines(&self, source: &str) -> String {
        self.blank_line.replace_all(source, "").into_owned()
    }

    /// find markers that block substitution would leave unmatched or swallow into a body
    pub fn check_markers(&self, source: &str) -> Vec<LocatedProblem> {
        balance::scan_markers(&self.marker_line, source)
    }
}
