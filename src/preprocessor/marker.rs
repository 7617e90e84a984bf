use std::fmt;

use regex::{Captures, Regex};

/// build variant a marker block belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Normal,
    Optimized,
}

impl Tag {
    pub const ALL: [Tag; 2] = [Tag::Normal, Tag::Optimized];

    pub fn keyword(&self) -> &'static str {
        match self {
            Tag::Normal => "NORMAL",
            Tag::Optimized => "OPTIMIZED",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Tag::ALL.iter().copied().find(|tag| tag.keyword() == keyword)
    }

    pub fn begin_marker(&self) -> String {
        format!("BEGIN_{}", self.keyword())
    }

    pub fn end_marker(&self) -> String {
        format!("END_{}", self.keyword())
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

/// what happens to the body of a matched block, marker lines are always removed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockAction {
    Keep,
    Drop,
}

/// compiled matcher for all `BEGIN_<TAG>` ... `END_<TAG>` blocks of a single tag
#[derive(Debug, Clone)]
pub struct BlockPattern {
    regex: Regex,
}

impl BlockPattern {
    /// marker lines may be indented, the prefix and keyword are separated by exactly
    /// one space or tab, whatever follows the keyword on a marker line
    /// is discarded together with it, body ends at the nearest end marker line
    pub fn new(comment_prefix: &str, tag: Tag) -> Result<Self, regex::Error> {
        let prefix = regex::escape(comment_prefix);
        let keyword = tag.keyword();
        let pattern = format!(
            r"(?m)^[^\S\n]*{prefix}[^\S\n]BEGIN_{keyword}\b.*\n(?P<body>(?s:.*?))^[^\S\n]*{prefix}[^\S\n]END_{keyword}\b.*(?:\n|\z)",
            prefix = prefix,
            keyword = keyword,
        );
        Ok(Self { regex: Regex::new(&pattern)? })
    }

    /// apply the action to every block of this tag, returns new text and number of blocks
    pub fn substitute(&self, source: &str, action: BlockAction) -> (String, usize) {
        let mut blocks = 0;
        let result = self.regex.replace_all(source, |caps: &Captures| {
            blocks += 1;
            match action {
                BlockAction::Keep => String::from(&caps["body"]),
                BlockAction::Drop => String::new(),
            }
        });
        (result.into_owned(), blocks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normal_blocks() -> BlockPattern {
        BlockPattern::new("--", Tag::Normal).unwrap()
    }

    #[test]
    fn keeps_body_without_markers() {
        let source = "a()\n-- BEGIN_NORMAL\nb()\nc()\n-- END_NORMAL\nd()\n";
        let (result, blocks) = normal_blocks().substitute(source, BlockAction::Keep);
        assert_eq!(result, "a()\nb()\nc()\nd()\n");
        assert_eq!(blocks, 1);
    }

    #[test]
    fn drops_body_with_markers() {
        let source = "a()\n-- BEGIN_NORMAL\nb()\n-- END_NORMAL\nd()\n";
        let (result, _) = normal_blocks().substitute(source, BlockAction::Drop);
        assert_eq!(result, "a()\nd()\n");
    }

    #[test]
    fn pairs_each_begin_with_nearest_end() {
        let source = "-- BEGIN_NORMAL\none()\n-- END_NORMAL\nmiddle()\n-- BEGIN_NORMAL\ntwo()\n-- END_NORMAL\n";
        let (kept, blocks) = normal_blocks().substitute(source, BlockAction::Keep);
        assert_eq!(kept, "one()\nmiddle()\ntwo()\n");
        assert_eq!(blocks, 2);
        let (dropped, _) = normal_blocks().substitute(source, BlockAction::Drop);
        assert_eq!(dropped, "middle()\n");
    }

    #[test]
    fn discards_trailing_text_on_marker_lines() {
        let source = "  -- BEGIN_NORMAL debug only\n  log()\n  -- END_NORMAL (log)\nrun()\n";
        let (result, _) = normal_blocks().substitute(source, BlockAction::Keep);
        assert_eq!(result, "  log()\nrun()\n");
    }

    #[test]
    fn handles_empty_body_and_end_at_eof() {
        let source = "x()\n-- BEGIN_NORMAL\n-- END_NORMAL";
        let (result, blocks) = normal_blocks().substitute(source, BlockAction::Keep);
        assert_eq!(result, "x()\n");
        assert_eq!(blocks, 1);
    }

    #[test]
    fn ignores_other_tag_and_similar_keywords() {
        let source = "-- BEGIN_OPTIMIZED\nx()\n-- END_OPTIMIZED\n-- BEGIN_NORMALIZED\ny()\n-- END_NORMALIZED\n";
        let (result, blocks) = normal_blocks().substitute(source, BlockAction::Drop);
        assert_eq!(result, source);
        assert_eq!(blocks, 0);
    }

    #[test]
    fn leaves_unmatched_begin_untouched() {
        let source = "-- BEGIN_NORMAL\nx()\n-- END_OPTIMIZED\n";
        let (result, blocks) = normal_blocks().substitute(source, BlockAction::Drop);
        assert_eq!(result, source);
        assert_eq!(blocks, 0);
    }

    #[test]
    fn ignores_markers_after_code() {
        let source = "x() -- BEGIN_NORMAL\ny()\n-- END_NORMAL\n";
        let (result, blocks) = normal_blocks().substitute(source, BlockAction::Drop);
        assert_eq!(result, source);
        assert_eq!(blocks, 0);
    }

    #[test]
    fn requires_single_separator_after_prefix() {
        let source = "--BEGIN_NORMAL\nx()\n--END_NORMAL\n--  BEGIN_NORMAL\ny()\n--  END_NORMAL\n";
        let (result, blocks) = normal_blocks().substitute(source, BlockAction::Drop);
        assert_eq!(result, source);
        assert_eq!(blocks, 0);
        let tabbed = "--\tBEGIN_NORMAL\nx()\n--\tEND_NORMAL\n";
        let (result, _) = normal_blocks().substitute(tabbed, BlockAction::Keep);
        assert_eq!(result, "x()\n");
    }

    #[test]
    fn uses_configured_comment_prefix() {
        let pattern = BlockPattern::new("#", Tag::Optimized).unwrap();
        let source = "# BEGIN_OPTIMIZED\nfast()\n# END_OPTIMIZED\n-- BEGIN_OPTIMIZED\n";
        let (result, _) = pattern.substitute(source, BlockAction::Keep);
        assert_eq!(result, "fast()\n-- BEGIN_OPTIMIZED\n");
    }

    #[test]
    fn keyword_round_trip() {
        for tag in Tag::ALL.iter() {
            assert_eq!(Tag::from_keyword(tag.keyword()), Some(*tag));
        }
        assert_eq!(Tag::Normal.begin_marker(), "BEGIN_NORMAL");
        assert_eq!(Tag::Optimized.end_marker(), "END_OPTIMIZED");
        assert_eq!(Tag::from_keyword("DEBUG"), None);
    }
}
