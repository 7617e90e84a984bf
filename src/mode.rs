use std::fmt;

/// token selecting the optimized build; anything else selects the normal one
pub const OPTIMIZED_TOKEN: &str = "OPTIMIZED";

/// build variant to produce from a source file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    /// keep `BEGIN_NORMAL` bodies, drop optimized ones, keep comments and layout
    Normal,
    /// keep `BEGIN_OPTIMIZED` bodies, drop normal ones, strip comments and blank lines
    Optimized,
}

impl BuildMode {
    /// interpret a mode token from the command line,
    /// unrecognized tokens silently fall back to `Normal`
    pub fn from_token(token: &str) -> Self {
        if token == OPTIMIZED_TOKEN {
            BuildMode::Optimized
        } else {
            BuildMode::Normal
        }
    }

    pub fn is_optimized(&self) -> bool {
        match self {
            BuildMode::Optimized => true,
            BuildMode::Normal => false,
        }
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BuildMode::Normal => write!(f, "NORMAL"),
            BuildMode::Optimized => write!(f, "OPTIMIZED"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optimized_token_selects_optimized() {
        assert_eq!(BuildMode::from_token("OPTIMIZED"), BuildMode::Optimized);
        assert!(BuildMode::from_token("OPTIMIZED").is_optimized());
    }

    #[test]
    fn other_tokens_fall_back_to_normal() {
        for token in &["NORMAL", "optimized", "RELEASE", "", " OPTIMIZED"] {
            let mode = BuildMode::from_token(token);
            assert_eq!(mode, BuildMode::Normal, "token {:?}", token);
            assert!(!mode.is_optimized());
        }
    }

    #[test]
    fn displays_as_token() {
        assert_eq!(BuildMode::Optimized.to_string(), OPTIMIZED_TOKEN);
        assert_eq!(BuildMode::Normal.to_string(), "NORMAL");
    }
}
