use std::fs;
use std::ops::Add;
use std::path::Path;
use std::sync::Arc;

use codemap::{CodeMap, File, Pos};
use tracing::{debug, info, warn};

use crate::error::PreprocessError;
use crate::meta::{LocationMeta, Meta, MetaMapper};
use crate::mode::BuildMode;
use crate::preprocessor::{LocatedProblem, MarkerProblem, Preprocessor};

/// settings shared by every file of one invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOptions {
    pub mode: BuildMode,
    /// refuse to rewrite files with unmatched or nested markers
    pub strict: bool,
}

impl BatchOptions {
    pub fn new(mode: BuildMode) -> Self {
        Self { mode, strict: false }
    }

    pub fn strict(self, strict: bool) -> Self {
        Self { strict, ..self }
    }
}

/// rewrite all files in order, stopping at the first failure;
/// returns the number of rewritten files
pub fn process_files<P: AsRef<Path>>(
    preprocessor: &Preprocessor, options: BatchOptions, paths: &[P],
) -> Result<usize, PreprocessError> {
    for path in paths.iter() {
        process_file(preprocessor, options, path.as_ref())?;
    }
    Ok(paths.len())
}

/// load file from path, transform it and replace its contents with the result
pub fn process_file(
    preprocessor: &Preprocessor, options: BatchOptions, path: &Path,
) -> Result<(), PreprocessError> {
    debug!(path = %path.display(), mode = %options.mode, "reading");
    let source_code = fs::read_to_string(path).map_err(|source| PreprocessError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let processed = process_code(preprocessor, options, path, source_code)?;
    fs::write(path, processed).map_err(|source| PreprocessError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), mode = %options.mode, "rewritten");
    Ok(())
}

/// process source code of the file given by path, without touching the file system
pub fn process_code(
    preprocessor: &Preprocessor, options: BatchOptions, path: &Path, source_code: String,
) -> Result<String, PreprocessError> {
    let problems = preprocessor.check_markers(&source_code);
    if !problems.is_empty() {
        let located = locate_problems(path, &source_code, problems);
        if options.strict {
            return Err(PreprocessError::UnbalancedMarkers {
                path: path.to_path_buf(),
                problems: located.iter().map(|p| p.to_string()).collect(),
            });
        }
        for problem in located.iter() {
            warn!("{}", problem);
        }
    }
    Ok(preprocessor.process(options.mode, &source_code))
}

/// necessary for mapping byte offsets to positions in the codemap
impl MetaMapper<LocationMeta, Pos> for Arc<File> {
    fn map_meta(&self, from: &LocationMeta) -> Pos {
        self.span.low().add(from.offset as u64)
    }
}

/// necessary for mapping codemap positions to `file:line:column`
impl MetaMapper<Pos, String> for CodeMap {
    fn map_meta(&self, from: &Pos) -> String {
        self.look_up_pos(*from).to_string()
    }
}

/// translate byte offsets of marker problems to their location in the source file
fn locate_problems(
    path: &Path, source_code: &str, problems: Vec<LocatedProblem>,
) -> Vec<Meta<MarkerProblem, String>> {
    let mut codemap = CodeMap::new();
    let file = codemap.add_file(path.display().to_string(), String::from(source_code));
    problems
        .into_iter()
        .map(|p| {
            let positioned: Meta<MarkerProblem, Pos> = p.map_meta(&file);
            positioned.map_meta(&codemap)
        })
        .collect()
}
