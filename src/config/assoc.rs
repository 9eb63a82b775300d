//! File association configuration for noice.
//!
//! Each `[[assoc]]` table maps a file name pattern to the program that opens
//! matching regular files. Rules are tried in order.

use crate::core::proc::Associations;
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct AssocRule {
    pattern: String,
    program: String,
}

impl AssocRule {
    pub fn new(pattern: &str, program: &str) -> Self {
        AssocRule {
            pattern: pattern.into(),
            program: program.into(),
        }
    }
}

/// The built-in association table.
pub fn default_assocs() -> Vec<AssocRule> {
    vec![
        AssocRule::new(r"\.(avi|mp4|mkv|mp3|ogg|flac|mov)$", "mpv"),
        AssocRule::new(r"\.(png|jpg|gif)$", "sxiv"),
        AssocRule::new(r"\.(html|svg)$", "firefox"),
        AssocRule::new(r"\.pdf$", "mupdf"),
        AssocRule::new(r"\.sh$", "sh"),
        AssocRule::new(".", "less"),
    ]
}

/// Compiles the rules, dropping the ones whose pattern is not a valid regex.
pub fn compile(rules: &[AssocRule]) -> Associations {
    Associations::compile(
        rules
            .iter()
            .map(|r| (r.pattern.as_str(), r.program.as_str())),
    )
}
