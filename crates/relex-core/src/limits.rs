//! Input validation limits for linkages supplied by the parser

/// Maximum words in one linkage (512)
pub const MAX_WORDS: usize = 512;

/// Maximum links in one linkage (4096)
pub const MAX_LINKS: usize = 4096;

/// Maximum length for a surface form or lemma (256 bytes)
pub const MAX_WORD_LEN: usize = 256;

/// Validation error type
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    TooManyWords { count: usize, max: usize },
    TooManyLinks { count: usize, max: usize },
    WordTooLong { len: usize, max: usize },
    EmptySurface { position: u32 },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooManyWords { count, max } => {
                write!(f, "Too many words in linkage: {} (max {})", count, max)
            }
            Self::TooManyLinks { count, max } => {
                write!(f, "Too many links in linkage: {} (max {})", count, max)
            }
            Self::WordTooLong { len, max } => {
                write!(f, "Word too long: {} bytes (max {})", len, max)
            }
            Self::EmptySurface { position } => {
                write!(f, "Word {} has an empty surface form", position)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate word count
pub fn validate_word_count(count: usize) -> Result<(), ValidationError> {
    if count > MAX_WORDS {
        return Err(ValidationError::TooManyWords {
            count,
            max: MAX_WORDS,
        });
    }
    Ok(())
}

/// Validate link count
pub fn validate_link_count(count: usize) -> Result<(), ValidationError> {
    if count > MAX_LINKS {
        return Err(ValidationError::TooManyLinks {
            count,
            max: MAX_LINKS,
        });
    }
    Ok(())
}

/// Validate a surface form and its lemma
pub fn validate_word(position: u32, surface: &str, lemma: &str) -> Result<(), ValidationError> {
    if surface.is_empty() {
        return Err(ValidationError::EmptySurface { position });
    }
    let len = surface.len().max(lemma.len());
    if len > MAX_WORD_LEN {
        return Err(ValidationError::WordTooLong {
            len,
            max: MAX_WORD_LEN,
        });
    }
    Ok(())
}
