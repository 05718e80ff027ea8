//! Deterministic resume analysis: text normalization, language detection,
//! skill/keyword extraction, and heuristic ATS scoring.
//!
//! Everything in this module family is pure and total: no I/O, no shared
//! mutable state, defined for every input and never panicking. The only
//! configuration is the immutable [`lexicon::SkillLexicon`] injected by the
//! caller at construction time.

pub mod ats;
pub mod languages;
pub mod lexicon;
pub mod normalize;
pub mod skills;
