//! Raw-text sectioning: heading classification and the line-level
//! splitter that feeds every downstream extractor.

pub mod headings;
pub mod splitter;
