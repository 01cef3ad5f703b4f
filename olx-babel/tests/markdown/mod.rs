//! Markdown to OLX conversion tests
//!
//! Whole-document conversions, grouped by the shorthand they exercise.

mod answers;
mod basics;
mod blocks;
mod paragraphs;
mod responses;
mod strict;
