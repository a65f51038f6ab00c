//! Best-effort lexical highlighter for Zephyr source text.
//! Zephyr 原始碼的盡力式詞法著色器。
//!
//! This is a single-pass classifier, not a parser: an ordered set of
//! mutually exclusive alternatives consumes the longest match at each
//! position, and a single-character fallback guarantees the scan never
//! stalls. The emitted tokens exactly tile the input.

mod html;
mod scanner;

pub use html::{escape_html, highlight_html};
pub use scanner::{scan, Token, TokenKind};
