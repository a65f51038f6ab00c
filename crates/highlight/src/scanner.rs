use std::collections::HashSet;

use once_cell::sync::Lazy;

/// Flow control, declarations, module/visibility keywords and concurrency
/// primitives. Zephyr borrows liberally, so the set is wide on purpose.
const KEYWORDS: &[&str] = &[
    "function", "fn", "let", "const", "var", "struct", "class", "interface", "public", "private",
    "protected", "import", "from", "use", "return", "if", "else", "match", "switch", "case",
    "break", "continue", "for", "foreach", "while", "do", "as", "in", "extern", "spawn", "defer",
    "echo", "print", "new", "static", "final", "extends", "implements", "try", "catch", "throw",
    "async", "await",
];

const TYPES: &[&str] = &[
    "int", "float", "string", "bool", "void", "u8", "u64", "i32", "array", "map", "list",
    "object", "mixed", "null", "true", "false",
];

static KEYWORD_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| KEYWORDS.iter().copied().collect());
static TYPE_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| TYPES.iter().copied().collect());

/// Lexical category assigned to a span of source text.
/// 指派給原始碼片段的詞法類別。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Double-quoted string literal with backslash escapes.
    Str,
    /// `//…`, `#…` or a closed `/* … */` block.
    Comment,
    /// Sigil-prefixed identifier (`$name`).
    Variable,
    /// Integer literal on a word boundary.
    Number,
    Keyword,
    /// Primitive type name.
    Type,
    /// Identifier directly followed by `(` — a call-site heuristic. The
    /// token carries the identifier plus any whitespace before the paren;
    /// the paren itself is emitted as a separate plain token.
    FunctionCall,
    /// Whitespace run, passed through verbatim by the renderer.
    Whitespace,
    /// Anything else; rendered unstyled.
    Text,
}

impl TokenKind {
    /// CSS class the rendering surface attaches to the span, when any.
    pub fn css_class(self) -> Option<&'static str> {
        match self {
            TokenKind::Str => Some("text-green-400"),
            TokenKind::Comment => Some("text-gray-500 italic"),
            TokenKind::Variable => Some("text-orange-400"),
            TokenKind::Number => Some("text-zephyr-blue"),
            TokenKind::Keyword => Some("text-zephyr-magenta font-bold"),
            TokenKind::Type => Some("text-zephyr-cyan"),
            TokenKind::FunctionCall => Some("text-yellow-200"),
            TokenKind::Whitespace | TokenKind::Text => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

impl<'a> Token<'a> {
    fn new(kind: TokenKind, text: &'a str) -> Self {
        Self { kind, text }
    }
}

fn is_word_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

fn is_ident_start(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == b'_'
}

/// Classifies `input` into a token sequence. The alternatives are tried in
/// a fixed priority order and exactly one advances the cursor at every
/// position; the concatenation of all token texts reconstructs the input.
/// 將 `input` 分類為詞法序列。各類別依固定優先序嘗試，每個位置恰有一個類別
/// 推進游標；所有詞法文字串接後可完整還原輸入。
pub fn scan(input: &str) -> Vec<Token<'_>> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        if let Some(end) = match_string(bytes, pos) {
            tokens.push(Token::new(TokenKind::Str, &input[pos..end]));
            pos = end;
        } else if let Some(end) = match_comment(bytes, pos) {
            tokens.push(Token::new(TokenKind::Comment, &input[pos..end]));
            pos = end;
        } else if let Some(end) = match_variable(bytes, pos) {
            tokens.push(Token::new(TokenKind::Variable, &input[pos..end]));
            pos = end;
        } else if let Some(end) = match_number(bytes, pos) {
            tokens.push(Token::new(TokenKind::Number, &input[pos..end]));
            pos = end;
        } else if is_ident_start(bytes[pos]) {
            pos = scan_identifier(input, bytes, pos, &mut tokens);
        } else if bytes[pos].is_ascii_whitespace() {
            let end = run_end(bytes, pos, |b| b.is_ascii_whitespace());
            tokens.push(Token::new(TokenKind::Whitespace, &input[pos..end]));
            pos = end;
        } else {
            // Fallback: one whole character, so the scan never stalls.
            let end = pos + char_width(bytes[pos]);
            tokens.push(Token::new(TokenKind::Text, &input[pos..end]));
            pos = end;
        }
    }

    tokens
}

/// Identifier dispatch: keywords win over type names, type names win over
/// the call-site heuristic, and anything else is plain text.
/// 識別字的分派：關鍵字優先於型別名稱，型別名稱優先於呼叫點啟發式，其餘
/// 視為純文字。
fn scan_identifier<'a>(
    input: &'a str,
    bytes: &[u8],
    pos: usize,
    tokens: &mut Vec<Token<'a>>,
) -> usize {
    let end = run_end(bytes, pos, is_word_byte);
    let ident = &input[pos..end];

    if KEYWORD_SET.contains(ident) {
        tokens.push(Token::new(TokenKind::Keyword, ident));
        return end;
    }
    if TYPE_SET.contains(ident) {
        tokens.push(Token::new(TokenKind::Type, ident));
        return end;
    }

    let after_ws = run_end(bytes, end, |b| b.is_ascii_whitespace());
    if after_ws < bytes.len() && bytes[after_ws] == b'(' {
        // The styled span covers the identifier and any gap before the
        // paren; the paren stays unstyled.
        tokens.push(Token::new(TokenKind::FunctionCall, &input[pos..after_ws]));
        tokens.push(Token::new(TokenKind::Text, &input[after_ws..after_ws + 1]));
        return after_ws + 1;
    }

    tokens.push(Token::new(TokenKind::Text, ident));
    end
}

/// `"…"` with backslash escaping. An unterminated literal is not a string
/// token at all; the opening quote falls through to the plain fallback.
fn match_string(bytes: &[u8], pos: usize) -> Option<usize> {
    if bytes[pos] != b'"' {
        return None;
    }
    let mut cursor = pos + 1;
    while cursor < bytes.len() {
        match bytes[cursor] {
            b'"' => return Some(cursor + 1),
            b'\\' if cursor + 1 < bytes.len() => cursor += 2,
            b'\\' => return None,
            _ => cursor += 1,
        }
    }
    None
}

/// `//…` and `#…` up to (excluding) the newline, or a `/*…*/` block with a
/// non-greedy closing match. An unclosed block comment is not a comment.
fn match_comment(bytes: &[u8], pos: usize) -> Option<usize> {
    match bytes[pos] {
        b'#' => Some(line_end(bytes, pos + 1)),
        b'/' if bytes.get(pos + 1) == Some(&b'/') => Some(line_end(bytes, pos + 2)),
        b'/' if bytes.get(pos + 1) == Some(&b'*') => {
            let mut cursor = pos + 2;
            while cursor + 1 < bytes.len() {
                if bytes[cursor] == b'*' && bytes[cursor + 1] == b'/' {
                    return Some(cursor + 2);
                }
                cursor += 1;
            }
            None
        }
        _ => None,
    }
}

/// `$` immediately followed by an identifier. A lone sigil is plain text.
fn match_variable(bytes: &[u8], pos: usize) -> Option<usize> {
    if bytes[pos] != b'$' {
        return None;
    }
    let first = *bytes.get(pos + 1)?;
    if !is_ident_start(first) {
        return None;
    }
    Some(run_end(bytes, pos + 1, is_word_byte))
}

/// Digit run on both-sided word boundaries, so `a1` and the tail of `12x`
/// stay unstyled.
fn match_number(bytes: &[u8], pos: usize) -> Option<usize> {
    if !bytes[pos].is_ascii_digit() {
        return None;
    }
    if pos > 0 && is_word_byte(bytes[pos - 1]) {
        return None;
    }
    let end = run_end(bytes, pos, |b| b.is_ascii_digit());
    if end < bytes.len() && is_word_byte(bytes[end]) {
        return None;
    }
    Some(end)
}

fn run_end(bytes: &[u8], mut pos: usize, pred: impl Fn(u8) -> bool) -> usize {
    while pos < bytes.len() && pred(bytes[pos]) {
        pos += 1;
    }
    pos
}

fn line_end(bytes: &[u8], pos: usize) -> usize {
    run_end(bytes, pos, |b| b != b'\n')
}

fn char_width(first_byte: u8) -> usize {
    match first_byte {
        0x00..=0x7F => 1,
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        _ => 4,
    }
}
