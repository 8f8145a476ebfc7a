//! Hanzi to Pinyin conversion.
//!
//! Each character with a Mandarin reading becomes one syllable (first reading
//! for heteronyms). Other non-whitespace runs pass through verbatim, full-width
//! punctuation is mapped to ASCII, and tokens are joined by single spaces.

use std::fmt;
use std::str::FromStr;

use pinyin::ToPinyin;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToneStyle {
    /// `nǐ hǎo`
    #[default]
    Marks,
    /// `ni3 hao3`
    Numbers,
    /// `ni hao`
    None,
}

impl ToneStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToneStyle::Marks => "marks",
            ToneStyle::Numbers => "numbers",
            ToneStyle::None => "none",
        }
    }
}

impl fmt::Display for ToneStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToneStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "marks" | "mark" | "tone" => Ok(ToneStyle::Marks),
            "numbers" | "number" | "num" => Ok(ToneStyle::Numbers),
            "none" | "plain" => Ok(ToneStyle::None),
            other => Err(format!("unknown tone style '{other}' (expected marks, numbers or none)")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Punct {
    Open(char),
    Close(char),
}

fn cjk_punct(c: char) -> Option<Punct> {
    let p = match c {
        '，' | '、' => Punct::Close(','),
        '。' => Punct::Close('.'),
        '！' => Punct::Close('!'),
        '？' => Punct::Close('?'),
        '：' => Punct::Close(':'),
        '；' => Punct::Close(';'),
        '）' => Punct::Close(')'),
        '”' | '」' | '』' => Punct::Close('"'),
        '（' => Punct::Open('('),
        '“' | '「' | '『' => Punct::Open('"'),
        _ => return None,
    };
    Some(p)
}

const ASCII_CLOSING: &[char] = &[',', '.', '!', '?', ':', ';', ')', ']', '}'];
const ASCII_OPENING: &[char] = &['(', '[', '{'];

enum Token {
    Syllable(&'static str),
    Word(String),
    Punct(Punct),
}

impl Token {
    /// Produced by conversion rather than copied from the input.
    fn is_converted(&self) -> bool {
        !matches!(self, Token::Word(_))
    }

    fn push_to(&self, out: &mut String) {
        match self {
            Token::Syllable(s) => out.push_str(s),
            Token::Word(w) => out.push_str(w),
            Token::Punct(Punct::Open(c) | Punct::Close(c)) => out.push(*c),
        }
    }
}

/// Whether `right` follows `left` without a space. ASCII punctuation inside
/// input words only attaches next to converted tokens.
fn glues(left: &Token, right: &Token) -> bool {
    match (left, right) {
        (_, Token::Punct(Punct::Close(_))) | (Token::Punct(Punct::Open(_)), _) => true,
        (left, Token::Word(w)) if left.is_converted() => w.starts_with(ASCII_CLOSING),
        (Token::Word(w), right) if right.is_converted() => w.ends_with(ASCII_OPENING),
        _ => false,
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PinyinConverter {
    tone_style: ToneStyle,
}

impl PinyinConverter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(tone_style: ToneStyle) -> Self {
        Self { tone_style }
    }

    pub fn tone_style(&self) -> ToneStyle {
        self.tone_style
    }

    /// Reading of a single character in the configured style.
    pub fn syllable(&self, c: char) -> Option<&'static str> {
        let p = c.to_pinyin()?;
        Some(match self.tone_style {
            ToneStyle::Marks => p.with_tone(),
            ToneStyle::Numbers => p.with_tone_num_end(),
            ToneStyle::None => p.plain(),
        })
    }

    /// Per-character readings, `None` for characters without one.
    pub fn syllables(&self, text: &str) -> Vec<Option<String>> {
        text.chars()
            .map(|c| self.syllable(c).map(str::to_owned))
            .collect()
    }

    pub fn convert(&self, text: &str) -> String {
        let mut out = text
            .lines()
            .map(|line| self.convert_line(line))
            .collect::<Vec<_>>()
            .join("\n");
        if text.ends_with('\n') {
            out.push('\n');
        }
        out
    }

    fn tokenize(&self, line: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut word = String::new();

        for c in line.chars() {
            let token = if c.is_whitespace() {
                None
            } else if let Some(p) = cjk_punct(c) {
                Some(Token::Punct(p))
            } else if let Some(s) = self.syllable(c) {
                Some(Token::Syllable(s))
            } else {
                word.push(c);
                continue;
            };

            if !word.is_empty() {
                tokens.push(Token::Word(std::mem::take(&mut word)));
            }
            if let Some(token) = token {
                tokens.push(token);
            }
        }
        if !word.is_empty() {
            tokens.push(Token::Word(word));
        }
        tokens
    }

    fn convert_line(&self, line: &str) -> String {
        let mut out = String::with_capacity(line.len() * 2);
        let mut prev: Option<Token> = None;
        for token in self.tokenize(line) {
            if prev.as_ref().is_some_and(|prev| !glues(prev, &token)) {
                out.push(' ');
            }
            token.push_to(&mut out);
            prev = Some(token);
        }
        out
    }
}
