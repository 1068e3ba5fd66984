#![forbid(unsafe_code)]

//! Word-by-word text reveal.
//!
//! A text block is split into one `<span class="word">` per space-separated
//! token, each carrying an `animation-delay` proportional to its index. The
//! stagger comes entirely from those delays: on reveal every word gets
//! `visible` at the same instant.

use core::time::Duration;

use crate::dom::{DomOp, Target};
use crate::reveal::{RevealOnce, WordsVisible};
use crate::style;

/// One word span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordSpan {
    /// Word plus its trailing space.
    pub text: String,
    pub delay: Duration,
}

/// Split `text` on single spaces, keeping empty tokens, and assign delays.
#[must_use]
pub fn split_words(text: &str, step: Duration) -> Vec<WordSpan> {
    text.split(' ')
        .enumerate()
        .map(|(i, word)| WordSpan {
            text: format!("{word} "),
            delay: step.saturating_mul(u32::try_from(i).unwrap_or(u32::MAX)),
        })
        .collect()
}

/// A staggered block and the observer that reveals it.
#[derive(Debug, Clone)]
pub struct StaggeredText {
    words: Vec<WordSpan>,
    reveal: RevealOnce<WordsVisible>,
}

impl StaggeredText {
    /// Build the word spans for `text` and enrol the block with `threshold`.
    /// Returns the controller and the ops that replace the block's text with
    /// the spans.
    #[must_use]
    pub fn new(text: &str, step: Duration, threshold: f64) -> (Self, Vec<DomOp>) {
        let words = split_words(text, step);
        let mut reveal = RevealOnce::new(threshold, WordsVisible { words: words.len() });

        let mut ops = Vec::with_capacity(words.len() * 2 + 1);
        ops.push(DomOp::text(Target::StaggerBlock, ""));
        for (i, word) in words.iter().enumerate() {
            ops.push(DomOp::AppendChild {
                parent: Target::StaggerBlock,
                child: Target::Word(i),
                tag: "span",
                class: "word",
                text: word.text.clone(),
            });
            ops.push(DomOp::style(
                Target::Word(i),
                "animation-delay",
                style::seconds(word.delay),
            ));
        }
        ops.extend(reveal.enroll(Target::StaggerBlock));
        (Self { words, reveal }, ops)
    }

    #[must_use]
    pub fn words(&self) -> &[WordSpan] {
        &self.words
    }

    pub fn reveal_mut(&mut self) -> &mut RevealOnce<WordsVisible> {
        &mut self.reveal
    }

    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.reveal.is_revealed(&Target::StaggerBlock)
    }
}
