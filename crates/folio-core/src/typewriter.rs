#![forbid(unsafe_code)]

//! Typewriter headline.
//!
//! Cycles through a list of phrases, deleting and retyping one grapheme per
//! tick, with an emoji that cross-fades whenever the phrase changes.
//!
//! # State machine
//!
//! ```text
//!            3000ms
//!  Startup ─────────▶ Deleting ──(50ms/char)──▶ len == 0 ──▶ PausingAfterDelete
//!                        ▲                      (advance phrase,      │ 500ms
//!                        │ 2000ms                start emoji swap)    ▼
//!               PausingAfterType ◀── len == full ◀──(100ms/char)── Typing
//! ```
//!
//! The machine is driven entirely by host time: [`Typewriter::advance`]
//! processes every transition due at or before `now`, in order, and
//! [`Typewriter::next_deadline`] says when to call it next. The emoji swap is
//! a second, independent timeline started at the moment the phrase advances:
//! fade out (`switching`), swap after 300ms with `switching` still set, then
//! clear `switching` on the next animation frame.
//!
//! # Invariants
//!
//! 1. `0 <= char_index <= len(current phrase)`, in graphemes.
//! 2. `is_deleting` flips only when `char_index` reaches `len` or `0`.
//! 3. After [`Typewriter::stop`] there are no deadlines and `advance` is inert.

use core::time::Duration;

use unicode_segmentation::UnicodeSegmentation;

use crate::clock::earliest;
use crate::config::{Phrase, TypewriterConfig};
use crate::dom::{DomOp, Target};

/// A host that misses deadlines by more than this (background tab, debugger)
/// resumes from the current time instead of replaying the backlog.
const STALL_LIMIT: Duration = Duration::from_secs(5);

/// Floor for any scheduled step so `advance` always moves forward in time.
const MIN_STEP: Duration = Duration::from_millis(1);

/// Position of the typewriter within its phrase list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub phrase_index: usize,
    /// Graphemes of the current phrase currently shown.
    pub char_index: usize,
    pub is_deleting: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypewriterPhase {
    /// Not started, or stopped.
    Idle,
    /// First phrase shown in full, waiting out the startup delay.
    Startup,
    Typing,
    PausingAfterType,
    Deleting,
    PausingAfterDelete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EmojiStep {
    Idle,
    FadingOut { swap_at: Duration, phrase: usize },
    AwaitingFrame,
}

/// Timer-driven typewriter for one text element and its emoji.
#[derive(Debug, Clone)]
pub struct Typewriter {
    config: TypewriterConfig,
    lengths: Vec<usize>,
    cursor: Cursor,
    phase: TypewriterPhase,
    next_tick: Option<Duration>,
    emoji: EmojiStep,
}

impl Typewriter {
    /// Build from config. `config.phrases` must be non-empty (see
    /// [`crate::config::FolioConfig::validate`]); an empty list yields a
    /// typewriter that never starts.
    #[must_use]
    pub fn new(config: TypewriterConfig) -> Self {
        let lengths = config
            .phrases
            .iter()
            .map(|p| p.text.graphemes(true).count())
            .collect::<Vec<_>>();
        let cursor = Cursor {
            phrase_index: 0,
            char_index: lengths.first().copied().unwrap_or(0),
            is_deleting: false,
        };
        Self {
            config,
            lengths,
            cursor,
            phase: TypewriterPhase::Idle,
            next_tick: None,
            emoji: EmojiStep::Idle,
        }
    }

    #[must_use]
    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    #[must_use]
    pub const fn phase(&self) -> TypewriterPhase {
        self.phase
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.phase != TypewriterPhase::Idle
    }

    /// Text currently shown for the cursor position.
    #[must_use]
    pub fn visible_text(&self) -> &str {
        self.config
            .phrases
            .get(self.cursor.phrase_index)
            .map_or("", |p| grapheme_prefix(&p.text, self.cursor.char_index))
    }

    /// Show the first phrase in full and arm the startup delay.
    pub fn start(&mut self, now: Duration) -> Vec<DomOp> {
        let Some(first) = self.config.phrases.first() else {
            tracing::warn!("typewriter has no phrases; not starting");
            return Vec::new();
        };
        self.cursor = Cursor {
            phrase_index: 0,
            char_index: self.lengths[0],
            is_deleting: false,
        };
        self.phase = TypewriterPhase::Startup;
        self.next_tick = Some(now.saturating_add(self.config.startup_delay()));
        self.emoji = EmojiStep::Idle;
        tracing::debug!(phrases = self.lengths.len(), "typewriter started");
        vec![
            DomOp::text(Target::TypewriterText, first.text.clone()),
            DomOp::text(Target::TypewriterEmoji, first.emoji.clone()),
            DomOp::SetClassName {
                target: Target::TypewriterEmoji,
                value: emoji_class(first, false),
            },
        ]
    }

    /// Cancel all pending work. An emoji swap in flight is completed at once
    /// so the emoji is not left faded out.
    pub fn stop(&mut self) -> Vec<DomOp> {
        let mut ops = Vec::new();
        match self.emoji {
            EmojiStep::FadingOut { phrase, .. } => {
                if let Some(p) = self.config.phrases.get(phrase) {
                    ops.push(DomOp::text(Target::TypewriterEmoji, p.emoji.clone()));
                    ops.push(DomOp::SetClassName {
                        target: Target::TypewriterEmoji,
                        value: emoji_class(p, false),
                    });
                }
            }
            EmojiStep::AwaitingFrame => {
                ops.push(DomOp::remove_class(Target::TypewriterEmoji, "switching"));
            }
            EmojiStep::Idle => {}
        }
        self.phase = TypewriterPhase::Idle;
        self.next_tick = None;
        self.emoji = EmojiStep::Idle;
        tracing::debug!("typewriter stopped");
        ops
    }

    /// Earliest host time at which [`advance`](Self::advance) has work.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        let swap = match self.emoji {
            EmojiStep::FadingOut { swap_at, .. } => Some(swap_at),
            _ => None,
        };
        earliest(self.next_tick, swap)
    }

    /// Whether the host should call [`animation_frame`](Self::animation_frame)
    /// on its next paint.
    #[must_use]
    pub fn needs_animation_frame(&self) -> bool {
        self.emoji == EmojiStep::AwaitingFrame
    }

    /// Paint opportunity: finish the emoji fade-in if one is waiting.
    pub fn animation_frame(&mut self) -> Vec<DomOp> {
        if self.emoji != EmojiStep::AwaitingFrame {
            return Vec::new();
        }
        self.emoji = EmojiStep::Idle;
        vec![DomOp::remove_class(Target::TypewriterEmoji, "switching")]
    }

    /// Process every transition due at or before `now`.
    pub fn advance(&mut self, now: Duration) -> Vec<DomOp> {
        let mut ops = Vec::new();
        if self.phase == TypewriterPhase::Idle {
            return ops;
        }
        self.rebase_if_stalled(now);

        loop {
            let swap_due = match self.emoji {
                EmojiStep::FadingOut { swap_at, phrase } if swap_at <= now => Some((swap_at, phrase)),
                _ => None,
            };
            let tick_due = self.next_tick.filter(|t| *t <= now);
            match (tick_due, swap_due) {
                (Some(tick), Some((swap, phrase))) if swap <= tick => self.swap_emoji(phrase, &mut ops),
                (Some(tick), _) => self.tick(tick, &mut ops),
                (None, Some((_, phrase))) => self.swap_emoji(phrase, &mut ops),
                (None, None) => break,
            }
        }
        ops
    }

    fn rebase_if_stalled(&mut self, now: Duration) {
        if let Some(t) = self.next_tick
            && now.saturating_sub(t) > STALL_LIMIT
        {
            tracing::debug!(behind_ms = now.saturating_sub(t).as_millis() as u64, "typewriter resuming after stall");
            self.next_tick = Some(now);
            if let EmojiStep::FadingOut { swap_at, .. } = &mut self.emoji {
                *swap_at = (*swap_at).min(now);
            }
        }
    }

    fn tick(&mut self, due: Duration, ops: &mut Vec<DomOp>) {
        if self.phase == TypewriterPhase::Startup {
            self.cursor.is_deleting = true;
            self.phase = TypewriterPhase::Deleting;
            self.next_tick = Some(due.saturating_add(self.config.delete_interval().max(MIN_STEP)));
            return;
        }

        let len = self.lengths[self.cursor.phrase_index];
        if self.cursor.is_deleting {
            self.cursor.char_index = self.cursor.char_index.saturating_sub(1);
        } else if self.cursor.char_index < len {
            self.cursor.char_index += 1;
        }
        ops.push(DomOp::text(Target::TypewriterText, self.visible_text().to_string()));

        let delay = if !self.cursor.is_deleting && self.cursor.char_index >= len {
            self.cursor.is_deleting = true;
            self.phase = TypewriterPhase::PausingAfterType;
            self.config.pause_after_type()
        } else if self.cursor.is_deleting && self.cursor.char_index == 0 {
            self.cursor.is_deleting = false;
            self.cursor.phrase_index = (self.cursor.phrase_index + 1) % self.lengths.len();
            self.phase = TypewriterPhase::PausingAfterDelete;
            self.begin_emoji_swap(due, ops);
            tracing::debug!(phrase = self.cursor.phrase_index, "typewriter advanced phrase");
            self.config.pause_after_delete()
        } else if self.cursor.is_deleting {
            self.phase = TypewriterPhase::Deleting;
            self.config.delete_interval()
        } else {
            self.phase = TypewriterPhase::Typing;
            self.config.type_interval()
        };
        self.next_tick = Some(due.saturating_add(delay.max(MIN_STEP)));
    }

    fn begin_emoji_swap(&mut self, at: Duration, ops: &mut Vec<DomOp>) {
        ops.push(DomOp::add_class(Target::TypewriterEmoji, "switching"));
        self.emoji = EmojiStep::FadingOut {
            swap_at: at.saturating_add(self.config.emoji_fade()),
            phrase: self.cursor.phrase_index,
        };
    }

    fn swap_emoji(&mut self, phrase: usize, ops: &mut Vec<DomOp>) {
        self.emoji = EmojiStep::AwaitingFrame;
        let Some(p) = self.config.phrases.get(phrase) else {
            return;
        };
        ops.push(DomOp::text(Target::TypewriterEmoji, p.emoji.clone()));
        ops.push(DomOp::SetClassName {
            target: Target::TypewriterEmoji,
            value: emoji_class(p, true),
        });
    }
}

fn emoji_class(phrase: &Phrase, switching: bool) -> String {
    if switching {
        format!("emoji-animate {} switching", phrase.animation)
    } else {
        format!("emoji-animate {}", phrase.animation)
    }
}

/// First `n` extended graphemes of `text`.
#[must_use]
pub fn grapheme_prefix(text: &str, n: usize) -> &str {
    text.grapheme_indices(true)
        .nth(n)
        .map_or(text, |(byte, _)| &text[..byte])
}
