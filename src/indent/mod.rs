//! Tab / Shift+Tab editing inside a textarea.
//!
//! The browser moves focus on Tab; here it edits text instead:
//! - caret only: insert a literal `\t`,
//! - selection + Tab: prefix every selected line with `\t`,
//! - selection + Shift+Tab: drop one leading `\t` from every selected line.
//!
//! Offsets are UTF-16 code units, as reported by `selectionStart`/`selectionEnd`.

use crate::error::Result;

pub const TAB: char = '\t';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TabDirection {
    Indent,
    Outdent,
}

impl TabDirection {
    pub fn from_shift(shift: bool) -> Self {
        if shift {
            Self::Outdent
        } else {
            Self::Indent
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub start: u32,
    pub end: u32,
}

impl Selection {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn caret(at: u32) -> Self {
        Self { start: at, end: at }
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }
}

/// Content and selection after one Tab key press.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TabEdit {
    pub content: String,
    pub selection: Selection,
}

fn utf16_to_byte_idx(s: &str, pos_utf16: u32) -> usize {
    if pos_utf16 == 0 {
        return 0;
    }
    let mut acc: u32 = 0;
    for (i, ch) in s.char_indices() {
        let w = ch.len_utf16() as u32;
        if acc + w > pos_utf16 {
            return i;
        }
        acc += w;
        if acc == pos_utf16 {
            return i + ch.len_utf8();
        }
    }
    s.len()
}

fn byte_idx_to_utf16(s: &str, byte_idx: usize) -> u32 {
    s[..byte_idx.min(s.len())].encode_utf16().count() as u32
}

/// Apply a Tab (or Shift+Tab) press to `content` with the given selection.
///
/// Bounds past the end of the content are clamped to it first.
pub fn apply_tab(content: &str, selection: Selection, direction: TabDirection) -> TabEdit {
    let start_byte = utf16_to_byte_idx(content, selection.start);
    let end_byte = utf16_to_byte_idx(content, selection.end).max(start_byte);
    let start = byte_idx_to_utf16(content, start_byte);
    let end = byte_idx_to_utf16(content, end_byte);

    let head = &content[..start_byte];
    let selected = &content[start_byte..end_byte];
    let tail = &content[end_byte..];

    if start == end {
        let mut next = String::with_capacity(content.len() + 1);
        next.push_str(head);
        next.push(TAB);
        next.push_str(tail);
        return TabEdit {
            content: next,
            selection: Selection::caret(start + 1),
        };
    }

    let (replaced, selection) = match direction {
        TabDirection::Indent => {
            let lines = selected.split('\n').collect::<Vec<_>>();
            let indented = lines
                .iter()
                .map(|line| format!("{TAB}{line}"))
                .collect::<Vec<_>>()
                .join("\n");
            (indented, Selection::new(start, end + lines.len() as u32))
        }
        TabDirection::Outdent => {
            let mut removed_first = 0u32;
            let mut removed_total = 0u32;
            let outdented = selected
                .split('\n')
                .enumerate()
                .map(|(i, line)| match line.strip_prefix(TAB) {
                    Some(rest) => {
                        removed_total += 1;
                        if i == 0 {
                            removed_first = 1;
                        }
                        rest
                    }
                    None => line,
                })
                .collect::<Vec<_>>()
                .join("\n");
            // The start shifts left by the first line's removal even though the
            // removed tab sits after it; offsets saturate at 0.
            (
                outdented,
                Selection::new(
                    start.saturating_sub(removed_first),
                    end.saturating_sub(removed_total),
                ),
            )
        }
    };

    let mut next = String::with_capacity(head.len() + replaced.len() + tail.len());
    next.push_str(head);
    next.push_str(&replaced);
    next.push_str(tail);

    TabEdit {
        content: next,
        selection,
    }
}

/// Handle a keydown on `el`. Returns the applied edit, or `None` when the key is
/// not a plain Tab / Shift+Tab and the browser keeps its default behavior.
pub fn handle_tab_key(
    el: &web_sys::HtmlTextAreaElement,
    ev: &web_sys::KeyboardEvent,
) -> Result<Option<TabEdit>> {
    if ev.key() != "Tab" || ev.ctrl_key() || ev.alt_key() || ev.meta_key() {
        return Ok(None);
    }
    ev.prevent_default();

    let value = el.value();
    let selection = Selection::new(
        el.selection_start()?.unwrap_or(0),
        el.selection_end()?.unwrap_or(0),
    );

    let edit = apply_tab(&value, selection, TabDirection::from_shift(ev.shift_key()));
    el.set_value(&edit.content);
    el.set_selection_range(edit.selection.start, edit.selection.end)?;

    tracing::trace!(
        start = edit.selection.start,
        end = edit.selection.end,
        "applied tab edit"
    );
    Ok(Some(edit))
}
