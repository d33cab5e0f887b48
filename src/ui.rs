use std::{borrow::Cow, path::Path};

use anyhow::{Result, anyhow};
use skim::prelude::*;
use skim_tuikit::prelude::{Attr, Color, Effect};

/// Single-choice prompt over a list of entries.
pub trait Chooser {
    /// Position of the picked entry, `Ok(None)` when the user aborts.
    fn choose(&self, prompt: &str, entries: &[String]) -> Result<Option<usize>>;
}

pub struct SkimChooser {
    pub color_spec: Option<String>,
}

struct PathItem {
    text: String,
    display: AnsiString<'static>,
    // position in the caller's entries, returned as output
    entry: String,
    index: usize,
}

impl SkimItem for PathItem {
    fn text(&self) -> Cow<'_, str> { Cow::Borrowed(&self.text) }
    fn output(&self) -> Cow<'_, str> { Cow::Borrowed(&self.entry) }
    fn get_index(&self) -> usize { self.index }
    fn set_index(&mut self, index: usize) { self.index = index; }

    fn display<'a>(&'a self, context: DisplayContext<'a>) -> AnsiString<'a> {
        // Keep the directory/file coloring, overlay match highlight on top
        let mut ret = self.display.clone();
        let new_fragments: Vec<(Attr, (u32, u32))> = match context.matches {
            Matches::CharIndices(indices) => indices
                .iter()
                .map(|&idx| (context.highlight_attr, (idx as u32, idx as u32 + 1)))
                .collect(),
            Matches::CharRange(start, end) => vec![(context.highlight_attr, (start as u32, end as u32))],
            Matches::ByteRange(start, end) => {
                let ch_start = context.text[..start].chars().count();
                let ch_end = ch_start + context.text[start..end].chars().count();
                vec![(context.highlight_attr, (ch_start as u32, ch_end as u32))]
            }
            Matches::None => vec![],
        };
        ret.override_attrs(new_fragments);
        ret
    }
}

impl SkimChooser {
    pub fn new(color_spec: Option<String>) -> Self {
        Self { color_spec }
    }
}

impl Chooser for SkimChooser {
    fn choose(&self, prompt: &str, entries: &[String]) -> Result<Option<usize>> {
        let (tx, rx): (SkimItemSender, SkimItemReceiver) = unbounded();

        let colors = std::env::var("NO_COLOR").is_err();
        for (i, entry) in entries.iter().enumerate() {
            let item = PathItem {
                text: entry.clone(),
                display: colored_path(entry, colors),
                entry: i.to_string(),
                index: i,
            };
            let _ = tx.send(Arc::new(item));
        }
        drop(tx);

        let mut options = SkimOptionsBuilder::default()
            .height("60%".to_string())
            .multi(false)
            .reverse(true)
            .prompt(prompt.to_string())
            .build()
            .map_err(|e| anyhow!("failed to build picker options: {e}"))?;

        // Prefer CLI value, else dark unless NO_COLOR is set
        if let Some(spec) = &self.color_spec {
            options.color = Some(spec.clone());
        } else if colors {
            options.color = Some("dark".to_string());
        }

        let Some(out) = Skim::run_with(&options, Some(rx)) else {
            return Ok(None);
        };
        if out.is_abort {
            return Ok(None);
        }
        let Some(selected) = out.selected_items.first() else {
            log::debug!("picker closed without a selection");
            return Ok(None);
        };
        let pos = selected
            .output()
            .parse::<usize>()
            .map_err(|e| anyhow!("picker returned an unknown entry: {e}"))?;
        Ok(Some(pos))
    }
}

/// Directory part dimmed, file name bold.
fn colored_path(entry: &str, colors: bool) -> AnsiString<'static> {
    if !colors {
        return entry.to_string().into();
    }

    let total = entry.chars().count();
    let name_len = Path::new(entry)
        .file_name()
        .map(|n| n.to_string_lossy().chars().count())
        .unwrap_or(total)
        .min(total);
    let dir_len = total - name_len;

    let mut fragments: Vec<(Attr, (u32, u32))> = Vec::new();
    if dir_len > 0 {
        let dir_attr = Attr { fg: Color::AnsiValue(8), bg: Color::Default, effect: Effect::empty() };
        fragments.push((dir_attr, (0, dir_len as u32)));
    }
    let name_attr = Attr { fg: Color::Default, bg: Color::Default, effect: Effect::BOLD };
    fragments.push((name_attr, (dir_len as u32, total as u32)));

    AnsiString::new_string(entry.to_string(), fragments)
}
