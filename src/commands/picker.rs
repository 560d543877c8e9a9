//! Single-choice picker.
//!
//! A skim list on unix. Everywhere else the picker is unavailable and callers
//! tell the user to pass the choice as an argument.

/// One row in the picker: `label` is shown (and may carry ANSI styles),
/// `value` is returned when chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Choice {
    pub label: String,
    pub value: String,
}

impl Choice {
    pub(crate) fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// Label without ANSI escapes; this is what the query matches against.
    #[cfg_attr(not(unix), allow(dead_code))]
    fn plain_label(&self) -> String {
        anstream::adapter::strip_str(&self.label).to_string()
    }
}

#[cfg(unix)]
mod skim_picker {
    use std::borrow::Cow;
    use std::io::IsTerminal;
    use std::sync::Arc;

    use skim::prelude::*;

    use super::Choice;

    struct ChoiceItem {
        text: String,
        choice: Choice,
    }

    impl SkimItem for ChoiceItem {
        fn text(&self) -> Cow<'_, str> {
            Cow::Borrowed(&self.text)
        }

        fn display<'a>(&'a self, _context: skim::DisplayContext<'a>) -> skim::AnsiString<'a> {
            skim::AnsiString::parse(&self.choice.label)
        }

        fn output(&self) -> Cow<'_, str> {
            Cow::Borrowed(&self.choice.value)
        }
    }

    pub(crate) fn pick(prompt: &str, choices: Vec<Choice>) -> anyhow::Result<Option<String>> {
        // Interactive picker requires a terminal for the TUI
        if !std::io::stdin().is_terminal() {
            anyhow::bail!("Interactive picker requires an interactive terminal");
        }

        let options = SkimOptionsBuilder::default()
            .height("40%".to_string())
            .layout("reverse".to_string())
            .multi(false)
            .prompt(format!("{prompt}> "))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build skim options: {}", e))?;

        let (tx, rx): (SkimItemSender, SkimItemReceiver) = unbounded();
        for choice in choices {
            let item = ChoiceItem {
                text: choice.plain_label(),
                choice,
            };
            tx.send(Arc::new(item) as Arc<dyn SkimItem>)
                .map_err(|e| anyhow::anyhow!("Failed to send item to skim: {}", e))?;
        }
        drop(tx);

        let output = Skim::run_with(&options, Some(rx));

        // Clear the picker residue; status output follows on stderr
        {
            use crossterm::{execute, terminal};
            use std::io::stderr;
            execute!(stderr(), terminal::Clear(terminal::ClearType::All))?;
            execute!(stderr(), crossterm::cursor::MoveTo(0, 0))?;
        }

        let selected = output
            .filter(|out| !out.is_abort)
            .and_then(|out| out.selected_items.first().map(|item| item.output().to_string()));
        Ok(selected)
    }
}

/// Let the user choose one of `choices`. `Ok(None)` means the picker was
/// dismissed, which is not an error.
#[cfg(unix)]
pub(crate) fn pick(prompt: &str, choices: Vec<Choice>) -> anyhow::Result<Option<String>> {
    if choices.is_empty() {
        return Ok(None);
    }
    skim_picker::pick(prompt, choices)
}

#[cfg(not(unix))]
pub(crate) fn pick(_prompt: &str, _choices: Vec<Choice>) -> anyhow::Result<Option<String>> {
    anyhow::bail!("Interactive picker is not supported on this platform; pass the value as an argument")
}
