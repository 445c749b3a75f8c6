use crossterm::style::Stylize;
use kodirun_core::Item;
use kodirun_nav::Console;
use std::io::{self, BufRead, IsTerminal, Write};

/// Line-oriented console over any reader/writer pair.
pub struct TerminalConsole<R, W> {
    input: R,
    output: W,
    styled: bool,
}

impl TerminalConsole<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        let output = io::stdout();
        let styled = output.is_terminal();
        Self::new(io::stdin().lock(), output, styled)
    }
}

impl<R: BufRead, W: Write> TerminalConsole<R, W> {
    pub fn new(input: R, output: W, styled: bool) -> Self {
        Self {
            input,
            output,
            styled,
        }
    }

    #[cfg(test)]
    fn into_output(self) -> W {
        self.output
    }

    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn write_row(&mut self, index: usize, item: &Item) -> io::Result<()> {
        let marker = if item.is_directory() { "/" } else { " " };
        if self.styled {
            let label = if item.is_played() {
                item.label().dark_grey()
            } else {
                item.label().bold()
            };
            writeln!(
                self.output,
                "[{index:>2}] {label}{marker} {}",
                item.path().dark_grey()
            )
        } else {
            writeln!(
                self.output,
                "[{index:>2}] {}{marker} {}",
                item.label(),
                item.path()
            )
        }
    }
}

impl<R: BufRead, W: Write> Console for TerminalConsole<R, W> {
    fn display(&mut self, items: &[Item]) -> io::Result<()> {
        writeln!(self.output, "{}", "-".repeat(60))?;
        if items.is_empty() {
            writeln!(self.output, "(empty listing)")?;
        }
        for (index, item) in items.iter().enumerate() {
            self.write_row(index, item)?;
        }
        writeln!(self.output, "{}", "-".repeat(60))
    }

    fn choose(&mut self, items: &[Item]) -> io::Result<Option<Item>> {
        if items.is_empty() {
            writeln!(self.output, "Nothing to choose from.")?;
            return Ok(None);
        }
        for (index, item) in items.iter().enumerate() {
            self.write_row(index, item)?;
        }

        loop {
            let Some(answer) = self.prompt("Choose an item or \"q\" to quit: ")? else {
                return Ok(None);
            };
            if answer.eq_ignore_ascii_case("q") {
                return Ok(None);
            }
            match answer.parse::<usize>().ok().and_then(|i| items.get(i)) {
                Some(item) => return Ok(Some(item.clone())),
                None => writeln!(
                    self.output,
                    "Invalid choice {answer:?}, expected 0-{}.",
                    items.len() - 1
                )?,
            }
        }
    }

    fn confirm_continue(&mut self) -> io::Result<bool> {
        let answer = self.prompt("Enter to continue or \"q\" to quit: ")?;
        Ok(!matches!(answer.as_deref(), None | Some("q") | Some("Q")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console(input: &str) -> TerminalConsole<Cursor<Vec<u8>>, Vec<u8>> {
        TerminalConsole::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), false)
    }

    fn listing() -> Vec<Item> {
        vec![
            Item::parent("plugin://demo/"),
            Item::directory("Videos", "plugin://demo/videos/"),
            Item::playable("Trailer", "plugin://demo/play/trailer"),
        ]
    }

    #[test]
    fn display_numbers_every_row() {
        let mut console = console("");
        console.display(&listing()).unwrap();
        let out = String::from_utf8(console.into_output()).unwrap();
        assert!(out.contains("[ 0] ../ plugin://demo/"));
        assert!(out.contains("[ 1] Videos/ plugin://demo/videos/"));
        assert!(out.contains("[ 2] Trailer  plugin://demo/play/trailer"));
    }

    #[test]
    fn choose_reprompts_until_valid() {
        let items = listing();
        let mut console = console("x\n7\n1\n");
        let chosen = console.choose(&items).unwrap().unwrap();
        assert!(chosen.is_same(&items[1]));
        let out = String::from_utf8(console.into_output()).unwrap();
        assert_eq!(out.matches("Invalid choice").count(), 2);
    }

    #[test]
    fn choose_quits_on_q_or_eof() {
        let items = listing();
        assert!(console("q\n").choose(&items).unwrap().is_none());
        assert!(console("").choose(&items).unwrap().is_none());
        assert!(console("1\n").choose(&[]).unwrap().is_none());
    }

    #[test]
    fn confirm_continue_reads_enter_and_q() {
        let mut console = console("\n\nq\n");
        assert!(console.confirm_continue().unwrap());
        assert!(console.confirm_continue().unwrap());
        assert!(!console.confirm_continue().unwrap());
        assert!(!console.confirm_continue().unwrap());
    }
}
