//! Line-oriented terminal view used by the binary.
//!
//! Plain lines are queries. `:history` opens the history panel, `:pick <n>`
//! replays the n-th listed entry, `:close` hides the panel and `:quit` exits.

use std::io::{self, BufRead, Write};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use moviemind_core::{AppViewModel, HistoryId, Msg, Notification, RequestStatus, ResultsView};
use moviemind_logging::mind_warn;

use crate::session::{Inbound, View};

/// History ids in the order the console last listed them.
pub type ShownHistory = Arc<Mutex<Vec<HistoryId>>>;

pub struct ConsoleView<W: Write> {
    out: W,
    shown_history: ShownHistory,
    last: AppViewModel,
}

impl<W: Write> ConsoleView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            shown_history: Arc::default(),
            last: AppViewModel::default(),
        }
    }

    pub fn shown_history(&self) -> ShownHistory {
        self.shown_history.clone()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn print_results(&mut self) -> io::Result<()> {
        match &self.last.results {
            ResultsView::NotRequested => Ok(()),
            ResultsView::Empty => writeln!(self.out, "No recommendations for that mood."),
            ResultsView::Items(cards) => {
                writeln!(self.out, "RECOMMENDATIONS")?;
                for (idx, card) in cards.iter().enumerate() {
                    writeln!(self.out, "{}. {}", idx + 1, card.title)?;
                    writeln!(self.out, "   {}", card.description)?;
                    writeln!(self.out, "   Why this movie: \"{}\"", card.reason)?;
                }
                Ok(())
            }
        }
    }

    fn print_history(&mut self, view: &AppViewModel) -> io::Result<()> {
        let ids = view.history.iter().map(|row| row.id.clone()).collect();
        if let Ok(mut shown) = self.shown_history.lock() {
            *shown = ids;
        }

        if view.history.is_empty() {
            return writeln!(self.out, "History is empty.");
        }
        writeln!(self.out, "THE ARCHIVE")?;
        for (idx, row) in view.history.iter().enumerate() {
            writeln!(
                self.out,
                "[{}] \"{}\" {} ({} movies)",
                idx + 1,
                row.user_input,
                row.date,
                row.recommendation_count
            )?;
        }
        Ok(())
    }

    fn write_render(&mut self, view: &AppViewModel) -> io::Result<()> {
        if view.status != self.last.status && view.status == RequestStatus::Pending {
            writeln!(self.out, "Finding movies...")?;
        }
        let panel_opened = view.history_panel_open && !self.last.history_panel_open;
        let feed_changed = view.history_panel_open && view.history != self.last.history;
        if panel_opened || feed_changed {
            self.print_history(view)?;
        }
        self.last = view.clone();
        Ok(())
    }

    fn write_notification(&mut self, notification: &Notification) -> io::Result<()> {
        match notification {
            Notification::ScrollToResults => self.print_results(),
            Notification::RecommendationFailed { message } => writeln!(self.out, "! {message}"),
            Notification::HistoryPanelShown | Notification::HistoryPanelHidden => Ok(()),
        }
    }
}

impl<W: Write> View for ConsoleView<W> {
    fn render(&mut self, view: &AppViewModel) {
        if let Err(err) = self.write_render(view).and_then(|_| self.out.flush()) {
            mind_warn!("Console render failed: {}", err);
        }
    }

    fn notify(&mut self, notification: &Notification) {
        if let Err(err) = self
            .write_notification(notification)
            .and_then(|_| self.out.flush())
        {
            mind_warn!("Console notification failed: {}", err);
        }
    }
}

/// Translates one input line into session messages.
pub fn parse_line(line: &str, shown: &[HistoryId]) -> Vec<Inbound> {
    let trimmed = line.trim();
    match trimmed {
        ":quit" => return vec![Inbound::Quit],
        ":history" => return vec![Inbound::Core(Msg::HistoryPanelOpened)],
        ":close" => return vec![Inbound::Core(Msg::HistoryPanelClosed)],
        _ => {}
    }

    if let Some(arg) = trimmed
        .strip_prefix(":pick")
        .filter(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
    {
        let picked = arg
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|idx| shown.get(idx));
        return match picked {
            Some(id) => vec![Inbound::Core(Msg::HistoryEntrySelected { id: id.clone() })],
            None => Vec::new(),
        };
    }

    vec![
        Inbound::Core(Msg::QueryChanged(line.to_string())),
        Inbound::Core(Msg::QuerySubmitted),
    ]
}

/// Reads stdin on a background thread; end of input quits the session.
pub fn spawn_stdin_reader(sender: mpsc::Sender<Inbound>, shown: ShownHistory) {
    thread::spawn(move || {
        let stdin = io::stdin();
        read_lines(stdin.lock(), &sender, &shown);
    });
}

/// Forwards parsed lines until end of input or a read error, then sends
/// `Inbound::Quit`. Bytes that are not UTF-8 are decoded lossily.
pub fn read_lines(
    mut reader: impl BufRead,
    sender: &mpsc::Sender<Inbound>,
    shown: &ShownHistory,
) {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => {
                mind_warn!("Console input failed: {}", err);
                break;
            }
        }

        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches(['\n', '\r']);
        let ids = shown.lock().map(|ids| ids.clone()).unwrap_or_default();
        for inbound in parse_line(line, &ids) {
            if sender.send(inbound).is_err() {
                return;
            }
        }
    }
    let _ = sender.send(Inbound::Quit);
}
