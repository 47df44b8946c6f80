use std::future::Future;
use std::io::{self, Stdout};
use std::pin::Pin;
use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::{
    cursor,
    event::{
        DisableBracketedPaste, EnableBracketedPaste, Event as CrosstermEvent, EventStream,
        KeyEventKind,
    },
    terminal::{EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::{FutureExt, StreamExt};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use tokio::{
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
    task::JoinHandle,
};
use tokio_util::sync::CancellationToken;

use crate::infrastructure::tui::{Event, Frame, TuiLike};

/// Crossterm terminal in raw mode on the alternate screen
///
/// A background task merges terminal input with tick and render intervals
/// into a single event channel.
pub struct RealTui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    task: Option<JoinHandle<()>>,
    cancellation_token: CancellationToken,
    event_rx: UnboundedReceiver<Event>,
    event_tx: UnboundedSender<Event>,
    tick_rate: f64,
    frame_rate: f64,
}

impl RealTui {
    pub fn new() -> Result<Self> {
        let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Ok(Self {
            terminal,
            task: None,
            cancellation_token: CancellationToken::new(),
            event_rx,
            event_tx,
            tick_rate: 4.0,
            frame_rate: 30.0,
        })
    }

    pub fn tick_rate(mut self, tick_rate: f64) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    pub fn frame_rate(mut self, frame_rate: f64) -> Self {
        self.frame_rate = frame_rate;
        self
    }

    fn start(&mut self) {
        self.cancel();
        self.cancellation_token = CancellationToken::new();

        let tick_delay = Duration::from_secs_f64(1.0 / self.tick_rate.max(f64::EPSILON));
        let render_delay = Duration::from_secs_f64(1.0 / self.frame_rate.max(f64::EPSILON));
        let token = self.cancellation_token.clone();
        let event_tx = self.event_tx.clone();

        self.task = Some(tokio::spawn(async move {
            let mut reader = EventStream::new();
            let mut tick_interval = tokio::time::interval(tick_delay);
            let mut render_interval = tokio::time::interval(render_delay);
            let _ = event_tx.send(Event::Init);
            loop {
                let event = tokio::select! {
                    _ = token.cancelled() => break,
                    crossterm_event = reader.next().fuse() => match crossterm_event {
                        Some(Ok(event)) => match event {
                            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                                Event::Key(key)
                            }
                            CrosstermEvent::Key(_) => continue,
                            CrosstermEvent::Mouse(mouse) => Event::Mouse(mouse),
                            CrosstermEvent::Resize(x, y) => Event::Resize(x, y),
                            CrosstermEvent::FocusLost => Event::FocusLost,
                            CrosstermEvent::FocusGained => Event::FocusGained,
                            CrosstermEvent::Paste(s) => Event::Paste(s),
                        },
                        Some(Err(_)) => Event::Error,
                        None => Event::Closed,
                    },
                    _ = tick_interval.tick() => Event::Tick,
                    _ = render_interval.tick() => Event::Render,
                };
                let closed = event == Event::Closed;
                if event_tx.send(event).is_err() || closed {
                    break;
                }
            }
        }));
    }

    fn cancel(&mut self) {
        self.cancellation_token.cancel();
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl TuiLike for RealTui {
    fn enter(&mut self) -> Result<()> {
        crossterm::terminal::enable_raw_mode()?;
        crossterm::execute!(
            io::stdout(),
            EnterAlternateScreen,
            EnableBracketedPaste,
            cursor::Hide
        )?;
        self.start();
        Ok(())
    }

    fn exit(&mut self) -> Result<()> {
        self.cancel();
        if crossterm::terminal::is_raw_mode_enabled()? {
            self.terminal.flush()?;
            crossterm::execute!(
                io::stdout(),
                DisableBracketedPaste,
                LeaveAlternateScreen,
                cursor::Show
            )?;
            crossterm::terminal::disable_raw_mode()?;
        }
        Ok(())
    }

    fn draw(&mut self, f: &mut dyn FnMut(&mut Frame<'_>)) -> Result<()> {
        self.terminal.draw(|frame| f(frame))?;
        Ok(())
    }

    fn resize(&mut self, area: Rect) -> Result<()> {
        self.terminal.resize(area)?;
        Ok(())
    }

    fn next(&mut self) -> Pin<Box<dyn Future<Output = Option<Event>> + Send + '_>> {
        Box::pin(self.event_rx.recv())
    }
}

impl Drop for RealTui {
    fn drop(&mut self) {
        if let Err(e) = self.exit() {
            log::error!("unable to restore terminal: {e}");
        }
    }
}
