use cloudmaster::ai::{ContentProvider, OpenRouterProvider};
use cloudmaster::ai_worker::{Delivery, FetchWorker};
use cloudmaster::app::{App, AppControl};
use cloudmaster::config::Config;
use cloudmaster::{logger, ui};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> io::Result<()> {
    logger::init();
    log::info!("CloudMaster starting");

    let (tx, rx) = mpsc::unbounded_channel::<Delivery>();
    let config = Config::from_env();
    let app = match config.and_then(|c| OpenRouterProvider::new(&c)) {
        Ok(provider) => {
            let provider: Arc<dyn ContentProvider> = Arc::new(provider);
            App::new(Some(FetchWorker::new(provider, tx)), None)
        }
        Err(e) => {
            log::error!("Content provider unavailable: {}", e);
            App::new(None, Some(e))
        }
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, app, rx).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    log::info!("CloudMaster exiting");
    result
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
    mut rx: mpsc::UnboundedReceiver<Delivery>,
) -> io::Result<()> {
    let mut events = EventStream::new();
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    ticker.tick().await;

    loop {
        terminal.draw(|f| ui::draw(f, &mut app))?;

        tokio::select! {
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    if app.handle_key(key) == AppControl::Quit {
                        return Ok(());
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e),
                None => return Ok(()),
            },
            Some(delivery) = rx.recv() => app.handle_delivery(delivery),
            _ = ticker.tick() => app.handle_tick(),
        }
    }
}
