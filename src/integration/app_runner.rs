use std::sync::Arc;

use color_eyre::eyre::Result;
use ratatui::layout::Rect;
use tokio::sync::{mpsc, Mutex};

use crate::{
    core::{
        app::{App, AppSettings},
        effect::Effect,
        message::{AppMsg, FeedMsg, SystemMsg},
    },
    infrastructure::{
        api::HoaxifyApi,
        poll::{IntervalPoller, PollTick},
        signer::CredentialStore,
        tui::{self, TuiLike},
    },
    integration::effect_executor::EffectExecutor,
    presentation::components::Components,
};

/// Drives the application: multiplexes terminal events, effect results and
/// poll ticks into [`App::update`], executes the returned effects and renders.
pub struct AppRunner<'a> {
    app: App<'a>,
    executor: EffectExecutor,
    tui: Arc<Mutex<dyn TuiLike>>,
    msg_rx: mpsc::UnboundedReceiver<AppMsg>,
    tick_rx: mpsc::UnboundedReceiver<PollTick>,
    components: Components,
}

impl<'a> AppRunner<'a> {
    pub fn new(
        settings: AppSettings,
        api: Arc<dyn HoaxifyApi>,
        credentials: CredentialStore,
        tui: Arc<Mutex<dyn TuiLike>>,
    ) -> Self {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        let (tick_tx, tick_rx) = mpsc::unbounded_channel();
        let app = App::new(
            settings,
            Box::new(IntervalPoller::new(tick_tx.clone())),
            Box::new(IntervalPoller::new(tick_tx)),
        );
        Self {
            app,
            executor: EffectExecutor::new(api, credentials, msg_tx),
            tui,
            msg_rx,
            tick_rx,
            components: Components::new(),
        }
    }

    pub fn app(&self) -> &App<'a> {
        &self.app
    }

    /// Enter the terminal and dispatch the startup effects
    pub async fn start(&mut self) -> Result<()> {
        self.tui.lock().await.enter()?;
        let effects = self.app.init();
        self.execute(effects);
        self.render().await
    }

    /// Run until the application quits
    pub async fn run(&mut self) -> Result<()> {
        self.start().await?;
        while !self.app.should_quit() {
            self.step().await?;
        }
        self.tui.lock().await.exit()?;
        Ok(())
    }

    /// Wait for the next event, effect result or poll tick and apply it
    pub async fn step(&mut self) -> Result<()> {
        let next = {
            let mut tui = self.tui.lock().await;
            tokio::select! {
                event = tui.next() => Next::Terminal(event),
                Some(msg) = self.msg_rx.recv() => Next::Msg(msg),
                Some(tick) = self.tick_rx.recv() => Next::Msg(AppMsg::Feed(FeedMsg::Polled(tick))),
            }
        };

        match next {
            Next::Msg(msg) => self.dispatch(msg),
            Next::Terminal(None) => self.dispatch(AppMsg::System(SystemMsg::Quit)),
            Next::Terminal(Some(event)) => self.handle_event(event).await?,
        }
        Ok(())
    }

    async fn handle_event(&mut self, event: tui::Event) -> Result<()> {
        match event {
            tui::Event::Quit | tui::Event::Closed => self.dispatch(AppMsg::System(SystemMsg::Quit)),
            tui::Event::Tick => self.dispatch(AppMsg::System(SystemMsg::Tick)),
            tui::Event::Render => self.render().await?,
            tui::Event::Resize(width, height) => {
                self.tui
                    .lock()
                    .await
                    .resize(Rect::new(0, 0, width, height))?;
                self.dispatch(AppMsg::System(SystemMsg::Resize(width, height)));
                self.render().await?;
            }
            tui::Event::Key(key) => self.dispatch(AppMsg::System(SystemMsg::KeyInput(key))),
            tui::Event::Error => self.dispatch(AppMsg::System(SystemMsg::ShowError(
                String::from("terminal event error"),
            ))),
            tui::Event::Init
            | tui::Event::FocusGained
            | tui::Event::FocusLost
            | tui::Event::Paste(_)
            | tui::Event::Mouse(_) => {}
        }
        Ok(())
    }

    /// Apply `msg` and execute the resulting effects
    pub fn dispatch(&mut self, msg: AppMsg) {
        let effects = self.app.update(msg);
        self.execute(effects);
    }

    fn execute(&self, effects: Vec<Effect>) {
        for effect in effects {
            log::debug!("executing {effect:?}");
            self.executor.execute(effect);
        }
    }

    pub async fn render(&mut self) -> Result<()> {
        let app = &self.app;
        let components = &mut self.components;
        self.tui
            .lock()
            .await
            .draw(&mut |frame: &mut tui::Frame<'_>| components.render(frame, app))
    }
}

enum Next {
    Terminal(Option<tui::Event>),
    Msg(AppMsg),
}
