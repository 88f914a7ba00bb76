use crate::ui::Msg;
use crate::ui::model::Model;
use bubbletea_rs::{
    Program, command::Cmd, event::KeyMsg, event::WindowSizeMsg, model::Model as TeaModel,
    window_size,
};
use crossterm::event::{KeyCode, KeyModifiers};
use once_cell::sync::Lazy;
use std::sync::Mutex;

// `TeaModel::init` takes no arguments, so the prepared model is parked here.
static PENDING: Lazy<Mutex<Option<Model>>> = Lazy::new(|| Mutex::new(None));

struct TeaAdapter {
    inner: Option<Model>,
}

impl TeaAdapter {
    fn key(&mut self, km: &KeyMsg) -> Option<Cmd> {
        let m = self.inner.as_mut()?;
        let ctrl = km.modifiers.contains(KeyModifiers::CONTROL);
        match &km.key {
            KeyCode::Esc => {
                if !m.suggesting() {
                    return Some(bubbletea_rs::quit());
                }
                m.update(Msg::KeyEsc);
            }
            KeyCode::Char('\u{03}') => return Some(bubbletea_rs::quit()),
            KeyCode::Char('c' | 'C') if ctrl => return Some(bubbletea_rs::quit()),
            KeyCode::Char('n' | 'N') if ctrl => m.update(Msg::KeyDown),
            KeyCode::Char('p' | 'P') if ctrl => m.update(Msg::KeyUp),
            KeyCode::Char(_) if ctrl => {}
            KeyCode::Char(ch) => m.update(Msg::Rune(*ch)),
            KeyCode::Enter => {
                m.update(Msg::KeyEnter);
                if !m.exit_preview.is_empty() {
                    return Some(bubbletea_rs::quit());
                }
            }
            KeyCode::Tab => m.update(Msg::KeyTab),
            KeyCode::Backspace => m.update(Msg::KeyBackspace),
            KeyCode::Up => m.update(Msg::KeyUp),
            KeyCode::Down => m.update(Msg::KeyDown),
            KeyCode::Left => m.update(Msg::KeyLeft),
            KeyCode::Right => m.update(Msg::KeyRight),
            _ => {}
        }
        None
    }
}

impl TeaModel for TeaAdapter {
    fn init() -> (Self, Option<Cmd>) {
        let inner = PENDING.lock().ok().and_then(|mut slot| slot.take());
        let mut adapter = TeaAdapter { inner };
        let Some(m) = adapter.inner.as_mut() else {
            return (adapter, Some(bubbletea_rs::quit()));
        };
        let (width, height) = crossterm::terminal::size().unwrap_or((80, 24));
        m.update(Msg::WindowSize {
            width: width as usize,
            height: height as usize,
        });
        (adapter, Some(window_size()))
    }

    fn update(&mut self, msg: bubbletea_rs::event::Msg) -> Option<Cmd> {
        if let Some(km) = msg.downcast_ref::<KeyMsg>() {
            return self.key(km);
        }
        if let Some(ws) = msg.downcast_ref::<WindowSizeMsg>() {
            if let Some(m) = self.inner.as_mut() {
                m.update(Msg::WindowSize {
                    width: ws.width as usize,
                    height: ws.height as usize,
                });
            }
        }
        None
    }

    fn view(&self) -> String {
        self.inner.as_ref().map(Model::render_full).unwrap_or_default()
    }
}

/// Run the interactive editor and return the submitted buffer, if any.
pub async fn run(model: Model) -> Result<Option<String>, String> {
    match PENDING.lock() {
        Ok(mut slot) => *slot = Some(model),
        Err(e) => return Err(format!("model slot poisoned: {e}")),
    }

    let builder = Program::<TeaAdapter>::builder()
        .alt_screen(true)
        .signal_handler(true);
    let program = match builder.build() {
        Ok(p) => p,
        Err(e) => return Err(format!("failed to build program: {e:?}")),
    };
    let final_adapter = match program.run().await {
        Ok(fa) => fa,
        Err(e) => return Err(format!("program error: {e:?}")),
    };

    let submitted = final_adapter
        .inner
        .map(|m| m.exit_preview)
        .filter(|s| !s.is_empty());
    tracing::info!(submitted = submitted.is_some(), "editor closed");
    Ok(submitted)
}
