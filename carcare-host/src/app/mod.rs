//! # App 模块
//!
//! 应用外壳：主菜单、继续游戏（读档菜单）、画廊。
//!
//! 所有界面都通过同一个 [`Frontend`] 运行，嵌套在主菜单循环之内。

mod script_loader;

pub use script_loader::load_script;

use tracing::{debug, info, warn};

use carcare_runtime::SaveRecord;

use crate::error::AppError;
use crate::frontend::{FrameView, Frontend};
use crate::input::{InputEvent, Key};
use crate::overlay::{Overlay, OverlayAction};
use crate::session::{PlaySession, SessionExit};
use crate::state::HostState;

/// 主菜单按钮（按显示顺序）
pub const TITLE_BUTTONS: [&str; 4] = ["New Game", "Continue", "Gallery", "Quit"];

/// 主菜单操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TitleAction {
    NewGame,
    Continue,
    Gallery,
    Quit,
    ToggleMute,
}

/// 嵌套界面的退出方式
#[derive(Debug, Clone, PartialEq)]
enum ScreenExit {
    Back,
    Quit,
    Load(SaveRecord),
}

/// 应用
#[derive(Debug)]
pub struct App {
    state: HostState,
}

impl App {
    pub fn new(state: HostState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &HostState {
        &self.state
    }

    /// 运行主菜单循环，直到退出
    pub fn run(&mut self, frontend: &mut dyn Frontend) -> Result<(), AppError> {
        info!("进入主菜单");

        'title: loop {
            if frontend.quit_requested() {
                break;
            }

            for event in frontend.poll_events() {
                let Some(action) = self.title_action(&event) else {
                    continue;
                };
                debug!(action = ?action, "主菜单操作");

                let exit = match action {
                    TitleAction::NewGame => self.play(frontend, 0)?,
                    TitleAction::Continue => match self.choose_save(frontend) {
                        ScreenExit::Load(record) => {
                            self.play(frontend, record.current_command_index)?
                        }
                        ScreenExit::Back => SessionExit::ReturnToMenu,
                        ScreenExit::Quit => SessionExit::Quit,
                    },
                    TitleAction::Gallery => match self.gallery_screen(frontend) {
                        ScreenExit::Quit => SessionExit::Quit,
                        _ => SessionExit::ReturnToMenu,
                    },
                    TitleAction::ToggleMute => {
                        self.state.audio.toggle_mute();
                        continue;
                    }
                    TitleAction::Quit => SessionExit::Quit,
                };

                if exit == SessionExit::Quit {
                    break 'title;
                }
                // 子界面结束后重新绘制主菜单，丢弃同批的剩余事件
                break;
            }

            frontend.present(&self.title_frame());
            frontend.wait_frame();
        }

        info!("退出");
        Ok(())
    }

    /// 开始一次会话
    fn play(&mut self, frontend: &mut dyn Frontend, start_index: usize) -> Result<SessionExit, AppError> {
        let Some(script) = load_script(&self.state.config.script_path) else {
            warn!("脚本不可用，留在主菜单");
            return Ok(SessionExit::ReturnToMenu);
        };

        let mut session = PlaySession::new(&mut self.state, script, start_index)?;
        let exit = session.run(frontend)?;
        info!(exit = ?exit, "会话结束");

        self.state.audio.stop_all();
        Ok(exit)
    }

    fn title_action(&self, event: &InputEvent) -> Option<TitleAction> {
        let layout = &self.state.layout;
        match *event {
            InputEvent::Quit => Some(TitleAction::Quit),
            InputEvent::Key(Key::Char('m')) => Some(TitleAction::ToggleMute),
            InputEvent::PrimaryClick { x, y } => {
                if layout.mute_icon().contains(x, y) {
                    return Some(TitleAction::ToggleMute);
                }
                let actions = [
                    TitleAction::NewGame,
                    TitleAction::Continue,
                    TitleAction::Gallery,
                    TitleAction::Quit,
                ];
                actions
                    .into_iter()
                    .enumerate()
                    .find(|(i, _)| layout.title_button(*i).contains(x, y))
                    .map(|(_, action)| action)
            }
            _ => None,
        }
    }

    /// 主菜单画面
    pub fn title_frame(&self) -> FrameView {
        let layout = &self.state.layout;
        let frame = TITLE_BUTTONS
            .iter()
            .enumerate()
            .fold(FrameView::menu(self.state.config.window.title.clone()), |frame, (i, label)| {
                frame.with_hotspot(*label, layout.title_button(i))
            });

        let mute_label = if self.state.audio.is_muted() { "Unmute" } else { "Mute" };
        frame.with_hotspot(mute_label, layout.mute_icon())
    }

    /// 读档菜单
    fn choose_save(&mut self, frontend: &mut dyn Frontend) -> ScreenExit {
        let layout = self.state.layout;
        let mut menu = Overlay::save_load(&self.state.saves);

        loop {
            if frontend.quit_requested() {
                return ScreenExit::Quit;
            }

            for event in frontend.poll_events() {
                if event == InputEvent::Quit {
                    return ScreenExit::Quit;
                }
                match menu.handle(&event, &layout, &self.state.saves) {
                    OverlayAction::Dismiss | OverlayAction::ReturnToMenu => return ScreenExit::Back,
                    OverlayAction::LoadSlot(slot) => match self.state.saves.load(slot) {
                        Some(record) => {
                            info!(slot = slot, index = record.current_command_index, "继续游戏");
                            return ScreenExit::Load(record);
                        }
                        None => warn!(slot = slot, "存档无法读取"),
                    },
                    OverlayAction::None => {}
                }
            }

            frontend.present(&menu.frame(&layout));
            frontend.wait_frame();
        }
    }

    /// 画廊画面
    pub fn gallery_frame(&self) -> FrameView {
        let layout = &self.state.layout;
        let gallery = &self.state.gallery;

        let mut frame = gallery
            .page_items()
            .into_iter()
            .fold(FrameView::menu("Gallery"), |frame, card| {
                frame.with_line(format!("{} | {}", card.title, card.caption))
            })
            .with_line(format!("Page {}/{}", gallery.current_page() + 1, gallery.page_count()))
            .with_hotspot("Back", layout.gallery_back());

        if gallery.has_prev_page() {
            frame = frame.with_hotspot("Prev", layout.gallery_prev());
        }
        if gallery.has_next_page() {
            frame = frame.with_hotspot("Next", layout.gallery_next());
        }
        frame
    }

    fn gallery_screen(&mut self, frontend: &mut dyn Frontend) -> ScreenExit {
        let layout = self.state.layout;

        loop {
            if frontend.quit_requested() {
                return ScreenExit::Quit;
            }

            for event in frontend.poll_events() {
                match event {
                    InputEvent::Quit => return ScreenExit::Quit,
                    InputEvent::Key(Key::Escape) => return ScreenExit::Back,
                    InputEvent::Key(Key::Left) => self.state.gallery.prev_page(),
                    InputEvent::Key(Key::Right) => self.state.gallery.next_page(),
                    InputEvent::PrimaryClick { x, y } => {
                        if layout.gallery_back().contains(x, y) {
                            return ScreenExit::Back;
                        } else if layout.gallery_prev().contains(x, y) {
                            self.state.gallery.prev_page();
                        } else if layout.gallery_next().contains(x, y) {
                            self.state.gallery.next_page();
                        }
                    }
                    _ => {}
                }
            }

            frontend.present(&self.gallery_frame());
            frontend.wait_frame();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::NullAudioBackend;
    use crate::config::AppConfig;
    use crate::frontend::HeadlessFrontend;
    use crate::input::Layout;

    fn app(dir: &std::path::Path) -> App {
        let config = AppConfig {
            assets_root: dir.to_path_buf(),
            saves_dir: dir.join("saves"),
            script_path: dir.join("script.json"),
            characters_path: dir.join("characters.json"),
            gallery_config_path: dir.join("gallery_config.json"),
            gallery_progress_path: dir.join("gallery_progress.json"),
            ..AppConfig::default()
        };
        App::new(HostState::new(config, Box::new(NullAudioBackend::new())))
    }

    #[test]
    fn test_title_frame() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(dir.path());
        let frame = app.title_frame();

        assert_eq!(frame.title.as_deref(), Some("CarCare"));
        let labels: Vec<&str> = frame.hotspots.iter().map(|h| h.label.as_str()).collect();
        assert_eq!(labels, ["New Game", "Continue", "Gallery", "Quit", "Mute"]);
    }

    #[test]
    fn test_quit_button() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());
        let layout = Layout::new(1000, 800);

        let mut frontend = HeadlessFrontend::new([InputEvent::click_on(layout.title_button(3))]);
        app.run(&mut frontend).unwrap();
        assert_eq!(frontend.pending(), 0);
    }

    #[test]
    fn test_mute_toggle() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());

        let mut frontend = HeadlessFrontend::new([InputEvent::Key(Key::Char('m')), InputEvent::Quit]);
        app.run(&mut frontend).unwrap();
        assert!(app.state().audio.is_muted());
        assert!(frontend.last_frame().unwrap().hotspot("Unmute").is_some());
    }

    #[test]
    fn test_new_game_without_script_stays_on_title() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());
        let layout = Layout::new(1000, 800);

        let mut frontend = HeadlessFrontend::new([
            InputEvent::click_on(layout.title_button(0)),
            InputEvent::Quit,
        ]);
        app.run(&mut frontend).unwrap();
        assert!(
            frontend
                .frames()
                .iter()
                .all(|frame| frame.title.as_deref() == Some("CarCare"))
        );
    }

    #[test]
    fn test_gallery_paging() {
        let dir = tempfile::tempdir().unwrap();
        let items: serde_json::Map<String, serde_json::Value> = (0..8)
            .map(|i| {
                (
                    format!("item{}", i),
                    serde_json::json!({"title": format!("T{}", i), "unlock_requirement": "Play"}),
                )
            })
            .collect();
        std::fs::write(
            dir.path().join("gallery_config.json"),
            serde_json::Value::Object(items).to_string(),
        )
        .unwrap();
        let mut app = app(dir.path());
        let layout = Layout::new(1000, 800);

        let mut frontend = HeadlessFrontend::new([
            InputEvent::click_on(layout.title_button(2)),
            InputEvent::Key(Key::Right),
            InputEvent::click_on(layout.gallery_back()),
            InputEvent::Quit,
        ]);
        app.run(&mut frontend).unwrap();

        let gallery_frames: Vec<&FrameView> = frontend
            .frames()
            .iter()
            .filter(|frame| frame.title.as_deref() == Some("Gallery"))
            .collect();
        assert_eq!(gallery_frames.len(), 2);
        assert_eq!(gallery_frames[0].lines.len(), 7);
        assert_eq!(gallery_frames[0].lines[0], "??? | Locked: Play");
        assert!(gallery_frames[0].hotspot("Next").is_some());
        assert_eq!(gallery_frames[1].lines.last().unwrap(), "Page 2/2");
        assert!(gallery_frames[1].hotspot("Prev").is_some());
    }
}
