//! # Frontend 模块
//!
//! 窗口与输入的外部接口。会话只通过 [`Frontend`] 与外界交互：
//! 每帧采集事件、提交一帧画面描述、等待下一帧。
//!
//! - `headless`: 脚本化事件队列，记录所有帧，用于测试
//! - `terminal`: 标准输入读取命令，文本方式输出画面

mod headless;
mod terminal;

pub use headless::HeadlessFrontend;
pub use terminal::{TerminalFrontend, parse_line, render_text};

use carcare_runtime::FadeColor;

use crate::input::{InputEvent, Layout, Rect};
use crate::presentation::{DialogueView, PresentationState};

/// 前端接口
pub trait Frontend {
    /// 采集本帧的输入事件
    fn poll_events(&mut self) -> Vec<InputEvent>;

    /// 提交一帧画面
    fn present(&mut self, frame: &FrameView);

    /// 等待到下一帧
    fn wait_frame(&mut self);

    /// 玩家是否请求退出（关闭窗口）
    ///
    /// 投递过 [`InputEvent::Quit`] 之后保持为 `true`。
    fn quit_requested(&self) -> bool;
}

/// 可点击的热区
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hotspot {
    pub label: String,
    pub rect: Rect,
}

/// 立绘的绘制信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteView {
    pub name: String,
    pub path: String,
    /// 左上角坐标
    pub origin: (i32, i32),
    pub size: (u32, u32),
}

/// 一帧画面的完整描述
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameView {
    /// 菜单标题
    pub title: Option<String>,
    /// 背景路径
    pub background: Option<String>,
    pub character: Option<SpriteView>,
    pub dialogue: Option<DialogueView>,
    pub fade: Option<(FadeColor, u8)>,
    /// 黑屏缩放填充层
    pub zoom: Option<f32>,
    /// 额外的文本行（菜单条目、画廊卡片等）
    pub lines: Vec<String>,
    pub hotspots: Vec<Hotspot>,
    /// 当前画面是否在等待玩家输入
    pub interactive: bool,
}

impl FrameView {
    /// 由展示状态构造
    pub fn from_presentation(presentation: &PresentationState, layout: &Layout) -> Self {
        let character = presentation.character.as_ref().and_then(|(handle, position)| {
            position
                .placement(layout.screen(), handle.size)
                .map(|origin| SpriteView {
                    name: handle.name.clone(),
                    path: handle.path.clone(),
                    origin,
                    size: handle.size,
                })
        });

        Self {
            background: presentation.background.as_ref().map(|b| b.path.clone()),
            character,
            dialogue: presentation.dialogue.clone(),
            fade: presentation.fade.map(|fade| (fade.color, fade.alpha)),
            zoom: presentation.zoom,
            ..Self::default()
        }
    }

    /// 菜单画面
    pub fn menu(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            interactive: true,
            ..Self::default()
        }
    }

    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    pub fn with_hotspot(mut self, label: impl Into<String>, rect: Rect) -> Self {
        self.hotspots.push(Hotspot {
            label: label.into(),
            rect,
        });
        self
    }

    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// 按标签查找热区
    pub fn hotspot(&self, label: &str) -> Option<&Hotspot> {
        self.hotspots.iter().find(|h| h.label == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::ScreenPosition;
    use crate::resources::CharacterHandle;

    #[test]
    fn test_frame_from_presentation() {
        let layout = Layout::new(1000, 800);
        let mut presentation = PresentationState::new();
        presentation.character = Some((
            CharacterHandle {
                name: "X".to_string(),
                path: "x.png".to_string(),
                size: (300, 400),
                default_position: None,
            },
            ScreenPosition::Left,
        ));

        let frame = FrameView::from_presentation(&presentation, &layout);
        let sprite = frame.character.unwrap();
        assert_eq!(sprite.origin, (50, 350));
        assert!(!frame.interactive);
    }

    #[test]
    fn test_unset_position_is_not_drawn() {
        let layout = Layout::new(1000, 800);
        let mut presentation = PresentationState::new();
        presentation.character = Some((
            CharacterHandle {
                name: "X".to_string(),
                path: "x.png".to_string(),
                size: (300, 400),
                default_position: None,
            },
            ScreenPosition::Unset,
        ));

        assert!(FrameView::from_presentation(&presentation, &layout).character.is_none());
    }

    #[test]
    fn test_menu_builder() {
        let frame = FrameView::menu("Load Game")
            .with_line("Slot 1: Empty")
            .with_hotspot("Slot 1", Rect::new(0, 0, 10, 10));
        assert!(frame.interactive);
        assert!(frame.hotspot("Slot 1").is_some());
        assert!(frame.hotspot("Slot 2").is_none());
    }
}
