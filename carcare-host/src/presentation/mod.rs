//! # Presentation 模块
//!
//! 展示状态：当前背景、角色及位置、对话文本、淡入遮罩、缩放。
//! 由指令执行修改，每帧由前端读取渲染。

use carcare_runtime::{FadeColor, Position};

use crate::resources::{BackgroundHandle, CharacterHandle};

/// 角色在屏幕上的位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScreenPosition {
    Left,
    Center,
    Right,
    /// 未设置位置的角色不绘制
    #[default]
    Unset,
}

impl From<Option<Position>> for ScreenPosition {
    fn from(position: Option<Position>) -> Self {
        match position {
            Some(Position::Left) => Self::Left,
            Some(Position::Center) => Self::Center,
            Some(Position::Right) => Self::Right,
            None => Self::Unset,
        }
    }
}

impl ScreenPosition {
    /// 立绘底边距屏幕底部的距离
    const BOTTOM_MARGIN: i32 = 50;
    /// 左右两侧立绘距屏幕边缘的距离
    const SIDE_MARGIN: i32 = 50;

    /// 计算立绘左上角坐标
    ///
    /// `Unset` 返回 `None`。
    pub fn placement(&self, screen: (i32, i32), sprite: (u32, u32)) -> Option<(i32, i32)> {
        let (w, h) = screen;
        let sw = i32::try_from(sprite.0).unwrap_or(i32::MAX);
        let sh = i32::try_from(sprite.1).unwrap_or(i32::MAX);
        let y = h - sh - Self::BOTTOM_MARGIN;

        match self {
            Self::Left => Some((Self::SIDE_MARGIN, y)),
            Self::Center => Some(((w - sw) / 2, y)),
            Self::Right => Some((w - sw - Self::SIDE_MARGIN, y)),
            Self::Unset => None,
        }
    }
}

/// 对话框内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueView {
    /// 说话者（None 时不绘制名字标签）
    pub speaker: Option<String>,
    /// 原始文本
    pub text: String,
    /// 折行后的文本
    pub lines: Vec<String>,
}

/// 淡入遮罩
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FadeOverlay {
    pub color: FadeColor,
    /// 0 = 透明，255 = 不透明
    pub alpha: u8,
}

/// 展示状态
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PresentationState {
    pub background: Option<BackgroundHandle>,
    pub character: Option<(CharacterHandle, ScreenPosition)>,
    pub dialogue: Option<DialogueView>,
    pub fade: Option<FadeOverlay>,
    /// 黑屏等待时的填充层缩放倍数
    pub zoom: Option<f32>,
}

impl PresentationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 背景是否为黑屏
    pub fn on_black_screen(&self) -> bool {
        self.background
            .as_ref()
            .is_some_and(|background| background.is_black_screen)
    }

    /// 清除遮罩与缩放效果
    pub fn clear_effects(&mut self) {
        self.fade = None;
        self.zoom = None;
    }

    /// 当前状态快照
    pub fn snapshot(&self) -> PresentationSnapshot {
        PresentationSnapshot {
            background: self.background.as_ref().map(|b| b.path.clone()),
            character: self.character.as_ref().map(|(c, _)| c.name.clone()),
            position: self
                .character
                .as_ref()
                .map(|(_, position)| *position)
                .unwrap_or_default(),
        }
    }
}

/// 展示状态快照
///
/// 只包含背景、角色和位置，用于比对快进回放与正常执行的结果。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresentationSnapshot {
    pub background: Option<String>,
    pub character: Option<String>,
    pub position: ScreenPosition,
}

/// 按字数折行
///
/// 优先在空白处断行；单词超过一行时强制切分。显式换行保留。
pub fn wrap_text(text: &str, max_cols: usize) -> Vec<String> {
    let max_cols = max_cols.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_len = 0;

        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();

            if current_len > 0 && current_len + 1 + word.len() <= max_cols {
                current.push(' ');
                current.extend(word.iter());
                current_len += 1 + word.len();
                continue;
            }

            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
            }

            while word.len() > max_cols {
                let rest = word.split_off(max_cols);
                lines.push(word.iter().collect());
                word = rest;
            }
            current_len = word.len();
            current.extend(word);
        }

        if current_len > 0 || (paragraph.trim().is_empty() && !paragraph.is_empty()) {
            lines.push(current);
        }
    }

    lines
}
