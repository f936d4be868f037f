//! # Input 模块
//!
//! 输入事件与界面热区布局。
//!
//! ## 设计说明
//!
//! - `InputEvent` 是前端上报的原始事件（点击坐标、按键、退出）
//! - `Layout` 根据窗口尺寸计算所有按钮热区，会话和菜单用它做命中测试
//! - [`advance_input`] 根据当前 `WaitingReason` 决定一个事件是否推进对话

use carcare_runtime::{RuntimeInput, WaitingReason};

/// 对话文本的估算字宽（像素）
pub const GLYPH_WIDTH: i32 = 12;

/// 按键
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
    Space,
    Left,
    Right,
    Up,
    Down,
    Char(char),
}

/// 前端上报的输入事件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// 主键点击（左键）
    PrimaryClick { x: i32, y: i32 },
    /// 副键点击（右键）
    SecondaryClick { x: i32, y: i32 },
    /// 按键
    Key(Key),
    /// 窗口关闭
    Quit,
}

impl InputEvent {
    /// 在矩形中心的主键点击
    pub fn click_on(rect: Rect) -> Self {
        let (x, y) = rect.center();
        Self::PrimaryClick { x, y }
    }

    /// 在矩形中心的副键点击
    pub fn secondary_click_on(rect: Rect) -> Self {
        let (x, y) = rect.center();
        Self::SecondaryClick { x, y }
    }

    /// 点击坐标（非点击事件返回 None）
    pub fn point(&self) -> Option<(i32, i32)> {
        match *self {
            Self::PrimaryClick { x, y } | Self::SecondaryClick { x, y } => Some((x, y)),
            _ => None,
        }
    }
}

/// 轴对齐矩形
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// 以中心点构造
    pub const fn centered(cx: i32, cy: i32, w: i32, h: i32) -> Self {
        Self::new(cx - w / 2, cy - h / 2, w, h)
    }

    /// 点是否在矩形内（左上闭、右下开）
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x + self.w && y >= self.y && y < self.y + self.h
    }

    pub fn center(&self) -> (i32, i32) {
        (self.x + self.w / 2, self.y + self.h / 2)
    }
}

/// 界面布局
///
/// 所有坐标以窗口左上角为原点。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub width: i32,
    pub height: i32,
}

impl Layout {
    /// 标题菜单按钮尺寸
    const TITLE_BUTTON: (i32, i32) = (300, 60);
    /// 菜单条目尺寸
    const MENU_ITEM: (i32, i32) = (400, 40);
    /// 画廊每行条目数
    pub const GALLERY_COLUMNS: usize = 3;

    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: i32::try_from(width).unwrap_or(i32::MAX),
            height: i32::try_from(height).unwrap_or(i32::MAX),
        }
    }

    pub fn screen(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    /// 对话框
    pub fn dialogue_box(&self) -> Rect {
        Rect::new(50, self.height - 200, self.width - 100, 150)
    }

    /// 对话框内每行可容纳的字数
    pub fn dialogue_columns(&self) -> usize {
        let inner = self.dialogue_box().w - 20;
        usize::try_from(inner / GLYPH_WIDTH).unwrap_or(0).max(1)
    }

    /// 对话界面右上角的存档按钮
    pub fn hud_save(&self) -> Rect {
        Rect::new(self.width - 200, 10, 80, 30)
    }

    /// 对话界面右上角的读档按钮
    pub fn hud_load(&self) -> Rect {
        Rect::new(self.width - 100, 10, 80, 30)
    }

    /// 菜单第 `index` 项（0 起）
    pub fn menu_item(&self, index: usize) -> Rect {
        let offset = i32::try_from(index).unwrap_or(i32::MAX / 100) * 50;
        Rect::centered(
            self.width / 2,
            150 + offset,
            Self::MENU_ITEM.0,
            Self::MENU_ITEM.1,
        )
    }

    /// 暂停菜单的"返回主菜单"
    pub fn pause_return(&self) -> Rect {
        Rect::centered(self.width / 2, self.height / 2, 400, 50)
    }

    /// 标题菜单按钮（New Game / Continue / Gallery / Quit）
    pub fn title_button(&self, index: usize) -> Rect {
        let offset = i32::try_from(index).unwrap_or(0) * 100;
        Rect::centered(
            self.width / 2,
            300 + offset,
            Self::TITLE_BUTTON.0,
            Self::TITLE_BUTTON.1,
        )
    }

    /// 标题菜单的静音图标
    pub fn mute_icon(&self) -> Rect {
        Rect::new(self.width - 80, self.height - 80, 60, 60)
    }

    /// 画廊返回按钮
    pub fn gallery_back(&self) -> Rect {
        Rect::new(20, 20, 100, 40)
    }

    /// 画廊上一页
    pub fn gallery_prev(&self) -> Rect {
        Rect::new(50, self.height - 80, 100, 40)
    }

    /// 画廊下一页
    pub fn gallery_next(&self) -> Rect {
        Rect::new(self.width - 150, self.height - 80, 100, 40)
    }

    /// 画廊当前页第 `index` 个条目的格子
    pub fn gallery_cell(&self, index: usize) -> Rect {
        let (cell_w, cell_h, gap) = (250, 220, 40);
        let columns = Self::GALLERY_COLUMNS as i32;
        let col = i32::try_from(index % Self::GALLERY_COLUMNS).unwrap_or(0);
        let row = i32::try_from(index / Self::GALLERY_COLUMNS).unwrap_or(0);
        let left = (self.width - (columns * cell_w + (columns - 1) * gap)) / 2;
        Rect::new(
            left + col * (cell_w + gap),
            100 + row * (cell_h + gap),
            cell_w,
            cell_h,
        )
    }
}

/// 对话推进输入
///
/// 只在等待点击时，主键点击 / 回车 / 空格产生 `RuntimeInput::Click`。
/// 调用方负责先让 HUD 和覆盖层做命中测试。
pub fn advance_input(event: &InputEvent, waiting: &WaitingReason) -> Option<RuntimeInput> {
    if *waiting != WaitingReason::WaitForClick {
        return None;
    }

    match event {
        InputEvent::PrimaryClick { .. } | InputEvent::Key(Key::Enter) | InputEvent::Key(Key::Space) => {
            Some(RuntimeInput::Click)
        }
        _ => None,
    }
}
