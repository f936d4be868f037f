//! # Overlay 模块
//!
//! 叠加在对话界面上的菜单栈：暂停菜单、存档/读档菜单。
//!
//! 输入先交给栈顶菜单；栈为空时才交给解释器。

use tracing::debug;

use crate::frontend::FrameView;
use crate::input::{InputEvent, Key, Layout};
use crate::save_manager::{SaveManager, SlotInfo};

/// 暂停菜单按钮文本
pub const RETURN_TO_MENU: &str = "Return to Main Menu";

/// 菜单
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    /// 暂停菜单
    PauseMenu,
    /// 存档列表（缓存打开时的槽位信息）
    SaveLoadMenu { slots: Vec<SlotInfo> },
}

impl Overlay {
    /// 打开存档菜单
    pub fn save_load(saves: &SaveManager) -> Self {
        Self::SaveLoadMenu {
            slots: saves.list_slots(),
        }
    }

    /// 画面
    pub fn frame(&self, layout: &Layout) -> FrameView {
        match self {
            Self::PauseMenu => FrameView::menu("Paused").with_hotspot(RETURN_TO_MENU, layout.pause_return()),
            Self::SaveLoadMenu { slots } => slots.iter().enumerate().fold(
                FrameView::menu("Load Game"),
                |frame, (i, slot)| frame.with_hotspot(slot.label(), layout.menu_item(i)),
            ),
        }
    }

    /// 处理一个事件
    pub fn handle(&mut self, event: &InputEvent, layout: &Layout, saves: &SaveManager) -> OverlayAction {
        if *event == InputEvent::Key(Key::Escape) {
            return OverlayAction::Dismiss;
        }

        match self {
            Self::PauseMenu => match event {
                InputEvent::PrimaryClick { x, y } if layout.pause_return().contains(*x, *y) => {
                    OverlayAction::ReturnToMenu
                }
                _ => OverlayAction::None,
            },
            Self::SaveLoadMenu { slots } => {
                let Some((x, y)) = event.point() else {
                    return OverlayAction::None;
                };
                let Some(index) = (0..slots.len()).find(|&i| layout.menu_item(i).contains(x, y))
                else {
                    return OverlayAction::None;
                };
                let (number, exists) = (slots[index].slot, slots[index].exists);

                match event {
                    InputEvent::PrimaryClick { .. } if exists => OverlayAction::LoadSlot(number),
                    InputEvent::SecondaryClick { .. } if exists => {
                        saves.delete(number);
                        *slots = saves.list_slots();
                        debug!(slot = number, "存档已删除，刷新列表");
                        OverlayAction::None
                    }
                    _ => OverlayAction::None,
                }
            }
        }
    }
}

/// 菜单操作结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayAction {
    None,
    /// 关闭栈顶菜单
    Dismiss,
    /// 结束会话并返回主菜单
    ReturnToMenu,
    /// 读取槽位
    LoadSlot(u32),
}

/// 菜单栈
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlayStack {
    stack: Vec<Overlay>,
}

impl OverlayStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, overlay: Overlay) {
        debug!(overlay = ?overlay, "打开菜单");
        self.stack.push(overlay);
    }

    pub fn top(&self) -> Option<&Overlay> {
        self.stack.last()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn clear(&mut self) {
        self.stack.clear();
    }

    /// 把事件交给栈顶菜单
    ///
    /// `Dismiss` 时自动弹出栈顶。栈为空时返回 `None`，调用方应交给解释器处理。
    pub fn handle(
        &mut self,
        event: &InputEvent,
        layout: &Layout,
        saves: &SaveManager,
    ) -> Option<OverlayAction> {
        let top = self.stack.last_mut()?;
        let action = top.handle(event, layout, saves);
        if action == OverlayAction::Dismiss {
            self.stack.pop();
        }
        Some(action)
    }

    /// 栈顶菜单的画面
    pub fn frame(&self, layout: &Layout) -> Option<FrameView> {
        self.top().map(|overlay| overlay.frame(layout))
    }
}
