//! 无窗口前端
//!
//! 事件按顺序排队，只在画面等待输入（`interactive`）时逐个投递；
//! 退出事件随时投递。队列耗尽后空转超过上限即请求退出。

use std::collections::VecDeque;

use super::{FrameView, Frontend};
use crate::input::InputEvent;

/// 队列耗尽后允许空转的帧数
const DEFAULT_IDLE_LIMIT: usize = 10_000;

/// 无窗口前端
#[derive(Debug, Clone)]
pub struct HeadlessFrontend {
    queue: VecDeque<InputEvent>,
    frames: Vec<FrameView>,
    /// 最近一帧是否等待输入
    interactive: bool,
    idle_frames: usize,
    idle_limit: usize,
    /// 收到 `InputEvent::Quit` 后保持退出状态
    quit: bool,
}

impl HeadlessFrontend {
    pub fn new(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            queue: events.into_iter().collect(),
            frames: Vec::new(),
            interactive: false,
            idle_frames: 0,
            idle_limit: DEFAULT_IDLE_LIMIT,
            quit: false,
        }
    }

    /// 设置空转上限
    pub fn with_idle_limit(mut self, idle_limit: usize) -> Self {
        self.idle_limit = idle_limit;
        self
    }

    /// 追加事件
    pub fn push(&mut self, event: InputEvent) {
        self.queue.push_back(event);
    }

    /// 所有已提交的帧
    pub fn frames(&self) -> &[FrameView] {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&FrameView> {
        self.frames.last()
    }

    /// 尚未投递的事件数
    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

impl Frontend for HeadlessFrontend {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        let deliver = match self.queue.front() {
            Some(InputEvent::Quit) => true,
            Some(_) => self.interactive,
            None => false,
        };

        if !deliver {
            return Vec::new();
        }

        // 一帧只投递一个事件，下一帧重新判断画面状态
        self.interactive = false;
        match self.queue.pop_front() {
            Some(InputEvent::Quit) => {
                self.quit = true;
                vec![InputEvent::Quit]
            }
            Some(event) => vec![event],
            None => Vec::new(),
        }
    }

    fn present(&mut self, frame: &FrameView) {
        self.interactive = frame.interactive;
        self.frames.push(frame.clone());
    }

    fn wait_frame(&mut self) {
        if self.queue.is_empty() {
            self.idle_frames += 1;
        }
    }

    fn quit_requested(&self) -> bool {
        self.quit || self.idle_frames > self.idle_limit
    }
}
