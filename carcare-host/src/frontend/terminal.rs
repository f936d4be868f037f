//! 终端前端
//!
//! 后台线程逐行读取标准输入，主循环每帧非阻塞地取出命令：
//!
//! | 输入 | 事件 |
//! |---|---|
//! | 空行 | 回车（推进对话） |
//! | `N` | 主键点击第 N 个热区 |
//! | `dN` | 副键点击第 N 个热区（删除存档） |
//! | `esc` | Escape |
//! | `q` | 关闭窗口 |
//! | 单个字符 | 对应按键 |
//!
//! 标准输入关闭视为关闭窗口。第一帧画面打印之前的输入保留在队列里，
//! 打印后再按画面上的热区编号解析。

use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

use super::{FrameView, Frontend, Hotspot};
use crate::input::{InputEvent, Key};

/// 终端前端
pub struct TerminalFrontend {
    lines: Receiver<String>,
    frame_duration: Duration,
    /// 最近一次打印的帧
    last_frame: Option<FrameView>,
    /// 最近一次打印的热区（输入编号按它解析）
    hotspots: Vec<Hotspot>,
    closed: bool,
    /// 收到 `q` 后保持退出状态
    quit: bool,
}

impl TerminalFrontend {
    /// 创建终端前端并启动输入线程
    pub fn new(frame_rate: u32) -> Self {
        let (sender, lines) = mpsc::channel();
        thread::spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                match line {
                    Ok(line) => {
                        if sender.send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "标准输入读取失败");
                        break;
                    }
                }
            }
        });

        Self::from_lines(lines, frame_rate)
    }

    /// 从给定的行通道读取输入
    pub fn from_lines(lines: Receiver<String>, frame_rate: u32) -> Self {
        Self {
            lines,
            frame_duration: Duration::from_secs_f64(1.0 / f64::from(frame_rate.max(1))),
            last_frame: None,
            hotspots: Vec::new(),
            closed: false,
            quit: false,
        }
    }
}

impl Frontend for TerminalFrontend {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();
        if self.last_frame.is_none() {
            return events;
        }
        loop {
            match self.lines.try_recv() {
                Ok(line) => match parse_line(&line, &self.hotspots) {
                    Some(InputEvent::Quit) => {
                        self.quit = true;
                        events.push(InputEvent::Quit);
                    }
                    Some(event) => events.push(event),
                    None => warn!(input = %line, "无法识别的输入"),
                },
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if !self.closed {
                        debug!("标准输入已关闭");
                        self.closed = true;
                        events.push(InputEvent::Quit);
                    }
                    break;
                }
            }
        }
        events
    }

    fn present(&mut self, frame: &FrameView) {
        if self.last_frame.as_ref() == Some(frame) {
            return;
        }
        // 动画帧只打印首尾，避免刷屏
        let animating = frame.fade.is_some_and(|(_, alpha)| alpha < 255)
            || frame.zoom.is_some_and(|zoom| zoom < crate::animation::ZOOM_END);
        let was_animating = self
            .last_frame
            .as_ref()
            .is_some_and(|last| last.fade.is_some() || last.zoom.is_some());
        self.hotspots = frame.hotspots.clone();
        self.last_frame = Some(frame.clone());
        if animating && was_animating {
            return;
        }

        let mut stdout = io::stdout().lock();
        // 输出失败时没有可做的补救
        let _ = writeln!(stdout, "{}", render_text(frame));
        let _ = stdout.flush();
    }

    fn wait_frame(&mut self) {
        thread::sleep(self.frame_duration);
    }

    fn quit_requested(&self) -> bool {
        self.closed || self.quit
    }
}

/// 解析一行输入
pub fn parse_line(line: &str, hotspots: &[Hotspot]) -> Option<InputEvent> {
    let line = line.trim();

    match line.to_lowercase().as_str() {
        "" => return Some(InputEvent::Key(Key::Enter)),
        "esc" | "escape" => return Some(InputEvent::Key(Key::Escape)),
        "q" | "quit" => return Some(InputEvent::Quit),
        "space" => return Some(InputEvent::Key(Key::Space)),
        "left" => return Some(InputEvent::Key(Key::Left)),
        "right" => return Some(InputEvent::Key(Key::Right)),
        "up" => return Some(InputEvent::Key(Key::Up)),
        "down" => return Some(InputEvent::Key(Key::Down)),
        _ => {}
    }

    if let Some(index) = line.strip_prefix('d').or_else(|| line.strip_prefix('D'))
        && let Some(hotspot) = hotspot_at(hotspots, index)
    {
        return Some(InputEvent::secondary_click_on(hotspot.rect));
    }

    if let Some(hotspot) = hotspot_at(hotspots, line) {
        return Some(InputEvent::click_on(hotspot.rect));
    }

    let mut chars = line.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if !c.is_ascii_digit() => Some(InputEvent::Key(Key::Char(c))),
        _ => None,
    }
}

/// 按 1 起的编号查找热区
fn hotspot_at<'a>(hotspots: &'a [Hotspot], index: &str) -> Option<&'a Hotspot> {
    let index: usize = index.parse().ok()?;
    hotspots.get(index.checked_sub(1)?)
}

/// 文本方式渲染一帧
pub fn render_text(frame: &FrameView) -> String {
    let mut out = Vec::new();

    if let Some(title) = &frame.title {
        out.push(format!("== {} ==", title));
    }
    if let Some(background) = &frame.background {
        out.push(format!("[background] {}", background));
    }
    if let Some(sprite) = &frame.character {
        out.push(format!(
            "[character] {} at ({}, {})",
            sprite.name, sprite.origin.0, sprite.origin.1
        ));
    }
    if let Some((color, alpha)) = frame.fade {
        out.push(format!("[fade] {:?} {}", color, alpha));
    }
    if let Some(zoom) = frame.zoom {
        out.push(format!("[zoom] {:.3}x", zoom));
    }
    if let Some(dialogue) = &frame.dialogue {
        if let Some(speaker) = &dialogue.speaker {
            out.push(format!("{}:", speaker));
        }
        for line in &dialogue.lines {
            out.push(format!("  {}", line));
        }
    }
    out.extend(frame.lines.iter().cloned());

    if !frame.hotspots.is_empty() {
        let buttons: Vec<String> = frame
            .hotspots
            .iter()
            .enumerate()
            .map(|(i, h)| format!("[{}] {}", i + 1, h.label))
            .collect();
        out.push(buttons.join("  "));
    }

    out.join("\n")
}
