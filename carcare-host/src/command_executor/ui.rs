//! # 对话框命令执行
//!
//! 处理 ShowText 命令。

use tracing::debug;

use super::CommandExecutor;
use super::types::ExecuteResult;
use crate::presentation::{DialogueView, PresentationState, wrap_text};

impl CommandExecutor {
    /// 执行 ShowText
    ///
    /// 在当前画面上绘制对话框，然后等待点击。没有背景时不强制清屏。
    pub(super) fn execute_show_text(
        &mut self,
        speaker: Option<&str>,
        text: &str,
        presentation: &mut PresentationState,
    ) -> ExecuteResult {
        let lines = wrap_text(text, self.dialogue_columns);
        debug!(speaker = ?speaker, lines = lines.len(), "显示对话");

        presentation.clear_effects();
        presentation.dialogue = Some(DialogueView {
            speaker: speaker.filter(|s| !s.is_empty()).map(str::to_string),
            text: text.to_string(),
            lines,
        });
        ExecuteResult::WaitForClick
    }
}
