//! # 背景与画面效果命令执行
//!
//! 处理 ShowBackground、Fade、Wait 命令。

use carcare_runtime::FadeColor;
use tracing::debug;

use super::CommandExecutor;
use super::types::ExecuteResult;
use crate::animation::{Animation, DelayAnimation, FadeAnimation, ZoomAnimation};
use crate::presentation::PresentationState;
use crate::resources::AssetResolver;

impl CommandExecutor {
    /// 执行 ShowBackground
    ///
    /// 替换背景并清除上一段的遮罩与缩放。
    pub(super) fn execute_show_background(
        &mut self,
        file: &str,
        presentation: &mut PresentationState,
        resolver: &mut dyn AssetResolver,
    ) -> ExecuteResult {
        let handle = resolver.resolve_background(file);
        debug!(
            path = %handle.path,
            black_screen = handle.is_black_screen,
            placeholder = handle.placeholder,
            "切换背景"
        );
        presentation.background = Some(handle);
        presentation.clear_effects();
        ExecuteResult::Ok
    }

    /// 执行 Fade
    pub(super) fn execute_fade(
        &mut self,
        color: FadeColor,
        duration: f64,
        presentation: &mut PresentationState,
    ) -> ExecuteResult {
        let animation = Animation::Fade(FadeAnimation::new(color, duration, self.frame_rate));
        animation.apply(presentation);
        debug!(color = ?color, duration = duration, "淡入遮罩");
        ExecuteResult::Animate(animation)
    }

    /// 执行 Wait
    ///
    /// 黑屏背景上渲染为缩放动画，其他情况为普通等待。
    pub(super) fn execute_wait(
        &mut self,
        duration: f64,
        presentation: &mut PresentationState,
    ) -> ExecuteResult {
        let animation = if presentation.on_black_screen() {
            debug!(duration = duration, "黑屏缩放");
            Animation::Zoom(ZoomAnimation::new(duration, self.frame_rate))
        } else {
            debug!(duration = duration, "等待");
            Animation::Delay(DelayAnimation::new(duration, self.frame_rate))
        };
        animation.apply(presentation);
        ExecuteResult::Animate(animation)
    }
}
