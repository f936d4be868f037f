//! # Animation 模块
//!
//! 按帧推进的阻塞动画：淡入遮罩、黑屏缩放、普通等待。
//!
//! 动画以帧为单位计时，会话每帧调用一次 [`Animation::step`]，
//! 因此退出信号在动画期间也能逐帧检查。

use carcare_runtime::FadeColor;

use crate::presentation::{FadeOverlay, PresentationState};

/// 缩放动画的填充层颜色
pub const ZOOM_FILLER: (u8, u8, u8) = (20, 20, 20);

/// 缩放终点倍数
pub const ZOOM_END: f32 = 1.05;

/// 淡入动画：alpha 0 → 255
#[derive(Debug, Clone, PartialEq)]
pub struct FadeAnimation {
    pub color: FadeColor,
    alpha: f64,
    /// 每帧增加的 alpha
    step: f64,
}

impl FadeAnimation {
    pub fn new(color: FadeColor, duration: f64, frame_rate: u32) -> Self {
        let frames = duration * f64::from(frame_rate);
        let step = 255.0 / frames;

        // 时长为 0 时直接完成
        let alpha = if step.is_finite() { 0.0 } else { 255.0 };
        Self { color, alpha, step }
    }

    pub fn step(&mut self) {
        if !self.is_finished() {
            self.alpha = (self.alpha + self.step).min(255.0);
        }
    }

    pub fn is_finished(&self) -> bool {
        self.alpha >= 255.0
    }

    pub fn alpha(&self) -> u8 {
        self.alpha.clamp(0.0, 255.0) as u8
    }
}

/// 黑屏缩放动画：填充层 1.0× → 1.05×
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomAnimation {
    current: u32,
    steps: u32,
}

impl ZoomAnimation {
    pub fn new(duration: f64, frame_rate: u32) -> Self {
        let steps = (duration * f64::from(frame_rate)).floor();
        let steps = if steps.is_finite() && steps > 0.0 {
            steps.min(f64::from(u32::MAX)) as u32
        } else {
            0
        };
        Self { current: 0, steps }
    }

    pub fn step(&mut self) {
        if !self.is_finished() {
            self.current += 1;
        }
    }

    pub fn is_finished(&self) -> bool {
        self.current >= self.steps
    }

    /// 当前缩放倍数
    pub fn scale(&self) -> f32 {
        if self.steps == 0 {
            return ZOOM_END;
        }
        let progress = self.current as f32 / self.steps as f32;
        1.0 + (ZOOM_END - 1.0) * progress
    }
}

/// 普通等待
#[derive(Debug, Clone, PartialEq)]
pub struct DelayAnimation {
    remaining: u32,
}

impl DelayAnimation {
    pub fn new(duration: f64, frame_rate: u32) -> Self {
        let frames = (duration * f64::from(frame_rate)).round();
        let remaining = if frames.is_finite() && frames > 0.0 {
            frames.min(f64::from(u32::MAX)) as u32
        } else {
            0
        };
        Self { remaining }
    }

    pub fn step(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    pub fn is_finished(&self) -> bool {
        self.remaining == 0
    }

    pub fn remaining_frames(&self) -> u32 {
        self.remaining
    }
}

/// 阻塞动画
#[derive(Debug, Clone, PartialEq)]
pub enum Animation {
    Fade(FadeAnimation),
    Zoom(ZoomAnimation),
    Delay(DelayAnimation),
}

impl Animation {
    /// 推进一帧
    pub fn step(&mut self) {
        match self {
            Self::Fade(fade) => fade.step(),
            Self::Zoom(zoom) => zoom.step(),
            Self::Delay(delay) => delay.step(),
        }
    }

    pub fn is_finished(&self) -> bool {
        match self {
            Self::Fade(fade) => fade.is_finished(),
            Self::Zoom(zoom) => zoom.is_finished(),
            Self::Delay(delay) => delay.is_finished(),
        }
    }

    /// 把当前帧的效果写入展示状态
    pub fn apply(&self, presentation: &mut PresentationState) {
        match self {
            Self::Fade(fade) => {
                presentation.fade = Some(FadeOverlay {
                    color: fade.color,
                    alpha: fade.alpha(),
                });
            }
            Self::Zoom(zoom) => presentation.zoom = Some(zoom.scale()),
            Self::Delay(_) => {}
        }
    }

    /// 一直推进到结束，返回经过的帧数
    pub fn run_to_end(&mut self, presentation: &mut PresentationState) -> u32 {
        let mut frames = 0;
        while !self.is_finished() {
            self.step();
            self.apply(presentation);
            frames += 1;
        }
        frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_frames() {
        let mut animation = Animation::Fade(FadeAnimation::new(FadeColor::Black, 1.0, 60));
        let mut presentation = PresentationState::new();
        assert!(!animation.is_finished());

        let frames = animation.run_to_end(&mut presentation);
        assert_eq!(frames, 60);
        assert_eq!(
            presentation.fade,
            Some(FadeOverlay {
                color: FadeColor::Black,
                alpha: 255
            })
        );
    }

    #[test]
    fn test_fade_is_monotonic() {
        let mut fade = FadeAnimation::new(FadeColor::White, 0.5, 60);
        let mut last = fade.alpha();
        while !fade.is_finished() {
            fade.step();
            assert!(fade.alpha() >= last);
            last = fade.alpha();
        }
        assert_eq!(last, 255);
    }

    #[test]
    fn test_zero_duration_finishes_immediately() {
        assert!(FadeAnimation::new(FadeColor::Black, 0.0, 60).is_finished());
        assert!(ZoomAnimation::new(0.0, 60).is_finished());
        assert!(DelayAnimation::new(0.0, 60).is_finished());
    }

    #[test]
    fn test_zoom_scale() {
        let mut zoom = ZoomAnimation::new(1.0, 60);
        assert_eq!(zoom.scale(), 1.0);

        for _ in 0..30 {
            zoom.step();
        }
        assert!((zoom.scale() - 1.025).abs() < 1e-4);

        for _ in 0..30 {
            zoom.step();
        }
        assert!(zoom.is_finished());
        assert!((zoom.scale() - ZOOM_END).abs() < 1e-6);
    }

    #[test]
    fn test_zoom_steps_floor() {
        let mut animation = Animation::Zoom(ZoomAnimation::new(0.51, 10));
        let frames = animation.run_to_end(&mut PresentationState::new());
        assert_eq!(frames, 5);
    }

    #[test]
    fn test_delay_rounds_frames() {
        assert_eq!(DelayAnimation::new(0.51, 10).remaining_frames(), 5);
        assert_eq!(DelayAnimation::new(0.55, 10).remaining_frames(), 6);
        assert_eq!(DelayAnimation::new(2.0, 60).remaining_frames(), 120);
    }
}
