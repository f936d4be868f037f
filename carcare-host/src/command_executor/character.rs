//! # 角色相关命令执行
//!
//! 处理 ShowCharacter 和 HideCharacter 命令。

use carcare_runtime::Position;
use tracing::debug;

use super::CommandExecutor;
use super::types::ExecuteResult;
use crate::presentation::{PresentationState, ScreenPosition};
use crate::resources::AssetResolver;

impl CommandExecutor {
    /// 执行 ShowCharacter
    ///
    /// 未知角色或没有立绘的角色清空角色槽，不报错。
    /// 显式位置优先于角色默认位置。
    pub(super) fn execute_show_character(
        &mut self,
        name: &str,
        position: Option<Position>,
        presentation: &mut PresentationState,
        resolver: &mut dyn AssetResolver,
    ) -> ExecuteResult {
        match resolver.resolve_character(name) {
            Some(handle) => {
                let position = ScreenPosition::from(position.or(handle.default_position));
                debug!(name = %name, position = ?position, "显示角色");
                presentation.character = Some((handle, position));
            }
            None => {
                debug!(name = %name, "角色无法显示，清空角色槽");
                presentation.character = None;
            }
        }
        ExecuteResult::Ok
    }

    /// 执行 HideCharacter
    pub(super) fn execute_hide_character(
        &mut self,
        presentation: &mut PresentationState,
    ) -> ExecuteResult {
        debug!("隐藏角色");
        presentation.character = None;
        ExecuteResult::Ok
    }
}
