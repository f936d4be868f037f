//! # 路径规范化模块
//!
//! 脚本里的资源路径统一转换为相对于 `assets_root` 的逻辑路径，
//! 缓存也以逻辑路径为键。

/// 规范化逻辑路径
///
/// - 统一使用 `/` 分隔符
/// - 移除 `.` 组件和空组件
/// - `..` 向上一级（越过根部时忽略）
pub fn normalize_logical_path(path: &str) -> String {
    let normalized = path.replace('\\', "/");

    let mut components: Vec<&str> = Vec::new();
    for component in normalized.split('/') {
        match component {
            "" | "." => {}
            ".." => {
                components.pop();
            }
            other => components.push(other),
        }
    }

    components.join("/")
}

/// 是否带黑屏标记（文件名中包含 `black_screen`，不区分大小写）
pub fn has_black_screen_marker(path: &str) -> bool {
    path.to_lowercase().contains("black_screen")
}
