//! 脚本加载

use std::fs;
use std::path::Path;
use tracing::{error, info, warn};

use carcare_runtime::{Parser, Script};

/// 从文件加载脚本
///
/// 读取或校验失败时记录错误并返回 `None`；解析警告逐条记录。
pub fn load_script(path: &Path) -> Option<Script> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            error!(path = ?path, error = %e, "脚本读取失败");
            return None;
        }
    };

    let mut parser = Parser::new();
    match parser.parse(&text) {
        Ok(script) => {
            for warning in parser.warnings() {
                warn!(path = ?path, warning = %warning, "脚本警告");
            }
            info!(path = ?path, commands = script.len(), "脚本加载成功");
            Some(script)
        }
        Err(e) => {
            error!(path = ?path, error = %e, "脚本校验失败");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_script() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("script.json");
        std::fs::write(
            &path,
            r#"{"scenes": {}, "script": [{"type": "dialogue", "text": "Hi"}]}"#,
        )
        .unwrap();

        assert_eq!(load_script(&path).map(|s| s.len()), Some(1));
    }

    #[test]
    fn test_load_script_failures() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_script(&dir.path().join("missing.json")).is_none());

        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"scenes": {}, "script": [{"type": "teleport"}]}"#).unwrap();
        assert!(load_script(&path).is_none());
    }
}
