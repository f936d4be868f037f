//! # Characters 模块
//!
//! 角色表：角色名 → 立绘文件、默认位置、显示尺寸。
//!
//! 没有 `file` 的角色是合法的，显示时视为"不在场"。

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use carcare_runtime::Position;

/// 角色定义
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterDef {
    /// 立绘路径（相对于资源根目录）
    #[serde(default)]
    pub file: Option<String>,
    /// 默认位置
    #[serde(default)]
    pub default_position: Option<Position>,
    /// 显示尺寸 (宽, 高)
    #[serde(default = "default_size")]
    pub size: (u32, u32),
}

fn default_size() -> (u32, u32) {
    (300, 400)
}

impl CharacterDef {
    /// 创建带立绘的角色
    pub fn new(file: impl Into<String>, default_position: Position, size: (u32, u32)) -> Self {
        Self {
            file: Some(file.into()),
            default_position: Some(default_position),
            size,
        }
    }
}

/// 角色表
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CharacterRegistry {
    characters: HashMap<String, CharacterDef>,
}

impl CharacterRegistry {
    /// 创建空角色表
    pub fn new() -> Self {
        Self::default()
    }

    /// 内置角色表
    pub fn builtin() -> Self {
        let mut registry = Self::new();

        let chiheb = [
            ("chihebNeutral", (300, 400)),
            ("chihebHappy", (200, 400)),
            ("chihebBored", (200, 400)),
            ("chihebNervous", (200, 400)),
            ("chihebAnxiety", (200, 400)),
            ("chihebShocked", (200, 400)),
        ];
        for (name, size) in chiheb {
            registry.insert(
                name,
                CharacterDef::new(
                    format!("images/characters/Chiheb/{}.png", name),
                    Position::Left,
                    size,
                ),
            );
        }

        // Nova 没有立绘
        registry.insert(
            "Nova",
            CharacterDef {
                file: None,
                default_position: Some(Position::Right),
                size: (300, 400),
            },
        );

        registry.insert(
            "Nebula",
            CharacterDef::new("images/characters/Nebula.png", Position::Center, (300, 400)),
        );
        for name in ["nebulaNeutral", "nebulaNotification", "nebulaAngry"] {
            registry.insert(
                name,
                CharacterDef::new(
                    format!("images/characters/Nebula/{}.png", name),
                    Position::Center,
                    (300, 400),
                ),
            );
        }
        registry.insert(
            "Nebula_shout",
            CharacterDef::new(
                "images/characters/Nebula_shout.png",
                Position::Center,
                (200, 400),
            ),
        );

        registry
    }

    /// 从 JSON 文件加载
    ///
    /// 文件不存在或解析失败时回退到内置角色表。
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = ?path, error = %e, "角色表读取失败，使用内置角色表");
                return Self::builtin();
            }
        };

        match Self::from_json(&content) {
            Ok(registry) => {
                info!(path = ?path, count = registry.len(), "角色表加载成功");
                registry
            }
            Err(e) => {
                warn!(path = ?path, error = %e, "角色表解析失败，使用内置角色表");
                Self::builtin()
            }
        }
    }

    /// 从 JSON 文本解析
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let characters: HashMap<String, CharacterDef> = serde_json::from_str(json)?;
        Ok(Self { characters })
    }

    /// 注册角色
    pub fn insert(&mut self, name: impl Into<String>, def: CharacterDef) {
        self.characters.insert(name.into(), def);
    }

    /// 查找角色
    pub fn get(&self, name: &str) -> Option<&CharacterDef> {
        self.characters.get(name)
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }
}
