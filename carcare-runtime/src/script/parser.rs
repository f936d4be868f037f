//! # Parser 模块
//!
//! 脚本 JSON 解析器。
//!
//! ## 脚本格式
//!
//! ```text
//! {
//!   "scenes": { ... },
//!   "script": [
//!     { "type": "background", "file": "images/bg.png" },
//!     { "type": "dialogue", "speaker": "Nebula", "text": "..." }
//!   ]
//! }
//! ```
//!
//! ## 设计原则
//!
//! - 每个变体所需字段在加载时校验，错误信息带指令索引
//! - 旧版脚本把小游戏写成独立的指令类型（如 `fuse_game`），统一映射为 `MiniGame`
//! - 无法执行的组合（如带 `file` 的 `stop`）只记录警告，不拒绝加载

use serde::Deserialize;
use serde_json::Value;

use crate::command::{FadeColor, Position, SoundChannel};
use crate::error::ScriptError;
use crate::minigame::MiniGameKind;
use crate::script::ast::{Script, ScriptCommand};

/// 当前格式支持的指令类型（不含旧版小游戏类型）
const COMMAND_TYPES: &[&str] = &[
    "background",
    "character",
    "hide_character",
    "dialogue",
    "sound",
    "music",
    "fade",
    "wait",
    "quiz",
    "minigame",
];

/// `fade` / `wait` 未指定时长时的默认值（秒）
const DEFAULT_DURATION: f64 = 1.0;

fn default_duration() -> f64 {
    DEFAULT_DURATION
}

/// 原始指令（与 JSON 一一对应，字段尚未归一化）
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum RawCommand {
    Background {
        file: String,
    },
    Character {
        name: String,
        #[serde(default)]
        position: Option<String>,
    },
    HideCharacter {},
    Dialogue {
        #[serde(default)]
        speaker: Option<String>,
        text: String,
    },
    Sound {
        #[serde(default)]
        file: Option<String>,
        #[serde(default)]
        channel: Option<String>,
        #[serde(default, rename = "loop")]
        looping: bool,
    },
    Music {
        #[serde(default)]
        file: Option<String>,
        #[serde(default, rename = "loop")]
        looping: bool,
        #[serde(default)]
        stop: bool,
    },
    Fade {
        #[serde(default)]
        color: Option<String>,
        #[serde(default = "default_duration")]
        duration: f64,
    },
    Wait {
        #[serde(default = "default_duration")]
        duration: f64,
    },
    Quiz {},
    Minigame {
        #[serde(default)]
        kind: Option<String>,
    },
}

/// 脚本解析器
#[derive(Debug, Default)]
pub struct Parser {
    /// 解析过程中的警告
    warnings: Vec<String>,
}

impl Parser {
    /// 创建新的解析器
    pub fn new() -> Self {
        Self::default()
    }

    /// 解析脚本 JSON 文本
    pub fn parse(&mut self, text: &str) -> Result<Script, ScriptError> {
        let root: Value = serde_json::from_str(text).map_err(|e| ScriptError::InvalidJson {
            message: e.to_string(),
        })?;
        self.parse_value(root)
    }

    /// 解析已反序列化的脚本 JSON
    pub fn parse_value(&mut self, root: Value) -> Result<Script, ScriptError> {
        self.warnings.clear();

        let Value::Object(mut root) = root else {
            return Err(ScriptError::RootNotObject);
        };

        let scenes = match root.remove("scenes") {
            Some(Value::Object(scenes)) => scenes,
            Some(_) => {
                return Err(ScriptError::InvalidSection {
                    section: "scenes".to_string(),
                    expected: "对象".to_string(),
                });
            }
            None => {
                return Err(ScriptError::MissingSection {
                    section: "scenes".to_string(),
                });
            }
        };

        let entries = match root.remove("script") {
            Some(Value::Array(entries)) => entries,
            Some(_) => {
                return Err(ScriptError::InvalidSection {
                    section: "script".to_string(),
                    expected: "数组".to_string(),
                });
            }
            None => {
                return Err(ScriptError::MissingSection {
                    section: "script".to_string(),
                });
            }
        };

        let mut commands = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            commands.push(self.parse_command(index, entry)?);
        }

        Ok(Script::new(commands).with_scenes(scenes))
    }

    /// 获取解析过程中的警告
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    fn parse_command(&mut self, index: usize, entry: Value) -> Result<ScriptCommand, ScriptError> {
        let command_type = entry
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| ScriptError::InvalidCommand {
                index,
                message: "缺少 'type' 字段".to_string(),
            })?
            .to_string();

        if let Some(kind) = MiniGameKind::from_legacy_type(&command_type) {
            return Ok(ScriptCommand::MiniGame { kind });
        }

        if !COMMAND_TYPES.contains(&command_type.as_str()) {
            return Err(ScriptError::UnknownCommand {
                index,
                command: command_type,
            });
        }

        let raw: RawCommand =
            serde_json::from_value(entry).map_err(|e| ScriptError::InvalidCommand {
                index,
                message: format!("'{}' {}", command_type, e),
            })?;

        self.convert(index, raw)
    }

    fn convert(&mut self, index: usize, raw: RawCommand) -> Result<ScriptCommand, ScriptError> {
        let command = match raw {
            RawCommand::Background { file } => ScriptCommand::Background { file },

            RawCommand::Character { name, position } => {
                let position = match position {
                    Some(p) => Some(Position::parse(&p).ok_or_else(|| {
                        ScriptError::InvalidCommand {
                            index,
                            message: format!("未知的角色位置 '{}'", p),
                        }
                    })?),
                    None => None,
                };
                ScriptCommand::Character { name, position }
            }

            RawCommand::HideCharacter {} => ScriptCommand::HideCharacter,

            RawCommand::Dialogue { speaker, text } => ScriptCommand::Dialogue {
                speaker: speaker.filter(|s| !s.is_empty()),
                text,
            },

            RawCommand::Sound {
                file,
                channel,
                looping,
            } => {
                let channel = match channel {
                    Some(c) => SoundChannel::parse(&c).ok_or_else(|| ScriptError::InvalidCommand {
                        index,
                        message: format!("未知的音效通道 '{}'", c),
                    })?,
                    None => SoundChannel::default(),
                };
                if channel == SoundChannel::Ambient && file.is_some() && !looping {
                    self.warn(index, "环境音未设置 loop，执行时会停止环境音通道");
                }
                ScriptCommand::Sound {
                    file,
                    channel,
                    looping,
                }
            }

            RawCommand::Music {
                file,
                looping,
                stop,
            } => {
                if stop && file.is_some() {
                    self.warn(index, "音乐指令同时带有 file 和 stop，stop 将被忽略");
                }
                ScriptCommand::Music {
                    file,
                    looping,
                    stop,
                }
            }

            RawCommand::Fade { color, duration } => ScriptCommand::Fade {
                color: match color {
                    Some(c) => FadeColor::parse(&c).ok_or_else(|| ScriptError::InvalidCommand {
                        index,
                        message: format!("未知的淡入颜色 '{}'", c),
                    })?,
                    None => FadeColor::default(),
                },
                duration: check_duration(index, duration)?,
            },

            RawCommand::Wait { duration } => ScriptCommand::Wait {
                duration: check_duration(index, duration)?,
            },

            RawCommand::Quiz {} => ScriptCommand::Quiz,

            RawCommand::Minigame { kind } => {
                let kind = match kind {
                    Some(name) => MiniGameKind::from_kind_name(&name).ok_or_else(|| {
                        ScriptError::InvalidCommand {
                            index,
                            message: format!("未知的小游戏种类 '{}'", name),
                        }
                    })?,
                    None => MiniGameKind::Generic,
                };
                ScriptCommand::MiniGame { kind }
            }
        };

        Ok(command)
    }

    fn warn(&mut self, index: usize, message: &str) {
        self.warnings.push(format!("第 {} 条指令：{}", index, message));
    }
}

fn check_duration(index: usize, duration: f64) -> Result<f64, ScriptError> {
    if duration.is_finite() && duration >= 0.0 {
        Ok(duration)
    } else {
        Err(ScriptError::InvalidCommand {
            index,
            message: format!("无效的时长 {}", duration),
        })
    }
}

impl Script {
    /// 解析脚本 JSON 文本（丢弃警告）
    pub fn from_json(text: &str) -> Result<Self, ScriptError> {
        Parser::new().parse(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(script: &str) -> Result<Script, ScriptError> {
        Script::from_json(&format!(r#"{{"scenes": {{}}, "script": {}}}"#, script))
    }

    #[test]
    fn test_parse_minimal_script() {
        let script = parse(
            r#"[
                {"type": "background", "file": "a.png"},
                {"type": "character", "name": "X", "position": "left"},
                {"type": "dialogue", "speaker": "X", "text": "Hi"}
            ]"#,
        )
        .unwrap();

        assert_eq!(script.len(), 3);
        assert_eq!(
            script.get(0),
            Some(&ScriptCommand::Background {
                file: "a.png".to_string()
            })
        );
        assert_eq!(
            script.get(1),
            Some(&ScriptCommand::Character {
                name: "X".to_string(),
                position: Some(Position::Left)
            })
        );
        assert_eq!(
            script.get(2),
            Some(&ScriptCommand::Dialogue {
                speaker: Some("X".to_string()),
                text: "Hi".to_string()
            })
        );
    }

    #[test]
    fn test_missing_sections() {
        let err = Script::from_json(r#"{"script": []}"#).unwrap_err();
        assert_eq!(
            err,
            ScriptError::MissingSection {
                section: "scenes".to_string()
            }
        );

        let err = Script::from_json(r#"{"scenes": {}}"#).unwrap_err();
        assert_eq!(
            err,
            ScriptError::MissingSection {
                section: "script".to_string()
            }
        );
    }

    #[test]
    fn test_malformed_json_and_root() {
        assert!(matches!(
            Script::from_json("{ not json"),
            Err(ScriptError::InvalidJson { .. })
        ));
        assert_eq!(
            Script::from_json("[1, 2]").unwrap_err(),
            ScriptError::RootNotObject
        );
        assert!(matches!(
            Script::from_json(r#"{"scenes": [], "script": []}"#),
            Err(ScriptError::InvalidSection { .. })
        ));
    }

    #[test]
    fn test_scenes_are_kept() {
        let script =
            Script::from_json(r#"{"scenes": {"train": {"background": "t.png"}}, "script": []}"#)
                .unwrap();
        assert!(script.scenes.contains_key("train"));
        assert!(script.is_empty());
    }

    #[test]
    fn test_missing_required_field_reports_index() {
        let err = parse(
            r#"[
                {"type": "wait"},
                {"type": "background"}
            ]"#,
        )
        .unwrap_err();
        assert!(matches!(err, ScriptError::InvalidCommand { index: 1, .. }));

        let err = parse(r#"[{"type": "dialogue", "speaker": "X"}]"#).unwrap_err();
        assert!(matches!(err, ScriptError::InvalidCommand { index: 0, .. }));
    }

    #[test]
    fn test_unknown_and_untyped_commands() {
        let err = parse(r#"[{"type": "teleport"}]"#).unwrap_err();
        assert_eq!(
            err,
            ScriptError::UnknownCommand {
                index: 0,
                command: "teleport".to_string()
            }
        );

        let err = parse(r#"[{"text": "no type"}]"#).unwrap_err();
        assert!(matches!(err, ScriptError::InvalidCommand { index: 0, .. }));
    }

    #[test]
    fn test_unknown_fade_color_and_channel_rejected() {
        let err = parse(r#"[{"type": "fade", "color": "red"}]"#).unwrap_err();
        assert!(matches!(err, ScriptError::InvalidCommand { index: 0, .. }));

        let err = parse(
            r#"[{"type": "wait"}, {"type": "sound", "file": "a.wav", "channel": "voice"}]"#,
        )
        .unwrap_err();
        assert!(matches!(err, ScriptError::InvalidCommand { index: 1, .. }));
    }

    #[test]
    fn test_invalid_position_is_rejected() {
        let err = parse(r#"[{"type": "character", "name": "X", "position": "top"}]"#).unwrap_err();
        assert!(matches!(err, ScriptError::InvalidCommand { index: 0, .. }));
    }

    #[test]
    fn test_defaults() {
        let script = parse(
            r#"[
                {"type": "fade"},
                {"type": "wait"},
                {"type": "sound", "file": "s.wav"},
                {"type": "music", "stop": true},
                {"type": "dialogue", "speaker": "", "text": "旁白"},
                {"type": "character", "name": "Nova"}
            ]"#,
        )
        .unwrap();

        assert_eq!(
            script.get(0),
            Some(&ScriptCommand::Fade {
                color: FadeColor::Black,
                duration: 1.0
            })
        );
        assert_eq!(script.get(1), Some(&ScriptCommand::Wait { duration: 1.0 }));
        assert_eq!(
            script.get(2),
            Some(&ScriptCommand::Sound {
                file: Some("s.wav".to_string()),
                channel: SoundChannel::Sfx,
                looping: false
            })
        );
        assert_eq!(
            script.get(3),
            Some(&ScriptCommand::Music {
                file: None,
                looping: false,
                stop: true
            })
        );
        assert_eq!(
            script.get(4),
            Some(&ScriptCommand::Dialogue {
                speaker: None,
                text: "旁白".to_string()
            })
        );
        assert_eq!(
            script.get(5),
            Some(&ScriptCommand::Character {
                name: "Nova".to_string(),
                position: None
            })
        );
    }

    #[test]
    fn test_fade_color_case_insensitive() {
        let script = parse(r#"[{"type": "fade", "color": "White", "duration": 2}]"#).unwrap();
        assert_eq!(
            script.get(0),
            Some(&ScriptCommand::Fade {
                color: FadeColor::White,
                duration: 2.0
            })
        );
    }

    #[test]
    fn test_negative_duration_rejected() {
        let err = parse(r#"[{"type": "wait", "duration": -1}]"#).unwrap_err();
        assert!(matches!(err, ScriptError::InvalidCommand { index: 0, .. }));
    }

    #[test]
    fn test_minigame_kinds() {
        let script = parse(
            r#"[
                {"type": "quiz"},
                {"type": "minigame", "kind": "fuse"},
                {"type": "minigame"},
                {"type": "fuse_game"},
                {"type": "oil_drain_challenge"},
                {"type": "minigame2"}
            ]"#,
        )
        .unwrap();

        assert_eq!(script.get(0), Some(&ScriptCommand::Quiz));
        assert_eq!(
            script.get(1),
            Some(&ScriptCommand::MiniGame {
                kind: MiniGameKind::Fuse
            })
        );
        assert_eq!(
            script.get(2),
            Some(&ScriptCommand::MiniGame {
                kind: MiniGameKind::Generic
            })
        );
        assert_eq!(
            script.get(3),
            Some(&ScriptCommand::MiniGame {
                kind: MiniGameKind::Fuse
            })
        );
        assert_eq!(
            script.get(4),
            Some(&ScriptCommand::MiniGame {
                kind: MiniGameKind::OilDrain
            })
        );
        assert_eq!(
            script.get(5),
            Some(&ScriptCommand::MiniGame {
                kind: MiniGameKind::Generic
            })
        );

        let err = parse(r#"[{"type": "minigame", "kind": "chess"}]"#).unwrap_err();
        assert!(matches!(err, ScriptError::InvalidCommand { index: 0, .. }));
    }

    #[test]
    fn test_warnings_collected() {
        let mut parser = Parser::new();
        let text = r#"{"scenes": {}, "script": [
            {"type": "sound", "file": "rain.wav", "channel": "ambient"},
            {"type": "music", "file": "m.mp3", "stop": true}
        ]}"#;
        parser.parse(text).unwrap();
        assert_eq!(parser.warnings().len(), 2);
        assert!(parser.warnings()[0].contains('0'));

        // 再次解析会清空警告
        parser
            .parse(r#"{"scenes": {}, "script": []}"#)
            .unwrap();
        assert!(parser.warnings().is_empty());
    }

    #[test]
    fn test_extra_fields_ignored() {
        let script = parse(r#"[{"type": "hide_character", "comment": "leave"}]"#).unwrap();
        assert_eq!(script.get(0), Some(&ScriptCommand::HideCharacter));
    }
}
