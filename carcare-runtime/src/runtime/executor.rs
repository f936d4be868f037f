//! # Executor 模块
//!
//! 将脚本指令转换为 Command。
//!
//! ## 职责
//!
//! - 读取 ScriptCommand
//! - 产生对应的 Command（音频通道规则在这里归一化）
//! - 更新背景 / 角色状态
//! - 决定是否需要等待

use crate::command::{Command, SoundChannel};
use crate::minigame::MiniGameKind;
use crate::script::ScriptCommand;
use crate::state::{CharacterRef, InterpreterState, WaitingReason};

/// 执行结果
#[derive(Debug, Clone, PartialEq)]
pub struct ExecuteResult {
    /// 产生的命令
    pub commands: Vec<Command>,
    /// 等待原因（如果需要等待）
    pub waiting: Option<WaitingReason>,
}

impl ExecuteResult {
    /// 创建空结果
    fn empty() -> Self {
        Self {
            commands: Vec::new(),
            waiting: None,
        }
    }

    /// 创建单条命令的结果
    fn with_command(command: Command) -> Self {
        Self {
            commands: vec![command],
            waiting: None,
        }
    }

    /// 创建带等待的结果
    fn with_wait(command: Command, waiting: WaitingReason) -> Self {
        Self {
            commands: vec![command],
            waiting: Some(waiting),
        }
    }

    fn minigame(kind: MiniGameKind) -> Self {
        Self::with_wait(
            Command::LaunchMiniGame { kind },
            WaitingReason::WaitForMiniGame(kind),
        )
    }
}

/// 指令执行器
///
/// 负责将单条 ScriptCommand 转换为 Command。
/// 字段在加载时已校验，执行阶段不会失败。
#[derive(Debug, Default)]
pub struct Executor {}

impl Executor {
    /// 创建新的执行器
    pub fn new() -> Self {
        Self {}
    }

    /// 执行单条脚本指令
    pub fn execute(&mut self, command: &ScriptCommand, state: &mut InterpreterState) -> ExecuteResult {
        match command {
            ScriptCommand::Background { file } => {
                state.current_background = Some(file.clone());
                ExecuteResult::with_command(Command::ShowBackground { file: file.clone() })
            }

            ScriptCommand::Character { name, position } => {
                state.current_character = Some(CharacterRef {
                    name: name.clone(),
                    position: *position,
                });
                ExecuteResult::with_command(Command::ShowCharacter {
                    name: name.clone(),
                    position: *position,
                })
            }

            ScriptCommand::HideCharacter => {
                state.current_character = None;
                ExecuteResult::with_command(Command::HideCharacter)
            }

            ScriptCommand::Dialogue { speaker, text } => ExecuteResult::with_wait(
                Command::ShowText {
                    speaker: speaker.clone(),
                    text: text.clone(),
                },
                WaitingReason::WaitForClick,
            ),

            ScriptCommand::Sound {
                file,
                channel,
                looping,
            } => match (channel, file) {
                (SoundChannel::Ambient, Some(file)) if *looping => {
                    ExecuteResult::with_command(Command::PlayAmbient { file: file.clone() })
                }
                // 环境音通道：没有文件或不循环都视为停止
                (SoundChannel::Ambient, _) => ExecuteResult::with_command(Command::StopAmbient),
                (SoundChannel::Sfx, Some(file)) => {
                    ExecuteResult::with_command(Command::PlaySfx { file: file.clone() })
                }
                (SoundChannel::Sfx, None) => ExecuteResult::empty(),
            },

            ScriptCommand::Music {
                file,
                looping,
                stop,
            } => match file {
                Some(file) => ExecuteResult::with_command(Command::PlayMusic {
                    file: file.clone(),
                    looping: *looping,
                }),
                None if *stop => ExecuteResult::with_command(Command::StopMusic),
                None => ExecuteResult::empty(),
            },

            ScriptCommand::Fade { color, duration } => ExecuteResult::with_wait(
                Command::Fade {
                    color: *color,
                    duration: *duration,
                },
                WaitingReason::WaitForAnimation,
            ),

            ScriptCommand::Wait { duration } => ExecuteResult::with_wait(
                Command::Wait {
                    duration: *duration,
                },
                WaitingReason::WaitForAnimation,
            ),

            ScriptCommand::Quiz => ExecuteResult::minigame(MiniGameKind::Quiz),

            ScriptCommand::MiniGame { kind } => ExecuteResult::minigame(*kind),
        }
    }

    /// 快进回放单条指令
    ///
    /// 只保留背景 / 角色变化，对话、音频、动画和小游戏全部跳过。
    pub fn replay(&mut self, command: &ScriptCommand, state: &mut InterpreterState) -> Vec<Command> {
        self.execute(command, state)
            .commands
            .into_iter()
            .filter(Command::is_presentation)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{FadeColor, Position};

    fn run(command: ScriptCommand) -> (ExecuteResult, InterpreterState) {
        let mut state = InterpreterState::default();
        let result = Executor::new().execute(&command, &mut state);
        (result, state)
    }

    #[test]
    fn test_execute_background_updates_state() {
        let (result, state) = run(ScriptCommand::Background {
            file: "bg.png".to_string(),
        });
        assert_eq!(
            result.commands,
            vec![Command::ShowBackground {
                file: "bg.png".to_string()
            }]
        );
        assert!(result.waiting.is_none());
        assert_eq!(state.current_background.as_deref(), Some("bg.png"));
    }

    #[test]
    fn test_execute_character_and_hide() {
        let mut state = InterpreterState::default();
        let mut executor = Executor::new();

        executor.execute(
            &ScriptCommand::Character {
                name: "Nova".to_string(),
                position: Some(Position::Right),
            },
            &mut state,
        );
        assert_eq!(
            state.current_character,
            Some(CharacterRef {
                name: "Nova".to_string(),
                position: Some(Position::Right)
            })
        );

        let result = executor.execute(&ScriptCommand::HideCharacter, &mut state);
        assert_eq!(result.commands, vec![Command::HideCharacter]);
        assert!(state.current_character.is_none());
    }

    #[test]
    fn test_execute_dialogue_waits_for_click() {
        let (result, _) = run(ScriptCommand::Dialogue {
            speaker: Some("X".to_string()),
            text: "Hi".to_string(),
        });
        assert_eq!(result.waiting, Some(WaitingReason::WaitForClick));
    }

    #[test]
    fn test_ambient_channel_rules() {
        let (result, _) = run(ScriptCommand::Sound {
            file: Some("rain.wav".to_string()),
            channel: SoundChannel::Ambient,
            looping: true,
        });
        assert_eq!(
            result.commands,
            vec![Command::PlayAmbient {
                file: "rain.wav".to_string()
            }]
        );

        // 有文件但不循环：停止
        let (result, _) = run(ScriptCommand::Sound {
            file: Some("rain.wav".to_string()),
            channel: SoundChannel::Ambient,
            looping: false,
        });
        assert_eq!(result.commands, vec![Command::StopAmbient]);

        let (result, _) = run(ScriptCommand::Sound {
            file: None,
            channel: SoundChannel::Ambient,
            looping: true,
        });
        assert_eq!(result.commands, vec![Command::StopAmbient]);
    }

    #[test]
    fn test_sfx_channel_rules() {
        let (result, _) = run(ScriptCommand::Sound {
            file: Some("horn.wav".to_string()),
            channel: SoundChannel::Sfx,
            looping: true,
        });
        assert_eq!(
            result.commands,
            vec![Command::PlaySfx {
                file: "horn.wav".to_string()
            }]
        );

        let (result, _) = run(ScriptCommand::Sound {
            file: None,
            channel: SoundChannel::Sfx,
            looping: false,
        });
        assert!(result.commands.is_empty());
    }

    #[test]
    fn test_music_rules() {
        let (result, _) = run(ScriptCommand::Music {
            file: Some("theme.mp3".to_string()),
            looping: true,
            stop: true,
        });
        assert_eq!(
            result.commands,
            vec![Command::PlayMusic {
                file: "theme.mp3".to_string(),
                looping: true
            }]
        );

        let (result, _) = run(ScriptCommand::Music {
            file: None,
            looping: false,
            stop: true,
        });
        assert_eq!(result.commands, vec![Command::StopMusic]);

        let (result, _) = run(ScriptCommand::Music {
            file: None,
            looping: true,
            stop: false,
        });
        assert!(result.commands.is_empty());
    }

    #[test]
    fn test_fade_and_wait_block_on_animation() {
        let (result, _) = run(ScriptCommand::Fade {
            color: FadeColor::White,
            duration: 0.5,
        });
        assert_eq!(result.waiting, Some(WaitingReason::WaitForAnimation));

        let (result, _) = run(ScriptCommand::Wait { duration: 2.0 });
        assert_eq!(result.commands, vec![Command::Wait { duration: 2.0 }]);
        assert_eq!(result.waiting, Some(WaitingReason::WaitForAnimation));
    }

    #[test]
    fn test_quiz_launches_quiz_minigame() {
        let (result, _) = run(ScriptCommand::Quiz);
        assert_eq!(
            result.commands,
            vec![Command::LaunchMiniGame {
                kind: MiniGameKind::Quiz
            }]
        );
        assert_eq!(
            result.waiting,
            Some(WaitingReason::WaitForMiniGame(MiniGameKind::Quiz))
        );
    }

    #[test]
    fn test_replay_keeps_only_presentation() {
        let mut state = InterpreterState::default();
        let mut executor = Executor::new();

        let dialogue = ScriptCommand::Dialogue {
            speaker: None,
            text: "...".to_string(),
        };
        assert!(executor.replay(&dialogue, &mut state).is_empty());
        assert!(
            executor
                .replay(
                    &ScriptCommand::MiniGame {
                        kind: MiniGameKind::Fuse
                    },
                    &mut state
                )
                .is_empty()
        );

        let bg = ScriptCommand::Background {
            file: "garage.png".to_string(),
        };
        assert_eq!(executor.replay(&bg, &mut state).len(), 1);
        assert_eq!(state.current_background.as_deref(), Some("garage.png"));
    }
}
