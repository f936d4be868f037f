//! # 读档快进集成测试
//!
//! 验证 `resume_at(k)` 重建的展示状态与从头游玩到第 k 条完全一致。

use carcare_runtime::{
    Command, Interpreter, MiniGameOutcome, Phase, Position, RuntimeInput, Script, WaitingReason,
};

const SCRIPT: &str = r#"{
    "scenes": {},
    "script": [
        {"type": "background", "file": "images/garage.png"},
        {"type": "music", "file": "audio/theme.ogg", "loop": true},
        {"type": "character", "name": "chihebNeutral"},
        {"type": "dialogue", "speaker": "Chiheb", "text": "Welcome"},
        {"type": "sound", "file": "audio/wind.ogg", "channel": "ambient", "loop": true},
        {"type": "fade", "color": "black", "duration": 0.5},
        {"type": "background", "file": "images/black_screen.png"},
        {"type": "wait", "duration": 2},
        {"type": "character", "name": "Nebula", "position": "right"},
        {"type": "fuse_game"},
        {"type": "hide_character"},
        {"type": "dialogue", "text": "Later that day"},
        {"type": "quiz"},
        {"type": "dialogue", "speaker": "Nebula", "text": "Bye"}
    ]
}"#;

/// 展示状态模型：只跟踪背景与角色
#[derive(Debug, Clone, Default, PartialEq)]
struct Stage {
    background: Option<String>,
    character: Option<(String, Option<Position>)>,
}

impl Stage {
    fn apply(&mut self, commands: &[Command]) {
        for command in commands {
            match command {
                Command::ShowBackground { file } => self.background = Some(file.clone()),
                Command::ShowCharacter { name, position } => {
                    self.character = Some((name.clone(), *position))
                }
                Command::HideCharacter => self.character = None,
                _ => {}
            }
        }
    }
}

fn input_for(waiting: &WaitingReason) -> Option<RuntimeInput> {
    match waiting {
        WaitingReason::None => None,
        WaitingReason::WaitForClick => Some(RuntimeInput::Click),
        WaitingReason::WaitForAnimation => Some(RuntimeInput::AnimationFinished),
        WaitingReason::WaitForMiniGame(_) => Some(RuntimeInput::minigame_finished(
            MiniGameOutcome::Lost,
        )),
    }
}

/// 从头游玩，记录每个阻塞点的 (活动索引, 展示状态, 阻塞后下一次 tick 的输出)
fn play_through(script: &Script) -> Vec<(usize, Stage)> {
    let mut interpreter = Interpreter::new(script.clone());
    let mut stage = Stage::default();
    let mut stops = Vec::new();
    let mut input = None;

    loop {
        let (commands, waiting) = interpreter.tick(input.take()).unwrap();
        stage.apply(&commands);
        if !waiting.is_waiting() {
            break;
        }
        stops.push((interpreter.active_index(), stage.clone()));
        input = input_for(&waiting);
    }
    stops
}

#[test]
fn test_resume_at_every_blocking_point() {
    let script = Script::from_json(SCRIPT).unwrap();
    let stops = play_through(&script);
    assert_eq!(
        stops.iter().map(|(index, _)| *index).collect::<Vec<_>>(),
        [3, 5, 7, 9, 11, 12, 13]
    );

    for (index, played) in stops {
        let (mut interpreter, replay) = Interpreter::resume_at(script.clone(), index);
        assert!(replay.iter().all(Command::is_presentation));

        let mut stage = Stage::default();
        stage.apply(&replay);
        let (commands, _) = interpreter.tick(None).unwrap();
        stage.apply(&commands);

        assert_eq!(stage, played, "resume at {}", index);
        assert_eq!(interpreter.active_index(), index);
    }
}

#[test]
fn test_resume_at_any_index_runs_to_end() {
    let script = Script::from_json(SCRIPT).unwrap();

    for start in 0..=script.len() + 2 {
        let (mut interpreter, _) = Interpreter::resume_at(script.clone(), start);
        let mut input = None;
        let mut ticks = 0;

        loop {
            let (_, waiting) = interpreter.tick(input.take()).unwrap();
            if !waiting.is_waiting() {
                break;
            }
            input = input_for(&waiting);
            ticks += 1;
            assert!(ticks <= script.len());
        }

        assert_eq!(interpreter.phase(), Phase::Terminated);
        assert_eq!(interpreter.position(), script.len());
    }
}

#[test]
fn test_replay_skips_audio_and_effects() {
    let script = Script::from_json(SCRIPT).unwrap();
    let (_, replay) = Interpreter::resume_at(script, 11);

    assert_eq!(
        replay,
        [
            Command::ShowBackground {
                file: "images/garage.png".to_string()
            },
            Command::ShowCharacter {
                name: "chihebNeutral".to_string(),
                position: None
            },
            Command::ShowBackground {
                file: "images/black_screen.png".to_string()
            },
            Command::ShowCharacter {
                name: "Nebula".to_string(),
                position: Some(Position::Right)
            },
            Command::HideCharacter,
        ]
    );
}
