//! CarCare - 终端宿主
//!
//! 加载配置、初始化日志与音频，运行主菜单。

use std::process::ExitCode;

use anyhow::Context;
use tracing::{Level, error, info, warn};

use carcare_host::audio::{AudioBackend, NullAudioBackend};
use carcare_host::config::CONFIG_FILE;
use carcare_host::{App, AppConfig, HostState, TerminalFrontend};

fn main() -> ExitCode {
    let config = AppConfig::load(CONFIG_FILE);
    init_logging(&config.debug.log_level);

    if let Err(e) = config.validate() {
        warn!(error = %e, "配置校验失败，继续使用");
    }

    if let Err(e) = run(config) {
        error!(error = %format!("{:#}", e), "运行失败");
    }
    ExitCode::SUCCESS
}

fn init_logging(level: &str) {
    let level = level.parse::<Level>().unwrap_or(Level::INFO);
    tracing_subscriber::fmt()
        .with_max_level(level)
        .init();
}

fn run(config: AppConfig) -> anyhow::Result<()> {
    info!(
        script = ?config.script_path,
        assets = ?config.assets_root,
        frame_rate = config.frame_rate,
        "CarCare 启动"
    );

    let frame_rate = config.frame_rate;
    let state = HostState::new(config, audio_backend());
    let mut frontend = TerminalFrontend::new(frame_rate);

    App::new(state).run(&mut frontend).context("主菜单循环异常退出")?;
    Ok(())
}

#[cfg(feature = "rodio")]
fn audio_backend() -> Box<dyn AudioBackend> {
    match carcare_host::audio::RodioAudioBackend::new() {
        Ok(backend) => Box::new(backend),
        Err(e) => {
            warn!(error = %e, "音频设备不可用，静音运行");
            Box::new(NullAudioBackend::new())
        }
    }
}

#[cfg(not(feature = "rodio"))]
fn audio_backend() -> Box<dyn AudioBackend> {
    Box::new(NullAudioBackend::new())
}
