use std::process::ExitCode;

use clap::Parser;
use opus_frame_check::cli::Cli;
use opus_frame_check::config::Config;
use opus_frame_check::{HarnessError, OpusFrameDecoder, payload};

fn main() -> anyhow::Result<ExitCode> {
    // 初始化日志
    env_logger::init();

    let cli = Cli::parse();

    // 加载配置，命令行参数覆盖编译期默认值
    let config = Config::new().map_err(anyhow::Error::msg)?;
    let geometry = cli.geometry(config.geometry);

    if let Some(mode) = cli.mode {
        log::info!("Payload mode {:?} requested; whole file is always one frame", mode);
    }

    println!("{} v{}", config.app_name, config.app_version);

    // 先校验几何参数，再计算缓冲区大小
    if let Err(e) = geometry.validate() {
        return Ok(fail(&e));
    }

    println!(
        "Decoder geometry: {} Hz, {} channel(s), {:?} frame",
        geometry.sample_rate,
        geometry.channels,
        geometry.frame_duration()
    );
    println!(
        "Expected PCM samples per frame: {} ({} per channel)",
        geometry.max_output_samples(),
        geometry.samples_per_channel()
    );

    let payload = match payload::read_payload(&cli.input) {
        Ok(data) => data,
        Err(e) => return Ok(fail(&e)),
    };
    println!("Read {} bytes from {}", payload.len(), cli.input.display());

    match opus_frame_check::decode_to_file(&cli.input, &payload, geometry, OpusFrameDecoder::new) {
        Ok(outcome) => {
            let frame = &outcome.frame;
            println!(
                "Decoded {} byte payload into {} samples/ch at {} Hz, {} ch ({:.2} ms)",
                frame.payload_len(),
                frame.samples_per_channel(),
                frame.sample_rate(),
                frame.channels(),
                frame.duration_ms()
            );
            println!(
                "Saved {} bytes of PCM to {}",
                outcome.bytes_written,
                outcome.output.display()
            );
            println!("Frames decoded: 1");
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => Ok(fail(&e)),
    }
}

fn fail(e: &HarnessError) -> ExitCode {
    println!("Error: {}", e);
    println!("Frames decoded: 0");
    ExitCode::from(e.exit_code())
}
