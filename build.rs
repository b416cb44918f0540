use std::fs;
use std::path::Path;
use serde::Deserialize;

#[derive(Deserialize)]
struct Config {
    app: App,
    geometry: Geometry,
}

#[derive(Deserialize)]
struct App {
    name: String,
    version: String,
}

#[derive(Deserialize)]
struct Geometry {
    sample_rate: u32,
    channels: u32,
    frame_duration_ms: u32,
}


// 在编译时读取 config.toml 并设置环境变量
fn main() {
    println!("cargo:rerun-if-changed=config.toml");

    let config_path = Path::new("config.toml");
    if !config_path.exists() {
        panic!("config.toml not found!");
    }

    let config_str = fs::read_to_string(config_path).expect("Failed to read config.toml");
    let config: Config = toml::from_str(&config_str).expect("Failed to parse config.toml");

    // 应用信息
    println!("cargo:rustc-env=APP_NAME={}", config.app.name);
    println!("cargo:rustc-env=APP_VERSION={}", config.app.version);

    // 帧几何配置
    println!("cargo:rustc-env=FRAME_SAMPLE_RATE={}", config.geometry.sample_rate);
    println!("cargo:rustc-env=FRAME_CHANNELS={}", config.geometry.channels);
    println!("cargo:rustc-env=FRAME_DURATION_MS={}", config.geometry.frame_duration_ms);
}
