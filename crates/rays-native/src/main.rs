mod host;
mod snapshot;

use anyhow::Context;
use clap::Parser;
use host::{NativeHost, NativeSurface};
use rays_core::{ConfigPatch, LightRaysConfig, RaysInstance, RaysOrigin, Rgb};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use winit::{
    event::*,
    event_loop::EventLoop,
    window::{Window, WindowBuilder},
};

type NativeInstance = RaysInstance<NativeHost, NativeSurface>;

/// Desktop preview of the light-rays background.
#[derive(Parser, Debug)]
#[command(name = "rays-native", version)]
struct Args {
    /// TOML file of widget props, applied over the hero preset
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    origin: Option<RaysOrigin>,
    /// Ray color as #rrggbb
    #[arg(long)]
    color: Option<String>,
    #[arg(long, default_value_t = 960)]
    width: u32,
    #[arg(long, default_value_t = 540)]
    height: u32,
    /// Write one CPU-rendered frame to this PNG instead of opening a window
    #[arg(long)]
    snapshot: Option<PathBuf>,
    /// Animation time of the snapshot, in seconds
    #[arg(long, default_value_t = 0.0)]
    time: f32,
    /// Snapshot background as #rrggbb
    #[arg(long, default_value = "#000000")]
    background: String,
}

fn load_config(args: &Args) -> anyhow::Result<LightRaysConfig> {
    let mut config = LightRaysConfig::hero();
    if let Some(path) = &args.config {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let patch: ConfigPatch =
            toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
        config.apply(&patch);
    }
    if let Some(origin) = args.origin {
        config.origin = origin;
    }
    if let Some(color) = &args.color {
        config.color = Rgb::from_hex(color)?;
    }
    Ok(config)
}

fn begin_init(
    inst: &mut NativeInstance,
    gpu: &wgpu::Instance,
    window: &Arc<Window>,
    visible: bool,
) {
    if let Some(ticket) = inst.set_visible(visible) {
        let result = pollster::block_on(NativeSurface::create(gpu, window.clone(), ticket.size));
        inst.finish_init(ticket, result);
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;

    if let Some(path) = &args.snapshot {
        let background = Rgb::from_hex(&args.background)?;
        return snapshot::write(path, &config, args.width, args.height, args.time, background);
    }

    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Light Rays (native)")
            .with_inner_size(winit::dpi::LogicalSize::new(args.width, args.height))
            .with_transparent(true)
            .build(&event_loop)?,
    );

    let gpu = wgpu::Instance::default();
    let mut inst = NativeInstance::new(config, NativeHost::new(window.clone()));
    inst.mount();
    begin_init(&mut inst, &gpu, &window, true);

    let start = Instant::now();
    event_loop.run(move |event, elwt| {
        let Event::WindowEvent { event, .. } = event else {
            return;
        };
        match event {
            WindowEvent::CloseRequested => {
                inst.unmount();
                elwt.exit();
            }
            WindowEvent::Occluded(occluded) if inst.host().observing => {
                begin_init(&mut inst, &gpu, &window, !occluded);
            }
            WindowEvent::Resized(_) if inst.host().resize_attached => inst.on_resize(),
            WindowEvent::CursorMoved { position, .. } if inst.host().pointer_attached => {
                let uv = inst.host().pointer_uv(position.x, position.y);
                inst.on_pointer_move(uv);
            }
            WindowEvent::RedrawRequested => {
                if inst.host_mut().take_scheduled().is_some() {
                    inst.on_frame(start.elapsed().as_secs_f64() * 1000.0);
                }
            }
            _ => {}
        }
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_overrides_apply_over_the_hero_preset() {
        let args = Args::try_parse_from([
            "rays-native",
            "--origin",
            "bottom-left",
            "--color",
            "#ff0000",
        ])
        .unwrap();
        let config = load_config(&args).unwrap();
        assert_eq!(config.origin, RaysOrigin::BottomLeft);
        assert_eq!(config.color, Rgb::new(1.0, 0.0, 0.0));
        assert!(config.pulsating);
    }

    #[test]
    fn unknown_origin_is_rejected_by_the_parser() {
        assert!(Args::try_parse_from(["rays-native", "--origin", "middle"]).is_err());
    }

    #[test]
    fn config_file_is_layered_under_cli_flags() {
        let path = std::env::temp_dir().join(format!("rays-native-{}.toml", std::process::id()));
        std::fs::write(&path, "origin = \"left\"\nspeed = 3.0\nsaturation = 0.5\n").unwrap();
        let args = Args::try_parse_from([
            "rays-native",
            "--config",
            path.to_str().unwrap(),
            "--origin",
            "right",
        ])
        .unwrap();
        let config = load_config(&args).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(config.origin, RaysOrigin::Right);
        assert_eq!(config.speed, 3.0);
        assert_eq!(config.saturation, 0.5);
    }

    #[test]
    fn bad_color_flag_is_an_error() {
        let args = Args::try_parse_from(["rays-native", "--color", "red"]).unwrap();
        assert!(load_config(&args).is_err());
    }
}
