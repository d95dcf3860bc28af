//! `renderglb` - render a binary glTF scene to a PNG or JPEG image

use clap::Parser;
use glb_render::{
    BackendType, Engine, OutputFormat, PrimitiveSelection, RenderConfig, RenderRequest,
    RenderResult,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "renderglb",
    version,
    about = "Render a .glb scene to an 800x600 image",
    long_about = "Loads a binary glTF scene, frames it with an automatic camera and \
                  writes a single PNG or JPEG image.\n\n\
                  Set WGPU_BACKEND (e.g. vulkan, metal, dx12, gl) to choose the GPU API \
                  and RUST_LOG to control log output."
)]
struct Args {
    /// Binary glTF file to render.
    #[arg(short = 'i', long = "input")]
    input: PathBuf,

    /// Existing folder that receives the image.
    #[arg(short = 'o', long = "output")]
    output: PathBuf,

    /// Output file name without extension (random when omitted).
    #[arg(short = 'f', long = "file-name")]
    file_name: Option<String>,

    /// Image type: png, jpg or jpeg.
    #[arg(short = 't', long = "type", default_value = "png")]
    image_type: String,

    /// Render backend: gpu or cpu (cpu is not available).
    #[arg(short = 'r', long = "renderer", default_value = "gpu")]
    renderer: String,

    /// Draw every indexed primitive instead of only the first one.
    #[arg(long)]
    all_primitives: bool,

    /// JPEG quality.
    #[arg(long, default_value = "90", value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: u8,
}

fn run(args: Args) -> RenderResult<PathBuf> {
    let format: OutputFormat = args.image_type.parse()?;
    let backend: BackendType = args.renderer.parse()?;

    let mut request = RenderRequest::new(args.input, args.output)
        .with_format(format)
        .with_backend(backend);
    if let Some(name) = args.file_name {
        request = request.with_output_name(name);
    }

    let config = RenderConfig {
        selection: if args.all_primitives {
            PrimitiveSelection::All
        } else {
            PrimitiveSelection::FirstDrawable
        },
        jpeg_quality: args.quality,
        ..Default::default()
    };

    Engine::new(config).render(&request)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run(Args::parse()) {
        Ok(path) => {
            println!("Rendering completed successfully: {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
