use argh::FromArgs;
use serde::Deserialize;
use std::{fs::File, io::BufReader, path::PathBuf};

use retouch::{
    editor::{Command, EditSession, EditorError, SessionOptions},
    image::{ImageError, RasterImage},
};

#[derive(FromArgs)]
/// Replay a scripted editing session on an image and save the displayed result
struct Args {
    /// path to an input image
    #[argh(option, short = 'i')]
    image_path: PathBuf,

    /// path to the JSON script with the session options and events
    #[argh(option, short = 's')]
    script_path: PathBuf,

    /// path to the output PNG image
    #[argh(option, short = 'o')]
    output_path: PathBuf,
}

/// A recorded editing session.
#[derive(Deserialize)]
struct Script {
    #[serde(default)]
    options: SessionOptions,
    events: Vec<Event>,
}

/// An input event in image-local coordinates.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Event {
    PointerDown([f32; 2]),
    PointerMove([f32; 2]),
    PointerUp,
    Key(char),
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    // read the script
    let script: Script = serde_json::from_reader(BufReader::new(File::open(&args.script_path)?))?;

    // read the image as rgba8
    let rgba = image::open(&args.image_path)?.to_rgba8();
    let (width, height) = rgba.dimensions();
    let image = RasterImage::new([width as usize, height as usize].into(), rgba.into_raw())?;

    let mut session = EditSession::with_options(image, script.options)?;
    println!("Editing {}: {}", session.original().size(), session.status());

    for event in script.events {
        match event {
            Event::PointerDown([x, y]) => session.pointer_down(x, y),
            Event::PointerMove([x, y]) => match session.pointer_move(x, y) {
                // the host would skip this frame and keep going
                Err(EditorError::Image(ImageError::NonInvertibleTransform)) => {
                    log::warn!("skipping frame at ({x}, {y}): transform is not invertible");
                }
                res => res?,
            },
            Event::PointerUp => session.pointer_up(),
            Event::Key(key) => match Command::from_key(key) {
                Some(cmd) => session.apply_command(cmd)?,
                None => log::warn!("no command bound to key {key:?}"),
            },
        }
    }

    println!("Final state: {}", session.status());

    // write the displayed image
    let displayed = session.displayed();
    let output = image::RgbaImage::from_raw(
        displayed.width() as u32,
        displayed.height() as u32,
        displayed.as_slice().to_vec(),
    )
    .ok_or("displayed buffer does not match its size")?;
    output.save(&args.output_path)?;

    println!("Saved {}", args.output_path.display());

    Ok(())
}
