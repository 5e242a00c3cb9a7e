//! End-to-end batch runs through the real backend and the CLI binary.
//!
//! Inputs are synthesized in memory with the `image` and `gif` crates so the
//! tests need no fixture files.

use emote_sizer::archive::export_zip;
use emote_sizer::process::{self, ErrorKind, ProcessConfig};
use emote_sizer::profiles::Role;
use emote_sizer::types::{SourceImage, last_of};
use image::{ImageFormat, RgbaImage};
use std::borrow::Cow;
use std::io::{Cursor, Read};
use std::process::Command;

fn png(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, image::Rgba(rgba));
    let mut out = Vec::new();
    img.write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
        .unwrap();
    out
}

/// A looping GIF with one solid frame per `(palette index, delay)` pair.
/// Palette: 0 = red, 1 = green, 2 = black.
fn gif(size: u16, frames: &[(u8, u16)]) -> Vec<u8> {
    let palette = [255, 0, 0, 0, 255, 0, 0, 0, 0];
    let mut encoder = gif::Encoder::new(Vec::new(), size, size, &palette).unwrap();
    encoder.set_repeat(gif::Repeat::Infinite).unwrap();
    for &(index, delay) in frames {
        let buffer = vec![index; size as usize * size as usize];
        let frame = gif::Frame {
            width: size,
            height: size,
            delay,
            buffer: Cow::Owned(buffer),
            ..Default::default()
        };
        encoder.write_frame(&frame).unwrap();
    }
    encoder.into_inner().unwrap()
}

fn decode_gif_delays(bytes: &[u8]) -> (u16, u16, Vec<u16>) {
    let mut options = gif::DecodeOptions::new();
    options.set_color_output(gif::ColorOutput::RGBA);
    let mut decoder = options.read_info(bytes).unwrap();
    let (w, h) = (decoder.width(), decoder.height());
    let mut delays = Vec::new();
    while let Some(frame) = decoder.read_next_frame().unwrap() {
        delays.push(frame.delay);
    }
    (w, h, delays)
}

// =============================================================================
// Library pipeline
// =============================================================================

#[test]
fn twitch_png_produces_all_six_squares() {
    let source = SourceImage::new("pog.png", "image/png", png(64, 64, [30, 144, 255, 255]));
    let groups = process::run(&[source], "twitch", &ProcessConfig::default(), None).unwrap();

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].role, Role::Emote);
    assert_eq!(groups[1].role, Role::Badge);

    let expected = [
        (Role::Emote, vec![28, 56, 112]),
        (Role::Badge, vec![18, 36, 72]),
    ];
    for (group, (role, sizes)) in groups.iter().zip(expected) {
        assert_eq!(group.role, role);
        assert_eq!(group.files.len(), sizes.len());
        for (file, size) in group.files.iter().zip(sizes) {
            assert_eq!(file.name, format!("pog_{size}x{size}.png"));
            assert_eq!(file.mime_type, "image/png");
            let img = image::load_from_memory(&file.bytes).unwrap();
            assert_eq!((img.width(), img.height()), (size, size));
        }
    }

    assert_eq!(last_of(&groups, Role::Emote).unwrap().name, "pog_112x112.png");
}

#[test]
fn animated_gif_keeps_frames_and_timing_at_every_size() {
    let bytes = gif(40, &[(0, 5), (1, 10), (2, 20)]);
    let source = SourceImage::new("dance.gif", "image/gif", bytes);
    let groups = process::run(&[source], "discord", &ProcessConfig::default(), None).unwrap();

    let emote = &groups[0].files[0];
    assert_eq!(emote.name, "dance_128x128.gif");
    assert_eq!(emote.mime_type, "image/gif");
    assert_eq!(emote.frames, 3);
    assert_eq!(decode_gif_delays(&emote.bytes), (128, 128, vec![5, 10, 20]));

    let badge = &groups[1].files[0];
    assert_eq!(badge.name, "dance_64x64.gif");
    assert_eq!(decode_gif_delays(&badge.bytes), (64, 64, vec![5, 10, 20]));
}

#[test]
fn malformed_gif_fails_the_whole_batch() {
    let good = SourceImage::new("ok.png", "image/png", png(32, 32, [1, 2, 3, 255]));
    let bad = SourceImage::new("broken.gif", "image/gif", b"GIF89a nope".to_vec());
    let err = process::run(&[good, bad], "twitch", &ProcessConfig::default(), None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedAnimation);
    assert!(err.to_string().contains("broken.gif"));
}

#[test]
fn undecodable_static_fails_with_unsupported_format() {
    let bad = SourceImage::new("junk.png", "image/png", vec![0; 16]);
    let err = process::run(&[bad], "youtube", &ProcessConfig::default(), None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedFormat);
}

#[test]
fn jpg_mime_alias_is_decoded_as_jpeg() {
    let img = RgbaImage::from_pixel(40, 40, image::Rgba([90, 40, 200, 255]));
    let rgb = image::DynamicImage::ImageRgba8(img).to_rgb8();
    let mut jpeg = Vec::new();
    rgb.write_to(&mut Cursor::new(&mut jpeg), ImageFormat::Jpeg)
        .unwrap();

    let source = SourceImage::new("pog.jpg", "image/jpg", jpeg);
    let groups = process::run(&[source], "youtube", &ProcessConfig::default(), None).unwrap();
    let file = &groups[0].files[0];
    assert_eq!(file.name, "pog_32x32.jpeg");
    assert_eq!(file.mime_type, "image/jpeg");
    assert_eq!(image::guess_format(&file.bytes).unwrap(), ImageFormat::Jpeg);
}

#[test]
fn unknown_platform_fails() {
    let source = SourceImage::new("pog.png", "image/png", png(8, 8, [0, 0, 0, 255]));
    let err = process::run(&[source], "Twitch", &ProcessConfig::default(), None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownPlatform);
}

#[test]
fn mixed_batch_exports_to_zip() {
    let sources = vec![
        SourceImage::new("pog.png", "image/png", png(48, 48, [200, 0, 0, 255])),
        SourceImage::new("kek.gif", "image/gif", gif(24, &[(0, 4), (1, 4)])),
    ];
    let groups = process::run(&sources, "youtube", &ProcessConfig::default(), None).unwrap();
    let bytes = export_zip(&groups).unwrap();

    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut names: Vec<String> = archive.file_names().map(String::from).collect();
    names.sort();
    // Emote and badge share the 32px size on youtube, so names collapse.
    assert_eq!(names, vec!["kek_32x32.gif", "pog_32x32.png"]);

    let mut entry = archive.by_name("pog_32x32.png").unwrap();
    let mut data = Vec::new();
    entry.read_to_end(&mut data).unwrap();
    let img = image::load_from_memory(&data).unwrap();
    assert_eq!((img.width(), img.height()), (32, 32));
}

// =============================================================================
// CLI
// =============================================================================

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_emote-sizer"))
}

#[test]
fn cli_resize_writes_files_manifest_and_archive() {
    let tmp = tempfile::TempDir::new().unwrap();
    let input = tmp.path().join("pog.png");
    std::fs::write(&input, png(64, 64, [10, 200, 10, 255])).unwrap();
    let out_dir = tmp.path().join("out");

    let output = bin()
        .current_dir(tmp.path())
        .args(["resize", "--platform", "discord", "--zip", "--output"])
        .arg(&out_dir)
        .arg(&input)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    assert!(out_dir.join("pog_128x128.png").exists());
    assert!(out_dir.join("pog_64x64.png").exists());
    assert!(out_dir.join("resized_img.zip").exists());

    let manifest: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(out_dir.join("manifest.json")).unwrap())
            .unwrap();
    assert_eq!(manifest[0]["role"], "emote");
    assert_eq!(manifest[0]["files"][0]["name"], "pog_128x128.png");
    assert_eq!(manifest[1]["role"], "badge");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("001 pog.png (static, 2 sizes)"));
    assert!(stdout.contains("Preview: emote pog_128x128.png, badge pog_64x64.png"));
}

#[test]
fn cli_failure_writes_nothing() {
    let tmp = tempfile::TempDir::new().unwrap();
    let input = tmp.path().join("broken.gif");
    std::fs::write(&input, b"not a gif").unwrap();
    let out_dir = tmp.path().join("out");

    let output = bin()
        .current_dir(tmp.path())
        .args(["resize", "--output"])
        .arg(&out_dir)
        .arg(&input)
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(!out_dir.exists());
}

#[test]
fn cli_platforms_lists_tables() {
    let output = bin().arg("platforms").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("twitch"));
    assert!(stdout.contains("Emotes: 28, 56, 112"));
}

#[test]
fn cli_gen_config_is_loadable() {
    let tmp = tempfile::TempDir::new().unwrap();
    let output = bin().arg("gen-config").output().unwrap();
    assert!(output.status.success());
    let path = tmp.path().join("config.toml");
    std::fs::write(&path, &output.stdout).unwrap();
    let config = emote_sizer::config::load_config_file(&path).unwrap();
    assert_eq!(config, emote_sizer::config::ResizerConfig::default());
}
