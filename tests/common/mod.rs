#![allow(dead_code)]

use patchforge::{image_synth, ImageBuffer, ImageFormat, MaskBuffer, SynthParams, SynthResult};
use std::sync::atomic::AtomicBool;

/// Drive the one-call entry point over a tightly packed buffer.
pub fn run_synth(
    image: &mut [u8],
    width: u32,
    height: u32,
    mask: &[u8],
    format: ImageFormat,
    params: Option<SynthParams>,
) -> SynthResult<()> {
    run_synth_with_cancel(
        image,
        width,
        height,
        mask,
        format,
        params,
        &AtomicBool::new(false),
    )
}

pub fn run_synth_with_cancel(
    image: &mut [u8],
    width: u32,
    height: u32,
    mask: &[u8],
    format: ImageFormat,
    params: Option<SynthParams>,
    cancel: &AtomicBool,
) -> SynthResult<()> {
    let pixelels = format.pixelels_per_pixel();
    let mut buffer = ImageBuffer {
        bytes: image,
        width,
        height,
        row_bytes: width as usize * pixelels,
    };
    let mask = MaskBuffer {
        bytes: mask,
        width,
        height,
        row_bytes: width as usize,
    };
    image_synth(&mut buffer, &mask, format, params, &|_: u32| {}, cancel)
}

pub fn seeded(seed: u64, threads: usize) -> SynthParams {
    SynthParams {
        seed,
        threads,
        ..Default::default()
    }
}

/// Random pixel bytes, reproducible per seed.
pub fn random_bytes(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = fastrand::Rng::with_seed(seed);
    (0..len).map(|_| rng.u8(..)).collect()
}

/// Mask selecting the central block of the image.
pub fn block_mask(width: u32, height: u32) -> Vec<u8> {
    let mut mask = vec![0u8; (width * height) as usize];
    for y in height / 4..height * 3 / 4 {
        for x in width / 4..width * 3 / 4 {
            mask[(y * width + x) as usize] = 255;
        }
    }
    mask
}
